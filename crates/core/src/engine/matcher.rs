//! Free-text to selection resolution.
//!
//! Candidate (category, model) pairs are tested longest-model-first so a
//! specific SKU is never shadowed by a shorter name that happens to be a
//! substring of it. Substring checks run on a lowercased, whitespace-stripped
//! view; quantity extraction runs against the original input.

use regex::Regex;

use crate::domain::catalog::{Catalog, CatalogItem};
use crate::domain::selection::{Selection, Slot};

/// Resolves a free-text bundle description against the catalog. Categories
/// with no match are left empty; the caller decides how to surface an
/// entirely unresolved result.
pub fn match_selection(catalog: &Catalog, input: &str) -> Selection {
    let mut selection = Selection::initial();
    if input.trim().is_empty() {
        return selection;
    }

    let mut working = input.to_lowercase();

    // Stable sort: equal lengths keep catalog enumeration order, which is
    // the documented tie-break when two categories share a model string.
    let mut candidates: Vec<&CatalogItem> = catalog.items().iter().collect();
    candidates.sort_by(|a, b| b.model.len().cmp(&a.model.len()));

    let mut group_filled = 0usize;
    for item in candidates {
        let normalized = strip_whitespace(&item.model.to_lowercase());
        if normalized.is_empty() || !strip_whitespace(&working).contains(&normalized) {
            continue;
        }

        let Some(slot) = target_slot(&item.category, &mut group_filled) else {
            continue;
        };
        if selection.choice(slot).model.is_some() {
            continue;
        }

        selection.set_model(slot, item.model.clone());
        let quantity = extract_quantity(input, &item.model, &normalized).unwrap_or(1);
        selection.set_quantity(slot, quantity);

        consume_first_occurrence(&mut working, &item.model.to_lowercase());
    }

    selection
}

/// Trailing quantity marker after the model text: `<model> ... *N` or
/// `<model> ... xN`, not crossing a `/` part separator. First match wins.
pub fn extract_quantity(input: &str, model: &str, normalized: &str) -> Option<u32> {
    let pattern = format!(
        "(?i)(?:{}|{})[^/]*?[*x]\\s*(\\d+)",
        regex::escape(model),
        regex::escape(normalized)
    );
    let regex = Regex::new(&pattern).ok()?;
    regex.captures(input)?.get(1)?.as_str().parse().ok()
}

/// Maps a catalog category onto its next open slot. Slot groups (the two
/// storage slots) fill in encounter order; once the group is exhausted,
/// further matches for that category are dropped.
fn target_slot(category: &str, group_filled: &mut usize) -> Option<Slot> {
    match Slot::slots_for_category(category) {
        [] => None,
        [single] => Some(*single),
        group => {
            let slot = group.get(*group_filled).copied()?;
            *group_filled += 1;
            Some(slot)
        }
    }
}

fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Removes the claimed model text from the working input so a shorter
/// candidate cannot re-match the same span later in the pass.
fn consume_first_occurrence(working: &mut String, needle: &str) {
    if let Some(position) = working.find(needle) {
        working.replace_range(position..position + needle.len(), "");
    }
}
