//! Budget-constrained bundle search.
//!
//! Candidate lists per category are deliberately narrowed (free-text token
//! matches, then priority-flagged items, then the whole category) to bound
//! the Cartesian product. The enumeration itself is capped; blowing the cap
//! is an explicit error, not a silent truncation.

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::Catalog;
use crate::domain::selection::{Selection, Slot};
use crate::errors::DomainError;

/// Hard ceiling on enumerated combinations.
pub const SEARCH_TUPLE_CAP: u64 = 10_000;

/// Parsed budgets at or below this are treated as noise, too small to be a
/// whole-system budget.
const BUDGET_NOISE_FLOOR: i64 = 1000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    /// The best bundle for the request; budget mode maximizes total price
    /// without exceeding the budget, unconstrained mode maximizes outright.
    Bundle(Selection),
    /// Every candidate combination exceeded the stated budget.
    Infeasible,
}

#[derive(Clone, Debug)]
struct Candidate {
    model: Option<String>,
    price: Decimal,
}

/// Extracts a budget from free text: a number preceded by start-of-text,
/// whitespace, or budget vocabulary, with an optional trailing unit marker.
/// The ten-thousand marker multiplies by 10_000 and the thousand marker by
/// 1_000; values at or below the noise floor are discarded.
pub fn parse_budget(input: &str) -> Option<Decimal> {
    let lowered = input.to_lowercase();
    let regex = Regex::new(
        r"(?:budget|price|around|预算|价格|价位|左右|^|\s)(\d+(?:\.\d+)?)\s*(元|块|w|k|万|千)?",
    )
    .ok()?;

    let captures = regex.captures(&lowered)?;
    let mut amount: Decimal = captures.get(1)?.as_str().parse().ok()?;
    match captures.get(2).map(|unit| unit.as_str()) {
        Some("w") | Some("万") => amount *= Decimal::from(10_000),
        Some("k") | Some("千") => amount *= Decimal::from(1_000),
        _ => {}
    }

    (amount > Decimal::from(BUDGET_NOISE_FLOOR)).then_some(amount)
}

/// Parses a budget out of the text (absent budget means unconstrained) and
/// runs the search.
pub fn recommend(catalog: &Catalog, input: &str) -> Result<SearchOutcome, DomainError> {
    let budget = parse_budget(input).unwrap_or(Decimal::ZERO);
    search(catalog, input, budget)
}

/// Budget 0 means unconstrained: return the highest-priced combination.
pub fn search(
    catalog: &Catalog,
    input: &str,
    budget: Decimal,
) -> Result<SearchOutcome, DomainError> {
    let lowered = input.to_lowercase();
    let lists: Vec<Vec<Candidate>> =
        Slot::SEARCHED.iter().map(|slot| candidates_for(catalog, *slot, &lowered)).collect();

    let combinations = lists.iter().fold(1u64, |acc, list| acc.saturating_mul(list.len() as u64));
    if combinations > SEARCH_TUPLE_CAP {
        return Err(DomainError::SearchSpaceExceeded { combinations, cap: SEARCH_TUPLE_CAP });
    }

    let constrained = budget > Decimal::ZERO;
    let mut best: Option<(Vec<usize>, Decimal)> = None;
    let mut indices = vec![0usize; lists.len()];

    loop {
        let total: Decimal =
            indices.iter().zip(&lists).map(|(&index, list)| list[index].price).sum();

        let qualifies = !constrained || total <= budget;
        // Strict comparison keeps the first-seen tuple on ties.
        if qualifies && best.as_ref().map_or(true, |(_, best_total)| total > *best_total) {
            best = Some((indices.clone(), total));
        }

        if !advance(&mut indices, &lists) {
            break;
        }
    }

    let Some((winning, _)) = best else {
        return Ok(SearchOutcome::Infeasible);
    };

    let mut selection = Selection::initial();
    for ((slot, list), index) in Slot::SEARCHED.iter().zip(&lists).zip(winning) {
        if let Some(model) = &list[index].model {
            selection.set_model(*slot, model.clone());
        }
    }

    Ok(SearchOutcome::Bundle(selection))
}

/// Token-anchored candidates first, then priority items, then the whole
/// category. A category with no catalog items contributes a single empty
/// choice at price 0 so it never blocks the search.
fn candidates_for(catalog: &Catalog, slot: Slot, lowered_input: &str) -> Vec<Candidate> {
    let items: Vec<_> = catalog.items_in(slot.category()).collect();
    if items.is_empty() {
        return vec![Candidate { model: None, price: Decimal::ZERO }];
    }

    let anchored: Vec<_> = items
        .iter()
        .filter(|item| {
            item.model
                .to_lowercase()
                .split(['/', '+', '-', ',', ' ', '\t'])
                .any(|token| !token.is_empty() && lowered_input.contains(token))
        })
        .copied()
        .collect();

    let pool: Vec<_> = if !anchored.is_empty() {
        anchored
    } else {
        let priority: Vec<_> = items.iter().filter(|item| item.priority).copied().collect();
        if priority.is_empty() {
            items
        } else {
            priority
        }
    };

    pool.into_iter()
        .map(|item| Candidate { model: Some(item.model.clone()), price: item.price })
        .collect()
}

/// Odometer step over the candidate lists; false once every tuple was seen.
fn advance(indices: &mut [usize], lists: &[Vec<Candidate>]) -> bool {
    for position in (0..indices.len()).rev() {
        indices[position] += 1;
        if indices[position] < lists[position].len() {
            return true;
        }
        indices[position] = 0;
    }
    false
}
