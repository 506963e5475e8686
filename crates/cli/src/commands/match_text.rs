use rigquote_core::engine::assemble::line_items;
use rigquote_core::QuoteEngine;
use serde_json::json;

use crate::commands::{load_effective_catalog, CommandResult};

pub fn run(text: &str) -> CommandResult {
    let catalog = match load_effective_catalog("match") {
        Ok(catalog) => catalog,
        Err(result) => return *result,
    };

    let selection = QuoteEngine::new().resolve_text(&catalog, text);
    let resolved = !selection.is_unresolved();
    let lines = line_items(&selection, &[]);

    tracing::info!(
        event_name = "quote.match.resolved",
        resolved,
        line_count = lines.len(),
        "free text resolved against catalog"
    );

    let message = if resolved {
        "selection resolved from free text"
    } else {
        "no catalog entries matched the input"
    };
    CommandResult::success_with_data("match", message, json!({ "resolved": resolved, "lines": lines }))
}
