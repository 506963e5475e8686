use rigquote_core::engine::assemble::line_items;
use rigquote_core::engine::search::parse_budget;
use rigquote_core::{DomainError, QuoteEngine, SearchOutcome};
use serde_json::json;

use crate::commands::{load_effective_catalog, CommandResult};

pub fn run(text: &str) -> CommandResult {
    let catalog = match load_effective_catalog("recommend") {
        Ok(catalog) => catalog,
        Err(result) => return *result,
    };

    let budget = parse_budget(text)
        .map(|value| value.to_string())
        .unwrap_or_else(|| "unconstrained".to_string());
    match QuoteEngine::new().recommend(&catalog, text) {
        Ok(SearchOutcome::Bundle(selection)) => {
            let lines = line_items(&selection, &[]);
            tracing::info!(
                event_name = "quote.recommend.bundle",
                budget = %budget,
                line_count = lines.len(),
                "budget search selected a bundle"
            );
            CommandResult::success_with_data(
                "recommend",
                "recommended bundle assembled",
                json!({ "feasible": true, "lines": lines }),
            )
        }
        Ok(SearchOutcome::Infeasible) => CommandResult::success_with_data(
            "recommend",
            "no feasible combination for the stated budget",
            json!({ "feasible": false }),
        ),
        Err(error @ DomainError::SearchSpaceExceeded { .. }) => {
            CommandResult::failure("recommend", "search_space", error.to_string(), 4)
        }
        Err(error) => CommandResult::failure("recommend", "domain", error.to_string(), 5),
    }
}
