use rigquote_core::engine::assemble::format_money;
use rigquote_core::{QuoteEngine, QuoteSession, RateTables};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::commands::{load_effective_catalog, CommandResult};

#[derive(Debug, Serialize)]
struct QuoteData {
    lines: Vec<String>,
    cost_total: String,
    price_before_discount: String,
    final_price: String,
    document: String,
}

pub fn run(
    text: &str,
    discount: Option<&str>,
    markup: Option<&str>,
    rebate: Decimal,
) -> CommandResult {
    let catalog = match load_effective_catalog("quote") {
        Ok(catalog) => catalog,
        Err(result) => return *result,
    };

    let tables = RateTables::seed();
    let engine = QuoteEngine::new();

    let mut session = QuoteSession::new();
    session.apply_bundle(engine.resolve_text(&catalog, text));
    session.select_discount(discount.map(str::to_string));
    session.select_markup(markup.map(str::to_string));
    session.set_special_rebate(rebate);

    let evaluation = engine.evaluate(&catalog, &session, &tables);

    tracing::info!(
        event_name = "quote.priced",
        final_price = %format_money(evaluation.totals.final_price),
        line_count = evaluation.document.lines.len(),
        "quote assembled from free text"
    );

    let data = QuoteData {
        lines: evaluation.document.lines.clone(),
        cost_total: format_money(evaluation.totals.cost_total),
        price_before_discount: format_money(evaluation.totals.price_before_discount),
        final_price: format_money(evaluation.totals.final_price),
        document: evaluation.document.text,
    };
    CommandResult::success_with_data(
        "quote",
        "quote assembled",
        serde_json::to_value(data).unwrap_or(Value::Null),
    )
}
