use serde::Serialize;
use serde_json::Value;

use crate::commands::{load_effective_catalog, CommandResult};

#[derive(Debug, Serialize)]
struct CatalogRow {
    category: String,
    model: String,
    price: String,
    priority: bool,
}

pub fn run() -> CommandResult {
    let catalog = match load_effective_catalog("catalog") {
        Ok(catalog) => catalog,
        Err(result) => return *result,
    };

    let categories = catalog.categories().len();
    let rows: Vec<CatalogRow> = catalog
        .items()
        .iter()
        .map(|item| CatalogRow {
            category: item.category.clone(),
            model: item.model.clone(),
            price: item.price.to_string(),
            priority: item.priority,
        })
        .collect();

    let message = format!("{} items across {} categories", rows.len(), categories);
    CommandResult::success_with_data(
        "catalog",
        message,
        serde_json::to_value(rows).unwrap_or(Value::Null),
    )
}
