use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub category: String,
    pub model: String,
    pub price: Decimal,
    #[serde(default)]
    pub priority: bool,
}

/// On-disk shape of a catalog snapshot. `last_updated` mirrors the metadata
/// the catalog store keeps alongside its rows; the engine only carries it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<CatalogItem>,
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    prices: HashMap<String, HashMap<String, Decimal>>,
}

impl Catalog {
    /// Builds the category -> model -> price index. A later item with the
    /// same (category, model) replaces the earlier one, matching the
    /// upsert-on-conflict behavior of the catalog store.
    pub fn new(items: Vec<CatalogItem>) -> Self {
        let mut deduped: Vec<CatalogItem> = Vec::with_capacity(items.len());
        for item in items {
            match deduped
                .iter_mut()
                .find(|existing| existing.category == item.category && existing.model == item.model)
            {
                Some(existing) => *existing = item,
                None => deduped.push(item),
            }
        }

        let mut prices: HashMap<String, HashMap<String, Decimal>> = HashMap::new();
        for item in &deduped {
            prices.entry(item.category.clone()).or_default().insert(item.model.clone(), item.price);
        }

        Self { items: deduped, prices }
    }

    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self::new(snapshot.items)
    }

    pub fn price_of(&self, category: &str, model: &str) -> Option<Decimal> {
        self.prices.get(category).and_then(|models| models.get(model)).copied()
    }

    pub fn models(&self, category: &str) -> Vec<&str> {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .map(|item| item.model.as_str())
            .collect()
    }

    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category.as_str()) {
                seen.push(item.category.as_str());
            }
        }
        seen
    }

    pub fn items_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a CatalogItem> {
        self.items.iter().filter(move |item| item.category == category)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Read contract between the engine and whatever owns catalog data. The
/// engine receives a fresh immutable `Catalog` per call and never writes back.
pub trait CatalogSource {
    fn catalog(&self) -> Catalog;
}

struct SeedItem {
    category: &'static str,
    model: &'static str,
    price: i64,
    priority: bool,
}

const SEED_ITEMS: &[SeedItem] = &[
    SeedItem { category: "host", model: "TSK-C3 I5-13400", price: 2800, priority: false },
    SeedItem { category: "host", model: "TSK-C3 I5-14400", price: 3100, priority: true },
    SeedItem { category: "host", model: "TSK-C3 I5-14500", price: 3200, priority: false },
    SeedItem { category: "host", model: "TSK-C3 I7-13700", price: 4550, priority: false },
    SeedItem { category: "host", model: "TSK-C3 I7-14700", price: 5450, priority: false },
    SeedItem { category: "host", model: "TSK-C3 I9-14900", price: 5550, priority: false },
    SeedItem { category: "host", model: "TSK-C4 Ultra5-235", price: 3300, priority: false },
    SeedItem { category: "host", model: "TSK-C4 Ultra7-265", price: 4550, priority: false },
    SeedItem { category: "memory", model: "8G DDR5 5600", price: 750, priority: true },
    SeedItem { category: "memory", model: "16G DDR5 5600", price: 1650, priority: false },
    SeedItem { category: "storage", model: "512G SSD", price: 600, priority: true },
    SeedItem { category: "storage", model: "1T SSD", price: 1100, priority: false },
    SeedItem { category: "storage", model: "2T SATA", price: 800, priority: false },
    SeedItem { category: "gpu", model: "T400 4G", price: 900, priority: true },
    SeedItem { category: "gpu", model: "T1000 4G", price: 2200, priority: false },
    SeedItem { category: "gpu", model: "T1000 8G", price: 2900, priority: false },
    SeedItem { category: "gpu", model: "RTX5060 8G", price: 2700, priority: false },
    SeedItem { category: "gpu", model: "RTX4060 8G", price: 2750, priority: false },
    SeedItem { category: "gpu", model: "RTX5060ti 8G", price: 3200, priority: false },
    SeedItem { category: "gpu", model: "RTX5060ti 16G", price: 5000, priority: false },
    SeedItem { category: "gpu", model: "RX6600LE 8G", price: 1800, priority: false },
    SeedItem { category: "gpu", model: "RTX3060", price: 2300, priority: false },
    SeedItem { category: "psu", model: "300W", price: 0, priority: true },
    SeedItem { category: "psu", model: "500W", price: 200, priority: false },
    SeedItem { category: "monitor", model: "21.5-TE22-19", price: 360, priority: true },
    SeedItem { category: "monitor", model: "23.8-T24A-20", price: 530, priority: false },
    SeedItem { category: "monitor", model: "Lecoo 27 B2737", price: 460, priority: false },
    SeedItem { category: "monitor", model: "HuiTian V24 23.8", price: 350, priority: false },
];

/// Compiled-in catalog adapter. The second adapter (a deserialized snapshot
/// file) lives with the callers that own catalog storage.
#[derive(Default)]
pub struct EmbeddedCatalog;

impl CatalogSource for EmbeddedCatalog {
    fn catalog(&self) -> Catalog {
        Catalog::new(
            SEED_ITEMS
                .iter()
                .map(|seed| CatalogItem {
                    category: seed.category.to_string(),
                    model: seed.model.to_string(),
                    price: Decimal::from(seed.price),
                    priority: seed.priority,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{Catalog, CatalogItem, CatalogSource, EmbeddedCatalog};

    fn item(category: &str, model: &str, price: i64) -> CatalogItem {
        CatalogItem {
            category: category.to_string(),
            model: model.to_string(),
            price: Decimal::from(price),
            priority: false,
        }
    }

    #[test]
    fn indexes_prices_by_category_and_model() {
        let catalog = Catalog::new(vec![item("gpu", "T1000 4G", 2200), item("psu", "300W", 0)]);

        assert_eq!(catalog.price_of("gpu", "T1000 4G"), Some(Decimal::from(2200)));
        assert_eq!(catalog.price_of("psu", "300W"), Some(Decimal::ZERO));
        assert_eq!(catalog.price_of("gpu", "missing"), None);
    }

    #[test]
    fn later_duplicate_replaces_earlier_entry() {
        let catalog = Catalog::new(vec![item("gpu", "T1000 4G", 2200), item("gpu", "T1000 4G", 2400)]);

        assert_eq!(catalog.price_of("gpu", "T1000 4G"), Some(Decimal::from(2400)));
        assert_eq!(catalog.models("gpu"), vec!["T1000 4G"]);
    }

    #[test]
    fn preserves_enumeration_order() {
        let catalog = Catalog::new(vec![
            item("host", "A", 1),
            item("gpu", "B", 2),
            item("host", "C", 3),
        ]);

        assert_eq!(catalog.categories(), vec!["host", "gpu"]);
        assert_eq!(catalog.models("host"), vec!["A", "C"]);
    }

    #[test]
    fn snapshot_deserializes_from_toml() {
        let snapshot: super::CatalogSnapshot = toml::from_str(
            r#"
            last_updated = "2026-08-01T09:30:00Z"

            [[items]]
            category = "gpu"
            model = "T1000 4G"
            price = "2200"

            [[items]]
            category = "psu"
            model = "300W"
            price = "0"
            priority = true
            "#,
        )
        .expect("valid snapshot document");

        assert!(snapshot.last_updated.is_some());
        let catalog = Catalog::from_snapshot(snapshot);
        assert_eq!(catalog.price_of("gpu", "T1000 4G"), Some(Decimal::from(2200)));
        assert!(catalog.items_in("psu").any(|item| item.priority));
    }

    #[test]
    fn embedded_catalog_covers_all_fixed_categories() {
        let catalog = EmbeddedCatalog.catalog();

        for category in ["host", "memory", "storage", "gpu", "psu", "monitor"] {
            assert!(!catalog.models(category).is_empty(), "no models for {category}");
        }
        assert!(catalog.items_in("host").any(|item| item.priority));
    }
}
