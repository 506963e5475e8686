use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub id: String,
    pub label: String,
    pub rate: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupPoint {
    pub id: String,
    pub margin: Decimal,
}

/// Selectable discount and markup catalogs. Exactly one entry of each is
/// active per quote; the active discount may also be the `None` sentinel.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTables {
    #[serde(default)]
    pub discounts: Vec<DiscountTier>,
    #[serde(default)]
    pub markups: Vec<MarkupPoint>,
}

impl RateTables {
    pub fn seed() -> Self {
        Self {
            discounts: vec![
                DiscountTier {
                    id: "none".to_string(),
                    label: "No discount (1.0)".to_string(),
                    rate: Decimal::ONE,
                },
                DiscountTier {
                    id: "bulk".to_string(),
                    label: "Bulk discount (0.99)".to_string(),
                    rate: Decimal::new(99, 2),
                },
            ],
            markups: vec![
                MarkupPoint { id: "standard".to_string(), margin: Decimal::new(12, 1) },
                MarkupPoint { id: "reduced".to_string(), margin: Decimal::new(115, 2) },
                MarkupPoint { id: "floor".to_string(), margin: Decimal::new(11, 1) },
            ],
        }
    }

    pub fn discount(&self, id: &str) -> Option<&DiscountTier> {
        self.discounts.iter().find(|tier| tier.id == id)
    }

    /// No selection or an unknown id both resolve to rate 1.0, the same as
    /// the `none` sentinel.
    pub fn discount_rate(&self, id: Option<&str>) -> Decimal {
        id.and_then(|id| self.discount(id)).map(|tier| tier.rate).unwrap_or(Decimal::ONE)
    }

    /// Label of the active tier when its rate actually reduces the price.
    pub fn applied_discount_label(&self, id: Option<&str>) -> Option<&str> {
        id.and_then(|id| self.discount(id))
            .filter(|tier| tier.rate < Decimal::ONE)
            .map(|tier| tier.label.as_str())
    }

    /// Unknown or missing markup ids fall back to the first point, then to a
    /// neutral 1.0 on an empty table.
    pub fn margin(&self, id: Option<&str>) -> Decimal {
        id.and_then(|id| self.markups.iter().find(|point| point.id == id))
            .or_else(|| self.markups.first())
            .map(|point| point.margin)
            .unwrap_or(Decimal::ONE)
    }

    pub fn default_markup_id(&self) -> Option<&str> {
        self.markups.first().map(|point| point.id.as_str())
    }

    /// Validates externally supplied tables: rates in (0, 1], margins >= 1.
    pub fn validate(&self) -> Result<(), DomainError> {
        for tier in &self.discounts {
            if tier.rate <= Decimal::ZERO || tier.rate > Decimal::ONE {
                return Err(DomainError::InvalidRateTable(format!(
                    "discount `{}` rate {} outside (0, 1]",
                    tier.id, tier.rate
                )));
            }
        }
        for point in &self.markups {
            if point.margin < Decimal::ONE {
                return Err(DomainError::InvalidRateTable(format!(
                    "markup `{}` margin {} below 1",
                    point.id, point.margin
                )));
            }
        }
        Ok(())
    }
}
