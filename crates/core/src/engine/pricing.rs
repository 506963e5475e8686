use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::Catalog;
use crate::domain::selection::{CustomItem, Selection};

/// Scalar factors applied on top of raw component cost. The rebate is
/// clamped non-negative at the session boundary, never inside the formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateFactors {
    pub margin: Decimal,
    pub discount_rate: Decimal,
    pub special_rebate: Decimal,
}

impl Default for RateFactors {
    fn default() -> Self {
        Self { margin: Decimal::ONE, discount_rate: Decimal::ONE, special_rebate: Decimal::ZERO }
    }
}

/// Derived on every pricing request, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTotals {
    pub cost_total: Decimal,
    pub price_before_discount: Decimal,
    pub final_price: Decimal,
}

pub trait PricingEngine: Send + Sync {
    fn price(
        &self,
        catalog: &Catalog,
        selection: &Selection,
        custom_items: &[CustomItem],
        factors: RateFactors,
    ) -> QuoteTotals;
}

#[derive(Default)]
pub struct DeterministicPricingEngine;

impl PricingEngine for DeterministicPricingEngine {
    fn price(
        &self,
        catalog: &Catalog,
        selection: &Selection,
        custom_items: &[CustomItem],
        factors: RateFactors,
    ) -> QuoteTotals {
        price_bundle(catalog, selection, custom_items, factors)
    }
}

/// A selection entry whose (category, model) is missing from the catalog
/// prices at 0 so accumulation never aborts on a stale selection.
pub fn standard_cost(catalog: &Catalog, selection: &Selection) -> Decimal {
    selection
        .filled()
        .map(|(slot, choice)| {
            let model = choice.model.as_deref().unwrap_or_default();
            let unit = catalog.price_of(slot.category(), model).unwrap_or(Decimal::ZERO);
            unit * Decimal::from(choice.quantity)
        })
        .sum()
}

pub fn custom_cost(custom_items: &[CustomItem]) -> Decimal {
    custom_items
        .iter()
        .filter(|item| item.is_billable())
        .map(|item| item.cost * Decimal::from(item.quantity))
        .sum()
}

pub fn price_bundle(
    catalog: &Catalog,
    selection: &Selection,
    custom_items: &[CustomItem],
    factors: RateFactors,
) -> QuoteTotals {
    let cost_total = standard_cost(catalog, selection) + custom_cost(custom_items);
    let price_before_discount = cost_total * factors.margin;
    let discounted = price_before_discount * factors.discount_rate - factors.special_rebate;
    let final_price = discounted.max(Decimal::ZERO);

    QuoteTotals { cost_total, price_before_discount, final_price }
}
