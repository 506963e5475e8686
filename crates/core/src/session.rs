//! Mutable quoting state, owned by the caller and passed into engine calls.
//! Invariants (validated custom items, non-negative rebate) are enforced at
//! this boundary so the pricing formula never sees malformed input.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::rates::RateTables;
use crate::domain::selection::{CustomItem, Selection};
use crate::engine::pricing::RateFactors;
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSession {
    selection: Selection,
    custom_items: Vec<CustomItem>,
    discount_id: Option<String>,
    markup_id: Option<String>,
    special_rebate: Decimal,
}

impl Default for QuoteSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteSession {
    pub fn new() -> Self {
        Self {
            selection: Selection::initial(),
            custom_items: Vec::new(),
            discount_id: None,
            markup_id: None,
            special_rebate: Decimal::ZERO,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    /// Replaces the selection wholesale, e.g. with a budget search result.
    /// The active discount resets to the `none` sentinel, as a recommended
    /// bundle is quoted fresh.
    pub fn apply_bundle(&mut self, selection: Selection) {
        self.selection = selection;
        self.discount_id = None;
    }

    pub fn custom_items(&self) -> &[CustomItem] {
        &self.custom_items
    }

    pub fn add_custom_item(
        &mut self,
        category: impl Into<String>,
        model: impl Into<String>,
        cost: Decimal,
        quantity: u32,
    ) -> Result<Uuid, DomainError> {
        let item = CustomItem::new(category, model, cost, quantity)?;
        let id = item.id;
        self.custom_items.push(item);
        Ok(id)
    }

    pub fn remove_custom_item(&mut self, id: Uuid) -> bool {
        let before = self.custom_items.len();
        self.custom_items.retain(|item| item.id != id);
        self.custom_items.len() != before
    }

    pub fn select_discount(&mut self, id: Option<String>) {
        self.discount_id = id;
    }

    pub fn discount_id(&self) -> Option<&str> {
        self.discount_id.as_deref()
    }

    pub fn select_markup(&mut self, id: Option<String>) {
        self.markup_id = id;
    }

    pub fn markup_id(&self) -> Option<&str> {
        self.markup_id.as_deref()
    }

    /// Negative rebates are clamped to zero at this boundary.
    pub fn set_special_rebate(&mut self, amount: Decimal) {
        self.special_rebate = amount.max(Decimal::ZERO);
    }

    pub fn special_rebate(&self) -> Decimal {
        self.special_rebate
    }

    /// Restores the initial quoting state: default selection, no custom
    /// items, no discount, no rebate, the table's default markup point.
    pub fn reset(&mut self, tables: &RateTables) {
        self.selection = Selection::initial();
        self.custom_items.clear();
        self.discount_id = None;
        self.markup_id = tables.default_markup_id().map(str::to_string);
        self.special_rebate = Decimal::ZERO;
    }

    pub fn rate_factors(&self, tables: &RateTables) -> RateFactors {
        RateFactors {
            margin: tables.margin(self.markup_id()),
            discount_rate: tables.discount_rate(self.discount_id()),
            special_rebate: self.special_rebate,
        }
    }
}
