pub mod assemble;
pub mod matcher;
pub mod pricing;
pub mod search;

use serde::{Deserialize, Serialize};

use self::assemble::QuoteDocument;
use self::pricing::{DeterministicPricingEngine, PricingEngine, QuoteTotals};
use self::search::SearchOutcome;
use crate::domain::catalog::Catalog;
use crate::domain::rates::RateTables;
use crate::domain::selection::Selection;
use crate::errors::DomainError;
use crate::session::QuoteSession;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteEvaluation {
    pub totals: QuoteTotals,
    pub document: QuoteDocument,
}

/// Facade over the matcher, search, pricing and assembly stages. The engine
/// holds no quoting state; every call takes the catalog snapshot and session
/// it should work from.
pub struct QuoteEngine<P = DeterministicPricingEngine> {
    pricing: P,
}

impl QuoteEngine {
    pub fn new() -> Self {
        Self { pricing: DeterministicPricingEngine }
    }
}

impl Default for QuoteEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PricingEngine> QuoteEngine<P> {
    pub fn with_pricing(pricing: P) -> Self {
        Self { pricing }
    }

    /// Best-effort resolution of free text into a selection. An unresolved
    /// result is a valid, all-empty selection.
    pub fn resolve_text(&self, catalog: &Catalog, input: &str) -> Selection {
        matcher::match_selection(catalog, input)
    }

    /// Budget-aware bundle recommendation from free text.
    pub fn recommend(
        &self,
        catalog: &Catalog,
        input: &str,
    ) -> Result<SearchOutcome, DomainError> {
        search::recommend(catalog, input)
    }

    /// Prices the session's current bundle and renders the canonical quote
    /// document.
    pub fn evaluate(
        &self,
        catalog: &Catalog,
        session: &QuoteSession,
        tables: &RateTables,
    ) -> QuoteEvaluation {
        let factors = session.rate_factors(tables);
        let totals =
            self.pricing.price(catalog, session.selection(), session.custom_items(), factors);

        let applied_discount = session
            .discount_id()
            .and_then(|id| tables.discount(id))
            .map(|tier| (tier.label.as_str(), tier.rate));
        let document = assemble::assemble(
            session.selection(),
            session.custom_items(),
            applied_discount,
            factors.special_rebate,
            totals,
        );

        QuoteEvaluation { totals, document }
    }
}
