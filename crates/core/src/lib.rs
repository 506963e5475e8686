pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod session;

pub use domain::catalog::{Catalog, CatalogItem, CatalogSnapshot, CatalogSource, EmbeddedCatalog};
pub use domain::rates::{DiscountTier, MarkupPoint, RateTables};
pub use domain::selection::{parse_custom_entry, CustomItem, Selection, Slot, SlotChoice};
pub use engine::assemble::{ExportSummary, QuoteDocument};
pub use engine::pricing::{DeterministicPricingEngine, PricingEngine, QuoteTotals, RateFactors};
pub use engine::search::{SearchOutcome, SEARCH_TUPLE_CAP};
pub use engine::{QuoteEngine, QuoteEvaluation};
pub use errors::DomainError;
pub use session::QuoteSession;
