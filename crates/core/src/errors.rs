use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("custom item rejected: {reason}")]
    InvalidCustomItem { reason: String },
    #[error("search space of {combinations} combinations exceeds cap of {cap}")]
    SearchSpaceExceeded { combinations: u64, cap: u64 },
    #[error("rate table invalid: {0}")]
    InvalidRateTable(String),
}
