//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// A flow or entity reference failed shape validation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Flow source error: {0}")]
    FlowSource(String),

    #[error("Stats gateway error: {0}")]
    StatsGateway(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Input error: {0}")]
    Input(String),
}

impl DomainError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
