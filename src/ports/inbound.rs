//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: UI/CLI invokes application use cases.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run one interactive session: pick an anchor, classify its flows, fetch stats, report.
    async fn run(&self) -> Result<(), DomainError>;
}
