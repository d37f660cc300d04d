//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    DomainError, EntityRefRecord, FlowStatistics, IdSelectionOptions, LogicalFlowRecord,
    StatsCapability,
};

/// Supplies logical flows from the backing data store.
#[async_trait::async_trait]
pub trait FlowSource: Send + Sync {
    /// Fetch the flow records that involve `anchor` at either end.
    ///
    /// Records are returned unchecked; callers validate them before classifying.
    async fn find_flows_for(
        &self,
        anchor: &EntityRefRecord,
    ) -> Result<Vec<LogicalFlowRecord>, DomainError>;
}

/// Resolves a stats capability into a remote call.
#[async_trait::async_trait]
pub trait StatsGateway: Send + Sync {
    /// Invoke `capability` for the entities picked by `selector`.
    ///
    /// # Errors
    /// Returns `DomainError::StatsGateway` if the call or its decoding fails.
    async fn calculate_stats(
        &self,
        capability: StatsCapability,
        selector: &IdSelectionOptions,
    ) -> Result<FlowStatistics, DomainError>;
}
