//! Core domain layer. No external I/O dependencies.
//!
//! Entities, boundary checks and the direction/capability rules live here.
//! Dependencies flow inward.

pub mod capability;
pub mod checks;
pub mod direction;
pub mod entities;
pub mod errors;

pub use capability::{StatsCapability, select_stats_capability};
pub use checks::{EntityRefRecord, LogicalFlowRecord, check_is_entity_ref, check_is_logical_flow};
pub use direction::{
    DirectionSummary, categorize_direction, categorize_record, counterpart, is_inbound,
    is_inbound_record, is_outbound, is_outbound_record,
};
pub use entities::{
    Direction, EntityKind, EntityReference, FlowStatistics, HierarchyQueryScope,
    IdSelectionOptions, LogicalFlow, Tally,
};
pub use errors::DomainError;
