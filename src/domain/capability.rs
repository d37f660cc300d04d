//! Statistics capability selection.
//!
//! Flow summary stats are computed differently per entity kind. The handle
//! returned here is resolved into a remote call by a `StatsGateway`.

use super::entities::EntityKind;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Opaque handle naming a remote statistics operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatsCapability {
    /// Data-type usage statistics.
    DataTypeUsage,
    /// Logical-flow statistics.
    LogicalFlow,
}

impl StatsCapability {
    /// Route relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            StatsCapability::DataTypeUsage => "api/data-type-usage/stats",
            StatsCapability::LogicalFlow => "api/logical-flow/stats",
        }
    }

    pub fn for_kind(kind: &EntityKind) -> Self {
        match kind {
            EntityKind::DataType => StatsCapability::DataTypeUsage,
            EntityKind::Other(tag) => {
                debug!(kind = %tag, "unrecognized entity kind, using logical-flow stats");
                StatsCapability::LogicalFlow
            }
            _ => StatsCapability::LogicalFlow,
        }
    }
}

impl fmt::Display for StatsCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsCapability::DataTypeUsage => f.write_str("data-type usage"),
            StatsCapability::LogicalFlow => f.write_str("logical flow"),
        }
    }
}

/// Pick the stats capability for a kind tag. Total over all strings.
pub fn select_stats_capability(kind: &str) -> StatsCapability {
    StatsCapability::for_kind(&EntityKind::from_tag(kind))
}
