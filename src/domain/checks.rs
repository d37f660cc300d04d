//! Boundary checks. Turn unchecked records into domain entities.
//!
//! Records mirror what the data-access side hands over (every field optional).
//! Nothing downstream of these checks ever sees a malformed flow.

use super::entities::{EntityKind, EntityReference, LogicalFlow};
use super::errors::DomainError;
use serde::{Deserialize, Serialize};

/// Entity reference as received, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRefRecord {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
}

impl EntityRefRecord {
    pub fn new(kind: impl Into<String>, id: i64) -> Self {
        Self {
            kind: Some(kind.into()),
            id: Some(id),
        }
    }

    /// Raw comparison on the unchecked fields. Two incomplete records never match.
    pub fn same_as(&self, other: &EntityRefRecord) -> bool {
        match (&self.kind, self.id, &other.kind, other.id) {
            (Some(k1), Some(id1), Some(k2), Some(id2)) => k1 == k2 && id1 == id2,
            _ => false,
        }
    }
}

/// Logical flow as received, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalFlowRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub source: Option<EntityRefRecord>,
    #[serde(default)]
    pub target: Option<EntityRefRecord>,
}

impl LogicalFlowRecord {
    pub fn new(source: EntityRefRecord, target: EntityRefRecord) -> Self {
        Self {
            id: None,
            source: Some(source),
            target: Some(target),
        }
    }

    /// True if either endpoint matches `anchor` on raw fields.
    pub fn touches(&self, anchor: &EntityRefRecord) -> bool {
        let hit = |r: &Option<EntityRefRecord>| r.as_ref().is_some_and(|r| r.same_as(anchor));
        hit(&self.source) || hit(&self.target)
    }
}

impl TryFrom<&EntityRefRecord> for EntityReference {
    type Error = DomainError;

    fn try_from(record: &EntityRefRecord) -> Result<Self, Self::Error> {
        let kind = record
            .kind
            .as_deref()
            .ok_or_else(|| DomainError::invalid("entity reference is missing a kind"))?;
        let id = record.id.ok_or_else(|| {
            DomainError::invalid(format!("entity reference of kind {kind} is missing an id"))
        })?;
        Ok(EntityReference::new(EntityKind::from_tag(kind), id))
    }
}

impl TryFrom<&LogicalFlowRecord> for LogicalFlow {
    type Error = DomainError;

    fn try_from(record: &LogicalFlowRecord) -> Result<Self, Self::Error> {
        let source = record
            .source
            .as_ref()
            .ok_or_else(|| DomainError::invalid("logical flow is missing a source"))?;
        let target = record
            .target
            .as_ref()
            .ok_or_else(|| DomainError::invalid("logical flow is missing a target"))?;
        let source = EntityReference::try_from(source).map_err(|e| endpoint_error("source", e))?;
        let target = EntityReference::try_from(target).map_err(|e| endpoint_error("target", e))?;
        let flow = LogicalFlow::new(source, target);
        Ok(match record.id {
            Some(id) => flow.with_id(id),
            None => flow,
        })
    }
}

/// Prefix the endpoint side onto the inner message, not onto its Display form.
fn endpoint_error(side: &str, e: DomainError) -> DomainError {
    match e {
        DomainError::InvalidArgument(msg) => {
            DomainError::invalid(format!("logical flow {side}: {msg}"))
        }
        other => other,
    }
}

/// Fails with `InvalidArgument` unless `record` is a complete entity reference.
/// `None` stands for a missing (null) argument.
pub fn check_is_entity_ref(
    record: Option<&EntityRefRecord>,
) -> Result<EntityReference, DomainError> {
    let record = record.ok_or_else(|| DomainError::invalid("entity reference is required"))?;
    EntityReference::try_from(record)
}

/// Fails with `InvalidArgument` unless `record` is a well-formed logical flow.
pub fn check_is_logical_flow(
    record: Option<&LogicalFlowRecord>,
) -> Result<LogicalFlow, DomainError> {
    let record = record.ok_or_else(|| DomainError::invalid("logical flow is required"))?;
    LogicalFlow::try_from(record)
}
