//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/file types here. Adapters map into these through the checks in
//! [`crate::domain::checks`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Category of a domain object. Recognized tags get their own variant; any
/// other tag is carried verbatim in `Other` so no information is lost.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityKind {
    Actor,
    Application,
    Capability,
    ChangeInitiative,
    DataType,
    EndUserApplication,
    LogicalDataFlow,
    Measurable,
    OrgUnit,
    Person,
    PhysicalFlow,
    Server,
    Other(String),
}

impl EntityKind {
    /// Parse a kind tag. Total: unknown tags map to `Other`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "ACTOR" => Self::Actor,
            "APPLICATION" => Self::Application,
            "CAPABILITY" => Self::Capability,
            "CHANGE_INITIATIVE" => Self::ChangeInitiative,
            "DATA_TYPE" => Self::DataType,
            "END_USER_APPLICATION" => Self::EndUserApplication,
            "LOGICAL_DATA_FLOW" => Self::LogicalDataFlow,
            "MEASURABLE" => Self::Measurable,
            "ORG_UNIT" => Self::OrgUnit,
            "PERSON" => Self::Person,
            "PHYSICAL_FLOW" => Self::PhysicalFlow,
            "SERVER" => Self::Server,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Actor => "ACTOR",
            Self::Application => "APPLICATION",
            Self::Capability => "CAPABILITY",
            Self::ChangeInitiative => "CHANGE_INITIATIVE",
            Self::DataType => "DATA_TYPE",
            Self::EndUserApplication => "END_USER_APPLICATION",
            Self::LogicalDataFlow => "LOGICAL_DATA_FLOW",
            Self::Measurable => "MEASURABLE",
            Self::OrgUnit => "ORG_UNIT",
            Self::Person => "PERSON",
            Self::PhysicalFlow => "PHYSICAL_FLOW",
            Self::Server => "SERVER",
            Self::Other(tag) => tag,
        }
    }

    /// Recognized kinds, in the order offered by interactive prompts.
    pub fn known() -> &'static [EntityKind] {
        KNOWN_KINDS
    }
}

const KNOWN_KINDS: &[EntityKind] = &[
    EntityKind::Application,
    EntityKind::DataType,
    EntityKind::OrgUnit,
    EntityKind::Capability,
    EntityKind::Actor,
    EntityKind::ChangeInitiative,
    EntityKind::EndUserApplication,
    EntityKind::LogicalDataFlow,
    EntityKind::Measurable,
    EntityKind::Person,
    EntityKind::PhysicalFlow,
    EntityKind::Server,
];

impl From<String> for EntityKind {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<EntityKind> for String {
    fn from(kind: EntityKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies a domain object by kind and id.
///
/// Fields are private: a reference never changes after construction.
/// Equality compares both kind and id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EntityReference {
    kind: EntityKind,
    id: i64,
}

impl EntityReference {
    pub fn new(kind: EntityKind, id: i64) -> Self {
        Self { kind, id }
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    pub fn id(&self) -> i64 {
        self.id
    }
}

impl fmt::Display for EntityReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

/// Directed relationship between two entity references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogicalFlow {
    id: Option<i64>,
    source: EntityReference,
    target: EntityReference,
}

impl LogicalFlow {
    pub fn new(source: EntityReference, target: EntityReference) -> Self {
        Self {
            id: None,
            source,
            target,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn source(&self) -> &EntityReference {
        &self.source
    }

    pub fn target(&self) -> &EntityReference {
        &self.target
    }
}

/// How a flow relates to an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Inbound,
    Outbound,
    Neither,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Inbound => "INBOUND",
            Direction::Outbound => "OUTBOUND",
            Direction::Neither => "NEITHER",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How far around the selected entity the backend should look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HierarchyQueryScope {
    Exact,
    #[default]
    Children,
    Parents,
}

impl HierarchyQueryScope {
    /// Parse a scope name, case-insensitive. Returns `None` for unknown names.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EXACT" => Some(Self::Exact),
            "CHILDREN" => Some(Self::Children),
            "PARENTS" => Some(Self::Parents),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "EXACT",
            Self::Children => "CHILDREN",
            Self::Parents => "PARENTS",
        }
    }
}

impl fmt::Display for HierarchyQueryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selector sent with a statistics call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdSelectionOptions {
    pub entity_reference: EntityReference,
    pub scope: HierarchyQueryScope,
}

impl IdSelectionOptions {
    pub fn new(entity_reference: EntityReference, scope: HierarchyQueryScope) -> Self {
        Self {
            entity_reference,
            scope,
        }
    }
}

/// A single count for an entity id, as returned by the stats API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub id: i64,
    pub count: u64,
}

/// Aggregated statistics keyed by entity id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlowStatistics {
    tallies: BTreeMap<i64, u64>,
}

impl FlowStatistics {
    /// Collect tallies. Repeated ids are summed.
    pub fn from_tallies(tallies: impl IntoIterator<Item = Tally>) -> Self {
        let mut map = BTreeMap::new();
        for t in tallies {
            *map.entry(t.id).or_insert(0) += t.count;
        }
        Self { tallies: map }
    }

    pub fn get(&self, id: i64) -> Option<u64> {
        self.tallies.get(&id).copied()
    }

    pub fn total(&self) -> u64 {
        self.tallies.values().sum()
    }

    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Iterate `(id, count)` in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, u64)> + '_ {
        self.tallies.iter().map(|(id, count)| (*id, *count))
    }
}
