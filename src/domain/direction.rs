//! Flow direction relative to an anchor entity.
//!
//! Typed functions take validated values and cannot fail. The `*_record`
//! variants validate raw input once, then delegate.

use super::checks::{EntityRefRecord, LogicalFlowRecord, check_is_entity_ref, check_is_logical_flow};
use super::entities::{Direction, EntityReference, LogicalFlow};
use super::errors::DomainError;
use serde::Serialize;

/// True if the flow points at the anchor.
pub fn is_inbound(flow: &LogicalFlow, anchor: &EntityReference) -> bool {
    flow.target() == anchor
}

/// True if the flow leaves the anchor.
pub fn is_outbound(flow: &LogicalFlow, anchor: &EntityReference) -> bool {
    flow.source() == anchor
}

/// Inbound is checked first, so a self-loop on the anchor is `Inbound`.
pub fn categorize_direction(flow: &LogicalFlow, anchor: &EntityReference) -> Direction {
    if is_inbound(flow, anchor) {
        Direction::Inbound
    } else if is_outbound(flow, anchor) {
        Direction::Outbound
    } else {
        Direction::Neither
    }
}

/// The entity on the other end of the flow, seen from the anchor.
pub fn counterpart<'a>(
    flow: &'a LogicalFlow,
    anchor: &EntityReference,
) -> Option<&'a EntityReference> {
    match categorize_direction(flow, anchor) {
        Direction::Inbound => Some(flow.source()),
        Direction::Outbound => Some(flow.target()),
        Direction::Neither => None,
    }
}

fn checked(
    flow: Option<&LogicalFlowRecord>,
    anchor: Option<&EntityRefRecord>,
) -> Result<(LogicalFlow, EntityReference), DomainError> {
    let flow = check_is_logical_flow(flow)?;
    let anchor = check_is_entity_ref(anchor)?;
    Ok((flow, anchor))
}

pub fn is_inbound_record(
    flow: Option<&LogicalFlowRecord>,
    anchor: Option<&EntityRefRecord>,
) -> Result<bool, DomainError> {
    let (flow, anchor) = checked(flow, anchor)?;
    Ok(is_inbound(&flow, &anchor))
}

pub fn is_outbound_record(
    flow: Option<&LogicalFlowRecord>,
    anchor: Option<&EntityRefRecord>,
) -> Result<bool, DomainError> {
    let (flow, anchor) = checked(flow, anchor)?;
    Ok(is_outbound(&flow, &anchor))
}

pub fn categorize_record(
    flow: Option<&LogicalFlowRecord>,
    anchor: Option<&EntityRefRecord>,
) -> Result<Direction, DomainError> {
    let (flow, anchor) = checked(flow, anchor)?;
    Ok(categorize_direction(&flow, &anchor))
}

/// Flows around one anchor, bucketed by direction.
#[derive(Debug, Clone, Serialize)]
pub struct DirectionSummary {
    pub anchor: EntityReference,
    pub inbound: Vec<LogicalFlow>,
    pub outbound: Vec<LogicalFlow>,
    pub neither: Vec<LogicalFlow>,
}

impl DirectionSummary {
    pub fn new(anchor: EntityReference) -> Self {
        Self {
            anchor,
            inbound: Vec::new(),
            outbound: Vec::new(),
            neither: Vec::new(),
        }
    }

    /// Bucket every flow. Input order is kept within each bucket.
    pub fn classify(anchor: EntityReference, flows: impl IntoIterator<Item = LogicalFlow>) -> Self {
        let mut summary = Self::new(anchor);
        for flow in flows {
            summary.push(flow);
        }
        summary
    }

    pub fn push(&mut self, flow: LogicalFlow) -> Direction {
        let direction = categorize_direction(&flow, &self.anchor);
        match direction {
            Direction::Inbound => self.inbound.push(flow),
            Direction::Outbound => self.outbound.push(flow),
            Direction::Neither => self.neither.push(flow),
        }
        direction
    }

    pub fn count(&self, direction: Direction) -> usize {
        self.bucket(direction).len()
    }

    pub fn bucket(&self, direction: Direction) -> &[LogicalFlow] {
        match direction {
            Direction::Inbound => &self.inbound,
            Direction::Outbound => &self.outbound,
            Direction::Neither => &self.neither,
        }
    }

    pub fn total(&self) -> usize {
        self.inbound.len() + self.outbound.len() + self.neither.len()
    }

    /// Distinct sources of inbound flows, first-seen order.
    pub fn upstream(&self) -> Vec<&EntityReference> {
        distinct(self.inbound.iter().map(LogicalFlow::source))
    }

    /// Distinct targets of outbound flows, first-seen order.
    pub fn downstream(&self) -> Vec<&EntityReference> {
        distinct(self.outbound.iter().map(LogicalFlow::target))
    }

    /// All flows tagged with their direction, inbound first.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &LogicalFlow)> {
        self.inbound
            .iter()
            .map(|f| (Direction::Inbound, f))
            .chain(self.outbound.iter().map(|f| (Direction::Outbound, f)))
            .chain(self.neither.iter().map(|f| (Direction::Neither, f)))
    }
}

fn distinct<'a>(refs: impl Iterator<Item = &'a EntityReference>) -> Vec<&'a EntityReference> {
    let mut out: Vec<&EntityReference> = Vec::new();
    for r in refs {
        if !out.contains(&r) {
            out.push(r);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::EntityKind;

    fn app(id: i64) -> EntityReference {
        EntityReference::new(EntityKind::Application, id)
    }

    fn flow(source: EntityReference, target: EntityReference) -> LogicalFlow {
        LogicalFlow::new(source, target)
    }

    #[test]
    fn test_inbound_when_anchor_is_target() {
        let f = flow(app(1), app(2));
        assert_eq!(categorize_direction(&f, &app(2)), Direction::Inbound);
        assert!(is_inbound(&f, &app(2)));
        assert!(!is_outbound(&f, &app(2)));
    }

    #[test]
    fn test_outbound_when_anchor_is_source() {
        let f = flow(app(1), app(2));
        assert_eq!(categorize_direction(&f, &app(1)), Direction::Outbound);
    }

    #[test]
    fn test_neither_when_anchor_is_disjoint() {
        let f = flow(app(1), app(2));
        assert_eq!(categorize_direction(&f, &app(3)), Direction::Neither);
    }

    #[test]
    fn test_self_loop_is_inbound() {
        let f = flow(app(7), app(7));
        assert!(is_inbound(&f, &app(7)));
        assert!(is_outbound(&f, &app(7)));
        assert_eq!(categorize_direction(&f, &app(7)), Direction::Inbound);
    }

    #[test]
    fn test_same_id_different_kind_is_not_a_match() {
        let f = flow(app(1), app(2));
        let dt = EntityReference::new(EntityKind::DataType, 2);
        assert_eq!(categorize_direction(&f, &dt), Direction::Neither);
    }

    #[test]
    fn test_exactly_one_outcome_per_anchor() {
        let flows = [flow(app(1), app(2)), flow(app(2), app(1)), flow(app(3), app(3))];
        for f in &flows {
            for anchor in [app(1), app(2), app(3), app(4)] {
                let inbound = is_inbound(f, &anchor);
                let outbound = is_outbound(f, &anchor);
                let expected = if inbound {
                    Direction::Inbound
                } else if outbound {
                    Direction::Outbound
                } else {
                    Direction::Neither
                };
                let got = categorize_direction(f, &anchor);
                assert_eq!(got, expected);
                // idempotent
                assert_eq!(categorize_direction(f, &anchor), got);
            }
        }
    }

    #[test]
    fn test_counterpart() {
        let f = flow(app(1), app(2));
        assert_eq!(counterpart(&f, &app(2)), Some(&app(1)));
        assert_eq!(counterpart(&f, &app(1)), Some(&app(2)));
        assert_eq!(counterpart(&f, &app(9)), None);
        let looped = flow(app(5), app(5));
        assert_eq!(counterpart(&looped, &app(5)), Some(&app(5)));
    }

    #[test]
    fn test_record_variants_reject_null_inputs() {
        let anchor = EntityRefRecord::new("APPLICATION", 1);
        let record = LogicalFlowRecord::new(
            EntityRefRecord::new("APPLICATION", 1),
            EntityRefRecord::new("APPLICATION", 2),
        );

        assert!(categorize_record(None, Some(&anchor)).unwrap_err().is_invalid_argument());
        assert!(categorize_record(Some(&record), None).unwrap_err().is_invalid_argument());
        assert!(is_inbound_record(None, Some(&anchor)).unwrap_err().is_invalid_argument());
        assert!(is_outbound_record(Some(&record), None).unwrap_err().is_invalid_argument());

        let no_target = LogicalFlowRecord {
            target: None,
            ..record.clone()
        };
        assert!(categorize_record(Some(&no_target), Some(&anchor)).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_record_variants_classify_valid_input() {
        let record = LogicalFlowRecord::new(
            EntityRefRecord::new("APPLICATION", 1),
            EntityRefRecord::new("APPLICATION", 2),
        );
        let a1 = EntityRefRecord::new("APPLICATION", 1);
        let a2 = EntityRefRecord::new("APPLICATION", 2);
        assert_eq!(categorize_record(Some(&record), Some(&a1)).unwrap(), Direction::Outbound);
        assert_eq!(categorize_record(Some(&record), Some(&a2)).unwrap(), Direction::Inbound);
        assert!(is_inbound_record(Some(&record), Some(&a2)).unwrap());
        assert!(is_outbound_record(Some(&record), Some(&a1)).unwrap());
    }

    #[test]
    fn test_summary_buckets_and_neighbours() {
        let anchor = app(1);
        let summary = DirectionSummary::classify(
            anchor,
            vec![
                flow(app(2), app(1)),
                flow(app(1), app(3)),
                flow(app(2), app(1)),
                flow(app(4), app(5)),
                flow(app(1), app(1)),
            ],
        );
        assert_eq!(summary.count(Direction::Inbound), 3);
        assert_eq!(summary.count(Direction::Outbound), 1);
        assert_eq!(summary.count(Direction::Neither), 1);
        assert_eq!(summary.total(), 5);
        assert_eq!(summary.upstream(), vec![&app(2), &app(1)]);
        assert_eq!(summary.downstream(), vec![&app(3)]);

        let order: Vec<Direction> = summary.iter().map(|(d, _)| d).collect();
        assert_eq!(order.first(), Some(&Direction::Inbound));
        assert_eq!(order.last(), Some(&Direction::Neither));
    }
}
