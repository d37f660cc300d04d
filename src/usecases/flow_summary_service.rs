//! Flow summary service. Classifies an anchor's flows and fetches its stats.
//!
//! - Loads raw flow records from the FlowSource
//! - Validates every record before classification (first bad record aborts)
//! - Selects the stats capability from the anchor kind and calls the StatsGateway

use crate::domain::{
    DirectionSummary, DomainError, EntityRefRecord, EntityReference, FlowStatistics,
    HierarchyQueryScope, IdSelectionOptions, LogicalFlow, StatsCapability, check_is_logical_flow,
};
use crate::ports::{FlowSource, StatsGateway};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Summary plus the stats fetched for the same anchor.
#[derive(Debug, Clone, Serialize)]
pub struct FlowOverview {
    pub summary: DirectionSummary,
    pub capability: StatsCapability,
    pub scope: HierarchyQueryScope,
    pub statistics: FlowStatistics,
}

impl FlowOverview {
    pub fn anchor(&self) -> &EntityReference {
        &self.summary.anchor
    }
}

pub struct FlowSummaryService {
    flows: Arc<dyn FlowSource>,
    stats: Arc<dyn StatsGateway>,
}

impl FlowSummaryService {
    pub fn new(flows: Arc<dyn FlowSource>, stats: Arc<dyn StatsGateway>) -> Self {
        Self { flows, stats }
    }

    /// Classify every flow touching `anchor`.
    pub async fn summarize(
        &self,
        anchor: &EntityReference,
    ) -> Result<DirectionSummary, DomainError> {
        let key = EntityRefRecord::new(anchor.kind().as_str(), anchor.id());
        let records = self.flows.find_flows_for(&key).await?;

        let flows = records
            .iter()
            .map(|r| check_is_logical_flow(Some(r)))
            .collect::<Result<Vec<LogicalFlow>, DomainError>>()?;

        let summary = DirectionSummary::classify(anchor.clone(), flows);
        info!(
            anchor = %anchor,
            inbound = summary.inbound.len(),
            outbound = summary.outbound.len(),
            neither = summary.neither.len(),
            "classified flows"
        );
        Ok(summary)
    }

    /// Fetch stats for `anchor` using the capability its kind selects.
    pub async fn statistics(
        &self,
        anchor: &EntityReference,
        scope: HierarchyQueryScope,
    ) -> Result<(StatsCapability, FlowStatistics), DomainError> {
        let capability = StatsCapability::for_kind(anchor.kind());
        let selector = IdSelectionOptions::new(anchor.clone(), scope);
        let stats = self.stats.calculate_stats(capability, &selector).await?;
        info!(
            anchor = %anchor,
            capability = %capability,
            entries = stats.len(),
            total = stats.total(),
            "fetched stats"
        );
        Ok((capability, stats))
    }

    /// Summary and stats together.
    pub async fn overview(
        &self,
        anchor: &EntityReference,
        scope: HierarchyQueryScope,
    ) -> Result<FlowOverview, DomainError> {
        let summary = self.summarize(anchor).await?;
        let (capability, statistics) = self.statistics(anchor, scope).await?;
        Ok(FlowOverview {
            summary,
            capability,
            scope,
            statistics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::JsonFlowSource;
    use crate::adapters::stats::MockStatsGateway;
    use crate::domain::{Direction, EntityKind, LogicalFlowRecord, Tally};

    fn rec(kind: &str, id: i64) -> EntityRefRecord {
        EntityRefRecord::new(kind, id)
    }

    fn service(
        records: Vec<LogicalFlowRecord>,
        gw: Arc<MockStatsGateway>,
    ) -> FlowSummaryService {
        FlowSummaryService::new(Arc::new(JsonFlowSource::from_records(records)), gw)
    }

    #[tokio::test]
    async fn test_summarize_buckets_flows() {
        let gw = Arc::new(MockStatsGateway::with_delay(0));
        let svc = service(
            vec![
                LogicalFlowRecord::new(rec("APPLICATION", 2), rec("APPLICATION", 1)),
                LogicalFlowRecord::new(rec("APPLICATION", 1), rec("APPLICATION", 3)),
                LogicalFlowRecord::new(rec("APPLICATION", 4), rec("APPLICATION", 5)),
            ],
            gw,
        );
        let anchor = EntityReference::new(EntityKind::Application, 1);

        let summary = svc.summarize(&anchor).await.unwrap();
        assert_eq!(summary.count(Direction::Inbound), 1);
        assert_eq!(summary.count(Direction::Outbound), 1);
        // the source only serves flows touching the anchor
        assert_eq!(summary.count(Direction::Neither), 0);
    }

    #[tokio::test]
    async fn test_summarize_rejects_malformed_record() {
        let gw = Arc::new(MockStatsGateway::with_delay(0));
        let broken = LogicalFlowRecord {
            id: Some(1),
            source: Some(rec("APPLICATION", 1)),
            target: Some(EntityRefRecord {
                kind: None,
                id: Some(2),
            }),
        };
        let svc = service(vec![broken], gw);
        let anchor = EntityReference::new(EntityKind::Application, 1);

        let err = svc.summarize(&anchor).await.unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[tokio::test]
    async fn test_statistics_dispatch_by_kind() {
        let gw = Arc::new(
            MockStatsGateway::with_delay(0)
                .with_tallies(StatsCapability::DataTypeUsage, vec![Tally { id: 8, count: 3 }]),
        );
        let svc = service(Vec::new(), Arc::clone(&gw));

        let dt = EntityReference::new(EntityKind::DataType, 8);
        let (capability, stats) = svc
            .statistics(&dt, HierarchyQueryScope::Children)
            .await
            .unwrap();
        assert_eq!(capability, StatsCapability::DataTypeUsage);
        assert_eq!(stats.get(8), Some(3));

        let odd = EntityReference::new(EntityKind::from_tag("DATATYPE"), 8);
        let (capability, _) = svc.statistics(&odd, HierarchyQueryScope::Exact).await.unwrap();
        assert_eq!(capability, StatsCapability::LogicalFlow);

        assert_eq!(
            gw.calls(),
            vec![StatsCapability::DataTypeUsage, StatsCapability::LogicalFlow]
        );
    }

    #[tokio::test]
    async fn test_overview_combines_both() {
        let gw = Arc::new(MockStatsGateway::with_delay(0));
        let svc = service(
            vec![LogicalFlowRecord::new(rec("APPLICATION", 1), rec("APPLICATION", 1))],
            gw,
        );
        let anchor = EntityReference::new(EntityKind::Application, 1);

        let overview = svc
            .overview(&anchor, HierarchyQueryScope::Exact)
            .await
            .unwrap();
        assert_eq!(overview.anchor(), &anchor);
        assert_eq!(overview.summary.count(Direction::Inbound), 1);
        assert_eq!(overview.capability, StatsCapability::LogicalFlow);
        assert_eq!(overview.scope, HierarchyQueryScope::Exact);
    }
}
