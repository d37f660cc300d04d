//! Mock stats adapter for running without a stats API.
//!
//! Returns preset tallies and remembers which capabilities were requested.

use crate::domain::{DomainError, FlowStatistics, IdSelectionOptions, StatsCapability, Tally};
use crate::ports::StatsGateway;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

/// Mock stats gateway.
///
/// Capabilities without preset tallies answer with a single tally for the
/// selected entity, counting 0.
pub struct MockStatsGateway {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
    presets: HashMap<StatsCapability, Vec<Tally>>,
    calls: Mutex<Vec<StatsCapability>>,
}

impl MockStatsGateway {
    /// Create a new mock gateway with default delay (50ms).
    pub fn new() -> Self {
        Self::with_delay(50)
    }

    /// Create a mock gateway with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            presets: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer `capability` with these tallies.
    pub fn with_tallies(mut self, capability: StatsCapability, tallies: Vec<Tally>) -> Self {
        self.presets.insert(capability, tallies);
        self
    }

    /// Capabilities requested so far, in call order.
    pub fn calls(&self) -> Vec<StatsCapability> {
        self.calls
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}

impl Default for MockStatsGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl StatsGateway for MockStatsGateway {
    async fn calculate_stats(
        &self,
        capability: StatsCapability,
        selector: &IdSelectionOptions,
    ) -> Result<FlowStatistics, DomainError> {
        info!(
            capability = %capability,
            anchor = %selector.entity_reference,
            "[MOCK] Simulating stats call"
        );

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(capability);
        }

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        let tallies = self.presets.get(&capability).cloned().unwrap_or_else(|| {
            vec![Tally {
                id: selector.entity_reference.id(),
                count: 0,
            }]
        });
        Ok(FlowStatistics::from_tallies(tallies))
    }
}
