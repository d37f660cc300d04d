//! Stats adapter module. Implements StatsGateway.
//!
//! Provides the REST adapter and a mock adapter for offline use and tests.

pub mod http_adapter;
pub mod mock_adapter;

pub use http_adapter::HttpStatsGateway;
pub use mock_adapter::MockStatsGateway;
