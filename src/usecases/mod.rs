//! Application use cases. Orchestrate domain logic via ports.

pub mod flow_summary_service;
pub mod report_service;

pub use flow_summary_service::{FlowOverview, FlowSummaryService};
pub use report_service::{ReportPaths, ReportService};
