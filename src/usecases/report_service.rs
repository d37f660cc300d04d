//! Report service. Writes a flow overview to Markdown and CSV.

use crate::adapters::export::summary_to_csv;
use crate::domain::{Direction, DomainError};
use crate::usecases::flow_summary_service::FlowOverview;
use chrono::Utc;
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

/// Paths of the files written for one overview.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub markdown: PathBuf,
    pub csv: PathBuf,
}

pub struct ReportService {
    reports_dir: PathBuf,
}

impl ReportService {
    pub fn new(reports_dir: PathBuf) -> Self {
        Self { reports_dir }
    }

    /// Write `flows_<KIND>_<id>.md` and `.csv`, overwriting earlier runs.
    pub async fn write(&self, overview: &FlowOverview) -> Result<ReportPaths, DomainError> {
        fs::create_dir_all(&self.reports_dir)
            .await
            .map_err(|e| DomainError::Report(format!("Failed to create reports dir: {}", e)))?;

        let anchor = overview.anchor();
        let stem = format!("flows_{}_{}", anchor.kind(), anchor.id());
        let markdown = self.reports_dir.join(format!("{}.md", stem));
        let csv = self.reports_dir.join(format!("{}.csv", stem));

        let csv_content = summary_to_csv(&overview.summary)
            .map_err(|e| DomainError::Report(format!("Failed to generate CSV: {}", e)))?;

        fs::write(&markdown, render_markdown(overview))
            .await
            .map_err(|e| DomainError::Report(format!("Failed to write report: {}", e)))?;
        fs::write(&csv, csv_content)
            .await
            .map_err(|e| DomainError::Report(format!("Failed to write CSV: {}", e)))?;

        info!(markdown = %markdown.display(), csv = %csv.display(), "report generated");

        Ok(ReportPaths { markdown, csv })
    }
}

/// Render the overview as Markdown.
pub fn render_markdown(overview: &FlowOverview) -> String {
    let summary = &overview.summary;
    let timestamp = Utc::now().format("%Y-%m-%d %H:%M UTC");

    let mut md = String::new();

    md.push_str(&format!("# Flow Overview: {}\n\n", summary.anchor));
    md.push_str(&format!(
        "**Scope:** {} | **Generated:** {}\n\n",
        overview.scope, timestamp
    ));
    md.push_str("---\n\n");

    md.push_str("## Directions\n\n");
    md.push_str("| Direction | Flows |\n|---|---|\n");
    for direction in [Direction::Inbound, Direction::Outbound, Direction::Neither] {
        md.push_str(&format!("| {} | {} |\n", direction, summary.count(direction)));
    }
    md.push('\n');

    let upstream = summary.upstream();
    if !upstream.is_empty() {
        md.push_str("## Upstream\n\n");
        for r in upstream {
            md.push_str(&format!("- {}\n", r));
        }
        md.push('\n');
    }

    let downstream = summary.downstream();
    if !downstream.is_empty() {
        md.push_str("## Downstream\n\n");
        for r in downstream {
            md.push_str(&format!("- {}\n", r));
        }
        md.push('\n');
    }

    md.push_str(&format!("## Statistics ({})\n\n", overview.capability));
    if overview.statistics.is_empty() {
        md.push_str("_No statistics returned._\n\n");
    } else {
        md.push_str("| Entity | Count |\n|---|---|\n");
        for (id, count) in overview.statistics.iter() {
            md.push_str(&format!("| {} | {} |\n", id, count));
        }
        md.push_str(&format!("\n**Total:** {}\n\n", overview.statistics.total()));
    }

    md.push_str("---\n");
    md.push_str("*Generated by flow-compass*\n");
    md
}
