//! Implements InputPort. Inquire-based prompts and a colored terminal summary.

use crate::adapters::ui::progress::spinner;
use crate::domain::{
    Direction, DomainError, EntityKind, EntityRefRecord, EntityReference, HierarchyQueryScope,
    check_is_entity_ref, counterpart,
};
use crate::ports::InputPort;
use crate::usecases::{FlowOverview, FlowSummaryService, ReportService};
use async_trait::async_trait;
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use inquire::{CustomType, Select};
use std::io::{Write, stdout};
use std::sync::Arc;
use tracing::info;

fn direction_indicator(direction: Direction) -> &'static str {
    match direction {
        Direction::Inbound => "[IN] ",
        Direction::Outbound => "[OUT]",
        Direction::Neither => "[--] ",
    }
}

fn direction_color(direction: Direction) -> Color {
    match direction {
        Direction::Inbound => Color::Green,
        Direction::Outbound => Color::Yellow,
        Direction::Neither => Color::DarkGrey,
    }
}

/// One display line per flow: indicator, counterpart, flow id.
fn flow_line(direction: Direction, overview: &FlowOverview, index: usize) -> Option<String> {
    let flow = overview.summary.bucket(direction).get(index)?;
    let other = counterpart(flow, overview.anchor())
        .map(|r| r.to_string())
        .unwrap_or_else(|| format!("{} -> {}", flow.source(), flow.target()));
    let id = flow
        .id()
        .map(|id| format!(" (flow {})", id))
        .unwrap_or_default();
    Some(format!("{} {}{}", direction_indicator(direction), other, id))
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    preset_anchor: Option<(String, i64)>,
    scope: HierarchyQueryScope,
    summary_service: Arc<FlowSummaryService>,
    report_service: Arc<ReportService>,
}

impl TuiInputPort {
    pub fn new(
        preset_anchor: Option<(String, i64)>,
        scope: HierarchyQueryScope,
        summary_service: Arc<FlowSummaryService>,
        report_service: Arc<ReportService>,
    ) -> Self {
        Self {
            preset_anchor,
            scope,
            summary_service,
            report_service,
        }
    }

    fn resolve_anchor(&self) -> Result<EntityReference, DomainError> {
        let (kind, id) = match &self.preset_anchor {
            Some((kind, id)) => (kind.clone(), *id),
            None => {
                let kinds: Vec<String> = EntityKind::known()
                    .iter()
                    .map(|k| k.as_str().to_string())
                    .collect();
                let kind = Select::new("Anchor kind", kinds)
                    .prompt()
                    .map_err(|e| DomainError::Input(e.to_string()))?;
                let id = CustomType::<i64>::new("Anchor id:")
                    .prompt()
                    .map_err(|e| DomainError::Input(e.to_string()))?;
                (kind, id)
            }
        };
        check_is_entity_ref(Some(&EntityRefRecord::new(kind, id)))
    }

    fn print_overview(&self, overview: &FlowOverview) {
        let mut out = stdout();
        let _ = out.execute(Print(format!(
            "\r\nFlows for {} (scope {})\r\n",
            overview.anchor(),
            overview.scope
        )));

        for direction in [Direction::Inbound, Direction::Outbound, Direction::Neither] {
            let count = overview.summary.count(direction);
            let _ = out.execute(SetForegroundColor(direction_color(direction)));
            let _ = out.execute(Print(format!("{}: {}\r\n", direction, count)));
            for i in 0..count {
                if let Some(line) = flow_line(direction, overview, i) {
                    let _ = out.execute(Print(format!("  {}\r\n", line)));
                }
            }
            let _ = out.execute(ResetColor);
        }

        let _ = out.execute(Print(format!(
            "{} stats: {} entities, total {}\r\n",
            overview.capability,
            overview.statistics.len(),
            overview.statistics.total()
        )));
        let _ = out.flush();
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let anchor = self.resolve_anchor()?;
        info!(anchor = %anchor, scope = %self.scope, "anchor selected");

        let pb = spinner(format!("Loading flows and stats for {}", anchor));
        let overview = self.summary_service.overview(&anchor, self.scope).await;
        pb.finish_and_clear();
        let overview = overview?;

        self.print_overview(&overview);

        let paths = self.report_service.write(&overview).await?;
        println!("Report: {}", paths.markdown.display());
        println!("CSV:    {}", paths.csv.display());
        Ok(())
    }
}
