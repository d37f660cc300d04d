//! CSV export of classified flows. Uses the `csv` crate for safe serialization.

use crate::domain::DirectionSummary;

/// Convert a direction summary to a CSV string.
///
/// Format: `Direction;Flow;Source;Target`, inbound rows first. Flows without
/// a backend id get an empty `Flow` column.
pub fn summary_to_csv(summary: &DirectionSummary) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .from_writer(Vec::new());

    wtr.write_record(["Direction", "Flow", "Source", "Target"])?;

    for (direction, flow) in summary.iter() {
        let flow_id = flow.id().map(|id| id.to_string()).unwrap_or_default();
        wtr.write_record([
            direction.as_str(),
            flow_id.as_str(),
            flow.source().to_string().as_str(),
            flow.target().to_string().as_str(),
        ])?;
    }

    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
