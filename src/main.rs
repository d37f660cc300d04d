//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use flow_compass::adapters::persistence::JsonFlowSource;
use flow_compass::adapters::stats::{HttpStatsGateway, MockStatsGateway};
use flow_compass::adapters::ui::tui::TuiInputPort;
use flow_compass::ports::{FlowSource, InputPort, StatsGateway};
use flow_compass::shared::config::AppConfig;
use flow_compass::usecases::{FlowSummaryService, ReportService};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    flow_compass::adapters::ui::init_ui();

    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config could not be loaded, using defaults");
            AppConfig::default()
        }
    };

    // --- Flow source (JSON document, loaded once) ---
    let flows_path = PathBuf::from(cfg.flows_path_or_default());
    let json_source = JsonFlowSource::new(&flows_path);
    json_source
        .load()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let flows: Arc<dyn FlowSource> = Arc::new(json_source);

    // --- Stats gateway: REST when configured, mock otherwise ---
    let stats: Arc<dyn StatsGateway> = if cfg.is_stats_api_configured() {
        let url = cfg.stats_api_url.clone().unwrap_or_default();
        let timeout = Duration::from_secs(cfg.request_timeout_secs_or_default());
        info!(url = %url, timeout_secs = timeout.as_secs(), "stats API enabled");
        Arc::new(
            HttpStatsGateway::new(url, cfg.stats_api_token.clone(), timeout)
                .map_err(|e| anyhow::anyhow!("{}", e))?,
        )
    } else {
        warn!("FLOW_COMPASS_STATS_API_URL not set, using mock stats gateway");
        Arc::new(MockStatsGateway::new())
    };

    // --- Services ---
    let summary_service = Arc::new(FlowSummaryService::new(flows, stats));
    let report_dir = PathBuf::from(cfg.report_dir_or_default());
    info!(path = %report_dir.display(), "report directory");
    let report_service = Arc::new(ReportService::new(report_dir));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        cfg.anchor(),
        cfg.scope_or_default(),
        summary_service,
        report_service,
    ));

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
