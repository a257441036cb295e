use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::sync::Mutex;

use tickerboard::config::{AppConfig, fetch_config};
use tickerboard::fetcher::BitkubClient;
use tickerboard::scheduler::RefreshScheduler;
use tickerboard::tls::build_tls_config;
use tickerboard::{TickerboardError, report, tui};

#[tokio::main]
async fn main() -> Result<(), TickerboardError> {
    let app_config = fetch_config()?;
    let interactive = std::io::stdout().is_terminal();

    init_tracing(&app_config, interactive)?;

    let tls_config = build_tls_config(app_config.exchange.ca_bundle.as_deref())?;
    let client = BitkubClient::new(&app_config.exchange, tls_config)?;

    let handle = RefreshScheduler::new(client, app_config.refresh.clone()).start();

    if interactive {
        tui::run(handle, &app_config.refresh).await
    } else {
        report::run_headless(handle, app_config.refresh.top_k).await
    }
}

/// Logs to stderr in headless mode and to the configured file while the
/// TUI owns the screen.
fn init_tracing(config: &AppConfig, interactive: bool) -> Result<(), TickerboardError> {
    if interactive {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)
            .map_err(|e| {
                TickerboardError::Io(format!(
                    "failed to open log file {}: {e}",
                    config.log_file.display()
                ))
            })?;
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
