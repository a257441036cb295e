//! Plain-text rendering for non-interactive output.
//!
//! Used when stdout is not a terminal: each successful refresh prints the
//! three ranked views as a fixed-width table.

use std::fmt::Write as _;

use tracing::info;

use crate::format::{format_change, format_clock, format_price, format_volume};
use crate::ranking::RankingKind;
use crate::scheduler::{Dashboard, Phase, SchedulerHandle};
use crate::Result;

/// Renders the ranked views of `dashboard` as text.
pub fn render_report(dashboard: &Dashboard, top_k: usize) -> String {
    let mut out = String::new();

    let updated = dashboard
        .last_update
        .map(format_clock)
        .unwrap_or_else(|| "--:--:--".to_string());
    let _ = writeln!(
        out,
        "Bitkub market board · updated {updated} · {} markets",
        dashboard.markets.len()
    );

    for kind in RankingKind::ALL {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", kind.title(top_k));

        let view = dashboard.views.get(kind);
        if view.is_empty() {
            let _ = writeln!(out, "  (no data)");
            continue;
        }

        for (rank, entry) in view.iter().enumerate() {
            let ticker = &entry.ticker;
            let _ = write!(
                out,
                "{:>3}. {:<8} {:>14} {:>9}",
                rank + 1,
                entry.instrument.base(),
                format_price(ticker.last),
                format_change(ticker.change_or_zero()),
            );
            if kind == RankingKind::Volume {
                let _ = write!(
                    out,
                    "  vol {:>12}",
                    format_volume(ticker.quote_volume.unwrap_or(0.0))
                );
            }
            let _ = writeln!(out);
        }
    }

    out
}

/// Prints a report after every successful refresh until Ctrl-C, then
/// stops the scheduler.
///
/// # Errors
///
/// Returns [`TickerboardError::Io`](crate::TickerboardError::Io) if the
/// Ctrl-C handler cannot be installed or the scheduler task panicked.
pub async fn run_headless(handle: SchedulerHandle, top_k: usize) -> Result<()> {
    let mut updates = handle.subscribe();
    let mut last_printed = None;

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.map_err(|e| crate::TickerboardError::Io(format!("failed to listen for Ctrl-C: {e}")))?;
                info!("Interrupted");
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let dashboard = updates.borrow_and_update().clone();
                if dashboard.phase == Phase::Ready && dashboard.last_update != last_printed {
                    last_printed = dashboard.last_update;
                    println!("{}", render_report(&dashboard, top_k));
                }
            }
        }
    }

    handle.stop();
    handle.join().await
}
