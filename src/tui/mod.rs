//! Terminal User Interface for the market board.
//!
//! Provides a Ratatui-based TUI that renders the ranked views, a detail card
//! and the rolling price chart published by the refresh scheduler.

pub mod app;
pub mod components;
pub mod event;
pub mod tabs;
pub mod terminal;
pub mod ui;

use tokio::sync::mpsc;
use tracing::info;

pub use app::App;
pub use event::{Event, Message};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;

use crate::config::RefreshConfig;
use crate::scheduler::SchedulerHandle;

/// UI refresh tick used to expire status messages.
const TICK_INTERVAL_MS: u64 = 250;

/// Runs the dashboard until the user quits, then stops the scheduler.
///
/// # Errors
///
/// Returns [`TickerboardError::Io`](crate::TickerboardError::Io) if the
/// terminal cannot be set up, drawn to, or restored.
pub async fn run(handle: SchedulerHandle, config: &RefreshConfig) -> crate::Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(config.top_k, config.history_window, config.poll_interval);
    app.update_dashboard(handle.current());

    let (tx, mut rx) = mpsc::unbounded_channel();
    event::spawn_event_reader(tx.clone());
    event::spawn_tick_timer(tx.clone(), TICK_INTERVAL_MS);
    event::spawn_state_forwarder(handle.subscribe(), tx);

    let result = draw_loop(&mut terminal, &mut app, &mut rx).await;

    restore_terminal(&mut terminal)?;
    info!("Dashboard closed");

    handle.stop();
    handle.join().await?;
    result
}

async fn draw_loop(
    terminal: &mut Tui,
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<Message>,
) -> crate::Result<()> {
    while !app.should_quit {
        terminal
            .draw(|frame| render(frame, app))
            .map_err(|e| crate::TickerboardError::Io(format!("failed to draw frame: {e}")))?;

        match rx.recv().await {
            Some(message) => event::update(app, message),
            None => break,
        }
    }
    Ok(())
}
