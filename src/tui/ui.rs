//! Main UI rendering coordinator.

use ratatui::Frame;

use super::app::App;
use super::tabs::board;

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    if app.dashboard.loading {
        board::render_loading(frame, app);
    } else {
        board::render(frame, app);
    }
}
