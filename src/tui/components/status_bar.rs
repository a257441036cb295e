//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::format::format_clock;
use crate::scheduler::Phase;
use crate::tui::app::App;

/// Renders the refresh phase, last update time, market count and the
/// latest error.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let dashboard = &app.dashboard;

    let phase_color = match dashboard.phase {
        Phase::Ready => Color::Green,
        Phase::Fetching => Color::Yellow,
        Phase::Failed => Color::Red,
        Phase::Idle => Color::DarkGray,
    };

    let updated = dashboard
        .last_update
        .map(format_clock)
        .unwrap_or_else(|| "--:--:--".to_string());

    let failures_span = if dashboard.consecutive_failures > 0 {
        Span::styled(
            format!(" {} failed ", dashboard.consecutive_failures),
            Style::default().fg(Color::Red),
        )
    } else {
        Span::raw("")
    };

    let error_span = if let Some(ref error) = app.error_message {
        Span::styled(
            format!(" {} ", error.message),
            Style::default().fg(Color::Red),
        )
    } else {
        Span::raw("")
    };

    let spans = vec![
        Span::styled(
            format!(" {} ", dashboard.phase.label()),
            Style::default().fg(phase_color),
        ),
        failures_span,
        Span::raw("│"),
        Span::styled(
            format!(" Last Updated {updated} "),
            Style::default().fg(Color::White),
        ),
        Span::raw("│"),
        Span::styled(
            format!(" {} markets ", dashboard.markets.len()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("│"),
        error_span,
    ];

    let para = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
