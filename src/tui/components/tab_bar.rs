//! Tab bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::App;

/// Renders the title and one tab per ranked view, numbered for the
/// `1`-`3` shortcuts.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans: Vec<Span> = vec![Span::styled(
        " Bitkub Real-time Dashboard ",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )];

    for (i, tab) in app.tabs.iter().enumerate() {
        let style = if i == app.active_tab {
            Style::default()
                .fg(Color::Black)
                .bg(tab_color(tab.kind()))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} {} ", i + 1, tab.title()), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Accent color per view, matching the section markers of the board.
pub fn tab_color(kind: crate::ranking::RankingKind) -> Color {
    use crate::ranking::RankingKind;
    match kind {
        RankingKind::Volume => Color::Blue,
        RankingKind::Gainers => Color::Green,
        RankingKind::Losers => Color::Red,
    }
}
