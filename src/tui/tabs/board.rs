//! Ranked board layout and rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Sparkline},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::format::{format_change, format_price, format_volume, logo_url};
use crate::ranking::{RankedEntry, RankingKind};
use crate::tui::app::App;
use crate::tui::components::{status_bar, tab_bar};

/// Height of the sparkline bars, in rows.
const CHART_HEIGHT: u16 = 4;

/// Renders the active ranked view: list on the left, detail card on the right.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
            Constraint::Min(10),   // Ranked list + card
            Constraint::Length(1), // Keybindings help
            Constraint::Length(1), // Footer
        ])
        .split(area);

    tab_bar::render(frame, main_layout[0], app);
    status_bar::render(frame, main_layout[1], app);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_layout[2]);

    render_ranked_list(frame, content[0], app);
    render_card(frame, content[1], app);

    render_keybindings(frame, main_layout[3]);
    render_footer(frame, main_layout[4], app);
}

/// Renders the ranked table for the active tab.
fn render_ranked_list(frame: &mut Frame, area: Rect, app: &App) {
    let kind = app.current_tab().kind();

    let block = Block::default()
        .title(format!(" {} ", kind.title(app.top_k)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(tab_bar::tab_color(kind)));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let view = app.current_view();
    if view.is_empty() {
        let para = Paragraph::new("No data").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(para, inner);
        return;
    }

    let show_volume = kind == RankingKind::Volume;

    let mut header = format!("{:>3}  {}{:>14} {:>9}", "#", fit("Coin", 8), "Price", "24h");
    if show_volume {
        header.push_str(&format!(" {:>12}", "Volume"));
    }

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        header,
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    ))];

    for (i, entry) in view.iter().enumerate() {
        let ticker = &entry.ticker;
        let change = ticker.change_or_zero();
        let row_style = if i == app.selected {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };

        let mut spans = vec![
            Span::styled(format!("{:>3}  ", i + 1), row_style.fg(Color::DarkGray)),
            Span::styled(
                fit(entry.instrument.base(), 8),
                row_style.fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{:>14}", format_price(ticker.last)),
                row_style.fg(Color::White),
            ),
            Span::styled(
                format!(" {:>9}", format_change(change)),
                row_style.fg(change_color(change)),
            ),
        ];
        if show_volume {
            spans.push(Span::styled(
                format!(" {:>12}", format_volume(ticker.quote_volume.unwrap_or(0.0))),
                row_style.fg(Color::Cyan),
            ));
        }

        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Renders the detail card for the selected entry.
fn render_card(frame: &mut Frame, area: Rect, app: &App) {
    let Some(entry) = app.selected_entry() else {
        let block = Block::default().borders(Borders::ALL);
        frame.render_widget(block, area);
        return;
    };

    let base = entry.instrument.base();
    let block = Block::default()
        .title(format!(" {base} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let card_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),               // Facts
            Constraint::Length(1),            // Chart label
            Constraint::Length(CHART_HEIGHT), // Chart
        ])
        .split(inner);

    render_card_facts(frame, card_layout[0], app, entry);

    frame.render_widget(
        Paragraph::new("Price Chart").style(Style::default().fg(Color::DarkGray)),
        card_layout[1],
    );
    render_chart(frame, card_layout[2], app, entry);
}

fn render_card_facts(frame: &mut Frame, area: Rect, app: &App, entry: &RankedEntry) {
    let ticker = &entry.ticker;
    let change = ticker.change_or_zero();
    let label = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(entry.instrument.as_str(), label),
            Span::raw("  "),
            Span::styled(
                app.dashboard
                    .market_info(&entry.instrument)
                    .unwrap_or_default()
                    .to_string(),
                label,
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format_price(ticker.last),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(format_change(change), Style::default().fg(change_color(change))),
        ]),
    ];

    if app.current_tab().kind() == RankingKind::Volume {
        lines.push(Line::from(vec![
            Span::styled("24h Volume ", label),
            Span::styled(
                format_volume(ticker.quote_volume.unwrap_or(0.0)),
                Style::default().fg(Color::White),
            ),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled("High 24h ", label),
        Span::styled(format_price(ticker.high_24hr), Style::default().fg(Color::White)),
        Span::raw("   "),
        Span::styled("Low 24h ", label),
        Span::styled(format_price(ticker.low_24hr), Style::default().fg(Color::White)),
    ]));
    lines.push(Line::from(Span::styled(logo_url(entry.instrument.base()), label)));

    frame.render_widget(Paragraph::new(lines), area);
}

/// Renders the rolling price history as a sparkline.
fn render_chart(frame: &mut Frame, area: Rect, app: &App, entry: &RankedEntry) {
    let prices = app.dashboard.history.prices(&entry.instrument);

    if prices.len() < 2 {
        let para = Paragraph::new("Loading chart data...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(para, area);
        return;
    }

    let data = sparkline_data(&prices);
    let sparkline = Sparkline::default()
        .data(&data)
        .max(SPARKLINE_MAX)
        .style(Style::default().fg(change_color(entry.ticker.change_or_zero())));
    frame.render_widget(sparkline, area);
}

/// Renders the keybindings help line.
fn render_keybindings(frame: &mut Frame, area: Rect) {
    let help = "[1-3]/[Tab] switch view  [j/k] select  [q] quit";

    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let footer = format!(
        "Powered by Bitkub API • Updates every {} seconds • Crypto assets are high risk",
        app.poll_interval.as_secs().max(1)
    );
    let para = Paragraph::new(footer)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}

/// Renders the full-screen loading message shown before the first refresh.
pub fn render_loading(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    let mut lines = vec![Line::from(Span::styled(
        "Loading Bitkub Real-time Data...",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))];
    if let Some(ref error) = app.dashboard.last_error {
        lines.push(Line::from(Span::styled(
            format!("last attempt failed: {error}"),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rows[1]);
}

fn change_color(change: f64) -> Color {
    if change >= 0.0 { Color::Green } else { Color::Red }
}

/// Top of the sparkline scale.
const SPARKLINE_MAX: u64 = 100;

/// Scales prices onto `1..=SPARKLINE_MAX` so the lowest point still shows a
/// bar. A flat series sits in the middle.
pub fn sparkline_data(prices: &[f64]) -> Vec<u64> {
    let (min, max) = prices
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
            (lo.min(p), hi.max(p))
        });
    let range = max - min;

    prices
        .iter()
        .map(|&p| {
            if range > 0.0 {
                1 + ((p - min) / range * (SPARKLINE_MAX - 1) as f64).round() as u64
            } else {
                SPARKLINE_MAX / 2
            }
        })
        .collect()
}

/// Pads or truncates `text` to exactly `width` terminal columns.
pub fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str(&" ".repeat(width.saturating_sub(out.width())));
    out
}
