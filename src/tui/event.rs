//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::{mpsc, watch};

use crate::scheduler::Dashboard;

use super::app::App;

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),
    /// New state published by the refresh scheduler.
    Dashboard(Box<Dashboard>),
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Spawns a task that forwards every scheduler state change to the UI.
pub fn spawn_state_forwarder(
    mut updates: watch::Receiver<Dashboard>,
    tx: mpsc::UnboundedSender<Message>,
) {
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let dashboard = updates.borrow_and_update().clone();
            if tx.send(Message::Dashboard(Box::new(dashboard))).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::Dashboard(dashboard) => app.update_dashboard(*dashboard),
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => {}
        Event::Tick => app.clear_stale_errors(),
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        // Tab navigation
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.previous_tab();
            } else {
                app.next_tab();
            }
        }
        KeyCode::BackTab => app.previous_tab(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(index) = c.to_digit(10) {
                app.select_tab(index as usize - 1);
            }
        }

        // Row selection
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventKind;

    use super::*;
    use crate::ranking::RankingKind;

    fn key(code: KeyCode) -> Message {
        Message::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    #[test]
    fn number_keys_select_tabs() {
        let mut app = App::new(10, 20, Duration::from_secs(10));
        update(&mut app, key(KeyCode::Char('3')));
        assert_eq!(app.current_tab().kind(), RankingKind::Losers);
        update(&mut app, key(KeyCode::Char('1')));
        assert_eq!(app.current_tab().kind(), RankingKind::Volume);
    }

    #[test]
    fn tab_and_backtab_cycle() {
        let mut app = App::new(10, 20, Duration::from_secs(10));
        update(&mut app, key(KeyCode::Tab));
        assert_eq!(app.current_tab().kind(), RankingKind::Gainers);
        update(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.current_tab().kind(), RankingKind::Volume);
    }

    #[test]
    fn quit_keys() {
        let mut app = App::new(10, 20, Duration::from_secs(10));
        update(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = App::new(10, 20, Duration::from_secs(10));
        let ctrl_c = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        };
        update(&mut app, Message::Input(Event::Key(ctrl_c)));
        assert!(app.should_quit);

        let mut app = App::new(10, 20, Duration::from_secs(10));
        update(&mut app, key(KeyCode::Esc));
        assert!(app.should_quit);
    }
}
