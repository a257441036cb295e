//! Application state for the TUI.

use std::time::{Duration, Instant};

use crate::ranking::{RankedEntry, RankedView, RankingKind};
use crate::scheduler::{Dashboard, Phase};

/// How long an error stays in the status bar.
const ERROR_DISPLAY_SECS: u64 = 5;

/// Central application state container.
pub struct App {
    // -- Tab State --
    /// Ranked views shown as tabs, in display order.
    pub tabs: Vec<Tab>,
    /// Index of the currently active tab.
    pub active_tab: usize,
    /// Selected row in the active view.
    pub selected: usize,

    // -- Market State --
    /// Latest state published by the refresh scheduler.
    pub dashboard: Dashboard,
    /// Number of entries per ranked view.
    pub top_k: usize,
    /// Refresh cadence, shown in the footer.
    pub poll_interval: Duration,

    // -- UI State --
    /// Error message to display (clears after timeout).
    pub error_message: Option<ErrorDisplay>,

    // -- Internal --
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates a new App instance showing an empty, loading board.
    pub fn new(top_k: usize, history_window: usize, poll_interval: Duration) -> Self {
        Self {
            tabs: RankingKind::ALL.iter().copied().map(Tab).collect(),
            active_tab: 0,
            selected: 0,

            dashboard: Dashboard::new(history_window),
            top_k,
            poll_interval,

            error_message: None,

            should_quit: false,
        }
    }

    /// Returns the currently active tab.
    pub fn current_tab(&self) -> Tab {
        self.tabs[self.active_tab]
    }

    /// The ranked view behind the active tab.
    pub fn current_view(&self) -> &RankedView {
        self.dashboard.views.get(self.current_tab().kind())
    }

    /// The entry under the cursor, if the view has one.
    pub fn selected_entry(&self) -> Option<&RankedEntry> {
        self.current_view().get(self.selected)
    }

    /// Switches to the next tab.
    pub fn next_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.active_tab = (self.active_tab + 1) % self.tabs.len();
            self.selected = 0;
        }
    }

    /// Switches to the previous tab.
    pub fn previous_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.active_tab = self
                .active_tab
                .checked_sub(1)
                .unwrap_or(self.tabs.len() - 1);
            self.selected = 0;
        }
    }

    /// Jumps to the tab at `index`, ignoring out-of-range indices.
    pub fn select_tab(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.active_tab = index;
            self.selected = 0;
        }
    }

    pub fn select_next(&mut self) {
        let len = self.current_view().len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Replaces the displayed state with a newer one from the scheduler.
    pub fn update_dashboard(&mut self, dashboard: Dashboard) {
        let newly_failed = dashboard.phase == Phase::Failed
            && (self.dashboard.phase != Phase::Failed
                || self.dashboard.consecutive_failures != dashboard.consecutive_failures);

        if newly_failed && let Some(error) = dashboard.last_error.clone() {
            self.show_error(error);
        }

        self.dashboard = dashboard;

        let len = self.current_view().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Sets an error message to display.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(ErrorDisplay {
            message: message.into(),
            timestamp: Instant::now(),
        });
    }

    /// Clears error messages older than the display timeout.
    pub fn clear_stale_errors(&mut self) {
        if let Some(ref error) = self.error_message
            && error.timestamp.elapsed() > Duration::from_secs(ERROR_DISPLAY_SECS)
        {
            self.error_message = None;
        }
    }
}

/// A tab showing one ranked view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tab(pub RankingKind);

impl Tab {
    pub fn kind(&self) -> RankingKind {
        self.0
    }

    /// Returns the display title for the tab.
    pub fn title(&self) -> &'static str {
        self.0.label()
    }
}

/// Error message with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct ErrorDisplay {
    /// The error message.
    pub message: String,
    /// When the error was shown.
    pub timestamp: Instant,
}
