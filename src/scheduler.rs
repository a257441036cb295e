//! Periodic fetch → accumulate → rank loop.
//!
//! A single tokio task owns the cycle. It publishes [`Dashboard`] values
//! through a `watch` channel, and every mutation happens inside one
//! `send_modify` call, so readers never see ranked views and history from
//! different snapshots.
//!
//! ```text
//! Idle ──start──▶ Fetching ──ok──▶ Ready ──tick──▶ Fetching
//!                    │                                 ▲
//!                    └──err──▶ Failed ──────tick───────┘
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::RefreshConfig;
use crate::error::TickerboardError;
use crate::fetcher::{MarketSource, fetch_market};
use crate::history::PriceHistory;
use crate::models::{MarketData, MarketSnapshot, SymbolInfo};
use crate::ranking::RankedViews;

/// Where the refresh loop currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Fetching,
    Ready,
    /// The last cycle failed; the previous data is still shown.
    Failed,
}

impl Phase {
    /// Returns a display string for the phase.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::Fetching => "Refreshing...",
            Phase::Ready => "Live",
            Phase::Failed => "Stale",
        }
    }
}

/// Everything the presentation layer may read.
#[derive(Clone, Debug)]
pub struct Dashboard {
    pub phase: Phase,
    /// True until the first successful cycle.
    pub loading: bool,
    pub snapshot: Arc<MarketSnapshot>,
    /// Quote-prefixed markets from the latest listing.
    pub markets: Vec<SymbolInfo>,
    pub history: PriceHistory,
    pub views: RankedViews,
    pub last_update: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub consecutive_failures: u32,
}

impl Dashboard {
    pub fn new(history_window: usize) -> Self {
        Self {
            phase: Phase::Idle,
            loading: true,
            snapshot: Arc::new(MarketSnapshot::default()),
            markets: Vec::new(),
            history: PriceHistory::new(history_window),
            views: RankedViews::default(),
            last_update: None,
            last_error: None,
            consecutive_failures: 0,
        }
    }

    pub fn begin_fetch(&mut self) {
        self.phase = Phase::Fetching;
    }

    /// Applies a successful cycle: snapshot, history and views move together.
    pub fn apply(&mut self, data: MarketData, now: DateTime<Utc>, top_k: usize) {
        self.history.record(&data.snapshot, now);
        self.views = RankedViews::compute(&data.snapshot, top_k);
        self.snapshot = Arc::new(data.snapshot);
        self.markets = data.markets;
        self.last_update = Some(now);
        self.last_error = None;
        self.consecutive_failures = 0;
        self.loading = false;
        self.phase = Phase::Ready;
    }

    /// Records a failed cycle. Previous data stays visible.
    pub fn fail(&mut self, error: &TickerboardError) {
        self.last_error = Some(error.to_string());
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.phase = Phase::Failed;
    }

    /// Description of a listed market, if the listing has it.
    pub fn market_info(&self, instrument: &crate::models::Instrument) -> Option<&str> {
        self.markets
            .iter()
            .find(|m| &m.symbol == instrument)
            .map(|m| m.info.as_str())
            .filter(|info| !info.is_empty())
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(RefreshConfig::default().history_window)
    }
}

/// Drives refresh cycles for a [`MarketSource`].
pub struct RefreshScheduler<S> {
    source: S,
    config: RefreshConfig,
}

impl<S: MarketSource> RefreshScheduler<S> {
    pub fn new(source: S, config: RefreshConfig) -> Self {
        Self { source, config }
    }

    /// Spawns the refresh loop. The first cycle starts immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(self) -> SchedulerHandle {
        let (state, _) = watch::channel(Dashboard::new(self.config.history_window));
        let alive = Arc::new(AtomicBool::new(true));
        let shutdown = Arc::new(Notify::new());

        let task = tokio::spawn(run_loop(
            self.source,
            self.config,
            state.clone(),
            Arc::clone(&alive),
            Arc::clone(&shutdown),
        ));

        SchedulerHandle {
            state,
            alive,
            shutdown,
            task,
        }
    }
}

/// Control and read access to a running scheduler.
///
/// Holds its own sender so that [`stop`](Self::stop) can serialize with the
/// loop's writes on the channel lock.
pub struct SchedulerHandle {
    state: watch::Sender<Dashboard>,
    alive: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// A receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<Dashboard> {
        self.state.subscribe()
    }

    /// A copy of the current state.
    pub fn current(&self) -> Dashboard {
        self.state.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.alive.load(Ordering::Acquire) && !self.task.is_finished()
    }

    /// Stops the loop. No timer fires afterwards, and a cycle still in
    /// flight is allowed to finish but its result is dropped.
    ///
    /// The flag flips under the channel's write lock, so once this returns
    /// the published state no longer changes. Blocks while a
    /// [`watch::Ref`] from this scheduler is held on another thread.
    pub fn stop(&self) {
        let mut was_alive = false;
        self.state.send_if_modified(|_| {
            was_alive = self.alive.swap(false, Ordering::AcqRel);
            false
        });
        if was_alive {
            info!("Stopping refresh scheduler");
        }
        self.shutdown.notify_one();
    }

    /// Waits for the loop task to exit.
    ///
    /// # Errors
    ///
    /// Returns [`TickerboardError::Io`] if the task panicked.
    pub async fn join(self) -> crate::Result<()> {
        self.task
            .await
            .map_err(|e| TickerboardError::Io(format!("refresh task failed: {e}")))
    }
}

async fn run_loop<S: MarketSource>(
    source: S,
    config: RefreshConfig,
    state: watch::Sender<Dashboard>,
    alive: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
) {
    // `interval` panics on a zero period.
    let period = config.poll_interval.max(Duration::from_millis(1));
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        interval_ms = period.as_millis() as u64,
        history_window = config.history_window,
        top_k = config.top_k,
        "Refresh scheduler started"
    );

    loop {
        tokio::select! {
            biased;
            _ = shutdown.notified() => break,
            _ = ticker.tick() => {}
        }

        if !publish_if_alive(&state, &alive, Dashboard::begin_fetch) {
            break;
        }
        debug!("Refresh cycle started");

        let outcome = fetch_market(&source).await;

        let published = match outcome {
            Ok(data) => {
                let instruments = data.snapshot.len();
                let markets = data.markets.len();
                let applied = publish_if_alive(&state, &alive, |dashboard| {
                    dashboard.apply(data, Utc::now(), config.top_k);
                });
                if applied {
                    info!(instruments, markets, "Market data refreshed");
                }
                applied
            }
            Err(e) => {
                let mut failures = 0;
                let applied = publish_if_alive(&state, &alive, |dashboard| {
                    dashboard.fail(&e);
                    failures = dashboard.consecutive_failures;
                });
                if applied {
                    warn!(error = %e, kind = ?e.kind(), failures, "Refresh cycle failed");
                }
                applied
            }
        };

        if !published {
            debug!("Discarding refresh result after stop");
            break;
        }
    }

    info!("Refresh scheduler stopped");
}

/// Runs `update` under the channel's write lock unless the scheduler was
/// stopped. Returns whether the state changed.
fn publish_if_alive(
    state: &watch::Sender<Dashboard>,
    alive: &AtomicBool,
    update: impl FnOnce(&mut Dashboard),
) -> bool {
    state.send_if_modified(|dashboard| {
        if !alive.load(Ordering::Acquire) {
            return false;
        }
        update(dashboard);
        true
    })
}
