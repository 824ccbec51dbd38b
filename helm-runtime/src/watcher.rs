//! Sensor event watchers
//!
//! An [`EventWatcher`] polls a predicate at a fixed cadence until it turns
//! true, then reports how many polls it took. It can be bounded by a
//! timeout and stopped early through a [`CancelToken`]. The watcher is a
//! plain future: whoever awaits it owns its lifetime, so a watcher started
//! inside a routine can never outlive the state its predicate borrows.

use embassy_time::{Duration, Instant, Ticker};
use portable_atomic::{AtomicBool, Ordering};

use helm_core::config::WatchConfig;

use crate::rendezvous::Rendezvous;

/// Default time between predicate evaluations
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// How a watcher terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchOutcome {
    /// Predicate became true on poll number `polls` (1-based)
    Fired { polls: u32 },
    /// Timeout expired before the predicate became true
    TimedOut { polls: u32 },
    /// Cancelled through its token
    Cancelled,
}

impl WatchOutcome {
    /// Check if the condition was met
    pub fn fired(&self) -> bool {
        matches!(self, WatchOutcome::Fired { .. })
    }
}

/// Shared flag that stops a running watcher at its next poll
#[derive(Debug, Default)]
pub struct CancelToken {
    cancelled: AtomicBool,
}

impl CancelToken {
    /// Create an untriggered token
    pub const fn new() -> Self {
        Self {
            cancelled: AtomicBool::new(false),
        }
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check if cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Clear the token for reuse
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::Release);
    }
}

/// Single-shot poller for a sensor condition
pub struct EventWatcher<'a, P> {
    name: &'static str,
    predicate: P,
    interval: Duration,
    timeout: Option<Duration>,
    cancel: Option<&'a CancelToken>,
}

impl<'a, P> EventWatcher<'a, P>
where
    P: FnMut() -> bool,
{
    /// Watch `predicate` at the default 20 ms cadence with no timeout
    pub fn new(predicate: P) -> Self {
        Self {
            name: "watcher",
            predicate,
            interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
            cancel: None,
        }
    }

    /// Watch `predicate` using configured cadence and timeout
    pub fn from_config(predicate: P, config: &WatchConfig) -> Self {
        let watcher = Self::new(predicate)
            .poll_interval(Duration::from_millis(config.poll_interval_ms as u64));
        match config.timeout_ms {
            Some(ms) => watcher.timeout(Duration::from_millis(ms as u64)),
            None => watcher,
        }
    }

    /// Name used in log lines
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Set the time between polls
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Give up once `timeout` has elapsed without the predicate firing
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Stop when `token` is cancelled
    pub fn cancel_on(mut self, token: &'a CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Poll until the predicate is true, the timeout expires or the token
    /// is cancelled
    ///
    /// The predicate is evaluated immediately and then once per interval;
    /// it is never evaluated again after returning true.
    pub async fn run(mut self) -> WatchOutcome {
        let deadline = self.timeout.map(|t| Instant::now() + t);
        let mut ticker = Ticker::every(self.interval);
        let mut polls: u32 = 0;

        let outcome = loop {
            if self.cancel.is_some_and(CancelToken::is_cancelled) {
                break WatchOutcome::Cancelled;
            }

            polls = polls.saturating_add(1);
            if (self.predicate)() {
                break WatchOutcome::Fired { polls };
            }

            if deadline.is_some_and(|d| Instant::now() >= d) {
                break WatchOutcome::TimedOut { polls };
            }

            ticker.next().await;
        };

        match outcome {
            WatchOutcome::Fired { polls } => debug!("{} fired after {} polls", self.name, polls),
            WatchOutcome::TimedOut { polls } => {
                warn!("{} timed out after {} polls", self.name, polls)
            }
            WatchOutcome::Cancelled => debug!("{} cancelled", self.name),
        }
        outcome
    }

    /// Run, then invoke `on_true` exactly once if the predicate fired
    pub async fn run_then<F: FnOnce()>(self, on_true: F) -> WatchOutcome {
        let outcome = self.run().await;
        if outcome.fired() {
            on_true();
        }
        outcome
    }

    /// Run, then hand the outcome to `rendezvous`
    ///
    /// Timeouts and cancellations are delivered too, so the waiting side
    /// never blocks on a watcher that has already given up.
    pub async fn notify(self, rendezvous: &Rendezvous) -> WatchOutcome {
        let outcome = self.run().await;
        rendezvous.signal(outcome);
        outcome
    }
}
