use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use log::{debug, warn};
use satchel_chains::{ChainError, EstimateFees, FeeEstimate, SendRequest};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio::task::AbortHandle;
use tokio::time::Instant;

/// Outcome of one adapter fee call.
pub type EstimationResult = Result<FeeEstimate, ChainError>;

/// Resolves to `None` when the window's dispatch was aborted.
type WindowFuture = Shared<BoxFuture<'static, Option<EstimationResult>>>;

/// Which end of the debounce window dispatches the adapter call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DebounceEdge {
    /// Dispatch the first request of a window immediately. Later requests in
    /// the same window share its result.
    #[default]
    Leading,
    /// Dispatch the last request once input has been quiet for the delay.
    Trailing,
}

impl fmt::Display for DebounceEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leading => write!(f, "leading"),
            Self::Trailing => write!(f, "trailing"),
        }
    }
}

impl FromStr for DebounceEdge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leading" => Ok(Self::Leading),
            "trailing" => Ok(Self::Trailing),
            other => Err(format!("unknown debounce edge '{}'", other)),
        }
    }
}

/// Scheduler configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// A request arriving less than `delay` after the previous one joins its window.
    pub delay: Duration,
    pub edge: DebounceEdge,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1000),
            edge: DebounceEdge::Leading,
        }
    }
}

/// Latest request of a trailing window, read by its timer task.
struct TrailingSlot {
    request: SendRequest,
    deadline: Instant,
}

/// One debounce window: a single adapter call shared by every ticket issued in it.
struct Window {
    result: WindowFuture,
    task: AbortHandle,
    trailing: Option<Arc<Mutex<TrailingSlot>>>,
}

#[derive(Default)]
struct SchedulerState {
    next_seq: u64,
    latest_seq: u64,
    /// Every ticket at or below this sequence number is cancelled.
    cancelled_through: u64,
    last_call_at: Option<Instant>,
    window: Option<Window>,
}

impl SchedulerState {
    fn issue(&mut self) -> u64 {
        self.next_seq += 1;
        self.latest_seq = self.next_seq;
        self.next_seq
    }

    fn replace_window(&mut self, window: Option<Window>) {
        if let Some(previous) = std::mem::replace(&mut self.window, window) {
            previous.task.abort();
        }
    }
}

/// Handle on a scheduled estimation. Redeem it with [`FeeScheduler::resolve`].
pub struct EstimationTicket {
    seq: u64,
    result: WindowFuture,
}

impl EstimationTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl fmt::Debug for EstimationTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EstimationTicket")
            .field("seq", &self.seq)
            .finish_non_exhaustive()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        warn!("Fee scheduler lock was poisoned, recovering");
        poisoned.into_inner()
    })
}

/// Debounces fee estimation requests and gates their results.
///
/// Must be used from within a Tokio runtime: dispatches run on spawned tasks
/// so they can be aborted on cancellation.
pub struct FeeScheduler {
    estimator: Arc<dyn EstimateFees>,
    config: SchedulerConfig,
    state: Mutex<SchedulerState>,
    dispatches: Arc<AtomicU64>,
}

impl FeeScheduler {
    pub fn new(estimator: Arc<dyn EstimateFees>, config: SchedulerConfig) -> Self {
        Self {
            estimator,
            config,
            state: Mutex::new(SchedulerState::default()),
            dispatches: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Number of adapter calls started so far.
    pub fn dispatch_count(&self) -> u64 {
        self.dispatches.load(Ordering::SeqCst)
    }

    /// Schedule an estimation for `request`, coalescing it with any window
    /// still open.
    pub fn schedule(&self, request: SendRequest) -> EstimationTicket {
        let now = Instant::now();
        let mut state = lock(&self.state);
        let seq = state.issue();

        let window_open = state.window.is_some()
            && state
                .last_call_at
                .is_some_and(|at| now.duration_since(at) < self.config.delay);
        state.last_call_at = Some(now);

        if window_open {
            if let Some(window) = state.window.as_ref() {
                if let Some(slot) = &window.trailing {
                    let mut slot = lock(slot);
                    slot.request = request;
                    slot.deadline = now + self.config.delay;
                }
                debug!("Fee estimation #{} joined the open debounce window", seq);
                return EstimationTicket {
                    seq,
                    result: window.result.clone(),
                };
            }
        }

        let window = match self.config.edge {
            DebounceEdge::Leading => self.dispatch(request),
            DebounceEdge::Trailing => self.defer(request, now + self.config.delay),
        };
        debug!(
            "Fee estimation #{} opened a {} debounce window",
            seq, self.config.edge
        );

        let ticket = EstimationTicket {
            seq,
            result: window.result.clone(),
        };
        state.replace_window(Some(window));
        ticket
    }

    /// Dispatch `request` right away, superseding every outstanding ticket.
    ///
    /// The call does not open a debounce window: the next scheduled request
    /// always makes its own adapter call.
    pub fn dispatch_now(&self, request: SendRequest) -> EstimationTicket {
        let mut state = lock(&self.state);
        let seq = state.issue();
        state.last_call_at = None;

        let window = self.dispatch(request);
        let ticket = EstimationTicket {
            seq,
            result: window.result.clone(),
        };
        state.replace_window(Some(window));
        ticket
    }

    /// Wait for a ticket's result.
    ///
    /// Returns `None` when the ticket was cancelled or superseded by a newer
    /// one, in which case the caller must not touch any state.
    pub async fn resolve(&self, ticket: &EstimationTicket) -> Option<EstimationResult> {
        let seq = ticket.seq;
        let result = ticket.result.clone().await;

        if !self.is_current_seq(seq) {
            debug!("Fee estimation #{} was superseded, dropping its result", seq);
            return None;
        }
        if result.is_none() {
            debug!("Fee estimation #{} was aborted", seq);
        }
        result
    }

    /// Whether `ticket` is the most recent one and has not been cancelled.
    pub fn is_current(&self, ticket: &EstimationTicket) -> bool {
        self.is_current_seq(ticket.seq)
    }

    fn is_current_seq(&self, seq: u64) -> bool {
        let state = lock(&self.state);
        seq == state.latest_seq && seq > state.cancelled_through
    }

    /// Cancel `ticket`. The in-flight call is aborted only if no newer ticket
    /// shares it.
    pub fn cancel(&self, ticket: &EstimationTicket) {
        let mut state = lock(&self.state);
        state.cancelled_through = state.cancelled_through.max(ticket.seq);

        if ticket.seq == state.latest_seq {
            state.replace_window(None);
            state.last_call_at = None;
        }
    }

    /// Cancel every outstanding ticket and abort the in-flight call.
    pub fn cancel_all(&self) {
        let mut state = lock(&self.state);
        state.cancelled_through = state.next_seq;
        state.replace_window(None);
        state.last_call_at = None;
    }

    fn dispatch(&self, request: SendRequest) -> Window {
        let (tx, rx) = oneshot::channel();
        let estimator = Arc::clone(&self.estimator);
        let dispatches = Arc::clone(&self.dispatches);

        let task = tokio::spawn(async move {
            dispatches.fetch_add(1, Ordering::SeqCst);
            let _ = tx.send(estimator.estimate_fees(&request).await);
        });

        Window {
            result: shared(rx),
            task: task.abort_handle(),
            trailing: None,
        }
    }

    fn defer(&self, request: SendRequest, deadline: Instant) -> Window {
        let (tx, rx) = oneshot::channel();
        let estimator = Arc::clone(&self.estimator);
        let dispatches = Arc::clone(&self.dispatches);
        let slot = Arc::new(Mutex::new(TrailingSlot { request, deadline }));
        let timer_slot = Arc::clone(&slot);

        let task = tokio::spawn(async move {
            let request = loop {
                let deadline = lock(&timer_slot).deadline;
                tokio::time::sleep_until(deadline).await;

                let ready = {
                    let slot = lock(&timer_slot);
                    (slot.deadline <= Instant::now()).then(|| slot.request.clone())
                };
                if let Some(request) = ready {
                    break request;
                }
            };

            dispatches.fetch_add(1, Ordering::SeqCst);
            let _ = tx.send(estimator.estimate_fees(&request).await);
        });

        Window {
            result: shared(rx),
            task: task.abort_handle(),
            trailing: Some(slot),
        }
    }
}

impl Drop for FeeScheduler {
    fn drop(&mut self) {
        let state = self
            .state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(window) = state.window.take() {
            window.task.abort();
        }
    }
}

fn shared(rx: oneshot::Receiver<EstimationResult>) -> WindowFuture {
    async move { rx.await.ok() }.boxed().shared()
}
