//! Debounced query dispatcher
//!
//! Follows a filter store, waits for edits to settle, then fetches the
//! serialized query. Requests are never cancelled; instead every dispatch
//! takes a sequence token and only the response carrying the latest token is
//! applied to the view.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use errors::DashResult;

use crate::client::PageSource;
use crate::filters::FilterSet;
use crate::query;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Issues monotonically increasing dispatch tokens
#[derive(Debug, Default)]
pub struct SequenceGate {
    latest: AtomicU64,
}

impl SequenceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token for a new dispatch; it becomes the latest
    pub fn next(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether a response with this token may be applied
    pub fn is_current(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

/// What the table view renders
#[derive(Debug, Clone)]
pub struct ViewState<T> {
    pub loading: bool,
    /// Last successfully applied page; kept across errors
    pub data: Option<T>,
    /// Message for the error toast of the last applied response
    pub error: Option<String>,
    /// Token of the last applied response (0 before any)
    pub applied_seq: u64,
    /// Responses dropped because a newer dispatch had been issued
    pub stale_dropped: u64,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            data: None,
            error: None,
            applied_seq: 0,
            stale_dropped: 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DispatcherConfig {
    pub debounce: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Handle to a running dispatcher task
pub struct DispatcherHandle<T> {
    view: watch::Receiver<ViewState<T>>,
    gate: Arc<SequenceGate>,
    task: JoinHandle<()>,
}

impl<T> DispatcherHandle<T> {
    pub fn view(&self) -> watch::Receiver<ViewState<T>> {
        self.view.clone()
    }

    /// Token of the most recent dispatch
    pub fn latest_seq(&self) -> u64 {
        self.gate.latest()
    }

    /// Stop following the store; in-flight responses are discarded
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Wait for the task to finish (after the store is dropped)
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

/// Spawn a dispatcher for one table
///
/// The initial state is fetched right away; later changes are debounced so
/// that only the state present when the timer fires is sent.
pub fn spawn_dispatcher<F, S>(
    mut filters: watch::Receiver<F>,
    source: Arc<S>,
    config: DispatcherConfig,
) -> DispatcherHandle<S::Output>
where
    F: FilterSet,
    S: PageSource,
{
    let (view_tx, view_rx) = watch::channel(ViewState::default());
    let gate = Arc::new(SequenceGate::new());
    // Snapshot now: edits made before the task first runs must still be debounced
    let initial = filters.borrow_and_update().clone();
    let task = tokio::spawn(run(initial, filters, source, config, view_tx, gate.clone()));
    DispatcherHandle {
        view: view_rx,
        gate,
        task,
    }
}

async fn run<F, S>(
    initial: F,
    mut filters: watch::Receiver<F>,
    source: Arc<S>,
    config: DispatcherConfig,
    view_tx: watch::Sender<ViewState<S::Output>>,
    gate: Arc<SequenceGate>,
) where
    F: FilterSet,
    S: PageSource,
{
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<(u64, DashResult<S::Output>)>();
    let mut in_flight = 0usize;
    let mut deadline: Option<Instant> = None;
    let mut filters_open = true;

    dispatch(&initial, &source, &gate, &view_tx, &done_tx);
    in_flight += 1;

    loop {
        if !filters_open && deadline.is_none() && in_flight == 0 {
            break;
        }

        let timer = async {
            match deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            changed = filters.changed(), if filters_open => {
                if changed.is_ok() {
                    deadline = Some(Instant::now() + config.debounce);
                } else {
                    filters_open = false;
                }
            }
            _ = timer => {
                deadline = None;
                let state = filters.borrow_and_update().clone();
                dispatch(&state, &source, &gate, &view_tx, &done_tx);
                in_flight += 1;
            }
            Some((seq, result)) = done_rx.recv() => {
                in_flight = in_flight.saturating_sub(1);
                apply(seq, result, &gate, &view_tx);
            }
        }
    }
}

fn dispatch<F, S>(
    state: &F,
    source: &Arc<S>,
    gate: &SequenceGate,
    view_tx: &watch::Sender<ViewState<S::Output>>,
    done_tx: &mpsc::UnboundedSender<(u64, DashResult<S::Output>)>,
) where
    F: FilterSet,
    S: PageSource,
{
    let seq = gate.next();
    let query = query::serialize(state);
    debug!(seq, query = %query, "Dispatching query");
    view_tx.send_modify(|view| view.loading = true);

    let source = Arc::clone(source);
    let done_tx = done_tx.clone();
    tokio::spawn(async move {
        let result = source.fetch(query).await;
        let _ = done_tx.send((seq, result));
    });
}

fn apply<T>(
    seq: u64,
    result: DashResult<T>,
    gate: &SequenceGate,
    view_tx: &watch::Sender<ViewState<T>>,
) {
    if !gate.is_current(seq) {
        debug!(seq, latest = gate.latest(), "Dropping stale response");
        view_tx.send_modify(|view| view.stale_dropped += 1);
        return;
    }

    view_tx.send_modify(|view| {
        view.loading = false;
        view.applied_seq = seq;
        match result {
            Ok(data) => {
                view.data = Some(data);
                view.error = None;
            },
            Err(e) => {
                warn!(seq, "Query failed: {}", e);
                view.error = Some(e.to_string());
            },
        }
    });
}
