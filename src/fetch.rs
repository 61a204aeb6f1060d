//! The fetch lifecycle
//!
//! Every panel drives its I/O through a `FetchController`: one
//! loading/success/error state plus a generation counter that lets a
//! newer request supersede anything still in flight. A superseded
//! attempt never writes state - it simply vanishes.

use parking_lot::Mutex;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

// ============================================
// ERROR TAXONOMY
// ============================================

/// Everything a panel can surface when a fetch goes wrong.
///
/// Cancellation is deliberately absent: a superseded or torn-down
/// request reports nothing at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Bad user input, caught before any network call is issued.
    #[error("{0}")]
    Validation(String),

    /// The API answered with a non-2xx status.
    #[error("request failed: {0}")]
    Http(String),

    /// Connection-level failure, or a failing local process boundary.
    #[error("network error: {0}")]
    Network(String),

    /// HTTP 200 with an empty result collection. Treated as bad input,
    /// never as a valid empty success.
    #[error("no data found for the provided input")]
    EmptyResult,

    /// The body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        FetchError::Network(error.to_string())
    }
}

impl FetchError {
    pub fn is_validation(&self) -> bool {
        matches!(self, FetchError::Validation(_))
    }
}

// ============================================
// FETCH STATE
// ============================================

/// Lifecycle state of one panel's data.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// No request issued yet (e.g. the address field is still empty).
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> FetchState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, FetchState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// The fetched value, present only in `Success`.
    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Success(value) => Some(value),
            _ => None,
        }
    }

    /// The surfaced message, present only in `Error`.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            FetchState::Error(message) => Some(message),
            _ => None,
        }
    }
}

// ============================================
// FETCH CONTROLLER
// ============================================

/// One panel's fetch slot.
///
/// `begin` accepts a prepared future instead of a URL so the lifecycle
/// is independent of any particular transport - panels hand it an API
/// call, the forecast panel hands it a process invocation, and tests
/// hand it whatever ordering they need.
pub struct FetchController<T> {
    state: Arc<Mutex<FetchState<T>>>,
    generation: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> FetchController<T> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FetchState::Idle)),
            generation: Arc::new(AtomicU64::new(0)),
            task: None,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> FetchState<T>
    where
        T: Clone,
    {
        self.state.lock().clone()
    }

    /// Start a fetch, superseding any in-flight attempt.
    ///
    /// Exactly one terminal transition (`Success` or `Error`) follows
    /// unless this attempt is itself superseded first.
    pub fn begin<F>(&mut self, fetch: F)
    where
        F: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let generation = self.bump();
        *self.state.lock() = FetchState::Loading;

        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);
        self.task = Some(tokio::spawn(async move {
            let outcome = fetch.await;
            let mut state = state.lock();
            // A newer request (or a cancel) owns this slot now.
            if current.load(Ordering::SeqCst) != generation {
                debug!("dropping result of superseded fetch #{}", generation);
                return;
            }
            *state = match outcome {
                Ok(value) => FetchState::Success(value),
                Err(error) => FetchState::Error(error.to_string()),
            };
        }));
    }

    /// Record a validation failure without touching the network. Any
    /// in-flight attempt loses its right to write state.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.bump();
        *self.state.lock() = FetchState::Error(message.into());
    }

    /// Drop interest in whatever is in flight. The current state is
    /// left exactly as it was - a cancelled attempt is invisible.
    pub fn cancel(&mut self) {
        self.bump();
    }

    /// Wait until the most recently issued request has settled.
    pub async fn settled(&mut self) {
        if let Some(task) = self.task.take() {
            // Aborted and panicked tasks both count as settled.
            let _ = task.await;
        }
    }

    /// Invalidate earlier attempts and abort their tasks.
    fn bump(&mut self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(task) = self.task.take() {
            task.abort();
        }
        generation
    }
}

impl<T: Send + 'static> Default for FetchController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for FetchController<T> {
    fn drop(&mut self) {
        // Panel teardown: stop the in-flight request from doing work.
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

// ============================================
// TESTS
// ============================================
