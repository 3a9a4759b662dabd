//! Single-slot trailing debouncer
//!
//! Prevents running an operation for every event of a rapid burst: each call
//! replaces the pending execution, and only the last call of a burst reaches
//! the operation once the window has passed without further calls.

use crate::config::DebounceConfig;
use crate::error::Result;
use crate::pending::{arm, run_due, Counters, Pending};
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::Instant;
use tracing::{debug, trace};

/// Snapshot of a debouncer's lifetime counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebounceStats {
    /// Calls made to the debouncer
    pub calls: u64,
    /// Pending executions replaced by a later call
    pub superseded: u64,
    /// Executions delivered by the timer
    pub fired: u64,
    /// Pending executions dropped by `cancel`
    pub cancelled: u64,
    /// Executions forced early by `flush`
    pub flushed: u64,
}

impl DebounceStats {
    /// Total number of times the operation ran
    pub fn executions(&self) -> u64 {
        self.fired + self.flushed
    }
}

/// Debounced wrapper around an operation taking `Args`
///
/// Operations with several arguments take a tuple. Clones share the same
/// pending slot, so a burst spread over several clones still coalesces.
/// Dropping the last clone cancels whatever is pending.
pub struct Debouncer<Args> {
    inner: Arc<Inner<Args>>,
}

struct Inner<Args> {
    operation: Box<dyn Fn(Args) + Send + Sync>,
    window: Duration,
    /// Runtime captured at construction; every timer is spawned here
    runtime: Handle,
    state: Mutex<State<Args>>,
    counters: Counters,
}

struct State<Args> {
    /// At most one pending execution
    pending: Option<Pending<Args>>,
    next_generation: u64,
}

impl<Args: Send + 'static> Debouncer<Args> {
    /// Create a debouncer on the current tokio runtime
    ///
    /// Fails with [`Error::NoRuntime`](crate::Error::NoRuntime) when called
    /// outside a runtime.
    pub fn new<F>(window: Duration, operation: F) -> Result<Self>
    where
        F: Fn(Args) + Send + Sync + 'static,
    {
        let runtime = Handle::try_current()?;
        Ok(Self::with_handle(runtime, window, operation))
    }

    /// Create a debouncer from validated configuration
    pub fn from_config<F>(config: &DebounceConfig, operation: F) -> Result<Self>
    where
        F: Fn(Args) + Send + Sync + 'static,
    {
        config.validate()?;
        Self::new(config.window(), operation)
    }

    /// Create a debouncer whose timers run on `runtime`
    pub fn with_handle<F>(runtime: Handle, window: Duration, operation: F) -> Self
    where
        F: Fn(Args) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                operation: Box::new(operation),
                window,
                runtime,
                state: Mutex::new(State {
                    pending: None,
                    next_generation: 0,
                }),
                counters: Counters::default(),
            }),
        }
    }

    /// Schedule the operation with `args`, replacing any pending execution
    ///
    /// Never runs the operation synchronously, even with a zero window.
    pub fn call(&self, args: Args) {
        let inner = &self.inner;
        Counters::bump(&inner.counters.calls);

        // Cancel and re-arm under one lock so two callers can never leave
        // two timers armed.
        let mut state = inner.state.lock();

        if let Some(previous) = state.pending.take() {
            if previous.is_due(Instant::now()) {
                // The window elapsed before this call; the earlier call still runs.
                trace!(generation = previous.generation, "pending call already due");
                let args = previous.cancel();
                let weak = Arc::downgrade(inner);
                run_due(&inner.runtime, move || deliver(weak, args));
            } else {
                trace!(generation = previous.generation, "superseding pending call");
                drop(previous.cancel());
                Counters::bump(&inner.counters.superseded);
            }
        }

        state.next_generation += 1;
        let generation = state.next_generation;

        let weak = Arc::downgrade(inner);
        let timer = arm(&inner.runtime, inner.window, move || fire(weak, generation));
        state.pending = Some(Pending::new(generation, args, timer));

        trace!(generation, window = ?inner.window, "armed debounce timer");
    }

    /// Cancel the pending execution
    ///
    /// Returns `true` if something was pending. Cancelling when nothing is
    /// pending is a no-op.
    pub fn cancel(&self) -> bool {
        let pending = self.inner.state.lock().pending.take();
        match pending {
            Some(pending) => {
                trace!(generation = pending.generation, "cancelled pending call");
                drop(pending.cancel());
                Counters::bump(&self.inner.counters.cancelled);
                true
            }
            None => false,
        }
    }

    /// Run the pending execution now instead of waiting for the window
    ///
    /// The operation runs on the calling thread. Returns `false` if nothing
    /// was pending.
    pub fn flush(&self) -> bool {
        let pending = self.inner.state.lock().pending.take();
        match pending {
            Some(pending) => {
                debug!(generation = pending.generation, "flushing pending call");
                let args = pending.cancel();
                Counters::bump(&self.inner.counters.flushed);
                (self.inner.operation)(args);
                true
            }
            None => false,
        }
    }
}

impl<Args> Debouncer<Args> {
    /// Whether an execution is scheduled and has not fired yet
    pub fn is_pending(&self) -> bool {
        self.inner.state.lock().pending.is_some()
    }

    /// The quiescence window
    pub fn window(&self) -> Duration {
        self.inner.window
    }

    /// Snapshot of the lifetime counters
    pub fn stats(&self) -> DebounceStats {
        let counters = &self.inner.counters;
        DebounceStats {
            calls: Counters::read(&counters.calls),
            superseded: Counters::read(&counters.superseded),
            fired: Counters::read(&counters.fired),
            cancelled: Counters::read(&counters.cancelled),
            flushed: Counters::read(&counters.flushed),
        }
    }
}

/// Timer callback: run the operation if `generation` is still the pending one
fn fire<Args>(weak: Weak<Inner<Args>>, generation: u64) {
    // Every owner is gone; teardown already cancelled the slot.
    let Some(inner) = weak.upgrade() else {
        return;
    };

    let args = {
        let mut state = inner.state.lock();
        match state.pending.take() {
            Some(pending) if pending.generation == generation => pending.into_args(),
            other => {
                // Superseded after the deadline passed but before we got the lock.
                state.pending = other;
                trace!(generation, "stale debounce timer ignored");
                return;
            }
        }
    };

    trace!(generation, "debounce window elapsed, running operation");
    Counters::bump(&inner.counters.fired);
    (inner.operation)(args);
}

/// Run a call that was already due when the next call replaced it
fn deliver<Args>(weak: Weak<Inner<Args>>, args: Args) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    Counters::bump(&inner.counters.fired);
    (inner.operation)(args);
}

impl<Args> Clone for Debouncer<Args> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<Args> fmt::Debug for Debouncer<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("window", &self.inner.window)
            .field("pending", &self.is_pending())
            .field("stats", &self.stats())
            .finish()
    }
}

impl<Args> Drop for Inner<Args> {
    fn drop(&mut self) {
        if let Some(pending) = self.state.get_mut().pending.take() {
            trace!(generation = pending.generation, "debouncer dropped with pending call");
            drop(pending.cancel());
        }
    }
}

/// Wrap `operation` in a debounced callable
///
/// The returned closure has the operation's argument type and can be cloned
/// and moved to other tasks; all clones share one pending slot.
///
/// ```no_run
/// # async fn example() -> debounce::Result<()> {
/// use std::time::Duration;
///
/// let search = debounce::debounce(
///     |query: String| println!("searching for {query}"),
///     Duration::from_millis(300),
/// )?;
///
/// search("m".to_string());
/// search("ma".to_string());
/// search("mat".to_string()); // only this one runs, 300ms from now
/// # Ok(())
/// # }
/// ```
pub fn debounce<Args, F>(
    operation: F,
    window: Duration,
) -> Result<impl Fn(Args) + Clone + Send + Sync + 'static>
where
    Args: Send + 'static,
    F: Fn(Args) + Send + Sync + 'static,
{
    let debouncer = Debouncer::new(window, operation)?;
    Ok(move |args: Args| debouncer.call(args))
}
