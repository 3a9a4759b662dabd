//! Pending-call bookkeeping shared by the plain and keyed debouncers

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::{sleep_until, Instant};

/// Far enough ahead that the timer never fires in practice
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// A scheduled execution that has not fired yet
///
/// Holds the arguments of the most recent call together with the timer task
/// that will deliver them. `generation` identifies the call that armed it; a
/// timer whose generation no longer matches the slot has been superseded and
/// must not run the operation.
pub(crate) struct Pending<Args> {
    pub(crate) generation: u64,
    args: Args,
    timer: Timer,
}

impl<Args> Pending<Args> {
    pub(crate) fn new(generation: u64, args: Args, timer: Timer) -> Self {
        Self {
            generation,
            args,
            timer,
        }
    }

    /// Whether the window of this call has already elapsed at `now`
    ///
    /// A zero-window call is never due from the caller's side: later calls
    /// on the same tick replace it.
    pub(crate) fn is_due(&self, now: Instant) -> bool {
        self.timer.deadline > self.timer.armed_at && self.timer.deadline <= now
    }

    /// Stop the timer and hand back the arguments
    ///
    /// Aborting a timer that already completed is a no-op.
    pub(crate) fn cancel(self) -> Args {
        self.timer.abort.abort();
        self.args
    }

    /// Take the arguments from inside the timer task itself
    pub(crate) fn into_args(self) -> Args {
        self.args
    }
}

/// Handle to an armed timer task
pub(crate) struct Timer {
    abort: AbortHandle,
    armed_at: Instant,
    deadline: Instant,
}

/// Spawn a timer task that sleeps for `window` and then runs `fire`
///
/// The deadline is taken when the timer is armed, not when the task is
/// first polled. A window too large to represent sleeps until the far future.
pub(crate) fn arm<F>(runtime: &Handle, window: Duration, fire: F) -> Timer
where
    F: FnOnce() + Send + 'static,
{
    let armed_at = Instant::now();
    let deadline = armed_at
        .checked_add(window)
        .unwrap_or_else(|| armed_at + FAR_FUTURE);
    let abort = runtime
        .spawn(async move {
            sleep_until(deadline).await;
            fire();
        })
        .abort_handle();
    Timer {
        abort,
        armed_at,
        deadline,
    }
}

/// Run `run` on `runtime` as soon as it is polled
///
/// Used for a call whose window elapsed but whose timer had not run yet when
/// the next call arrived.
pub(crate) fn run_due<F>(runtime: &Handle, run: F)
where
    F: FnOnce() + Send + 'static,
{
    runtime.spawn(async move { run() });
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub(crate) calls: AtomicU64,
    pub(crate) superseded: AtomicU64,
    pub(crate) fired: AtomicU64,
    pub(crate) cancelled: AtomicU64,
    pub(crate) flushed: AtomicU64,
}

impl Counters {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn read(counter: &AtomicU64) -> u64 {
        counter.load(Ordering::Relaxed)
    }
}
