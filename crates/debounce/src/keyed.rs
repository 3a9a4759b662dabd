//! Per-key debouncing
//!
//! Each key owns an independent pending slot: a burst on one key never
//! delays or supersedes another key. Useful when one event source fans out to
//! many targets, e.g. one slot per watched path or per input field.

use crate::debouncer::DebounceStats;
use crate::error::Result;
use crate::pending::{arm, run_due, Counters, Pending};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::Instant;
use tracing::{debug, trace};

/// Debouncer with one pending slot per key
///
/// The operation receives the key and the arguments of the last call made
/// for that key.
pub struct KeyedDebouncer<K: Eq + Hash, Args> {
    inner: Arc<KeyedInner<K, Args>>,
}

struct KeyedInner<K: Eq + Hash, Args> {
    operation: Box<dyn Fn(K, Args) + Send + Sync>,
    window: Duration,
    runtime: Handle,
    /// The map's shard lock makes cancel-then-rearm atomic per key
    slots: DashMap<K, Pending<Args>>,
    next_generation: AtomicU64,
    counters: Counters,
}

impl<K, Args> KeyedDebouncer<K, Args>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    Args: Send + Sync + 'static,
{
    /// Create a keyed debouncer on the current tokio runtime
    pub fn new<F>(window: Duration, operation: F) -> Result<Self>
    where
        F: Fn(K, Args) + Send + Sync + 'static,
    {
        let runtime = Handle::try_current()?;
        Ok(Self::with_handle(runtime, window, operation))
    }

    /// Create a keyed debouncer whose timers run on `runtime`
    pub fn with_handle<F>(runtime: Handle, window: Duration, operation: F) -> Self
    where
        F: Fn(K, Args) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(KeyedInner {
                operation: Box::new(operation),
                window,
                runtime,
                slots: DashMap::new(),
                next_generation: AtomicU64::new(0),
                counters: Counters::default(),
            }),
        }
    }

    /// Schedule the operation for `key`, replacing that key's pending call
    pub fn call(&self, key: K, args: Args) {
        let inner = &self.inner;
        Counters::bump(&inner.counters.calls);
        let generation = inner.next_generation.fetch_add(1, Ordering::Relaxed) + 1;

        // Holding the entry keeps the timer from observing the slot before
        // the new pending call is stored.
        let entry = inner.slots.entry(key.clone());

        let weak = Arc::downgrade(inner);
        let timer = arm(&inner.runtime, inner.window, move || {
            fire(weak, key, generation)
        });
        let pending = Pending::new(generation, args, timer);

        match entry {
            Entry::Occupied(mut occupied) => {
                let previous = occupied.insert(pending);
                if previous.is_due(Instant::now()) {
                    trace!(generation = previous.generation, "pending keyed call already due");
                    let key = occupied.key().clone();
                    let args = previous.cancel();
                    let weak = Arc::downgrade(inner);
                    run_due(&inner.runtime, move || deliver(weak, key, args));
                } else {
                    trace!(generation = previous.generation, "superseding pending keyed call");
                    drop(previous.cancel());
                    Counters::bump(&inner.counters.superseded);
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(pending);
            }
        }
    }

    /// Cancel the pending call for `key`
    pub fn cancel(&self, key: &K) -> bool {
        match self.inner.slots.remove(key) {
            Some((_, pending)) => {
                drop(pending.cancel());
                Counters::bump(&self.inner.counters.cancelled);
                true
            }
            None => false,
        }
    }

    /// Cancel every pending call, returning how many were dropped
    pub fn cancel_all(&self) -> usize {
        let keys: Vec<K> = self.inner.slots.iter().map(|entry| entry.key().clone()).collect();
        keys.iter().filter(|key| self.cancel(key)).count()
    }

    /// Run the pending call for `key` now, on the calling thread
    pub fn flush(&self, key: &K) -> bool {
        match self.inner.slots.remove(key) {
            Some((key, pending)) => {
                debug!(generation = pending.generation, "flushing pending keyed call");
                let args = pending.cancel();
                Counters::bump(&self.inner.counters.flushed);
                (self.inner.operation)(key, args);
                true
            }
            None => false,
        }
    }
}

impl<K: Eq + Hash, Args> KeyedDebouncer<K, Args> {
    /// Whether `key` has a pending call
    pub fn is_pending(&self, key: &K) -> bool {
        self.inner.slots.contains_key(key)
    }

    /// Number of keys with a pending call
    pub fn pending_len(&self) -> usize {
        self.inner.slots.len()
    }

    /// The quiescence window
    pub fn window(&self) -> Duration {
        self.inner.window
    }

    /// Snapshot of the lifetime counters, summed over all keys
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

fn fire<K: Eq + Hash, Args>(weak: Weak<KeyedInner<K, Args>>, key: K, generation: u64) {
    let Some(inner) = weak.upgrade() else {
        return;
    };

    let Some((key, pending)) = inner
        .slots
        .remove_if(&key, |_, pending| pending.generation == generation)
    else {
        trace!(generation, "stale keyed timer ignored");
        return;
    };

    Counters::bump(&inner.counters.fired);
    (inner.operation)(key, pending.into_args());
}

fn deliver<K: Eq + Hash, Args>(weak: Weak<KeyedInner<K, Args>>, key: K, args: Args) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    Counters::bump(&inner.counters.fired);
    (inner.operation)(key, args);
}

impl<K: Eq + Hash, Args> Clone for KeyedDebouncer<K, Args> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: Eq + Hash, Args> fmt::Debug for KeyedDebouncer<K, Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedDebouncer")
            .field("window", &self.inner.window)
            .field("pending", &self.pending_len())
            .field("stats", &self.stats())
            .finish()
    }
}

impl<K: Eq + Hash, Args> Drop for KeyedInner<K, Args> {
    fn drop(&mut self) {
        for (_, pending) in std::mem::take(&mut self.slots) {
            drop(pending.cancel());
        }
    }
}
