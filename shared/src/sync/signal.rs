//! One-shot completion flag shared by every worker
//!
//! Workers poll [`CompletionSignal::is_completion_requested`] between units of
//! work. Blocking primitives register a wake-up callback with
//! [`CompletionSignal::on_completion`] for the duration of a wait, so that a
//! completion request interrupts the wait instead of being noticed on the
//! next poll.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

type Callback = Box<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    callbacks: HashMap<u64, Callback>,
}

/// Cooperative cancellation flag, set at most once and never reset
#[derive(Default)]
pub struct CompletionSignal {
    requested: AtomicBool,
    registry: Mutex<Registry>,
}

impl CompletionSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request completion.
    ///
    /// Returns `true` only for the call that flipped the flag; registered
    /// callbacks run once, on that call, outside the registry lock.
    pub fn request_completion(&self) -> bool {
        if self.requested.swap(true, Ordering::AcqRel) {
            return false;
        }

        let callbacks = std::mem::take(&mut self.lock_registry().callbacks);
        for callback in callbacks.into_values() {
            callback();
        }
        true
    }

    pub fn is_completion_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    /// Register `callback` to run when completion is requested.
    ///
    /// Returns `None` if completion was already requested, in which case the
    /// callback is dropped without running. The callback is deregistered when
    /// the returned guard is dropped.
    pub fn on_completion<F>(&self, callback: F) -> Option<CompletionCallback<'_>>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut registry = self.lock_registry();
        // Checked under the registry lock: a concurrent request either sees
        // this entry when it drains, or we see its flag here.
        if self.is_completion_requested() {
            return None;
        }

        let id = registry.next_id;
        registry.next_id += 1;
        registry.callbacks.insert(id, Box::new(callback));

        Some(CompletionCallback { signal: self, id })
    }

    /// Number of callbacks currently registered
    pub fn pending_callbacks(&self) -> usize {
        self.lock_registry().callbacks.len()
    }

    fn lock_registry(&self) -> MutexGuard<'_, Registry> {
        // Callbacks never run under this lock, so a poisoned registry is still consistent
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for CompletionSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionSignal")
            .field("requested", &self.is_completion_requested())
            .finish_non_exhaustive()
    }
}

/// Registration handle returned by [`CompletionSignal::on_completion`]
#[must_use = "dropping the guard deregisters the callback"]
pub struct CompletionCallback<'a> {
    signal: &'a CompletionSignal,
    id: u64,
}

impl Drop for CompletionCallback<'_> {
    fn drop(&mut self) {
        self.signal.lock_registry().callbacks.remove(&self.id);
    }
}
