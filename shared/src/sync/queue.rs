//! Bounded blocking FIFO with completion-aware waits
//!
//! # Correctness Invariants
//!
//! - **Bounded**: the number of queued items never exceeds `capacity`
//! - **FIFO**: items leave in the order they were pushed
//! - **Prompt cancellation**: a completion request wakes every blocked
//!   `push`/`pop`, which then return [`Cancelled`]
//!
//! # Design Notes
//!
//! One `Mutex` guards the items, with a `not_full` and a `not_empty`
//! condvar. Before blocking, a waiter registers a callback on the
//! [`CompletionSignal`] that takes the queue lock and notifies both condvars.
//! Taking the lock inside the callback means the notification cannot slip in
//! between the waiter's flag check and its `wait`.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use crate::errors::{Cancelled, SharedError, SharedResult};
use crate::sync::signal::{CompletionCallback, CompletionSignal};
use crate::types::DEFAULT_QUEUE_CAPACITY;

/// Internal state protected by mutex.
#[derive(Debug)]
struct State<T> {
    items: VecDeque<T>,
    /// Largest length ever observed.
    high_water_mark: usize,
}

#[derive(Debug)]
struct Inner<T> {
    state: Mutex<State<T>>,
    not_full: Condvar,
    not_empty: Condvar,
}

impl<T> Inner<T> {
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        // No user code runs under this lock, so the deque is intact even if poisoned
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wake_all(&self) {
        let _state = self.lock();
        self.not_full.notify_all();
        self.not_empty.notify_all();
    }
}

/// Fixed-capacity, blocking FIFO shared by producers and consumers.
///
/// Safe to share across threads via `Arc<BoundedQueue<T>>`.
#[derive(Debug)]
pub struct BoundedQueue<T> {
    inner: Arc<Inner<T>>,
    capacity: usize,
}

impl<T: Send + 'static> BoundedQueue<T> {
    /// Create a queue holding at most `capacity` items.
    pub fn new(capacity: usize) -> SharedResult<Self> {
        if capacity == 0 {
            return Err(SharedError::invalid_config("queue capacity", capacity));
        }
        Ok(Self::build(capacity))
    }

    pub fn with_default_capacity() -> Self {
        Self::build(DEFAULT_QUEUE_CAPACITY)
    }

    fn build(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    items: VecDeque::with_capacity(capacity.min(DEFAULT_QUEUE_CAPACITY)),
                    high_water_mark: 0,
                }),
                not_full: Condvar::new(),
                not_empty: Condvar::new(),
            }),
            capacity,
        }
    }

    /// Append `value`, blocking while the queue is full.
    ///
    /// Returns `Err(Cancelled)` without queueing if completion is requested
    /// while the queue has no room.
    pub fn push(&self, value: T, signal: &CompletionSignal) -> Result<(), Cancelled> {
        let mut state = self.inner.lock();
        let mut registration: Option<CompletionCallback<'_>> = None;

        while state.items.len() >= self.capacity {
            if signal.is_completion_requested() {
                return Err(Cancelled);
            }
            if registration.is_none() {
                registration = Some(self.register_waker(signal).ok_or(Cancelled)?);
            }
            state = self
                .inner
                .not_full
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        state.items.push_back(value);
        state.high_water_mark = state.high_water_mark.max(state.items.len());
        drop(state);

        self.inner.not_empty.notify_one();
        Ok(())
    }

    /// Remove the head item, blocking while the queue is empty.
    ///
    /// Returns `Err(Cancelled)` if completion is requested while the queue is
    /// empty. Items already queued are still handed out after completion.
    pub fn pop(&self, signal: &CompletionSignal) -> Result<T, Cancelled> {
        let mut state = self.inner.lock();
        let mut registration: Option<CompletionCallback<'_>> = None;

        let value = loop {
            if let Some(value) = state.items.pop_front() {
                break value;
            }
            if signal.is_completion_requested() {
                return Err(Cancelled);
            }
            if registration.is_none() {
                registration = Some(self.register_waker(signal).ok_or(Cancelled)?);
            }
            state = self
                .inner
                .not_empty
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        };
        drop(state);

        self.inner.not_full.notify_one();
        Ok(value)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of queued items (a snapshot).
    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest number of items ever queued at once.
    pub fn high_water_mark(&self) -> usize {
        self.inner.lock().high_water_mark
    }

    fn register_waker<'s>(&self, signal: &'s CompletionSignal) -> Option<CompletionCallback<'s>> {
        let inner = Arc::clone(&self.inner);
        signal.on_completion(move || inner.wake_all())
    }
}
