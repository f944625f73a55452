use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// FIFO hand-off channel between producer tasks and the display consumer.
///
/// Pushes never block; pops block until an element is available. One lock and
/// one condition variable per queue, so no code path ever holds two queue
/// locks at once.
pub struct SignalQueue<T> {
    items: Mutex<VecDeque<T>>,
    available: Condvar,
}

impl<T> SignalQueue<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends to the tail and wakes one waiting consumer.
    pub fn push(&self, value: T) {
        let mut items = self.lock();
        items.push_back(value);
        drop(items);
        self.available.notify_one();
    }

    /// Removes and returns the head, suspending the caller while the queue is
    /// empty. An element pushed while a consumer waits is never lost.
    pub fn pop(&self) -> T {
        let mut items = self.lock();
        loop {
            if let Some(value) = items.pop_front() {
                return value;
            }
            items = self
                .available
                .wait(items)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Like [`pop`](Self::pop) but gives up after `timeout`, so a blocked
    /// consumer can observe a stop signal between waits.
    pub fn pop_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut items = self.lock();
        loop {
            if let Some(value) = items.pop_front() {
                return Some(value);
            }
            let remaining = deadline.checked_duration_since(Instant::now())?;
            let (guard, _timed_out) = self
                .available
                .wait_timeout(items, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            items = guard;
        }
    }

    /// Non-blocking variant: returns `None` instead of suspending.
    pub fn try_pop(&self) -> Option<T> {
        self.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl<T> Default for SignalQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
