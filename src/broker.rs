use crate::notifier::Notifier;
use crate::queue::FifoQueue;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;
use tokio::time;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BrokerError {
    /// No value currently available for the key. Expected and recoverable;
    /// this is what drives the long-poll branch, not a fault.
    #[error("empty queue")]
    EmptyQueue,
}

/// Global queue table: one FIFO of values per key plus the waiter registry.
///
/// Lock order is queues before notifier, everywhere. `shift_wait` subscribes
/// while still holding the queues lock, so a push cannot slip between the
/// empty check and the subscription; `push` enqueues under the queues lock
/// before notifying, so a woken waiter always finds its value committed.
pub struct Broker {
    queues: Mutex<HashMap<String, FifoQueue<String>>>,
    notifier: Mutex<Notifier>,
}

impl Broker {
    pub fn new() -> Self {
        Self {
            queues: Mutex::new(HashMap::new()),
            notifier: Mutex::new(Notifier::new()),
        }
    }

    /// Appends `value` to `key`'s queue, creating the queue on first use,
    /// then wakes the oldest live waiter for the key.
    pub fn push(&self, key: &str, value: String) {
        let mut queues = self.queues.lock().unwrap();
        queues.entry(key.to_owned()).or_default().push(value);
        self.notifier.lock().unwrap().notify(key);
    }

    /// Removes and returns the front value for `key`.
    pub fn shift(&self, key: &str) -> Result<String, BrokerError> {
        let mut queues = self.queues.lock().unwrap();
        match queues.get_mut(key) {
            Some(queue) => queue.shift().ok_or(BrokerError::EmptyQueue),
            None => Err(BrokerError::EmptyQueue),
        }
    }

    /// Resolves a read, blocking up to `timeout` for a value to arrive.
    ///
    /// Tries an immediate shift first. On an empty queue with a non-zero
    /// timeout it subscribes and suspends until woken or the timer fires.
    /// A wakeup earns exactly one retry with no further waiting: if the
    /// retry races with another consumer and misses, the result is
    /// `EmptyQueue`, not a re-wait.
    pub async fn shift_wait(&self, key: &str, timeout: Duration) -> Result<String, BrokerError> {
        let wake = {
            let mut queues = self.queues.lock().unwrap();
            if let Some(queue) = queues.get_mut(key) {
                if let Some(value) = queue.shift() {
                    return Ok(value);
                }
            }
            if timeout.is_zero() {
                return Err(BrokerError::EmptyQueue);
            }
            self.notifier.lock().unwrap().subscribe(key)
        };

        match time::timeout(timeout, wake).await {
            // Woken (or the registry vanished): retry once, immediately.
            Ok(_) => self.shift(key),
            // Timer fired; dropping the receiver marks the waiter dead and
            // the registry discards it on its next notify scan.
            Err(_) => Err(BrokerError::EmptyQueue),
        }
    }

    /// Registered waiters for `key`, including ones already timed out but
    /// not yet discarded.
    pub fn waiter_count(&self, key: &str) -> usize {
        self.notifier.lock().unwrap().waiter_count(key)
    }
}

impl Default for Broker {
    fn default() -> Self {
        Self::new()
    }
}
