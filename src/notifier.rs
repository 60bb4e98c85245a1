use std::collections::{HashMap, VecDeque};
use tokio::sync::oneshot;

/// Per-key registry of blocked readers.
///
/// Each waiter is the sending half of a one-shot wake channel. The receiving
/// half lives with the reader that subscribed; the reader dropping it (timeout
/// or disconnect) is the cancellation signal, observed here as a failed send.
pub struct Notifier {
    waiters: HashMap<String, VecDeque<oneshot::Sender<()>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            waiters: HashMap::new(),
        }
    }

    /// Registers a waiter for `key` and returns its wake receiver.
    /// Never blocks; waiters queue up in subscribe order.
    pub fn subscribe(&mut self, key: &str) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        self.waiters.entry(key.to_owned()).or_default().push_back(tx);
        rx
    }

    /// Wakes the oldest live waiter for `key`, if any.
    ///
    /// Waiters are popped in FIFO order; a send only succeeds if the receiver
    /// is still held, so waiters that already timed out are discarded and the
    /// scan moves on to the next. At most one waiter is woken per call. If no
    /// live waiter remains this is a no-op and the value stays queued.
    pub fn notify(&mut self, key: &str) {
        if let Some(waiters_for_key) = self.waiters.get_mut(key) {
            while let Some(sender) = waiters_for_key.pop_front() {
                if sender.send(()).is_ok() {
                    break;
                }
            }
            if waiters_for_key.is_empty() {
                self.waiters.remove(key);
            }
        }
    }

    /// Number of registered waiters for `key`, dead or alive.
    pub fn waiter_count(&self, key: &str) -> usize {
        self.waiters.get(key).map_or(0, VecDeque::len)
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
