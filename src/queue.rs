use std::collections::VecDeque;

/// Unsynchronized FIFO queue. Callers serialize access; the broker keeps one
/// of these per key behind its lock.
#[derive(Debug, Default)]
pub struct FifoQueue<T> {
    data: VecDeque<T>,
}

impl<T> FifoQueue<T> {
    pub fn new() -> Self {
        Self {
            data: VecDeque::new(),
        }
    }

    /// Appends a value at the back. Always succeeds.
    pub fn push(&mut self, value: T) {
        self.data.push_back(value);
    }

    /// Removes and returns the front value, or `None` when empty.
    pub fn shift(&mut self) -> Option<T> {
        self.data.pop_front()
    }

    /// Returns the front value without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.data.front()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
