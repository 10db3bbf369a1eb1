use std::collections::VecDeque;

/// Default number of undo snapshots retained
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Bounded undo log of full working-buffer snapshots, oldest first
#[derive(Debug, Clone)]
pub struct HistoryStack {
    snapshots: VecDeque<Vec<u8>>,
    capacity: usize,
}

impl HistoryStack {
    /// Create an empty stack; a capacity of zero is raised to one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a copy of `working`, evicting the oldest entry when full
    ///
    /// Returns true when an entry was evicted.
    pub fn snapshot(&mut self, working: &[u8]) -> bool {
        self.snapshots.push_back(working.to_vec());
        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
            return true;
        }
        false
    }

    /// Pop the most recent snapshot
    pub fn pop(&mut self) -> Option<Vec<u8>> {
        self.snapshots.pop_back()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
