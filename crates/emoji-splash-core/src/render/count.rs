//! Edge-triggered entity count reporting

/// Reports the live entity count only when it changes
#[derive(Debug, Default, Clone)]
pub struct CountReporter {
    last: usize,
}

impl CountReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this frame's count, returning it if it differs from the last one
    pub fn observe(&mut self, count: usize) -> Option<usize> {
        if count == self.last {
            return None;
        }
        self.last = count;
        Some(count)
    }

    pub fn last(&self) -> usize {
        self.last
    }
}
