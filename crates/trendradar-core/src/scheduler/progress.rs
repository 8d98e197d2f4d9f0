//! Progress snapshots emitted after every completed platform.

/// Batch progress: `completed` of `total` platforms have finished (any outcome).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchProgress {
    /// `completed / total × 100`.
    pub percent: f64,
    pub total: usize,
    pub completed: usize,
}

impl FetchProgress {
    pub fn new(completed: usize, total: usize) -> Self {
        let percent = if total == 0 {
            100.0
        } else {
            completed as f64 / total as f64 * 100.0
        };
        Self {
            percent,
            total,
            completed,
        }
    }

    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}
