//! Upload progress reporting.

use serde::{Deserialize, Serialize};

/// Progress of one logical upload operation.
///
/// `completed` counts member uploads that have reached a terminal state
/// (success or failure); it never exceeds `total` within one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadProgress {
    pub completed: usize,
    pub total: usize,
}

impl UploadProgress {
    pub fn new(completed: usize, total: usize) -> Self {
        UploadProgress {
            completed: completed.min(total),
            total,
        }
    }

    /// Completion percentage, clamped to [0, 100]. An operation with zero
    /// members reports 100.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let pct = (self.completed as f64 / self.total as f64) * 100.0;
        pct.clamp(0.0, 100.0) as u8
    }

    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}

impl Default for UploadProgress {
    fn default() -> Self {
        UploadProgress {
            completed: 0,
            total: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_midway() {
        assert_eq!(UploadProgress::new(5, 10).percent(), 50);
    }

    #[test]
    fn test_percent_clamps() {
        assert_eq!(UploadProgress::new(0, 10).percent(), 0);
        assert_eq!(UploadProgress::new(10, 10).percent(), 100);
        // completed capped at total by the constructor
        assert_eq!(UploadProgress::new(12, 10).percent(), 100);
    }

    #[test]
    fn test_percent_non_decreasing() {
        let mut last = 0;
        for completed in 0..=10 {
            let pct = UploadProgress::new(completed, 10).percent();
            assert!(pct >= last);
            last = pct;
        }
    }

    #[test]
    fn test_empty_operation_is_done() {
        let progress = UploadProgress::new(0, 0);
        assert_eq!(progress.percent(), 100);
        assert!(progress.is_done());
    }
}
