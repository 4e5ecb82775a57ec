use serde::{Deserialize, Serialize};

/// Progress of a dispatch run.
///
/// `pending + in_flight + completed == total` after every transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchCounts {
    pub pending: usize,
    pub in_flight: usize,
    pub completed: usize,
    pub total: usize,
}

impl DispatchCounts {
    pub fn is_balanced(&self) -> bool {
        self.pending + self.in_flight + self.completed == self.total
    }

    pub fn is_finished(&self) -> bool {
        self.completed == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_counts_are_finished() {
        let counts = DispatchCounts::default();
        assert!(counts.is_balanced());
        assert!(counts.is_finished());
    }

    #[test]
    fn detects_unbalanced_counts() {
        let counts = DispatchCounts {
            pending: 1,
            in_flight: 2,
            completed: 0,
            total: 4,
        };
        assert!(!counts.is_balanced());
        assert!(!counts.is_finished());
    }
}
