use std::time::Duration;

use serde::Serialize;

use super::state::SearchDirection;

/// Instrumentation record of one search invocation.
///
/// A fresh record is created for every run and handed to the search routine
/// by `&mut`, so concurrent searches never share counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PerformanceCounters {
    /// Nodes settled (non-stale dequeues) in both directions
    pub nodes_explored: usize,
    pub forward_nodes_explored: usize,
    pub reverse_nodes_explored: usize,
    /// Strict improvements of a best-known distance
    pub edges_relaxed: usize,
    pub heuristic_calls: usize,
    /// Pushes plus stale entries skipped on dequeue
    pub priority_queue_operations: usize,
    /// Largest combined open-set size seen during the search
    pub peak_frontier_size: usize,
    /// Wall-clock time of the search loop only
    #[serde(skip)]
    pub execution_time: Duration,
}

impl PerformanceCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_expansion(&mut self, direction: SearchDirection) {
        self.nodes_explored += 1;
        match direction {
            SearchDirection::Forward => self.forward_nodes_explored += 1,
            SearchDirection::Backward => self.reverse_nodes_explored += 1,
        }
    }

    pub(crate) fn record_frontier_size(&mut self, size: usize) {
        self.peak_frontier_size = self.peak_frontier_size.max(size);
    }

    pub fn execution_time_ms(&self) -> f64 {
        self.execution_time.as_secs_f64() * 1000.0
    }

    /// Same counters with the timing zeroed, for comparing runs
    pub fn without_timing(self) -> Self {
        Self {
            execution_time: Duration::ZERO,
            ..self
        }
    }
}
