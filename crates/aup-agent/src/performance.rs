use serde::{Deserialize, Serialize};

/// Per-episode (return, performance) of the greedy policy during primary training.
///
/// Conceptually a `2 x num_episodes` array: row 0 holds returns, row 1 the task-specific
/// performance reported by the simulator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingPerformance {
    returns: Vec<f64>,
    performance: Vec<f64>,
}

impl TrainingPerformance {
    pub fn new(num_episodes: usize) -> Self {
        Self {
            returns: vec![0.0; num_episodes],
            performance: vec![0.0; num_episodes],
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (2, self.returns.len())
    }

    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    pub fn returns(&self) -> &[f64] {
        &self.returns
    }

    pub fn performance(&self) -> &[f64] {
        &self.performance
    }

    pub fn rows(&self) -> [&[f64]; 2] {
        [&self.returns, &self.performance]
    }

    /// Performance after the last training episode, the figure sweeps usually report.
    pub fn final_performance(&self) -> Option<f64> {
        self.performance.last().copied()
    }

    pub(crate) fn record(&mut self, episode: usize, ret: f64, performance: f64) {
        self.returns[episode] = ret;
        self.performance[episode] = performance;
    }
}
