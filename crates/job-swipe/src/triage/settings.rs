use serde::{Deserialize, Serialize};

use super::gesture::GestureThresholds;
use super::presenter::DEFAULT_STACK_DEPTH;

/// Tunables for a triage session: how many cards are shown and when a swipe commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageSettings {
    pub stack_depth: usize,
    pub thresholds: GestureThresholds,
}

impl Default for TriageSettings {
    fn default() -> Self {
        Self {
            stack_depth: DEFAULT_STACK_DEPTH,
            thresholds: GestureThresholds::default(),
        }
    }
}
