//! Phase of a run.
use serde::{Deserialize, Serialize};

/// The phase of a run.
///
/// Each [`EnvWrapper`](crate::EnvWrapper) owns its own phase, which starts as
/// [`RunPhase::Train`]. Simulators receive the phase with every tick, so they
/// can switch behavior (e.g. episodic lives) between training and testing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    /// Filling buffers before training starts.
    Heatup,

    /// Training.
    Train,

    /// Evaluation.
    Test,
}

impl Default for RunPhase {
    fn default() -> Self {
        RunPhase::Train
    }
}
