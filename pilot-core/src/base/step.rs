//! Environment step.
use crate::{Action, Observation};
use serde::{Deserialize, Serialize};

/// The outcome of [`EnvWrapper::step`] or [`EnvWrapper::reset`].
///
/// A transition borrows the buffers of the wrapper, so it cannot outlive the
/// next call to `step` or `reset`. Use [`Transition::to_experience`] or clone
/// the observation to keep it.
///
/// [`EnvWrapper::step`]: crate::EnvWrapper::step
/// [`EnvWrapper::reset`]: crate::EnvWrapper::reset
#[derive(Debug, Clone, Copy)]
pub struct Transition<'a> {
    /// Observation after the step.
    pub observation: &'a Observation,

    /// Reward accumulated over the skipped frames.
    pub reward: f32,

    /// Flag denoting if the episode has terminated.
    pub done: bool,

    /// The action of the step.
    pub action: &'a Action,

    /// Measurements after the step.
    pub measurements: &'a [f32],
}

impl<'a> Transition<'a> {
    /// Creates an owned [`Experience`] starting from `prev_observation`.
    pub fn to_experience(&self, prev_observation: Observation) -> Experience {
        Experience {
            observation: prev_observation,
            action: self.action.clone(),
            reward: self.reward,
            next_observation: self.observation.clone(),
            done: self.done,
            measurements: self.measurements.to_vec(),
        }
    }
}

/// An owned transition `(o_t, a_t, r_t, o_t+1)`, stored in replay memories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    /// Observation before the action.
    pub observation: Observation,

    /// Action.
    pub action: Action,

    /// Reward.
    pub reward: f32,

    /// Observation after the action.
    pub next_observation: Observation,

    /// Flag denoting if the episode has terminated.
    pub done: bool,

    /// Measurements after the action.
    pub measurements: Vec<f32>,
}
