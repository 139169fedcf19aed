//! Agent.
use crate::{Action, Experience, InputSource, Observation, RunPhase};
use anyhow::Result;
use std::path::PathBuf;

/// What an agent decided at a decision point.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Take an action.
    Act {
        /// Normalized action.
        action: Action,

        /// Value estimate of the action, `0` for agents without one.
        action_value: f32,
    },

    /// End the session. The control loop must not step the environment again.
    Terminate {
        /// Where the agent stored its session data.
        artifact: PathBuf,
    },
}

/// The part of an environment an agent may use while choosing an action.
///
/// Implemented by [`EnvWrapper`](crate::EnvWrapper).
pub trait EnvHandle {
    /// The number of discrete actions, `0` for continuous action spaces.
    fn action_space_size(&self) -> usize;

    /// Samples an action uniformly from the action space.
    fn get_random_action(&mut self) -> Action;

    /// Reads an action index from the keyboard.
    fn get_action_from_user(&mut self) -> Result<usize>;

    /// Read-only view of the renderer's input state.
    fn input(&self) -> &dyn InputSource;
}

/// Produces actions for an environment.
///
/// Learned policies and human operators implement the same trait, so the
/// control loop does not need to know who is acting.
pub trait Agent {
    /// Chooses an action given the current observation.
    fn choose_action(
        &mut self,
        env: &mut dyn EnvHandle,
        state: &Observation,
        phase: RunPhase,
    ) -> Result<Decision>;

    /// Receives the experience of the last step.
    ///
    /// The default implementation discards it.
    fn observe(&mut self, experience: Experience) -> Result<()> {
        let _ = experience;
        Ok(())
    }

    /// Performs an optimization step and returns the loss.
    fn train(&mut self) -> Result<f32>;
}
