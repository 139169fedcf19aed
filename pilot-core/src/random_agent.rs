//! Agent taking uniformly random actions.
use crate::{Agent, Decision, EnvHandle, Observation, RunPhase};
use anyhow::Result;

/// Takes random actions, e.g. to fill buffers during heatup or as a baseline.
///
/// Actions are drawn from the random generator of the environment, so runs are
/// reproducible given the seed of the environment.
#[derive(Clone, Debug, Default)]
pub struct RandomAgent;

impl Agent for RandomAgent {
    fn choose_action(
        &mut self,
        env: &mut dyn EnvHandle,
        _state: &Observation,
        _phase: RunPhase,
    ) -> Result<Decision> {
        Ok(Decision::Act {
            action: env.get_random_action(),
            action_value: 0.0,
        })
    }

    fn train(&mut self) -> Result<f32> {
        Ok(0.0)
    }
}
