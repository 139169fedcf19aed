//! Control loop between an agent and an environment.
use crate::{Agent, Decision, EnvWrapper, ObsFilter, Renderer, RunPhase, Simulator};
use anyhow::Result;
use log::info;
use std::path::PathBuf;

/// Summary of [`run_session`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionReport {
    /// The number of episodes started.
    pub episodes: usize,

    /// The number of environment steps.
    pub steps: usize,

    /// Reward summed over all steps.
    pub total_reward: f32,

    /// Artifact reported by the agent when it terminated the session.
    pub artifact: Option<PathBuf>,
}

/// Runs episodes until the agent terminates the session or `max_episodes`
/// episodes have finished.
///
/// Each episode starts with a forced reset. At every decision point the agent
/// chooses an action, the environment is stepped, and the resulting experience
/// is passed to [`Agent::observe`]. Frames are rendered when
/// [`EnvWrapper::is_rendered`] is `true`. In [`RunPhase::Train`],
/// [`Agent::train`] is called after every step.
pub fn run_session<S, R, F, A>(
    env: &mut EnvWrapper<S, R, F>,
    agent: &mut A,
    max_episodes: Option<usize>,
) -> Result<SessionReport>
where
    S: Simulator,
    R: Renderer,
    F: ObsFilter,
    A: Agent + ?Sized,
{
    let mut report = SessionReport::default();

    while max_episodes.map_or(true, |n| report.episodes < n) {
        let mut obs = env.reset(true)?.observation.clone();
        report.episodes += 1;
        if env.is_rendered() {
            env.render()?;
        }

        loop {
            let phase = env.phase();
            let action = match agent.choose_action(env, &obs, phase)? {
                Decision::Act { action, .. } => action,
                Decision::Terminate { artifact } => {
                    info!(
                        "Session terminated by the agent after {} steps, artifact: {:?}",
                        report.steps, artifact
                    );
                    report.artifact = Some(artifact);
                    return Ok(report);
                }
            };

            let tr = env.step(&action)?;
            let done = tr.done;
            let next_obs = tr.observation.clone();
            let experience = tr.to_experience(obs);
            report.steps += 1;
            report.total_reward += experience.reward;

            agent.observe(experience)?;
            if phase == RunPhase::Train {
                agent.train()?;
            }
            if env.is_rendered() {
                env.render()?;
            }

            if done {
                break;
            }
            obs = next_obs;
        }
    }

    info!(
        "Session finished: {} episodes, {} steps, total reward = {}",
        report.episodes, report.steps, report.total_reward
    );
    Ok(report)
}
