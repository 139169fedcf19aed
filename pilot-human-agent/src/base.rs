//! Human agent.
use anyhow::Result;
use log::info;
use pilot_core::{
    error::PilotError, Action, Agent, Decision, EnvHandle, Experience, ExperienceBufferBase,
    Observation, PilotConfig, ReplayMemory, RunPhase,
};
use std::{
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

/// File name of the replay memory written by the exit sequence.
pub const REPLAY_BUFFER_FILE: &str = "replay_buffer.p";

/// An agent driven from the keyboard.
///
/// The agent needs a discrete action space.
pub struct HumanAgent {
    memory: ReplayMemory,
    experiment_dir: PathBuf,
    pace: Duration,
    terminated: bool,
}

impl HumanAgent {
    /// Builds the agent.
    pub fn build(config: &PilotConfig) -> Self {
        let agent = Self {
            memory: ReplayMemory::from_config(config),
            experiment_dir: config.experiment_dir.clone(),
            pace: Duration::from_millis(config.human.pace_ms),
            terminated: false,
        };

        info!("Human control mode, close the window to store the replay buffer and exit");
        info!("Replay buffer: {:?}", agent.replay_buffer_path());

        agent
    }

    /// Sets the pause after every decision.
    pub fn set_pace(&mut self, pace: Duration) {
        self.pace = pace;
    }

    /// Experiences collected so far.
    pub fn memory(&self) -> &ReplayMemory {
        &self.memory
    }

    /// Destination of the replay memory.
    pub fn replay_buffer_path(&self) -> PathBuf {
        self.experiment_dir.join(REPLAY_BUFFER_FILE)
    }

    /// Returns `true` after the exit sequence has run.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Stores the replay memory and ends the session.
    ///
    /// Returns the path of the stored memory. The sequence runs once; later calls
    /// fail with [`PilotError::SessionTerminated`].
    pub fn save_replay_buffer_and_exit(&mut self) -> Result<PathBuf, PilotError> {
        if self.terminated {
            return Err(PilotError::SessionTerminated);
        }
        self.terminated = true;

        let path = self.replay_buffer_path();
        self.memory.save(&path)?;
        info!(
            "Replay buffer with {} experiences was stored in {:?}",
            self.memory.len(),
            path
        );

        Ok(path)
    }

    fn experiment_dir(&self) -> &Path {
        &self.experiment_dir
    }
}

impl Agent for HumanAgent {
    fn choose_action(
        &mut self,
        env: &mut dyn EnvHandle,
        _state: &Observation,
        _phase: RunPhase,
    ) -> Result<Decision> {
        if self.terminated {
            return Err(PilotError::SessionTerminated.into());
        }
        if env.action_space_size() == 0 {
            return Err(PilotError::InvalidActionSpace(
                "human control needs a discrete action space".to_string(),
            )
            .into());
        }

        let ix = env.get_action_from_user()?;
        thread::sleep(self.pace);

        if !env.input().is_open() {
            info!("The window was closed, experiment dir: {:?}", self.experiment_dir());
            let artifact = self.save_replay_buffer_and_exit()?;
            return Ok(Decision::Terminate { artifact });
        }

        Ok(Decision::Act {
            action: Action::Discrete(ix),
            action_value: 0.0,
        })
    }

    fn observe(&mut self, experience: Experience) -> Result<()> {
        self.memory.push(experience)
    }

    fn train(&mut self) -> Result<f32> {
        Ok(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::HumanAgent;
    use anyhow::Result;
    use pilot_core::{
        dummy::{DummySimulator, ScriptedRenderer},
        error::PilotError,
        Action, Agent, Decision, EnvWrapper, ExperienceBufferBase, Key, Observation, PilotConfig,
        ReplayMemory, RunPhase,
    };
    use std::time::Duration;
    use tempdir::TempDir;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn agent(config: &PilotConfig) -> HumanAgent {
        let mut agent = HumanAgent::build(config);
        agent.set_pace(Duration::from_millis(0));
        agent
    }

    #[test]
    fn test_pressed_keys_become_actions() -> Result<()> {
        init();
        let renderer = ScriptedRenderer::new();
        let sim = DummySimulator::discrete(vec![10, 11, 12]);
        let config = PilotConfig::default().human_control(true);
        let mut env = EnvWrapper::new(sim, renderer.clone(), &config)?;
        let mut agent = agent(&config);
        let obs = Observation::empty();

        renderer.press(vec![Key::Digit(3)]);
        let decision = agent.choose_action(&mut env, &obs, RunPhase::Train)?;
        assert_eq!(
            decision,
            Decision::Act {
                action: Action::Discrete(2),
                action_value: 0.0
            }
        );

        renderer.release();
        let decision = agent.choose_action(&mut env, &obs, RunPhase::Test)?;
        assert_eq!(
            decision,
            Decision::Act {
                action: Action::Discrete(0),
                action_value: 0.0
            }
        );
        assert_eq!(agent.train()?, 0.0);
        Ok(())
    }

    #[test]
    fn test_exit_sequence_runs_once() -> Result<()> {
        init();
        let dir = TempDir::new("human_agent")?;
        let config = PilotConfig::default()
            .human_control(true)
            .experiment_dir(dir.path().join("experiment"));
        let renderer = ScriptedRenderer::new();
        let sim = DummySimulator::discrete(vec![10, 11]);
        let mut env = EnvWrapper::new(sim, renderer.clone(), &config)?;
        let mut agent = agent(&config);

        let mut obs = env.reset(false)?.observation.clone();
        for _ in 0..3 {
            let action = match agent.choose_action(&mut env, &obs, RunPhase::Train)? {
                Decision::Act { action, .. } => action,
                d => panic!("unexpected decision {:?}", d),
            };
            let tr = env.step(&action)?;
            let next_obs = tr.observation.clone();
            agent.observe(tr.to_experience(obs))?;
            obs = next_obs;
        }
        assert_eq!(agent.memory().len(), 3);

        renderer.close();
        let artifact = match agent.choose_action(&mut env, &obs, RunPhase::Train)? {
            Decision::Terminate { artifact } => artifact,
            d => panic!("unexpected decision {:?}", d),
        };
        assert_eq!(artifact, dir.path().join("experiment").join("replay_buffer.p"));
        assert!(agent.is_terminated());

        let loaded = ReplayMemory::load(&artifact)?;
        assert_eq!(&loaded, agent.memory());

        // No further action and no second write.
        std::fs::remove_file(&artifact)?;
        let err = agent
            .choose_action(&mut env, &obs, RunPhase::Train)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PilotError>(),
            Some(PilotError::SessionTerminated)
        ));
        assert!(matches!(
            agent.save_replay_buffer_and_exit(),
            Err(PilotError::SessionTerminated)
        ));
        assert!(!artifact.exists());
        Ok(())
    }

    #[test]
    fn test_persist_failure_is_returned() -> Result<()> {
        let dir = TempDir::new("human_agent")?;
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"")?;
        let config = PilotConfig::default().experiment_dir(&blocker);
        let mut agent = agent(&config);

        assert!(matches!(
            agent.save_replay_buffer_and_exit(),
            Err(PilotError::Persist { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_continuous_action_space_is_rejected() -> Result<()> {
        let sim = DummySimulator::continuous(vec![-1.0], vec![1.0]);
        let config = PilotConfig::default();
        let mut env = EnvWrapper::new(sim, ScriptedRenderer::new(), &config)?;
        let mut agent = agent(&config);

        let err = agent
            .choose_action(&mut env, &Observation::empty(), RunPhase::Train)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PilotError>(),
            Some(PilotError::InvalidActionSpace(_))
        ));
        Ok(())
    }
}
