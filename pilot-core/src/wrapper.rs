//! Uniform wrapper of simulators.
use crate::{
    error::PilotError, Action, ActionSpace, EnvHandle, InputSource, Key, KeyBindings, ObsFilter,
    Observation, PilotConfig, RawObsFilter, Renderer, RunPhase, Simulator, Transition,
};
use anyhow::Result;
use log::{debug, info, trace};
use ndarray::{ArrayD, IxDyn};
use rand::{rngs::StdRng, SeedableRng};
use std::{path::Path, thread, time::Duration};

/// Side of the blank frame rendered for measurement-only simulators.
const PLACEHOLDER_SIDE: usize = 64;

/// Pause between event polls while waiting for a key.
pub const KEY_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Lifecycle of the episode of an [`EnvWrapper`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EpisodeState {
    /// No episode has been started yet.
    Uninitialized,

    /// An episode is in progress.
    Ready,

    /// The episode has ended and awaits a reset.
    Done,
}

/// Presents a simulator through a normalized action/observation contract.
///
/// The wrapper owns the simulator, the renderer and the buffers of the current
/// observation and measurements. Discrete native actions are addressed by dense
/// indices, see [`ActionSpace`].
///
/// Episodes follow `Uninitialized -> Ready <-> Done`:
///
/// * [`EnvWrapper::reset`] starts an episode from any state, but interrupting a
///   running episode requires `force = true`.
/// * [`EnvWrapper::step`] is only valid while an episode is running.
pub struct EnvWrapper<S, R, F = RawObsFilter>
where
    S: Simulator,
    R: Renderer,
    F: ObsFilter,
{
    sim: S,
    renderer: R,
    obs_filter: F,
    action_space: ActionSpace<S::NativeAction>,
    key_bindings: KeyBindings,
    state: EpisodeState,
    phase: RunPhase,

    // Buffers of the current step
    observation: Observation,
    measurements: Vec<f32>,
    reward: f32,
    done: bool,
    last_action: Action,

    default_action: usize,
    frame_skip: usize,
    is_rendered: bool,
    wait_for_explicit_human_action: bool,
    record_video_every: usize,
    config: PilotConfig,
    rng: StdRng,
    placeholder: ArrayD<f32>,

    // Episode bookkeeping
    episode: usize,
    episode_reward: f32,
}

impl<S, R> EnvWrapper<S, R, RawObsFilter>
where
    S: Simulator,
    R: Renderer,
{
    /// Wraps a simulator without observation preprocessing.
    pub fn new(sim: S, renderer: R, config: &PilotConfig) -> Result<Self> {
        Self::build(sim, renderer, RawObsFilter, config)
    }
}

impl<S, R, F> EnvWrapper<S, R, F>
where
    S: Simulator,
    R: Renderer,
    F: ObsFilter,
{
    /// Wraps a simulator.
    ///
    /// The action space is built from the simulator's native action set. Key
    /// bindings in the configuration take precedence over the simulator's.
    pub fn build(sim: S, renderer: R, obs_filter: F, config: &PilotConfig) -> Result<Self> {
        if config.env.frame_skip == 0 {
            return Err(PilotError::InvalidConfig("frame_skip must be at least 1".to_string()).into());
        }

        let action_space = ActionSpace::from_native(sim.native_action_set())?;
        let size = action_space.size();
        let key_bindings = match &config.human.key_bindings {
            Some(bindings) => bindings.clone(),
            None => sim.key_bindings(),
        };

        if action_space.is_discrete() {
            if let Some(b) = key_bindings.iter().find(|b| b.action >= size) {
                return Err(PilotError::InvalidConfig(format!(
                    "keys {:?} are bound to action {}, but there are {} actions",
                    b.keys, b.action, size
                ))
                .into());
            }
            if config.human.default_action >= size {
                return Err(PilotError::InvalidConfig(format!(
                    "default action {} is out of [0, {})",
                    config.human.default_action, size
                ))
                .into());
            }
        }

        info!(
            "Wrapped level {:?}: {} action space of size {}, frame skip {}",
            config.env.level,
            if action_space.is_discrete() { "discrete" } else { "continuous" },
            if action_space.is_discrete() { size } else { action_space.dims() },
            config.env.frame_skip
        );

        let last_action = action_space.initial_action();

        Ok(Self {
            sim,
            renderer,
            obs_filter,
            action_space,
            key_bindings,
            state: EpisodeState::Uninitialized,
            phase: RunPhase::Train,
            observation: Observation::empty(),
            measurements: Vec::new(),
            reward: 0.0,
            done: false,
            last_action,
            default_action: config.human.default_action,
            frame_skip: config.env.frame_skip,
            is_rendered: config.visualization.render || config.env.human_control,
            wait_for_explicit_human_action: config.human.wait_for_explicit_human_action,
            record_video_every: config.visualization.record_video_every,
            config: config.clone(),
            rng: StdRng::seed_from_u64(config.seed),
            placeholder: ArrayD::zeros(IxDyn(&[PLACEHOLDER_SIDE, PLACEHOLDER_SIDE])),
            episode: 0,
            episode_reward: 0.0,
        })
    }

    /// Starts a new episode.
    ///
    /// Fails with [`PilotError::EpisodeInProgress`] if an episode is running and
    /// `force` is `false`.
    pub fn reset(&mut self, force: bool) -> Result<Transition<'_>> {
        let episode = match self.state {
            EpisodeState::Ready if !force => return Err(PilotError::EpisodeInProgress.into()),
            EpisodeState::Uninitialized => 0,
            _ => self.episode + 1,
        };

        self.sim.restart_episode(force, self.phase)?;
        if self.state == EpisodeState::Ready {
            debug!("Interrupted episode {} at reward {}", self.episode, self.episode_reward);
        }
        self.done = false;
        self.reward = 0.0;
        self.episode_reward = 0.0;
        self.last_action = self.action_space.initial_action();
        self.update_observation_and_measurements()?;
        self.episode = episode;
        self.state = EpisodeState::Ready;
        debug!("Started episode {}", self.episode);

        Ok(self.transition())
    }

    /// Performs a step with a normalized action.
    ///
    /// The native action is repeated for `frame_skip` ticks, or until the episode
    /// terminates, and the rewards of the ticks are summed. An action outside the
    /// action space fails with [`PilotError::InvalidAction`]. Errors of the
    /// simulator are returned as is.
    pub fn step(&mut self, action: &Action) -> Result<Transition<'_>> {
        match self.state {
            EpisodeState::Uninitialized => return Err(PilotError::EpisodeNotReady.into()),
            EpisodeState::Done => return Err(PilotError::EpisodeDone.into()),
            EpisodeState::Ready => {}
        }

        let command = self.action_space.command(action)?;
        let mut reward = 0f32;
        let mut done = false;

        for tick in 0..self.frame_skip {
            reward += self.sim.apply_native_action(command, self.phase)?;
            if self.sim.report_termination() {
                if tick + 1 < self.frame_skip {
                    trace!("Episode terminated at skipped frame {}", tick);
                }
                done = true;
                break;
            }
        }

        self.update_observation_and_measurements()?;
        self.reward = reward;
        self.done = done;
        self.last_action = action.clone();
        self.episode_reward += reward;

        if done {
            self.state = EpisodeState::Done;
            info!("Episode {} finished, reward = {}", self.episode, self.episode_reward);
        }

        Ok(self.transition())
    }

    /// Sends the current image to the renderer.
    ///
    /// The image is the simulator's display image if it has one, otherwise the
    /// observation. A blank placeholder is shown for vector observations.
    pub fn render(&mut self) -> Result<()> {
        if let Some(image) = self.sim.rendered_image() {
            return self.renderer.render_image(image.view());
        }
        if self.observation.is_image() {
            self.renderer.render_image(self.observation.data().view())
        } else {
            self.renderer.render_image(self.placeholder.view())
        }
    }

    /// Changes the phase of the run.
    pub fn change_phase(&mut self, phase: RunPhase) {
        self.phase = phase;
    }

    /// Returns an action picked uniformly from the action space.
    pub fn get_random_action(&mut self) -> Action {
        self.action_space.sample(&mut self.rng)
    }

    /// Reads an action index from the keyboard.
    ///
    /// If an explicit action is required, events are polled every
    /// [`KEY_POLL_INTERVAL`] until a key is pressed or the display is closed. Without key bindings, the key for digit
    /// `N` selects action `N - 1`. With key bindings, the first pressed key found
    /// in the table selects the action. Otherwise the default action is returned
    /// so that the environment keeps running.
    pub fn get_action_from_user(&mut self) -> Result<usize> {
        if self.wait_for_explicit_human_action {
            while self.renderer.pressed_keys().is_empty() && self.renderer.is_open() {
                self.renderer.poll_events()?;
                if self.renderer.pressed_keys().is_empty() && self.renderer.is_open() {
                    thread::sleep(KEY_POLL_INTERVAL);
                }
            }
        }

        let pressed = self.renderer.pressed_keys();
        let action = if self.key_bindings.is_empty() {
            pressed
                .first()
                .and_then(Key::default_action_index)
                .filter(|&ix| ix < self.action_space.size())
        } else {
            self.key_bindings.resolve(&pressed)
        };

        Ok(action.unwrap_or(self.default_action))
    }

    /// Returns the native action of an index.
    pub fn index_to_native(&self, ix: usize) -> Option<&S::NativeAction> {
        self.action_space.index_to_native(ix)
    }

    /// Returns the index of a native action, `None` if it is not mapped.
    pub fn native_to_index(&self, native: &S::NativeAction) -> Option<usize> {
        self.action_space.native_to_index(native)
    }

    /// Action space.
    pub fn action_space(&self) -> &ActionSpace<S::NativeAction> {
        &self.action_space
    }

    /// Key bindings in effect.
    pub fn key_bindings(&self) -> &KeyBindings {
        &self.key_bindings
    }

    /// Read-only view of the renderer's input state.
    pub fn input(&self) -> &dyn InputSource {
        &self.renderer
    }

    /// The wrapped simulator.
    pub fn simulator(&self) -> &S {
        &self.sim
    }

    /// Current episode state.
    pub fn state(&self) -> EpisodeState {
        self.state
    }

    /// Current phase.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Current observation.
    pub fn observation(&self) -> &Observation {
        &self.observation
    }

    /// Current measurements.
    pub fn measurements(&self) -> &[f32] {
        &self.measurements
    }

    /// Index of the current episode, starting from `0`.
    pub fn episode(&self) -> usize {
        self.episode
    }

    /// Reward accumulated in the current episode.
    pub fn episode_reward(&self) -> f32 {
        self.episode_reward
    }

    /// Returns `true` if frames should be sent to the renderer.
    pub fn is_rendered(&self) -> bool {
        self.is_rendered
    }

    /// Returns `true` if the current episode is one of the recorded episodes.
    pub fn is_recording_episode(&self) -> bool {
        self.record_video_every > 0 && self.episode % self.record_video_every == 0
    }

    /// Directory of recorded videos.
    pub fn video_path(&self) -> &Path {
        &self.config.visualization.video_path
    }

    /// Name of the level.
    pub fn level(&self) -> &str {
        &self.config.env.level
    }

    /// Configuration the wrapper was built with.
    pub fn config(&self) -> &PilotConfig {
        &self.config
    }

    fn update_observation_and_measurements(&mut self) -> Result<()> {
        let raw = self.sim.raw_observation()?;
        self.observation = self.obs_filter.filt(raw);
        self.sim.measurements_into(&mut self.measurements);
        Ok(())
    }

    fn transition(&self) -> Transition<'_> {
        Transition {
            observation: &self.observation,
            reward: self.reward,
            done: self.done,
            action: &self.last_action,
            measurements: &self.measurements,
        }
    }
}

impl<S, R, F> EnvHandle for EnvWrapper<S, R, F>
where
    S: Simulator,
    R: Renderer,
    F: ObsFilter,
{
    fn action_space_size(&self) -> usize {
        self.action_space.size()
    }

    fn get_random_action(&mut self) -> Action {
        EnvWrapper::get_random_action(self)
    }

    fn get_action_from_user(&mut self) -> Result<usize> {
        EnvWrapper::get_action_from_user(self)
    }

    fn input(&self) -> &dyn InputSource {
        EnvWrapper::input(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{EnvWrapper, EpisodeState, KEY_POLL_INTERVAL};
    use crate::{
        dummy::{DummySimulator, ScriptedRenderer},
        error::PilotError,
        Action, Key, KeyBindings, NullRenderer, ObsFilter, Observation, PilotConfig,
        RawObsFilterConfig, RunPhase,
    };
    use anyhow::Result;
    use std::time::Instant;

    type Env = EnvWrapper<DummySimulator, ScriptedRenderer>;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn discrete_env(n: usize) -> (Env, ScriptedRenderer) {
        let natives = (0..n as i32).map(|a| 10 + a).collect();
        let renderer = ScriptedRenderer::new();
        let env = Env::new(
            DummySimulator::discrete(natives),
            renderer.clone(),
            &PilotConfig::default(),
        )
        .unwrap();
        (env, renderer)
    }

    fn pilot_error(err: &anyhow::Error) -> &PilotError {
        err.downcast_ref::<PilotError>()
            .unwrap_or_else(|| panic!("not a PilotError: {:?}", err))
    }

    #[test]
    fn test_reset_clears_episode_values() -> Result<()> {
        init();
        let sim = DummySimulator::discrete(vec![4, 5, 6]).episode_len(2);
        let mut env = EnvWrapper::new(sim, NullRenderer, &PilotConfig::default())?;
        assert_eq!(env.state(), EpisodeState::Uninitialized);

        let tr = env.reset(false)?;
        assert!(!tr.done);
        assert_eq!(tr.reward, 0.0);
        assert_eq!(tr.action, &Action::Discrete(0));
        assert_eq!(tr.observation, &Observation::vector(vec![0.0]));
        assert_eq!(tr.measurements, &[0.0, 1.0]);

        env.step(&Action::Discrete(2))?;
        let tr = env.step(&Action::Discrete(1))?;
        assert!(tr.done);
        assert_eq!(tr.reward, 1.0);
        assert_eq!(env.state(), EpisodeState::Done);

        let tr = env.reset(false)?;
        assert!(!tr.done);
        assert_eq!(tr.reward, 0.0);
        assert_eq!(tr.action, &Action::Discrete(0));
        assert_eq!(env.state(), EpisodeState::Ready);
        assert_eq!(env.episode(), 1);
        assert_eq!(env.episode_reward(), 0.0);
        Ok(())
    }

    #[test]
    fn test_failed_restart_keeps_episode_index() -> Result<()> {
        let sim = DummySimulator::discrete(vec![1]).episode_len(1).fail_restart_at(1);
        let mut env = EnvWrapper::new(sim, NullRenderer, &PilotConfig::default())?;
        env.reset(false)?;
        env.step(&Action::Discrete(0))?;
        assert_eq!(env.episode(), 0);

        assert!(env.reset(false).is_err());
        assert_eq!(env.episode(), 0);
        assert_eq!(env.state(), EpisodeState::Done);

        env.reset(false)?;
        assert_eq!(env.episode(), 1);
        assert_eq!(env.state(), EpisodeState::Ready);
        Ok(())
    }

    #[test]
    fn test_reset_running_episode_requires_force() -> Result<()> {
        let (mut env, _) = discrete_env(3);
        env.reset(false)?;
        env.step(&Action::Discrete(0))?;

        let err = env.reset(false).unwrap_err();
        assert!(matches!(pilot_error(&err), PilotError::EpisodeInProgress));
        assert_eq!(env.simulator().restarts(), 1);

        let tr = env.reset(true)?;
        assert_eq!(tr.observation, &Observation::vector(vec![0.0]));
        assert_eq!(env.simulator().restarts(), 2);
        assert_eq!(env.simulator().forced_restarts(), 1);
        Ok(())
    }

    #[test]
    fn test_step_maps_indices_to_native_actions() -> Result<()> {
        let sim = DummySimulator::discrete(vec![4, 5, 6]);
        let mut env = EnvWrapper::new(sim, NullRenderer, &PilotConfig::default())?;
        env.reset(false)?;

        for ix in [2, 0, 1, 1].iter() {
            let tr = env.step(&Action::Discrete(*ix))?;
            assert_eq!(tr.action, &Action::Discrete(*ix));
            assert_eq!(tr.reward, 1.0);
        }
        assert_eq!(env.simulator().applied(), &[6, 4, 5, 5]);
        assert_eq!(env.index_to_native(0), Some(&4));
        assert_eq!(env.native_to_index(&6), Some(2));
        assert_eq!(env.native_to_index(&7), None);
        Ok(())
    }

    #[test]
    fn test_step_rejects_out_of_range_indices() -> Result<()> {
        let (mut env, _) = discrete_env(5);
        env.reset(false)?;

        for ix in 0..5 {
            assert!(env.step(&Action::Discrete(ix)).is_ok());
        }
        for ix in [5, 6, usize::MAX].iter() {
            let err = env.step(&Action::Discrete(*ix)).unwrap_err();
            assert!(matches!(pilot_error(&err), PilotError::InvalidAction { .. }));
        }
        let err = env.step(&Action::Continuous(vec![0.5])).unwrap_err();
        assert!(matches!(pilot_error(&err), PilotError::InvalidAction { .. }));

        // Rejected actions do not reach the simulator.
        assert_eq!(env.simulator().applied().len(), 5);
        Ok(())
    }

    #[test]
    fn test_step_requires_running_episode() -> Result<()> {
        let sim = DummySimulator::discrete(vec![1]).episode_len(1);
        let mut env = EnvWrapper::new(sim, NullRenderer, &PilotConfig::default())?;

        let err = env.step(&Action::Discrete(0)).unwrap_err();
        assert!(matches!(pilot_error(&err), PilotError::EpisodeNotReady));

        env.reset(false)?;
        assert!(env.step(&Action::Discrete(0))?.done);
        let err = env.step(&Action::Discrete(0)).unwrap_err();
        assert!(matches!(pilot_error(&err), PilotError::EpisodeDone));
        Ok(())
    }

    #[test]
    fn test_frame_skip_repeats_action_and_sums_reward() -> Result<()> {
        let sim = DummySimulator::discrete(vec![7, 8]).episode_len(10);
        let config = PilotConfig::default().frame_skip(4);
        let mut env = EnvWrapper::new(sim, NullRenderer, &config)?;
        env.reset(false)?;

        let tr = env.step(&Action::Discrete(1))?;
        assert_eq!(tr.reward, 4.0);
        assert!(!tr.done);
        assert_eq!(tr.observation, &Observation::vector(vec![4.0]));
        assert_eq!(env.simulator().applied(), &[8, 8, 8, 8]);

        env.step(&Action::Discrete(0))?;
        // Stops at the terminal tick.
        let tr = env.step(&Action::Discrete(0))?;
        assert_eq!(tr.reward, 2.0);
        assert!(tr.done);
        assert_eq!(env.simulator().tick(), 10);
        assert_eq!(env.episode_reward(), 10.0);
        Ok(())
    }

    #[test]
    fn test_zero_frame_skip_is_rejected() {
        let sim = DummySimulator::discrete(vec![1]);
        let config = PilotConfig::default().frame_skip(0);
        let err = EnvWrapper::new(sim, NullRenderer, &config).err().unwrap();
        assert!(matches!(pilot_error(&err), PilotError::InvalidConfig(_)));
    }

    #[test]
    fn test_invalid_bindings_are_rejected() {
        let bindings = KeyBindings::new().bind(vec![Key::Up], 3);
        let sim = DummySimulator::discrete(vec![1, 2]).key_bindings(bindings);
        let err = EnvWrapper::new(sim, NullRenderer, &PilotConfig::default())
            .err()
            .unwrap();
        assert!(matches!(pilot_error(&err), PilotError::InvalidConfig(_)));

        let sim = DummySimulator::discrete(vec![1, 2]);
        let config = PilotConfig::default().default_action(2);
        let err = EnvWrapper::new(sim, NullRenderer, &config).err().unwrap();
        assert!(matches!(pilot_error(&err), PilotError::InvalidConfig(_)));

        let sim = DummySimulator::discrete(vec![1, 1]);
        let err = EnvWrapper::new(sim, NullRenderer, &PilotConfig::default())
            .err()
            .unwrap();
        assert!(matches!(pilot_error(&err), PilotError::InvalidActionSpace(_)));
    }

    #[test]
    fn test_simulator_errors_propagate() -> Result<()> {
        let sim = DummySimulator::discrete(vec![1, 2]).fail_at_tick(1);
        let mut env = EnvWrapper::new(sim, NullRenderer, &PilotConfig::default())?;
        env.reset(false)?;
        env.step(&Action::Discrete(0))?;

        let err = env.step(&Action::Discrete(0)).unwrap_err();
        assert!(err.downcast_ref::<PilotError>().is_none());
        assert_eq!(err.to_string(), "simulator crashed at tick 1");
        Ok(())
    }

    #[test]
    fn test_continuous_actions() -> Result<()> {
        let sim = DummySimulator::continuous(vec![-1.0, 0.0], vec![1.0, 5.0]);
        let mut env = EnvWrapper::new(sim, NullRenderer, &PilotConfig::default())?;
        let tr = env.reset(false)?;
        assert_eq!(tr.action, &Action::Continuous(vec![0.0, 0.0]));

        env.step(&Action::Continuous(vec![0.5, 5.0]))?;
        let err = env.step(&Action::Continuous(vec![0.5, 5.5])).unwrap_err();
        assert!(matches!(pilot_error(&err), PilotError::InvalidAction { .. }));
        let err = env.step(&Action::Discrete(0)).unwrap_err();
        assert!(matches!(pilot_error(&err), PilotError::InvalidAction { .. }));

        for _ in 0..100 {
            match env.get_random_action() {
                Action::Continuous(v) => {
                    assert!(-1.0 <= v[0] && v[0] <= 1.0);
                    assert!(0.0 <= v[1] && v[1] <= 5.0);
                }
                a => panic!("unexpected action {:?}", a),
            }
        }
        assert_eq!(env.simulator().applied_continuous(), &[vec![0.5, 5.0]]);
        Ok(())
    }

    #[test]
    fn test_random_actions_cover_the_space() {
        let (mut env, _) = discrete_env(6);
        let mut seen = [false; 6];
        for _ in 0..1000 {
            match env.get_random_action() {
                Action::Discrete(ix) => seen[ix] = true,
                a => panic!("unexpected action {:?}", a),
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_random_actions_are_seeded() {
        let sample = |seed| {
            let sim = DummySimulator::discrete((0..20).collect());
            let config = PilotConfig::default().seed(seed);
            let mut env = EnvWrapper::new(sim, NullRenderer, &config).unwrap();
            (0..20).map(|_| env.get_random_action()).collect::<Vec<_>>()
        };
        assert_eq!(sample(1), sample(1));
        assert_ne!(sample(1), sample(2));
    }

    #[test]
    fn test_change_phase() -> Result<()> {
        let (mut env, _) = discrete_env(2);
        assert_eq!(env.phase(), RunPhase::Train);
        env.change_phase(RunPhase::Test);
        assert_eq!(env.phase(), RunPhase::Test);

        env.reset(false)?;
        env.step(&Action::Discrete(0))?;
        env.change_phase(RunPhase::Heatup);
        env.step(&Action::Discrete(0))?;
        assert_eq!(env.simulator().phases(), &[RunPhase::Test, RunPhase::Heatup]);
        Ok(())
    }

    #[test]
    fn test_digit_keys_select_actions() -> Result<()> {
        let (mut env, renderer) = discrete_env(5);

        renderer.press(vec![Key::Digit(2)]);
        assert_eq!(env.get_action_from_user()?, 1);

        renderer.press(vec![Key::Digit(5)]);
        assert_eq!(env.get_action_from_user()?, 4);

        // Out of range digits and other keys fall back to the default action.
        renderer.press(vec![Key::Digit(6)]);
        assert_eq!(env.get_action_from_user()?, 0);
        renderer.press(vec![Key::Digit(0)]);
        assert_eq!(env.get_action_from_user()?, 0);
        renderer.press(vec![Key::Up]);
        assert_eq!(env.get_action_from_user()?, 0);

        // Only the first pressed key counts.
        renderer.press(vec![Key::Char('x'), Key::Digit(3)]);
        assert_eq!(env.get_action_from_user()?, 0);
        renderer.press(vec![Key::Digit(3), Key::Digit(4)]);
        assert_eq!(env.get_action_from_user()?, 2);

        renderer.release();
        assert_eq!(env.get_action_from_user()?, 0);
        assert_eq!(renderer.polls(), 0);
        Ok(())
    }

    #[test]
    fn test_key_bindings_select_actions() -> Result<()> {
        let bindings = KeyBindings::new()
            .bind(vec![Key::Up], 3)
            .bind(vec![Key::Down], 4);
        let sim = DummySimulator::discrete((0..5).collect()).key_bindings(bindings);
        let renderer = ScriptedRenderer::new();
        let mut env = EnvWrapper::new(sim, renderer.clone(), &PilotConfig::default())?;

        renderer.press(vec![Key::Down]);
        assert_eq!(env.get_action_from_user()?, 4);
        renderer.press(vec![Key::Left]);
        assert_eq!(env.get_action_from_user()?, 0);
        renderer.press(vec![Key::Left, Key::Up, Key::Down]);
        assert_eq!(env.get_action_from_user()?, 3);
        // Digits are not used when bindings exist.
        renderer.press(vec![Key::Digit(2)]);
        assert_eq!(env.get_action_from_user()?, 0);
        Ok(())
    }

    #[test]
    fn test_configured_bindings_and_default_action() -> Result<()> {
        let sim = DummySimulator::discrete((0..5).collect())
            .key_bindings(KeyBindings::new().bind(vec![Key::Up], 3));
        let config = PilotConfig::default()
            .default_action(2)
            .key_bindings(KeyBindings::new().bind(vec![Key::Char('k')], 1));
        let renderer = ScriptedRenderer::new();
        let mut env = EnvWrapper::new(sim, renderer.clone(), &config)?;

        renderer.press(vec![Key::Char('k')]);
        assert_eq!(env.get_action_from_user()?, 1);
        renderer.press(vec![Key::Up]);
        assert_eq!(env.get_action_from_user()?, 2);
        Ok(())
    }

    #[test]
    fn test_wait_for_explicit_human_action() -> Result<()> {
        let sim = DummySimulator::discrete((0..5).collect());
        let config = PilotConfig::default().wait_for_explicit_human_action(true);
        let renderer = ScriptedRenderer::new();
        let mut env = EnvWrapper::new(sim, renderer.clone(), &config)?;

        renderer.queue(vec![]);
        renderer.queue(vec![]);
        renderer.queue(vec![Key::Digit(3)]);
        let start = Instant::now();
        assert_eq!(env.get_action_from_user()?, 2);
        assert_eq!(renderer.polls(), 3);
        // Empty polls are followed by a pause.
        assert!(start.elapsed() >= 2 * KEY_POLL_INTERVAL);

        // A pressed key returns without polling.
        assert_eq!(env.get_action_from_user()?, 2);
        assert_eq!(renderer.polls(), 3);

        // A closed display stops the wait.
        renderer.release();
        renderer.close();
        assert_eq!(env.get_action_from_user()?, 0);
        assert_eq!(renderer.polls(), 3);
        Ok(())
    }

    #[test]
    fn test_render_sources() -> Result<()> {
        let renderer = ScriptedRenderer::new();
        let sim = DummySimulator::discrete(vec![1]).image(true);
        let mut env = EnvWrapper::new(sim, renderer.clone(), &PilotConfig::default())?;
        env.render()?;
        env.reset(false)?;
        env.render()?;
        assert_eq!(renderer.frames(), 2);
        assert_eq!(renderer.last_frame_shape(), Some(vec![2, 2]));

        let renderer = ScriptedRenderer::new();
        let sim = DummySimulator::discrete(vec![1]).image(true).rendered_image(true);
        let mut env = EnvWrapper::new(sim, renderer.clone(), &PilotConfig::default())?;
        env.reset(false)?;
        env.render()?;
        assert_eq!(renderer.last_frame_shape(), Some(vec![3, 4]));

        let renderer = ScriptedRenderer::new();
        let sim = DummySimulator::discrete(vec![1]);
        let mut env = EnvWrapper::new(sim, renderer.clone(), &PilotConfig::default())?;
        env.reset(false)?;
        env.render()?;
        assert_eq!(renderer.last_frame_shape(), Some(vec![64, 64]));
        Ok(())
    }

    #[test]
    fn test_rendering_flags() -> Result<()> {
        let (env, _) = discrete_env(2);
        assert!(!env.is_rendered());
        assert!(!env.is_recording_episode());

        let config = PilotConfig::default().human_control(true).record_video_every(2);
        let sim = DummySimulator::discrete(vec![1]).episode_len(1);
        let mut env = EnvWrapper::new(sim, NullRenderer, &config)?;
        assert!(env.is_rendered());

        let mut recorded = vec![];
        for _ in 0..4 {
            env.reset(false)?;
            recorded.push(env.is_recording_episode());
            env.step(&Action::Discrete(0))?;
        }
        assert_eq!(recorded, vec![true, false, true, false]);
        Ok(())
    }

    #[test]
    fn test_obs_filter_is_applied() -> Result<()> {
        struct Doubler;

        impl ObsFilter for Doubler {
            type Config = RawObsFilterConfig;

            fn build(_config: &Self::Config) -> Result<Self> {
                Ok(Self)
            }

            fn filt(&self, mut raw: Observation) -> Observation {
                raw.data_mut().mapv_inplace(|x| x * 2.0);
                raw
            }
        }

        let sim = DummySimulator::discrete(vec![1]);
        let filter = Doubler::build(&Doubler::default_config())?;
        let mut env = EnvWrapper::build(sim, NullRenderer, filter, &PilotConfig::default())?;
        env.reset(false)?;
        env.step(&Action::Discrete(0))?;
        let tr = env.step(&Action::Discrete(0))?;
        assert_eq!(tr.observation, &Observation::vector(vec![4.0]));
        Ok(())
    }
}
