//! This module is used for tests.
use crate::{
    FrameSink, InputSource, Key, KeyBindings, NativeActionSet, NativeCommand, Observation,
    RunPhase, Simulator,
};
use anyhow::{bail, Result};
use ndarray::{ArrayD, ArrayViewD, IxDyn};
use std::{cell::RefCell, collections::VecDeque, rc::Rc};

/// Dummy simulator.
///
/// Every tick yields reward `1` and an episode lasts `episode_len` ticks. The
/// observation holds the tick counter. Applied actions are recorded for
/// inspection.
#[derive(Debug, Clone)]
pub struct DummySimulator {
    action_set: NativeActionSet<i32>,
    episode_len: usize,
    tick: usize,
    restarts: usize,
    forced_restarts: usize,
    applied: Vec<i32>,
    applied_continuous: Vec<Vec<f32>>,
    phases: Vec<RunPhase>,
    fail_at_tick: Option<usize>,
    fail_restart_at: Option<usize>,
    image: bool,
    rendered_image: bool,
    key_bindings: KeyBindings,
}

impl DummySimulator {
    fn new(action_set: NativeActionSet<i32>) -> Self {
        Self {
            action_set,
            episode_len: 10,
            tick: 0,
            restarts: 0,
            forced_restarts: 0,
            applied: Vec::new(),
            applied_continuous: Vec::new(),
            phases: Vec::new(),
            fail_at_tick: None,
            fail_restart_at: None,
            image: false,
            rendered_image: false,
            key_bindings: KeyBindings::default(),
        }
    }

    /// A simulator with discrete native actions.
    pub fn discrete(native_actions: Vec<i32>) -> Self {
        Self::new(NativeActionSet::Discrete(native_actions))
    }

    /// A simulator with a continuous action.
    pub fn continuous(low: Vec<f32>, high: Vec<f32>) -> Self {
        Self::new(NativeActionSet::Continuous { low, high })
    }

    /// Sets the number of ticks in an episode.
    pub fn episode_len(mut self, n: usize) -> Self {
        self.episode_len = n;
        self
    }

    /// Makes the simulator fail at the given tick of every episode.
    pub fn fail_at_tick(mut self, tick: usize) -> Self {
        self.fail_at_tick = Some(tick);
        self
    }

    /// Makes the restart with the given index fail once, counting from `0`.
    pub fn fail_restart_at(mut self, n: usize) -> Self {
        self.fail_restart_at = Some(n);
        self
    }

    /// Emits `[2, 2]` image observations instead of vectors.
    pub fn image(mut self, v: bool) -> Self {
        self.image = v;
        self
    }

    /// Provides a `[3, 4]` display image distinct from the observation.
    pub fn rendered_image(mut self, v: bool) -> Self {
        self.rendered_image = v;
        self
    }

    /// Sets the key bindings reported to the wrapper.
    pub fn key_bindings(mut self, key_bindings: KeyBindings) -> Self {
        self.key_bindings = key_bindings;
        self
    }

    /// Native discrete actions applied so far, one per tick.
    pub fn applied(&self) -> &[i32] {
        &self.applied
    }

    /// Continuous actions applied so far, one per tick.
    pub fn applied_continuous(&self) -> &[Vec<f32>] {
        &self.applied_continuous
    }

    /// Phases seen by the ticks so far.
    pub fn phases(&self) -> &[RunPhase] {
        &self.phases
    }

    /// The number of episode restarts.
    pub fn restarts(&self) -> usize {
        self.restarts
    }

    /// The number of forced episode restarts.
    pub fn forced_restarts(&self) -> usize {
        self.forced_restarts
    }

    /// Ticks in the current episode.
    pub fn tick(&self) -> usize {
        self.tick
    }
}

impl Simulator for DummySimulator {
    type NativeAction = i32;

    fn native_action_set(&self) -> NativeActionSet<i32> {
        self.action_set.clone()
    }

    fn restart_episode(&mut self, force: bool, _phase: RunPhase) -> Result<()> {
        if self.fail_restart_at == Some(self.restarts) {
            self.fail_restart_at = None;
            bail!("simulator failed to restart");
        }
        self.tick = 0;
        self.restarts += 1;
        if force {
            self.forced_restarts += 1;
        }
        Ok(())
    }

    fn apply_native_action(&mut self, action: NativeCommand<'_, i32>, phase: RunPhase) -> Result<f32> {
        if self.fail_at_tick == Some(self.tick) {
            bail!("simulator crashed at tick {}", self.tick);
        }
        match action {
            NativeCommand::Discrete(a) => self.applied.push(*a),
            NativeCommand::Continuous(a) => self.applied_continuous.push(a.to_vec()),
        }
        self.phases.push(phase);
        self.tick += 1;
        Ok(1.0)
    }

    fn report_termination(&self) -> bool {
        self.tick >= self.episode_len
    }

    fn raw_observation(&self) -> Result<Observation> {
        let t = self.tick as f32;
        if self.image {
            Ok(Observation::image(ArrayD::from_elem(IxDyn(&[2, 2]), t)))
        } else {
            Ok(Observation::vector(vec![t]))
        }
    }

    fn measurements_into(&self, out: &mut Vec<f32>) {
        out.clear();
        out.push(self.tick as f32);
        out.push(self.restarts as f32);
    }

    fn rendered_image(&self) -> Option<ArrayD<f32>> {
        if self.rendered_image {
            Some(ArrayD::zeros(IxDyn(&[3, 4])))
        } else {
            None
        }
    }

    fn key_bindings(&self) -> KeyBindings {
        self.key_bindings.clone()
    }
}

#[derive(Debug)]
struct Script {
    open: bool,
    pressed: Vec<Key>,
    queued: VecDeque<Vec<Key>>,
    polls: usize,
    frames: usize,
    last_frame_shape: Option<Vec<usize>>,
}

/// Dummy renderer driven by a script.
///
/// Clones share the same state, so a test can keep a clone to press keys or
/// close the display after the renderer has been moved into a wrapper.
#[derive(Debug, Clone)]
pub struct ScriptedRenderer {
    script: Rc<RefCell<Script>>,
}

impl Default for ScriptedRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedRenderer {
    /// An open display with no key pressed.
    pub fn new() -> Self {
        Self {
            script: Rc::new(RefCell::new(Script {
                open: true,
                pressed: Vec::new(),
                queued: VecDeque::new(),
                polls: 0,
                frames: 0,
                last_frame_shape: None,
            })),
        }
    }

    /// Sets the pressed keys.
    pub fn press(&self, keys: impl IntoIterator<Item = Key>) {
        self.script.borrow_mut().pressed = keys.into_iter().collect();
    }

    /// Releases all keys.
    pub fn release(&self) {
        self.script.borrow_mut().pressed.clear();
    }

    /// Queues the keys pressed after the next event poll.
    pub fn queue(&self, keys: impl IntoIterator<Item = Key>) {
        self.script
            .borrow_mut()
            .queued
            .push_back(keys.into_iter().collect());
    }

    /// Closes the display.
    pub fn close(&self) {
        self.script.borrow_mut().open = false;
    }

    /// The number of event polls.
    pub fn polls(&self) -> usize {
        self.script.borrow().polls
    }

    /// The number of rendered frames.
    pub fn frames(&self) -> usize {
        self.script.borrow().frames
    }

    /// Shape of the last rendered frame.
    pub fn last_frame_shape(&self) -> Option<Vec<usize>> {
        self.script.borrow().last_frame_shape.clone()
    }
}

impl InputSource for ScriptedRenderer {
    fn is_open(&self) -> bool {
        self.script.borrow().open
    }

    fn poll_events(&mut self) -> Result<()> {
        let mut script = self.script.borrow_mut();
        script.polls += 1;
        if let Some(keys) = script.queued.pop_front() {
            script.pressed = keys;
        }
        Ok(())
    }

    fn pressed_keys(&self) -> Vec<Key> {
        self.script.borrow().pressed.clone()
    }
}

impl FrameSink for ScriptedRenderer {
    fn render_image(&mut self, image: ArrayViewD<'_, f32>) -> Result<()> {
        let mut script = self.script.borrow_mut();
        script.frames += 1;
        script.last_frame_shape = Some(image.shape().to_vec());
        Ok(())
    }
}
