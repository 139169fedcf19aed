//! Simulator.
use crate::{KeyBindings, NativeActionSet, NativeCommand, Observation, RunPhase};
use anyhow::Result;
use ndarray::ArrayD;
use std::fmt::Debug;

/// A concrete simulator driven by [`EnvWrapper`](crate::EnvWrapper).
///
/// The wrapper owns the simulator and calls it from a single thread. Errors
/// returned by these methods reach the caller of
/// [`EnvWrapper::step`](crate::EnvWrapper::step) and
/// [`EnvWrapper::reset`](crate::EnvWrapper::reset) unchanged.
pub trait Simulator {
    /// Native action of the simulator.
    type NativeAction: Clone + PartialEq + Debug;

    /// Returns the native action set.
    ///
    /// Called once, when the wrapper is built. The order of discrete actions
    /// defines their normalized indices.
    fn native_action_set(&self) -> NativeActionSet<Self::NativeAction>;

    /// Starts a new episode.
    ///
    /// `force` is `true` when the caller interrupts a running episode.
    fn restart_episode(&mut self, force: bool, phase: RunPhase) -> Result<()>;

    /// Advances the simulator by one tick and returns the reward of the tick.
    fn apply_native_action(
        &mut self,
        action: NativeCommand<'_, Self::NativeAction>,
        phase: RunPhase,
    ) -> Result<f32>;

    /// Returns `true` if the episode has terminated.
    fn report_termination(&self) -> bool;

    /// Returns the current observation, before preprocessing.
    fn raw_observation(&self) -> Result<Observation>;

    /// Writes the current measurements (lives, ammo, position, ...) into `out`.
    ///
    /// The buffer is reused across steps. The default implementation reports
    /// no measurement.
    fn measurements_into(&self, out: &mut Vec<f32>) {
        out.clear();
    }

    /// Returns the image to be displayed, if it differs from the observation.
    fn rendered_image(&self) -> Option<ArrayD<f32>> {
        None
    }

    /// Keyboard bindings of the simulator's actions.
    ///
    /// The default implementation returns an empty table, selecting the digit
    /// convention.
    fn key_bindings(&self) -> KeyBindings {
        KeyBindings::default()
    }
}
