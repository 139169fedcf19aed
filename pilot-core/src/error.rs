//! Errors in the library.
use crate::Action;
use std::path::PathBuf;
use thiserror::Error;

/// Errors in the library.
///
/// Errors raised by simulators are not wrapped in this type. They are passed
/// through [`anyhow::Error`] unchanged, so that the caller of
/// [`EnvWrapper::step`](crate::EnvWrapper::step) sees the error of the simulator.
#[derive(Error, Debug)]
pub enum PilotError {
    /// The action does not belong to the action space of the environment.
    #[error("Invalid action {action:?}: {reason}")]
    InvalidAction {
        /// The rejected action.
        action: Action,
        /// Why the action was rejected.
        reason: String,
    },

    /// The simulator reported an action set that cannot be normalized.
    #[error("Invalid action space: {0}")]
    InvalidActionSpace(String),

    /// A configuration value is out of its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// `step()` was called before the first `reset()`.
    #[error("The environment has not been reset yet")]
    EpisodeNotReady,

    /// `step()` was called after the episode had ended.
    #[error("The episode is done, reset the environment first")]
    EpisodeDone,

    /// `reset(false)` was called while an episode was running.
    #[error("An episode is in progress, use a forced reset to interrupt it")]
    EpisodeInProgress,

    /// The replay memory could not be written.
    #[error("Failed to store the replay buffer in {path:?}")]
    Persist {
        /// Destination of the artifact.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The session was already terminated by the exit sequence.
    #[error("The session has already been terminated")]
    SessionTerminated,
}
