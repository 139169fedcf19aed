#![warn(missing_docs)]
//! Uniform wrapper of reinforcement learning simulators.
//!
//! [`EnvWrapper`] presents any [`Simulator`] through one interface: discrete
//! native actions are addressed by dense indices, continuous actions are
//! validated against their bounds, and observations go through an
//! [`ObsFilter`] before they are exposed. Agents implement [`Agent`] and see the
//! environment through [`EnvHandle`], which also lets a human drive the
//! environment from the keyboard of a [`Renderer`].
pub mod dummy;
pub mod error;

mod action_space;
pub use action_space::{Action, ActionSpace, NativeActionSet, NativeCommand};

mod base;
pub use base::{
    Agent, Decision, EnvHandle, Experience, ExperienceBufferBase, Simulator, Transition,
};

mod config;
pub use config::{
    EnvConfig, HumanControlConfig, PilotConfig, ReplayMemoryConfig, VisualizationConfig,
};

mod key;
pub use key::{Key, KeyBinding, KeyBindings};

mod observation;
pub use observation::{ObsFilter, Observation, RawObsFilter, RawObsFilterConfig};

mod phase;
pub use phase::RunPhase;

mod random_agent;
pub use random_agent::RandomAgent;

mod renderer;
pub use renderer::{FrameSink, InputSource, NullRenderer, Renderer};

mod replay_memory;
pub use replay_memory::ReplayMemory;

mod session;
pub use session::{run_session, SessionReport};

mod wrapper;
pub use wrapper::{EnvWrapper, EpisodeState, KEY_POLL_INTERVAL};
