//! Core interfaces.
mod agent;
mod replay_buffer;
mod simulator;
mod step;
pub use agent::{Agent, Decision, EnvHandle};
pub use replay_buffer::ExperienceBufferBase;
pub use simulator::Simulator;
pub use step::{Experience, Transition};
