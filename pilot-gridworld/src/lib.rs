//! A grid world simulator for [`pilot_core::EnvWrapper`].
//!
//! An agent moves on a `width` x `height` grid until it reaches the goal cell or
//! runs out of steps. Reaching the goal yields reward `1`, every other tick
//! yields `0`.
//!
//! ```no_run
//! use pilot_core::{EnvWrapper, NullRenderer, PilotConfig};
//! use pilot_gridworld::{GridWorld, GridWorldConfig};
//! # fn main() -> anyhow::Result<()> {
//! let config = PilotConfig::default().level("gridworld");
//! let sim = GridWorld::build(&GridWorldConfig::default(), config.seed)?;
//! let mut env = EnvWrapper::new(sim, NullRenderer, &config)?;
//! env.reset(false)?;
//! # Ok(())
//! # }
//! ```
mod act;
mod base;
mod config;
pub use act::GridMove;
pub use base::GridWorld;
pub use config::GridWorldConfig;
