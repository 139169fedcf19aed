//! An agent driven by a human at the keyboard.
//!
//! [`HumanAgent`] implements [`pilot_core::Agent`], so it plugs into the same
//! control loop as learned policies. At every decision point it reads the
//! pressed keys through [`pilot_core::EnvHandle::get_action_from_user`] and
//! pauses for a fixed interval, so that the environment runs at a pace a human
//! can follow.
//!
//! The experiences of the session are collected in a [`ReplayMemory`]. When the
//! display is closed, the memory is written to
//! `<experiment_dir>/replay_buffer.p` and the agent returns
//! [`Decision::Terminate`], e.g. to use the demonstrations for imitation
//! learning later.
//!
//! [`ReplayMemory`]: pilot_core::ReplayMemory
//! [`Decision::Terminate`]: pilot_core::Decision::Terminate
mod base;
pub use base::{HumanAgent, REPLAY_BUFFER_FILE};
