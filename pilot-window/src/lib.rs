//! Desktop display for [`pilot_core::EnvWrapper`].
//!
//! With feature `minifb`, [`WindowRenderer`] shows the frames of an environment
//! in a window and reports the pressed keys, so that a human can drive the
//! environment, e.g. with `pilot_human_agent::HumanAgent`. The conversion of
//! frames to pixels, [`to_pixels`], does not need a display.
//!
//! ```bash
//! cargo run -p pilot-window --features minifb --example human_gridworld
//! ```
mod frame;
pub use frame::to_pixels;

#[cfg(feature = "minifb")]
mod window;
#[cfg(feature = "minifb")]
pub use window::WindowRenderer;
