//! Display surface and keyboard input of a session.
use crate::Key;
use anyhow::Result;
use ndarray::ArrayViewD;

/// Read side of a renderer: display liveness and keyboard state.
///
/// Agents see a renderer only through this trait, via
/// [`EnvHandle::input`](crate::EnvHandle::input).
pub trait InputSource {
    /// Returns `true` while the display is open.
    fn is_open(&self) -> bool;

    /// Pumps the event queue of the backend, refreshing the pressed keys.
    fn poll_events(&mut self) -> Result<()>;

    /// Snapshot of the keys currently pressed, in the order reported by the backend.
    fn pressed_keys(&self) -> Vec<Key>;
}

/// Write side of a renderer.
pub trait FrameSink {
    /// Displays a frame.
    ///
    /// The frame is either `[height, width]` (grayscale) or `[height, width, 3]`
    /// (RGB), with values in `[0, 255]`.
    fn render_image(&mut self, image: ArrayViewD<'_, f32>) -> Result<()>;
}

/// A display surface with an input queue.
pub trait Renderer: InputSource + FrameSink {}

impl<T: InputSource + FrameSink> Renderer for T {}

/// A renderer without display, for headless runs.
///
/// The display is always open and no key is ever pressed.
#[derive(Clone, Debug, Default)]
pub struct NullRenderer;

impl InputSource for NullRenderer {
    fn is_open(&self) -> bool {
        true
    }

    fn poll_events(&mut self) -> Result<()> {
        Ok(())
    }

    fn pressed_keys(&self) -> Vec<Key> {
        Vec::new()
    }
}

impl FrameSink for NullRenderer {
    fn render_image(&mut self, _image: ArrayViewD<'_, f32>) -> Result<()> {
        Ok(())
    }
}
