//! Renderer on a `minifb` window.
use crate::frame::to_pixels;
use anyhow::Result;
use log::{info, trace};
use minifb::{Key as K, Window, WindowOptions};
use ndarray::ArrayViewD;
use pilot_core::{FrameSink, InputSource, Key};

/// A [`Renderer`](pilot_core::Renderer) showing frames in a desktop window.
///
/// The window is opened by the first frame, with the size of the frame times
/// the scale. Closing the window or pressing Escape closes the display.
pub struct WindowRenderer {
    title: String,
    scale: usize,
    window: Option<Window>,
    pixels: Vec<u32>,
    size: (usize, usize),
    pressed: Vec<Key>,
    closed: bool,
}

impl WindowRenderer {
    /// Creates the renderer.
    pub fn new(title: impl Into<String>, scale: usize) -> Self {
        Self {
            title: title.into(),
            scale: scale.max(1),
            window: None,
            pixels: Vec::new(),
            size: (0, 0),
            pressed: Vec::new(),
            closed: false,
        }
    }

    fn open(&mut self, width: usize, height: usize) -> Result<()> {
        let window = Window::new(
            &self.title,
            width * self.scale,
            height * self.scale,
            WindowOptions::default(),
        )?;
        info!("Opened window {:?} ({}x{})", self.title, width, height);
        self.window = Some(window);
        self.size = (width, height);
        Ok(())
    }

    fn refresh_keys(&mut self) {
        self.pressed = match &self.window {
            Some(window) => KEY_TABLE
                .iter()
                .filter(|(k, _)| window.is_key_down(*k))
                .map(|(_, key)| *key)
                .collect(),
            None => Vec::new(),
        };

        let escape = self.pressed.contains(&Key::Escape);
        if escape || self.window.as_ref().map_or(false, |w| !w.is_open()) {
            info!("Window closed");
            self.window = None;
            self.pressed.clear();
            self.closed = true;
        }
    }
}

impl InputSource for WindowRenderer {
    fn is_open(&self) -> bool {
        !self.closed
    }

    fn poll_events(&mut self) -> Result<()> {
        if let Some(window) = self.window.as_mut() {
            window.update();
        }
        self.refresh_keys();
        Ok(())
    }

    fn pressed_keys(&self) -> Vec<Key> {
        self.pressed.clone()
    }
}

impl FrameSink for WindowRenderer {
    fn render_image(&mut self, image: ArrayViewD<'_, f32>) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        let (w, h) = to_pixels(image, &mut self.pixels)?;
        if self.window.is_none() || self.size != (w, h) {
            self.open(w, h)?;
        }
        if let Some(window) = self.window.as_mut() {
            window.update_with_buffer(&self.pixels, w, h)?;
            trace!("Rendered {}x{} frame", w, h);
        }
        self.refresh_keys();
        Ok(())
    }
}

/// Keys reported by the window, in the order they are scanned.
const KEY_TABLE: [(K, Key); 54] = [
    (K::Up, Key::Up),
    (K::Down, Key::Down),
    (K::Left, Key::Left),
    (K::Right, Key::Right),
    (K::Space, Key::Space),
    (K::Enter, Key::Enter),
    (K::NumPadEnter, Key::Enter),
    (K::Escape, Key::Escape),
    (K::Key0, Key::Digit(0)),
    (K::NumPad0, Key::Digit(0)),
    (K::Key1, Key::Digit(1)),
    (K::NumPad1, Key::Digit(1)),
    (K::Key2, Key::Digit(2)),
    (K::NumPad2, Key::Digit(2)),
    (K::Key3, Key::Digit(3)),
    (K::NumPad3, Key::Digit(3)),
    (K::Key4, Key::Digit(4)),
    (K::NumPad4, Key::Digit(4)),
    (K::Key5, Key::Digit(5)),
    (K::NumPad5, Key::Digit(5)),
    (K::Key6, Key::Digit(6)),
    (K::NumPad6, Key::Digit(6)),
    (K::Key7, Key::Digit(7)),
    (K::NumPad7, Key::Digit(7)),
    (K::Key8, Key::Digit(8)),
    (K::NumPad8, Key::Digit(8)),
    (K::Key9, Key::Digit(9)),
    (K::NumPad9, Key::Digit(9)),
    (K::A, Key::Char('a')),
    (K::B, Key::Char('b')),
    (K::C, Key::Char('c')),
    (K::D, Key::Char('d')),
    (K::E, Key::Char('e')),
    (K::F, Key::Char('f')),
    (K::G, Key::Char('g')),
    (K::H, Key::Char('h')),
    (K::I, Key::Char('i')),
    (K::J, Key::Char('j')),
    (K::K, Key::Char('k')),
    (K::L, Key::Char('l')),
    (K::M, Key::Char('m')),
    (K::N, Key::Char('n')),
    (K::O, Key::Char('o')),
    (K::P, Key::Char('p')),
    (K::Q, Key::Char('q')),
    (K::R, Key::Char('r')),
    (K::S, Key::Char('s')),
    (K::T, Key::Char('t')),
    (K::U, Key::Char('u')),
    (K::V, Key::Char('v')),
    (K::W, Key::Char('w')),
    (K::X, Key::Char('x')),
    (K::Y, Key::Char('y')),
    (K::Z, Key::Char('z')),
];
