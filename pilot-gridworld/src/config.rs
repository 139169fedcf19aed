//! Configuration of [`GridWorld`](super::GridWorld).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`GridWorld`](super::GridWorld).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GridWorldConfig {
    /// The number of columns.
    pub width: usize,

    /// The number of rows.
    pub height: usize,

    /// The maximum number of ticks in an episode.
    pub max_steps: usize,

    /// Goal cell `(x, y)`. Defaults to the bottom-right corner.
    pub goal: Option<(usize, usize)>,

    /// Side of a cell in the displayed image, in pixels.
    pub cell_size: usize,
}

impl Default for GridWorldConfig {
    fn default() -> Self {
        Self {
            width: 5,
            height: 5,
            max_steps: 100,
            goal: None,
            cell_size: 16,
        }
    }
}

impl GridWorldConfig {
    /// Sets the size of the grid.
    pub fn size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the maximum number of ticks in an episode.
    pub fn max_steps(mut self, v: usize) -> Self {
        self.max_steps = v;
        self
    }

    /// Sets the goal cell.
    pub fn goal(mut self, x: usize, y: usize) -> Self {
        self.goal = Some((x, y));
        self
    }

    /// Sets the side of a cell in the displayed image.
    pub fn cell_size(mut self, v: usize) -> Self {
        self.cell_size = v;
        self
    }

    /// Constructs [`GridWorldConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`GridWorldConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }

    pub(crate) fn goal_cell(&self) -> (usize, usize) {
        self.goal
            .unwrap_or((self.width.saturating_sub(1), self.height.saturating_sub(1)))
    }
}
