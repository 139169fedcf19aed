//! Configuration of [`EnvWrapper`](crate::EnvWrapper) and the agents driving it.
use crate::KeyBindings;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

/// Configuration of a run.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct PilotConfig {
    /// Random seed of the wrapper.
    pub seed: u64,

    /// Output directory of the experiment.
    pub experiment_dir: PathBuf,

    /// Environment section.
    pub env: EnvConfig,

    /// Visualization section.
    pub visualization: VisualizationConfig,

    /// Human control section.
    pub human: HumanControlConfig,

    /// Replay memory section.
    pub memory: ReplayMemoryConfig,
}

/// Environment section of [`PilotConfig`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct EnvConfig {
    /// Name of the level loaded by the simulator.
    pub level: String,

    /// The number of simulator ticks a normalized action is repeated for.
    pub frame_skip: usize,

    /// If `true`, a human drives the environment from the keyboard.
    pub human_control: bool,
}

/// Visualization section of [`PilotConfig`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct VisualizationConfig {
    /// Interval of recorded episodes, `0` disables recording.
    pub record_video_every: usize,

    /// Directory of recorded videos.
    pub video_path: PathBuf,

    /// If `true`, frames are sent to the renderer.
    pub render: bool,
}

/// Human control section of [`PilotConfig`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct HumanControlConfig {
    /// Wait until a key is pressed before returning an action.
    pub wait_for_explicit_human_action: bool,

    /// Pause of the human agent after every decision, in milliseconds.
    pub pace_ms: u64,

    /// Action taken when no pressed key maps to an action.
    pub default_action: usize,

    /// Overrides the key bindings of the simulator.
    pub key_bindings: Option<KeyBindings>,
}

/// Replay memory section of [`PilotConfig`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct ReplayMemoryConfig {
    /// The maximum number of experiences kept in memory.
    pub capacity: usize,
}

impl Default for PilotConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            experiment_dir: PathBuf::from("experiments"),
            env: EnvConfig::default(),
            visualization: VisualizationConfig::default(),
            human: HumanControlConfig::default(),
            memory: ReplayMemoryConfig::default(),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            level: "".to_string(),
            frame_skip: 1,
            human_control: false,
        }
    }
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            record_video_every: 0,
            video_path: PathBuf::from("videos"),
            render: false,
        }
    }
}

impl Default for HumanControlConfig {
    fn default() -> Self {
        Self {
            wait_for_explicit_human_action: false,
            pace_ms: 100,
            default_action: 0,
            key_bindings: None,
        }
    }
}

impl Default for ReplayMemoryConfig {
    fn default() -> Self {
        Self { capacity: 1_000_000 }
    }
}

impl PilotConfig {
    /// Sets the random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the output directory of the experiment.
    pub fn experiment_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.experiment_dir = dir.into();
        self
    }

    /// Sets the level.
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.env.level = level.into();
        self
    }

    /// Sets the frame skip.
    pub fn frame_skip(mut self, frame_skip: usize) -> Self {
        self.env.frame_skip = frame_skip;
        self
    }

    /// Enables human control.
    pub fn human_control(mut self, v: bool) -> Self {
        self.env.human_control = v;
        self
    }

    /// Enables rendering.
    pub fn render(mut self, v: bool) -> Self {
        self.visualization.render = v;
        self
    }

    /// Sets the interval of recorded episodes.
    pub fn record_video_every(mut self, v: usize) -> Self {
        self.visualization.record_video_every = v;
        self
    }

    /// Requires a pressed key for every human action.
    pub fn wait_for_explicit_human_action(mut self, v: bool) -> Self {
        self.human.wait_for_explicit_human_action = v;
        self
    }

    /// Sets the pause of the human agent in milliseconds.
    pub fn pace_ms(mut self, v: u64) -> Self {
        self.human.pace_ms = v;
        self
    }

    /// Sets the default action.
    pub fn default_action(mut self, v: usize) -> Self {
        self.human.default_action = v;
        self
    }

    /// Overrides the key bindings of the simulator.
    pub fn key_bindings(mut self, bindings: KeyBindings) -> Self {
        self.human.key_bindings = Some(bindings);
        self
    }

    /// Sets the capacity of the replay memory.
    pub fn memory_capacity(mut self, capacity: usize) -> Self {
        self.memory.capacity = capacity;
        self
    }

    /// Constructs [`PilotConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`PilotConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
