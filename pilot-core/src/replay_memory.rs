//! Bounded replay memory.
use crate::{error::PilotError, Experience, ExperienceBufferBase, PilotConfig};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    collections::VecDeque,
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

/// A FIFO store of experiences.
///
/// When the memory is full, pushing an experience evicts the oldest one. The
/// memory holds no reference to the configuration it was built from, so a
/// saved memory is self-contained.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayMemory {
    capacity: usize,
    experiences: VecDeque<Experience>,
}

impl ReplayMemory {
    /// Creates an empty memory. A capacity of `0` is raised to `1`.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            experiences: VecDeque::with_capacity(capacity.min(4096)),
        }
    }

    /// Creates an empty memory with the capacity in `config.memory`.
    pub fn from_config(config: &PilotConfig) -> Self {
        Self::new(config.memory.capacity)
    }

    /// The maximum number of experiences.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates from the oldest experience to the newest.
    pub fn iter(&self) -> impl Iterator<Item = &Experience> {
        self.experiences.iter()
    }

    /// Writes the memory to `path`, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PilotError> {
        let path = path.as_ref();
        let persist = |source: io::Error| PilotError::Persist {
            path: path.to_path_buf(),
            source,
        };

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(persist)?;
        }
        let file = File::create(path).map_err(persist)?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, self)
            .map_err(|e| persist(io::Error::new(io::ErrorKind::Other, e)))?;
        // Errors of the final write are lost if the writer is only dropped.
        writer.flush().map_err(persist)?;
        writer.get_ref().sync_all().map_err(persist)
    }

    /// Reads a memory written by [`ReplayMemory::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let memory = bincode::deserialize_from(BufReader::new(file))?;
        Ok(memory)
    }
}

impl ExperienceBufferBase for ReplayMemory {
    type Item = Experience;

    fn push(&mut self, tr: Experience) -> Result<()> {
        if self.experiences.len() == self.capacity {
            self.experiences.pop_front();
        }
        self.experiences.push_back(tr);
        Ok(())
    }

    fn len(&self) -> usize {
        self.experiences.len()
    }
}
