//! Experience buffer interface.
use anyhow::Result;

/// Buffers collecting the experiences of a session.
///
/// Agents push the experiences they receive in [`Agent::observe`]; see
/// [`ReplayMemory`] for the bounded FIFO implementation used by the human agent.
///
/// [`Agent::observe`]: crate::Agent::observe
/// [`ReplayMemory`]: crate::ReplayMemory
pub trait ExperienceBufferBase {
    /// Stored item.
    type Item;

    /// Stores an experience, possibly evicting an older one.
    fn push(&mut self, tr: Self::Item) -> Result<()>;

    /// The number of stored experiences.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
