//! Normalized actions and the mapping to native simulator actions.
use crate::error::PilotError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A normalized action, as produced by agents and consumed by
/// [`EnvWrapper::step`](crate::EnvWrapper::step).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Index in `[0, size)` of a discrete action space.
    Discrete(usize),

    /// One value per dimension of a continuous action space.
    Continuous(Vec<f32>),
}

/// The action set reported by a simulator.
#[derive(Clone, Debug, PartialEq)]
pub enum NativeActionSet<A> {
    /// Native discrete actions in the order reported by the simulator.
    Discrete(Vec<A>),

    /// Per-dimension bounds of a continuous action.
    Continuous {
        /// Lower bounds.
        low: Vec<f32>,
        /// Upper bounds.
        high: Vec<f32>,
    },
}

/// A native action handed to a simulator for one tick.
#[derive(Debug, PartialEq)]
pub enum NativeCommand<'a, A> {
    /// One of the native discrete actions.
    Discrete(&'a A),

    /// A continuous action, validated against the bounds.
    Continuous(&'a [f32]),
}

impl<'a, A> Clone for NativeCommand<'a, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, A> Copy for NativeCommand<'a, A> {}

/// Action space of an [`EnvWrapper`](crate::EnvWrapper).
///
/// Discrete native actions are assigned dense indices `0..size` in the order the
/// simulator reported them. For example, if the native actions are `4, 5, 6`,
/// then index `0` maps to `4`, `1` to `5` and `2` to `6`.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionSpace<A> {
    /// Discrete actions.
    Discrete {
        /// Native action of each index.
        native_actions: Vec<A>,
    },

    /// Continuous actions.
    Continuous {
        /// Lower bounds.
        low: Vec<f32>,
        /// Upper bounds.
        high: Vec<f32>,
    },
}

impl<A> ActionSpace<A>
where
    A: Clone + PartialEq + Debug,
{
    /// Builds a discrete action space.
    ///
    /// The native actions must be non-empty and distinct.
    pub fn discrete(native_actions: Vec<A>) -> Result<Self, PilotError> {
        if native_actions.is_empty() {
            return Err(PilotError::InvalidActionSpace(
                "the simulator reported no discrete action".to_string(),
            ));
        }
        for (i, a) in native_actions.iter().enumerate() {
            if native_actions[..i].contains(a) {
                return Err(PilotError::InvalidActionSpace(format!(
                    "native action {:?} is reported twice",
                    a
                )));
            }
        }
        Ok(Self::Discrete { native_actions })
    }

    /// Builds a continuous action space.
    pub fn continuous(low: Vec<f32>, high: Vec<f32>) -> Result<Self, PilotError> {
        if low.len() != high.len() {
            return Err(PilotError::InvalidActionSpace(format!(
                "bounds have different dimensions: {} and {}",
                low.len(),
                high.len()
            )));
        }
        if low.is_empty() {
            return Err(PilotError::InvalidActionSpace(
                "a continuous action needs at least one dimension".to_string(),
            ));
        }
        if let Some(i) = (0..low.len()).find(|&i| !(low[i] <= high[i])) {
            return Err(PilotError::InvalidActionSpace(format!(
                "low[{}] = {} is not below high[{}] = {}",
                i, low[i], i, high[i]
            )));
        }
        Ok(Self::Continuous { low, high })
    }

    /// Builds the action space from the action set of a simulator.
    pub fn from_native(set: NativeActionSet<A>) -> Result<Self, PilotError> {
        match set {
            NativeActionSet::Discrete(native_actions) => Self::discrete(native_actions),
            NativeActionSet::Continuous { low, high } => Self::continuous(low, high),
        }
    }

    /// Returns `true` for discrete action spaces.
    pub fn is_discrete(&self) -> bool {
        matches!(self, Self::Discrete { .. })
    }

    /// The number of discrete actions, `0` for continuous action spaces.
    pub fn size(&self) -> usize {
        match self {
            Self::Discrete { native_actions } => native_actions.len(),
            Self::Continuous { .. } => 0,
        }
    }

    /// The number of dimensions of a continuous action, `1` for discrete action spaces.
    pub fn dims(&self) -> usize {
        match self {
            Self::Discrete { .. } => 1,
            Self::Continuous { low, .. } => low.len(),
        }
    }

    /// Returns the native action of an index.
    pub fn index_to_native(&self, ix: usize) -> Option<&A> {
        match self {
            Self::Discrete { native_actions } => native_actions.get(ix),
            Self::Continuous { .. } => None,
        }
    }

    /// Returns the index of a native action, or `None` if the action is not in the
    /// table.
    ///
    /// `None` is an expected outcome, e.g. when validating transitions reported by
    /// the environment.
    pub fn native_to_index(&self, native: &A) -> Option<usize> {
        match self {
            Self::Discrete { native_actions } => native_actions.iter().position(|a| a == native),
            Self::Continuous { .. } => None,
        }
    }

    /// Checks that `action` belongs to this space.
    pub fn validate(&self, action: &Action) -> Result<(), PilotError> {
        self.command(action).map(|_| ())
    }

    /// Validates `action` and converts it to the native action.
    ///
    /// Out-of-range actions are rejected, never clamped.
    pub fn command<'a>(
        &'a self,
        action: &'a Action,
    ) -> Result<NativeCommand<'a, A>, PilotError> {
        let invalid = |reason: String| PilotError::InvalidAction {
            action: action.clone(),
            reason,
        };

        match (self, action) {
            (Self::Discrete { native_actions }, Action::Discrete(ix)) => native_actions
                .get(*ix)
                .map(NativeCommand::Discrete)
                .ok_or_else(|| {
                    invalid(format!(
                        "index must be in [0, {}), got {}",
                        native_actions.len(),
                        ix
                    ))
                }),
            (Self::Continuous { low, high }, Action::Continuous(values)) => {
                if values.len() != low.len() {
                    return Err(invalid(format!(
                        "expected {} dimensions, got {}",
                        low.len(),
                        values.len()
                    )));
                }
                // NaN fails this check as well.
                if let Some(i) =
                    (0..values.len()).find(|&i| !(low[i] <= values[i] && values[i] <= high[i]))
                {
                    return Err(invalid(format!(
                        "dimension {} must be in [{}, {}], got {}",
                        i, low[i], high[i], values[i]
                    )));
                }
                Ok(NativeCommand::Continuous(values.as_slice()))
            }
            (Self::Discrete { .. }, Action::Continuous(_)) => Err(invalid(
                "continuous action given to a discrete action space".to_string(),
            )),
            (Self::Continuous { .. }, Action::Discrete(_)) => Err(invalid(
                "discrete action given to a continuous action space".to_string(),
            )),
        }
    }

    /// Samples an action uniformly.
    ///
    /// Discrete spaces draw an index from `[0, size)`. Continuous spaces draw each
    /// dimension independently from `[low, high]`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Action {
        match self {
            Self::Discrete { native_actions } => {
                Action::Discrete(rng.gen_range(0..native_actions.len()))
            }
            Self::Continuous { low, high } => Action::Continuous(
                low.iter()
                    .zip(high.iter())
                    .map(|(&l, &h)| if l < h { rng.gen_range(l..=h) } else { l })
                    .collect(),
            ),
        }
    }

    /// The action recorded right after a reset: index `0`, or the zero vector for
    /// continuous action spaces.
    pub fn initial_action(&self) -> Action {
        match self {
            Self::Discrete { .. } => Action::Discrete(0),
            Self::Continuous { low, .. } => Action::Continuous(vec![0.0; low.len()]),
        }
    }
}
