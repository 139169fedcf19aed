//! Observation of an environment and its preprocessing hook.
use anyhow::Result;
use ndarray::{Array1, ArrayD, IxDyn};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// An observation: an image tensor or a measurement vector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    data: ArrayD<f32>,
    is_image: bool,
}

impl Observation {
    /// Creates an observation from a buffer.
    pub fn new(data: ArrayD<f32>, is_image: bool) -> Self {
        Self { data, is_image }
    }

    /// Creates an image observation.
    pub fn image(data: ArrayD<f32>) -> Self {
        Self::new(data, true)
    }

    /// Creates a vector observation.
    pub fn vector(data: Vec<f32>) -> Self {
        Self::new(Array1::from(data).into_dyn(), false)
    }

    /// An empty vector observation, held by a wrapper before its first reset.
    pub fn empty() -> Self {
        Self::new(ArrayD::zeros(IxDyn(&[0])), false)
    }

    /// The buffer.
    pub fn data(&self) -> &ArrayD<f32> {
        &self.data
    }

    /// The mutable buffer, for in-place preprocessing.
    pub fn data_mut(&mut self) -> &mut ArrayD<f32> {
        &mut self.data
    }

    /// Returns `true` for image observations.
    pub fn is_image(&self) -> bool {
        self.is_image
    }

    /// Shape of the buffer.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Consumes the observation and returns the buffer.
    pub fn into_inner(self) -> ArrayD<f32> {
        self.data
    }
}

/// Preprocessing applied to raw observations of a simulator before they are
/// exposed by [`EnvWrapper`](crate::EnvWrapper), e.g. cropping, conversion to
/// grayscale or rescaling.
pub trait ObsFilter {
    /// Configuration.
    type Config: Clone + Default + Serialize + DeserializeOwned;

    /// Builds the filter.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Transforms a raw observation.
    ///
    /// The filter takes ownership so that it can work in place.
    fn filt(&self, raw: Observation) -> Observation;

    /// Returns default configuration.
    fn default_config() -> Self::Config {
        Self::Config::default()
    }
}

/// Configuration of [`RawObsFilter`].
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RawObsFilterConfig;

/// A filter without any processing.
#[derive(Clone, Debug, Default)]
pub struct RawObsFilter;

impl ObsFilter for RawObsFilter {
    type Config = RawObsFilterConfig;

    fn build(_config: &Self::Config) -> Result<Self> {
        Ok(Self)
    }

    fn filt(&self, raw: Observation) -> Observation {
        raw
    }
}
