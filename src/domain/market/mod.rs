// Daily market observations
pub mod observation;

pub use observation::{Observation, ObservationSeries};
