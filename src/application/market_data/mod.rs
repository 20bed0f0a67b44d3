pub mod feature_builder;
pub mod scaler;

pub use feature_builder::{MIN_HISTORY, SMA_WINDOW, build_features};
pub use scaler::{StandardScaler, scale};
