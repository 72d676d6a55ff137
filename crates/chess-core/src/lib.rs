//! Chess domain logic shared by the prediction server and its tooling.

pub mod features;
pub mod outcome;

pub use features::{extract_features, FeatureError, FeatureVector, NUM_FEATURES, NUM_SQUARES};
pub use outcome::Outcome;
