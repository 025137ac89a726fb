mod summary;
pub mod views;

pub use summary::{IndicatorProgress, ProgressReport};
