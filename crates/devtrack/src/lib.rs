//! Progress tracking for hierarchical development indicators: pillars,
//! outputs, indicators and composite sub-indicators measured against
//! quarterly and annual targets.

pub mod catalog;
pub mod config;
pub mod error;
pub mod import;
pub mod progress;
pub mod report;
pub mod telemetry;
