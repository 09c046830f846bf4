//! Tribunal caseload statistics: an immutable dataset catalog plus the pure
//! aggregation functions the dashboard pages are drawn from.

pub mod config;
pub mod data;
pub mod export;
