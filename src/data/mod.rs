/// Data layer: embedded tables, the catalog, and the aggregation engine.
///
/// Architecture:
/// ```text
///   records (embedded literals)
///        │
///        ▼
///   ┌──────────┐
///   │ catalog   │  validate once → Catalog (read-only, shared by reference)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────────────────┐
///   │ filter / aggregate / canonical│  pure functions over frames and rows
///   └──────────────────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  views    │  one derived view per dashboard page
///   └──────────┘
/// ```

pub mod aggregate;
pub mod canonical;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod model;
mod records;
pub mod views;

pub use catalog::{Catalog, TableRef};
pub use error::{DataError, DataResult};
pub use model::{Measure, TableKey};
