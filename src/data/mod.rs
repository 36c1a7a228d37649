/// Data layer: loading, role guessing, cleaning, stats, and export.
///
/// Architecture:
/// ```text
///  .csv (path or uploaded bytes)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  roles    │  guess temperature / humidity / time columns
///   └──────────┘
///        │  ColumnSelection (user-confirmed)
///        ▼
///   ┌──────────┐
///   │  frame    │  coerce, convert °F → °C (units), index, drop empty rows
///   └──────────┘
///        │  WorkingFrame
///        ▼
///   ┌──────────────┐
///   │ stats/export  │  mean/min/max, listing, processed CSV
///   └──────────────┘
/// ```

pub mod export;
pub mod frame;
pub mod loader;
pub mod model;
pub mod roles;
pub mod stats;
pub mod timestamp;
pub mod units;
