/// Data layer: core types, loading, and aggregation.
///
/// Architecture:
/// ```text
///   URL / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse → WildfireDataset (month/year derived)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ WildfireDataset  │  Vec<Observation>, year index
///   └─────────────────┘
///        │  (region, year)
///        ▼
///   ┌───────────┐
///   │ aggregate  │  filter → group by month → means
///   └───────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
