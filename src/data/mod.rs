//! Data layer: core types, loading, filtering, summaries and chart data.
//!
//! Architecture:
//! ```text
//!   remote .csv (HTTP) / local .csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse rows → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Dataset   │  Vec<Record>, category index (immutable)
//!   └──────────┘
//!        │
//!        ├──────────────────┐
//!        ▼                  ▼
//!   ┌──────────┐      ┌──────────┐
//!   │  summary  │      │  filter   │  selection / [low, high] → indices
//!   └──────────┘      └──────────┘
//!        │                  │
//!        └────────┬─────────┘
//!                 ▼
//!            ┌──────────┐
//!            │  chart    │  labelled x/y series per category
//!            └──────────┘
//! ```

pub mod chart;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
