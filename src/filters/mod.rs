//! Multi-criteria filtering of conversation entries.
//!
//! All present criteria are AND'd; see [`SearchCriteria`](crate::models::SearchCriteria).

pub mod apply;

pub use apply::{CompiledCriteria, apply_criteria};
