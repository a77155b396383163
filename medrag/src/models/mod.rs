//! Shared value types used across recognition, scoring and session memory.

mod tiers;

pub use tiers::*;
