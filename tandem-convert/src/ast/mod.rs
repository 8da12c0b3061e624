//! Crate-owned tree types for the two document representations.

pub mod html;
pub mod markdown;
