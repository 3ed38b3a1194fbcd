//! Configuration module for search runs
//!
//! `SearchConfig` and its builder, with validation and defaults matching
//! the interactive tool's behaviour.

pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

pub use builder::SearchConfigBuilder;
pub use types::{SearchConfig, SearchMode};
