//! Search result page parsing
//!
//! Turns raw provider HTML into ordered [`SearchResult`]s and spots
//! anti-bot interstitials before extraction is attempted.

pub mod interstitial;
pub mod results;
pub mod types;

pub use interstitial::detect_interstitial;
pub use results::ResultExtractor;
pub use types::{NO_DESCRIPTION, SearchResult};
