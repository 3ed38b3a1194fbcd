//! Search providers
//!
//! A provider is a [`ProviderProfile`] (pure data) run through the single
//! [`SearchProvider`] state machine.

pub mod errors;
pub mod profile;
pub mod search;
pub mod types;

pub use errors::SearchError;
pub use profile::{PROFILE_VERSION, ProviderKind, ProviderProfile, RedirectRule};
pub use search::{Observers, ProviderTimings, SearchProvider};
pub use types::{ProviderOutcome, SearchStage};
