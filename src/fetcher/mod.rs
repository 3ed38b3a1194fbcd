//! Per-result page content fetching

pub mod client;
pub mod errors;
pub mod readable;

pub use client::{ContentFetcher, ContentSource, MAX_BODY_BYTES};
pub use errors::FetchError;
pub use readable::extract_readable_text;
