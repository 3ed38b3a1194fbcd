//! Query pipeline: fallback chain, run model, catalog and cancellation

pub mod cancel;
pub mod catalog;
pub mod chain;
pub mod run;

pub use cancel::CancelToken;
pub use catalog::{CATALOG_RESULT_CAP, CatalogEntry, StaticCatalog};
pub use chain::{CANCELLED_MESSAGE, FallbackChain};
pub use run::{RunSource, RunStatus, ScrapedItem, SearchRun, SearchRunRecord};
