//! Browser automation layer
//!
//! `PageSource`/`PageAccessor` are the only surface the search pipeline
//! sees; `BrowserManager` and `ChromiumPage` back them with chromiumoxide.

pub mod accessor;
pub mod manager;
pub mod page;
pub mod setup;
pub mod timeout;

pub use accessor::{Located, PageAccessor, PageError, PageSource, WaitMode};
pub use manager::BrowserManager;
pub use page::ChromiumPage;
pub use setup::{LaunchOptions, find_browser_executable, launch_browser};
pub use timeout::with_page_timeout;
