pub mod constants;
pub mod text;
pub mod url_utils;

pub use constants::*;
pub use text::{collapse_whitespace, preview, truncate_chars};
pub use url_utils::{is_valid_url, resolve_href, unwrap_redirect_param};
