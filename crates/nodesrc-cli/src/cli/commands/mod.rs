//! CLI command handlers, one per file.

mod completions;
mod download;
mod extract;
mod fetch;
mod url;

pub use completions::run_completions;
pub use download::run_download;
pub use extract::run_extract;
pub use fetch::run_fetch;
pub use url::run_url;
