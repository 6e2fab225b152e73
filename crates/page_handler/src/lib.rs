//! Page handling for the unused-CSS tool.
//!
//! This crate fetches pages and stylesheets (over HTTP, from disk, or through a
//! headless browser), runs the filtering and consolidation passes of the `css`
//! crate on them, and optionally uploads the results to a CDN.

pub mod cdn;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod report;
/// Fetching of `http`, `https` and `file` URLs
pub mod url;

pub use cdn::{CdnClient, CdnUpload, RemoteFailure};
pub use config::PipelineOptions;
pub use error::PipelineError;
pub use pipeline::{Job, Source, consolidate_urls};
pub use report::StylesheetReport;
