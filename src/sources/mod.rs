//! Search sources
//!
//! Built-in source definitions are embedded in the binary, so users can run
//! `news-crawler crawl lrytas` without a config file. Additional sources (or
//! overrides of the built-in ones) come from the `sources` section of the
//! crawler config.

mod registry;
mod types;

pub use registry::{get_builtin, list_builtin, load_source_from_str, SourceRegistry};
pub use types::{ParamNames, SourceDefinition};
