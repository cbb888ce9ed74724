//! Core types - pure abstractions shared across the codebase.

mod context;
mod url;

pub use context::ResolveContext;
pub use url::{UrlPath, encode_path, encode_segment};

/// Boxed error used at collaborator seams (bound functions, host adapters).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
