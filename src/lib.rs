//! urlmapper - map stable symbolic keys to URLs.
//!
//! A key resolves through a bound function when one is registered,
//! otherwise through its stored [`MappingRecord`]: a direct URL, an owning
//! object's canonical URL, or a named route reversed with parameters.
//!
//! ```ignore
//! let mapper = UrlMapperConfig::load(path)?.build()?;
//! let url = mapper.resolve("terms", None)?;
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod logger;
pub mod mapping;
pub mod object;
pub mod registry;
pub mod route;
pub mod store;
pub mod template;

pub use config::UrlMapperConfig;
pub use crate::core::ResolveContext;
pub use engine::{PutError, ResolveError, UrlMapper};
pub use mapping::{MappingKind, MappingRecord, ValidationError};
pub use registry::{FunctionMap, KeyFunction, Registry, RegistrySettings};
pub use store::{JsonFileStore, MappingStore, MemoryStore, StoreError};
