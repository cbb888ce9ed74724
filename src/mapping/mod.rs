//! Mapping records - the stored form of a key's destination.
//!
//! A record holds exactly one of:
//!
//! | Kind     | Fields                          | Resolves to              |
//! |----------|---------------------------------|--------------------------|
//! | `Direct` | `url`                           | the URL verbatim         |
//! | `Object` | `content_type`, `object_id`     | the object's canonical URL |
//! | `Route`  | `route_name`, `route_params`    | the reversed route       |
//!
//! Validation happens on write; reads never fail and degrade to `""`.

mod error;
mod kind;
mod record;

pub use error::ValidationError;
pub use kind::{MappingKind, ParseKindError};
pub use record::{Mapping, MappingRecord, ResolveEnv};
