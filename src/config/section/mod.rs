//! Configuration section definitions.
//!
//! Each module corresponds to a section in `urlmapper.toml`:
//!
//! | Module   | TOML Section   | Purpose                               |
//! |----------|----------------|---------------------------------------|
//! | `mapper` | `[mapper]`     | Known keys and resolution rules       |
//! | `store`  | `[store]`      | Mapping file location                 |
//! | `route`  | `[[routes]]`   | Named routes of the application       |
//! | `object` | `[[objects]]`  | Owning objects per content type       |
//!
//! The `[functions]` table maps keys to [`FunctionSpec`](crate::registry::FunctionSpec)s.

mod mapper;
mod object;
mod route;
mod store;

pub use mapper::MapperConfig;
pub use object::{ObjectConfig, object_registry};
pub use route::{RouteConfig, route_table};
pub use store::StoreConfig;
