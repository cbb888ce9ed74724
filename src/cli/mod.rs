//! Command-line interface module.
//!
//! | Module     | Commands                         |
//! |------------|----------------------------------|
//! | `init`     | `init`                           |
//! | `query`    | `resolve`, `check`, `render`, `keys`, `list` |
//! | `edit`     | `set`, `remove`                  |
//! | `validate` | `validate`                       |

mod args;
pub mod edit;
pub mod init;
pub mod query;
pub mod validate;

pub use args::{Cli, Commands, ContextArgs, SetArgs};
