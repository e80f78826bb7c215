//! Infrastructure layer.

pub mod database;
pub mod directory;

pub use self::{database::Database, directory::Directory};
#[cfg(feature = "json-file")]
pub use self::database::{json_file, JsonFile};
#[cfg(feature = "reqres")]
pub use self::directory::{reqres, Reqres};
