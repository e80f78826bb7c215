//! [`Database`]-related implementations.

#[cfg(feature = "json-file")]
pub mod json_file;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "json-file")]
pub use self::json_file::JsonFile;

/// Database operation.
pub use common::Handler as Database;

/// [`Database`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "json-file")]
    /// [`JsonFile`] error.
    JsonFile(json_file::Error),
}
