//! [`Directory`]-related implementations.

#[cfg(feature = "reqres")]
pub mod reqres;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "reqres")]
pub use self::reqres::Reqres;

/// Provider of the directory [`Record`]s.
///
/// Implementations fetch all the [`Record`]s at once, following the
/// pagination of the upstream source if there is any.
///
/// [`Record`]: crate::domain::Record
pub use common::Handler as Directory;

/// [`Directory`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "reqres")]
    /// [`Reqres`] error.
    Reqres(reqres::Error),
}
