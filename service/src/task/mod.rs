//! Background [`Task`]s definitions.

mod background;
pub mod sync_directory;

pub use common::Handler as Task;

pub use self::{background::Background, sync_directory::SyncDirectory};
