//! [`Command`] definition.

pub mod create_todo;
pub mod delete_todo;
pub mod refresh_directory;
pub mod update_todo;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_todo::CreateTodo, delete_todo::DeleteTodo,
    refresh_directory::RefreshDirectory, update_todo::UpdateTodo,
};
