//! Domain definitions.

pub mod record;
pub mod todo;

pub use self::{record::Record, todo::Todo};
