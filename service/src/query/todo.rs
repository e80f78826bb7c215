//! [`Query`] collection related to a single [`Todo`].

use common::operations::By;

use crate::domain::{todo, Todo};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Todo`] by its [`todo::Id`].
pub type ById = DatabaseQuery<By<Option<Todo>, todo::Id>>;
