//! [`Query`] collection related to the multiple [`Todo`]s.

use common::operations::By;

use crate::domain::Todo;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Todo`]s in their insertion order.
pub type List = DatabaseQuery<By<Vec<Todo>, ()>>;
