//! [`Command`] for updating a [`Todo`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{todo, Todo},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`Todo`].
///
/// Fields set to [`None`] are left untouched.
#[derive(Clone, Debug)]
pub struct UpdateTodo {
    /// ID of the [`Todo`] to be updated.
    pub id: todo::Id,

    /// New [`todo::Title`] of the [`Todo`].
    pub title: Option<todo::Title>,

    /// New completion status of the [`Todo`].
    pub completed: Option<bool>,
}

impl<Db, Dir> Command<UpdateTodo> for Service<Db, Dir>
where
    Db: Database<
            Select<By<Option<Todo>, todo::Id>>,
            Ok = Option<Todo>,
            Err = Traced<database::Error>,
        > + Database<Update<Todo>, Ok = bool, Err = Traced<database::Error>>,
{
    type Ok = Todo;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateTodo) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateTodo {
            id,
            title,
            completed,
        } = cmd;

        let mut todo = self
            .database()
            .execute(Select(By::<Option<Todo>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::TodoNotExists(id))
            .map_err(tracerr::wrap!())?;

        let before = todo.clone();
        if let Some(title) = title {
            todo.title = title;
        }
        if let Some(completed) = completed {
            todo.completed = completed;
        }
        if todo == before {
            return Ok(todo);
        }

        let updated = self
            .database()
            .execute(Update(todo.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !updated {
            // Removed between reading and writing.
            return Err(tracerr::new!(E::TodoNotExists(id)));
        }

        Ok(todo)
    }
}

/// Error of [`UpdateTodo`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Todo`] doesn't exist.
    #[display("`Todo(id: {_0})` does not exist")]
    #[from(ignore)]
    TodoNotExists(#[error(not(source))] todo::Id),
}
