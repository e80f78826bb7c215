//! [`Command`] for creating a new [`Todo`].

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::{todo, Todo},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Todo`].
#[derive(Clone, Debug)]
pub struct CreateTodo {
    /// [`todo::Title`] of a new [`Todo`].
    pub title: todo::Title,

    /// Indicator whether a new [`Todo`] is completed.
    ///
    /// Defaults to `false`.
    pub completed: Option<bool>,
}

impl<Db, Dir> Command<CreateTodo> for Service<Db, Dir>
where
    Db: Database<Insert<Todo>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Todo;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateTodo) -> Result<Self::Ok, Self::Err> {
        let CreateTodo { title, completed } = cmd;

        let todo = Todo {
            id: todo::Id::new(),
            title,
            completed: completed.unwrap_or_default(),
        };

        self.database()
            .execute(Insert(todo.clone()))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(todo)
    }
}

/// Error of [`CreateTodo`] [`Command`] execution.
pub type ExecutionError = database::Error;
