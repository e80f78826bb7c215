//! [`Command`] for deleting a [`Todo`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{todo, Todo},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Todo`].
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteTodo {
    /// ID of the [`Todo`] to be deleted.
    pub id: todo::Id,
}

impl<Db, Dir> Command<DeleteTodo> for Service<Db, Dir>
where
    Db: Database<
        Delete<By<Todo, todo::Id>>,
        Ok = bool,
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteTodo) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteTodo { id } = cmd;

        let deleted = self
            .database()
            .execute(Delete(By::<Todo, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        deleted
            .then_some(())
            .ok_or(E::TodoNotExists(id))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`DeleteTodo`] [`Command`] execution.
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
