//! JSON file [`Database`] implementation.
//!
//! The whole collection of [`Todo`]s lives in a single pretty-printed JSON
//! array. Every mutation reads the file, modifies the collection and writes
//! it back, so the last successful write wins.

use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use common::operations::{By, Delete, Insert, Select, Update};
use derive_more::{Display, Error as StdError, From};
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::Mutex};
use tracerr::Traced;
use uuid::Uuid;

use crate::{
    domain::{todo, Todo},
    infra::{database, Database},
};

/// JSON file [`Database`] client.
#[derive(Clone, Debug)]
pub struct JsonFile {
    /// Path to the JSON file.
    path: PathBuf,

    /// Guard serializing read-modify-write cycles of this process.
    lock: Arc<Mutex<()>>,
}

impl JsonFile {
    /// Creates a new [`JsonFile`] client storing data at the provided `path`.
    ///
    /// The file (and its parent directories) is created lazily, on the first
    /// access.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the path to the JSON file of this [`JsonFile`].
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all the [`Todo`]s from the file, initializing it with an empty
    /// collection if it doesn't exist.
    async fn load(&self) -> Result<Vec<Todo>, Traced<Error>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.save(&[]).await.map_err(tracerr::wrap!())?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(tracerr::new!(Error::Io(e))),
        };

        serde_json::from_slice::<Vec<Row>>(&bytes)
            .map_err(tracerr::from_and_wrap!(=> Error))?
            .into_iter()
            .map(Todo::try_from)
            .collect::<Result<_, _>>()
            .map_err(tracerr::wrap!())
    }

    /// Writes all the provided [`Todo`]s to the file, replacing its content.
    async fn save(&self, todos: &[Todo]) -> Result<(), Traced<Error>> {
        if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty())
        {
            fs::create_dir_all(dir)
                .await
                .map_err(tracerr::from_and_wrap!(=> Error))?;
        }

        let rows = todos.iter().map(Row::from).collect::<Vec<_>>();
        let json = serde_json::to_vec_pretty(&rows)
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        fs::write(&self.path, json)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
    }
}

impl Database<Select<By<Vec<Todo>, ()>>> for JsonFile {
    type Ok = Vec<Todo>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Todo>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let _guard = self.lock.lock().await;
        self.load().await.map_err(tracerr::map_from_and_wrap!())
    }
}

impl Database<Select<By<Option<Todo>, todo::Id>>> for JsonFile {
    type Ok = Option<Todo>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Todo>, todo::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let _guard = self.lock.lock().await;
        Ok(self
            .load()
            .await
            .map_err(tracerr::map_from_and_wrap!())?
            .into_iter()
            .find(|t| t.id == id))
    }
}

impl Database<Insert<Todo>> for JsonFile {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(todo): Insert<Todo>,
    ) -> Result<Self::Ok, Self::Err> {
        let _guard = self.lock.lock().await;
        let mut todos =
            self.load().await.map_err(tracerr::map_from_and_wrap!())?;
        todos.push(todo);
        self.save(&todos)
            .await
            .map_err(tracerr::map_from_and_wrap!())
    }
}

impl Database<Update<Todo>> for JsonFile {
    /// Indicator whether the [`Todo`] existed and was updated.
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(todo): Update<Todo>,
    ) -> Result<Self::Ok, Self::Err> {
        let _guard = self.lock.lock().await;
        let mut todos =
            self.load().await.map_err(tracerr::map_from_and_wrap!())?;
        let Some(existing) = todos.iter_mut().find(|t| t.id == todo.id) else {
            return Ok(false);
        };
        *existing = todo;
        self.save(&todos)
            .await
            .map_err(tracerr::map_from_and_wrap!())
            .map(|()| true)
    }
}

impl Database<Delete<By<Todo, todo::Id>>> for JsonFile {
    /// Indicator whether the [`Todo`] existed and was deleted.
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Todo, todo::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let _guard = self.lock.lock().await;
        let mut todos =
            self.load().await.map_err(tracerr::map_from_and_wrap!())?;
        let Some(index) = todos.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        drop(todos.remove(index));
        self.save(&todos)
            .await
            .map_err(tracerr::map_from_and_wrap!())
            .map(|()| true)
    }
}

/// Stored representation of a [`Todo`].
#[derive(Debug, Deserialize, Serialize)]
struct Row {
    /// [`todo::Id`] of the [`Todo`].
    id: Uuid,

    /// [`todo::Title`] of the [`Todo`].
    title: String,

    /// Indicator whether the [`Todo`] is completed.
    #[serde(default)]
    completed: bool,
}

impl From<&Todo> for Row {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.into(),
            title: todo.title.to_string(),
            completed: todo.completed,
        }
    }
}

impl TryFrom<Row> for Todo {
    type Error = Traced<Error>;

    fn try_from(row: Row) -> Result<Self, Self::Error> {
        let Row {
            id,
            title,
            completed,
        } = row;

        Ok(Self {
            id: id.into(),
            title: todo::Title::new(&title)
                .ok_or_else(|| tracerr::new!(Error::MalformedTitle(id)))?,
            completed,
        })
    }
}

/// [`JsonFile`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// I/O error on the JSON file.
    #[display("I/O error: {_0}")]
    Io(io::Error),

    /// JSON file content is not a valid collection of [`Todo`]s.
    #[display("invalid JSON: {_0}")]
    Json(serde_json::Error),

    /// Stored [`Todo`] has an invalid [`todo::Title`].
    #[display("`Todo(id: {_0})` has invalid title")]
    #[from(ignore)]
    MalformedTitle(#[error(not(source))] Uuid),
}
