//! `/todos` REST endpoints.

use axum::{body::Bytes, extract::Path, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use service::{command, domain, query, Command as _, Query as _};
use tracing as log;

use crate::{define_error, AsError, Error, Service};

/// Item of the todo list.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Todo {
    /// ID of this [`Todo`].
    pub id: domain::todo::Id,

    /// Title of this [`Todo`].
    pub title: String,

    /// Indicator whether this [`Todo`] is completed.
    pub completed: bool,
}

impl From<domain::Todo> for Todo {
    fn from(todo: domain::Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title.into(),
            completed: todo.completed,
        }
    }
}

/// Body of creating or updating a [`Todo`].
#[derive(Debug, Default, Deserialize)]
struct Input {
    /// Raw title.
    #[serde(default)]
    title: Option<Value>,

    /// Raw completion status.
    #[serde(default)]
    completed: Option<Value>,
}

impl Input {
    /// Parses and validates the provided request `body`.
    ///
    /// An empty `body` is treated as an empty JSON object.
    fn parse(
        body: &[u8],
    ) -> Result<(domain::todo::Title, Option<bool>), RequestError> {
        let Self { title, completed } =
            if body.iter().all(u8::is_ascii_whitespace) {
                Self::default()
            } else {
                let value = serde_json::from_slice::<Value>(body)
                    .map_err(|e| {
                        log::debug!("malformed `Todo` body: {e}");
                        RequestError::InvalidBody
                    })?;
                if !value.is_object() {
                    return Err(RequestError::InvalidBody);
                }
                serde_json::from_value(value)
                    .map_err(|_| RequestError::InvalidBody)?
            };

        let title = title
            .as_ref()
            .and_then(Value::as_str)
            .and_then(domain::todo::Title::new)
            .ok_or(RequestError::TitleRequired)?;
        let completed = completed
            .map(|v| v.as_bool().ok_or(RequestError::CompletedNotBoolean))
            .transpose()?;

        Ok((title, completed))
    }
}

/// Parses the provided path segment as a [`domain::todo::Id`].
///
/// Anything not being a valid ID cannot identify an existing [`Todo`].
fn parse_id(id: &str) -> Result<domain::todo::Id, TodoError> {
    id.parse().map_err(|_| TodoError::NotFound)
}

/// Lists all the [`Todo`]s.
///
/// # Errors
///
/// If the todo store fails.
#[tracing::instrument(skip_all, fields(otel.name = "GET /todos"))]
pub async fn list(
    Extension(service): Extension<Service>,
) -> Result<Json<Vec<Todo>>, Error> {
    let todos = service
        .execute(query::todos::List::by(()))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(todos.into_iter().map(Into::into).collect()))
}

/// Creates a new [`Todo`].
///
/// # Errors
///
/// Possible error codes:
/// - `TITLE_REQUIRED` - title is missing or blank;
/// - `INVALID_BODY` - body is not a JSON object or `completed` is not a
///                    boolean.
#[tracing::instrument(skip_all, fields(otel.name = "POST /todos"))]
pub async fn create(
    Extension(service): Extension<Service>,
    body: Bytes,
) -> Result<(StatusCode, Json<Todo>), Error> {
    let (title, completed) = Input::parse(&body)?;

    let todo = service
        .execute(command::CreateTodo { title, completed })
        .await
        .map_err(AsError::into_error)?;
    log::info!(id = %todo.id, "created `Todo`");

    Ok((StatusCode::CREATED, Json(todo.into())))
}

/// Updates the [`Todo`] with the provided ID.
///
/// # Errors
///
/// Possible error codes:
/// - `TITLE_REQUIRED` - title is missing or blank;
/// - `INVALID_BODY` - body is not a JSON object or `completed` is not a
///                    boolean;
/// - `TODO_NOT_FOUND` - [`Todo`] doesn't exist.
#[tracing::instrument(skip_all, fields(id = %id, otel.name = "PUT /todos/:id"))]
pub async fn update(
    Extension(service): Extension<Service>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Todo>, Error> {
    let (title, completed) = Input::parse(&body)?;
    let id = parse_id(&id)?;

    let todo = service
        .execute(command::UpdateTodo {
            id,
            title: Some(title),
            completed,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(todo.into()))
}

/// Deletes the [`Todo`] with the provided ID.
///
/// # Errors
///
/// Possible error codes:
/// - `TODO_NOT_FOUND` - [`Todo`] doesn't exist.
#[tracing::instrument(skip_all, fields(id = %id, otel.name = "DELETE /todos/:id"))]
pub async fn delete(
    Extension(service): Extension<Service>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    let id = parse_id(&id)?;

    service
        .execute(command::DeleteTodo { id })
        .await
        .map_err(AsError::into_error)?;
    log::info!(%id, "deleted `Todo`");

    Ok(StatusCode::NO_CONTENT)
}

define_error! {
    enum RequestError {
        #[code = "TITLE_REQUIRED"]
        #[status = BAD_REQUEST]
        #[message = "Title is required"]
        TitleRequired,

        #[code = "INVALID_BODY"]
        #[status = BAD_REQUEST]
        #[message = "Body must be a JSON object"]
        InvalidBody,

        #[code = "INVALID_BODY"]
        #[status = BAD_REQUEST]
        #[message = "Completed must be a boolean"]
        CompletedNotBoolean,
    }
}

define_error! {
    enum TodoError {
        #[code = "TODO_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Todo not found"]
        NotFound,
    }
}

impl AsError for command::update_todo::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::TodoNotExists(_) => Some(TodoError::NotFound.into()),
        }
    }
}

impl AsError for command::delete_todo::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::TodoNotExists(_) => Some(TodoError::NotFound.into()),
        }
    }
}
