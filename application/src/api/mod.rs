//! REST API definitions.

pub mod directory;
pub mod todos;

use axum::{
    routing::{get, put},
    Extension, Router,
};

use crate::Service;

/// Creates a new [`Router`] of the REST API serving the provided
/// [`Service`].
pub fn router(service: Service) -> Router {
    Router::new()
        .route("/todos", get(todos::list).post(todos::create))
        .route("/todos/:id", put(todos::update).delete(todos::delete))
        .route("/directory", get(directory::list))
        .route("/directory/domains", get(directory::domains))
        .route("/directory/letters", get(directory::letters))
        .layer(Extension(service))
}

#[cfg(test)]
pub(crate) mod spec {
    use axum::{
        body::{self, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use service::infra::{JsonFile, Reqres};
    use tempfile::TempDir;
    use tower::ServiceExt as _;

    use crate::Service;

    /// Creates a new [`Router`] over a [`Service`] storing its todos in a
    /// temporary directory and having no directory records fetched yet.
    pub(crate) fn app() -> (TempDir, Service, Router) {
        let dir = tempfile::tempdir().unwrap();
        let (service, _) = Service::new(
            service::Config::default(),
            JsonFile::new(dir.path().join("todos.json")),
            Reqres::new(&Default::default()).unwrap(),
        );
        let router = super::router(service.clone());
        (dir, service, router)
    }

    /// Performs a request to the provided [`Router`], returning the response
    /// status and its JSON body ([`Value::Null`] if empty).
    pub(crate) async fn call(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<&Value>,
    ) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let res = router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn responds_not_found_on_unknown_route() {
        let (_dir, _, router) = app();

        let (status, _) = call(&router, Method::GET, "/unknown", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
