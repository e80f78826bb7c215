//! `/directory` REST endpoints.

use std::collections::BTreeSet;

use axum::{
    extract::{rejection::QueryRejection, Query},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use service::{
    domain, query,
    read::record::list::{Controls, Order, SortKey},
    Query as _,
};
use tracing as log;

use crate::{define_error, AsError, Error, Service};

/// Entry of the users directory.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Record {
    /// ID of this [`Record`].
    pub id: String,

    /// First name of this [`Record`].
    pub first_name: String,

    /// Last name of this [`Record`].
    pub last_name: String,

    /// Email address of this [`Record`].
    pub email: String,

    /// Avatar URL of this [`Record`].
    pub avatar: String,
}

impl From<domain::Record> for Record {
    fn from(record: domain::Record) -> Self {
        let domain::Record {
            id,
            first_name,
            last_name,
            email,
            avatar,
        } = record;

        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            avatar: avatar.into(),
        }
    }
}

/// Page of [`Record`]s.
pub type Page = common::Page<Record>;

/// Query parameters of listing [`Record`]s.
///
/// Absent parameters take the defaults of [`Controls`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Text to search for in names and email addresses.
    pub search: Option<String>,

    /// [`SortKey`] code.
    pub sort_key: Option<String>,

    /// [`Order`] code.
    pub sort_direction: Option<String>,

    /// Exact email domain, or `all`.
    pub domain: Option<String>,

    /// Letter the first name should start with.
    pub letter: Option<String>,

    /// Requested 1-based page number.
    pub page: Option<i64>,

    /// Maximum number of [`Record`]s on a page.
    pub page_size: Option<i64>,
}

impl TryFrom<Params> for Controls {
    type Error = QueryError;

    fn try_from(params: Params) -> Result<Self, Self::Error> {
        let Params {
            search,
            sort_key,
            sort_direction,
            domain,
            letter,
            page,
            page_size,
        } = params;

        let defaults = Self::default();
        let first_letter = match letter.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(l) => {
                let mut chars = l.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => return Err(QueryError::InvalidLetter),
                }
            }
        };

        Ok(Self {
            search: search.unwrap_or_default(),
            sort_key: sort_key
                .map(|k| k.parse::<SortKey>())
                .transpose()
                .map_err(|_| QueryError::InvalidSortKey)?
                .unwrap_or(defaults.sort_key),
            sort_direction: sort_direction
                .map(|d| d.parse::<Order>())
                .transpose()
                .map_err(|_| QueryError::InvalidSortDirection)?
                .unwrap_or(defaults.sort_direction),
            domain,
            first_letter,
            // Non-positive pages are clamped to the first one.
            page: page.map_or(defaults.page, |p| {
                usize::try_from(p).unwrap_or_default()
            }),
            // Non-positive sizes are rejected by the pipeline.
            page_size: page_size.map_or(defaults.page_size, |s| {
                usize::try_from(s).unwrap_or_default()
            }),
        })
    }
}

/// Lists a [`Page`] of filtered and sorted [`Record`]s.
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_QUERY` - query parameters are malformed;
/// - `INVALID_PAGE_SIZE` - `page_size` is not a positive integer;
/// - `DIRECTORY_LOADING` - [`Record`]s are not fetched yet;
/// - `DIRECTORY_UNAVAILABLE` - fetching [`Record`]s failed.
#[tracing::instrument(skip_all, fields(otel.name = "GET /directory"))]
pub async fn list(
    Extension(service): Extension<Service>,
    params: Result<Query<Params>, QueryRejection>,
) -> Result<Json<Page>, Error> {
    let Query(params) = params.map_err(|e| {
        log::debug!("malformed directory query: {e}");
        QueryError::Malformed.into_error()
    })?;
    let controls = Controls::try_from(params).map_err(AsError::into_error)?;
    log::debug!(?controls, "listing `Record`s");

    let page = service
        .execute(query::records::List(controls))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(page.map(Record::from)))
}

/// Lists sorted distinct email domains of all the [`Record`]s.
///
/// # Errors
///
/// Possible error codes:
/// - `DIRECTORY_LOADING` - [`Record`]s are not fetched yet;
/// - `DIRECTORY_UNAVAILABLE` - fetching [`Record`]s failed.
#[tracing::instrument(skip_all, fields(otel.name = "GET /directory/domains"))]
pub async fn domains(
    Extension(service): Extension<Service>,
) -> Result<Json<BTreeSet<String>>, Error> {
    service
        .execute(query::records::Domains)
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

/// Lists sorted distinct uppercased first letters of the [`Record`]s' first
/// names.
///
/// # Errors
///
/// Possible error codes:
/// - `DIRECTORY_LOADING` - [`Record`]s are not fetched yet;
/// - `DIRECTORY_UNAVAILABLE` - fetching [`Record`]s failed.
#[tracing::instrument(skip_all, fields(otel.name = "GET /directory/letters"))]
pub async fn letters(
    Extension(service): Extension<Service>,
) -> Result<Json<BTreeSet<char>>, Error> {
    service
        .execute(query::records::Letters)
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

define_error! {
    enum QueryError {
        #[code = "INVALID_QUERY"]
        #[status = BAD_REQUEST]
        #[message = "Query parameters are malformed"]
        Malformed,

        #[code = "INVALID_QUERY"]
        #[status = BAD_REQUEST]
        #[message = "`sort_key` must be one of `first_name`, `last_name`, \
                     `email`"]
        InvalidSortKey,

        #[code = "INVALID_QUERY"]
        #[status = BAD_REQUEST]
        #[message = "`sort_direction` must be either `asc` or `desc`"]
        InvalidSortDirection,

        #[code = "INVALID_QUERY"]
        #[status = BAD_REQUEST]
        #[message = "`letter` must be a single character"]
        InvalidLetter,
    }
}

impl AsError for QueryError {
    fn try_as_error(&self) -> Option<Error> {
        Some((*self).into())
    }
}

define_error! {
    enum DirectoryError {
        #[code = "INVALID_PAGE_SIZE"]
        #[status = BAD_REQUEST]
        #[message = "Page size must be a positive integer"]
        InvalidPageSize,

        #[code = "DIRECTORY_LOADING"]
        #[status = SERVICE_UNAVAILABLE]
        #[message = "Directory is still loading"]
        Loading,

        #[code = "DIRECTORY_UNAVAILABLE"]
        #[status = SERVICE_UNAVAILABLE]
        #[message = "Directory is unavailable"]
        Unavailable,
    }
}

impl AsError for query::records::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(
            match self {
                Self::InvalidPageSize(_) => DirectoryError::InvalidPageSize,
                Self::Loading => DirectoryError::Loading,
                Self::Unavailable => DirectoryError::Unavailable,
            }
            .into(),
        )
    }
}

#[cfg(test)]
mod spec {
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use service::domain;

    use crate::{
        api::spec::{app, call},
        Service,
    };

    use super::Page;

    fn record(id: u8, first: &str, last: &str, email: &str) -> domain::Record {
        domain::Record {
            id: id.to_string().into(),
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
            avatar: format!("https://reqres.in/img/faces/{id}-image.jpg").into(),
        }
    }

    async fn seed(service: &Service) {
        service
            .snapshot()
            .replace(vec![
                record(1, "George", "Bluth", "george.bluth@reqres.in"),
                record(2, "Janet", "Weaver", "janet.weaver@reqres.in"),
                record(3, "Emma", "Wong", "emma.wong@example.org"),
                record(4, "Eve", "Holt", "eve.holt@reqres.in"),
                record(5, "Charles", "Morris", "charles.morris"),
            ])
            .await;
    }

    fn ids(page: &Page) -> Vec<&str> {
        page.items.iter().map(|r| r.id.as_str()).collect()
    }

    #[tokio::test]
    async fn reports_loading() {
        let (_dir, _, router) = app();

        let (status, err) =
            call(&router, Method::GET, "/directory", None).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err["code"], "DIRECTORY_LOADING");
    }

    #[tokio::test]
    async fn reports_unavailable() {
        let (_dir, service, router) = app();
        assert!(!service.snapshot().fail().await);

        let (status, err) =
            call(&router, Method::GET, "/directory/domains", None).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err["code"], "DIRECTORY_UNAVAILABLE");
    }

    #[tokio::test]
    async fn lists_first_page_by_default() {
        let (_dir, service, router) = app();
        seed(&service).await;

        let (status, body) =
            call(&router, Method::GET, "/directory", None).await;

        assert_eq!(status, StatusCode::OK);
        let page = serde_json::from_value::<Page>(body).unwrap();
        assert_eq!(ids(&page), ["5", "3", "4", "1", "2"]);
        assert_eq!(page.total_count, 5);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
        assert_eq!(
            serde_json::to_value(&page.items[1]).unwrap(),
            json!({
                "id": "3",
                "first_name": "Emma",
                "last_name": "Wong",
                "email": "emma.wong@example.org",
                "avatar": "https://reqres.in/img/faces/3-image.jpg"
            }),
        );
    }

    #[tokio::test]
    async fn applies_controls() {
        let (_dir, service, router) = app();
        seed(&service).await;

        let (status, body) = call(
            &router,
            Method::GET,
            "/directory?domain=reqres.in&sort_key=last_name\
             &sort_direction=desc&page=7&page_size=2",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let page = serde_json::from_value::<Page>(body).unwrap();
        assert_eq!(ids(&page), ["1"]);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.page, 2);
    }

    #[tokio::test]
    async fn searches_and_filters_by_letter() {
        let (_dir, service, router) = app();
        seed(&service).await;

        let (_, body) = call(
            &router,
            Method::GET,
            "/directory?search=W&letter=e",
            None,
        )
        .await;

        let page = serde_json::from_value::<Page>(body).unwrap();
        assert_eq!(ids(&page), ["3"]);
    }

    #[tokio::test]
    async fn rejects_non_positive_page_size() {
        let (_dir, service, router) = app();
        seed(&service).await;

        for uri in ["/directory?page_size=0", "/directory?page_size=-3"] {
            let (status, err) = call(&router, Method::GET, uri, None).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(err["code"], "INVALID_PAGE_SIZE", "{uri}");
        }
    }

    #[tokio::test]
    async fn rejects_malformed_query() {
        let (_dir, service, router) = app();
        seed(&service).await;

        for uri in [
            "/directory?page=two",
            "/directory?sort_key=age",
            "/directory?sort_direction=up",
            "/directory?letter=ab",
        ] {
            let (status, err) = call(&router, Method::GET, uri, None).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(err["code"], "INVALID_QUERY", "{uri}");
        }
    }

    #[tokio::test]
    async fn lists_domains_and_letters() {
        let (_dir, service, router) = app();
        seed(&service).await;

        let (_, domains) =
            call(&router, Method::GET, "/directory/domains", None).await;
        let (_, letters) =
            call(&router, Method::GET, "/directory/letters", None).await;

        assert_eq!(domains, json!(["example.org", "reqres.in"]));
        assert_eq!(letters, json!(["C", "E", "G", "J"]));
    }
}
