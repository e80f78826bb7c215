//! [`reqres.in`]-compatible HTTP [`Directory`] implementation.
//!
//! [`reqres.in`]: https://reqres.in

use std::time::Duration;

use common::operations::{By, Select};
use derive_more::{Display, Error as StdError, From};
use futures::future;
use reqwest::Client;
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{record, Record},
    infra::{directory, Directory},
};

/// Name of the HTTP header carrying [`Config::api_key`].
pub const API_KEY_HEADER: &str = "x-api-key";

/// [`Reqres`] configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Base URL of the upstream API, without a trailing `/users`.
    #[default("https://reqres.in/api".into())]
    pub base_url: String,

    /// Optional API key sent in the [`API_KEY_HEADER`].
    pub api_key: Option<String>,

    /// Timeout of a single upstream request.
    #[default(Duration::from_secs(10))]
    pub timeout: Duration,
}

/// HTTP client of a [`reqres.in`]-compatible users API.
///
/// [`reqres.in`]: https://reqres.in
#[derive(Clone, Debug)]
pub struct Reqres {
    /// Underlying HTTP client.
    client: Client,

    /// Base URL of the upstream API.
    base_url: String,

    /// Optional API key.
    api_key: Option<String>,
}

impl Reqres {
    /// Creates a new [`Reqres`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the underlying HTTP client fails to initialize.
    pub fn new(config: &Config) -> Result<Self, Traced<directory::Error>> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::Http)
            .map_err(tracerr::from_and_wrap!(=> directory::Error))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    /// Fetches the provided 1-based `page` of users.
    async fn fetch_page(&self, page: usize) -> Result<dto::Page, Traced<Error>> {
        let mut req = self
            .client
            .get(format!("{}/users", self.base_url))
            .query(&[("page", page)]);
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key);
        }

        req.send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(tracerr::from_and_wrap!(=> Error))?
            .json::<dto::Page>()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
    }
}

impl Directory<Select<By<Vec<Record>, ()>>> for Reqres {
    type Ok = Vec<Record>;
    type Err = Traced<directory::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Record>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let first = self
            .fetch_page(1)
            .await
            .map_err(tracerr::map_from_and_wrap!())?;
        let total_pages = first.total_pages.unwrap_or(1);

        let rest = future::try_join_all(
            (2..=total_pages).map(|page| self.fetch_page(page)),
        )
        .await
        .map_err(tracerr::map_from_and_wrap!())?;

        let records = dto::records(std::iter::once(first).chain(rest));
        log::debug!(
            "fetched {} `Record`s from {total_pages} page(s) of `{}`",
            records.len(),
            self.base_url,
        );
        Ok(records)
    }
}

/// [`Reqres`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// HTTP request failed, returned a non-success status or a malformed
    /// body.
    #[display("HTTP request failed: {_0}")]
    Http(reqwest::Error),
}

mod dto {
    //! Upstream wire schema and its adapter to [`Record`]s.

    use serde::Deserialize;
    use serde_json::Value;
    use tracing as log;

    use super::{record, Record};

    /// Single page of the upstream users list.
    #[derive(Debug, Deserialize)]
    pub(super) struct Page {
        /// Total number of pages, if reported.
        #[serde(default)]
        pub(super) total_pages: Option<usize>,

        /// Raw users of this [`Page`].
        #[serde(default)]
        pub(super) data: Option<Vec<Value>>,
    }

    /// Upstream user.
    #[derive(Debug, Deserialize)]
    pub(super) struct User {
        /// ID of this [`User`].
        id: UserId,

        /// First name of this [`User`].
        first_name: String,

        /// Last name of this [`User`].
        last_name: String,

        /// Email address of this [`User`].
        email: String,

        /// Avatar URL of this [`User`].
        #[serde(default)]
        avatar: String,
    }

    /// Upstream ID of a [`User`], either numeric or textual.
    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    enum UserId {
        Number(serde_json::Number),
        Text(String),
    }

    impl From<User> for Record {
        fn from(user: User) -> Self {
            let User {
                id,
                first_name,
                last_name,
                email,
                avatar,
            } = user;

            Self {
                id: match id {
                    UserId::Number(n) => n.to_string().into(),
                    UserId::Text(s) => s.into(),
                },
                first_name: first_name.into(),
                last_name: last_name.into(),
                email: email.into(),
                avatar: record::AvatarUrl::from(avatar),
            }
        }
    }

    /// Concatenates the users of all the provided `pages` into [`Record`]s,
    /// skipping the malformed ones.
    pub(super) fn records(pages: impl IntoIterator<Item = Page>) -> Vec<Record> {
        pages
            .into_iter()
            .flat_map(|p| p.data.unwrap_or_default())
            .filter_map(|raw| {
                serde_json::from_value::<User>(raw.clone())
                    .map(Record::from)
                    .map_err(|e| {
                        log::warn!("skipping malformed upstream user {raw}: {e}");
                    })
                    .ok()
            })
            .collect()
    }
}
