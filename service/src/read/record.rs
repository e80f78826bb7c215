//! [`Record`] read model definitions.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::Record;

pub mod list {
    //! [`Record`]s list definitions.

    use common::{define_kind, pagination};
    use smart_default::SmartDefault;

    use crate::domain::Record;

    pub use common::pagination::{InvalidPageSize, Order};

    /// Page of [`Record`]s.
    pub type Page = pagination::Page<Record>;

    define_kind! {
        #[doc = "Field of a `Record` to sort by."]
        enum SortKey {
            #[doc = "Sort by the first name."]
            #[code = "first_name"]
            FirstName,

            #[doc = "Sort by the last name."]
            #[code = "last_name"]
            LastName,

            #[doc = "Sort by the email address."]
            #[code = "email"]
            Email,
        }
    }

    impl Default for SortKey {
        fn default() -> Self {
            Self::FirstName
        }
    }

    impl SortKey {
        /// Returns the field of the provided [`Record`] this [`SortKey`]
        /// points to.
        #[must_use]
        pub fn field(self, record: &Record) -> &str {
            match self {
                Self::FirstName => record.first_name.as_ref(),
                Self::LastName => record.last_name.as_ref(),
                Self::Email => record.email.as_ref(),
            }
        }
    }

    /// Parameters of listing [`Record`]s: filtering, sorting and
    /// pagination.
    #[derive(Clone, Debug, Eq, PartialEq, SmartDefault)]
    pub struct Controls {
        /// Text to search for in names and email addresses.
        ///
        /// Ignored if blank.
        pub search: String,

        /// [`SortKey`] to sort by.
        pub sort_key: SortKey,

        /// [`Order`] to sort in.
        pub sort_direction: Order,

        /// Exact email domain to keep.
        ///
        /// Ignored if empty or equal to [`Controls::ALL_DOMAINS`].
        pub domain: Option<String>,

        /// Letter the first name should start with (case-insensitive).
        pub first_letter: Option<char>,

        /// Requested 1-based page number.
        #[default(1)]
        pub page: usize,

        /// Maximum number of [`Record`]s on a page.
        #[default(Controls::DEFAULT_PAGE_SIZE)]
        pub page_size: usize,
    }

    impl Controls {
        /// Page size used when none is requested.
        pub const DEFAULT_PAGE_SIZE: usize = 6;

        /// [`Controls::domain`] value disabling the domain filter.
        pub const ALL_DOMAINS: &'static str = "all";

        /// Returns the lowercased search text, if the search is active.
        #[must_use]
        pub fn search_text(&self) -> Option<String> {
            (!self.search.trim().is_empty()).then(|| self.search.to_lowercase())
        }

        /// Returns the domain to filter by, if the domain filter is active.
        #[must_use]
        pub fn domain_filter(&self) -> Option<&str> {
            self.domain
                .as_deref()
                .filter(|d| !d.is_empty() && *d != Self::ALL_DOMAINS)
        }
    }
}

/// Materialized collection of [`Record`]s, shared between the queries and
/// the refreshes of a [`Directory`].
///
/// A refresh swaps the whole collection at once: readers holding a previous
/// collection keep it intact.
///
/// [`Directory`]: crate::infra::Directory
#[derive(Clone, Debug, Default)]
pub struct Snapshot(Arc<RwLock<State>>);

/// [`State`] of a [`Snapshot`].
#[derive(Clone, Debug, Default)]
pub enum State {
    /// No fetch has completed yet.
    #[default]
    Loading,

    /// [`Record`]s are loaded.
    Ready(Arc<[Record]>),

    /// Fetching failed and there is nothing to serve.
    Unavailable,
}

impl Snapshot {
    /// Returns the current [`State`] of this [`Snapshot`].
    pub async fn state(&self) -> State {
        self.0.read().await.clone()
    }

    /// Replaces all the [`Record`]s of this [`Snapshot`].
    pub async fn replace(&self, records: impl Into<Arc<[Record]>>) {
        *self.0.write().await = State::Ready(records.into());
    }

    /// Marks this [`Snapshot`] as [`State::Unavailable`], unless it already
    /// holds [`Record`]s.
    ///
    /// Returns `true` if stale [`Record`]s were kept.
    pub async fn fail(&self) -> bool {
        let mut state = self.0.write().await;
        if matches!(*state, State::Ready(_)) {
            return true;
        }
        *state = State::Unavailable;
        false
    }
}
