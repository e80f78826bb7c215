//! [`Todo`] definitions.

use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Item of the todo list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Todo {
    /// ID of this [`Todo`].
    pub id: Id,

    /// [`Title`] of this [`Todo`].
    pub title: Title,

    /// Indicator whether this [`Todo`] is completed.
    pub completed: bool,
}

/// ID of a [`Todo`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

/// Title of a [`Todo`].
#[derive(AsRef, Clone, Debug, Display, Eq, Into, PartialEq)]
#[as_ref(str, String)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`] out of the given `title` with surrounding
    /// whitespace trimmed, unless nothing remains.
    #[must_use]
    pub fn new(title: impl AsRef<str>) -> Option<Self> {
        let title = title.as_ref().trim();
        (!title.is_empty()).then(|| Self(title.to_owned()))
    }
}

impl std::str::FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

#[cfg(test)]
mod spec {
    use super::{Id, Title};

    #[test]
    fn trims_title() {
        assert_eq!(
            Title::new("  buy milk \n").map(|t| t.to_string()),
            Some("buy milk".to_owned()),
        );
    }

    #[test]
    fn rejects_blank_title() {
        assert!(Title::new("").is_none());
        assert!(Title::new("   ").is_none());
        assert!("\t".parse::<Title>().is_err());
    }

    #[test]
    fn accepts_long_title() {
        let title = "a".repeat(600);

        assert_eq!(Title::new(&title).map(String::from), Some(title));
    }

    #[test]
    fn parses_id() {
        let id = Id::new();

        assert_eq!(id.to_string().parse::<Id>().ok(), Some(id));
        assert!("1697040000000".parse::<Id>().is_err());
    }
}
