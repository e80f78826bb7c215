//! [`Record`] definitions.

use derive_more::{AsRef, Display, From, Into};

/// Entry of the users directory.
///
/// [`Record`]s are supplied by a [`Directory`] and never mutated afterwards.
///
/// [`Directory`]: crate::infra::Directory
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// ID of this [`Record`].
    pub id: Id,

    /// First [`Name`] of this [`Record`].
    pub first_name: Name,

    /// Last [`Name`] of this [`Record`].
    pub last_name: Name,

    /// [`Email`] of this [`Record`].
    pub email: Email,

    /// [`AvatarUrl`] of this [`Record`].
    pub avatar: AvatarUrl,
}

impl Record {
    /// Returns the full name of this [`Record`] in `first last` form.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Opaque ID of a [`Record`], stable across fetches.
#[derive(AsRef, Clone, Debug, Display, Eq, From, Hash, Into, PartialEq)]
#[as_ref(str)]
#[from(&str, String)]
pub struct Id(String);

/// First or last name of a [`Record`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, Into, PartialEq)]
#[as_ref(str)]
#[from(&str, String)]
pub struct Name(String);

/// Email address of a [`Record`].
///
/// Not validated: an address without `@` is kept as is and simply has no
/// [`Email::domain()`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, Into, PartialEq)]
#[as_ref(str)]
#[from(&str, String)]
pub struct Email(String);

impl Email {
    /// Returns the domain part of this [`Email`] (between the first `@` and
    /// the next one, if any).
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.0
            .split('@')
            .nth(1)
            .filter(|domain| !domain.is_empty())
    }
}

/// URL of a [`Record`]'s avatar image. Never interpreted.
#[derive(AsRef, Clone, Debug, Display, Eq, From, Into, PartialEq)]
#[as_ref(str)]
#[from(&str, String)]
pub struct AvatarUrl(String);
