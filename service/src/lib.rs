//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod pipeline;
pub mod query;
pub mod read;
pub mod task;

use common::operations::{By, Start};
use derive_more::Debug;

#[cfg(doc)]
use self::infra::{Database, Directory};

pub use self::{command::Command, query::Query, read::Snapshot, task::Task};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    /// [`task::SyncDirectory`] configuration.
    pub sync_directory: task::sync_directory::Config,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db, Dir> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,

    /// [`Directory`] of this [`Service`].
    directory: Dir,

    /// [`Snapshot`] of the [`Directory`] records.
    snapshot: Snapshot,
}

impl<Db, Dir> Service<Db, Dir> {
    /// Creates a new [`Service`] with the provided parameters.
    ///
    /// The returned [`task::Background`] should be awaited to keep the
    /// [`Snapshot`] in sync with the [`Directory`].
    pub fn new(
        config: Config,
        database: Db,
        directory: Dir,
    ) -> (Self, task::Background)
    where
        Self: Task<
                Start<
                    By<
                        task::SyncDirectory<Self>,
                        task::sync_directory::Config,
                    >,
                >,
                Ok = (),
                Err: std::error::Error,
            > + Clone
            + 'static,
    {
        let this = Service {
            config,
            database,
            directory,
            snapshot: Snapshot::default(),
        };

        let mut bg = task::Background::default();
        let svc = this.clone();
        bg.spawn(async move {
            svc.execute(Start(By::new(svc.config().sync_directory)))
                .await
        });

        (this, bg)
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns [`Directory`] of this [`Service`].
    #[must_use]
    pub fn directory(&self) -> &Dir {
        &self.directory
    }

    /// Returns [`Snapshot`] of the [`Directory`] records.
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}
