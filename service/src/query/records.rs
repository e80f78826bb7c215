//! [`Query`] collection related to the directory [`Record`]s.

use std::{collections::BTreeSet, sync::Arc};

use derive_more::{Display, Error, From};

use crate::{
    domain::Record,
    pipeline,
    read::record::{
        list::{Controls, InvalidPageSize, Page},
        Snapshot, State,
    },
    Service,
};

use super::Query;

/// Queries a [`Page`] of [`Record`]s, filtered and sorted according to the
/// provided [`Controls`].
#[derive(Clone, Debug, Default)]
pub struct List(pub Controls);

/// Queries sorted distinct email domains of all the [`Record`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct Domains;

/// Queries sorted distinct uppercased first letters of the [`Record`]s'
/// first names.
#[derive(Clone, Copy, Debug, Default)]
pub struct Letters;

impl<Db, Dir> Query<List> for Service<Db, Dir> {
    type Ok = Page;
    type Err = ExecutionError;

    async fn execute(
        &self,
        List(controls): List,
    ) -> Result<Self::Ok, Self::Err> {
        let records = ready(self.snapshot()).await?;
        Ok(pipeline::apply(&records, &controls)?.map(Record::clone))
    }
}

impl<Db, Dir> Query<Domains> for Service<Db, Dir> {
    type Ok = BTreeSet<String>;
    type Err = ExecutionError;

    async fn execute(&self, _: Domains) -> Result<Self::Ok, Self::Err> {
        Ok(pipeline::domains_of(&ready(self.snapshot()).await?))
    }
}

impl<Db, Dir> Query<Letters> for Service<Db, Dir> {
    type Ok = BTreeSet<char>;
    type Err = ExecutionError;

    async fn execute(&self, _: Letters) -> Result<Self::Ok, Self::Err> {
        Ok(pipeline::letters_of(&ready(self.snapshot()).await?))
    }
}

/// Returns the [`Record`]s of the provided [`Snapshot`], if they're loaded.
async fn ready(snapshot: &Snapshot) -> Result<Arc<[Record]>, ExecutionError> {
    match snapshot.state().await {
        State::Ready(records) => Ok(records),
        State::Loading => Err(ExecutionError::Loading),
        State::Unavailable => Err(ExecutionError::Unavailable),
    }
}

/// Error of [`Record`]s [`Query`] execution.
#[derive(Clone, Copy, Debug, Display, Eq, Error, From, PartialEq)]
pub enum ExecutionError {
    /// [`Record`]s are not fetched yet.
    #[display("directory is still loading")]
    #[from(ignore)]
    Loading,

    /// Fetching [`Record`]s failed and there are no previously fetched ones.
    #[display("directory is unavailable")]
    #[from(ignore)]
    Unavailable,

    /// Requested page size is invalid.
    #[display("{_0}")]
    InvalidPageSize(InvalidPageSize),
}
