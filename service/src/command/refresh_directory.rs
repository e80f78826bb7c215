//! [`Command`] for refreshing the directory [`Record`]s.

use common::operations::{By, Select};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::read::record::Snapshot;
use crate::{
    domain::Record,
    infra::{directory, Directory},
    Service,
};

use super::Command;

/// [`Command`] for fetching all the [`Record`]s from the [`Directory`] and
/// replacing the [`Snapshot`] with them.
///
/// On failure, the previously fetched [`Record`]s (if any) keep being
/// served. Otherwise, the [`Snapshot`] becomes unavailable.
///
/// Returns the number of fetched [`Record`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct RefreshDirectory;

impl<Db, Dir> Command<RefreshDirectory> for Service<Db, Dir>
where
    Dir: Directory<
        Select<By<Vec<Record>, ()>>,
        Ok = Vec<Record>,
        Err = Traced<directory::Error>,
    >,
{
    type Ok = usize;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: RefreshDirectory) -> Result<Self::Ok, Self::Err> {
        let fetched = self
            .directory()
            .execute(Select(By::<Vec<Record>, _>::new(())))
            .await
            .map_err(tracerr::wrap!());

        match fetched {
            Ok(records) => {
                let count = records.len();
                self.snapshot().replace(records).await;
                Ok(count)
            }
            Err(e) => {
                if self.snapshot().fail().await {
                    log::warn!(
                        "keeping previously fetched `Record`s after refresh \
                         failure: {e}",
                    );
                }
                Err(e)
            }
        }
    }
}

/// Error of [`RefreshDirectory`] [`Command`] execution.
pub type ExecutionError = directory::Error;
