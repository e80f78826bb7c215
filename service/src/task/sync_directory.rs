//! [`SyncDirectory`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::operations::{By, Perform, Start};
use smart_default::SmartDefault;
use tokio::time::interval;
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Record;
use crate::{
    command::{refresh_directory, Command, RefreshDirectory},
    Service,
};

use super::Task;

/// Configuration for [`SyncDirectory`] [`Task`].
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Interval between [`Record`]s refreshes.
    ///
    /// Zero means fetching [`Record`]s only once.
    #[default(time::Duration::from_secs(60 * 60))]
    pub interval: time::Duration,
}

/// [`Task`] keeping the directory [`Record`]s in sync with the upstream.
#[derive(Clone, Copy, Debug)]
pub struct SyncDirectory<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<Db, Dir> Task<Start<By<SyncDirectory<Self>, Config>>> for Service<Db, Dir>
where
    SyncDirectory<Service<Db, Dir>>: Task<Perform<()>, Ok = (), Err: Error>,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<SyncDirectory<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = SyncDirectory {
            config,
            service: self.clone(),
        };

        if task.config.interval.is_zero() {
            _ = task.execute(Perform(())).await.map_err(|e| {
                log::error!("`task::SyncDirectory` failed: {e}");
            });
            return Ok(());
        }

        let mut interval = interval(task.config.interval);
        loop {
            let _ = interval.tick().await;
            _ = task.execute(Perform(())).await.map_err(|e| {
                log::error!("`task::SyncDirectory` failed: {e}");
            });
        }
    }
}

impl<Db, Dir> Task<Perform<()>> for SyncDirectory<Service<Db, Dir>>
where
    Service<Db, Dir>: Command<
        RefreshDirectory,
        Ok = usize,
        Err = Traced<refresh_directory::ExecutionError>,
    >,
{
    type Ok = ();
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let count = self
            .service
            .execute(RefreshDirectory)
            .await
            .map_err(tracerr::wrap!())?;
        log::info!("`task::SyncDirectory` fetched {count} `Record`s");
        Ok(())
    }
}

/// Error of [`SyncDirectory`] execution.
pub type ExecutionError = Traced<refresh_directory::ExecutionError>;
