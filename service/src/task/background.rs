//! Background environment for running [`Task`]s.

use std::{
    error::Error,
    future::{Future, IntoFuture},
};

use derive_more::Debug;
use futures::{
    future::{self, LocalBoxFuture},
    FutureExt as _, TryFutureExt as _,
};

#[cfg(doc)]
use crate::Task;

/// Background environment for running [`Task`]s.
///
/// Spawned [`Task`]s make no progress until the [`Background`] itself is
/// awaited, and then run concurrently on the awaiting task.
#[derive(Debug, Default)]
pub struct Background {
    /// Spawned tasks.
    #[debug(skip)]
    tasks: Vec<LocalBoxFuture<'static, Result<(), Box<dyn Error>>>>,
}

impl Background {
    /// Spawns a new [`Task`] inside the [`Background`] environment.
    pub fn spawn<F, E>(&mut self, future: F)
    where
        F: Future<Output = Result<(), E>> + 'static,
        E: Error + 'static,
    {
        self.tasks.push(
            future
                .map_err(|e| Box::<dyn Error + 'static>::from(Box::new(e)))
                .boxed_local(),
        );
    }
}

impl IntoFuture for Background {
    type Output = Result<(), Box<dyn Error>>;
    type IntoFuture = LocalBoxFuture<'static, Self::Output>;

    /// Runs all the spawned [`Task`]s until every one completes or any of
    /// them fails.
    fn into_future(self) -> Self::IntoFuture {
        future::try_join_all(self.tasks).map_ok(drop).boxed_local()
    }
}
