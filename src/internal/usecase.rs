use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use crate::internal::models::MostPopularResponse;
use crate::internal::repository::NewsRepository;

/// Execution contexts handed to components that move work off the caller.
#[derive(Clone, Debug)]
pub struct Dispatchers {
    /// Context for network I/O.
    pub io: Handle,
}

impl Dispatchers {
    /// Dispatchers bound to the runtime of the calling task.
    ///
    /// Panics when called outside a tokio runtime.
    pub fn current() -> Self {
        Self {
            io: Handle::current(),
        }
    }
}

/// Fetch the most popular articles on the io context.
#[derive(Clone)]
pub struct GetPopularNews {
    repository: Arc<dyn NewsRepository>,
    dispatchers: Dispatchers,
}

impl GetPopularNews {
    pub fn new(repository: Arc<dyn NewsRepository>, dispatchers: Dispatchers) -> Self {
        Self {
            repository,
            dispatchers,
        }
    }

    /// Dropping the returned future cancels the background fetch.
    pub async fn invoke(&self, days_period: u32) -> Result<MostPopularResponse> {
        let repository = Arc::clone(&self.repository);
        let handle = self
            .dispatchers
            .io
            .spawn(async move { repository.popular_news(days_period).await });
        let _guard = AbortOnDrop(handle.abort_handle());

        handle.await.context("background fetch task failed")?
    }
}

/// A dropped `JoinHandle` detaches its task; this aborts it instead.
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}
