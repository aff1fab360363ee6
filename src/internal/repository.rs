use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::api::ApiService;
use crate::internal::models::MostPopularResponse;

/// Source of "most popular" articles.
#[async_trait]
pub trait NewsRepository: Send + Sync {
    async fn popular_news(&self, days_period: u32) -> Result<MostPopularResponse>;
}

/// Repository backed directly by the remote API. No caching.
#[derive(Clone)]
pub struct RemoteNewsRepository {
    api: Arc<ApiService>,
}

impl RemoteNewsRepository {
    pub fn new(api: Arc<ApiService>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl NewsRepository for RemoteNewsRepository {
    async fn popular_news(&self, days_period: u32) -> Result<MostPopularResponse> {
        self.api.fetch_most_popular(days_period).await
    }
}
