use std::sync::Arc;

use crate::api::ApiService;
use crate::config::AppConfig;
use crate::internal::news_list::NewsListViewModel;
use crate::internal::repository::{NewsRepository, RemoteNewsRepository};
use crate::internal::usecase::{Dispatchers, GetPopularNews};

/// Dependency graph assembled once at start-up and passed down explicitly.
#[derive(Clone)]
pub struct AppContainer {
    pub api_service: Arc<ApiService>,
    pub repository: Arc<dyn NewsRepository>,
    pub dispatchers: Dispatchers,
    pub default_days_period: u32,
}

impl AppContainer {
    /// Must be called from within a tokio runtime.
    pub fn new(config: &AppConfig) -> Self {
        let api_service = Arc::new(ApiService::new(&config.api));
        if config.api.api_key.is_empty() {
            tracing::warn!(
                "No API key configured; set {} or api.api_key in config.ron",
                crate::config::API_KEY_ENV
            );
        }
        let repository: Arc<dyn NewsRepository> =
            Arc::new(RemoteNewsRepository::new(Arc::clone(&api_service)));
        Self::with_repository(repository, api_service, config.api.default_days_period)
    }

    pub fn with_repository(
        repository: Arc<dyn NewsRepository>,
        api_service: Arc<ApiService>,
        default_days_period: u32,
    ) -> Self {
        Self {
            api_service,
            repository,
            dispatchers: Dispatchers::current(),
            default_days_period,
        }
    }

    pub fn get_popular_news(&self) -> GetPopularNews {
        GetPopularNews::new(Arc::clone(&self.repository), self.dispatchers.clone())
    }

    pub fn news_list_view_model(&self) -> NewsListViewModel {
        NewsListViewModel::with_initial_period(
            self.get_popular_news(),
            self.dispatchers.clone(),
            self.default_days_period,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::news_list::NewsUiState;

    #[tokio::test]
    async fn test_container_wires_list_view_model_to_api() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/svc/mostpopular/v2/viewed/30.json")
            .match_query(mockito::Matcher::UrlEncoded("api-key".into(), "k".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"OK","num_results":1,"results":[{"id":3,"title":"Wired"}]}"#)
            .create_async()
            .await;

        let mut config = AppConfig::default();
        config.api.base_url = format!("{}/", server.url());
        config.api.api_key = "k".to_string();
        config.api.default_days_period = 30;

        let container = AppContainer::new(&config);
        let vm = container.news_list_view_model();
        let mut rx = vm.subscribe();
        rx.changed().await.unwrap();

        mock.assert_async().await;
        match &*rx.borrow() {
            NewsUiState::Result(articles) => assert_eq!(articles[0].title, "Wired"),
            other => panic!("expected Result, got {:?}", other),
        }
    }
}
