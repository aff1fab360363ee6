use std::sync::Arc;

use tui_nyt_app::api::ApiService;
use tui_nyt_app::internal::container::AppContainer;
use tui_nyt_app::internal::news_details::NewsDetailsViewModel;
use tui_nyt_app::internal::news_list::{Effect, NewsEvent, NewsUiState};
use tui_nyt_app::internal::repository::{NewsRepository, RemoteNewsRepository};

fn body(titles: &[(u64, &str)]) -> String {
    let results: Vec<String> = titles
        .iter()
        .map(|(id, title)| format!(r#"{{"id":{},"title":"{}","section":"U.S."}}"#, id, title))
        .collect();
    format!(
        r#"{{"status":"OK","num_results":{},"results":[{}]}}"#,
        titles.len(),
        results.join(",")
    )
}

fn container_for(server: &mockito::ServerGuard) -> AppContainer {
    let api = Arc::new(ApiService::with_base_url(
        format!("{}/", server.url()),
        "k".to_string(),
    ));
    let repository: Arc<dyn NewsRepository> = Arc::new(RemoteNewsRepository::new(api.clone()));
    AppContainer::with_repository(repository, api, 7)
}

#[tokio::test]
async fn test_result_then_empty_keeps_previous_articles() {
    let mut server = mockito::Server::new_async().await;
    let _week = server
        .mock("GET", "/svc/mostpopular/v2/viewed/7.json")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body(&[(1, "A"), (2, "B")]))
        .create_async()
        .await;
    let _day = server
        .mock("GET", "/svc/mostpopular/v2/viewed/1.json")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body(&[]))
        .create_async()
        .await;

    let vm = container_for(&server).news_list_view_model();
    let mut rx = vm.subscribe();
    rx.changed().await.unwrap();

    let titles = |state: &NewsUiState| -> Vec<String> {
        match state {
            NewsUiState::Result(articles) => articles.iter().map(|a| a.title.clone()).collect(),
            other => panic!("expected Result, got {:?}", other),
        }
    };
    assert_eq!(titles(&*rx.borrow_and_update()), vec!["A", "B"]);

    vm.on_event(NewsEvent::FetchNews(1)).await.unwrap();

    assert!(!rx.has_changed().unwrap());
    assert_eq!(titles(&vm.state()), vec!["A", "B"]);
}

#[tokio::test]
async fn test_unauthorized_surfaces_error_state() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/svc/mostpopular/v2/viewed/7.json")
        .match_query(mockito::Matcher::Any)
        .with_status(401)
        .with_body(r#"{"fault":{"faultstring":"Invalid ApiKey"}}"#)
        .create_async()
        .await;

    let vm = container_for(&server).news_list_view_model();
    let mut effects = vm.effects();
    let mut rx = vm.subscribe();
    rx.changed().await.unwrap();

    let message = match &*rx.borrow() {
        NewsUiState::Error(text) => text.as_string(),
        other => panic!("expected Error, got {:?}", other),
    };
    assert!(message.starts_with("Error fetching news: "));
    assert!(message.contains("401"));

    match effects.recv().await.unwrap() {
        Effect::ShowSnackbar(text) => assert_eq!(text.as_string(), message),
    }
}

#[tokio::test]
async fn test_detail_view_model_from_fetched_article() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/svc/mostpopular/v2/viewed/7.json")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body(&[(42, "Chosen")]))
        .create_async()
        .await;

    let vm = container_for(&server).news_list_view_model();
    let mut rx = vm.subscribe();
    rx.changed().await.unwrap();

    let article = match vm.state() {
        NewsUiState::Result(articles) => articles[0].clone(),
        other => panic!("expected Result, got {:?}", other),
    };
    let details = NewsDetailsViewModel::new(article.clone());

    assert_eq!(details.state().item, Some(article));
    assert_eq!(details.article_id(), Some(42));
}
