use std::sync::Mutex;

use tokio::sync::{broadcast, watch};
use tokio::task::{AbortHandle, JoinHandle};

use crate::internal::models::Article;
use crate::internal::state::{EffectQueue, StateCell, StateWriter};
use crate::internal::usecase::{Dispatchers, GetPopularNews};
use crate::utils::ui_text::{StringKey, UiText};

/// Day-window fetched when the list is first shown.
pub const DEFAULT_DAYS_PERIOD: u32 = 7;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum NewsUiState {
    #[default]
    Loading,
    Empty,
    Result(Vec<Article>),
    Error(UiText),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NewsEvent {
    FetchNews(u32),
}

/// Transient notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ShowSnackbar(UiText),
}

/// State holder for the article list.
///
/// Starts in `Loading` and fetches `DEFAULT_DAYS_PERIOD` on construction. A fetch
/// never moves the state back to `Loading`: it overwrites the state when it
/// completes, so concurrent fetches resolve last-writer-wins. An empty result
/// leaves the state untouched. Dropping the view-model aborts in-flight fetches.
pub struct NewsListViewModel {
    state: StateCell<NewsUiState>,
    effects: EffectQueue<Effect>,
    use_case: GetPopularNews,
    dispatchers: Dispatchers,
    tasks: Mutex<Vec<AbortHandle>>,
}

impl NewsListViewModel {
    #[tracing::instrument(skip_all)]
    pub fn new(use_case: GetPopularNews, dispatchers: Dispatchers) -> Self {
        Self::with_initial_period(use_case, dispatchers, DEFAULT_DAYS_PERIOD)
    }

    pub fn with_initial_period(
        use_case: GetPopularNews,
        dispatchers: Dispatchers,
        days_period: u32,
    ) -> Self {
        let view_model = Self {
            state: StateCell::new(NewsUiState::Loading),
            effects: EffectQueue::new(),
            use_case,
            dispatchers,
            tasks: Mutex::new(Vec::new()),
        };
        view_model.on_event(NewsEvent::FetchNews(days_period));
        view_model
    }

    pub fn state(&self) -> NewsUiState {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<NewsUiState> {
        self.state.subscribe()
    }

    pub fn effects(&self) -> broadcast::Receiver<Effect> {
        self.effects.subscribe()
    }

    pub fn on_event(&self, event: NewsEvent) -> JoinHandle<()> {
        match event {
            NewsEvent::FetchNews(days_period) => self.fetch(days_period),
        }
    }

    fn fetch(&self, days_period: u32) -> JoinHandle<()> {
        let use_case = self.use_case.clone();
        let state = self.state.writer();
        let effects = self.effects.clone();

        tracing::info!(days_period, "Fetching popular news");
        let handle = self.dispatchers.io.spawn(async move {
            let outcome = use_case
                .invoke(days_period)
                .await
                .map(|response| response.results)
                .map_err(|e| format!("{:#}", e));
            apply_outcome(&state, &effects, days_period, outcome);
        });

        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.retain(|t| !t.is_finished());
            tasks.push(handle.abort_handle());
        }
        handle
    }
}

impl Drop for NewsListViewModel {
    fn drop(&mut self) {
        if let Ok(tasks) = self.tasks.get_mut() {
            for task in tasks.drain(..) {
                task.abort();
            }
        }
    }
}

/// Message shown for a failed fetch, given the error's description.
pub fn fetch_error_text(description: &str) -> UiText {
    let description = match description.trim() {
        "" => StringKey::UnknownError.template().to_string(),
        d => d.to_string(),
    };
    UiText::resource_with(StringKey::ErrorFetchingNews, vec![description])
}

/// The state a fetch outcome moves to, or `None` when it must stay as it is.
pub fn next_state(outcome: &Result<Vec<Article>, String>) -> Option<NewsUiState> {
    match outcome {
        Ok(articles) if articles.is_empty() => None,
        Ok(articles) => Some(NewsUiState::Result(articles.clone())),
        Err(description) => Some(NewsUiState::Error(fetch_error_text(description))),
    }
}

fn apply_outcome(
    state: &StateWriter<NewsUiState>,
    effects: &EffectQueue<Effect>,
    days_period: u32,
    outcome: Result<Vec<Article>, String>,
) {
    match (&outcome, next_state(&outcome)) {
        (Ok(articles), Some(next)) => {
            tracing::info!(days_period, count = articles.len(), "Popular news loaded");
            state.set(next);
        }
        (Ok(_), None) => {
            tracing::info!(days_period, "Empty result, keeping current state");
        }
        (Err(description), next) => {
            tracing::warn!(days_period, error = %description, "Fetching popular news failed");
            if let Some(NewsUiState::Error(text)) = &next {
                effects.send(Effect::ShowSnackbar(text.clone()));
            }
            if let Some(next) = next {
                state.set(next);
            }
        }
    }
}
