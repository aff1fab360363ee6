use tokio::sync::watch;

use crate::internal::models::Article;
use crate::internal::state::StateCell;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewsDetailsUiState {
    pub item: Option<Article>,
}

/// Holds the article shown in the detail pane. Published once, at construction.
pub struct NewsDetailsViewModel {
    state: StateCell<NewsDetailsUiState>,
}

impl NewsDetailsViewModel {
    pub fn new(item: Article) -> Self {
        let state = StateCell::new(NewsDetailsUiState::default());
        state.update(|s| s.item = Some(item));
        Self { state }
    }

    pub fn state(&self) -> NewsDetailsUiState {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<NewsDetailsUiState> {
        self.state.subscribe()
    }

    /// Id of the shown article, used to key one view-model per article.
    pub fn article_id(&self) -> Option<u64> {
        self.state.get().item.map(|a| a.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Article {
        Article {
            id: 9,
            title: "Detail".to_string(),
            byline: "By Someone".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_item_published_on_construction() {
        let vm = NewsDetailsViewModel::new(article());
        assert_eq!(vm.state().item, Some(article()));
        assert_eq!(vm.article_id(), Some(9));
    }

    #[test]
    fn test_no_further_emissions() {
        let vm = NewsDetailsViewModel::new(article());
        let rx = vm.subscribe();

        assert_eq!(rx.borrow().item, Some(article()));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_default_state_has_no_item() {
        assert_eq!(NewsDetailsUiState::default().item, None);
    }
}
