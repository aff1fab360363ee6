use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::{broadcast, watch};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::api::PopularPeriod;
use crate::config::AppConfig;
use crate::internal::container::AppContainer;
use crate::internal::models::Article;
use crate::internal::news_details::NewsDetailsViewModel;
use crate::internal::news_list::{Effect, NewsEvent, NewsListViewModel, NewsUiState};
use crate::internal::notification::Notification;
use crate::internal::ui::keybindings::{KeyBindingContext, KeyBindingMap};
use crate::internal::ui::keybindings_default::create_default_keybindings;
use crate::utils::media::preferred_image;
use crate::utils::theme_loader::{TuiTheme, load_theme};

use ratatui::Frame;
use ratatui::widgets::ListState;

/// Which pane owns the screen in single-pane layout.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ViewMode {
    List,
    Detail,
}

/// Actions/messages sent through the app action channel. All of them can be
/// bound to keys from `config.ron`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Quit,
    NavigateUp,
    NavigateDown,
    Enter,
    Back,
    ScrollDetailUp,
    ScrollDetailDown,
    OpenBrowser,
    OpenImage,
    /// Re-fetch the current day-window after an empty or failed load.
    Retry,
    /// Fetch a different day-window (1, 7 or 30).
    FetchDays(u32),
    ToggleHelp,
    ClearNotification,
}

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Main application state.
pub struct App {
    pub running: bool,
    pub app_version: String,
    pub view_mode: ViewMode,
    /// Set by the renderer from the terminal width on every frame.
    pub dual_pane: bool,
    pub config: AppConfig,
    pub theme: TuiTheme,
    pub news_list: NewsListViewModel,
    /// Last state observed from `news_list`.
    pub news_state: NewsUiState,
    pub list_state: ListState,
    pub details: Option<NewsDetailsViewModel>,
    pub detail_scroll: u16,
    pub days_period: u32,
    pub notification: Option<Notification>,
    pub spinner_state: usize,
    pub last_spinner_update: Option<tokio::time::Instant>,
    pub show_help: bool,
    pub keybindings: KeyBindingMap,
    pub action_tx: UnboundedSender<Action>,
    pub action_rx: UnboundedReceiver<Action>,
    state_rx: watch::Receiver<NewsUiState>,
    effects_rx: broadcast::Receiver<Effect>,
}

impl App {
    /// Must be called from within a tokio runtime: the list view-model starts
    /// fetching immediately.
    #[tracing::instrument(skip_all)]
    pub fn new(config: AppConfig, container: &AppContainer) -> Self {
        let start = std::time::Instant::now();
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let theme = match &config.theme_file {
            Some(path) => match load_theme(Path::new(path), &config.theme_mode) {
                Ok(theme) => {
                    tracing::info!("Loaded theme '{}' ({})", path, config.theme_mode);
                    theme
                }
                Err(e) => {
                    tracing::error!("Failed to load theme '{}': {:#}", path, e);
                    TuiTheme::default()
                }
            },
            None => TuiTheme::default(),
        };

        let mut keybindings = create_default_keybindings();
        if let Some(custom_bindings) = &config.keybindings {
            keybindings.merge_config(custom_bindings);
        }

        let news_list = container.news_list_view_model();
        let state_rx = news_list.subscribe();
        let effects_rx = news_list.effects();
        let news_state = news_list.state();

        tracing::info!(elapsed = ?start.elapsed(), "App initialized");

        let mut app = Self {
            running: true,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            view_mode: ViewMode::List,
            dual_pane: false,
            days_period: container.default_days_period,
            config,
            theme,
            news_list,
            news_state: NewsUiState::Loading,
            list_state: ListState::default(),
            details: None,
            detail_scroll: 0,
            notification: None,
            spinner_state: 0,
            last_spinner_update: None,
            show_help: false,
            keybindings,
            action_tx,
            action_rx,
            state_rx,
            effects_rx,
        };
        // The first fetch may already have landed on a multi-threaded runtime.
        app.apply_news_state(news_state);
        app
    }

    pub fn notify_info(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification::info(message));
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification::error(message));
    }

    pub fn clear_notification(&mut self) {
        self.notification = None;
    }

    pub async fn run(&mut self, mut tui: crate::tui::Tui) -> Result<()> {
        let mut event_interval = tokio::time::interval(std::time::Duration::from_millis(16));

        loop {
            // Update spinner animation every 100ms
            let now = tokio::time::Instant::now();
            match self.last_spinner_update {
                Some(last_update) if now.duration_since(last_update).as_millis() >= 100 => {
                    self.spinner_state = self.spinner_state.wrapping_add(1);
                    self.last_spinner_update = Some(now);
                }
                Some(_) => {}
                None => self.last_spinner_update = Some(now),
            }

            if let Some(notification) = &self.notification
                && notification.should_dismiss()
            {
                self.clear_notification();
            }

            tui.draw(|f| self.ui(f))?;

            tokio::select! {
                _ = event_interval.tick() => {
                    if event::poll(std::time::Duration::from_millis(0))?
                        && let Event::Key(key) = event::read()?
                            && key.kind == KeyEventKind::Press {
                                self.handle_key_event(key);
                            }
                }
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }
                Ok(()) = self.state_rx.changed() => {
                    let state = self.state_rx.borrow_and_update().clone();
                    self.apply_news_state(state);
                }
                Ok(effect) = self.effects_rx.recv() => {
                    self.notification = Some(Notification::from(effect));
                }
            }

            if !self.running {
                break;
            }
        }
        Ok(())
    }

    fn key_context(&self) -> KeyBindingContext {
        match (self.view_mode, self.dual_pane) {
            (ViewMode::Detail, false) => KeyBindingContext::Detail,
            _ => KeyBindingContext::List,
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        // Help overlay swallows the next key press.
        if self.show_help {
            self.show_help = false;
            return;
        }

        if let Some(action) = self.keybindings.get_action(&key, self.key_context()) {
            let _ = self.action_tx.send(action);
        }
    }

    /// Replace the observed list state and keep the selection inside the list.
    pub fn apply_news_state(&mut self, state: NewsUiState) {
        if let NewsUiState::Result(articles) = &state {
            let selected = match (self.list_state.selected(), articles.len()) {
                (_, 0) => None,
                (Some(i), len) if i < len => Some(i),
                (Some(_), len) => Some(len - 1),
                (None, _) => Some(0),
            };
            self.list_state.select(selected);
        }
        self.news_state = state;
    }

    pub fn articles(&self) -> &[Article] {
        match &self.news_state {
            NewsUiState::Result(articles) => articles,
            _ => &[],
        }
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.list_state
            .selected()
            .and_then(|i| self.articles().get(i))
    }

    /// Article the browser/image actions apply to: the open detail, else the selection.
    fn focused_article(&self) -> Option<Article> {
        self.details
            .as_ref()
            .and_then(|d| d.state().item)
            .or_else(|| self.selected_article().cloned())
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::NavigateUp => match (self.view_mode, self.dual_pane) {
                (ViewMode::Detail, false) => {
                    self.detail_scroll = self.detail_scroll.saturating_sub(1)
                }
                _ => self.select_prev(),
            },
            Action::NavigateDown => match (self.view_mode, self.dual_pane) {
                (ViewMode::Detail, false) => {
                    self.detail_scroll = self.detail_scroll.saturating_add(1)
                }
                _ => self.select_next(),
            },
            Action::ScrollDetailUp => self.detail_scroll = self.detail_scroll.saturating_sub(1),
            Action::ScrollDetailDown => self.detail_scroll = self.detail_scroll.saturating_add(1),
            Action::Enter => {
                if let Some(article) = self.selected_article().cloned() {
                    let already_open = self
                        .details
                        .as_ref()
                        .is_some_and(|d| d.article_id() == Some(article.id));
                    if !already_open {
                        tracing::debug!(article_id = article.id, "Opening article details");
                        self.details = Some(NewsDetailsViewModel::new(article));
                        self.detail_scroll = 0;
                    }
                    self.view_mode = ViewMode::Detail;
                }
            }
            Action::Back => {
                self.view_mode = ViewMode::List;
                self.details = None;
                self.detail_scroll = 0;
            }
            Action::OpenBrowser => {
                if let Some(article) = self.focused_article()
                    && !article.url.is_empty()
                    && let Err(e) = open::that(&article.url)
                {
                    tracing::error!("Failed to open {}: {}", article.url, e);
                    self.notify_error(format!("Could not open browser: {}", e));
                }
            }
            Action::OpenImage => match self.focused_article() {
                Some(article) => match preferred_image(&article) {
                    Some(image) => {
                        if let Err(e) = open::that(&image.url) {
                            tracing::error!("Failed to open {}: {}", image.url, e);
                            self.notify_error(format!("Could not open image: {}", e));
                        }
                    }
                    None => self.notify_info("This article has no image"),
                },
                None => {}
            },
            Action::Retry => match self.news_state {
                NewsUiState::Empty | NewsUiState::Error(_) => {
                    self.news_list.on_event(NewsEvent::FetchNews(self.days_period));
                    self.notify_info("Retrying...");
                }
                _ => {}
            },
            Action::FetchDays(days) => {
                self.days_period = days;
                self.news_list.on_event(NewsEvent::FetchNews(days));
                self.notify_info(format!("Loading {}", period_label(days)));
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::ClearNotification => self.clear_notification(),
        }
    }

    fn select_next(&mut self) {
        let len = self.articles().len();
        if len == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    fn select_prev(&mut self) {
        if self.articles().is_empty() {
            return;
        }
        let prev = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(prev));
    }

    pub fn get_spinner_char(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_state % SPINNER_FRAMES.len()]
    }

    pub fn ui(&mut self, f: &mut Frame) {
        crate::internal::ui::view::draw(self, f);
    }
}

/// Human label for a day-window.
pub fn period_label(days: u32) -> String {
    match PopularPeriod::from_days(days) {
        Some(period) => period.to_string(),
        None => format!("Last {} days", days),
    }
}
