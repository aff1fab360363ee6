use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::internal::ui::app::Action;

pub const API_KEY_ENV: &str = "NYT_API_KEY";

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    pub ui: UiConfig,
    /// Path to a JSON theme file with light/dark variants. Built-in colors when unset.
    pub theme_file: Option<String>,
    /// Which variant of `theme_file` to use ("dark" or "light").
    pub theme_mode: String,
    /// Custom keybindings layered over the defaults.
    pub keybindings: Option<KeyBindingConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            logging: LoggingConfig::default(),
            ui: UiConfig::default(),
            theme_file: None,
            theme_mode: default_theme_mode(),
            keybindings: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    /// Must end with a `/`.
    pub base_url: String,
    /// Overridden by the `NYT_API_KEY` environment variable when set.
    pub api_key: String,
    pub default_days_period: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: crate::api::NYT_API_BASE_URL.to_string(),
            api_key: String::new(),
            default_days_period: 7,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Per-module overrides, e.g. `{"reqwest": "warn"}`.
    pub module_levels: HashMap<String, String>,
    pub log_directory: Option<String>,
    pub enable_performance_metrics: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            module_levels: HashMap::new(),
            log_directory: None,
            enable_performance_metrics: false,
        }
    }
}

impl LoggingConfig {
    /// Filter directive string for `tracing_subscriber::EnvFilter`.
    pub fn filter_directives(&self) -> String {
        let mut filter_str = self.level.clone();
        let mut modules: Vec<_> = self.module_levels.iter().collect();
        modules.sort();
        for (module, level) in modules {
            filter_str.push_str(&format!(",{}={}", module, level));
        }
        filter_str
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Terminal width from which list and detail are shown side by side.
    pub dual_pane_min_width: u16,
    pub padding: PaddingConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dual_pane_min_width: 120,
            padding: PaddingConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PaddingConfig {
    pub horizontal: u16,
    pub vertical: u16,
}

impl Default for PaddingConfig {
    fn default() -> Self {
        Self {
            horizontal: 1,
            vertical: 0,
        }
    }
}

/// Key string (e.g. `"Ctrl+r"`) to action, per view context.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct KeyBindingConfig {
    pub global: HashMap<String, Action>,
    pub list: HashMap<String, Action>,
    pub detail: HashMap<String, Action>,
}

fn default_theme_mode() -> String {
    "dark".to_string()
}

impl AppConfig {
    pub fn load() -> Self {
        let mut candidates = Vec::new();

        // 1. Current working directory
        candidates.push(PathBuf::from("config.ron"));

        // 2. Next to executable
        if let Ok(exe) = std::env::current_exe()
            && let Some(dir) = exe.parent()
        {
            candidates.push(dir.join("config.ron"));
        }

        // 3. OS config directory
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join("tui-nyt-app").join("config.ron"));
        }

        let mut config = Self::default();
        for path in candidates {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match Self::from_ron(&content) {
                    Ok(parsed) => {
                        tracing::info!("Loaded config from {}", path.display());
                        config = parsed;
                        break;
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse config at {}: {}", path.display(), e);
                    }
                }
            }
        }

        config.apply_env_overrides(std::env::var(API_KEY_ENV).ok());
        config
    }

    pub fn from_ron(content: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str::<AppConfig>(content)
    }

    /// Apply an API key taken from the environment. Blank values are ignored.
    pub fn apply_env_overrides(&mut self, api_key: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api.api_key = key;
        }
    }
}
