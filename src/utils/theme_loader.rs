use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeFile {
    pub name: String,
    pub themes: Vec<ThemeVariant>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeVariant {
    pub name: String,
    pub mode: String, // "light" or "dark"
    pub colors: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TuiTheme {
    pub background: Color,
    pub foreground: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub border: Color,
    /// Section labels and dates.
    pub accent: Color,
    /// Bylines and secondary text.
    pub muted: Color,
    pub error: Color,
}

impl Default for TuiTheme {
    fn default() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::Reset,
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            border: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            error: Color::Red,
        }
    }
}

/// Load the `mode` variant of a JSON theme file, or its first variant.
#[tracing::instrument(skip(path, mode), fields(path = ?path, mode = %mode))]
pub fn load_theme(path: &Path, mode: &str) -> Result<TuiTheme> {
    let content = fs::read_to_string(path).context("Failed to read theme file")?;
    parse_theme(&content, mode)
}

pub fn parse_theme(content: &str, mode: &str) -> Result<TuiTheme> {
    let theme_file: ThemeFile =
        serde_json::from_str(content).context("Failed to parse theme JSON")?;

    let variant = theme_file
        .themes
        .iter()
        .find(|t| t.mode.eq_ignore_ascii_case(mode))
        .or_else(|| theme_file.themes.first())
        .context("No matching theme variant found")?;

    tracing::debug!(theme = %theme_file.name, variant = %variant.name, "Selected theme variant");

    let color = |keys: &[&str], fallback: Color| {
        keys.iter()
            .find_map(|k| variant.colors.get(*k))
            .map(|hex| parse_color(hex))
            .unwrap_or(fallback)
    };

    let defaults = TuiTheme::default();
    Ok(TuiTheme {
        background: color(&["background"], defaults.background),
        foreground: color(&["foreground"], defaults.foreground),
        selection_bg: color(
            &["selection.background", "list.active.background"],
            defaults.selection_bg,
        ),
        selection_fg: color(
            &["accent.foreground", "foreground"],
            defaults.selection_fg,
        ),
        border: color(&["border"], defaults.border),
        accent: color(&["base.cyan", "base.blue"], defaults.accent),
        muted: color(&["muted.foreground"], defaults.muted),
        error: color(&["base.red"], defaults.error),
    })
}

fn parse_color(hex: &str) -> Color {
    if let Ok(c) = hex.parse::<Color>() {
        return c;
    }

    let hex = hex.trim_start_matches('#');
    match hex.len() {
        6 | 8 => {
            // For 8-char hex (with alpha), ignore the alpha and use the RGB components.
            let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
            let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
            let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
            Color::Rgb(r, g, b)
        }
        _ => Color::Reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THEME: &str = r##"{
        "name": "Paper",
        "themes": [
            {"name": "Paper Light", "mode": "light", "colors": {"background": "#fffcf0", "base.red": "#af3029"}},
            {"name": "Paper Dark", "mode": "dark", "colors": {"background": "#100f0f", "muted.foreground": "#878580ff"}}
        ]
    }"##;

    #[test]
    fn test_parse_theme_selects_mode() {
        let light = parse_theme(THEME, "light").unwrap();
        assert_eq!(light.background, Color::Rgb(0xff, 0xfc, 0xf0));
        assert_eq!(light.error, Color::Rgb(0xaf, 0x30, 0x29));

        let dark = parse_theme(THEME, "DARK").unwrap();
        assert_eq!(dark.background, Color::Rgb(0x10, 0x0f, 0x0f));
        assert_eq!(dark.muted, Color::Rgb(0x87, 0x85, 0x80));
        assert_eq!(dark.border, TuiTheme::default().border);
    }

    #[test]
    fn test_parse_theme_falls_back_to_first_variant() {
        let theme = parse_theme(THEME, "sepia").unwrap();
        assert_eq!(theme.background, Color::Rgb(0xff, 0xfc, 0xf0));
    }

    #[test]
    fn test_parse_theme_rejects_empty_variants() {
        assert!(parse_theme(r#"{"name":"x","themes":[]}"#, "dark").is_err());
        assert!(parse_theme("not json", "dark").is_err());
    }
}
