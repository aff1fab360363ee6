use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
};

use super::app::{App, ViewMode, period_label};
use crate::internal::models::Article;
use crate::internal::news_list::NewsUiState;
use crate::internal::notification::NotificationType;
use crate::utils::datetime::format_detail_date;
use crate::utils::media::{detail_rows, image_caption, preferred_image};
use crate::utils::theme_loader::TuiTheme;
use crate::utils::ui_text::{StringKey, UiText};

const TITLE_MAX_LINES: usize = 2;
const ABSTRACT_MAX_LINES: usize = 2;

#[tracing::instrument(skip(app, f))]
pub fn draw(app: &mut App, f: &mut Frame) {
    let start = std::time::Instant::now();
    let metrics = app.config.logging.enable_performance_metrics && cfg!(debug_assertions);

    app.dual_pane = f.area().width >= app.config.ui.dual_pane_min_width;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_top_bar(app, f, chunks[0]);

    match (app.dual_pane, app.view_mode) {
        (true, _) => {
            let panes = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(chunks[1]);
            render_list(app, f, panes[0]);
            render_detail(app, f, panes[1]);
        }
        (false, ViewMode::List) => render_list(app, f, chunks[1]),
        (false, ViewMode::Detail) => render_detail(app, f, chunks[1]),
    }
    if metrics {
        tracing::debug!(elapsed = ?start.elapsed(), dual_pane = app.dual_pane, "render.panes");
    }

    render_status_bar(app, f, chunks[2]);

    if app.notification.is_some() {
        render_notification(app, f);
    }

    if app.show_help {
        render_help_overlay(app, f);
    }

    if metrics {
        tracing::debug!(elapsed = ?start.elapsed(), "render.draw");
    }
}

fn padding(app: &App) -> Padding {
    Padding::new(
        app.config.ui.padding.horizontal,
        app.config.ui.padding.horizontal,
        app.config.ui.padding.vertical,
        app.config.ui.padding.vertical,
    )
}

fn pane_block(app: &App, title: String, focused: bool) -> Block<'static> {
    let border = match focused {
        true => app.theme.selection_bg,
        false => app.theme.border,
    };
    Block::default()
        .borders(Borders::ALL)
        .padding(padding(app))
        .border_style(Style::default().fg(border))
        .title(title)
        .title_style(Style::default().fg(app.theme.foreground))
        .style(Style::default().bg(app.theme.background))
}

/// Wrap `text` to `width` columns, keeping at most `max_lines` lines. A clipped
/// last line ends with an ellipsis.
pub fn wrap_clamped(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if max_lines == 0 || text.trim().is_empty() {
        return Vec::new();
    }
    let width = width.max(1);
    let wrapped = textwrap::wrap(text.trim(), width);
    let truncated = wrapped.len() > max_lines;

    let mut lines: Vec<String> = wrapped
        .into_iter()
        .take(max_lines)
        .map(|l| l.into_owned())
        .collect();

    if truncated && let Some(last) = lines.last_mut() {
        let keep = width.saturating_sub(1);
        if last.chars().count() > keep {
            *last = last.chars().take(keep).collect();
        }
        last.push('…');
    }
    lines
}

fn article_item(article: &Article, theme: &TuiTheme, width: usize) -> ListItem<'static> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format_detail_date(&article.published_date),
            Style::default().fg(theme.accent),
        ),
        Span::styled(" • ", Style::default().fg(theme.border)),
        Span::styled(article.section.clone(), Style::default().fg(theme.accent)),
    ])];

    lines.extend(
        wrap_clamped(&article.title, width, TITLE_MAX_LINES)
            .into_iter()
            .map(|l| {
                Line::from(Span::styled(
                    l,
                    Style::default()
                        .fg(theme.foreground)
                        .add_modifier(Modifier::BOLD),
                ))
            }),
    );
    lines.extend(
        wrap_clamped(&article.abstract_text, width, ABSTRACT_MAX_LINES)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(theme.foreground)))),
    );
    if !article.byline.is_empty() {
        lines.push(Line::from(Span::styled(
            article.byline.clone(),
            Style::default().fg(theme.muted),
        )));
    }
    lines.push(Line::default());

    ListItem::new(lines)
}

fn render_list(app: &mut App, f: &mut Frame, area: Rect) {
    let title = format!(" {} ", period_label(app.days_period));
    let focused = app.dual_pane && app.view_mode == ViewMode::List;
    let block = pane_block(app, title, focused);

    let message = |text: String, color: Color, hint: bool| {
        let mut lines = vec![Line::from(Span::styled(text, Style::default().fg(color)))];
        if hint {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "Press r to retry",
                Style::default().fg(app.theme.muted),
            )));
        }
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
    };

    let paragraph = match &app.news_state {
        NewsUiState::Loading => Some(message(
            format!("{} Loading...", app.get_spinner_char()),
            app.theme.foreground,
            false,
        )),
        NewsUiState::Empty => Some(message(
            UiText::resource(StringKey::NoResultsFound).as_string(),
            app.theme.foreground,
            true,
        )),
        NewsUiState::Error(text) => Some(message(text.as_string(), app.theme.error, true)),
        NewsUiState::Result(_) => None,
    };

    if let Some(paragraph) = paragraph {
        f.render_widget(paragraph.block(block), area);
        return;
    }

    let width = block.inner(area).width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .articles()
        .iter()
        .map(|article| article_item(article, &app.theme, width))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_symbol("▌ ")
        .highlight_style(
            Style::default()
                .bg(app.theme.selection_bg)
                .fg(app.theme.selection_fg),
        );

    f.render_stateful_widget(list, area, &mut app.list_state);
}

/// Lines of the article detail view.
pub fn detail_lines(article: &Article, theme: &TuiTheme) -> Vec<Line<'static>> {
    let label = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(theme.foreground);
    let muted = Style::default().fg(theme.muted);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(article.section.to_uppercase(), label),
            Span::styled(" • ", Style::default().fg(theme.border)),
            Span::styled(format_detail_date(&article.published_date), muted),
        ]),
        Line::default(),
        Line::from(Span::styled(
            article.title.clone(),
            text.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(article.byline.clone(), muted)),
        Line::default(),
        Line::from(Span::styled(article.abstract_text.clone(), text)),
    ];

    if !article.subsection.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Subsection: ", label),
            Span::styled(article.subsection.clone(), text),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Article Details", label)));
    for (name, value) in detail_rows(article) {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", name), muted),
            Span::styled(value, text),
        ]));
    }

    if let Some(caption) = image_caption(article) {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Photo: ", label),
            Span::styled(caption.to_string(), text),
        ]));
    }
    if let Some(image) = preferred_image(article) {
        lines.push(Line::from(vec![
            Span::styled("Image: ", muted),
            Span::styled(image.url.clone(), muted),
        ]));
    }
    if !article.url.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Link: ", muted),
            Span::styled(article.url.clone(), Style::default().fg(theme.accent)),
        ]));
    }
    lines
}

fn render_detail(app: &App, f: &mut Frame, area: Rect) {
    let focused = app.dual_pane && app.view_mode == ViewMode::Detail;
    let block = pane_block(app, " Article ".to_string(), focused);

    let item = app.details.as_ref().map(|d| d.state().item);
    let (lines, scroll) = match item {
        Some(Some(article)) => (detail_lines(&article, &app.theme), app.detail_scroll),
        Some(None) => (placeholder(app, StringKey::NoDetailsAvailable), 0),
        None => (placeholder(app, StringKey::SelectArticle), 0),
    };

    let p = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(p, area);
}

fn placeholder(app: &App, key: StringKey) -> Vec<Line<'static>> {
    vec![Line::from(Span::styled(
        UiText::resource(key).as_string(),
        Style::default().fg(app.theme.muted),
    ))]
}

fn render_top_bar(app: &App, f: &mut Frame, area: Rect) {
    let text = format!(
        "{} v{} - {}",
        UiText::resource(StringKey::AppName),
        app.app_version,
        period_label(app.days_period)
    );

    let p = Paragraph::new(text)
        .block(
            Block::default()
                .padding(padding(app))
                .style(Style::default().bg(app.theme.background)),
        )
        .style(
            Style::default()
                .fg(app.theme.foreground)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(p, area);
}

fn render_status_bar(app: &App, f: &mut Frame, area: Rect) {
    let status = match (&app.news_state, app.view_mode, app.dual_pane) {
        (NewsUiState::Loading, _, _) => format!(
            "{} Loading {}...",
            app.get_spinner_char(),
            period_label(app.days_period)
        ),
        (_, ViewMode::Detail, false) => {
            "Esc/q: Back | j/k: Scroll | o: Browser | i: Image | ?: Help".to_string()
        }
        (NewsUiState::Empty | NewsUiState::Error(_), _, _) => {
            "r: Retry | 1/2/3: Today/7/30 days | ?: Help | q: Quit".to_string()
        }
        (NewsUiState::Result(articles), _, _) => format!(
            "{} articles | j/k: Nav | Enter: Open | 1/2/3: Today/7/30 days | o: Browser | ?: Help | q: Quit",
            articles.len()
        ),
    };

    let p = Paragraph::new(status)
        .block(
            Block::default()
                .padding(padding(app))
                .style(Style::default().bg(app.theme.selection_bg)),
        )
        .style(Style::default().fg(app.theme.selection_fg));
    f.render_widget(p, area);
}

fn render_notification(app: &App, f: &mut Frame) {
    if let Some(notification) = &app.notification {
        let area = f.area();

        let popup_width = u16::try_from(notification.message.chars().count())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(area.width.saturating_sub(4));
        let lines = notification_lines(&notification.message, popup_width.saturating_sub(2));
        let popup_height = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let popup_x = (area.width.saturating_sub(popup_width)) / 2;
        let popup_y = (area.height.saturating_sub(popup_height)) / 2;
        let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height).intersection(area);

        let (bg_color, title) = match notification.notification_type {
            NotificationType::Info => (Color::Blue, "Info"),
            NotificationType::Error => (Color::Red, "Error"),
        };

        let popup = Paragraph::new(lines)
            .style(
                Style::default()
                    .bg(bg_color)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(app.theme.border))
                    .title(title)
                    .title_style(Style::default().fg(app.theme.foreground)),
            )
            .alignment(Alignment::Center);

        f.render_widget(Clear, popup_area);
        f.render_widget(popup, popup_area);
    }
}

/// Message lines for a popup whose inner width is `width`.
fn notification_lines(message: &str, width: u16) -> Vec<Line<'static>> {
    textwrap::wrap(message, usize::from(width.max(1)))
        .into_iter()
        .map(|l| Line::from(l.into_owned()))
        .collect()
}

const HELP_ENTRIES: [(&str, &str); 12] = [
    ("j / ↓", "Next article"),
    ("k / ↑", "Previous article"),
    ("Enter", "Open article"),
    ("Esc / q", "Back (quit from list)"),
    ("J / K", "Scroll article"),
    ("1", "Today"),
    ("2", "Last 7 days"),
    ("3", "Last 30 days"),
    ("r", "Retry"),
    ("o", "Open article in browser"),
    ("i", "Open image in browser"),
    ("x", "Dismiss notification"),
];

fn render_help_overlay(app: &App, f: &mut Frame) {
    let area = f.area();

    let popup_width = 48.min(area.width.saturating_sub(4));
    let popup_height = (HELP_ENTRIES.len() as u16 + 4).min(area.height.saturating_sub(2));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.selection_bg))
        .title(" Keyboard Shortcuts (any key to close) ")
        .title_style(
            Style::default()
                .fg(app.theme.selection_fg)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD),
        )
        .padding(padding(app))
        .style(Style::default().bg(app.theme.background));

    let lines: Vec<Line> = HELP_ENTRIES
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(
                    format!("{:<10}", key),
                    Style::default()
                        .fg(app.theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(*desc, Style::default().fg(app.theme.foreground)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_clamped_short_text() {
        assert_eq!(wrap_clamped("Short title", 40, 2), vec!["Short title"]);
        assert!(wrap_clamped("   ", 40, 2).is_empty());
    }

    #[test]
    fn test_wrap_clamped_truncates_with_ellipsis() {
        let lines = wrap_clamped("one two three four five six seven", 10, 2);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with('…'));
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn test_notification_lines_wrap_long_message() {
        let message = format!("Error fetching news: {} (401 Unauthorized)", "x".repeat(30).repeat(3));
        let lines = notification_lines(&message, 40);

        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.width() <= 40));
        assert!(lines.last().unwrap().to_string().ends_with("Unauthorized)"));
    }

    #[test]
    fn test_detail_lines_include_caption_image_and_link() {
        use crate::internal::models::{Media, MediaMetadata};

        let article = Article {
            title: "Headline".to_string(),
            section: "World".to_string(),
            published_date: "2024-01-05".to_string(),
            url: "https://www.nytimes.com/a".to_string(),
            media: vec![Media {
                caption: "A photo".to_string(),
                media_metadata: vec![MediaMetadata {
                    url: "https://static01.nyt.com/thumb.jpg".to_string(),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        };

        let text: Vec<String> = detail_lines(&article, &TuiTheme::default())
            .iter()
            .map(|l| l.to_string())
            .collect();

        assert_eq!(text[0], "WORLD • January 05, 2024");
        assert!(text.contains(&"Photo: A photo".to_string()));
        assert!(text.contains(&"Image: https://static01.nyt.com/thumb.jpg".to_string()));
        assert!(text.contains(&"Link: https://www.nytimes.com/a".to_string()));
    }
}
