use crate::internal::models::{Article, MediaMetadata};
use crate::utils::datetime::format_detail_date;

/// Rendition index used for article images.
///
/// The API usually lists Standard Thumbnail, mediumThreeByTwo210 and
/// mediumThreeByTwo440 in that order, but this is not guaranteed.
pub const PREFERRED_RENDITION: usize = 2;

/// Rendition of the first media item at `PREFERRED_RENDITION`, else its first one.
pub fn preferred_image(article: &Article) -> Option<&MediaMetadata> {
    let renditions = &article.media.first()?.media_metadata;
    renditions
        .get(PREFERRED_RENDITION)
        .or_else(|| renditions.first())
}

/// Caption of the first media item, if non-empty.
pub fn image_caption(article: &Article) -> Option<&str> {
    article
        .media
        .first()
        .map(|m| m.caption.as_str())
        .filter(|c| !c.is_empty())
}

/// Labelled rows for the "Article Details" block of the detail view.
pub fn detail_rows(article: &Article) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Source", article.source.clone()),
        ("Type", article.kind.clone()),
        ("Updated", format_detail_date(&article.updated)),
    ];

    let facets = [
        ("Topics", &article.des_facet),
        ("Locations", &article.geo_facet),
        ("Organizations", &article.org_facet),
        ("People", &article.per_facet),
    ];
    for (label, values) in facets {
        if !values.is_empty() {
            rows.push((label, values.join(", ")));
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::models::Media;

    fn rendition(url: &str) -> MediaMetadata {
        MediaMetadata {
            url: url.to_string(),
            ..Default::default()
        }
    }

    fn article_with(renditions: Vec<MediaMetadata>) -> Article {
        Article {
            media: vec![Media {
                caption: "Caption".to_string(),
                media_metadata: renditions,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_preferred_image_uses_third_rendition() {
        let article = article_with(vec![rendition("a"), rendition("b"), rendition("c")]);
        assert_eq!(preferred_image(&article).map(|m| m.url.as_str()), Some("c"));
    }

    #[test]
    fn test_preferred_image_falls_back_to_first() {
        let article = article_with(vec![rendition("a"), rendition("b")]);
        assert_eq!(preferred_image(&article).map(|m| m.url.as_str()), Some("a"));
    }

    #[test]
    fn test_preferred_image_none_without_media() {
        assert!(preferred_image(&Article::default()).is_none());
        assert!(preferred_image(&article_with(Vec::new())).is_none());
    }

    #[test]
    fn test_image_caption() {
        assert_eq!(image_caption(&article_with(Vec::new())), Some("Caption"));
        assert_eq!(image_caption(&Article::default()), None);
    }

    #[test]
    fn test_detail_rows_skip_empty_facets() {
        let article = Article {
            source: "New York Times".to_string(),
            kind: "Article".to_string(),
            updated: "2024-02-03 08:00:00".to_string(),
            des_facet: vec!["Economy".to_string(), "Inflation".to_string()],
            per_facet: vec!["Powell, Jerome".to_string()],
            ..Default::default()
        };

        insta::assert_debug_snapshot!(detail_rows(&article), @r#"
        [
            (
                "Source",
                "New York Times",
            ),
            (
                "Type",
                "Article",
            ),
            (
                "Updated",
                "February 03, 2024",
            ),
            (
                "Topics",
                "Economy, Inflation",
            ),
            (
                "People",
                "Powell, Jerome",
            ),
        ]
        "#);
    }
}
