use serde::{Deserialize, Serialize};

/// Body of `GET svc/mostpopular/v2/viewed/{days}.json`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct MostPopularResponse {
    pub copyright: String,
    pub num_results: u32,
    pub results: Vec<Article>,
    pub status: String,
}

/// A single entry of `results`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Article {
    pub id: u64,
    pub asset_id: u64,
    pub eta_id: u32,
    pub uri: String,
    pub url: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub adx_keywords: String,
    pub byline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub section: String,
    pub subsection: String,
    pub nytdsection: String,
    pub source: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    /// `YYYY-MM-DD` as sent by the API; not parsed.
    pub published_date: String,
    pub updated: String,
    pub media: Vec<Media>,
    pub des_facet: Vec<String>,
    pub geo_facet: Vec<String>,
    pub org_facet: Vec<String>,
    pub per_facet: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Media {
    #[serde(rename = "type")]
    pub kind: String,
    pub subtype: String,
    pub caption: String,
    pub copyright: String,
    pub approved_for_syndication: i32,
    #[serde(rename = "media-metadata")]
    pub media_metadata: Vec<MediaMetadata>,
}

/// One rendition of a media item.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct MediaMetadata {
    pub url: String,
    pub format: String,
    pub height: u32,
    pub width: u32,
}
