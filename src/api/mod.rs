use crate::config::ApiConfig;
use crate::internal::models::MostPopularResponse;
use anyhow::{Context, Result};
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderValue};
use serde::de::DeserializeOwned;
use strum_macros::{Display, EnumIter};

/// Day-windows offered by the Most Popular API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum PopularPeriod {
    #[strum(to_string = "Today")]
    Day,
    #[strum(to_string = "Last 7 days")]
    Week,
    #[strum(to_string = "Last 30 days")]
    Month,
}

impl PopularPeriod {
    pub fn as_days(&self) -> u32 {
        match self {
            Self::Day => 1,
            Self::Week => 7,
            Self::Month => 30,
        }
    }

    /// Map a day count back to a known window, if it is one.
    pub fn from_days(days: u32) -> Option<Self> {
        match days {
            1 => Some(Self::Day),
            7 => Some(Self::Week),
            30 => Some(Self::Month),
            _ => None,
        }
    }
}

pub const NYT_API_BASE_URL: &str = "https://api.nytimes.com/";

/// Path of the "most viewed" endpoint relative to the API base URL.
pub fn most_popular_path(days: u32) -> String {
    format!("svc/mostpopular/v2/viewed/{}.json", days)
}

/// HTTP service for the Most Popular API.
///
/// Every failure (transport, HTTP status, JSON) is returned as an `anyhow::Error`
/// with context; nothing is retried.
#[derive(Clone)]
pub struct ApiService {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ApiService {
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_base_url(config.base_url.clone(), config.api_key.clone())
    }

    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for a day-window, including the API key.
    pub fn most_popular_url(&self, days: u32) -> String {
        format!(
            "{}{}?api-key={}",
            self.base_url,
            most_popular_path(days),
            self.api_key
        )
    }

    /// GET `url` with `Accept: application/json` and deserialize the body into `T`.
    async fn get_json<T>(&self, url: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("failed to send GET request")?
            .error_for_status()
            // The URL carries the API key; keep it out of error text.
            .map_err(reqwest::Error::without_url)
            .context("server returned an error status")?;

        resp.json::<T>()
            .await
            .map_err(reqwest::Error::without_url)
            .context("failed to parse JSON response")
    }

    /// Fetch the most viewed articles over the last `days` days.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_most_popular(&self, days: u32) -> Result<MostPopularResponse> {
        let start = std::time::Instant::now();
        let url = self.most_popular_url(days);
        let response: MostPopularResponse = self
            .get_json(&url)
            .await
            .with_context(|| format!("fetch_most_popular failed for {} day(s)", days))?;

        tracing::info!(
            days,
            count = response.results.len(),
            num_results = response.num_results,
            elapsed = ?start.elapsed(),
            "Fetched most popular articles"
        );
        Ok(response)
    }
}

impl Default for ApiService {
    fn default() -> Self {
        Self::new(&ApiConfig::default())
    }
}
