use strum_macros::{Display, EnumIter};

/// Keys into the built-in string table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum StringKey {
    AppName,
    ErrorFetchingNews,
    UnknownError,
    NoResultsFound,
    NoDetailsAvailable,
    SelectArticle,
}

impl StringKey {
    /// Template text; `{0}`, `{1}`... are replaced by positional args.
    pub fn template(&self) -> &'static str {
        match self {
            Self::AppName => "NYT Most Popular",
            Self::ErrorFetchingNews => "Error fetching news: {0}",
            Self::UnknownError => "Unknown error",
            Self::NoResultsFound => "No results found",
            Self::NoDetailsAvailable => "No details available",
            Self::SelectArticle => "Select a news article to read",
        }
    }
}

/// Display text that is either literal or looked up from the string table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiText {
    #[default]
    Empty,
    Dynamic(String),
    Resource { key: StringKey, args: Vec<String> },
}

impl UiText {
    pub fn resource(key: StringKey) -> Self {
        Self::Resource {
            key,
            args: Vec::new(),
        }
    }

    pub fn resource_with(key: StringKey, args: Vec<String>) -> Self {
        Self::Resource { key, args }
    }

    pub fn as_string(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Dynamic(text) => text.clone(),
            Self::Resource { key, args } => args
                .iter()
                .enumerate()
                .fold(key.template().to_string(), |acc, (i, arg)| {
                    acc.replace(&format!("{{{}}}", i), arg)
                }),
        }
    }
}

impl std::fmt::Display for UiText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_string())
    }
}
