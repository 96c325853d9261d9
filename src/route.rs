use crate::{
    query::{
        CardQuery,
        QueryClient,
        QueryState,
    },
    render::{
        render_card,
        render_query_state,
        CardVariant,
    },
};
use scryfall::{
    LanguageCode,
    UnknownValueError,
};
use std::str::FromStr;

/// An error that may occur while parsing a route
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// No route matches the path
    #[error("no page at \"{0}\"")]
    NotFound(String),

    /// The language segment is not a known language code
    #[error("invalid language in \"{path}\"")]
    InvalidLanguage {
        path: String,

        #[source]
        error: UnknownValueError,
    },
}

/// A page of the card viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`, a random card
    Home,

    /// `/cards/{set}/{collector_number}/{lang}`
    Card {
        set: String,
        collector_number: String,
        lang: LanguageCode,
    },
}

impl Route {
    /// The page path for this route
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Card {
                set,
                collector_number,
                lang,
            } => format!("/cards/{set}/{collector_number}/{lang}"),
        }
    }

    /// Fetch and render this page.
    ///
    /// The home page shows a random card thumbnail, card pages show the full card.
    pub async fn resolve(&self, query_client: &QueryClient) -> String {
        let (query, variant) = match self {
            Self::Home => (CardQuery::Random { query: None }, CardVariant::Thumbnail),
            Self::Card {
                set,
                collector_number,
                lang,
            } => (
                CardQuery::SetNumber {
                    set: set.clone(),
                    collector_number: collector_number.clone(),
                    lang: Some(*lang),
                },
                CardVariant::Page,
            ),
        };

        let state = QueryState::from_result(query_client.card(query).await);
        render_query_state(&state, |entry| render_card(entry.data(), variant))
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        // Ignore any query or fragment
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = trimmed.trim_matches('/');

        if trimmed.is_empty() {
            return Ok(Self::Home);
        }

        let segments: Vec<&str> = trimmed.split('/').collect();
        match segments.as_slice() {
            ["cards", set, collector_number, lang]
                if !set.is_empty() && !collector_number.is_empty() =>
            {
                let lang = lang
                    .parse()
                    .map_err(|error| RouteError::InvalidLanguage {
                        path: path.to_string(),
                        error,
                    })?;

                Ok(Self::Card {
                    set: set.to_string(),
                    collector_number: collector_number.to_string(),
                    lang,
                })
            }
            _ => Err(RouteError::NotFound(path.to_string())),
        }
    }
}
