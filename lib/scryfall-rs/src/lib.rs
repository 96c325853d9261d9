//! A typed client for the Scryfall card data API.

mod client;
mod collection;
mod format;
mod types;

pub use crate::{
    client::{
        AutocompleteQueryBuilder,
        CardIdKind,
        Client,
        ClientBuilder,
        IdQueryBuilder,
        NameMethod,
        NamedQueryBuilder,
        RandomQueryBuilder,
        SearchQueryBuilder,
        SetNumberQueryBuilder,
        SortDirection,
        SortOrder,
        UniqueMode,
    },
    collection::CardIdentifier,
    format::{
        CardFormat,
        Csv,
        Image,
        Json,
        ListFormat,
        Text,
    },
    types::*,
};
pub use reqwest::StatusCode;
pub use url::Url;

use std::time::Duration;

/// The default api base url
pub const DEFAULT_BASE_URL: &str = "https://api.scryfall.com/";

/// The max number of identifiers the collection endpoint accepts per request
pub const COLLECTION_CHUNK_SIZE: usize = 75;

/// The default delay between sequential requests.
///
/// Scryfall asks for 50-100 milliseconds between requests.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(100);

/// Library Error Type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reqwest HTTP Error
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    /// Invalid JSON
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),

    /// The base url cannot have path segments appended to it
    #[error("the base url \"{0}\" cannot be a base")]
    InvalidBaseUrl(Url),

    /// The api sent an error object
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The api responded with a failing status and no error object
    #[error("invalid status {0}")]
    InvalidStatus(StatusCode),

    /// The api sent a different object than the one requested
    #[error("expected a \"{}\" object, got \"{}\"", .expected.as_str(), .actual.as_str())]
    UnexpectedObject {
        /// The requested object kind
        expected: ObjectKind,
        /// The received object kind
        actual: ObjectKind,
    },

    /// A query string was empty
    #[error("the query is empty")]
    EmptyQuery,

    /// A page url pointed outside the configured api
    #[error("the page url \"{0}\" is not part of the api")]
    InvalidPageUrl(Url),
}

impl Error {
    /// Get the api error, if this is one.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }

    /// Returns true if the api reported that the requested object does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api(error) => error.status == 404,
            Self::InvalidStatus(status) => *status == StatusCode::NOT_FOUND,
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn it_works() {
        let client = Client::new();
        let card = client
            .named("Lightning Bolt", NameMethod::Exact)
            .execute::<Json>()
            .await
            .expect("failed to get card");
        assert_eq!(card.name, "Lightning Bolt");
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn random_image() {
        let client = Client::new();
        let url = client
            .random()
            .version(Some(ImageSize::Small))
            .execute::<Image>()
            .await
            .expect("failed to get random card image");
        dbg!(url);
    }

    #[test]
    fn not_found() {
        let error: ApiError =
            serde_json::from_str(include_str!("../test_data/error.json")).unwrap();
        let error = Error::from(error);
        assert!(error.is_not_found());
        assert!(error.as_api_error().is_some());
        assert!(!Error::InvalidStatus(StatusCode::BAD_GATEWAY).is_not_found());
    }
}
