use std::{
    fmt::{
        Debug,
        Display,
    },
    sync::Arc,
};

/// A failed query result.
///
/// One failed request is handed to every caller that was waiting on it, so the error is shared.
#[derive(Clone)]
pub struct ArcAnyhowError(Arc<anyhow::Error>);

impl ArcAnyhowError {
    /// Make a new [`ArcAnyhowError`]
    pub fn new(error: anyhow::Error) -> Self {
        Self(Arc::new(error))
    }

    /// Look for an error of a given type in the chain
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: Display + Debug + Send + Sync + 'static,
    {
        self.0.downcast_ref()
    }

    /// Get the scryfall api error, if the query failed with one.
    pub fn api_error(&self) -> Option<&scryfall::ApiError> {
        self.downcast_ref::<scryfall::Error>()
            .and_then(scryfall::Error::as_api_error)
    }
}

impl From<scryfall::Error> for ArcAnyhowError {
    fn from(error: scryfall::Error) -> Self {
        Self::new(error.into())
    }
}

impl Debug for ArcAnyhowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&*self.0, f)
    }
}

impl Display for ArcAnyhowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&*self.0, f)
    }
}

impl std::error::Error for ArcAnyhowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.as_ref().source()
    }
}
