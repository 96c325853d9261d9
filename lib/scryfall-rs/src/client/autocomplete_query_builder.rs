use crate::{
    Catalog,
    Client,
    Error,
    ObjectKind,
};
use url::Url;

/// A builder for card name autocomplete api queries
#[derive(Debug, Copy, Clone)]
pub struct AutocompleteQueryBuilder<'a> {
    /// The partial name
    pub query: &'a str,

    /// Include extra cards, like tokens
    pub include_extras: bool,

    /// Prettify json
    pub pretty: bool,

    /// The client ref.
    client: &'a Client,
}

impl<'a> AutocompleteQueryBuilder<'a> {
    /// Make a new [`AutocompleteQueryBuilder`].
    pub fn new(client: &'a Client, query: &'a str) -> Self {
        Self {
            query,
            include_extras: false,
            pretty: false,

            client,
        }
    }

    /// Include extra cards, like tokens and planes
    pub fn include_extras(&mut self, include_extras: bool) -> &mut Self {
        self.include_extras = include_extras;
        self
    }

    /// Prettify json
    pub fn pretty(&mut self, pretty: bool) -> &mut Self {
        self.pretty = pretty;
        self
    }

    /// Get the api url.
    pub fn get_url(&self) -> Result<Url, Error> {
        let mut url = self.client.endpoint(&["cards", "autocomplete"])?;
        {
            let mut query_pairs_mut = url.query_pairs_mut();
            query_pairs_mut.append_pair("q", self.query);

            if self.include_extras {
                query_pairs_mut.append_pair("include_extras", "true");
            }

            if self.pretty {
                query_pairs_mut.append_pair("pretty", "true");
            }
        }

        Ok(url)
    }

    /// Execute the api query.
    ///
    /// # Returns
    /// Returns an empty catalog for queries shorter than 2 characters.
    pub async fn execute(&self) -> Result<Catalog, Error> {
        let url = self.get_url()?;
        self.client.get_json(url, ObjectKind::Catalog).await
    }
}
