use super::CardParams;
use crate::{
    CardFormat,
    Client,
    Error,
    ImageSize,
};
use tracing::debug;
use url::Url;

/// A builder for random card api queries
#[derive(Debug, Copy, Clone)]
pub struct RandomQueryBuilder<'a> {
    /// Limit the pool to cards matching a search query
    pub query: Option<&'a str>,

    params: CardParams,

    /// The client ref.
    client: &'a Client,
}

impl<'a> RandomQueryBuilder<'a> {
    /// Make a new [`RandomQueryBuilder`].
    pub fn new(client: &'a Client) -> Self {
        Self {
            query: None,
            params: CardParams::default(),

            client,
        }
    }

    /// Limit the pool to cards matching a search query
    pub fn query(&mut self, query: Option<&'a str>) -> &mut Self {
        self.query = query;
        self
    }

    /// Get the back face for image requests of double-faced cards
    pub fn back_face(&mut self, back_face: bool) -> &mut Self {
        self.params.back_face = back_face;
        self
    }

    /// Set the image version for image requests
    pub fn version(&mut self, version: Option<ImageSize>) -> &mut Self {
        self.params.version = version;
        self
    }

    /// Prettify json
    pub fn pretty(&mut self, pretty: bool) -> &mut Self {
        self.params.pretty = pretty;
        self
    }

    /// Get the api url for a format.
    pub fn get_url<F>(&self) -> Result<Url, Error>
    where
        F: CardFormat,
    {
        let mut url = self.client.endpoint(&["cards", "random"])?;
        if let Some(query) = self.query.filter(|query| !query.is_empty()) {
            url.query_pairs_mut().append_pair("q", query);
        }
        self.params.append_to(&mut url, F::FORMAT);

        Ok(url)
    }

    /// Execute the api query.
    pub async fn execute<F>(&self) -> Result<F::Output, Error>
    where
        F: CardFormat,
    {
        let url = self.get_url::<F>()?;
        debug!(%url, "getting random card");
        let response = self.client.send(self.client.client.get(url)).await?;
        F::read(response).await
    }
}
