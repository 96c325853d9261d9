use super::CardParams;
use crate::{
    CardFormat,
    Client,
    Error,
    ImageSize,
};
use tracing::debug;
use url::Url;

/// How to match a card name
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NameMethod {
    /// The name must match exactly, ignoring case and punctuation
    Exact,
    /// The name may be partial or misspelled, if it is unambiguous
    Fuzzy,
}

impl NameMethod {
    /// The query key the name is sent under
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
        }
    }
}

/// A builder for named card api queries
#[derive(Debug, Copy, Clone)]
pub struct NamedQueryBuilder<'a> {
    /// The card name
    pub name: &'a str,

    /// How to match the name
    pub method: NameMethod,

    /// Limit the match to a set code
    pub set: Option<&'a str>,

    params: CardParams,

    /// The client ref.
    client: &'a Client,
}

impl<'a> NamedQueryBuilder<'a> {
    /// Make a new [`NamedQueryBuilder`].
    pub fn new(client: &'a Client, name: &'a str, method: NameMethod) -> Self {
        Self {
            name,
            method,
            set: None,
            params: CardParams::default(),

            client,
        }
    }

    /// Limit the match to a set code
    pub fn set(&mut self, set: Option<&'a str>) -> &mut Self {
        self.set = set;
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
        if self.name.is_empty() {
            return Err(Error::EmptyQuery);
        }

        let mut url = self.client.endpoint(&["cards", "named"])?;
        {
            let mut query_pairs_mut = url.query_pairs_mut();
            query_pairs_mut.append_pair(self.method.as_str(), self.name);

            if let Some(set) = self.set {
                query_pairs_mut.append_pair("set", set);
            }
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
        debug!(%url, "getting named card");
        let response = self.client.send(self.client.client.get(url)).await?;
        F::read(response).await
    }
}
