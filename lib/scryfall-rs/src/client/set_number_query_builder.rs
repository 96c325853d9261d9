use super::CardParams;
use crate::{
    CardFormat,
    Client,
    Error,
    ImageSize,
    LanguageCode,
};
use tracing::debug;
use url::Url;

/// A builder for api queries for a card by set code and collector number
#[derive(Debug, Copy, Clone)]
pub struct SetNumberQueryBuilder<'a> {
    /// The set code
    pub code: &'a str,

    /// The collector number
    pub number: &'a str,

    /// The printing language.
    ///
    /// The api picks the english printing if this is not set.
    pub lang: Option<LanguageCode>,

    params: CardParams,

    /// The client ref.
    client: &'a Client,
}

impl<'a> SetNumberQueryBuilder<'a> {
    /// Make a new [`SetNumberQueryBuilder`].
    pub fn new(client: &'a Client, code: &'a str, number: &'a str) -> Self {
        Self {
            code,
            number,
            lang: None,
            params: CardParams::default(),

            client,
        }
    }

    /// Set the printing language
    pub fn lang(&mut self, lang: Option<LanguageCode>) -> &mut Self {
        self.lang = lang;
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
        if self.code.is_empty() || self.number.is_empty() {
            return Err(Error::EmptyQuery);
        }

        let mut url = match self.lang {
            Some(lang) => self
                .client
                .endpoint(&["cards", self.code, self.number, lang.as_str()])?,
            None => self.client.endpoint(&["cards", self.code, self.number])?,
        };
        self.params.append_to(&mut url, F::FORMAT);

        Ok(url)
    }

    /// Execute the api query.
    pub async fn execute<F>(&self) -> Result<F::Output, Error>
    where
        F: CardFormat,
    {
        let url = self.get_url::<F>()?;
        debug!(%url, "getting card by set and number");
        let response = self.client.send(self.client.client.get(url)).await?;
        F::read(response).await
    }
}
