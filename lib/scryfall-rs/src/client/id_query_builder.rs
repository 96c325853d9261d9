use super::CardParams;
use crate::{
    CardFormat,
    Client,
    Error,
    ImageSize,
    UnknownValueError,
};
use std::str::FromStr;
use tracing::debug;
use url::Url;

/// The kind of id used to look up a card
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CardIdKind {
    /// A scryfall uuid
    Uuid,
    /// A Magic Online id
    Mtgo,
    /// A Gatherer multiverse id
    Multiverse,
    /// An Arena id
    Arena,
    /// A TCGplayer product id
    TcgPlayer,
    /// A Cardmarket product id
    Cardmarket,
}

impl CardIdKind {
    /// The path segment for this kind of id.
    ///
    /// Scryfall uuids do not have one.
    pub fn path_segment(self) -> Option<&'static str> {
        match self {
            Self::Uuid => None,
            Self::Mtgo => Some("mtgo"),
            Self::Multiverse => Some("multiverse"),
            Self::Arena => Some("arena"),
            Self::TcgPlayer => Some("tcgplayer"),
            Self::Cardmarket => Some("cardmarket"),
        }
    }
}

impl FromStr for CardIdKind {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uuid" | "scryfall" => Ok(Self::Uuid),
            "mtgo" => Ok(Self::Mtgo),
            "multiverse" => Ok(Self::Multiverse),
            "arena" => Ok(Self::Arena),
            "tcgplayer" => Ok(Self::TcgPlayer),
            "cardmarket" => Ok(Self::Cardmarket),
            _ => Err(UnknownValueError::new("card id kind", s)),
        }
    }
}

/// A builder for api queries for a card by id
#[derive(Debug, Copy, Clone)]
pub struct IdQueryBuilder<'a> {
    /// The id kind
    pub kind: CardIdKind,

    /// The id
    pub id: &'a str,

    params: CardParams,

    /// The client ref.
    client: &'a Client,
}

impl<'a> IdQueryBuilder<'a> {
    /// Make a new [`IdQueryBuilder`].
    pub fn new(client: &'a Client, kind: CardIdKind, id: &'a str) -> Self {
        Self {
            kind,
            id,
            params: CardParams::default(),

            client,
        }
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
        if self.id.is_empty() {
            return Err(Error::EmptyQuery);
        }

        let mut url = match self.kind.path_segment() {
            Some(segment) => self.client.endpoint(&["cards", segment, self.id])?,
            None => self.client.endpoint(&["cards", self.id])?,
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
        debug!(%url, "getting card by id");
        let response = self.client.send(self.client.client.get(url)).await?;
        F::read(response).await
    }
}
