use crate::{
    Card,
    Client,
    Error,
    Json,
    List,
    ListFormat,
    UnknownValueError,
};
use std::{
    num::NonZeroU32,
    str::FromStr,
};
use tracing::debug;
use url::Url;

/// How to collapse duplicate search results
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UniqueMode {
    /// One result per card
    Cards,
    /// One result per unique artwork
    Art,
    /// Every printing
    Prints,
}

impl UniqueMode {
    /// The query value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cards => "cards",
            Self::Art => "art",
            Self::Prints => "prints",
        }
    }
}

impl FromStr for UniqueMode {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Cards, Self::Art, Self::Prints]
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownValueError::new("unique mode", s))
    }
}

/// The field to sort search results by
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Name,
    Set,
    Released,
    Rarity,
    Color,
    Usd,
    Tix,
    Eur,
    Cmc,
    Power,
    Toughness,
    Edhrec,
    Penny,
    Artist,
    Review,
}

impl SortOrder {
    /// Every sort order
    pub const ALL: &'static [Self] = &[
        Self::Name,
        Self::Set,
        Self::Released,
        Self::Rarity,
        Self::Color,
        Self::Usd,
        Self::Tix,
        Self::Eur,
        Self::Cmc,
        Self::Power,
        Self::Toughness,
        Self::Edhrec,
        Self::Penny,
        Self::Artist,
        Self::Review,
    ];

    /// The query value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Set => "set",
            Self::Released => "released",
            Self::Rarity => "rarity",
            Self::Color => "color",
            Self::Usd => "usd",
            Self::Tix => "tix",
            Self::Eur => "eur",
            Self::Cmc => "cmc",
            Self::Power => "power",
            Self::Toughness => "toughness",
            Self::Edhrec => "edhrec",
            Self::Penny => "penny",
            Self::Artist => "artist",
            Self::Review => "review",
        }
    }
}

impl FromStr for SortOrder {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| UnknownValueError::new("sort order", s))
    }
}

/// The direction to sort search results in
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Let the api pick
    Auto,
    Asc,
    Desc,
}

impl SortDirection {
    /// The query value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(UnknownValueError::new("sort direction", s)),
        }
    }
}

/// A builder for card search api queries
#[derive(Debug, Copy, Clone)]
pub struct SearchQueryBuilder<'a> {
    /// The full text search query
    pub query: &'a str,

    /// How to collapse duplicates
    pub unique: Option<UniqueMode>,

    /// The sort field
    pub order: Option<SortOrder>,

    /// The sort direction
    pub dir: Option<SortDirection>,

    /// Include extra cards, like tokens
    pub include_extras: bool,

    /// Include cards in every language
    pub include_multilingual: bool,

    /// Include rare printing variations
    pub include_variations: bool,

    /// The page #.
    ///
    /// Starts at 1.
    pub page: Option<NonZeroU32>,

    /// Prettify json
    pub pretty: bool,

    /// The client ref.
    client: &'a Client,
}

impl<'a> SearchQueryBuilder<'a> {
    /// Make a new [`SearchQueryBuilder`].
    pub fn new(client: &'a Client, query: &'a str) -> Self {
        Self {
            query,
            unique: None,
            order: None,
            dir: None,
            include_extras: false,
            include_multilingual: false,
            include_variations: false,
            page: None,
            pretty: false,

            client,
        }
    }

    /// Set the duplicate handling mode
    pub fn unique(&mut self, unique: Option<UniqueMode>) -> &mut Self {
        self.unique = unique;
        self
    }

    /// Set the sort field
    pub fn order(&mut self, order: Option<SortOrder>) -> &mut Self {
        self.order = order;
        self
    }

    /// Set the sort direction
    pub fn dir(&mut self, dir: Option<SortDirection>) -> &mut Self {
        self.dir = dir;
        self
    }

    /// Include extra cards, like tokens and planes
    pub fn include_extras(&mut self, include_extras: bool) -> &mut Self {
        self.include_extras = include_extras;
        self
    }

    /// Include cards in every language
    pub fn include_multilingual(&mut self, include_multilingual: bool) -> &mut Self {
        self.include_multilingual = include_multilingual;
        self
    }

    /// Include rare printing variations
    pub fn include_variations(&mut self, include_variations: bool) -> &mut Self {
        self.include_variations = include_variations;
        self
    }

    /// Set the page number
    pub fn page(&mut self, page: Option<NonZeroU32>) -> &mut Self {
        self.page = page;
        self
    }

    /// Prettify json
    pub fn pretty(&mut self, pretty: bool) -> &mut Self {
        self.pretty = pretty;
        self
    }

    /// Get the api url for a format.
    ///
    /// # Errors
    /// This fails if:
    /// 1. The query is empty
    /// 2. The base url is invalid
    pub fn get_url<F>(&self) -> Result<Url, Error>
    where
        F: ListFormat,
    {
        if self.query.is_empty() {
            return Err(Error::EmptyQuery);
        }

        let mut page_buffer = itoa::Buffer::new();
        let mut url = self.client.endpoint(&["cards", "search"])?;

        {
            let mut query_pairs_mut = url.query_pairs_mut();
            query_pairs_mut.append_pair("q", self.query);

            if let Some(unique) = self.unique {
                query_pairs_mut.append_pair("unique", unique.as_str());
            }

            if let Some(order) = self.order {
                query_pairs_mut.append_pair("order", order.as_str());
            }

            if let Some(dir) = self.dir {
                query_pairs_mut.append_pair("dir", dir.as_str());
            }

            if self.include_extras {
                query_pairs_mut.append_pair("include_extras", "true");
            }

            if self.include_multilingual {
                query_pairs_mut.append_pair("include_multilingual", "true");
            }

            if self.include_variations {
                query_pairs_mut.append_pair("include_variations", "true");
            }

            if let Some(page) = self.page {
                query_pairs_mut.append_pair("page", page_buffer.format(page.get()));
            }

            query_pairs_mut.append_pair("format", F::FORMAT);

            if self.pretty {
                query_pairs_mut.append_pair("pretty", "true");
            }
        }

        Ok(url)
    }

    /// Execute the api query and get one page of results.
    ///
    /// # Errors
    /// A search with no matches is reported by the api as a not found error.
    pub async fn execute<F>(&self) -> Result<F::Output, Error>
    where
        F: ListFormat,
    {
        let url = self.get_url::<F>()?;
        debug!(%url, "searching");
        let response = self.client.send(self.client.client.get(url)).await?;
        F::read(response).await
    }

    /// Execute the api query, following every page after the first.
    ///
    /// Pages are requested one at a time, waiting the client's request delay between them.
    pub async fn execute_all(&self) -> Result<List<Card>, Error> {
        let mut list = self.execute::<Json>().await?;

        // `merge` takes the pagination state of the newest page.
        while list.has_more {
            self.client.delay().await;
            match self.client.next_page(&list).await? {
                Some(page) => list.merge(page),
                None => break,
            }
        }

        list.next_page = None;
        list.has_more = false;
        Ok(list)
    }
}
