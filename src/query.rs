use crate::{
    client_data::{
        CacheStatsBuilder,
        CacheStatsProvider,
    },
    util::{
        ArcAnyhowError,
        RequestMap,
        TimedCache,
        TimedCacheEntry,
    },
};
use scryfall::{
    Card,
    CardFormat,
    CardIdKind,
    CardIdentifier,
    Catalog,
    Csv,
    ImageSize,
    Json,
    LanguageCode,
    List,
    NameMethod,
    Ruling,
    SortDirection,
    SortOrder,
    UniqueMode,
};
use std::{
    future::Future,
    num::NonZeroU32,
    sync::Arc,
    time::Duration,
};
use tracing::{
    debug,
    info,
};

/// The result of a query, shared between everyone who asked for it.
pub type QueryResult<T> = Result<Arc<TimedCacheEntry<T>>, ArcAnyhowError>;

/// A query for a single card
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CardQuery {
    Named {
        name: String,
        method: NameMethod,
        set: Option<String>,
    },
    Random {
        query: Option<String>,
    },
    SetNumber {
        set: String,
        collector_number: String,
        lang: Option<LanguageCode>,
    },
    ById {
        kind: CardIdKind,
        id: String,
    },
}

impl CardQuery {
    /// Returns true if asking twice may give different cards
    pub fn is_random(&self) -> bool {
        matches!(self, Self::Random { .. })
    }

    /// Run this query against the api in the given format.
    ///
    /// `back_face` and `version` only affect image requests.
    pub async fn execute<F>(
        &self,
        client: &scryfall::Client,
        back_face: bool,
        version: Option<ImageSize>,
    ) -> Result<F::Output, scryfall::Error>
    where
        F: CardFormat,
    {
        match self {
            Self::Named { name, method, set } => {
                client
                    .named(name, *method)
                    .set(set.as_deref())
                    .back_face(back_face)
                    .version(version)
                    .execute::<F>()
                    .await
            }
            Self::Random { query } => {
                client
                    .random()
                    .query(query.as_deref())
                    .back_face(back_face)
                    .version(version)
                    .execute::<F>()
                    .await
            }
            Self::SetNumber {
                set,
                collector_number,
                lang,
            } => {
                client
                    .set_number(set, collector_number)
                    .lang(*lang)
                    .back_face(back_face)
                    .version(version)
                    .execute::<F>()
                    .await
            }
            Self::ById { kind, id } => {
                client
                    .by_id(*kind, id)
                    .back_face(back_face)
                    .version(version)
                    .execute::<F>()
                    .await
            }
        }
    }
}

/// Search options
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SearchOptions {
    pub query: String,
    pub unique: Option<UniqueMode>,
    pub order: Option<SortOrder>,
    pub dir: Option<SortDirection>,
    pub include_extras: bool,
    pub include_multilingual: bool,
    pub page: Option<NonZeroU32>,

    /// Follow every page instead of fetching one
    pub all_pages: bool,
}

impl SearchOptions {
    /// Make search options for a query with the api defaults
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    fn builder<'a>(&'a self, client: &'a scryfall::Client) -> scryfall::SearchQueryBuilder<'a> {
        let mut builder = client.search(&self.query);
        builder
            .unique(self.unique)
            .order(self.order)
            .dir(self.dir)
            .include_extras(self.include_extras)
            .include_multilingual(self.include_multilingual)
            .page(self.page);
        builder
    }

    async fn execute(&self, client: &scryfall::Client) -> Result<List<Card>, scryfall::Error> {
        let builder = self.builder(client);
        if self.all_pages {
            builder.execute_all().await
        } else {
            builder.execute::<Json>().await
        }
    }
}

/// A hashable description of a query, used as the cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Card(CardQuery),
    Search(SearchOptions),
    Autocomplete { query: String, include_extras: bool },
    Collection(Vec<CardIdentifier>),
    Rulings { id: String },
}

/// The state of a query, as a card view shows it
#[derive(Debug)]
pub enum QueryState<T> {
    /// The query has not finished
    Loading,

    /// The query failed
    Error(ArcAnyhowError),

    /// The query finished with data
    Success(T),

    /// The query finished without data
    Empty,
}

impl<T> QueryState<T> {
    /// Make a finished state from a result
    pub fn from_result(result: Result<T, ArcAnyhowError>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(error) => Self::Error(error),
        }
    }

    /// Turn a success into `Empty` if the data has nothing to show
    pub fn empty_if<F>(self, is_empty: F) -> Self
    where
        F: FnOnce(&T) -> bool,
    {
        match self {
            Self::Success(data) if is_empty(&data) => Self::Empty,
            state => state,
        }
    }
}

/// A caching scryfall client.
///
/// Fresh results are served from memory.
/// Identical queries made at the same time share one request.
/// Failures are returned as-is, never retried and never cached.
#[derive(Debug, Clone)]
pub struct QueryClient {
    client: scryfall::Client,

    card_cache: TimedCache<QueryKey, Card>,
    list_cache: TimedCache<QueryKey, List<Card>>,
    catalog_cache: TimedCache<QueryKey, Catalog>,
    rulings_cache: TimedCache<QueryKey, List<Ruling>>,

    card_requests: Arc<RequestMap<QueryKey, QueryResult<Card>>>,
    list_requests: Arc<RequestMap<QueryKey, QueryResult<List<Card>>>>,
    catalog_requests: Arc<RequestMap<QueryKey, QueryResult<Catalog>>>,
    rulings_requests: Arc<RequestMap<QueryKey, QueryResult<List<Ruling>>>>,
}

impl QueryClient {
    /// Make a new [`QueryClient`] where results go stale after `stale_time`.
    pub fn new(client: scryfall::Client, stale_time: Duration) -> Self {
        Self {
            client,

            card_cache: TimedCache::with_stale_time(stale_time),
            list_cache: TimedCache::with_stale_time(stale_time),
            catalog_cache: TimedCache::with_stale_time(stale_time),
            rulings_cache: TimedCache::with_stale_time(stale_time),

            card_requests: Arc::new(RequestMap::new()),
            list_requests: Arc::new(RequestMap::new()),
            catalog_requests: Arc::new(RequestMap::new()),
            rulings_requests: Arc::new(RequestMap::new()),
        }
    }

    /// The inner api client, for uncached requests
    pub fn api(&self) -> &scryfall::Client {
        &self.client
    }

    /// Get a card.
    ///
    /// Random cards are never cached.
    pub async fn card(&self, query: CardQuery) -> QueryResult<Card> {
        if query.is_random() {
            debug!(?query, "skipping cache for random card");
            return query
                .execute::<Json>(&self.client, false, None)
                .await
                .map(|card| Arc::new(TimedCacheEntry::new(card)))
                .map_err(ArcAnyhowError::from);
        }

        let key = QueryKey::Card(query.clone());
        fetch_cached(
            &self.client,
            &self.card_cache,
            &self.card_requests,
            key,
            move |client| async move { query.execute::<Json>(&client, false, None).await },
        )
        .await
    }

    /// Get the text rendering of a card. This is not cached.
    pub async fn card_text(&self, query: &CardQuery) -> Result<String, scryfall::Error> {
        query
            .execute::<scryfall::Text>(&self.client, false, None)
            .await
    }

    /// Resolve the image url of a card. This is not cached.
    pub async fn card_image(
        &self,
        query: &CardQuery,
        back_face: bool,
        version: Option<ImageSize>,
    ) -> Result<scryfall::Url, scryfall::Error> {
        query
            .execute::<scryfall::Image>(&self.client, back_face, version)
            .await
    }

    /// Search for cards
    pub async fn search(&self, options: SearchOptions) -> QueryResult<List<Card>> {
        let key = QueryKey::Search(options.clone());
        fetch_cached(
            &self.client,
            &self.list_cache,
            &self.list_requests,
            key,
            move |client| async move { options.execute(&client).await },
        )
        .await
    }

    /// Search for cards, as csv. This is not cached.
    pub async fn search_csv(&self, options: &SearchOptions) -> Result<String, scryfall::Error> {
        options.builder(&self.client).execute::<Csv>().await
    }

    /// Autocomplete a card name
    pub async fn autocomplete(&self, query: String, include_extras: bool) -> QueryResult<Catalog> {
        let key = QueryKey::Autocomplete {
            query: query.clone(),
            include_extras,
        };
        fetch_cached(
            &self.client,
            &self.catalog_cache,
            &self.catalog_requests,
            key,
            move |client| async move {
                client
                    .autocomplete(&query)
                    .include_extras(include_extras)
                    .execute()
                    .await
            },
        )
        .await
    }

    /// Get many cards at once
    pub async fn collection(&self, identifiers: Vec<CardIdentifier>) -> QueryResult<List<Card>> {
        let key = QueryKey::Collection(identifiers.clone());
        fetch_cached(
            &self.client,
            &self.list_cache,
            &self.list_requests,
            key,
            move |client| async move { client.collection(&identifiers).await },
        )
        .await
    }

    /// Get the rulings for a card by scryfall id
    pub async fn rulings(&self, id: String) -> QueryResult<List<Ruling>> {
        let key = QueryKey::Rulings { id: id.clone() };
        fetch_cached(
            &self.client,
            &self.rulings_cache,
            &self.rulings_requests,
            key,
            move |client| async move { client.rulings(&id).await },
        )
        .await
    }

    /// Drop stale entries from every cache
    pub fn trim(&self) {
        let trimmed = [
            self.card_cache.trim(),
            self.list_cache.trim(),
            self.catalog_cache.trim(),
            self.rulings_cache.trim(),
        ];
        if trimmed.iter().any(|trimmed| *trimmed) {
            debug!("trimmed query caches");
        }
    }
}

impl CacheStatsProvider for QueryClient {
    fn publish_cache_stats(&self, cache_stats_builder: &mut CacheStatsBuilder) {
        cache_stats_builder.publish_stat("query", "card_cache", self.card_cache.len() as f32);
        cache_stats_builder.publish_stat("query", "list_cache", self.list_cache.len() as f32);
        cache_stats_builder.publish_stat(
            "query",
            "catalog_cache",
            self.catalog_cache.len() as f32,
        );
        cache_stats_builder.publish_stat(
            "query",
            "rulings_cache",
            self.rulings_cache.len() as f32,
        );

        let in_flight = self.card_requests.len()
            + self.list_requests.len()
            + self.catalog_requests.len()
            + self.rulings_requests.len();
        cache_stats_builder.publish_stat("requests", "in_flight", in_flight as f32);
    }
}

/// Serve a query from a cache, or fetch it once no matter how many callers ask.
async fn fetch_cached<T, FN, F>(
    client: &scryfall::Client,
    cache: &TimedCache<QueryKey, T>,
    requests: &RequestMap<QueryKey, QueryResult<T>>,
    key: QueryKey,
    fetch: FN,
) -> QueryResult<T>
where
    T: Send + Sync + 'static,
    FN: FnOnce(scryfall::Client) -> F,
    F: Future<Output = Result<T, scryfall::Error>> + Send + 'static,
{
    if let Some(entry) = cache.get_if_fresh(&key) {
        debug!(?key, age = ?entry.age(), "cache hit");
        return Ok(entry);
    }

    let cache = cache.clone();
    let client = client.clone();
    requests
        .get_or_fetch(key.clone(), move || {
            let fetch_future = fetch(client);
            async move {
                info!(?key, "fetching");
                let value = fetch_future
                    .await
                    .map_err(ArcAnyhowError::from)?;
                Ok(cache.insert_and_get(key, value))
            }
        })
        .await
}
