mod autocomplete_query_builder;
mod id_query_builder;
mod named_query_builder;
mod random_query_builder;
mod search_query_builder;
mod set_number_query_builder;

pub use self::{
    autocomplete_query_builder::AutocompleteQueryBuilder,
    id_query_builder::{
        CardIdKind,
        IdQueryBuilder,
    },
    named_query_builder::{
        NameMethod,
        NamedQueryBuilder,
    },
    random_query_builder::RandomQueryBuilder,
    search_query_builder::{
        SearchQueryBuilder,
        SortDirection,
        SortOrder,
        UniqueMode,
    },
    set_number_query_builder::SetNumberQueryBuilder,
};
use crate::{
    format::read_json,
    ApiError,
    Error,
    ImageSize,
    List,
    ManaCost,
    ObjectKind,
    Ruling,
    Set,
};
use reqwest::header::{
    HeaderMap,
    HeaderValue,
};
use std::time::Duration;
use tracing::debug;
use url::Url;

const DEFAULT_USER_AGENT: &str = concat!("scryfall-rs/", env!("CARGO_PKG_VERSION"));
const ACCEPT_VALUE: &str = "application/json;q=0.9,*/*;q=0.8";

/// A Scryfall Client
#[derive(Debug, Clone)]
pub struct Client {
    /// The inner http client.
    ///
    /// This probably shouldn't be used by you.
    pub client: reqwest::Client,

    base_url: Url,
    request_delay: Duration,
}

impl Client {
    /// Make a new [`Client`] for the public api.
    pub fn new() -> Self {
        Self::builder()
            .build()
            .expect("failed to build scryfall client")
    }

    /// Make a [`ClientBuilder`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The api base url
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The delay between sequential requests
    pub fn request_delay(&self) -> Duration {
        self.request_delay
    }

    /// Make an api url from path segments.
    ///
    /// Each segment is percent-encoded on its own.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Wait the request delay.
    pub(crate) async fn delay(&self) {
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }
    }

    /// Send a request, turning failing statuses into errors.
    ///
    /// If the api sent an error object, it is returned as [`Error::Api`].
    pub(crate) async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, Error> {
        let response = request.send().await?;
        let status = response.status();
        debug!(url = %response.url(), %status, "got response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await?;
        match serde_json::from_slice::<ApiError>(&body) {
            Ok(error) => Err(Error::Api(error)),
            Err(_) => Err(Error::InvalidStatus(status)),
        }
    }

    /// Send a GET request to a url and decode the json object of the given kind.
    pub(crate) async fn get_json<T>(
        &self,
        url: Url,
        kind: ObjectKind,
    ) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!(%url, "GET");
        let response = self.send(self.client.get(url)).await?;
        read_json(response, kind).await
    }

    /// Create a builder to search for cards.
    pub fn search<'a>(&'a self, query: &'a str) -> SearchQueryBuilder<'a> {
        SearchQueryBuilder::new(self, query)
    }

    /// Create a builder to get a card by name.
    pub fn named<'a>(&'a self, name: &'a str, method: NameMethod) -> NamedQueryBuilder<'a> {
        NamedQueryBuilder::new(self, name, method)
    }

    /// Create a builder to autocomplete a partial card name.
    pub fn autocomplete<'a>(&'a self, query: &'a str) -> AutocompleteQueryBuilder<'a> {
        AutocompleteQueryBuilder::new(self, query)
    }

    /// Create a builder to get a random card.
    pub fn random(&self) -> RandomQueryBuilder<'_> {
        RandomQueryBuilder::new(self)
    }

    /// Create a builder to get a card by set code and collector number.
    pub fn set_number<'a>(&'a self, code: &'a str, number: &'a str) -> SetNumberQueryBuilder<'a> {
        SetNumberQueryBuilder::new(self, code, number)
    }

    /// Create a builder to get a card by one of its ids.
    pub fn by_id<'a>(&'a self, kind: CardIdKind, id: &'a str) -> IdQueryBuilder<'a> {
        IdQueryBuilder::new(self, kind, id)
    }

    /// Get the page after this one.
    ///
    /// # Returns
    /// Returns `None` if this is the last page.
    pub async fn next_page<T>(&self, list: &List<T>) -> Result<Option<List<T>>, Error>
    where
        T: serde::de::DeserializeOwned,
    {
        let next_page = match (list.has_more, list.next_page.as_ref()) {
            (true, Some(next_page)) => next_page,
            _ => return Ok(None),
        };

        if next_page.origin() != self.base_url.origin() {
            return Err(Error::InvalidPageUrl(next_page.clone()));
        }

        let page = self.get_json(next_page.clone(), ObjectKind::List).await?;
        Ok(Some(page))
    }

    /// Get the rulings for a card by its scryfall id.
    #[tracing::instrument(skip(self))]
    pub async fn rulings(&self, id: &str) -> Result<List<Ruling>, Error> {
        if id.is_empty() {
            return Err(Error::EmptyQuery);
        }
        let url = self.endpoint(&["cards", id, "rulings"])?;
        self.get_json(url, ObjectKind::List).await
    }

    /// Get a set by its code.
    #[tracing::instrument(skip(self))]
    pub async fn set(&self, code: &str) -> Result<Set, Error> {
        if code.is_empty() {
            return Err(Error::EmptyQuery);
        }
        let url = self.endpoint(&["sets", code])?;
        self.get_json(url, ObjectKind::Set).await
    }

    /// Parse a mana cost, like `{2}{G}{G}`, or a loose one, like `2gg`.
    #[tracing::instrument(skip(self))]
    pub async fn parse_mana(&self, cost: &str) -> Result<ManaCost, Error> {
        if cost.is_empty() {
            return Err(Error::EmptyQuery);
        }
        let mut url = self.endpoint(&["symbology", "parse-mana"])?;
        url.query_pairs_mut().append_pair("cost", cost);
        self.get_json(url, ObjectKind::ManaCost).await
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

/// A builder for a [`Client`]
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    user_agent: String,
    timeout: Duration,
    connect_timeout: Duration,
    request_delay: Duration,
}

impl ClientBuilder {
    /// Make a new [`ClientBuilder`] with the defaults for the public api.
    pub fn new() -> Self {
        Self {
            base_url: crate::DEFAULT_BASE_URL.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            request_delay: crate::DEFAULT_REQUEST_DELAY,
        }
    }

    /// Set the api base url.
    pub fn base_url(&mut self, base_url: impl Into<String>) -> &mut Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the user agent.
    ///
    /// The api rejects requests without one.
    pub fn user_agent(&mut self, user_agent: impl Into<String>) -> &mut Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the total request timeout.
    pub fn timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(&mut self, connect_timeout: Duration) -> &mut Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Set the delay between sequential requests.
    pub fn request_delay(&mut self, request_delay: Duration) -> &mut Self {
        self.request_delay = request_delay;
        self
    }

    /// Build the [`Client`].
    pub fn build(&self) -> Result<Client, Error> {
        let base_url = Url::parse(&self.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(base_url));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static(ACCEPT_VALUE),
        );

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .user_agent(self.user_agent.as_str())
            .connect_timeout(self.connect_timeout)
            .timeout(self.timeout)
            .build()?;

        Ok(Client {
            client,
            base_url,
            request_delay: self.request_delay,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Query options shared by every endpoint that returns a single card.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CardParams {
    /// Get the back face image
    pub(crate) back_face: bool,
    /// The image version
    pub(crate) version: Option<ImageSize>,
    /// Prettify json
    pub(crate) pretty: bool,
}

impl CardParams {
    /// Append these options and the format to a url.
    pub(crate) fn append_to(&self, url: &mut Url, format: &str) {
        let mut query_pairs = url.query_pairs_mut();
        query_pairs.append_pair("format", format);

        if self.back_face {
            query_pairs.append_pair("face", "back");
        }

        if let Some(version) = self.version {
            query_pairs.append_pair("version", version.as_str());
        }

        if self.pretty {
            query_pairs.append_pair("pretty", "true");
        }
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::{
        Card,
        Csv,
        Image,
        Json,
        LanguageCode,
        StatusCode,
        Text,
    };
    use wiremock::{
        matchers::{
            method,
            path,
            query_param,
            query_param_is_missing,
        },
        Mock,
        MockServer,
        ResponseTemplate,
    };

    pub(crate) const CARD: &str = include_str!("../test_data/card.json");
    pub(crate) const SEARCH: &str = include_str!("../test_data/search.json");
    pub(crate) const ERROR: &str = include_str!("../test_data/error.json");

    pub(crate) fn mock_client(server: &MockServer) -> Client {
        Client::builder()
            .base_url(server.uri())
            .request_delay(Duration::from_millis(10))
            .build()
            .expect("failed to build client")
    }

    fn json(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "application/json")
    }

    #[test]
    fn parse_card() {
        let card: Card = serde_json::from_str(CARD).expect("failed to parse card");
        assert_eq!(card.name, "Lightning Bolt");
        assert_eq!(card.object, ObjectKind::Card);
        assert_eq!(card.collector_number, "146");
        assert_eq!(card.page_path(), "/cards/m10/146/en");
        assert!(card.image_uri(ImageSize::Png).is_some());
        assert_eq!(
            card.legality(crate::GameFormat::Modern),
            Some(crate::Legality::Legal)
        );
        assert!(card.unknown.contains_key("some_future_field"));
    }

    #[test]
    fn endpoint_encodes_segments() {
        let client = Client::builder()
            .base_url("https://example.com/api")
            .build()
            .unwrap();
        let url = client.endpoint(&["cards", "sld", "1a★"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/cards/sld/1a%E2%98%85");

        let client = Client::new();
        let url = client.endpoint(&["cards", "named"]).unwrap();
        assert_eq!(url.as_str(), "https://api.scryfall.com/cards/named");
    }

    #[test]
    fn bad_base_url() {
        let error = Client::builder()
            .base_url("mailto:someone@example.com")
            .build()
            .unwrap_err();
        assert!(matches!(error, Error::InvalidBaseUrl(_)));
    }

    #[tokio::test]
    async fn named_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cards/named"))
            .and(query_param("exact", "Lightning Bolt"))
            .and(query_param("format", "json"))
            .and(query_param("set", "m10"))
            .respond_with(json(CARD))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let card = client
            .named("Lightning Bolt", NameMethod::Exact)
            .set(Some("m10"))
            .execute::<Json>()
            .await
            .expect("failed to get card");
        assert_eq!(card.set, "m10");
    }

    #[tokio::test]
    async fn named_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cards/named"))
            .and(query_param("fuzzy", "bolt"))
            .and(query_param("format", "text"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("Lightning Bolt {R}\nInstant\n".as_bytes().to_vec(), "text/plain"),
            )
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let text = client
            .named("bolt", NameMethod::Fuzzy)
            .execute::<Text>()
            .await
            .expect("failed to get card text");
        assert!(text.starts_with("Lightning Bolt"));
    }

    #[tokio::test]
    async fn named_image_resolves_redirect() {
        let server = MockServer::start().await;
        let image_url = format!("{}/images/front/large/bolt.jpg", server.uri());
        Mock::given(method("GET"))
            .and(path("/cards/named"))
            .and(query_param("format", "image"))
            .and(query_param("version", "large"))
            .and(query_param("face", "back"))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", image_url.as_str()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/images/front/large/bolt.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0xFF, 0xD8], "image/jpeg"))
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let url = client
            .named("Lightning Bolt", NameMethod::Exact)
            .version(Some(ImageSize::Large))
            .back_face(true)
            .execute::<Image>()
            .await
            .expect("failed to get card image");
        assert_eq!(url.as_str(), image_url);
    }

    #[tokio::test]
    async fn api_error_is_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cards/named"))
            .respond_with(
                ResponseTemplate::new(404).set_body_raw(ERROR.as_bytes().to_vec(), "application/json"),
            )
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let error = client
            .named("Not A Real Card", NameMethod::Exact)
            .execute::<Json>()
            .await
            .unwrap_err();
        let api_error = error.as_api_error().expect("missing api error");
        assert_eq!(api_error.code, "not_found");
        assert_eq!(api_error.status, 404);
        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn bad_status_without_error_object() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cards/random"))
            .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let error = client.random().execute::<Json>().await.unwrap_err();
        assert!(matches!(error, Error::InvalidStatus(StatusCode::SERVICE_UNAVAILABLE)));
    }

    #[tokio::test]
    async fn wrong_object_kind() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cards/random"))
            .respond_with(json(r#"{"object": "catalog", "total_values": 0, "data": []}"#))
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let error = client.random().execute::<Json>().await.unwrap_err();
        assert!(matches!(
            error,
            Error::UnexpectedObject {
                expected: ObjectKind::Card,
                actual: ObjectKind::Catalog,
            }
        ));

        Mock::given(method("GET"))
            .and(path("/sets/m10"))
            .respond_with(json(CARD))
            .mount(&server)
            .await;
        let error = client.set("m10").await.unwrap_err();
        assert!(matches!(
            error,
            Error::UnexpectedObject {
                expected: ObjectKind::Set,
                actual: ObjectKind::Card,
            }
        ));
    }

    #[tokio::test]
    async fn random_with_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cards/random"))
            .and(query_param("q", "is:commander"))
            .respond_with(json(CARD))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server);
        client
            .random()
            .query(Some("is:commander"))
            .execute::<Json>()
            .await
            .expect("failed to get random card");
    }

    #[tokio::test]
    async fn set_number_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cards/znr/123/it"))
            .and(query_param("format", "json"))
            .respond_with(json(CARD))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cards/znr/123"))
            .respond_with(json(CARD))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server);
        client
            .set_number("znr", "123")
            .lang(Some(LanguageCode::Italian))
            .execute::<Json>()
            .await
            .expect("failed to get localized card");
        client
            .set_number("znr", "123")
            .execute::<Json>()
            .await
            .expect("failed to get card");
    }

    #[tokio::test]
    async fn id_paths() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cards/e3285e6b-3e79-4d7c-bf96-d920f973b80d"))
            .respond_with(json(CARD))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cards/multiverse/191089"))
            .respond_with(json(CARD))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server);
        client
            .by_id(CardIdKind::Uuid, "e3285e6b-3e79-4d7c-bf96-d920f973b80d")
            .execute::<Json>()
            .await
            .expect("failed to get card by uuid");
        client
            .by_id(CardIdKind::Multiverse, "191089")
            .execute::<Json>()
            .await
            .expect("failed to get card by multiverse id");
    }

    #[test]
    fn parse_query_values() {
        assert_eq!("art".parse::<UniqueMode>().unwrap(), UniqueMode::Art);
        assert_eq!("edhrec".parse::<SortOrder>().unwrap(), SortOrder::Edhrec);
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert_eq!("arena".parse::<CardIdKind>().unwrap(), CardIdKind::Arena);

        let error = "newest".parse::<SortOrder>().unwrap_err();
        assert_eq!(error.value(), "newest");
        assert_eq!(error.to_string(), "unknown sort order \"newest\"");
    }

    #[tokio::test]
    async fn search_csv() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cards/search"))
            .and(query_param("q", "bolt"))
            .and(query_param("format", "csv"))
            .and(query_param("order", "cmc"))
            .and(query_param("dir", "asc"))
            .and(query_param_is_missing("page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("name\nLightning Bolt\n"))
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let csv = client
            .search("bolt")
            .order(Some(SortOrder::Cmc))
            .dir(Some(SortDirection::Asc))
            .execute::<Csv>()
            .await
            .expect("failed to search");
        assert!(csv.contains("Lightning Bolt"));
    }

    #[tokio::test]
    async fn search_follows_pages() {
        let server = MockServer::start().await;
        let first_page = SEARCH.replace("{{next_page}}", &format!("{}/cards/search?q=bolt&page=2", server.uri()));
        Mock::given(method("GET"))
            .and(path("/cards/search"))
            .and(query_param("page", "2"))
            .respond_with(json(
                &CARD_PAGE_TEMPLATE.replace("{{card}}", CARD),
            ))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cards/search"))
            .and(query_param_is_missing("page"))
            .respond_with(json(&first_page))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let list = client
            .search("bolt")
            .execute_all()
            .await
            .expect("failed to search all pages");
        assert_eq!(list.data.len(), 2);
        assert!(!list.has_more);
        assert_eq!(list.total_cards, Some(2));
    }

    const CARD_PAGE_TEMPLATE: &str =
        r#"{"object": "list", "total_cards": 2, "has_more": false, "data": [{{card}}]}"#;

    #[tokio::test]
    async fn next_page_rejects_foreign_urls() {
        let client = Client::new();
        let mut list: List<Card> = List::new();
        list.has_more = true;
        list.next_page = Some(Url::parse("https://example.com/cards/search?page=2").unwrap());

        let error = client.next_page(&list).await.unwrap_err();
        assert!(matches!(error, Error::InvalidPageUrl(_)));

        list.has_more = false;
        assert!(client.next_page(&list).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn autocomplete() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cards/autocomplete"))
            .and(query_param("q", "thal"))
            .and(query_param("include_extras", "true"))
            .respond_with(json(
                r#"{"object": "catalog", "total_values": 2, "data": ["Thalia, Guardian of Thraben", "Thalakos Seer"]}"#,
            ))
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let catalog = client
            .autocomplete("thal")
            .include_extras(true)
            .execute()
            .await
            .expect("failed to autocomplete");
        assert_eq!(catalog.data.len(), 2);
    }

    #[tokio::test]
    async fn empty_queries_are_rejected() {
        let client = Client::new();
        assert!(matches!(
            client.search("").execute::<Json>().await.unwrap_err(),
            Error::EmptyQuery
        ));
        assert!(matches!(
            client
                .named("", NameMethod::Fuzzy)
                .execute::<Json>()
                .await
                .unwrap_err(),
            Error::EmptyQuery
        ));
        assert!(matches!(
            client.rulings("").await.unwrap_err(),
            Error::EmptyQuery
        ));
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn live_set_and_rulings() {
        let client = Client::new();
        let set = client.set("m10").await.expect("failed to get set");
        assert_eq!(set.code, "m10");

        let card = client
            .set_number("m10", "146")
            .execute::<Json>()
            .await
            .expect("failed to get card");
        let rulings = client.rulings(&card.id).await.expect("failed to get rulings");
        dbg!(rulings);

        let cost = client.parse_mana("2gg").await.expect("failed to parse mana");
        assert_eq!(cost.cost, "{2}{G}{G}");
    }
}
