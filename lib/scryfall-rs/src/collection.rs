use crate::{
    Card,
    Client,
    Error,
    List,
    ObjectKind,
    COLLECTION_CHUNK_SIZE,
};
use std::fmt::Display;
use tracing::{
    debug,
    info,
};

/// A way to identify a card in a collection request.
///
/// Variant order matters for deserializing: `NameSet` must be tried before `Name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum CardIdentifier {
    /// A scryfall uuid
    Id { id: String },

    /// A Magic Online id
    MtgoId { mtgo_id: u64 },

    /// A Gatherer multiverse id
    MultiverseId { multiverse_id: u64 },

    /// An oracle id, matching the newest printing of the card
    OracleId { oracle_id: String },

    /// An illustration id, matching the newest printing with that art
    IllustrationId { illustration_id: String },

    /// A card name within a set
    NameSet { name: String, set: String },

    /// A set code and collector number
    SetCollectorNumber {
        set: String,
        collector_number: String,
    },

    /// A card name, matching the newest printing
    Name { name: String },
}

impl CardIdentifier {
    /// Identify a card by scryfall uuid
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id { id: id.into() }
    }

    /// Identify a card by name
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name { name: name.into() }
    }

    /// Identify a card by name within a set
    pub fn name_set(name: impl Into<String>, set: impl Into<String>) -> Self {
        Self::NameSet {
            name: name.into(),
            set: set.into(),
        }
    }

    /// Identify a card by set code and collector number
    pub fn set_collector_number(set: impl Into<String>, collector_number: impl Into<String>) -> Self {
        Self::SetCollectorNumber {
            set: set.into(),
            collector_number: collector_number.into(),
        }
    }
}

impl Display for CardIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id { id } => write!(f, "id {id}"),
            Self::MtgoId { mtgo_id } => write!(f, "mtgo id {mtgo_id}"),
            Self::MultiverseId { multiverse_id } => write!(f, "multiverse id {multiverse_id}"),
            Self::OracleId { oracle_id } => write!(f, "oracle id {oracle_id}"),
            Self::IllustrationId { illustration_id } => {
                write!(f, "illustration id {illustration_id}")
            }
            Self::NameSet { name, set } => write!(f, "\"{name}\" in {set}"),
            Self::SetCollectorNumber {
                set,
                collector_number,
            } => write!(f, "{set} #{collector_number}"),
            Self::Name { name } => write!(f, "\"{name}\""),
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct CollectionRequest<'a> {
    identifiers: &'a [CardIdentifier],
}

impl Client {
    /// Get many cards at once.
    ///
    /// The identifiers are sent in chunks of [`COLLECTION_CHUNK_SIZE`], one request at a time,
    /// waiting the client's request delay between requests.
    /// The pages are merged in order.
    /// Identifiers that matched nothing are listed in `not_found`.
    ///
    /// # Errors
    /// The first failing chunk aborts the whole call.
    #[tracing::instrument(skip(self, identifiers), fields(identifiers = identifiers.len()))]
    pub async fn collection(&self, identifiers: &[CardIdentifier]) -> Result<List<Card>, Error> {
        let url = self.endpoint(&["cards", "collection"])?;
        let mut list = List::new();

        for (i, chunk) in identifiers.chunks(COLLECTION_CHUNK_SIZE).enumerate() {
            if i != 0 {
                self.delay().await;
            }

            debug!(chunk = i, len = chunk.len(), "requesting collection chunk");
            let request = self
                .client
                .post(url.clone())
                .json(&CollectionRequest { identifiers: chunk });
            let response = self.send(request).await?;
            let page: List<Card> = crate::format::read_json(response, ObjectKind::List).await?;

            list.merge(page);
        }

        list.has_more = false;
        list.next_page = None;

        info!(
            found = list.data.len(),
            not_found = list.not_found.len(),
            "fetched collection"
        );

        Ok(list)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::client::test::{
        mock_client,
        CARD,
    };
    use std::time::{
        Duration,
        Instant,
    };
    use wiremock::{
        matchers::{
            method,
            path,
        },
        Mock,
        MockServer,
        Request,
        Respond,
        ResponseTemplate,
    };

    /// Responds with one card per identifier, named after the requested name.
    ///
    /// Names starting with `missing` are not found.
    struct CollectionResponder {
        card: serde_json::Value,
    }

    impl Respond for CollectionResponder {
        fn respond(&self, request: &Request) -> ResponseTemplate {
            let body: serde_json::Value = match serde_json::from_slice(&request.body) {
                Ok(body) => body,
                Err(_) => return ResponseTemplate::new(400),
            };
            let identifiers = body["identifiers"].as_array().cloned().unwrap_or_default();

            let mut data = Vec::new();
            let mut not_found = Vec::new();
            for identifier in identifiers {
                let name = identifier["name"].as_str().unwrap_or_default();
                if name.starts_with("missing") {
                    not_found.push(identifier);
                } else {
                    let mut card = self.card.clone();
                    card["name"] = name.into();
                    data.push(card);
                }
            }

            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "object": "list",
                "not_found": not_found,
                "data": data,
            }))
        }
    }

    #[test]
    fn identifier_shapes() {
        let cases = [
            (
                r#"{"id": "683a5707-cddb-494d-9b41-51b4584ded69"}"#,
                CardIdentifier::id("683a5707-cddb-494d-9b41-51b4584ded69"),
            ),
            (r#"{"mtgo_id": 12345}"#, CardIdentifier::MtgoId { mtgo_id: 12345 }),
            (
                r#"{"name": "Ancient Tomb", "set": "uma"}"#,
                CardIdentifier::name_set("Ancient Tomb", "uma"),
            ),
            (
                r#"{"set": "mrd", "collector_number": "150"}"#,
                CardIdentifier::set_collector_number("mrd", "150"),
            ),
            (r#"{"name": "Ancient Tomb"}"#, CardIdentifier::name("Ancient Tomb")),
        ];

        for (json, expected) in cases {
            let identifier: CardIdentifier =
                serde_json::from_str(json).expect("failed to parse identifier");
            assert_eq!(identifier, expected);

            let value = serde_json::to_value(&identifier).unwrap();
            let expected_value: serde_json::Value = serde_json::from_str(json).unwrap();
            assert_eq!(value, expected_value);
        }
    }

    #[tokio::test]
    async fn chunks_sequentially() {
        const DELAY: Duration = Duration::from_millis(100);

        let server = MockServer::start().await;
        let card: serde_json::Value = serde_json::from_str(CARD).unwrap();
        Mock::given(method("POST"))
            .and(path("/cards/collection"))
            .respond_with(CollectionResponder { card })
            .expect(3)
            .mount(&server)
            .await;

        let client = Client::builder()
            .base_url(server.uri())
            .request_delay(DELAY)
            .build()
            .expect("failed to build client");

        // One miss in the first chunk, one in the last
        let identifiers: Vec<_> = (0..160)
            .map(|i| match i {
                10 => CardIdentifier::name("missing one"),
                155 => CardIdentifier::name_set("missing two", "lea"),
                i => CardIdentifier::name(format!("Card {i}")),
            })
            .collect();

        let start = Instant::now();
        let list = client
            .collection(&identifiers)
            .await
            .expect("failed to get collection");
        let elapsed = start.elapsed();

        let names: Vec<&str> = list.data.iter().map(|card| card.name.as_str()).collect();
        let expected_names: Vec<String> = (0..160)
            .filter(|i| *i != 10 && *i != 155)
            .map(|i| format!("Card {i}"))
            .collect();
        assert_eq!(names, expected_names);
        assert_eq!(
            list.not_found,
            vec![
                CardIdentifier::name("missing one"),
                CardIdentifier::name_set("missing two", "lea"),
            ]
        );
        assert!(!list.has_more);

        // Two delays, between the three requests only
        assert!(elapsed >= DELAY * 2, "{elapsed:?}");
        assert!(elapsed < DELAY * 3, "{elapsed:?}");

        let requests = server.received_requests().await.unwrap();
        let sizes: Vec<_> = requests
            .iter()
            .map(|request| {
                let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
                body["identifiers"].as_array().unwrap().len()
            })
            .collect();
        assert_eq!(sizes, [75, 75, 10]);
    }

    #[tokio::test]
    async fn empty_collection_makes_no_requests() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let list = client.collection(&[]).await.expect("failed to get collection");
        assert!(list.is_empty());
        assert!(list.not_found.is_empty());
    }

    #[tokio::test]
    async fn failing_chunk_aborts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cards/collection"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "object": "error",
                "code": "bad_request",
                "status": 400,
                "details": "Too many identifiers.",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let identifiers: Vec<_> = (0..100)
            .map(|i| CardIdentifier::name(format!("Card {i}")))
            .collect();
        let error = client.collection(&identifiers).await.unwrap_err();
        assert_eq!(
            error.as_api_error().map(|error| error.details.as_str()),
            Some("Too many identifiers.")
        );
    }
}
