use crate::{
    Card,
    Error,
    List,
    ObjectKind,
};
use futures::future::{
    BoxFuture,
    FutureExt,
};
use url::Url;

mod private {
    pub trait Sealed {}
}

/// A response format for endpoints that return a single card.
///
/// This maps the `format` query value to the type the response decodes into.
pub trait CardFormat: private::Sealed {
    /// The decoded response
    type Output: Send + 'static;

    /// The `format` query value
    const FORMAT: &'static str;

    /// Decode a successful response.
    fn read(response: reqwest::Response) -> BoxFuture<'static, Result<Self::Output, Error>>;
}

/// A response format for endpoints that return a list of cards.
pub trait ListFormat: private::Sealed {
    /// The decoded response
    type Output: Send + 'static;

    /// The `format` query value
    const FORMAT: &'static str;

    /// Decode a successful response.
    fn read(response: reqwest::Response) -> BoxFuture<'static, Result<Self::Output, Error>>;
}

/// Just the `object` field of an api object
#[derive(serde::Deserialize)]
struct ObjectHeader {
    object: ObjectKind,
}

/// Decode a json object, making sure it is of the given kind.
///
/// The kind is checked before the rest of the object is decoded,
/// so a different object fails with [`Error::UnexpectedObject`].
pub(crate) async fn read_json<T>(response: reqwest::Response, kind: ObjectKind) -> Result<T, Error>
where
    T: serde::de::DeserializeOwned,
{
    let bytes = response.bytes().await?;
    let header: ObjectHeader = serde_json::from_slice(&bytes)?;
    header.object.expect(kind)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// The default format, decoded api objects
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl private::Sealed for Json {}

impl CardFormat for Json {
    type Output = Card;

    const FORMAT: &'static str = "json";

    fn read(response: reqwest::Response) -> BoxFuture<'static, Result<Self::Output, Error>> {
        read_json(response, ObjectKind::Card).boxed()
    }
}

impl ListFormat for Json {
    type Output = List<Card>;

    const FORMAT: &'static str = "json";

    fn read(response: reqwest::Response) -> BoxFuture<'static, Result<Self::Output, Error>> {
        read_json(response, ObjectKind::List).boxed()
    }
}

/// A plain text rendering of a card
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl private::Sealed for Text {}

impl CardFormat for Text {
    type Output = String;

    const FORMAT: &'static str = "text";

    fn read(response: reqwest::Response) -> BoxFuture<'static, Result<Self::Output, Error>> {
        async move { Ok(response.text().await?) }.boxed()
    }
}

/// The card image.
///
/// The api redirects to the image, so this resolves to the final image url.
/// The image itself is not downloaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct Image;

impl private::Sealed for Image {}

impl CardFormat for Image {
    type Output = Url;

    const FORMAT: &'static str = "image";

    fn read(response: reqwest::Response) -> BoxFuture<'static, Result<Self::Output, Error>> {
        // Stash the url we got redirected to.
        // The body is dropped unread, as it is the whole image.
        let url = response.url().clone();
        async move { Ok(url) }.boxed()
    }
}

/// A csv rendering of a card list
#[derive(Debug, Clone, Copy, Default)]
pub struct Csv;

impl private::Sealed for Csv {}

impl ListFormat for Csv {
    type Output = String;

    const FORMAT: &'static str = "csv";

    fn read(response: reqwest::Response) -> BoxFuture<'static, Result<Self::Output, Error>> {
        async move { Ok(response.text().await?) }.boxed()
    }
}
