use crate::{
    ObjectKind,
    SetKind,
};
use std::collections::HashMap;
use url::Url;

/// A card set
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Set {
    /// Always `set`
    pub object: ObjectKind,
    /// The set id
    pub id: String,
    /// The unique 3 to 5 letter code
    pub code: String,
    /// The magic online code, if it differs
    pub mtgo_code: Option<String>,
    /// The arena code, if it differs
    pub arena_code: Option<String>,
    /// The TCGplayer group id
    pub tcgplayer_id: Option<u64>,
    /// The english name
    pub name: String,
    /// The classification
    pub set_type: SetKind,
    /// The release date
    pub released_at: Option<String>,
    /// The block code
    pub block_code: Option<String>,
    /// The block name
    pub block: Option<String>,
    /// The parent set code
    pub parent_set_code: Option<String>,
    /// The number of cards
    pub card_count: u64,
    /// The denominator of printed collector numbers
    pub printed_size: Option<u64>,
    /// Whether this was only released in a video game
    #[serde(default)]
    pub digital: bool,
    /// Whether this only has foils
    #[serde(default)]
    pub foil_only: bool,
    /// Whether this only has nonfoils
    #[serde(default)]
    pub nonfoil_only: bool,
    /// The web page
    pub scryfall_uri: Url,
    /// The api uri
    pub uri: Url,
    /// The set icon
    pub icon_svg_uri: Url,
    /// Where to start paginating this set's cards
    pub search_uri: Url,

    /// Unknown data
    #[serde(flatten)]
    pub unknown: HashMap<String, serde_json::Value>,
}
