use crate::{
    BorderColor,
    Color,
    Finish,
    FrameEffect,
    Game,
    GameFormat,
    ImageSize,
    ImageStatus,
    LanguageCode,
    Layout,
    Legality,
    ObjectKind,
    Rarity,
    RelatedCardComponent,
    SecurityStamp,
    SetKind,
};
use std::collections::{
    BTreeMap,
    HashMap,
};
use url::Url;

/// A card print
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Card {
    /// Always `card`
    pub object: ObjectKind,

    // Core fields
    /// The scryfall id
    pub id: String,
    /// The oracle id, shared across reprints.
    ///
    /// Absent for reversible cards, see the faces instead.
    pub oracle_id: Option<String>,
    /// The language of this print
    pub lang: LanguageCode,
    /// The arena id
    pub arena_id: Option<u64>,
    /// The magic online id
    pub mtgo_id: Option<u64>,
    /// The foil magic online id
    pub mtgo_foil_id: Option<u64>,
    /// Gatherer multiverse ids
    #[serde(default)]
    pub multiverse_ids: Vec<u64>,
    /// The TCGplayer product id
    pub tcgplayer_id: Option<u64>,
    /// The TCGplayer product id of the etched version
    pub tcgplayer_etched_id: Option<u64>,
    /// The Cardmarket product id
    pub cardmarket_id: Option<u64>,
    /// The layout
    pub layout: Layout,
    /// Where to start paginating all prints of this card
    pub prints_search_uri: Option<Url>,
    /// The rulings list for this card
    pub rulings_uri: Option<Url>,
    /// The scryfall web page
    pub scryfall_uri: Url,
    /// The api uri
    pub uri: Url,

    // Gameplay fields
    /// Closely related cards
    #[serde(default)]
    pub all_parts: Vec<RelatedCard>,
    /// The faces, if this card is multifaced
    #[serde(default)]
    pub card_faces: Vec<CardFace>,
    /// The mana value
    pub cmc: Option<f64>,
    /// The color identity
    #[serde(default)]
    pub color_identity: Vec<Color>,
    /// The colors of the color indicator
    pub color_indicator: Option<Vec<Color>>,
    /// The colors.
    ///
    /// Multifaced cards may only have these on their faces.
    pub colors: Option<Vec<Color>>,
    /// Battle defense
    pub defense: Option<String>,
    /// EDHREC rank
    pub edhrec_rank: Option<u64>,
    /// Whether this card is on the commander game changer list
    #[serde(default)]
    pub game_changer: bool,
    /// Vanguard hand modifier
    pub hand_modifier: Option<String>,
    /// Keywords, like `Flying`
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Legalities, keyed by format
    #[serde(default)]
    pub legalities: BTreeMap<String, Legality>,
    /// Vanguard life modifier
    pub life_modifier: Option<String>,
    /// Loyalty. This may not be numeric.
    pub loyalty: Option<String>,
    /// The mana cost.
    ///
    /// An empty string is a missing cost, which is different from `{0}`.
    pub mana_cost: Option<String>,
    /// The name.
    ///
    /// Multifaced cards join face names with ` // `.
    pub name: String,
    /// The oracle text
    pub oracle_text: Option<String>,
    /// Penny Dreadful rank
    pub penny_rank: Option<u64>,
    /// Power. This may not be numeric.
    pub power: Option<String>,
    /// Colors of mana this card can produce
    pub produced_mana: Option<Vec<Color>>,
    /// Whether this is on the reserved list
    #[serde(default)]
    pub reserved: bool,
    /// Toughness. This may not be numeric.
    pub toughness: Option<String>,
    /// The type line
    pub type_line: Option<String>,

    // Print fields
    /// The illustrator
    pub artist: Option<String>,
    /// The illustrator ids
    #[serde(default)]
    pub artist_ids: Vec<String>,
    /// Lit attraction lights
    #[serde(default)]
    pub attraction_lights: Vec<u64>,
    /// Whether this is found in boosters
    #[serde(default)]
    pub booster: bool,
    /// The border color
    pub border_color: Option<BorderColor>,
    /// The card back design id
    pub card_back_id: Option<String>,
    /// The collector number. This may contain letters or symbols.
    pub collector_number: String,
    /// Whether this print should be avoided downstream
    #[serde(default)]
    pub content_warning: bool,
    /// Whether this was only released in a video game
    #[serde(default)]
    pub digital: bool,
    /// Available finishes
    #[serde(default)]
    pub finishes: Vec<Finish>,
    /// Just-for-fun name
    pub flavor_name: Option<String>,
    /// Flavor text
    pub flavor_text: Option<String>,
    /// Frame effects
    #[serde(default)]
    pub frame_effects: Vec<FrameEffect>,
    /// Frame layout, like `2015`
    pub frame: Option<String>,
    /// Whether the artwork is larger than normal
    #[serde(default)]
    pub full_art: bool,
    /// Games this print is in
    #[serde(default)]
    pub games: Vec<Game>,
    /// Whether the image is high resolution
    #[serde(default)]
    pub highres_image: bool,
    /// The artwork id, shared across reprints
    pub illustration_id: Option<String>,
    /// The image state
    pub image_status: Option<ImageStatus>,
    /// Image uris.
    ///
    /// Multifaced cards may only have these on their faces.
    pub image_uris: Option<ImageUris>,
    /// Whether this is oversized
    #[serde(default)]
    pub oversized: bool,
    /// Daily prices
    #[serde(default)]
    pub prices: Prices,
    /// Localized name
    pub printed_name: Option<String>,
    /// Localized text
    pub printed_text: Option<String>,
    /// Localized type line
    pub printed_type_line: Option<String>,
    /// Whether this is a promo
    #[serde(default)]
    pub promo: bool,
    /// Promo categories
    #[serde(default)]
    pub promo_types: Vec<String>,
    /// Marketplace links
    pub purchase_uris: Option<PurchaseUris>,
    /// The rarity
    pub rarity: Rarity,
    /// Links to other resources
    #[serde(default)]
    pub related_uris: RelatedUris,
    /// The release date
    pub released_at: Option<String>,
    /// Whether this is a reprint
    #[serde(default)]
    pub reprint: bool,
    /// The set web page
    pub scryfall_set_uri: Option<Url>,
    /// The set name
    pub set_name: String,
    /// Where to start paginating this set
    pub set_search_uri: Option<Url>,
    /// The set kind
    pub set_type: Option<SetKind>,
    /// The set api uri
    pub set_uri: Option<Url>,
    /// The set code
    pub set: String,
    /// The set id
    pub set_id: Option<String>,
    /// Whether this is a story spotlight
    #[serde(default)]
    pub story_spotlight: bool,
    /// Whether this is printed without text
    #[serde(default)]
    pub textless: bool,
    /// Whether this is a variation of another print
    #[serde(default)]
    pub variation: bool,
    /// The print this is a variation of
    pub variation_of: Option<String>,
    /// The security stamp
    pub security_stamp: Option<SecurityStamp>,
    /// The watermark
    pub watermark: Option<String>,
    /// Preview info
    pub preview: Option<Preview>,

    /// Unknown data
    #[serde(flatten)]
    pub unknown: HashMap<String, serde_json::Value>,
}

impl Card {
    /// The printed name, falling back to the oracle name.
    pub fn display_name(&self) -> &str {
        self.printed_name.as_deref().unwrap_or(&self.name)
    }

    /// The printed type line, falling back to the oracle type line, then the first face.
    pub fn display_type_line(&self) -> Option<&str> {
        self.printed_type_line
            .as_deref()
            .or(self.type_line.as_deref())
            .or_else(|| {
                self.card_faces
                    .first()
                    .and_then(|face| face.type_line.as_deref())
            })
    }

    /// The printed text, falling back to the oracle text.
    pub fn display_text(&self) -> Option<&str> {
        self.printed_text
            .as_deref()
            .or(self.oracle_text.as_deref())
    }

    /// Get the image uri of the given size.
    ///
    /// Multifaced cards without top-level images use the first face.
    pub fn image_uri(&self, size: ImageSize) -> Option<&Url> {
        self.image_uris
            .as_ref()
            .or_else(|| {
                self.card_faces
                    .first()
                    .and_then(|face| face.image_uris.as_ref())
            })
            .and_then(|image_uris| image_uris.get(size))
    }

    /// Get the legality in a format.
    pub fn legality(&self, format: GameFormat) -> Option<Legality> {
        self.legalities.get(format.as_str()).copied()
    }

    /// Returns true if this card has multiple faces.
    pub fn is_multi_faced(&self) -> bool {
        !self.card_faces.is_empty()
    }

    /// The path of this card's page.
    pub fn page_path(&self) -> String {
        format!("/cards/{}/{}/en", self.set, self.collector_number)
    }
}

/// A face of a multifaced card
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CardFace {
    /// Always `card_face`
    pub object: ObjectKind,
    /// The face name
    pub name: String,
    /// The mana cost, empty if absent
    #[serde(default)]
    pub mana_cost: String,
    /// The face artist
    pub artist: Option<String>,
    /// The face artist id
    pub artist_id: Option<String>,
    /// The mana value
    pub cmc: Option<f64>,
    /// The colors of the color indicator
    pub color_indicator: Option<Vec<Color>>,
    /// The colors
    pub colors: Option<Vec<Color>>,
    /// Battle defense
    pub defense: Option<String>,
    /// Flavor text
    pub flavor_text: Option<String>,
    /// The artwork id
    pub illustration_id: Option<String>,
    /// Image uris
    pub image_uris: Option<ImageUris>,
    /// The face layout
    pub layout: Option<Layout>,
    /// Loyalty
    pub loyalty: Option<String>,
    /// The oracle id
    pub oracle_id: Option<String>,
    /// The oracle text
    pub oracle_text: Option<String>,
    /// Power
    pub power: Option<String>,
    /// Localized name
    pub printed_name: Option<String>,
    /// Localized text
    pub printed_text: Option<String>,
    /// Localized type line
    pub printed_type_line: Option<String>,
    /// Toughness
    pub toughness: Option<String>,
    /// The type line
    pub type_line: Option<String>,
    /// The watermark
    pub watermark: Option<String>,

    /// Unknown data
    #[serde(flatten)]
    pub unknown: HashMap<String, serde_json::Value>,
}

/// A card related to another card
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RelatedCard {
    /// Always `related_card`
    pub object: ObjectKind,
    /// The scryfall id of the related card
    pub id: String,
    /// How it is related
    pub component: RelatedCardComponent,
    /// The name
    pub name: String,
    /// The type line
    pub type_line: String,
    /// The api uri
    pub uri: Url,

    /// Unknown data
    #[serde(flatten)]
    pub unknown: HashMap<String, serde_json::Value>,
}

/// Image uris for each image version
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageUris {
    pub small: Option<Url>,
    pub normal: Option<Url>,
    pub large: Option<Url>,
    pub png: Option<Url>,
    pub art_crop: Option<Url>,
    pub border_crop: Option<Url>,
}

impl ImageUris {
    /// Get the uri for an image version.
    pub fn get(&self, size: ImageSize) -> Option<&Url> {
        match size {
            ImageSize::Small => self.small.as_ref(),
            ImageSize::Normal => self.normal.as_ref(),
            ImageSize::Large => self.large.as_ref(),
            ImageSize::Png => self.png.as_ref(),
            ImageSize::ArtCrop => self.art_crop.as_ref(),
            ImageSize::BorderCrop => self.border_crop.as_ref(),
            ImageSize::Unknown => None,
        }
    }
}

/// Daily prices, as decimal strings
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Prices {
    pub usd: Option<String>,
    pub usd_foil: Option<String>,
    pub usd_etched: Option<String>,
    pub eur: Option<String>,
    pub eur_foil: Option<String>,
    pub tix: Option<String>,
}

/// Marketplace links
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PurchaseUris {
    pub tcgplayer: Option<Url>,
    /// Often inexact
    pub cardmarket: Option<Url>,
    pub cardhoarder: Option<Url>,

    /// Unknown data
    #[serde(flatten)]
    pub unknown: HashMap<String, serde_json::Value>,
}

/// Links to other resources
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RelatedUris {
    pub gatherer: Option<Url>,
    pub tcgplayer_infinite_articles: Option<Url>,
    pub tcgplayer_infinite_decks: Option<Url>,
    pub edhrec: Option<Url>,

    /// Unknown data
    #[serde(flatten)]
    pub unknown: HashMap<String, serde_json::Value>,
}

/// Preview info
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Preview {
    pub previewed_at: Option<String>,
    /// This is sometimes an empty string
    pub source_uri: Option<String>,
    pub source: Option<String>,
}
