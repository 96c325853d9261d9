/// An error that occurs when parsing an unknown value from a string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown {kind} \"{value}\"")]
pub struct UnknownValueError {
    kind: &'static str,
    value: Box<str>,
}

impl UnknownValueError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// The unrecognized value
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Define a fieldless enum that maps to a fixed set of api strings.
///
/// Unrecognized strings deserialize to the `Unknown` variant.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $value:literal,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $value)]
                $variant,
            )*
            /// A value this library does not know about yet
            #[serde(rename = "unknown", other)]
            Unknown,
        }

        impl $name {
            /// Every known value
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Get the api string for this value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)*
                    Self::Unknown => "unknown",
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok(Self::$variant),)*
                    _ => Err(UnknownValueError {
                        kind: stringify!($name),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

string_enum! {
    /// The kind of an api object, sent in the `object` field.
    pub enum ObjectKind {
        Card => "card",
        CardFace => "card_face",
        CardSymbol => "card_symbol",
        Catalog => "catalog",
        Error => "error",
        List => "list",
        ManaCost => "mana_cost",
        Migration => "migration",
        RelatedCard => "related_card",
        Ruling => "ruling",
        Set => "set",
    }
}

impl ObjectKind {
    /// Returns true if this is the `expected` kind.
    pub fn is(self, expected: Self) -> bool {
        self == expected
    }

    /// Ensure this is the `expected` kind.
    pub fn expect(self, expected: Self) -> Result<(), crate::Error> {
        if self.is(expected) {
            Ok(())
        } else {
            Err(crate::Error::UnexpectedObject {
                expected,
                actual: self,
            })
        }
    }
}

string_enum! {
    /// A mana color
    pub enum Color {
        White => "W",
        Blue => "U",
        Black => "B",
        Red => "R",
        Green => "G",
        Colorless => "C",
    }
}

string_enum! {
    /// A print rarity
    pub enum Rarity {
        Common => "common",
        Uncommon => "uncommon",
        Rare => "rare",
        Special => "special",
        Mythic => "mythic",
        Bonus => "bonus",
    }
}

string_enum! {
    /// A card layout
    pub enum Layout {
        /// A standard card with one face
        Normal => "normal",
        /// A split-faced card
        Split => "split",
        /// Cards that invert vertically with the flip keyword
        Flip => "flip",
        /// Double-sided cards that transform
        Transform => "transform",
        /// Double-sided cards that can be played either-side
        ModalDfc => "modal_dfc",
        /// Cards with meld parts printed on the back
        Meld => "meld",
        /// Cards with Level Up
        Leveler => "leveler",
        /// Class-type enchantment cards
        Class => "class",
        /// Saga-type cards
        Saga => "saga",
        /// Cards with an Adventure spell part
        Adventure => "adventure",
        /// Cards with Mutate
        Mutate => "mutate",
        /// Cards with Prototype
        Prototype => "prototype",
        /// Battle-type cards
        Battle => "battle",
        /// Plane and Phenomenon-type cards
        Planar => "planar",
        /// Scheme-type cards
        Scheme => "scheme",
        /// Vanguard-type cards
        Vanguard => "vanguard",
        /// Token cards
        Token => "token",
        /// Tokens with another token printed on the back
        DoubleFacedToken => "double_faced_token",
        /// Emblem cards
        Emblem => "emblem",
        /// Cards with Augment
        Augment => "augment",
        /// Host-type cards
        Host => "host",
        /// Art Series collectable double-faced cards
        ArtSeries => "art_series",
        /// A card with two sides that are unrelated
        ReversibleCard => "reversible_card",
        /// A multi-part enchantment
        Case => "case",
    }
}

/// A grouping of layouts by how their faces are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutGroup {
    /// A single face, no `card_faces`
    SingleFaced,
    /// Multiple faces, all on the front
    SingleSided,
    /// Multiple faces split across the front and back
    DoubleSided,
    /// Anything else
    Other,
}

impl Layout {
    /// Get the group of this layout.
    pub fn group(self) -> LayoutGroup {
        match self {
            Self::Normal
            | Self::Meld
            | Self::Leveler
            | Self::Class
            | Self::Saga
            | Self::Mutate
            | Self::Prototype
            | Self::Battle
            | Self::Planar
            | Self::Scheme
            | Self::Vanguard
            | Self::Token
            | Self::Emblem
            | Self::Augment
            | Self::Host => LayoutGroup::SingleFaced,
            Self::Split | Self::Flip | Self::Adventure => LayoutGroup::SingleSided,
            Self::Transform | Self::ModalDfc | Self::DoubleFacedToken | Self::ArtSeries => {
                LayoutGroup::DoubleSided
            }
            Self::ReversibleCard | Self::Case | Self::Unknown => LayoutGroup::Other,
        }
    }
}

string_enum! {
    /// The legality of a card in a format
    pub enum Legality {
        Legal => "legal",
        NotLegal => "not_legal",
        Restricted => "restricted",
        Banned => "banned",
    }
}

string_enum! {
    /// A play format
    pub enum GameFormat {
        Standard => "standard",
        Future => "future",
        Historic => "historic",
        Timeless => "timeless",
        Gladiator => "gladiator",
        Pioneer => "pioneer",
        Explorer => "explorer",
        Modern => "modern",
        Legacy => "legacy",
        Pauper => "pauper",
        Vintage => "vintage",
        Penny => "penny",
        Commander => "commander",
        Oathbreaker => "oathbreaker",
        StandardBrawl => "standardbrawl",
        Brawl => "brawl",
        Alchemy => "alchemy",
        PauperCommander => "paupercommander",
        Duel => "duel",
        OldSchool => "oldschool",
        Premodern => "premodern",
        PrEdh => "predh",
    }
}

string_enum! {
    /// An image version
    pub enum ImageSize {
        /// 146 x 204 jpg
        Small => "small",
        /// 488 x 680 jpg
        Normal => "normal",
        /// 672 x 936 jpg
        Large => "large",
        /// 745 x 1040 png with transparent corners
        Png => "png",
        /// Just the artwork, cropped from the png
        ArtCrop => "art_crop",
        /// 480 x 680 jpg with the border cropped off
        BorderCrop => "border_crop",
    }
}

string_enum! {
    /// The state of a card's image
    pub enum ImageStatus {
        /// There is no image yet
        Missing => "missing",
        /// A generated, visibly marked placeholder
        Placeholder => "placeholder",
        /// A low resolution image, usually for recently previewed cards
        LowRes => "lowres",
        /// A high resolution image or scan
        HighResScan => "highres_scan",
    }
}

string_enum! {
    /// A print finish
    pub enum Finish {
        NonFoil => "nonfoil",
        Foil => "foil",
        Etched => "etched",
    }
}

string_enum! {
    /// The border color of a print
    pub enum BorderColor {
        Black => "black",
        White => "white",
        Borderless => "borderless",
        Silver => "silver",
        Gold => "gold",
    }
}

string_enum! {
    /// A language code.
    ///
    /// English is the default for lookups that omit the language.
    pub enum LanguageCode {
        English => "en",
        Spanish => "es",
        French => "fr",
        German => "de",
        Italian => "it",
        Portuguese => "pt",
        Japanese => "ja",
        Korean => "ko",
        Russian => "ru",
        SimplifiedChinese => "zhs",
        TraditionalChinese => "zht",
        Hebrew => "he",
        Latin => "la",
        AncientGreek => "grc",
        Arabic => "ar",
        Sanskrit => "sa",
        Phyrexian => "ph",
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::English
    }
}

string_enum! {
    /// A game a print is available in
    pub enum Game {
        Paper => "paper",
        Mtgo => "mtgo",
        Arena => "arena",
        Astral => "astral",
        Sega => "sega",
    }
}

string_enum! {
    /// A frame effect
    pub enum FrameEffect {
        Legendary => "legendary",
        Miracle => "miracle",
        Enchantment => "enchantment",
        Draft => "draft",
        Devoid => "devoid",
        Tombstone => "tombstone",
        Colorshifted => "colorshifted",
        Inverted => "inverted",
        SunMoonDfc => "sunmoondfc",
        CompassLandDfc => "compasslanddfc",
        OriginPwDfc => "originpwdfc",
        MoonEldraziDfc => "mooneldrazidfc",
        WaxingAndWaningMoonDfc => "waxingandwaningmoondfc",
        Showcase => "showcase",
        ExtendedArt => "extendedart",
        Companion => "companion",
        Etched => "etched",
        Snow => "snow",
        Lesson => "lesson",
        ShatteredGlass => "shatteredglass",
        ConvertDfc => "convertdfc",
        FanDfc => "fandfc",
        UpsideDownDfc => "upsidedowndfc",
        Spree => "spree",
    }
}

string_enum! {
    /// A security stamp
    pub enum SecurityStamp {
        Oval => "oval",
        Triangle => "triangle",
        Acorn => "acorn",
        Circle => "circle",
        Arena => "arena",
        Heart => "heart",
    }
}

string_enum! {
    /// The relation of a [`RelatedCard`](crate::RelatedCard) to its card
    pub enum RelatedCardComponent {
        Token => "token",
        MeldPart => "meld_part",
        MeldResult => "meld_result",
        ComboPiece => "combo_piece",
    }
}

string_enum! {
    /// The source of a ruling
    pub enum RulingSource {
        Wotc => "wotc",
        Scryfall => "scryfall",
    }
}

string_enum! {
    /// A set classification
    pub enum SetKind {
        Core => "core",
        Expansion => "expansion",
        Masters => "masters",
        Alchemy => "alchemy",
        Masterpiece => "masterpiece",
        Arsenal => "arsenal",
        FromTheVault => "from_the_vault",
        Spellbook => "spellbook",
        PremiumDeck => "premium_deck",
        DuelDeck => "duel_deck",
        DraftInnovation => "draft_innovation",
        TreasureChest => "treasure_chest",
        Commander => "commander",
        Planechase => "planechase",
        Archenemy => "archenemy",
        Vanguard => "vanguard",
        Funny => "funny",
        Starter => "starter",
        Box => "box",
        Promo => "promo",
        Token => "token",
        Memorabilia => "memorabilia",
        Minigame => "minigame",
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unknown_values_deserialize() {
        let layout: Layout = serde_json::from_str("\"some_new_layout\"").unwrap();
        assert_eq!(layout, Layout::Unknown);
        assert_eq!(layout.group(), LayoutGroup::Other);

        let color: Color = serde_json::from_str("\"U\"").unwrap();
        assert_eq!(color, Color::Blue);
    }

    #[test]
    fn language_code_from_str() {
        assert_eq!(
            "zhs".parse::<LanguageCode>().unwrap(),
            LanguageCode::SimplifiedChinese
        );
        let error = "klingon".parse::<LanguageCode>().unwrap_err();
        assert_eq!(error.value(), "klingon");
        assert_eq!(LanguageCode::default().as_str(), "en");
    }

    #[test]
    fn every_value_round_trips_through_as_str() {
        for size in ImageSize::ALL {
            assert_eq!(size.as_str().parse::<ImageSize>().unwrap(), *size);
        }
    }

    #[test]
    fn object_kind_expect() {
        assert!(ObjectKind::Card.expect(ObjectKind::Card).is_ok());
        let error = ObjectKind::List.expect(ObjectKind::Card).unwrap_err();
        assert!(matches!(
            error,
            crate::Error::UnexpectedObject {
                expected: ObjectKind::Card,
                actual: ObjectKind::List
            }
        ));
    }
}
