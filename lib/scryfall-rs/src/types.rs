/// The [`ApiError`] type
mod api_error;
/// The [`Card`] type
mod card;
/// The [`Catalog`] type
mod catalog;
/// The [`List`] type
mod list;
/// The [`ManaCost`] type
mod mana_cost;
/// The [`Ruling`] type
mod ruling;
/// The [`Set`] type
mod set;
/// Enumerated api values
mod values;

pub use self::{
    api_error::ApiError,
    card::{
        Card,
        CardFace,
        ImageUris,
        Preview,
        Prices,
        PurchaseUris,
        RelatedCard,
        RelatedUris,
    },
    catalog::Catalog,
    list::List,
    mana_cost::ManaCost,
    ruling::Ruling,
    set::Set,
    values::{
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
        LayoutGroup,
        Legality,
        ObjectKind,
        Rarity,
        RelatedCardComponent,
        RulingSource,
        SecurityStamp,
        SetKind,
        UnknownValueError,
    },
};
