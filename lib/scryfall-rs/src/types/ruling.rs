use crate::{
    ObjectKind,
    RulingSource,
};
use std::collections::HashMap;

/// A ruling or note for a card
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Ruling {
    /// Always `ruling`
    pub object: ObjectKind,
    /// The oracle id of the card
    pub oracle_id: String,
    /// Who produced this ruling
    pub source: RulingSource,
    /// The publish date
    pub published_at: String,
    /// The ruling text
    pub comment: String,

    /// Unknown data
    #[serde(flatten)]
    pub unknown: HashMap<String, serde_json::Value>,
}
