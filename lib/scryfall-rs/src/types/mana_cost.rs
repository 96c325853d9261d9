use crate::{
    Color,
    ObjectKind,
};
use std::collections::HashMap;

/// A parsed mana cost
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ManaCost {
    /// Always `mana_cost`
    pub object: ObjectKind,
    /// The normalized cost
    pub cost: String,
    /// The mana value. Un-set symbols may make this fractional.
    pub cmc: f64,
    /// The colors
    pub colors: Vec<Color>,
    /// Whether this is colorless
    pub colorless: bool,
    /// Whether this is monocolored
    pub monocolored: bool,
    /// Whether this is multicolored
    pub multicolored: bool,

    /// Unknown data
    #[serde(flatten)]
    pub unknown: HashMap<String, serde_json::Value>,
}
