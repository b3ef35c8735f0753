use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CropCalculation {
    /// Mass in kg at or below which the crop is worth `tier1_value`.
    pub tier_threshold: f64,
    pub tier1_value: f64,
    /// Above the threshold the base value is `tier2_coefficient * mass^2`.
    pub tier2_coefficient: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropRule {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub calculation: Option<CropCalculation>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ModifierCategory {
    Growth,
    Weather,
    Regular,
}

impl ModifierCategory {
    pub fn id(self) -> &'static str {
        match self {
            Self::Growth => "growth",
            Self::Weather => "weather",
            Self::Regular => "regular",
        }
    }

    pub fn single_select(self) -> bool {
        matches!(self, Self::Growth | Self::Weather)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierRule {
    pub key: String,
    pub label: String,
    pub multiplier: f64,
    pub category: ModifierCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinationRule {
    pub first: String,
    pub second: String,
    pub into: String,
}

/// Raw catalog as it is stored on disk. Turned into a [`crate::Catalog`] by
/// [`crate::Catalog::from_config`], which also validates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub crops: Vec<CropRule>,
    pub modifiers: Vec<ModifierRule>,
    #[serde(default)]
    pub conflicts: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub implies_off: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub combinations: Vec<CombinationRule>,
}
