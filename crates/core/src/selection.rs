use crate::{ActiveModifiers, Catalog, ModifierKey, ModifierSplit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const MAX_FRIENDS: u8 = 5;

fn default_amount() -> u32 {
    1
}

/// Modifier and bonus choices shared by forward valuation and reverse
/// estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierSelection {
    #[serde(default)]
    pub growth: Option<ModifierKey>,
    #[serde(default)]
    pub weather: Option<ModifierKey>,
    #[serde(default)]
    pub mutations: BTreeSet<ModifierKey>,
    #[serde(default)]
    pub friends: u8,
    /// Number of fruits priced together. Always 1 from the bundled surfaces.
    #[serde(default = "default_amount")]
    pub amount: u32,
}

impl Default for ModifierSelection {
    fn default() -> Self {
        Self {
            growth: None,
            weather: None,
            mutations: BTreeSet::new(),
            friends: 0,
            amount: default_amount(),
        }
    }
}

impl From<ModifierSplit> for ModifierSelection {
    fn from(split: ModifierSplit) -> Self {
        Self {
            growth: split.growth,
            weather: split.weather,
            mutations: split.mutations,
            ..Self::default()
        }
    }
}

impl ModifierSelection {
    pub fn from_active(active: &ActiveModifiers, catalog: &Catalog) -> Self {
        active.split(catalog).into()
    }

    pub fn with_growth(mut self, key: ModifierKey) -> Self {
        self.growth = Some(key);
        self
    }

    pub fn with_weather(mut self, key: ModifierKey) -> Self {
        self.weather = Some(key);
        self
    }

    pub fn with_mutation(mut self, key: ModifierKey) -> Self {
        self.mutations.insert(key);
        self
    }

    pub fn with_friends(mut self, friends: u8) -> Self {
        self.friends = friends;
        self
    }

    pub fn with_amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }
}

/// One forward price request. Built fresh for every calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub crop: String,
    pub mass: f64,
    #[serde(flatten)]
    pub modifiers: ModifierSelection,
}

impl Selection {
    pub fn new(crop: impl Into<String>, mass: f64) -> Self {
        Self {
            crop: crop.into(),
            mass,
            modifiers: ModifierSelection::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: ModifierSelection) -> Self {
        self.modifiers = modifiers;
        self
    }
}
