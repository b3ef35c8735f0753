use crate::{
    normalize_key, CatalogConfig, CatalogError, CropCalculation, ModifierCategory, ModifierKey,
};
use serde::Serialize;
use std::collections::HashMap;

/// The only keys a weather-category modifier may use.
pub const WEATHER_KEYS: [&str; 4] = ["wet", "chilled", "drenched", "frozen"];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CropDef {
    pub id: String,
    pub display_name: String,
    pub calculation: Option<CropCalculation>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModifierDef {
    pub key: ModifierKey,
    pub label: String,
    pub multiplier: f64,
    pub category: ModifierCategory,
}

#[derive(Debug, Clone, PartialEq)]
struct Combination {
    first: ModifierKey,
    second: ModifierKey,
    into: ModifierKey,
}

/// Immutable crop and modifier tables. Built once and passed by reference to
/// the resolver, valuator and estimator.
#[derive(Debug, Clone)]
pub struct Catalog {
    crops: Vec<CropDef>,
    crop_index: HashMap<String, usize>,
    modifiers: Vec<ModifierDef>,
    modifier_index: HashMap<ModifierKey, usize>,
    conflicts: HashMap<ModifierKey, Vec<ModifierKey>>,
    implies_off: HashMap<ModifierKey, Vec<ModifierKey>>,
    combinations: Vec<Combination>,
}

impl Catalog {
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut crops = Vec::with_capacity(config.crops.len());
        let mut crop_index = HashMap::new();
        for rule in &config.crops {
            let id = normalize_key(&rule.id);
            if id.is_empty() {
                return Err(CatalogError::InvalidKey(rule.id.clone()));
            }
            if let Some(calc) = &rule.calculation {
                validate_calculation(&id, calc)?;
            }
            if crop_index.insert(id.clone(), crops.len()).is_some() {
                return Err(CatalogError::DuplicateCrop(id));
            }
            crops.push(CropDef {
                id,
                display_name: rule.display_name.clone(),
                calculation: rule.calculation,
            });
        }

        let mut modifiers = Vec::with_capacity(config.modifiers.len());
        let mut modifier_index = HashMap::new();
        for rule in &config.modifiers {
            let key = parse_key(&rule.key)?;
            if !rule.multiplier.is_finite() || rule.multiplier <= 0.0 {
                return Err(CatalogError::InvalidMultiplier {
                    key: key.to_string(),
                    multiplier: rule.multiplier,
                });
            }
            if rule.category == ModifierCategory::Weather && !WEATHER_KEYS.contains(&key.as_str())
            {
                return Err(CatalogError::InvalidWeather(key.to_string()));
            }
            if modifier_index.insert(key.clone(), modifiers.len()).is_some() {
                return Err(CatalogError::DuplicateModifier(key.to_string()));
            }
            modifiers.push(ModifierDef {
                key,
                label: rule.label.clone(),
                multiplier: rule.multiplier,
                category: rule.category,
            });
        }

        let known = |rule: &'static str, raw: &str| -> Result<ModifierKey, CatalogError> {
            let key = parse_key(raw)?;
            if modifier_index.contains_key(&key) {
                Ok(key)
            } else {
                Err(CatalogError::UnknownReference {
                    rule,
                    key: key.to_string(),
                })
            }
        };

        // Conflicts may be declared one way only; store both directions.
        let mut conflicts: HashMap<ModifierKey, Vec<ModifierKey>> = HashMap::new();
        for (raw, others) in &config.conflicts {
            let key = known("conflict", raw)?;
            for raw_other in others {
                let other = known("conflict", raw_other)?;
                if other == key {
                    continue;
                }
                push_unique(conflicts.entry(key.clone()).or_default(), other.clone());
                push_unique(conflicts.entry(other).or_default(), key.clone());
            }
        }

        let mut implies_off = HashMap::new();
        for (raw, cleared) in &config.implies_off {
            let key = known("implies_off", raw)?;
            let mut list = Vec::with_capacity(cleared.len());
            for raw_other in cleared {
                push_unique(&mut list, known("implies_off", raw_other)?);
            }
            implies_off.insert(key, list);
        }

        let mut combinations = Vec::with_capacity(config.combinations.len());
        for rule in &config.combinations {
            combinations.push(Combination {
                first: known("combination", &rule.first)?,
                second: known("combination", &rule.second)?,
                into: known("combination", &rule.into)?,
            });
        }

        Ok(Self {
            crops,
            crop_index,
            modifiers,
            modifier_index,
            conflicts,
            implies_off,
            combinations,
        })
    }

    /// Crop by id. Unknown crops are `None`; callers fall back rather than fail.
    pub fn crop(&self, id: &str) -> Option<&CropDef> {
        self.crop_index
            .get(&normalize_key(id))
            .map(|idx| &self.crops[*idx])
    }

    pub fn crops(&self) -> &[CropDef] {
        &self.crops
    }

    pub fn modifier(&self, key: &str) -> Option<&ModifierDef> {
        let key = ModifierKey::parse(key).ok()?;
        self.modifier_by_key(&key)
    }

    pub fn modifier_by_key(&self, key: &ModifierKey) -> Option<&ModifierDef> {
        self.modifier_index.get(key).map(|idx| &self.modifiers[*idx])
    }

    /// Looks a modifier up by key or by display label, ignoring case and
    /// separators. Used for names typed by a user.
    pub fn find_modifier(&self, raw: &str) -> Option<&ModifierDef> {
        if let Some(def) = self.modifier(raw) {
            return Some(def);
        }
        let wanted = squash(raw);
        self.modifiers
            .iter()
            .find(|def| squash(def.key.as_str()) == wanted || squash(&def.label) == wanted)
    }

    pub fn modifiers(&self) -> &[ModifierDef] {
        &self.modifiers
    }

    pub fn modifiers_in(&self, category: ModifierCategory) -> impl Iterator<Item = &ModifierDef> {
        self.modifiers
            .iter()
            .filter(move |def| def.category == category)
    }

    pub fn category_of(&self, key: &ModifierKey) -> Option<ModifierCategory> {
        self.modifier_by_key(key).map(|def| def.category)
    }

    pub fn conflicts(&self, key: &ModifierKey) -> &[ModifierKey] {
        self.conflicts.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn implied_off(&self, key: &ModifierKey) -> &[ModifierKey] {
        self.implies_off.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Derived modifier for a pair, checked in both orders.
    pub fn combination(&self, a: &ModifierKey, b: &ModifierKey) -> Option<&ModifierKey> {
        self.combinations
            .iter()
            .find(|combo| {
                (&combo.first == a && &combo.second == b)
                    || (&combo.first == b && &combo.second == a)
            })
            .map(|combo| &combo.into)
    }

    /// Every combination `key` takes part in, as `(partner, derived)`.
    pub fn combinations_with<'a>(
        &'a self,
        key: &'a ModifierKey,
    ) -> impl Iterator<Item = (&'a ModifierKey, &'a ModifierKey)> + 'a {
        self.combinations.iter().filter_map(move |combo| {
            if &combo.first == key {
                Some((&combo.second, &combo.into))
            } else if &combo.second == key {
                Some((&combo.first, &combo.into))
            } else {
                None
            }
        })
    }
}

fn parse_key(raw: &str) -> Result<ModifierKey, CatalogError> {
    ModifierKey::parse(raw).map_err(|_| CatalogError::InvalidKey(raw.to_string()))
}

fn validate_calculation(id: &str, calc: &CropCalculation) -> Result<(), CatalogError> {
    let invalid = |reason: &str| CatalogError::InvalidCrop {
        crop: id.to_string(),
        reason: reason.to_string(),
    };
    if !calc.tier_threshold.is_finite() || calc.tier_threshold <= 0.0 {
        return Err(invalid("tier_threshold must be positive"));
    }
    if !calc.tier1_value.is_finite() || calc.tier1_value < 0.0 {
        return Err(invalid("tier1_value must be non-negative"));
    }
    if !calc.tier2_coefficient.is_finite() {
        return Err(invalid("tier2_coefficient must be finite"));
    }
    Ok(())
}

fn push_unique(list: &mut Vec<ModifierKey>, key: ModifierKey) {
    if !list.contains(&key) {
        list.push(key);
    }
}

fn squash(raw: &str) -> String {
    normalize_key(raw).replace('_', "")
}
