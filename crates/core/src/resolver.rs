use crate::{Catalog, ModifierCategory, ModifierKey, Notice, NoticeLog};
use log::debug;
use serde::Serialize;
use std::collections::BTreeSet;

/// Flat set of toggled modifiers across all categories. Only changed through
/// [`MutationResolver`], which keeps it legal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActiveModifiers {
    keys: BTreeSet<ModifierKey>,
}

/// [`ActiveModifiers`] partitioned by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierSplit {
    pub growth: Option<ModifierKey>,
    pub weather: Option<ModifierKey>,
    pub mutations: BTreeSet<ModifierKey>,
}

impl ActiveModifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &ModifierKey) -> bool {
        self.keys.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModifierKey> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Keys unknown to the catalog are treated as regular mutations.
    pub fn split(&self, catalog: &Catalog) -> ModifierSplit {
        let mut split = ModifierSplit::default();
        for key in &self.keys {
            match catalog.category_of(key) {
                Some(ModifierCategory::Growth) if split.growth.is_none() => {
                    split.growth = Some(key.clone());
                }
                Some(ModifierCategory::Weather) if split.weather.is_none() => {
                    split.weather = Some(key.clone());
                }
                _ => {
                    split.mutations.insert(key.clone());
                }
            }
        }
        split
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Enabled,
    Disabled,
    Combined(ModifierKey),
    Rejected,
    Unchanged,
}

pub struct MutationResolver<'a> {
    catalog: &'a Catalog,
}

impl<'a> MutationResolver<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn toggle(
        &self,
        active: &mut ActiveModifiers,
        key: &ModifierKey,
        enable: bool,
        notices: &mut NoticeLog,
    ) -> ToggleOutcome {
        if enable {
            self.enable(active, key, notices)
        } else {
            self.disable(active, key)
        }
    }

    /// Disabling never restores anything: a derived modifier does not give
    /// back its sources.
    pub fn disable(&self, active: &mut ActiveModifiers, key: &ModifierKey) -> ToggleOutcome {
        if active.keys.remove(key) {
            debug!("modifier {key} disabled");
            ToggleOutcome::Disabled
        } else {
            ToggleOutcome::Unchanged
        }
    }

    /// Enables `key`, then applies its implies-off list, then any combination
    /// it completes, then conflict checks. A rejected enable leaves `active`
    /// exactly as it was.
    pub fn enable(
        &self,
        active: &mut ActiveModifiers,
        key: &ModifierKey,
        notices: &mut NoticeLog,
    ) -> ToggleOutcome {
        if active.contains(key) {
            return ToggleOutcome::Unchanged;
        }
        let mut next = active.keys.clone();
        let mut pending = Vec::new();
        next.insert(key.clone());

        for cleared in self.catalog.implied_off(key) {
            if cleared != key && next.remove(cleared) {
                pending.push(Notice::Cleared {
                    key: cleared.clone(),
                    by: key.clone(),
                });
            }
        }

        let combined = self
            .catalog
            .combinations_with(key)
            .find(|(partner, _)| next.contains(*partner))
            .map(|(partner, into)| (partner.clone(), into.clone()));

        let outcome = match combined {
            Some((partner, into)) => {
                next.remove(key);
                next.remove(&partner);
                next.insert(into.clone());
                pending.push(Notice::Combined {
                    first: partner,
                    second: key.clone(),
                    into: into.clone(),
                });
                ToggleOutcome::Combined(into)
            }
            None => {
                if let Some(existing) = self.blocker(&next, key) {
                    debug!("modifier {key} rejected, {existing} already active");
                    notices.push(Notice::Rejected {
                        key: key.clone(),
                        conflicts_with: existing,
                    });
                    return ToggleOutcome::Rejected;
                }
                ToggleOutcome::Enabled
            }
        };

        debug!("modifier {key} enabled: {outcome:?}");
        active.keys = next;
        notices.extend(pending);
        outcome
    }

    /// Enables each key in order starting from an empty set.
    pub fn resolve<'k>(
        &self,
        keys: impl IntoIterator<Item = &'k ModifierKey>,
        notices: &mut NoticeLog,
    ) -> ActiveModifiers {
        let mut active = ActiveModifiers::new();
        for key in keys {
            self.enable(&mut active, key, notices);
        }
        active
    }

    /// First active key that forbids `key`: a declared conflict, or another
    /// member of the same single-select category.
    fn blocker(&self, active: &BTreeSet<ModifierKey>, key: &ModifierKey) -> Option<ModifierKey> {
        if let Some(conflict) = self
            .catalog
            .conflicts(key)
            .iter()
            .find(|other| active.contains(*other))
        {
            return Some(conflict.clone());
        }
        let category = self.catalog.category_of(key)?;
        if !category.single_select() {
            return None;
        }
        active
            .iter()
            .find(|other| *other != key && self.catalog.category_of(other) == Some(category))
            .cloned()
    }
}
