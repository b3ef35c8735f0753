use crate::{normalize_key, Catalog, ModifierSelection, Selection, ValuationError, MAX_FRIENDS};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub const FRIEND_MULTIPLIERS: [f64; MAX_FRIENDS as usize + 1] = [1.0, 1.1, 1.2, 1.3, 1.4, 1.5];

const NORMAL_VARIANT: &str = "Normal";

/// Friend bonus table lookup. Counts above the table are clamped.
pub fn friend_multiplier(count: u8) -> f64 {
    FRIEND_MULTIPLIERS[usize::from(count.min(MAX_FRIENDS))]
}

/// Stacks weather and mutation multipliers as `sum - count + 1`: every
/// modifier adds its own `multiplier - 1` on top of a base of one.
pub fn aggregate_multiplier(multipliers: &[f64]) -> f64 {
    if multipliers.is_empty() {
        return 1.0;
    }
    let sum: f64 = multipliers.iter().sum();
    sum - multipliers.len() as f64 + 1.0
}

/// Two-tier base value. Crops without calculation data fall back to `mass^2`.
pub fn base_value(catalog: &Catalog, crop: &str, mass: f64) -> f64 {
    match catalog.crop(crop).and_then(|def| def.calculation) {
        Some(calc) if mass <= calc.tier_threshold => calc.tier1_value,
        Some(calc) => calc.tier2_coefficient * mass * mass,
        None => {
            warn!("no calculation data for crop {crop:?}, using mass squared");
            mass * mass
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceBreakdown {
    pub base_price: f64,
    pub mass: f64,
    pub variant_label: String,
    pub mutation_labels: Vec<String>,
    pub growth_multiplier: f64,
    pub aggregate_multiplier: f64,
    pub friend_multiplier: f64,
    pub amount: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appraisal {
    pub total_price: i64,
    /// Price before rounding up.
    pub raw_price: f64,
    pub breakdown: PriceBreakdown,
}

/// Multipliers shared by the forward and reverse paths.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AppliedModifiers {
    pub growth: f64,
    pub aggregate: f64,
    pub friend: f64,
    pub amount: u32,
    pub variant_label: String,
    pub mutation_labels: Vec<String>,
}

impl AppliedModifiers {
    /// Combined multiplier, formed before dividing a target price.
    pub fn total(&self) -> f64 {
        self.growth * self.aggregate * self.friend * f64::from(self.amount)
    }
}

pub(crate) fn require_crop(crop: &str) -> Result<(), ValuationError> {
    if normalize_key(crop).is_empty() {
        return Err(ValuationError::InvalidInput("no crop selected".to_string()));
    }
    Ok(())
}

pub(crate) fn apply_modifiers(
    catalog: &Catalog,
    selection: &ModifierSelection,
) -> Result<AppliedModifiers, ValuationError> {
    if selection.friends > MAX_FRIENDS {
        return Err(ValuationError::InvalidInput(format!(
            "friend count must be between 0 and {MAX_FRIENDS}, got {}",
            selection.friends
        )));
    }
    if selection.amount == 0 {
        return Err(ValuationError::InvalidInput(
            "amount must be at least 1".to_string(),
        ));
    }

    let (growth, variant_label) = match &selection.growth {
        Some(key) => match catalog.modifier_by_key(key) {
            Some(def) => (def.multiplier, def.label.clone()),
            None => {
                warn!("unknown growth variant {key}, ignoring");
                (1.0, NORMAL_VARIANT.to_string())
            }
        },
        None => (1.0, NORMAL_VARIANT.to_string()),
    };

    let mut multipliers = Vec::new();
    let mut mutation_labels = Vec::new();
    for key in selection.weather.iter().chain(selection.mutations.iter()) {
        match catalog.modifier_by_key(key) {
            Some(def) => {
                multipliers.push(def.multiplier);
                mutation_labels.push(def.label.clone());
            }
            None => warn!("unknown modifier {key}, ignoring"),
        }
    }

    Ok(AppliedModifiers {
        growth,
        aggregate: aggregate_multiplier(&multipliers),
        friend: friend_multiplier(selection.friends),
        amount: selection.amount,
        variant_label,
        mutation_labels,
    })
}

/// Forward price of one selection: base value times growth, aggregate,
/// friend and amount multipliers, rounded up.
pub fn appraise(catalog: &Catalog, selection: &Selection) -> Result<Appraisal, ValuationError> {
    require_crop(&selection.crop)?;
    let mass = selection.mass;
    if !mass.is_finite() || mass <= 0.0 {
        return Err(ValuationError::InvalidInput(format!(
            "mass must be a positive number, got {mass}"
        )));
    }

    let applied = apply_modifiers(catalog, &selection.modifiers)?;
    let base_price = base_value(catalog, &selection.crop, mass);
    // Factor order matters under ceil; keep it left to right.
    let raw_price = base_price
        * applied.growth
        * applied.aggregate
        * applied.friend
        * f64::from(applied.amount);
    if !raw_price.is_finite() || raw_price > i64::MAX as f64 {
        return Err(ValuationError::InvalidInput(format!(
            "price for {mass} kg is out of range"
        )));
    }
    let total_price = raw_price.ceil() as i64;
    debug!(
        "appraise {} at {mass} kg: base {base_price} x growth {} x aggregate {} x friends {} = {raw_price}",
        selection.crop, applied.growth, applied.aggregate, applied.friend
    );

    Ok(Appraisal {
        total_price,
        raw_price,
        breakdown: PriceBreakdown {
            base_price,
            mass,
            variant_label: applied.variant_label,
            mutation_labels: applied.mutation_labels,
            growth_multiplier: applied.growth,
            aggregate_multiplier: applied.aggregate,
            friend_multiplier: applied.friend,
            amount: applied.amount,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_catalog;
    use crate::ModifierKey;

    fn key(raw: &str) -> ModifierKey {
        ModifierKey::parse(raw).unwrap()
    }

    #[test]
    fn aggregate_is_sum_minus_count_plus_one() {
        assert_eq!(aggregate_multiplier(&[]), 1.0);
        assert_eq!(aggregate_multiplier(&[85.0]), 85.0);
        assert_eq!(aggregate_multiplier(&[2.0, 2.0]), 3.0);
        assert_eq!(aggregate_multiplier(&[1.0, 1.0, 1.0]), 1.0);
        assert_eq!(aggregate_multiplier(&[5.0, 4.0, 10.0]), 17.0);
    }

    #[test]
    fn friend_table_matches_bonus_steps() {
        let values: Vec<f64> = (0..=MAX_FRIENDS).map(friend_multiplier).collect();
        assert_eq!(values, vec![1.0, 1.1, 1.2, 1.3, 1.4, 1.5]);
        assert_eq!(friend_multiplier(9), 1.5);
    }

    #[test]
    fn tier_boundary_is_inclusive_on_fixed_side() {
        let catalog = fixture_catalog();
        assert_eq!(base_value(&catalog, "tall_melon", 18.0), 14.0);
        let above = 18.0 + 1e-9;
        assert_eq!(base_value(&catalog, "tall_melon", above), 165.0 * above * above);
        assert_eq!(base_value(&catalog, "tall_melon", 0.5), 14.0);
    }

    #[test]
    fn tall_melon_at_twenty_kg() {
        let catalog = fixture_catalog();
        let appraisal = appraise(&catalog, &Selection::new("tall_melon", 20.0)).unwrap();
        assert_eq!(appraisal.breakdown.base_price, 66_000.0);
        assert_eq!(appraisal.total_price, 66_000);
        assert_eq!(appraisal.breakdown.variant_label, "Normal");
        assert!(appraisal.breakdown.mutation_labels.is_empty());
    }

    #[test]
    fn unknown_crop_falls_back_to_mass_squared() {
        let catalog = fixture_catalog();
        let appraisal = appraise(&catalog, &Selection::new("nonexistent_crop_id", 10.0)).unwrap();
        assert_eq!(appraisal.breakdown.base_price, 100.0);
        assert_eq!(appraisal.total_price, 100);
    }

    #[test]
    fn crop_without_calculation_data_falls_back() {
        let catalog = fixture_catalog();
        let appraisal = appraise(&catalog, &Selection::new("mystery_fern", 3.0)).unwrap();
        assert_eq!(appraisal.total_price, 9);
    }

    #[test]
    fn stacks_growth_weather_mutations_and_friends() {
        let catalog = fixture_catalog();
        let modifiers = ModifierSelection::default()
            .with_growth(key("gold"))
            .with_weather(key("wet"))
            .with_mutation(key("shocked"))
            .with_friends(5);
        let selection = Selection::new("tall_melon", 20.0).with_modifiers(modifiers);
        let appraisal = appraise(&catalog, &selection).unwrap();
        // aggregate: 2 + 100 - 2 + 1
        assert_eq!(appraisal.breakdown.aggregate_multiplier, 101.0);
        assert_eq!(appraisal.breakdown.growth_multiplier, 20.0);
        assert_eq!(appraisal.breakdown.friend_multiplier, 1.5);
        assert_eq!(appraisal.total_price, 199_980_000);
        assert_eq!(appraisal.breakdown.variant_label, "Gold");
        assert_eq!(appraisal.breakdown.mutation_labels, vec!["Wet", "Shocked"]);
    }

    #[test]
    fn rounds_up_fractional_prices() {
        let catalog = fixture_catalog();
        let selection = Selection::new("carrot", 0.3);
        let appraisal = appraise(&catalog, &selection).unwrap();
        assert!(appraisal.raw_price.fract() > 0.0);
        assert_eq!(appraisal.total_price, appraisal.raw_price.ceil() as i64);
    }

    #[test]
    fn multiplies_factors_left_to_right() {
        let catalog = fixture_catalog();
        let modifiers = ModifierSelection::default()
            .with_weather(key("drenched"))
            .with_friends(1);
        let selection = Selection::new("carrot", 0.2).with_modifiers(modifiers);
        let appraisal = appraise(&catalog, &selection).unwrap();
        assert_eq!(appraisal.raw_price, 20.0 * 5.0 * 1.1);
        assert_eq!(appraisal.total_price, 111);
    }

    #[test]
    fn rejects_prices_beyond_range() {
        let catalog = fixture_catalog();
        let selection = Selection::new("tall_melon", 1e200);
        assert!(matches!(
            appraise(&catalog, &selection),
            Err(ValuationError::InvalidInput(_))
        ));
    }

    #[test]
    fn amount_scales_the_price() {
        let catalog = fixture_catalog();
        let single = appraise(&catalog, &Selection::new("tall_melon", 20.0)).unwrap();
        let modifiers = ModifierSelection::default().with_amount(3);
        let triple = appraise(
            &catalog,
            &Selection::new("tall_melon", 20.0).with_modifiers(modifiers),
        )
        .unwrap();
        assert_eq!(triple.total_price, single.total_price * 3);
    }

    #[test]
    fn unknown_modifier_keys_contribute_nothing() {
        let catalog = fixture_catalog();
        let modifiers = ModifierSelection::default()
            .with_growth(key("platinum"))
            .with_mutation(key("glitter"));
        let selection = Selection::new("tall_melon", 20.0).with_modifiers(modifiers);
        let appraisal = appraise(&catalog, &selection).unwrap();
        assert_eq!(appraisal.total_price, 66_000);
    }

    #[test]
    fn rejects_bad_inputs() {
        let catalog = fixture_catalog();
        for selection in [
            Selection::new("", 1.0),
            Selection::new("  ", 1.0),
            Selection::new("carrot", 0.0),
            Selection::new("carrot", -2.0),
            Selection::new("carrot", f64::NAN),
            Selection::new("carrot", f64::INFINITY),
            Selection::new("carrot", 1.0)
                .with_modifiers(ModifierSelection::default().with_friends(6)),
            Selection::new("carrot", 1.0)
                .with_modifiers(ModifierSelection::default().with_amount(0)),
        ] {
            assert!(
                matches!(
                    appraise(&catalog, &selection),
                    Err(ValuationError::InvalidInput(_))
                ),
                "{selection:?}"
            );
        }
    }
}
