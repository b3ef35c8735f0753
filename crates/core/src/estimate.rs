use crate::valuation::{apply_modifiers, require_crop};
use crate::{format_mass, Catalog, ModifierSelection, ValuationError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub crop: String,
    pub target_price: f64,
    #[serde(flatten)]
    pub modifiers: ModifierSelection,
}

impl EstimateRequest {
    pub fn new(crop: impl Into<String>, target_price: f64) -> Self {
        Self {
            crop: crop.into(),
            target_price,
            modifiers: ModifierSelection::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: ModifierSelection) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Result of inverting the price formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MassEstimate {
    /// Target falls in the fixed-value tier; any mass up to the threshold fits.
    Bound { threshold_mass: f64 },
    Estimate { mass: f64 },
}

impl MassEstimate {
    pub fn mass(&self) -> f64 {
        match self {
            Self::Bound { threshold_mass } => *threshold_mass,
            Self::Estimate { mass } => *mass,
        }
    }
}

impl fmt::Display for MassEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bound { threshold_mass } => write!(f, "<= {} kg", format_mass(*threshold_mass)),
            Self::Estimate { mass } => write!(f, "≈ {} kg", format_mass(*mass)),
        }
    }
}

/// Recovers the mass a crop needs to reach `target_price` under the given
/// modifiers. Only the quadratic tier can be inverted.
pub fn estimate_mass(
    catalog: &Catalog,
    request: &EstimateRequest,
) -> Result<MassEstimate, ValuationError> {
    require_crop(&request.crop)?;
    let target = request.target_price;
    if !target.is_finite() || target <= 0.0 {
        return Err(ValuationError::InvalidInput(format!(
            "target price must be a positive number, got {target}"
        )));
    }

    let applied = apply_modifiers(catalog, &request.modifiers)?;
    let total = applied.total();
    if total == 0.0 {
        return Err(ValuationError::DegenerateMultiplier);
    }
    let required_base = target / total;

    let calc = catalog
        .crop(&request.crop)
        .and_then(|def| def.calculation)
        .ok_or_else(|| ValuationError::NoCalculationData(request.crop.clone()))?;
    if calc.tier2_coefficient == 0.0 {
        return Err(ValuationError::FixedPriceCrop(request.crop.clone()));
    }

    let mass_squared = required_base / calc.tier2_coefficient;
    if mass_squared < 0.0 {
        return Err(ValuationError::TargetTooLow);
    }
    let mass = mass_squared.sqrt();
    debug!(
        "estimate {} for {target}: multiplier {total}, base {required_base}, mass {mass}",
        request.crop
    );

    if mass <= calc.tier_threshold {
        Ok(MassEstimate::Bound {
            threshold_mass: calc.tier_threshold,
        })
    } else {
        Ok(MassEstimate::Estimate { mass })
    }
}
