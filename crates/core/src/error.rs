use thiserror::Error;

/// Failures of the forward valuator and reverse estimator. All of them are
/// user-facing; none leave any state behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValuationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("cannot estimate: total multiplier is zero")]
    DegenerateMultiplier,
    #[error("no calculation data for crop {0}")]
    NoCalculationData(String),
    #[error("cannot estimate for fixed-price crop {0}")]
    FixedPriceCrop(String),
    #[error("target value is too low for these modifiers")]
    TargetTooLow,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("invalid key {0:?}")]
    InvalidKey(String),
    #[error("duplicate crop {0}")]
    DuplicateCrop(String),
    #[error("duplicate modifier {0}")]
    DuplicateModifier(String),
    #[error("crop {crop}: {reason}")]
    InvalidCrop { crop: String, reason: String },
    #[error("modifier {key}: multiplier must be positive and finite, got {multiplier}")]
    InvalidMultiplier { key: String, multiplier: f64 },
    #[error("modifier {0} is not an allowed weather modifier")]
    InvalidWeather(String),
    #[error("{rule} references unknown modifier {key}")]
    UnknownReference { rule: &'static str, key: String },
}
