//! Catalog loading and validation, plus process setup shared by the binaries.

pub mod load;
pub mod logging;

pub use load::*;

pub use sheckles_core::{
    Catalog, CatalogConfig, CombinationRule, CropCalculation, CropRule, ModifierCategory,
    ModifierRule,
};
