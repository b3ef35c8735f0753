use anyhow::Context;
use log::info;
use sheckles_core::{Catalog, CatalogConfig};
use std::fs;
use std::path::Path;

const BUILTIN_CATALOG: &[u8] = include_bytes!("../catalog.json");

pub fn builtin_catalog_config() -> anyhow::Result<CatalogConfig> {
    serde_json::from_slice(BUILTIN_CATALOG).context("parse built-in catalog")
}

/// Catalog shipped with the binaries.
pub fn load_builtin_catalog() -> anyhow::Result<Catalog> {
    let config = builtin_catalog_config()?;
    build_catalog(&config, "built-in catalog")
}

pub fn load_catalog_config(path: &Path) -> anyhow::Result<CatalogConfig> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let config =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(config)
}

pub fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let config = load_catalog_config(path)?;
    build_catalog(&config, &path.display().to_string())
}

/// Loads `path` when given, the built-in catalog otherwise.
pub fn load_catalog_or_builtin(path: Option<&Path>) -> anyhow::Result<Catalog> {
    match path {
        Some(path) => load_catalog(path),
        None => load_builtin_catalog(),
    }
}

fn build_catalog(config: &CatalogConfig, origin: &str) -> anyhow::Result<Catalog> {
    let catalog = Catalog::from_config(config).with_context(|| format!("validate {origin}"))?;
    info!(
        "loaded {origin}: {} crops, {} modifiers",
        catalog.crops().len(),
        catalog.modifiers().len()
    );
    Ok(catalog)
}
