use clap::{ArgAction, Args, Parser, Subcommand};
use sheckles_core::{
    Catalog, ModifierCategory, ModifierKey, ModifierSelection, MutationResolver, NoticeLog,
    ValuationError,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "sheckles",
    version,
    about = "Grow a Garden crop price calculator",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Catalog JSON to use instead of the built-in one.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price a crop from its mass and modifiers.
    Price(PriceArgs),
    /// Estimate the mass needed to reach a target price.
    #[command(name = "estimate-mass")]
    EstimateMass(EstimateArgs),
}

#[derive(Debug, Args)]
pub struct PriceArgs {
    #[arg(long)]
    pub crop: String,
    /// Mass in kg.
    #[arg(long, allow_hyphen_values = true)]
    pub mass: f64,
    #[command(flatten)]
    pub modifiers: ModifierArgs,
}

#[derive(Debug, Args)]
pub struct EstimateArgs {
    #[arg(long)]
    pub crop: String,
    /// Target price; thousands separators are accepted.
    #[arg(long = "target-price", allow_hyphen_values = true)]
    pub target_price: String,
    #[command(flatten)]
    pub modifiers: ModifierArgs,
}

#[derive(Debug, Args)]
pub struct ModifierArgs {
    /// Growth variant, e.g. gold or rainbow.
    #[arg(long)]
    pub variant: Option<String>,
    /// Weather modifier: wet, chilled, drenched or frozen.
    #[arg(long)]
    pub weather: Option<String>,
    /// Comma separated mutations.
    #[arg(long, value_delimiter = ',')]
    pub mutations: Vec<String>,
    #[arg(long, default_value_t = 0)]
    pub friends: u8,
    #[arg(long, default_value_t = 1)]
    pub amount: u32,
    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

impl ModifierArgs {
    /// Resolves the flags against the catalog and feeds them through the
    /// mutation resolver in order: variant, weather, then mutations.
    pub fn to_selection(
        &self,
        catalog: &Catalog,
        notices: &mut NoticeLog,
    ) -> Result<ModifierSelection, ValuationError> {
        let mut keys = Vec::new();
        if let Some(name) = &self.variant {
            keys.push(lookup(catalog, name, ModifierCategory::Growth, "--variant")?);
        }
        if let Some(name) = &self.weather {
            keys.push(lookup(catalog, name, ModifierCategory::Weather, "--weather")?);
        }
        for name in self.mutations.iter().filter(|name| !name.trim().is_empty()) {
            keys.push(lookup(catalog, name, ModifierCategory::Regular, "--mutations")?);
        }

        let active = MutationResolver::new(catalog).resolve(keys.iter(), notices);
        Ok(ModifierSelection::from_active(&active, catalog)
            .with_friends(self.friends)
            .with_amount(self.amount))
    }
}

fn lookup(
    catalog: &Catalog,
    name: &str,
    category: ModifierCategory,
    flag: &str,
) -> Result<ModifierKey, ValuationError> {
    let def = catalog
        .find_modifier(name)
        .ok_or_else(|| ValuationError::InvalidInput(format!("unknown modifier {name:?}")))?;
    if def.category != category {
        return Err(ValuationError::InvalidInput(format!(
            "{} is a {} modifier and cannot be passed to {flag}",
            def.label,
            def.category.id()
        )));
    }
    Ok(def.key.clone())
}
