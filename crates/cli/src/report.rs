use serde::Serialize;
use sheckles_core::{format_mass, format_sheckles, Appraisal, Catalog, MassEstimate, Notice};

#[derive(Serialize)]
pub struct PriceReport<'a> {
    pub crop: &'a str,
    pub appraisal: &'a Appraisal,
    pub notices: &'a [Notice],
}

#[derive(Serialize)]
pub struct EstimateReport<'a> {
    pub crop: &'a str,
    pub target_price: f64,
    pub estimate: &'a MassEstimate,
    pub notices: &'a [Notice],
}

pub fn print_notices(notices: &[Notice]) {
    for notice in notices {
        eprintln!("note: {notice}");
    }
}

pub fn print_json<T: Serialize>(report: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

pub fn print_price(catalog: &Catalog, crop: &str, appraisal: &Appraisal) {
    let breakdown = &appraisal.breakdown;
    let crop_name = catalog
        .crop(crop)
        .map(|def| def.display_name.as_str())
        .unwrap_or(crop);
    println!("{}", appraisal.total_price);
    println!("  crop:      {crop_name}");
    println!("  mass:      {} kg", format_mass(breakdown.mass));
    println!("  base:      {}", format_sheckles(breakdown.base_price.ceil() as i64));
    println!(
        "  variant:   {} (x{})",
        breakdown.variant_label, breakdown.growth_multiplier
    );
    if breakdown.mutation_labels.is_empty() {
        println!("  mutations: none");
    } else {
        println!(
            "  mutations: {} (x{})",
            breakdown.mutation_labels.join(", "),
            breakdown.aggregate_multiplier
        );
    }
    println!("  friends:   x{}", breakdown.friend_multiplier);
    if breakdown.amount > 1 {
        println!("  amount:    {}", breakdown.amount);
    }
    println!("  total:     {} Sheckles", format_sheckles(appraisal.total_price));
}
