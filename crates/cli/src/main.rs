mod args;
mod report;

use args::{Cli, Command, EstimateArgs, PriceArgs};
use clap::Parser;
use log::warn;
use sheckles_core::{
    appraise, estimate_mass, parse_price, Catalog, EstimateRequest, NoticeLog, Selection,
    ValuationError,
};
use sheckles_data::{load_catalog_or_builtin, logging};

const EXIT_SETUP: i32 = 1;
const EXIT_INVALID_INPUT: i32 = 2;
const EXIT_CANNOT_ESTIMATE: i32 = 3;

fn main() {
    let cli = Cli::parse();
    logging::init(logging::level_for_verbosity(cli.verbose));
    if let Err(err) = run(&cli) {
        eprintln!("error: {err:#}");
        std::process::exit(exit_code(&err));
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let catalog = load_catalog_or_builtin(cli.catalog.as_deref())?;
    match &cli.command {
        Command::Price(args) => run_price(&catalog, args),
        Command::EstimateMass(args) => run_estimate(&catalog, args),
    }
}

fn run_price(catalog: &Catalog, args: &PriceArgs) -> anyhow::Result<()> {
    warn_unknown_crop(catalog, &args.crop);
    let mut notices = NoticeLog::default();
    let modifiers = args.modifiers.to_selection(catalog, &mut notices)?;
    let selection = Selection::new(args.crop.clone(), args.mass).with_modifiers(modifiers);
    let appraisal = appraise(catalog, &selection)?;
    let notices: Vec<_> = notices.drain().collect();
    report::print_notices(&notices);
    if args.modifiers.json {
        report::print_json(&report::PriceReport {
            crop: &selection.crop,
            appraisal: &appraisal,
            notices: &notices,
        })?;
    } else {
        report::print_price(catalog, &selection.crop, &appraisal);
    }
    Ok(())
}

fn run_estimate(catalog: &Catalog, args: &EstimateArgs) -> anyhow::Result<()> {
    warn_unknown_crop(catalog, &args.crop);
    let target_price = parse_price(&args.target_price)?;
    let mut notices = NoticeLog::default();
    let modifiers = args.modifiers.to_selection(catalog, &mut notices)?;
    let request = EstimateRequest::new(args.crop.clone(), target_price).with_modifiers(modifiers);
    let estimate = estimate_mass(catalog, &request)?;
    let notices: Vec<_> = notices.drain().collect();
    report::print_notices(&notices);
    if args.modifiers.json {
        report::print_json(&report::EstimateReport {
            crop: &request.crop,
            target_price,
            estimate: &estimate,
            notices: &notices,
        })?;
    } else {
        println!("{estimate}");
    }
    Ok(())
}

fn warn_unknown_crop(catalog: &Catalog, crop: &str) {
    if !crop.trim().is_empty() && catalog.crop(crop).is_none() {
        warn!("crop {crop:?} is not in the catalog");
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ValuationError>() {
        Some(ValuationError::InvalidInput(_)) => EXIT_INVALID_INPUT,
        Some(_) => EXIT_CANNOT_ESTIMATE,
        None => EXIT_SETUP,
    }
}
