use sheckles_core::{
    appraise, estimate_mass, EstimateRequest, MassEstimate, ModifierCategory, ModifierKey,
    ModifierSelection, MutationResolver, Notice, NoticeLog, Selection, ToggleOutcome, WEATHER_KEYS,
};
use sheckles_data::{builtin_catalog_config, load_builtin_catalog};

fn key(raw: &str) -> ModifierKey {
    ModifierKey::parse(raw).expect("key")
}

#[test]
fn weather_category_is_the_fixed_four() {
    let catalog = load_builtin_catalog().expect("catalog");
    let mut weather: Vec<&str> = catalog
        .modifiers_in(ModifierCategory::Weather)
        .map(|def| def.key.as_str())
        .collect();
    weather.sort_unstable();
    let mut expected = WEATHER_KEYS.to_vec();
    expected.sort_unstable();
    assert_eq!(weather, expected);
}

#[test]
fn every_crop_with_data_has_a_positive_threshold() {
    let config = builtin_catalog_config().expect("config");
    for crop in &config.crops {
        if let Some(calc) = crop.calculation {
            assert!(calc.tier_threshold > 0.0, "{}", crop.id);
            assert!(calc.tier2_coefficient > 0.0, "{}", crop.id);
        }
    }
}

#[test]
fn built_in_rules_match_the_game() {
    let catalog = load_builtin_catalog().expect("catalog");
    for (first, other) in [
        ("burnt", "cooked"),
        ("burnt", "ceramic"),
        ("gold", "rainbow"),
        ("gold", "silver"),
        ("twisted", "windstruck"),
        ("twisted", "tempestuous"),
        ("twisted", "cyclonic"),
        ("twisted", "maelstrom"),
    ] {
        assert!(catalog.conflicts(&key(first)).contains(&key(other)), "{first}/{other}");
        assert!(catalog.conflicts(&key(other)).contains(&key(first)), "{other}/{first}");
    }
    assert_eq!(
        catalog.combination(&key("sundried"), &key("verdant")),
        Some(&key("paradisal"))
    );
    assert_eq!(
        catalog.implied_off(&key("frozen")),
        &[key("wet"), key("drenched"), key("chilled")]
    );
}

#[test]
fn gold_blocks_rainbow() {
    let catalog = load_builtin_catalog().expect("catalog");
    let resolver = MutationResolver::new(&catalog);
    let mut notices = NoticeLog::default();
    let mut active = resolver.resolve([&key("gold")], &mut notices);
    assert_eq!(
        resolver.enable(&mut active, &key("rainbow"), &mut notices),
        ToggleOutcome::Rejected
    );
    assert!(active.contains(&key("gold")));
    assert!(!active.contains(&key("rainbow")));
}

#[test]
fn verdant_sundried_makes_paradisal_once() {
    let catalog = load_builtin_catalog().expect("catalog");
    let resolver = MutationResolver::new(&catalog);
    let mut notices = NoticeLog::default();
    let active = resolver.resolve([&key("verdant"), &key("sundried")], &mut notices);
    let keys: Vec<&str> = active.iter().map(ModifierKey::as_str).collect();
    assert_eq!(keys, vec!["paradisal"]);
    let drained: Vec<Notice> = notices.drain().collect();
    assert_eq!(
        drained,
        vec![Notice::Combined {
            first: key("verdant"),
            second: key("sundried"),
            into: key("paradisal"),
        }]
    );
}

#[test]
fn clay_and_burnt_fire_into_ceramic() {
    let catalog = load_builtin_catalog().expect("catalog");
    let resolver = MutationResolver::new(&catalog);
    let mut notices = NoticeLog::default();
    let active = resolver.resolve([&key("sandy"), &key("wet"), &key("burnt")], &mut notices);
    let keys: Vec<&str> = active.iter().map(ModifierKey::as_str).collect();
    assert_eq!(keys, vec!["ceramic"]);
}

#[test]
fn unknown_crop_prices_as_mass_squared() {
    let catalog = load_builtin_catalog().expect("catalog");
    let appraisal = appraise(&catalog, &Selection::new("nonexistent_crop_id", 10.0)).expect("ok");
    assert_eq!(appraisal.breakdown.base_price, 100.0);
    assert_eq!(appraisal.total_price, 100);
}

#[test]
fn small_carrot_is_worth_its_floor() {
    let catalog = load_builtin_catalog().expect("catalog");
    let appraisal = appraise(&catalog, &Selection::new("carrot", 0.2)).expect("ok");
    assert_eq!(appraisal.total_price, 20);
    let request = EstimateRequest::new("carrot", 10.0);
    assert_eq!(
        estimate_mass(&catalog, &request),
        Ok(MassEstimate::Bound {
            threshold_mass: 0.275
        })
    );
}

#[test]
fn round_trips_every_crop_with_data() {
    let catalog = load_builtin_catalog().expect("catalog");
    let modifiers = ModifierSelection::default()
        .with_growth(key("rainbow"))
        .with_weather(key("frozen"))
        .with_mutation(key("shocked"))
        .with_friends(1);
    for crop in catalog.crops() {
        let Some(calc) = crop.calculation else {
            continue;
        };
        let mass = calc.tier_threshold * 1.75;
        let selection = Selection::new(crop.id.clone(), mass).with_modifiers(modifiers.clone());
        let appraisal = appraise(&catalog, &selection).expect("appraise");
        let request = EstimateRequest::new(crop.id.clone(), appraisal.raw_price)
            .with_modifiers(modifiers.clone());
        let got = estimate_mass(&catalog, &request).expect("estimate").mass();
        assert!(((got - mass) / mass).abs() < 1e-6, "{}: {mass} vs {got}", crop.id);
    }
}

#[test]
fn crops_without_data_cannot_be_estimated() {
    let catalog = load_builtin_catalog().expect("catalog");
    assert!(catalog.crop("travelers_fruit").is_some());
    assert!(matches!(
        estimate_mass(&catalog, &EstimateRequest::new("travelers_fruit", 1_000.0)),
        Err(sheckles_core::ValuationError::NoCalculationData(_))
    ));
}
