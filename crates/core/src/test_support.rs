use crate::{
    Catalog, CatalogConfig, CombinationRule, CropCalculation, CropRule, ModifierCategory,
    ModifierRule,
};
use std::collections::BTreeMap;

fn crop(id: &str, calculation: Option<(f64, f64, f64)>) -> CropRule {
    CropRule {
        id: id.to_string(),
        display_name: id.replace('_', " "),
        calculation: calculation.map(|(tier_threshold, tier1_value, tier2_coefficient)| {
            CropCalculation {
                tier_threshold,
                tier1_value,
                tier2_coefficient,
            }
        }),
    }
}

fn modifier(key: &str, label: &str, multiplier: f64, category: ModifierCategory) -> ModifierRule {
    ModifierRule {
        key: key.to_string(),
        label: label.to_string(),
        multiplier,
        category,
    }
}

fn table(entries: Vec<(&str, Vec<&str>)>) -> BTreeMap<String, Vec<String>> {
    entries
        .into_iter()
        .map(|(key, values)| {
            (
                key.to_string(),
                values.iter().map(|value| value.to_string()).collect(),
            )
        })
        .collect()
}

pub fn fixture_config() -> CatalogConfig {
    use ModifierCategory::{Growth, Regular, Weather};
    CatalogConfig {
        crops: vec![
            crop("tall_melon", Some((18.0, 14.0, 165.0))),
            crop("carrot", Some((0.275, 20.0, 275.0))),
            crop("fixed_bean", Some((1.0, 50.0, 0.0))),
            crop("mystery_fern", None),
        ],
        modifiers: vec![
            modifier("gold", "Gold", 20.0, Growth),
            modifier("rainbow", "Rainbow", 50.0, Growth),
            modifier("silver", "Silver", 5.0, Growth),
            modifier("wet", "Wet", 2.0, Weather),
            modifier("chilled", "Chilled", 2.0, Weather),
            modifier("drenched", "Drenched", 5.0, Weather),
            modifier("frozen", "Frozen", 10.0, Weather),
            modifier("burnt", "Burnt", 4.0, Regular),
            modifier("cooked", "Cooked", 10.0, Regular),
            modifier("ceramic", "Ceramic", 30.0, Regular),
            modifier("verdant", "Verdant", 4.0, Regular),
            modifier("sundried", "Sundried", 85.0, Regular),
            modifier("paradisal", "Paradisal", 100.0, Regular),
            modifier("twisted", "Twisted", 5.0, Regular),
            modifier("windstruck", "Windstruck", 2.0, Regular),
            modifier("tempestuous", "Tempestuous", 12.0, Regular),
            modifier("cyclonic", "Cyclonic", 50.0, Regular),
            modifier("maelstrom", "Maelstrom", 100.0, Regular),
            modifier("shocked", "Shocked", 100.0, Regular),
            modifier("soggy", "Soggy", 0.5, Regular),
            modifier("wilted", "Wilted", 0.5, Regular),
            modifier("dampened", "Dampened", 0.5, Regular),
        ],
        conflicts: table(vec![
            ("burnt", vec!["cooked", "ceramic"]),
            ("gold", vec!["rainbow", "silver"]),
            (
                "twisted",
                vec!["windstruck", "tempestuous", "cyclonic", "maelstrom"],
            ),
            ("maelstrom", vec!["shocked"]),
        ]),
        implies_off: table(vec![
            ("cooked", vec!["burnt"]),
            ("frozen", vec!["wet", "drenched", "chilled"]),
            ("drenched", vec!["wet"]),
            ("maelstrom", vec!["windstruck"]),
        ]),
        combinations: vec![
            CombinationRule {
                first: "verdant".to_string(),
                second: "sundried".to_string(),
                into: "paradisal".to_string(),
            },
            CombinationRule {
                first: "wet".to_string(),
                second: "chilled".to_string(),
                into: "frozen".to_string(),
            },
        ],
    }
}

pub fn fixture_catalog() -> Catalog {
    Catalog::from_config(&fixture_config()).expect("fixture catalog")
}
