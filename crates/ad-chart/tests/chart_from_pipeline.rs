use std::collections::BTreeSet;

use ad_chart::{PASTEL_PALETTE, build_chart_spec};
use ad_core::{Compartment, CompartmentChoice, PolymerType, Record, Table};
use ad_pipeline::{CompartmentScope, PolymerMatching, aggregate, filter};

fn table() -> Table {
    Table::from_records(vec![
        Record::new("Bisphenol A", "BPA", "R1", Compartment::Plastic)
            .with_polymer_types("PP")
            .with_polymers_number(1.0)
            .with_concentration(100.0)
            .with_common_additives("Bisphenols"),
        Record::new("Bisphenol A", "BPA", "R2", Compartment::Plastic)
            .with_polymer_types("PE, PP")
            .with_polymers_number(2.0)
            .with_concentration(40.0)
            .with_common_additives("Bisphenols"),
        Record::new("DEHP", "DEHP", "R3", Compartment::Plastic)
            .with_polymer_types("PVC")
            .with_polymers_number(1.0)
            .with_concentration(1000.0)
            .with_common_additives("Phthalates"),
    ])
}

#[test]
fn plastic_chart_from_filtered_table() {
    let all: BTreeSet<_> = PolymerType::ALL.into_iter().collect();
    let filtered = filter(
        &table(),
        CompartmentChoice::Sediment,
        &all,
        PolymerMatching::Substring,
    );
    let summary = aggregate(&filtered, CompartmentScope::Plastic);
    let spec = build_chart_spec(
        &summary,
        "Additive Abbrev",
        "Concentration(ug/g)",
        Some("Polymers Number"),
    )
    .unwrap()
    .with_title("Additives concentration in Plastic");

    assert_eq!(spec.bars.len(), 2);
    assert_eq!(spec.bars[0].x, "BPA");
    assert_eq!(spec.bars[0].y, Some(70.0));
    assert_eq!(spec.bars[0].category.as_deref(), Some("2"));
    assert_eq!(spec.bars[1].category.as_deref(), Some("1"));
    assert_eq!(spec.bars[0].color, PASTEL_PALETTE[0]);
    assert_eq!(spec.bars[1].color, PASTEL_PALETTE[1]);
    assert_eq!(spec.y_axis.range, Some([0.0, 100.0]));
}

#[test]
fn chart_spec_serializes_to_json() {
    let summary = aggregate(&table(), CompartmentScope::Plastic);
    let spec = build_chart_spec(&summary, "Additive Abbrev", "Concentration(ug/g)", None).unwrap();
    let json = serde_json::to_value(&spec).unwrap();
    assert_eq!(json["y_axis"]["range"][1], serde_json::json!(100.0));
    assert_eq!(json["x_axis"]["show_tick_labels"], serde_json::json!(false));
    assert!(json.get("color_field").is_none());

    let back: ad_chart::ChartSpec = serde_json::from_value(json).unwrap();
    assert_eq!(back, spec);
}
