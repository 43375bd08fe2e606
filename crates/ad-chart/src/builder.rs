//! Aggregated table → bar chart request.

use ad_core::{CellValue, CoreError, CoreResult, Field};
use ad_pipeline::AggregateTable;

use crate::palette::palette_color;
use crate::spec::{BarSpec, ChartSpec, HoverEntry, LegendEntry, XAxisSpec, YAxisSpec};
use crate::{ChartError, ChartResult};

/// The y axis stops at this fraction of the tallest bar. Outliers run off the
/// top so the low-concentration bars stay readable.
pub const Y_RANGE_FACTOR: f64 = 0.1;

pub const X_TICK_ANGLE_DEG: f64 = -45.0;

fn resolve(table: &AggregateTable, name: &str) -> ChartResult<Field> {
    table.field(name).map_err(|err| match err {
        CoreError::MissingField { field } => ChartError::MissingField { field },
        other => ChartError::MissingField {
            field: other.to_string(),
        },
    })
}

fn cell<'a>(value: CoreResult<CellValue<'a>>, field: Field) -> ChartResult<CellValue<'a>> {
    value.map_err(|_| ChartError::MissingField {
        field: field.column_name().to_string(),
    })
}

/// Build a categorical bar chart with one bar per row of `table`.
///
/// `color_field` picks the legend category; categories take palette colors in
/// order of first appearance.
pub fn build_chart_spec(
    table: &AggregateTable,
    x_field: &str,
    y_field: &str,
    color_field: Option<&str>,
) -> ChartResult<ChartSpec> {
    let x = resolve(table, x_field)?;
    let y = resolve(table, y_field)?;
    if !y.is_numeric() {
        return Err(ChartError::NonNumericField {
            field: y_field.to_string(),
        });
    }
    let color = color_field.map(|name| resolve(table, name)).transpose()?;
    let hover_polymers = table.has_field(Field::PolymerTypes);

    let mut legend: Vec<LegendEntry> = Vec::new();
    let mut bars = Vec::with_capacity(table.len());
    let mut y_max: Option<f64> = None;

    for row in table.rows() {
        let x_label = cell(row.get(x), x)?.to_label().unwrap_or_default();
        let height = cell(row.get(y), y)?.as_number();
        if let Some(h) = height {
            y_max = Some(y_max.map_or(h, |m| m.max(h)));
        }

        let category = match color {
            Some(field) => cell(row.get(field), field)?.to_label(),
            None => None,
        };
        let fill = match legend.iter().position(|e| e.category == category) {
            Some(index) => palette_color(index),
            None => {
                let fill = palette_color(legend.len());
                legend.push(LegendEntry {
                    category: category.clone(),
                    color: fill.to_string(),
                });
                fill
            }
        };

        let mut hover = vec![
            HoverEntry {
                label: x.column_name().to_string(),
                value: x_label.clone(),
            },
            HoverEntry {
                label: y.column_name().to_string(),
                value: height.map(|h| h.to_string()).unwrap_or_default(),
            },
        ];
        if hover_polymers {
            let polymers = cell(row.get(Field::PolymerTypes), Field::PolymerTypes)?;
            hover.push(HoverEntry {
                label: Field::PolymerTypes.column_name().to_string(),
                value: polymers.to_label().unwrap_or_default(),
            });
        }
        if let Some(field) = color {
            hover.push(HoverEntry {
                label: field.column_name().to_string(),
                value: category.clone().unwrap_or_default(),
            });
        }

        bars.push(BarSpec {
            x: x_label,
            y: height,
            category,
            color: fill.to_string(),
            hover,
        });
    }

    if color.is_none() {
        legend.clear();
    }

    Ok(ChartSpec {
        title: None,
        x_field: x.column_name().to_string(),
        y_field: y.column_name().to_string(),
        color_field: color.map(|f| f.column_name().to_string()),
        bars,
        legend,
        x_axis: XAxisSpec {
            title: x.column_name().to_string(),
            show_tick_labels: false,
            tick_angle_deg: X_TICK_ANGLE_DEG,
        },
        y_axis: YAxisSpec {
            title: y.column_name().to_string(),
            range: y_max.map(|m| [0.0, m * Y_RANGE_FACTOR]),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ad_pipeline::{AggregateRow, CompartmentScope};

    fn row(abbrev: &str, conc: Option<f64>, n: Option<f64>) -> AggregateRow {
        AggregateRow {
            additive_abbrev: abbrev.to_string(),
            median_concentration: conc,
            polymer_types: "PP, PE".to_string(),
            polymers_number: n,
        }
    }

    fn table(rows: Vec<AggregateRow>) -> AggregateTable {
        AggregateTable::from_rows(CompartmentScope::Plastic, rows)
    }

    #[test]
    fn y_range_is_a_tenth_of_the_max() {
        let t = table(vec![
            row("A", Some(100.0), Some(1.0)),
            row("B", Some(3.0), Some(2.0)),
        ]);
        let spec = build_chart_spec(&t, "Additive Abbrev", "Concentration(ug/g)", None).unwrap();
        assert_eq!(spec.y_axis.range, Some([0.0, 10.0]));
        assert!(!spec.x_axis.show_tick_labels);
        assert_eq!(spec.bars.len(), 2);
    }

    #[test]
    fn categories_cycle_through_palette() {
        let rows = (0..12)
            .map(|i| row(&format!("A{i:02}"), Some(1.0), Some(i as f64)))
            .collect();
        let spec = build_chart_spec(
            &table(rows),
            "Additive Abbrev",
            "Concentration(ug/g)",
            Some("Polymers Number"),
        )
        .unwrap();
        assert_eq!(spec.legend.len(), 12);
        assert_eq!(spec.bars[0].color, spec.bars[10].color);
        assert_eq!(spec.bars[1].color, spec.bars[11].color);
        assert_ne!(spec.bars[0].color, spec.bars[1].color);
        assert_eq!(spec.bars[3].category.as_deref(), Some("3"));
    }

    #[test]
    fn shared_category_shares_color() {
        let t = table(vec![
            row("A", Some(1.0), Some(2.0)),
            row("B", Some(1.0), Some(1.0)),
            row("C", Some(1.0), Some(2.0)),
        ]);
        let spec = build_chart_spec(
            &t,
            "Additive Abbrev",
            "Concentration(ug/g)",
            Some("Polymers Number"),
        )
        .unwrap();
        assert_eq!(spec.legend.len(), 2);
        assert_eq!(spec.bars[0].color, spec.bars[2].color);
        assert_eq!(spec.legend[0].category.as_deref(), Some("2"));
    }

    #[test]
    fn hover_lists_x_y_polymers_and_color() {
        let t = table(vec![row("A", Some(2.5), Some(2.0))]);
        let spec = build_chart_spec(
            &t,
            "Additive Abbrev",
            "Concentration(ug/g)",
            Some("Polymers Number"),
        )
        .unwrap();
        let labels: Vec<_> = spec.bars[0].hover.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Additive Abbrev",
                "Concentration(ug/g)",
                "Polymer Types",
                "Polymers Number"
            ]
        );
        assert_eq!(spec.bars[0].hover[1].value, "2.5");
    }

    #[test]
    fn hover_without_color_field_stops_at_polymers() {
        let t = table(vec![row("A", Some(2.5), Some(2.0))]);
        let spec = build_chart_spec(&t, "Additive Abbrev", "Concentration(ug/g)", None).unwrap();
        let labels: Vec<_> = spec.bars[0].hover.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Additive Abbrev", "Concentration(ug/g)", "Polymer Types"]
        );
        assert_eq!(spec.bars[0].hover[2].value, "PP, PE");
        assert_eq!(spec.bars[0].category, None);
        assert_eq!(spec.bars[0].color, crate::palette::PASTEL_PALETTE[0]);
    }

    #[test]
    fn null_heights_are_kept_but_ignored_for_range() {
        let t = table(vec![row("A", None, None), row("B", Some(50.0), None)]);
        let spec = build_chart_spec(&t, "Additive Abbrev", "Concentration(ug/g)", None).unwrap();
        assert_eq!(spec.bars[0].y, None);
        assert_eq!(spec.y_axis.range, Some([0.0, 5.0]));
        assert!(spec.legend.is_empty());
    }

    #[test]
    fn empty_table_has_no_range() {
        let spec =
            build_chart_spec(&table(vec![]), "Additive Abbrev", "Concentration(ug/g)", None)
                .unwrap();
        assert!(spec.is_empty());
        assert_eq!(spec.y_axis.range, None);
    }

    #[test]
    fn field_errors() {
        let t = table(vec![row("A", Some(1.0), None)]);
        assert_eq!(
            build_chart_spec(&t, "Additive Abbrev", "Polymer Types", None),
            Err(ChartError::NonNumericField {
                field: "Polymer Types".to_string()
            })
        );
        assert_eq!(
            build_chart_spec(&t, "Reference", "Concentration(ug/g)", None),
            Err(ChartError::MissingField {
                field: "Reference".to_string()
            })
        );
        assert!(matches!(
            build_chart_spec(&t, "Additive Abbrev", "Concentration(ug/g)", Some("Hue")),
            Err(ChartError::MissingField { .. })
        ));
    }
}
