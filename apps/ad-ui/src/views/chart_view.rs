use ad_chart::{BarSpec, ChartSpec, parse_hex};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotBounds};

const BAR_WIDTH: f64 = 0.7;

type BarGroup = (String, egui::Color32, Vec<Bar>);

/// Draws a [`ChartSpec`] as a categorical bar chart.
///
/// Bars are rebuilt only when the chart node's revision moves.
pub struct ChartView {
    id: &'static str,
    revision: Option<u64>,
    groups: Vec<BarGroup>,
}

impl ChartView {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            revision: None,
            groups: Vec::new(),
        }
    }

    /// Forget cached bars, e.g. after a new dataset starts a new session.
    pub fn reset(&mut self) {
        self.revision = None;
        self.groups.clear();
    }

    /// Returns whether the bars were rebuilt. `None` always rebuilds.
    fn prepare(&mut self, chart: &ChartSpec, revision: Option<u64>) -> bool {
        if revision.is_some() && self.revision == revision {
            return false;
        }
        self.groups = bars_by_category(chart);
        self.revision = revision;
        true
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        chart: &ChartSpec,
        revision: Option<u64>,
        height: f32,
    ) {
        if let Some(title) = &chart.title {
            ui.strong(title);
        }

        if chart.y_axis.range.is_none() {
            ui.label("No data for the current selection");
            return;
        }

        self.prepare(chart, revision);
        let bounds = fixed_bounds(chart);
        let groups = &self.groups;

        Plot::new(self.id)
            .height(height)
            .legend(Legend::default())
            .y_axis_label(chart.y_axis.title.clone())
            .x_axis_label(chart.x_axis.title.clone())
            .show_axes([chart.x_axis.show_tick_labels, true])
            .include_y(0.0)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                if let Some((min, max)) = bounds {
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max(min, max));
                }
                for (name, color, bars) in groups {
                    plot_ui.bar_chart(
                        BarChart::new(bars.clone())
                            .name(name)
                            .color(*color)
                            .element_formatter(Box::new(|bar: &Bar, _: &BarChart| {
                                bar.name.clone()
                            })),
                    );
                }
            });
    }
}

/// Fixed plot window for the chart's clipped y range. `None` leaves the plot
/// on automatic bounds, which covers a zero-height range.
fn fixed_bounds(chart: &ChartSpec) -> Option<([f64; 2], [f64; 2])> {
    let [y_min, y_max] = chart.y_axis.range?;
    if y_max.is_nan() || y_max <= y_min || chart.bars.is_empty() {
        return None;
    }
    let x_max = chart.bars.len() as f64 - 1.0 + BAR_WIDTH;
    Some(([-BAR_WIDTH, y_min], [x_max, y_max]))
}

/// One `BarChart` per legend category so the legend lists categories.
fn bars_by_category(chart: &ChartSpec) -> Vec<BarGroup> {
    let mut groups: Vec<BarGroup> = Vec::new();

    for (index, spec) in chart.bars.iter().enumerate() {
        let Some(height) = spec.y else {
            continue;
        };
        let color = to_color32(&spec.color);
        let name = spec.category.clone().unwrap_or_default();
        let bar = Bar::new(index as f64, height)
            .width(BAR_WIDTH)
            .fill(color)
            .name(hover_text(spec));

        match groups.iter_mut().find(|(n, _, _)| *n == name) {
            Some((_, _, bars)) => bars.push(bar),
            None => groups.push((name, color, vec![bar])),
        }
    }

    groups
}

fn hover_text(spec: &BarSpec) -> String {
    spec.hover
        .iter()
        .map(|entry| format!("{}: {}", entry.label, entry.value))
        .collect::<Vec<_>>()
        .join("\n")
}

fn to_color32(hex: &str) -> egui::Color32 {
    match parse_hex(hex) {
        Some([r, g, b]) => egui::Color32::from_rgb(r, g, b),
        None => egui::Color32::GRAY,
    }
}
