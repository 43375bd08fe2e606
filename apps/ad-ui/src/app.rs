use crate::views::{ChartView, ControlAction, ControlState, ControlsView};
use ad_app::{
    AppResult, Dashboard, DashboardConfig, DashboardView, load_config, load_dataset, node,
};
use egui_file_dialog::{DialogMode, FileDialog};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct DashboardApp {
    config: DashboardConfig,
    dashboard: Option<Dashboard>,
    dataset_path: Option<PathBuf>,
    file_dialog: FileDialog,
    last_directory: Option<PathBuf>,
    controls_view: ControlsView,
    /// Last rendered outputs; rebuilt when the graph reports a change.
    view: Option<DashboardView>,
    plastic_chart_view: ChartView,
    compartment_chart_view: ChartView,
    last_error: Option<String>,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config_path: Option<PathBuf>) -> Self {
        let mut app = Self {
            config: DashboardConfig::default(),
            dashboard: None,
            dataset_path: None,
            file_dialog: FileDialog::new(),
            last_directory: None,
            controls_view: ControlsView,
            view: None,
            plastic_chart_view: ChartView::new("plastic_chart"),
            compartment_chart_view: ChartView::new("compartment_chart"),
            last_error: None,
        };

        if let Some(path) = config_path {
            app.apply_config(&path);
        }
        app
    }

    fn apply_config(&mut self, path: &Path) {
        match load_config(path) {
            Ok(config) => {
                info!(path = %path.display(), "loaded dashboard config");
                let dataset = config.dataset_path(path.parent());
                self.config = config;
                if let Some(dataset) = dataset {
                    self.open_dataset(dataset);
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config");
                self.last_error = Some(format!("Failed to load config: {}", e));
            }
        }
    }

    fn open_dataset(&mut self, path: PathBuf) {
        let result = load_dataset(&path)
            .and_then(|dataset| Dashboard::new(dataset.table, &self.config));
        match result {
            Ok(dashboard) => {
                self.dashboard = Some(dashboard);
                self.view = None;
                self.plastic_chart_view.reset();
                self.compartment_chart_view.reset();
                self.last_directory = path.parent().map(Path::to_path_buf);
                self.dataset_path = Some(path);
                self.last_error = None;
            }
            Err(e) => {
                self.last_error = Some(format!("Failed to open dataset: {}", e));
            }
        }
    }

    fn control_state(dashboard: &Dashboard) -> AppResult<ControlState> {
        Ok(ControlState {
            polymers: dashboard.polymers()?,
            compartment: dashboard.compartment()?,
            matching: dashboard.matching()?,
        })
    }

    fn apply_action(dashboard: &mut Dashboard, action: ControlAction) -> AppResult<bool> {
        match action {
            ControlAction::TogglePolymer(polymer) => dashboard.toggle_polymer(polymer),
            ControlAction::SelectAllPolymers => dashboard.select_all_polymers(),
            ControlAction::ClearPolymers => dashboard.clear_polymers(),
            ControlAction::SetCompartment(choice) => dashboard.set_compartment(choice),
            ControlAction::SetMatching(matching) => dashboard.set_matching(matching),
        }
    }

    fn show_metrics(ui: &mut egui::Ui, view: &DashboardView) {
        ui.horizontal(|ui| {
            for (label, value) in [
                ("Number of additives", view.metrics.additive_count),
                ("Number of references", view.metrics.reference_count),
            ] {
                ui.group(|ui| {
                    ui.set_min_width(200.0);
                    ui.vertical(|ui| {
                        ui.label(label);
                        ui.heading(value.to_string());
                    });
                });
            }
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.config.title.as_str());
                ui.separator();
                if ui.button("Open dataset").clicked() {
                    let initial_dir = self.last_directory.as_ref().and_then(|p| p.to_str());
                    let _ = self
                        .file_dialog
                        .open(DialogMode::SelectFile, true, initial_dir);
                }
                if let Some(path) = &self.dataset_path {
                    ui.label(path.display().to_string());
                }
            });
        });

        self.file_dialog.update(ctx);
        if let Some(path) = self.file_dialog.take_selected() {
            self.open_dataset(path.to_path_buf());
        }

        egui::SidePanel::left("filter_controls")
            .default_width(220.0)
            .show(ctx, |ui| {
                let Some(dashboard) = self.dashboard.as_mut() else {
                    ui.heading("Filter controls");
                    ui.label("Open a dataset to begin");
                    return;
                };
                let state = match Self::control_state(dashboard) {
                    Ok(state) => state,
                    Err(e) => {
                        self.last_error = Some(e.to_string());
                        return;
                    }
                };
                for action in self.controls_view.show(ui, &state) {
                    match Self::apply_action(dashboard, action) {
                        Ok(true) => self.view = None,
                        Ok(false) => {}
                        Err(e) => self.last_error = Some(e.to_string()),
                    }
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(error) = &self.last_error {
                ui.colored_label(egui::Color32::RED, error);
                ui.separator();
            }

            let Some(dashboard) = self.dashboard.as_mut() else {
                ui.label("No dataset loaded");
                return;
            };

            let changed = match dashboard.refresh() {
                Ok(changed) => changed,
                Err(e) => {
                    ui.colored_label(egui::Color32::RED, format!("Error: {}", e));
                    return;
                }
            };
            if self.view.is_none() || !changed.is_empty() {
                match dashboard.view() {
                    Ok(view) => self.view = Some(view),
                    Err(e) => {
                        ui.colored_label(egui::Color32::RED, format!("Error: {}", e));
                        return;
                    }
                }
            }
            let Some(view) = self.view.as_ref() else {
                return;
            };
            let plastic_revision = dashboard.revision(node::PLASTIC_CHART).ok();
            let compartment_revision = dashboard.revision(node::COMPARTMENT_CHART).ok();

            Self::show_metrics(ui, view);
            ui.separator();

            let chart_height = ((ui.available_height() - 80.0) / 2.0).max(160.0);
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.group(|ui| {
                    self.plastic_chart_view.show(
                        ui,
                        &view.plastic_chart,
                        plastic_revision,
                        chart_height,
                    );
                });
                ui.group(|ui| {
                    self.compartment_chart_view.show(
                        ui,
                        &view.compartment_chart,
                        compartment_revision,
                        chart_height,
                    );
                });
            });
        });
    }
}
