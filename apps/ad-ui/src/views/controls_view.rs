use ad_core::{CompartmentChoice, PolymerType};
use ad_pipeline::PolymerMatching;
use std::collections::BTreeSet;

/// Snapshot of the dashboard inputs, read before drawing the panel.
#[derive(Debug, Clone)]
pub struct ControlState {
    pub polymers: BTreeSet<PolymerType>,
    pub compartment: CompartmentChoice,
    pub matching: PolymerMatching,
}

/// Edits requested by the user this frame. Applied by the app after drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    TogglePolymer(PolymerType),
    SelectAllPolymers,
    ClearPolymers,
    SetCompartment(CompartmentChoice),
    SetMatching(PolymerMatching),
}

#[derive(Default)]
pub struct ControlsView;

impl ControlsView {
    pub fn show(&mut self, ui: &mut egui::Ui, state: &ControlState) -> Vec<ControlAction> {
        let mut actions = Vec::new();

        ui.heading("Filter controls");
        ui.separator();

        ui.label("Polymer types");
        ui.horizontal(|ui| {
            if ui.small_button("All").clicked() {
                actions.push(ControlAction::SelectAllPolymers);
            }
            if ui.small_button("None").clicked() {
                actions.push(ControlAction::ClearPolymers);
            }
        });
        for polymer in PolymerType::ALL {
            let mut checked = state.polymers.contains(&polymer);
            if ui.checkbox(&mut checked, polymer.abbrev()).changed() {
                actions.push(ControlAction::TogglePolymer(polymer));
            }
        }
        if state.polymers.is_empty() {
            ui.weak("No polymer selected: every row matches");
        }

        let mut whole_tokens = state.matching == PolymerMatching::Token;
        if ui
            .checkbox(&mut whole_tokens, "Match whole abbreviations")
            .on_hover_text("Off: \"PE\" also matches \"PET\"")
            .changed()
        {
            actions.push(ControlAction::SetMatching(if whole_tokens {
                PolymerMatching::Token
            } else {
                PolymerMatching::Substring
            }));
        }

        ui.separator();
        ui.label("Compartment");
        let mut choice = state.compartment;
        for option in CompartmentChoice::ALL {
            ui.radio_value(&mut choice, option, option.as_str());
        }
        if choice != state.compartment {
            actions.push(ControlAction::SetCompartment(choice));
        }

        actions
    }
}
