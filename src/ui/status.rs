// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Status bar.
//!
//! Shows the active label and its marker color, how many palette slots are
//! used, the outcome of the last click and the key bindings.

use crate::models::label::{LabelRegistry, MarkerColor, MAX_LABELS};
use crate::models::session::SessionState;

/// Paint a small filled square in the given marker color.
pub fn swatch(ui: &mut egui::Ui, color: MarkerColor) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
    ui.painter().rect_filled(rect, 2.0, color.color32());
    ui.painter()
        .rect_stroke(rect, 2.0, egui::Stroke::new(1.0, egui::Color32::BLACK));
}

/// Display the status bar.
pub fn show(
    ui: &mut egui::Ui,
    state: SessionState,
    registry: &LabelRegistry,
    message: Option<&str>,
) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        match registry.current_label() {
            Some(label) if state == SessionState::Annotating => {
                swatch(ui, registry.current_color());
                ui.strong(label.as_str());
            }
            _ => {
                ui.label("No active label");
            }
        }

        ui.separator();
        ui.label(format!("Labels: {}/{}", registry.slots().len(), MAX_LABELS));
        ui.label(format!("Patches: {}", registry.total_patches()));

        if let Some(message) = message {
            ui.separator();
            ui.label(message);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let hint = match state {
                SessionState::AwaitingLabel => "Enter: start label   Esc: finish",
                SessionState::Annotating => "Click: save patch   Space: next label   Esc: finish",
                SessionState::Terminated => "Session finished",
            };
            ui.label(egui::RichText::new(hint).italics().weak());
        });
    });
}
