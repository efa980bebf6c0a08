// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Label list side panel.

use crate::models::label::LabelRegistry;
use crate::ui::status::swatch;
use std::path::Path;

/// Display the labels bound so far with their colors and patch counts.
pub fn show(ui: &mut egui::Ui, registry: &LabelRegistry, half_size: u32, dataset_root: &Path) {
    ui.heading("Labels");
    ui.separator();

    if registry.slots().is_empty() {
        ui.label(egui::RichText::new("No labels yet").weak());
    }

    egui::Grid::new("label_slots")
        .num_columns(3)
        .striped(true)
        .show(ui, |ui| {
            for (idx, slot) in registry.slots().iter().enumerate() {
                swatch(ui, slot.color);
                let name = egui::RichText::new(slot.label.as_str());
                if idx == registry.cursor() {
                    ui.label(name.strong());
                } else {
                    ui.label(name);
                }
                ui.label(format!("{}", slot.patches));
                ui.end_row();
            }
        });

    ui.separator();
    ui.label(format!("Patch size: {0}x{0}", 2 * half_size));
    ui.label(egui::RichText::new(format!("Saving to {}", dataset_root.display())).small().weak());
}
