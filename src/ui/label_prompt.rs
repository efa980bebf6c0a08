// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Label name entry.
//!
//! A small modal window with a single-line text field. Enter submits the
//! line; the session decides whether the name is usable.

use crate::models::label::{MarkerColor, MAX_LABELS};
use crate::ui::status::swatch;

/// Show the prompt and return the submitted line, if any.
pub fn show(
    ctx: &egui::Context,
    input: &mut String,
    error: Option<&str>,
    slot: usize,
    color: MarkerColor,
) -> Option<String> {
    let mut submitted = None;

    egui::Window::new("Label name?")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                swatch(ui, color);
                ui.label(format!("Label {} of {} ({})", slot + 1, MAX_LABELS, color.name));
            });

            let response = ui.add(
                egui::TextEdit::singleline(input)
                    .hint_text("e.g. fruit_fly")
                    .desired_width(240.0),
            );
            response.request_focus();

            let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            if let Some(message) = error {
                ui.label(egui::RichText::new(message).color(egui::Color32::LIGHT_RED));
            }

            ui.horizontal(|ui| {
                if ui.button("Start").clicked() || entered {
                    submitted = Some(std::mem::take(input));
                }
                ui.label(egui::RichText::new("Esc finishes the session").weak());
            });
        });

    submitted
}
