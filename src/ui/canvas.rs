// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image canvas.
//!
//! Shows the annotated buffer scaled to fit the central panel and reports
//! clicks in pixel coordinates of that buffer.

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    Click { x: u32, y: u32 },
}

/// Display the annotated image and handle clicks on it.
pub fn show(
    ui: &mut egui::Ui,
    texture: &Option<egui::TextureHandle>,
    image_size: (u32, u32),
    accept_clicks: bool,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let Some(texture) = texture else {
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("Loading image...").color(egui::Color32::WHITE));
            });
            return;
        };

        let image_rect = fit_rect(ui.min_rect().min, ui.available_size(), image_size);

        ui.painter().image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        let response = ui.allocate_rect(image_rect, egui::Sense::click());
        if accept_clicks && response.clicked_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                if let Some((x, y)) = screen_to_pixel(pos, image_rect, image_size) {
                    action = CanvasAction::Click { x, y };
                }
            }
        }
        if accept_clicks && response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
        }
    });

    action
}

/// Largest rectangle with the image's aspect ratio centered in `available`.
///
/// Images smaller than the panel are shown at their native size.
fn fit_rect(origin: egui::Pos2, available: egui::Vec2, image_size: (u32, u32)) -> egui::Rect {
    let (img_width, img_height) = (image_size.0 as f32, image_size.1 as f32);
    let scale = (available.x / img_width).min(available.y / img_height).min(1.0);
    let display = egui::vec2(img_width * scale, img_height * scale);

    let offset = (available - display) / 2.0;
    egui::Rect::from_min_size(origin + offset, display)
}

/// Convert a screen position inside `image_rect` into buffer pixel coordinates.
fn screen_to_pixel(
    pos: egui::Pos2,
    image_rect: egui::Rect,
    image_size: (u32, u32),
) -> Option<(u32, u32)> {
    if !image_rect.contains(pos) || image_rect.width() <= 0.0 || image_rect.height() <= 0.0 {
        return None;
    }
    let rel_x = (pos.x - image_rect.min.x) / image_rect.width();
    let rel_y = (pos.y - image_rect.min.y) / image_rect.height();

    let x = ((rel_x * image_size.0 as f32) as u32).min(image_size.0.saturating_sub(1));
    let y = ((rel_y * image_size.1 as f32) as u32).min(image_size.1.saturating_sub(1));
    Some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_rect_keeps_native_size_when_room() {
        let rect = fit_rect(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0), (400, 200));
        assert_eq!(rect.size(), egui::vec2(400.0, 200.0));
        assert_eq!(rect.min, egui::pos2(200.0, 200.0));
    }

    #[test]
    fn test_fit_rect_shrinks_wide_image() {
        let rect = fit_rect(egui::pos2(10.0, 10.0), egui::vec2(500.0, 500.0), (1000, 500));
        assert_eq!(rect.size(), egui::vec2(500.0, 250.0));
        assert_eq!(rect.min, egui::pos2(10.0, 135.0));
    }

    #[test]
    fn test_screen_to_pixel_native_scale() {
        let rect = egui::Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(1000.0, 1000.0));
        assert_eq!(screen_to_pixel(egui::pos2(600.0, 550.0), rect, (1000, 1000)), Some((500, 500)));
        assert_eq!(screen_to_pixel(egui::pos2(105.5, 55.5), rect, (1000, 1000)), Some((5, 5)));
    }

    #[test]
    fn test_screen_to_pixel_scaled_display() {
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(500.0, 250.0));
        assert_eq!(screen_to_pixel(egui::pos2(250.0, 125.0), rect, (1000, 500)), Some((500, 250)));
        assert_eq!(screen_to_pixel(egui::pos2(500.0, 250.0), rect, (1000, 500)), Some((999, 499)));
    }

    #[test]
    fn test_screen_to_pixel_outside() {
        let rect = egui::Rect::from_min_size(egui::pos2(10.0, 10.0), egui::vec2(100.0, 100.0));
        assert_eq!(screen_to_pixel(egui::pos2(5.0, 50.0), rect, (100, 100)), None);
    }
}
