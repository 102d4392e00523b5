//! UI layout using egui.

use egui::{vec2, Context, Frame, Sense};
use stellate_core::RatingControl;
use stellate_widgets::{caption, hint, panel_frame, sizing, RatingBar};

/// Title text for a rating, e.g. "User Rating: 3 stars".
pub fn rating_title(value: u8) -> String {
    let unit = if value > 1 { "stars" } else { "star" };
    format!("User Rating: {} {}", value, unit)
}

/// Lay out the rating card. Returns true if the rating changed this frame.
pub fn render_ui(ctx: &Context, control: &mut RatingControl) -> bool {
    let mut changed = false;

    egui::CentralPanel::default()
        .frame(Frame::new())
        .show(ctx, |ui| {
            ui.add_space((ui.available_height() / 3.0).max(0.0));
            ui.vertical_centered(|ui| {
                panel_frame().show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        let caption_size =
                            vec2(control.intrinsic_size().width as f32, sizing::CAPTION_HEIGHT);
                        let (caption_rect, _) = ui.allocate_exact_size(caption_size, Sense::hover());
                        ui.add_space(8.0);
                        changed = RatingBar::new(&mut *control).show(ui).changed();
                        // Painted after the bar so it reflects this frame's input
                        caption(ui, caption_rect, &rating_title(control.value()));
                        ui.add_space(4.0);
                        hint(ui, "Press or drag across the stars");
                    });
                });
            });
        });

    changed
}
