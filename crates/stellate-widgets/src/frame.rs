//! Panel frame and caption helpers.

use egui::{Align2, Color32, CornerRadius, FontId, Frame, Margin, Rect, Stroke, Ui};

use crate::{sizing, theme};

/// Create the card frame the rating bar sits in.
pub fn panel_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 8,
            offset: [0, 2],
            color: Color32::from_black_alpha(15),
        })
        .inner_margin(Margin::same(12))
}

/// Paint a caption line (the host's rating title) centered in `rect`.
///
/// The caller reserves `rect` up front, so the text can be painted after the
/// widgets below it have handled this frame's input.
pub fn caption(ui: &Ui, rect: Rect, text: &str) {
    ui.painter().text(
        rect.center(),
        Align2::CENTER_CENTER,
        text,
        FontId::proportional(sizing::CAPTION_SIZE),
        theme::TEXT,
    );
}

/// Draw a small muted hint line.
pub fn hint(ui: &mut Ui, text: &str) {
    ui.label(
        egui::RichText::new(text)
            .size(10.0)
            .color(theme::TEXT_MUTED),
    );
}
