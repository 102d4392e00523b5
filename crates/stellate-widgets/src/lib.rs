//! egui widgets for the Stellate rating control.
//!
//! - **Rating**: [`RatingBar`], which paints a `RatingControl` and feeds it
//!   pointer input
//! - **Frame**: panel frame and caption helpers for hosting the bar

pub mod frame;
pub mod rating;

pub use frame::{caption, hint, panel_frame};
pub use rating::{
    pointer_event, star_points, RatingBar, STAR_INNER_RATIO, STAR_POINTS, STAR_RADIUS,
};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
    /// Caption font size
    pub const CAPTION_SIZE: f32 = 17.0;
    /// Caption row height
    pub const CAPTION_HEIGHT: f32 = 24.0;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
}
