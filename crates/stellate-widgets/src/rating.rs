//! egui presentation of a [`RatingControl`].
//!
//! The widget allocates the control's intrinsic size, forwards this frame's
//! raw pointer events to the control in local coordinates, and paints each
//! star with its emphasis color and flare transform.

use egui::{
    vec2, Color32, CursorIcon, Event, Mesh, PointerButton, Pos2, Rect, Response, Sense, Shape,
    TouchPhase, Ui,
};
use kurbo::{Affine, Point};
use peniko::Color;
use stellate_core::input::{MouseButton, PointerEvent};
use stellate_core::RatingControl;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Number of points on the drawn star (the six-pointed ✶).
pub const STAR_POINTS: usize = 6;
/// Outer radius of the drawn star.
pub const STAR_RADIUS: f64 = 14.0;
/// Inner/outer radius ratio of the drawn star.
pub const STAR_INNER_RATIO: f64 = 0.5;

/// Star rating bar bound to a [`RatingControl`].
pub struct RatingBar<'a> {
    control: &'a mut RatingControl,
}

impl<'a> RatingBar<'a> {
    /// Create a rating bar for `control`.
    pub fn new(control: &'a mut RatingControl) -> Self {
        Self { control }
    }

    /// Show the bar. The response is marked changed when the rating changed.
    pub fn show(self, ui: &mut Ui) -> Response {
        let size = self.control.intrinsic_size();
        let (rect, mut response) = ui.allocate_exact_size(
            vec2(size.width as f32, size.height as f32),
            Sense::click_and_drag(),
        );

        let before = self.control.value();
        let events = ui.input(|i| i.events.clone());
        for event in events.iter().filter_map(|event| pointer_event(event, rect)) {
            self.control.handle_pointer_event(&event);
        }
        if self.control.value() != before {
            response.mark_changed();
        }

        let now = Instant::now();
        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            for element in self.control.elements() {
                let outline = star_points(
                    element.bounds().center(),
                    STAR_RADIUS,
                    STAR_RADIUS * STAR_INNER_RATIO,
                    STAR_POINTS,
                );
                let mesh = star_mesh(
                    element.bounds().center(),
                    &outline,
                    element.transform_at(now),
                    rect.min,
                    to_color32(element.color()),
                );
                painter.add(Shape::mesh(mesh));
            }
        }

        if self.control.is_animating(now) {
            ui.ctx().request_repaint();
        }

        response.on_hover_cursor(CursorIcon::PointingHand)
    }
}

/// Translate an egui input event into a control-local pointer event.
pub fn pointer_event(event: &Event, rect: Rect) -> Option<PointerEvent> {
    match event {
        Event::PointerButton {
            pos,
            button,
            pressed,
            ..
        } => {
            let button = match button {
                PointerButton::Primary => MouseButton::Left,
                PointerButton::Secondary => MouseButton::Right,
                PointerButton::Middle => MouseButton::Middle,
                _ => return None,
            };
            let position = to_local(*pos, rect);
            Some(if *pressed {
                PointerEvent::Down { position, button }
            } else {
                PointerEvent::Up { position, button }
            })
        }
        Event::PointerMoved(pos) => Some(PointerEvent::Move {
            position: to_local(*pos, rect),
        }),
        Event::PointerGone => Some(PointerEvent::Gone),
        Event::Touch {
            phase: TouchPhase::Cancel,
            ..
        } => Some(PointerEvent::Cancel),
        Event::WindowFocused(false) => Some(PointerEvent::Cancel),
        _ => None,
    }
}

/// Outline of a star centered on `center`, first point straight up.
pub fn star_points(center: Point, outer: f64, inner: f64, points: usize) -> Vec<Point> {
    let vertices = points * 2;
    (0..vertices)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let angle = -std::f64::consts::FRAC_PI_2
                + std::f64::consts::TAU * i as f64 / vertices as f64;
            Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

/// Triangle fan from the star's center. The star is star-shaped about its
/// center, so the fan covers it exactly.
fn star_mesh(
    center: Point,
    outline: &[Point],
    transform: Affine,
    origin: Pos2,
    color: Color32,
) -> Mesh {
    let mut mesh = Mesh::default();
    mesh.colored_vertex(to_screen(transform * center, origin), color);
    for point in outline {
        mesh.colored_vertex(to_screen(transform * *point, origin), color);
    }
    let n = outline.len() as u32;
    for i in 0..n {
        mesh.add_triangle(0, 1 + i, 1 + (i + 1) % n);
    }
    mesh
}

fn to_local(pos: Pos2, rect: Rect) -> Point {
    Point::new(f64::from(pos.x - rect.min.x), f64::from(pos.y - rect.min.y))
}

fn to_screen(point: Point, origin: Pos2) -> Pos2 {
    Pos2::new(origin.x + point.x as f32, origin.y + point.y as f32)
}

fn to_color32(color: Color) -> Color32 {
    let rgba = color.to_rgba8();
    Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, rgba.a)
}
