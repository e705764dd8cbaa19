pub mod chrome;
pub mod image_cache;
pub mod slide;
pub mod text;
pub mod widgets;

use std::time::Instant;

use eframe::egui;

use crate::deck::Slide;
use crate::navigation::transition::SlidePose;
use crate::stage::SlideRuntime;
use crate::theme::Theme;

use image_cache::ImageCache;

/// Reference canvas the layout is designed for.
pub const REFERENCE_SIZE: egui::Vec2 = egui::vec2(1920.0, 1080.0);

pub fn compute_scale(rect: egui::Rect) -> f32 {
    (rect.width() / REFERENCE_SIZE.x).min(rect.height() / REFERENCE_SIZE.y)
}

/// Per-frame painting parameters shared by every slide part.
#[derive(Clone, Copy)]
pub struct Paint<'a> {
    pub theme: &'a Theme,
    pub scale: f32,
    pub now: Instant,
    /// Only the settled current slide takes input.
    pub interactive: bool,
}

impl Paint<'_> {
    pub fn px(&self, v: f32) -> f32 {
        v * self.scale
    }
}

/// Paint slide `index` in `rect` with a transition pose applied.
#[allow(clippy::too_many_arguments)]
pub fn render_slide(
    ui: &mut egui::Ui,
    index: usize,
    slide: &Slide,
    runtime: &mut SlideRuntime,
    paint: &Paint,
    rect: egui::Rect,
    pose: SlidePose,
    images: &mut ImageCache,
) {
    if pose.opacity <= 0.0 {
        return;
    }
    let shift = rect.width() * pose.offset_percent / 100.0;
    let posed = egui::Rect::from_center_size(
        rect.center() + egui::vec2(shift, 0.0),
        rect.size() * pose.scale,
    );

    let mut child = ui.new_child(
        egui::UiBuilder::new()
            .max_rect(posed)
            .id_salt(("slide", index)),
    );
    child.set_clip_rect(rect);
    child.multiply_opacity(pose.opacity);
    if !paint.interactive {
        child.disable();
    }
    let paint = Paint {
        scale: paint.scale * pose.scale,
        ..*paint
    };
    slide::render(&mut child, slide, runtime, &paint, posed, images);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_scale() {
        let full = egui::Rect::from_min_size(egui::Pos2::ZERO, REFERENCE_SIZE);
        assert_eq!(compute_scale(full), 1.0);
        let half = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(960.0, 1080.0));
        assert_eq!(compute_scale(half), 0.5);
    }
}
