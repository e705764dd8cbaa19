use std::sync::Arc;

use eframe::egui::{self, Align2, Color32, FontFamily, FontId, Galley, Pos2, Rect, Stroke, Vec2};

use crate::theme::Theme;

/// Lay out wrapped text in one font.
pub fn layout(
    ui: &egui::Ui,
    text: &str,
    font_size: f32,
    color: Color32,
    max_width: f32,
) -> Arc<Galley> {
    let mut job = egui::text::LayoutJob::default();
    job.wrap.max_width = max_width;
    job.append(
        text,
        0.0,
        egui::text::TextFormat {
            font_id: FontId::new(font_size, FontFamily::Proportional),
            color,
            ..Default::default()
        },
    );
    ui.painter().layout_job(job)
}

/// Paint wrapped text at `pos`. Returns the height used.
pub fn draw_text(
    ui: &egui::Ui,
    text: &str,
    pos: Pos2,
    font_size: f32,
    color: Color32,
    max_width: f32,
) -> f32 {
    let galley = layout(ui, text, font_size, color, max_width);
    let height = galley.rect.height();
    ui.painter().galley(pos, galley, color);
    height
}

/// Paint a single line anchored at `pos`. Returns its rect.
pub fn draw_line(
    ui: &egui::Ui,
    text: &str,
    pos: Pos2,
    anchor: Align2,
    font: FontId,
    color: Color32,
) -> Rect {
    ui.painter().text(pos, anchor, text, font, color)
}

/// A rounded pill with centred text. Returns the pill's rect.
#[allow(clippy::too_many_arguments)]
pub fn draw_pill(
    ui: &egui::Ui,
    text: &str,
    min: Pos2,
    font_size: f32,
    fill: Color32,
    stroke: Color32,
    color: Color32,
    scale: f32,
) -> Rect {
    let galley = ui.painter().layout_no_wrap(
        text.to_string(),
        FontId::proportional(font_size),
        color,
    );
    let pad = Vec2::new(18.0, 9.0) * scale;
    let rect = Rect::from_min_size(min, galley.rect.size() + pad * 2.0);
    ui.painter().rect(
        rect,
        rect.height() / 2.0,
        fill,
        Stroke::new(1.0 * scale, stroke),
        egui::StrokeKind::Inside,
    );
    ui.painter().galley(min + pad, galley, color);
    rect
}

/// Width a pill would take, for wrapping rows of pills.
pub fn pill_width(ui: &egui::Ui, text: &str, font_size: f32, scale: f32) -> f32 {
    let galley = ui.painter().layout_no_wrap(
        text.to_string(),
        FontId::proportional(font_size),
        Color32::WHITE,
    );
    galley.rect.width() + 36.0 * scale
}

/// Card background used by tiles and panels.
pub fn draw_card(ui: &egui::Ui, rect: Rect, theme: &Theme, opacity: f32, scale: f32) {
    ui.painter().rect(
        rect,
        14.0 * scale,
        Theme::with_opacity(theme.panel, opacity),
        Stroke::new(1.0 * scale, Theme::with_opacity(theme.panel_border, opacity)),
        egui::StrokeKind::Inside,
    );
}
