//! Presenter chrome drawn over the slides.

use eframe::egui::{self, Align2, FontId, Rect, pos2, vec2};

use crate::navigation::input::ClickTarget;
use crate::navigation::transition::Direction;
use crate::theme::Theme;

use super::text;

/// What the chrome shows for the current slide.
pub struct ChromeState<'a> {
    pub progress_percent: f32,
    pub counter: String,
    pub live_region: &'a str,
    pub footer: Option<&'a str>,
    pub at_first: bool,
    pub at_last: bool,
}

/// Progress bar, footer, counter, live region and the previous/next
/// buttons. Returns the button clicked this frame, if any.
pub fn draw(
    ui: &mut egui::Ui,
    theme: &Theme,
    rect: Rect,
    scale: f32,
    state: &ChromeState,
) -> Option<ClickTarget> {
    // Progress bar
    let bar_h = 4.0 * scale;
    let track = Rect::from_min_size(rect.min, vec2(rect.width(), bar_h));
    ui.painter()
        .rect_filled(track, 0.0, Theme::with_opacity(theme.foreground, 0.08));
    let fill = rect.width() * (state.progress_percent / 100.0).clamp(0.0, 1.0);
    ui.painter().rect_filled(
        Rect::from_min_size(rect.min, vec2(fill, bar_h)),
        0.0,
        theme.accent,
    );

    // Footer
    if let Some(footer) = state.footer {
        let footer_color = Theme::with_opacity(theme.foreground, 0.4);
        let galley = ui.painter().layout_no_wrap(
            footer.to_string(),
            FontId::proportional(14.0 * scale),
            footer_color,
        );
        let pos = pos2(
            rect.center().x - galley.rect.width() / 2.0,
            rect.bottom() - 30.0 * scale,
        );
        ui.painter().galley(pos, galley, footer_color);
    }

    // Live region, mirrored in the window title by the app.
    text::draw_line(
        ui,
        state.live_region,
        pos2(rect.left() + 16.0 * scale, rect.bottom() - 30.0 * scale),
        Align2::LEFT_TOP,
        FontId::proportional(14.0 * scale),
        Theme::with_opacity(theme.foreground, 0.3),
    );

    // Slide counter
    let counter_color = Theme::with_opacity(theme.foreground, 0.3);
    let counter_galley = ui.painter().layout_no_wrap(
        state.counter.clone(),
        FontId::monospace(14.0 * scale),
        counter_color,
    );
    let counter_right = rect.right() - 112.0 * scale;
    let counter_pos = pos2(
        counter_right - counter_galley.rect.width(),
        rect.bottom() - 30.0 * scale,
    );
    ui.painter()
        .galley(counter_pos, counter_galley, counter_color);

    // Previous / next
    let size = vec2(36.0, 28.0) * scale;
    let y = rect.bottom() - 36.0 * scale;
    let prev = Rect::from_min_size(pos2(rect.right() - 92.0 * scale, y), size);
    let next = Rect::from_min_size(pos2(rect.right() - 50.0 * scale, y), size);
    let mut clicked = None;
    let buttons = [
        (prev, "\u{2039}", Direction::Backward, !state.at_first),
        (next, "\u{203A}", Direction::Forward, !state.at_last),
    ];
    for (r, glyph, direction, enabled) in buttons {
        let response = ui.put(
            r,
            egui::Button::new(egui::RichText::new(glyph).size(18.0 * scale)),
        );
        if enabled && response.clicked() {
            clicked = Some(ClickTarget::NavButton(direction));
        }
    }
    clicked
}

/// Speaker notes strip along the bottom.
pub fn draw_notes(ui: &egui::Ui, theme: &Theme, rect: Rect, scale: f32, notes: Option<&str>) {
    let notes = notes.unwrap_or("No notes for this slide.");
    let padding = 20.0 * scale;
    let width = rect.width() * 0.7;
    let galley = text::layout(
        ui,
        notes,
        18.0 * scale,
        Theme::with_opacity(theme.foreground, 0.95),
        width - padding * 2.0,
    );
    let h = galley.rect.height() + padding * 2.0 + 24.0 * scale;
    let panel = Rect::from_min_size(
        pos2(rect.center().x - width / 2.0, rect.bottom() - 56.0 * scale - h),
        vec2(width, h),
    );
    ui.painter()
        .rect_filled(panel, 12.0 * scale, Theme::with_opacity(theme.panel, 0.95));
    text::draw_line(
        ui,
        "NOTES",
        panel.min + vec2(padding, padding * 0.6),
        Align2::LEFT_TOP,
        FontId::proportional(12.0 * scale),
        theme.accent,
    );
    ui.painter().galley(
        panel.min + vec2(padding, padding + 16.0 * scale),
        galley,
        theme.foreground,
    );
}

pub fn draw_toast(ui: &egui::Ui, theme: &Theme, rect: Rect, scale: f32, message: &str, opacity: f32) {
    let toast_color = Theme::with_opacity(theme.foreground, opacity * 0.9);
    let toast_bg = Theme::with_opacity(theme.panel, opacity * 0.9);
    let galley = ui.painter().layout_no_wrap(
        message.to_string(),
        FontId::proportional(20.0 * scale),
        toast_color,
    );
    let padding = 16.0 * scale;
    let toast_rect = Rect::from_min_size(
        pos2(
            rect.center().x - galley.rect.width() / 2.0 - padding,
            rect.bottom() - 80.0 * scale,
        ),
        vec2(
            galley.rect.width() + padding * 2.0,
            galley.rect.height() + padding * 2.0,
        ),
    );
    ui.painter().rect_filled(toast_rect, 8.0 * scale, toast_bg);
    let text_pos = pos2(toast_rect.left() + padding, toast_rect.top() + padding);
    ui.painter().galley(text_pos, galley, toast_color);
}

/// The "go to slide" prompt opened with G.
pub fn draw_goto_prompt(ui: &egui::Ui, theme: &Theme, rect: Rect, scale: f32, typed: &str, len: usize) {
    let panel = Rect::from_center_size(rect.center(), vec2(420.0, 150.0) * scale);
    ui.painter()
        .rect_filled(panel, 12.0 * scale, Theme::with_opacity(theme.panel, 0.95));
    text::draw_line(
        ui,
        &format!("Go to slide (1\u{2013}{len})"),
        panel.min + vec2(24.0, 20.0) * scale,
        Align2::LEFT_TOP,
        FontId::proportional(18.0 * scale),
        Theme::with_opacity(theme.foreground, 0.7),
    );
    let shown = if typed.is_empty() { "_" } else { typed };
    text::draw_line(
        ui,
        &format!("#/{shown}"),
        panel.min + vec2(24.0, 56.0) * scale,
        Align2::LEFT_TOP,
        FontId::monospace(40.0 * scale),
        theme.heading_color,
    );
    text::draw_line(
        ui,
        "Enter to jump \u{00b7} Esc to cancel",
        pos2(panel.right() - 24.0 * scale, panel.bottom() - 16.0 * scale),
        Align2::RIGHT_BOTTOM,
        FontId::proportional(13.0 * scale),
        Theme::with_opacity(theme.foreground, 0.5),
    );
}

pub fn draw_hud(ui: &egui::Ui, theme: &Theme, rect: Rect, scale: f32) {
    let shortcuts = [
        ("\u{2192} / PgDn / Space", "Next slide"),
        ("\u{2190} / PgUp", "Previous slide"),
        ("Home / End", "First / last slide"),
        ("Click / swipe", "Next / previous"),
        ("N", "Toggle speaker notes"),
        ("G", "Go to slide"),
        ("Alt+\u{2190} / Alt+\u{2192}", "History back / forward"),
        ("Esc", "Close overlay / \u{00d7}2 exit"),
        ("F", "Toggle fullscreen"),
        ("H", "Toggle this HUD"),
        ("Q", "Quit"),
    ];

    let bg = Theme::with_opacity(theme.panel, 0.92);
    let text_color = Theme::with_opacity(theme.foreground, 0.9);
    let key_color = Theme::with_opacity(theme.accent, 0.9);

    let padding = 24.0 * scale;
    let line_height = 32.0 * scale;
    let hud_height = shortcuts.len() as f32 * line_height + padding * 2.0 + 40.0 * scale;
    let hud_width = 440.0 * scale;

    let hud_rect = Rect::from_center_size(rect.center(), vec2(hud_width, hud_height));
    ui.painter().rect_filled(hud_rect, 12.0 * scale, bg);

    let title_galley = ui.painter().layout_no_wrap(
        "Keyboard Shortcuts".to_string(),
        FontId::proportional(20.0 * scale),
        Theme::with_opacity(theme.heading_color, 0.9),
    );
    let title_pos = pos2(hud_rect.left() + padding, hud_rect.top() + padding);
    ui.painter().galley(title_pos, title_galley, text_color);

    let mut y = hud_rect.top() + padding + 40.0 * scale;
    for (key, desc) in &shortcuts {
        let key_galley =
            ui.painter()
                .layout_no_wrap(key.to_string(), FontId::monospace(15.0 * scale), key_color);
        ui.painter()
            .galley(pos2(hud_rect.left() + padding, y), key_galley, key_color);

        let desc_galley = ui.painter().layout_no_wrap(
            desc.to_string(),
            FontId::proportional(15.0 * scale),
            text_color,
        );
        ui.painter().galley(
            pos2(hud_rect.left() + padding + 200.0 * scale, y),
            desc_galley,
            text_color,
        );
        y += line_height;
    }
}
