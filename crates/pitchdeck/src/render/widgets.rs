//! Painting and controls for the interactive slides.
//!
//! Widgets own their state; these functions only draw it and forward control
//! input back through the widget's methods.

use std::f32::consts::{PI, TAU};
use std::ops::RangeInclusive;

use eframe::egui::{
    self, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, pos2, vec2,
};

use crate::stage::Entrance;
use crate::theme::Theme;
use crate::widgets::engine::{AdTheme, EngineWidget};
use crate::widgets::hero::HeroWidget;
use crate::widgets::intake::{Grade, IntakeWidget, NOTIFY_STEPS, RING_CIRCUMFERENCE, RING_RADIUS};
use crate::widgets::objections::{OBJECTIONS, ObjectionsWidget};
use crate::widgets::proof::{Kpi, ProofWidget};
use crate::widgets::roi::{MIN_CPC, RoiState};
use crate::widgets::team::TeamWidget;
use crate::widgets::RisePose;

use super::image_cache::ImageCache;
use super::{Paint, text};

const ENGINE_CARDS: [&str; 3] = ["Creative", "Search", "Retarget"];

/// A child ui over `rect` whose controls use the slide's scaled font.
fn controls(ui: &mut egui::Ui, rect: Rect, p: &Paint, salt: &str) -> egui::Ui {
    let mut child = ui.new_child(egui::UiBuilder::new().max_rect(rect).id_salt(salt));
    child.style_mut().override_font_id = Some(FontId::proportional(p.px(p.theme.small_size)));
    child.style_mut().spacing.button_padding = vec2(p.px(14.0), p.px(8.0));
    child
}

fn button(ui: &mut egui::Ui, rect: Rect, label: &str, selected: bool) -> bool {
    ui.put(rect, egui::Button::new(label).selected(selected))
        .clicked()
}

fn label(ui: &egui::Ui, text: &str, pos: Pos2, size: f32, color: Color32) -> Rect {
    text::draw_line(ui, text, pos, Align2::LEFT_TOP, FontId::proportional(size), color)
}

fn bar(ui: &egui::Ui, rect: Rect, fraction: f32, fill: Color32, track: Color32) {
    let r = rect.height() / 2.0;
    ui.painter().rect_filled(rect, r, track);
    let w = rect.width() * fraction.clamp(0.0, 1.0);
    if w > 0.0 {
        ui.painter()
            .rect_filled(Rect::from_min_size(rect.min, vec2(w, rect.height())), r, fill);
    }
}

fn muted(theme: &Theme) -> Color32 {
    Theme::with_opacity(theme.foreground, 0.6)
}

fn track(theme: &Theme) -> Color32 {
    Theme::with_opacity(theme.panel_border, 0.8)
}

/// Posed card: offset down by `rise`, scaled about its centre.
fn posed(rect: Rect, pose: RisePose, p: &Paint) -> Rect {
    Rect::from_center_size(
        rect.center() + vec2(0.0, p.px(pose.rise)),
        rect.size() * pose.scale,
    )
}

fn bullets(ui: &egui::Ui, items: &[&str], rect: Rect, p: &Paint, color: Color32) {
    let mut y = rect.top();
    let size = p.px(p.theme.small_size);
    for item in items {
        ui.painter()
            .circle_filled(pos2(rect.left() + p.px(5.0), y + size * 0.6), p.px(3.5), color);
        y += text::draw_text(
            ui,
            item,
            pos2(rect.left() + p.px(18.0), y),
            size,
            p.theme.foreground,
            rect.width() - p.px(18.0),
        );
        y += p.px(10.0);
    }
}

pub fn hero(ui: &mut egui::Ui, w: &mut HeroWidget, p: &Paint, rect: Rect) {
    let theme = p.theme;
    let screen = ui.max_rect();
    if p.interactive {
        if let Some(pointer) = ui.ctx().pointer_hover_pos() {
            w.pointer_moved(pointer, screen);
        }
    }

    if let Some(spot) = w.spotlight() {
        let center = screen.min + vec2(spot.x / 100.0 * screen.width(), spot.y / 100.0 * screen.height());
        for (radius, alpha) in [(320.0, 0.04), (200.0, 0.05), (100.0, 0.06)] {
            ui.painter().circle_filled(
                center,
                p.px(radius),
                Theme::with_opacity(theme.accent, alpha),
            );
        }
    }

    let mut y = rect.top();
    for (line, offset) in w.parallax_lines() {
        let pos = pos2(rect.left(), y) + offset * p.scale;
        let r = label(ui, line, pos, p.px(48.0), theme.heading_color);
        y += r.height() + p.px(8.0);
    }

    if let Some(word) = w.word() {
        y += p.px(12.0);
        let lead = label(ui, "More ", pos2(rect.left(), y), p.px(40.0), muted(theme));
        label(ui, word, pos2(lead.right(), y), p.px(40.0), theme.accent);
        y += lead.height() + p.px(36.0);
    }

    let tile_w = p.px(260.0);
    let tile_h = p.px(130.0);
    for (i, counter) in w.counters().iter().enumerate() {
        let tile = Rect::from_min_size(
            pos2(rect.left() + i as f32 * (tile_w + p.px(20.0)), y),
            vec2(tile_w, tile_h),
        );
        text::draw_card(ui, tile, theme, 1.0, p.scale);
        text::draw_line(
            ui,
            &counter.text_at(p.now),
            tile.min + vec2(p.px(22.0), p.px(18.0)),
            Align2::LEFT_TOP,
            FontId::monospace(p.px(48.0)),
            theme.heading_color,
        );
        label(
            ui,
            &counter.label,
            pos2(tile.left() + p.px(22.0), tile.bottom() - p.px(40.0)),
            p.px(theme.small_size),
            muted(theme),
        );
    }
}

pub fn engine(
    ui: &mut egui::Ui,
    w: &mut EngineWidget,
    titles: &[String],
    entrance: Option<&Entrance>,
    p: &Paint,
    rect: Rect,
) {
    let theme = p.theme;
    let mut ui = controls(ui, rect, p, "engine");

    let mut x = rect.left();
    let row_h = p.px(44.0);
    for ad in AdTheme::ALL {
        let bw = text::pill_width(&ui, ad.label(), p.px(theme.small_size), p.scale);
        let r = Rect::from_min_size(pos2(x, rect.top()), vec2(bw, row_h));
        if button(&mut ui, r, ad.label(), w.theme() == ad) {
            w.set_theme(ad);
        }
        x += bw + p.px(10.0);
    }

    let plan = w.plan();
    let mut y = rect.top() + row_h + p.px(20.0);
    y += text::draw_text(
        &ui,
        plan.split,
        pos2(rect.left(), y),
        p.px(theme.body_size - 4.0),
        theme.accent,
        rect.width(),
    );
    y += p.px(24.0);

    let reel_h = if w.clips().is_empty() { 0.0 } else { p.px(120.0) };
    let gap = p.px(20.0);
    let card_w = (rect.width() - gap * 2.0) / 3.0;
    let card_h = (rect.bottom() - y - reel_h - gap).max(p.px(120.0));
    let lists = [plan.creative, plan.search, plan.retarget];
    for (i, items) in lists.iter().enumerate() {
        let title = titles.get(i).map_or(ENGINE_CARDS[i], String::as_str);
        let pose = entrance.map_or(RisePose::REST, |e| e.pose(0, i, p.now));
        let base = Rect::from_min_size(
            pos2(rect.left() + i as f32 * (card_w + gap), y),
            vec2(card_w, card_h),
        );
        let card = posed(base, pose, p);
        text::draw_card(&ui, card, theme, pose.opacity, p.scale);
        label(
            &ui,
            title,
            card.min + vec2(p.px(20.0), p.px(18.0)),
            p.px(theme.small_size + 4.0),
            Theme::with_opacity(theme.heading_color, pose.opacity),
        );
        let list = Rect::from_min_max(
            card.min + vec2(p.px(20.0), p.px(64.0)),
            card.max - vec2(p.px(20.0), p.px(16.0)),
        );
        bullets(&ui, items, list, p, Theme::with_opacity(theme.accent, pose.opacity));
    }

    if reel_h > 0.0 {
        let top = rect.bottom() - reel_h + p.px(16.0);
        label(&ui, "Reel", pos2(rect.left(), top), p.px(theme.small_size), muted(theme));
        let mut x = rect.left();
        let mut open = None;
        for (i, clip) in w.clips().iter().enumerate() {
            let caption = format!("\u{25B6} {}", clip.label);
            let bw = text::pill_width(&ui, &caption, p.px(theme.small_size), p.scale);
            let r = Rect::from_min_size(pos2(x, top + p.px(36.0)), vec2(bw, row_h));
            if button(&mut ui, r, &caption, false) {
                open = Some(i);
            }
            if clip.blocked {
                label(
                    &ui,
                    "Playback blocked",
                    pos2(x, r.bottom() + p.px(6.0)),
                    p.px(theme.small_size - 4.0),
                    theme.negative,
                );
            }
            x += bw + p.px(12.0);
        }
        if let Some(i) = open {
            w.open_clip(i);
        }
    }
}

pub fn intake(ui: &mut egui::Ui, w: &mut IntakeWidget, p: &Paint, rect: Rect) {
    let theme = p.theme;
    let mut ui = controls(ui, rect, p, "intake");
    let col_w = rect.width() / 3.0;

    // Qualifying questions.
    let mut toggled = Vec::new();
    let mut y = rect.top();
    for (i, option) in w.options().iter().enumerate() {
        let mut checked = option.checked;
        let r = Rect::from_min_size(pos2(rect.left(), y), vec2(col_w - p.px(24.0), p.px(44.0)));
        let text = format!("{}  (+{})", option.label, option.weight);
        if ui.put(r, egui::Checkbox::new(&mut checked, text)).changed() {
            toggled.push((i, checked));
        }
        y += p.px(56.0);
    }
    for (i, checked) in toggled {
        w.set_checked(i, checked);
    }

    // Score ring.
    let center = pos2(rect.left() + col_w * 1.5, rect.top() + p.px(150.0));
    let radius = p.px(RING_RADIUS * 1.6);
    let stroke_w = p.px(16.0);
    ui.painter()
        .circle_stroke(center, radius, Stroke::new(stroke_w, track(theme)));
    let fraction = 1.0 - w.ring_offset() / RING_CIRCUMFERENCE;
    let grade = w.grade();
    let color = theme.grade_color(grade_rank(grade));
    if fraction > 0.0 {
        let steps = 96;
        let points: Vec<Pos2> = (0..=steps)
            .map(|s| {
                let a = -PI / 2.0 + TAU * fraction * s as f32 / steps as f32;
                center + vec2(a.cos(), a.sin()) * radius
            })
            .collect();
        ui.painter().add(Shape::line(points, Stroke::new(stroke_w, color)));
    }
    text::draw_line(
        &ui,
        &format!("{:.0}", w.score()),
        center,
        Align2::CENTER_CENTER,
        FontId::monospace(p.px(64.0)),
        theme.heading_color,
    );
    text::draw_line(
        &ui,
        grade.label(),
        center + vec2(0.0, radius + p.px(40.0)),
        Align2::CENTER_TOP,
        FontId::proportional(p.px(theme.body_size)),
        color,
    );

    // Demo lane and notifications.
    let right = rect.left() + col_w * 2.0 + p.px(24.0);
    let lane = Rect::from_min_size(pos2(right, rect.top()), vec2(col_w - p.px(24.0), p.px(56.0)));
    text::draw_card(&ui, lane, theme, 1.0, p.scale);
    for progress in w.lane_chips(p.now) {
        let x = lane.left() + p.px(24.0) + (lane.width() - p.px(48.0)) * progress;
        let fade = (1.0 - progress).min(progress * 4.0).clamp(0.0, 1.0);
        ui.painter().circle_filled(
            pos2(x, lane.center().y),
            p.px(12.0),
            Theme::with_opacity(theme.accent, fade),
        );
    }
    let lit = w.lit_steps(p.now);
    let mut y = lane.bottom() + p.px(28.0);
    for (i, step) in NOTIFY_STEPS.iter().enumerate() {
        let on = i < lit;
        let dot = if on { theme.positive } else { track(theme) };
        ui.painter()
            .circle_filled(pos2(right + p.px(10.0), y + p.px(14.0)), p.px(8.0), dot);
        let color = if on { theme.foreground } else { muted(theme) };
        label(&ui, step, pos2(right + p.px(32.0), y), p.px(theme.small_size), color);
        y += p.px(48.0);
    }
}

fn grade_rank(grade: Grade) -> usize {
    match grade {
        Grade::A => 0,
        Grade::B => 1,
        Grade::C => 2,
        Grade::D => 3,
    }
}

fn kpi_fraction(kpi: &Kpi) -> f32 {
    if kpi.max == 0 {
        0.0
    } else {
        kpi.value as f32 / kpi.max as f32
    }
}

pub fn proof(
    ui: &mut egui::Ui,
    w: &mut ProofWidget,
    p: &Paint,
    rect: Rect,
    images: &mut ImageCache,
) {
    let theme = p.theme;
    let slide_rect = ui.max_rect();
    let mut ui = controls(ui, rect, p, "proof");

    // KPI tiles.
    let gap = p.px(16.0);
    let tile_w = (rect.width() - gap * 3.0) / 4.0;
    let tile_h = p.px(132.0);
    let fractions = [
        Some(kpi_fraction(&w.leads)),
        Some(kpi_fraction(&w.appointments)),
        Some(kpi_fraction(&w.installs)),
        None,
    ];
    for (i, ((name, value), fraction)) in w.kpi_texts().iter().zip(fractions).enumerate() {
        let tile = Rect::from_min_size(
            pos2(rect.left() + i as f32 * (tile_w + gap), rect.top()),
            vec2(tile_w, tile_h),
        );
        text::draw_card(&ui, tile, theme, 1.0, p.scale);
        label(&ui, name, tile.min + vec2(p.px(16.0), p.px(14.0)), p.px(theme.small_size - 4.0), muted(theme));
        text::draw_line(
            &ui,
            value,
            tile.min + vec2(p.px(16.0), p.px(44.0)),
            Align2::LEFT_TOP,
            FontId::monospace(p.px(40.0)),
            theme.heading_color,
        );
        if let Some(f) = fraction {
            let track_rect = Rect::from_min_size(
                pos2(tile.left() + p.px(16.0), tile.bottom() - p.px(20.0)),
                vec2(tile_w - p.px(32.0), p.px(6.0)),
            );
            bar(&ui, track_rect, f, theme.accent, track(theme));
        }
    }

    // Praise feed, newest first.
    let top = rect.top() + tile_h + p.px(28.0);
    let feed_w = rect.width() * 0.55;
    label(&ui, "Signals", pos2(rect.left(), top), p.px(theme.small_size), muted(theme));
    let mut y = top + p.px(36.0);
    for signal in w.feed() {
        label(&ui, signal.icon, pos2(rect.left(), y), p.px(theme.small_size), theme.accent);
        let h = text::draw_text(
            &ui,
            signal.text,
            pos2(rect.left() + p.px(36.0), y),
            p.px(theme.small_size),
            theme.foreground,
            feed_w - p.px(160.0),
        );
        text::draw_line(
            &ui,
            signal.meta,
            pos2(rect.left() + feed_w, y),
            Align2::RIGHT_TOP,
            FontId::proportional(p.px(theme.small_size - 4.0)),
            muted(theme),
        );
        y += h + p.px(12.0);
    }

    // Lead stream.
    let stream_left = rect.left() + feed_w + p.px(32.0);
    let stream = Rect::from_min_max(pos2(stream_left, top), pos2(rect.right(), top + p.px(240.0)));
    label(&ui, "Live leads", stream.min, p.px(theme.small_size), muted(theme));
    let lane = Rect::from_min_max(stream.min + vec2(0.0, p.px(36.0)), stream.max);
    text::draw_card(&ui, lane, theme, 1.0, p.scale);
    let painter = ui.painter().with_clip_rect(lane);
    for (i, chip) in w.stream().iter().rev().enumerate() {
        let progress = ProofWidget::chip_progress(chip, p.now);
        let fade = (1.0 - progress).min(progress * 5.0).clamp(0.0, 1.0);
        let pos = pos2(
            lane.right() - p.px(16.0) - (lane.width() - p.px(32.0)) * progress * 0.25,
            lane.top() + p.px(16.0) + i as f32 * p.px(44.0),
        );
        painter.text(
            pos,
            Align2::RIGHT_TOP,
            &chip.text,
            FontId::proportional(p.px(theme.small_size - 4.0)),
            Theme::with_opacity(theme.foreground, fade),
        );
    }

    // Screenshot and lightbox.
    let Some(path) = w.screenshot().cloned() else {
        return;
    };
    let r = Rect::from_min_size(
        pos2(stream_left, lane.bottom() + p.px(20.0)),
        vec2(p.px(300.0), p.px(44.0)),
    );
    if button(&mut ui, r, "View the dashboard", false) {
        w.open_lightbox();
    }
    if !w.lightbox_open() {
        return;
    }

    ui.painter()
        .rect_filled(slide_rect, 0.0, Color32::from_black_alpha(220));
    let frame = slide_rect.shrink(p.px(80.0));
    match images.get_or_load(ui.ctx(), &path) {
        Some(texture) => {
            let size = texture.size_vec2();
            let fit = (frame.width() / size.x).min(frame.height() / size.y);
            let shown = Rect::from_center_size(frame.center(), size * fit);
            ui.painter().image(
                texture.id(),
                shown,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
        None => {
            text::draw_line(
                &ui,
                "Screenshot unavailable",
                frame.center(),
                Align2::CENTER_CENTER,
                FontId::proportional(p.px(theme.body_size)),
                Color32::WHITE,
            );
        }
    }
    text::draw_line(
        &ui,
        "Esc or click to close",
        pos2(frame.center().x, slide_rect.bottom() - p.px(40.0)),
        Align2::CENTER_CENTER,
        FontId::proportional(p.px(theme.small_size - 4.0)),
        Color32::from_white_alpha(180),
    );
    let backdrop = ui.interact(slide_rect, ui.id().with("lightbox"), Sense::click());
    if backdrop.clicked() {
        w.close_lightbox();
    }
}

struct NumberField<'a> {
    caption: &'static str,
    value: &'a mut f64,
    range: RangeInclusive<f64>,
    speed: f64,
    prefix: &'static str,
    suffix: &'static str,
}

impl<'a> NumberField<'a> {
    fn new(caption: &'static str, value: &'a mut f64, range: RangeInclusive<f64>, speed: f64) -> Self {
        Self {
            caption,
            value,
            range,
            speed,
            prefix: "",
            suffix: "",
        }
    }

    fn dollars(mut self) -> Self {
        self.prefix = "$";
        self
    }

    fn suffix(mut self, suffix: &'static str) -> Self {
        self.suffix = suffix;
        self
    }
}

/// A labelled numeric input. Returns whether the value changed.
fn number_input(ui: &mut egui::Ui, p: &Paint, pos: Pos2, width: f32, field: NumberField) -> bool {
    label(ui, field.caption, pos, p.px(p.theme.small_size - 4.0), muted(p.theme));
    let r = Rect::from_min_size(pos + vec2(0.0, p.px(28.0)), vec2(width, p.px(44.0)));
    ui.put(
        r,
        egui::DragValue::new(field.value)
            .range(field.range)
            .speed(field.speed)
            .prefix(field.prefix)
            .suffix(field.suffix),
    )
    .changed()
}

pub fn roi(ui: &mut egui::Ui, w: &mut RoiState, p: &Paint, rect: Rect) {
    let theme = p.theme;
    let mut ui = controls(ui, rect, p, "roi");
    let input_w = p.px(220.0);

    let mut changed = false;
    let inputs = &mut w.inputs;
    let fields = [
        NumberField::new("Monthly ad spend", &mut inputs.spend, 0.0..=1_000_000.0, 50.0).dollars(),
        NumberField::new("Cost per click", &mut inputs.cpc, MIN_CPC..=500.0, 0.1).dollars(),
        NumberField::new("Click to lead", &mut inputs.conversion_rate, 0.0..=100.0, 0.5).suffix(" %"),
        NumberField::new("Lead to sale", &mut inputs.close_rate, 0.0..=100.0, 0.5).suffix(" %"),
        NumberField::new("Average job value", &mut inputs.average_order_value, 0.0..=1_000_000.0, 100.0)
            .dollars(),
    ];
    for (i, field) in fields.into_iter().enumerate() {
        let pos = rect.min + vec2(0.0, i as f32 * p.px(88.0));
        changed |= number_input(&mut ui, p, pos, input_w, field);
    }

    // Result tiles.
    let left = rect.left() + input_w + p.px(64.0);
    let gap = p.px(16.0);
    let tile_w = (rect.right() - left - gap * 2.0) / 3.0;
    let tile_h = p.px(116.0);
    let tiles = [
        ("Leads", w.view.leads.clone()),
        ("Sales", w.view.sales.clone()),
        ("Cost per lead", w.view.cost_per_lead.clone()),
        ("Cost per sale", w.view.cost_per_sale.clone()),
        ("Revenue", w.revenue_text(p.now)),
        ("ROAS", w.view.roas.clone()),
    ];
    for (i, (name, value)) in tiles.iter().enumerate() {
        let tile = Rect::from_min_size(
            pos2(
                left + (i % 3) as f32 * (tile_w + gap),
                rect.top() + (i / 3) as f32 * (tile_h + gap),
            ),
            vec2(tile_w, tile_h),
        );
        text::draw_card(&ui, tile, theme, 1.0, p.scale);
        label(&ui, name, tile.min + vec2(p.px(16.0), p.px(14.0)), p.px(theme.small_size - 4.0), muted(theme));
        text::draw_line(
            &ui,
            value,
            tile.min + vec2(p.px(16.0), p.px(46.0)),
            Align2::LEFT_TOP,
            FontId::monospace(p.px(40.0)),
            theme.heading_color,
        );
    }

    // Gauge with the breakeven mark at 1x.
    let gauge_top = rect.top() + (tile_h + gap) * 2.0 + p.px(16.0);
    let gauge = Rect::from_min_size(pos2(left, gauge_top + p.px(36.0)), vec2(rect.right() - left, p.px(14.0)));
    let above = w.outcome.above_breakeven();
    let verdict = if above { theme.positive } else { theme.negative };
    label(&ui, w.view.breakeven, pos2(left, gauge_top), p.px(theme.small_size), verdict);
    bar(&ui, gauge, w.outcome.gauge_percent() as f32 / 100.0, verdict, track(theme));
    let mark_x = gauge.left() + gauge.width() / 3.0;
    ui.painter().line_segment(
        [pos2(mark_x, gauge.top() - p.px(6.0)), pos2(mark_x, gauge.bottom() + p.px(6.0))],
        Stroke::new(p.px(2.0), theme.heading_color),
    );

    // Idle crew cost.
    let idle_top = gauge.bottom() + p.px(40.0);
    let idle_w = p.px(160.0);
    let idle = &mut w.idle;
    let fields = [
        NumberField::new("Crew size", &mut idle.crew_size, 1.0..=50.0, 0.1),
        NumberField::new("Hourly cost", &mut idle.hourly_cost, 1.0..=500.0, 0.5).dollars(),
        NumberField::new("Idle hours", &mut idle.idle_hours, 0.0..=24.0, 0.1).suffix(" h"),
    ];
    let mut pos = pos2(left, idle_top);
    for field in fields {
        changed |= number_input(&mut ui, p, pos, idle_w, field);
        pos.x += idle_w + gap;
    }
    pos.x += gap;
    label(&ui, "Lost per idle day", pos, p.px(theme.small_size - 4.0), muted(theme));
    text::draw_line(
        &ui,
        &w.idle_text(),
        pos + vec2(0.0, p.px(28.0)),
        Align2::LEFT_TOP,
        FontId::monospace(p.px(36.0)),
        theme.negative,
    );

    if changed {
        w.recalc(p.now);
    }
}

pub fn objections(ui: &mut egui::Ui, w: &mut ObjectionsWidget, p: &Paint, rect: Rect) {
    let theme = p.theme;
    let mut ui = controls(ui, rect, p, "objections");

    // Chips.
    let row_h = p.px(44.0);
    let gap = p.px(10.0);
    let mut x = rect.left();
    let mut y = rect.top();
    let mut pick = None;
    for (i, objection) in OBJECTIONS.iter().enumerate() {
        let bw = text::pill_width(&ui, objection.label, p.px(theme.small_size), p.scale);
        if x > rect.left() && x + bw > rect.right() {
            x = rect.left();
            y += row_h + gap;
        }
        let r = Rect::from_min_size(pos2(x, y), vec2(bw, row_h));
        if button(&mut ui, r, objection.label, i == w.active()) {
            pick = Some(i);
        }
        x += bw + gap;
    }
    if let Some(i) = pick {
        w.set_active(i as isize, p.now);
    }

    // Card.
    let top = y + row_h + p.px(28.0);
    let footer_h = p.px(56.0);
    let base = Rect::from_min_max(pos2(rect.left(), top), pos2(rect.right(), rect.bottom() - footer_h));
    let pose = w.card_pose(p.now);
    let card = posed(base, pose, p);
    text::draw_card(&ui, card, theme, pose.opacity, p.scale);

    let current = w.current();
    let inner = card.shrink(p.px(28.0));
    let claim_h = text::draw_text(
        &ui,
        current.claim,
        inner.min,
        p.px(theme.body_size + 4.0),
        Theme::with_opacity(theme.heading_color, pose.opacity),
        inner.width(),
    );
    let cols_top = inner.top() + claim_h + p.px(24.0);
    let col_gap = p.px(28.0);
    let col_w = (inner.width() - col_gap * 2.0) / 3.0;
    let columns = [
        ("Myth", current.myth, theme.negative),
        ("Answer", current.answer, theme.accent),
        ("Proof", current.proof, theme.positive),
    ];
    for (i, (title, items, color)) in columns.into_iter().enumerate() {
        let col = Rect::from_min_max(
            pos2(inner.left() + i as f32 * (col_w + col_gap), cols_top),
            pos2(inner.left() + i as f32 * (col_w + col_gap) + col_w, inner.bottom()),
        );
        label(&ui, title, col.min, p.px(theme.small_size), Theme::with_opacity(color, pose.opacity));
        let list = Rect::from_min_max(col.min + vec2(0.0, p.px(36.0)), col.max);
        bullets(&ui, items, list, p, Theme::with_opacity(color, pose.opacity));
    }

    // Footer: previous, progress, counter, next.
    let fy = rect.bottom() - footer_h + p.px(12.0);
    let bw = p.px(120.0);
    if button(&mut ui, Rect::from_min_size(pos2(rect.left(), fy), vec2(bw, row_h)), "\u{2039} Prev", false) {
        w.previous(p.now);
    }
    if button(&mut ui, Rect::from_min_size(pos2(rect.right() - bw, fy), vec2(bw, row_h)), "Next \u{203A}", false) {
        w.next(p.now);
    }
    let progress = Rect::from_min_max(
        pos2(rect.left() + bw + p.px(24.0), fy + row_h / 2.0 - p.px(3.0)),
        pos2(rect.right() - bw - p.px(120.0), fy + row_h / 2.0 + p.px(3.0)),
    );
    bar(&ui, progress, w.progress_percent() / 100.0, theme.accent, track(theme));
    text::draw_line(
        &ui,
        &w.counter_text(),
        pos2(rect.right() - bw - p.px(24.0), fy + row_h / 2.0),
        Align2::RIGHT_CENTER,
        FontId::monospace(p.px(theme.small_size)),
        muted(theme),
    );
}

pub fn team(ui: &egui::Ui, w: &TeamWidget, p: &Paint, rect: Rect) {
    let (line, opacity) = w.shown(p.now);
    text::draw_line(
        ui,
        line,
        rect.center(),
        Align2::CENTER_CENTER,
        FontId::proportional(p.px(56.0)),
        Theme::with_opacity(p.theme.accent, opacity),
    );
}
