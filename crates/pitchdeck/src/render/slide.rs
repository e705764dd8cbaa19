use eframe::egui::{self, Color32, Pos2, Rect, pos2, vec2};

use crate::deck::{ContentGroup, GroupKind, Slide, SlideRole};
use crate::stage::{Entrance, SlideRuntime};
use crate::theme::Theme;
use crate::widgets::{RisePose, Widget};

use super::image_cache::ImageCache;
use super::{Paint, text, widgets};

/// Where the slide's parts go.
struct Regions {
    body: Rect,
    /// Left column for content groups when a widget shares the body.
    side: Option<Rect>,
}

pub fn render(
    ui: &mut egui::Ui,
    slide: &Slide,
    runtime: &mut SlideRuntime,
    p: &Paint,
    rect: Rect,
    images: &mut ImageCache,
) {
    let inner = Rect::from_min_max(
        rect.min + vec2(p.px(120.0), p.px(84.0)),
        rect.max - vec2(p.px(120.0), p.px(96.0)),
    );
    let header_bottom = draw_header(ui, slide, p, inner);
    let regions = regions(slide, inner, header_bottom + p.px(40.0), p);

    let entrance = runtime.entrance.as_ref();
    if let Some(side) = regions.side {
        draw_groups(ui, &slide.groups, entrance, p, side);
    }

    // Content slides, and widget slides not yet initialised mid-transition.
    let Some(widget) = runtime.widget.as_mut() else {
        if regions.side.is_none() {
            draw_groups(ui, &slide.groups, entrance, p, regions.body);
        }
        return;
    };

    match widget {
        Widget::Hero(w) => {
            let chips_h = if slide.groups.is_empty() { 0.0 } else { p.px(80.0) };
            let hero_rect = Rect::from_min_max(
                regions.body.min,
                pos2(regions.body.right(), regions.body.bottom() - chips_h),
            );
            widgets::hero(ui, w, p, hero_rect);
            if chips_h > 0.0 {
                let chips_rect =
                    Rect::from_min_max(pos2(regions.body.left(), hero_rect.bottom()), regions.body.max);
                draw_groups(ui, &slide.groups, entrance, p, chips_rect);
            }
        }
        Widget::Engine(w) => {
            let titles = slide.groups.first().map(|g| g.items.as_slice()).unwrap_or(&[]);
            widgets::engine(ui, w, titles, entrance, p, regions.body);
        }
        Widget::Intake(w) => widgets::intake(ui, w, p, regions.body),
        Widget::Proof(w) => widgets::proof(ui, w, p, regions.body, images),
        Widget::Roi(w) => widgets::roi(ui, w, p, regions.body),
        Widget::Objections(w) => widgets::objections(ui, w, p, regions.body),
        Widget::Team(w) => widgets::team(ui, w, p, regions.body),
    }
}

fn regions(slide: &Slide, inner: Rect, top: f32, p: &Paint) -> Regions {
    let body = Rect::from_min_max(pos2(inner.left(), top), inner.max);
    let has_side = !slide.groups.is_empty()
        && !matches!(
            slide.role,
            SlideRole::Content | SlideRole::Hero | SlideRole::Engine
        );
    if !has_side {
        return Regions { body, side: None };
    }
    let split = body.left() + body.width() * 0.34;
    Regions {
        body: Rect::from_min_max(pos2(split + p.px(48.0), body.top()), body.max),
        side: Some(Rect::from_min_max(body.min, pos2(split, body.bottom()))),
    }
}

/// Kicker, title and subtitle. Returns the bottom edge.
fn draw_header(ui: &egui::Ui, slide: &Slide, p: &Paint, inner: Rect) -> f32 {
    let theme = p.theme;
    let width = inner.width();
    let mut y = inner.top();

    if let Some(kicker) = &slide.kicker {
        let color = theme.accent;
        y += text::draw_text(
            ui,
            &kicker.to_uppercase(),
            pos2(inner.left(), y),
            p.px(theme.kicker_size),
            color,
            width,
        );
        y += p.px(14.0);
    }

    y += text::draw_text(
        ui,
        &slide.title,
        pos2(inner.left(), y),
        p.px(theme.title_size),
        theme.heading_color,
        width * 0.85,
    );

    if let Some(subtitle) = &slide.subtitle {
        y += p.px(16.0);
        y += text::draw_text(
            ui,
            subtitle,
            pos2(inner.left(), y),
            p.px(theme.subtitle_size),
            Theme::with_opacity(theme.foreground, 0.85),
            width * 0.8,
        );
    }
    y
}

fn pose_of(entrance: Option<&Entrance>, group: usize, item: usize, p: &Paint) -> RisePose {
    entrance.map_or(RisePose::REST, |e| e.pose(group, item, p.now))
}

fn faded(color: Color32, opacity: f32) -> Color32 {
    Theme::with_opacity(color, opacity * color.a() as f32 / 255.0)
}

pub fn draw_groups(
    ui: &egui::Ui,
    groups: &[ContentGroup],
    entrance: Option<&Entrance>,
    p: &Paint,
    rect: Rect,
) {
    let mut y = rect.top();
    for (g, group) in groups.iter().enumerate() {
        if let Some(heading) = &group.heading {
            y += text::draw_text(
                ui,
                heading,
                pos2(rect.left(), y),
                p.px(p.theme.small_size + 4.0),
                p.theme.accent,
                rect.width(),
            );
            y += p.px(16.0);
        }
        y = match group.animate {
            Some(GroupKind::Chips) => draw_chips(ui, group, g, entrance, p, rect, y),
            Some(GroupKind::Stack) => draw_stack(ui, group, g, entrance, p, rect, y),
            Some(GroupKind::Stagger) | None => draw_list(ui, group, g, entrance, p, rect, y),
        };
        y += p.px(36.0);
    }
}

fn draw_list(
    ui: &egui::Ui,
    group: &ContentGroup,
    g: usize,
    entrance: Option<&Entrance>,
    p: &Paint,
    rect: Rect,
    mut y: f32,
) -> f32 {
    let theme = p.theme;
    for (i, item) in group.items.iter().enumerate() {
        let pose = pose_of(entrance, g, i, p);
        let size = p.px(theme.body_size) * pose.scale;
        let top = y + p.px(pose.rise);
        let bullet = Pos2::new(rect.left() + p.px(8.0), top + size * 0.6);
        ui.painter()
            .circle_filled(bullet, p.px(5.0), faded(theme.accent, pose.opacity));
        let h = text::draw_text(
            ui,
            item,
            pos2(rect.left() + p.px(32.0), top),
            size,
            faded(theme.foreground, pose.opacity),
            rect.width() - p.px(32.0),
        );
        y += h + p.px(18.0);
    }
    y
}

fn draw_chips(
    ui: &egui::Ui,
    group: &ContentGroup,
    g: usize,
    entrance: Option<&Entrance>,
    p: &Paint,
    rect: Rect,
    y: f32,
) -> f32 {
    let theme = p.theme;
    let gap = p.px(12.0);
    let font = p.px(theme.small_size);
    let mut x = rect.left();
    let mut row_top = y;
    let mut row_h = 0.0_f32;
    for (i, item) in group.items.iter().enumerate() {
        let w = text::pill_width(ui, item, font, p.scale);
        if x > rect.left() && x + w > rect.right() {
            x = rect.left();
            row_top += row_h + gap;
        }
        let pose = pose_of(entrance, g, i, p);
        let pill = text::draw_pill(
            ui,
            item,
            pos2(x, row_top + p.px(pose.rise)),
            font * pose.scale,
            faded(theme.panel, pose.opacity),
            faded(theme.panel_border, pose.opacity),
            faded(theme.foreground, pose.opacity),
            p.scale,
        );
        row_h = row_h.max(pill.height());
        x += w + gap;
    }
    row_top + row_h
}

fn draw_stack(
    ui: &egui::Ui,
    group: &ContentGroup,
    g: usize,
    entrance: Option<&Entrance>,
    p: &Paint,
    rect: Rect,
    mut y: f32,
) -> f32 {
    let theme = p.theme;
    let card_h = p.px(theme.body_size + 44.0);
    for (i, item) in group.items.iter().enumerate() {
        let pose = pose_of(entrance, g, i, p);
        let card = Rect::from_center_size(
            pos2(rect.center().x, y + card_h / 2.0 + p.px(pose.rise)),
            vec2(rect.width(), card_h) * pose.scale,
        );
        text::draw_card(ui, card, theme, pose.opacity, p.scale);
        text::draw_line(
            ui,
            item,
            card.left_center() + vec2(p.px(24.0), 0.0),
            egui::Align2::LEFT_CENTER,
            egui::FontId::proportional(p.px(theme.body_size) * pose.scale),
            faded(theme.heading_color, pose.opacity),
        );
        y += card_h + p.px(14.0);
    }
    y
}
