//! Per-slide interactive widgets.
//!
//! Every widget is built once, the first time its slide is revealed, and owns
//! its state from then on. Widgets with timers expose `activate` and
//! `deactivate` so the stage can start and cancel their tasks with the slide.

pub mod engine;
pub mod format;
pub mod hero;
pub mod intake;
pub mod objections;
pub mod proof;
pub mod roi;
pub mod tasks;
pub mod team;

use std::path::PathBuf;
use std::time::Instant;

use rand::Rng;

use crate::deck::{Slide, SlideRole};
use crate::navigation::transition::MotionMode;

use engine::EngineWidget;
use hero::HeroWidget;
use intake::IntakeWidget;
use objections::ObjectionsWidget;
use proof::ProofWidget;
use roi::RoiState;
use team::TeamWidget;

/// Vertical entrance pose for a block that rises into place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RisePose {
    pub opacity: f32,
    /// Downward offset in points.
    pub rise: f32,
    pub scale: f32,
}

impl RisePose {
    pub const REST: RisePose = RisePose {
        opacity: 1.0,
        rise: 0.0,
        scale: 1.0,
    };

    /// Interpolate from (transparent, `rise`, `scale`) at `eased = 0` to rest.
    pub fn between(eased: f32, rise: f32, scale: f32) -> Self {
        Self {
            opacity: eased,
            rise: rise * (1.0 - eased),
            scale: scale + (1.0 - scale) * eased,
        }
    }
}

/// What widgets need from the show besides their slide.
#[derive(Debug, Clone)]
pub struct WidgetContext {
    pub motion: MotionMode,
    pub media_base: Option<String>,
    /// Directory that relative asset paths resolve against.
    pub asset_dir: PathBuf,
}

impl Default for WidgetContext {
    fn default() -> Self {
        Self {
            motion: MotionMode::Full,
            media_base: None,
            asset_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Widget {
    Hero(HeroWidget),
    Engine(EngineWidget),
    Intake(IntakeWidget),
    Proof(ProofWidget),
    Roi(RoiState),
    Objections(ObjectionsWidget),
    Team(TeamWidget),
}

impl Widget {
    /// Build the widget for a slide's role. Plain content slides have none.
    pub fn for_slide<R: Rng + ?Sized>(
        slide: &Slide,
        ctx: &WidgetContext,
        now: Instant,
        rng: &mut R,
    ) -> Option<Self> {
        let widget = match slide.role {
            SlideRole::Content => return None,
            SlideRole::Hero => Widget::Hero(HeroWidget::new(
                &slide.counters,
                &slide.words,
                &slide.parallax,
                ctx.motion,
            )),
            SlideRole::Engine => {
                let mut engine =
                    EngineWidget::new(&slide.reel, ctx.media_base.as_deref(), &ctx.asset_dir);
                if let Some(key) = &slide.ad_theme {
                    engine.set_theme_key(key);
                }
                Widget::Engine(engine)
            }
            SlideRole::Intake => Widget::Intake(IntakeWidget::new(&slide.intake_options)),
            SlideRole::Proof => Widget::Proof(ProofWidget::new(
                slide.screenshot.as_ref().map(|p| ctx.asset_dir.join(p)),
                ctx.motion,
                rng,
            )),
            SlideRole::Roi => Widget::Roi(RoiState::new(ctx.motion)),
            SlideRole::Objections => Widget::Objections(ObjectionsWidget::new(ctx.motion, now)),
            SlideRole::Team => Widget::Team(TeamWidget::new(ctx.motion)),
        };
        Some(widget)
    }

    pub fn activate(&mut self, now: Instant) {
        match self {
            Widget::Hero(w) => w.activate(now),
            Widget::Intake(w) => w.activate(now),
            Widget::Proof(w) => w.activate(now),
            Widget::Roi(w) => w.activate(now),
            Widget::Team(w) => w.activate(now),
            Widget::Engine(_) | Widget::Objections(_) => {}
        }
    }

    pub fn deactivate(&mut self) {
        match self {
            Widget::Hero(w) => w.deactivate(),
            Widget::Intake(w) => w.deactivate(),
            Widget::Proof(w) => w.deactivate(),
            Widget::Roi(w) => w.deactivate(),
            Widget::Team(w) => w.deactivate(),
            Widget::Engine(_) | Widget::Objections(_) => {}
        }
    }

    /// Whether any supervised task is live.
    pub fn has_running_tasks(&self) -> bool {
        match self {
            Widget::Hero(w) => w.is_running(),
            Widget::Intake(w) => w.is_running(),
            Widget::Proof(w) => w.is_running(),
            Widget::Team(w) => w.is_running(),
            Widget::Roi(_) | Widget::Engine(_) | Widget::Objections(_) => false,
        }
    }

    /// Whether the widget needs frames at `now` to keep animating.
    pub fn needs_repaint(&self, now: Instant) -> bool {
        self.has_running_tasks()
            || match self {
                Widget::Hero(w) => w.is_animating(now),
                Widget::Roi(w) => w.is_animating(now),
                Widget::Objections(w) => w.is_popping(now),
                _ => false,
            }
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) {
        match self {
            Widget::Hero(w) => w.tick(now),
            Widget::Intake(w) => w.tick(now),
            Widget::Proof(w) => w.tick(now, rng),
            Widget::Team(w) => w.tick(now),
            Widget::Roi(_) | Widget::Engine(_) | Widget::Objections(_) => {}
        }
    }

    /// Close an open overlay. Returns whether anything was closed.
    pub fn dismiss(&mut self) -> bool {
        match self {
            Widget::Proof(w) => w.close_lightbox(),
            _ => false,
        }
    }
}
