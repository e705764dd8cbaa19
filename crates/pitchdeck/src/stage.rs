//! Slide activation and one-time widget initialisation.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::deck::{Deck, GroupKind, Slide};
use crate::navigation::transition::EASE_OUT_SOFT;
use crate::widgets::{RisePose, Widget, WidgetContext};

/// Timing of one entrance family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntranceTiming {
    pub duration: Duration,
    /// Delay between consecutive items of a group.
    pub step: Duration,
    pub rise: f32,
    pub scale: f32,
}

impl EntranceTiming {
    pub fn for_kind(kind: GroupKind) -> Self {
        match kind {
            GroupKind::Chips => Self {
                duration: Duration::from_millis(240),
                step: Duration::from_millis(60),
                rise: 8.0,
                scale: 0.98,
            },
            GroupKind::Stagger => Self {
                duration: Duration::from_millis(260),
                step: Duration::from_millis(70),
                rise: 12.0,
                scale: 1.0,
            },
            GroupKind::Stack => Self {
                duration: Duration::from_millis(420),
                step: Duration::from_millis(90),
                rise: 12.0,
                scale: 0.96,
            },
        }
    }

    fn pose(&self, item: usize, elapsed: Duration) -> RisePose {
        let delay = self.step * item as u32;
        let Some(local) = elapsed.checked_sub(delay) else {
            return RisePose::between(0.0, self.rise, self.scale);
        };
        let t = local.as_secs_f32() / self.duration.as_secs_f32();
        if t >= 1.0 {
            return RisePose::REST;
        }
        RisePose::between(EASE_OUT_SOFT.ease(t), self.rise, self.scale)
    }

    fn total(&self, items: usize) -> Duration {
        self.step * items.saturating_sub(1) as u32 + self.duration
    }
}

/// Entrance plan for one visit of a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct Entrance {
    started: Instant,
    /// Per content group: its timing (if animated) and item count.
    groups: Vec<(Option<EntranceTiming>, usize)>,
}

impl Entrance {
    pub fn plan(slide: &Slide, now: Instant) -> Self {
        Self {
            started: now,
            groups: slide
                .groups
                .iter()
                .map(|g| (g.animate.map(EntranceTiming::for_kind), g.items.len()))
                .collect(),
        }
    }

    /// Pose of item `item` of content group `group` at `now`.
    pub fn pose(&self, group: usize, item: usize, now: Instant) -> RisePose {
        match self.groups.get(group) {
            Some((Some(timing), _)) => {
                timing.pose(item, now.saturating_duration_since(self.started))
            }
            _ => RisePose::REST,
        }
    }

    pub fn is_running(&self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.started);
        self.groups
            .iter()
            .any(|(timing, items)| timing.is_some_and(|t| elapsed < t.total(*items)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SlideRuntime {
    /// Set by the first reveal and never reset.
    pub initialized: bool,
    pub active: bool,
    pub entrance: Option<Entrance>,
    pub widget: Option<Widget>,
}

/// Owns the deck and the runtime state of every slide.
#[derive(Debug)]
pub struct Stage {
    deck: Deck,
    runtimes: Vec<SlideRuntime>,
    ctx: WidgetContext,
}

impl Stage {
    pub fn new(deck: Deck, ctx: WidgetContext) -> Self {
        let runtimes = vec![SlideRuntime::default(); deck.len()];
        Self {
            deck,
            runtimes,
            ctx,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[cfg(test)]
    pub fn context(&self) -> &WidgetContext {
        &self.ctx
    }

    #[cfg(test)]
    /// 1-based.
    pub fn runtime(&self, index: usize) -> Option<&SlideRuntime> {
        self.runtimes.get(index.checked_sub(1)?)
    }

    /// A slide together with its runtime, borrowed for painting.
    pub fn slide_mut(&mut self, index: usize) -> Option<(&Slide, &mut SlideRuntime)> {
        let slot = index.checked_sub(1)?;
        Some((self.deck.slides.get(slot)?, self.runtimes.get_mut(slot)?))
    }

    /// Mark `index` active, plan its entrance and run its one-time
    /// initialiser. Tasks start on every reveal.
    pub fn reveal<R: Rng + ?Sized>(&mut self, index: usize, now: Instant, rng: &mut R) {
        let Some(slot) = index.checked_sub(1) else {
            return;
        };
        let (Some(slide), Some(rt)) = (self.deck.slides.get(slot), self.runtimes.get_mut(slot))
        else {
            return;
        };

        rt.active = true;
        rt.entrance = (!self.ctx.motion.is_reduced()).then(|| Entrance::plan(slide, now));
        Self::initialize(rt, slide, &self.ctx, now, rng);
        if let Some(widget) = rt.widget.as_mut() {
            widget.activate(now);
        }
        tracing::debug!(slide = index, role = ?slide.role, "revealed");
    }

    fn initialize<R: Rng + ?Sized>(
        rt: &mut SlideRuntime,
        slide: &Slide,
        ctx: &WidgetContext,
        now: Instant,
        rng: &mut R,
    ) {
        if rt.initialized {
            return;
        }
        rt.initialized = true;
        rt.widget = Widget::for_slide(slide, ctx, now, rng);
    }

    /// Hide `index` and cancel its tasks. Widget state is kept.
    pub fn deactivate(&mut self, index: usize) {
        let Some(rt) = index
            .checked_sub(1)
            .and_then(|slot| self.runtimes.get_mut(slot))
        else {
            return;
        };
        rt.active = false;
        rt.entrance = None;
        if let Some(widget) = rt.widget.as_mut() {
            widget.deactivate();
        }
    }

    /// Drive the timers of active slides.
    pub fn tick<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) {
        for rt in self.runtimes.iter_mut().filter(|rt| rt.active) {
            if let Some(widget) = rt.widget.as_mut() {
                widget.tick(now, rng);
            }
        }
    }

    pub fn needs_repaint(&self, now: Instant) -> bool {
        self.runtimes.iter().filter(|rt| rt.active).any(|rt| {
            rt.entrance.as_ref().is_some_and(|e| e.is_running(now))
                || rt.widget.as_ref().is_some_and(|w| w.needs_repaint(now))
        })
    }

    /// Close any open overlay on the active slides.
    pub fn dismiss_overlays(&mut self) -> bool {
        let mut closed = false;
        for rt in self.runtimes.iter_mut().filter(|rt| rt.active) {
            if let Some(widget) = rt.widget.as_mut() {
                closed |= widget.dismiss();
            }
        }
        closed
    }
}
