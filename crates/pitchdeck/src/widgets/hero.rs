use std::time::{Duration, Instant};

use eframe::egui::{Pos2, Rect, Vec2};

use crate::deck::{CounterSpec, ParallaxLine};
use crate::navigation::transition::MotionMode;

use super::tasks::TaskGroup;

pub const SWITCH_PERIOD: Duration = Duration::from_millis(1800);
pub const COUNTER_TICK: Duration = Duration::from_millis(700);
/// How far past the target a counter climbs before settling back.
pub const OVERSHOOT: f64 = 1.03;
/// Parallax travel in points at full pointer deflection and factor 1.
pub const PARALLAX_TRAVEL: f32 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct HeroCounter {
    pub label: String,
    pub prefix: String,
    pub target: f64,
    tick_started: Option<Instant>,
}

impl HeroCounter {
    fn new(spec: &CounterSpec) -> Self {
        Self {
            label: spec.label.clone(),
            prefix: spec.prefix.clone(),
            target: if spec.to.is_finite() { spec.to } else { 0.0 },
            tick_started: None,
        }
    }

    /// Shows the target right away, climbs to `round(target * 1.03)` over the
    /// tick, then snaps back to the target.
    pub fn value_at(&self, now: Instant) -> i64 {
        let settled = self.target.round() as i64;
        let Some(start) = self.tick_started else {
            return settled;
        };
        let p = now.saturating_duration_since(start).as_secs_f64() / COUNTER_TICK.as_secs_f64();
        if p >= 1.0 {
            return settled;
        }
        let end = (self.target * OVERSHOOT).round();
        (self.target + (end - self.target) * p).round() as i64
    }

    pub fn text_at(&self, now: Instant) -> String {
        format!("{}{}", self.prefix, self.value_at(now))
    }

    pub fn is_ticking(&self, now: Instant) -> bool {
        self.tick_started
            .is_some_and(|start| now.saturating_duration_since(start) < COUNTER_TICK)
    }
}

/// Offset of a parallax line for a pointer deflection in `[-1, 1]` on both
/// axes.
pub fn parallax_offset(deflection: Vec2, factor: f32) -> Vec2 {
    deflection * PARALLAX_TRAVEL * factor
}

/// Pointer deflection from the centre of `screen`, in `[-1, 1]`.
pub fn deflection(pointer: Pos2, screen: Rect) -> Vec2 {
    let half = screen.size() / 2.0;
    if half.x <= 0.0 || half.y <= 0.0 {
        return Vec2::ZERO;
    }
    let d = pointer - screen.center();
    Vec2::new(d.x / half.x, d.y / half.y)
}

/// Spotlight centre in percent of the screen.
pub fn spotlight(pointer: Pos2, screen: Rect) -> Vec2 {
    let size = screen.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec2::splat(50.0);
    }
    let p = pointer - screen.min;
    Vec2::new(p.x / size.x * 100.0, p.y / size.y * 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroTask {
    SwitchWord,
}

#[derive(Debug, Clone)]
pub struct HeroWidget {
    counters: Vec<HeroCounter>,
    words: Vec<String>,
    word: usize,
    parallax: Vec<ParallaxLine>,
    motion: MotionMode,
    deflection: Vec2,
    spotlight: Option<Vec2>,
    tasks: TaskGroup<HeroTask>,
}

impl HeroWidget {
    pub fn new(
        counters: &[CounterSpec],
        words: &[String],
        parallax: &[ParallaxLine],
        motion: MotionMode,
    ) -> Self {
        let tasks = if words.len() > 1 {
            TaskGroup::default().with(HeroTask::SwitchWord, SWITCH_PERIOD)
        } else {
            TaskGroup::default()
        };
        Self {
            counters: counters.iter().map(HeroCounter::new).collect(),
            words: words.to_vec(),
            word: 0,
            parallax: parallax.to_vec(),
            motion,
            deflection: Vec2::ZERO,
            spotlight: None,
            tasks,
        }
    }

    pub fn counters(&self) -> &[HeroCounter] {
        &self.counters
    }

    pub fn word(&self) -> Option<&str> {
        self.words.get(self.word).map(String::as_str)
    }

    pub fn parallax_lines(&self) -> impl Iterator<Item = (&str, Vec2)> {
        self.parallax
            .iter()
            .map(|line| (line.text.as_str(), parallax_offset(self.deflection, line.factor)))
    }

    pub fn spotlight(&self) -> Option<Vec2> {
        self.spotlight
    }

    /// Counters with a positive target replay their tick on every visit.
    pub fn activate(&mut self, now: Instant) {
        self.tasks.start(now);
        if self.motion.is_reduced() {
            return;
        }
        for counter in &mut self.counters {
            counter.tick_started = (counter.target > 0.0).then_some(now);
        }
    }

    pub fn deactivate(&mut self) {
        self.tasks.cancel();
        for counter in &mut self.counters {
            counter.tick_started = None;
        }
    }

    pub fn is_running(&self) -> bool {
        self.tasks.is_running()
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.counters.iter().any(|c| c.is_ticking(now))
    }

    pub fn tick(&mut self, now: Instant) {
        for task in self.tasks.poll(now) {
            match task {
                HeroTask::SwitchWord => {
                    self.word = (self.word + 1) % self.words.len().max(1);
                }
            }
        }
    }

    /// Pointer tracking is ignored under reduced motion.
    pub fn pointer_moved(&mut self, pointer: Pos2, screen: Rect) {
        if self.motion.is_reduced() {
            return;
        }
        self.deflection = deflection(pointer, screen);
        self.spotlight = Some(spotlight(pointer, screen));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(to: f64) -> CounterSpec {
        CounterSpec {
            label: "x".into(),
            to,
            prefix: "$".into(),
        }
    }

    fn words() -> Vec<String> {
        vec!["installs".into(), "reviews".into()]
    }

    fn screen() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(200.0, 100.0))
    }

    #[test]
    fn test_counter_starts_at_target_and_overshoots() {
        let t0 = Instant::now();
        let mut widget = HeroWidget::new(&[counter(100.0)], &[], &[], MotionMode::Full);
        assert_eq!(widget.counters()[0].value_at(t0), 100, "no zero flash before activation");

        widget.activate(t0);
        let c = &widget.counters()[0];
        assert_eq!(c.value_at(t0), 100);
        assert_eq!(c.value_at(t0 + Duration::from_millis(350)), 102);
        assert_eq!(c.value_at(t0 + Duration::from_millis(699)), 103);
        assert_eq!(c.text_at(t0 + COUNTER_TICK), "$100");
        assert!(!c.is_ticking(t0 + COUNTER_TICK));
    }

    #[test]
    fn test_counter_without_tick() {
        let t0 = Instant::now();
        let mut zero = HeroWidget::new(&[counter(0.0)], &[], &[], MotionMode::Full);
        zero.activate(t0);
        assert!(!zero.is_animating(t0));

        let mut reduced = HeroWidget::new(&[counter(33.0)], &[], &[], MotionMode::Reduced);
        reduced.activate(t0);
        assert!(!reduced.is_animating(t0));
        assert_eq!(reduced.counters()[0].text_at(t0), "$33");
    }

    #[test]
    fn test_word_switcher() {
        let t0 = Instant::now();
        let mut widget = HeroWidget::new(&[], &words(), &[], MotionMode::Full);
        assert_eq!(widget.word(), Some("installs"));
        widget.activate(t0);
        widget.tick(t0 + SWITCH_PERIOD);
        assert_eq!(widget.word(), Some("reviews"));
        widget.tick(t0 + SWITCH_PERIOD * 2);
        assert_eq!(widget.word(), Some("installs"));

        widget.deactivate();
        widget.tick(t0 + SWITCH_PERIOD * 3);
        assert_eq!(widget.word(), Some("installs"));
    }

    #[test]
    fn test_parallax_and_spotlight() {
        let lines = [ParallaxLine {
            text: "Own".into(),
            factor: 0.5,
        }];
        let mut widget = HeroWidget::new(&[], &[], &lines, MotionMode::Full);
        widget.pointer_moved(Pos2::new(200.0, 0.0), screen());
        let (_, offset) = widget.parallax_lines().next().unwrap();
        assert_eq!(offset, Vec2::new(5.0, -5.0));
        assert_eq!(widget.spotlight(), Some(Vec2::new(100.0, 0.0)));

        widget.pointer_moved(Pos2::new(100.0, 50.0), screen());
        let (_, offset) = widget.parallax_lines().next().unwrap();
        assert_eq!(offset, Vec2::ZERO);
    }

    #[test]
    fn test_reduced_motion_ignores_pointer() {
        let lines = [ParallaxLine {
            text: "Own".into(),
            factor: 0.3,
        }];
        let mut widget = HeroWidget::new(&[], &[], &lines, MotionMode::Reduced);
        widget.pointer_moved(Pos2::new(0.0, 0.0), screen());
        assert_eq!(widget.spotlight(), None);
        assert_eq!(widget.parallax_lines().next().unwrap().1, Vec2::ZERO);
    }
}
