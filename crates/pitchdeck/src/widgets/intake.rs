use std::f32::consts::PI;
use std::time::{Duration, Instant};

use crate::deck::IntakeOptionSpec;

use super::tasks::TaskGroup;

pub const BASE_SCORE: i32 = 42;
pub const MAX_SCORE: i32 = 99;
/// Radius of the score ring, in points.
pub const RING_RADIUS: f32 = 62.0;
pub const RING_CIRCUMFERENCE: f32 = 2.0 * PI * RING_RADIUS;

pub const DEMO_PERIOD: Duration = Duration::from_millis(2600);
pub const NOTIFY_STEP_DELAY: Duration = Duration::from_millis(300);
/// How long a lead chip takes to cross the lane.
pub const LANE_GLIDE: Duration = Duration::from_millis(1400);

pub const NOTIFY_STEPS: [&str; 3] = [
    "Text to the homeowner",
    "Alert to the sales rep",
    "Appointment on your calendar",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    A,
    B,
    C,
    D,
}

impl Grade {
    pub fn for_score(score: f32) -> Self {
        if score >= 85.0 {
            Grade::A
        } else if score >= 70.0 {
            Grade::B
        } else if score >= 55.0 {
            Grade::C
        } else {
            Grade::D
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::A => "A \u{2014} Inspection\u{2011}ready",
            Grade::B => "B \u{2014} Strong",
            Grade::C => "C \u{2014} Nurture",
            Grade::D => "D \u{2014} Disqualify",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntakeOption {
    pub label: String,
    pub weight: i32,
    pub checked: bool,
}

impl From<&IntakeOptionSpec> for IntakeOption {
    fn from(spec: &IntakeOptionSpec) -> Self {
        Self {
            label: spec.label.clone(),
            weight: spec.weight,
            checked: spec.checked,
        }
    }
}

/// Base score plus the weights of every checked option, capped at 99.
pub fn raw_score(options: &[IntakeOption]) -> i32 {
    let sum = options
        .iter()
        .filter(|o| o.checked)
        .fold(BASE_SCORE, |acc, o| acc.saturating_add(o.weight));
    sum.min(MAX_SCORE)
}

pub fn display_score(raw: i32) -> f32 {
    (raw as f32).clamp(0.0, 100.0)
}

/// Dash offset of the ring's foreground stroke for a displayed score.
pub fn ring_offset(score: f32) -> f32 {
    RING_CIRCUMFERENCE * (1.0 - score / 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeTask {
    Demo,
}

#[derive(Debug, Clone)]
pub struct IntakeWidget {
    options: Vec<IntakeOption>,
    score: f32,
    lane: Vec<Instant>,
    pulse_started: Option<Instant>,
    tasks: TaskGroup<IntakeTask>,
}

impl IntakeWidget {
    pub fn new(options: &[IntakeOptionSpec]) -> Self {
        let options: Vec<IntakeOption> = options.iter().map(IntakeOption::from).collect();
        let score = display_score(raw_score(&options));
        Self {
            options,
            score,
            lane: Vec::new(),
            pulse_started: None,
            tasks: TaskGroup::default().with(IntakeTask::Demo, DEMO_PERIOD),
        }
    }

    pub fn options(&self) -> &[IntakeOption] {
        &self.options
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn grade(&self) -> Grade {
        Grade::for_score(self.score)
    }

    pub fn ring_offset(&self) -> f32 {
        ring_offset(self.score)
    }

    pub fn set_checked(&mut self, index: usize, checked: bool) {
        if let Some(option) = self.options.get_mut(index) {
            option.checked = checked;
            self.score = display_score(raw_score(&self.options));
        }
    }

    #[cfg(test)]
    pub fn toggle(&mut self, index: usize) {
        if let Some(checked) = self.options.get(index).map(|o| o.checked) {
            self.set_checked(index, !checked);
        }
    }

    pub fn activate(&mut self, now: Instant) {
        self.tasks.start(now);
    }

    pub fn deactivate(&mut self) {
        self.tasks.cancel();
        self.lane.clear();
        self.pulse_started = None;
    }

    pub fn is_running(&self) -> bool {
        self.tasks.is_running()
    }

    pub fn tick(&mut self, now: Instant) {
        for task in self.tasks.poll(now) {
            match task {
                IntakeTask::Demo => {
                    self.lane.push(now);
                    self.pulse_started = Some(now);
                }
            }
        }
        self.lane.retain(|started| now.saturating_duration_since(*started) < LANE_GLIDE);
    }

    /// Progress (0..1) of each chip currently crossing the lane.
    pub fn lane_chips(&self, now: Instant) -> Vec<f32> {
        self.lane
            .iter()
            .map(|started| {
                let t = now.saturating_duration_since(*started).as_secs_f32();
                (t / LANE_GLIDE.as_secs_f32()).min(1.0)
            })
            .collect()
    }

    /// Number of notify steps lit by the current pulse.
    pub fn lit_steps(&self, now: Instant) -> usize {
        let Some(start) = self.pulse_started else {
            return 0;
        };
        let elapsed = now.saturating_duration_since(start);
        (0..NOTIFY_STEPS.len())
            .filter(|i| elapsed >= NOTIFY_STEP_DELAY * *i as u32)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(label: &str, weight: i32, checked: bool) -> IntakeOptionSpec {
        IntakeOptionSpec {
            label: label.to_string(),
            weight,
            checked,
        }
    }

    fn closing_options() -> Vec<IntakeOptionSpec> {
        vec![
            spec("territory", 10, true),
            spec("roof", 12, true),
            spec("insurance", 8, true),
            spec("month", 10, false),
            spec("decision", 6, false),
        ]
    }

    #[test]
    fn test_score_and_grade() {
        let widget = IntakeWidget::new(&closing_options());
        assert_eq!(widget.score(), 72.0);
        assert_eq!(widget.grade(), Grade::B);
        assert_eq!(widget.grade().label(), "B \u{2014} Strong");
    }

    #[test]
    fn test_extreme_weights_stay_capped() {
        let option = |weight| IntakeOption {
            label: "huge".into(),
            weight,
            checked: true,
        };
        assert_eq!(raw_score(&[option(i32::MAX)]), MAX_SCORE);
        assert_eq!(raw_score(&[option(i32::MAX), option(i32::MAX)]), MAX_SCORE);
        assert_eq!(display_score(raw_score(&[option(i32::MIN)])), 0.0);
    }

    #[test]
    fn test_toggle_recalculates() {
        let mut widget = IntakeWidget::new(&closing_options());
        widget.toggle(3);
        assert_eq!(widget.score(), 82.0);
        widget.toggle(4);
        assert_eq!(widget.score(), 88.0);
        assert_eq!(widget.grade(), Grade::A);
        widget.toggle(0);
        widget.toggle(1);
        assert_eq!(widget.score(), 66.0);
        assert_eq!(widget.grade(), Grade::C);
        widget.toggle(99);
        assert_eq!(widget.score(), 66.0);
    }

    #[test]
    fn test_score_is_capped_and_clamped() {
        let heavy = [IntakeOption {
            label: "x".into(),
            weight: 500,
            checked: true,
        }];
        assert_eq!(raw_score(&heavy), 99);

        let negative = [IntakeOption {
            label: "x".into(),
            weight: -100,
            checked: true,
        }];
        assert_eq!(raw_score(&negative), -58);
        assert_eq!(display_score(raw_score(&negative)), 0.0);
        assert_eq!(Grade::for_score(0.0), Grade::D);
    }

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(Grade::for_score(85.0), Grade::A);
        assert_eq!(Grade::for_score(84.9), Grade::B);
        assert_eq!(Grade::for_score(70.0), Grade::B);
        assert_eq!(Grade::for_score(55.0), Grade::C);
        assert_eq!(Grade::for_score(54.0), Grade::D);
    }

    #[test]
    fn test_ring_offset() {
        assert_eq!(ring_offset(100.0), 0.0);
        assert!((ring_offset(0.0) - RING_CIRCUMFERENCE).abs() < 1e-4);
        assert!((ring_offset(72.0) - RING_CIRCUMFERENCE * 0.28).abs() < 1e-3);
    }

    #[test]
    fn test_demo_loop_while_active() {
        let t0 = Instant::now();
        let mut widget = IntakeWidget::new(&closing_options());
        widget.tick(t0 + DEMO_PERIOD);
        assert!(widget.lane_chips(t0 + DEMO_PERIOD).is_empty(), "inactive widget must not loop");

        widget.activate(t0);
        let fire = t0 + DEMO_PERIOD;
        widget.tick(fire);
        assert_eq!(widget.lane_chips(fire).len(), 1);
        assert_eq!(widget.lit_steps(fire), 1);
        assert_eq!(widget.lit_steps(fire + NOTIFY_STEP_DELAY), 2);
        assert_eq!(widget.lit_steps(fire + NOTIFY_STEP_DELAY * 2), 3);

        widget.tick(fire + LANE_GLIDE);
        assert!(widget.lane_chips(fire + LANE_GLIDE).is_empty(), "chip expires after its glide");

        widget.deactivate();
        assert!(!widget.is_running());
        assert_eq!(widget.lit_steps(fire), 0);
    }
}
