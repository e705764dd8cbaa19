use std::time::{Duration, Instant};

use crate::navigation::transition::{CubicBezier, MotionMode};

use super::tasks::TaskGroup;

pub const ROTATE_PERIOD: Duration = Duration::from_millis(1600);
pub const FADE_OUT: Duration = Duration::from_millis(140);
pub const FADE_IN: Duration = Duration::from_millis(160);

const EASE_OUT: CubicBezier = CubicBezier::new(0.0, 0.0, 0.58, 1.0);
const EASE_IN: CubicBezier = CubicBezier::new(0.42, 0.0, 1.0, 1.0);

pub const LINES: [&str; 3] = [
    "These are the people.",
    "Let\u{2019}s book the inspection.",
    "They look like the #1 choice.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamTask {
    Rotate,
}

/// The rotating punch line on the team slide.
#[derive(Debug, Clone)]
pub struct TeamWidget {
    line: usize,
    previous: usize,
    swapped_at: Option<Instant>,
    tasks: TaskGroup<TeamTask>,
}

impl TeamWidget {
    pub fn new(motion: MotionMode) -> Self {
        let tasks = if motion.is_reduced() {
            TaskGroup::default()
        } else {
            TaskGroup::default().with(TeamTask::Rotate, ROTATE_PERIOD)
        };
        Self {
            line: 0,
            previous: 0,
            swapped_at: None,
            tasks,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn activate(&mut self, now: Instant) {
        self.tasks.start(now);
    }

    pub fn deactivate(&mut self) {
        self.tasks.cancel();
        self.swapped_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.tasks.is_running()
    }

    pub fn tick(&mut self, now: Instant) {
        for task in self.tasks.poll(now) {
            match task {
                TeamTask::Rotate => {
                    self.previous = self.line;
                    self.line = (self.line + 1) % LINES.len();
                    self.swapped_at = Some(now);
                }
            }
        }
    }

    /// Text to draw and its opacity: the old line fades out, then the new one
    /// fades in.
    pub fn shown(&self, now: Instant) -> (&'static str, f32) {
        let Some(at) = self.swapped_at else {
            return (LINES[self.line], 1.0);
        };
        let elapsed = now.saturating_duration_since(at);
        if elapsed < FADE_OUT {
            let p = elapsed.as_secs_f32() / FADE_OUT.as_secs_f32();
            (LINES[self.previous], 1.0 - EASE_OUT.ease(p))
        } else if elapsed < FADE_OUT + FADE_IN {
            let p = (elapsed - FADE_OUT).as_secs_f32() / FADE_IN.as_secs_f32();
            (LINES[self.line], EASE_IN.ease(p))
        } else {
            (LINES[self.line], 1.0)
        }
    }
}
