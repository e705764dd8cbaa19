use std::time::{Duration, Instant};

/// A repeating timer polled from the frame loop.
///
/// A poll after a long gap fires once, not once per missed period, so a slide
/// that was starved of frames does not replay a burst of ticks.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn start(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next = None;
    }

    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next {
            Some(due) if now >= due => {
                self.next = Some(now + self.period);
                true
            }
            _ => false,
        }
    }
}

/// The timers owned by one widget, keyed by a widget-defined task id.
///
/// The stage starts the group when its slide becomes active and cancels it
/// when the slide is left.
#[derive(Debug, Clone)]
pub struct TaskGroup<K> {
    tasks: Vec<(K, Ticker)>,
}

impl<K> Default for TaskGroup<K> {
    fn default() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<K: Copy + PartialEq> TaskGroup<K> {
    pub fn with(mut self, key: K, period: Duration) -> Self {
        self.tasks.push((key, Ticker::new(period)));
        self
    }

    pub fn start(&mut self, now: Instant) {
        for (_, ticker) in &mut self.tasks {
            ticker.start(now);
        }
    }

    pub fn cancel(&mut self) {
        for (_, ticker) in &mut self.tasks {
            ticker.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.tasks.iter().any(|(_, t)| t.is_running())
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks that are due, in registration order.
    pub fn poll(&mut self, now: Instant) -> Vec<K> {
        self.tasks
            .iter_mut()
            .filter_map(|(key, ticker)| ticker.poll(now).then_some(*key))
            .collect()
    }
}
