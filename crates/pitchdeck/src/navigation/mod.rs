pub mod input;
pub mod location;
pub mod transition;

use std::time::Instant;

use crate::session::{KeyValueStore, Session};

use input::Command;
use location::{Location, fragment_for};
use transition::{
    Animator, CompletionSource, Direction, Settled, TransitionEngine, TransitionFrame,
};

/// The deck position. `current` is 1-based; `animating` rejects every
/// request while a transition is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub current: usize,
    pub animating: bool,
}

/// A completed navigation, reported once per accepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    pub from: usize,
    pub to: usize,
    pub source: CompletionSource,
}

/// Pick the starting slide: a valid fragment beats the stored index, and
/// anything malformed or out of range falls back to the first slide.
pub fn resolve_initial_index(location: &Location, stored: Option<usize>, len: usize) -> usize {
    let in_range = |n: &usize| (1..=len).contains(n);
    location
        .slide()
        .filter(in_range)
        .or(stored.filter(in_range))
        .unwrap_or(1)
}

/// Owns the current slide and mediates every input source into transitions.
pub struct Navigator<S, A> {
    state: NavigationState,
    titles: Vec<String>,
    engine: TransitionEngine<A>,
    session: Session<S>,
    location: Location,
    notes_visible: bool,
    live_region: String,
}

impl<S: KeyValueStore, A: Animator> Navigator<S, A> {
    /// `titles` holds one entry per slide; an empty title reads as "Slide N".
    pub fn new(
        titles: Vec<String>,
        session: Session<S>,
        location: Location,
        engine: TransitionEngine<A>,
    ) -> Self {
        debug_assert!(!titles.is_empty(), "a deck needs at least one slide");
        let current = resolve_initial_index(&location, session.slide_index(), titles.len());
        let notes_visible = session.notes_visible();

        let mut navigator = Self {
            state: NavigationState {
                current,
                animating: false,
            },
            titles,
            engine,
            session,
            location,
            notes_visible,
            live_region: String::new(),
        };
        navigator.sync();
        tracing::debug!(slide = current, "navigator ready");
        navigator
    }

    #[cfg(test)]
    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn current(&self) -> usize {
        self.state.current
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_animating(&self) -> bool {
        self.state.animating
    }

    pub fn notes_visible(&self) -> bool {
        self.notes_visible
    }

    #[cfg(test)]
    pub fn location(&self) -> &Location {
        &self.location
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn title(&self, index: usize) -> String {
        self.titles
            .get(index.wrapping_sub(1))
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Slide {index}"))
    }

    /// Progress bar fill in percent.
    pub fn progress_percent(&self) -> f32 {
        let len = self.len();
        if len <= 1 {
            return 100.0;
        }
        (self.state.current - 1) as f32 / (len - 1) as f32 * 100.0
    }

    pub fn counter_text(&self) -> String {
        format!("{}/{}", self.state.current, self.len())
    }

    /// Text announced to assistive technology after each move.
    pub fn live_region(&self) -> &str {
        &self.live_region
    }

    /// Request a move. Invalid or mid-transition requests are dropped.
    /// Returns the arrival if the transition settled immediately.
    pub fn go_to(&mut self, target: usize, direction: Direction, now: Instant) -> Option<Arrival> {
        let current = self.state.current;
        if self.state.animating || target == current || target < 1 || target > self.len() {
            tracing::debug!(
                target,
                current,
                animating = self.state.animating,
                "navigation request ignored"
            );
            return None;
        }

        self.state.animating = true;
        self.engine
            .animate(current, target, direction, now)
            .map(|settled| self.complete(settled))
    }

    /// Drive the transition engine; returns the arrival once it settles.
    pub fn poll(&mut self, now: Instant) -> Option<Arrival> {
        let settled = self.engine.poll(now)?;
        Some(self.complete(settled))
    }

    pub fn frame(&self, now: Instant) -> Option<TransitionFrame> {
        self.engine.frame(now)
    }

    pub fn apply(&mut self, command: Command, now: Instant) -> Option<Arrival> {
        let current = self.state.current;
        match command {
            Command::Next => self.go_to(current + 1, Direction::Forward, now),
            Command::Previous => self.go_to(current.saturating_sub(1), Direction::Backward, now),
            Command::First => self.go_to(1, Direction::Backward, now),
            Command::Last => self.go_to(self.len(), Direction::Forward, now),
            // Typed jumps become history entries so Back returns to the origin.
            Command::GoTo(n) if (1..=self.len()).contains(&n) => self.visit(n, now),
            Command::GoTo(_) => None,
            Command::ToggleNotes => {
                self.toggle_notes();
                None
            }
        }
    }

    pub fn toggle_notes(&mut self) -> bool {
        self.notes_visible = !self.notes_visible;
        self.session.save_notes_visible(self.notes_visible);
        self.notes_visible
    }

    /// React to an external fragment change (history move or typed route).
    pub fn hash_changed(&mut self, now: Instant) -> Option<Arrival> {
        let target = self.location.slide()?;
        if target == self.state.current {
            return None;
        }
        self.go_to(target, Direction::between(self.state.current, target), now)
    }

    /// Navigate by pushing a new fragment, the way a typed deep link would.
    pub fn visit(&mut self, index: usize, now: Instant) -> Option<Arrival> {
        if !self.location.assign(&fragment_for(index)) {
            return None;
        }
        self.hash_changed(now)
    }

    pub fn history_back(&mut self, now: Instant) -> Option<Arrival> {
        if !self.location.back() {
            return None;
        }
        self.hash_changed(now)
    }

    pub fn history_forward(&mut self, now: Instant) -> Option<Arrival> {
        if !self.location.forward() {
            return None;
        }
        self.hash_changed(now)
    }

    fn complete(&mut self, settled: Settled) -> Arrival {
        self.state.current = settled.to;
        self.state.animating = false;
        self.sync();
        tracing::info!(
            slide = settled.to,
            of = self.len(),
            via = ?settled.source,
            "{}",
            self.live_region
        );
        Arrival {
            from: settled.from,
            to: settled.to,
            source: settled.source,
        }
    }

    /// Bring the live region, fragment and stored index in line with `current`.
    fn sync(&mut self) {
        let index = self.state.current;
        self.live_region = format!(
            "Slide {index} of {}: {}",
            self.len(),
            self.title(index)
        );
        let fragment = fragment_for(index);
        if self.location.hash() != fragment {
            self.location.replace(&fragment);
        }
        self.session.save_slide_index(index);
    }
}
