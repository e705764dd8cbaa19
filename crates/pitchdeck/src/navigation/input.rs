use std::time::{Duration, Instant};

use eframe::egui::Pos2;

use super::transition::Direction;

/// Minimum horizontal travel for a press/release pair to count as a swipe.
pub const SWIPE_MIN_DISTANCE: f32 = 40.0;
/// A swipe must be completed within this window.
pub const SWIPE_MAX_DURATION: Duration = Duration::from_millis(800);

/// A navigation request, normalised from any input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    First,
    Last,
    GoTo(usize),
    ToggleNotes,
}

/// Keys the deck reacts to, independent of the windowing toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckKey {
    ArrowRight,
    ArrowLeft,
    PageDown,
    PageUp,
    Space,
    Home,
    End,
    Notes,
}

impl DeckKey {
    pub const ALL: [DeckKey; 8] = [
        DeckKey::ArrowRight,
        DeckKey::ArrowLeft,
        DeckKey::PageDown,
        DeckKey::PageUp,
        DeckKey::Space,
        DeckKey::Home,
        DeckKey::End,
        DeckKey::Notes,
    ];

    pub fn egui_key(self) -> eframe::egui::Key {
        use eframe::egui::Key;
        match self {
            DeckKey::ArrowRight => Key::ArrowRight,
            DeckKey::ArrowLeft => Key::ArrowLeft,
            DeckKey::PageDown => Key::PageDown,
            DeckKey::PageUp => Key::PageUp,
            DeckKey::Space => Key::Space,
            DeckKey::Home => Key::Home,
            DeckKey::End => Key::End,
            DeckKey::Notes => Key::N,
        }
    }
}

/// Map a key press to a command. Keys typed into a form control never
/// navigate.
pub fn command_for_key(key: DeckKey, focus_in_form: bool) -> Option<Command> {
    if focus_in_form {
        return None;
    }
    let command = match key {
        DeckKey::ArrowRight | DeckKey::PageDown | DeckKey::Space => Command::Next,
        DeckKey::ArrowLeft | DeckKey::PageUp => Command::Previous,
        DeckKey::Home => Command::First,
        DeckKey::End => Command::Last,
        DeckKey::Notes => Command::ToggleNotes,
    };
    Some(command)
}

/// What a primary click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Empty slide area: advances the deck.
    Background,
    /// A control owned by a widget (button, input, link).
    Interactive,
    /// One of the fixed previous/next controls.
    NavButton(Direction),
}

impl ClickTarget {
    /// Classify this frame's primary click. The nav controls win, then the
    /// bare slide surface; a click neither of them claimed hit a widget
    /// control painted over the background.
    pub fn resolve(
        nav: Option<ClickTarget>,
        background_clicked: bool,
        pointer_clicked: bool,
    ) -> Option<ClickTarget> {
        if nav.is_some() {
            return nav;
        }
        if background_clicked {
            return Some(ClickTarget::Background);
        }
        pointer_clicked.then_some(ClickTarget::Interactive)
    }
}

pub fn command_for_click(target: ClickTarget) -> Option<Command> {
    match target {
        ClickTarget::Background => Some(Command::Next),
        ClickTarget::Interactive => None,
        ClickTarget::NavButton(Direction::Forward) => Some(Command::Next),
        ClickTarget::NavButton(Direction::Backward) => Some(Command::Previous),
    }
}

/// Turns a press/release pair into a swipe.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    origin: Option<(Pos2, Instant)>,
}

impl SwipeTracker {
    pub fn press(&mut self, pos: Pos2, now: Instant) {
        self.origin = Some((pos, now));
    }

    /// Finish the gesture. Leftward travel advances, rightward goes back.
    pub fn release(&mut self, pos: Pos2, now: Instant) -> Option<Command> {
        let (start, t0) = self.origin.take()?;
        let dx = pos.x - start.x;
        let dy = pos.y - start.y;
        let elapsed = now.saturating_duration_since(t0);

        let is_swipe = dx.abs() > SWIPE_MIN_DISTANCE
            && dx.abs() > dy.abs()
            && elapsed < SWIPE_MAX_DURATION;
        if !is_swipe {
            return None;
        }
        Some(if dx < 0.0 {
            Command::Next
        } else {
            Command::Previous
        })
    }

    pub fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }
}
