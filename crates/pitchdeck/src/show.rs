//! The running deck: navigation plus per-slide runtime.
//!
//! Every accepted move ends in exactly one arrival. On arrival the outgoing
//! slide is deactivated and the incoming one revealed.

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::deck::{Deck, Slide};
use crate::navigation::input::Command;
use crate::navigation::location::Location;
use crate::navigation::transition::{Animator, TransitionEngine, TransitionFrame};
use crate::navigation::{Arrival, Navigator};
use crate::session::{KeyValueStore, Session};
use crate::stage::{SlideRuntime, Stage};
use crate::widgets::WidgetContext;

pub struct Show<S, A> {
    navigator: Navigator<S, A>,
    stage: Stage,
    rng: StdRng,
}

impl<S: KeyValueStore, A: Animator> Show<S, A> {
    pub fn new(
        deck: Deck,
        session: Session<S>,
        location: Location,
        animator: A,
        ctx: WidgetContext,
        now: Instant,
    ) -> Self {
        Self::with_rng(deck, session, location, animator, ctx, now, StdRng::from_entropy())
    }

    pub fn with_rng(
        deck: Deck,
        session: Session<S>,
        location: Location,
        animator: A,
        ctx: WidgetContext,
        now: Instant,
        mut rng: StdRng,
    ) -> Self {
        let engine = TransitionEngine::new(animator, ctx.motion);
        let navigator = Navigator::new(deck.titles(), session, location, engine);
        let mut stage = Stage::new(deck, ctx);
        stage.reveal(navigator.current(), now, &mut rng);
        Self {
            navigator,
            stage,
            rng,
        }
    }

    pub fn navigator(&self) -> &Navigator<S, A> {
        &self.navigator
    }

    #[cfg(test)]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn deck(&self) -> &Deck {
        self.stage.deck()
    }

    pub fn current(&self) -> usize {
        self.navigator.current()
    }

    pub fn frame(&self, now: Instant) -> Option<TransitionFrame> {
        self.navigator.frame(now)
    }

    pub fn slide_mut(&mut self, index: usize) -> Option<(&Slide, &mut SlideRuntime)> {
        self.stage.slide_mut(index)
    }

    pub fn apply(&mut self, command: Command, now: Instant) -> Option<Arrival> {
        let arrival = self.navigator.apply(command, now);
        self.arrive(arrival, now)
    }

    pub fn visit(&mut self, index: usize, now: Instant) -> Option<Arrival> {
        let arrival = self.navigator.visit(index, now);
        self.arrive(arrival, now)
    }

    pub fn history_back(&mut self, now: Instant) -> Option<Arrival> {
        let arrival = self.navigator.history_back(now);
        self.arrive(arrival, now)
    }

    pub fn history_forward(&mut self, now: Instant) -> Option<Arrival> {
        let arrival = self.navigator.history_forward(now);
        self.arrive(arrival, now)
    }

    /// Once per frame: settle a finished transition, then run widget timers.
    pub fn update(&mut self, now: Instant) -> Option<Arrival> {
        let settled = self.navigator.poll(now);
        let arrival = self.arrive(settled, now);
        self.stage.tick(now, &mut self.rng);
        arrival
    }

    /// Close an overlay on the current slide. Never navigates.
    pub fn dismiss_overlays(&mut self) -> bool {
        self.stage.dismiss_overlays()
    }

    pub fn needs_repaint(&self, now: Instant) -> bool {
        self.navigator.is_animating() || self.stage.needs_repaint(now)
    }

    fn arrive(&mut self, arrival: Option<Arrival>, now: Instant) -> Option<Arrival> {
        let arrival = arrival?;
        self.stage.deactivate(arrival.from);
        self.stage.reveal(arrival.to, now, &mut self.rng);
        Some(arrival)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::SlideRole;
    use crate::navigation::transition::tests::StalledAnimator;
    use crate::navigation::transition::{CompletionSource, MotionMode, DURATION, FrameAnimator, WATCHDOG_GRACE};
    use crate::session::MemoryStore;
    use crate::widgets::Widget;

    fn show<A: Animator>(animator: A, motion: MotionMode, t0: Instant) -> Show<MemoryStore, A> {
        Show::with_rng(
            Deck::builtin().unwrap(),
            Session::new(MemoryStore::new()),
            Location::default(),
            animator,
            WidgetContext {
                motion,
                ..WidgetContext::default()
            },
            t0,
            StdRng::seed_from_u64(11),
        )
    }

    fn index_of<S: KeyValueStore, A: Animator>(show: &Show<S, A>, role: SlideRole) -> usize {
        show.deck().slides.iter().position(|s| s.role == role).unwrap() + 1
    }

    #[test]
    fn test_initial_slide_is_revealed() {
        let t0 = Instant::now();
        let show = show(FrameAnimator::default(), MotionMode::Full, t0);
        assert_eq!(show.current(), 1);
        let rt = show.stage().runtime(1).unwrap();
        assert!(rt.active && rt.initialized);
        assert!(matches!(rt.widget, Some(Widget::Hero(_))));
    }

    #[test]
    fn test_arrival_swaps_active_slide() {
        let t0 = Instant::now();
        let mut show = show(FrameAnimator::default(), MotionMode::Full, t0);
        assert!(show.apply(Command::Next, t0).is_none(), "transition is in flight");
        assert!(show.stage().runtime(1).unwrap().active);
        assert!(!show.stage().runtime(2).unwrap().initialized);

        let arrival = show.update(t0 + DURATION).unwrap();
        assert_eq!((arrival.from, arrival.to), (1, 2));
        assert_eq!(arrival.source, CompletionSource::Finished);
        assert!(!show.stage().runtime(1).unwrap().active);
        assert!(show.stage().runtime(2).unwrap().active);
        assert!(show.stage().runtime(2).unwrap().initialized);
        assert!(show.update(t0 + DURATION * 3).is_none(), "arrival fires once");
    }

    #[test]
    fn test_watchdog_arrival_reveals() {
        let t0 = Instant::now();
        let mut show = show(StalledAnimator::default(), MotionMode::Full, t0);
        show.apply(Command::Last, t0);
        assert!(show.update(t0 + DURATION).is_none());

        let arrival = show.update(t0 + DURATION + WATCHDOG_GRACE).unwrap();
        assert_eq!(arrival.source, CompletionSource::Watchdog);
        assert_eq!(show.current(), show.deck().len());
        assert!(show.stage().runtime(show.deck().len()).unwrap().active);
    }

    #[test]
    fn test_leaving_a_slide_cancels_its_tasks() {
        let t0 = Instant::now();
        let mut show = show(FrameAnimator::default(), MotionMode::Reduced, t0);
        let team = index_of(&show, SlideRole::Team);

        let arrival = show.visit(team, t0).unwrap();
        assert_eq!(arrival.to, team);
        assert_eq!(arrival.source, CompletionSource::Immediate);

        // Reduced motion: the team rotation never runs.
        let rt = show.stage().runtime(team).unwrap();
        assert!(!rt.widget.as_ref().unwrap().has_running_tasks());

        let intake = index_of(&show, SlideRole::Intake);
        show.visit(intake, t0).unwrap();
        assert!(show.stage().runtime(intake).unwrap().widget.as_ref().unwrap().has_running_tasks());

        show.history_back(t0).unwrap();
        assert_eq!(show.current(), team);
        let rt = show.stage().runtime(intake).unwrap();
        assert!(!rt.active);
        assert!(!rt.widget.as_ref().unwrap().has_running_tasks());

        show.history_forward(t0).unwrap();
        assert_eq!(show.current(), intake);
    }

    #[test]
    fn test_escape_closes_lightbox_without_navigating() {
        let t0 = Instant::now();
        let mut show = show(FrameAnimator::default(), MotionMode::Reduced, t0);
        let proof = index_of(&show, SlideRole::Proof);
        show.visit(proof, t0).unwrap();

        let (_, runtime) = show.slide_mut(proof).unwrap();
        let Some(Widget::Proof(widget)) = runtime.widget.as_mut() else {
            panic!("proof slide has a proof widget");
        };
        widget.open_lightbox();
        assert!(show.dismiss_overlays());
        assert!(!show.dismiss_overlays());
        assert_eq!(show.current(), proof);
    }

    #[test]
    fn test_needs_repaint_while_animating() {
        let t0 = Instant::now();
        let mut show = show(FrameAnimator::default(), MotionMode::Full, t0);
        show.apply(Command::Next, t0);
        assert!(show.needs_repaint(t0));
        assert!(show.frame(t0).is_some());
    }
}
