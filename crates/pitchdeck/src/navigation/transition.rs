use std::time::{Duration, Instant};

/// Length of the slide-to-slide animation.
pub const DURATION: Duration = Duration::from_millis(360);
/// Extra time the watchdog grants the finish event before forcing completion.
pub const WATCHDOG_GRACE: Duration = Duration::from_millis(240);
/// Horizontal travel of a transitioning slide, in percent of the slide width.
pub const OFFSET_PERCENT: f32 = 6.0;
/// Scale of a slide at the far end of its travel.
pub const EDGE_SCALE: f32 = 0.98;

/// `cubic-bezier(.2,.8,.2,1)`: quick start, long soft landing.
pub const EASE_OUT_SOFT: CubicBezier = CubicBezier::new(0.2, 0.8, 0.2, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }

    /// Direction of travel from `from` to `to`; equal indices count as forward.
    pub fn between(from: usize, to: usize) -> Self {
        if to < from {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionMode {
    #[default]
    Full,
    Reduced,
}

impl MotionMode {
    pub fn from_reduced(reduced: bool) -> Self {
        if reduced {
            MotionMode::Reduced
        } else {
            MotionMode::Full
        }
    }

    pub fn is_reduced(self) -> bool {
        self == MotionMode::Reduced
    }
}

/// A CSS-style cubic Bézier timing function with endpoints (0,0) and (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezier {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn coord(t: f32, p1: f32, p2: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    fn coord_slope(t: f32, p1: f32, p2: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    }

    /// Eased progress for linear progress `x` in `[0, 1]`.
    pub fn ease(&self, x: f32) -> f32 {
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }

        // Newton's method first, bisection if the slope is too flat.
        let mut t = x;
        for _ in 0..8 {
            let err = Self::coord(t, self.x1, self.x2) - x;
            if err.abs() < 1e-5 {
                return Self::coord(t, self.y1, self.y2);
            }
            let slope = Self::coord_slope(t, self.x1, self.x2);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= err / slope;
        }

        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        t = x;
        for _ in 0..32 {
            let cx = Self::coord(t, self.x1, self.x2);
            if (cx - x).abs() < 1e-5 {
                break;
            }
            if cx < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        Self::coord(t, self.y1, self.y2)
    }
}

/// Which trigger settled a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionSource {
    /// The incoming slide's animation reported that it finished.
    Finished,
    /// The fallback timer fired before the finish event arrived.
    Watchdog,
    /// No animation ran (reduced motion or no animator).
    Immediate,
}

/// One-shot settlement: only the first `settle` call wins.
#[derive(Debug, Clone, Default)]
pub struct Completion {
    settled: Option<CompletionSource>,
}

impl Completion {
    pub fn settle(&mut self, source: CompletionSource) -> bool {
        if self.settled.is_some() {
            return false;
        }
        self.settled = Some(source);
        true
    }

    pub fn source(&self) -> Option<CompletionSource> {
        self.settled
    }
}

/// Outgoing/incoming pair handed to an [`Animator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionTrack {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
    pub duration: Duration,
}

/// Plays the paired slide animation and reports the incoming half's finish
/// event.
pub trait Animator {
    /// Start the pair. Returns `false` when animation is unavailable, in
    /// which case the engine completes straight away.
    fn play(&mut self, track: &TransitionTrack, now: Instant) -> bool;

    /// Whether the incoming animation has signalled that it finished.
    fn finished(&mut self, now: Instant) -> bool;
}

/// Frame-clock animator used by the presenter: the animation finishes once
/// its duration has elapsed on the frame clock.
#[derive(Debug, Clone, Default)]
pub struct FrameAnimator {
    ends_at: Option<Instant>,
}

impl Animator for FrameAnimator {
    fn play(&mut self, track: &TransitionTrack, now: Instant) -> bool {
        self.ends_at = Some(now + track.duration);
        true
    }

    fn finished(&mut self, now: Instant) -> bool {
        match self.ends_at {
            Some(end) if now >= end => {
                self.ends_at = None;
                true
            }
            _ => false,
        }
    }
}

/// Snapshot of the two slides mid-transition, for painting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFrame {
    pub from: usize,
    pub to: usize,
    pub outgoing: SlidePose,
    pub incoming: SlidePose,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlidePose {
    pub opacity: f32,
    /// Horizontal offset in percent of the slide width.
    pub offset_percent: f32,
    pub scale: f32,
}

impl SlidePose {
    pub const REST: SlidePose = SlidePose {
        opacity: 1.0,
        offset_percent: 0.0,
        scale: 1.0,
    };
}

/// A finished transition: the completion action has to run for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    pub from: usize,
    pub to: usize,
    pub source: CompletionSource,
}

#[derive(Debug)]
struct InFlight {
    track: TransitionTrack,
    started: Instant,
    watchdog_at: Instant,
    completion: Completion,
}

pub struct TransitionEngine<A> {
    animator: A,
    motion: MotionMode,
    in_flight: Option<InFlight>,
}

impl<A: Animator> TransitionEngine<A> {
    pub fn new(animator: A, motion: MotionMode) -> Self {
        Self {
            animator,
            motion,
            in_flight: None,
        }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start a transition. Returns `Some` when it settled on the spot.
    pub fn animate(
        &mut self,
        from: usize,
        to: usize,
        direction: Direction,
        now: Instant,
    ) -> Option<Settled> {
        let track = TransitionTrack {
            from,
            to,
            direction,
            duration: DURATION,
        };

        if self.motion.is_reduced() || !self.animator.play(&track, now) {
            return Some(Settled {
                from,
                to,
                source: CompletionSource::Immediate,
            });
        }

        self.in_flight = Some(InFlight {
            track,
            started: now,
            watchdog_at: now + DURATION + WATCHDOG_GRACE,
            completion: Completion::default(),
        });
        None
    }

    /// Check both completion triggers. The finish event wins a tie.
    pub fn poll(&mut self, now: Instant) -> Option<Settled> {
        let flight = self.in_flight.as_mut()?;

        let mut settled = false;
        if self.animator.finished(now) {
            settled |= flight.completion.settle(CompletionSource::Finished);
        }
        if now >= flight.watchdog_at {
            settled |= flight.completion.settle(CompletionSource::Watchdog);
        }
        if !settled {
            return None;
        }

        let flight = self.in_flight.take()?;
        let source = flight.completion.source()?;
        if source == CompletionSource::Watchdog {
            tracing::debug!(
                from = flight.track.from,
                to = flight.track.to,
                "transition finish event missing; watchdog completed it"
            );
        }
        Some(Settled {
            from: flight.track.from,
            to: flight.track.to,
            source,
        })
    }

    #[cfg(test)]
    /// The deadline by which the current transition is guaranteed to settle.
    pub fn deadline(&self) -> Option<Instant> {
        self.in_flight.as_ref().map(|f| f.watchdog_at)
    }

    pub fn frame(&self, now: Instant) -> Option<TransitionFrame> {
        let flight = self.in_flight.as_ref()?;
        let elapsed = now.saturating_duration_since(flight.started).as_secs_f32();
        let raw = (elapsed / flight.track.duration.as_secs_f32()).clamp(0.0, 1.0);
        let p = EASE_OUT_SOFT.ease(raw);

        // Forward: the old slide leaves to the left, the new one enters from the right.
        let off = -flight.track.direction.sign() * OFFSET_PERCENT;
        let outgoing = SlidePose {
            opacity: 1.0 - p,
            offset_percent: off * p,
            scale: 1.0 - (1.0 - EDGE_SCALE) * p,
        };
        let incoming = SlidePose {
            opacity: p,
            offset_percent: -off * (1.0 - p),
            scale: EDGE_SCALE + (1.0 - EDGE_SCALE) * p,
        };
        Some(TransitionFrame {
            from: flight.track.from,
            to: flight.track.to,
            outgoing,
            incoming,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// An animator whose finish event never arrives.
    #[derive(Default)]
    pub(crate) struct StalledAnimator {
        pub plays: usize,
    }

    impl Animator for StalledAnimator {
        fn play(&mut self, _track: &TransitionTrack, _now: Instant) -> bool {
            self.plays += 1;
            true
        }

        fn finished(&mut self, _now: Instant) -> bool {
            false
        }
    }

    /// No animation capability at all.
    pub(crate) struct NoAnimator;

    impl Animator for NoAnimator {
        fn play(&mut self, _track: &TransitionTrack, _now: Instant) -> bool {
            false
        }

        fn finished(&mut self, _now: Instant) -> bool {
            false
        }
    }

    /// Reports finished on every poll once started, even after settlement.
    #[derive(Default)]
    struct ChattyAnimator {
        started: bool,
    }

    impl Animator for ChattyAnimator {
        fn play(&mut self, _track: &TransitionTrack, _now: Instant) -> bool {
            self.started = true;
            true
        }

        fn finished(&mut self, _now: Instant) -> bool {
            self.started
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_completion_settles_once() {
        let mut c = Completion::default();
        assert!(c.settle(CompletionSource::Finished));
        assert!(!c.settle(CompletionSource::Watchdog));
        assert_eq!(c.source(), Some(CompletionSource::Finished));
    }

    #[test]
    fn test_frame_animator_finishes_after_duration() {
        let t0 = Instant::now();
        let mut engine = TransitionEngine::new(FrameAnimator::default(), MotionMode::Full);
        assert_eq!(engine.animate(1, 2, Direction::Forward, t0), None);
        assert!(engine.is_running());
        assert_eq!(engine.poll(t0 + ms(200)), None);

        let settled = engine.poll(t0 + DURATION).unwrap();
        assert_eq!(settled.source, CompletionSource::Finished);
        assert_eq!((settled.from, settled.to), (1, 2));
        assert!(!engine.is_running());

        // The watchdog deadline passing later must not produce a second completion.
        assert_eq!(engine.poll(t0 + ms(700)), None);
    }

    #[test]
    fn test_watchdog_completes_stalled_animation_exactly_once() {
        let t0 = Instant::now();
        let mut engine = TransitionEngine::new(StalledAnimator::default(), MotionMode::Full);
        engine.animate(2, 3, Direction::Forward, t0);
        assert_eq!(engine.deadline(), Some(t0 + ms(600)));

        assert_eq!(engine.poll(t0 + ms(599)), None);
        let settled = engine.poll(t0 + ms(600)).unwrap();
        assert_eq!(settled.source, CompletionSource::Watchdog);

        let mut later = 0;
        for step in 601..800 {
            if engine.poll(t0 + ms(step)).is_some() {
                later += 1;
            }
        }
        assert_eq!(later, 0);
    }

    #[test]
    fn test_finish_event_wins_a_late_poll() {
        let t0 = Instant::now();
        let mut engine = TransitionEngine::new(ChattyAnimator::default(), MotionMode::Full);
        engine.animate(1, 2, Direction::Forward, t0);
        let settled = engine.poll(t0 + ms(900)).unwrap();
        assert_eq!(settled.source, CompletionSource::Finished);
        assert_eq!(engine.poll(t0 + ms(901)), None);
    }

    #[test]
    fn test_reduced_motion_skips_animation() {
        let t0 = Instant::now();
        let mut engine = TransitionEngine::new(StalledAnimator::default(), MotionMode::Reduced);
        let settled = engine.animate(1, 4, Direction::Forward, t0).unwrap();
        assert_eq!(settled.source, CompletionSource::Immediate);
        assert_eq!(engine.animator.plays, 0);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_missing_animator_completes_immediately() {
        let t0 = Instant::now();
        let mut engine = TransitionEngine::new(NoAnimator, MotionMode::Full);
        let settled = engine.animate(3, 1, Direction::Backward, t0).unwrap();
        assert_eq!(settled.source, CompletionSource::Immediate);
        assert_eq!(engine.frame(t0), None);
    }

    #[test]
    fn test_frame_offsets_follow_direction() {
        let t0 = Instant::now();
        let mut engine = TransitionEngine::new(StalledAnimator::default(), MotionMode::Full);
        engine.animate(1, 2, Direction::Forward, t0);

        let start = engine.frame(t0).unwrap();
        assert_eq!(start.outgoing.opacity, 1.0);
        assert_eq!(start.incoming.opacity, 0.0);
        assert_eq!(start.incoming.offset_percent, OFFSET_PERCENT);
        assert!((start.incoming.scale - EDGE_SCALE).abs() < 1e-6);

        let end = engine.frame(t0 + DURATION).unwrap();
        assert_eq!(end.incoming, SlidePose::REST);
        assert_eq!(end.outgoing.offset_percent, -OFFSET_PERCENT);

        let mut back = TransitionEngine::new(StalledAnimator::default(), MotionMode::Full);
        back.animate(2, 1, Direction::Backward, t0);
        let start = back.frame(t0).unwrap();
        assert_eq!(start.incoming.offset_percent, -OFFSET_PERCENT);
    }

    #[test]
    fn test_bezier_endpoints_and_monotonic() {
        assert_eq!(EASE_OUT_SOFT.ease(0.0), 0.0);
        assert_eq!(EASE_OUT_SOFT.ease(1.0), 1.0);
        let mut prev = 0.0;
        for i in 1..=20 {
            let v = EASE_OUT_SOFT.ease(i as f32 / 20.0);
            assert!(v >= prev - 1e-4, "ease not monotonic at step {i}");
            prev = v;
        }
        // Front-loaded curve: more than half done at the midpoint.
        assert!(EASE_OUT_SOFT.ease(0.5) > 0.75);
    }

    #[test]
    fn test_linear_bezier_is_identity() {
        let linear = CubicBezier::new(0.25, 0.25, 0.75, 0.75);
        for i in 0..=10 {
            let x = i as f32 / 10.0;
            assert!((linear.ease(x) - x).abs() < 1e-3);
        }
    }
}
