use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::navigation::transition::MotionMode;

use super::format;
use super::tasks::TaskGroup;

pub const BUMP_PERIOD: Duration = Duration::from_millis(1800);
pub const PRAISE_PERIOD: Duration = Duration::from_millis(1600);
pub const LEAD_PERIOD: Duration = Duration::from_millis(2100);
/// Time a lead chip takes to glide across the track before it is dropped.
pub const LEAD_GLIDE: Duration = Duration::from_millis(2400);
pub const FEED_MAX: usize = 6;

pub const INSTALL_VALUE: u64 = 33_000;
pub const REVENUE_CAP: u64 = 330_000;

const LEADS_BUMP: f64 = 0.4;
const APPTS_BUMP: f64 = 0.35;
const INSTALLS_BUMP: f64 = 0.18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signal {
    pub icon: &'static str,
    pub text: &'static str,
    pub meta: &'static str,
}

pub static SIGNALS: [Signal; 6] = [
    Signal {
        icon: "\u{2b50}",
        text: "New 5\u{2605} Google review posted",
        meta: "GBP",
    },
    Signal {
        icon: "\u{1f4f8}",
        text: "New photo added to Business Profile",
        meta: "+visibility",
    },
    Signal {
        icon: "\u{1f4cd}",
        text: "Ranked in Local Pack for \u{201c}roofer near me\u{201d}",
        meta: "Maps",
    },
    Signal {
        icon: "\u{1f4ac}",
        text: "Q&A answered on your profile",
        meta: "Trust",
    },
    Signal {
        icon: "\u{1f50e}",
        text: "Branded searches up week over week",
        meta: "Search",
    },
    Signal {
        icon: "\u{1f9ed}",
        text: "Directions requests from Maps increased",
        meta: "Maps",
    },
];

const ZIPS: [&str; 10] = [
    "32708", "53211", "80210", "29407", "48009", "97206", "44124", "38117", "34953", "30341",
];
const ROOFS: [&str; 4] = ["Metal", "Architectural", "Tile", "Flat"];
const TIMINGS: [&str; 4] = ["ASAP", "This Week", "Soon", "2\u{2013}3 Days"];

/// A live counter that only climbs up to its cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kpi {
    pub value: u64,
    pub max: u64,
}

impl Kpi {
    pub const fn new(value: u64, max: u64) -> Self {
        Self { value, max }
    }

    fn bump(&mut self, hit: bool) {
        if hit {
            self.value = (self.value + 1).min(self.max);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadChip {
    pub text: String,
    pub started: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofTask {
    Bump,
    Praise,
    Lead,
}

#[derive(Debug, Clone)]
pub struct ProofWidget {
    pub leads: Kpi,
    pub appointments: Kpi,
    pub installs: Kpi,
    revenue: u64,
    feed: VecDeque<Signal>,
    stream: Vec<LeadChip>,
    screenshot: Option<PathBuf>,
    lightbox_open: bool,
    tasks: TaskGroup<ProofTask>,
}

impl ProofWidget {
    /// Under reduced motion nothing loops; the feed gets two seeded signals.
    pub fn new<R: Rng + ?Sized>(
        screenshot: Option<PathBuf>,
        motion: MotionMode,
        rng: &mut R,
    ) -> Self {
        let installs = Kpi::new(7, 12);
        let tasks = if motion.is_reduced() {
            TaskGroup::default()
        } else {
            TaskGroup::default()
                .with(ProofTask::Bump, BUMP_PERIOD)
                .with(ProofTask::Praise, PRAISE_PERIOD)
                .with(ProofTask::Lead, LEAD_PERIOD)
        };
        let mut widget = Self {
            leads: Kpi::new(38, 62),
            appointments: Kpi::new(24, 41),
            installs,
            revenue: installs.value * INSTALL_VALUE,
            feed: VecDeque::with_capacity(FEED_MAX + 1),
            stream: Vec::new(),
            screenshot,
            lightbox_open: false,
            tasks,
        };
        if motion.is_reduced() {
            widget.push_signal(rng);
            widget.push_signal(rng);
        }
        widget
    }

    pub fn revenue(&self) -> u64 {
        self.revenue
    }

    pub fn kpi_texts(&self) -> [(&'static str, String); 4] {
        [
            ("Qualified leads (30d)", format::group_thousands(self.leads.value)),
            ("Appointments", format::group_thousands(self.appointments.value)),
            ("Installs", format::group_thousands(self.installs.value)),
            ("Revenue", format::currency(self.revenue as f64)),
        ]
    }

    /// Newest first.
    pub fn feed(&self) -> impl Iterator<Item = &Signal> {
        self.feed.iter()
    }

    pub fn stream(&self) -> &[LeadChip] {
        &self.stream
    }

    pub fn chip_progress(chip: &LeadChip, now: Instant) -> f32 {
        let t = now.saturating_duration_since(chip.started).as_secs_f32();
        (t / LEAD_GLIDE.as_secs_f32()).min(1.0)
    }

    pub fn bump<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.leads.bump(rng.gen_bool(LEADS_BUMP));
        self.appointments.bump(rng.gen_bool(APPTS_BUMP));
        self.installs.bump(rng.gen_bool(INSTALLS_BUMP));
        self.revenue = (self.installs.value * INSTALL_VALUE).min(REVENUE_CAP);
    }

    pub fn push_signal<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Some(signal) = SIGNALS.choose(rng) {
            self.feed.push_front(*signal);
            self.feed.truncate(FEED_MAX);
        }
    }

    pub fn push_lead<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) {
        let pick = |list: &[&'static str], rng: &mut R| list.choose(rng).copied().unwrap_or_default();
        let zip = pick(&ZIPS, &mut *rng);
        let roof = pick(&ROOFS, &mut *rng);
        let timing = pick(&TIMINGS, &mut *rng);
        self.stream.push(LeadChip {
            text: format!("New Inspection \u{2022} {zip} \u{2022} {roof} \u{2022} {timing}"),
            started: now,
        });
    }

    pub fn screenshot(&self) -> Option<&PathBuf> {
        self.screenshot.as_ref()
    }

    pub fn lightbox_open(&self) -> bool {
        self.lightbox_open
    }

    pub fn open_lightbox(&mut self) {
        if self.screenshot.is_some() {
            self.lightbox_open = true;
        }
    }

    /// Returns whether anything was closed.
    pub fn close_lightbox(&mut self) -> bool {
        std::mem::replace(&mut self.lightbox_open, false)
    }

    pub fn activate(&mut self, now: Instant) {
        self.tasks.start(now);
    }

    pub fn deactivate(&mut self) {
        self.tasks.cancel();
        self.stream.clear();
        self.lightbox_open = false;
    }

    pub fn is_running(&self) -> bool {
        self.tasks.is_running()
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) {
        for task in self.tasks.poll(now) {
            match task {
                ProofTask::Bump => self.bump(rng),
                ProofTask::Praise => self.push_signal(rng),
                ProofTask::Lead => self.push_lead(rng, now),
            }
        }
        self.stream
            .retain(|chip| now.saturating_duration_since(chip.started) < LEAD_GLIDE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_initial_kpis() {
        let widget = ProofWidget::new(None, MotionMode::Full, &mut rng());
        assert_eq!(widget.revenue(), 231_000);
        let texts = widget.kpi_texts();
        assert_eq!(texts[0].1, "38");
        assert_eq!(texts[3].1, "$231,000");
        assert_eq!(widget.feed().count(), 0);
    }

    #[test]
    fn test_bump_respects_caps() {
        let mut rng = rng();
        let mut widget = ProofWidget::new(None, MotionMode::Full, &mut rng);
        for _ in 0..2000 {
            widget.bump(&mut rng);
        }
        assert_eq!(widget.leads.value, 62);
        assert_eq!(widget.appointments.value, 41);
        assert_eq!(widget.installs.value, 12);
        assert_eq!(widget.revenue(), REVENUE_CAP);
    }

    #[test]
    fn test_feed_is_newest_first_and_bounded() {
        let mut rng = rng();
        let mut widget = ProofWidget::new(None, MotionMode::Full, &mut rng);
        for _ in 0..20 {
            widget.push_signal(&mut rng);
        }
        assert_eq!(widget.feed().count(), FEED_MAX);

        let before: Vec<Signal> = widget.feed().copied().collect();
        widget.push_signal(&mut rng);
        let after: Vec<Signal> = widget.feed().copied().collect();
        assert_eq!(&after[1..], &before[..FEED_MAX - 1]);
    }

    #[test]
    fn test_lead_chip_text() {
        let t0 = Instant::now();
        let mut widget = ProofWidget::new(None, MotionMode::Full, &mut rng());
        widget.push_lead(&mut rng(), t0);
        let chip = &widget.stream()[0];
        let parts: Vec<&str> = chip.text.split(" \u{2022} ").collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "New Inspection");
        assert!(ZIPS.contains(&parts[1]));
        assert!(ROOFS.contains(&parts[2]));
        assert!(TIMINGS.contains(&parts[3]));
    }

    #[test]
    fn test_loops_run_only_while_active() {
        let t0 = Instant::now();
        let mut rng = rng();
        let mut widget = ProofWidget::new(None, MotionMode::Full, &mut rng);
        widget.tick(t0 + Duration::from_secs(10), &mut rng);
        assert_eq!(widget.feed().count(), 0);

        widget.activate(t0);
        widget.tick(t0 + PRAISE_PERIOD, &mut rng);
        assert_eq!(widget.feed().count(), 1);
        assert!(widget.stream().is_empty());

        let lead_at = t0 + LEAD_PERIOD;
        widget.tick(lead_at, &mut rng);
        assert_eq!(widget.stream().len(), 1);
        widget.tick(lead_at + LEAD_GLIDE, &mut rng);
        assert!(
            widget.stream().iter().all(|c| c.started != lead_at),
            "chip must expire after its glide"
        );

        widget.deactivate();
        assert!(!widget.is_running());
        let feed = widget.feed().count();
        widget.tick(t0 + Duration::from_secs(60), &mut rng);
        assert_eq!(widget.feed().count(), feed);
    }

    #[test]
    fn test_reduced_motion_seeds_two_signals() {
        let t0 = Instant::now();
        let mut rng = rng();
        let mut widget = ProofWidget::new(None, MotionMode::Reduced, &mut rng);
        assert_eq!(widget.feed().count(), 2);
        widget.activate(t0);
        assert!(!widget.is_running());
        widget.tick(t0 + Duration::from_secs(10), &mut rng);
        assert_eq!(widget.feed().count(), 2);
    }

    #[test]
    fn test_lightbox() {
        let mut empty = ProofWidget::new(None, MotionMode::Full, &mut rng());
        empty.open_lightbox();
        assert!(!empty.lightbox_open(), "no screenshot, nothing to open");

        let mut widget = ProofWidget::new(Some(PathBuf::from("results.png")), MotionMode::Full, &mut rng());
        widget.open_lightbox();
        assert!(widget.lightbox_open());
        assert!(widget.close_lightbox());
        assert!(!widget.close_lightbox());
    }
}
