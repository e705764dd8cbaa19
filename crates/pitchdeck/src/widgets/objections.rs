use std::time::{Duration, Instant};

use crate::navigation::transition::{EASE_OUT_SOFT, MotionMode};

use super::RisePose;

pub const POP_DURATION: Duration = Duration::from_millis(260);
const POP_RISE: f32 = 10.0;
const POP_SCALE: f32 = 0.98;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Objection {
    pub key: &'static str,
    pub label: &'static str,
    pub claim: &'static str,
    pub myth: &'static [&'static str],
    pub answer: &'static [&'static str],
    pub proof: &'static [&'static str],
}

pub static OBJECTIONS: [Objection; 8] = [
    Objection {
        key: "have-agency",
        label: "We already have someone",
        claim: "We don\u{2019}t just \u{201c}run ads.\u{201d} We make you look like the #1 roofer and follow prospects everywhere.",
        myth: &["Our current guy handles Google/FB", "We\u{2019}re set for now"],
        answer: &[
            "Omnipresence system: Search + LSA + Maps + FB/IG + Display working together (no YouTube).",
            "Pro content shoot \u{2192} cinematic, local proof, not templated creatives.",
            "Exclusive territory: we won\u{2019}t also run your competitor.",
        ],
        proof: &[
            "CPL as low as $33 on Meta (metal roofing).",
            "7\u{2011}day launch.",
            "Qualified leads guaranteed.",
        ],
    },
    Objection {
        key: "tried-ads",
        label: "Tried ads, didn\u{2019}t work",
        claim: "It fails when it\u{2019}s just ads. It works when intent, proof and follow\u{2011}up are stitched together.",
        myth: &["Clicks, no installs", "Agency vanished after launch"],
        answer: &[
            "Capture intent (Search/LSA) + win the compare (Maps/Reviews) + retarget until they book.",
            "Pre\u{2011}screening + lead scoring kill junk.",
            "Routing + speed\u{2011}to\u{2011}lead under 5 minutes.",
        ],
        proof: &[
            "Real\u{2011}time proof signals (reviews, directions, branded search).",
            "Monthly ROI strategy call.",
            "No shared leads, ever.",
        ],
    },
    Objection {
        key: "price",
        label: "Too expensive",
        claim: "One average install often covers the entire month. After that, it\u{2019}s house money.",
        myth: &["We need the \u{201c}cheapest\u{201d} option"],
        answer: &[
            "Avg job value \u{2248} $33k; you\u{2019}re buying installs, not impressions.",
            "We bring the team you won\u{2019}t build in\u{2011}house (shooters, editors, ad managers).",
            "Scale up/down by crew capacity.",
        ],
        proof: &[
            "Transparent ROI math on Slide 7.",
            "Exclusive territory, limited to 3 per region.",
            "Qualified leads guaranteed.",
        ],
    },
    Objection {
        key: "quality",
        label: "Lead quality",
        claim: "We screen for territory fit, roof type, age/damage, insurance, and timeline before it hits you.",
        myth: &["We\u{2019}ll get tire\u{2011}kickers", "Shared lists"],
        answer: &[
            "Pre\u{2011}screen form + weights = A/B/C/D scores.",
            "SpamShield\u{2122} blocks duplicates and junk.",
            "Instant routing to the right person.",
        ],
        proof: &[
            "Speed\u{2011}to\u{2011}lead < 5 minutes.",
            "You own the pipeline, no shared leads.",
            "Local proof baked into creatives.",
        ],
    },
    Objection {
        key: "capacity",
        label: "No time / capacity",
        claim: "You focus on installs. We handle creative, ads, tracking, and optimization.",
        myth: &["We\u{2019}re swamped", "No one to \u{201c}run this\u{201d} internally"],
        answer: &[
            "Three things from you: pick territory, confirm budget, answer leads fast.",
            "We handle the content shoot, build, launch, and monthly strategy.",
            "Throttle by crew capacity: pause geos or shift spend.",
        ],
        proof: &[
            "7\u{2011}day go\u{2011}live.",
            "Appointments land on your calendar.",
            "Monthly strategy call.",
        ],
    },
    Objection {
        key: "proof",
        label: "Need proof",
        claim: "You\u{2019}ll feel lift fast, and you\u{2019}ll see it: leads, appointments, installs, revenue.",
        myth: &["We\u{2019}ve been burned by reports"],
        answer: &[
            "We show what to scale, not box\u{2011}checking dashboards.",
            "Presence signals: new reviews, photos, Local Pack ranks.",
            "Scenario\u{2011}based ROI calculator (live on Slide 7).",
        ],
        proof: &[
            "Qualified leads (30d), appointments, installs tick up.",
            "Presence signals feed on Slide 6.",
            "Strategy call each month.",
        ],
    },
    Objection {
        key: "organic",
        label: "We rank already",
        claim: "Great. We capture demand you don\u{2019}t see and defend your brand everywhere they compare.",
        myth: &["SEO is enough", "Word\u{2011}of\u{2011}mouth only"],
        answer: &[
            "Own \u{201c}roofer near me\u{201d} with Search/LSA and branded defense.",
            "Reviews & Maps flywheel makes you the obvious pick.",
            "Retargeting closes the loop while they think.",
        ],
        proof: &[
            "Branded searches up.",
            "Directions & calls increase.",
            "Reviews velocity climbs.",
        ],
    },
    Objection {
        key: "risk",
        label: "What if it doesn\u{2019}t work?",
        claim: "We de\u{2011}risk with exclusivity and a qualified\u{2011}leads guarantee.",
        myth: &["We can\u{2019}t afford a miss"],
        answer: &[
            "Only 3 roofers per region. When it\u{2019}s locked, it\u{2019}s gone.",
            "Qualified leads guaranteed, or we keep working free.",
            "We shift strategy by theme (storm, metal, financing, insurance).",
        ],
        proof: &[
            "Exclusivity = no internal competition.",
            "Theme toggles (Slide 4) to chase what\u{2019}s working.",
            "7\u{2011}day launch, then optimize.",
        ],
    },
];

/// Tabbed objection handler: one card at a time, chips to jump, prev/next to
/// cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectionsWidget {
    active: usize,
    popped_at: Option<Instant>,
    motion: MotionMode,
}

impl ObjectionsWidget {
    pub fn new(motion: MotionMode, now: Instant) -> Self {
        let mut widget = Self {
            active: 0,
            popped_at: None,
            motion,
        };
        widget.set_active(0, now);
        widget
    }

    pub fn len(&self) -> usize {
        OBJECTIONS.len()
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn current(&self) -> &'static Objection {
        &OBJECTIONS[self.active]
    }

    /// Any integer is accepted and wrapped into range.
    pub fn set_active(&mut self, n: isize, now: Instant) {
        self.active = n.rem_euclid(OBJECTIONS.len() as isize) as usize;
        self.popped_at = (!self.motion.is_reduced()).then_some(now);
    }

    pub fn next(&mut self, now: Instant) {
        self.set_active(self.active as isize + 1, now);
    }

    pub fn previous(&mut self, now: Instant) {
        self.set_active(self.active as isize - 1, now);
    }

    pub fn counter_text(&self) -> String {
        format!("{}/{}", self.active + 1, OBJECTIONS.len())
    }

    pub fn progress_percent(&self) -> f32 {
        (self.active + 1) as f32 / OBJECTIONS.len() as f32 * 100.0
    }

    /// Card pose during the pop entrance.
    pub fn card_pose(&self, now: Instant) -> RisePose {
        let Some(start) = self.popped_at else {
            return RisePose::REST;
        };
        let t = now.saturating_duration_since(start).as_secs_f32() / POP_DURATION.as_secs_f32();
        if t >= 1.0 {
            return RisePose::REST;
        }
        RisePose::between(EASE_OUT_SOFT.ease(t), POP_RISE, POP_SCALE)
    }

    pub fn is_popping(&self, now: Instant) -> bool {
        self.popped_at
            .is_some_and(|start| now.saturating_duration_since(start) < POP_DURATION)
    }
}
