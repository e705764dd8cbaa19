use std::time::{Duration, Instant};

use crate::navigation::transition::MotionMode;

use super::format;

/// Smallest cost per click the calculator divides by.
pub const MIN_CPC: f64 = 0.01;
/// ROAS at which the gauge is full.
pub const GAUGE_CAP: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiInputs {
    pub spend: f64,
    pub cpc: f64,
    /// Percent of clicks that become leads.
    pub conversion_rate: f64,
    /// Percent of leads that become sales.
    pub close_rate: f64,
    pub average_order_value: f64,
}

impl Default for RoiInputs {
    fn default() -> Self {
        Self {
            spend: 5000.0,
            cpc: 6.0,
            conversion_rate: 8.0,
            close_rate: 25.0,
            average_order_value: 33000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiOutcome {
    pub clicks: f64,
    pub leads: f64,
    pub sales: f64,
    /// Infinite when there are no leads.
    pub cost_per_lead: f64,
    /// Infinite when there are no sales.
    pub cost_per_sale: f64,
    pub revenue: f64,
    pub roas: f64,
}

impl RoiOutcome {
    pub fn gauge_percent(&self) -> f64 {
        (self.roas.min(GAUGE_CAP) / GAUGE_CAP * 100.0).clamp(0.0, 100.0)
    }

    pub fn above_breakeven(&self) -> bool {
        self.roas >= 1.0
    }

    pub fn breakeven_label(&self) -> &'static str {
        if self.above_breakeven() {
            "Above breakeven"
        } else {
            "Below breakeven"
        }
    }
}

fn percent(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 100.0) / 100.0
    } else {
        0.0
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

pub fn compute(inputs: &RoiInputs) -> RoiOutcome {
    let spend = finite_or_zero(inputs.spend);
    let cpc = finite_or_zero(inputs.cpc).max(MIN_CPC);
    let cvr = percent(inputs.conversion_rate);
    let close = percent(inputs.close_rate);
    let aov = finite_or_zero(inputs.average_order_value);

    let clicks = spend / cpc;
    let leads = clicks * cvr;
    let sales = leads * close;
    let revenue = sales * aov;

    RoiOutcome {
        clicks,
        leads,
        sales,
        cost_per_lead: if leads > 0.0 { spend / leads } else { f64::INFINITY },
        cost_per_sale: if sales > 0.0 { spend / sales } else { f64::INFINITY },
        revenue,
        roas: if spend > 0.0 { revenue / spend } else { 0.0 },
    }
}

/// Display strings for the result tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoiView {
    pub leads: String,
    pub sales: String,
    pub cost_per_lead: String,
    pub cost_per_sale: String,
    pub revenue: String,
    pub roas: String,
    pub breakeven: &'static str,
}

impl From<&RoiOutcome> for RoiView {
    fn from(o: &RoiOutcome) -> Self {
        Self {
            leads: format::or_dash(o.leads, format::integer),
            sales: format::or_dash(o.sales, format::integer),
            cost_per_lead: format::or_dash(o.cost_per_lead, format::currency),
            cost_per_sale: format::or_dash(o.cost_per_sale, format::currency),
            revenue: format::currency(o.revenue),
            roas: format::ratio(o.roas),
            breakeven: o.breakeven_label(),
        }
    }
}

/// Marketing-page projection: leads per month and close rate to jobs and revenue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionInputs {
    pub average_ticket: f64,
    pub leads_per_month: f64,
    pub close_rate: f64,
}

impl Default for ProjectionInputs {
    fn default() -> Self {
        Self {
            average_ticket: 5000.0,
            leads_per_month: 20.0,
            close_rate: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    pub leads: u64,
    pub jobs_won: u64,
    pub revenue: u64,
    pub go_live_days: u64,
}

pub const GO_LIVE_DAYS: u64 = 7;

pub fn project(inputs: &ProjectionInputs) -> Projection {
    let defaults = ProjectionInputs::default();
    let pick = |v: f64, d: f64| if v.is_finite() { v } else { d };

    let ticket = pick(inputs.average_ticket, defaults.average_ticket);
    let leads = pick(inputs.leads_per_month, defaults.leads_per_month)
        .round()
        .max(1.0);
    let close = pick(inputs.close_rate, defaults.close_rate).clamp(1.0, 100.0);

    let jobs_won = (leads * close / 100.0).round();
    let revenue = (ticket * jobs_won).round().max(0.0);
    Projection {
        leads: leads as u64,
        jobs_won: jobs_won as u64,
        revenue: revenue as u64,
        go_live_days: GO_LIVE_DAYS,
    }
}

/// What a crew standing around costs per day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleInputs {
    pub crew_size: f64,
    pub hourly_cost: f64,
    pub idle_hours: f64,
}

impl Default for IdleInputs {
    fn default() -> Self {
        Self {
            crew_size: 4.0,
            hourly_cost: 35.0,
            idle_hours: 6.0,
        }
    }
}

pub fn idle_loss(inputs: &IdleInputs) -> u64 {
    let defaults = IdleInputs::default();
    let pick = |v: f64, d: f64| if v.is_finite() { v } else { d };
    let crew = pick(inputs.crew_size, defaults.crew_size).trunc().max(1.0);
    let hourly = pick(inputs.hourly_cost, defaults.hourly_cost).max(1.0);
    let idle = pick(inputs.idle_hours, defaults.idle_hours).max(0.0);
    (crew * hourly * idle).round() as u64
}

/// Tile count-up from zero with an ease-out-cubic curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountUp {
    target: f64,
    start: Instant,
    duration: Duration,
}

impl CountUp {
    pub const DURATION: Duration = Duration::from_millis(1200);

    pub fn new(target: f64, start: Instant) -> Self {
        Self {
            target,
            start,
            duration: Self::DURATION,
        }
    }

    pub fn value_at(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.start).as_secs_f64();
        let p = (elapsed / self.duration.as_secs_f64()).min(1.0);
        let eased = 1.0 - (1.0 - p).powi(3);
        (self.target * eased).floor()
    }

    pub fn is_done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }
}

/// Live calculator state for the ROI slide.
#[derive(Debug, Clone)]
pub struct RoiState {
    pub inputs: RoiInputs,
    pub outcome: RoiOutcome,
    pub view: RoiView,
    pub idle: IdleInputs,
    pub idle_loss: u64,
    motion: MotionMode,
    revenue_count: Option<CountUp>,
}

impl RoiState {
    pub fn new(motion: MotionMode) -> Self {
        let inputs = RoiInputs::default();
        let outcome = compute(&inputs);
        let idle = IdleInputs::default();
        Self {
            inputs,
            view: RoiView::from(&outcome),
            outcome,
            idle,
            idle_loss: idle_loss(&idle),
            motion,
            revenue_count: None,
        }
    }

    /// Recompute after any input changed. A new revenue figure counts up
    /// again from zero.
    pub fn recalc(&mut self, now: Instant) {
        let previous = self.outcome.revenue;
        self.outcome = compute(&self.inputs);
        self.view = RoiView::from(&self.outcome);
        self.idle_loss = idle_loss(&self.idle);
        if self.outcome.revenue != previous {
            self.start_count(now);
        }
    }

    /// The revenue tile counts up from zero on each visit.
    pub fn activate(&mut self, now: Instant) {
        self.start_count(now);
    }

    fn start_count(&mut self, now: Instant) {
        self.revenue_count =
            (!self.motion.is_reduced()).then(|| CountUp::new(self.outcome.revenue, now));
    }

    pub fn deactivate(&mut self) {
        self.revenue_count = None;
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.revenue_count.is_some_and(|c| !c.is_done(now))
    }

    pub fn revenue_text(&self, now: Instant) -> String {
        match self.revenue_count {
            Some(count) if !count.is_done(now) => format::currency(count.value_at(now)),
            _ => self.view.revenue.clone(),
        }
    }

    pub fn idle_text(&self) -> String {
        format::currency(self.idle_loss as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::format::DASH;

    fn scenario() -> RoiInputs {
        RoiInputs {
            spend: 1000.0,
            cpc: 5.0,
            conversion_rate: 10.0,
            close_rate: 20.0,
            average_order_value: 500.0,
        }
    }

    #[test]
    fn test_reference_scenario() {
        let outcome = compute(&scenario());
        assert_eq!(outcome.clicks, 200.0);
        assert!((outcome.leads - 20.0).abs() < 1e-9);
        assert!((outcome.sales - 4.0).abs() < 1e-9);
        assert!((outcome.revenue - 2000.0).abs() < 1e-6);
        assert!((outcome.roas - 2.0).abs() < 1e-9);

        let view = RoiView::from(&outcome);
        assert_eq!(view.leads, "20");
        assert_eq!(view.sales, "4");
        assert_eq!(view.revenue, "$2,000");
        assert_eq!(view.roas, "2.00x");
        assert_eq!(view.cost_per_lead, "$50");
        assert_eq!(view.cost_per_sale, "$250");
        assert_eq!(view.breakeven, "Above breakeven");
    }

    #[test]
    fn test_zero_leads_show_dash() {
        let outcome = compute(&RoiInputs {
            conversion_rate: 0.0,
            ..scenario()
        });
        assert_eq!(outcome.leads, 0.0);
        let view = RoiView::from(&outcome);
        assert_eq!(view.leads, "0");
        assert_eq!(view.cost_per_lead, DASH);
        assert_eq!(view.cost_per_sale, DASH);
        assert_eq!(view.revenue, "$0");
        assert_eq!(view.breakeven, "Below breakeven");
    }

    #[test]
    fn test_cpc_is_clamped() {
        let outcome = compute(&RoiInputs {
            cpc: 0.0,
            ..scenario()
        });
        assert!((outcome.clicks - 100_000.0).abs() < 1e-6);
        assert!(outcome.leads.is_finite());
    }

    #[test]
    fn test_rates_are_clamped() {
        let outcome = compute(&RoiInputs {
            conversion_rate: 250.0,
            close_rate: -5.0,
            ..scenario()
        });
        assert!((outcome.leads - 200.0).abs() < 1e-9);
        assert_eq!(outcome.sales, 0.0);
    }

    #[test]
    fn test_zero_spend() {
        let outcome = compute(&RoiInputs {
            spend: 0.0,
            ..scenario()
        });
        assert_eq!(outcome.roas, 0.0);
        assert_eq!(outcome.gauge_percent(), 0.0);
    }

    #[test]
    fn test_gauge_caps_at_three() {
        let outcome = compute(&scenario());
        assert!((outcome.gauge_percent() - 200.0 / 3.0).abs() < 1e-9);
        let big = compute(&RoiInputs {
            average_order_value: 50_000.0,
            ..scenario()
        });
        assert_eq!(big.gauge_percent(), 100.0);
    }

    #[test]
    fn test_projection() {
        let p = project(&ProjectionInputs::default());
        assert_eq!(p.leads, 20);
        assert_eq!(p.jobs_won, 6);
        assert_eq!(p.revenue, 30_000);
        assert_eq!(p.go_live_days, 7);

        let clamped = project(&ProjectionInputs {
            average_ticket: 1000.0,
            leads_per_month: 0.2,
            close_rate: 0.0,
        });
        assert_eq!(clamped.leads, 1);
        assert_eq!(clamped.jobs_won, 0);
        assert_eq!(clamped.revenue, 0);
    }

    #[test]
    fn test_idle_loss() {
        assert_eq!(idle_loss(&IdleInputs::default()), 840);
        assert_eq!(
            idle_loss(&IdleInputs {
                crew_size: 0.0,
                hourly_cost: 0.0,
                idle_hours: -2.0,
            }),
            0
        );
        assert_eq!(
            idle_loss(&IdleInputs {
                crew_size: 3.9,
                hourly_cost: 40.0,
                idle_hours: 2.5,
            }),
            300
        );
    }

    #[test]
    fn test_count_up() {
        let t0 = Instant::now();
        let c = CountUp::new(1000.0, t0);
        assert_eq!(c.value_at(t0), 0.0);
        let mid = c.value_at(t0 + Duration::from_millis(600));
        assert!(mid > 500.0 && mid < 1000.0, "ease-out should be past half: {mid}");
        assert_eq!(c.value_at(t0 + CountUp::DURATION), 1000.0);
        assert!(c.is_done(t0 + CountUp::DURATION));
    }

    #[test]
    fn test_state_recalc() {
        let t0 = Instant::now();
        let mut state = RoiState::new(MotionMode::Full);
        state.inputs = scenario();
        state.recalc(t0);
        assert_eq!(state.view.revenue, "$2,000");
        state.idle.crew_size = 2.0;
        state.recalc(t0);
        assert_eq!(state.idle_text(), "$420");
    }

    #[test]
    fn test_recalc_restarts_revenue_count() {
        let t0 = Instant::now();
        let mut state = RoiState::new(MotionMode::Full);
        state.activate(t0);
        let t1 = t0 + CountUp::DURATION * 2;
        assert!(!state.is_animating(t1));

        state.inputs = scenario();
        state.recalc(t1);
        assert!(state.is_animating(t1));
        assert_eq!(state.revenue_text(t1), "$0");
        assert_eq!(state.revenue_text(t1 + CountUp::DURATION), "$2,000");

        // Idle inputs leave the revenue tile alone.
        let t2 = t1 + CountUp::DURATION;
        state.idle.idle_hours = 2.0;
        state.recalc(t2);
        assert!(!state.is_animating(t2));

        let mut reduced = RoiState::new(MotionMode::Reduced);
        reduced.inputs = scenario();
        reduced.recalc(t0);
        assert!(!reduced.is_animating(t0));
        assert_eq!(reduced.revenue_text(t0), "$2,000");
    }

    #[test]
    fn test_revenue_counts_up_on_activation() {
        let t0 = Instant::now();
        let mut state = RoiState::new(MotionMode::Full);
        let settled = state.view.revenue.clone();
        assert_eq!(state.revenue_text(t0), settled);

        state.activate(t0);
        assert_eq!(state.revenue_text(t0), "$0");
        assert!(state.is_animating(t0 + Duration::from_millis(600)));
        assert_eq!(state.revenue_text(t0 + CountUp::DURATION), settled);

        let mut reduced = RoiState::new(MotionMode::Reduced);
        reduced.activate(t0);
        assert!(!reduced.is_animating(t0));
        assert_eq!(reduced.revenue_text(t0), settled);
    }
}
