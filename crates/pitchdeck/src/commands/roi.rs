use colored::Colorize;

use crate::widgets::format;
use crate::widgets::roi::{self, RoiInputs, RoiOutcome, RoiView};

pub fn run(spend: f64, cpc: f64, conversion: f64, close: f64, aov: f64) {
    let inputs = RoiInputs {
        spend,
        cpc,
        conversion_rate: conversion,
        close_rate: close,
        average_order_value: aov,
    };
    let outcome = roi::compute(&inputs);

    println!("{}", "ROI projection".bold());
    for (label, value) in rows(&outcome) {
        println!("  {:<16} {}", label.dimmed(), value);
    }
    let verdict = outcome.breakeven_label();
    if outcome.above_breakeven() {
        println!("  {}", verdict.green().bold());
    } else {
        println!("  {}", verdict.red().bold());
    }
}

fn rows(outcome: &RoiOutcome) -> Vec<(&'static str, String)> {
    let view = RoiView::from(outcome);
    vec![
        ("Clicks", format::integer(outcome.clicks)),
        ("Leads", view.leads),
        ("Sales", view.sales),
        ("Cost per lead", view.cost_per_lead),
        ("Cost per sale", view.cost_per_sale),
        ("Revenue", view.revenue),
        ("ROAS", view.roas),
        ("Gauge", format!("{:.0}%", outcome.gauge_percent())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_for_reference_inputs() {
        let outcome = roi::compute(&RoiInputs {
            spend: 1000.0,
            cpc: 5.0,
            conversion_rate: 10.0,
            close_rate: 20.0,
            average_order_value: 500.0,
        });
        let rows = rows(&outcome);
        let get = |label: &str| rows.iter().find(|(l, _)| *l == label).unwrap().1.clone();
        assert_eq!(get("Clicks"), "200");
        assert_eq!(get("Leads"), "20");
        assert_eq!(get("Sales"), "4");
        assert_eq!(get("Revenue"), "$2,000");
        assert_eq!(get("ROAS"), "2.00x");
        assert_eq!(get("Gauge"), "67%");
    }

    #[test]
    fn test_rows_without_leads_show_dash() {
        let outcome = roi::compute(&RoiInputs {
            conversion_rate: 0.0,
            ..RoiInputs::default()
        });
        let rows = rows(&outcome);
        assert_eq!(rows[3].1, format::DASH);
    }
}
