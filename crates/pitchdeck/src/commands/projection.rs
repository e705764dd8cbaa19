use colored::Colorize;

use crate::widgets::format;
use crate::widgets::roi::{self, Projection, ProjectionInputs};

pub fn run(ticket: f64, leads: f64, close: f64) {
    let projection = roi::project(&ProjectionInputs {
        average_ticket: ticket,
        leads_per_month: leads,
        close_rate: close,
    });
    println!("{}", "Monthly projection".bold());
    for (label, value) in rows(&projection) {
        println!("  {:<16} {}", label.dimmed(), value);
    }
}

fn rows(p: &Projection) -> Vec<(&'static str, String)> {
    vec![
        ("Leads", format::group_thousands(p.leads)),
        ("Jobs won", format::group_thousands(p.jobs_won)),
        ("Revenue", format!("${}", format::group_thousands(p.revenue))),
        ("Go-live", format!("{} days", p.go_live_days)),
    ]
}
