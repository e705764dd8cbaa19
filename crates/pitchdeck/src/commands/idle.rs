use colored::Colorize;

use crate::widgets::format;
use crate::widgets::roi::{self, IdleInputs};

pub fn run(crew: f64, hourly: f64, hours: f64) {
    let loss = roi::idle_loss(&IdleInputs {
        crew_size: crew,
        hourly_cost: hourly,
        idle_hours: hours,
    });
    println!(
        "{} {}",
        "Idle crew cost per day:".bold(),
        format::currency(loss as f64).red().bold()
    );
}
