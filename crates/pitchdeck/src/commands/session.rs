use anyhow::Result;
use colored::Colorize;

use crate::cli::SessionCommands;
use crate::session::{FileStore, NOTES_KEY, SLIDE_KEY, Session};

pub fn run(command: SessionCommands) -> Result<()> {
    let store = FileStore::open_default()?;
    match command {
        SessionCommands::Show => {
            show(&Session::new(store));
            Ok(())
        }
        SessionCommands::Reset => reset(Session::new(store)),
    }
}

fn show(session: &Session<FileStore>) {
    println!("{} {}", "Session file:".bold(), session.store().path().display());
    let slide = session
        .slide_index()
        .map(|i| i.to_string())
        .unwrap_or_else(|| "(none)".to_string());
    println!("  {:<26} {}", SLIDE_KEY.cyan(), slide);
    println!(
        "  {:<26} {}",
        NOTES_KEY.cyan(),
        if session.notes_visible() { "shown" } else { "hidden" }
    );

    let stale: Vec<_> = session
        .store()
        .entries()
        .filter(|(k, _)| *k != SLIDE_KEY && *k != NOTES_KEY)
        .collect();
    if !stale.is_empty() {
        println!("{}", "Entries from older releases (ignored):".dimmed());
        for (key, value) in stale {
            println!("  {} = {}", key.dimmed(), value.dimmed());
        }
    }
}

fn reset(mut session: Session<FileStore>) -> Result<()> {
    session.clear()?;
    println!("{} {}", "Cleared".green().bold(), session.store().path().display());
    Ok(())
}
