use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();
    println!("  {:<26} {}", "defaults.theme".cyan(), config.theme());
    println!(
        "  {:<26} {}",
        "defaults.reduced_motion".cyan(),
        config.reduced_motion()
    );
    println!("  {:<26} {}", "defaults.windowed".cyan(), config.windowed());
    println!(
        "  {:<26} {}",
        "media.base_url".cyan(),
        config.media_base().unwrap_or("(none)")
    );
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!("{} {key} = {value}", "Saved".green().bold());
    println!("{}", path.display().to_string().dimmed());
    Ok(())
}
