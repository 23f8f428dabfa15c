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
    let config = if path.exists() {
        Config::load_from(&path)?
    } else {
        Config::default()
    };

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();
    println!("{}", "defaults".bold());
    println!("  {:<12} {}", "theme", config.theme().cyan());
    println!("  {:<12} {}", "animations", config.animations().to_string().cyan());
    println!("  {:<12} {}", "background", config.background().to_string().cyan());
    let start = config
        .start_slide()
        .map(|n| n.to_string())
        .unwrap_or_else(|| "1".to_string());
    println!("  {:<12} {}", "start_slide", start.cyan());
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let path = Config::path()?;
    let mut config = if path.exists() {
        Config::load_from(&path)?
    } else {
        Config::default()
    };
    config.set(key, value)?;
    let saved = config.save()?;
    println!(
        "{} {} = {} ({})",
        "Saved".green().bold(),
        key,
        value.cyan(),
        saved.display()
    );
    Ok(())
}
