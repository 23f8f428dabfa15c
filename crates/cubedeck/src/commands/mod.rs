pub mod completion;
pub mod config;
pub mod outline;

use colored::Colorize;

pub fn print_version() {
    println!(
        "{} {}",
        "cubedeck".bold().cyan(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
}
