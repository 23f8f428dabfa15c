use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::deck::Deck;
use crate::presentation::navigator::icon_glyph;

pub fn run(file: Option<&Path>) -> Result<()> {
    let deck = Deck::load_or_builtin(file)?;
    for line in outline_lines(&deck) {
        println!("{line}");
    }
    Ok(())
}

fn outline_lines(deck: &Deck) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {}",
        deck.title.bold(),
        format!("({} slides)", deck.slides.len()).dimmed()
    )];
    for (index, slide) in deck.slides.iter().enumerate() {
        let d = &slide.descriptor;
        let mut line = format!(
            "{:>3}  {} {}",
            (index + 1).to_string().cyan(),
            icon_glyph(&d.icon),
            d.title.bold()
        );
        if !d.description.is_empty() {
            line.push_str(&format!("  {}", d.description.dimmed()));
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_lists_every_slide() {
        colored::control::set_override(false);
        let lines = outline_lines(&Deck::builtin());
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "StoneSort (8 slides)");
        assert!(lines[4].contains("Algorithms"));
        assert!(lines[4].contains("Bubble, Quick, Merge, Heap, etc."));
        assert!(lines[8].trim_start().starts_with('8'));
    }
}
