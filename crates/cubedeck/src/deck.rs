use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What the navigator shows for a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideDescriptor {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    #[serde(flatten)]
    pub descriptor: SlideDescriptor,
    pub heading: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Lines revealed with a staggered entrance each time the slide is shown
    #[serde(default)]
    pub elements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub title: String,
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn parse(content: &str) -> Result<Self> {
        let deck: Deck = serde_yaml::from_str(content)?;
        if deck.slides.is_empty() {
            anyhow::bail!("Deck \"{}\" has no slides", deck.title);
        }
        Ok(deck)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid deck file {}", path.display()))
    }

    /// Load `path` if given, otherwise the built-in deck.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn descriptors(&self) -> Vec<SlideDescriptor> {
        self.slides.iter().map(|s| s.descriptor.clone()).collect()
    }

    pub fn element_counts(&self) -> Vec<usize> {
        self.slides.iter().map(|s| s.elements.len()).collect()
    }

    /// The StoneSort introduction deck.
    pub fn builtin() -> Self {
        fn slide(
            title: &str,
            description: &str,
            icon: &str,
            heading: &str,
            subtitle: Option<&str>,
            elements: &[&str],
        ) -> Slide {
            Slide {
                descriptor: SlideDescriptor {
                    title: title.to_string(),
                    description: description.to_string(),
                    icon: icon.to_string(),
                },
                heading: heading.to_string(),
                subtitle: subtitle.map(str::to_string),
                elements: elements.iter().map(|e| e.to_string()).collect(),
            }
        }

        Deck {
            title: "StoneSort".to_string(),
            slides: vec![
                slide(
                    "Title",
                    "StoneSort - Visual Sorting Lab",
                    "fa-home",
                    "StoneSort",
                    Some("Visual Sorting Lab"),
                    &["Watch algorithms think, one comparison at a time"],
                ),
                slide(
                    "Overview",
                    "Educational, 3D, Interactive",
                    "fa-info-circle",
                    "Overview",
                    None,
                    &[
                        "Educational: every step narrated and highlighted",
                        "3D: arrays rendered as stacks of stones",
                        "Interactive: pause, rewind and edit the input",
                    ],
                ),
                slide(
                    "Key Features",
                    "22+ Themes, Monaco Editor, 3D Viz",
                    "fa-star",
                    "Key Features",
                    None,
                    &[
                        "22+ colour themes",
                        "Monaco editor for custom algorithms",
                        "Real-time 3D visualisation",
                        "Step counters and comparison statistics",
                    ],
                ),
                slide(
                    "Algorithms",
                    "Bubble, Quick, Merge, Heap, etc.",
                    "fa-code",
                    "Algorithms",
                    None,
                    &[
                        "Bubble, Selection, Insertion",
                        "Quick, Merge, Heap",
                        "Shell, Counting, Radix",
                    ],
                ),
                slide(
                    "Tech Stack",
                    "Flask, Vue.js, Three.js, Tailwind",
                    "fa-layer-group",
                    "Tech Stack",
                    None,
                    &[
                        "Flask backend",
                        "Vue.js front end",
                        "Three.js rendering",
                        "Tailwind styling",
                    ],
                ),
                slide(
                    "Future Roadmap",
                    "Graphs, Trees, Enhancements",
                    "fa-rocket",
                    "Future Roadmap",
                    None,
                    &[
                        "Graph traversal visualisations",
                        "Tree structures and balancing",
                        "Sharing and classroom mode",
                    ],
                ),
                slide(
                    "Get Started",
                    "Installation & Shortcuts",
                    "fa-play-circle",
                    "Get Started",
                    None,
                    &[
                        "pip install -r requirements.txt",
                        "python app.py",
                        "Arrows navigate, G opens the navigator",
                    ],
                ),
                slide(
                    "Thank You",
                    "Contact & Links",
                    "fa-heart",
                    "Thank You",
                    Some("Questions welcome"),
                    &["github.com/stonesort", "Star the repo, open an issue"],
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_eight_slides() {
        let deck = Deck::builtin();
        assert_eq!(deck.slides.len(), 8);
        assert_eq!(deck.descriptors()[3].description, "Bubble, Quick, Merge, Heap, etc.");
        assert_eq!(deck.element_counts()[2], 4);
    }

    #[test]
    fn test_parse_flattened_descriptor() {
        let yaml = "title: Demo\n\
                    slides:\n\
                    \x20 - title: Intro\n\
                    \x20   description: Hello\n\
                    \x20   icon: fa-star\n\
                    \x20   heading: Welcome\n\
                    \x20   elements: [one, two]\n\
                    \x20 - title: End\n\
                    \x20   heading: Bye\n";
        let deck = Deck::parse(yaml).unwrap();
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[0].descriptor.icon, "fa-star");
        assert_eq!(deck.slides[0].elements, vec!["one", "two"]);
        assert_eq!(deck.slides[1].descriptor.description, "");
        assert!(deck.slides[1].elements.is_empty());
    }

    #[test]
    fn test_empty_deck_is_rejected() {
        let err = Deck::parse("title: Nothing\nslides: []\n").unwrap_err();
        assert!(err.to_string().contains("no slides"));
    }

    #[test]
    fn test_load_reports_path() {
        let err = Deck::load(Path::new("/definitely/missing/deck.yaml")).unwrap_err();
        assert!(err.to_string().contains("deck.yaml"));
    }

    #[test]
    fn test_builtin_round_trips_through_yaml() {
        let deck = Deck::builtin();
        let yaml = serde_yaml::to_string(&deck).unwrap();
        assert_eq!(Deck::parse(&yaml).unwrap(), deck);
    }
}
