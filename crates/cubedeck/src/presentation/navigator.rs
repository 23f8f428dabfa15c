use std::time::Instant;

use super::dispatcher::{EffectDispatcher, TransitionRequest};
use super::state::{PresentationState, Rejection};
use crate::deck::SlideDescriptor;

/// One entry of the navigator panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    pub index: usize,
    pub title: String,
    pub description: String,
    pub glyph: &'static str,
}

impl Thumbnail {
    /// 1-indexed badge text
    pub fn number(&self) -> String {
        (self.index + 1).to_string()
    }
}

/// Thumbnail list for direct jumps. Visibility lives in [`PresentationState`]
/// and never interacts with the transition guard.
pub struct Navigator {
    thumbnails: Vec<Thumbnail>,
}

impl Navigator {
    pub fn new(descriptors: &[SlideDescriptor]) -> Self {
        let thumbnails = descriptors
            .iter()
            .enumerate()
            .map(|(index, d)| Thumbnail {
                index,
                title: d.title.clone(),
                description: d.description.clone(),
                glyph: icon_glyph(&d.icon),
            })
            .collect();
        Self { thumbnails }
    }

    pub fn thumbnails(&self) -> &[Thumbnail] {
        &self.thumbnails
    }

    pub fn toggle(&self, state: &mut PresentationState) {
        state.set_navigator_open(!state.is_navigator_open());
    }

    pub fn close(&self, state: &mut PresentationState) {
        state.set_navigator_open(false);
    }

    /// Jump to a thumbnail's slide. The panel closes only if the jump started.
    pub fn select(
        &self,
        index: usize,
        state: &mut PresentationState,
        dispatcher: &mut EffectDispatcher,
        now: Instant,
    ) -> Result<TransitionRequest, Rejection> {
        let request = dispatcher.jump(state, index, now)?;
        self.close(state);
        Ok(request)
    }
}

/// Map a deck icon identifier to a glyph the default fonts can draw.
pub fn icon_glyph(icon: &str) -> &'static str {
    match icon.trim_start_matches("fa-") {
        "home" => "\u{2302}",
        "info-circle" => "\u{2139}",
        "star" => "\u{2605}",
        "code" => "</>",
        "layer-group" => "\u{2261}",
        "rocket" => "\u{2197}",
        "play-circle" => "\u{25B6}",
        "heart" => "\u{2665}",
        _ => "\u{2022}",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Deck;
    use crate::presentation::dispatcher::{Capabilities, Timings};
    use crate::render::animator::Tweener;
    use crate::render::scene::NullScene;
    use std::time::Duration;

    fn setup() -> (Navigator, PresentationState, EffectDispatcher) {
        let deck = Deck::builtin();
        let navigator = Navigator::new(&deck.descriptors());
        let state = PresentationState::new(deck.slides.len(), 0);
        let capabilities = Capabilities {
            animator: Box::new(Tweener::new()),
            scene: Box::new(NullScene),
            timings: Timings::animated(),
        };
        let dispatcher = EffectDispatcher::new(capabilities, deck.element_counts(), &state);
        (navigator, state, dispatcher)
    }

    #[test]
    fn test_one_thumbnail_per_slide() {
        let (navigator, state, _) = setup();
        assert_eq!(navigator.thumbnails().len(), state.total_slides());
        let first = &navigator.thumbnails()[0];
        assert_eq!(first.number(), "1");
        assert_eq!(first.title, "Title");
        assert_eq!(first.glyph, "\u{2302}");
    }

    #[test]
    fn test_select_closes_after_successful_jump() {
        let (navigator, mut state, mut dispatcher) = setup();
        let now = Instant::now();
        navigator.toggle(&mut state);
        assert!(state.is_navigator_open());

        let request = navigator.select(4, &mut state, &mut dispatcher, now).unwrap();
        assert_eq!(request.to, 4);
        assert!(!state.is_navigator_open());
    }

    #[test]
    fn test_select_keeps_panel_open_when_ignored() {
        let (navigator, mut state, mut dispatcher) = setup();
        let now = Instant::now();
        navigator.toggle(&mut state);

        assert_eq!(
            navigator.select(0, &mut state, &mut dispatcher, now),
            Err(Rejection::AlreadyCurrent(0))
        );
        assert!(state.is_navigator_open());

        dispatcher.jump(&mut state, 2, now).unwrap();
        assert_eq!(
            navigator.select(5, &mut state, &mut dispatcher, now),
            Err(Rejection::Busy)
        );
        assert!(state.is_navigator_open());
    }

    #[test]
    fn test_toggle_during_transition() {
        let (navigator, mut state, mut dispatcher) = setup();
        let now = Instant::now();
        dispatcher.jump(&mut state, 3, now).unwrap();
        navigator.toggle(&mut state);
        assert!(state.is_navigator_open());
        navigator.toggle(&mut state);
        assert!(!state.is_navigator_open());

        dispatcher.update(&mut state, now + Duration::from_millis(300));
        dispatcher.update(&mut state, now + Duration::from_millis(600));
        assert_eq!(state.current_index(), 3);
        assert!(!state.is_transitioning());
    }

    #[test]
    fn test_unknown_icon_falls_back_to_bullet() {
        assert_eq!(icon_glyph("fa-unknown"), "\u{2022}");
        assert_eq!(icon_glyph("heart"), "\u{2665}");
    }
}
