use eframe::egui::Key;

use super::state::{Direction, PresentationState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Advance(Direction),
    Jump(usize),
    /// Navigator thumbnail click: jump, then close the panel
    Select(usize),
    ToggleNavigator,
    CloseNavigator,
    DismissOverlay,
    ExitFullscreen,
    ToggleFullscreen,
    Quit,
}

/// Clickable things outside the slide itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Overlay,
    Thumbnail(usize),
    PreviousButton,
    NextButton,
    NavigatorButton,
}

/// The read-only facts routing depends on.
#[derive(Debug, Clone, Copy)]
pub struct RouteContext {
    pub overlay_visible: bool,
    pub navigator_open: bool,
    pub total_slides: usize,
}

impl RouteContext {
    pub fn new(state: &PresentationState, overlay_visible: bool) -> Self {
        Self {
            overlay_visible,
            navigator_open: state.is_navigator_open(),
            total_slides: state.total_slides(),
        }
    }
}

pub fn route_key(key: Key, ctx: RouteContext) -> Option<Command> {
    // The start overlay swallows everything but its own dismissal
    if ctx.overlay_visible {
        return match key {
            Key::Space | Key::Enter => Some(Command::DismissOverlay),
            _ => None,
        };
    }

    match key {
        Key::ArrowRight | Key::Space => Some(Command::Advance(Direction::Forward)),
        Key::ArrowLeft => Some(Command::Advance(Direction::Backward)),
        Key::Home => Some(Command::Jump(0)),
        Key::End => Some(Command::Jump(ctx.total_slides.saturating_sub(1))),
        Key::G => Some(Command::ToggleNavigator),
        Key::F => Some(Command::ToggleFullscreen),
        Key::Q => Some(Command::Quit),
        Key::Escape => {
            if ctx.navigator_open {
                Some(Command::CloseNavigator)
            } else {
                Some(Command::ExitFullscreen)
            }
        }
        _ => digit(key)
            .filter(|d| (1..=ctx.total_slides).contains(d))
            .map(|d| Command::Jump(d - 1)),
    }
}

pub fn route_click(target: PointerTarget, ctx: RouteContext) -> Option<Command> {
    if ctx.overlay_visible {
        return match target {
            PointerTarget::Overlay => Some(Command::DismissOverlay),
            _ => None,
        };
    }

    match target {
        PointerTarget::Overlay => None,
        PointerTarget::Thumbnail(index) => Some(Command::Select(index)),
        PointerTarget::PreviousButton => Some(Command::Advance(Direction::Backward)),
        PointerTarget::NextButton => Some(Command::Advance(Direction::Forward)),
        PointerTarget::NavigatorButton => Some(Command::ToggleNavigator),
    }
}

fn digit(key: Key) -> Option<usize> {
    let d = match key {
        Key::Num1 => 1,
        Key::Num2 => 2,
        Key::Num3 => 3,
        Key::Num4 => 4,
        Key::Num5 => 5,
        Key::Num6 => 6,
        Key::Num7 => 7,
        Key::Num8 => 8,
        Key::Num9 => 9,
        _ => return None,
    };
    Some(d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RouteContext {
        RouteContext {
            overlay_visible: false,
            navigator_open: false,
            total_slides: 8,
        }
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(
            route_key(Key::ArrowRight, ctx()),
            Some(Command::Advance(Direction::Forward))
        );
        assert_eq!(
            route_key(Key::Space, ctx()),
            Some(Command::Advance(Direction::Forward))
        );
        assert_eq!(
            route_key(Key::ArrowLeft, ctx()),
            Some(Command::Advance(Direction::Backward))
        );
        assert_eq!(route_key(Key::Home, ctx()), Some(Command::Jump(0)));
        assert_eq!(route_key(Key::End, ctx()), Some(Command::Jump(7)));
        assert_eq!(route_key(Key::G, ctx()), Some(Command::ToggleNavigator));
    }

    #[test]
    fn test_digit_jumps_to_digit_minus_one() {
        assert_eq!(route_key(Key::Num3, ctx()), Some(Command::Jump(2)));
        assert_eq!(route_key(Key::Num1, ctx()), Some(Command::Jump(0)));
        assert_eq!(route_key(Key::Num8, ctx()), Some(Command::Jump(7)));
        assert_eq!(route_key(Key::Num9, ctx()), None);
        assert_eq!(route_key(Key::Num0, ctx()), None);
    }

    #[test]
    fn test_digits_limited_by_deck_size() {
        let small = RouteContext {
            total_slides: 3,
            ..ctx()
        };
        assert_eq!(route_key(Key::Num3, small), Some(Command::Jump(2)));
        assert_eq!(route_key(Key::Num4, small), None);
    }

    #[test]
    fn test_escape_closes_navigator_first() {
        let open = RouteContext {
            navigator_open: true,
            ..ctx()
        };
        assert_eq!(route_key(Key::Escape, open), Some(Command::CloseNavigator));
        assert_eq!(route_key(Key::Escape, ctx()), Some(Command::ExitFullscreen));
    }

    #[test]
    fn test_overlay_swallows_input() {
        let overlay = RouteContext {
            overlay_visible: true,
            ..ctx()
        };
        assert_eq!(route_key(Key::ArrowRight, overlay), None);
        assert_eq!(route_key(Key::G, overlay), None);
        assert_eq!(route_key(Key::Escape, overlay), None);
        assert_eq!(route_key(Key::Space, overlay), Some(Command::DismissOverlay));
        assert_eq!(route_key(Key::Enter, overlay), Some(Command::DismissOverlay));

        assert_eq!(route_click(PointerTarget::NextButton, overlay), None);
        assert_eq!(
            route_click(PointerTarget::Overlay, overlay),
            Some(Command::DismissOverlay)
        );
    }

    #[test]
    fn test_clicks() {
        assert_eq!(
            route_click(PointerTarget::Thumbnail(5), ctx()),
            Some(Command::Select(5))
        );
        assert_eq!(
            route_click(PointerTarget::PreviousButton, ctx()),
            Some(Command::Advance(Direction::Backward))
        );
        assert_eq!(
            route_click(PointerTarget::NavigatorButton, ctx()),
            Some(Command::ToggleNavigator)
        );
    }

    #[test]
    fn test_enter_does_nothing_once_presenting() {
        assert_eq!(route_key(Key::Enter, ctx()), None);
    }
}
