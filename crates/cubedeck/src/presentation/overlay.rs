use std::time::{Duration, Instant};

use tracing::debug;

use crate::render::animator::{Animator, Props, Tween, TweenId, TweenTarget};

const FADE_DURATION: Duration = Duration::from_millis(500);
/// Full-screen is requested this long after the overlay starts fading
const FULLSCREEN_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Visible,
    Dismissing(TweenId),
    Hidden,
}

/// The "press Space to start" screen shown before the first slide.
#[derive(Debug)]
pub struct StartOverlay {
    stage: Stage,
    fullscreen_at: Option<Instant>,
}

impl StartOverlay {
    pub fn new(visible: bool) -> Self {
        Self {
            stage: if visible { Stage::Visible } else { Stage::Hidden },
            fullscreen_at: None,
        }
    }

    /// True until the fade-out has finished; input stays blocked meanwhile.
    pub fn is_visible(&self) -> bool {
        !matches!(self.stage, Stage::Hidden)
    }

    /// Start fading out. Ignored unless the overlay is fully visible.
    pub fn dismiss(&mut self, animator: &mut dyn Animator, now: Instant) -> bool {
        if self.stage != Stage::Visible {
            return false;
        }
        let tween = animator.animate(
            Tween::new(
                TweenTarget::Overlay,
                Props::SHOWN,
                Props::faded(1.0),
                FADE_DURATION,
            ),
            now,
        );
        self.stage = Stage::Dismissing(tween);
        self.fullscreen_at = Some(now + FULLSCREEN_DELAY);
        debug!("start overlay dismissed");
        true
    }

    /// Feed finished tweens. Returns `true` exactly once, when full-screen
    /// should be requested.
    pub fn poll(&mut self, completed: &[TweenId], now: Instant) -> bool {
        if let Stage::Dismissing(tween) = self.stage {
            if completed.contains(&tween) {
                self.stage = Stage::Hidden;
            }
        }
        match self.fullscreen_at {
            Some(at) if now >= at => {
                self.fullscreen_at = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::animator::Tweener;

    #[test]
    fn test_hidden_overlay_ignores_dismiss() {
        let mut overlay = StartOverlay::new(false);
        let mut animator = Tweener::new();
        assert!(!overlay.is_visible());
        assert!(!overlay.dismiss(&mut animator, Instant::now()));
    }

    #[test]
    fn test_dismiss_fades_then_requests_fullscreen_once() {
        let now = Instant::now();
        let mut overlay = StartOverlay::new(true);
        let mut animator = Tweener::new();

        assert!(overlay.dismiss(&mut animator, now));
        assert!(!overlay.dismiss(&mut animator, now));
        assert!(overlay.is_visible());

        let t = now + Duration::from_millis(100);
        assert!(!overlay.poll(&animator.tick(t), t));

        let t = now + Duration::from_millis(300);
        assert!(overlay.poll(&animator.tick(t), t));
        assert!(overlay.is_visible());

        let t = now + Duration::from_millis(500);
        assert!(!overlay.poll(&animator.tick(t), t));
        assert!(!overlay.is_visible());
        assert_eq!(
            animator.props(TweenTarget::Overlay).map(|p| p.opacity),
            Some(0.0)
        );
    }
}
