//! Property tweening for slides, slide elements and the start overlay.
//!
//! Two adapters implement [`Animator`]: [`Tweener`] interpolates with easing,
//! [`SnapAnimator`] jumps straight to the end values but still reports
//! completion after the same wall-clock duration, so anything waiting on a
//! tween sees identical timing either way.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Something on screen whose opacity/scale/offset can be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    Slide(usize),
    Element { slide: usize, index: usize },
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Props {
    pub opacity: f32,
    pub scale: f32,
    /// Vertical offset in reference pixels (1920x1080 space)
    pub offset_y: f32,
}

impl Props {
    pub const SHOWN: Props = Props {
        opacity: 1.0,
        scale: 1.0,
        offset_y: 0.0,
    };

    /// Transparent at the given scale
    pub const fn faded(scale: f32) -> Self {
        Self {
            opacity: 0.0,
            scale,
            offset_y: 0.0,
        }
    }

    /// Transparent and pushed down by `offset_y`
    pub const fn lowered(offset_y: f32) -> Self {
        Self {
            opacity: 0.0,
            scale: 1.0,
            offset_y,
        }
    }

    pub fn lerp(self, to: Props, t: f32) -> Props {
        Props {
            opacity: lerp_f32(self.opacity, to.opacity, t),
            scale: lerp_f32(self.scale, to.scale, t),
            offset_y: lerp_f32(self.offset_y, to.offset_y, t),
        }
    }
}

#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Quadratic ease-out
    Power1Out,
    /// Cubic ease-in-out
    Power2InOut,
    /// Quartic ease-out
    Power3Out,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power1Out => 1.0 - (1.0 - t).powi(2),
            Easing::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::Power3Out => 1.0 - (1.0 - t).powi(4),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub target: TweenTarget,
    pub from: Props,
    pub to: Props,
    pub duration: Duration,
    pub delay: Duration,
    pub easing: Easing,
}

impl Tween {
    pub fn new(target: TweenTarget, from: Props, to: Props, duration: Duration) -> Self {
        Self {
            target,
            from,
            to,
            duration,
            delay: Duration::ZERO,
            easing: Easing::Power1Out,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Linear progress in `[0, 1]` after `elapsed` since the tween was started.
    fn progress(&self, elapsed: Duration) -> f32 {
        if elapsed < self.delay {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        let active = elapsed - self.delay;
        (active.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    fn end(&self) -> Duration {
        self.delay + self.duration
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(u64);

pub trait Animator {
    /// Start a tween. The target takes its `from` values immediately.
    fn animate(&mut self, tween: Tween, now: Instant) -> TweenId;

    /// Set a target's properties without animating.
    fn set(&mut self, target: TweenTarget, props: Props);

    /// Advance to `now`. Returns the tweens that finished since the last tick;
    /// every id is returned exactly once.
    fn tick(&mut self, now: Instant) -> Vec<TweenId>;

    /// Current properties of a target, if it was ever animated or set.
    fn props(&self, target: TweenTarget) -> Option<Props>;

    /// Whether any tween is still running.
    fn is_busy(&self) -> bool;
}

struct Running {
    id: TweenId,
    tween: Tween,
    start: Instant,
}

/// Eased interpolation. Later tweens on the same target win while they overlap.
#[derive(Default)]
pub struct Tweener {
    next_id: u64,
    running: Vec<Running>,
    values: HashMap<TweenTarget, Props>,
}

impl Tweener {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Animator for Tweener {
    fn animate(&mut self, tween: Tween, now: Instant) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.values.insert(tween.target, tween.from);
        self.running.push(Running {
            id,
            tween,
            start: now,
        });
        id
    }

    fn set(&mut self, target: TweenTarget, props: Props) {
        self.values.insert(target, props);
    }

    fn tick(&mut self, now: Instant) -> Vec<TweenId> {
        let mut completed = Vec::new();
        for run in &self.running {
            let elapsed = now.saturating_duration_since(run.start);
            if elapsed >= run.tween.end() {
                self.values.insert(run.tween.target, run.tween.to);
                completed.push(run.id);
                continue;
            }
            let t = run.tween.easing.apply(run.tween.progress(elapsed));
            self.values
                .insert(run.tween.target, run.tween.from.lerp(run.tween.to, t));
        }
        self.running.retain(|r| !completed.contains(&r.id));
        completed
    }

    fn props(&self, target: TweenTarget) -> Option<Props> {
        self.values.get(&target).copied()
    }

    fn is_busy(&self) -> bool {
        !self.running.is_empty()
    }
}

struct Pending {
    id: TweenId,
    target: TweenTarget,
    to: Props,
    apply_at: Instant,
    complete_at: Instant,
    applied: bool,
}

/// No-animation fallback: end values are applied once the delay has passed,
/// completion still waits for the full duration.
#[derive(Default)]
pub struct SnapAnimator {
    next_id: u64,
    pending: Vec<Pending>,
    values: HashMap<TweenTarget, Props>,
}

impl SnapAnimator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Animator for SnapAnimator {
    fn animate(&mut self, tween: Tween, now: Instant) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        let applied = tween.delay.is_zero();
        let initial = if applied { tween.to } else { tween.from };
        self.values.insert(tween.target, initial);
        self.pending.push(Pending {
            id,
            target: tween.target,
            to: tween.to,
            apply_at: now + tween.delay,
            complete_at: now + tween.end(),
            applied,
        });
        id
    }

    fn set(&mut self, target: TweenTarget, props: Props) {
        self.values.insert(target, props);
    }

    fn tick(&mut self, now: Instant) -> Vec<TweenId> {
        let mut completed = Vec::new();
        for pending in &mut self.pending {
            if !pending.applied && now >= pending.apply_at {
                self.values.insert(pending.target, pending.to);
                pending.applied = true;
            }
            if now >= pending.complete_at {
                completed.push(pending.id);
            }
        }
        self.pending.retain(|p| !completed.contains(&p.id));
        completed
    }

    fn props(&self, target: TweenTarget) -> Option<Props> {
        self.values.get(&target).copied()
    }

    fn is_busy(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn fade_in(target: TweenTarget) -> Tween {
        Tween::new(target, Props::faded(1.1), Props::SHOWN, ms(500))
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::Power1Out,
            Easing::Power2InOut,
            Easing::Power3Out,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
        assert!((Easing::Power2InOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!(Easing::Power3Out.apply(0.5) > 0.9);
    }

    #[test]
    fn test_tweener_applies_from_immediately() {
        let now = Instant::now();
        let mut animator = Tweener::new();
        animator.animate(fade_in(TweenTarget::Slide(0)), now);
        assert_eq!(
            animator.props(TweenTarget::Slide(0)),
            Some(Props::faded(1.1))
        );
    }

    #[test]
    fn test_tweener_interpolates_and_completes_once() {
        let now = Instant::now();
        let mut animator = Tweener::new();
        let id = animator.animate(
            fade_in(TweenTarget::Slide(2)).with_easing(Easing::Linear),
            now,
        );

        assert!(animator.tick(now + ms(250)).is_empty());
        let mid = animator.props(TweenTarget::Slide(2)).unwrap();
        assert!((mid.opacity - 0.5).abs() < 0.01);
        assert!((mid.scale - 1.05).abs() < 0.01);

        assert_eq!(animator.tick(now + ms(500)), vec![id]);
        assert_eq!(animator.props(TweenTarget::Slide(2)), Some(Props::SHOWN));
        assert!(animator.tick(now + ms(900)).is_empty());
        assert!(!animator.is_busy());
    }

    #[test]
    fn test_tweener_delay_holds_from_values() {
        let now = Instant::now();
        let mut animator = Tweener::new();
        let target = TweenTarget::Element { slide: 1, index: 3 };
        let tween = Tween::new(target, Props::lowered(50.0), Props::SHOWN, ms(800))
            .with_delay(ms(300));
        let id = animator.animate(tween, now);

        animator.tick(now + ms(200));
        assert_eq!(animator.props(target), Some(Props::lowered(50.0)));
        assert!(animator.tick(now + ms(1000)).is_empty());
        assert_eq!(animator.tick(now + ms(1100)), vec![id]);
    }

    #[test]
    fn test_snap_applies_end_values_but_keeps_duration() {
        let now = Instant::now();
        let mut animator = SnapAnimator::new();
        let id = animator.animate(fade_in(TweenTarget::Slide(4)), now);

        assert_eq!(animator.props(TweenTarget::Slide(4)), Some(Props::SHOWN));
        assert!(animator.tick(now + ms(100)).is_empty());
        assert!(animator.is_busy());
        assert_eq!(animator.tick(now + ms(500)), vec![id]);
        assert!(animator.tick(now + ms(600)).is_empty());
    }

    #[test]
    fn test_snap_staggers_by_delay() {
        let now = Instant::now();
        let mut animator = SnapAnimator::new();
        let first = TweenTarget::Element { slide: 0, index: 0 };
        let second = TweenTarget::Element { slide: 0, index: 1 };
        animator.animate(
            Tween::new(first, Props::lowered(50.0), Props::SHOWN, ms(800)),
            now,
        );
        animator.animate(
            Tween::new(second, Props::lowered(50.0), Props::SHOWN, ms(800)).with_delay(ms(100)),
            now,
        );

        assert_eq!(animator.props(first), Some(Props::SHOWN));
        assert_eq!(animator.props(second), Some(Props::lowered(50.0)));
        animator.tick(now + ms(100));
        assert_eq!(animator.props(second), Some(Props::SHOWN));
    }
}
