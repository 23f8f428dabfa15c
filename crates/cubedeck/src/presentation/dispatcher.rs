//! Slide transitions as an explicit state machine.
//!
//! ```text
//! Idle --advance/jump--> FadingOut --outgoing done--> Committing --> FadingIn --incoming done--> Idle
//! ```
//!
//! The index is committed between the two fades, so the counter, progress
//! bar, navigator highlight and element entrance all refer to the new slide
//! while it fades in. The guard in [`PresentationState`] is held from
//! `FadingOut` until `FadingIn` completes.

use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use super::state::{Direction, PresentationState, Rejection};
use crate::render::animator::{
    Animator, Easing, Props, SnapAnimator, Tween, TweenId, TweenTarget, Tweener,
};
use crate::render::cube_field::CubeField;
use crate::render::scene::{CameraPose, NullScene, SceneRenderer, palette_index_for_slide};

/// How far entrance elements rise, in reference pixels
const ENTRANCE_OFFSET: f32 = 50.0;

/// Durations and scales of one cross-fade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeProfile {
    pub out_duration: Duration,
    pub out_scale: f32,
    pub in_duration: Duration,
    pub in_scale: f32,
}

impl FadeProfile {
    /// Previous/next slide
    pub const STEP: FadeProfile = FadeProfile {
        out_duration: Duration::from_millis(500),
        out_scale: 0.9,
        in_duration: Duration::from_millis(500),
        in_scale: 1.1,
    };

    /// Direct jump (navigator, digits, Home/End)
    pub const JUMP: FadeProfile = FadeProfile {
        out_duration: Duration::from_millis(300),
        out_scale: 0.95,
        in_duration: Duration::from_millis(300),
        in_scale: 1.05,
    };

    /// The same profile as an immediate cut: nothing to fade out, and the
    /// whole duration is spent holding the incoming slide.
    pub fn cut(self) -> Self {
        Self {
            out_duration: Duration::ZERO,
            in_duration: self.out_duration + self.in_duration,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timings {
    pub step: FadeProfile,
    pub jump: FadeProfile,
    pub entrance: Duration,
    pub stagger: Duration,
    pub camera: Duration,
    pub palette: Duration,
}

impl Timings {
    pub fn animated() -> Self {
        Self {
            step: FadeProfile::STEP,
            jump: FadeProfile::JUMP,
            entrance: Duration::from_millis(800),
            stagger: Duration::from_millis(100),
            camera: Duration::from_millis(1500),
            palette: Duration::from_millis(1000),
        }
    }

    /// Slides cut at once but the guard is held for the full fade duration;
    /// the scene changes instantly.
    pub fn instant() -> Self {
        Self {
            step: FadeProfile::STEP.cut(),
            jump: FadeProfile::JUMP.cut(),
            camera: Duration::ZERO,
            palette: Duration::ZERO,
            ..Self::animated()
        }
    }
}

/// Collaborators chosen once at startup.
pub struct Capabilities {
    pub animator: Box<dyn Animator>,
    pub scene: Box<dyn SceneRenderer>,
    pub timings: Timings,
}

impl Capabilities {
    pub fn resolve(animations: bool, background: bool, now: Instant) -> Self {
        info!(animations, background, "resolving presentation capabilities");
        let (animator, timings): (Box<dyn Animator>, Timings) = if animations {
            (Box::new(Tweener::new()), Timings::animated())
        } else {
            (Box::new(SnapAnimator::new()), Timings::instant())
        };
        let scene: Box<dyn SceneRenderer> = if background {
            Box::new(CubeField::new(now))
        } else {
            Box::new(NullScene)
        };
        Self {
            animator,
            scene,
            timings,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Step(Direction),
    Jump,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRequest {
    pub from: usize,
    pub to: usize,
    pub kind: RequestKind,
}

impl TransitionRequest {
    fn profile(&self, timings: &Timings) -> FadeProfile {
        match self.kind {
            RequestKind::Step(_) => timings.step,
            RequestKind::Jump => timings.jump,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    FadingOut,
    Committing,
    FadingIn,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    FadingOut {
        request: TransitionRequest,
        tween: TweenId,
    },
    Committing {
        request: TransitionRequest,
    },
    FadingIn {
        request: TransitionRequest,
        tween: TweenId,
    },
}

/// Everything around the slide that reflects the committed index.
#[derive(Debug, Clone, PartialEq)]
pub struct Chrome {
    /// The slide currently drawn
    pub active_slide: usize,
    pub progress_percent: f32,
    pub counter: String,
    /// Highlighted navigator thumbnail
    pub highlighted: usize,
}

impl Chrome {
    fn from_state(state: &PresentationState) -> Self {
        Self {
            active_slide: state.current_index(),
            progress_percent: state.progress_percent(),
            counter: state.counter_text(),
            highlighted: state.current_index(),
        }
    }
}

pub struct EffectDispatcher {
    animator: Box<dyn Animator>,
    scene: Box<dyn SceneRenderer>,
    timings: Timings,
    /// Number of entrance-animated elements on each slide
    element_counts: Vec<usize>,
    phase: Phase,
    chrome: Chrome,
}

impl EffectDispatcher {
    pub fn new(
        capabilities: Capabilities,
        element_counts: Vec<usize>,
        state: &PresentationState,
    ) -> Self {
        Self {
            animator: capabilities.animator,
            scene: capabilities.scene,
            timings: capabilities.timings,
            element_counts,
            phase: Phase::Idle,
            chrome: Chrome::from_state(state),
        }
    }

    /// Show the starting slide: scene pose, chrome, and its element entrance.
    pub fn begin(&mut self, state: &PresentationState, now: Instant) {
        let index = state.current_index();
        self.scene
            .set_camera_pose(CameraPose::for_slide(index), Duration::ZERO, now);
        self.scene
            .set_palette(palette_index_for_slide(index), Duration::ZERO, now);
        self.animator.set(TweenTarget::Slide(index), Props::SHOWN);
        self.run_entrance(index, now);
        self.chrome = Chrome::from_state(state);
    }

    pub fn advance(
        &mut self,
        state: &mut PresentationState,
        direction: Direction,
        now: Instant,
    ) -> Result<TransitionRequest, Rejection> {
        let to = state.resolve_advance(direction).inspect_err(|reason| {
            debug!(?direction, %reason, "advance ignored");
        })?;
        self.start(
            state,
            TransitionRequest {
                from: state.current_index(),
                to,
                kind: RequestKind::Step(direction),
            },
            now,
        )
    }

    pub fn jump(
        &mut self,
        state: &mut PresentationState,
        target: usize,
        now: Instant,
    ) -> Result<TransitionRequest, Rejection> {
        let to = state.resolve_jump(target).inspect_err(|reason| {
            debug!(target, %reason, "jump ignored");
        })?;
        self.start(
            state,
            TransitionRequest {
                from: state.current_index(),
                to,
                kind: RequestKind::Jump,
            },
            now,
        )
    }

    fn start(
        &mut self,
        state: &mut PresentationState,
        request: TransitionRequest,
        now: Instant,
    ) -> Result<TransitionRequest, Rejection> {
        if !state.try_begin_transition() {
            debug!(?request, "transition already running");
            return Err(Rejection::Busy);
        }
        debug!(from = request.from, to = request.to, kind = ?request.kind, "transition started");

        self.scene
            .set_camera_pose(CameraPose::for_slide(request.to), self.timings.camera, now);
        self.scene.set_palette(
            palette_index_for_slide(request.to),
            self.timings.palette,
            now,
        );

        let profile = request.profile(&self.timings);
        let tween = self.animator.animate(
            Tween::new(
                TweenTarget::Slide(request.from),
                Props::SHOWN,
                Props::faded(profile.out_scale),
                profile.out_duration,
            ),
            now,
        );
        self.phase = Phase::FadingOut { request, tween };
        Ok(request)
    }

    /// Advance animations and the transition state machine to `now`.
    ///
    /// Returns finished tweens that did not belong to a slide transition.
    pub fn update(&mut self, state: &mut PresentationState, now: Instant) -> Vec<TweenId> {
        let mut completed = self.animator.tick(now);
        loop {
            match std::mem::replace(&mut self.phase, Phase::Idle) {
                Phase::FadingOut { request, tween } if take(&mut completed, tween) => {
                    trace!(?request, "outgoing slide faded");
                    self.phase = Phase::Committing { request };
                }
                Phase::Committing { request } => {
                    self.commit(state, request, now);
                    let tween = self.fade_in(request, now);
                    self.phase = Phase::FadingIn { request, tween };
                    completed.extend(self.animator.tick(now));
                }
                Phase::FadingIn { request, tween } if take(&mut completed, tween) => {
                    state.end_transition();
                    debug!(slide = request.to, "transition complete");
                }
                other => {
                    self.phase = other;
                    break;
                }
            }
        }
        self.scene.step(now);
        completed
    }

    fn commit(&mut self, state: &mut PresentationState, request: TransitionRequest, now: Instant) {
        state.commit(request.to);
        self.chrome.active_slide = request.to;
        self.run_entrance(request.to, now);
        self.chrome.progress_percent = state.progress_percent();
        self.chrome.counter = state.counter_text();
        self.chrome.highlighted = state.current_index();
    }

    fn fade_in(&mut self, request: TransitionRequest, now: Instant) -> TweenId {
        let profile = request.profile(&self.timings);
        self.animator.animate(
            Tween::new(
                TweenTarget::Slide(request.to),
                Props::faded(profile.in_scale),
                Props::SHOWN,
                profile.in_duration,
            ),
            now,
        )
    }

    fn run_entrance(&mut self, slide: usize, now: Instant) {
        let count = self.element_counts.get(slide).copied().unwrap_or(0);
        for index in 0..count {
            let tween = Tween::new(
                TweenTarget::Element { slide, index },
                Props::lowered(ENTRANCE_OFFSET),
                Props::SHOWN,
                self.timings.entrance,
            )
            .with_delay(self.timings.stagger * index as u32)
            .with_easing(Easing::Power3Out);
            self.animator.animate(tween, now);
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        match self.phase {
            Phase::Idle => TransitionPhase::Idle,
            Phase::FadingOut { .. } => TransitionPhase::FadingOut,
            Phase::Committing { .. } => TransitionPhase::Committing,
            Phase::FadingIn { .. } => TransitionPhase::FadingIn,
        }
    }

    pub fn chrome(&self) -> &Chrome {
        &self.chrome
    }

    /// Current properties of a target; untouched targets are fully shown.
    pub fn props(&self, target: TweenTarget) -> Props {
        self.animator.props(target).unwrap_or(Props::SHOWN)
    }

    pub fn animator_mut(&mut self) -> &mut dyn Animator {
        self.animator.as_mut()
    }

    pub fn scene(&self) -> &dyn SceneRenderer {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> &mut dyn SceneRenderer {
        self.scene.as_mut()
    }

    /// Whether another frame is needed soon.
    pub fn needs_repaint(&self) -> bool {
        self.animator.is_busy() || self.scene.is_live() || !matches!(self.phase, Phase::Idle)
    }
}

fn take(ids: &mut Vec<TweenId>, id: TweenId) -> bool {
    match ids.iter().position(|candidate| *candidate == id) {
        Some(pos) => {
            ids.swap_remove(pos);
            true
        }
        None => false,
    }
}
