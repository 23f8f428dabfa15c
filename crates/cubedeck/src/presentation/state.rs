use super::guard::TransitionGuard;

/// Why a navigation request did not start a transition. None of these are
/// shown to the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("a transition is already in progress")]
    Busy,
    #[error("slide {0} is outside the deck")]
    OutOfRange(isize),
    #[error("already on slide {0}")]
    AlreadyCurrent(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn delta(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Position within the deck plus the transition latch and navigator visibility.
#[derive(Debug)]
pub struct PresentationState {
    current_index: usize,
    total_slides: usize,
    guard: TransitionGuard,
    navigator_open: bool,
}

impl PresentationState {
    /// `start` is clamped into the deck. A deck always has at least one slide.
    pub fn new(total_slides: usize, start: usize) -> Self {
        let total_slides = total_slides.max(1);
        Self {
            current_index: start.min(total_slides - 1),
            total_slides,
            guard: TransitionGuard::default(),
            navigator_open: false,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_slides(&self) -> usize {
        self.total_slides
    }

    pub fn last_index(&self) -> usize {
        self.total_slides - 1
    }

    pub fn is_transitioning(&self) -> bool {
        self.guard.is_held()
    }

    pub fn is_navigator_open(&self) -> bool {
        self.navigator_open
    }

    pub fn set_navigator_open(&mut self, open: bool) {
        self.navigator_open = open;
    }

    /// Target of a one-step move, if one may start now.
    pub fn resolve_advance(&self, direction: Direction) -> Result<usize, Rejection> {
        if self.is_transitioning() {
            return Err(Rejection::Busy);
        }
        let next = self.current_index as isize + direction.delta();
        if next < 0 || next >= self.total_slides as isize {
            return Err(Rejection::OutOfRange(next));
        }
        Ok(next as usize)
    }

    /// Target of a direct jump, if one may start now.
    pub fn resolve_jump(&self, target: usize) -> Result<usize, Rejection> {
        if self.is_transitioning() {
            return Err(Rejection::Busy);
        }
        if target >= self.total_slides {
            return Err(Rejection::OutOfRange(target as isize));
        }
        if target == self.current_index {
            return Err(Rejection::AlreadyCurrent(target));
        }
        Ok(target)
    }

    /// Progress through the deck in percent. A single-slide deck is complete.
    pub fn progress_percent(&self) -> f32 {
        if self.total_slides <= 1 {
            return 100.0;
        }
        self.current_index as f32 / self.last_index() as f32 * 100.0
    }

    pub fn counter_text(&self) -> String {
        format!("{} / {}", self.current_index + 1, self.total_slides)
    }

    pub(super) fn try_begin_transition(&mut self) -> bool {
        self.guard.try_begin()
    }

    pub(super) fn end_transition(&mut self) {
        self.guard.release();
    }

    pub(super) fn commit(&mut self, index: usize) {
        debug_assert!(index < self.total_slides);
        self.current_index = index.min(self.last_index());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_is_clamped() {
        let state = PresentationState::new(8, 20);
        assert_eq!(state.current_index(), 7);
        let empty = PresentationState::new(0, 0);
        assert_eq!(empty.total_slides(), 1);
    }

    #[test]
    fn test_advance_boundaries() {
        let first = PresentationState::new(8, 0);
        assert_eq!(
            first.resolve_advance(Direction::Backward),
            Err(Rejection::OutOfRange(-1))
        );
        assert_eq!(first.resolve_advance(Direction::Forward), Ok(1));

        let last = PresentationState::new(8, 7);
        assert_eq!(
            last.resolve_advance(Direction::Forward),
            Err(Rejection::OutOfRange(8))
        );
        assert_eq!(last.resolve_advance(Direction::Backward), Ok(6));
    }

    #[test]
    fn test_jump_validation() {
        let state = PresentationState::new(8, 3);
        assert_eq!(state.resolve_jump(3), Err(Rejection::AlreadyCurrent(3)));
        assert_eq!(state.resolve_jump(8), Err(Rejection::OutOfRange(8)));
        assert_eq!(state.resolve_jump(0), Ok(0));
    }

    #[test]
    fn test_busy_rejects_everything() {
        let mut state = PresentationState::new(8, 3);
        assert!(state.try_begin_transition());
        assert_eq!(
            state.resolve_advance(Direction::Forward),
            Err(Rejection::Busy)
        );
        assert_eq!(state.resolve_jump(0), Err(Rejection::Busy));
        state.end_transition();
        assert_eq!(state.resolve_jump(0), Ok(0));
    }

    #[test]
    fn test_progress_and_counter() {
        let mut state = PresentationState::new(8, 0);
        assert_eq!(state.counter_text(), "1 / 8");
        assert_eq!(state.progress_percent(), 0.0);

        state.commit(3);
        assert!((state.progress_percent() - 42.857_143).abs() < 1e-3);
        assert_eq!(state.counter_text(), "4 / 8");

        state.commit(7);
        assert_eq!(state.progress_percent(), 100.0);
    }

    #[test]
    fn test_single_slide_progress_is_full() {
        let state = PresentationState::new(1, 0);
        assert_eq!(state.progress_percent(), 100.0);
        assert_eq!(state.counter_text(), "1 / 1");
    }
}
