/// Latch held for the whole lifetime of a slide transition.
///
/// Requests arriving while it is held are dropped, never queued.
#[derive(Debug, Default)]
pub struct TransitionGuard {
    held: bool,
}

impl TransitionGuard {
    /// Take the latch. Returns `false` if it was already held.
    pub fn try_begin(&mut self) -> bool {
        if self.held {
            return false;
        }
        self.held = true;
        true
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}
