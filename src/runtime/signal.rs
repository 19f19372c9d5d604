//! Values shared between a host (pointer handling, lifecycle) and an animation loop.
//!
//! Every signal is "latest value wins": there is no queue, and the loop re-reads the value at
//! the top of each tick. A read that is one frame stale is harmless.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use crate::foundation::core::Point;

/// Hover/interactivity flag. Cloning shares the underlying flag.
#[derive(Clone, Debug, Default)]
pub struct HoverSignal(Arc<AtomicBool>);

impl HoverSignal {
    /// New flag, initially not hovered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Host side: record the latest hover state.
    pub fn set(&self, hovered: bool) {
        self.0.store(hovered, Ordering::Relaxed);
    }

    /// Loop side: read the latest hover state.
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Latest pointer position over a surface, or none once the pointer has left.
#[derive(Clone, Debug, Default)]
pub struct PointerSignal(Arc<Mutex<Option<Point>>>);

impl PointerSignal {
    /// New signal with no pointer present.
    pub fn new() -> Self {
        Self::default()
    }

    /// Host side: pointer moved to `p` (surface-local coordinates).
    pub fn move_to(&self, p: Point) {
        *self.lock() = Some(p);
    }

    /// Host side: pointer left the surface.
    pub fn leave(&self) {
        *self.lock() = None;
    }

    /// Loop side: latest pointer position.
    pub fn get(&self) -> Option<Point> {
        *self.lock()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Point>> {
        // A poisoned lock still holds a valid `Option<Point>`.
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Cooperative cancellation flag checked by the frame loop once per iteration.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// New, not-yet-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; the loop exits before its next tick.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Return `true` once [`CancelToken::cancel`] has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/signal.rs"]
mod tests;
