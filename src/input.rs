//! Per-frame input snapshot consumed by the camera controller.
//!
//! Kept independent of the windowing backend so the controller can be
//! driven by tests or any event source.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Mouse movement since the last frame, in pixels.
    pub mouse_delta: (i32, i32),
    /// Mouse look only applies while the primary button is held.
    pub looking: bool,
}

impl InputState {
    /// Clear per-frame deltas; held keys stay as they are.
    pub fn end_frame(&mut self) {
        self.mouse_delta = (0, 0);
    }
}
