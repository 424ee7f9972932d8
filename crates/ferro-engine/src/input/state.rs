use std::collections::HashSet;

use crate::coords::{to_ndc, SurfaceSize, Vec2, Viewport};

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, PointerMoveEvent, ResizeEvent};

/// Current input state for a single window.
///
/// Every handler runs to completion on the event-loop thread before the next
/// frame callback, so a frame always observes the latest applied event.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels; `None` while outside the window.
    pub pointer_pos: Option<Vec2>,

    /// Last known pointer position in NDC.
    ///
    /// Starts at the origin and keeps its value when the pointer leaves.
    pub pointer_ndc: Vec2,

    /// Drawable size in physical pixels.
    pub surface_size: SurfaceSize,

    /// Window size in logical pixels.
    pub viewport: Viewport,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                let pos = Vec2::new(*x, *y);
                self.pointer_pos = Some(pos);
                self.pointer_ndc = to_ndc(pos, self.viewport);
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Resized(ResizeEvent { size, viewport }) => {
                self.surface_size = *size;
                self.viewport = *viewport;
                frame.resized = Some(*size);

                // Keep NDC consistent with the new window extent.
                if let Some(pos) = self.pointer_pos {
                    self.pointer_ndc = to_ndc(pos, self.viewport);
                }
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // On focus loss, clear held keys to avoid stuck keys.
                    self.keys_down.clear();
                }
            }
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}
