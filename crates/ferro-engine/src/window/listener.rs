use crate::coords::SurfaceSize;
use crate::input::{InputEvent, InputFrame, InputState};

/// Scoped registration of a window's resize and pointer-move handlers.
///
/// Attached when a window is mounted. Released by [`detach`](Self::detach) on
/// teardown, or by `Drop` on any other exit path. Window input reaches the
/// input state only through [`deliver`](Self::deliver), which drops events
/// once the guard is detached.
#[derive(Debug)]
pub struct ListenerGuard {
    label: &'static str,
    attached: bool,
}

impl ListenerGuard {
    pub fn attach(label: &'static str) -> Self {
        log::debug!("{label}: resize + pointer listeners attached");
        Self { label, attached: true }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Applies `ev` to `state` while attached.
    ///
    /// Returns the new surface size when `ev` is a resize that was applied.
    pub fn deliver(
        &self,
        state: &mut InputState,
        frame: &mut InputFrame,
        ev: InputEvent,
    ) -> Option<SurfaceSize> {
        if !self.attached {
            log::trace!("{}: dropped {ev:?} after detach", self.label);
            return None;
        }
        let resized = match &ev {
            InputEvent::Resized(r) => Some(r.size),
            _ => None,
        };
        state.apply_event(frame, ev);
        resized
    }

    /// Releases the listeners. Returns `false` when already detached.
    pub fn detach(&mut self) -> bool {
        if !self.attached {
            return false;
        }
        self.attached = false;
        log::debug!("{}: resize + pointer listeners detached", self.label);
        true
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Vec2, Viewport};
    use crate::input::{PointerMoveEvent, ResizeEvent};

    fn resize(w: u32, h: u32) -> InputEvent {
        InputEvent::Resized(ResizeEvent {
            size: SurfaceSize::new(w, h),
            viewport: Viewport::new(w as f32, h as f32),
        })
    }

    #[test]
    fn attach_starts_active() {
        assert!(ListenerGuard::attach("test").is_attached());
    }

    #[test]
    fn detach_twice_is_a_no_op() {
        let mut guard = ListenerGuard::attach("test");
        assert!(guard.detach());
        assert!(!guard.detach());
        assert!(!guard.is_attached());
    }

    #[test]
    fn drop_after_detach_is_harmless() {
        let mut guard = ListenerGuard::attach("test");
        guard.detach();
        drop(guard);
    }

    #[test]
    fn attached_guard_delivers_resize_and_pointer() {
        let guard = ListenerGuard::attach("test");
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        let size = guard.deliver(&mut state, &mut frame, resize(800, 600));
        assert_eq!(size, Some(SurfaceSize::new(800, 600)));

        let moved = guard.deliver(
            &mut state,
            &mut frame,
            InputEvent::PointerMoved(PointerMoveEvent { x: 800.0, y: 0.0 }),
        );
        assert_eq!(moved, None);
        assert_eq!(state.pointer_ndc, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn detached_guard_applies_nothing() {
        let mut guard = ListenerGuard::attach("test");
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        guard.deliver(&mut state, &mut frame, resize(800, 600));
        frame.clear();

        guard.detach();
        assert_eq!(guard.deliver(&mut state, &mut frame, resize(1024, 768)), None);
        guard.deliver(
            &mut state,
            &mut frame,
            InputEvent::PointerMoved(PointerMoveEvent { x: 0.0, y: 0.0 }),
        );

        assert_eq!(state.surface_size, SurfaceSize::new(800, 600));
        assert_eq!(state.pointer_ndc, Vec2::new(0.0, 0.0));
        assert!(frame.events.is_empty());
    }
}
