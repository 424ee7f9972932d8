use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::coords::SurfaceSize;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called for raw window events, after input translation.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called with the drawable size in physical pixels.
    ///
    /// Delivered once synchronously when the window is mounted, before the
    /// first `on_frame`, and again after every resize.
    fn on_resize(&mut self, size: SurfaceSize) {
        let _ = size;
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
