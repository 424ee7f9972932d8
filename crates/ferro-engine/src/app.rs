//! The ferrofluid demo: one full-screen noise field fed by time and pointer.

use crate::coords::{SurfaceSize, Vec2};
use crate::core::{App, AppControl, FrameCtx};
use crate::device::GpuInit;
use crate::input::{InputFrame, Key};
use crate::render::{FerrofluidRenderer, FerrofluidUniform};

/// What the keyboard asked for this frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyAction {
    None,
    ToggleFullscreen,
    Exit,
}

/// Host glue for [`FerrofluidRenderer`].
///
/// Per frame: `time` and `mouse` are written, then the quad is drawn.
/// Per resize: `resolution` is written.
#[derive(Default)]
pub struct FerrofluidApp {
    renderer: FerrofluidRenderer,
}

impl FerrofluidApp {
    pub fn new() -> Self {
        Self::default()
    }

    /// GPU settings for the demo.
    ///
    /// The field's color values are written to a non-sRGB surface unchanged.
    pub fn gpu_init() -> GpuInit {
        GpuInit {
            prefer_srgb: false,
            ..GpuInit::default()
        }
    }

    /// Writes the per-frame uniforms.
    pub fn update_uniforms(&mut self, elapsed: f32, pointer_ndc: Vec2) {
        self.renderer.set_time(elapsed);
        self.renderer.set_mouse(pointer_ndc);
    }

    pub fn uniforms(&self) -> &FerrofluidUniform {
        self.renderer.uniforms()
    }

    /// Maps this frame's key transitions to an action. Escape wins over F11.
    pub fn key_action(frame: &InputFrame) -> KeyAction {
        if frame.key_pressed(Key::Escape) {
            KeyAction::Exit
        } else if frame.key_pressed(Key::F11) {
            KeyAction::ToggleFullscreen
        } else {
            KeyAction::None
        }
    }
}

impl App for FerrofluidApp {
    fn on_resize(&mut self, size: SurfaceSize) {
        self.renderer.set_resolution(size);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        match Self::key_action(ctx.input_frame) {
            KeyAction::Exit => {
                log::info!("escape pressed; exiting");
                return AppControl::Exit;
            }
            KeyAction::ToggleFullscreen => ctx.window.toggle_fullscreen(),
            KeyAction::None => {}
        }

        self.update_uniforms(ctx.time.elapsed, ctx.input.pointer_ndc);

        let renderer = &mut self.renderer;
        ctx.render(wgpu::Color::BLACK, |rctx, target| renderer.render(rctx, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, InputState, KeyState, PointerMoveEvent, ResizeEvent};
    use crate::coords::Viewport;

    fn press(key: Key) -> InputEvent {
        InputEvent::Key { key, state: KeyState::Pressed, repeat: false }
    }

    #[test]
    fn resize_then_frame_updates_all_three_uniforms() {
        let mut app = FerrofluidApp::new();
        app.on_resize(SurfaceSize::new(800, 600));
        app.update_uniforms(2.5, Vec2::new(0.5, -0.5));

        let u = app.uniforms();
        assert_eq!(u.resolution, [800.0, 600.0]);
        assert_eq!(u.time, 2.5);
        assert_eq!(u.mouse, [0.5, -0.5]);
    }

    #[test]
    fn frame_observes_latest_pointer() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(
            &mut frame,
            InputEvent::Resized(ResizeEvent {
                size: SurfaceSize::new(200, 100),
                viewport: Viewport::new(200.0, 100.0),
            }),
        );
        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 0.0, y: 0.0 }));
        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 150.0, y: 25.0 }));

        let mut app = FerrofluidApp::new();
        app.update_uniforms(0.0, state.pointer_ndc);
        assert_eq!(app.uniforms().mouse, [0.5, 0.5]);
    }

    #[test]
    fn pointer_defaults_to_origin() {
        let mut app = FerrofluidApp::new();
        app.update_uniforms(0.0, InputState::default().pointer_ndc);
        assert_eq!(app.uniforms().mouse, [0.0, 0.0]);
    }

    #[test]
    fn escape_exits_and_wins_over_f11() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        assert_eq!(FerrofluidApp::key_action(&frame), KeyAction::None);

        state.apply_event(&mut frame, press(Key::F11));
        assert_eq!(FerrofluidApp::key_action(&frame), KeyAction::ToggleFullscreen);

        state.apply_event(&mut frame, press(Key::Escape));
        assert_eq!(FerrofluidApp::key_action(&frame), KeyAction::Exit);
    }

    #[test]
    fn demo_prefers_linear_surface() {
        assert!(!FerrofluidApp::gpu_init().prefer_srgb);
    }
}
