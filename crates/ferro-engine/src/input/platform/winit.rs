use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

use crate::coords::{SurfaceSize, Viewport};
use crate::input::{InputEvent, Key, KeyState, PointerMoveEvent, ResizeEvent};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events not represented by the input subsystem.
pub(crate) fn translate_window_event(window: &Window, event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(window, *position);
            Some(InputEvent::PointerMoved(PointerMoveEvent { x, y }))
        }

        WindowEvent::Resized(size) => Some(resize_event(window, *size)),

        // The new physical size arrives through a following `Resized`, but the
        // logical extent changes immediately.
        WindowEvent::ScaleFactorChanged { .. } => Some(resize_event(window, window.inner_size())),

        WindowEvent::KeyboardInput { event, .. } => {
            let state = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            Some(InputEvent::Key {
                key: map_key(event.physical_key),
                state,
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

/// Builds a resize event for `size`, pairing it with the matching logical viewport.
pub(crate) fn resize_event(window: &Window, size: PhysicalSize<u32>) -> InputEvent {
    let logical: LogicalSize<f64> = size.to_logical(window.scale_factor());
    InputEvent::Resized(ResizeEvent {
        size: SurfaceSize::from(size),
        viewport: Viewport::new(logical.width as f32, logical.height as f32),
    })
}

fn to_logical_f32(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let scale = window.scale_factor();
    let logical = pos.to_logical::<f64>(scale);
    (logical.x as f32, logical.y as f32)
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
        PhysicalKey::Code(KeyCode::F11) => Key::F11,
        PhysicalKey::Code(other) => Key::Unknown(other as u32),

        // winit 0.30 uses NativeKeyCode; no stable numeric is guaranteed here.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}
