use anyhow::{anyhow, Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowId};

use crate::coords::SurfaceSize;
use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::{resize_event, translate_window_event};
use crate::input::{InputFrame, InputState};
use crate::time::{FrameClock, FrameTime};

use super::listener::ListenerGuard;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Size used when not full-screen (and on platforms without full-screen).
    pub initial_size: LogicalSize<f64>,
    /// Open as a borderless full-screen window.
    pub fullscreen: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "ferrofluid".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            fullscreen: true,
        }
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Default)]
pub struct RuntimeCtx {
    failure: Option<anyhow::Error>,
}

impl RuntimeCtx {
    /// Ends the run with `err`; [`Runtime::run`] returns it.
    ///
    /// The first failure of a frame wins.
    pub fn fail(&mut self, err: anyhow::Error) {
        if self.failure.is_none() {
            self.failure = Some(err);
        }
    }

    pub fn has_failed(&self) -> bool {
        self.failure.is_some()
    }

    fn take_failure(&mut self) -> Option<anyhow::Error> {
        self.failure.take()
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives `app` until the window closes or the app exits.
    ///
    /// Fatal startup errors (window, surface, adapter, device) end the loop and
    /// are returned here.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        exit_status(state.fatal.take())
    }
}

fn exit_status(fatal: Option<anyhow::Error>) -> Result<()> {
    match fatal {
        Some(err) => Err(err),
        None => {
            log::info!("runtime exited cleanly");
            Ok(())
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,
    listeners: ListenerGuard,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    mounted: bool,
    exit_requested: bool,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            mounted: false,
            exit_requested: false,
            fatal: None,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        self.teardown();
        self.request_exit(event_loop);
    }

    fn mount(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let mut attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        if self.config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        let mut entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            listeners: ListenerGuard::attach("main window"),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init))
                    .context("GPU initialization failed for window")
            },
        }
        .try_build()?;

        // Initial resize, synchronously, so the resolution is valid before the
        // first frame is drawn.
        let size = entry.with_mut(|fields| {
            let ev = resize_event(fields.window, fields.window.inner_size());
            fields.input_state.apply_event(fields.input_frame, ev);
            fields.input_state.surface_size
        });
        if !size.is_valid() {
            return Err(anyhow!("window mounted with zero size"));
        }
        self.app.on_resize(size);

        log::info!(
            "window mounted: {}x{} px{}",
            size.width,
            size.height,
            if self.config.fullscreen { " (fullscreen)" } else { "" }
        );

        entry.with_window(|w| w.request_redraw());
        self.window = Some(entry);
        Ok(())
    }

    /// Detaches listeners and drops the window + GPU.
    ///
    /// The entry goes away in the same step, so after teardown no later event
    /// finds a window to deliver to.
    fn teardown(&mut self) {
        if let Some(mut entry) = self.window.take() {
            entry.with_listeners_mut(|l| l.detach());
            log::debug!("window torn down");
        }
    }

    fn on_resized(&mut self, size: SurfaceSize) {
        if let Some(entry) = self.window.as_mut() {
            entry.with_gpu_mut(|gpu| gpu.resize(size));
            entry.with_window(|w| w.request_redraw());
        }
        if size.is_valid() {
            log::debug!("resized to {}x{}", size.width, size.height);
            self.app.on_resize(size);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId) {
        let mut runtime_ctx = RuntimeCtx::default();
        let mut app_control = AppControl::Continue;

        let app = &mut self.app;
        let Some(entry) = self.window.as_mut() else { return };

        entry.with_mut(|fields| {
            let ft: FrameTime = fields.clock.tick();

            // Scope to ensure `ctx` is dropped before mutating frame state.
            {
                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        id: window_id,
                        window: fields.window,
                    },
                    gpu: fields.gpu,
                    input: fields.input_state,
                    input_frame: fields.input_frame,
                    time: ft,
                    runtime: &mut runtime_ctx,
                };

                app_control = app.on_frame(&mut ctx);
            }

            // Drain per-frame deltas after the frame is consumed.
            fields.input_frame.clear();
        });

        if let Some(err) = runtime_ctx.take_failure() {
            self.fail(event_loop, err.context("frame failed"));
            return;
        }

        if app_control == AppControl::Exit {
            self.teardown();
            self.request_exit(event_loop);
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.mounted {
            if let Some(entry) = self.window.as_mut() {
                entry.with_clock_mut(|c| c.reset());
            }
            return;
        }
        self.mounted = true;

        if let Err(e) = self.mount(event_loop) {
            self.fail(event_loop, e.context("failed to mount window"));
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: the field animates every frame.
        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, window) = (&mut self.app, &mut self.window);

        let Some(entry) = window.as_mut() else { return };
        if entry.borrow_window().id() != window_id {
            return;
        }

        let mut exit_from_app_event = false;
        let mut resized: Option<SurfaceSize> = None;

        entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.window, &event) {
                resized = fields.listeners.deliver(fields.input_state, fields.input_frame, ev);
            }

            if app.on_window_event(window_id, &event) == AppControl::Exit {
                exit_from_app_event = true;
            }
        });

        if exit_from_app_event {
            self.teardown();
            self.request_exit(event_loop);
            return;
        }

        if let Some(size) = resized {
            self.on_resized(size);
        }

        match &event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                self.teardown();
                self.request_exit(event_loop);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop, window_id),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_exit_is_ok() {
        assert!(exit_status(None).is_ok());
    }

    #[test]
    fn frame_failure_reaches_the_exit_status() {
        let mut runtime = RuntimeCtx::default();
        assert!(!runtime.has_failed());

        runtime.fail(anyhow!("surface out of memory"));
        assert!(runtime.has_failed());

        let err = exit_status(runtime.take_failure()).unwrap_err();
        assert!(err.to_string().contains("out of memory"));
        assert!(!runtime.has_failed());
    }

    #[test]
    fn first_failure_wins() {
        let mut runtime = RuntimeCtx::default();
        runtime.fail(anyhow!("first"));
        runtime.fail(anyhow!("second"));

        let err = runtime.take_failure().unwrap();
        assert_eq!(err.to_string(), "first");
    }
}
