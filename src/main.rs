mod cli;
mod error;
mod framepace;
mod gpu;
mod gui;

use std::sync::Arc;

use clap::Parser;
use framepace::Framepacer;
use glam::Vec2;
use gpu::{Acquired, GpuContext};
use gui::{EguiIntegration, OverlayInfo};
use log::{error, info, warn};
use plexus_field::{
    render::{self, BACKGROUND_RGB},
    Field, FrameScheduler, ShapeCanvas, Viewport,
};
use rand::{rngs::StdRng, SeedableRng};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Collect Arguments
    let args = cli::Args::parse();

    // Setup Winit
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Particle seed {}", seed);

    // State
    let mut app_state = AppState {
        tokio_rt: tokio::runtime::Runtime::new()?,
        window: None,
        gpu: None,
        gfx: None,
        field: None,
        scheduler: FrameScheduler::new(),
        framepace: Framepacer::new(),
        rng: StdRng::seed_from_u64(seed),

        framerate: args.framerate,
        overlay: args.overlay,
        window_size: LogicalSize::new(args.width, args.height),
    };

    event_loop.run_app(&mut app_state)?;
    Ok(())
}

struct GfxState {
    egui: EguiIntegration,
    canvas: ShapeCanvas,
}

struct AppState {
    tokio_rt: tokio::runtime::Runtime,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext<'static>>,
    gfx: Option<GfxState>,
    field: Option<Field>,
    scheduler: FrameScheduler,
    framepace: Framepacer,
    rng: StdRng,

    framerate: Option<u32>,
    overlay: bool,
    window_size: LogicalSize<u32>,
}

impl AppState {
    /// Sets up the surface and field, then starts scheduling frames.
    /// Without a usable surface the window stays blank and nothing runs.
    fn mount(&mut self, event_loop: &ActiveEventLoop) {
        let window = match &self.window {
            Some(window) => window.clone(),
            None => match event_loop.create_window(
                Window::default_attributes()
                    .with_title("plexus-field")
                    .with_inner_size(self.window_size),
            ) {
                Ok(window) => {
                    let window = Arc::new(window);
                    self.window = Some(window.clone());
                    window
                }
                Err(err) => {
                    error!("Failed to create a window: {}", err);
                    event_loop.exit();
                    return;
                }
            },
        };
        let window_size = window.inner_size();

        let gpu = match self.tokio_rt.block_on(GpuContext::new(window.clone())) {
            Ok(gpu) => gpu,
            Err(err) => {
                warn!("Particle field disabled: {}", err);
                return;
            }
        };

        let field = Field::mount(
            Viewport::new(window_size.width as f32, window_size.height as f32),
            &mut self.rng,
        );

        self.gfx = Some(GfxState {
            egui: EguiIntegration::new(
                &gpu.device,
                gpu.format(),
                window_size.width,
                window_size.height,
            ),
            canvas: ShapeCanvas::new(),
        });
        self.gpu = Some(gpu);
        self.field = Some(field);

        self.scheduler.start(window.as_ref());
    }

    fn unmount(&mut self) {
        self.scheduler.teardown();

        if self.field.take().is_some() {
            info!("Particle field unmounted");
        }
        self.gfx = None;
        self.gpu = None;
    }

    fn frame(&mut self) {
        let Self {
            window: Some(window),
            gpu: Some(gpu),
            gfx: Some(gfx),
            field: Some(field),
            scheduler,
            framepace,
            framerate,
            overlay,
            ..
        } = self
        else {
            return;
        };

        let Some(ticket) = scheduler.begin_frame() else {
            return;
        };
        framepace.begin_frame();

        // Minimised: keep the loop alive but leave the surface and field alone
        if field.viewport().is_empty() {
            framepace.end_frame(*framerate);
            scheduler.end_frame(ticket, window.as_ref());
            return;
        }

        let frame = match gpu.acquire() {
            Acquired::Frame(frame) => frame,
            Acquired::Skip => {
                scheduler.end_frame(ticket, window.as_ref());
                return;
            }
            Acquired::Fatal => {
                warn!("Out of GPU memory, stopping the particle field");
                scheduler.teardown();
                return;
            }
        };

        let draw = field.frame(&mut gfx.canvas);
        let backdrop = render::background_gradient(field.viewport().size());

        let info = OverlayInfo {
            framerate: framepace.framerate(),
            particles: field.particles().len(),
            draw,
            pointer: field.pointer(),
            frames: field.frames(),
        };
        let overlay = *overlay;
        let shapes = std::iter::once(backdrop).chain(gfx.canvas.drain());
        gfx.egui.run(shapes, |ctx| {
            if overlay {
                gui::overlay(ctx, &info);
            }
        });

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
        gfx.egui
            .pre_render(&gpu.device, &gpu.queue, &mut encoder, framepace.frametime());

        // Render
        {
            let view = frame
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default());
            let mut rpass = gpu.begin_pass(&mut encoder, &view, BACKGROUND_RGB);

            gfx.egui.render(&mut rpass);
        }

        gpu.queue.submit(Some(encoder.finish()));
        frame.present();

        framepace.end_frame(*framerate);
        scheduler.end_frame(ticket, window.as_ref());
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.field.is_none() {
            self.mount(event_loop);
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.unmount();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.unmount();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
                if let Some(gfx) = &mut self.gfx {
                    gfx.egui.resize(new_size.width, new_size.height);
                }
                if let Some(field) = &mut self.field {
                    field.resize(new_size.width as f32, new_size.height as f32);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(field) = &mut self.field {
                    field.pointer_moved(Vec2::new(position.x as f32, position.y as f32));
                }
            }
            WindowEvent::CursorLeft { .. } => {
                if let Some(field) = &mut self.field {
                    field.pointer_left();
                }
            }
            WindowEvent::RedrawRequested => self.frame(),

            _ => (),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.unmount();
    }
}
