use plexus_field::{DrawStats, Pointer};

/// Turns egui shapes into wgpu draw calls. The field is painted on the
/// background layer; the optional overlay window sits above it.
pub struct EguiIntegration {
    pub ctx: egui::Context,
    raw_input: egui::RawInput,

    renderer: egui_wgpu::Renderer,
    clipped_shapes: Vec<egui::ClippedPrimitive>,
    textures_delta: egui::TexturesDelta,
}

/// Numbers shown in the overlay window.
pub struct OverlayInfo<'a> {
    pub framerate: f32,
    pub particles: usize,
    pub draw: DrawStats,
    pub pointer: &'a Pointer,
    pub frames: u64,
}

impl EguiIntegration {
    pub fn new(
        device: &wgpu::Device,
        swapchain_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let renderer = egui_wgpu::Renderer::new(device, swapchain_format, None, 1);

        let mut integration = Self {
            ctx: egui::Context::default(),
            raw_input: egui::RawInput::default(),

            renderer,
            clipped_shapes: Vec::new(),
            textures_delta: egui::TexturesDelta::default(),
        };
        integration.resize(width, height);
        integration
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.raw_input.screen_rect = Some(egui::Rect::from_min_size(
            Default::default(),
            egui::Vec2::new(width as f32, height as f32),
        ));
    }

    /// Builds one egui frame: `field` goes on the background layer, then
    /// `run_ui` may add windows on top.
    pub fn run<I, F>(&mut self, field: I, run_ui: F)
    where
        I: IntoIterator<Item = egui::Shape>,
        F: FnOnce(&egui::Context),
    {
        let raw_input = std::mem::take(&mut self.raw_input);
        self.ctx.begin_frame(raw_input);

        self.ctx
            .layer_painter(egui::LayerId::background())
            .extend(field);
        run_ui(&self.ctx);

        let output = self.ctx.end_frame();
        self.clipped_shapes = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        self.textures_delta = output.textures_delta;

        // Keep the screen rect for the next frame; egui only reads it from input.
        self.raw_input.screen_rect = Some(self.ctx.screen_rect());
    }

    pub fn pre_render<'a>(
        &mut self,
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        encoder: &'a mut wgpu::CommandEncoder,
        delta_time: f32,
    ) {
        self.raw_input.predicted_dt = delta_time;

        let screen_descriptor = self.screen_descriptor();
        self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &self.clipped_shapes,
            &screen_descriptor,
        );

        for (id, delta) in &self.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }

        for id in &self.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }

    pub fn render<'a>(&'a mut self, rpass: &mut wgpu::RenderPass<'a>) {
        let screen_descriptor = self.screen_descriptor();
        self.renderer
            .render(rpass, &self.clipped_shapes, &screen_descriptor);
    }

    fn screen_descriptor(&self) -> egui_wgpu::ScreenDescriptor {
        let screen_rect = self.ctx.screen_rect();
        egui_wgpu::ScreenDescriptor {
            size_in_pixels: [screen_rect.width() as u32, screen_rect.height() as u32],
            pixels_per_point: self.ctx.pixels_per_point(),
        }
    }
}

pub fn overlay(ctx: &egui::Context, info: &OverlayInfo) {
    egui::Window::new("Field")
        .default_width(145.0)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("FPS {:.1}", info.framerate));
            ui.label(format!("Frame {}", info.frames));
            ui.separator();

            ui.label(format!("Particles {}", info.particles));
            ui.label(format!("Lines {}", info.draw.lines));
            ui.separator();

            match info.pointer.active_position() {
                Some(position) => {
                    ui.label(format!("Pointer\nx: {:.0}\ny: {:.0}", position.x, position.y))
                }
                None => ui.label("Pointer inactive"),
            };
        });
}
