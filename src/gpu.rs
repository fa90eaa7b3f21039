use std::sync::Arc;

use log::{debug, info};
use winit::window::Window;

use crate::error::SurfaceError;

pub struct GpuContext<'a> {
    pub surface: wgpu::Surface<'a>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
}

/// Outcome of asking the surface for the next texture to draw into.
pub enum Acquired {
    Frame(wgpu::SurfaceTexture),
    /// Nothing to draw this refresh; try again on the next one.
    Skip,
    /// The device is out of memory; the field should stop.
    Fatal,
}

impl<'a> GpuContext<'a> {
    pub async fn new(window: Arc<Window>) -> Result<Self, SurfaceError> {
        let window_size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .ok_or(SurfaceError::NoAdapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let mut config = surface
            .get_default_config(
                &adapter,
                window_size.width.max(1),
                window_size.height.max(1),
            )
            .ok_or(SurfaceError::UnsupportedSurface)?;

        // egui blends in gamma space and wants a non-sRGB target.
        let capabilities = surface.get_capabilities(&adapter);
        if let Some(format) = capabilities.formats.iter().find(|f| !f.is_srgb()) {
            config.format = *format;
        }
        config.present_mode = wgpu::PresentMode::Fifo;
        surface.configure(&device, &config);

        info!(
            "Surface configured: {}x{} {:?} on {}",
            config.width,
            config.height,
            config.format,
            adapter.get_info().name
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    /// Reconfigures the surface for a new window size. A zero-sized
    /// (minimised) window keeps the old configuration.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            debug!("Ignoring zero-sized surface {}x{}", width, height);
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.reconfigure_surface();
    }

    pub fn reconfigure_surface(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn acquire(&self) -> Acquired {
        match self.surface.get_current_texture() {
            Ok(frame) => Acquired::Frame(frame),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                debug!("Surface lost or outdated, reconfiguring");
                self.reconfigure_surface();
                Acquired::Skip
            }
            Err(wgpu::SurfaceError::Timeout) => {
                debug!("Timed out waiting for the surface");
                Acquired::Skip
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Acquired::Fatal,
        }
    }

    /// Starts a render pass that clears `view` to `background`.
    pub fn begin_pass<'p>(
        &self,
        encoder: &'p mut wgpu::CommandEncoder,
        view: &'p wgpu::TextureView,
        background: [u8; 3],
    ) -> wgpu::RenderPass<'p> {
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("field"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color(background, self.format().is_srgb())),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        })
    }
}

fn clear_color([r, g, b]: [u8; 3], linear: bool) -> wgpu::Color {
    if linear {
        let rgba = egui::Rgba::from(egui::Color32::from_rgb(r, g, b));
        wgpu::Color {
            r: rgba.r() as f64,
            g: rgba.g() as f64,
            b: rgba.b() as f64,
            a: 1.0,
        }
    } else {
        wgpu::Color {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_color_gamma_passthrough() {
        let color = clear_color([255, 0, 51], false);

        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert!((color.b - 0.2).abs() < 1e-9);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn test_clear_color_linear_is_darker() {
        let gamma = clear_color([128, 128, 128], false);
        let linear = clear_color([128, 128, 128], true);

        assert!(linear.r < gamma.r);
        assert_eq!(linear.a, 1.0);
    }
}
