use thiserror::Error;

/// Reasons the drawing surface could not be set up. None of these reach the
/// user; the host logs them and leaves the field unmounted.
#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("failed to create a surface for the window: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no graphics adapter can present to the window")]
    NoAdapter,

    #[error("failed to create a device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("the surface does not support the adapter")]
    UnsupportedSurface,
}
