//! Error types
//!
//! Configuration errors (the game cannot be played with the current numbers),
//! store errors (best-score persistence misbehaved) and render setup errors
//! (no usable GPU).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("surface height {height} is too small for obstacles (needs more than {required})")]
    SurfaceTooSmall { height: f32, required: f32 },
    #[error("invalid tuning value `{field}`: {reason}")]
    InvalidTuning {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("score storage is not available")]
    Unavailable,
    #[error("failed to read stored score: {0}")]
    Read(String),
    #[error("failed to write stored score: {0}")]
    Write(String),
    #[error("stored score is corrupt: {0}")]
    Corrupt(String),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    UnsupportedSurface,
}
