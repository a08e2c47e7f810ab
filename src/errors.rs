//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`WalkerError`] covers every failure mode of the demo:
//! - GPU initialization failures
//! - Window and event loop failures
//! - Model loading and decoding errors
//!
//! The simulation itself is a set of total functions over numeric state and
//! never produces an error.
//!
//! ```rust,ignore
//! use walker::errors::{WalkerError, Result};
//!
//! fn load() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the walker demo.
#[derive(Error, Debug)]
pub enum WalkerError {
    // ========================================================================
    // GPU & Rendering Errors
    // ========================================================================
    /// Failed to request a compatible GPU adapter.
    #[error("Failed to request WGPU adapter: {0}")]
    AdapterRequestFailed(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create the window surface.
    #[error("Failed to create surface: {0}")]
    SurfaceCreateFailed(#[from] wgpu::CreateSurfaceError),

    // ========================================================================
    // Window Errors
    // ========================================================================
    /// Event loop error (winit).
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] winit::error::EventLoopError),

    /// Window creation error (winit).
    #[error("Window creation error: {0}")]
    WindowCreateFailed(#[from] winit::error::OsError),

    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// glTF parsing or loading error.
    #[error("glTF error: {0}")]
    GltfError(String),

    /// A clip the character cannot run without is absent from the model.
    #[error("Model has no '{0}' animation clip")]
    MissingClip(&'static str),

    /// The background load worker went away without reporting a result.
    #[error("Model load worker disconnected")]
    LoadWorkerLost,
}

impl From<gltf::Error> for WalkerError {
    fn from(err: gltf::Error) -> Self {
        WalkerError::GltfError(err.to_string())
    }
}

/// Alias for `Result<T, WalkerError>`.
pub type Result<T> = std::result::Result<T, WalkerError>;
