//! Renderer Settings
//!
//! Everything the debug renderer needs to know up front. The defaults
//! reproduce the demo's look: a light grey background that the scene fades
//! into with distance, and a faint black ground grid.
//!
//! # Example
//!
//! ```rust,ignore
//! use walker::renderer::RenderSettings;
//!
//! let settings = RenderSettings {
//!     vsync: false,
//!     ..Default::default()
//! };
//! ```

/// Linear distance fog, blended towards the clear colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogSettings {
    /// Distance at which fog starts.
    pub near: f32,
    /// Distance at which geometry is fully fogged.
    pub far: f32,
}

impl Default for FogSettings {
    fn default() -> Self {
        Self {
            near: 20.0,
            far: 100.0,
        }
    }
}

/// Ground grid drawn around the world origin on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSettings {
    /// Edge length of the whole grid.
    pub size: f32,
    pub divisions: u32,
    /// Linear RGBA; the alpha is honoured.
    pub color: [f32; 4],
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: 200.0,
            divisions: 40,
            color: [0.0, 0.0, 0.0, 0.2],
        }
    }
}

/// Configuration for [`Renderer`](super::Renderer).
///
/// | Field              | Description                          | Default          |
/// |--------------------|--------------------------------------|------------------|
/// | `vsync`            | Vertical sync enabled                | `true`           |
/// | `power_preference` | GPU adapter selection strategy       | `HighPerformance`|
/// | `clear_color`      | Background, also the fog colour      | `#e0e0e0`        |
/// | `depth_format`     | Depth buffer texture format          | `Depth32Float`   |
/// | `fog`              | Linear fog range                     | 20 .. 100        |
/// | `grid`             | Ground grid                          | 200 / 40 lines   |
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// When `true`, the frame rate is capped to the display refresh rate.
    pub vsync: bool,
    pub power_preference: wgpu::PowerPreference,
    /// Linear colour; see [`srgb_hex`].
    pub clear_color: wgpu::Color,
    pub depth_format: wgpu::TextureFormat,
    pub fog: FogSettings,
    pub grid: GridSettings,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            vsync: true,
            power_preference: wgpu::PowerPreference::HighPerformance,
            clear_color: srgb_hex(0x00e0_e0e0),
            depth_format: wgpu::TextureFormat::Depth32Float,
            fog: FogSettings::default(),
            grid: GridSettings::default(),
        }
    }
}

/// Converts a `0xRRGGBB` sRGB colour to an opaque linear [`wgpu::Color`].
#[must_use]
pub fn srgb_hex(hex: u32) -> wgpu::Color {
    let channel = |shift: u32| {
        let c = f64::from((hex >> shift) & 0xff) / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };

    wgpu::Color {
        r: channel(16),
        g: channel(8),
        b: channel(0),
        a: 1.0,
    }
}
