//! Offline previews of the scene
//!
//! Renders the full scene field on the CPU and optionally writes it out as a
//! PNG with a transparent background.

use anyhow::{Context, Result};
use ownroom_core::sdf::Sdf;
use ownroom_render::{Camera, Frame, Lighting, MarchConfig, render_frame_with};
use std::path::{Path, PathBuf};

/// Options for rendering a preview
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    pub march: MarchConfig,
    pub lighting: Lighting,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            march: MarchConfig::default(),
            lighting: Lighting::default(),
        }
    }
}

impl PreviewOptions {
    /// Create options with custom dimensions
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.lighting = lighting;
        self
    }
}

/// Result of a saved preview
#[derive(Debug, Clone)]
pub struct PreviewResult {
    /// Path where the image was written
    pub path: PathBuf,

    /// Pixels that hit a surface
    pub hit_pixels: usize,

    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for PreviewResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Saved {} ({}x{}, {} pixels hit)",
            self.path.display(),
            self.width,
            self.height,
            self.hit_pixels
        )
    }
}

/// Render `sdf` as seen from `camera`
pub fn render_preview<S: Sdf + ?Sized>(sdf: &S, camera: &Camera, options: &PreviewOptions) -> Frame {
    render_frame_with(
        sdf,
        camera,
        options.width,
        options.height,
        &options.march,
        &options.lighting,
    )
}

/// Write a rendered frame as PNG, adding the extension when missing
pub fn save_frame(frame: &Frame, path: &Path) -> Result<PreviewResult> {
    if frame.width == 0 || frame.height == 0 {
        anyhow::bail!("Cannot save an empty {}x{} preview", frame.width, frame.height);
    }

    let mut output_path = path.to_path_buf();
    if output_path.extension().is_none() {
        output_path.set_extension("png");
    }

    frame
        .to_rgba_image()
        .save(&output_path)
        .with_context(|| format!("Failed to write preview to {}", output_path.display()))?;

    let result = PreviewResult {
        path: output_path,
        hit_pixels: frame.hit_count(),
        width: frame.width,
        height: frame.height,
    };
    tracing::info!("{}", result);
    Ok(result)
}
