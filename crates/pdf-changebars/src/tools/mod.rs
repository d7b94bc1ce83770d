//! External collaborators: rasterizing the crop region and measuring it
//!
//! The pipeline only needs two things from the outside world: one image
//! per page cropped to the bounding box, and the trimmed height of each
//! image. Both sit behind traits so tests can stand in for Ghostscript
//! and ImageMagick.

mod ghostscript;
mod imagemagick;
mod trim;

pub use ghostscript::GhostscriptRasterizer;
pub use imagemagick::{ImageMagickMeasurer, parse_measurements};
pub use trim::{TrimMeasurer, trimmed_height};

use crate::geometry::CropGeometry;
use crate::options::{ChangebarOptions, MeasureMode};
use crate::types::{ChangebarError, MarginRecord, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

/// Renders the crop region of every page into `out_dir`.
pub trait Rasterizer: Send + Sync {
    /// Returns the produced images in page order.
    fn rasterize(
        &self,
        input: &Path,
        geometry: &CropGeometry,
        dpi: u32,
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>>;
}

/// Reports the content-trimmed height of each rasterized page.
pub trait MarginMeasurer: Send + Sync {
    fn measure(&self, images: &[PathBuf]) -> Result<Vec<MarginRecord>>;
}

/// The set of external tools used by one pipeline run
#[derive(Clone)]
pub struct Toolchain {
    pub rasterizer: Arc<dyn Rasterizer>,
    pub measurer: Arc<dyn MarginMeasurer>,
}

impl Toolchain {
    pub fn new(rasterizer: impl Rasterizer + 'static, measurer: impl MarginMeasurer + 'static) -> Self {
        Self {
            rasterizer: Arc::new(rasterizer),
            measurer: Arc::new(measurer),
        }
    }

    /// Ghostscript plus the measurer selected in `options`
    pub fn from_options(options: &ChangebarOptions) -> Self {
        let rasterizer = Arc::new(GhostscriptRasterizer::new(&options.ghostscript));
        let measurer: Arc<dyn MarginMeasurer> = match options.measure {
            MeasureMode::ImageMagick => Arc::new(ImageMagickMeasurer::new(&options.magick)),
            MeasureMode::Builtin => Arc::new(TrimMeasurer),
        };
        Self {
            rasterizer,
            measurer,
        }
    }
}

/// Run a command to completion, turning spawn failures and non-zero exits
/// into errors. Returns stdout.
pub(crate) fn run_tool(command: &mut Command) -> Result<String> {
    let tool = command.get_program().to_string_lossy().into_owned();
    log::debug!("Running {:?}", command);

    let output = command
        .output()
        .map_err(|source| ChangebarError::ToolMissing {
            tool: tool.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(ChangebarError::Tool {
            tool,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Write an executable shell script standing in for an external tool
#[cfg(all(test, unix))]
pub(crate) fn stub_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
