//! Ghostscript rasterizer

use super::{Rasterizer, run_tool};
use crate::geometry::CropGeometry;
use crate::types::Result;
use std::path::{Path, PathBuf};
use std::process::Command;

const PAGE_PATTERN: &str = "page-%05d.png";

/// Rasterizes with `gs`, shifting each page so the crop lands at the origin.
#[derive(Debug, Clone)]
pub struct GhostscriptRasterizer {
    binary: String,
}

impl GhostscriptRasterizer {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub(crate) fn args(
        &self,
        input: &Path,
        geometry: &CropGeometry,
        dpi: u32,
        out_dir: &Path,
    ) -> Vec<String> {
        vec![
            "-q".to_string(),
            "-dSAFER".to_string(),
            "-dBATCH".to_string(),
            "-dNOPAUSE".to_string(),
            "-sDEVICE=pnggray".to_string(),
            format!("-r{}", dpi),
            format!("-g{}x{}", geometry.pixel_width, geometry.pixel_height),
            format!("-sOutputFile={}", out_dir.join(PAGE_PATTERN).display()),
            "-c".to_string(),
            format!(
                "<</Install {{{} {} translate}}>> setpagedevice",
                geometry.offset_left, geometry.offset_bottom
            ),
            "-f".to_string(),
            input.display().to_string(),
        ]
    }
}

impl Default for GhostscriptRasterizer {
    fn default() -> Self {
        Self::new("gs")
    }
}

impl Rasterizer for GhostscriptRasterizer {
    fn rasterize(
        &self,
        input: &Path,
        geometry: &CropGeometry,
        dpi: u32,
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        run_tool(Command::new(&self.binary).args(self.args(input, geometry, dpi, out_dir)))?;

        let mut images = Vec::new();
        for entry in std::fs::read_dir(out_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "png") {
                images.push(path);
            }
        }
        // Zero-padded names sort in page order
        images.sort();
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_translate_install_proc() {
        let geometry = CropGeometry {
            pixel_width: 16,
            pixel_height: 270,
            offset_left: -21,
            offset_bottom: -72,
        };
        let args = GhostscriptRasterizer::default().args(
            Path::new("in.pdf"),
            &geometry,
            30,
            Path::new("/tmp/raster"),
        );
        assert!(args.contains(&"-r30".to_string()));
        assert!(args.contains(&"-g16x270".to_string()));
        assert!(args.contains(&"<</Install {-21 -72 translate}>> setpagedevice".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("in.pdf"));
        assert!(
            args.iter()
                .any(|a| a.starts_with("-sOutputFile=") && a.ends_with("page-%05d.png"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn collects_images_in_page_order() {
        let bin = tempfile::TempDir::new().unwrap();
        let out = tempfile::TempDir::new().unwrap();
        let script = crate::tools::stub_tool(
            bin.path(),
            "gs",
            r#"for arg in "$@"; do
  case "$arg" in -sOutputFile=*) pattern="${arg#-sOutputFile=}" ;; esac
done
dir=$(dirname "$pattern")
touch "$dir/page-00002.png" "$dir/page-00001.png" "$dir/gs.log""#,
        );

        let geometry = CropGeometry {
            pixel_width: 10,
            pixel_height: 220,
            offset_left: 0,
            offset_bottom: 0,
        };
        let images = GhostscriptRasterizer::new(script.to_string_lossy())
            .rasterize(Path::new("in.pdf"), &geometry, 20, out.path())
            .unwrap();

        assert_eq!(
            images,
            vec![out.path().join("page-00001.png"), out.path().join("page-00002.png")]
        );
    }
}
