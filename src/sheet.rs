//! Compositing the normalized frames into one sheet and writing it out.
use anyhow::{bail, Context, Result};
use image::{imageops, ImageFormat, RgbaImage};
use tracing::{debug, instrument};

use std::path::{Path, PathBuf};

use crate::grid::{partition, GridShape};

pub const DEFAULT_OUTPUT_DIR: &str = "assets";

/// Tile `frames` row by row onto a transparent canvas sized exactly to the grid.
///
/// Every frame must have the size of the first one. Frames replace the canvas
/// pixels in their cell, alpha included.
#[instrument(level = "debug", skip(frames), fields(count = frames.len()))]
pub fn compose(frames: &[RgbaImage], shape: GridShape) -> Result<RgbaImage> {
    let Some(first) = frames.first() else {
        bail!("Cannot compose a sheet without frames");
    };
    let rows = partition(frames, shape)?;
    let (fw, fh) = first.dimensions();
    if let Some(odd) = frames.iter().position(|f| f.dimensions() != (fw, fh)) {
        bail!(
            "Frame {odd} is {:?}, expected every frame to be {:?}",
            frames[odd].dimensions(), (fw, fh),
        );
    }

    let mut canvas = RgbaImage::new(fw * shape.cols as u32, fh * shape.rows as u32);
    for (i, row) in rows.iter().enumerate() {
        for (j, frame) in row.iter().enumerate() {
            let x = fw as i64 * j as i64;
            let y = fh as i64 * i as i64;
            imageops::replace(&mut canvas, frame, x, y);
        }
    }
    debug!("Canvas is {}x{}", canvas.width(), canvas.height());
    Ok(canvas)
}

/// `<out_dir>/<basename of input>.png`
pub fn output_path(input: &Path, out_dir: &Path) -> Result<PathBuf> {
    let name = match input.file_name() {
        Some(name) => name.to_os_string(),
        None => input
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", input.display()))?
            .file_name()
            .map(|name| name.to_os_string())
            .with_context(|| format!("{} has no directory name", input.display()))?,
    };
    let mut path = out_dir.join(name);
    path.as_mut_os_string().push(".png");
    Ok(path)
}

/// Write the sheet as an RGBA PNG, creating the parent directory if needed.
#[instrument(level = "debug", skip(sheet))]
pub fn save_sheet(sheet: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    sheet
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to save {}", path.display()))
}
