use anyhow::{bail, Context, Result};
use image::{imageops::FilterType, DynamicImage, ImageReader, RgbaImage};
use tracing::{debug, instrument, trace};

use std::path::{Path, PathBuf};

/// Size every frame is normalized to before tiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize{
    pub width: u32,
    pub height: u32,
}

impl FrameSize{
    pub const DEFAULT: Self = Self{ width: 1920, height: 1080 };

    pub fn new(width: u32, height: u32) -> Self{
        Self{ width, height }
    }
}

impl Default for FrameSize{
    fn default() -> Self{
        Self::DEFAULT
    }
}

/// Entries of `dir` that can hold a frame, sorted by file name.
/// Sub-directories are skipped; nothing is recursed into.
pub fn frame_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read frame directory {}", dir.display()))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to list frame directory {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            trace!("Skipping directory {}", path.display());
            continue;
        }
        paths.push(path);
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Decode one frame; the format is sniffed from the content, not the extension.
pub fn load_frame(path: &Path) -> Result<DynamicImage> {
    let img = ImageReader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read {}", path.display()))?
        .decode()
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    trace!("Loaded {} ({}x{})", path.display(), img.width(), img.height());
    Ok(img)
}

/// Decode every frame in `dir`, in file name order.
#[instrument(level = "debug")]
pub fn load_frames(dir: &Path) -> Result<Vec<DynamicImage>> {
    let paths = frame_paths(dir)?;
    if paths.is_empty() {
        bail!("No frames found in {}", dir.display());
    }
    let frames = paths
        .iter()
        .map(|path| load_frame(path))
        .collect::<Result<Vec<_>>>()?;
    debug!("Decoded {} frames from {}", frames.len(), dir.display());
    Ok(frames)
}

/// Stretch every frame to exactly `size`, ignoring its aspect ratio.
#[instrument(level = "debug", skip(frames), fields(count = frames.len()))]
pub fn normalize_frames(frames: Vec<DynamicImage>, size: FrameSize) -> Vec<RgbaImage> {
    frames
        .into_iter()
        .map(|img| {
            if img.width() == size.width && img.height() == size.height {
                img.into_rgba8()
            } else {
                img.resize_exact(size.width, size.height, FilterType::CatmullRom).into_rgba8()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{setup_folder, write_frame};

    #[test]
    fn loads_in_name_order_and_skips_dirs() -> Result<()> {
        let dir = setup_folder("frames_order")?;
        write_frame(&dir.join("b.png"), 3, 2, [0, 255, 0, 255])?;
        write_frame(&dir.join("a.png"), 4, 4, [255, 0, 0, 255])?;
        write_frame(&dir.join("c"), 1, 1, [0, 0, 255, 255])?;
        std::fs::create_dir(dir.join("nested"))?;

        let paths = frame_paths(&dir)?;
        let names: Vec<_> = paths
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.png", "b.png", "c"]);

        let frames = load_frames(&dir)?;
        assert_eq!(frames.len(), 3);
        assert_eq!((frames[0].width(), frames[0].height()), (4, 4));
        assert_eq!((frames[1].width(), frames[1].height()), (3, 2));
        assert_eq!((frames[2].width(), frames[2].height()), (1, 1));
        Ok(())
    }

    #[test]
    fn undecodable_file_aborts_load() -> Result<()> {
        let dir = setup_folder("frames_garbage")?;
        write_frame(&dir.join("ok.png"), 2, 2, [1, 2, 3, 255])?;
        std::fs::write(dir.join("notes.txt"), b"not an image")?;

        let err = load_frames(&dir).unwrap_err();
        assert!(format!("{err:#}").contains("notes.txt"));
        Ok(())
    }

    #[test]
    fn empty_or_missing_directory_is_an_error() -> Result<()> {
        let dir = setup_folder("frames_empty")?;
        assert!(load_frames(&dir).is_err());
        assert!(load_frames(&dir.join("does-not-exist")).is_err());
        Ok(())
    }

    #[test]
    fn normalize_stretches_to_target() {
        let frames = vec![
            DynamicImage::new_rgb8(7, 3),
            DynamicImage::new_rgba8(16, 9),
            DynamicImage::new_luma8(1, 50),
        ];
        let size = FrameSize::new(16, 9);
        let out = normalize_frames(frames, size);
        assert_eq!(out.len(), 3);
        for frame in out {
            assert_eq!(frame.dimensions(), (16, 9));
        }
    }

    #[test]
    fn default_size_is_full_hd() {
        assert_eq!(FrameSize::default(), FrameSize::new(1920, 1080));
    }
}
