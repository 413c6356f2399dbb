//! Grid shape selection for the sheet.
//!
//! The shape is the factor pair of the frame count closest to a square: the
//! largest divisor not above `sqrt(n)` and its cofactor. The larger factor
//! always becomes the row count, so non-square counts give sheets with more
//! rows than columns.
use anyhow::{bail, Result};
use tracing::{debug, instrument};

/// Hard ceiling on the number of rows in a sheet.
pub const MAX_ROWS: usize = 11;
/// Hard ceiling on the number of columns in a sheet.
pub const MAX_COLS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape{
    pub rows: usize,
    pub cols: usize,
}

impl GridShape{
    /// Pick the grid for `count` frames and check it against the ceiling.
    #[instrument(level = "debug")]
    pub fn choose(count: usize) -> Result<Self> {
        if count == 0 {
            bail!("Cannot build a spreadsheet from zero frames");
        }
        let shape = Self::factor(count);
        debug!("{count} frames factor into {} rows of {} columns", shape.rows, shape.cols);
        if shape.rows > MAX_ROWS || shape.cols > MAX_COLS {
            bail!(
                "Too big spreadsheet: {} x {} exceeds the {} x {} limit",
                shape.cols, shape.rows, MAX_COLS, MAX_ROWS,
            );
        }
        Ok(shape)
    }

    /// Factor pair closest to a square, without the ceiling check.
    pub fn factor(count: usize) -> Self{
        let mut a = 1;
        for i in 1..=isqrt(count) {
            if count % i == 0 {
                a = i;
            }
        }
        let b = count / a;
        Self{ rows: a.max(b), cols: a.min(b) }
    }

    pub fn cells(&self) -> usize{
        self.rows * self.cols
    }
}

/// Split `frames` into `shape.rows` consecutive rows of `shape.cols` frames.
pub fn partition<T>(frames: &[T], shape: GridShape) -> Result<Vec<&[T]>> {
    if frames.len() != shape.cells() {
        bail!(
            "{} frames do not fill a {} x {} grid",
            frames.len(), shape.cols, shape.rows,
        );
    }
    Ok(frames.chunks(shape.cols).collect())
}

fn isqrt(n: usize) -> usize{
    let mut r = (n as f64).sqrt() as usize;
    while r * r > n { r -= 1; }
    while (r + 1) * (r + 1) <= n { r += 1; }
    r
}
