mod frames;
mod grid;
mod sheet;
mod timer;

use crate::{
    frames::{load_frames, normalize_frames, FrameSize},
    grid::GridShape,
    sheet::{compose, output_path, save_sheet, DEFAULT_OUTPUT_DIR},
    timer::Timer,
};

use anyhow::{Context, Result};

use clap::Parser;

use tracing::{debug, info, Level};
use tracing_subscriber::{filter::LevelFilter, fmt, layer::SubscriberExt};

use std::path::{Path, PathBuf};

/// Tile a directory of frames into one near-square sprite sheet.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the frames; every file in it is treated as one.
    input: PathBuf,
    /// Directory the sheet is written to, as `<input name>.png`.
    #[clap(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
    /// Width every frame is stretched to.
    #[clap(long, default_value_t = FrameSize::DEFAULT.width)]
    width: u32,
    /// Height every frame is stretched to.
    #[clap(long, default_value_t = FrameSize::DEFAULT.height)]
    height: u32,
    /// Log every step with timings.
    #[clap(short, long)]
    verbose: bool,
}

pub fn main() {
    let args = Args::parse();
    setup_logging(args.verbose).vital("Mksheet: could not set up logging");

    let size = FrameSize::new(args.width, args.height);
    build_sheet(&args.input, &args.output_dir, size).vital("Mksheet: could not build spreadsheet");
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(
            fmt::Layer::new()
                .with_writer(std::io::stderr)
                .with_target(false),
        );
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install the log subscriber")?;
    Ok(())
}

/// Load, normalize, tile and save; returns where the sheet was written.
fn build_sheet(input: &Path, out_dir: &Path, size: FrameSize) -> Result<PathBuf> {
    let mut timer = Timer::new();
    info!("Building spreadsheet from {}", input.display());

    let frames = load_frames(input)?;
    println!("{} frames", frames.len());
    debug!("Load: {:?}ms", timer.lap());

    let shape = GridShape::choose(frames.len())?;
    println!("{} x {}", shape.cols, shape.rows);

    let frames = normalize_frames(frames, size);
    println!("({}, {})", size.width, size.height);
    debug!("Resize: {:?}ms", timer.lap());

    let sheet = compose(&frames, shape)?;
    debug!("Compose: {:?}ms", timer.lap());

    let path = output_path(input, out_dir)?;
    save_sheet(&sheet, &path)?;
    debug!("Save: {:?}ms", timer.lap());
    println!("Result saved in {}", path.display());
    info!("Done in {}ms", timer.total());
    Ok(path)
}

trait Vital<T> {
    fn vital(self, msg: &str) -> T;
}

impl<T, U: std::fmt::Display> Vital<T> for Result<T, U> {
    fn vital(self, msg: &str) -> T {
        match self {
            Ok(res) => res,
            Err(err) => {
                eprintln!("{msg}: {err:#}");
                std::process::exit(1);
            },
        }
    }
}
