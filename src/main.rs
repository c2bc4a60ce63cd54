use std::path::PathBuf;

use alpaca_imaging_rs::image_pipeline::{
    AdjustmentParams, CaptureInfo, ColorMap, FrameViewPipeline, ViewerConfig,
};
use alpaca_imaging_rs::logger;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "alpaca_imaging_rs")]
#[command(version, about = "Render an ASCOM Alpaca ImageBytes frame to JPEG", long_about = None)]
struct Cli {
    /// ImageBytes response saved from a camera
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// JPEG file to write
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Display gamma (1.0 = linear)
    #[arg(long, value_name = "FLOAT", default_value_t = 1.0)]
    gamma: f64,

    /// Contrast multiplier around mid-grey
    #[arg(long, value_name = "FLOAT", default_value_t = 1.0)]
    contrast: f64,

    /// Brightness offset in 8-bit units
    #[arg(long, value_name = "FLOAT", default_value_t = 0.0, allow_negative_numbers = true)]
    brightness: f64,

    /// Colour map for monochrome frames (grayscale, heat, viridis, plasma)
    #[arg(long, value_name = "NAME", default_value = "grayscale", value_parser = parse_color_map)]
    colormap: ColorMap,

    /// Skip the histogram auto-stretch of high bit-depth frames
    #[arg(long)]
    no_stretch: bool,

    /// JPEG quality
    #[arg(
        long,
        value_name = "1-100",
        default_value_t = 85,
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    quality: u8,
}

impl Cli {
    fn params(&self) -> AdjustmentParams {
        AdjustmentParams {
            gamma: self.gamma,
            contrast: self.contrast,
            brightness: self.brightness,
            color_map: self.colormap,
            auto_stretch: !self.no_stretch,
            ..AdjustmentParams::default()
        }
    }
}

fn parse_color_map(name: &str) -> std::result::Result<ColorMap, String> {
    ColorMap::from_label(name).ok_or_else(|| format!("unknown colour map '{}'", name))
}

fn main() -> Result<()> {
    logger::init();

    let args = Cli::parse();
    info!("Starting alpaca_imaging_rs...");

    let config = ViewerConfig::builder()
        .jpeg_quality(args.quality)
        .build();
    let mut pipeline = FrameViewPipeline::new(config)?;

    info!("Frame view pipeline initialized");
    info!("JPEG quality: {}", pipeline.config().jpeg_quality);
    info!("Colour map: {}", args.colormap.label());

    // Normalization depends on auto_stretch, so it must be set before the frame arrives.
    pipeline.set_params(args.params(), std::time::Instant::now())?;
    let output = pipeline.ingest_file(&args.input, CaptureInfo::default())?;

    if output.is_blank() {
        error!(
            "No image in {}: {}",
            args.input.display(),
            pipeline.last_error().unwrap_or("unknown error")
        );
        bail!("nothing to render");
    }

    pipeline
        .write_latest(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    let frame = pipeline.frame().context("no live frame")?;
    info!(
        width = frame.width,
        height = frame.height,
        bit_depth = frame.bit_depth(),
        color = frame.is_color(),
        "Frame decoded"
    );
    if let Some(cache) = pipeline.cache() {
        info!(
            "Display range {}..{}{}",
            cache.source_min,
            cache.source_max,
            if cache.stretched { " (auto-stretched)" } else { "" }
        );
    }

    for (label, histogram) in [
        ("original", pipeline.original_histogram()),
        ("current", pipeline.current_histogram()),
    ] {
        info!(
            "{} histogram: min={} max={} mean={:.1} samples={}",
            label, histogram.min, histogram.max, histogram.mean, histogram.sample_count
        );
    }

    let compact = pipeline.compact_histogram();
    let smoothed = pipeline.smoothed_current_histogram();
    let group = (smoothed.len() / compact.bins.len()).max(1);
    let rows: Vec<f64> = smoothed.chunks(group).map(|c| c.iter().sum()).collect();
    let peak = rows.iter().copied().fold(0.0, f64::max);
    if peak <= 0.0 {
        warn!("Histogram is empty");
    } else {
        for (i, (&count, &level)) in compact.bins.iter().zip(&rows).enumerate() {
            let bar = "#".repeat((level / peak * 40.0).round() as usize);
            info!("{:>3} {:>8} {}", i * 256 / compact.bins.len(), count, bar);
        }
    }

    info!(
        "Wrote {} ({} bytes) in {:.1}ms",
        args.output.display(),
        output.image.data.len(),
        pipeline.last_timings().total_duration().as_secs_f64() * 1000.0
    );
    Ok(())
}
