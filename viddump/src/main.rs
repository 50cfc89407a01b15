use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use ffvideo::{FrameSize, PixelFormat, ScalingAlgorithm, StreamConfig, VideoStream};

#[derive(Parser, Debug)]
#[command(name = "viddump")]
#[command(about = "Dump decoded video frames to image or raw files")]
struct Args {
    /// Input media file
    input: PathBuf,

    /// Print media info and exit
    #[arg(long)]
    info: bool,

    /// Output directory for frame files
    #[arg(short, long, default_value = "frames")]
    out_dir: PathBuf,

    /// Output pixel format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Rgb)]
    format: OutputFormat,

    /// Output width in pixels (height derived from aspect when not given)
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels (width derived from aspect when not given)
    #[arg(long)]
    height: Option<u32>,

    /// Fit the frame inside width x height instead of stretching
    #[arg(long)]
    keep_aspect: bool,

    /// Scaling algorithm used when resizing
    #[arg(long, value_enum, default_value_t = Algorithm::Bilinear)]
    algorithm: Algorithm,

    /// Start position in seconds
    #[arg(short, long)]
    seek: Option<f64>,

    /// Stop after writing this many frames
    #[arg(short = 'n', long)]
    frames: Option<u64>,

    /// Keep every Nth decoded frame
    #[arg(long, default_value = "1")]
    every: u64,

    /// Write raw pixel data instead of PNG images
    #[arg(long)]
    raw: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// Packed 8-bit RGB
    Rgb,
    /// Packed 8-bit RGB with alpha
    Rgba,
    /// 8-bit grayscale
    Gray,
    /// Whatever the source decodes to, useful with --raw
    Native,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Algorithm {
    Point,
    Bilinear,
    Bicubic,
    Lanczos,
}

impl From<Algorithm> for ScalingAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Point => Self::Point,
            Algorithm::Bilinear => Self::Bilinear,
            Algorithm::Bicubic => Self::Bicubic,
            Algorithm::Lanczos => Self::Lanczos,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    if args.info {
        return print_info(&args.input);
    }

    dump_frames(&args)
}

fn print_info(path: &Path) -> Result<()> {
    let info = ffvideo::probe(path).context("failed to probe input")?;

    println!("Container:    {}", info.container);
    if let Some(duration) = info.duration {
        println!("Duration:     {:.2}s", duration.as_secs_f64());
    }

    let video = &info.video;
    println!(
        "Video:        {}x{} {:?}",
        video.width, video.height, video.pixel_format
    );
    if let Some(codec) = &video.codec_name {
        println!("Codec:        {codec}");
    }
    if let Some(fps) = video.fps() {
        println!("Frame Rate:   {fps:.3} fps");
    }
    if let Some(count) = video.frame_count {
        println!("Frame Count:  {count}");
    }
    if let Some(bitrate) = video.bitrate {
        println!("Bitrate:      {} kb/s", bitrate / 1000);
    }

    Ok(())
}

fn dump_frames(args: &Args) -> Result<()> {
    let size = match (args.width, args.height) {
        (Some(width), Some(height)) => FrameSize::Exact(width, height),
        (Some(width), None) => FrameSize::Width(width),
        (None, Some(height)) => FrameSize::Height(height),
        (None, None) => FrameSize::Native,
    };

    let pixel_format = match args.format {
        OutputFormat::Rgb => PixelFormat::Rgb24,
        OutputFormat::Rgba => PixelFormat::Rgba,
        OutputFormat::Gray => PixelFormat::Gray8,
        OutputFormat::Native => {
            ffvideo::probe(&args.input)
                .context("failed to probe input")?
                .video
                .pixel_format
        }
    };

    let mut config = StreamConfig::new()
        .with_pixel_format(pixel_format)
        .with_size(size)
        .with_keep_aspect(args.keep_aspect)
        .with_algorithm(args.algorithm.into());
    if let Some(seek) = args.seek {
        config = config.with_start(Duration::from_secs_f64(seek));
    }

    let mut stream =
        VideoStream::open_with_config(&args.input, config).context("failed to open input")?;

    fs::create_dir_all(&args.out_dir).context("failed to create output directory")?;

    let every = args.every.max(1);
    let mut decoded: u64 = 0;
    let mut written: u64 = 0;

    while let Some(frame) = stream.next_frame()? {
        let keep = decoded % every == 0;
        decoded += 1;
        if !keep {
            continue;
        }

        if args.raw {
            let path = args.out_dir.join(format!("frame_{written:06}.raw"));
            fs::write(&path, &frame.data)
                .with_context(|| format!("failed to write {}", path.display()))?;
        } else {
            let path = args.out_dir.join(format!("frame_{written:06}.png"));
            frame
                .to_image()
                .context("output format cannot be encoded as an image, try --raw")?
                .save(&path)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }

        written += 1;
        if args.frames.is_some_and(|limit| written >= limit) {
            break;
        }
    }

    let skipped = stream.decode_error_count()?;
    if skipped > 0 {
        tracing::warn!(skipped, "some packets could not be decoded");
    }

    println!("Wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}
