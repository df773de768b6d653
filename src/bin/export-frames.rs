use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use clap::Parser;
use colored::Colorize;
use frame_export::{
    DEFAULT_FRAMES_PER_SECOND, DEFAULT_JPEG_QUALITY, DEFAULT_MAX_DIMENSION, ExportConfig,
    ExportSummary, FfmpegLogLevel, ProgressCallback, ProgressInfo,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  export-frames --input_path=/tmp/videos --output_path=/tmp/frames\n  export-frames --input_path clip.mp4 --output_path frames --fps 1 --image_max_dimension 512\n  export-frames --input-path clip.mp4 --output-path frames --progress --verbose";

#[derive(Debug, Parser)]
#[command(
    name = "export-frames",
    version,
    about = "Export video frames as size-capped JPEG images",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Video file, or directory of video files, to export frames from.
    #[arg(long = "input_path", visible_alias = "input-path")]
    input_path: PathBuf,

    /// Directory the JPEG frames are written to (created if absent).
    #[arg(long = "output_path", visible_alias = "output-path")]
    output_path: PathBuf,

    /// Frames per second to extract from each video.
    #[arg(
        long,
        default_value_t = DEFAULT_FRAMES_PER_SECOND,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(frame_export::MAX_FRAMES_PER_SECOND))
    )]
    fps: u32,

    /// Maximum size of the longer image side, in pixels.
    #[arg(
        long = "image_max_dimension",
        visible_alias = "image-max-dimension",
        default_value_t = DEFAULT_MAX_DIMENSION,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    image_max_dimension: u32,

    /// JPEG quality of the extracted images (0-100).
    #[arg(
        long = "image_jpeg_quality",
        visible_alias = "image-jpeg-quality",
        default_value_t = DEFAULT_JPEG_QUALITY,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    image_jpeg_quality: u8,

    /// Show additional logging output.
    #[arg(long)]
    verbose: bool,

    /// Show a progress spinner per file.
    #[arg(long)]
    progress: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long, default_value = "error")]
    log_level: FfmpegLogLevel,

    /// Print the run summary as JSON.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn export_config(&self, progress: Arc<dyn ProgressCallback>) -> ExportConfig {
        ExportConfig::new(&self.input_path, &self.output_path)
            .with_frames_per_second(self.fps)
            .with_max_dimension(self.image_max_dimension)
            .with_jpeg_quality(self.image_jpeg_quality)
            .with_progress(progress)
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "frame_export=debug,export_frames=debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

struct TerminalProgress {
    announce: bool,
    spinner: bool,
    current: Mutex<Option<ProgressBar>>,
}

impl TerminalProgress {
    fn new(announce: bool, spinner: bool) -> Self {
        Self {
            announce,
            spinner,
            current: Mutex::new(None),
        }
    }

    fn with_bar(&self, action: impl FnOnce(&mut Option<ProgressBar>)) {
        if let Ok(mut guard) = self.current.lock() {
            action(&mut guard);
        }
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_file_start(&self, input: &Path) {
        if self.announce {
            println!("Extracting frames from {}", input.display());
        }
        if self.spinner {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {pos} frame(s) {msg}")
            {
                bar.set_style(style);
            }
            self.with_bar(|slot| *slot = Some(bar));
        }
    }

    fn on_frame(&self, info: &ProgressInfo) {
        self.with_bar(|slot| {
            if let Some(bar) = slot {
                bar.inc(1);
                bar.set_message(format!("@ {:.2}s", info.timestamp.as_secs_f64()));
            }
        });
    }

    fn on_file_finish(&self, _input: &Path, frames: u64) {
        self.with_bar(|slot| {
            if let Some(bar) = slot.take() {
                bar.finish_with_message(format!("done ({frames})"));
            }
        });
    }
}

fn print_summary(
    summary: &ExportSummary,
    output_path: &Path,
    as_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if as_json {
        let files: Vec<_> = summary
            .files
            .iter()
            .map(|file| {
                json!({
                    "input": file.input.display().to_string(),
                    "prefix": file.prefix.display().to_string(),
                    "frames": file.frames,
                })
            })
            .collect();
        let payload = json!({
            "output_path": output_path.display().to_string(),
            "file_count": summary.file_count(),
            "frame_count": summary.frame_count(),
            "files": files,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!(
            "{} {}",
            "success:".green().bold(),
            format!(
                "Extracted {} frame(s) from {} file(s) to {}",
                summary.frame_count(),
                summary.file_count(),
                output_path.display()
            )
            .green()
        );
        println!("Done");
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    frame_export::set_ffmpeg_log_level(cli.log_level);

    let progress = Arc::new(TerminalProgress::new(!cli.json, cli.progress));
    let config = cli.export_config(progress);
    let summary = frame_export::run(&config)?;

    print_summary(&summary, &cli.output_path, cli.json)
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}
