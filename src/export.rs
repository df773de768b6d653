//! Export driver and batch orchestration.
//!
//! [`export_video`] samples one file into `<prefix>1.jpg`, `<prefix>2.jpg`,
//! … until the video runs out of frames. [`run`] applies it to every input
//! named by an [`ExportConfig`] and stops the whole run at the first file
//! that fails.
//!
//! # Example
//!
//! ```no_run
//! use frame_export::{ExportConfig, ExportError};
//!
//! let config = ExportConfig::new("/tmp/videos", "/tmp/frames").with_frames_per_second(1);
//! let summary = frame_export::run(&config)?;
//! println!("{} frame(s) from {} file(s)", summary.frame_count(), summary.file_count());
//! # Ok::<(), ExportError>(())
//! ```

use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    config::ExportConfig,
    error::ExportError,
    iterator::FrameSamples,
    progress::{NoOpProgress, ProgressCallback, ProgressInfo},
    sampler,
    source::VideoSource,
};

/// Directory entry name that macOS Finder drops into folders. Never treated
/// as a video.
pub const MACOS_METADATA_ENTRY: &str = ".DS_Store";

/// Result of exporting one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    /// The video file that was sampled.
    pub input: PathBuf,
    /// Prefix every frame path of this file starts with.
    pub prefix: PathBuf,
    /// Number of JPEG files written.
    pub frames: u64,
}

/// Result of a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// One entry per input file, in processing order.
    pub files: Vec<FileSummary>,
}

impl ExportSummary {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Total frames written across all files.
    pub fn frame_count(&self) -> u64 {
        self.files.iter().map(|file| file.frames).sum()
    }
}

/// List the video files named by `input_path`.
///
/// A directory yields every entry except [`MACOS_METADATA_ENTRY`], sorted
/// by file name. No extension filtering happens: anything the decoder
/// cannot open fails later, during export. Any other path is returned as the
/// only input.
///
/// # Errors
///
/// [`ExportError::InputNotFound`] if `input_path` does not exist, or
/// [`ExportError::IoError`] if the directory cannot be read.
pub fn collect_inputs(input_path: &Path) -> Result<Vec<PathBuf>, ExportError> {
    if !input_path.exists() {
        return Err(ExportError::InputNotFound(input_path.to_path_buf()));
    }

    if !input_path.is_dir() {
        return Ok(vec![input_path.to_path_buf()]);
    }

    let mut inputs = Vec::new();
    for entry in fs::read_dir(input_path)? {
        let entry = entry?;
        if entry.file_name() == MACOS_METADATA_ENTRY {
            continue;
        }
        inputs.push(entry.path());
    }
    inputs.sort();
    Ok(inputs)
}

/// Output prefix for `input`: `<output_dir>/<input stem>_img_`.
///
/// ```
/// use std::path::Path;
///
/// use frame_export::frame_prefix;
///
/// let prefix = frame_prefix(Path::new("/tmp/frames"), Path::new("/videos/clip.mp4"));
/// assert_eq!(prefix, Path::new("/tmp/frames/clip_img_"));
/// ```
pub fn frame_prefix(output_dir: &Path, input: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_default();
    name.push("_img_");
    output_dir.join(name)
}

/// Path of frame `index` under `prefix`: the prefix followed by
/// `<index>.jpg`.
pub fn frame_path(prefix: &Path, index: u64) -> PathBuf {
    let mut path = OsString::from(prefix.as_os_str());
    path.push(format!("{index}.jpg"));
    PathBuf::from(path)
}

/// Export frames of one video every `interval_seconds`.
///
/// Writes `<output_prefix>1.jpg`, `<output_prefix>2.jpg`, … in order, one
/// file per decodable sample, and returns how many were written. A file
/// that opens but has no video stream yields zero frames.
///
/// # Errors
///
/// Any failure to open the file, convert a decoded frame, or write a JPEG.
pub fn export_video<P: AsRef<Path>, Q: AsRef<Path>>(
    video_path: P,
    output_prefix: Q,
    interval_seconds: f64,
    max_dimension: u32,
    jpeg_quality: u8,
) -> Result<u64, ExportError> {
    export_video_with_progress(
        video_path.as_ref(),
        output_prefix.as_ref(),
        interval_seconds,
        max_dimension,
        jpeg_quality,
        &NoOpProgress,
    )
}

fn export_video_with_progress(
    video_path: &Path,
    output_prefix: &Path,
    interval_seconds: f64,
    max_dimension: u32,
    jpeg_quality: u8,
    progress: &dyn ProgressCallback,
) -> Result<u64, ExportError> {
    let mut source = match VideoSource::open(video_path) {
        Ok(source) => source,
        Err(ExportError::NoVideoStream) => {
            log::warn!(
                "{} has no video stream, no frames exported",
                video_path.display()
            );
            return Ok(0);
        }
        Err(error) => return Err(error),
    };

    let mut written = 0_u64;
    for sampled in FrameSamples::new(&mut source, interval_seconds) {
        let sampled = sampled?;
        let output_path = frame_path(output_prefix, sampled.index);
        sampler::save_frame(sampled.image, &output_path, max_dimension, jpeg_quality)?;
        written += 1;

        progress.on_frame(&ProgressInfo {
            input: video_path.to_path_buf(),
            frame_index: sampled.index,
            timestamp: Duration::from_secs_f64(sampled.timestamp),
            output_path,
        });
    }

    log::info!(
        "Exported {written} frame(s) from {}",
        video_path.display()
    );
    Ok(written)
}

/// Run a complete export.
///
/// Validates `config`, lists the inputs, creates the output directory (with
/// parents) and exports each input in turn. The first failing file ends the
/// run: its error is returned wrapped in [`ExportError::FileExport`] and the
/// remaining files are not touched. Frames already written stay on disk.
///
/// # Errors
///
/// - [`ExportError::InvalidConfig`] before anything is touched.
/// - [`ExportError::InputNotFound`] if the input path is missing.
/// - [`ExportError::IoError`] if the output directory cannot be created.
/// - [`ExportError::FileExport`] for the first file that fails.
pub fn run(config: &ExportConfig) -> Result<ExportSummary, ExportError> {
    config.validate()?;

    let inputs = collect_inputs(&config.input_path)?;
    fs::create_dir_all(&config.output_path)?;

    log::info!(
        "Exporting {} file(s) from {} to {} at {} fps",
        inputs.len(),
        config.input_path.display(),
        config.output_path.display(),
        config.frames_per_second,
    );

    let interval = config.interval();
    let mut summary = ExportSummary::default();

    for input in inputs {
        config.progress.on_file_start(&input);

        let prefix = frame_prefix(&config.output_path, &input);
        let frames = export_video_with_progress(
            &input,
            &prefix,
            interval,
            config.max_dimension,
            config.jpeg_quality,
            config.progress.as_ref(),
        )
        .map_err(|error| ExportError::FileExport {
            path: input.clone(),
            source: Box::new(error),
        })?;

        config.progress.on_file_finish(&input, frames);
        summary.files.push(FileSummary {
            input,
            prefix,
            frames,
        });
    }

    Ok(summary)
}
