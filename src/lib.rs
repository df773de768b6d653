//! # frame_export
//!
//! Export still frames from video files at a fixed sampling rate, capped to a
//! maximum image dimension and written as quality-controlled JPEGs.
//!
//! Decoding is powered by FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate; resizing and
//! JPEG encoding use the [`image`](https://crates.io/crates/image) crate.
//!
//! ## Quick Start
//!
//! ### Export a directory of videos
//!
//! ```no_run
//! use frame_export::{ExportConfig, ExportError};
//!
//! let config = ExportConfig::new("/tmp/videos", "/tmp/frames")
//!     .with_frames_per_second(30)
//!     .with_max_dimension(1024)
//!     .with_jpeg_quality(80);
//!
//! let summary = frame_export::run(&config)?;
//! println!("wrote {} frames", summary.frame_count());
//! # Ok::<(), ExportError>(())
//! ```
//!
//! ### Sample a single frame
//!
//! ```no_run
//! use frame_export::{ExportError, VideoSource};
//!
//! let mut source = VideoSource::open("input.mp4")?;
//! let written = frame_export::sample(&mut source, 3.0, "at_3s.jpg", 640, 90)?;
//! # Ok::<(), ExportError>(())
//! ```
//!
//! ## Output naming
//!
//! Each input `<dir>/<name>.<ext>` produces `<output>/<name>_img_1.jpg`,
//! `<output>/<name>_img_2.jpg`, … one file per sample, sampled every
//! `1 / fps` seconds starting at 0 until the video has no more frames.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

mod config;
mod conversion;
pub mod error;
mod export;
pub mod ffmpeg;
mod iterator;
pub mod metadata;
pub mod progress;
mod sampler;
mod source;

pub use config::{
    DEFAULT_FRAMES_PER_SECOND, DEFAULT_JPEG_QUALITY, DEFAULT_MAX_DIMENSION, ExportConfig,
    MAX_FRAMES_PER_SECOND,
};
pub use error::ExportError;
pub use export::{
    ExportSummary, FileSummary, MACOS_METADATA_ENTRY, collect_inputs, export_video, frame_path,
    frame_prefix, run,
};
pub use ffmpeg::{FfmpegLogLevel, UnknownLogLevel, set_ffmpeg_log_level};
pub use iterator::{FrameSamples, SampleClock, SampledFrame};
pub use metadata::VideoMetadata;
pub use progress::{ProgressCallback, ProgressInfo};
pub use sampler::{fit_dimensions, resize_to_fit, sample, save_frame, write_jpeg};
pub use source::VideoSource;
