//! Error types for the `frame_export` crate.
//!
//! [`ExportError`] is the single error type returned by every fallible
//! operation. Reaching the end of a video is not an error: the sampling
//! layer reports it as "no frame" instead.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all frame export operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// The video file could not be opened or probed.
    #[error("Failed to open video file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::VideoSource::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file opened but does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// A decoded frame could not be turned into an image.
    #[error("Failed to decode video frame: {0}")]
    VideoDecodeError(String),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while reading directories or writing frames.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// The JPEG encoder rejected a frame.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),

    /// A run parameter is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The input path does not exist.
    #[error("Input path does not exist: {0}")]
    InputNotFound(PathBuf),

    /// Exporting a single input file failed. The run stops here.
    #[error("Failed to export frames from {path}: {source}")]
    FileExport {
        /// The input file being exported.
        path: PathBuf,
        /// What went wrong.
        #[source]
        source: Box<ExportError>,
    },
}

impl From<FfmpegError> for ExportError {
    fn from(error: FfmpegError) -> Self {
        ExportError::FfmpegError(error.to_string())
    }
}
