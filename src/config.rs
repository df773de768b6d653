//! Export configuration.
//!
//! [`ExportConfig`] holds the immutable parameters of one run. It is built
//! once, validated once by [`run`](crate::run), and then only read.
//!
//! # Example
//!
//! ```
//! use frame_export::ExportConfig;
//!
//! let config = ExportConfig::new("videos", "frames")
//!     .with_frames_per_second(2)
//!     .with_max_dimension(512)
//!     .with_jpeg_quality(90);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.interval(), 0.5);
//! ```

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    error::ExportError,
    progress::{NoOpProgress, ProgressCallback},
};

/// Default sampling rate in frames per second.
pub const DEFAULT_FRAMES_PER_SECOND: u32 = 30;
/// Default cap on the longer image side, in pixels.
pub const DEFAULT_MAX_DIMENSION: u32 = 1024;
/// Default JPEG quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 80;
/// Highest accepted sampling rate. Sample times are rounded to hundredths of
/// a second, so every rate above 100 steps by 0.01 s. From 200 up the step
/// rounds away entirely and the clock stops advancing.
pub const MAX_FRAMES_PER_SECOND: u32 = 199;

/// Parameters for an export run.
#[derive(Clone)]
pub struct ExportConfig {
    pub(crate) input_path: PathBuf,
    pub(crate) output_path: PathBuf,
    pub(crate) frames_per_second: u32,
    pub(crate) max_dimension: u32,
    pub(crate) jpeg_quality: u8,
    pub(crate) progress: Arc<dyn ProgressCallback>,
}

impl Debug for ExportConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ExportConfig")
            .field("input_path", &self.input_path)
            .field("output_path", &self.output_path)
            .field("frames_per_second", &self.frames_per_second)
            .field("max_dimension", &self.max_dimension)
            .field("jpeg_quality", &self.jpeg_quality)
            .finish_non_exhaustive()
    }
}

impl ExportConfig {
    /// Create a configuration reading from `input_path` (a file or a
    /// directory of videos) and writing into the `output_path` directory.
    ///
    /// Defaults: 30 fps, 1024 px max dimension, JPEG quality 80, no progress
    /// callback.
    pub fn new<I: Into<PathBuf>, O: Into<PathBuf>>(input_path: I, output_path: O) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            frames_per_second: DEFAULT_FRAMES_PER_SECOND,
            max_dimension: DEFAULT_MAX_DIMENSION,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            progress: Arc::new(NoOpProgress),
        }
    }

    /// Set the sampling rate. The time step between samples is `1 / fps`.
    #[must_use]
    pub fn with_frames_per_second(mut self, frames_per_second: u32) -> Self {
        self.frames_per_second = frames_per_second;
        self
    }

    /// Set the cap on the longer side of every written image.
    #[must_use]
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    /// Set the JPEG quality (0–100, higher is better).
    #[must_use]
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn frames_per_second(&self) -> u32 {
        self.frames_per_second
    }

    pub fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    /// Seconds between consecutive samples.
    pub fn interval(&self) -> f64 {
        1.0 / f64::from(self.frames_per_second)
    }

    /// Check that every parameter is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidConfig`] for an empty path, a sampling
    /// rate of 0 or above [`MAX_FRAMES_PER_SECOND`], a max dimension of 0, or
    /// a JPEG quality above 100.
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.input_path.as_os_str().is_empty() {
            return Err(ExportError::InvalidConfig(
                "input path must not be empty".to_string(),
            ));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ExportError::InvalidConfig(
                "output path must not be empty".to_string(),
            ));
        }
        if self.frames_per_second == 0 {
            return Err(ExportError::InvalidConfig(
                "fps must be greater than 0".to_string(),
            ));
        }
        if self.frames_per_second > MAX_FRAMES_PER_SECOND {
            return Err(ExportError::InvalidConfig(format!(
                "fps must be at most {MAX_FRAMES_PER_SECOND} (got {})",
                self.frames_per_second
            )));
        }
        if self.max_dimension == 0 {
            return Err(ExportError::InvalidConfig(
                "image max dimension must be greater than 0".to_string(),
            ));
        }
        if self.jpeg_quality > 100 {
            return Err(ExportError::InvalidConfig(format!(
                "JPEG quality must be between 0 and 100 (got {})",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}
