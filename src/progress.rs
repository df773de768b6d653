//! Progress notifications for export runs.
//!
//! Implement [`ProgressCallback`] and attach it with
//! [`ExportConfig::with_progress`](crate::ExportConfig::with_progress) to
//! observe which file is being exported and every frame written.
//!
//! # Example
//!
//! ```no_run
//! use std::{path::Path, sync::Arc};
//!
//! use frame_export::{ExportConfig, ProgressCallback, ProgressInfo};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_file_start(&self, input: &Path) {
//!         println!("Extracting frames from {}", input.display());
//!     }
//!
//!     fn on_frame(&self, info: &ProgressInfo) {
//!         println!("#{} @ {:.2}s", info.frame_index, info.timestamp.as_secs_f64());
//!     }
//! }
//!
//! let config = ExportConfig::new("videos", "frames").with_progress(Arc::new(PrintProgress));
//! ```

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// A snapshot taken right after a frame was written.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// The video file being exported.
    pub input: PathBuf,
    /// One-based index of the frame just written.
    pub frame_index: u64,
    /// Sample time of that frame.
    pub timestamp: Duration,
    /// Where the JPEG was written.
    pub output_path: PathBuf,
}

/// Observer for export progress.
///
/// Callbacks are infallible: they watch the run but cannot stop it. All
/// methods default to doing nothing.
pub trait ProgressCallback: Send + Sync {
    /// Called before the first frame of `input` is sampled.
    fn on_file_start(&self, _input: &Path) {}

    /// Called after each frame is written.
    fn on_frame(&self, _info: &ProgressInfo) {}

    /// Called once `input` has no more frames.
    fn on_file_finish(&self, _input: &Path, _frames: u64) {}
}

/// Discards all notifications. The default when no callback is configured.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {}
