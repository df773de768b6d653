//! Video metadata captured when a [`VideoSource`](crate::VideoSource) is
//! opened.

use std::time::Duration;

/// Metadata for the video stream being sampled.
///
/// Read once at open time; sampling never changes it.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct VideoMetadata {
    /// Coded frame width in pixels.
    pub width: u32,
    /// Coded frame height in pixels.
    pub height: u32,
    /// Average frames per second (approximate for variable-frame-rate content).
    pub frames_per_second: f64,
    /// Estimated total number of frames, from duration and frame rate.
    pub frame_count: u64,
    /// Container-level duration.
    pub duration: Duration,
    /// Codec name (e.g. `"h264"`, `"vp9"`, `"mjpeg"`).
    pub codec: String,
}

impl VideoMetadata {
    /// Number of samples an export at `frames_per_second` is expected to
    /// produce: `floor(duration * fps) + 1`.
    ///
    /// The decoder has the final say near the end of the stream, so treat
    /// this as an estimate.
    pub fn expected_samples(&self, frames_per_second: u32) -> u64 {
        (self.duration.as_secs_f64() * f64::from(frames_per_second)).floor() as u64 + 1
    }
}
