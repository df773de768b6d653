//! Lazy, pull-based sampling over a video source.
//!
//! [`FrameSamples`] walks a [`VideoSource`] at a fixed time step. Each call
//! to [`next()`](Iterator::next) seeks to the next sample time and decodes a
//! single frame; the iterator ends the first time no frame comes back.
//!
//! # Example
//!
//! ```no_run
//! use frame_export::{ExportError, FrameSamples, VideoSource};
//!
//! let mut source = VideoSource::open("input.mp4")?;
//! for sample in FrameSamples::new(&mut source, 0.5) {
//!     let sample = sample?;
//!     sample.image.save(format!("sample_{}.png", sample.index))?;
//! }
//! # Ok::<(), ExportError>(())
//! ```

use image::DynamicImage;

use crate::{conversion, error::ExportError, source::VideoSource};

/// The sample counter and time cursor of one export.
///
/// Starts at index 1, time 0. Each [`advance`](SampleClock::advance) adds
/// one to the index and the interval to the time, then rounds the time to
/// two decimal places.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleClock {
    index: u64,
    time: f64,
    interval: f64,
}

impl SampleClock {
    /// A clock stepping by `interval` seconds.
    pub fn new(interval: f64) -> Self {
        Self {
            index: 1,
            time: 0.0,
            interval,
        }
    }

    /// One-based index of the current sample.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Time of the current sample in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Move to the next sample.
    pub fn advance(&mut self) {
        self.index += 1;
        self.time = conversion::round_to_centiseconds(self.time + self.interval);
    }
}

/// One decoded sample.
#[derive(Debug, Clone)]
pub struct SampledFrame {
    /// One-based position in the sampling sequence.
    pub index: u64,
    /// Requested sample time in seconds.
    pub timestamp: f64,
    /// The decoded frame at its native resolution.
    pub image: DynamicImage,
}

/// Iterator over frames sampled every `interval` seconds.
///
/// Borrows the source mutably for its lifetime. Yields `Err` at most once;
/// after an error or after the source runs dry, it only returns `None`.
pub struct FrameSamples<'a> {
    source: &'a mut VideoSource,
    clock: SampleClock,
    done: bool,
}

impl<'a> FrameSamples<'a> {
    /// Sample `source` starting at time 0, stepping by `interval` seconds.
    pub fn new(source: &'a mut VideoSource, interval: f64) -> Self {
        Self {
            source,
            clock: SampleClock::new(interval),
            done: false,
        }
    }

    /// The clock position of the next sample to be attempted.
    pub fn clock(&self) -> SampleClock {
        self.clock
    }
}

impl Iterator for FrameSamples<'_> {
    type Item = Result<SampledFrame, ExportError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.source.frame_at(self.clock.time()) {
            Ok(Some(image)) => {
                let sampled = SampledFrame {
                    index: self.clock.index(),
                    timestamp: self.clock.time(),
                    image,
                };
                self.clock.advance();
                Some(Ok(sampled))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(error) => {
                self.done = true;
                Some(Err(error))
            }
        }
    }
}
