//! Seekable video source.
//!
//! [`VideoSource`] owns the demuxer and decoder for one file. Its only job
//! is "give me the frame at (or just after) this time": it seeks to the
//! nearest keyframe at or before the requested position, then decodes
//! forward until it reaches a frame whose presentation time is not earlier
//! than the target.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    time::Duration,
};

use ffmpeg_next::{
    Error as FfmpegError, Packet, Rational,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::{DynamicImage, RgbImage};

use crate::{conversion, error::ExportError, metadata::VideoMetadata};

/// An open, decodable video file.
///
/// Created via [`VideoSource::open`]. A source is owned by one export for
/// the duration of its sampling loop and released when dropped.
///
/// # Example
///
/// ```no_run
/// use frame_export::{ExportError, VideoSource};
///
/// let mut source = VideoSource::open("input.mp4")?;
/// if let Some(image) = source.frame_at(1.5)? {
///     image.save("at_1_5s.png")?;
/// }
/// # Ok::<(), ExportError>(())
/// ```
pub struct VideoSource {
    input_context: Input,
    decoder: VideoDecoder,
    /// RGB24 converter, rebuilt when the decoded geometry or format changes.
    scaler: Option<(ScalingContext, Pixel, u32, u32)>,
    video_stream_index: usize,
    time_base: Rational,
    /// Presentation time of the stream's first frame, in seconds.
    start_offset: f64,
    /// How far before a target a decoded frame may land and still count.
    tolerance: f64,
    metadata: VideoMetadata,
    position: Duration,
    decoded_frame: VideoFrame,
    rgb_frame: VideoFrame,
    eof_sent: bool,
    file_path: PathBuf,
}

impl Debug for VideoSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoSource")
            .field("file_path", &self.file_path)
            .field("video_stream_index", &self.video_stream_index)
            .field("metadata", &self.metadata)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl VideoSource {
    /// Open a video file for sampling.
    ///
    /// Initializes FFmpeg (idempotent), opens the container, picks the best
    /// video stream and prepares a decoder for it.
    ///
    /// # Errors
    ///
    /// - [`ExportError::FileOpen`] if the file cannot be opened or its video
    ///   decoder cannot be created.
    /// - [`ExportError::NoVideoStream`] if the container has no video.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();

        log::debug!("Opening video file: {}", file_path.display());

        ffmpeg_next::init().map_err(|error| ExportError::FileOpen {
            path: file_path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| ExportError::FileOpen {
                path: file_path.clone(),
                reason: error.to_string(),
            })?;

        let stream = input_context
            .streams()
            .best(Type::Video)
            .ok_or(ExportError::NoVideoStream)?;
        let video_stream_index = stream.index();
        let time_base = stream.time_base();

        let start_time = stream.start_time();
        let start_offset = if start_time == i64::MIN {
            0.0
        } else {
            conversion::pts_to_seconds(start_time, time_base)
        };

        let frames_per_second = match conversion::rational_to_fps(stream.avg_frame_rate()) {
            fps if fps > 0.0 => fps,
            _ => conversion::rational_to_fps(stream.rate()),
        };

        let decoder_context =
            CodecContext::from_parameters(stream.parameters()).map_err(|error| {
                ExportError::FileOpen {
                    path: file_path.clone(),
                    reason: format!(
                        "Failed to read codec parameters for stream {video_stream_index}: {error}"
                    ),
                }
            })?;
        let decoder = decoder_context
            .decoder()
            .video()
            .map_err(|error| ExportError::FileOpen {
                path: file_path.clone(),
                reason: format!(
                    "Failed to create video decoder for stream {video_stream_index}: {error}"
                ),
            })?;

        let duration_microseconds = input_context.duration();
        let duration = if duration_microseconds > 0 {
            Duration::from_micros(duration_microseconds as u64)
        } else {
            Duration::ZERO
        };

        let frame_count = if frames_per_second > 0.0 {
            (duration.as_secs_f64() * frames_per_second) as u64
        } else {
            0
        };

        let codec = decoder
            .codec()
            .map(|codec| codec.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let metadata = VideoMetadata {
            width: decoder.width(),
            height: decoder.height(),
            frames_per_second,
            frame_count,
            duration,
            codec,
        };

        let tolerance = if frames_per_second > 0.0 {
            0.5 / frames_per_second
        } else {
            0.0005
        };

        log::debug!(
            "Video stream: index={}, {}x{}, {:.2} fps, codec={}, duration={:.2}s, start={:.3}s",
            video_stream_index,
            metadata.width,
            metadata.height,
            metadata.frames_per_second,
            metadata.codec,
            metadata.duration.as_secs_f64(),
            start_offset,
        );

        Ok(Self {
            input_context,
            decoder,
            scaler: None,
            video_stream_index,
            time_base,
            start_offset,
            tolerance,
            metadata,
            position: Duration::ZERO,
            decoded_frame: VideoFrame::empty(),
            rgb_frame: VideoFrame::empty(),
            eof_sent: false,
            file_path,
        })
    }

    /// Metadata read when the file was opened.
    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    /// Path this source was opened from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// The position of the most recent seek, relative to the first frame.
    pub fn position(&self) -> Duration {
        self.position
    }

    /// Decode the frame at `seconds` (relative to the stream start), or the
    /// first frame after it.
    ///
    /// Returns `Ok(None)` when no frame can be produced: the position is past
    /// the end of the stream, the seek was refused, or the remaining data
    /// cannot be decoded. Errors are reserved for failures converting a frame
    /// that did decode.
    pub fn frame_at(&mut self, seconds: f64) -> Result<Option<DynamicImage>, ExportError> {
        let seconds = seconds.max(0.0);
        self.position = Duration::from_secs_f64(seconds);

        let target = self.start_offset + seconds;
        let seek_timestamp = conversion::milliseconds_to_seek_timestamp(target * 1_000.0);

        if let Err(error) = self.input_context.seek(seek_timestamp, ..seek_timestamp) {
            log::debug!(
                "Seek to {seconds:.2}s failed in {}: {error}",
                self.file_path.display()
            );
            return Ok(None);
        }
        self.decoder.flush();
        self.eof_sent = false;

        loop {
            if self.decoder.receive_frame(&mut self.decoded_frame).is_ok() {
                let frame_seconds = self
                    .decoded_frame
                    .timestamp()
                    .or_else(|| self.decoded_frame.pts())
                    .map(|pts| conversion::pts_to_seconds(pts, self.time_base));

                match frame_seconds {
                    Some(at) if at + self.tolerance < target => continue,
                    _ => return self.convert_current_frame().map(Some),
                }
            }

            if self.eof_sent {
                return Ok(None);
            }

            let mut packet = Packet::empty();
            match packet.read(&mut self.input_context) {
                Ok(()) => {
                    if packet.stream() != self.video_stream_index {
                        continue;
                    }
                    if let Err(error) = self.decoder.send_packet(&packet) {
                        log::debug!(
                            "Skipping undecodable packet in {}: {error}",
                            self.file_path.display()
                        );
                    }
                }
                Err(FfmpegError::Eof) => {
                    if let Err(error) = self.decoder.send_eof() {
                        log::debug!("Decoder refused EOF: {error}");
                        return Ok(None);
                    }
                    self.eof_sent = true;
                }
                Err(error) => {
                    log::warn!(
                        "Read error in {} at {seconds:.2}s, treating as end of stream: {error}",
                        self.file_path.display()
                    );
                    return Ok(None);
                }
            }
        }
    }

    /// Convert the current `decoded_frame` to an RGB8 image at its native size.
    fn convert_current_frame(&mut self) -> Result<DynamicImage, ExportError> {
        let format = self.decoded_frame.format();
        let width = self.decoded_frame.width();
        let height = self.decoded_frame.height();

        if width == 0 || height == 0 {
            return Err(ExportError::VideoDecodeError(format!(
                "Decoded frame has empty dimensions {width}x{height}"
            )));
        }

        let reusable = matches!(
            &self.scaler,
            Some((_, f, w, h)) if *f == format && *w == width && *h == height
        );
        if !reusable {
            let context = ScalingContext::get(
                format,
                width,
                height,
                Pixel::RGB24,
                width,
                height,
                ScalingFlags::BILINEAR,
            )?;
            self.scaler = Some((context, format, width, height));
        }

        if let Some((scaler, ..)) = self.scaler.as_mut() {
            scaler.run(&self.decoded_frame, &mut self.rgb_frame)?;
        }

        let buffer = conversion::frame_to_buffer(&self.rgb_frame, width, height, 3);
        let image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
            ExportError::VideoDecodeError(
                "Failed to construct RGB image from decoded frame data".to_string(),
            )
        })?;
        Ok(DynamicImage::ImageRgb8(image))
    }
}
