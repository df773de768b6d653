//! Internal conversion helpers.
//!
//! Timestamp arithmetic shared by the video source and the sampling clock,
//! plus pixel-buffer packing for decoded frames.

use ffmpeg_next::{Rational, frame::Video as VideoFrame};

/// Copy pixel data from an FFmpeg video frame into a tightly-packed buffer.
///
/// FFmpeg frames frequently carry per-row padding (stride > width × bpp).
/// The padding is stripped so the result can go straight into
/// [`image::RgbImage::from_raw`].
pub fn frame_to_buffer(
    video_frame: &VideoFrame,
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let row_bytes = (width as usize) * bytes_per_pixel;
    let data = video_frame.data(0);

    if stride == row_bytes {
        data[..row_bytes * (height as usize)].to_vec()
    } else {
        let mut buffer = Vec::with_capacity(row_bytes * (height as usize));
        for row in 0..(height as usize) {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + row_bytes]);
        }
        buffer
    }
}

/// Convert a position in milliseconds to a seek timestamp in AV_TIME_BASE
/// (microseconds), the unit `Input::seek` expects for container-level seeks.
pub fn milliseconds_to_seek_timestamp(milliseconds: f64) -> i64 {
    (milliseconds * 1_000.0).round() as i64
}

/// Rescale a PTS value from stream time base to seconds.
pub fn pts_to_seconds(pts: i64, time_base: Rational) -> f64 {
    if time_base.denominator() == 0 {
        return 0.0;
    }
    pts as f64 * time_base.numerator() as f64 / time_base.denominator() as f64
}

/// Convert a rational frame rate to frames per second, or `0.0` when unknown.
pub fn rational_to_fps(rate: Rational) -> f64 {
    if rate.denominator() == 0 || rate.numerator() <= 0 {
        0.0
    } else {
        rate.numerator() as f64 / rate.denominator() as f64
    }
}

/// Round a time in seconds to two decimal places.
///
/// Rounds the exact binary value of `seconds`, with exact ties going to the
/// even digit, so `0.125` becomes `0.12` and `0.025` (stored slightly above
/// the tie) becomes `0.03`.
/// Applied after every clock step so repeated additions of `1/fps` do not
/// accumulate floating-point drift.
pub fn round_to_centiseconds(seconds: f64) -> f64 {
    format!("{seconds:.2}").parse().unwrap_or(seconds)
}
