//! Frame sampling: resize a decoded frame to a bounded size and write it as
//! a JPEG.
//!
//! The size rule is integer-based. When the longer side of a frame exceeds
//! the cap, it becomes the cap and the shorter side is scaled by
//! `cap * short / long` with truncating division, so the aspect ratio may
//! drift by up to one pixel.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use image::{DynamicImage, codecs::jpeg::JpegEncoder, imageops::FilterType};

use crate::{error::ExportError, source::VideoSource};

/// Compute the output size for a `width × height` frame so that neither side
/// exceeds `max_dimension`.
///
/// Frames already within the cap keep their exact size. A zero cap leaves the
/// size untouched; a scaled side that truncates to zero is clamped to one
/// pixel so the result stays encodable.
///
/// ```
/// use frame_export::fit_dimensions;
///
/// assert_eq!(fit_dimensions(200, 50, 100), (100, 25));
/// assert_eq!(fit_dimensions(50, 200, 100), (25, 100));
/// assert_eq!(fit_dimensions(640, 480, 1024), (640, 480));
/// ```
pub fn fit_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    if max_dimension == 0 || width.max(height) <= max_dimension {
        return (width, height);
    }

    let cap = u64::from(max_dimension);
    if height < width {
        let scaled = cap * u64::from(height) / u64::from(width);
        (max_dimension, (scaled as u32).max(1))
    } else {
        let scaled = cap * u64::from(width) / u64::from(height);
        ((scaled as u32).max(1), max_dimension)
    }
}

/// Resize `image` so its longer side is at most `max_dimension`.
///
/// Returns the image unchanged when no resize is needed.
pub fn resize_to_fit(image: DynamicImage, max_dimension: u32) -> DynamicImage {
    let (width, height) = (image.width(), image.height());
    let (target_width, target_height) = fit_dimensions(width, height, max_dimension);
    if (target_width, target_height) == (width, height) {
        return image;
    }
    image.resize_exact(target_width, target_height, FilterType::Triangle)
}

/// Encode `image` as a baseline JPEG at `quality` and write it to `path`,
/// replacing any existing file.
///
/// `quality` uses the libjpeg scale; values below 1 behave as 1 and values
/// above 100 as 100.
pub fn write_jpeg<P: AsRef<Path>>(
    image: &DynamicImage,
    path: P,
    quality: u8,
) -> Result<(), ExportError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));
    image.write_with_encoder(encoder)?;
    writer.flush()?;
    Ok(())
}

/// Sample one frame: decode the frame at `timestamp_seconds`, cap its size,
/// and write it to `output_path` as a JPEG.
///
/// Returns `Ok(false)` and writes nothing when the source has no frame at or
/// after that time. Returns `Ok(true)` after exactly one file write.
///
/// # Example
///
/// ```no_run
/// use frame_export::{ExportError, VideoSource, sample};
///
/// let mut source = VideoSource::open("input.mp4")?;
/// let written = sample(&mut source, 2.0, "frame.jpg", 1024, 80)?;
/// # Ok::<(), ExportError>(())
/// ```
pub fn sample<P: AsRef<Path>>(
    source: &mut VideoSource,
    timestamp_seconds: f64,
    output_path: P,
    max_dimension: u32,
    jpeg_quality: u8,
) -> Result<bool, ExportError> {
    let Some(image) = source.frame_at(timestamp_seconds)? else {
        return Ok(false);
    };
    save_frame(image, output_path, max_dimension, jpeg_quality)?;
    Ok(true)
}

/// Resize and write an already decoded frame.
pub fn save_frame<P: AsRef<Path>>(
    image: DynamicImage,
    output_path: P,
    max_dimension: u32,
    jpeg_quality: u8,
) -> Result<(), ExportError> {
    let image = resize_to_fit(image, max_dimension);
    write_jpeg(&image, output_path.as_ref(), jpeg_quality)?;
    log::debug!(
        "Wrote {}x{} frame to {}",
        image.width(),
        image.height(),
        output_path.as_ref().display()
    );
    Ok(())
}
