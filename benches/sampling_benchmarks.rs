//! Benchmarks for frame sampling, resizing, and JPEG encoding.
//!
//! Run with: cargo bench
//!
//! Decoding benchmarks require fixture files from
//! `tests/fixtures/generate_fixtures.sh`.

use std::{path::Path, time::Duration};

use criterion::Criterion;
use frame_export::{
    FfmpegLogLevel, FrameSamples, VideoSource, export_video, resize_to_fit,
    set_ffmpeg_log_level, write_jpeg,
};
use image::{DynamicImage, RgbImage};

const SAMPLE_VIDEO: &str = "tests/fixtures/sample_video.mp4";

fn synthetic_frame(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    }))
}

fn benchmark_resize_and_encode(criterion: &mut Criterion) {
    let frame = synthetic_frame(1920, 1080);
    let directory = tempfile::tempdir().unwrap();
    let output = directory.path().join("frame.jpg");

    let mut group = criterion.benchmark_group("resize_and_encode");

    group.bench_function("resize 1080p to 1024", |bencher| {
        bencher.iter(|| resize_to_fit(frame.clone(), 1024));
    });

    let resized = resize_to_fit(frame.clone(), 1024);
    for quality in [50_u8, 80, 95] {
        group.bench_function(format!("encode 1024x576 at quality {quality}"), |bencher| {
            bencher.iter(|| write_jpeg(&resized, &output, quality).unwrap());
        });
    }

    group.finish();
}

fn benchmark_frame_sampling(criterion: &mut Criterion) {
    set_ffmpeg_log_level(FfmpegLogLevel::Error);

    if !Path::new(SAMPLE_VIDEO).exists() {
        eprintln!("Skipping benchmark: fixture not found");
        return;
    }

    criterion.bench_function("frame_at mid-video seek", |bencher| {
        bencher.iter(|| {
            let mut source = VideoSource::open(SAMPLE_VIDEO).unwrap();
            let _frame = source.frame_at(1.5).unwrap();
        });
    });

    criterion.bench_function("FrameSamples at 10 fps", |bencher| {
        bencher.iter(|| {
            let mut source = VideoSource::open(SAMPLE_VIDEO).unwrap();
            for sampled in FrameSamples::new(&mut source, 0.1) {
                let _ = sampled.unwrap();
            }
        });
    });
}

fn benchmark_export_video(criterion: &mut Criterion) {
    if !Path::new(SAMPLE_VIDEO).exists() {
        return;
    }

    let directory = tempfile::tempdir().unwrap();
    let prefix = directory.path().join("sample_video_img_");

    let mut group = criterion.benchmark_group("export_video");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));

    for fps in [1_u32, 5, 30] {
        group.bench_function(format!("{fps} fps, max 256"), |bencher| {
            bencher.iter(|| {
                export_video(SAMPLE_VIDEO, &prefix, 1.0 / f64::from(fps), 256, 80).unwrap()
            });
        });
    }

    group.finish();
}

criterion::criterion_group!(
    benches,
    benchmark_resize_and_encode,
    benchmark_frame_sampling,
    benchmark_export_video,
);
criterion::criterion_main!(benches);
