//! Batch export tests: input discovery, output naming, fail-fast runs.
//!
//! Tests that decode video require fixture files from
//! `tests/fixtures/generate_fixtures.sh` and are skipped when missing.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use frame_export::{
    ExportConfig, ExportError, ProgressCallback, ProgressInfo, collect_inputs, frame_path,
    frame_prefix, run,
};

const SAMPLE_VIDEO: &str = "tests/fixtures/sample_video.mp4";
const SAMPLE_PORTRAIT: &str = "tests/fixtures/sample_video_portrait.mp4";
const SAMPLE_AUDIO_ONLY: &str = "tests/fixtures/sample_audio_only.m4a";

fn file_names(directory: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(directory)
        .expect("Failed to read directory")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn frames_with_prefix(directory: &Path, prefix: &str) -> Vec<String> {
    file_names(directory)
        .into_iter()
        .filter(|name| name.starts_with(prefix))
        .collect()
}

// ── collect_inputs ─────────────────────────────────────────────────

#[test]
fn collect_inputs_missing_path() {
    let result = collect_inputs(Path::new("no/such/videos"));
    assert!(matches!(result, Err(ExportError::InputNotFound(_))));
}

#[test]
fn collect_inputs_single_file() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let file = directory.path().join("clip.mp4");
    fs::write(&file, b"not really a video").unwrap();

    assert_eq!(collect_inputs(&file).unwrap(), vec![file]);
}

#[test]
fn collect_inputs_skips_finder_metadata_and_sorts() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    for name in ["b.mov", ".DS_Store", "a.mp4", "notes.txt"] {
        fs::write(directory.path().join(name), b"x").unwrap();
    }

    let inputs: Vec<PathBuf> = collect_inputs(directory.path()).unwrap();
    let names: Vec<_> = inputs
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a.mp4", "b.mov", "notes.txt"]);
}

// ── naming ─────────────────────────────────────────────────────────

#[test]
fn prefix_strips_only_last_extension() {
    let output = Path::new("/tmp/frames");
    assert_eq!(
        frame_prefix(output, Path::new("/videos/clip.tar.mp4")),
        Path::new("/tmp/frames/clip.tar_img_")
    );
    assert_eq!(
        frame_prefix(output, Path::new("/videos/clip")),
        Path::new("/tmp/frames/clip_img_")
    );
}

#[test]
fn frame_path_appends_index_and_extension() {
    let prefix = Path::new("/tmp/frames/clip_img_");
    assert_eq!(
        frame_path(prefix, 12),
        Path::new("/tmp/frames/clip_img_12.jpg")
    );
    assert_eq!(frame_path(prefix, 1), Path::new("/tmp/frames/clip_img_1.jpg"));
}

// ── run: failures before any export ────────────────────────────────

#[test]
fn missing_input_creates_no_output_directory() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = directory.path().join("frames");
    let config = ExportConfig::new(directory.path().join("missing"), &output);

    let error = run(&config).unwrap_err();
    assert!(matches!(error, ExportError::InputNotFound(_)));
    assert!(!output.exists());
}

#[test]
fn invalid_config_creates_no_output_directory() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = directory.path().join("frames");
    let config = ExportConfig::new(directory.path(), &output).with_frames_per_second(0);

    let error = run(&config).unwrap_err();
    assert!(matches!(error, ExportError::InvalidConfig(_)));
    assert!(!output.exists());
}

#[test]
fn corrupt_file_aborts_run() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let input = directory.path().join("invalid.mp4");
    fs::write(&input, b"this is not a media file").unwrap();
    let output = directory.path().join("frames");

    let error = run(&ExportConfig::new(&input, &output)).unwrap_err();
    assert!(matches!(error, ExportError::FileExport { .. }));
    assert!(
        error.to_string().contains("Failed to export frames from"),
        "{error}"
    );
    assert!(error.to_string().contains("invalid.mp4"), "{error}");
    assert!(file_names(&output).is_empty());
}

#[test]
fn empty_directory_creates_nested_output() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let input = directory.path().join("videos");
    fs::create_dir(&input).unwrap();
    fs::write(input.join(".DS_Store"), b"finder").unwrap();
    let output = directory.path().join("a").join("b").join("frames");

    let summary = run(&ExportConfig::new(&input, &output)).expect("Empty run should succeed");
    assert_eq!(summary.file_count(), 0);
    assert_eq!(summary.frame_count(), 0);
    assert!(output.is_dir());
}

// ── run: fixture-backed exports ────────────────────────────────────

#[test]
fn single_file_export_at_one_fps() {
    if !Path::new(SAMPLE_VIDEO).exists() {
        return;
    }

    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = directory.path().join("frames");
    let config = ExportConfig::new(SAMPLE_VIDEO, &output)
        .with_frames_per_second(1)
        .with_max_dimension(100);

    let summary = run(&config).expect("Export failed");
    assert_eq!(summary.file_count(), 1);

    let frames = summary.frame_count();
    assert!((3..=4).contains(&frames), "Expected 3 or 4 frames, got {frames}");

    let names = frames_with_prefix(&output, "sample_video_img_");
    assert_eq!(names.len() as u64, frames);
    for index in 1..=frames {
        let path = output.join(format!("sample_video_img_{index}.jpg"));
        let image = image::open(&path).expect("Frame should be a readable JPEG");
        assert_eq!((image.width(), image.height()), (100, 25));
    }
}

#[test]
fn repeated_run_overwrites_same_files() {
    if !Path::new(SAMPLE_VIDEO).exists() {
        return;
    }

    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = directory.path().join("frames");
    let config = ExportConfig::new(SAMPLE_VIDEO, &output)
        .with_frames_per_second(1)
        .with_max_dimension(100);

    let first = run(&config).expect("First export failed");
    let names_after_first = file_names(&output);
    let second = run(&config).expect("Second export failed");

    assert_eq!(first, second);
    assert_eq!(file_names(&output), names_after_first);
}

#[test]
fn directory_export_keeps_files_apart() {
    if !Path::new(SAMPLE_VIDEO).exists() {
        return;
    }

    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let input = directory.path().join("videos");
    fs::create_dir(&input).unwrap();
    fs::copy(SAMPLE_VIDEO, input.join("first.mp4")).unwrap();
    fs::copy(SAMPLE_VIDEO, input.join("second.mp4")).unwrap();
    fs::write(input.join(".DS_Store"), b"finder").unwrap();
    let output = directory.path().join("frames");

    let summary = run(&ExportConfig::new(&input, &output)
        .with_frames_per_second(1)
        .with_max_dimension(64))
    .expect("Export failed");

    assert_eq!(summary.file_count(), 2);
    assert_eq!(summary.files[0].input, input.join("first.mp4"));
    assert_eq!(summary.files[1].input, input.join("second.mp4"));

    let first = frames_with_prefix(&output, "first_img_");
    let second = frames_with_prefix(&output, "second_img_");
    assert_eq!(first.len() as u64, summary.files[0].frames);
    assert_eq!(second.len() as u64, summary.files[1].frames);
    assert_eq!(
        file_names(&output).len(),
        first.len() + second.len(),
        "Only frame files should be written"
    );
}

#[test]
fn first_failure_stops_remaining_files() {
    if !Path::new(SAMPLE_VIDEO).exists() {
        return;
    }

    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let input = directory.path().join("videos");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("a_corrupt.mp4"), b"garbage").unwrap();
    fs::copy(SAMPLE_VIDEO, input.join("b_valid.mp4")).unwrap();
    let output = directory.path().join("frames");

    let error = run(&ExportConfig::new(&input, &output).with_frames_per_second(1)).unwrap_err();
    match error {
        ExportError::FileExport { path, .. } => assert_eq!(path, input.join("a_corrupt.mp4")),
        other => panic!("Expected FileExport, got {other:?}"),
    }
    assert!(frames_with_prefix(&output, "b_valid_img_").is_empty());
}

#[test]
fn portrait_video_caps_height() {
    if !Path::new(SAMPLE_PORTRAIT).exists() {
        return;
    }

    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = directory.path().join("frames");
    let config = ExportConfig::new(SAMPLE_PORTRAIT, &output)
        .with_frames_per_second(1)
        .with_max_dimension(100);

    let summary = run(&config).expect("Export failed");
    assert!(summary.frame_count() >= 1);

    let image = image::open(output.join("sample_video_portrait_img_1.jpg"))
        .expect("First frame should exist");
    assert_eq!((image.width(), image.height()), (25, 100));
}

#[test]
fn audio_only_file_contributes_no_frames() {
    if !Path::new(SAMPLE_AUDIO_ONLY).exists() {
        return;
    }

    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = directory.path().join("frames");

    let summary =
        run(&ExportConfig::new(SAMPLE_AUDIO_ONLY, &output)).expect("Audio-only run failed");
    assert_eq!(summary.file_count(), 1);
    assert_eq!(summary.frame_count(), 0);
    assert!(file_names(&output).is_empty());
}

// ── progress ───────────────────────────────────────────────────────

#[derive(Default)]
struct RecordingProgress {
    events: Mutex<Vec<String>>,
    frames: Mutex<Vec<ProgressInfo>>,
}

impl ProgressCallback for RecordingProgress {
    fn on_file_start(&self, input: &Path) {
        self.events
            .lock()
            .unwrap()
            .push(format!("start {}", input.display()));
    }

    fn on_frame(&self, info: &ProgressInfo) {
        self.frames.lock().unwrap().push(info.clone());
    }

    fn on_file_finish(&self, input: &Path, frames: u64) {
        self.events
            .lock()
            .unwrap()
            .push(format!("finish {} {frames}", input.display()));
    }
}

#[test]
fn progress_reports_every_frame() {
    if !Path::new(SAMPLE_VIDEO).exists() {
        return;
    }

    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output = directory.path().join("frames");
    let progress = Arc::new(RecordingProgress::default());
    let config = ExportConfig::new(SAMPLE_VIDEO, &output)
        .with_frames_per_second(2)
        .with_max_dimension(50)
        .with_progress(progress.clone());

    let summary = run(&config).expect("Export failed");

    let events = progress.events.lock().unwrap();
    assert_eq!(
        *events,
        [
            format!("start {SAMPLE_VIDEO}"),
            format!("finish {SAMPLE_VIDEO} {}", summary.frame_count()),
        ]
    );

    let frames = progress.frames.lock().unwrap();
    assert_eq!(frames.len() as u64, summary.frame_count());
    for (position, info) in frames.iter().enumerate() {
        assert_eq!(info.frame_index, position as u64 + 1);
        assert_eq!(info.timestamp.as_secs_f64(), position as f64 * 0.5);
        assert!(info.output_path.exists());
    }
}
