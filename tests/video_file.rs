//! VideoFile and end-to-end sampling tests against a real video.
//!
//! Tests require fixture files from `tests/fixtures/generate_fixtures.sh` and
//! return early when they are missing.

use std::{fs, path::Path};

use frame_sampler::{FrameSampler, FrameSource, SamplePlan, SamplerError, SamplerOptions, VideoFile};

fn sample_video_path() -> &'static str {
    "tests/fixtures/sample_video.mp4"
}

fn audio_only_path() -> &'static str {
    "tests/fixtures/sample_audio_only.m4a"
}

#[test]
fn properties_match_fixture() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let video = VideoFile::open(path).expect("Failed to open fixture");
    let properties = video.properties();
    assert_eq!(properties.width, 320);
    assert_eq!(properties.height, 240);
    assert!((properties.frames_per_second - 25.0).abs() < 0.01);
    assert_eq!(properties.frame_count, 250);
    assert!((properties.duration_seconds() - 10.0).abs() < 0.01);
}

#[test]
fn read_first_and_middle_frames() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut video = VideoFile::open(path).expect("Failed to open fixture");
    let first = video.read_frame(0).expect("Failed to read frame 0");
    assert_eq!(first.dimensions(), (320, 240));

    let middle = video.read_frame(125).expect("Failed to read frame 125");
    assert_eq!(middle.dimensions(), (320, 240));
}

#[test]
fn read_past_end_is_recoverable() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut video = VideoFile::open(path).expect("Failed to open fixture");
    let error = video.read_frame(999_999).unwrap_err();
    assert!(error.is_recoverable());
    assert!(
        error.to_string().contains("out of range"),
        "Error message should mention out of range: {error}",
    );
}

#[test]
fn audio_only_file_has_no_video_stream() {
    let path = audio_only_path();
    if !Path::new(path).exists() {
        return;
    }

    let result = VideoFile::open(path);
    assert!(matches!(result, Err(SamplerError::NoVideoStream)));
}

#[test]
fn sample_fixture_every_two_seconds() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let frames_directory = output.path().join("frames");
    let report = FrameSampler::default()
        .run(path, &frames_directory)
        .expect("Sampling failed");

    // 10 s at 25 fps: 0, 2, 4, 6, 8 (second 10 is frame 250, past the end).
    assert_eq!(report.plan.len(), 5);
    assert_eq!(report.extracted_count() + report.skipped_count(), 5);
    assert!(report.extracted_count() >= 4);

    for frame in &report.extracted {
        let decoded = image::open(&frame.path).expect("Output is not a readable JPEG");
        assert_eq!((decoded.width(), decoded.height()), (320, 240));
    }

    let mut names: Vec<String> = fs::read_dir(&frames_directory)
        .expect("Failed to list output")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names.first().map(String::as_str), Some("frame_0000_sec0000.jpg"));
}

#[test]
fn plan_from_fixture_with_custom_interval() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let video = VideoFile::open(path).expect("Failed to open fixture");
    let options = SamplerOptions::new().with_interval(3);
    let plan = SamplePlan::new(video.properties(), options.interval_seconds())
        .expect("Failed to plan");
    let seconds: Vec<u64> = plan.iter().map(|point| point.elapsed_seconds).collect();
    assert_eq!(seconds, [0, 3, 6, 9]);
}
