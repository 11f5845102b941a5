//! End-to-end tests for the `frame-sampler` binary.
//!
//! The fixture-backed test needs files from `tests/fixtures/generate_fixtures.sh`
//! and returns early when they are missing.

use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn frame_sampler(arguments: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_frame-sampler"))
        .args(arguments)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run frame-sampler")
}

#[test]
fn extract_missing_video_exits_with_status_one() {
    let scratch = tempfile::tempdir().expect("Failed to create temp dir");
    let out = scratch.path().join("frames");
    let missing = scratch.path().join("missing.mp4");

    let output = frame_sampler(&[
        "extract",
        missing.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1), "Expected exit status 1");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.lines().any(|line| line.starts_with("error:")),
        "Expected an error line on stderr, got: {stderr}"
    );
    assert!(out.is_dir(), "Output directory should be created before opening");
    assert_eq!(
        fs::read_dir(&out).unwrap().count(),
        0,
        "No files should be written when the video cannot be opened"
    );
}

#[test]
fn extract_into_existing_directory_prints_no_warning() {
    let path = fixture("sample_video.mp4");
    if !path.exists() {
        return;
    }

    let out = tempfile::tempdir().expect("Failed to create temp dir");
    let arguments = [
        "extract",
        path.to_str().unwrap(),
        "--out",
        out.path().to_str().unwrap(),
    ];

    let first = frame_sampler(&arguments);
    assert_eq!(first.status.code(), Some(0));
    let second = frame_sampler(&arguments);
    assert_eq!(second.status.code(), Some(0));

    let stderr = String::from_utf8_lossy(&second.stderr);
    assert!(
        !stderr.contains("warning:"),
        "A clean rerun should not warn, got: {stderr}"
    );
}

#[test]
fn extract_fixture_prints_header_and_exits_zero() {
    let path = fixture("sample_video.mp4");
    if !path.exists() {
        return;
    }

    let out = tempfile::tempdir().expect("Failed to create temp dir");
    let output = frame_sampler(&[
        "extract",
        path.to_str().unwrap(),
        "--out",
        out.path().to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(0), "Expected exit status 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Video Properties:"), "Missing header: {stdout}");
    // 10 s at 25 fps: seconds 0, 2, 4, 6 and 8; second 10 is past the last frame.
    assert!(
        stdout.contains("Extracting 5 frames (1 every 2 seconds)..."),
        "Missing plan line: {stdout}"
    );
    assert!(
        stdout.contains("Extracted 5 of 5 frame(s)"),
        "Summary should match the announced plan: {stdout}"
    );

    let mut names: Vec<String> = fs::read_dir(out.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names.len(), 5);
    assert_eq!(names[0], "frame_0000_sec0000.jpg");
    assert_eq!(names[4], "frame_0004_sec0008.jpg");
}
