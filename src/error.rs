//! Error types for the `frame-sampler` crate.
//!
//! [`SamplerError`] is returned by every fallible operation. Variants fall into
//! two tiers: failures that end a sampling run (the source could not be opened,
//! the output directory is unwritable) and per-frame read failures that the
//! sampler records as skipped samples before moving on.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `frame-sampler` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SamplerError {
    /// The video file could not be opened.
    #[error("Failed to open video file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::VideoFile::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file opened but does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// A single frame could not be sought to or decoded.
    #[error("Failed to read frame {frame_number}: {reason}")]
    FrameRead {
        /// The frame index that was requested.
        frame_number: u64,
        /// Why the read failed.
        reason: String,
    },

    /// The requested frame number is at or past the reported frame count.
    #[error("Frame {frame_number} is out of range (video has {total_frames} frames)")]
    FrameOutOfRange {
        /// The frame number that was requested.
        frame_number: u64,
        /// The total number of frames in the video.
        total_frames: u64,
    },

    /// A sampling interval of zero seconds was provided.
    #[error("Sampling interval must be greater than zero")]
    InvalidInterval,

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while creating directories or writing images.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// JPEG encoding failed.
    #[error("Image encoding error: {0}")]
    ImageError(#[from] ImageError),
}

impl SamplerError {
    /// Whether this error only affects a single sample.
    ///
    /// Recoverable errors are turned into skipped entries by
    /// [`FrameSampler`](crate::FrameSampler); everything else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SamplerError::FrameRead { .. } | SamplerError::FrameOutOfRange { .. }
        )
    }
}

impl From<FfmpegError> for SamplerError {
    fn from(error: FfmpegError) -> Self {
        SamplerError::FfmpegError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_level_errors_are_recoverable() {
        let read = SamplerError::FrameRead {
            frame_number: 12,
            reason: "decoder drained".to_string(),
        };
        let out_of_range = SamplerError::FrameOutOfRange {
            frame_number: 300,
            total_frames: 250,
        };
        assert!(read.is_recoverable());
        assert!(out_of_range.is_recoverable());
    }

    #[test]
    fn open_and_io_errors_are_fatal() {
        let open = SamplerError::FileOpen {
            path: PathBuf::from("missing.mp4"),
            reason: "No such file or directory".to_string(),
        };
        assert!(!open.is_recoverable());
        assert!(!SamplerError::NoVideoStream.is_recoverable());
        assert!(!SamplerError::IoError(IoError::other("disk full")).is_recoverable());
    }

    #[test]
    fn messages_carry_context() {
        let error = SamplerError::FrameOutOfRange {
            frame_number: 300,
            total_frames: 250,
        };
        assert_eq!(
            error.to_string(),
            "Frame 300 is out of range (video has 250 frames)"
        );
    }
}
