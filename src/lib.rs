//! # frame-sampler
//!
//! Sample still frames from a video at a fixed time interval and write each
//! one to disk as a JPEG image.
//!
//! Decoding and seeking go through FFmpeg via
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next); JPEG encoding goes
//! through the [`image`](https://crates.io/crates/image) crate.
//!
//! ## Quick Start
//!
//! ```no_run
//! use frame_sampler::{FrameSampler, SamplerOptions};
//!
//! // One frame every 2 seconds at JPEG quality 95.
//! let report = FrameSampler::new(SamplerOptions::new()).run("input.mp4", "frames")?;
//! for frame in &report.extracted {
//!     println!("{}s -> {}", frame.point.elapsed_seconds, frame.path.display());
//! }
//! for skipped in &report.skipped {
//!     eprintln!("skipped {}s: {}", skipped.point.elapsed_seconds, skipped.reason);
//! }
//! # Ok::<(), frame_sampler::SamplerError>(())
//! ```
//!
//! ## Output naming
//!
//! Each sample is written as `frame_{sequence:04}_sec{elapsed:04}.jpg`, where
//! `sequence` is its position in the [`SamplePlan`] and `elapsed` the offset
//! in whole seconds. Names depend only on the plan, so repeated runs over the
//! same video overwrite the same files.
//!
//! ## Failure handling
//!
//! Failing to open the video is fatal. A frame that cannot be sought to or
//! decoded is logged through the [`log`](https://crates.io/crates/log) facade,
//! recorded in [`SamplingReport::skipped`], and sampling continues.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on the system.

pub mod configuration;
mod conversion;
pub mod error;
pub mod ffmpeg;
pub mod metadata;
pub mod plan;
pub mod progress;
pub mod sampler;
pub mod source;
pub mod video;

pub use configuration::{DEFAULT_JPEG_QUALITY, SamplerOptions};
pub use conversion::seconds_to_frame_number;
pub use error::SamplerError;
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use metadata::VideoProperties;
pub use plan::{DEFAULT_INTERVAL_SECONDS, SamplePlan, SamplePoint};
pub use progress::{FrameOutcome, ProgressCallback, ProgressInfo};
pub use sampler::{ExtractedFrame, FrameSampler, SamplingReport, SkippedFrame};
pub use source::FrameSource;
pub use video::VideoFile;
