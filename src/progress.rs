//! Per-sample progress reporting.
//!
//! The sampler calls [`ProgressCallback::on_progress`] once for every plan
//! entry, after the frame has been written or skipped. The command-line tool
//! uses it to print one line per frame or to drive a progress bar.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use frame_sampler::{FrameOutcome, FrameSampler, ProgressCallback, ProgressInfo, SamplerOptions};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         if let FrameOutcome::Written(path) = &info.outcome {
//!             println!("{}/{} -> {}", info.current, info.total, path.display());
//!         }
//!     }
//! }
//!
//! let options = SamplerOptions::new().with_progress(Arc::new(PrintProgress));
//! FrameSampler::new(options).run("input.mp4", "frames")?;
//! # Ok::<(), frame_sampler::SamplerError>(())
//! ```

use std::{path::PathBuf, time::Duration};

use crate::plan::SamplePoint;

/// What happened to one sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was encoded and written to this path.
    Written(PathBuf),
    /// The frame could not be read; nothing was written.
    Skipped(String),
}

/// Snapshot delivered after each sample.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// The plan entry just processed.
    pub point: SamplePoint,
    /// What happened to it.
    pub outcome: FrameOutcome,
    /// Samples processed so far, including this one.
    pub current: u64,
    /// Samples in the plan.
    pub total: u64,
    /// Completion percentage (0.0 – 100.0).
    pub percentage: f32,
    /// Wall-clock time since sampling started.
    pub elapsed: Duration,
}

impl ProgressInfo {
    pub(crate) fn new(
        point: SamplePoint,
        outcome: FrameOutcome,
        total: u64,
        elapsed: Duration,
    ) -> Self {
        let current = point.sequence as u64 + 1;
        let percentage = if total > 0 {
            (current as f32 / total as f32) * 100.0
        } else {
            100.0
        };
        Self {
            point,
            outcome,
            current,
            total,
            percentage,
            elapsed,
        }
    }
}

/// Receives a [`ProgressInfo`] for every sample.
///
/// Callbacks observe; they cannot stop a run.
pub trait ProgressCallback: Send + Sync {
    /// Called once per plan entry, in plan order.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Discards all notifications. The default.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_tracks_sequence() {
        let point = SamplePoint {
            sequence: 1,
            elapsed_seconds: 2,
            frame_number: 50,
        };
        let info = ProgressInfo::new(
            point,
            FrameOutcome::Skipped("corrupt packet".to_string()),
            4,
            Duration::from_millis(10),
        );
        assert_eq!(info.current, 2);
        assert!((info.percentage - 50.0).abs() < f32::EPSILON);
    }
}
