//! Sampling options.
//!
//! [`SamplerOptions`] is a builder carrying the sampling interval, the JPEG
//! quality, and an optional progress callback.
//!
//! ```
//! use frame_sampler::SamplerOptions;
//!
//! let options = SamplerOptions::new()
//!     .with_interval(5)
//!     .with_jpeg_quality(90);
//! assert_eq!(options.interval_seconds(), 5);
//! assert_eq!(options.jpeg_quality(), 90);
//! ```

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use crate::{
    plan::DEFAULT_INTERVAL_SECONDS,
    progress::{NoOpProgress, ProgressCallback},
};

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Settings for a [`FrameSampler`](crate::FrameSampler) run.
#[derive(Clone)]
pub struct SamplerOptions {
    pub(crate) interval_seconds: u64,
    pub(crate) jpeg_quality: u8,
    pub(crate) progress: Arc<dyn ProgressCallback>,
    has_progress: bool,
}

impl Debug for SamplerOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SamplerOptions")
            .field("interval_seconds", &self.interval_seconds)
            .field("jpeg_quality", &self.jpeg_quality)
            .field("has_progress", &self.has_progress)
            .finish()
    }
}

impl Default for SamplerOptions {
    fn default() -> Self {
        Self {
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            progress: Arc::new(NoOpProgress),
            has_progress: false,
        }
    }
}

impl SamplerOptions {
    /// Two-second interval, quality 95, no progress reporting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample one frame every `seconds`.
    ///
    /// Zero is accepted here and rejected when the plan is built.
    pub fn with_interval(mut self, seconds: u64) -> Self {
        self.interval_seconds = seconds;
        self
    }

    /// JPEG quality, clamped to `1..=100`.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Report each processed sample to `callback`.
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self.has_progress = true;
        self
    }

    /// Seconds between samples.
    pub fn interval_seconds(&self) -> u64 {
        self.interval_seconds
    }

    /// JPEG quality in `1..=100`.
    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = SamplerOptions::new();
        assert_eq!(options.interval_seconds(), 2);
        assert_eq!(options.jpeg_quality(), 95);
        assert!(format!("{options:?}").contains("has_progress: false"));
    }

    #[test]
    fn quality_is_clamped() {
        assert_eq!(SamplerOptions::new().with_jpeg_quality(0).jpeg_quality(), 1);
        assert_eq!(SamplerOptions::new().with_jpeg_quality(200).jpeg_quality(), 100);
    }

    #[test]
    fn progress_flag_shows_in_debug() {
        let options = SamplerOptions::new().with_progress(Arc::new(NoOpProgress));
        assert!(format!("{options:?}").contains("has_progress: true"));
    }
}
