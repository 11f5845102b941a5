//! Video stream properties.
//!
//! [`VideoProperties`] is read once when a [`VideoFile`](crate::VideoFile) is
//! opened and cached for the lifetime of the handle.

/// Properties of the video stream being sampled.
///
/// # Example
///
/// ```no_run
/// use frame_sampler::VideoFile;
///
/// let video = VideoFile::open("input.mp4").unwrap();
/// let properties = video.properties();
/// println!(
///     "{}x{} @ {:.2} fps, {} frames",
///     properties.width, properties.height, properties.frames_per_second, properties.frame_count,
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct VideoProperties {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second (approximate for variable-frame-rate content).
    pub frames_per_second: f64,
    /// Total number of frames, as reported by the container or estimated from
    /// the container duration.
    pub frame_count: u64,
    /// Codec name (e.g. `"h264"`, `"vp9"`, `"av1"`).
    pub codec: String,
}

impl VideoProperties {
    /// Duration in seconds derived from frame count and frame rate.
    ///
    /// A non-positive frame rate yields `0.0`.
    pub fn duration_seconds(&self) -> f64 {
        if self.frames_per_second > 0.0 {
            self.frame_count as f64 / self.frames_per_second
        } else {
            0.0
        }
    }

    /// Duration in minutes, for display.
    pub fn duration_minutes(&self) -> f64 {
        self.duration_seconds() / 60.0
    }
}
