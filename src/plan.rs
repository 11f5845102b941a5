//! Sample plans: which frames to pull and what to call them.
//!
//! A [`SamplePlan`] is computed once from a video's [`VideoProperties`] and an
//! interval in whole seconds. It holds one [`SamplePoint`] per multiple of the
//! interval from `0` up to and including the floor of the video duration,
//! minus any point whose frame index falls past the end of the stream.

use std::slice::Iter;

use crate::{conversion::seconds_to_frame_number, error::SamplerError, metadata::VideoProperties};

/// Interval used when none is configured.
pub const DEFAULT_INTERVAL_SECONDS: u64 = 2;

/// One entry of a [`SamplePlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplePoint {
    /// Zero-based position within the plan.
    pub sequence: usize,
    /// Offset from the start of the video, in whole seconds.
    pub elapsed_seconds: u64,
    /// Frame index the offset maps to.
    pub frame_number: u64,
}

impl SamplePoint {
    /// Output file name, e.g. `frame_0003_sec0006.jpg`.
    ///
    /// Depends only on `sequence` and `elapsed_seconds`, so re-running against
    /// the same video produces the same names.
    pub fn file_name(&self) -> String {
        format!(
            "frame_{:04}_sec{:04}.jpg",
            self.sequence, self.elapsed_seconds
        )
    }
}

/// Ordered, immutable list of [`SamplePoint`]s.
///
/// Strictly increasing in both `elapsed_seconds` and `frame_number` whenever
/// the frame rate is at least one frame per interval.
///
/// # Example
///
/// ```
/// use frame_sampler::{SamplePlan, VideoProperties};
///
/// let properties = VideoProperties {
///     width: 1280,
///     height: 720,
///     frames_per_second: 25.0,
///     frame_count: 250,
///     codec: "h264".to_string(),
/// };
/// let plan = SamplePlan::new(&properties, 2)?;
/// let seconds: Vec<u64> = plan.iter().map(|point| point.elapsed_seconds).collect();
/// assert_eq!(seconds, [0, 2, 4, 6, 8]);
/// # Ok::<(), frame_sampler::SamplerError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePlan {
    interval_seconds: u64,
    points: Vec<SamplePoint>,
}

impl SamplePlan {
    /// Build the plan for `properties` at one sample every `interval_seconds`.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError::InvalidInterval`] if `interval_seconds` is zero.
    pub fn new(properties: &VideoProperties, interval_seconds: u64) -> Result<Self, SamplerError> {
        if interval_seconds == 0 {
            return Err(SamplerError::InvalidInterval);
        }

        let last_second = properties.duration_seconds().floor() as u64;
        let frames_per_second = properties.frames_per_second;

        let points = (0..=last_second)
            .step_by(interval_seconds as usize)
            .map(|elapsed_seconds| {
                (
                    elapsed_seconds,
                    seconds_to_frame_number(elapsed_seconds, frames_per_second),
                )
            })
            .filter(|&(_, frame_number)| frame_number < properties.frame_count)
            .enumerate()
            .map(|(sequence, (elapsed_seconds, frame_number))| SamplePoint {
                sequence,
                elapsed_seconds,
                frame_number,
            })
            .collect::<Vec<_>>();

        log::debug!(
            "Planned {} sample(s) every {}s over {:.2}s",
            points.len(),
            interval_seconds,
            properties.duration_seconds(),
        );

        Ok(Self {
            interval_seconds,
            points,
        })
    }

    /// Seconds between consecutive samples.
    pub fn interval_seconds(&self) -> u64 {
        self.interval_seconds
    }

    /// Number of planned samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether nothing will be sampled.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate the plan in order.
    pub fn iter(&self) -> Iter<'_, SamplePoint> {
        self.points.iter()
    }

    /// The planned points as a slice.
    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }
}

impl<'a> IntoIterator for &'a SamplePlan {
    type Item = &'a SamplePoint;
    type IntoIter = Iter<'a, SamplePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn properties(frames_per_second: f64, frame_count: u64) -> VideoProperties {
        VideoProperties {
            width: 320,
            height: 240,
            frames_per_second,
            frame_count,
            codec: "h264".to_string(),
        }
    }

    fn seconds(plan: &SamplePlan) -> Vec<u64> {
        plan.iter().map(|point| point.elapsed_seconds).collect()
    }

    #[test]
    fn one_entry_per_interval_inclusive_of_last_second() {
        // 11 seconds at 30 fps: floor(11 / 2) + 1 = 6 entries.
        let plan = SamplePlan::new(&properties(30.0, 330), 2).unwrap();
        assert_eq!(plan.len(), 6);
        assert_eq!(seconds(&plan), [0, 2, 4, 6, 8, 10]);
    }

    #[test]
    fn exact_multiple_duration_keeps_endpoint_only_if_frame_exists() {
        // 10 seconds at 25 fps: second 10 maps to frame 250, which is past the
        // last frame (249) and is dropped.
        let plan = SamplePlan::new(&properties(25.0, 250), 2).unwrap();
        assert_eq!(seconds(&plan), [0, 2, 4, 6, 8]);
        assert_eq!(plan.points().last().unwrap().frame_number, 200);
    }

    #[test]
    fn frame_numbers_are_floored() {
        let plan = SamplePlan::new(&properties(29.97, 300), 2).unwrap();
        let frames: Vec<u64> = plan.iter().map(|point| point.frame_number).collect();
        assert_eq!(frames, [0, 59, 119, 179, 239, 299]);
    }

    #[test]
    fn short_video_yields_single_sample() {
        let plan = SamplePlan::new(&properties(30.0, 45), 2).unwrap();
        assert_eq!(seconds(&plan), [0]);
        assert_eq!(plan.points()[0].frame_number, 0);
    }

    #[test]
    fn zero_frame_rate_yields_single_sample() {
        let plan = SamplePlan::new(&properties(0.0, 100), 2).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.points()[0].elapsed_seconds, 0);
        assert_eq!(plan.points()[0].frame_number, 0);
    }

    #[test]
    fn empty_stream_yields_empty_plan() {
        let plan = SamplePlan::new(&properties(0.0, 0), 2).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let result = SamplePlan::new(&properties(25.0, 250), 0);
        assert!(matches!(result, Err(SamplerError::InvalidInterval)));
    }

    #[test]
    fn plan_is_strictly_increasing_and_sequenced() {
        let plan = SamplePlan::new(&properties(24.0, 24 * 61), 3).unwrap();
        assert_eq!(plan.interval_seconds(), 3);
        for (index, pair) in plan.points().windows(2).enumerate() {
            assert!(pair[0].elapsed_seconds < pair[1].elapsed_seconds);
            assert!(pair[0].frame_number < pair[1].frame_number);
            assert_eq!(pair[0].sequence, index);
            assert_eq!(pair[1].sequence, index + 1);
        }
    }

    #[test]
    fn file_names_are_zero_padded_and_sort_in_plan_order() {
        let point = SamplePoint {
            sequence: 3,
            elapsed_seconds: 6,
            frame_number: 180,
        };
        assert_eq!(point.file_name(), "frame_0003_sec0006.jpg");

        let plan = SamplePlan::new(&properties(30.0, 30 * 40), 2).unwrap();
        let names: Vec<String> = plan.iter().map(SamplePoint::file_name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
