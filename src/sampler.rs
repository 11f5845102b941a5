//! The frame sampling run.
//!
//! [`FrameSampler::run`] is the whole operation: create the output directory,
//! open the video, plan the samples, then for each one seek, read, encode as
//! JPEG and write. Unreadable frames are logged and skipped; anything else
//! aborts the run.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    time::Instant,
};

use image::{RgbImage, codecs::jpeg::JpegEncoder};

use crate::{
    configuration::SamplerOptions,
    error::SamplerError,
    metadata::VideoProperties,
    plan::{SamplePlan, SamplePoint},
    progress::{FrameOutcome, ProgressInfo},
    source::FrameSource,
    video::VideoFile,
};

/// A sample that was written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFrame {
    /// The plan entry.
    pub point: SamplePoint,
    /// Where the JPEG was written.
    pub path: PathBuf,
}

/// A sample whose frame could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFrame {
    /// The plan entry.
    pub point: SamplePoint,
    /// Why the read failed.
    pub reason: String,
}

/// Outcome of a completed sampling run.
#[derive(Debug, Clone)]
#[must_use]
pub struct SamplingReport {
    /// Properties of the sampled video.
    pub properties: VideoProperties,
    /// The plan that was executed.
    pub plan: SamplePlan,
    /// Frames written, in plan order.
    pub extracted: Vec<ExtractedFrame>,
    /// Frames skipped, in plan order.
    pub skipped: Vec<SkippedFrame>,
    /// Directory the frames were written to.
    pub output_directory: PathBuf,
}

impl SamplingReport {
    /// Number of JPEG files written.
    pub fn extracted_count(&self) -> usize {
        self.extracted.len()
    }

    /// Number of samples that could not be read.
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Samples frames at a fixed interval and writes them as JPEG files.
///
/// # Example
///
/// ```no_run
/// use frame_sampler::{FrameSampler, SamplerOptions};
///
/// let report = FrameSampler::new(SamplerOptions::new()).run("input.mp4", "frames")?;
/// println!("wrote {} frame(s)", report.extracted_count());
/// # Ok::<(), frame_sampler::SamplerError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FrameSampler {
    options: SamplerOptions,
}

impl FrameSampler {
    /// Create a sampler with the given options.
    pub fn new(options: SamplerOptions) -> Self {
        Self { options }
    }

    /// The options this sampler runs with.
    pub fn options(&self) -> &SamplerOptions {
        &self.options
    }

    /// Sample `video_path` into `output_directory`.
    ///
    /// The directory (and any missing parents) is created first; it may
    /// already exist. The video is released before this returns, on success
    /// and on error alike.
    ///
    /// # Errors
    ///
    /// - [`SamplerError::IoError`] if the directory cannot be created or a
    ///   frame cannot be written.
    /// - [`SamplerError::FileOpen`] / [`SamplerError::NoVideoStream`] if the
    ///   video cannot be opened. No image files are written in that case.
    /// - [`SamplerError::InvalidInterval`] if the configured interval is zero.
    pub fn run<P, Q>(
        &self,
        video_path: P,
        output_directory: Q,
    ) -> Result<SamplingReport, SamplerError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let output_directory = output_directory.as_ref();
        fs::create_dir_all(output_directory)?;

        let mut video = VideoFile::open(video_path)?;
        self.sample(&mut video, output_directory)
    }

    /// Sample from an already-open source.
    ///
    /// `output_directory` must exist.
    ///
    /// # Errors
    ///
    /// Same as [`run`](FrameSampler::run), minus the open errors. Recoverable
    /// errors from `source` become [`SkippedFrame`] entries.
    pub fn sample<S: FrameSource>(
        &self,
        source: S,
        output_directory: &Path,
    ) -> Result<SamplingReport, SamplerError> {
        let plan = self.plan(source.properties())?;
        self.sample_plan(source, plan, output_directory)
    }

    /// The plan this sampler would execute for `properties`.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError::InvalidInterval`] if the configured interval is
    /// zero.
    pub fn plan(&self, properties: &VideoProperties) -> Result<SamplePlan, SamplerError> {
        SamplePlan::new(properties, self.options.interval_seconds)
    }

    /// Execute a prebuilt `plan` against `source`.
    ///
    /// The plan is carried into the report unchanged, so the count a caller
    /// announces before the run is the one the report holds. `output_directory`
    /// must exist.
    ///
    /// # Errors
    ///
    /// Same as [`sample`](FrameSampler::sample).
    pub fn sample_plan<S: FrameSource>(
        &self,
        mut source: S,
        plan: SamplePlan,
        output_directory: &Path,
    ) -> Result<SamplingReport, SamplerError> {
        let properties = source.properties().clone();
        let total = plan.len() as u64;
        let started = Instant::now();

        log::info!(
            "Sampling {} frame(s), one every {}s, into {}",
            total,
            plan.interval_seconds(),
            output_directory.display(),
        );

        let mut extracted = Vec::with_capacity(plan.len());
        let mut skipped = Vec::new();

        for point in &plan {
            let outcome = match source.read_frame(point.frame_number) {
                Ok(image) => {
                    let path = output_directory.join(point.file_name());
                    self.write_jpeg(&image, &path)?;
                    log::debug!(
                        "Wrote frame {} ({}s) to {}",
                        point.frame_number,
                        point.elapsed_seconds,
                        path.display(),
                    );
                    extracted.push(ExtractedFrame {
                        point: *point,
                        path: path.clone(),
                    });
                    FrameOutcome::Written(path)
                }
                Err(error) if error.is_recoverable() => {
                    log::warn!(
                        "Skipping sample at {}s (frame {}): {error}",
                        point.elapsed_seconds,
                        point.frame_number,
                    );
                    let reason = error.to_string();
                    skipped.push(SkippedFrame {
                        point: *point,
                        reason: reason.clone(),
                    });
                    FrameOutcome::Skipped(reason)
                }
                Err(error) => return Err(error),
            };

            self.options.progress.on_progress(&ProgressInfo::new(
                *point,
                outcome,
                total,
                started.elapsed(),
            ));
        }

        log::info!(
            "Extracted {} of {} frame(s) in {:.2}s ({} skipped)",
            extracted.len(),
            total,
            started.elapsed().as_secs_f64(),
            skipped.len(),
        );

        Ok(SamplingReport {
            properties,
            plan,
            extracted,
            skipped,
            output_directory: output_directory.to_path_buf(),
        })
    }

    fn write_jpeg(&self, image: &RgbImage, path: &Path) -> Result<(), SamplerError> {
        let mut writer = BufWriter::new(File::create(path)?);
        let encoder = JpegEncoder::new_with_quality(&mut writer, self.options.jpeg_quality);
        image.write_with_encoder(encoder)?;
        writer.flush()?;
        Ok(())
    }
}
