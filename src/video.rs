//! FFmpeg-backed video source.
//!
//! [`VideoFile`] opens a container, picks the best video stream, caches its
//! [`VideoProperties`], and serves single frames by index through
//! [`FrameSource`]. The demuxer is closed when the `VideoFile` is dropped.

use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
};

use ffmpeg_next::{
    Rational,
    codec::context::Context as CodecContext,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::RgbImage;

use crate::{
    conversion::{frame_number_to_seek_timestamp, frame_to_rgb_buffer, pts_to_frame_number},
    error::SamplerError,
    metadata::VideoProperties,
    source::FrameSource,
};

/// An open video file.
///
/// # Example
///
/// ```no_run
/// use frame_sampler::{FrameSource, VideoFile};
///
/// let mut video = VideoFile::open("input.mp4")?;
/// let first = video.read_frame(0)?;
/// first.save("first.jpg")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct VideoFile {
    input_context: Input,
    stream_index: usize,
    time_base: Rational,
    properties: VideoProperties,
    path: PathBuf,
}

impl Debug for VideoFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoFile")
            .field("path", &self.path)
            .field("stream_index", &self.stream_index)
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

impl VideoFile {
    /// Open a video file and read its stream properties.
    ///
    /// Initializes FFmpeg (idempotent), opens the container and selects the
    /// stream FFmpeg ranks as the best video stream.
    ///
    /// # Errors
    ///
    /// - [`SamplerError::FileOpen`] if the file is missing, unreadable, or its
    ///   codec has no decoder.
    /// - [`SamplerError::NoVideoStream`] if the container has no video.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SamplerError> {
        let path = path.as_ref().to_path_buf();

        log::debug!("Opening video file: {}", path.display());

        ffmpeg_next::init().map_err(|error| SamplerError::FileOpen {
            path: path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| SamplerError::FileOpen {
                path: path.clone(),
                reason: error.to_string(),
            })?;

        let container_duration = input_context.duration();

        let (stream_index, time_base, properties) = {
            let stream = input_context
                .streams()
                .best(Type::Video)
                .ok_or(SamplerError::NoVideoStream)?;
            let index = stream.index();

            let decoder_context =
                CodecContext::from_parameters(stream.parameters()).map_err(|error| {
                    SamplerError::FileOpen {
                        path: path.clone(),
                        reason: format!(
                            "Failed to read codec parameters for stream {index}: {error}"
                        ),
                    }
                })?;
            let decoder =
                decoder_context
                    .decoder()
                    .video()
                    .map_err(|error| SamplerError::FileOpen {
                        path: path.clone(),
                        reason: format!(
                            "Failed to create video decoder for stream {index}: {error}"
                        ),
                    })?;

            let frame_rate = stream.avg_frame_rate();
            let frames_per_second = if frame_rate.denominator() != 0 {
                frame_rate.numerator() as f64 / frame_rate.denominator() as f64
            } else {
                let rate = stream.rate();
                if rate.denominator() != 0 {
                    rate.numerator() as f64 / rate.denominator() as f64
                } else {
                    0.0
                }
            };

            // Prefer the muxer's frame count; fall back to duration × rate.
            let frame_count = if stream.frames() > 0 {
                stream.frames() as u64
            } else if container_duration > 0 && frames_per_second > 0.0 {
                let seconds = container_duration as f64 / 1_000_000.0;
                (seconds * frames_per_second) as u64
            } else {
                0
            };

            let codec = decoder
                .codec()
                .map(|codec| codec.name().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            let properties = VideoProperties {
                width: decoder.width(),
                height: decoder.height(),
                frames_per_second,
                frame_count,
                codec,
            };
            (index, stream.time_base(), properties)
        };

        log::info!(
            "Opened video file: {} (stream={}, {}x{}, {:.2} fps, {} frames, codec={})",
            path.display(),
            stream_index,
            properties.width,
            properties.height,
            properties.frames_per_second,
            properties.frame_count,
            properties.codec,
        );

        Ok(Self {
            input_context,
            stream_index,
            time_base,
            properties,
            path,
        })
    }

    /// Cached properties of the selected video stream.
    pub fn properties(&self) -> &VideoProperties {
        &self.properties
    }

    /// Path the file was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seek to the keyframe at or before `frame_number` and decode forward to
    /// the first frame at or past it.
    fn decode_at(&mut self, frame_number: u64) -> Result<RgbImage, SamplerError> {
        let VideoProperties {
            width,
            height,
            frames_per_second,
            ..
        } = self.properties;
        let time_base = self.time_base;
        let read_error = move |error: ffmpeg_next::Error| frame_read_error(frame_number, error);

        let stream = self
            .input_context
            .stream(self.stream_index)
            .ok_or(SamplerError::NoVideoStream)?;
        let decoder_context =
            CodecContext::from_parameters(stream.parameters()).map_err(read_error)?;
        let mut decoder = decoder_context.decoder().video().map_err(read_error)?;

        let mut scaler = ScalingContext::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            Pixel::RGB24,
            width,
            height,
            ScalingFlags::BILINEAR,
        )
        .map_err(read_error)?;

        let target_timestamp = frame_number_to_seek_timestamp(frame_number, frames_per_second);
        self.input_context
            .seek(target_timestamp, ..target_timestamp)
            .map_err(read_error)?;

        let mut decoded_frame = VideoFrame::empty();
        let mut rgb_frame = VideoFrame::empty();
        let mut reached = false;

        for (stream, packet) in self.input_context.packets() {
            if stream.index() != self.stream_index {
                continue;
            }
            decoder.send_packet(&packet).map_err(read_error)?;

            while decoder.receive_frame(&mut decoded_frame).is_ok() {
                let pts = decoded_frame.timestamp().or(decoded_frame.pts()).unwrap_or(0);
                if pts_to_frame_number(pts, time_base, frames_per_second) >= frame_number {
                    reached = true;
                    break;
                }
            }
            if reached {
                break;
            }
        }

        if !reached {
            decoder.send_eof().map_err(read_error)?;
            while decoder.receive_frame(&mut decoded_frame).is_ok() {
                let pts = decoded_frame.timestamp().or(decoded_frame.pts()).unwrap_or(0);
                if pts_to_frame_number(pts, time_base, frames_per_second) >= frame_number {
                    reached = true;
                    break;
                }
            }
        }

        if !reached {
            return Err(frame_read_error(
                frame_number,
                "no decodable frame at or after the seek target",
            ));
        }

        scaler
            .run(&decoded_frame, &mut rgb_frame)
            .map_err(read_error)?;
        let buffer = frame_to_rgb_buffer(&rgb_frame, width, height);
        RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
            frame_read_error(
                frame_number,
                "decoded frame does not match the stream dimensions",
            )
        })
    }
}

fn frame_read_error(frame_number: u64, reason: impl Display) -> SamplerError {
    SamplerError::FrameRead {
        frame_number,
        reason: reason.to_string(),
    }
}

impl FrameSource for VideoFile {
    fn properties(&self) -> &VideoProperties {
        &self.properties
    }

    fn read_frame(&mut self, frame_number: u64) -> Result<RgbImage, SamplerError> {
        let total_frames = self.properties.frame_count;
        if frame_number >= total_frames {
            return Err(SamplerError::FrameOutOfRange {
                frame_number,
                total_frames,
            });
        }

        log::debug!("Reading frame {frame_number} from {}", self.path.display());
        self.decode_at(frame_number)
    }
}

impl Drop for VideoFile {
    fn drop(&mut self) {
        log::debug!("Releasing video file: {}", self.path.display());
    }
}
