//! The seek-and-read seam between the sampler and a decoder.

use image::RgbImage;

use crate::{error::SamplerError, metadata::VideoProperties};

/// Anything that can hand out decoded frames by index.
///
/// [`VideoFile`](crate::VideoFile) is the FFmpeg-backed implementation. The
/// sampler only ever calls [`read_frame`](FrameSource::read_frame) with
/// strictly increasing indices below
/// [`VideoProperties::frame_count`].
pub trait FrameSource {
    /// Properties of the underlying video stream.
    fn properties(&self) -> &VideoProperties;

    /// Position the read cursor at `frame_number` and decode one frame.
    ///
    /// # Errors
    ///
    /// Implementations return a recoverable error
    /// ([`SamplerError::FrameRead`] or [`SamplerError::FrameOutOfRange`]) when
    /// only this frame is unavailable. Any other error aborts sampling.
    fn read_frame(&mut self, frame_number: u64) -> Result<RgbImage, SamplerError>;
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn properties(&self) -> &VideoProperties {
        (**self).properties()
    }

    fn read_frame(&mut self, frame_number: u64) -> Result<RgbImage, SamplerError> {
        (**self).read_frame(frame_number)
    }
}
