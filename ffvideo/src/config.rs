/*!
    Stream configuration.
*/

use std::time::Duration;

use ffvideo_transform::ScalingAlgorithm;
use ffvideo_types::{Error, PixelFormat, Result};

/**
    Requested output frame size.

    Sizes with one free dimension derive it from the source aspect ratio,
    rounded to the nearest even value so chroma-subsampled output formats
    stay aligned.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrameSize {
    /// Keep the source dimensions.
    #[default]
    Native,
    /// Scale to exactly this width and height.
    ///
    /// Stretches by default; combine with
    /// [`StreamConfig::with_keep_aspect`] to fit inside the box instead.
    Exact(u32, u32),
    /// Scale to this width, deriving the height from the source aspect ratio.
    Width(u32),
    /// Scale to this height, deriving the width from the source aspect ratio.
    Height(u32),
}

impl FrameSize {
    /**
        Resolve the requested size against the source dimensions.
    */
    pub(crate) fn resolve(
        self,
        keep_aspect: bool,
        src_width: u32,
        src_height: u32,
    ) -> Result<(u32, u32)> {
        match self {
            Self::Native => Ok((src_width, src_height)),
            Self::Exact(width, height) => {
                if width == 0 || height == 0 {
                    return Err(Error::invalid_config(format!(
                        "frame size {width}x{height} must be nonzero"
                    )));
                }
                if keep_aspect {
                    let scale = f64::min(
                        width as f64 / src_width as f64,
                        height as f64 / src_height as f64,
                    );
                    Ok((
                        round_even(src_width as f64 * scale),
                        round_even(src_height as f64 * scale),
                    ))
                } else {
                    Ok((width, height))
                }
            }
            Self::Width(width) => {
                if width == 0 {
                    return Err(Error::invalid_config("frame width must be nonzero"));
                }
                let height = src_height as f64 * width as f64 / src_width as f64;
                Ok((width, round_even(height)))
            }
            Self::Height(height) => {
                if height == 0 {
                    return Err(Error::invalid_config("frame height must be nonzero"));
                }
                let width = src_width as f64 * height as f64 / src_height as f64;
                Ok((round_even(width), height))
            }
        }
    }
}

fn round_even(dim: f64) -> u32 {
    (((dim / 2.0).round() as u32) * 2).max(2)
}

/**
    Configuration for opening a [`VideoStream`](crate::VideoStream).

    The defaults decode at native size into packed RGB.

    # Example

    ```ignore
    let config = StreamConfig::new()
        .with_pixel_format(PixelFormat::Gray8)
        .with_size(FrameSize::Width(320));
    let stream = VideoStream::open_with_config("video.mp4", config)?;
    ```
*/
#[derive(Clone, Debug)]
pub struct StreamConfig {
    /// Output pixel format.
    pub pixel_format: PixelFormat,
    /// Output frame size.
    pub size: FrameSize,
    /// Fit exact sizes inside the requested box instead of stretching.
    pub keep_aspect: bool,
    /// Scaling algorithm used when resizing.
    pub algorithm: ScalingAlgorithm,
    /// Position to seek to before decoding the first frame.
    pub start: Option<Duration>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            pixel_format: PixelFormat::Rgb24,
            size: FrameSize::Native,
            keep_aspect: false,
            algorithm: ScalingAlgorithm::default(),
            start: None,
        }
    }
}

impl StreamConfig {
    /**
        Create a configuration with default settings.
    */
    pub fn new() -> Self {
        Self::default()
    }

    /**
        Set the output pixel format.
    */
    pub fn with_pixel_format(mut self, pixel_format: PixelFormat) -> Self {
        self.pixel_format = pixel_format;
        self
    }

    /**
        Set the output frame size.
    */
    pub fn with_size(mut self, size: FrameSize) -> Self {
        self.size = size;
        self
    }

    /**
        Fit exact sizes inside the requested box, preserving aspect ratio.
    */
    pub fn with_keep_aspect(mut self, keep_aspect: bool) -> Self {
        self.keep_aspect = keep_aspect;
        self
    }

    /**
        Set the scaling algorithm.
    */
    pub fn with_algorithm(mut self, algorithm: ScalingAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /**
        Seek to this position before decoding the first frame.
    */
    pub fn with_start(mut self, start: Duration) -> Self {
        self.start = Some(start);
        self
    }
}
