/*!
    Video frame transformation.
*/

use ffmpeg_next::{
    software::scaling::{context::Context as ScalerContext, flag::Flags as ScalerFlags},
    util::frame::video::Video as VideoFrameFFmpeg,
};

use ffvideo_types::{Error, FrameView, PixelFormat, Result, VideoFrame};

/**
    Scaling algorithm for video resizing.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScalingAlgorithm {
    /// Point sampling (nearest neighbor) - fastest, lowest quality.
    Point,
    /// Bilinear interpolation - fast, acceptable quality.
    #[default]
    Bilinear,
    /// Bicubic interpolation - moderate speed, good quality.
    Bicubic,
    /// Lanczos resampling - slowest, highest quality.
    Lanczos,
}

impl ScalingAlgorithm {
    fn to_ffmpeg_flags(self) -> ScalerFlags {
        match self {
            Self::Point => ScalerFlags::POINT,
            Self::Bilinear => ScalerFlags::BILINEAR,
            Self::Bicubic => ScalerFlags::BICUBIC,
            Self::Lanczos => ScalerFlags::LANCZOS,
        }
    }
}

/**
    Configuration for video transformation.
*/
#[derive(Clone, Debug)]
pub struct VideoTransformConfig {
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// Target pixel format.
    pub format: PixelFormat,
    /// Scaling algorithm to use.
    pub algorithm: ScalingAlgorithm,
}

impl VideoTransformConfig {
    /**
        Create a new video transform configuration.
    */
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
            algorithm: ScalingAlgorithm::default(),
        }
    }

    /**
        Create configuration for packed RGB output.
    */
    pub fn to_rgb24(width: u32, height: u32) -> Self {
        Self::new(width, height, PixelFormat::Rgb24)
    }

    /**
        Create configuration for RGBA output.
    */
    pub fn to_rgba(width: u32, height: u32) -> Self {
        Self::new(width, height, PixelFormat::Rgba)
    }

    /**
        Create configuration for grayscale output.
    */
    pub fn to_gray8(width: u32, height: u32) -> Self {
        Self::new(width, height, PixelFormat::Gray8)
    }

    /**
        Set the scaling algorithm.
    */
    pub fn with_algorithm(mut self, algorithm: ScalingAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

/**
    Video frame transformer.

    Converts borrowed frame views into owned frames, handling:
    - Pixel format conversion (YUV to RGB, grayscale, etc.)
    - Scaling to different dimensions
    - Stride handling

    The scaler context is lazily initialized on first use and automatically
    reinitialized if the input geometry changes. A frame that already matches
    the target format and size is copied out directly without touching
    libswscale, so such a conversion is bit-exact.
*/
pub struct VideoTransform {
    config: VideoTransformConfig,
    /// Cached scaler context and the input format it was created for.
    scaler_state: Option<ScalerState>,
}

struct ScalerState {
    context: ScalerContext,
    src_width: u32,
    src_height: u32,
    src_format: PixelFormat,
}

impl VideoTransform {
    /**
        Create a new video transformer with the given configuration.

        Fails with [`Error::InvalidConfig`] if either target dimension is
        zero. The check runs here, before any FFmpeg object exists.
    */
    pub fn new(config: VideoTransformConfig) -> Result<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(Error::invalid_config(format!(
                "target dimensions {}x{} must be nonzero",
                config.width, config.height
            )));
        }

        Ok(Self {
            config,
            scaler_state: None,
        })
    }

    /**
        Get the target configuration.
    */
    pub fn config(&self) -> &VideoTransformConfig {
        &self.config
    }

    /**
        Transform a frame view into an owned frame in the target format.

        The scaler is lazily initialized on first call and reused for
        subsequent frames with the same input geometry. If the input geometry
        changes, the scaler is reinitialized.
    */
    pub fn transform(&mut self, frame: &FrameView<'_>) -> Result<VideoFrame> {
        if frame.width() == 0 || frame.height() == 0 {
            return Err(Error::invalid_data("input frame has zero dimensions"));
        }

        // Same format and size: plain copy, bit-exact
        if frame.width() == self.config.width
            && frame.height() == self.config.height
            && frame.format() == self.config.format
        {
            return Ok(VideoFrame::from_view(frame));
        }

        let needs_init = match &self.scaler_state {
            None => true,
            Some(state) => {
                state.src_width != frame.width()
                    || state.src_height != frame.height()
                    || state.src_format != frame.format()
            }
        };

        if needs_init {
            self.init_scaler(frame.width(), frame.height(), frame.format())?;
        }

        self.scale_frame(frame)
    }

    /**
        Initialize or reinitialize the scaler for the given input format.
    */
    fn init_scaler(
        &mut self,
        src_width: u32,
        src_height: u32,
        src_format: PixelFormat,
    ) -> Result<()> {
        if self.scaler_state.is_some() {
            tracing::debug!(
                ?src_format,
                src_width,
                src_height,
                "input geometry changed, rebuilding scaler"
            );
        }

        let src_pixel = pixel_format_to_ffmpeg(src_format)?;
        let dst_pixel = pixel_format_to_ffmpeg(self.config.format)?;

        let context = ScalerContext::get(
            src_pixel,
            src_width,
            src_height,
            dst_pixel,
            self.config.width,
            self.config.height,
            self.config.algorithm.to_ffmpeg_flags(),
        )
        .map_err(|e| Error::unsupported(format!("failed to create scaler: {e}")))?;

        self.scaler_state = Some(ScalerState {
            context,
            src_width,
            src_height,
            src_format,
        });

        Ok(())
    }

    /**
        Scale a frame using the initialized scaler.
    */
    fn scale_frame(&mut self, frame: &FrameView<'_>) -> Result<VideoFrame> {
        let state = match self.scaler_state.as_mut() {
            Some(state) => state,
            None => return Err(Error::invalid_data("scaler not initialized")),
        };

        let src_pixel = pixel_format_to_ffmpeg(frame.format())?;
        let mut src_frame = VideoFrameFFmpeg::new(src_pixel, frame.width(), frame.height());
        copy_view_to_ffmpeg_frame(&mut src_frame, frame);

        let dst_pixel = pixel_format_to_ffmpeg(self.config.format)?;
        let mut dst_frame = VideoFrameFFmpeg::new(dst_pixel, self.config.width, self.config.height);

        state
            .context
            .run(&src_frame, &mut dst_frame)
            .map_err(|e| Error::invalid_data(format!("scaling failed: {e}")))?;

        let data = copy_data_from_ffmpeg_frame(&dst_frame, self.config.format);

        Ok(VideoFrame::new(
            data,
            self.config.width,
            self.config.height,
            self.config.format,
            frame.pts(),
            frame.time_base(),
            frame.is_keyframe(),
        ))
    }
}

/**
    Convert our PixelFormat to FFmpeg's Pixel format.
*/
fn pixel_format_to_ffmpeg(format: PixelFormat) -> Result<ffmpeg_next::format::Pixel> {
    use ffmpeg_next::format::Pixel;

    match format {
        PixelFormat::Yuv420p => Ok(Pixel::YUV420P),
        PixelFormat::Nv12 => Ok(Pixel::NV12),
        PixelFormat::Bgra => Ok(Pixel::BGRA),
        PixelFormat::Rgba => Ok(Pixel::RGBA),
        PixelFormat::Rgb24 => Ok(Pixel::RGB24),
        PixelFormat::Bgr24 => Ok(Pixel::BGR24),
        PixelFormat::Gray8 => Ok(Pixel::GRAY8),
        PixelFormat::Yuv422p => Ok(Pixel::YUV422P),
        PixelFormat::Yuv444p => Ok(Pixel::YUV444P),
        PixelFormat::Yuv420p10 => Ok(Pixel::YUV420P10LE),
        PixelFormat::P010le => Ok(Pixel::P010LE),
        _ => Err(Error::unsupported(format!(
            "pixel format {format:?} not supported"
        ))),
    }
}

/**
    Copy a frame view into an FFmpeg frame, row by row.

    Both sides are strided; the plane geometry of the view's format decides
    how many payload bytes each row carries.
*/
fn copy_view_to_ffmpeg_frame(dst: &mut VideoFrameFFmpeg, src: &FrameView<'_>) {
    let format = src.format();
    for plane in 0..format.plane_count() {
        let row_bytes = format.plane_row_bytes(plane, src.width());
        let rows = format.plane_rows(plane, src.height());
        let dst_stride = dst.stride(plane);
        let dst_data = dst.data_mut(plane);

        for y in 0..rows {
            let dst_start = y * dst_stride;
            dst_data[dst_start..dst_start + row_bytes].copy_from_slice(src.row(plane, y));
        }
    }
}

/**
    Copy an FFmpeg frame into a tightly packed buffer.
*/
fn copy_data_from_ffmpeg_frame(frame: &VideoFrameFFmpeg, format: PixelFormat) -> Vec<u8> {
    let width = frame.width();
    let height = frame.height();
    let mut output = Vec::with_capacity(format.frame_size(width, height));

    for plane in 0..format.plane_count() {
        let row_bytes = format.plane_row_bytes(plane, width);
        let rows = format.plane_rows(plane, height);
        let stride = frame.stride(plane);
        let data = frame.data(plane);

        for y in 0..rows {
            let row_start = y * stride;
            output.extend_from_slice(&data[row_start..row_start + row_bytes]);
        }
    }

    output
}

impl std::fmt::Debug for VideoTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoTransform")
            .field("config", &self.config)
            .field("initialized", &self.scaler_state.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffvideo_types::{MAX_PLANES, Plane, Pts, Rational};

    #[test]
    fn zero_dimensions_are_rejected() {
        let config = VideoTransformConfig::to_rgb24(0, 10);
        assert!(matches!(
            VideoTransform::new(config),
            Err(Error::InvalidConfig(_))
        ));

        let config = VideoTransformConfig::to_rgb24(10, 0);
        assert!(matches!(
            VideoTransform::new(config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn default_algorithm_is_bilinear() {
        let config = VideoTransformConfig::new(64, 64, PixelFormat::Rgb24);
        assert_eq!(config.algorithm, ScalingAlgorithm::Bilinear);

        let config = config.with_algorithm(ScalingAlgorithm::Lanczos);
        assert_eq!(config.algorithm, ScalingAlgorithm::Lanczos);
    }

    #[test]
    fn matching_frame_is_copied_without_scaling() {
        // 4x2 gray view padded to a stride of 8
        #[rustfmt::skip]
        let padded = [
            1, 2, 3, 4, 0, 0, 0, 0,
            5, 6, 7, 8, 0, 0, 0, 0,
        ];
        let mut planes = [Plane::empty(); MAX_PLANES];
        planes[0] = Plane {
            data: &padded,
            stride: 8,
        };
        let view = FrameView::new(
            4,
            2,
            PixelFormat::Gray8,
            planes,
            Some(Pts(3)),
            Rational::new(1, 25),
            true,
        );

        let mut transform =
            VideoTransform::new(VideoTransformConfig::to_gray8(4, 2)).unwrap();
        let frame = transform.transform(&view).unwrap();

        assert_eq!(frame.data, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(frame.pts, Some(Pts(3)));
        assert!(frame.is_keyframe);
        // The fast path leaves the scaler untouched
        assert!(transform.scaler_state.is_none());
    }
}
