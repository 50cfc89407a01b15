/*!
    Stream information types.
*/

use std::time::Duration;

use crate::{PixelFormat, Rational};

/**
    Information about a video stream.
*/
#[derive(Clone, Debug)]
pub struct VideoStreamInfo {
    /// Index of the stream within the container.
    pub stream_index: usize,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Pixel format frames are decoded to.
    pub pixel_format: PixelFormat,
    /// Frame rate (may be approximate or unavailable).
    pub frame_rate: Option<Rational>,
    /// Time base for timestamps.
    pub time_base: Rational,
    /// Total duration (may be unavailable for some streams).
    pub duration: Option<Duration>,
    /// Estimated number of frames, from the container or duration and rate.
    pub frame_count: Option<u64>,
    /// Name of the codec, e.g. "h264".
    pub codec_name: Option<String>,
    /// Bitrate in bits per second (if known).
    pub bitrate: Option<u64>,
}

impl VideoStreamInfo {
    /**
        Returns the aspect ratio as a float.
    */
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /**
        Returns the frame rate as fps, if available.
    */
    pub fn fps(&self) -> Option<f64> {
        self.frame_rate.map(|r| r.to_f64())
    }
}

/**
    Information about an opened media source.
*/
#[derive(Clone, Debug)]
pub struct MediaInfo {
    /// Container format name, e.g. "mov,mp4,m4a,3gp,3g2,mj2".
    pub container: String,
    /// Total duration of the media (may be unavailable).
    pub duration: Option<Duration>,
    /// The selected video stream.
    pub video: VideoStreamInfo,
}
