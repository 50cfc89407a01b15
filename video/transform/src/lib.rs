/*!
    Video frame transformation for the ffvideo crate ecosystem.

    This crate converts frames between pixel formats and sizes using
    libswscale: YUV to RGB, rescaling, grayscale extraction.
*/

mod video;

pub use video::{ScalingAlgorithm, VideoTransform, VideoTransformConfig};
