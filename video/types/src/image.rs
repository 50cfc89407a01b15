/*!
    Conversions from frames to `image` crate types.
*/

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

use crate::{Error, PixelFormat, Result, VideoFrame};

impl VideoFrame {
    /**
        Convert this frame into an [`image::DynamicImage`].

        The pixel data is copied. Only packed RGB-family and grayscale
        formats convert directly; configure the stream to produce `Rgb24`,
        `Rgba`, or `Gray8` output when images are the goal.
    */
    pub fn to_image(&self) -> Result<DynamicImage> {
        let too_small = || Error::invalid_data("frame buffer too small for its dimensions");
        match self.format {
            PixelFormat::Rgb24 => RgbImage::from_raw(self.width, self.height, self.data.clone())
                .map(DynamicImage::ImageRgb8)
                .ok_or_else(too_small),
            PixelFormat::Rgba => RgbaImage::from_raw(self.width, self.height, self.data.clone())
                .map(DynamicImage::ImageRgba8)
                .ok_or_else(too_small),
            PixelFormat::Gray8 => GrayImage::from_raw(self.width, self.height, self.data.clone())
                .map(DynamicImage::ImageLuma8)
                .ok_or_else(too_small),
            other => Err(Error::unsupported(format!(
                "cannot convert {other:?} frames to an image; decode to Rgb24, Rgba, or Gray8"
            ))),
        }
    }
}
