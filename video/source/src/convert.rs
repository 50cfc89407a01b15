/*!
    Conversion utilities between ffmpeg-next types and ffvideo-types.
*/

use ffvideo_types::{MediaDuration, PixelFormat, Pts, Rational};

/**
    Convert ffmpeg_next::Rational to our Rational.
*/
pub fn rational_from_ffmpeg(r: ffmpeg_next::Rational) -> Rational {
    Rational::new(r.numerator(), r.denominator())
}

/**
    Convert ffmpeg_next pixel format to our PixelFormat.

    The legacy full-range `YUVJ*` variants map onto their plain counterparts;
    range handling is left to the conversion stage.
*/
pub fn pixel_format_from_ffmpeg(format: ffmpeg_next::format::Pixel) -> Option<PixelFormat> {
    use ffmpeg_next::format::Pixel;

    match format {
        Pixel::YUV420P | Pixel::YUVJ420P => Some(PixelFormat::Yuv420p),
        Pixel::NV12 => Some(PixelFormat::Nv12),
        Pixel::BGRA => Some(PixelFormat::Bgra),
        Pixel::RGBA => Some(PixelFormat::Rgba),
        Pixel::RGB24 => Some(PixelFormat::Rgb24),
        Pixel::BGR24 => Some(PixelFormat::Bgr24),
        Pixel::GRAY8 => Some(PixelFormat::Gray8),
        Pixel::YUV422P | Pixel::YUVJ422P => Some(PixelFormat::Yuv422p),
        Pixel::YUV444P | Pixel::YUVJ444P => Some(PixelFormat::Yuv444p),
        Pixel::YUV420P10LE | Pixel::YUV420P10BE => Some(PixelFormat::Yuv420p10),
        Pixel::P010LE | Pixel::P010BE => Some(PixelFormat::P010le),
        _ => None,
    }
}

/**
    Create a Pts from an optional i64 timestamp.
*/
pub fn pts_from_ffmpeg(pts: Option<i64>) -> Option<Pts> {
    pts.map(Pts)
}

/**
    Create a MediaDuration from an i64 duration.
*/
pub fn duration_from_ffmpeg(duration: i64) -> MediaDuration {
    MediaDuration(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rational_round_trip() {
        let r = rational_from_ffmpeg(ffmpeg_next::Rational::new(24000, 1001));
        assert_eq!(r, Rational::new(24000, 1001));
    }

    #[test]
    fn pixel_format_mapping() {
        use ffmpeg_next::format::Pixel;

        assert_eq!(
            pixel_format_from_ffmpeg(Pixel::YUV420P),
            Some(PixelFormat::Yuv420p)
        );
        assert_eq!(
            pixel_format_from_ffmpeg(Pixel::YUVJ420P),
            Some(PixelFormat::Yuv420p)
        );
        assert_eq!(
            pixel_format_from_ffmpeg(Pixel::GRAY8),
            Some(PixelFormat::Gray8)
        );
        assert_eq!(pixel_format_from_ffmpeg(Pixel::PAL8), None);
    }

    #[test]
    fn pts_mapping() {
        assert_eq!(pts_from_ffmpeg(Some(42)), Some(Pts(42)));
        assert_eq!(pts_from_ffmpeg(None), None);
    }
}
