/*!
    Borrowed frame views.

    A [`FrameView`] exposes pixel data that some other object owns, typically a
    decoder's internal frame buffer. The borrow ties the view's lifetime to
    that owner: the view cannot outlive the buffer, and the owner cannot be
    advanced to the next frame while a view is held. Copy the view into a
    [`VideoFrame`](crate::VideoFrame) to keep the pixels.
*/

use std::time::Duration;

use crate::{PixelFormat, Pts, Rational};

/// Maximum number of planes a frame view can carry.
pub const MAX_PLANES: usize = 4;

/**
    One plane of a frame: a byte slice plus the stride between rows.

    The stride may exceed the payload row width when the owner pads rows
    for alignment.
*/
#[derive(Clone, Copy, Debug)]
pub struct Plane<'a> {
    /// Plane bytes, covering `stride * rows`.
    pub data: &'a [u8],
    /// Bytes between the starts of consecutive rows.
    pub stride: usize,
}

impl Plane<'_> {
    /**
        An empty plane, used to fill unused slots.
    */
    pub const fn empty() -> Self {
        Self {
            data: &[],
            stride: 0,
        }
    }
}

impl Default for Plane<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

/**
    A read-only, possibly padded view of one video frame.

    Row access is stride-aware: [`FrameView::row`] returns only the payload
    bytes of a row, skipping any padding.
*/
#[derive(Clone, Copy)]
pub struct FrameView<'a> {
    width: u32,
    height: u32,
    format: PixelFormat,
    pts: Option<Pts>,
    time_base: Rational,
    is_keyframe: bool,
    planes: [Plane<'a>; MAX_PLANES],
}

impl<'a> FrameView<'a> {
    /**
        Create a view over externally owned plane data.

        Unused slots in `planes` are ignored; the format determines how many
        planes are read.
    */
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        planes: [Plane<'a>; MAX_PLANES],
        pts: Option<Pts>,
        time_base: Rational,
        is_keyframe: bool,
    ) -> Self {
        for plane in 0..format.plane_count() {
            debug_assert!(
                planes[plane].data.len()
                    >= (format.plane_rows(plane, height).saturating_sub(1))
                        * planes[plane].stride
                        + format.plane_row_bytes(plane, width),
                "plane {plane} too small for {width}x{height} {format:?}"
            );
        }
        Self {
            width,
            height,
            format,
            pts,
            time_base,
            is_keyframe,
            planes,
        }
    }

    /**
        Frame width in pixels.
    */
    pub fn width(&self) -> u32 {
        self.width
    }

    /**
        Frame height in pixels.
    */
    pub fn height(&self) -> u32 {
        self.height
    }

    /**
        Pixel format of the viewed frame.
    */
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /**
        Presentation timestamp in time base units, if the frame carried one.
    */
    pub fn pts(&self) -> Option<Pts> {
        self.pts
    }

    /**
        Time base for the frame's timestamps.
    */
    pub fn time_base(&self) -> Rational {
        self.time_base
    }

    /**
        Whether the frame was decoded from a keyframe.
    */
    pub fn is_keyframe(&self) -> bool {
        self.is_keyframe
    }

    /**
        Presentation time as wall-clock time, if the frame carried a timestamp.
    */
    pub fn presentation_time(&self) -> Option<Duration> {
        self.pts.and_then(|pts| pts.to_duration(self.time_base))
    }

    /**
        Number of planes in the viewed frame.
    */
    pub fn plane_count(&self) -> usize {
        self.format.plane_count()
    }

    /**
        The plane at the given index.
    */
    pub fn plane(&self, plane: usize) -> Plane<'a> {
        self.planes[plane]
    }

    /**
        One row of a plane, without stride padding.

        The returned slice borrows from the backing buffer, not from the view,
        so it stays valid for as long as the buffer does.
    */
    pub fn row(&self, plane: usize, y: usize) -> &'a [u8] {
        let p = self.planes[plane];
        let row_bytes = self.format.plane_row_bytes(plane, self.width);
        let start = y * p.stride;
        &p.data[start..start + row_bytes]
    }

    /**
        The bytes of one pixel, for packed formats.

        Returns `None` for planar formats or out-of-range coordinates.
    */
    pub fn pixel(&self, x: u32, y: u32) -> Option<&'a [u8]> {
        let channels = self.format.channels()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        let row = self.row(0, y as usize);
        let start = x as usize * channels;
        row.get(start..start + channels)
    }
}

impl std::fmt::Debug for FrameView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameView")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("pts", &self.pts)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded_gray_view(data: &[u8]) -> FrameView<'_> {
        // 4x3 gray frame stored with a stride of 6
        let mut planes = [Plane::empty(); MAX_PLANES];
        planes[0] = Plane { data, stride: 6 };
        FrameView::new(
            4,
            3,
            PixelFormat::Gray8,
            planes,
            Some(Pts(0)),
            Rational::new(1, 25),
            true,
        )
    }

    #[test]
    fn row_skips_stride_padding() {
        #[rustfmt::skip]
        let data = [
            1, 2, 3, 4, 0, 0,
            5, 6, 7, 8, 0, 0,
            9, 10, 11, 12, 0, 0,
        ];
        let view = padded_gray_view(&data);

        assert_eq!(view.row(0, 0), &[1, 2, 3, 4]);
        assert_eq!(view.row(0, 2), &[9, 10, 11, 12]);
    }

    #[test]
    fn pixel_access() {
        #[rustfmt::skip]
        let data = [
            1, 2, 3, 4, 0, 0,
            5, 6, 7, 8, 0, 0,
            9, 10, 11, 12, 0, 0,
        ];
        let view = padded_gray_view(&data);

        assert_eq!(view.pixel(0, 0), Some(&[1][..]));
        assert_eq!(view.pixel(3, 2), Some(&[12][..]));
        assert_eq!(view.pixel(4, 0), None);
        assert_eq!(view.pixel(0, 3), None);
    }

    #[test]
    fn pixel_is_none_for_planar() {
        let data = vec![0u8; PixelFormat::Yuv420p.frame_size(4, 4)];
        let mut planes = [Plane::empty(); MAX_PLANES];
        planes[0] = Plane {
            data: &data[..16],
            stride: 4,
        };
        planes[1] = Plane {
            data: &data[16..20],
            stride: 2,
        };
        planes[2] = Plane {
            data: &data[20..24],
            stride: 2,
        };
        let view = FrameView::new(
            4,
            4,
            PixelFormat::Yuv420p,
            planes,
            None,
            Rational::new(1, 25),
            false,
        );

        assert_eq!(view.pixel(0, 0), None);
        assert_eq!(view.plane_count(), 3);
        assert_eq!(view.row(1, 1), &[0, 0]);
    }

    #[test]
    fn presentation_time_uses_time_base() {
        let data = [0u8; 18];
        let view = padded_gray_view(&data);
        assert_eq!(view.presentation_time(), Some(Duration::ZERO));
    }
}
