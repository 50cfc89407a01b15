/*!
    Owned video frames.
*/

use std::time::Duration;

use crate::view::{FrameView, MAX_PLANES, Plane};
use crate::{PixelFormat, Pts, Rational};

/**
    A decoded video frame with tightly packed pixel data.

    Planes are stored back to back in `data` with no stride padding, row-major
    within each plane. The frame owns its buffer and is independent of the
    decoder that produced it.
*/
#[derive(Clone, PartialEq, Eq)]
pub struct VideoFrame {
    /// Pixel data, all planes concatenated.
    pub data: Vec<u8>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Pixel format.
    pub format: PixelFormat,
    /// Presentation timestamp in time base units.
    pub pts: Option<Pts>,
    /// Time base for timestamps.
    pub time_base: Rational,
    /// Whether this frame was decoded from a keyframe.
    pub is_keyframe: bool,
}

impl VideoFrame {
    /**
        Create a new video frame.
    */
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        format: PixelFormat,
        pts: Option<Pts>,
        time_base: Rational,
        is_keyframe: bool,
    ) -> Self {
        Self {
            data,
            width,
            height,
            format,
            pts,
            time_base,
            is_keyframe,
        }
    }

    /**
        Deep-copy a borrowed view into an owned frame.

        Stride padding in the view is dropped; the copy is tightly packed.
    */
    pub fn from_view(view: &FrameView<'_>) -> Self {
        let format = view.format();
        let mut data = Vec::with_capacity(format.frame_size(view.width(), view.height()));
        for plane in 0..format.plane_count() {
            for y in 0..format.plane_rows(plane, view.height()) {
                data.extend_from_slice(view.row(plane, y));
            }
        }
        Self::new(
            data,
            view.width(),
            view.height(),
            format,
            view.pts(),
            view.time_base(),
            view.is_keyframe(),
        )
    }

    /**
        Presentation time as wall-clock time, if the frame carries a timestamp.
    */
    pub fn presentation_time(&self) -> Option<Duration> {
        self.pts.and_then(|pts| pts.to_duration(self.time_base))
    }

    /**
        Number of planes in this frame's format.
    */
    pub fn plane_count(&self) -> usize {
        self.format.plane_count()
    }

    /**
        The bytes of one plane.
    */
    pub fn plane(&self, plane: usize) -> &[u8] {
        let (start, size) = self.plane_span(plane);
        &self.data[start..start + size]
    }

    /**
        One row of a plane.
    */
    pub fn row(&self, plane: usize, y: usize) -> &[u8] {
        let (start, _) = self.plane_span(plane);
        let row_bytes = self.format.plane_row_bytes(plane, self.width);
        let offset = start + y * row_bytes;
        &self.data[offset..offset + row_bytes]
    }

    /**
        The bytes of one pixel, for packed formats.

        Returns `None` for planar formats or out-of-range coordinates.
    */
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        let channels = self.format.channels()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        let row = self.row(0, y as usize);
        let start = x as usize * channels;
        row.get(start..start + channels)
    }

    /**
        Borrow this frame as a [`FrameView`].
    */
    pub fn as_view(&self) -> FrameView<'_> {
        let mut planes = [Plane::empty(); MAX_PLANES];
        for plane in 0..self.format.plane_count() {
            planes[plane] = Plane {
                data: self.plane(plane),
                stride: self.format.plane_row_bytes(plane, self.width),
            };
        }
        FrameView::new(
            self.width,
            self.height,
            self.format,
            planes,
            self.pts,
            self.time_base,
            self.is_keyframe,
        )
    }

    fn plane_span(&self, plane: usize) -> (usize, usize) {
        let mut start = 0;
        for p in 0..plane {
            start += self.format.plane_row_bytes(p, self.width) * self.format.plane_rows(p, self.height);
        }
        let size =
            self.format.plane_row_bytes(plane, self.width) * self.format.plane_rows(plane, self.height);
        (start, size)
    }
}

impl std::fmt::Debug for VideoFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("pts", &self.pts)
            .field("data_len", &self.data.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_frame() -> VideoFrame {
        // 2x2 RGB frame: red, green / blue, white
        #[rustfmt::skip]
        let data = vec![
            255, 0, 0,  0, 255, 0,
            0, 0, 255,  255, 255, 255,
        ];
        VideoFrame::new(
            data,
            2,
            2,
            PixelFormat::Rgb24,
            Some(Pts(5)),
            Rational::new(1, 25),
            true,
        )
    }

    #[test]
    fn row_and_pixel_access() {
        let frame = rgb_frame();
        assert_eq!(frame.row(0, 0), &[255, 0, 0, 0, 255, 0]);
        assert_eq!(frame.pixel(1, 1), Some(&[255, 255, 255][..]));
        assert_eq!(frame.pixel(2, 0), None);
    }

    #[test]
    fn plane_access_yuv() {
        let format = PixelFormat::Yuv420p;
        let mut data = vec![1u8; 4 * 4];
        data.extend(std::iter::repeat_n(2u8, 2 * 2));
        data.extend(std::iter::repeat_n(3u8, 2 * 2));
        let frame = VideoFrame::new(data, 4, 4, format, None, Rational::new(1, 25), false);

        assert_eq!(frame.plane_count(), 3);
        assert_eq!(frame.plane(0), &[1u8; 16][..]);
        assert_eq!(frame.plane(1), &[2u8; 4][..]);
        assert_eq!(frame.plane(2), &[3u8; 4][..]);
        assert_eq!(frame.row(2, 1), &[3, 3]);
    }

    #[test]
    fn from_view_drops_stride_padding() {
        // 4x2 gray frame padded to a stride of 8
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
            Some(Pts(7)),
            Rational::new(1, 30),
            false,
        );

        let frame = VideoFrame::from_view(&view);
        assert_eq!(frame.data, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(frame.pts, Some(Pts(7)));
        assert_eq!(frame.time_base, Rational::new(1, 30));
    }

    #[test]
    fn as_view_round_trips() {
        let frame = rgb_frame();
        let copy = VideoFrame::from_view(&frame.as_view());
        assert_eq!(copy, frame);
    }

    #[test]
    fn presentation_time() {
        let frame = rgb_frame();
        assert_eq!(frame.presentation_time(), Some(Duration::from_millis(200)));
    }
}
