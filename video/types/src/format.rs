/*!
    Pixel format types.
*/

/**
    Video pixel formats.

    This is a subset of formats commonly encountered in media pipelines.
    Not all FFmpeg pixel formats are represented.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormat {
    /// Planar YUV 4:2:0, 12bpp (most common video format)
    Yuv420p,
    /// Semi-planar YUV 4:2:0, 12bpp (common hardware decoder output)
    Nv12,
    /// Packed BGRA, 32bpp (common for display on macOS/Windows)
    Bgra,
    /// Packed RGBA, 32bpp (common for display)
    Rgba,
    /// Packed RGB, 24bpp
    Rgb24,
    /// Packed BGR, 24bpp
    Bgr24,
    /// Single-channel luma, 8bpp
    Gray8,
    /// Planar YUV 4:2:2, 16bpp
    Yuv422p,
    /// Planar YUV 4:4:4, 24bpp
    Yuv444p,
    /// Planar YUV 4:2:0, 10-bit (HDR content)
    Yuv420p10,
    /// Semi-planar YUV 4:2:0, 10-bit little-endian (HDR hardware decoder output)
    P010le,
}

impl PixelFormat {
    /**
        Returns the number of bits per pixel for this format.

        For planar formats, this is the average bits per pixel.
    */
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            Self::Gray8 => 8,
            Self::Yuv420p | Self::Nv12 => 12,
            Self::Yuv420p10 | Self::P010le => 15, // 10 bits * 1.5 planes average
            Self::Yuv422p => 16,
            Self::Rgb24 | Self::Bgr24 | Self::Yuv444p => 24,
            Self::Bgra | Self::Rgba => 32,
        }
    }

    /**
        Returns true if this is a planar format.
    */
    pub const fn is_planar(self) -> bool {
        match self {
            Self::Yuv420p | Self::Yuv422p | Self::Yuv444p | Self::Yuv420p10 => true,
            Self::Nv12 | Self::P010le => true, // semi-planar counts as planar
            Self::Bgra | Self::Rgba | Self::Rgb24 | Self::Bgr24 | Self::Gray8 => false,
        }
    }

    /**
        Returns the number of planes in this format.
    */
    pub const fn plane_count(self) -> usize {
        match self {
            Self::Yuv420p | Self::Yuv422p | Self::Yuv444p | Self::Yuv420p10 => 3,
            Self::Nv12 | Self::P010le => 2,
            Self::Bgra | Self::Rgba | Self::Rgb24 | Self::Bgr24 | Self::Gray8 => 1,
        }
    }

    /**
        Returns the interleaved channel count for packed formats, `None` for
        planar formats.
    */
    pub const fn channels(self) -> Option<usize> {
        match self {
            Self::Gray8 => Some(1),
            Self::Rgb24 | Self::Bgr24 => Some(3),
            Self::Bgra | Self::Rgba => Some(4),
            _ => None,
        }
    }

    /**
        Returns the number of payload bytes in one row of the given plane,
        excluding any stride padding.

        Chroma planes of subsampled formats round up for odd dimensions,
        matching FFmpeg's plane layout.
    */
    pub const fn plane_row_bytes(self, plane: usize, width: u32) -> usize {
        let width = width as usize;
        let chroma_width = (width + 1) / 2;
        match self {
            Self::Gray8 => width,
            Self::Rgb24 | Self::Bgr24 => width * 3,
            Self::Bgra | Self::Rgba => width * 4,
            Self::Yuv444p => width,
            Self::Yuv420p | Self::Yuv422p => {
                if plane == 0 {
                    width
                } else {
                    chroma_width
                }
            }
            Self::Yuv420p10 => {
                if plane == 0 {
                    width * 2
                } else {
                    chroma_width * 2
                }
            }
            // Interleaved CbCr plane: two samples per chroma column
            Self::Nv12 => {
                if plane == 0 {
                    width
                } else {
                    chroma_width * 2
                }
            }
            Self::P010le => {
                if plane == 0 {
                    width * 2
                } else {
                    chroma_width * 4
                }
            }
        }
    }

    /**
        Returns the number of rows in the given plane.
    */
    pub const fn plane_rows(self, plane: usize, height: u32) -> usize {
        let height = height as usize;
        match self {
            Self::Yuv420p | Self::Yuv420p10 | Self::Nv12 | Self::P010le => {
                if plane == 0 {
                    height
                } else {
                    (height + 1) / 2
                }
            }
            _ => height,
        }
    }

    /**
        Returns the total byte size of a tightly packed frame in this format.
    */
    pub fn frame_size(self, width: u32, height: u32) -> usize {
        (0..self.plane_count())
            .map(|plane| self.plane_row_bytes(plane, width) * self.plane_rows(plane, height))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_format_bits_per_pixel() {
        assert_eq!(PixelFormat::Yuv420p.bits_per_pixel(), 12);
        assert_eq!(PixelFormat::Bgra.bits_per_pixel(), 32);
        assert_eq!(PixelFormat::Rgb24.bits_per_pixel(), 24);
        assert_eq!(PixelFormat::Gray8.bits_per_pixel(), 8);
    }

    #[test]
    fn pixel_format_is_planar() {
        assert!(PixelFormat::Yuv420p.is_planar());
        assert!(PixelFormat::Nv12.is_planar());
        assert!(!PixelFormat::Bgra.is_planar());
        assert!(!PixelFormat::Gray8.is_planar());
    }

    #[test]
    fn pixel_format_plane_count() {
        assert_eq!(PixelFormat::Yuv420p.plane_count(), 3);
        assert_eq!(PixelFormat::Nv12.plane_count(), 2);
        assert_eq!(PixelFormat::Rgb24.plane_count(), 1);
    }

    #[test]
    fn plane_geometry_yuv420p() {
        let f = PixelFormat::Yuv420p;
        assert_eq!(f.plane_row_bytes(0, 32), 32);
        assert_eq!(f.plane_row_bytes(1, 32), 16);
        assert_eq!(f.plane_rows(0, 24), 24);
        assert_eq!(f.plane_rows(2, 24), 12);
        assert_eq!(f.frame_size(32, 24), 32 * 24 + 2 * 16 * 12);
    }

    #[test]
    fn plane_geometry_rounds_up_odd_dimensions() {
        let f = PixelFormat::Yuv420p;
        assert_eq!(f.plane_row_bytes(1, 33), 17);
        assert_eq!(f.plane_rows(1, 25), 13);
    }

    #[test]
    fn plane_geometry_nv12() {
        let f = PixelFormat::Nv12;
        assert_eq!(f.plane_row_bytes(0, 32), 32);
        assert_eq!(f.plane_row_bytes(1, 32), 32);
        assert_eq!(f.plane_rows(1, 24), 12);
        assert_eq!(f.frame_size(32, 24), 32 * 24 + 32 * 12);
    }

    #[test]
    fn plane_geometry_packed() {
        assert_eq!(PixelFormat::Rgb24.frame_size(16, 8), 16 * 8 * 3);
        assert_eq!(PixelFormat::Rgba.frame_size(16, 8), 16 * 8 * 4);
        assert_eq!(PixelFormat::Gray8.frame_size(16, 8), 16 * 8);
    }

    #[test]
    fn packed_channels() {
        assert_eq!(PixelFormat::Rgb24.channels(), Some(3));
        assert_eq!(PixelFormat::Gray8.channels(), Some(1));
        assert_eq!(PixelFormat::Yuv420p.channels(), None);
    }
}
