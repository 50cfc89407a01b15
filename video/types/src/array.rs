/*!
    Conversions from frames to `ndarray` types.
*/

use ndarray::{Array3, ArrayView3};

use crate::{Error, Result, VideoFrame};

impl VideoFrame {
    /**
        View this frame as a `(height, width, channels)` array without copying.

        Only packed formats have an array shape; planar frames return an
        error. The view borrows the frame's buffer.
    */
    pub fn ndarray_view(&self) -> Result<ArrayView3<'_, u8>> {
        let channels = self.format.channels().ok_or_else(|| {
            Error::unsupported(format!(
                "planar format {:?} has no interleaved array shape",
                self.format
            ))
        })?;
        ArrayView3::from_shape(
            (self.height as usize, self.width as usize, channels),
            &self.data,
        )
        .map_err(|e| Error::invalid_data(e.to_string()))
    }

    /**
        Copy this frame into an owned `(height, width, channels)` array.
    */
    pub fn to_ndarray(&self) -> Result<Array3<u8>> {
        self.ndarray_view().map(|view| view.to_owned())
    }
}
