/*!
    Pull-based video frame decoding.

    `ffvideo` opens a media file, decodes its video stream frame by frame, and
    converts each frame to a configurable pixel format and size. It composes
    the ffvideo crate family: `ffvideo-source` demuxes, `ffvideo-decode`
    decodes, `ffvideo-transform` converts.

    # Example

    ```ignore
    use ffvideo::VideoStream;

    let mut stream = VideoStream::open("video.mp4")?;
    while let Some(frame) = stream.next_frame()? {
        println!("{:?}: {}x{}", frame.presentation_time(), frame.width, frame.height);
    }
    ```
*/

mod config;
mod stream;

pub use config::{FrameSize, StreamConfig};
pub use stream::VideoStream;

pub use ffvideo_source::{init, probe};
pub use ffvideo_transform::ScalingAlgorithm;
pub use ffvideo_types::{
    Error, FrameView, MediaInfo, Packet, PixelFormat, Plane, Pts, Rational, Result, VideoFrame,
    VideoStreamInfo,
};
