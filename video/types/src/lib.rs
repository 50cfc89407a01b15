/*!
    Shared types for the ffvideo crate ecosystem.

    This crate defines the vocabulary of the ecosystem, the types that cross crate
    boundaries. It has no dependency on FFmpeg, making it lightweight and enabling
    consumers to depend on it without pulling in FFmpeg bindings.
*/

mod error;
mod format;
mod frame;
mod packet;
mod rational;
mod stream;
mod view;

#[cfg(feature = "ndarray")]
mod array;
#[cfg(feature = "image")]
mod image;

pub use error::{Error, Result};
pub use format::PixelFormat;
pub use frame::VideoFrame;
pub use packet::Packet;
pub use rational::{MediaDuration, Pts, Rational};
pub use stream::{MediaInfo, VideoStreamInfo};
pub use view::{FrameView, MAX_PLANES, Plane};
