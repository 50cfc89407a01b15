/*!
    Media source and demuxing for the ffvideo crate ecosystem.

    This crate handles the input side of the pipeline. It opens media files,
    parses containers, selects the video stream, and produces encoded packets
    that downstream crates can decode.
*/

use std::sync::OnceLock;

use ffvideo_types::{Error, Result};

mod codec_config;
mod convert;
mod probe;
mod source;

pub use codec_config::CodecConfig;
pub use probe::probe;
pub use source::{Source, open};

static INIT: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/**
    Initialize the FFmpeg libraries.

    Safe to call any number of times from any thread; the underlying
    initialization runs once. All entry points in this crate call it
    implicitly, so calling it yourself is only useful to surface
    initialization failures early.
*/
pub fn init() -> Result<()> {
    INIT.get_or_init(|| ffmpeg_next::init().map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|e| Error::init(e.clone()))?;
    Ok(())
}
