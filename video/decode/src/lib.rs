/*!
    Video decoding for the ffvideo crate ecosystem.

    This crate transforms encoded packets into raw frames. Decoded pixels are
    handed out as borrowed views over a single reused frame buffer; callers
    copy a view out if they need it past the next decode call.
*/

mod video;

pub use video::VideoDecoder;
