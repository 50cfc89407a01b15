/*!
    Video decoder implementation.
*/

use ffmpeg_next::{
    codec::{self, decoder::Video as VideoDecoderFFmpeg},
    ffi,
    packet::Mut as PacketMut,
    util::frame::video::Video as VideoFrameFFmpeg,
};

use ffvideo_source::CodecConfig;
use ffvideo_types::{Error, FrameView, MAX_PLANES, Packet, Plane, PixelFormat, Pts, Rational, Result};

/**
    Video decoder.

    Drives a libavcodec decoder with the send/receive model: feed packets
    with [`send`](Self::send), pull frames with [`receive`](Self::receive).
    Decoded pixels live in one internal frame buffer that every call to
    `receive` overwrites; the returned [`FrameView`] borrows that buffer, so
    the borrow checker prevents using a view after the next decode call.
*/
pub struct VideoDecoder {
    decoder: VideoDecoderFFmpeg,
    time_base: Rational,
    /// The single reused frame buffer views point into.
    decoded: VideoFrameFFmpeg,
}

impl VideoDecoder {
    /**
        Create a new video decoder from codec configuration.

        # Arguments

        * `codec_config` - Codec configuration from the source
        * `time_base` - Time base for the video stream
    */
    pub fn new(codec_config: CodecConfig, time_base: Rational) -> Result<Self> {
        ffvideo_source::init()?;

        let parameters = codec_config.into_parameters();

        let decoder_ctx = codec::context::Context::from_parameters(parameters)
            .map_err(|e| Error::decoder_init(e.to_string()))?;

        let decoder = decoder_ctx
            .decoder()
            .video()
            .map_err(|e| Error::decoder_init(e.to_string()))?;

        Ok(Self {
            decoder,
            time_base,
            decoded: VideoFrameFFmpeg::empty(),
        })
    }

    /**
        Get the time base for this decoder.
    */
    pub fn time_base(&self) -> Rational {
        self.time_base
    }

    /**
        Feed one packet to the decoder.

        Call [`receive`](Self::receive) until it returns `Ok(None)` before
        sending the next packet. Errors here concern only the offending
        packet; the decoder stays usable and the caller may skip ahead.
    */
    pub fn send(&mut self, packet: &Packet) -> Result<()> {
        let mut ffmpeg_pkt = if packet.data.is_empty() {
            ffmpeg_next::Packet::empty()
        } else {
            ffmpeg_next::Packet::copy(&packet.data)
        };

        // Set timing info
        unsafe {
            let pkt_ptr = ffmpeg_pkt.as_mut_ptr();
            if let Some(pts) = packet.pts {
                (*pkt_ptr).pts = pts.0;
            }
            if let Some(dts) = packet.dts {
                (*pkt_ptr).dts = dts.0;
            }
            (*pkt_ptr).duration = packet.duration.0;
        }

        match self.decoder.send_packet(&ffmpeg_pkt) {
            Ok(()) => Ok(()),
            Err(ffmpeg_next::Error::Other { errno }) if errno == ffi::EAGAIN => {
                // Only reachable when the caller skipped the receive drain
                Err(Error::decode(
                    "decoder buffers full, receive pending frames first",
                ))
            }
            Err(e) => Err(Error::decode(e.to_string())),
        }
    }

    /**
        Signal end of input, flushing buffered frames out of the codec.

        Keep calling [`receive`](Self::receive) afterwards until it returns
        `Ok(None)` to drain the remaining frames.
    */
    pub fn send_eof(&mut self) -> Result<()> {
        match self.decoder.send_eof() {
            Ok(()) => Ok(()),
            Err(ffmpeg_next::Error::Eof) => Ok(()), // already signalled
            Err(e) => Err(Error::decode(e.to_string())),
        }
    }

    /**
        Pull the next decoded frame, if one is ready.

        Returns `Ok(None)` when the decoder needs more input, or when it has
        drained after [`send_eof`](Self::send_eof). The returned view borrows
        the decoder's internal buffer and is invalidated by the next call.
    */
    pub fn receive(&mut self) -> Result<Option<FrameView<'_>>> {
        match self.decoder.receive_frame(&mut self.decoded) {
            Ok(()) => {
                let view = frame_view(&self.decoded, self.time_base)?;
                Ok(Some(view))
            }
            Err(ffmpeg_next::Error::Other { errno }) if errno == ffi::EAGAIN => Ok(None),
            Err(ffmpeg_next::Error::Eof) => Ok(None),
            Err(e) => Err(Error::decode(e.to_string())),
        }
    }

    /**
        Reset the decoder after a seek.

        Clears internal buffers so frames from the old position are not
        emitted at the new one.
    */
    pub fn reset(&mut self) {
        self.decoder.flush();
    }
}

/**
    Build a borrowed view over a decoded FFmpeg frame.
*/
fn frame_view(frame: &VideoFrameFFmpeg, time_base: Rational) -> Result<FrameView<'_>> {
    let width = frame.width();
    let height = frame.height();

    if width == 0 || height == 0 {
        return Err(Error::invalid_data("decoded frame has zero dimensions"));
    }

    let ffmpeg_format = frame.format();
    let format = pixel_format_from_ffmpeg(ffmpeg_format).ok_or_else(|| {
        Error::unsupported(format!("decoded pixel format {ffmpeg_format:?}"))
    })?;

    if frame.planes() < format.plane_count() {
        return Err(Error::invalid_data(format!(
            "decoded frame has {} planes, {:?} needs {}",
            frame.planes(),
            format,
            format.plane_count()
        )));
    }

    let mut planes = [Plane::empty(); MAX_PLANES];
    for plane in 0..format.plane_count() {
        planes[plane] = Plane {
            data: frame.data(plane),
            stride: frame.stride(plane),
        };
    }

    Ok(FrameView::new(
        width,
        height,
        format,
        planes,
        frame.pts().map(Pts),
        time_base,
        frame.is_key(),
    ))
}

/**
    Convert FFmpeg pixel format to our PixelFormat.
*/
fn pixel_format_from_ffmpeg(format: ffmpeg_next::format::Pixel) -> Option<PixelFormat> {
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

impl std::fmt::Debug for VideoDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoDecoder")
            .field("time_base", &self.time_base)
            .finish_non_exhaustive()
    }
}
