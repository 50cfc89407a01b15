/*!
    Video stream facade.
*/

use std::path::Path;
use std::time::Duration;

use ffvideo_decode::VideoDecoder;
use ffvideo_source::Source;
use ffvideo_transform::{VideoTransform, VideoTransformConfig};
use ffvideo_types::{Error, MediaInfo, PixelFormat, Result, VideoFrame};

use crate::config::StreamConfig;

/**
    A video stream decoded frame by frame.

    Wraps the demux, decode, and convert stages behind one pull-based
    handle. Each call to [`next_frame`](Self::next_frame) returns the next
    frame in presentation order, converted to the configured size and pixel
    format; `Ok(None)` marks the end of the stream.

    Dropping the stream releases all FFmpeg state. [`close`](Self::close)
    does so eagerly, after which every method returns [`Error::Closed`].

    # Example

    ```ignore
    let mut stream = VideoStream::open("video.mp4")?;
    while let Some(frame) = stream.next_frame()? {
        println!("frame at {:?}", frame.presentation_time());
    }
    ```
*/
pub struct VideoStream {
    inner: Option<StreamInner>,
}

struct StreamInner {
    source: Source,
    decoder: VideoDecoder,
    transform: VideoTransform,
    info: MediaInfo,
    output_width: u32,
    output_height: u32,
    output_format: PixelFormat,
    /// End of input has been signalled to the decoder.
    eof_sent: bool,
    /// The decoder has drained; `next_frame` returns `Ok(None)` until a seek.
    finished: bool,
    /// Discard decoded frames with a presentation timestamp below this.
    skip_until: Option<i64>,
    decode_errors: u64,
}

impl VideoStream {
    /**
        Open a media file with default settings.

        Decodes at native size into packed RGB. See
        [`open_with_config`](Self::open_with_config) to customize the output.
    */
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, StreamConfig::default())
    }

    /**
        Open a media file with the given configuration.

        Fails with [`Error::NoVideoStream`] if the file has no video stream
        and [`Error::InvalidConfig`] if the output configuration is invalid.
    */
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: StreamConfig) -> Result<Self> {
        let source = Source::open(path)?;
        let info = source.media_info().clone();

        let (output_width, output_height) =
            config
                .size
                .resolve(config.keep_aspect, info.video.width, info.video.height)?;

        // Output config errors must surface before a decoder is created.
        let transform = VideoTransform::new(
            VideoTransformConfig::new(output_width, output_height, config.pixel_format)
                .with_algorithm(config.algorithm),
        )?;

        let decoder = VideoDecoder::new(source.codec_config(), source.time_base())?;

        tracing::debug!(
            container = %info.container,
            codec = info.video.codec_name.as_deref().unwrap_or("unknown"),
            source_size = format_args!("{}x{}", info.video.width, info.video.height),
            output_size = format_args!("{output_width}x{output_height}"),
            output_format = ?config.pixel_format,
            "opened video stream"
        );

        let mut stream = Self {
            inner: Some(StreamInner {
                source,
                decoder,
                transform,
                info,
                output_width,
                output_height,
                output_format: config.pixel_format,
                eof_sent: false,
                finished: false,
                skip_until: None,
                decode_errors: 0,
            }),
        };

        if let Some(start) = config.start {
            stream.seek(start)?;
        }

        Ok(stream)
    }

    /**
        Get the media info of the opened file.
    */
    pub fn info(&self) -> Result<&MediaInfo> {
        Ok(&self.inner()?.info)
    }

    /**
        The dimensions of the frames this stream produces.
    */
    pub fn output_size(&self) -> Result<(u32, u32)> {
        let inner = self.inner()?;
        Ok((inner.output_width, inner.output_height))
    }

    /**
        The pixel format of the frames this stream produces.
    */
    pub fn output_format(&self) -> Result<PixelFormat> {
        Ok(self.inner()?.output_format)
    }

    /**
        How many undecodable packets have been skipped so far.
    */
    pub fn decode_error_count(&self) -> Result<u64> {
        Ok(self.inner()?.decode_errors)
    }

    /**
        Decode and return the next frame.

        Returns `Ok(None)` at the end of the stream, and keeps returning it
        until a [`seek`](Self::seek) rewinds the position. Undecodable
        packets are skipped with a warning; their count is available from
        [`decode_error_count`](Self::decode_error_count).
    */
    pub fn next_frame(&mut self) -> Result<Option<VideoFrame>> {
        self.inner_mut()?.next_frame()
    }

    /**
        Seek to a position in the stream.

        The next [`next_frame`](Self::next_frame) call returns the first
        frame with a presentation time at or after the target. Positions
        beyond the end of the stream are clamped with a warning. Returns the
        clamped position.
    */
    pub fn seek(&mut self, position: Duration) -> Result<Duration> {
        let inner = self.inner_mut()?;

        let target = inner.source.seek(position)?;
        inner.decoder.reset();
        inner.eof_sent = false;
        inner.finished = false;

        // The demuxer lands on the preceding keyframe; decode forward and
        // discard until the target timestamp.
        let time_base = inner.source.time_base();
        if time_base.num > 0 {
            let pts =
                (target.as_secs_f64() * time_base.den as f64 / time_base.num as f64).round() as i64;
            inner.skip_until = Some(pts);
        } else {
            inner.skip_until = None;
        }

        Ok(target)
    }

    /**
        Decode the frame at the given position.

        Equivalent to a [`seek`](Self::seek) followed by
        [`next_frame`](Self::next_frame).
    */
    pub fn frame_at(&mut self, position: Duration) -> Result<Option<VideoFrame>> {
        self.seek(position)?;
        self.next_frame()
    }

    /**
        Decode the frame with the given index, counting from zero.

        Addresses frames through the stream frame rate, so the result is
        exact only for constant-rate streams. Fails with
        [`Error::Unsupported`] when the frame rate is unknown.
    */
    pub fn frame_at_index(&mut self, index: u64) -> Result<Option<VideoFrame>> {
        let frame_rate = self
            .inner()?
            .info
            .video
            .frame_rate
            .filter(|rate| rate.num > 0)
            .ok_or_else(|| {
                Error::unsupported("frame rate unknown, cannot address frames by index")
            })?;

        let seconds = index as f64 * frame_rate.den as f64 / frame_rate.num as f64;
        self.frame_at(Duration::from_secs_f64(seconds))
    }

    /**
        Close the stream, releasing all FFmpeg state.

        Closing twice is a no-op. Every other method returns
        [`Error::Closed`] afterwards.
    */
    pub fn close(&mut self) {
        if self.inner.take().is_some() {
            tracing::debug!("closed video stream");
        }
    }

    fn inner(&self) -> Result<&StreamInner> {
        self.inner.as_ref().ok_or(Error::Closed)
    }

    fn inner_mut(&mut self) -> Result<&mut StreamInner> {
        self.inner.as_mut().ok_or(Error::Closed)
    }
}

impl StreamInner {
    fn next_frame(&mut self) -> Result<Option<VideoFrame>> {
        if self.finished {
            return Ok(None);
        }

        loop {
            // Drain the decoder before feeding it more input.
            {
                let StreamInner {
                    decoder,
                    transform,
                    skip_until,
                    ..
                } = self;

                if let Some(view) = decoder.receive()? {
                    if let Some(threshold) = *skip_until {
                        match view.pts() {
                            Some(pts) if pts.0 < threshold => {
                                tracing::trace!(
                                    pts = pts.0,
                                    threshold,
                                    "discarding frame before seek target"
                                );
                                continue;
                            }
                            _ => *skip_until = None,
                        }
                    }

                    let frame = transform.transform(&view)?;
                    return Ok(Some(frame));
                }
            }

            if self.eof_sent {
                self.finished = true;
                return Ok(None);
            }

            match self.source.next_packet()? {
                Some(packet) => {
                    if let Err(error) = self.decoder.send(&packet) {
                        self.decode_errors += 1;
                        tracing::warn!(%error, "skipping undecodable packet");
                    }
                }
                None => {
                    self.decoder.send_eof()?;
                    self.eof_sent = true;
                }
            }
        }
    }
}

/**
    Iterator adapter that yields frames until the end of the stream.
*/
impl Iterator for VideoStream {
    type Item = Result<VideoFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_frame() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl std::fmt::Debug for VideoStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("VideoStream");
        match &self.inner {
            Some(inner) => s
                .field("output_width", &inner.output_width)
                .field("output_height", &inner.output_height)
                .field("output_format", &inner.output_format)
                .field("decode_errors", &inner.decode_errors)
                .finish_non_exhaustive(),
            None => s.field("closed", &true).finish_non_exhaustive(),
        }
    }
}
