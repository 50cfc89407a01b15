/*!
    Media source implementation.
*/

use std::path::Path;
use std::time::Duration;

use ffmpeg_next::{format::context::Input as InputContext, media::Type};

use ffvideo_types::{Error, MediaInfo, Packet, Rational, Result};

use crate::codec_config::CodecConfig;
use crate::convert::{duration_from_ffmpeg, pts_from_ffmpeg, rational_from_ffmpeg};
use crate::probe::extract_media_info;

/**
    A media source that produces encoded video packets.

    Created by [`open`] or [`Source::open`]. Opening selects the best video
    stream in the container; packets from other streams are skipped during
    demuxing. Files without a decodable video stream fail to open with
    [`Error::NoVideoStream`].
*/
pub struct Source {
    /// The FFmpeg input context.
    input: InputContext,
    /// Cached media info.
    media_info: MediaInfo,
    /// Selected video stream index.
    stream_index: usize,
    /// Video stream time base.
    time_base: Rational,
    /// Codec parameters of the selected stream.
    codec_config: CodecConfig,
}

impl Source {
    /**
        Open a media file.

        # Example

        ```ignore
        let source = Source::open("video.mp4")?;
        println!("Duration: {:?}", source.media_info().duration);
        ```
    */
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        crate::init()?;

        // Filesystem problems surface as Io before FFmpeg sees the path;
        // anything past this point is a container parse failure.
        std::fs::metadata(&path)?;

        let input =
            ffmpeg_next::format::input(&path).map_err(|e| Error::open(e.to_string()))?;

        let media_info = extract_media_info(&input)?;

        let stream = input
            .streams()
            .best(Type::Video)
            .ok_or(Error::NoVideoStream)?;
        let stream_index = stream.index();
        let time_base = rational_from_ffmpeg(stream.time_base());
        let codec_config = CodecConfig::new(stream.parameters());

        Ok(Self {
            input,
            media_info,
            stream_index,
            time_base,
            codec_config,
        })
    }

    /**
        Get the media info for this source.
    */
    pub fn media_info(&self) -> &MediaInfo {
        &self.media_info
    }

    /**
        Index of the selected video stream within the container.
    */
    pub fn stream_index(&self) -> usize {
        self.stream_index
    }

    /**
        Get the video stream time base.
    */
    pub fn time_base(&self) -> Rational {
        self.time_base
    }

    /**
        Get the codec configuration of the selected stream.

        Pass this to `ffvideo-decode` to create a decoder.
    */
    pub fn codec_config(&self) -> CodecConfig {
        self.codec_config.clone()
    }

    /**
        Read the next packet of the video stream.

        Returns `Ok(Some(packet))` for each packet, `Ok(None)` at end of
        stream. Packets from other streams are skipped.
    */
    pub fn next_packet(&mut self) -> Result<Option<Packet>> {
        loop {
            let (stream, ffmpeg_packet) = match self.input.packets().next() {
                Some(result) => result,
                None => return Ok(None), // End of stream
            };

            if stream.index() != self.stream_index {
                continue;
            }

            let is_keyframe = ffmpeg_packet.is_key();
            let data = ffmpeg_packet.data().map(|d| d.to_vec()).unwrap_or_default();

            let packet = Packet::new(
                data,
                pts_from_ffmpeg(ffmpeg_packet.pts()),
                pts_from_ffmpeg(ffmpeg_packet.dts()),
                duration_from_ffmpeg(ffmpeg_packet.duration()),
                self.time_base,
                is_keyframe,
            );

            return Ok(Some(packet));
        }
    }

    /**
        Seek to a position in the media.

        Seeks to the nearest keyframe at or before the target position, so
        the demuxer may land early; decode forward to reach the exact target.
        Targets beyond the media duration are clamped to the end with a
        warning rather than failing. Returns the clamped position.

        After seeking, flush any decoder fed from this source.
    */
    pub fn seek(&mut self, position: Duration) -> Result<Duration> {
        let target = match self.media_info.duration {
            Some(duration) if position > duration => {
                tracing::warn!(
                    requested_secs = position.as_secs_f64(),
                    clamped_secs = duration.as_secs_f64(),
                    "seek target beyond end of stream, clamping"
                );
                duration
            }
            _ => position,
        };

        // Convert the position to FFmpeg's global time base (microseconds)
        let timestamp = (target.as_secs_f64() * ffmpeg_next::ffi::AV_TIME_BASE as f64) as i64;

        self.input
            .seek(timestamp, ..timestamp)
            .map_err(|e| Error::seek(e.to_string()))?;

        Ok(target)
    }
}

/**
    Open a media file.

    This is a convenience function equivalent to [`Source::open`].
*/
pub fn open<P: AsRef<Path>>(path: P) -> Result<Source> {
    Source::open(path)
}

/**
    Iterator adapter for Source that yields packets.
*/
impl Iterator for Source {
    type Item = Result<Packet>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_packet() {
            Ok(Some(packet)) => Some(Ok(packet)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source")
            .field("stream_index", &self.stream_index)
            .field("time_base", &self.time_base)
            .field("media_info", &self.media_info)
            .finish_non_exhaustive()
    }
}
