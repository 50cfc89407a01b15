/*!
    Probing functionality for extracting media metadata.
*/

use std::path::Path;
use std::time::Duration;

use ffmpeg_next::{format::context::Input as InputContext, media::Type};

use ffvideo_types::{Error, MediaInfo, Result, VideoStreamInfo};

use crate::convert::{pixel_format_from_ffmpeg, rational_from_ffmpeg};

/**
    Probe a media file to extract metadata without building a decode pipeline.

    This is a lightweight operation that reads just enough of the file to
    determine stream information, duration, and codec details. Files without
    a decodable video stream fail with [`Error::NoVideoStream`].

    # Example

    ```ignore
    let info = probe("video.mp4")?;
    println!("Video: {}x{}", info.video.width, info.video.height);
    ```
*/
pub fn probe<P: AsRef<Path>>(path: P) -> Result<MediaInfo> {
    crate::init()?;

    std::fs::metadata(&path)?;

    let input = ffmpeg_next::format::input(&path).map_err(|e| Error::open(e.to_string()))?;

    extract_media_info(&input)
}

/**
    Extract MediaInfo from an already-opened input context.
*/
pub(crate) fn extract_media_info(input: &InputContext) -> Result<MediaInfo> {
    let video = extract_video_stream_info(input)?;

    // Container duration, falling back to the stream's
    let duration = if input.duration() > 0 {
        Some(Duration::from_micros(input.duration() as u64))
    } else {
        video.duration
    };

    Ok(MediaInfo {
        container: input.format().name().to_string(),
        duration,
        video,
    })
}

/**
    Extract video stream info from an input context.
*/
fn extract_video_stream_info(input: &InputContext) -> Result<VideoStreamInfo> {
    let stream = input
        .streams()
        .best(Type::Video)
        .ok_or(Error::NoVideoStream)?;

    let time_base = rational_from_ffmpeg(stream.time_base());

    // Duration from the stream, falling back to the container
    let duration = if stream.duration() > 0 {
        let seconds = stream.duration() as f64 * time_base.num as f64 / time_base.den as f64;
        Some(Duration::from_secs_f64(seconds))
    } else if input.duration() > 0 {
        Some(Duration::from_micros(input.duration() as u64))
    } else {
        None
    };

    // Open a decoder context to learn dimensions and pixel format
    let decoder_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())
        .map_err(|e| Error::decoder_init(e.to_string()))?;
    let decoder = decoder_ctx
        .decoder()
        .video()
        .map_err(|e| Error::decoder_init(e.to_string()))?;

    let pixel_format = pixel_format_from_ffmpeg(decoder.format()).ok_or_else(|| {
        Error::unsupported(format!("pixel format {:?}", decoder.format()))
    })?;

    let codec_name =
        ffmpeg_next::decoder::find(stream.parameters().id()).map(|codec| codec.name().to_string());

    let frame_rate = if stream.avg_frame_rate().numerator() != 0 {
        Some(rational_from_ffmpeg(stream.avg_frame_rate()))
    } else if stream.rate().numerator() != 0 {
        Some(rational_from_ffmpeg(stream.rate()))
    } else {
        None
    };

    // Frame count as declared by the container, estimated from duration
    // and rate when the container doesn't say
    let frame_count = if stream.frames() > 0 {
        Some(stream.frames() as u64)
    } else {
        match (duration, frame_rate) {
            (Some(duration), Some(rate)) => {
                Some((duration.as_secs_f64() * rate.to_f64()).round() as u64)
            }
            _ => None,
        }
    };

    // SAFETY: reading scalar fields from a valid AVCodecParameters pointer
    // that FFmpeg owns
    let bitrate = unsafe {
        let ptr = stream.parameters().as_ptr();
        if (*ptr).bit_rate > 0 {
            Some((*ptr).bit_rate as u64)
        } else {
            None
        }
    };

    Ok(VideoStreamInfo {
        stream_index: stream.index(),
        width: decoder.width(),
        height: decoder.height(),
        pixel_format,
        frame_rate,
        time_base,
        duration,
        frame_count,
        codec_name,
        bitrate,
    })
}
