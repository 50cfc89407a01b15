/*!
    Error types for the ffvideo crate ecosystem.
*/

/**
    Errors produced by the ffvideo crates.

    Errors raised while opening a source or creating a decoder are fatal for
    that session. Decode errors on individual packets are recoverable; the
    stream layer logs and skips them.
*/
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// FFmpeg library initialization failed.
    #[error("ffmpeg initialization failed: {0}")]
    Init(String),

    /// An I/O error, e.g. the input file does not exist or is unreadable.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The container could not be opened or parsed.
    #[error("failed to open media: {0}")]
    Open(String),

    /// The container holds no decodable video stream.
    #[error("no decodable video stream found")]
    NoVideoStream,

    /// The decoder could not be created from the stream parameters.
    #[error("failed to initialize decoder: {0}")]
    DecoderInit(String),

    /// A packet or frame failed to decode.
    #[error("decode error: {0}")]
    Decode(String),

    /// The demuxer could not reposition to the requested target.
    #[error("seek failed: {0}")]
    Seek(String),

    /// A format with no supported mapping was encountered or requested.
    #[error("unsupported format: {0}")]
    Unsupported(String),

    /// The requested configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Data did not have the expected shape or size.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The stream has been closed; reopen it to continue decoding.
    #[error("stream is closed")]
    Closed,
}

impl Error {
    /**
        Create an initialization error.
    */
    pub fn init(message: impl Into<String>) -> Self {
        Self::Init(message.into())
    }

    /**
        Create an open error.
    */
    pub fn open(message: impl Into<String>) -> Self {
        Self::Open(message.into())
    }

    /**
        Create a decoder initialization error.
    */
    pub fn decoder_init(message: impl Into<String>) -> Self {
        Self::DecoderInit(message.into())
    }

    /**
        Create a decode error.
    */
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /**
        Create a seek error.
    */
    pub fn seek(message: impl Into<String>) -> Self {
        Self::Seek(message.into())
    }

    /**
        Create an unsupported format error.
    */
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    /**
        Create an invalid configuration error.
    */
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /**
        Create an invalid data error.
    */
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }
}

/**
    Result alias used across the ffvideo crates.
*/
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::open("bad container");
        assert_eq!(err.to_string(), "failed to open media: bad container");

        assert_eq!(Error::Closed.to_string(), "stream is closed");
    }

    #[test]
    fn error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::from(io);
        assert!(matches!(err, Error::Io(_)));
    }
}
