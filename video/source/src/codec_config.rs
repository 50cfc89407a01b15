/*!
    Opaque codec configuration for passing to decoders.
*/

use ffmpeg_next::codec;

/**
    Opaque codec configuration extracted from a source stream.

    This holds the codec parameters needed to create a decoder.
    It's intentionally opaque to hide ffmpeg-next types from the public API.

    Pass this to `ffvideo-decode` to create a decoder for the stream.
*/
#[derive(Clone)]
pub struct CodecConfig {
    /// The raw codec parameters.
    pub(crate) parameters: codec::Parameters,
}

impl CodecConfig {
    /**
        Create a new codec config from ffmpeg parameters.
    */
    pub(crate) fn new(parameters: codec::Parameters) -> Self {
        Self { parameters }
    }

    /**
        Consume the config, yielding the internal parameters.

        Exists so `ffvideo-decode` can build a decoder context; application
        code has no use for it.
    */
    pub fn into_parameters(self) -> codec::Parameters {
        self.parameters
    }
}

impl std::fmt::Debug for CodecConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecConfig")
            .field("codec_id", &self.parameters.id())
            .finish_non_exhaustive()
    }
}
