use crate::chunk::ChunkTag;

/// Error type for format, parsing and configuration failures
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// Failed parsing slice into specific bytes
    #[error("can't parse slice into fixed size bytes")]
    CantParseSliceInto,
    /// Failed parsing chunk with given tag
    #[error("can't parse {0:?} chunk")]
    CantParseChunk(ChunkTag),
    /// No WAVE tag found
    #[error("no WAVE tag found")]
    NoWaveTagFound,
    /// No riff chunk found
    #[error("no RIFF chunk found")]
    NoRiffChunkFound,
    /// No data chunk found
    #[error("no data chunk found")]
    NoDataChunkFound,
    /// No fmt/header chunk found
    #[error("no fmt chunk found")]
    NoFmtChunkFound,
    /// Unsupported bit depth
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),
    /// Unsupported format code, only PCM (1) is handled
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(u16),
    /// Channel count of zero
    #[error("invalid channel count: {0}")]
    InvalidChannelCount(u16),
    /// Sample rate of zero
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(u32),
    /// PCM payload does not fit the 32 bit RIFF size fields
    #[error("{0} bytes of PCM data don't fit in a WAV container")]
    DataTooLarge(usize),
    /// Reader yielded a different amount of PCM data than the header announced
    #[error("expected {expected} bytes of PCM data, got {actual}")]
    DataLengthMismatch {
        /// Length written into the header
        expected: usize,
        /// Length actually copied
        actual: usize,
    },
}

/// Error returned by the streaming writer
#[cfg(feature = "io")]
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum StreamError<E> {
    /// Error from the underlying reader or writer
    #[error("I/O error: {0:?}")]
    Io(E),
    /// Error from the header encoder
    #[error(transparent)]
    Format(#[from] Error),
}

/// Error returned by a file conversion
#[cfg(feature = "std")]
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Opening, reading, writing or renaming a file failed
    #[error("{}: {source}", path.display())]
    Io {
        /// File the operation was working on
        path: std::path::PathBuf,
        /// Underlying failure
        source: std::io::Error,
    },
    /// The WAV container could not be produced
    #[error(transparent)]
    Format(Error),
    /// The conversion parameters are unusable
    #[error("invalid configuration: {0}")]
    Config(Error),
}

#[cfg(feature = "std")]
impl ConvertError {
    pub(crate) fn io(path: impl Into<std::path::PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(feature = "std")]
impl From<StreamError<ConvertError>> for ConvertError {
    fn from(e: StreamError<ConvertError>) -> Self {
        match e {
            StreamError::Io(e) => e,
            StreamError::Format(e) => ConvertError::Format(e),
        }
    }
}
