//! Streaming WAV writer over `embedded-io` readers and writers.

use crate::error::{Error, StreamError};
use crate::fmt::Fmt;
use crate::wav::Wav;
use alloc::vec;
use log::debug;

/// Copy buffer size used when none is given
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Write the canonical header announcing `data_len` bytes of PCM.
pub fn write_header<W>(writer: &mut W, fmt: &Fmt, data_len: usize) -> Result<(), StreamError<W::Error>>
where
    W: embedded_io::Write,
{
    let header = Wav::header(fmt, data_len)?;
    writer.write_all(&header).map_err(StreamError::Io)
}

/// Copy PCM bytes from `reader` to `writer` until the reader is exhausted.
///
/// Returns the number of bytes copied.
pub fn copy_pcm<R, W>(reader: &mut R, writer: &mut W, buffer: &mut [u8]) -> Result<usize, StreamError<R::Error>>
where
    R: embedded_io::Read,
    W: embedded_io::Write<Error = R::Error>,
{
    let mut copied = 0;
    loop {
        match reader.read(buffer) {
            Ok(0) => break, // EOF
            Ok(n) => {
                writer.write_all(&buffer[..n]).map_err(StreamError::Io)?;
                copied += n;
            }
            Err(e) => return Err(StreamError::Io(e)),
        }
    }

    Ok(copied)
}

/// Write a complete WAV file: header, then everything `reader` yields.
///
/// `data_len` has to be known up front since it goes into the header. The copy
/// fails with [`Error::DataLengthMismatch`] if the reader disagrees with it.
///
/// ```
/// use rawwav::{stream, Fmt};
///
/// let fmt = Fmt { sample_rate: 44_100, num_channels: 1, bit_depth: 16 };
/// let pcm: [u8; 4] = [0x00, 0x01, 0x02, 0x03];
/// let mut out: Vec<u8> = Vec::new();
///
/// stream::write_wav(&mut &pcm[..], &mut out, &fmt, pcm.len(), 2).unwrap();
///
/// assert_eq!(out.len(), 48);
/// ```
pub fn write_wav<R, W>(
    reader: &mut R,
    writer: &mut W,
    fmt: &Fmt,
    data_len: usize,
    buffer_size: usize,
) -> Result<usize, StreamError<R::Error>>
where
    R: embedded_io::Read,
    W: embedded_io::Write<Error = R::Error>,
{
    debug!(
        "Streaming {} bytes of PCM ({} Hz, {} ch, {} bit)",
        data_len, fmt.sample_rate, fmt.num_channels, fmt.bit_depth
    );

    write_header(writer, fmt, data_len)?;

    let mut buffer = vec![0; buffer_size.max(1)];
    let copied = copy_pcm(reader, writer, &mut buffer)?;

    if copied != data_len {
        return Err(StreamError::Format(Error::DataLengthMismatch {
            expected: data_len,
            actual: copied,
        }));
    }

    writer.flush().map_err(StreamError::Io)?;

    Ok(copied)
}

#[cfg(feature = "std")]
mod file_wrapper {
    use crate::error::{ConvertError, Error};
    use std::fs;
    use std::io::{Read, Write};
    use std::path::{Path, PathBuf};

    /// Wrapper for std::fs::File that remembers its path for error reporting
    pub struct File {
        inner: fs::File,
        path: PathBuf,
    }

    impl File {
        /// Open an existing file for reading
        pub fn open(path: impl AsRef<Path>) -> Result<Self, ConvertError> {
            let path = path.as_ref().to_path_buf();
            let inner = fs::File::open(&path).map_err(|e| ConvertError::io(&path, e))?;
            Ok(File { inner, path })
        }

        /// Wrap an already open file
        pub fn from_std(inner: fs::File, path: impl Into<PathBuf>) -> Self {
            File {
                inner,
                path: path.into(),
            }
        }

        /// Size of the open file in bytes
        pub fn byte_len(&self) -> Result<usize, ConvertError> {
            let len = self
                .inner
                .metadata()
                .map_err(|e| ConvertError::io(&self.path, e))?
                .len();
            usize::try_from(len).map_err(|_| ConvertError::Format(Error::DataTooLarge(usize::MAX)))
        }

        /// Flush file contents to disk
        pub fn sync_all(&self) -> Result<(), ConvertError> {
            self.inner
                .sync_all()
                .map_err(|e| ConvertError::io(&self.path, e))
        }
    }

    impl embedded_io::Error for ConvertError {
        fn kind(&self) -> embedded_io::ErrorKind {
            embedded_io::ErrorKind::Other
        }
    }

    impl embedded_io::ErrorType for File {
        type Error = ConvertError;
    }

    impl embedded_io::Read for File {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            self.inner
                .read(buf)
                .map_err(|e| ConvertError::io(&self.path, e))
        }
    }

    impl embedded_io::Write for File {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            self.inner
                .write(buf)
                .map_err(|e| ConvertError::io(&self.path, e))
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.inner
                .flush()
                .map_err(|e| ConvertError::io(&self.path, e))
        }
    }
}

#[cfg(feature = "std")]
pub use file_wrapper::File;

//-----------------------------------
// MARK: Async

/// Async version of the streaming writer
pub mod asynch {
    use super::*;

    /// Async version of [`write_header`](super::write_header)
    pub async fn write_header<W>(
        writer: &mut W,
        fmt: &Fmt,
        data_len: usize,
    ) -> Result<(), StreamError<W::Error>>
    where
        W: embedded_io_async::Write,
    {
        let header = Wav::header(fmt, data_len)?;
        writer.write_all(&header).await.map_err(StreamError::Io)
    }

    /// Async version of [`copy_pcm`](super::copy_pcm)
    pub async fn copy_pcm<R, W>(
        reader: &mut R,
        writer: &mut W,
        buffer: &mut [u8],
    ) -> Result<usize, StreamError<R::Error>>
    where
        R: embedded_io_async::Read,
        W: embedded_io_async::Write<Error = R::Error>,
    {
        let mut copied = 0;
        loop {
            match reader.read(buffer).await {
                Ok(0) => break, // EOF
                Ok(n) => {
                    writer
                        .write_all(&buffer[..n])
                        .await
                        .map_err(StreamError::Io)?;
                    copied += n;
                }
                Err(e) => return Err(StreamError::Io(e)),
            }
        }

        Ok(copied)
    }

    /// Async version of [`write_wav`](super::write_wav)
    pub async fn write_wav<R, W>(
        reader: &mut R,
        writer: &mut W,
        fmt: &Fmt,
        data_len: usize,
        buffer_size: usize,
    ) -> Result<usize, StreamError<R::Error>>
    where
        R: embedded_io_async::Read,
        W: embedded_io_async::Write<Error = R::Error>,
    {
        debug!(
            "Streaming {} bytes of PCM ({} Hz, {} ch, {} bit)",
            data_len, fmt.sample_rate, fmt.num_channels, fmt.bit_depth
        );

        write_header(writer, fmt, data_len).await?;

        let mut buffer = vec![0; buffer_size.max(1)];
        let copied = copy_pcm(reader, writer, &mut buffer).await?;

        if copied != data_len {
            return Err(StreamError::Format(Error::DataLengthMismatch {
                expected: data_len,
                actual: copied,
            }));
        }

        writer.flush().await.map_err(StreamError::Io)?;

        Ok(copied)
    }

    #[cfg(feature = "std")]
    mod tokio_wrapper {
        use crate::error::{ConvertError, Error};
        use std::path::{Path, PathBuf};
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        /// Wrapper for tokio::fs::File that remembers its path for error reporting
        pub struct TokioFile {
            inner: tokio::fs::File,
            path: PathBuf,
        }

        impl TokioFile {
            /// Open an existing file for reading
            pub async fn open(path: impl AsRef<Path>) -> Result<Self, ConvertError> {
                let path = path.as_ref().to_path_buf();
                let inner = tokio::fs::File::open(&path)
                    .await
                    .map_err(|e| ConvertError::io(&path, e))?;
                Ok(TokioFile { inner, path })
            }

            /// Wrap an already open std file
            pub fn from_std(inner: std::fs::File, path: impl Into<PathBuf>) -> Self {
                TokioFile {
                    inner: tokio::fs::File::from_std(inner),
                    path: path.into(),
                }
            }

            /// Size of the open file in bytes
            pub async fn byte_len(&self) -> Result<usize, ConvertError> {
                let len = self
                    .inner
                    .metadata()
                    .await
                    .map_err(|e| ConvertError::io(&self.path, e))?
                    .len();
                usize::try_from(len)
                    .map_err(|_| ConvertError::Format(Error::DataTooLarge(usize::MAX)))
            }

            /// Flush file contents to disk
            pub async fn sync_all(&self) -> Result<(), ConvertError> {
                self.inner
                    .sync_all()
                    .await
                    .map_err(|e| ConvertError::io(&self.path, e))
            }
        }

        impl embedded_io_async::ErrorType for TokioFile {
            type Error = ConvertError;
        }

        impl embedded_io_async::Read for TokioFile {
            async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
                self.inner
                    .read(buf)
                    .await
                    .map_err(|e| ConvertError::io(&self.path, e))
            }
        }

        impl embedded_io_async::Write for TokioFile {
            async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
                self.inner
                    .write(buf)
                    .await
                    .map_err(|e| ConvertError::io(&self.path, e))
            }

            async fn flush(&mut self) -> Result<(), Self::Error> {
                self.inner
                    .flush()
                    .await
                    .map_err(|e| ConvertError::io(&self.path, e))
            }
        }
    }

    #[cfg(feature = "std")]
    pub use tokio_wrapper::TokioFile;
}
