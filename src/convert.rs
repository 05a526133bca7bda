//! File to file conversion of raw PCM into WAV.
//!
//! All conversions write to a hidden staging file next to `dest` first and
//! rename it over `dest` once everything is synced to disk. A failed run
//! removes the staging file and never leaves a truncated WAV file behind.

use crate::config::ConvertConfig;
use crate::error::ConvertError;
use crate::stream::{self, File};
use crate::wav::Wav;
use log::{debug, info, warn};
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Result of a conversion that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The WAV file was written
    Converted {
        /// Raw PCM input
        source: PathBuf,
        /// WAV output
        dest: PathBuf,
        /// Number of PCM bytes in the `data` chunk
        data_len: usize,
    },
    /// There was nothing to convert
    SourceMissing {
        /// Raw PCM input that does not exist
        source: PathBuf,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Converted { source, dest, .. } => {
                write!(f, "Converted {} to {}", source.display(), dest.display())
            }
            Outcome::SourceMissing { source } => {
                write!(f, "{} not found. Run the C program first.", source.display())
            }
        }
    }
}

/// Create a uniquely named `.<dest name>.XXXXXX.part` file in the directory of `dest`.
///
/// The file is deleted when dropped unless it was persisted.
fn staging_file(dest: &Path) -> Result<NamedTempFile, ConvertError> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut prefix = OsString::from(".");
    if let Some(name) = dest.file_name() {
        prefix.push(name);
    }
    prefix.push(".");

    let mut builder = tempfile::Builder::new();
    builder.prefix(&prefix).suffix(".part");

    // tempfile defaults to 0600, the output is an ordinary file
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }

    builder.tempfile_in(dir).map_err(|e| ConvertError::io(dir, e))
}

fn source_exists(source: &Path) -> Result<bool, ConvertError> {
    source
        .try_exists()
        .map_err(|e| ConvertError::io(source, e))
}

fn missing(source: &Path) -> Outcome {
    warn!("{} does not exist, nothing to convert", source.display());
    Outcome::SourceMissing {
        source: source.to_path_buf(),
    }
}

fn converted(source: &Path, dest: &Path, data_len: usize) -> Outcome {
    info!("Wrote {} ({} bytes of PCM)", dest.display(), data_len);
    Outcome::Converted {
        source: source.to_path_buf(),
        dest: dest.to_path_buf(),
        data_len,
    }
}

/// Wrap the raw PCM file at `source` in a WAV container written to `dest`.
///
/// A missing `source` is not an error: it yields [`Outcome::SourceMissing`]
/// and `dest` is left untouched.
///
/// ```no_run
/// use rawwav::{convert, ConvertConfig};
///
/// let outcome = convert("output.raw", "output.wav", &ConvertConfig::default()).unwrap();
/// println!("{outcome}");
/// ```
pub fn convert(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    config: &ConvertConfig,
) -> Result<Outcome, ConvertError> {
    let (source, dest) = (source.as_ref(), dest.as_ref());
    let fmt = config.to_fmt().map_err(ConvertError::Config)?;

    if !source_exists(source)? {
        return Ok(missing(source));
    }

    let data = fs::read(source).map_err(|e| ConvertError::io(source, e))?;
    let data_len = data.len();
    debug!("Read {} bytes from {}", data_len, source.display());

    let bytes = Wav::from_pcm(data, fmt)
        .to_bytes()
        .map_err(ConvertError::Format)?;

    let mut staged = staging_file(dest)?;
    let staged_path = staged.path().to_path_buf();
    staged
        .write_all(&bytes)
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| ConvertError::io(&staged_path, e))?;

    staged
        .persist(dest)
        .map_err(|e| ConvertError::io(dest, e.error))?;

    Ok(converted(source, dest, data_len))
}

/// Same as [`convert`], copying through a `buffer_size` byte buffer instead
/// of reading the whole input into memory.
pub fn convert_streaming(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    config: &ConvertConfig,
    buffer_size: usize,
) -> Result<Outcome, ConvertError> {
    let (source, dest) = (source.as_ref(), dest.as_ref());
    let fmt = config.to_fmt().map_err(ConvertError::Config)?;

    if !source_exists(source)? {
        return Ok(missing(source));
    }

    let mut reader = File::open(source)?;
    let data_len = reader.byte_len()?;

    let (file, staged_path) = staging_file(dest)?.into_parts();
    let mut writer = File::from_std(file, staged_path.to_path_buf());
    let copied = stream::write_wav(&mut reader, &mut writer, &fmt, data_len, buffer_size)?;
    writer.sync_all()?;
    drop(writer);

    staged_path
        .persist(dest)
        .map_err(|e| ConvertError::io(dest, e.error))?;

    Ok(converted(source, dest, copied))
}

/// Async version of the file conversion, on tokio's file system API
pub mod asynch {
    use super::*;
    use crate::stream::asynch::TokioFile;

    /// Async version of [`convert_streaming`](super::convert_streaming)
    pub async fn convert(
        source: impl AsRef<Path>,
        dest: impl AsRef<Path>,
        config: &ConvertConfig,
    ) -> Result<Outcome, ConvertError> {
        let (source, dest) = (source.as_ref(), dest.as_ref());
        let fmt = config.to_fmt().map_err(ConvertError::Config)?;

        let exists = tokio::fs::try_exists(source)
            .await
            .map_err(|e| ConvertError::io(source, e))?;
        if !exists {
            return Ok(missing(source));
        }

        let mut reader = TokioFile::open(source).await?;
        let data_len = reader.byte_len().await?;

        let (file, staged_path) = staging_file(dest)?.into_parts();
        let mut writer = TokioFile::from_std(file, staged_path.to_path_buf());
        let copied = stream::asynch::write_wav(
            &mut reader,
            &mut writer,
            &fmt,
            data_len,
            stream::DEFAULT_BUFFER_SIZE,
        )
        .await?;
        writer.sync_all().await?;
        drop(writer);

        tokio::fs::rename(&staged_path, dest)
            .await
            .map_err(|e| ConvertError::io(dest, e))?;
        // the file lives at dest now, don't delete it on drop
        let _ = staged_path.keep();

        Ok(converted(source, dest, copied))
    }
}
