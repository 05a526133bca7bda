//! Wrap raw, headerless PCM audio in a canonical WAV container.
//!
//! Building a WAV file from PCM bytes in memory:
//! ```
//! use rawwav::{ConvertConfig, Wav};
//!
//! let fmt = ConvertConfig::default().to_fmt().unwrap();
//! let wav = Wav::from_pcm(vec![0x00, 0x01, 0x02, 0x03], fmt);
//!
//! let bytes = wav.to_bytes().unwrap();
//! assert_eq!(&bytes[0..4], b"RIFF");
//! assert_eq!(bytes.len(), 48);
//! ```
//!
//! Reading it back:
//! ```
//! use rawwav::{ConvertConfig, Wav};
//!
//! let fmt = ConvertConfig::default().to_fmt().unwrap();
//! let bytes = Wav::from_pcm(vec![0x00, 0x01, 0x02, 0x03], fmt).to_bytes().unwrap();
//! let wav = Wav::from_bytes(&bytes).unwrap();
//!
//! assert_eq!(wav.fmt.num_channels, 1);
//! assert_eq!(wav.fmt.bit_depth, 16);
//! assert_eq!(wav.fmt.sample_rate, 44_100);
//! assert_eq!(wav.data, vec![0x00, 0x01, 0x02, 0x03]);
//! ```
//!
//! Converting a file on disk (requires the "std" feature):
//! ```no_run
//! # #[cfg(feature = "std")]
//! # fn main() -> Result<(), rawwav::ConvertError> {
//! use rawwav::{convert, ConvertConfig, Outcome};
//!
//! match convert("output.raw", "output.wav", &ConvertConfig::default())? {
//!     Outcome::Converted { data_len, .. } => println!("wrote {data_len} bytes of PCM"),
//!     Outcome::SourceMissing { .. } => println!("nothing to convert"),
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "std"))]
//! # fn main() {}
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod chunk;
mod config;
mod error;
mod fmt;
mod wav;

pub use chunk::{Chunk, ChunkTag};
pub use config::{ConvertConfig, DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE, DEFAULT_SAMPLE_WIDTH};
pub use error::Error;
pub use fmt::{Fmt, FMT_CHUNK_SIZE, PCM_FORMAT};
pub use wav::{Wav, HEADER_LEN};

#[cfg(feature = "io")]
pub mod stream;
#[cfg(feature = "io")]
pub use error::StreamError;

#[cfg(feature = "std")]
pub mod convert;
#[cfg(feature = "std")]
pub use convert::{convert, convert_streaming, Outcome};
#[cfg(feature = "std")]
pub use error::ConvertError;
