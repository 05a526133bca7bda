use crate::chunk::{Chunk, ChunkTag};
use crate::error::Error;
use core::convert::TryInto;

/// Format code for integer PCM samples, the only one written or accepted
pub const PCM_FORMAT: u16 = 1;

/// Size of the `fmt ` payload for plain PCM
pub const FMT_CHUNK_SIZE: u32 = 16;

/// Struct representing the `fmt_` section of a WAV file
///
/// for more information see [`here`]
///
/// [`here`]: http://soundfile.sapp.org/doc/WaveFormat/
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Fmt {
    /// sample rate, typical values are `44_100`, `48_000` or `96_000`
    pub sample_rate: u32,
    /// number of audio channels in the sample data, channels are interleaved
    pub num_channels: u16,
    /// bit depth for each sample, typical values are `8`, `16`, or `24`
    pub bit_depth: u16,
}

impl Fmt {
    /// Bytes per second of audio
    pub fn byte_rate(&self) -> u32 {
        (self.sample_rate as u64 * self.num_channels as u64 * self.bit_depth as u64 / 8) as u32
    }

    /// Bytes per interleaved frame
    pub fn block_align(&self) -> u16 {
        (self.num_channels as u32 * self.bit_depth as u32 / 8) as u16
    }

    /// Bytes per single sample
    pub fn sample_width(&self) -> u16 {
        self.bit_depth / 8
    }

    pub(crate) fn from_chunk(chunk: &Chunk) -> Result<Self, Error> {
        if chunk.bytes.len() < FMT_CHUNK_SIZE as usize {
            return Err(Error::CantParseChunk(ChunkTag::Fmt));
        }

        let audio_format = chunk.bytes[0..2]
            .try_into()
            .map_err(|_| Error::CantParseSliceInto)
            .map(u16::from_le_bytes)?;

        if audio_format != PCM_FORMAT {
            return Err(Error::UnsupportedFormat(audio_format));
        }

        let num_channels = chunk.bytes[2..4]
            .try_into()
            .map_err(|_| Error::CantParseSliceInto)
            .map(u16::from_le_bytes)?;

        let sample_rate = chunk.bytes[4..8]
            .try_into()
            .map_err(|_| Error::CantParseSliceInto)
            .map(u32::from_le_bytes)?;

        let bit_depth = chunk.bytes[14..16]
            .try_into()
            .map_err(|_| Error::CantParseSliceInto)
            .map(u16::from_le_bytes)?;

        Ok(Fmt {
            num_channels,
            sample_rate,
            bit_depth,
        })
    }

    pub(crate) fn to_bytes(&self) -> [u8; FMT_CHUNK_SIZE as usize] {
        let af = PCM_FORMAT.to_le_bytes();
        let nc = self.num_channels.to_le_bytes();
        let sr = self.sample_rate.to_le_bytes();
        let br = self.byte_rate().to_le_bytes();
        let ba = self.block_align().to_le_bytes();
        let bd = self.bit_depth.to_le_bytes();

        [
            af[0], af[1], // audio format
            nc[0], nc[1], // num channels
            sr[0], sr[1], sr[2], sr[3], // sample rate
            br[0], br[1], br[2], br[3], // byte rate
            ba[0], ba[1], // block align
            bd[0], bd[1], // bits per sample
        ]
    }
}
