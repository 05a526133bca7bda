use crate::chunk::{parse_chunks, Chunk, ChunkTag};
use crate::error::Error;
use crate::fmt::{Fmt, FMT_CHUNK_SIZE};
use alloc::vec::Vec;
use core::convert::TryInto;
use log::warn;

/// Length of the canonical PCM header: RIFF preamble, `fmt ` and `data` chunk headers
pub const HEADER_LEN: usize = 44;

/// Bytes counted by the RIFF size field besides the PCM payload
const RIFF_OVERHEAD: u32 = 4 + 8 + FMT_CHUNK_SIZE + 8;

/// Struct representing a WAV file
#[derive(Debug, PartialEq, Clone)]
pub struct Wav {
    /// Contains data from the fmt chunk / header part of the file
    pub fmt: Fmt,
    /// Raw interleaved PCM bytes, exactly as found in the `data` chunk
    pub data: Vec<u8>,
    /// Contains raw chunk data that is either unimplemented or unknown
    pub chunks: Vec<Chunk>,
}

impl Wav {
    /// Wrap raw PCM bytes. The bytes are kept as is, a trailing partial frame included.
    ///
    /// ```
    /// use rawwav::{Fmt, Wav};
    ///
    /// let fmt = Fmt { sample_rate: 44_100, num_channels: 1, bit_depth: 16 };
    /// let wav = Wav::from_pcm(vec![0x00, 0x01, 0x02, 0x03], fmt);
    ///
    /// assert_eq!(wav.num_frames(), 2);
    /// ```
    pub fn from_pcm(data: Vec<u8>, fmt: Fmt) -> Self {
        let block_align = fmt.block_align() as usize;
        if block_align > 0 && data.len() % block_align != 0 {
            warn!(
                "PCM length {} is not a multiple of the {} byte frame size",
                data.len(),
                block_align
            );
        }

        Wav {
            fmt,
            data,
            chunks: Vec::new(),
        }
    }

    /// Create new [`Wav`] instance from a slice of bytes
    ///
    /// Chunks other than `fmt ` and `data` end up in [`Wav::chunks`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let parsed_chunks = parse_chunks(bytes)?;

        let fmt = parsed_chunks
            .iter()
            .find(|c| c.id == ChunkTag::Fmt)
            .ok_or(Error::NoFmtChunkFound)
            .and_then(Fmt::from_chunk)?;

        if fmt.num_channels == 0 {
            return Err(Error::InvalidChannelCount(fmt.num_channels));
        }

        if !matches!(fmt.bit_depth, 8 | 16 | 24 | 32) {
            return Err(Error::UnsupportedBitDepth(fmt.bit_depth));
        }

        let data = parsed_chunks
            .iter()
            .find(|c| c.id == ChunkTag::Data)
            .ok_or(Error::NoDataChunkFound)
            .map(|c| c.bytes.clone())?;

        let chunks = parsed_chunks
            .into_iter()
            .filter(|c| c.id != ChunkTag::Data && c.id != ChunkTag::Fmt)
            .collect();

        Ok(Wav { fmt, data, chunks })
    }

    /// Build the canonical 44 byte header for `data_len` bytes of PCM.
    ///
    /// ```
    /// use rawwav::{Fmt, Wav};
    ///
    /// let fmt = Fmt { sample_rate: 44_100, num_channels: 1, bit_depth: 16 };
    ///
    /// let bytes: [u8; 44] = [
    ///     0x52, 0x49, 0x46, 0x46, // RIFF
    ///     0x28, 0x00, 0x00, 0x00, // chunk size
    ///     0x57, 0x41, 0x56, 0x45, // WAVE
    ///     0x66, 0x6d, 0x74, 0x20, // fmt_
    ///     0x10, 0x00, 0x00, 0x00, // chunk size
    ///     0x01, 0x00, // audio format
    ///     0x01, 0x00, // num channels
    ///     0x44, 0xac, 0x00, 0x00, // sample rate
    ///     0x88, 0x58, 0x01, 0x00, // byte rate
    ///     0x02, 0x00, // block align
    ///     0x10, 0x00, // bits per sample
    ///     0x64, 0x61, 0x74, 0x61, // data
    ///     0x04, 0x00, 0x00, 0x00, // chunk size
    /// ];
    ///
    /// assert_eq!(Wav::header(&fmt, 4).unwrap(), bytes);
    /// ```
    pub fn header(fmt: &Fmt, data_len: usize) -> Result<[u8; HEADER_LEN], Error> {
        let data_size: u32 = data_len
            .try_into()
            .ok()
            .filter(|size| *size <= u32::MAX - RIFF_OVERHEAD)
            .ok_or(Error::DataTooLarge(data_len))?;

        let mut header = [0; HEADER_LEN];
        header[0..4].copy_from_slice(&ChunkTag::Riff.to_bytes());
        header[4..8].copy_from_slice(&(RIFF_OVERHEAD + data_size).to_le_bytes());
        header[8..12].copy_from_slice(&ChunkTag::Wave.to_bytes());
        header[12..16].copy_from_slice(&ChunkTag::Fmt.to_bytes());
        header[16..20].copy_from_slice(&FMT_CHUNK_SIZE.to_le_bytes());
        header[20..36].copy_from_slice(&fmt.to_bytes());
        header[36..40].copy_from_slice(&ChunkTag::Data.to_bytes());
        header[40..44].copy_from_slice(&data_size.to_le_bytes());

        Ok(header)
    }

    /// Convert a [`Wav`] instance into bytes: the canonical header followed by
    /// the PCM bytes verbatim. No pad byte is added after an odd length payload,
    /// and chunks kept from parsing are not written.
    ///
    /// ```
    /// use rawwav::{Fmt, Wav};
    ///
    /// let fmt = Fmt { sample_rate: 44_100, num_channels: 1, bit_depth: 16 };
    /// let bytes = Wav::from_pcm(vec![0x00, 0x01, 0x02, 0x03], fmt).to_bytes().unwrap();
    ///
    /// assert_eq!(bytes.len(), 48);
    /// assert_eq!(&bytes[44..], &[0x00, 0x01, 0x02, 0x03]);
    /// ```
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let header = Self::header(&self.fmt, self.data.len())?;

        let mut bytes = Vec::with_capacity(HEADER_LEN + self.data.len());
        bytes.extend_from_slice(&header);
        bytes.extend_from_slice(&self.data);

        Ok(bytes)
    }

    /// Number of complete frames in the PCM data
    pub fn num_frames(&self) -> usize {
        match self.fmt.block_align() as usize {
            0 => 0,
            block_align => self.data.len() / block_align,
        }
    }

    /// Playback length in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.fmt.sample_rate == 0 {
            return 0.0;
        }

        self.num_frames() as f64 / self.fmt.sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const CD_MONO: Fmt = Fmt {
        sample_rate: 44_100,
        num_channels: 1,
        bit_depth: 16,
    };

    fn size_field(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn four_bytes_make_a_48_byte_file() {
        let bytes = Wav::from_pcm(vec![0x00, 0x01, 0x02, 0x03], CD_MONO)
            .to_bytes()
            .unwrap();

        assert_eq!(bytes.len(), 48);
        assert_eq!(size_field(&bytes, 4), 40);
        assert_eq!(size_field(&bytes, 40), 4);
        assert_eq!(&bytes[44..], &[0x00, 0x01, 0x02, 0x03]);
    }

    #[test]
    fn empty_data_still_gets_a_header() {
        let bytes = Wav::from_pcm(vec![], CD_MONO).to_bytes().unwrap();

        assert_eq!(bytes.len(), HEADER_LEN);
        assert_eq!(size_field(&bytes, 4), 36);
        assert_eq!(size_field(&bytes, 40), 0);

        let wav = Wav::from_bytes(&bytes).unwrap();
        assert!(wav.data.is_empty());
        assert_eq!(wav.num_frames(), 0);
    }

    #[test]
    fn odd_length_is_written_verbatim() {
        let bytes = Wav::from_pcm(vec![0x01, 0x02, 0x03], CD_MONO)
            .to_bytes()
            .unwrap();

        assert_eq!(bytes.len(), 47);
        assert_eq!(size_field(&bytes, 4), 39);
        assert_eq!(size_field(&bytes, 40), 3);

        let wav = Wav::from_bytes(&bytes).unwrap();
        assert_eq!(wav.data, vec![0x01, 0x02, 0x03]);
        assert_eq!(wav.num_frames(), 1);
    }

    #[test]
    fn header_rejects_oversized_payload() {
        let too_big = (u32::MAX - 35) as usize;

        assert_eq!(
            Wav::header(&CD_MONO, too_big),
            Err(Error::DataTooLarge(too_big))
        );
        assert!(Wav::header(&CD_MONO, too_big - 1).is_ok());
    }

    #[test]
    fn parse_wav_16_bit_stereo() {
        let bytes: [u8; 60] = [
            0x52, 0x49, 0x46, 0x46, // RIFF
            0x34, 0x00, 0x00, 0x00, // chunk size
            0x57, 0x41, 0x56, 0x45, // WAVE
            0x66, 0x6d, 0x74, 0x20, // fmt_
            0x10, 0x00, 0x00, 0x00, // chunk size
            0x01, 0x00, // audio format
            0x02, 0x00, // num channels
            0x22, 0x56, 0x00, 0x00, // sample rate
            0x88, 0x58, 0x01, 0x00, // byte rate
            0x04, 0x00, // block align
            0x10, 0x00, // bits per sample
            0x64, 0x61, 0x74, 0x61, // data
            0x10, 0x00, 0x00, 0x00, // chunk size
            0x00, 0x00, 0x01, 0x00, // sample 1 L+R
            0x02, 0x00, 0x03, 0x00, // sample 2 L+R
            0x04, 0x00, 0x05, 0x00, // sample 3 L+R
            0x06, 0x00, 0x07, 0x00, // sample 4 L+R
        ];

        let wav = Wav::from_bytes(&bytes).unwrap();

        assert_eq!(wav.fmt.sample_rate, 22050);
        assert_eq!(wav.fmt.bit_depth, 16);
        assert_eq!(wav.fmt.num_channels, 2);
        assert_eq!(wav.num_frames(), 4);
        assert_eq!(wav.data, bytes[44..].to_vec());
        assert_eq!(wav.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn parse_keeps_list_chunk() {
        let mut bytes = Wav::header(&CD_MONO, 2).unwrap().to_vec();
        bytes.extend_from_slice(&[0xaa, 0xbb]);
        bytes.extend_from_slice(b"LIST\x04\x00\x00\x00INFO");

        let wav = Wav::from_bytes(&bytes).unwrap();

        assert_eq!(wav.data, vec![0xaa, 0xbb]);
        assert_eq!(wav.chunks.len(), 1);
        assert_eq!(wav.chunks[0].id, ChunkTag::List);
        assert_eq!(wav.chunks[0].bytes, b"INFO".to_vec());
    }

    #[test]
    fn parse_reports_missing_chunks() {
        let header = Wav::header(&CD_MONO, 0).unwrap();

        // RIFF + WAVE only
        assert_eq!(Wav::from_bytes(&header[..12]), Err(Error::NoFmtChunkFound));
        // RIFF + WAVE + fmt, no data
        assert_eq!(Wav::from_bytes(&header[..36]), Err(Error::NoDataChunkFound));
    }

    #[test]
    fn parse_rejects_odd_bit_depth() {
        let fmt = Fmt {
            bit_depth: 12,
            ..CD_MONO
        };
        let header = Wav::header(&fmt, 0).unwrap();

        assert_eq!(Wav::from_bytes(&header), Err(Error::UnsupportedBitDepth(12)));
    }

    #[test]
    fn duration_of_one_second() {
        let wav = Wav::from_pcm(vec![0; 88_200], CD_MONO);

        assert_eq!(wav.num_frames(), 44_100);
        assert_eq!(wav.duration_secs(), 1.0);
    }
}
