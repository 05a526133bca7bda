use crate::error::Error;
use alloc::vec::Vec;
use core::convert::TryInto;

/// Chunk identifiers found in a RIFF/WAVE file
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ChunkTag {
    /// `RIFF`
    Riff,
    /// `WAVE`
    Wave,
    /// `fmt `
    Fmt,
    /// `data`
    Data,
    /// `LIST`
    List,
    /// `fact`
    Fact,
    /// Anything else, kept verbatim
    Unknown([u8; 4]),
}

impl ChunkTag {
    pub(crate) fn from_bytes(bytes: &[u8; 4]) -> Self {
        match bytes {
            b"RIFF" => ChunkTag::Riff,
            b"WAVE" => ChunkTag::Wave,
            b"fmt " => ChunkTag::Fmt,
            b"data" => ChunkTag::Data,
            b"LIST" => ChunkTag::List,
            b"fact" => ChunkTag::Fact,
            other => ChunkTag::Unknown(*other),
        }
    }

    pub(crate) fn to_bytes(self) -> [u8; 4] {
        match self {
            ChunkTag::Riff => *b"RIFF",
            ChunkTag::Wave => *b"WAVE",
            ChunkTag::Fmt => *b"fmt ",
            ChunkTag::Data => *b"data",
            ChunkTag::List => *b"LIST",
            ChunkTag::Fact => *b"fact",
            ChunkTag::Unknown(id) => id,
        }
    }
}

/// A single sub-chunk of a RIFF/WAVE file
#[derive(Debug, PartialEq, Clone)]
pub struct Chunk {
    /// Four character chunk id
    pub id: ChunkTag,
    /// Chunk payload, without the 8 byte chunk header and padding
    pub bytes: Vec<u8>,
}

/// Split a RIFF/WAVE buffer into its sub-chunks.
///
/// A chunk whose declared size runs past the end of the buffer is cut
/// at the end of the buffer.
pub(crate) fn parse_chunks(bytes: &[u8]) -> Result<Vec<Chunk>, Error> {
    if bytes.len() < 12 || &bytes[0..4] != b"RIFF" {
        return Err(Error::NoRiffChunkFound);
    }

    if &bytes[8..12] != b"WAVE" {
        return Err(Error::NoWaveTagFound);
    }

    let mut chunks = Vec::new();
    let mut pos = 12;

    while pos + 8 <= bytes.len() {
        let id = ChunkTag::from_bytes(
            &bytes[pos..pos + 4]
                .try_into()
                .map_err(|_| Error::CantParseSliceInto)?,
        );
        let size = bytes[pos + 4..pos + 8]
            .try_into()
            .map_err(|_| Error::CantParseSliceInto)
            .map(u32::from_le_bytes)? as usize;

        let start = pos + 8;
        let end = start.saturating_add(size).min(bytes.len());

        chunks.push(Chunk {
            id,
            bytes: bytes[start..end].to_vec(),
        });

        // Skip the padding byte after odd sized chunks
        pos = start.saturating_add(size).saturating_add(size % 2);
    }

    Ok(chunks)
}
