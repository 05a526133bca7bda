use crate::error::Error;
use crate::fmt::Fmt;

/// Sample rate the synthesizer renders at
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
/// The synthesizer writes a single channel
pub const DEFAULT_CHANNELS: u16 = 1;
/// 16 bit samples
pub const DEFAULT_SAMPLE_WIDTH: u16 = 2;

/// Parameters describing the raw PCM input.
///
/// The raw file carries no header, so these have to be supplied by whoever
/// produced it. The defaults match 44.1 kHz mono 16 bit audio.
///
/// ```
/// use rawwav::ConvertConfig;
///
/// let fmt = ConvertConfig::default().to_fmt().unwrap();
///
/// assert_eq!(fmt.sample_rate, 44_100);
/// assert_eq!(fmt.num_channels, 1);
/// assert_eq!(fmt.bit_depth, 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Frames per second
    pub sample_rate: u32,
    /// Interleaved channel count
    pub channels: u16,
    /// Bytes per sample, between 1 and 4
    pub sample_width: u16,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
            sample_width: DEFAULT_SAMPLE_WIDTH,
        }
    }
}

impl ConvertConfig {
    /// Validate the parameters and turn them into a `fmt ` description
    pub fn to_fmt(&self) -> Result<Fmt, Error> {
        if self.sample_rate == 0 {
            return Err(Error::InvalidSampleRate(self.sample_rate));
        }

        if self.channels == 0 {
            return Err(Error::InvalidChannelCount(self.channels));
        }

        let bit_depth = match self.sample_width {
            1..=4 => self.sample_width * 8,
            _ => return Err(Error::UnsupportedBitDepth(self.sample_width.saturating_mul(8))),
        };

        // block align is a u16 and byte rate a u32 in the header
        let block_align = self
            .channels
            .checked_mul(self.sample_width)
            .ok_or(Error::InvalidChannelCount(self.channels))?;
        self.sample_rate
            .checked_mul(block_align as u32)
            .ok_or(Error::InvalidSampleRate(self.sample_rate))?;

        Ok(Fmt {
            sample_rate: self.sample_rate,
            num_channels: self.channels,
            bit_depth,
        })
    }
}
