use tracing::debug;

use super::bitstream::BitStream;
use super::error::{QRError, QRResult};
use super::metadata::Flavor;

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Mode {
    Byte,
}

impl Mode {
    pub const fn indicator(self) -> u8 {
        match self {
            Self::Byte => 0b0100,
        }
    }

    pub const fn char_cnt_bits(self) -> usize {
        match self {
            Self::Byte => 8,
        }
    }
}

// Message data
//------------------------------------------------------------------------------

/// Payload tagged with its encoding mode, ready to be written as codewords.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct MessageData<'a> {
    mode: Mode,
    data: &'a [u8],
}

impl<'a> MessageData<'a> {
    pub fn new(data: &'a [u8]) -> QRResult<Self> {
        if data.len() > u8::MAX as usize {
            return Err(QRError::DataTooLong);
        }
        Ok(Self { mode: Mode::Byte, data })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

// Encoder
//------------------------------------------------------------------------------

pub const PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

/// Writes the data codeword stream for `msg`: mode indicator, character count, payload,
/// terminator and pad codewords up to `flavor.data_codewords()` bytes.
pub fn encode_message(msg: &MessageData, flavor: &Flavor) -> QRResult<BitStream> {
    if msg.len() > flavor.capacity {
        return Err(QRError::DataTooLong);
    }

    let bit_capacity = flavor.data_codewords() << 3;
    let mut bs = BitStream::new(bit_capacity)?;

    bs.push_bits(msg.mode().indicator(), 4);
    bs.push_bits(msg.len() as u8, msg.mode().char_cnt_bits());
    bs.extend(msg.data());

    push_terminator(&mut bs);
    pad_remaining_capacity(&mut bs);

    debug!(
        data_len = msg.len(),
        codewords = bs.len() >> 3,
        "Message stream encoded"
    );
    Ok(bs)
}

fn push_terminator(bs: &mut BitStream) {
    let size = 4.min(bs.capacity() - bs.len());
    bs.push_bits(0, size);
}

// Payload plus header and terminator always ends on a byte boundary, so padding is whole
// codewords
fn pad_remaining_capacity(bs: &mut BitStream) {
    debug_assert_eq!(bs.len() & 7, 0, "Stream is not byte aligned before padding: {}", bs.len());

    let remaining = (bs.capacity() - bs.len()) >> 3;
    PADDING_CODEWORDS.iter().copied().cycle().take(remaining).for_each(|pc| bs.push_byte(pc));
}
