use super::error::QRResult;

// Bit stream
//------------------------------------------------------------------------------

/// Append-only, MSB-first bit buffer with a fixed bit capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Max bit capacity
    capacity: usize,
    // Read cursor used by the iterator
    cursor: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> QRResult<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact((capacity + 7) >> 3)?;
        data.resize((capacity + 7) >> 3, 0);
        Ok(Self { data, len: 0, capacity, cursor: 0 })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..(self.len + 7) >> 3]
    }

    pub fn push_bits(&mut self, bits: u8, size: usize) {
        debug_assert!(
            size >= (8 - bits.leading_zeros()) as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );
        debug_assert!(
            self.len + size <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + size
        );

        if size == 0 {
            return;
        }

        let offset = self.len & 7;
        let pos = self.len >> 3;

        if offset + size <= 8 {
            self.data[pos] |= bits << (8 - size - offset);
        } else {
            self.data[pos] |= bits >> (size + offset - 8);
            self.data[pos + 1] = bits << (16 - size - offset);
        }

        self.len += size;
    }

    pub fn push_byte(&mut self, byte: u8) {
        self.push_bits(byte, 8);
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        bytes.iter().for_each(|&b| self.push_byte(b));
    }

    pub fn get(&self, index: usize) -> bool {
        debug_assert!(index < self.len, "Index out of bounds: Index {index}, Len {}", self.len);
        self.data[index >> 3] & (0b10000000 >> (index & 7)) != 0
    }
}

impl Iterator for BitStream {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.len {
            return None;
        }
        let bit = self.get(self.cursor);
        self.cursor += 1;
        Some(bit)
    }
}
