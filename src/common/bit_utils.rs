use std::fmt::Display;
use std::mem;

use num_traits::PrimInt;

use super::error::{QRError, QRResult};

// Bit stream
//------------------------------------------------------------------------------

// Append-only sequence of bits packed MSB first, with a read cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Pointer to take bits
    cursor: usize,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bit_capacity: usize) -> Self {
        Self { data: Vec::with_capacity((bit_capacity + 7) >> 3), len: 0, cursor: 0 }
    }

    pub fn from_byte(byte: u8) -> Self {
        Self { data: vec![byte], len: 8, cursor: 0 }
    }

    pub fn from_byte_array(bytes: &[u8]) -> Self {
        Self { data: bytes.to_vec(), len: bytes.len() << 3, cursor: 0 }
    }

    // Big endian, 8 bytes wide
    pub fn from_integer(n: i64) -> Self {
        Self { data: n.to_be_bytes().to_vec(), len: 64, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, pos: usize) -> Option<bool> {
        if pos >= self.len {
            return None;
        }
        Some((self.data[pos >> 3] << (pos & 7)) >> 7 == 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).filter_map(|i| self.get(i))
    }

    // Trailing `digits` bits, most significant first
    pub fn to_bits(&self, digits: usize) -> QRResult<Vec<bool>> {
        if digits > self.len {
            return Err(QRError::InvalidArgument("more digits requested than bits held"));
        }
        Ok((self.len - digits..self.len).filter_map(|i| self.get(i)).collect())
    }

    pub fn to_bytes(&self) -> QRResult<Vec<u8>> {
        if self.len & 7 != 0 {
            return Err(QRError::InvalidArgument("bit length is not a multiple of 8"));
        }
        Ok(self.data.clone())
    }
}


// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn push(&mut self, bit: bool) {
        let offset = self.len & 7;
        if offset == 0 {
            self.data.push(0);
        }
        if bit {
            let pos = self.len >> 3;
            self.data[pos] |= 0b10000000 >> offset;
        }
        self.len += 1;
    }

    // Pushes the lowest `size` bits of `bits`, most significant first. Fails
    // when the value doesn't fit the declared width.
    pub fn push_bits<T>(&mut self, bits: T, size: usize) -> QRResult<()>
    where
        T: PrimInt + Display,
    {
        let max_bits = mem::size_of::<T>() * 8;
        if size > max_bits || max_bits - (bits.leading_zeros() as usize) > size {
            return Err(QRError::InvalidArgument("value overflows declared bit width"));
        }

        for i in (0..size).rev() {
            self.push((bits >> i) & T::one() == T::one());
        }
        Ok(())
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        if self.len & 7 == 0 {
            self.data.extend_from_slice(bytes);
            self.len += bytes.len() << 3;
        } else {
            bytes.iter().for_each(|&b| self.push_byte(b));
        }
    }

    fn push_byte(&mut self, byte: u8) {
        for i in (0..8).rev() {
            self.push((byte >> i) & 1 == 1);
        }
    }
}

#[cfg(test)]
mod bit_stream_push_tests {

    use super::BitStream;
    use crate::common::error::QRError;

    #[test]
    fn test_len() {
        let mut bs = BitStream::new();
        assert_eq!(bs.len(), 0);
        bs.push_bits(0, 0).unwrap();
        assert_eq!(bs.len(), 0);
        bs.push_bits(0b1000, 4).unwrap();
        assert_eq!(bs.len(), 4);
        bs.push_bits(0b1000, 8).unwrap();
        assert_eq!(bs.len(), 12);
        bs.push_bits(0b1111111, 7).unwrap();
        assert_eq!(bs.len(), 19);
        bs.push_bits(0b111111111111u16, 16).unwrap();
        assert_eq!(bs.len(), 35);
    }

    #[test]
    fn test_push() {
        let mut bs = BitStream::new();
        bs.push(false);
        assert_eq!(bs.data[..1], [0b00000000]);
        bs.push(true);
        assert_eq!(bs.data[..1], [0b01000000]);
    }

    #[test]
    fn test_push_bits() {
        let mut bs = BitStream::new();
        bs.push_bits(0b0100u8, 4).unwrap();
        bs.push_bits(12u16, 8).unwrap();
        bs.push_bits(b'H', 8).unwrap();
        bs.push_bits(0, 4).unwrap();
        assert_eq!(bs.to_bytes(), Ok(vec![0x40, 0xC4, 0x80]));
    }

    #[test]
    fn test_push_bits_overflow() {
        let mut bs = BitStream::new();
        assert!(matches!(bs.push_bits(16, 4), Err(QRError::InvalidArgument(_))));
        assert!(matches!(bs.push_bits(1u8, 9), Err(QRError::InvalidArgument(_))));
        assert!(bs.is_empty());
    }

    #[test]
    fn test_extend_unaligned() {
        let mut bs = BitStream::new();
        bs.push_bits(0b1111, 4).unwrap();
        bs.extend(&[0b1010_1010]);
        bs.push_bits(0, 4).unwrap();
        assert_eq!(bs.to_bytes(), Ok(vec![0b1111_1010, 0b1010_0000]));
    }
}

// Padding for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    // Zero fills until the last byte is complete
    pub fn pad_to_byte(&mut self) {
        self.len = (self.len + 7) & !7;
    }

    // Alternates the pad codewords until the bit capacity is reached
    pub fn pad_to_capacity(&mut self, bit_capacity: usize) {
        debug_assert!(self.len & 7 == 0, "Bit stream must be byte aligned before padding");

        let pad_len = bit_capacity.saturating_sub(self.len) >> 3;
        PADDING_CODEWORDS.iter().cycle().take(pad_len).for_each(|&b| self.push_byte(b));
    }
}


// Take bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn take_bit(&mut self) -> Option<bool> {
        let bit = self.get(self.cursor)?;
        self.cursor += 1;
        Some(bit)
    }
}

// Iterator for bit stream
//------------------------------------------------------------------------------

impl Iterator for BitStream {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        self.take_bit()
    }
}

#[cfg(test)]
mod bit_stream_take_tests {

    use super::BitStream;

    #[test]
    fn test_take() {
        let mut bs = BitStream::from_byte_array(&[0b1101_0010]);
        assert_eq!(bs.take_bit(), Some(true));
        assert_eq!(bs.take_bit(), Some(true));
        assert_eq!(bs.take_bit(), Some(false));
        assert_eq!(bs.by_ref().count(), 5);
        assert_eq!(bs.take_bit(), None);
    }

    #[test]
    fn test_iter() {
        let bs = BitStream::from_byte(0b1000_0001);
        let bits = bs.collect::<Vec<_>>();
        assert_eq!(bits, [true, false, false, false, false, false, false, true]);
    }
}

// Global constants
//------------------------------------------------------------------------------

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];
