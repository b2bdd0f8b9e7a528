use super::{
    bit_utils::BitStream,
    error::{QRError, QRResult},
    metadata::{ECLevel, Version},
};

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Mode {
    Numeric = 0b0001,
    Binary = 0b0100,
}

impl Mode {
    // Numeric iff the data is non-empty and every byte is an ascii digit
    pub fn detect(data: &[u8]) -> Self {
        if !data.is_empty() && data.iter().all(|&b| Self::Numeric.contains(b)) {
            Self::Numeric
        } else {
            Self::Binary
        }
    }

    pub fn contains(&self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Binary => true,
        }
    }

    pub fn indicator(&self) -> u8 {
        *self as u8
    }

    // Bit length of the payload alone, without mode indicator & count field
    pub fn encoded_len(&self, len: usize) -> usize {
        match self {
            Self::Numeric => len / 3 * 10 + [0, 4, 7][len % 3],
            Self::Binary => len * 8,
        }
    }
}


// Version selection
//------------------------------------------------------------------------------

fn required_bits(version: Version, mode: Mode, len: usize) -> usize {
    MODE_INDICATOR_LEN + version.char_cnt_bits(mode) + mode.encoded_len(len)
}

// Smallest version whose data capacity holds mode indicator, count field &
// payload
pub fn select_version(ec_level: ECLevel, mode: Mode, len: usize) -> QRResult<Version> {
    Version::all()
        .find(|&v| required_bits(v, mode, len) <= v.data_bit_capacity(ec_level))
        .ok_or(QRError::CapacityExceeded { required_bits: required_bits(Version::MAX, mode, len) })
}

#[cfg(test)]
mod select_version_tests {
    use test_case::test_case;

    use super::{select_version, Mode};
    use crate::common::{error::QRError, metadata::ECLevel};

    #[test_case(ECLevel::L, Mode::Binary, 0, 1)]
    #[test_case(ECLevel::L, Mode::Binary, 12, 1)]
    #[test_case(ECLevel::L, Mode::Binary, 17, 1)]
    #[test_case(ECLevel::L, Mode::Binary, 18, 2)]
    #[test_case(ECLevel::H, Mode::Binary, 7, 1)]
    #[test_case(ECLevel::H, Mode::Binary, 8, 2)]
    #[test_case(ECLevel::L, Mode::Numeric, 41, 1)]
    #[test_case(ECLevel::L, Mode::Numeric, 42, 2)]
    #[test_case(ECLevel::L, Mode::Binary, 2953, 40)]
    fn test_select_version(ecl: ECLevel, mode: Mode, len: usize, exp: usize) {
        assert_eq!(*select_version(ecl, mode, len).unwrap(), exp);
    }

    #[test]
    fn test_capacity_exceeded() {
        assert_eq!(
            select_version(ECLevel::L, Mode::Binary, 2954),
            Err(QRError::CapacityExceeded { required_bits: 23652 })
        );
        assert!(select_version(ECLevel::H, Mode::Numeric, 7090).is_err());
    }
}

// Encoder
//------------------------------------------------------------------------------

// Data codewords for the smallest version fitting the data
pub fn encode(data: &[u8], ec_level: ECLevel) -> QRResult<(Vec<u8>, Version)> {
    let mode = Mode::detect(data);
    let ver = select_version(ec_level, mode, data.len())?;
    Ok((encode_with_mode(data, ver, ec_level, mode)?, ver))
}

pub fn encode_with_version(data: &[u8], version: Version, ec_level: ECLevel) -> QRResult<Vec<u8>> {
    encode_with_mode(data, version, ec_level, Mode::detect(data))
}

fn encode_with_mode(
    data: &[u8],
    version: Version,
    ec_level: ECLevel,
    mode: Mode,
) -> QRResult<Vec<u8>> {
    let bit_capacity = version.data_bit_capacity(ec_level);
    let required_bits = required_bits(version, mode, data.len());
    if required_bits > bit_capacity {
        return Err(QRError::CapacityExceeded { required_bits });
    }

    let mut bs = BitStream::with_capacity(bit_capacity);
    bs.push_bits(mode.indicator(), MODE_INDICATOR_LEN)?;
    bs.push_bits(data.len(), version.char_cnt_bits(mode))?;
    match mode {
        Mode::Numeric => push_numeric(data, &mut bs)?,
        Mode::Binary => bs.extend(data),
    }

    push_terminator(&mut bs, bit_capacity)?;
    bs.pad_to_byte();
    bs.pad_to_capacity(bit_capacity);

    debug_assert!(
        bs.len() == bit_capacity,
        "Encoded length doesn't match capacity: Len {}, Capacity {bit_capacity}",
        bs.len()
    );
    bs.to_bytes()
}

// Groups of 3 digits into 10 bits, trailing 2 into 7 bits & trailing 1 into 4
fn push_numeric(data: &[u8], bs: &mut BitStream) -> QRResult<()> {
    for chunk in data.chunks(3) {
        let value = chunk.iter().fold(0u16, |acc, &b| acc * 10 + (b - b'0') as u16);
        let size = match chunk.len() {
            3 => 10,
            2 => 7,
            _ => 4,
        };
        bs.push_bits(value, size)?;
    }
    Ok(())
}

// Truncated when the stream is within 4 bits of capacity
fn push_terminator(bs: &mut BitStream, bit_capacity: usize) -> QRResult<()> {
    let len = TERMINATOR_LEN.min(bit_capacity - bs.len());
    bs.push_bits(0u8, len)
}


// Global constants
//------------------------------------------------------------------------------

pub static MODE_INDICATOR_LEN: usize = 4;

pub static TERMINATOR_LEN: usize = 4;
