use super::{
    bit_utils::BitStream,
    error::{QRError, QRResult},
    metadata::{ECLevel, Version},
};

// BCH encoding for format & version info
//------------------------------------------------------------------------------

// 15 bit format info from the 2 ec level bits and 3 mask bits, MSB first
pub fn encode_format_info(ecl_bits: &[bool], mask_bits: &[bool]) -> QRResult<u16> {
    check_len(ecl_bits, 2)?;
    check_len(mask_bits, 3)?;

    let data = (pack(ecl_bits) << 3) | pack(mask_bits);
    let rem = bch_remainder(data << 10, FORMAT_GENERATOR, 15);
    Ok((((data << 10) | rem) ^ FORMAT_MASK) as u16)
}

// 18 bit version info from the 6 version bits, MSB first
pub fn encode_version_info(version_bits: &[bool]) -> QRResult<u32> {
    check_len(version_bits, 6)?;

    let data = pack(version_bits);
    Ok((data << 12) | bch_remainder(data << 12, VERSION_GENERATOR, 18))
}

pub fn format_info(ec_level: ECLevel, mask: u8) -> QRResult<u16> {
    if mask > 7 {
        return Err(QRError::InvalidArgument("mask must be within 0..=7"));
    }
    let ecl_bits = BitStream::from_byte(ec_level.format_bits()).to_bits(2)?;
    let mask_bits = BitStream::from_byte(mask).to_bits(3)?;
    encode_format_info(&ecl_bits, &mask_bits)
}

pub fn version_info(version: Version) -> QRResult<u32> {
    encode_version_info(&BitStream::from_byte(*version as u8).to_bits(6)?)
}

fn check_len(bits: &[bool], expected: usize) -> QRResult<()> {
    if bits.len() != expected {
        return Err(QRError::DimensionMismatch { expected, found: bits.len() });
    }
    Ok(())
}

fn pack(bits: &[bool]) -> u32 {
    bits.iter().fold(0, |acc, &b| (acc << 1) | b as u32)
}

// Remainder of the polynomial division of `num` by `gen` over GF(2), where
// `width` is the bit length of the codeword
fn bch_remainder(mut num: u32, gen: u32, width: usize) -> u32 {
    let gen_len = 32 - gen.leading_zeros() as usize;
    for i in (gen_len - 1..width).rev() {
        if (num >> i) & 1 == 1 {
            num ^= gen << (i + 1 - gen_len);
        }
    }
    num
}


// Global constants
//------------------------------------------------------------------------------

static FORMAT_GENERATOR: u32 = 0b101_0011_0111;

static FORMAT_MASK: u32 = 0b101_0100_0001_0010;

static VERSION_GENERATOR: u32 = 0b1_1111_0010_0101;
