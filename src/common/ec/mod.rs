mod block;

pub use block::*;

use super::{
    error::{QRError, QRResult},
    metadata::{ECLevel, Version},
    poly::Polynomial,
};

// Reed-Solomon encoder
//------------------------------------------------------------------------------

// Appends `nsym` parity bytes to the message. The prefix is left untouched.
pub fn encode(message: &[u8], nsym: usize) -> QRResult<Vec<u8>> {
    if nsym > MAX_EC_SIZE {
        return Err(QRError::InvalidArgument("parity length exceeds 254"));
    }
    if message.len() + nsym > MAX_BLOCK_SIZE {
        return Err(QRError::InvalidArgument("block length exceeds 255"));
    }

    let mut padded = Vec::with_capacity(message.len() + nsym);
    padded.extend_from_slice(message);
    padded.resize(message.len() + nsym, 0);

    let (_, rem) = Polynomial::from(padded).divide(&Polynomial::generator(nsym))?;

    let mut res = message.to_vec();
    res.extend(rem.into_inner());
    Ok(res)
}


// Block split
//------------------------------------------------------------------------------

// Splits the padded data into blocks, encodes each and concatenates the
// results in block order
pub fn apply_error_correction(
    data: &[u8],
    version: Version,
    ec_level: ECLevel,
) -> QRResult<Vec<u8>> {
    let blocks = block_structure(version, ec_level)?;
    check_data_len(data, blocks)?;

    let mut res = Vec::with_capacity(version.total_codewords());
    let mut offset = 0;
    for b in blocks {
        let end = offset + b.data_codewords();
        res.extend(encode(&data[offset..end], b.ecc_codewords())?);
        offset = end;
    }
    Ok(res)
}

// Final codeword sequence: data codewords column-wise across blocks, followed
// by the parity codewords column-wise across blocks
pub fn interleave_codewords(data: &[u8], version: Version, ec_level: ECLevel) -> QRResult<Vec<u8>> {
    let blocks = block_structure(version, ec_level)?;
    check_data_len(data, blocks)?;

    let mut data_blocks = Vec::with_capacity(blocks.len());
    let mut ecc_blocks = Vec::with_capacity(blocks.len());
    let mut offset = 0;
    for b in blocks {
        let end = offset + b.data_codewords();
        let mut coded = encode(&data[offset..end], b.ecc_codewords())?;
        ecc_blocks.push(coded.split_off(b.data_codewords()));
        data_blocks.push(coded);
        offset = end;
    }

    let mut res = Vec::with_capacity(version.total_codewords());
    interleave(&data_blocks, &mut res);
    interleave(&ecc_blocks, &mut res);
    debug_assert!(
        res.len() == version.total_codewords(),
        "Codeword count doesn't match version: Found {}, Expected {}",
        res.len(),
        version.total_codewords()
    );
    Ok(res)
}

fn interleave(blocks: &[Vec<u8>], out: &mut Vec<u8>) {
    let max_len = blocks.iter().map(Vec::len).max().unwrap_or(0);
    for i in 0..max_len {
        out.extend(blocks.iter().filter_map(|b| b.get(i)));
    }
}

fn check_data_len(data: &[u8], blocks: &[Block]) -> QRResult<()> {
    let expected = blocks.iter().map(Block::data_codewords).sum::<usize>();
    if data.len() != expected {
        return Err(QRError::DimensionMismatch { expected, found: data.len() });
    }
    Ok(())
}


// Global constants
//------------------------------------------------------------------------------

pub static MAX_BLOCK_SIZE: usize = 255;

pub static MAX_EC_SIZE: usize = 254;
