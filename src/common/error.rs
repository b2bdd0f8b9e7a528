use std::fmt::{Debug, Display, Error, Formatter};

use super::metadata::ECLevel;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // Arguments & conversions
    InvalidArgument(&'static str),
    UnsupportedType,

    // Capacity & tables
    CapacityExceeded { required_bits: usize },
    UnknownBlockStructure { version: usize, ec_level: ECLevel },

    // Metadata
    DimensionMismatch { expected: usize, found: usize },

    // Field arithmetic
    DivisionByZero,

    // Matrix
    OutOfBounds { x: usize, y: usize, size: usize },
}

impl Display for QRError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match *self {
            Self::InvalidArgument(what) => write!(f, "Invalid argument: {what}"),
            Self::UnsupportedType => f.write_str("Unsupported value for typed conversion"),
            Self::CapacityExceeded { required_bits } => {
                write!(f, "Data too large for any version: {required_bits} bits required")
            }
            Self::UnknownBlockStructure { version, ec_level } => {
                write!(f, "No block structure for version {version}, ec level {ec_level:?}")
            }
            Self::DimensionMismatch { expected, found } => {
                write!(f, "Bit length mismatch: expected {expected}, found {found}")
            }
            Self::DivisionByZero => f.write_str("Division by zero in GF(256)"),
            Self::OutOfBounds { x, y, size } => {
                write!(f, "Pattern at ({x}, {y}) exceeds matrix of size {size}")
            }
        }
    }
}

impl std::error::Error for QRError {}

pub type QRResult<T> = Result<T, QRError>;
