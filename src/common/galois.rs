use std::sync::LazyLock;

use super::error::{QRError, QRResult};

// GF(256) arithmetic
//------------------------------------------------------------------------------

// Field elements are bytes, reduced by x^8 + x^4 + x^3 + x^2 + 1
pub struct GF256;

impl GF256 {
    pub const fn add(a: u8, b: u8) -> u8 {
        a ^ b
    }

    // Carry-less product reduced modulo the primitive polynomial. Bitwise and
    // table-free, it is the reference the lookup tables are built from.
    pub fn multiply(a: u8, b: u8) -> u8 {
        let mut prod = 0u16;
        for i in 0..8 {
            if (b >> i) & 1 == 1 {
                prod ^= (a as u16) << i;
            }
        }
        for i in (8..16).rev() {
            if (prod >> i) & 1 == 1 {
                prod ^= PRIMITIVE_POLY << (i - 8);
            }
        }
        prod as u8
    }

    pub fn fast_multiply(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_sum = TABLES.log[a as usize] as usize + TABLES.log[b as usize] as usize;
        TABLES.exp[log_sum % 255]
    }

    pub fn fast_division(dividend: u8, divisor: u8) -> QRResult<u8> {
        if divisor == 0 {
            return Err(QRError::DivisionByZero);
        }
        if dividend == 0 {
            return Ok(0);
        }
        let log_diff =
            TABLES.log[dividend as usize] as usize + 255 - TABLES.log[divisor as usize] as usize;
        Ok(TABLES.exp[log_diff % 255])
    }

    pub fn fast_power(x: u8, pow: usize) -> u8 {
        if x == 0 {
            return if pow == 0 { 1 } else { 0 };
        }
        let log_prod = TABLES.log[x as usize] as usize * (pow % 255);
        TABLES.exp[log_prod % 255]
    }

    pub fn fast_inverse(x: u8) -> QRResult<u8> {
        if x == 0 {
            return Err(QRError::DivisionByZero);
        }
        Ok(TABLES.exp[(255 - TABLES.log[x as usize] as usize) % 255])
    }
}

struct Tables {
    exp: [u8; 255],
    log: [u8; 256],
}

// Walks the multiplicative cycle of the generator 2 once
static TABLES: LazyLock<Tables> = LazyLock::new(|| {
    let mut exp = [0u8; 255];
    let mut log = [0u8; 256];
    let mut x = 1u8;
    for (i, e) in exp.iter_mut().enumerate() {
        *e = x;
        log[x as usize] = i as u8;
        x = GF256::multiply(x, GENERATOR);
    }
    debug_assert_eq!(x, 1, "Generator doesn't have order 255");
    Tables { exp, log }
});


// Global constants
//------------------------------------------------------------------------------

static PRIMITIVE_POLY: u16 = 0x11D;

static GENERATOR: u8 = 2;
