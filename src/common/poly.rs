use std::ops::Deref;

use super::{
    error::{QRError, QRResult},
    galois::GF256,
};

// Polynomial over GF(256)
//------------------------------------------------------------------------------

// Coefficients are stored highest degree first
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Polynomial(Vec<u8>);

impl Deref for Polynomial {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<u8>> for Polynomial {
    fn from(coeffs: Vec<u8>) -> Self {
        Self(coeffs)
    }
}

impl From<&[u8]> for Polynomial {
    fn from(coeffs: &[u8]) -> Self {
        Self(coeffs.to_vec())
    }
}

impl Polynomial {
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    // Product of (x - 2^i) for i in 0..nsym
    pub fn generator(nsym: usize) -> Self {
        (0..nsym).fold(Self(vec![1]), |g, i| g.multiply(&Self(vec![1, GF256::fast_power(2, i)])))
    }

    pub fn scale(&self, x: u8) -> Self {
        Self(self.iter().map(|&c| GF256::fast_multiply(c, x)).collect())
    }

    // Operands are right aligned so that equal degrees line up
    pub fn add(&self, other: &Self) -> Self {
        let len = self.len().max(other.len());
        let mut res = vec![0; len];
        res[len - self.len()..].copy_from_slice(self);
        for (r, &c) in res[len - other.len()..].iter_mut().zip(other.iter()) {
            *r = GF256::add(*r, c);
        }
        Self(res)
    }

    pub fn multiply(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return Self(vec![]);
        }
        let mut res = vec![0; self.len() + other.len() - 1];
        for (i, &p) in self.iter().enumerate() {
            for (j, &q) in other.iter().enumerate() {
                res[i + j] = GF256::add(res[i + j], GF256::fast_multiply(p, q));
            }
        }
        Self(res)
    }

    // Extended synthetic division. The divisor's leading term only aligns the
    // subtraction and normalizes each quotient term, so it is skipped when
    // subtracting.
    pub fn divide(&self, divisor: &Self) -> QRResult<(Self, Self)> {
        let lead = match divisor.first() {
            None => return Err(QRError::InvalidArgument("divisor is empty")),
            Some(0) => return Err(QRError::InvalidArgument("divisor has zero leading term")),
            Some(&lead) => lead,
        };

        let rem_len = divisor.len() - 1;
        if self.len() < divisor.len() {
            let mut rem = vec![0; rem_len];
            rem[rem_len - self.len()..].copy_from_slice(self);
            return Ok((Self(vec![0]), Self(rem)));
        }

        let mut res = self.0.clone();
        let sep = self.len() - rem_len;
        for i in 0..sep {
            let coeff = GF256::fast_division(res[i], lead)?;
            res[i] = coeff;
            if coeff == 0 {
                continue;
            }
            for (r, &d) in res[i + 1..].iter_mut().zip(divisor[1..].iter()) {
                *r = GF256::add(*r, GF256::fast_multiply(d, coeff));
            }
        }

        let rem = res.split_off(sep);
        Ok((Self(res), Self(rem)))
    }
}
