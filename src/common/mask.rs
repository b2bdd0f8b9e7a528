use std::ops::Deref;

use rayon::prelude::*;
use tracing::trace;

use super::error::{QRError, QRResult};
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern > 7 {
            return Err(QRError::InvalidArgument("mask must be within 0..=7"));
        }
        Ok(Self(pattern))
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(MaskPattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// x is the column, y the row
mod mask_functions {
    pub fn checkerboard(x: usize, y: usize) -> bool {
        (x + y) & 1 == 0
    }

    pub fn horizontal_lines(_: usize, y: usize) -> bool {
        y & 1 == 0
    }

    pub fn vertical_lines(x: usize, _: usize) -> bool {
        x % 3 == 0
    }

    pub fn diagonal_lines(x: usize, y: usize) -> bool {
        (x + y) % 3 == 0
    }

    pub fn large_checkerboard(x: usize, y: usize) -> bool {
        ((y >> 1) + (x / 3)) & 1 == 0
    }

    pub fn fields(x: usize, y: usize) -> bool {
        ((x * y) & 1) + ((x * y) % 3) == 0
    }

    pub fn diamonds(x: usize, y: usize) -> bool {
        (((x * y) & 1) + ((x * y) % 3)) & 1 == 0
    }

    pub fn meadow(x: usize, y: usize) -> bool {
        (((x + y) & 1) + ((x * y) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_functions(self) -> fn(usize, usize) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Mask pattern out of range"),
        }
    }
}

#[cfg(test)]
mod mask_pattern_tests {
    use test_case::test_case;

    use super::MaskPattern;
    use crate::common::error::QRError;

    #[test]
    fn test_new() {
        assert_eq!(*MaskPattern::new(7).unwrap(), 7);
        assert!(matches!(MaskPattern::new(8), Err(QRError::InvalidArgument(_))));
        assert_eq!(MaskPattern::all().count(), 8);
    }

    // Rows y = 0..3, columns x = 0..6
    #[test_case(0, ["x.x.x.", ".x.x.x", "x.x.x."])]
    #[test_case(1, ["xxxxxx", "......", "xxxxxx"])]
    #[test_case(2, ["x..x..", "x..x..", "x..x.."])]
    #[test_case(3, ["x..x..", "..x..x", ".x..x."])]
    #[test_case(4, ["xxx...", "xxx...", "...xxx"])]
    #[test_case(5, ["xxxxxx", "x.....", "x..x.."])]
    #[test_case(6, ["xxxxxx", "xxx...", "xx.xx."])]
    #[test_case(7, ["x.x.x.", "...xxx", "x...xx"])]
    fn test_mask_functions(mask: u8, exp: [&str; 3]) {
        let mask_fn = MaskPattern::new(mask).unwrap().mask_functions();
        for (y, row) in exp.iter().enumerate() {
            let res = (0..6).map(|x| if mask_fn(x, y) { 'x' } else { '.' }).collect::<String>();
            assert_eq!(res, *row, "Mask {mask}, row {y}");
        }
    }
}

// Mask selection
//------------------------------------------------------------------------------

// Evaluates all 8 masks in parallel and applies the one with the lowest
// penalty, ties going to the lowest index
pub fn apply_best_mask(qr: &mut QR) -> QRResult<MaskPattern> {
    let base = &*qr;
    let (pen, best_mask) = MaskPattern::all()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|m| {
            let mut qr = base.clone();
            qr.apply_mask(m)?;
            let pen = compute_total_penalty(&qr);
            trace!(mask = *m, penalty = pen, "Evaluated mask");
            Ok((pen, m))
        })
        .collect::<QRResult<Vec<_>>>()?
        .into_iter()
        .min()
        .ok_or(QRError::InvalidArgument("no mask pattern to evaluate"))?;

    trace!(mask = *best_mask, penalty = pen, "Selected mask");
    qr.apply_mask(best_mask)?;
    Ok(best_mask)
}

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let adj_pen = compute_adjacent_penalty(qr);
    let blk_pen = compute_block_penalty(qr);
    let fp_pen_h = compute_finder_pattern_penalty(qr, true);
    let fp_pen_v = compute_finder_pattern_penalty(qr, false);
    let bal_pen = compute_balance_penalty(qr);
    adj_pen + blk_pen + fp_pen_h + fp_pen_v + bal_pen
}

// Each run of 5 or more same colored modules in a row or column costs
// 3 + (run - 5)
fn compute_adjacent_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width();
    let mut cols = vec![(false, 0); w];
    for y in 0..w {
        let mut last = false;
        let mut consec_row_len = 0;
        for (x, col) in cols.iter_mut().enumerate() {
            let clr = qr.get(x, y);
            if x == 0 || last != clr {
                last = clr;
                consec_row_len = 0;
            }
            consec_row_len += 1;
            pen += run_penalty(consec_row_len);

            if y == 0 || col.0 != clr {
                col.0 = clr;
                col.1 = 0;
            }
            col.1 += 1;
            pen += run_penalty(col.1);
        }
    }
    pen
}

// Incremental cost of extending a run to `len`
fn run_penalty(len: u32) -> u32 {
    match len {
        0..=4 => 0,
        5 => 3,
        _ => 1,
    }
}

fn compute_block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width();
    for y in 0..w - 1 {
        for x in 0..w - 1 {
            let clr = qr.get(x, y);
            if clr == qr.get(x + 1, y) && clr == qr.get(x, y + 1) && clr == qr.get(x + 1, y + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

// Each dark-light-dark-dark-dark-light-dark sequence costs 40
fn compute_finder_pattern_penalty(qr: &QR, is_hor: bool) -> u32 {
    static PATTERN: [bool; 7] = [true, false, true, true, true, false, true];

    let mut pen = 0;
    let w = qr.width();
    for i in 0..w {
        let get = |j: usize| if is_hor { qr.get(j, i) } else { qr.get(i, j) };
        for j in 0..w - 6 {
            if (j..j + 7).map(&get).eq(PATTERN.iter().copied()) {
                pen += 40;
            }
        }
    }
    pen
}

// 10 for every full 5% the exact dark share deviates from 50%
fn compute_balance_penalty(qr: &QR) -> u32 {
    let dark_cnt = qr.count_dark_modules();
    let total = qr.width() * qr.width();
    let steps = (dark_cnt * 100).abs_diff(total * 50) / (total * 5);
    steps as u32 * 10
}
