use image::{GrayImage, Luma};

use crate::common::{
    bch::{format_info, version_info},
    bit_utils::BitStream,
    error::{QRError, QRResult},
    iter::EncRegionIter,
    mask::MaskPattern,
    metadata::{ECLevel, Version},
};

// Symbol matrix. Coordinates are (x, y) with x the column & y the row, origin
// at the top left. Cells covered by function patterns or metadata are marked
// in the parallel reserved grid.
#[derive(Debug, Clone)]
pub struct QR {
    grid: Vec<bool>,
    reserved: Vec<bool>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub fn new(ver: Version, ecl: ECLevel) -> Self {
        let w = ver.width();
        Self { grid: vec![false; w * w], reserved: vec![false; w * w], w, ver, ecl, mask: None }
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&&m| m).count()
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        debug_assert!(x < self.w && y < self.w, "Coordinate out of bounds: ({x}, {y})");
        self.grid[y * self.w + x]
    }

    pub fn is_reserved(&self, x: usize, y: usize) -> bool {
        debug_assert!(x < self.w && y < self.w, "Coordinate out of bounds: ({x}, {y})");
        self.reserved[y * self.w + x]
    }

    // Function cell, marked as reserved
    fn set(&mut self, x: usize, y: usize, dark: bool) {
        let idx = y * self.w + x;
        self.grid[idx] = dark;
        self.reserved[idx] = true;
    }

    // Resolves negative coordinates from the far edge
    fn wrap(&self, (x, y): (i16, i16)) -> (usize, usize) {
        let w = self.w as i16;
        let x = if x < 0 { x + w } else { x };
        let y = if y < 0 { y + w } else { y };
        (x as usize, y as usize)
    }

    // Fails when a square of `size` anchored at its top left corner (x, y) doesn't fit
    fn check_bounds(&self, x: usize, y: usize, size: usize) -> QRResult<()> {
        if size == 0 {
            return Err(QRError::InvalidArgument("pattern size must be positive"));
        }
        if x + size > self.w || y + size > self.w {
            return Err(QRError::OutOfBounds { x, y, size: self.w });
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let mut res = String::with_capacity(self.w * (self.w + 1) + 1);
        res.push('\n');
        for y in 0..self.w {
            for x in 0..self.w {
                let c = match (self.is_reserved(x, y), self.get(x, y)) {
                    (true, true) => 'f',
                    (true, false) => 'F',
                    (false, true) => 'd',
                    (false, false) => '.',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) -> QRResult<()> {
        let far = self.w - FINDER_SIZE;
        self.draw_finder_pattern_at(0, 0)?;
        self.draw_finder_pattern_at(far, 0)?;
        self.draw_finder_pattern_at(0, far)
    }

    // 7x7 finder with its top left corner at (x, y), plus the light separator
    // ring clipped to the matrix
    pub fn draw_finder_pattern_at(&mut self, x: usize, y: usize) -> QRResult<()> {
        self.check_bounds(x, y, FINDER_SIZE)?;

        let (x, y, w) = (x as i16, y as i16, self.w as i16);
        for j in -1..=7 {
            for i in -1..=7 {
                let (cx, cy) = (x + i, y + j);
                if !(0..w).contains(&cx) || !(0..w).contains(&cy) {
                    continue;
                }
                let dark = match (i, j) {
                    (-1 | 7, _) | (_, -1 | 7) => false,
                    (0 | 6, _) | (_, 0 | 6) => true,
                    (1 | 5, _) | (_, 1 | 5) => false,
                    _ => true,
                };
                self.set(cx as usize, cy as usize, dark);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod finder_pattern_tests {
    use super::QR;
    use crate::common::{
        error::QRError,
        metadata::{ECLevel, Version},
    };

    #[test]
    fn test_finder_pattern_qr() {
        let mut qr = QR::new(Version::new(1).unwrap(), ECLevel::L);
        qr.draw_finder_patterns().unwrap();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffF.....Ffffffff\n\
             fFFFFFfF.....FfFFFFFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFfffFfF.....FfFfffFf\n\
             fFFFFFfF.....FfFFFFFf\n\
             fffffffF.....Ffffffff\n\
             FFFFFFFF.....FFFFFFFF\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             FFFFFFFF.............\n\
             fffffffF.............\n\
             fFFFFFfF.............\n\
             fFfffFfF.............\n\
             fFfffFfF.............\n\
             fFfffFfF.............\n\
             fFFFFFfF.............\n\
             fffffffF.............\n"
        );
    }

    #[test]
    fn test_finder_rings_all_versions() {
        for ver in Version::all() {
            let mut qr = QR::new(ver, ECLevel::L);
            qr.draw_finder_patterns().unwrap();
            let far = qr.width() - 7;
            for (ox, oy) in [(0, 0), (far, 0), (0, far)] {
                for i in 0..7 {
                    for j in 0..7 {
                        let ring = i.max(j).max(6 - i).max(6 - j) - 3;
                        assert_eq!(qr.get(ox + i, oy + j), ring != 2, "Version {}", *ver);
                    }
                }
            }
        }
    }

    #[test]
    fn test_finder_out_of_bounds() {
        let mut qr = QR::new(Version::new(1).unwrap(), ECLevel::L);
        assert_eq!(
            qr.draw_finder_pattern_at(15, 0),
            Err(QRError::OutOfBounds { x: 15, y: 0, size: 21 })
        );
    }
}

// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_pattern(&mut self) {
        let last = self.w - 9;
        for i in 8..=last {
            self.set(i, TIMING_OFFSET, i & 1 == 0);
            self.set(TIMING_OFFSET, i, i & 1 == 0);
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self) -> QRResult<()> {
        let poses = self.ver.alignment_pattern();
        let last = poses.len().saturating_sub(1);
        for (i, &cy) in poses.iter().enumerate() {
            for (j, &cx) in poses.iter().enumerate() {
                // Overlaps with finders
                if (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0) {
                    continue;
                }
                self.draw_alignment_pattern_at(cx, cy)?;
            }
        }
        Ok(())
    }

    // 5x5 alignment pattern centered at (x, y)
    pub fn draw_alignment_pattern_at(&mut self, x: usize, y: usize) -> QRResult<()> {
        if x < 2 || y < 2 {
            return Err(QRError::OutOfBounds { x, y, size: self.w });
        }
        self.check_bounds(x - 2, y - 2, ALIGNMENT_SIZE)?;

        for j in 0..5 {
            for i in 0..5 {
                let dark = matches!((i, j), (0 | 4, _) | (_, 0 | 4) | (2, 2));
                self.set(x + i - 2, y + j - 2, dark);
            }
        }
        Ok(())
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_format_info(&mut self, mask: MaskPattern) -> QRResult<()> {
        let info = format_info(self.ecl, *mask)? as u32;
        self.draw_number(info, FORMAT_INFO_BIT_LEN, &FORMAT_INFO_COORDS_MAIN)?;
        self.draw_number(info, FORMAT_INFO_BIT_LEN, &FORMAT_INFO_COORDS_SIDE)?;

        let (x, y) = self.wrap(DARK_MODULE_COORD);
        self.set(x, y, true);
        Ok(())
    }

    // Bit i, counted from the LSB, goes to (w - 11 + i % 3, i / 3) & its transpose
    fn draw_version_info(&mut self) -> QRResult<()> {
        if *self.ver < 7 {
            return Ok(());
        }

        let info = version_info(self.ver)?;
        let base = self.w - 11;
        for i in 0..VERSION_INFO_BIT_LEN {
            let dark = (info >> i) & 1 == 1;
            let (a, b) = (base + i % 3, i / 3);
            self.set(a, b, dark);
            self.set(b, a, dark);
        }
        Ok(())
    }

    // MSB first across coords
    fn draw_number(&mut self, number: u32, bit_len: usize, coords: &[(i16, i16)]) -> QRResult<()> {
        debug_assert!(coords.len() == bit_len, "Coordinate count doesn't match bit length");

        let bits = BitStream::from_integer(number.into()).to_bits(bit_len)?;
        for (&coord, bit) in coords.iter().zip(bits) {
            let (x, y) = self.wrap(coord);
            self.set(x, y, bit);
        }
        Ok(())
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl QR {
    // Draws every function pattern, a provisional format info for mask 0 and
    // the version info. The reserved grid is the footprint of all of them.
    pub fn draw_all_function_patterns(&mut self) -> QRResult<()> {
        self.draw_finder_patterns()?;
        self.draw_timing_pattern();
        self.draw_alignment_patterns()?;
        self.draw_format_info(MaskPattern::new(0)?)?;
        self.draw_version_info()
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl QR {
    // Places codewords MSB first over the unreserved cells in zigzag order.
    // Cells left after the last codeword are remainder bits and stay light.
    pub fn draw_encoding_region(&mut self, codewords: &[u8]) {
        debug_assert!(
            codewords.len() <= self.ver.total_codewords(),
            "Codewords exceed capacity: Len {}, Capacity {}",
            codewords.len(),
            self.ver.total_codewords()
        );

        let mut bits = BitStream::from_byte_array(codewords);
        for (x, y) in EncRegionIter::new(self.ver) {
            if self.is_reserved(x, y) {
                continue;
            }
            match bits.next() {
                Some(bit) => self.grid[y * self.w + x] = bit,
                None => break,
            }
        }
    }

    // Flips unreserved cells selected by the mask & rewrites the format info.
    // Applying the same mask twice restores the data.
    pub fn apply_mask(&mut self, mask: MaskPattern) -> QRResult<()> {
        let mask_fn = mask.mask_functions();
        for y in 0..self.w {
            for x in 0..self.w {
                let idx = y * self.w + x;
                if !self.reserved[idx] && mask_fn(x, y) {
                    self.grid[idx] = !self.grid[idx];
                }
            }
        }
        self.mask = Some(mask);
        self.draw_format_info(mask)
    }
}


// Render
//------------------------------------------------------------------------------

impl QR {
    pub fn to_matrix(&self) -> Vec<Vec<bool>> {
        self.grid.chunks(self.w).map(<[bool]>::to_vec).collect()
    }

    // Light modules are printed as blocks, so the symbol reads on dark terminals
    pub fn to_str(&self, module_sz: usize) -> String {
        let qz_sz = QUIET_ZONE * module_sz;
        let qr_sz = self.w * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = String::with_capacity(total_sz * (total_sz + 1) * 3);
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.push('█');
                    continue;
                }
                let y = (i - qz_sz) / module_sz;
                let x = (j - qz_sz) / module_sz;
                canvas.push(if self.get(x, y) { ' ' } else { '█' });
            }
            canvas.push('\n');
        }
        canvas
    }

    pub fn to_image(&self, module_sz: u32) -> GrayImage {
        let qz_sz = QUIET_ZONE as u32 * module_sz;
        let qr_sz = self.w as u32 * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        GrayImage::from_fn(total_sz, total_sz, |j, i| {
            if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                return Luma([255]);
            }
            let y = ((i - qz_sz) / module_sz) as usize;
            let x = ((j - qz_sz) / module_sz) as usize;
            if self.get(x, y) {
                Luma([0])
            } else {
                Luma([255])
            }
        })
    }

    // Square canvas of `canvas_sz` pixels, scaled through the view box so that
    // each dark module maps onto one unit square
    pub fn to_svg(&self, canvas_sz: u32) -> String {
        let total_sz = self.w + 2 * QUIET_ZONE;
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{canvas_sz}" height="{canvas_sz}" viewBox="0 0 {total_sz} {total_sz}" shape-rendering="crispEdges">"#
        );
        svg.push_str(&format!(r#"<rect width="{total_sz}" height="{total_sz}" fill="{LIGHT}"/>"#));
        for y in 0..self.w {
            for x in 0..self.w {
                if self.get(x, y) {
                    let (px, py) = (x + QUIET_ZONE, y + QUIET_ZONE);
                    svg.push_str(&format!(
                        r#"<rect x="{px}" y="{py}" width="1" height="1" fill="{DARK}"/>"#
                    ));
                }
            }
        }
        svg.push_str("</svg>");
        svg
    }
}


// Global constants
//------------------------------------------------------------------------------

static FINDER_SIZE: usize = 7;

static ALIGNMENT_SIZE: usize = 5;

static TIMING_OFFSET: usize = 6;

static QUIET_ZONE: usize = 4;

static DARK: &str = "#000000";

static LIGHT: &str = "#ffffff";

static FORMAT_INFO_BIT_LEN: usize = 15;

static VERSION_INFO_BIT_LEN: usize = 18;

static DARK_MODULE_COORD: (i16, i16) = (8, -8);

// (x, y) per format info bit, MSB first. Negative values count from the far edge.
static FORMAT_INFO_COORDS_MAIN: [(i16, i16); 15] = [
    (0, 8),
    (1, 8),
    (2, 8),
    (3, 8),
    (4, 8),
    (5, 8),
    (7, 8),
    (8, 8),
    (8, 7),
    (8, 5),
    (8, 4),
    (8, 3),
    (8, 2),
    (8, 1),
    (8, 0),
];

static FORMAT_INFO_COORDS_SIDE: [(i16, i16); 15] = [
    (8, -1),
    (8, -2),
    (8, -3),
    (8, -4),
    (8, -5),
    (8, -6),
    (8, -7),
    (-8, 8),
    (-7, 8),
    (-6, 8),
    (-5, 8),
    (-4, 8),
    (-3, 8),
    (-2, 8),
    (-1, 8),
];
