use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

// Walks every cell in placement order: column pairs from the right edge, the
// vertical timing column skipped, alternating upward & downward, right cell
// before left. Yields (x, y) including reserved cells; callers skip those.
pub struct EncRegionIter {
    right: usize,
    vert: usize,
    j: usize,
    width: usize,
    done: bool,
}

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width();
        Self { right: w - 1, vert: 0, j: 0, width: w, done: false }
    }
}

impl Iterator for EncRegionIter {
    type Item = (usize, usize);
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let x = self.right - self.j;
        let upward = (self.right + 1) & 2 == 0;
        let y = if upward { self.width - 1 - self.vert } else { self.vert };

        self.j += 1;
        if self.j == 2 {
            self.j = 0;
            self.vert += 1;
            if self.vert == self.width {
                self.vert = 0;
                if self.right <= 1 {
                    self.done = true;
                } else {
                    self.right -= 2;
                    if self.right == VERT_TIMING_COL {
                        self.right -= 1;
                    }
                }
            }
        }
        Some((x, y))
    }
}


// Global constants
//------------------------------------------------------------------------------

static VERT_TIMING_COL: usize = 6;
