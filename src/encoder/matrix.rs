use crate::common::EncodingFailure;

// Module matrix
//------------------------------------------------------------------------------

/// Grid of QR modules, `true` meaning dark. Stored row-major.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct QrMatrix {
    grid: Vec<bool>,
    w: usize,
    h: usize,
}

impl QrMatrix {
    pub fn new(w: usize, h: usize) -> Self {
        Self { grid: vec![false; w * h], w, h }
    }

    /// Builds a matrix from rows of equal length.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, EncodingFailure> {
        let h = rows.len();
        let w = rows.first().map_or(0, |r| r.as_ref().len());
        if rows.iter().any(|r| r.as_ref().len() != w) {
            return Err(EncodingFailure::RaggedMatrix);
        }
        let grid = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        Ok(Self { grid, w, h })
    }

    pub(crate) fn from_grid(grid: Vec<bool>, w: usize) -> Self {
        debug_assert!(w == 0 || grid.len() % w == 0, "Grid length is not a multiple of width");
        let h = if w == 0 { 0 } else { grid.len() / w };
        Self { grid, w, h }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        debug_assert!(x < self.w && y < self.h, "Module ({x}, {y}) out of bounds");
        self.grid[y * self.w + x]
    }

    pub fn set(&mut self, x: usize, y: usize, dark: bool) {
        debug_assert!(x < self.w && y < self.h, "Module ({x}, {y}) out of bounds");
        self.grid[y * self.w + x] = dark;
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&&m| m).count()
    }

    /// Surrounds the matrix with `qz` light modules on every side.
    pub fn with_quiet_zone(&self, qz: usize) -> Self {
        if qz == 0 {
            return self.clone();
        }
        let mut padded = Self::new(self.w + 2 * qz, self.h + 2 * qz);
        for y in 0..self.h {
            for x in 0..self.w {
                padded.set(x + qz, y + qz, self.is_dark(x, y));
            }
        }
        padded
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let mut res = String::with_capacity(self.h * (self.w + 1) + 1);
        res.push('\n');
        for y in 0..self.h {
            for x in 0..self.w {
                res.push(if self.is_dark(x, y) { '#' } else { '.' });
            }
            res.push('\n');
        }
        res
    }
}

#[cfg(test)]
mod matrix_tests {
    use super::QrMatrix;
    use crate::common::EncodingFailure;

    #[test]
    fn test_from_rows() {
        let m = QrMatrix::from_rows(&[[true, false, true], [false, true, false]]).unwrap();
        assert_eq!(m.width(), 3);
        assert_eq!(m.height(), 2);
        assert!(m.is_dark(0, 0));
        assert!(!m.is_dark(1, 0));
        assert!(m.is_dark(1, 1));
        assert_eq!(m.count_dark_modules(), 3);
    }

    #[test]
    fn test_ragged_rows() {
        let rows = vec![vec![true, false], vec![true]];
        assert_eq!(QrMatrix::from_rows(&rows), Err(EncodingFailure::RaggedMatrix));
    }

    #[test]
    fn test_quiet_zone() {
        let m = QrMatrix::from_rows(&[[true, true], [false, true]]).unwrap();
        let padded = m.with_quiet_zone(1);
        assert_eq!(padded.to_debug_str(), "\n....\n.##.\n..#.\n....\n");
        assert_eq!(padded.count_dark_modules(), m.count_dark_modules());
        assert_eq!(m.with_quiet_zone(0), m);
    }
}
