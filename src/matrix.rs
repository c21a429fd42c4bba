//! Small square matrices, used for orientation determinants.

use crate::{Float, Vector};

/// N-by-N square matrix with elements stored in **column-major** order.
///
/// The algebra only ever needs these for orientation bookkeeping: the sign of
/// the determinant of a handful of basis columns. Columns shorter than the
/// matrix behave as if zero-padded.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    ndim: u8,
    elems: Vec<Float>,
}

impl Matrix {
    /// Constructs a matrix from a list of columns, where the number of
    /// columns determines the size of the matrix.
    pub fn from_cols<I>(cols: impl IntoIterator<IntoIter = I>) -> Self
    where
        I: ExactSizeIterator<Item = Vector>,
    {
        let cols = cols.into_iter();
        let ndim = cols.len() as u8;
        Self {
            ndim,
            elems: cols
                .flat_map(|col| (0..ndim).map(move |i| col.get(i)).collect::<Vec<_>>())
                .collect(),
        }
    }

    fn get(&self, col: u8, row: u8) -> Float {
        self.elems[col as usize * self.ndim as usize + row as usize]
    }

    /// Returns the determinant of the matrix, by cofactor expansion along the
    /// first column. The matrices here never exceed a handful of dimensions,
    /// so the factorial blowup is irrelevant.
    pub fn determinant(&self) -> Float {
        match self.ndim {
            0 => 1.0, // empty product
            1 => self.get(0, 0),
            n => (0..n)
                .map(|row| {
                    let sign = if row % 2 == 0 { 1.0 } else { -1.0 };
                    sign * self.get(0, row) * self.minor(row).determinant()
                })
                .sum(),
        }
    }

    /// Returns the submatrix omitting the first column and row `row`.
    fn minor(&self, row: u8) -> Matrix {
        let n = self.ndim;
        Self {
            ndim: n - 1,
            elems: (1..n)
                .flat_map(|col| {
                    (0..n)
                        .filter(move |&r| r != row)
                        .map(move |r| (col, r))
                })
                .map(|(col, r)| self.get(col, r))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_determinant() {
        let m = Matrix::from_cols([vector![3.0, 7.0], vector![1.0, -4.0]]);
        assert_eq!(m.determinant(), -19.0);

        let m = Matrix::from_cols([
            vector![-2.0, -1.0, 2.0],
            vector![2.0, 1.0, 4.0],
            vector![-3.0, 3.0, -1.0],
        ]);
        assert_eq!(m.determinant(), 54.0);

        // permuting two columns of the identity flips the sign
        let m = Matrix::from_cols([
            Vector::unit(1),
            Vector::unit(0),
            Vector::unit(2),
            Vector::unit(3),
        ]);
        assert_eq!(m.determinant(), -1.0);

        // 0x0 determinant is the empty product
        assert_eq!(Matrix::from_cols(std::iter::empty::<Vector>()).determinant(), 1.0);
    }
}
