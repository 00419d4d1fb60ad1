//! Dense row-major Jacobian

use std::fmt;

/// Jacobian of a batch of expectation values
///
/// Rows follow the observable batch, columns the ordinal positions of the
/// trainable parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Jacobian {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Jacobian {
    /// Zero-filled `rows × cols` Jacobian
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Number of observables
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of trainable parameters
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Entry at (observable, trainable column)
    ///
    /// # Panics
    /// Panics if the position is out of range
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "({}, {}) out of range", row, col);
        self.data[row * self.cols + col]
    }

    /// Gradient of one observable
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Row-major entries
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consume into the row-major entries
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
}

impl fmt::Display for Jacobian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            let row: Vec<String> = self.row(r).iter().map(|v| format!("{:.6}", v)).collect();
            writeln!(f, "[{}]", row.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_row_major() {
        let mut jac = Jacobian::zeros(2, 3);
        jac.as_mut_slice()[4] = 1.5;
        assert_eq!(jac.get(1, 1), 1.5);
        assert_eq!(jac.row(1), &[0.0, 1.5, 0.0]);
        assert_eq!(jac.as_slice().len(), 6);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_range() {
        Jacobian::zeros(1, 1).get(0, 1);
    }

    #[test]
    fn test_empty() {
        let jac = Jacobian::zeros(0, 4);
        assert!(jac.as_slice().is_empty());
        assert_eq!(jac.to_string(), "");
    }
}
