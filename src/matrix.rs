// ─────────────────────────────────────────────────────────────────────
// Row-major numeric table (rows = samples, columns = fields)
// ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self { rows, cols, data: vec![0.0; rows * cols] }
    }

    /// Empty table of the given width, grown with [`Matrix::push_row`].
    pub fn with_width(cols: usize) -> Self {
        Self { rows: 0, cols, data: Vec::new() }
    }

    /// Panics if any row length differs from the first.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Self {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut m = Self::with_width(cols);
        for r in rows {
            m.push_row(r.as_ref());
        }
        m
    }

    pub fn push_row(&mut self, row: &[f64]) {
        assert_eq!(row.len(), self.cols, "row width {} != table width {}", row.len(), self.cols);
        self.data.extend_from_slice(row);
        self.rows += 1;
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }
    pub fn is_empty(&self) -> bool { self.rows == 0 }

    pub fn row(&self, i: usize) -> &[f64] {
        let base = i * self.cols;
        &self.data[base..base + self.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        let base = i * self.cols;
        &mut self.data[base..base + self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact(0) panics, and a zero-width table has no rows anyway
        self.data.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    /// Applies `f` in place to every element of column `c`.
    pub fn map_column(&mut self, c: usize, f: impl Fn(f64) -> f64) {
        assert!(c < self.cols, "column {c} out of range (width {})", self.cols);
        for v in self.data.iter_mut().skip(c).step_by(self.cols) {
            *v = f(*v);
        }
    }

    /// Applies `f` in place to every element.
    pub fn map_all(&mut self, f: impl Fn(f64) -> f64) {
        self.data.iter_mut().for_each(|v| *v = f(*v));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_column_touches_only_that_column() {
        let mut m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        m.map_column(1, |v| v * 10.0);
        assert_eq!(m.row(0), &[1.0, 20.0, 3.0]);
        assert_eq!(m.row(1), &[4.0, 50.0, 6.0]);
    }

    #[test]
    fn iter_rows_matches_shape() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let rows: Vec<_> = m.iter_rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], &[5.0, 6.0]);

        let empty = Matrix::with_width(0);
        assert_eq!(empty.iter_rows().count(), 0);
    }

    #[test]
    #[should_panic(expected = "row width")]
    fn push_row_rejects_wrong_width() {
        let mut m = Matrix::with_width(3);
        m.push_row(&[1.0, 2.0]);
    }
}
