// Dense row-major matrix used by the offline builder. Catalogs are small
// enough that a flat Vec<f32> beats anything sparse here.
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row * self.cols + col] = value;
    }

    #[inline]
    #[must_use]
    pub fn row(&self, row: usize) -> &[f32] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [f32] {
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Scale every row to unit L2 norm. All-zero rows stay zero.
    pub fn normalize_rows_l2(&mut self) {
        for row in 0..self.rows {
            let values = self.row_mut(row);
            let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
            if norm > 0.0 {
                for v in values.iter_mut() {
                    *v /= norm;
                }
            }
        }
    }

    /// Rescale every entry to [0, 1] via (v - min) / (max - min).
    ///
    /// A matrix with no spread (all entries equal, or empty) comes back
    /// unchanged; there is nothing to normalize and dividing by the zero
    /// range would poison everything downstream.
    #[must_use]
    pub fn min_max_normalized(&self) -> Self {
        let Some((min, max)) = self.min_max() else {
            return self.clone();
        };
        let range = max - min;
        if range <= 0.0 {
            return self.clone();
        }
        let data = self.data.iter().map(|v| (v - min) / range).collect();
        Self {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    fn min_max(&self) -> Option<(f32, f32)> {
        let mut iter = self.data.iter();
        let first = *iter.next()?;
        Some(iter.fold((first, first), |(min, max), &v| {
            (min.min(v), max.max(v))
        }))
    }

    /// Gram matrix `self * self^T`: entry (i, j) is the dot product of rows
    /// i and j. Output rows are computed in parallel.
    #[must_use]
    pub fn mul_transpose(&self) -> Self {
        let n = self.rows;
        let product: Vec<Vec<f32>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let a = self.row(i);
                (0..n).map(|j| dot(a, self.row(j))).collect()
            })
            .collect();

        let mut out = Self::zeros(n, n);
        for (i, row) in product.into_iter().enumerate() {
            out.row_mut(i).copy_from_slice(&row);
        }
        out
    }

    /// Weighted elementwise sum `wa * a + wb * b`.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    #[must_use]
    pub fn blend(a: &Self, b: &Self, wa: f32, wb: f32) -> Self {
        assert_eq!(
            (a.rows, a.cols),
            (b.rows, b.cols),
            "blend requires matching shapes"
        );
        let data = a
            .data
            .iter()
            .zip(&b.data)
            .map(|(x, y)| wa * x + wb * y)
            .collect();
        Self {
            rows: a.rows,
            cols: a.cols,
            data,
        }
    }
}

#[inline]
fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
