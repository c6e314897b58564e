use super::{matrix::Matrix, tuple::Tuple4};
use crate::{
    approx_eq::ApproxEq,
    error::{Error, Result},
};

/// Square matrix of any size, stored row by row.
/// Determinant and inverse are computed with cofactor expansion.
#[derive(Debug, Clone)]
pub struct SquareMatrix {
    size: usize,
    data: Vec<f64>,
}

impl SquareMatrix {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            data: vec![0.; size * size],
        }
    }

    pub fn identity(size: usize) -> Self {
        let mut res = Self::new(size);
        for i in 0..size {
            res.data[i * size + i] = 1.;
        }
        res
    }

    pub fn from_rows(rows: &[&[f64]]) -> Result<Self> {
        let size = rows.len();
        let mut res = Self::new(size);
        for (row, values) in rows.iter().enumerate() {
            res.set_row(row, values)?;
        }
        Ok(res)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.size {
            return Err(Error::IndexOutOfRange {
                index,
                size: self.size,
            });
        }
        Ok(())
    }

    fn check_len(&self, len: usize) -> Result<()> {
        if len != self.size {
            return Err(Error::TypeMismatch(format!(
                "expected {} values, got {len}",
                self.size
            )));
        }
        Ok(())
    }

    fn at(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.size + col]
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.check_index(row)?;
        self.check_index(col)?;
        Ok(self.at(row, col))
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.check_index(row)?;
        self.check_index(col)?;
        self.data[row * self.size + col] = value;
        Ok(())
    }

    pub fn row(&self, row: usize) -> Result<Vec<f64>> {
        self.check_index(row)?;
        Ok((0..self.size).map(|col| self.at(row, col)).collect())
    }

    pub fn col(&self, col: usize) -> Result<Vec<f64>> {
        self.check_index(col)?;
        Ok((0..self.size).map(|row| self.at(row, col)).collect())
    }

    pub fn set_row(&mut self, row: usize, values: &[f64]) -> Result<()> {
        self.check_index(row)?;
        self.check_len(values.len())?;
        let start = row * self.size;
        self.data[start..start + self.size].copy_from_slice(values);
        Ok(())
    }

    pub fn set_col(&mut self, col: usize, values: &[f64]) -> Result<()> {
        self.check_index(col)?;
        self.check_len(values.len())?;
        for (row, value) in values.iter().enumerate() {
            self.data[row * self.size + col] = *value;
        }
        Ok(())
    }

    pub fn multiply(&self, rhs: &SquareMatrix) -> Result<SquareMatrix> {
        if self.size != rhs.size {
            return Err(Error::TypeMismatch(format!(
                "cannot multiply {0}x{0} matrix by {1}x{1} matrix",
                self.size, rhs.size
            )));
        }
        let mut res = Self::new(self.size);
        for row in 0..self.size {
            for col in 0..self.size {
                res.data[row * self.size + col] = (0..self.size)
                    .map(|i| self.at(row, i) * rhs.at(i, col))
                    .sum();
            }
        }
        Ok(res)
    }

    /// Treats the tuple as a column vector.
    pub fn multiply_tuple(&self, tuple: Tuple4) -> Result<Tuple4> {
        if self.size != Tuple4::SIZE {
            return Err(Error::TypeMismatch(format!(
                "cannot multiply {0}x{0} matrix by a 4-component tuple",
                self.size
            )));
        }
        let values = tuple.as_array();
        let component = |row: usize| -> f64 { (0..4).map(|i| self.at(row, i) * values[i]).sum() };

        Ok(Tuple4::new(
            component(0),
            component(1),
            component(2),
            component(3),
        ))
    }

    pub fn transpose(&self) -> Self {
        let mut res = Self::new(self.size);
        for row in 0..self.size {
            for col in 0..self.size {
                res.data[col * self.size + row] = self.at(row, col);
            }
        }
        res
    }

    fn submatrix_unchecked(&self, row: usize, col: usize) -> Self {
        let data = (0..self.size)
            .filter(|r| *r != row)
            .flat_map(|r| {
                (0..self.size)
                    .filter(move |c| *c != col)
                    .map(move |c| self.at(r, c))
            })
            .collect();

        Self {
            size: self.size - 1,
            data,
        }
    }

    fn cofactor_unchecked(&self, row: usize, col: usize) -> f64 {
        let minor = self.submatrix_unchecked(row, col).determinant();
        if (row + col) % 2 == 0 { minor } else { -minor }
    }

    /// The matrix without the given row and column.
    pub fn submatrix(&self, row: usize, col: usize) -> Result<Self> {
        self.check_index(row)?;
        self.check_index(col)?;
        Ok(self.submatrix_unchecked(row, col))
    }

    pub fn minor(&self, row: usize, col: usize) -> Result<f64> {
        Ok(self.submatrix(row, col)?.determinant())
    }

    pub fn cofactor(&self, row: usize, col: usize) -> Result<f64> {
        self.check_index(row)?;
        self.check_index(col)?;
        Ok(self.cofactor_unchecked(row, col))
    }

    /// Cofactor expansion along the first row.
    pub fn determinant(&self) -> f64 {
        match self.size {
            0 => 1.,
            1 => self.data[0],
            2 => self.data[0] * self.data[3] - self.data[1] * self.data[2],
            _ => (0..self.size)
                .map(|col| self.at(0, col) * self.cofactor_unchecked(0, col))
                .sum(),
        }
    }

    pub fn is_invertible(&self) -> bool {
        self.determinant() != 0.
    }

    pub fn inverse(&self) -> Result<Self> {
        let det = self.determinant();
        if det == 0. {
            return Err(Error::SingularMatrix);
        }
        let mut res = Self::new(self.size);
        for row in 0..self.size {
            for col in 0..self.size {
                // transposed on purpose: the inverse is the adjugate over the determinant
                res.data[col * self.size + row] = self.cofactor_unchecked(row, col) / det;
            }
        }
        Ok(res)
    }
}

impl ApproxEq for SquareMatrix {
    fn approx_eq_epsilon(&self, other: &Self, epsilon: f64) -> bool {
        self.size == other.size && self.data.approx_eq_epsilon(&other.data, epsilon)
    }
}

impl PartialEq for SquareMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

impl From<Matrix> for SquareMatrix {
    fn from(matrix: Matrix) -> Self {
        Self {
            size: 4,
            data: matrix.data().to_vec(),
        }
    }
}

impl TryFrom<&SquareMatrix> for Matrix {
    type Error = Error;

    fn try_from(matrix: &SquareMatrix) -> Result<Self> {
        let data: [f64; 16] = matrix.data.as_slice().try_into().map_err(|_| {
            Error::TypeMismatch(format!(
                "expected a 4x4 matrix, got {0}x{0}",
                matrix.size
            ))
        })?;
        Ok(Matrix::new(data))
    }
}
