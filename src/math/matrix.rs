use std::ops;

use super::{
    point::Point,
    square_matrix::SquareMatrix,
    transform::Transform,
    tuple::{Axis, Tuple},
    vector::Vector,
};
use crate::{approx_eq::ApproxEq, error::Result};

const SIZE: usize = 4;

/// Affine transformation in homogeneous coordinates, stored row by row.
#[derive(Debug, Clone, Copy)]
pub struct Matrix {
    rows: [[f64; SIZE]; SIZE],
}

impl Transform for Matrix {
    fn transform(&mut self, matrix: &Matrix) {
        *self = matrix * (self as &Matrix);
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    /// Builds a matrix from 16 values in row-major order.
    pub fn new(data: [f64; 16]) -> Self {
        let mut rows = [[0.; SIZE]; SIZE];
        for (row, chunk) in rows.iter_mut().zip(data.chunks_exact(SIZE)) {
            row.copy_from_slice(chunk);
        }
        Self { rows }
    }

    pub fn from_rows(rows: [[f64; SIZE]; SIZE]) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self::from_rows([[0.; SIZE]; SIZE])
    }

    fn diagonal(values: [f64; SIZE]) -> Self {
        let mut m = Self::empty();
        for (i, value) in values.into_iter().enumerate() {
            m.rows[i][i] = value;
        }
        m
    }

    pub fn identity() -> Self {
        Self::diagonal([1.; SIZE])
    }

    /// Values in row-major order.
    pub fn data(&self) -> &[f64] {
        self.rows.as_flattened()
    }

    fn column(&self, col: usize) -> [f64; SIZE] {
        std::array::from_fn(|row| self.rows[row][col])
    }

    pub fn transpose(&self) -> Self {
        Self::from_rows(std::array::from_fn(|col| self.column(col)))
    }

    pub fn determinant(&self) -> f64 {
        SquareMatrix::from(*self).determinant()
    }

    pub fn inverse(&self) -> Result<Matrix> {
        let inverse = SquareMatrix::from(*self).inverse()?;
        Matrix::try_from(&inverse)
    }

    pub fn translation(x: f64, y: f64, z: f64) -> Matrix {
        let mut m = Self::identity();
        for (row, offset) in m.rows.iter_mut().zip([x, y, z]) {
            row[SIZE - 1] = offset;
        }
        m
    }

    pub fn scaling(x: f64, y: f64, z: f64) -> Matrix {
        Self::diagonal([x, y, z, 1.])
    }

    pub fn scaling_uniform(f: f64) -> Matrix {
        Self::scaling(f, f, f)
    }

    /// Rotation that turns axis `from` towards axis `to`.
    fn plane_rotation(from: usize, to: usize, radians: f64) -> Matrix {
        let (sin, cos) = radians.sin_cos();
        let mut m = Self::identity();
        m.rows[from][from] = cos;
        m.rows[to][to] = cos;
        m.rows[from][to] = -sin;
        m.rows[to][from] = sin;
        m
    }

    pub fn rotation_x(radians: f64) -> Matrix {
        Self::plane_rotation(1, 2, radians)
    }

    pub fn rotation_y(radians: f64) -> Matrix {
        Self::plane_rotation(2, 0, radians)
    }

    pub fn rotation_z(radians: f64) -> Matrix {
        Self::plane_rotation(0, 1, radians)
    }

    /// Each coordinate moves in proportion to the other two:
    /// `x += xy * y + xz * z` and so on.
    pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> Matrix {
        let mut m = Self::identity();
        m.rows[0][1..3].copy_from_slice(&[xy, xz]);
        m.rows[1][0] = yx;
        m.rows[1][2] = yz;
        m.rows[2][..2].copy_from_slice(&[zx, zy]);
        m
    }

    /// Mirror image across the plane perpendicular to `axis`.
    pub fn reflection(axis: Axis) -> Matrix {
        let mut factors = [1.; SIZE];
        factors[axis as usize] = -1.;
        Self::diagonal(factors)
    }

    /// Moves the world so that an eye at `from` looks at `to`, with `up` roughly upwards.
    pub fn view_transformation(from: Point, to: Point, up: Vector) -> Matrix {
        let forward = (to - from).normalize();
        let left = forward.cross(up.normalize());
        let true_up = left.cross(forward);

        let basis_row = |v: Vector| [v.x(), v.y(), v.z(), 0.];
        let orientation = Matrix::from_rows([
            basis_row(left),
            basis_row(true_up),
            basis_row(-forward),
            [0., 0., 0., 1.],
        ]);

        orientation * Matrix::translation(-from.x(), -from.y(), -from.z())
    }

    fn row_dot(&self, row: usize, values: [f64; SIZE]) -> f64 {
        self.rows[row]
            .iter()
            .zip(values)
            .map(|(a, b)| a * b)
            .sum()
    }
}

impl ApproxEq for Matrix {
    fn approx_eq_epsilon(&self, other: &Self, epsilon: f64) -> bool {
        self.data()
            .iter()
            .zip(other.data())
            .all(|(a, b)| a.approx_eq_epsilon(b, epsilon))
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Matrix) -> bool {
        self.approx_eq(other)
    }
}

impl ops::Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.rows[row][col]
    }
}

impl ops::IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.rows[row][col]
    }
}

impl ops::Mul<&Matrix> for &Matrix {
    type Output = Matrix;
    fn mul(self, rhs: &Matrix) -> Self::Output {
        Matrix::from_rows(std::array::from_fn(|row| {
            std::array::from_fn(|col| self.row_dot(row, rhs.column(col)))
        }))
    }
}

impl ops::Mul<Matrix> for Matrix {
    type Output = Self;
    fn mul(self, rhs: Matrix) -> Self::Output {
        &self * &rhs
    }
}

impl ops::MulAssign<Matrix> for Matrix {
    fn mul_assign(&mut self, rhs: Self) {
        *self = (self as &Matrix) * &rhs;
    }
}

impl<T: Tuple> ops::Mul<T> for &Matrix {
    type Output = T;
    fn mul(self, rhs: T) -> Self::Output {
        let coords = [rhs.x(), rhs.y(), rhs.z(), rhs.w()];
        T::new(
            self.row_dot(0, coords),
            self.row_dot(1, coords),
            self.row_dot(2, coords),
        )
    }
}

impl<T: Tuple> ops::Mul<T> for Matrix {
    type Output = T;
    #[allow(clippy::op_ref)]
    fn mul(self, rhs: T) -> Self::Output {
        &self * rhs
    }
}
