use crate::{
    approx_eq::ApproxEq,
    error::{Error, Result},
    math::{color::Color, matrix::Matrix, point::Point, tuple::Tuple},
    scene::object::Object,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    /// Stripe alternating as x changes
    Stripe {
        c1: Color,
        c2: Color,
        inv_transform: Matrix,
    },
    /// Linear gradient changing in x direction
    Gradient {
        c_start: Color,
        c_dist: Color,
        inv_transform: Matrix,
    },
    /// Ring pattern extending in x and z
    Ring {
        c1: Color,
        c2: Color,
        inv_transform: Matrix,
    },
    /// 3D checkerboard
    Checkers {
        c1: Color,
        c2: Color,
        inv_transform: Matrix,
    },
    /// Pattern that returns points coordinates as color
    TestPattern { inv_transform: Matrix },
    Const(Color),
}

impl Pattern {
    pub fn stripe(c1: Color, c2: Color) -> Self {
        Self::Stripe {
            c1,
            c2,
            inv_transform: Matrix::identity(),
        }
    }

    pub fn gradient(c1: Color, c2: Color) -> Self {
        Self::Gradient {
            c_start: c1,
            c_dist: c2 - c1,
            inv_transform: Matrix::identity(),
        }
    }

    pub fn ring(c1: Color, c2: Color) -> Self {
        Self::Ring {
            c1,
            c2,
            inv_transform: Matrix::identity(),
        }
    }

    pub fn checkers(c1: Color, c2: Color) -> Self {
        Self::Checkers {
            c1,
            c2,
            inv_transform: Matrix::identity(),
        }
    }

    pub fn test_pattern() -> Self {
        Self::TestPattern {
            inv_transform: Matrix::identity(),
        }
    }

    /// Builds a pattern from its scene-file name.
    pub fn from_name(name: &str, c1: Color, c2: Color) -> Result<Self> {
        match name {
            "stripes" | "stripe" => Ok(Self::stripe(c1, c2)),
            "gradient" => Ok(Self::gradient(c1, c2)),
            "rings" | "ring" => Ok(Self::ring(c1, c2)),
            "checkers" | "checker" => Ok(Self::checkers(c1, c2)),
            "test" => Ok(Self::test_pattern()),
            _ => Err(Error::InvalidOperation(format!(
                "unknown pattern type '{name}'"
            ))),
        }
    }

    fn inverse_transform_mut(&mut self) -> Option<&mut Matrix> {
        match self {
            Self::Const(_) => None,
            Self::Stripe { inv_transform, .. }
            | Self::Gradient { inv_transform, .. }
            | Self::Ring { inv_transform, .. }
            | Self::Checkers { inv_transform, .. }
            | Self::TestPattern { inv_transform } => Some(inv_transform),
        }
    }

    fn inverse_transform(&self) -> Option<&Matrix> {
        match self {
            Self::Const(_) => None,
            Self::Stripe { inv_transform, .. }
            | Self::Gradient { inv_transform, .. }
            | Self::Ring { inv_transform, .. }
            | Self::Checkers { inv_transform, .. }
            | Self::TestPattern { inv_transform } => Some(inv_transform),
        }
    }

    /// Places the pattern in its own space. `Const` has no space and is returned as is.
    pub fn with_transformation(mut self, transformation: Matrix) -> Result<Self> {
        if let Some(inv_transform) = self.inverse_transform_mut() {
            *inv_transform = transformation.inverse()?;
        }
        Ok(self)
    }

    /// `even` on even cells, `odd` on the others.
    fn alternate(cell: f64, even: Color, odd: Color) -> Color {
        if cell.floor().rem_euclid(2.).approx_eq(&0.) {
            even
        } else {
            odd
        }
    }

    /// Colour at a point in pattern space.
    pub fn color_at(&self, point: &Point) -> Color {
        let (x, y, z) = (point.x(), point.y(), point.z());
        match *self {
            Pattern::Const(c) => c,
            Pattern::Stripe { c1, c2, .. } => Self::alternate(x, c1, c2),
            Pattern::Gradient {
                c_start, c_dist, ..
            } => c_start + c_dist * (x - x.floor()),
            Pattern::Ring { c1, c2, .. } => Self::alternate(x.hypot(z), c1, c2),
            Pattern::Checkers { c1, c2, .. } => {
                Self::alternate(x.floor() + y.floor() + z.floor(), c1, c2)
            }
            Pattern::TestPattern { .. } => Color::new(x, y, z),
        }
    }

    /// Colour at a world space point on `object`.
    pub fn color_at_object(&self, object: &Object, point: Point) -> Color {
        match self.inverse_transform() {
            Some(inv_transform) => {
                let object_point = object.transformation_inverse() * point;
                self.color_at(&(*inv_transform * object_point))
            }
            None => self.color_at(&point),
        }
    }
}
