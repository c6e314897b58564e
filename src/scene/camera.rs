use crate::{
    error::Result,
    math::{matrix::Matrix, point::Point, tuple::Tuple},
    render::{canvas::Canvas, ray::Ray},
};

/// Pinhole camera. Before transformation it sits at the origin looking towards -z,
/// with the canvas one unit in front of it; +x ends up on the left of the image.
#[derive(PartialEq, Debug, Clone)]
pub struct Camera {
    target_width: usize,
    target_height: usize,
    field_of_view: f64,
    transformation: Matrix,
    inverse_transformation: Matrix,

    pixel_size: f64,
    half_width: f64,
    half_height: f64,
}

impl Camera {
    pub fn new(target_width: usize, target_height: usize, field_of_view: f64) -> Self {
        let half_view = (field_of_view / 2.).tan();
        let aspect = target_width as f64 / target_height.max(1) as f64;

        // the longer side spans the whole field of view
        let half_width = half_view * aspect.min(1.);
        let half_height = half_view / aspect.max(1.);

        Self {
            target_width,
            target_height,
            field_of_view,
            transformation: Matrix::identity(),
            inverse_transformation: Matrix::identity(),

            pixel_size: 2. * half_width / target_width.max(1) as f64,
            half_width,
            half_height,
        }
    }

    pub fn with_transformation(
        target_width: usize,
        target_height: usize,
        field_of_view: f64,
        transformation: Matrix,
    ) -> Result<Self> {
        let mut camera = Self::new(target_width, target_height, field_of_view);
        camera.set_transformation(transformation)?;
        Ok(camera)
    }

    /// Replaces the view transformation. Pixel size and the half extents stay as computed by `new`.
    pub fn set_transformation(&mut self, transformation: Matrix) -> Result<()> {
        self.inverse_transformation = transformation.inverse()?;
        self.transformation = transformation;
        Ok(())
    }

    /// Ray from the camera through the center of pixel (`x`, `y`).
    pub fn ray_for_pixel(&self, x: f64, y: f64) -> Ray {
        let on_canvas = Point::new(
            self.half_width - (x + 0.5) * self.pixel_size,
            self.half_height - (y + 0.5) * self.pixel_size,
            -1.,
        );

        let origin = self.inverse_transformation * Point::zero();
        let through = self.inverse_transformation * on_canvas;
        Ray::new(origin, (through - origin).normalize())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.target_width, self.target_height)
    }

    pub fn target_width(&self) -> usize {
        self.target_width
    }

    pub fn target_height(&self) -> usize {
        self.target_height
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    pub fn half_height(&self) -> f64 {
        self.half_height
    }

    pub fn transformation(&self) -> Matrix {
        self.transformation
    }

    pub fn inverse_transformation(&self) -> Matrix {
        self.inverse_transformation
    }
}
