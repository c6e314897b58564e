pub mod approx_eq;
pub mod error;

pub mod math {
    pub mod color;
    pub mod matrix;
    pub mod point;
    pub mod square_matrix;
    pub mod transform;
    pub mod tuple;
    pub mod vector;
}

pub mod render {
    pub mod canvas;
    pub mod ray;
    pub mod renderer;
}

pub mod scene;

pub mod shading {
    pub mod integrator;
}
