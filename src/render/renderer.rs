use derive_builder::Builder;

use crate::{
    math::color::Color,
    render::canvas::Canvas,
    scene::{World, camera::Camera},
    shading::integrator::Integrator,
};

#[derive(Debug, Clone, Builder)]
/// The renderer calculates each pixel color using the integrator and camera.
pub struct Renderer {
    integrator: Integrator,
    camera: Camera,
    #[builder(default = "false")]
    use_progress_bar: bool,
}

impl Renderer {
    const PROGRESS_TEMPLATE: &str = concat!(
        "{spinner:.green} [{elapsed_precise}] {wide_bar:.cyan/blue} ",
        "pixels shaded: {human_pos}/{human_len} {percent}% ({eta})"
    );

    fn color_at_pixel(&self, x: usize, y: usize) -> Color {
        self.integrator
            .color_at(self.camera.ray_for_pixel(x as f64, y as f64))
    }

    fn progress_bar(&self, canvas: &Canvas) -> Option<indicatif::ProgressBar> {
        if !self.use_progress_bar {
            return None;
        }
        let pb = indicatif::ProgressBar::new(canvas.width() as u64 * canvas.height() as u64);

        match indicatif::ProgressStyle::with_template(Self::PROGRESS_TEMPLATE) {
            Ok(style) => Some(pb.with_style(style)),
            Err(err) => {
                log::warn!("falling back to the default progress style: {err}");
                Some(pb)
            }
        }
    }

    /// Shades one primary ray through the center of every pixel.
    pub fn render(&self) -> Canvas {
        let mut canvas = self.camera.canvas();
        log::info!(
            "rendering {}x{} pixels, {} objects",
            canvas.width(),
            canvas.height(),
            self.world().objects().len()
        );

        let now = std::time::Instant::now();
        let pb = self.progress_bar(&canvas);
        canvas.set_each_pixel(|x: usize, y: usize| self.color_at_pixel(x, y), pb);
        log::info!("render time: {:?}", now.elapsed());

        canvas
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn integrator(&self) -> &Integrator {
        &self.integrator
    }

    pub fn world(&self) -> &World {
        self.integrator.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.integrator.world_mut()
    }

    pub fn use_progress_bar(&self) -> bool {
        self.use_progress_bar
    }
}

#[cfg(test)]
impl Renderer {
    pub fn default_testing(camera: Camera) -> Self {
        RendererBuilder::default()
            .camera(camera)
            .integrator(Integrator::default_testing(World::default_testing()))
            .build()
            .unwrap()
    }
}
