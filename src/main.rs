use std::path::PathBuf;

use clap::Parser;
use lumen::{
    error::{Error, Result},
    render::{canvas::ImageFormat, renderer::RendererBuilder},
    scene::io::yaml,
    shading::integrator::IntegratorBuilder,
};

/// Simple raytracer renderer
/// Renders scenes from yaml files
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// The scene file to render
    scene_file: PathBuf,

    /// The format of the output image
    #[clap(short = 'f', long, default_value = "png")]
    image_format: ImageFormat,

    /// The output path of the rendered image.
    /// By default it's `./<scene_filename>.<image_format>`
    #[clap(short, long)]
    output_path: Option<PathBuf>,

    /// Width (in pixels) of the output image.
    /// Overrides the one in the scene file
    #[clap(long)]
    width: Option<usize>,

    /// Height (in pixels) of the output image.
    /// Overrides the one in the scene file
    #[clap(long)]
    height: Option<usize>,

    /// Field of view of the camera in radians.
    /// Overrides the one in the scene file
    #[clap(long)]
    fov: Option<f64>,

    /// Maximum number of times a ray can bounce off reflective or transparent surfaces.
    /// Overrides the one in the scene file
    #[clap(short, long)]
    max_recursive_depth: Option<usize>,

    /// Don't show the progress bar
    #[clap(long)]
    no_progress: bool,
}

fn default_output_path(scene_file: &std::path::Path, format: ImageFormat) -> Result<PathBuf> {
    let file_name = scene_file.file_name().ok_or_else(|| {
        Error::InvalidOperation(format!("{} is not a file", scene_file.display()))
    })?;
    let mut path = PathBuf::from(file_name);
    path.set_extension(format.to_string());
    Ok(path)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = yaml::parse_file(&args.scene_file)?;
    if let Some(width) = args.width {
        config.camera_settings.target_width(width);
    }
    if let Some(height) = args.height {
        config.camera_settings.target_height(height);
    }
    if let Some(fov) = args.fov {
        config.camera_settings.field_of_view(fov);
    }
    let camera = config.camera()?;
    log::debug!(
        "camera {}x{}, field of view {}",
        camera.target_width(),
        camera.target_height(),
        camera.field_of_view()
    );

    let mut integrator = IntegratorBuilder::default();
    integrator.world(config.world);
    if let Some(depth) = args.max_recursive_depth.or(config.max_recursive_depth) {
        integrator.max_recursive_depth(depth);
    }
    let integrator = integrator
        .build()
        .map_err(|err| Error::InvalidOperation(err.to_string()))?;

    let renderer = RendererBuilder::default()
        .integrator(integrator)
        .camera(camera)
        .use_progress_bar(!args.no_progress)
        .build()
        .map_err(|err| Error::InvalidOperation(err.to_string()))?;

    let canvas = renderer.render();

    let output_path = match args.output_path {
        Some(path) => path,
        None => default_output_path(&args.scene_file, args.image_format)?,
    };
    canvas.save_to_file(&output_path, args.image_format)?;
    log::info!("image saved to {}", output_path.display());
    Ok(())
}
