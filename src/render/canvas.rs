use std::{
    fmt::Display,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use clap::ValueEnum;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;

use crate::{
    error::{Error, Result},
    math::color::Color,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ImageFormat {
    Ppm,
    Png,
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFormat::Ppm => write!(f, "ppm"),
            ImageFormat::Png => write!(f, "png"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Canvas {
    pub fn with_color(width: usize, height: usize, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; height * width],
        }
    }

    pub fn new(width: usize, height: usize) -> Self {
        Self::with_color(width, height, Color::black())
    }

    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width {
            return Err(Error::IndexOutOfRange {
                index: x,
                size: self.width,
            });
        }
        if y >= self.height {
            return Err(Error::IndexOutOfRange {
                index: y,
                size: self.height,
            });
        }
        Ok(self.width * y + x)
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn pixel_at(&self, x: usize, y: usize) -> Result<Color> {
        Ok(self.pixels[self.index(x, y)?])
    }
    pub fn write_pixel(&mut self, x: usize, y: usize, new_color: Color) -> Result<()> {
        let id = self.index(x, y)?;
        self.pixels[id] = new_color;
        Ok(())
    }

    /// Calls `fun(x, y)` for every pixel, in parallel.
    pub fn set_each_pixel<F>(&mut self, fun: F, progressbar: Option<indicatif::ProgressBar>)
    where
        F: Fn(usize, usize) -> Color + Sync,
    {
        let width = self.width;
        let shade = |(id, pixel_color): (usize, &mut Color)| {
            *pixel_color = fun(id % width, id / width);
        };

        let pixels = self.pixels.par_iter_mut().enumerate();
        match progressbar {
            Some(progressbar) => pixels.progress_with(progressbar).for_each(shade),
            None => pixels.for_each(shade),
        }
    }

    fn as_u8_rgb(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| color.as_scaled_values())
            .collect()
    }
}

/// saving image in ppm format
impl Canvas {
    const MAX_LINE_LEN: usize = 70;

    fn ppm_header(&self) -> String {
        format!("P3\n{} {}\n255\n", self.width, self.height)
    }

    fn ppm_data(&self) -> String {
        let mut data = String::new();
        if self.width == 0 {
            return data;
        }

        for row in self.pixels.chunks(self.width) {
            let mut line_len = 0;
            for val in row.iter().flat_map(|color| color.as_scaled_values()) {
                let val_str = val.to_string();
                if line_len > 0 {
                    if line_len + val_str.len() + 1 > Self::MAX_LINE_LEN {
                        data.push('\n');
                        line_len = 0;
                    } else {
                        data.push(' ');
                        line_len += 1;
                    }
                }
                data.push_str(&val_str);
                line_len += val_str.len();
            }
            data.push('\n');
        }
        data
    }

    pub fn to_ppm(&self) -> String {
        self.ppm_header() + &self.ppm_data()
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>, format: ImageFormat) -> Result<()> {
        let file = File::create(path)?;
        match format {
            ImageFormat::Ppm => self.save_to_ppm(file),
            ImageFormat::Png => self.save_to_png(file),
        }
    }

    fn save_to_ppm(&self, file: File) -> Result<()> {
        let mut writer = BufWriter::new(file);
        writer.write_all(self.to_ppm().as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

/// saving image in png format
impl Canvas {
    fn save_to_png(&self, file: File) -> Result<()> {
        let mut encoder =
            png::Encoder::new(BufWriter::new(file), self.width as u32, self.height as u32);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.as_u8_rgb())?;
        writer.finish()?;
        Ok(())
    }
}
