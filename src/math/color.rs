use std::ops;

use crate::{
    approx_eq::ApproxEq,
    error::{Error, Result},
};

/// Linear RGB, channels nominally in [0, 1] but unbounded during shading.
#[derive(Copy, Clone, Debug, Default)]
pub struct Color {
    channels: [f64; 3],
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            channels: [r, g, b],
        }
    }
    pub const fn black() -> Self {
        Self::new(0., 0., 0.)
    }
    pub const fn white() -> Self {
        Self::new(1., 1., 1.)
    }
    pub const fn red() -> Self {
        Self::new(1., 0., 0.)
    }
    pub const fn green() -> Self {
        Self::new(0., 1., 0.)
    }
    pub const fn blue() -> Self {
        Self::new(0., 0., 1.)
    }

    pub fn r(&self) -> f64 {
        self.channels[0]
    }
    pub fn g(&self) -> f64 {
        self.channels[1]
    }
    pub fn b(&self) -> f64 {
        self.channels[2]
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            channels: self.channels.map(f),
        }
    }

    fn zip_with(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        Self {
            channels: std::array::from_fn(|i| f(self.channels[i], other.channels[i])),
        }
    }

    /// Channels clamped to [0, 1] and mapped onto [0, 255].
    pub fn as_scaled_values(&self) -> [u8; 3] {
        self.channels
            .map(|channel| (channel.clamp(0., 1.) * 255.).round() as u8)
    }
}

impl TryFrom<&[f64]> for Color {
    type Error = Error;

    fn try_from(channels: &[f64]) -> Result<Self> {
        let channels: [f64; 3] = channels.try_into().map_err(|_| {
            Error::TypeMismatch(format!("a color has 3 channels, got {}", channels.len()))
        })?;
        Ok(Self { channels })
    }
}

impl ApproxEq for Color {
    fn approx_eq_epsilon(&self, other: &Self, epsilon: f64) -> bool {
        self.channels
            .as_slice()
            .approx_eq_epsilon(other.channels.as_slice(), epsilon)
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

impl ops::Add for Color {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl ops::Sub for Color {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a - b)
    }
}

/// Hadamard product
impl ops::Mul for Color {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a * b)
    }
}

impl ops::Mul<f64> for Color {
    type Output = Self;

    fn mul(self, factor: f64) -> Self::Output {
        self.map(|channel| channel * factor)
    }
}

impl ops::Div<f64> for Color {
    type Output = Self;

    fn div(self, divisor: f64) -> Self::Output {
        self.map(|channel| channel / divisor)
    }
}
