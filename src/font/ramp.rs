//! Vertical color ramps for glyph fills
//!
//! A ramp maps a vertical position fraction `t` in [0,1] to a color with
//! components in the 0..=255 range. The closed set of kinds mirrors the
//! command-line color syntax: one color is flat, two is a linear gradient,
//! three is a quadratic Bezier through the control colors.

use crate::color::Rgba;
use crate::error::{AtlasError, AtlasResult};

/// Closed set of gradient kinds carrying their control colors
#[derive(Debug, Clone, PartialEq)]
pub enum ColorRamp {
    Flat(Rgba<f32>),
    Linear(Rgba<f32>, Rgba<f32>),
    Bezier(Rgba<f32>, Rgba<f32>, Rgba<f32>),
}

impl ColorRamp {
    /// Evaluate the ramp at vertical fraction `t`
    pub fn sample(&self, t: f32) -> Rgba<f32> {
        match *self {
            ColorRamp::Flat(c) => c,
            ColorRamp::Linear(c0, c1) => c0 + (c1 - c0) * t,
            ColorRamp::Bezier(c0, c1, c2) => {
                let u = 1.0 - t;
                c0 * (u * u) + c1 * (2.0 * t * u) + c2 * (t * t)
            }
        }
    }

    /// Parse `AARRGGBB[-AARRGGBB[-AARRGGBB]]` into a ramp
    pub fn parse(spec: &str) -> AtlasResult<Self> {
        let colors: Vec<Rgba<f32>> = spec
            .split('-')
            .map(Rgba::parse_hex)
            .collect::<AtlasResult<_>>()?;

        match colors[..] {
            [c] => Ok(ColorRamp::Flat(c)),
            [c0, c1] => Ok(ColorRamp::Linear(c0, c1)),
            [c0, c1, c2] => Ok(ColorRamp::Bezier(c0, c1, c2)),
            _ => Err(AtlasError::Config {
                what: "color ramp",
                value: spec.to_string(),
            }),
        }
    }
}
