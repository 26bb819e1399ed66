//! RGBA color with component-wise arithmetic
//!
//! The same struct serves two roles: `Rgba<u8>` is the storage and output
//! pixel format, `Rgba<f32>` is the compositing intermediate. Conversion
//! between them is a plain numeric cast; normalization to [0,1] is always an
//! explicit scale by 1/255, never implicit.

use std::ops::{Add, Mul, Sub};

use crate::error::{AtlasError, AtlasResult};

/// Four-channel color, component order r, g, b, a
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rgba<T> {
    pub r: T,
    pub g: T,
    pub b: T,
    pub a: T,
}

impl<T> Rgba<T> {
    pub const fn new(r: T, g: T, b: T, a: T) -> Self {
        Self { r, g, b, a }
    }
}

impl<T: Add<Output = T>> Add for Rgba<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            r: self.r + rhs.r,
            g: self.g + rhs.g,
            b: self.b + rhs.b,
            a: self.a + rhs.a,
        }
    }
}

impl<T: Sub<Output = T>> Sub for Rgba<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            r: self.r - rhs.r,
            g: self.g - rhs.g,
            b: self.b - rhs.b,
            a: self.a - rhs.a,
        }
    }
}

impl Mul<f32> for Rgba<f32> {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self {
            r: self.r * rhs,
            g: self.g * rhs,
            b: self.b * rhs,
            a: self.a * rhs,
        }
    }
}

impl Rgba<u8> {
    /// Widen to float components without changing their range
    pub fn to_float(self) -> Rgba<f32> {
        Rgba {
            r: self.r as f32,
            g: self.g as f32,
            b: self.b as f32,
            a: self.a as f32,
        }
    }
}

impl Rgba<f32> {
    /// Narrow to byte components, rounding and clamping to 0..=255
    pub fn to_bytes(self) -> Rgba<u8> {
        fn clamp(v: f32) -> u8 {
            v.round().clamp(0.0, 255.0) as u8
        }
        Rgba {
            r: clamp(self.r),
            g: clamp(self.g),
            b: clamp(self.b),
            a: clamp(self.a),
        }
    }

    /// Parse an `AARRGGBB` hex color into components in the 0..=255 range
    pub fn parse_hex(spec: &str) -> AtlasResult<Self> {
        let bad = || AtlasError::Config {
            what: "color",
            value: spec.to_string(),
        };

        if spec.len() != 8 || !spec.is_ascii() {
            return Err(bad());
        }

        let mut channels = [0.0f32; 4];
        for (i, channel) in channels.iter_mut().enumerate() {
            let byte = u8::from_str_radix(&spec[i * 2..i * 2 + 2], 16).map_err(|_| bad())?;
            *channel = byte as f32;
        }

        let [a, r, g, b] = channels;
        Ok(Rgba { r, g, b, a })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_arithmetic() {
        let c0 = Rgba::new(1.0, 2.0, 3.0, 4.0);
        let c1 = Rgba::new(0.5, 0.5, 0.5, 0.5);

        assert_eq!(c0 + c1, Rgba::new(1.5, 2.5, 3.5, 4.5));
        assert_eq!(c0 - c1, Rgba::new(0.5, 1.5, 2.5, 3.5));
        assert_eq!(c1 * 2.0, Rgba::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_byte_conversion_round_trip() {
        let c = Rgba::<u8>::new(0, 127, 255, 64);
        assert_eq!(c.to_float().to_bytes(), c);
    }

    #[test]
    fn test_to_bytes_clamps() {
        let c = Rgba::new(-10.0, 300.0, 254.6, 0.4);
        assert_eq!(c.to_bytes(), Rgba::new(0, 255, 255, 0));
    }

    #[test]
    fn test_parse_hex() {
        let c = Rgba::parse_hex("ff8040c0").expect("valid color");
        assert_eq!(c, Rgba::new(128.0, 64.0, 192.0, 255.0));
    }

    #[test]
    fn test_parse_hex_rejects_bad_input() {
        assert!(Rgba::parse_hex("ff804").is_err());
        assert!(Rgba::parse_hex("gg8040c0").is_err());
        assert!(Rgba::parse_hex("ff8040c0ff").is_err());
    }
}
