//! Generic 2D pixel buffer
//!
//! Row-major grid of an arbitrary pixel/value type with the three operations
//! the pipeline needs: clipped blit, scalar scale, and separable Gaussian
//! blur. Glyph compositing runs these over `f32` and `Rgba<f32>` buffers;
//! sheet assembly runs the blit over `Rgba<u8>`.

use std::ops::{Add, Index, IndexMut, Mul};

/// Width x height grid of `T`, row-major, `pixels.len() == width * height`
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer<T> {
    width: usize,
    height: usize,
    pixels: Vec<T>,
}

impl<T: Copy + Default> PixelBuffer<T> {
    /// Create a buffer filled with the default pixel value
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![T::default(); width * height],
        }
    }

    /// Wrap an existing row-major pixel vector
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<T>) -> Self {
        assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Per-pixel transform into a new buffer of another pixel type
    pub fn map<U, F>(&self, f: F) -> PixelBuffer<U>
    where
        U: Copy + Default,
        F: Fn(T) -> U,
    {
        PixelBuffer {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&p| f(p)).collect(),
        }
    }

    /// Copy `src` into this buffer with its top-left corner at
    /// `(dest_row, dest_col)`, clipped to the overlap of both buffers.
    ///
    /// Offsets may be negative or push past the far edge; whatever falls
    /// outside is dropped and a fully disjoint copy is a silent no-op.
    pub fn blit(&mut self, src: &PixelBuffer<T>, dest_row: i32, dest_col: i32) {
        let r0 = dest_row.max(0);
        let r1 = (dest_row + src.height as i32).min(self.height as i32);
        let c0 = dest_col.max(0);
        let c1 = (dest_col + src.width as i32).min(self.width as i32);

        for r in r0..r1 {
            let src_row = (r - dest_row) as usize;
            for c in c0..c1 {
                let src_col = (c - dest_col) as usize;
                self.pixels[r as usize * self.width + c as usize] =
                    src.pixels[src_row * src.width + src_col];
            }
        }
    }
}

impl<T> PixelBuffer<T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[T] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [T] {
        &mut self.pixels
    }
}

impl<T: Copy + Mul<f32, Output = T>> PixelBuffer<T> {
    /// Multiply every pixel by a scalar in place
    pub fn scale_in_place(&mut self, factor: f32) {
        for p in &mut self.pixels {
            *p = *p * factor;
        }
    }

    /// Multiply every pixel by a scalar into a fresh buffer
    pub fn scaled(&self, factor: f32) -> Self {
        let mut out = Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        };
        out.scale_in_place(factor);
        out
    }
}

impl<T> PixelBuffer<T>
where
    T: Copy + Default + Add<Output = T> + Mul<f32, Output = T>,
{
    /// Separable two-pass Gaussian blur, in place.
    ///
    /// Kernel taps that fall outside the buffer are dropped from the sum
    /// rather than clamped, so pixels near the border come out attenuated.
    /// Shadow edges soften as a result, which is the intended look;
    /// renormalizing by the in-bounds weight sum would preserve brightness
    /// instead.
    pub fn gaussian_blur(&mut self, radius: i32) {
        let kernel = gaussian_kernel(radius);

        // blur horizontally to temp
        let mut temp = vec![T::default(); self.pixels.len()];

        for i in 0..self.height {
            for j in 0..self.width {
                let mut s = T::default();

                for (k, &w) in kernel.iter().enumerate() {
                    let jj = j as i32 + k as i32 - radius;
                    if jj < 0 || jj >= self.width as i32 {
                        continue;
                    }
                    s = s + self.pixels[i * self.width + jj as usize] * w;
                }

                temp[i * self.width + j] = s;
            }
        }

        // blur vertically from temp
        for i in 0..self.height {
            for j in 0..self.width {
                let mut s = T::default();

                for (k, &w) in kernel.iter().enumerate() {
                    let ii = i as i32 + k as i32 - radius;
                    if ii < 0 || ii >= self.height as i32 {
                        continue;
                    }
                    s = s + temp[ii as usize * self.width + j] * w;
                }

                self.pixels[i * self.width + j] = s;
            }
        }
    }
}

impl<T> Index<(usize, usize)> for PixelBuffer<T> {
    type Output = T;

    /// Index by `(row, col)`; out of bounds is a programming error
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(row < self.height && col < self.width);
        &self.pixels[row * self.width + col]
    }
}

impl<T> IndexMut<(usize, usize)> for PixelBuffer<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(row < self.height && col < self.width);
        &mut self.pixels[row * self.width + col]
    }
}

/// Normalized Gaussian kernel of length `2*radius + 1`
///
/// Tap `i` weighs `exp(-(i-radius)^2 / 30)` before normalization; the falloff
/// divisor matches the shadow look the tool has always produced.
pub(crate) fn gaussian_kernel(radius: i32) -> Vec<f32> {
    let mut kernel: Vec<f32> = (0..2 * radius + 1)
        .map(|i| {
            let f = (i - radius) as f32;
            (-f * f / 30.0).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }

    kernel
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(width: usize, height: usize, value: f32) -> PixelBuffer<f32> {
        PixelBuffer::from_pixels(width, height, vec![value; width * height])
    }

    #[test]
    fn test_kernel_sums_to_one() {
        for radius in 0..=8 {
            let sum: f32 = gaussian_kernel(radius).iter().sum();
            assert!(
                (sum - 1.0).abs() < 1e-5,
                "radius {} kernel sums to {}",
                radius,
                sum
            );
        }
    }

    #[test]
    fn test_kernel_is_symmetric_and_peaked() {
        let kernel = gaussian_kernel(3);
        assert_eq!(kernel.len(), 7);
        for i in 0..3 {
            assert!((kernel[i] - kernel[6 - i]).abs() < 1e-6);
            assert!(kernel[i] < kernel[i + 1]);
        }
    }

    #[test]
    fn test_blit_interior() {
        let mut dest = filled(4, 4, 0.0);
        let src = filled(2, 2, 1.0);

        dest.blit(&src, 1, 1);

        for r in 0..4 {
            for c in 0..4 {
                let expected = if (1..3).contains(&r) && (1..3).contains(&c) {
                    1.0
                } else {
                    0.0
                };
                assert_eq!(dest[(r, c)], expected);
            }
        }
    }

    #[test]
    fn test_blit_clips_negative_offset() {
        let mut dest = filled(3, 3, 0.0);
        let src = filled(2, 2, 1.0);

        dest.blit(&src, -1, -1);

        assert_eq!(dest[(0, 0)], 1.0);
        assert_eq!(dest[(0, 1)], 0.0);
        assert_eq!(dest[(1, 0)], 0.0);
    }

    #[test]
    fn test_blit_clips_far_edge() {
        let mut dest = filled(3, 3, 0.0);
        let src = filled(2, 2, 1.0);

        dest.blit(&src, 2, 2);

        assert_eq!(dest[(2, 2)], 1.0);
        assert_eq!(dest[(2, 1)], 0.0);
        assert_eq!(dest[(1, 2)], 0.0);
    }

    #[test]
    fn test_blit_disjoint_is_noop() {
        let mut dest = filled(3, 3, 0.0);
        let src = filled(2, 2, 1.0);

        dest.blit(&src, 10, 10);
        dest.blit(&src, -5, 0);

        assert!(dest.pixels().iter().all(|&p| p == 0.0));
    }

    #[test]
    fn test_scaled_does_not_alias() {
        let src = filled(2, 2, 2.0);
        let out = src.scaled(0.5);

        assert!(out.pixels().iter().all(|&p| p == 1.0));
        assert!(src.pixels().iter().all(|&p| p == 2.0));
    }

    #[test]
    fn test_blur_radius_zero_is_identity() {
        let mut buf = filled(3, 3, 0.0);
        buf[(1, 1)] = 1.0;

        buf.gaussian_blur(0);

        assert_eq!(buf[(1, 1)], 1.0);
        assert_eq!(buf[(0, 0)], 0.0);
    }

    #[test]
    fn test_blur_spreads_and_conserves_interior_mass() {
        // an impulse far from any edge keeps its total weight
        let mut buf = filled(11, 11, 0.0);
        buf[(5, 5)] = 1.0;

        buf.gaussian_blur(2);

        assert!(buf[(5, 5)] < 1.0);
        assert!(buf[(5, 6)] > 0.0);
        let total: f32 = buf.pixels().iter().sum();
        assert!((total - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_blur_drops_out_of_bounds_taps() {
        // an impulse in the corner loses the mass that fell outside
        let mut buf = filled(11, 11, 0.0);
        buf[(0, 0)] = 1.0;

        buf.gaussian_blur(2);

        let total: f32 = buf.pixels().iter().sum();
        assert!(total < 1.0 - 1e-3);
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_index_panics() {
        let buf = filled(2, 2, 0.0);
        let _ = buf[(2, 0)];
    }
}
