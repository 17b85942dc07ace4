//! Raster implementation.

use std::fmt::Debug;

use crate::{BayerError, BayerResult};

/// Sample container of a raster: `u8` or `u16`.
///
/// Kernels do their arithmetic in `i32`; samples are widened on the way
/// in and clamped to the raster's maximum value on the way out.
pub trait Sample: Copy + Default + Debug + Send + Sync + 'static {
    /// Number of bits in the container.
    const BITS: u32;

    fn to_i32(self) -> i32;

    /// Narrow a value already known to lie within the container.
    fn from_i32(v: i32) -> Self;
}

impl Sample for u8 {
    const BITS: u32 = 8;

    #[inline]
    fn to_i32(self) -> i32 {
        i32::from(self)
    }

    #[inline]
    fn from_i32(v: i32) -> Self {
        v as u8
    }
}

impl Sample for u16 {
    const BITS: u32 = 16;

    #[inline]
    fn to_i32(self) -> i32 {
        i32::from(self)
    }

    #[inline]
    fn from_i32(v: i32) -> Self {
        v as u16
    }
}

/// Read-only view of a single-channel mosaic.
#[derive(Clone, Copy, Debug)]
pub struct Raster<'a, T: Sample> {
    pub(crate) w: usize,
    pub(crate) h: usize,
    pub(crate) bits: u32,
    pub(crate) buf: &'a [T],
}

/// Mutable view of an interleaved RGB raster.
#[derive(Debug)]
pub struct RasterMut<'a, T: Sample> {
    pub(crate) w: usize,
    pub(crate) h: usize,
    pub(crate) stride: usize,
    pub(crate) buf: &'a mut [T],
}

fn check_bits<T: Sample>(bits: u32) -> BayerResult<()> {
    if bits == 0 || bits > T::BITS {
        return Err(BayerError::WrongDepth);
    }
    Ok(())
}

impl<'a, T: Sample> Raster<'a, T> {
    /// Wrap a mosaic that uses the full width of its container.
    ///
    /// # Examples
    ///
    /// ```
    /// const IMG_W: usize = 320;
    /// const IMG_H: usize = 200;
    /// let buf = [0u8; IMG_W * IMG_H];
    ///
    /// bayer2rgb::Raster::new(IMG_W, IMG_H, &buf).unwrap();
    /// ```
    pub fn new(w: usize, h: usize, buf: &'a [T]) -> BayerResult<Self> {
        Self::with_bits(w, h, T::BITS, buf)
    }

    /// Wrap a mosaic whose samples only use the low `bits` bits, e.g.
    /// 12-bit sensor data stored in `u16`.
    pub fn with_bits(w: usize, h: usize, bits: u32, buf: &'a [T]) -> BayerResult<Self> {
        check_bits::<T>(bits)?;
        let len = w.checked_mul(h).ok_or(BayerError::WrongResolution)?;
        if buf.len() < len {
            return Err(BayerError::BufferTooSmall(len, buf.len()));
        }

        Ok(Raster { w, h, bits, buf })
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// The largest representable intensity, `2^bits - 1`.
    #[inline]
    pub fn max_value(&self) -> i32 {
        ((1u32 << self.bits) - 1) as i32
    }

    /// Borrow one row of samples.
    pub fn row(&self, y: usize) -> &'a [T] {
        assert!(y < self.h);
        &self.buf[y * self.w..(y + 1) * self.w]
    }
}

impl<'a, T: Sample> RasterMut<'a, T> {
    /// Allocate a new raster for the given destination buffer slice.
    ///
    /// # Examples
    ///
    /// ```
    /// const IMG_W: usize = 320;
    /// const IMG_H: usize = 200;
    /// let mut buf = [0u8; 3 * IMG_W * IMG_H];
    ///
    /// bayer2rgb::RasterMut::new(IMG_W, IMG_H, &mut buf).unwrap();
    /// ```
    pub fn new(w: usize, h: usize, buf: &'a mut [T]) -> BayerResult<Self> {
        let stride = w.checked_mul(3).ok_or(BayerError::WrongResolution)?;
        let len = stride.checked_mul(h).ok_or(BayerError::WrongResolution)?;
        if buf.len() < len {
            return Err(BayerError::BufferTooSmall(len, buf.len()));
        }

        Ok(RasterMut { w, h, stride, buf })
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Borrow a mutable row slice of `3 * width` samples.
    pub fn borrow_row_mut(&mut self, y: usize) -> &mut [T] {
        assert!(y < self.h);

        let start = self.stride * y;
        &mut self.buf[start..start + self.stride]
    }

    /// The RGB triple at (x, y), or `None` outside the image.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[T; 3]> {
        if x < self.w && y < self.h {
            let i = self.stride * y + 3 * x;
            Some([self.buf[i], self.buf[i + 1], self.buf[i + 2]])
        } else {
            None
        }
    }

    /// The samples covered by the raster, row after row.
    pub(crate) fn rows_mut(&mut self) -> &mut [T] {
        let len = self.stride * self.h;
        &mut self.buf[..len]
    }
}

#[cfg(test)]
mod tests {
    use super::{Raster, RasterMut};
    use crate::BayerError;

    #[test]
    fn test_raster_mut_overflow() {
        let mut buf = [0u8; 1];
        let res = RasterMut::new(::std::usize::MAX, ::std::usize::MAX, &mut buf);
        assert!(matches!(res, Err(BayerError::WrongResolution)));
    }

    #[test]
    fn test_raster_mut_too_small() {
        let mut buf = [0u16; 3 * 4 * 4 - 1];
        let res = RasterMut::new(4, 4, &mut buf);
        assert!(matches!(res, Err(BayerError::BufferTooSmall(48, 47))));
    }

    #[test]
    fn test_borrow_row_mut() {
        const IMG_W: usize = 4;
        const IMG_H: usize = 2;
        let mut buf = [0u16; 3 * IMG_W * IMG_H];

        {
            let mut dst = RasterMut::new(IMG_W, IMG_H, &mut buf).unwrap();
            let row = dst.borrow_row_mut(1);
            for (i, elt) in row.iter_mut().enumerate() {
                *elt = 0x100 + i as u16;
            }
            assert_eq!(dst.pixel(1, 1), Some([0x103, 0x104, 0x105]));
            assert_eq!(dst.pixel(4, 1), None);
        }

        assert_eq!(&buf[..3 * IMG_W], &[0u16; 3 * IMG_W][..]);
        assert_eq!(buf[3 * IMG_W], 0x100);
    }

    #[test]
    fn test_raster_bits() {
        let buf = [0u16; 4];
        assert_eq!(Raster::with_bits(2, 2, 12, &buf).unwrap().max_value(), 4095);
        assert_eq!(Raster::new(2, 2, &buf).unwrap().max_value(), 65535);
        assert!(matches!(Raster::with_bits(2, 2, 17, &buf), Err(BayerError::WrongDepth)));
        assert!(matches!(Raster::with_bits(2, 2, 0, &buf), Err(BayerError::WrongDepth)));

        let buf8 = [7u8; 3];
        assert!(matches!(Raster::new(2, 2, &buf8), Err(BayerError::BufferTooSmall(4, 3))));
    }
}
