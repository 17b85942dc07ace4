//! Demosaicing by collapsing each 2x2 tile into one pixel.
//!
//! The output has half the width and half the height of the mosaic; a
//! trailing odd row or column is dropped.  Red and blue are taken from
//! the tile as is, green is the average of the tile's two green samples.

use crate::demosaic::fill_pixels;
use crate::raster::{Raster, RasterMut, Sample};
use crate::CFA;

pub fn run<T: Sample>(src: &Raster<T>, cfa: CFA, dst: &mut RasterMut<T>) {
    let w = src.w;

    fill_pixels(dst, |x, y| {
        let (sx, sy) = (2 * x, 2 * y);
        let mut sum = [0i32; 3];
        for dy in 0..2 {
            for dx in 0..2 {
                let c = cfa.color_at(sx + dx, sy + dy) as usize;
                sum[c] += src.buf[(sy + dy) * w + sx + dx].to_i32();
            }
        }

        [
            T::from_i32(sum[0]),
            T::from_i32(sum[1] / 2),
            T::from_i32(sum[2]),
        ]
    });
}
