//! Demosaicing using edge-sensing interpolation.
//!
//! Green is filled first.  At a red or blue site the horizontal and
//! vertical gradients are compared:
//!
//! ```text
//!   dh = |2c - c(-2, 0) - c(2, 0)| + |g(-1, 0) - g(1, 0)|
//!   dv = |2c - c(0, -2) - c(0, 2)| + |g(0, -1) - g(0, 1)|
//! ```
//!
//! and green is interpolated along the smoother axis, or from all four
//! neighbours when the gradients are within one 8-bit code value of each
//! other.  Red and blue are then completed from colour differences.

use crate::border_replicate::BorderReplicate;
use crate::demosaic::colordiff::{complete_pixel, GreenPlane};
use crate::demosaic::{fill_pixels, fill_rows};
use crate::raster::{Raster, RasterMut, Sample};
use crate::{Color, CFA};

const PADDING: usize = 2;

pub fn run<T: Sample>(src: &Raster<T>, cfa: CFA, dst: &mut RasterMut<T>) {
    let (w, h) = (src.w, src.h);
    let plane = BorderReplicate::new(src, PADDING);
    let max = src.max_value();
    let eps = 1i32 << src.bits.saturating_sub(8);

    let mut green = vec![0i32; w * h];
    fill_rows(&mut green, w, |y, row| {
        for (x, g) in row.iter_mut().enumerate() {
            *g = green_at(&plane, cfa, eps, x, y);
        }
    });

    let green = GreenPlane { w, h, data: &green };
    fill_pixels(dst, |x, y| {
        let px = complete_pixel(&plane, &green, cfa, max, x, y);
        [T::from_i32(px[0]), T::from_i32(px[1]), T::from_i32(px[2])]
    });
}

fn green_at(plane: &BorderReplicate, cfa: CFA, eps: i32, x: usize, y: usize) -> i32 {
    let c = plane.offset(x, y, 0, 0);
    if cfa.color_at(x, y) == Color::Green {
        return c;
    }

    let p = |dx, dy| plane.offset(x, y, dx, dy);
    let dh = (2 * c - p(-2, 0) - p(2, 0)).abs() + (p(-1, 0) - p(1, 0)).abs();
    let dv = (2 * c - p(0, -2) - p(0, 2)).abs() + (p(0, -1) - p(0, 1)).abs();

    if (dh - dv).abs() <= eps {
        (p(-1, 0) + p(1, 0) + p(0, -1) + p(0, 1)) / 4
    } else if dh < dv {
        (p(-1, 0) + p(1, 0)) / 2
    } else {
        (p(0, -1) + p(0, 1)) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::{green_at, run, PADDING};
    use crate::border_replicate::BorderReplicate;
    use crate::demosaic::linear;
    use crate::{Raster, RasterMut, CFA};

    fn vertical_edge() -> Vec<u8> {
        // Dark columns on the left, bright columns on the right.
        (0..64).map(|i| if i % 8 < 4 { 10 } else { 200 }).collect()
    }

    #[test]
    fn test_follows_vertical_edge() {
        let src = vertical_edge();
        let mut buf = vec![0u8; 3 * 64];
        run(&Raster::new(8, 8, &src).unwrap(), CFA::RGGB,
                &mut RasterMut::new(8, 8, &mut buf).unwrap());

        // (4, 2) is a red site just right of the edge.
        let i = 3 * (2 * 8 + 4);
        assert_eq!(&buf[i..i + 3], &[200, 200, 200]);
        // (3, 3) is a blue site just left of it.
        let i = 3 * (3 * 8 + 3);
        assert_eq!(&buf[i..i + 3], &[10, 10, 10]);

        // Bilinear smears the edge at the same site.
        let mut lin = vec![0u8; 3 * 64];
        linear::run(&Raster::new(8, 8, &src).unwrap(), CFA::RGGB,
                &mut RasterMut::new(8, 8, &mut lin).unwrap());
        assert_eq!(lin[3 * (2 * 8 + 4) + 1], 152);
    }

    #[test]
    fn test_flat_colour() {
        // R = 100, G = 50, B = 25 everywhere.
        let src: Vec<u16> = (0..36)
            .map(|i| match ((i % 6) % 2, (i / 6) % 2) {
                (0, 0) => 100,
                (1, 1) => 25,
                _ => 50,
            })
            .collect();
        let mut buf = vec![0u16; 3 * 36];
        run(&Raster::with_bits(6, 6, 10, &src).unwrap(), CFA::RGGB,
                &mut RasterMut::new(6, 6, &mut buf).unwrap());

        for px in buf.chunks_exact(3) {
            assert_eq!(px, &[100, 50, 25]);
        }
    }

    #[test]
    fn test_tie_band_edge() {
        // 12-bit samples, so the tie band is 16.  Raising the green at
        // (1, 2) by `d` makes dh = d and dv = 0 at the red site (2, 2).
        let green_with = |d: u16| {
            let mut src = vec![1000u16; 36];
            src[2 * 6 + 1] += d;
            let raster = Raster::with_bits(6, 6, 12, &src).unwrap();
            green_at(&BorderReplicate::new(&raster, PADDING), CFA::RGGB, 16, 2, 2)
        };

        assert_eq!(green_with(0), 1000);
        // Inside the band: all four neighbours.
        assert_eq!(green_with(9), (1009 + 3 * 1000) / 4);
        assert_eq!(green_with(16), (1016 + 3 * 1000) / 4);
        // Just outside: the vertical pair only.
        assert_eq!(green_with(17), 1000);

        let src: Vec<u16> = (0..36).map(|i| if i == 13 { 1016 } else { 1000 }).collect();
        let mut buf = vec![0u16; 3 * 36];
        run(&Raster::with_bits(6, 6, 12, &src).unwrap(), CFA::RGGB,
                &mut RasterMut::new(6, 6, &mut buf).unwrap());
        assert_eq!(buf[3 * 14 + 1], 1004);
    }
}
