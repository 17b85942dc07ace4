//! Demosaicing using adaptive homogeneity-directed interpolation
//! (Hirakawa and Parks).
//!
//! Two candidate images are built, one with green interpolated along
//! rows and one along columns:
//!
//! ```text
//!   g = (2 * (g(-1) + g(1)) + 2c - c(-2) - c(2)) / 4
//! ```
//!
//! Red and blue are completed in each from colour differences.  Both
//! candidates are converted to L*a*b*; a pixel is homogeneous with a
//! neighbour when the two are close in lightness and in chroma.  The
//! candidate with more homogeneous neighbours over the 3x3 window wins,
//! and ties take the average of both.

use crate::border_replicate::BorderReplicate;
use crate::demosaic::colordiff::{complete_pixel, GreenPlane};
use crate::demosaic::{clamp, fill_pixels, fill_rows};
use crate::lab::rgb_to_lab;
use crate::raster::{Raster, RasterMut, Sample};
use crate::{Color, CFA};

const PADDING: usize = 2;

/// Largest lightness difference between homogeneous neighbours.
const L_THRESHOLD: f32 = 2.0;

/// Largest squared chroma difference between homogeneous neighbours.
const C_THRESHOLD_SQ: f32 = 4.0;

#[derive(Clone, Copy)]
enum Direction {
    Horizontal,
    Vertical,
}

pub fn run<T: Sample>(src: &Raster<T>, cfa: CFA, dst: &mut RasterMut<T>) {
    let (w, h) = (src.w, src.h);
    let plane = BorderReplicate::new(src, PADDING);
    let max = src.max_value();

    let rgb_h = candidate(&plane, cfa, max, Direction::Horizontal);
    let rgb_v = candidate(&plane, cfa, max, Direction::Vertical);
    let homo_h = homogeneity(&lab_plane(&rgb_h, w, max), w, h);
    let homo_v = homogeneity(&lab_plane(&rgb_v, w, max), w, h);

    fill_pixels(dst, |x, y| {
        let i = y * w + x;
        let score_h = window_sum(&homo_h, w, h, x, y);
        let score_v = window_sum(&homo_v, w, h, x, y);

        let px = if score_h > score_v {
            rgb_h[i]
        } else if score_v > score_h {
            rgb_v[i]
        } else {
            let (a, b) = (rgb_h[i], rgb_v[i]);
            [(a[0] + b[0]) / 2, (a[1] + b[1]) / 2, (a[2] + b[2]) / 2]
        };
        [T::from_i32(px[0]), T::from_i32(px[1]), T::from_i32(px[2])]
    });
}

/// Full RGB image with green interpolated in one direction.
fn candidate(plane: &BorderReplicate, cfa: CFA, max: i32, dir: Direction) -> Vec<[i32; 3]> {
    let (w, h) = (plane.width(), plane.height());

    let mut green = vec![0i32; w * h];
    fill_rows(&mut green, w, |y, row| {
        for (x, g) in row.iter_mut().enumerate() {
            *g = green_at(plane, cfa, max, dir, x, y);
        }
    });

    let green = GreenPlane { w, h, data: &green };
    let mut rgb = vec![[0i32; 3]; w * h];
    fill_rows(&mut rgb, w, |y, row| {
        for (x, px) in row.iter_mut().enumerate() {
            *px = complete_pixel(plane, &green, cfa, max, x, y);
        }
    });
    rgb
}

fn green_at(
    plane: &BorderReplicate,
    cfa: CFA,
    max: i32,
    dir: Direction,
    x: usize,
    y: usize,
) -> i32 {
    let c = plane.offset(x, y, 0, 0);
    if cfa.color_at(x, y) == Color::Green {
        return c;
    }

    let (dx, dy) = match dir {
        Direction::Horizontal => (1, 0),
        Direction::Vertical => (0, 1),
    };
    let p = |k: isize| plane.offset(x, y, k * dx, k * dy);

    clamp((2 * (p(-1) + p(1)) + 2 * c - p(-2) - p(2)) / 4, max)
}

fn lab_plane(rgb: &[[i32; 3]], w: usize, max: i32) -> Vec<[f32; 3]> {
    let mut lab = vec![[0f32; 3]; rgb.len()];
    fill_rows(&mut lab, w, |y, row| {
        for (x, v) in row.iter_mut().enumerate() {
            *v = rgb_to_lab(rgb[y * w + x], max);
        }
    });
    lab
}

/// Number of the 8 neighbours of each pixel that are homogeneous with it.
fn homogeneity(lab: &[[f32; 3]], w: usize, h: usize) -> Vec<u8> {
    let mut homo = vec![0u8; w * h];
    fill_rows(&mut homo, w, |y, row| {
        for (x, count) in row.iter_mut().enumerate() {
            let centre = lab[y * w + x];
            for (nx, ny) in neighbourhood(w, h, x, y) {
                if nx == x && ny == y {
                    continue;
                }

                let n = lab[ny * w + nx];
                let dl = (centre[0] - n[0]).abs();
                let da = centre[1] - n[1];
                let db = centre[2] - n[2];
                if dl < L_THRESHOLD && da * da + db * db < C_THRESHOLD_SQ {
                    *count += 1;
                }
            }
        }
    });
    homo
}

/// Sum of the homogeneity counts over the 3x3 window around (x, y).
fn window_sum(homo: &[u8], w: usize, h: usize, x: usize, y: usize) -> u32 {
    neighbourhood(w, h, x, y)
        .map(|(nx, ny)| u32::from(homo[ny * w + nx]))
        .sum()
}

/// The 3x3 window around (x, y), with coordinates clamped to the image.
/// Near the border some positions repeat.
fn neighbourhood(w: usize, h: usize, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
    (-1isize..=1).flat_map(move |dy| {
        (-1isize..=1).map(move |dx| {
            let nx = (x as isize + dx).clamp(0, w as isize - 1) as usize;
            let ny = (y as isize + dy).clamp(0, h as isize - 1) as usize;
            (nx, ny)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::{Color, Raster, RasterMut, CFA};

    #[test]
    fn test_flat_colour() {
        for &cfa in CFA::ALL.iter() {
            let src: Vec<u8> = (0..100)
                .map(|i| match cfa.color_at(i % 10, i / 10) {
                    Color::Red => 180,
                    Color::Green => 90,
                    Color::Blue => 30,
                })
                .collect();
            let mut buf = vec![0u8; 3 * 100];
            run(&Raster::new(10, 10, &src).unwrap(), cfa,
                    &mut RasterMut::new(10, 10, &mut buf).unwrap());

            for px in buf.chunks_exact(3) {
                assert_eq!(px, &[180, 90, 30], "{}", cfa);
            }
        }
    }

    #[test]
    fn test_follows_horizontal_edge() {
        // Dark rows on top, bright rows below.
        let src: Vec<u8> = (0..64).map(|i| if i / 8 < 4 { 10 } else { 200 }).collect();
        let mut buf = vec![0u8; 3 * 64];
        run(&Raster::new(8, 8, &src).unwrap(), CFA::RGGB,
                &mut RasterMut::new(8, 8, &mut buf).unwrap());

        // (2, 4) is a red site just below the edge; interpolating along
        // the column would give green 152 there.
        let i = 3 * (4 * 8 + 2);
        assert_eq!(&buf[i..i + 3], &[200, 200, 200]);
        // (3, 3) is a blue site just above it.
        let i = 3 * (3 * 8 + 3);
        assert_eq!(&buf[i..i + 3], &[10, 10, 10]);
    }

    #[test]
    fn test_range() {
        let src: Vec<u16> = (0..144u32)
            .map(|i| if (i * 7919) % 5 < 2 { 4095 } else { (i * 31) as u16 % 512 })
            .collect();
        let mut buf = vec![0u16; 3 * 144];
        run(&Raster::with_bits(12, 12, 12, &src).unwrap(), CFA::BGGR,
                &mut RasterMut::new(12, 12, &mut buf).unwrap());

        assert!(buf.iter().all(|&v| v <= 4095));
    }
}
