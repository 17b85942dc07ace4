//! Demosaicing using threshold-based variable number of gradients.
//!
//! For every pixel eight gradients are measured in the 5x5 window, one
//! per compass direction, each from differences between samples of the
//! same colour.  The directions whose gradient is at most
//!
//! ```text
//!   threshold = 3/2 * gmin + 1/2 * (gmax - gmin)
//! ```
//!
//! are kept.  Each kept direction contributes the channel averages of
//! the 2x2 tiles lying that way; a missing channel is the native sample
//! plus the mean difference between that channel and the native one.

use crate::border_replicate::BorderReplicate;
use crate::demosaic::{clamp, fill_pixels};
use crate::raster::{Raster, RasterMut, Sample};
use crate::{Color, CFA};

const PADDING: usize = 2;

/// N, NE, E, SE, S, SW, W, NW.
const DIRECTIONS: [(isize, isize); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Top-left corners of the 2x2 tiles lying in each direction.
const TILES: [&[(isize, isize)]; 8] = [
    &[(-1, -2), (0, -2)],
    &[(1, -2)],
    &[(1, -1), (1, 0)],
    &[(1, 1)],
    &[(-1, 1), (0, 1)],
    &[(-2, 1)],
    &[(-2, -1), (-2, 0)],
    &[(-2, -2)],
];

pub fn run<T: Sample>(src: &Raster<T>, cfa: CFA, dst: &mut RasterMut<T>) {
    let plane = BorderReplicate::new(src, PADDING);
    let max = src.max_value();

    fill_pixels(dst, |x, y| {
        let px = interpolate(&plane, cfa, max, x, y);
        [T::from_i32(px[0]), T::from_i32(px[1]), T::from_i32(px[2])]
    });
}

fn interpolate(plane: &BorderReplicate, cfa: CFA, max: i32, x: usize, y: usize) -> [i32; 3] {
    let native = cfa.color_at(x, y) as usize;
    let grad = gradients(plane, x, y);
    let gmin = grad.iter().copied().min().unwrap_or(0);
    let gmax = grad.iter().copied().max().unwrap_or(0);

    let mut diff = [0i32; 3];
    let mut count = 0;
    for (d, &g) in grad.iter().enumerate() {
        if 2 * g > 2 * gmin + gmax {
            continue;
        }

        let avg = tile_averages(plane, cfa, x, y, TILES[d]);
        for c in 0..3 {
            diff[c] += avg[c] - avg[native];
        }
        count += 1;
    }

    let c = plane.offset(x, y, 0, 0);
    let mut px = [c; 3];
    for ch in Color::ALL {
        let ch = ch as usize;
        if ch != native {
            px[ch] = clamp(c + diff[ch] / (4 * count), max);
        }
    }
    px
}

/// Gradients in the order of `DIRECTIONS`.
fn gradients(plane: &BorderReplicate, x: usize, y: usize) -> [i32; 8] {
    let p = |dx: isize, dy: isize| plane.offset(x, y, dx, dy);
    let c = p(0, 0);

    let mut grad = [0i32; 8];
    for (g, &(dx, dy)) in grad.iter_mut().zip(DIRECTIONS.iter()) {
        // Two lateral lines run parallel to the direction.
        let (q1, q2) = if dx == 0 || dy == 0 {
            ((dy.abs(), dx.abs()), (-dy.abs(), -dx.abs()))
        } else {
            ((0, dy), (dx, 0))
        };

        *g = 2 * (p(2 * dx, 2 * dy) - c).abs()
            + 2 * (p(dx, dy) - p(-dx, -dy)).abs()
            + (p(dx + q1.0, dy + q1.1) - p(-dx + q1.0, -dy + q1.1)).abs()
            + (p(dx + q2.0, dy + q2.1) - p(-dx + q2.0, -dy + q2.1)).abs();
    }
    grad
}

/// Four times the per-channel average over the given tiles.
fn tile_averages(
    plane: &BorderReplicate,
    cfa: CFA,
    x: usize,
    y: usize,
    tiles: &[(isize, isize)],
) -> [i32; 3] {
    let mut sum = [0i32; 3];
    for &(tx, ty) in tiles {
        for (dx, dy) in [(tx, ty), (tx + 1, ty), (tx, ty + 1), (tx + 1, ty + 1)] {
            let c = cfa.color_near(x, y, dx, dy) as usize;
            sum[c] += plane.offset(x, y, dx, dy);
        }
    }

    // Every tile holds one red, two green and one blue sample.
    let scale = 2 / tiles.len() as i32;
    [
        sum[0] * 2 * scale,
        sum[1] * scale,
        sum[2] * 2 * scale,
    ]
}
