//! Demosaicing using gradient-corrected linear interpolation
//! (Malvar, He and Cutler).
//!
//! The bilinear estimate is corrected by the Laplacian of the channel
//! known at the pixel, weighted by 1/2 (green at red/blue), 5/8
//! (red/blue at green) or 3/4 (red/blue at blue/red):
//!
//! ```text
//!   green_at_rb = (1 / 8) *
//!       [  0  0 -1  0  0
//!       ;  0  0  2  0  0
//!       ; -1  2  4  2 -1
//!       ;  0  0  2  0  0
//!       ;  0  0 -1  0  0 ];
//!
//!   rb_at_g_row = (1 / 16) *
//!       [  0  0  1  0  0
//!       ;  0 -2  0 -2  0
//!       ; -2  8 10  8 -2
//!       ;  0 -2  0 -2  0
//!       ;  0  0  1  0  0 ];
//!
//!   rb_at_br = (1 / 16) *
//!       [  0  0 -3  0  0
//!       ;  0  4  0  4  0
//!       ; -3  0 12  0 -3
//!       ;  0  4  0  4  0
//!       ;  0  0 -3  0  0 ];
//! ```
//!
//! `rb_at_g_col` is the transpose of `rb_at_g_row`.  Results may over-
//! or undershoot and are clamped to the valid range.

use crate::border_replicate::BorderReplicate;
use crate::demosaic::{clamp, fill_pixels};
use crate::raster::{Raster, RasterMut, Sample};
use crate::{Color, Site, CFA};

const PADDING: usize = 2;

#[rustfmt::skip]
const GREEN_AT_RB: [i32; 25] = [
     0,  0, -1,  0,  0,
     0,  0,  2,  0,  0,
    -1,  2,  4,  2, -1,
     0,  0,  2,  0,  0,
     0,  0, -1,  0,  0,
];

#[rustfmt::skip]
const RB_AT_G_ROW: [i32; 25] = [
     0,  0,  1,  0,  0,
     0, -2,  0, -2,  0,
    -2,  8, 10,  8, -2,
     0, -2,  0, -2,  0,
     0,  0,  1,  0,  0,
];

#[rustfmt::skip]
const RB_AT_G_COL: [i32; 25] = [
     0,  0, -2,  0,  0,
     0, -2,  8, -2,  0,
     1,  0, 10,  0,  1,
     0, -2,  8, -2,  0,
     0,  0, -2,  0,  0,
];

#[rustfmt::skip]
const RB_AT_BR: [i32; 25] = [
     0,  0, -3,  0,  0,
     0,  4,  0,  4,  0,
    -3,  0, 12,  0, -3,
     0,  4,  0,  4,  0,
     0,  0, -3,  0,  0,
];

pub fn run<T: Sample>(src: &Raster<T>, cfa: CFA, dst: &mut RasterMut<T>) {
    let plane = BorderReplicate::new(src, PADDING);
    let max = src.max_value();

    fill_pixels(dst, |x, y| {
        let site = cfa.site_at(x, y);
        let mut px = [T::default(); 3];
        for c in Color::ALL {
            let v = match kernel(site, c) {
                Some((k, div)) => clamp(apply_kernel(&plane, x, y, k) / div, max),
                None => plane.offset(x, y, 0, 0),
            };
            px[c as usize] = T::from_i32(v);
        }
        px
    });
}

/// The kernel and divisor that estimate colour `c` at `site`, or `None`
/// for the native colour.
fn kernel(site: Site, c: Color) -> Option<(&'static [i32; 25], i32)> {
    match (site, c) {
        (Site::Red, Color::Green) | (Site::Blue, Color::Green) => Some((&GREEN_AT_RB, 8)),
        (Site::Red, Color::Blue) | (Site::Blue, Color::Red) => Some((&RB_AT_BR, 16)),
        (Site::GreenR, Color::Red) | (Site::GreenB, Color::Blue) => Some((&RB_AT_G_ROW, 16)),
        (Site::GreenR, Color::Blue) | (Site::GreenB, Color::Red) => Some((&RB_AT_G_COL, 16)),
        _ => None,
    }
}

#[inline]
fn apply_kernel(plane: &BorderReplicate, x: usize, y: usize, k: &[i32; 25]) -> i32 {
    let mut sum = 0;
    for (i, &w) in k.iter().enumerate() {
        if w != 0 {
            let dx = (i % 5) as isize - 2;
            let dy = (i / 5) as isize - 2;
            sum += w * plane.offset(x, y, dx, dy);
        }
    }
    sum
}
