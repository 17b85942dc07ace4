//! Demosaicing by averaging the adjacent samples of each colour.
//!
//! ```text
//!   [ d  v  d
//!   ; h  c  h
//!   ; d  v  d ]
//! ```
//!
//! The native channel is kept.  A missing channel is the truncated mean
//! of the samples of that colour among the eight neighbours: two for
//! red or blue at a green site, four otherwise.

use crate::border_replicate::BorderReplicate;
use crate::demosaic::fill_pixels;
use crate::raster::{Raster, RasterMut, Sample};
use crate::{Color, CFA};

const PADDING: usize = 1;

const WINDOW: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

pub fn run<T: Sample>(src: &Raster<T>, cfa: CFA, dst: &mut RasterMut<T>) {
    let plane = BorderReplicate::new(src, PADDING);

    fill_pixels(dst, |x, y| {
        let native = cfa.color_at(x, y);
        let mut sum = [0i32; 3];
        let mut num = [0i32; 3];

        for &(dx, dy) in WINDOW.iter() {
            let c = cfa.color_near(x, y, dx, dy) as usize;
            sum[c] += plane.offset(x, y, dx, dy);
            num[c] += 1;
        }

        let mut px = [T::default(); 3];
        for c in Color::ALL {
            let v = if c == native {
                plane.offset(x, y, 0, 0)
            } else {
                sum[c as usize] / num[c as usize]
            };
            px[c as usize] = T::from_i32(v);
        }
        px
    });
}
