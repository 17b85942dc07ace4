//! Demosaicing using nearest neighbour interpolation.
//!
//! Each missing channel copies the closest sample of that colour.  When
//! several samples are equally close, the one to the left (or above, or
//! up-left for diagonals) wins.

use crate::border_replicate::BorderReplicate;
use crate::demosaic::fill_pixels;
use crate::raster::{Raster, RasterMut, Sample};
use crate::{Color, CFA};

const PADDING: usize = 1;

pub fn run<T: Sample>(src: &Raster<T>, cfa: CFA, dst: &mut RasterMut<T>) {
    let plane = BorderReplicate::new(src, PADDING);

    fill_pixels(dst, |x, y| {
        let site = cfa.site_at(x, y);
        let mut px = [T::default(); 3];
        for c in Color::ALL {
            let (dx, dy) = site.neighbours(c)[0];
            px[c as usize] = T::from_i32(plane.offset(x, y, dx, dy));
        }
        px
    });
}
