//! Demosaicing using linear interpolation.
//!
//! ```text
//!   green_kernel = (1 / 4) *
//!       [ 0 1 0
//!       ; 1 4 1
//!       ; 0 1 0 ];
//!
//!   red/blue_kernel = (1 / 4) *
//!       [ 1 2 1
//!       ; 2 4 2
//!       ; 1 2 1 ];
//! ```

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
            px[c as usize] = T::from_i32(plane.mean(x, y, site.neighbours(c)));
        }
        px
    });
}
