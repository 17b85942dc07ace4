//! Red/blue completion from a full green plane.
//!
//! Once green is known everywhere, a missing red or blue value is the
//! local green plus the average colour difference (sample - green) at
//! the nearest samples of that colour.

use crate::border_replicate::{replicate, BorderReplicate};
use crate::demosaic::clamp;
use crate::{Color, CFA};

/// Full-resolution green plane, row-major.
pub(super) struct GreenPlane<'a> {
    pub w: usize,
    pub h: usize,
    pub data: &'a [i32],
}

impl<'a> GreenPlane<'a> {
    #[inline]
    fn offset(&self, x: usize, y: usize, dx: isize, dy: isize) -> i32 {
        let gx = replicate(x as isize + dx, self.w);
        let gy = replicate(y as isize + dy, self.h);
        self.data[gy * self.w + gx]
    }
}

/// The RGB value at (x, y).
#[inline]
pub(super) fn complete_pixel(
    plane: &BorderReplicate,
    green: &GreenPlane,
    cfa: CFA,
    max: i32,
    x: usize,
    y: usize,
) -> [i32; 3] {
    let site = cfa.site_at(x, y);
    let native = site.color();
    let g = green.data[y * green.w + x];

    let mut px = [0i32; 3];
    for c in Color::ALL {
        px[c as usize] = if c == Color::Green {
            g
        } else if c == native {
            plane.offset(x, y, 0, 0)
        } else {
            let offsets = site.neighbours(c);
            let diff: i32 = offsets
                .iter()
                .map(|&(dx, dy)| plane.offset(x, y, dx, dy) - green.offset(x, y, dx, dy))
                .sum();
            clamp(g + diff / offsets.len() as i32, max)
        };
    }
    px
}
