//! Mosaic plane that replicates pixels on the border.
//!
//! If the raw data is given by the unprimed values shown below, the
//! padded rows look like the following, where the primed values have
//! the same value as the unprimed values.
//!
//! ```text
//!   r0' g0' r0' g0' | r0 g0 r1 g1 r2 g2 ... rl gl rm gm rn gn | rn' gn' rn' gn'
//! ```
//!
//! Samples are replicated in pairs so that every padded position keeps
//! the colour the CFA assigns to it: x = -1 reads x = 1, x = w reads
//! x = w - 2.  Rows are replicated the same way.

use crate::raster::{Raster, Sample};

/// Map a possibly out-of-range coordinate onto the nearest in-range
/// coordinate with the same parity.
///
/// `n` must be at least 2.
#[inline]
pub fn replicate(i: isize, n: usize) -> usize {
    let n = n as isize;
    let mut i = i;
    while i < 0 {
        i += 2;
    }
    while i >= n {
        i -= 2;
    }
    i as usize
}

/// Padded copy of a mosaic, widened to `i32`.
///
/// Tuple of offsets designating the different sub-regions of a row:
///
/// ```text
///    0 .. x1 => left border
///   x1 .. x2 => raw data
///   x2 .. x3 => right border
/// ```
pub struct BorderReplicate {
    w: usize,
    h: usize,
    padding: usize,
    stride: usize,
    data: Vec<i32>,
}

macro_rules! fill_row {
    ($dst:ident, $x1:expr, $x2:expr, $x3:expr) => {{
        let mut i;

        // Left border.
        let r0 = $dst[$x1 + 0];
        let g0 = $dst[$x1 + 1];
        i = 0;
        if $x1 % 2 == 1 {
            $dst[0] = g0;
            i = 1;
        }
        while i < $x1 {
            $dst[i + 0] = r0;
            $dst[i + 1] = g0;
            i += 2;
        }

        // Right border.
        let r0 = $dst[$x2 - 2];
        let g0 = $dst[$x2 - 1];
        i = $x2;
        while i + 1 < $x3 {
            $dst[i + 0] = r0;
            $dst[i + 1] = g0;
            i += 2;
        }
        if i == $x3 - 1 {
            $dst[i] = r0;
        }
    }};
}

impl BorderReplicate {
    /// Copy `src` into a plane with `padding` replicated samples on
    /// every side.
    ///
    /// # Panics
    ///
    /// Panics if the mosaic is narrower or shorter than one CFA period.
    pub fn new<T: Sample>(src: &Raster<T>, padding: usize) -> Self {
        let (w, h) = (src.w, src.h);
        assert!(w >= 2 && h >= 2);

        let x1 = padding;
        let x2 = x1.checked_add(w).expect("overflow");
        let x3 = x2.checked_add(padding).expect("overflow");
        let stride = x3;
        let rows = h.checked_add(2 * padding).expect("overflow");
        let mut data = vec![0i32; stride.checked_mul(rows).expect("overflow")];

        for (y, dst) in data.chunks_mut(stride).skip(padding).take(h).enumerate() {
            for (d, s) in dst[x1..x2].iter_mut().zip(src.row(y)) {
                *d = s.to_i32();
            }
            fill_row!(dst, x1, x2, x3);
        }

        for py in (0..padding).chain(padding + h..rows) {
            let sy = padding + replicate(py as isize - padding as isize, h);
            let (dst, src) = if py < sy {
                let (top, rest) = data.split_at_mut(stride * sy);
                (&mut top[stride * py..stride * (py + 1)], &rest[..stride])
            } else {
                let (rest, bottom) = data.split_at_mut(stride * py);
                (&mut bottom[..stride], &rest[stride * sy..stride * (sy + 1)])
            };
            dst.copy_from_slice(src);
        }

        BorderReplicate {
            w,
            h,
            padding,
            stride,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Sample at image coordinates (x, y).  Coordinates may lie up to
    /// `padding` samples outside the image.
    #[inline]
    pub fn at(&self, x: isize, y: isize) -> i32 {
        let px = (x + self.padding as isize) as usize;
        let py = (y + self.padding as isize) as usize;
        self.data[py * self.stride + px]
    }

    /// Sample at (x + dx, y + dy).
    #[inline]
    pub fn offset(&self, x: usize, y: usize, dx: isize, dy: isize) -> i32 {
        self.at(x as isize + dx, y as isize + dy)
    }

    /// Truncated mean of the samples at the given offsets from (x, y).
    #[inline]
    pub fn mean(&self, x: usize, y: usize, offsets: &[(isize, isize)]) -> i32 {
        let sum: i32 = offsets
            .iter()
            .map(|&(dx, dy)| self.offset(x, y, dx, dy))
            .sum();
        sum / offsets.len() as i32
    }
}
