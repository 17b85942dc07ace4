//! Collection of demosaicing algorithms.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::debug;

use crate::raster::{Raster, RasterMut, Sample};
use crate::{BayerError, BayerResult, CFA};

/// The demosaicing algorithm to use to fill in the missing data.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Demosaic {
    NearestNeighbour,
    Simple,
    Linear,
    HqLinear,
    Downsample,
    EdgeSense,
    Vng,
    Ahd,
}

pub mod ahd;
pub mod downsample;
pub mod edgesense;
pub mod hqlinear;
pub mod linear;
pub mod nearestneighbour;
pub mod simple;
pub mod vng;

mod colordiff;

impl Demosaic {
    pub const ALL: [Demosaic; 8] = [
        Demosaic::NearestNeighbour,
        Demosaic::Simple,
        Demosaic::Linear,
        Demosaic::HqLinear,
        Demosaic::Downsample,
        Demosaic::EdgeSense,
        Demosaic::Vng,
        Demosaic::Ahd,
    ];

    /// Dimensions of the RGB raster produced from a `w` x `h` mosaic.
    ///
    /// Every method keeps the input resolution except `Downsample`,
    /// which emits one pixel per complete 2x2 tile.
    pub fn output_size(self, w: usize, h: usize) -> (usize, usize) {
        match self {
            Demosaic::Downsample => (w / 2, h / 2),
            _ => (w, h),
        }
    }

    /// Number of samples in the RGB buffer produced from a `w` x `h`
    /// mosaic.
    pub fn output_len(self, w: usize, h: usize) -> usize {
        let (ow, oh) = self.output_size(w, h);
        3 * ow * oh
    }

    fn name(self) -> &'static str {
        match self {
            Demosaic::NearestNeighbour => "NEAREST",
            Demosaic::Simple => "SIMPLE",
            Demosaic::Linear => "BILINEAR",
            Demosaic::HqLinear => "HQLINEAR",
            Demosaic::Downsample => "DOWNSAMPLE",
            Demosaic::EdgeSense => "EDGESENSE",
            Demosaic::Vng => "VNG",
            Demosaic::Ahd => "AHD",
        }
    }
}

impl fmt::Display for Demosaic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Demosaic {
    type Err = BayerError;

    fn from_str(s: &str) -> BayerResult<Self> {
        let upper = s.to_uppercase();
        Demosaic::ALL
            .iter()
            .copied()
            .find(|alg| alg.name() == upper)
            .ok_or_else(|| BayerError::UnknownMethod(s.to_string()))
    }
}

impl TryFrom<u32> for Demosaic {
    type Error = BayerError;

    fn try_from(v: u32) -> BayerResult<Self> {
        Demosaic::ALL
            .get(v as usize)
            .copied()
            .ok_or_else(|| BayerError::UnknownMethod(v.to_string()))
    }
}

/// Demosaic `src` into `dst` using the given algorithm.
///
/// `dst` must have the dimensions given by [`Demosaic::output_size`].
pub fn run_demosaic<T: Sample>(
    src: &Raster<T>,
    cfa: CFA,
    alg: Demosaic,
    dst: &mut RasterMut<T>,
) -> BayerResult<()> {
    if src.w < 2 || src.h < 2 {
        return Err(BayerError::WrongResolution);
    }
    if (dst.w, dst.h) != alg.output_size(src.w, src.h) {
        return Err(BayerError::WrongResolution);
    }

    debug!(
        width = src.w,
        height = src.h,
        bits = src.bits,
        %cfa,
        method = %alg,
        "demosaicing"
    );

    match alg {
        Demosaic::NearestNeighbour => nearestneighbour::run(src, cfa, dst),
        Demosaic::Simple => simple::run(src, cfa, dst),
        Demosaic::Linear => linear::run(src, cfa, dst),
        Demosaic::HqLinear => hqlinear::run(src, cfa, dst),
        Demosaic::Downsample => downsample::run(src, cfa, dst),
        Demosaic::EdgeSense => edgesense::run(src, cfa, dst),
        Demosaic::Vng => vng::run(src, cfa, dst),
        Demosaic::Ahd => ahd::run(src, cfa, dst),
    }

    Ok(())
}

/// Clamp `v` to `[0, max]`.
#[inline]
fn clamp(v: i32, max: i32) -> i32 {
    v.max(0).min(max)
}

/// Call `f(y, row)` for each of the rows of `buf`, which holds rows of
/// `row_len` elements.  Rows are processed in parallel when the `rayon`
/// feature is enabled.
fn fill_rows<E, F>(buf: &mut [E], row_len: usize, f: F)
where
    E: Send,
    F: Fn(usize, &mut [E]) + Send + Sync,
{
    #[cfg(feature = "rayon")]
    buf.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));

    #[cfg(not(feature = "rayon"))]
    buf.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

/// Fill every pixel of `dst` with `f(x, y)`.
fn fill_pixels<T, F>(dst: &mut RasterMut<T>, f: F)
where
    T: Sample,
    F: Fn(usize, usize) -> [T; 3] + Send + Sync,
{
    let stride = dst.stride;
    fill_rows(dst.rows_mut(), stride, |y, row| {
        for (x, px) in row.chunks_exact_mut(3).enumerate() {
            px.copy_from_slice(&f(x, y));
        }
    });
}
