//! This crate provides routines for demosaicing Bayer raw images.
//!
//! The engine works on borrowed sample buffers: a single-channel mosaic
//! goes in, an interleaved RGB image comes out, using one of eight
//! interpolation methods.  The `bayer2rgb` binary wraps it for raw files
//! on disk.

pub use bayer::{BayerDepth, Color, Site, CFA};
pub use demosaic::{run_demosaic, Demosaic};
pub use errcode::{BayerError, BayerResult};
pub use raster::{Raster, RasterMut, Sample};

pub mod demosaic;
pub mod driver;
pub mod ffi;
pub mod logger;

mod bayer;
mod border_replicate;
mod errcode;
mod lab;
mod raster;

/// Demosaic an 8-bit mosaic of `w` x `h` samples into `dst`.
///
/// `dst` must hold at least [`Demosaic::output_len`] samples.
///
/// # Examples
///
/// ```
/// use bayer2rgb::{decode_u8, Demosaic, CFA};
///
/// let src = [0u8; 16 * 8];
/// let mut dst = vec![0u8; Demosaic::Downsample.output_len(16, 8)];
/// decode_u8(&src, &mut dst, 16, 8, CFA::RGGB, Demosaic::Downsample).unwrap();
/// ```
pub fn decode_u8(
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    cfa: CFA,
    alg: Demosaic,
) -> BayerResult<()> {
    decode(src, dst, w, h, 8, cfa, alg)
}

/// Demosaic a 16-bit mosaic whose samples use the low `bits` bits.
pub fn decode_u16(
    src: &[u16],
    dst: &mut [u16],
    w: usize,
    h: usize,
    cfa: CFA,
    alg: Demosaic,
    bits: u32,
) -> BayerResult<()> {
    decode(src, dst, w, h, bits, cfa, alg)
}

fn decode<T: Sample>(
    src: &[T],
    dst: &mut [T],
    w: usize,
    h: usize,
    bits: u32,
    cfa: CFA,
    alg: Demosaic,
) -> BayerResult<()> {
    let src = Raster::with_bits(w, h, bits, src)?;
    let (ow, oh) = alg.output_size(w, h);
    let mut dst = RasterMut::new(ow, oh, dst)?;
    run_demosaic(&src, cfa, alg, &mut dst)
}
