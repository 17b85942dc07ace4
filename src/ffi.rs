//! Foreign function interface.
//!
//! `first` indexes `CFA::ALL` (RGGB, GBRG, GRBG, BGGR) and `method`
//! indexes `Demosaic::ALL` (nearest, simple, bilinear, hqlinear,
//! downsample, edgesense, vng, ahd).  Both functions return 0 on
//! success and -1 on error.

use std::slice;

use libc::{c_int, c_uchar, c_uint, c_ushort, size_t};
use tracing::warn;

use crate::{decode_u16, decode_u8, BayerResult, Demosaic, CFA};

// Log with "file:line - " prefix, for more informative error messages.
macro_rules! warnln {
    ($e:expr) => {
        warn!("{}:{} - {}", file!(), line!(), $e);
    };
}

fn status(res: BayerResult<()>) -> c_int {
    match res {
        Ok(()) => 0,
        Err(e) => {
            warnln!(e);
            -1
        }
    }
}

fn lengths(w: size_t, h: size_t, method: Demosaic) -> Option<(usize, usize)> {
    let (ow, oh) = method.output_size(w, h);
    let src_len = w.checked_mul(h)?;
    let dst_len = ow.checked_mul(oh)?.checked_mul(3)?;
    Some((src_len, dst_len))
}

/// Demosaic an 8-bit mosaic.
///
/// # Safety
///
/// `src` must point to `w * h` samples and `dst` to room for the RGB
/// output of `method`: `3 * w * h` samples, or `3 * (w / 2) * (h / 2)`
/// for downsampling.
#[no_mangle]
pub unsafe extern "C" fn bayer2rgb_decode_8bit(
        src: *const c_uchar, dst: *mut c_uchar, w: size_t, h: size_t,
        first: c_uint, method: c_uint)
        -> c_int {
    if src.is_null() || dst.is_null() {
        warnln!("bad input parameters");
        return -1;
    }
    let (cfa, alg) = match (CFA::try_from(first), Demosaic::try_from(method)) {
        (Ok(cfa), Ok(alg)) => (cfa, alg),
        _ => {
            warnln!("bad input parameters");
            return -1;
        }
    };
    let (src_len, dst_len) = match lengths(w, h, alg) {
        Some(lens) => lens,
        None => {
            warnln!("image dimensions overflow");
            return -1;
        }
    };

    let src = slice::from_raw_parts(src, src_len);
    let dst = slice::from_raw_parts_mut(dst, dst_len);
    status(decode_u8(src, dst, w, h, cfa, alg))
}

/// Demosaic a 16-bit mosaic whose samples use the low `bits` bits.
///
/// # Safety
///
/// As for [`bayer2rgb_decode_8bit`], counted in 16-bit samples.
#[no_mangle]
pub unsafe extern "C" fn bayer2rgb_decode_16bit(
        src: *const c_ushort, dst: *mut c_ushort, w: size_t, h: size_t,
        first: c_uint, method: c_uint, bits: c_uint)
        -> c_int {
    if src.is_null() || dst.is_null() {
        warnln!("bad input parameters");
        return -1;
    }
    let (cfa, alg) = match (CFA::try_from(first), Demosaic::try_from(method)) {
        (Ok(cfa), Ok(alg)) => (cfa, alg),
        _ => {
            warnln!("bad input parameters");
            return -1;
        }
    };
    let (src_len, dst_len) = match lengths(w, h, alg) {
        Some(lens) => lens,
        None => {
            warnln!("image dimensions overflow");
            return -1;
        }
    };

    let src = slice::from_raw_parts(src, src_len);
    let dst = slice::from_raw_parts_mut(dst, dst_len);
    status(decode_u16(src, dst, w, h, cfa, alg, bits))
}
