//! Raw file conversion: read a mosaic from disk, demosaic it, write the
//! RGB result.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use tracing::{debug, info};

use crate::bayer::{read_exact_u16be, read_exact_u16le, read_exact_u8};
use crate::{run_demosaic, BayerDepth, BayerError, BayerResult, Demosaic, Raster, RasterMut, Sample, CFA};

/// Validated conversion parameters.
#[derive(Clone, Debug)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: usize,
    pub height: usize,
    /// Significant bits per sample.  8-bit data is stored one byte per
    /// sample, any other depth in two bytes.
    pub bpp: u32,
    pub cfa: CFA,
    pub method: Demosaic,
    /// Byte order of 16-bit samples, in both files.
    pub big_endian: bool,
}

/// Outcome of parsing a user-supplied name that has a default.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Parsed<T> {
    Known(T),
    /// The name was not recognized and `used` was substituted.
    Fallback { given: String, used: T },
}

impl<T: Copy + fmt::Display> Parsed<T> {
    pub fn value(&self) -> T {
        match *self {
            Parsed::Known(v) => v,
            Parsed::Fallback { used, .. } => used,
        }
    }

    /// The message to show for a substituted value, if any.  `what`
    /// names the parameter, e.g. "method".
    pub fn warning(&self, what: &str) -> Option<String> {
        match self {
            Parsed::Known(_) => None,
            Parsed::Fallback { given, used } => Some(format!(
                "WARNING: Unrecognized {} \"{}\", defaulting to {}",
                what, given, used
            )),
        }
    }
}

/// Parse a CFA name, falling back to RGGB.
pub fn parse_cfa(s: &str) -> Parsed<CFA> {
    match s.parse() {
        Ok(cfa) => Parsed::Known(cfa),
        Err(_) => Parsed::Fallback {
            given: s.to_string(),
            used: CFA::RGGB,
        },
    }
}

/// Parse a method name, falling back to bilinear interpolation.
pub fn parse_method(s: &str) -> Parsed<Demosaic> {
    match s.parse() {
        Ok(alg) => Parsed::Known(alg),
        Err(_) => Parsed::Fallback {
            given: s.to_string(),
            used: Demosaic::Linear,
        },
    }
}

/// Size in bytes of the RGB file produced from a `w` x `h` mosaic.
pub fn output_len(w: usize, h: usize, bpp: u32, alg: Demosaic) -> BayerResult<usize> {
    let depth = BayerDepth::from_bpp(bpp, false)?;
    let (ow, oh) = alg.output_size(w, h);
    ow.checked_mul(oh)
        .and_then(|n| n.checked_mul(3 * depth.bytes_per_sample()))
        .ok_or(BayerError::WrongResolution)
}

/// Convert `config.input` into `config.output`.
///
/// The output file is created or truncated and sized before the input
/// is checked, and synced to disk once written.
pub fn run(config: &Config) -> BayerResult<()> {
    let depth = BayerDepth::from_bpp(config.bpp, config.big_endian)?;
    let bytes = depth.bytes_per_sample();
    let in_len = config
        .width
        .checked_mul(config.height)
        .and_then(|n| n.checked_mul(bytes))
        .ok_or(BayerError::WrongResolution)?;
    let out_len = output_len(config.width, config.height, config.bpp, config.method)?;

    let input = File::open(&config.input)
        .map_err(|e| BayerError::Open("input", config.input.clone(), e))?;
    let output = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&config.output)
        .map_err(|e| BayerError::Open("output", config.output.clone(), e))?;
    output.set_len(out_len as u64)?;

    let in_size = input.metadata()?.len();
    info!(
        input = %config.input.display(),
        in_size,
        output = %config.output.display(),
        out_size = out_len,
        width = config.width,
        height = config.height,
        bpp = config.bpp,
        cfa = %config.cfa,
        method = %config.method,
        "converting"
    );
    if in_size < in_len as u64 {
        return Err(BayerError::BufferTooSmall(in_len, in_size as usize));
    }

    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);
    let n = config.width * config.height;

    match depth {
        BayerDepth::Depth8 => {
            let mut src = vec![0u8; n];
            read_exact_u8(&mut reader, &mut src)?;
            let dst = demosaic(&src, config)?;
            writer.write_all(&dst)?;
        }
        BayerDepth::Depth16BE => {
            let mut src = vec![0u16; n];
            read_exact_u16be(&mut reader, &mut src)?;
            for v in demosaic(&src, config)? {
                writer.write_u16::<BigEndian>(v)?;
            }
        }
        BayerDepth::Depth16LE => {
            let mut src = vec![0u16; n];
            read_exact_u16le(&mut reader, &mut src)?;
            for v in demosaic(&src, config)? {
                writer.write_u16::<LittleEndian>(v)?;
            }
        }
    }

    let output = writer.into_inner().map_err(|e| e.into_error())?;
    output.sync_all()?;
    debug!(output = %config.output.display(), "synced");
    Ok(())
}

fn demosaic<T: Sample>(src: &[T], config: &Config) -> BayerResult<Vec<T>> {
    let raster = Raster::with_bits(config.width, config.height, config.bpp, src)?;
    let (ow, oh) = config.method.output_size(config.width, config.height);
    let mut buf = vec![T::default(); config.method.output_len(config.width, config.height)];
    run_demosaic(&raster, config.cfa, config.method, &mut RasterMut::new(ow, oh, &mut buf)?)?;
    Ok(buf)
}
