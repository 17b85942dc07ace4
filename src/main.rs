//! Convert a raw Bayer mosaic file into an interleaved RGB file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use tracing::error;

use bayer2rgb::driver::{self, Config};
use bayer2rgb::{logger, BayerError, BayerResult};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
enum Endian {
    #[default]
    Little,
    Big,
}

/// Demosaic a raw Bayer image.
#[derive(Parser, Debug)]
#[command(name = "bayer2rgb", about)]
struct Args {
    /// Input file.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Image width (pixels).
    #[arg(short, long)]
    width: Option<usize>,

    /// Image height (pixels).
    #[arg(short = 'v', long)]
    height: Option<usize>,

    /// Bits per pixel.
    #[arg(short, long)]
    bpp: Option<u32>,

    /// First pixel color: RGGB, GBRG, GRBG, BGGR.
    #[arg(short, long, env = "BAYER2RGB_FIRST")]
    first: Option<String>,

    /// Interpolation method: NEAREST, SIMPLE, BILINEAR, HQLINEAR,
    /// DOWNSAMPLE, EDGESENSE, VNG, AHD.
    #[arg(short, long, env = "BAYER2RGB_METHOD")]
    method: Option<String>,

    /// Byte order of 16-bit samples.
    #[arg(short, long, value_enum, default_value_t = Endian::Little)]
    endian: Endian,
}

impl Args {
    fn into_config(self) -> BayerResult<Config> {
        let input = self.input.ok_or(BayerError::BadParameter("input"))?;
        let output = self.output.ok_or(BayerError::BadParameter("output"))?;
        let width = self.width.filter(|&w| w > 0).ok_or(BayerError::BadParameter("width"))?;
        let height = self.height.filter(|&h| h > 0).ok_or(BayerError::BadParameter("height"))?;
        let bpp = self.bpp.filter(|&b| b > 0).ok_or(BayerError::BadParameter("bpp"))?;

        let mut cfa = bayer2rgb::CFA::RGGB;
        if let Some(first) = self.first.as_deref() {
            let parsed = driver::parse_cfa(first);
            if let Some(msg) = parsed.warning("first color") {
                println!("{}", msg);
            }
            cfa = parsed.value();
        }

        let mut method = bayer2rgb::Demosaic::Linear;
        if let Some(m) = self.method.as_deref() {
            let parsed = driver::parse_method(m);
            if let Some(msg) = parsed.warning("method") {
                println!("{}", msg);
            }
            method = parsed.value();
        }

        Ok(Config {
            input,
            output,
            width,
            height,
            bpp,
            cfa,
            method,
            big_endian: self.endian == Endian::Big,
        })
    }
}

fn main() -> ExitCode {
    logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if let Err(err) = e.print() {
                error!(error = %err, "failed to print usage");
            }
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            println!("{}", e);
            println!("{}", <Args as clap::CommandFactory>::command().render_usage());
            return ExitCode::FAILURE;
        }
    };

    match driver::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "conversion failed");
            println!("{}", e);
            ExitCode::FAILURE
        }
    }
}
