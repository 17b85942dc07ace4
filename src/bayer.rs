//! Bayer image definitions.

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use crate::{BayerError, BayerResult};

/// The 2x2 colour filter array (CFA) pattern.
///
/// The sequence of R, G, B describe the colours of the top-left,
/// top-right, bottom-left, and bottom-right pixels in the 2x2 block,
/// in that order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CFA {
    RGGB,
    GBRG,
    GRBG,
    BGGR,
}

/// A primitive colour, doubling as the channel index in an RGB triple.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    Red = 0,
    Green = 1,
    Blue = 2,
}

/// The four parity classes of a Bayer mosaic.
///
/// The two green sites are told apart by the colour that shares their
/// row: `GreenR` sits on a row of red samples, `GreenB` on a row of blue
/// samples.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Site {
    Red,
    GreenR,
    GreenB,
    Blue,
}

/// The depth and endianness of the raw image.
///
/// Note that many cameras only capture 12-bits per pixel, but still
/// store the data as 16-bits per pixel.  These are read as 16-bit
/// samples; the number of significant bits is passed separately.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BayerDepth {
    Depth8,
    Depth16BE,
    Depth16LE,
}

const AXIS: [(isize, isize); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];
const DIAGONAL: [(isize, isize); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
const HORIZONTAL: [(isize, isize); 2] = [(-1, 0), (1, 0)];
const VERTICAL: [(isize, isize); 2] = [(0, -1), (0, 1)];
const SELF: [(isize, isize); 1] = [(0, 0)];

impl CFA {
    pub const ALL: [CFA; 4] = [CFA::RGGB, CFA::GBRG, CFA::GRBG, CFA::BGGR];

    /// The 2x2 pixel block obtained when moving right 1 column.
    pub fn next_x(self) -> Self {
        match self {
            CFA::BGGR => CFA::GBRG,
            CFA::GBRG => CFA::BGGR,
            CFA::GRBG => CFA::RGGB,
            CFA::RGGB => CFA::GRBG,
        }
    }

    /// The 2x2 pixel block obtained when moving down 1 row.
    pub fn next_y(self) -> Self {
        match self {
            CFA::BGGR => CFA::GRBG,
            CFA::GBRG => CFA::RGGB,
            CFA::GRBG => CFA::BGGR,
            CFA::RGGB => CFA::GBRG,
        }
    }

    /// The parity class of the top-left pixel of the pattern.
    fn origin(self) -> Site {
        match self {
            CFA::RGGB => Site::Red,
            CFA::GRBG => Site::GreenR,
            CFA::GBRG => Site::GreenB,
            CFA::BGGR => Site::Blue,
        }
    }

    /// The parity class at (x, y).
    #[inline]
    pub fn site_at(self, x: usize, y: usize) -> Site {
        let mut cfa = self;
        if x % 2 == 1 {
            cfa = cfa.next_x();
        }
        if y % 2 == 1 {
            cfa = cfa.next_y();
        }
        cfa.origin()
    }

    /// The colour sampled at (x, y).
    #[inline]
    pub fn color_at(self, x: usize, y: usize) -> Color {
        self.site_at(x, y).color()
    }

    /// The colour at (x + dx, y + dy), which may lie outside the image.
    #[inline]
    pub fn color_near(self, x: usize, y: usize, dx: isize, dy: isize) -> Color {
        let px = (x as isize + dx).rem_euclid(2) as usize;
        let py = (y as isize + dy).rem_euclid(2) as usize;
        self.color_at(px, py)
    }
}

impl Color {
    pub const ALL: [Color; 3] = [Color::Red, Color::Green, Color::Blue];
}

impl Site {
    /// The colour physically sampled at this site.
    #[inline]
    pub fn color(self) -> Color {
        match self {
            Site::Red => Color::Red,
            Site::GreenR | Site::GreenB => Color::Green,
            Site::Blue => Color::Blue,
        }
    }

    /// Offsets of the nearest samples of colour `c`.
    ///
    /// The first offset is the neighbour with the lower coordinate.
    pub fn neighbours(self, c: Color) -> &'static [(isize, isize)] {
        match (self, c) {
            (Site::Red, Color::Red)
            | (Site::Blue, Color::Blue)
            | (Site::GreenR, Color::Green)
            | (Site::GreenB, Color::Green) => &SELF,
            (Site::Red, Color::Green) | (Site::Blue, Color::Green) => &AXIS,
            (Site::Red, Color::Blue) | (Site::Blue, Color::Red) => &DIAGONAL,
            (Site::GreenR, Color::Red) | (Site::GreenB, Color::Blue) => &HORIZONTAL,
            (Site::GreenR, Color::Blue) | (Site::GreenB, Color::Red) => &VERTICAL,
        }
    }
}

impl FromStr for CFA {
    type Err = BayerError;

    fn from_str(s: &str) -> BayerResult<Self> {
        match s.to_uppercase().as_str() {
            "RGGB" => Ok(CFA::RGGB),
            "GBRG" => Ok(CFA::GBRG),
            "GRBG" => Ok(CFA::GRBG),
            "BGGR" => Ok(CFA::BGGR),
            _ => Err(BayerError::UnknownCfa(s.to_string())),
        }
    }
}

impl fmt::Display for CFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CFA::RGGB => "RGGB",
            CFA::GBRG => "GBRG",
            CFA::GRBG => "GRBG",
            CFA::BGGR => "BGGR",
        };
        f.write_str(s)
    }
}

impl TryFrom<u32> for CFA {
    type Error = BayerError;

    fn try_from(v: u32) -> BayerResult<Self> {
        CFA::ALL
            .get(v as usize)
            .copied()
            .ok_or_else(|| BayerError::UnknownCfa(v.to_string()))
    }
}

impl BayerDepth {
    /// Pick the sample container for `bpp` significant bits.
    ///
    /// Only 8-bit data is stored one byte per sample; every other depth
    /// up to 16 bits is stored in two bytes.
    pub fn from_bpp(bpp: u32, big_endian: bool) -> BayerResult<Self> {
        match bpp {
            8 => Ok(BayerDepth::Depth8),
            1..=16 if big_endian => Ok(BayerDepth::Depth16BE),
            1..=16 => Ok(BayerDepth::Depth16LE),
            _ => Err(BayerError::WrongDepth),
        }
    }

    /// Number of bytes used by one sample.
    pub fn bytes_per_sample(self) -> usize {
        match self {
            BayerDepth::Depth8 => 1,
            BayerDepth::Depth16BE | BayerDepth::Depth16LE => 2,
        }
    }
}

/// Read the exact number of bytes required to fill buf.
/// For u8 source data.
pub fn read_exact_u8(r: &mut dyn Read, buf: &mut [u8]) -> BayerResult<()> {
    r.read_exact(buf)?;
    Ok(())
}

/// Read the exact number of bytes required to fill buf.
/// For u16 big-endian source data.
pub fn read_exact_u16be(r: &mut dyn Read, buf: &mut [u16]) -> BayerResult<()> {
    r.read_u16_into::<BigEndian>(buf)?;
    Ok(())
}

/// Read the exact number of bytes required to fill buf.
/// For u16 little-endian source data.
pub fn read_exact_u16le(r: &mut dyn Read, buf: &mut [u16]) -> BayerResult<()> {
    r.read_u16_into::<LittleEndian>(buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_color_at() {
        let expected = [
            (CFA::RGGB, [Color::Red, Color::Green, Color::Green, Color::Blue]),
            (CFA::GBRG, [Color::Green, Color::Blue, Color::Red, Color::Green]),
            (CFA::GRBG, [Color::Green, Color::Red, Color::Blue, Color::Green]),
            (CFA::BGGR, [Color::Blue, Color::Green, Color::Green, Color::Red]),
        ];

        for (cfa, colors) in expected.iter() {
            for y in 0..4 {
                for x in 0..4 {
                    let c = colors[(y % 2) * 2 + x % 2];
                    assert_eq!(cfa.color_at(x, y), c, "{} at ({}, {})", cfa, x, y);
                }
            }
        }
    }

    #[test]
    fn test_green_sites() {
        for cfa in CFA::ALL.iter() {
            for y in 0..2 {
                for x in 0..2 {
                    match cfa.site_at(x, y) {
                        Site::GreenR => assert_eq!(cfa.color_at(x ^ 1, y), Color::Red),
                        Site::GreenB => assert_eq!(cfa.color_at(x ^ 1, y), Color::Blue),
                        _ => (),
                    }
                }
            }
        }
    }

    #[test]
    fn test_neighbours_have_requested_colour() {
        for cfa in CFA::ALL.iter() {
            let (x, y) = (2usize, 2usize);
            let site = cfa.site_at(x, y);
            for &c in [Color::Red, Color::Green, Color::Blue].iter() {
                for &(dx, dy) in site.neighbours(c) {
                    let nx = (x as isize + dx) as usize;
                    let ny = (y as isize + dy) as usize;
                    assert_eq!(cfa.color_at(nx, ny), c);
                }
            }
        }
    }

    #[test]
    fn test_parse_cfa() {
        assert_eq!("RGGB".parse::<CFA>().ok(), Some(CFA::RGGB));
        assert_eq!("bggr".parse::<CFA>().ok(), Some(CFA::BGGR));
        assert!(matches!("RGBG".parse::<CFA>(), Err(BayerError::UnknownCfa(_))));
        assert_eq!(CFA::try_from(2).ok(), Some(CFA::GRBG));
        assert!(CFA::try_from(4).is_err());
    }

    #[test]
    fn test_depth_from_bpp() {
        assert_eq!(BayerDepth::from_bpp(8, true).ok(), Some(BayerDepth::Depth8));
        assert_eq!(BayerDepth::from_bpp(7, false).ok(), Some(BayerDepth::Depth16LE));
        assert_eq!(BayerDepth::from_bpp(1, true).ok(), Some(BayerDepth::Depth16BE));
        assert_eq!(BayerDepth::from_bpp(12, false).ok(), Some(BayerDepth::Depth16LE));
        assert_eq!(BayerDepth::from_bpp(16, true).ok(), Some(BayerDepth::Depth16BE));
        assert!(matches!(BayerDepth::from_bpp(0, false), Err(BayerError::WrongDepth)));
        assert!(matches!(BayerDepth::from_bpp(17, false), Err(BayerError::WrongDepth)));
    }

    #[test]
    fn test_read_exact_u16() {
        let src = [0x01, 0x02, 0x03, 0x04];
        let mut buf = [0u16; 2];

        read_exact_u16le(&mut Cursor::new(&src[..]), &mut buf).unwrap();
        assert_eq!(buf, [0x0201, 0x0403]);

        read_exact_u16be(&mut Cursor::new(&src[..]), &mut buf).unwrap();
        assert_eq!(buf, [0x0102, 0x0304]);

        assert!(read_exact_u16le(&mut Cursor::new(&src[..3]), &mut buf).is_err());
    }
}
