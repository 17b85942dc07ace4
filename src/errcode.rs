//! Bayer error codes.

use quick_error::quick_error;
use std::io;
use std::path::PathBuf;

pub type BayerResult<T> = Result<T, BayerError>;

quick_error! {
    #[derive(Debug)]
    pub enum BayerError {
        WrongResolution {
            display("Wrong resolution")
        }
        WrongDepth {
            display("Wrong depth")
        }
        BufferTooSmall(expected: usize, got: usize) {
            display("Buffer too small: expected {} samples, got {}", expected, got)
        }

        UnknownCfa(name: String) {
            display("Unrecognized first color \"{}\"", name)
        }
        UnknownMethod(name: String) {
            display("Unrecognized method \"{}\"", name)
        }
        BadParameter(name: &'static str) {
            display("Bad parameter: {}", name)
        }

        Open(what: &'static str, path: PathBuf, err: io::Error) {
            source(err)
            display("Problem opening {}: {}: {}", what, path.display(), err)
        }
        Io(err: io::Error) {
            from()
            source(err)
            display("IO error: {}", err)
        }
    }
}
