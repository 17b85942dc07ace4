//! End-to-end runs of the `bayer2rgb` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn bayer2rgb(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bayer2rgb"))
        .args(args)
        .env_remove("BAYER2RGB_FIRST")
        .env_remove("BAYER2RGB_METHOD")
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

fn write_mosaic(path: &Path, len: usize) {
    let data: Vec<u8> = (0..len).map(|i| (i * 13 % 251) as u8).collect();
    fs::write(path, data).unwrap();
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn test_convert_8bit() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.raw");
    let output = dir.path().join("out.rgb");
    write_mosaic(&input, 8 * 6);

    let out = bayer2rgb(&[
        "-i", input.to_str().unwrap(),
        "-o", output.to_str().unwrap(),
        "-w", "8", "-v", "6", "-b", "8",
        "-f", "GBRG", "-m", "VNG",
    ]);
    assert_eq!(out.status.code(), Some(0), "{}", stdout(&out));
    assert!(!stdout(&out).contains("WARNING"));
    assert_eq!(fs::metadata(&output).unwrap().len(), 8 * 6 * 3);
}

#[test]
fn test_convert_16bit_downsample() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.raw");
    let output = dir.path().join("out.rgb");
    write_mosaic(&input, 2 * 8 * 6);

    let out = bayer2rgb(&[
        "--input", input.to_str().unwrap(),
        "--output", output.to_str().unwrap(),
        "--width", "8", "--height", "6", "--bpp", "16",
        "--method", "DOWNSAMPLE", "--endian", "big",
    ]);
    assert_eq!(out.status.code(), Some(0), "{}", stdout(&out));
    assert_eq!(fs::metadata(&output).unwrap().len(), 2 * 8 * 6 * 3 / 4);
}

#[test]
fn test_unrecognized_names_fall_back() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.raw");
    let output = dir.path().join("out.rgb");
    write_mosaic(&input, 4 * 4);

    let out = bayer2rgb(&[
        "-i", input.to_str().unwrap(),
        "-o", output.to_str().unwrap(),
        "-w", "4", "-v", "4", "-b", "8",
        "-f", "RGBX", "-m", "CUBIC",
    ]);
    assert_eq!(out.status.code(), Some(0));

    let text = stdout(&out);
    assert!(text.contains("WARNING: Unrecognized first color \"RGBX\", defaulting to RGGB"));
    assert!(text.contains("WARNING: Unrecognized method \"CUBIC\", defaulting to BILINEAR"));
    assert_eq!(fs::metadata(&output).unwrap().len(), 4 * 4 * 3);
}

#[test]
fn test_method_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.raw");
    let output = dir.path().join("out.rgb");
    write_mosaic(&input, 4 * 4);

    let out = Command::new(env!("CARGO_BIN_EXE_bayer2rgb"))
        .args([
            "-i", input.to_str().unwrap(),
            "-o", output.to_str().unwrap(),
            "-w", "4", "-v", "4", "-b", "8",
        ])
        .env_remove("BAYER2RGB_FIRST")
        .env("BAYER2RGB_METHOD", "downsample")
        .env("RUST_LOG", "off")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(fs::metadata(&output).unwrap().len(), 2 * 2 * 3);
}

#[test]
fn test_missing_parameter() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.raw");
    let output = dir.path().join("out.rgb");
    write_mosaic(&input, 16);

    let out = bayer2rgb(&[
        "-i", input.to_str().unwrap(),
        "-o", output.to_str().unwrap(),
        "-v", "4", "-b", "8",
    ]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("Bad parameter: width"));
    assert!(!output.exists());

    let out = bayer2rgb(&[
        "-i", input.to_str().unwrap(),
        "-o", output.to_str().unwrap(),
        "-w", "0", "-v", "4", "-b", "8",
    ]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.raw");
    let output = dir.path().join("out.rgb");

    let out = bayer2rgb(&[
        "-i", input.to_str().unwrap(),
        "-o", output.to_str().unwrap(),
        "-w", "4", "-v", "4", "-b", "8",
    ]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("Problem opening input"));
}

#[test]
fn test_bad_arguments() {
    assert_eq!(bayer2rgb(&["--bogus"]).status.code(), Some(1));
    assert_eq!(bayer2rgb(&["-w", "wide"]).status.code(), Some(1));
    assert_eq!(bayer2rgb(&["--help"]).status.code(), Some(0));
}
