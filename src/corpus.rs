//! Test corpus generation.
//!
//! Each benchmark size gets one square, 8-bit grayscale binary PGM (`P5`).
//! Files are written once and reused on later sweeps, so repeated runs time
//! the codecs against byte-identical inputs.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};

/// Seed used for noise images unless one is given.
pub const DEFAULT_SEED: u64 = 0x5EED_2024;

/// Pixel content of generated images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Seeded pseudo-random bytes (hard to compress).
    Noise {
        /// RNG seed.
        seed: u64,
    },
    /// Diagonal ramp, `(x + y) % 256`.
    Gradient,
}

impl Default for Pattern {
    fn default() -> Self {
        Pattern::Noise { seed: DEFAULT_SEED }
    }
}

/// A corpus image ready for benchmarking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    /// Location of the PGM file.
    pub path: PathBuf,
    /// Side length in pixels.
    pub size: u32,
    /// True when an existing file was kept instead of written.
    pub reused: bool,
}

/// Canonical file name for a test image of the given size.
pub fn file_name(size: u32) -> String {
    format!("test_{size}x{size}.pgm")
}

/// Produce (or reuse) the test image for `size` inside `dir`.
///
/// An existing file at the canonical path is never rewritten. Its header and
/// length are checked so a stale or truncated file is not silently
/// benchmarked. New files are written to a `.tmp` sibling and renamed into
/// place.
pub fn generate(dir: &Path, size: u32, pattern: Pattern) -> Result<CorpusEntry> {
    if size == 0 {
        return Err(Error::Setup("image size must be positive".into()));
    }

    let path = dir.join(file_name(size));
    if path.exists() {
        check_existing(&path, size)?;
        tracing::info!("Using existing {size}×{size} test image");
        return Ok(CorpusEntry {
            path,
            size,
            reused: true,
        });
    }

    fs::create_dir_all(dir).map_err(|e| {
        Error::Setup(format!("cannot create corpus directory {}: {e}", dir.display()))
    })?;

    let pixels = render_pixels(size, pattern);
    let partial = path.with_extension("pgm.tmp");
    write_pgm(&partial, size, &pixels)
        .and_then(|()| fs::rename(&partial, &path))
        .map_err(|e| {
            let _ = fs::remove_file(&partial);
            Error::Setup(format!("cannot write test image {}: {e}", path.display()))
        })?;
    tracing::info!("Generated {size}×{size} test image");

    Ok(CorpusEntry {
        path,
        size,
        reused: false,
    })
}

/// Reject an existing image of the wrong size or length.
fn check_existing(path: &Path, size: u32) -> Result<()> {
    let unreadable = |e: io::Error| {
        Error::Setup(format!(
            "existing test image {} is unreadable: {e}",
            path.display()
        ))
    };
    let header = read_header(path).map_err(unreadable)?;
    if header.width != size || header.height != size {
        return Err(Error::Setup(format!(
            "existing test image {} is {}x{}, expected {size}x{size}",
            path.display(),
            header.width,
            header.height
        )));
    }

    let actual = fs::metadata(path).map_err(unreadable)?.len();
    let expected = header.data_offset + u64::from(size) * u64::from(size);
    if actual != expected {
        return Err(Error::Setup(format!(
            "existing test image {} is {actual} bytes, expected {expected}; delete it to regenerate",
            path.display()
        )));
    }
    Ok(())
}

/// Generate the pixel buffer for a `size`×`size` image.
pub fn render_pixels(size: u32, pattern: Pattern) -> Vec<u8> {
    let len = size as usize * size as usize;
    match pattern {
        Pattern::Noise { seed } => {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut pixels = vec![0u8; len];
            rng.fill(&mut pixels[..]);
            pixels
        }
        Pattern::Gradient => {
            let mut pixels = Vec::with_capacity(len);
            for y in 0..size {
                for x in 0..size {
                    pixels.push(((x + y) % 256) as u8);
                }
            }
            pixels
        }
    }
}

fn write_pgm(path: &Path, size: u32, pixels: &[u8]) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    write!(file, "P5\n{size} {size}\n255\n")?;
    file.write_all(pixels)?;
    file.flush()
}

/// Parsed binary PGM header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PgmHeader {
    pub width: u32,
    pub height: u32,
    /// Byte offset of the first sample.
    pub data_offset: u64,
}

/// Read width and height from a binary PGM header.
pub fn read_dimensions(path: &Path) -> io::Result<(u32, u32)> {
    read_header(path).map(|h| (h.width, h.height))
}

/// Parse the header of a binary 8-bit PGM.
pub fn read_header(path: &Path) -> io::Result<PgmHeader> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut token = String::new();
    let mut offset = 0u64;

    offset += read_token(&mut reader, &mut token)?;
    if token != "P5" {
        return Err(invalid(format!("expected P5 magic, found '{token}'")));
    }

    offset += read_token(&mut reader, &mut token)?;
    let width = parse_header_field(&token, "width")?;
    offset += read_token(&mut reader, &mut token)?;
    let height = parse_header_field(&token, "height")?;
    offset += read_token(&mut reader, &mut token)?;
    let max_val = parse_header_field(&token, "max value")?;
    if max_val != 255 {
        return Err(invalid(format!(
            "unsupported max value {max_val}, only 8-bit samples are generated"
        )));
    }

    Ok(PgmHeader {
        width,
        height,
        data_offset: offset,
    })
}

fn parse_header_field(token: &str, field: &str) -> io::Result<u32> {
    token
        .parse()
        .map_err(|_| invalid(format!("bad {field} '{token}' in PGM header")))
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

/// Read the next whitespace-delimited token, skipping `#` comments.
///
/// Returns the number of bytes consumed, including the single delimiter
/// that ends the token.
fn read_token<R: BufRead>(reader: &mut R, token: &mut String) -> io::Result<u64> {
    token.clear();
    let mut in_comment = false;
    let mut consumed = 0u64;

    loop {
        let mut byte = [0u8; 1];
        if reader.read(&mut byte)? == 0 {
            break;
        }
        consumed += 1;
        let ch = byte[0] as char;

        if in_comment {
            if ch == '\n' {
                in_comment = false;
            }
            continue;
        }
        if ch == '#' {
            in_comment = true;
            continue;
        }
        if ch.is_ascii_whitespace() {
            if !token.is_empty() {
                break;
            }
            continue;
        }
        token.push(ch);
    }

    Ok(consumed)
}
