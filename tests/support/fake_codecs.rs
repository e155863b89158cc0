//! Shell-script stand-ins for the external codecs.
//!
//! Each script understands just enough of the real tool's command line to
//! write its output file where the harness expects it.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Bytes written by the fake reference encoder.
pub const ENCODED_STREAM: &str = "FAKE-J2K-CODESTREAM";

/// How the fake candidate behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateBehavior {
    /// Combined run succeeds and reports decode timings.
    Healthy,
    /// Combined run exits 1; encode-only succeeds.
    DecoderBroken,
    /// Every run exits 1.
    Broken,
    /// Exits 0 but writes invalid JSON.
    Garbage,
    /// Exits 0 without writing a document.
    Silent,
    /// Exits 1 for the input image of this size; healthy otherwise.
    FailsAt(u32),
}

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

const PARSE_ARGS: &str = r#"out=""
input=""
encode_only=0
while [ $# -gt 0 ]; do
  case "$1" in
    -i) input="$2"; shift 2 ;;
    -o) out="$2"; shift 2 ;;
    --encode-only) encode_only=1; shift ;;
    *) shift ;;
  esac
done
[ -n "$out" ] || exit 2
"#;

/// Reference encoder: writes [`ENCODED_STREAM`] to `-o`.
pub fn reference_encoder(dir: &Path) -> PathBuf {
    write_script(
        dir,
        "fake_compress",
        &format!("{PARSE_ARGS}printf '%s' '{ENCODED_STREAM}' > \"$out\"\n"),
    )
}

/// Reference decoder: writes a tiny PGM to `-o`.
pub fn reference_decoder(dir: &Path) -> PathBuf {
    write_script(
        dir,
        "fake_decompress",
        &format!("{PARSE_ARGS}printf 'P5\\n1 1\\n255\\n\\000' > \"$out\"\n"),
    )
}

/// A codec command that always fails.
pub fn failing_tool(dir: &Path, name: &str) -> PathBuf {
    write_script(dir, name, "exit 1\n")
}

/// Candidate tool reporting `width` and fixed timings (ms): encode
/// `[10, 20, 30]`, decode `[5, 5, 5]`, compressed size 4096.
pub fn candidate(dir: &Path, width: u32, behavior: CandidateBehavior) -> PathBuf {
    let full = format!(
        r#"{{"image": {{"width": {width}, "height": {width}}},
 "encode": {{"runs": [10.0, 20.0, 30.0], "average_ms": 20.0, "throughput_mpps": 1.0, "compressed_size": 4096}},
 "decode": {{"runs": [5.0, 5.0, 5.0]}}}}"#
    );
    let encode_only = format!(
        r#"{{"image": {{"width": {width}}},
 "encode": {{"runs": [10.0, 20.0, 30.0], "compressed_size": 4096}}}}"#
    );

    let gate = match behavior {
        CandidateBehavior::Healthy | CandidateBehavior::Garbage => String::new(),
        CandidateBehavior::DecoderBroken => "[ \"$encode_only\" = 1 ] || exit 1\n".into(),
        CandidateBehavior::Broken => "exit 1\n".into(),
        CandidateBehavior::Silent => "exit 0\n".into(),
        CandidateBehavior::FailsAt(size) => {
            format!("case \"$input\" in *test_{size}x{size}.pgm) exit 1 ;; esac\n")
        }
    };
    let emit = if behavior == CandidateBehavior::Garbage {
        "printf '%s' '{\"image\": ' > \"$out\"\n".to_string()
    } else {
        format!(
            "if [ \"$encode_only\" = 1 ]; then\ncat > \"$out\" <<'JSON'\n{encode_only}\nJSON\nelse\ncat > \"$out\" <<'JSON'\n{full}\nJSON\nfi\n"
        )
    };

    write_script(dir, "fake_j2k", &format!("{PARSE_ARGS}{gate}{emit}"))
}
