//! Runner adapters driven against shell-script codecs.

#![cfg(unix)]

mod support;

use pixbench::corpus::{self, Pattern};
use pixbench::error::Error;
use pixbench::result::{Implementation, Operation};
use pixbench::runner::{CandidateMode, CandidateRunner, ReferenceRunner, Runner};
use support::fake_codecs::{self, CandidateBehavior, ENCODED_STREAM};
use tempfile::TempDir;

fn input(dir: &TempDir, size: u32) -> std::path::PathBuf {
    corpus::generate(dir.path(), size, Pattern::Gradient)
        .unwrap()
        .path
}

#[test]
fn test_reference_times_every_trial() {
    let dir = TempDir::new().unwrap();
    let pgm = input(&dir, 16);
    let runner = ReferenceRunner::new(
        fake_codecs::reference_encoder(dir.path()),
        fake_codecs::reference_decoder(dir.path()),
        dir.path(),
    );

    let run = runner.run(&pgm, 16, 3).unwrap();
    assert_eq!(runner.implementation(), Implementation::Reference);
    assert_eq!(run.encode.operation(), Operation::Encode);
    assert_eq!(run.encode.timings().len(), 3);
    assert!(run.encode.timings().iter().all(|&t| t > 0.0));
    assert_eq!(
        run.encode.compressed_size(),
        Some(ENCODED_STREAM.len() as u64)
    );

    let decode = run.decode.expect("reference always decodes");
    assert_eq!(decode.timings().len(), 3);
    assert_eq!(decode.image_size(), 16);
    assert!(runner.decoded_path(16).is_file());
}

#[test]
fn test_reference_encoder_failure_is_execution_error() {
    let dir = TempDir::new().unwrap();
    let pgm = input(&dir, 8);
    let runner = ReferenceRunner::new(
        fake_codecs::failing_tool(dir.path(), "bad_compress"),
        fake_codecs::reference_decoder(dir.path()),
        dir.path(),
    );

    match runner.run(&pgm, 8, 2) {
        Err(Error::Execution { command, status }) => {
            assert!(command.contains("bad_compress"));
            assert_eq!(status.code(), Some(1));
        }
        other => panic!("expected execution error, got {other:?}"),
    }
}

#[test]
fn test_reference_missing_tool_is_setup_error() {
    let dir = TempDir::new().unwrap();
    let pgm = input(&dir, 8);
    let runner = ReferenceRunner::new(
        dir.path().join("no_such_encoder"),
        dir.path().join("no_such_decoder"),
        dir.path(),
    );
    assert!(runner.run(&pgm, 8, 1).unwrap_err().is_setup());
}

#[test]
fn test_candidate_full_run() {
    let dir = TempDir::new().unwrap();
    let pgm = input(&dir, 32);
    let tool = fake_codecs::candidate(dir.path(), 32, CandidateBehavior::Healthy);
    let runner = CandidateRunner::new(tool, dir.path(), CandidateMode::Full);

    let run = runner.run(&pgm, 32, 3).unwrap();
    assert_eq!(run.encode.implementation(), Implementation::Candidate);
    assert_eq!(run.encode.timings(), &[0.01, 0.02, 0.03]);
    assert_eq!(run.encode.compressed_size(), Some(4096));
    let decode = run.decode.expect("decode timings present");
    assert_eq!(decode.timings(), &[0.005, 0.005, 0.005]);
    assert!(runner.document_path(32).is_file());
}

#[test]
fn test_candidate_falls_back_to_encode_only() {
    let dir = TempDir::new().unwrap();
    let pgm = input(&dir, 32);
    let tool = fake_codecs::candidate(dir.path(), 32, CandidateBehavior::DecoderBroken);
    let runner = CandidateRunner::new(tool, dir.path(), CandidateMode::Full);

    let run = runner.run(&pgm, 32, 3).unwrap();
    assert_eq!(run.encode.timings().len(), 3);
    assert!(run.decode.is_none());
}

#[test]
fn test_candidate_total_failure() {
    let dir = TempDir::new().unwrap();
    let pgm = input(&dir, 32);
    let tool = fake_codecs::candidate(dir.path(), 32, CandidateBehavior::Broken);

    let full = CandidateRunner::new(&tool, dir.path(), CandidateMode::Full);
    match full.run(&pgm, 32, 1) {
        Err(Error::ExecutionFailed(msg)) => assert!(msg.contains("encode-only")),
        other => panic!("expected execution failure, got {other:?}"),
    }

    let encode_only = CandidateRunner::new(&tool, dir.path(), CandidateMode::EncodeOnly);
    assert!(matches!(
        encode_only.run(&pgm, 32, 1),
        Err(Error::Execution { .. })
    ));
}

#[test]
fn test_candidate_malformed_document_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let pgm = input(&dir, 32);
    let tool = fake_codecs::candidate(dir.path(), 32, CandidateBehavior::Garbage);
    let runner = CandidateRunner::new(tool, dir.path(), CandidateMode::Full);

    match runner.run(&pgm, 32, 1) {
        Err(Error::Parse { path, .. }) => assert_eq!(path, runner.document_path(32)),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_candidate_preset_document_name() {
    let dir = TempDir::new().unwrap();
    let pgm = input(&dir, 32);
    let tool = fake_codecs::candidate(dir.path(), 32, CandidateBehavior::Healthy);
    let runner =
        CandidateRunner::new(tool, dir.path(), CandidateMode::EncodeOnly).with_preset("fast");

    let run = runner.run(&pgm, 32, 3).unwrap();
    assert!(run.decode.is_none());
    assert!(dir.path().join("profile_test_32x32_fast.json").is_file());
}

#[test]
fn test_candidate_reported_width_wins() {
    let dir = TempDir::new().unwrap();
    let pgm = input(&dir, 32);
    let tool = fake_codecs::candidate(dir.path(), 64, CandidateBehavior::Healthy);
    let runner = CandidateRunner::new(tool, dir.path(), CandidateMode::Full);

    let run = runner.run(&pgm, 32, 3).unwrap();
    assert_eq!(run.encode.image_size(), 64);
}

#[test]
fn test_candidate_never_reads_previous_document() {
    let dir = TempDir::new().unwrap();
    let pgm = input(&dir, 32);
    let tool = fake_codecs::candidate(dir.path(), 32, CandidateBehavior::Silent);
    let runner = CandidateRunner::new(tool, dir.path(), CandidateMode::Full);

    // Left over from an earlier sweep.
    let previous = runner.document_path(32);
    std::fs::write(
        &previous,
        r#"{"image": {"width": 32}, "encode": {"runs": [999.0]}, "decode": {"runs": [888.0]}}"#,
    )
    .unwrap();

    match runner.run(&pgm, 32, 1) {
        Err(Error::Parse { path, .. }) => assert_eq!(path, previous),
        other => panic!("expected parse error, got {other:?}"),
    }
    assert!(!previous.exists());
}
