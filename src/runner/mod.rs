//! Adapters that turn "run N trials over this input" into results.
//!
//! Two external tool families are supported behind one [`Runner`] trait:
//!
//! - [`ReferenceRunner`] drives separate encoder and decoder commands once
//!   per trial and times each process itself.
//! - [`CandidateRunner`] invokes a single `benchmark` subcommand that repeats
//!   trials internally and reports them in a JSON document.
//!
//! All timing uses [`std::time::Instant`], which is monotonic.

pub mod candidate;
pub mod document;
pub mod process;
pub mod reference;

use std::path::Path;

pub use crate::result::SizeRun;
use crate::error::Result;
use crate::result::Implementation;

pub use candidate::{CandidateMode, CandidateRunner};
pub use document::BenchmarkDocument;
pub use reference::ReferenceRunner;

/// A benchmarkable codec implementation.
pub trait Runner {
    /// Which side of the comparison this adapter measures.
    fn implementation(&self) -> Implementation;

    /// Run `runs` trials of each supported operation on `input`, a
    /// `size`×`size` test image.
    ///
    /// Returns the encode result and, when the implementation could decode,
    /// the decode result.
    fn run(&self, input: &Path, size: u32, runs: u32) -> Result<SizeRun>;

    /// Whether [`run`](Runner::run) attempts a decode. When it does not, an
    /// absent decode is not recorded as unavailable.
    fn measures_decode(&self) -> bool {
        true
    }
}
