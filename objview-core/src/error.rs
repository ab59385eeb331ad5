//! Error types for mesh loading.
//!
//! Every failure is fatal for the load call that produced it: the
//! loader never returns a partial mesh. Parse failures carry the
//! 1-based line number and the offending line so the input file can
//! be fixed.

use thiserror::Error;

/// Errors produced while loading a mesh description.
#[derive(Debug, Error)]
pub enum MeshError {
    /// A face record without exactly three well-formed corner
    /// descriptors (quads and polygon fans are rejected, not
    /// triangulated), or a corner whose attribute layout disagrees
    /// with the rest of the file.
    #[error("line {line}: malformed face record: {content:?}")]
    MalformedFace { line: usize, content: String },

    /// A face corner references an attribute that was never recorded.
    /// `index` is reported 1-based, as written in the file.
    #[error("line {line}: {pool} index {index} out of range (file defines {count}): {content:?}")]
    IndexOutOfRange {
        line: usize,
        content: String,
        pool: &'static str,
        index: usize,
        count: usize,
    },

    /// A coordinate field is not a valid floating-point literal, or a
    /// record carries the wrong number of fields.
    #[error("line {line}: unparsable coordinate field: {content:?}")]
    UnparsableNumber { line: usize, content: String },

    /// Reading the source file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
