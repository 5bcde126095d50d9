//! Error taxonomy for the alpha-persistence pipeline.
//!
//! Every variant is fatal for the run: the computation is a deterministic
//! batch transform, so there is no retry path and no partial diagram. The
//! binary reports the error on stderr and exits non-zero.

use std::path::PathBuf;

use thiserror::Error;

/// Violations of the simplicial-complex contract detected by the builder.
///
/// The Geometry Provider guarantees a downward-closed, monotone, duplicate-free
/// stream; any of these indicates a provider bug, not recoverable input.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ComplexInvariant {
    #[error("vertex set {0:?} contains a repeated vertex")]
    DegenerateVertexSet(Vec<usize>),

    #[error("simplex {0:?} inserted twice (stored value {1}, new value {2})")]
    DuplicateSimplex(Vec<usize>, f64, f64),

    #[error("non-finite filtration value {1} for simplex {0:?}")]
    NonFiniteValue(Vec<usize>, f64),

    #[error("face {face:?} of simplex {simplex:?} is missing from the complex")]
    MissingFace { simplex: Vec<usize>, face: Vec<usize> },

    #[error(
        "face {face:?} (value {face_value}) enters after its coface {simplex:?} (value {value})"
    )]
    NonMonotone {
        simplex: Vec<usize>,
        value: f64,
        face: Vec<usize>,
        face_value: f64,
    },
}

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input in {}: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },

    #[error("bad number of weights: got {got}, expected {expected}")]
    WeightCountMismatch { got: usize, expected: usize },

    #[error("invalid periodic domain: {0}")]
    InvalidDomain(String),

    #[error("geometry construction failed: {0}")]
    Geometry(String),

    #[error("complex invariant violated: {0}")]
    Complex(#[from] ComplexInvariant),

    #[error("coefficient field characteristic {0} is not prime")]
    InvalidCoefficientField(u64),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("cannot write diagram: {0}")]
    Output(#[from] std::io::Error),
}
