//! # alpha-persistence
//!
//! Topological persistence of weighted 3D point sets under a periodic
//! alpha-shape filtration.
//!
//! ## Pipeline
//!
//! 1. **Geometry Provider** (`geometry`): the periodic weighted Delaunay
//!    triangulation, classified in general alpha-shape mode, emitted as a
//!    stream of (vertex set, alpha value) primitives.
//! 2. **Complex assembly** (`complex`): opaque vertex handles become dense
//!    compact ids, primitives become a deduplicated filtered simplicial
//!    complex, and the filtration order (alpha ascending, dimension as
//!    tie-break) is frozen after the invariant checks pass.
//! 3. **Persistent cohomology** (`persistence`): the ordered complex is
//!    reduced over Z/pZ; birth/death pairs per homology dimension survive a
//!    minimum-persistence filter, essential classes are always reported.
//!
//! The whole computation is a single-threaded batch transform: ingest,
//! freeze, reduce, print. Nothing survives a run.
//!
//! ## References
//!
//! - Edelsbrunner & Harer, "Computational Topology" (2010)
//! - de Silva, Morozov, Vejdemo-Johansson, "Dualities in persistent
//!   (co)homology", Inverse Problems 27 (2011)

pub mod complex;
pub mod error;
pub mod geometry;
pub mod io;
pub mod persistence;

pub use complex::{assemble_filtration, ComplexBuilder, Filtration, Simplex, VertexRegistry};
pub use error::{ComplexInvariant, Error};
pub use geometry::{
    build_periodic_alpha_complex, FilteredPrimitive, PeriodicDomain, PointId, PrimitiveKind,
};
pub use persistence::{PersistenceDiagram, PersistencePair, PersistentCohomology};
