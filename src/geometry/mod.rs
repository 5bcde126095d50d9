//! Geometry Provider boundary and a reference periodic alpha complex.
//!
//! The provider's runtime-typed primitives (vertex / edge / facet / cell)
//! are normalized here, at the boundary, into the single uniform shape the
//! rest of the pipeline consumes: a vertex set plus the alpha value at
//! which it enters the complex. Downstream components never dispatch on
//! the primitive kind; it survives only as a diagnostics tag.
//!
//! `periodic_alpha.rs` is a brute-force reference provider for small,
//! well-spread inputs; an industrial geometry kernel remains an external
//! collaborator with the same output shape.

mod domain;
mod orthosphere;
mod periodic_alpha;

pub use domain::PeriodicDomain;
pub use orthosphere::Orthosphere;
pub use periodic_alpha::{build_periodic_alpha_complex, PointId};

/// Diagnostic tag for the primitive a vertex set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Vertex,
    Edge,
    Facet,
    Cell,
}

impl PrimitiveKind {
    pub fn from_vertex_count(count: usize) -> Self {
        match count {
            1 => PrimitiveKind::Vertex,
            2 => PrimitiveKind::Edge,
            3 => PrimitiveKind::Facet,
            _ => PrimitiveKind::Cell,
        }
    }
}

/// One primitive of the alpha complex: a vertex set and the alpha value at
/// which it is admitted, as one atomic pair.
#[derive(Debug, Clone)]
pub struct FilteredPrimitive<H> {
    pub vertices: Vec<H>,
    pub alpha: f64,
    pub kind: PrimitiveKind,
}

impl<H> FilteredPrimitive<H> {
    pub fn new(vertices: Vec<H>, alpha: f64) -> Self {
        let kind = PrimitiveKind::from_vertex_count(vertices.len());
        Self { vertices, alpha, kind }
    }
}
