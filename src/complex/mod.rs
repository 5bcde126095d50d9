//! Filtered Simplicial Complex Assembly
//!
//! Turns the Geometry Provider's unordered primitive stream into the
//! canonical, deduplicated, totally ordered filtered complex the
//! persistence engine consumes:
//!
//! - `registry.rs`: opaque vertex handles to dense compact ids
//! - `filtered.rs`: deduplicated storage, invariant checks, filtration order
//!
//! Primitives arrive as atomic (vertex set, alpha value) pairs, so the
//! primitive count and the alpha-value count cannot diverge.

mod filtered;
mod registry;

pub use filtered::{ComplexBuilder, FilteredSimplex, Filtration, Simplex};
pub use registry::VertexRegistry;

use std::hash::Hash;

use tracing::debug;

use crate::error::Error;
use crate::geometry::FilteredPrimitive;

/// Ingests a provider stream into a frozen filtration.
///
/// Owns a fresh registry and builder for the duration of the run: handles
/// are translated to compact ids in first-seen order, every primitive is
/// inserted exactly once, and the result is finalized (invariant checks plus
/// filtration sort).
pub fn assemble_filtration<H, I>(stream: I) -> Result<Filtration, Error>
where
    H: Eq + Hash,
    I: IntoIterator<Item = FilteredPrimitive<H>>,
{
    let mut registry = VertexRegistry::new();
    let mut builder = ComplexBuilder::new();

    for primitive in stream {
        let ids: Vec<usize> = primitive
            .vertices
            .into_iter()
            .map(|handle| registry.resolve(handle))
            .collect();
        builder.insert(ids, primitive.alpha)?;
    }

    debug!(
        vertices = registry.len(),
        simplices = builder.len(),
        "complex assembled"
    );

    let filtration = builder.finalize()?;
    debug!(entries = filtration.len(), "filtration frozen");
    Ok(filtration)
}
