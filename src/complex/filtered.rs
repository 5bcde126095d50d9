//! Filtered Complex Builder and Filtration Sorter.
//!
//! Stores every simplex of the alpha complex together with the alpha value
//! at which it enters, in whatever order the Geometry Provider enumerates
//! primitives. `finalize` then checks the simplicial-complex invariant
//! (downward closure, monotone values) and produces the total order the
//! persistence algorithm needs: alpha value ascending, dimension as the
//! tie-break, so every face precedes every coface.
//!
//! The builder never auto-inserts missing faces and never overwrites a
//! stored value: the provider emits every sub-simplex of every admitted
//! cell exactly once, so a collision or a gap is a contract violation and
//! the run aborts.

use std::collections::HashMap;

use ordered_float::OrderedFloat;

use crate::error::ComplexInvariant;

/// An abstract simplex: a strictly increasing set of compact vertex ids.
///
/// Value-comparable by content, independent of the order the ids arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Simplex {
    vertices: Vec<usize>,
}

impl Simplex {
    /// Builds a simplex from an arbitrary-order vertex set.
    /// Fails if the set is empty or contains a repeated id.
    pub fn new(mut vertices: Vec<usize>) -> Result<Self, ComplexInvariant> {
        if vertices.is_empty() {
            return Err(ComplexInvariant::DegenerateVertexSet(vertices));
        }
        vertices.sort_unstable();
        if vertices.windows(2).any(|w| w[0] == w[1]) {
            return Err(ComplexInvariant::DegenerateVertexSet(vertices));
        }
        Ok(Self { vertices })
    }

    pub fn dimension(&self) -> usize {
        self.vertices.len() - 1
    }

    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// The codimension-1 faces, paired with the boundary sign (-1)^i of the
    /// omitted vertex position. Vertices have no facets.
    pub fn facets(&self) -> impl Iterator<Item = (Simplex, i8)> + '_ {
        let count = if self.dimension() == 0 { 0 } else { self.vertices.len() };
        (0..count).map(move |i| {
            let mut face = self.vertices.clone();
            face.remove(i);
            let sign = if i % 2 == 0 { 1 } else { -1 };
            (Simplex { vertices: face }, sign)
        })
    }
}

/// A simplex together with the alpha value at which it enters the complex.
#[derive(Debug, Clone)]
pub struct FilteredSimplex {
    pub simplex: Simplex,
    pub value: f64,
}

/// Accumulates the unordered primitive stream.
#[derive(Debug, Default)]
pub struct ComplexBuilder {
    entries: HashMap<Simplex, f64>,
}

impl ComplexBuilder {
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Inserts one (vertex set, alpha value) entry.
    ///
    /// Duplicate vertex sets are refused rather than overwritten: every
    /// primitive from the provider is logically distinct, so a collision
    /// means the provider broke its contract.
    pub fn insert(&mut self, vertices: Vec<usize>, value: f64) -> Result<(), ComplexInvariant> {
        let simplex = Simplex::new(vertices)?;
        if !value.is_finite() {
            return Err(ComplexInvariant::NonFiniteValue(simplex.vertices, value));
        }
        if let Some(&stored) = self.entries.get(&simplex) {
            return Err(ComplexInvariant::DuplicateSimplex(simplex.vertices, stored, value));
        }
        self.entries.insert(simplex, value);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freezes the complex: verifies downward closure and monotonicity,
    /// imposes the filtration order, and precomputes boundary indices.
    pub fn finalize(self) -> Result<Filtration, ComplexInvariant> {
        let mut entries: Vec<FilteredSimplex> = self
            .entries
            .into_iter()
            .map(|(simplex, value)| FilteredSimplex { simplex, value })
            .collect();

        // Alpha value first, dimension breaks ties so that at equal value a
        // face still precedes its cofaces; lexicographic vertices make the
        // order independent of arrival order.
        entries.sort_by(|a, b| {
            OrderedFloat(a.value)
                .cmp(&OrderedFloat(b.value))
                .then(a.simplex.dimension().cmp(&b.simplex.dimension()))
                .then_with(|| a.simplex.vertices().cmp(b.simplex.vertices()))
        });

        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            index.insert(entry.simplex.clone(), i);
        }

        let mut boundaries = Vec::with_capacity(entries.len());
        for entry in &entries {
            let mut boundary = Vec::with_capacity(entry.simplex.vertices.len());
            for (face, sign) in entry.simplex.facets() {
                let face_pos = match index.get(&face) {
                    Some(&pos) => pos,
                    None => {
                        return Err(ComplexInvariant::MissingFace {
                            simplex: entry.simplex.vertices.clone(),
                            face: face.vertices,
                        })
                    }
                };
                let face_value = entries[face_pos].value;
                if face_value > entry.value {
                    return Err(ComplexInvariant::NonMonotone {
                        simplex: entry.simplex.vertices.clone(),
                        value: entry.value,
                        face: face.vertices,
                        face_value,
                    });
                }
                boundary.push((face_pos, sign));
            }
            boundaries.push(boundary);
        }

        Ok(Filtration { entries, boundaries, index })
    }
}

/// The frozen, totally ordered filtered complex.
///
/// Only constructible through [`ComplexBuilder::finalize`], so consumers may
/// rely on the order and on every boundary index being valid.
#[derive(Debug)]
pub struct Filtration {
    entries: Vec<FilteredSimplex>,
    boundaries: Vec<Vec<(usize, i8)>>,
    index: HashMap<Simplex, usize>,
}

impl Filtration {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, i: usize) -> &FilteredSimplex {
        &self.entries[i]
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilteredSimplex> {
        self.entries.iter()
    }

    /// Position of a simplex in the filtration order.
    pub fn position(&self, simplex: &Simplex) -> Option<usize> {
        self.index.get(simplex).copied()
    }

    /// Boundary of the i-th simplex as (filtration position, sign) pairs.
    pub fn boundary(&self, i: usize) -> &[(usize, i8)] {
        &self.boundaries[i]
    }
}
