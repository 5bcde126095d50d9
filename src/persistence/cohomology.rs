//! Persistent Cohomology Engine
//!
//! Implements the standard persistent-cohomology reduction (de Silva,
//! Morozov, Vejdemo-Johansson, "Dualities in persistent (co)homology",
//! 2011), which produces the same diagram as persistent homology but keeps
//! its working set proportional to the currently open classes.
//!
//! ## Algorithm Overview
//!
//! Simplices are consumed in filtration order. The state is one
//! representative cocycle per open class, with coefficients in Z/pZ,
//! supported on simplices seen so far. For each incoming simplex σ the
//! open cocycles are evaluated on ∂σ:
//!
//! - all evaluations zero: σ starts a new cocycle, a class is born at
//!   its alpha value;
//! - otherwise the youngest cocycle with a nonzero evaluation dies, paired
//!   with σ; the remaining nonzero cocycles are repaired by subtracting the
//!   appropriate multiple of the dying one, so the evaluations stay zero.
//!
//! Every simplex triggers exactly one of absorb, birth, or death. Cocycles
//! still open after the scan are the essential classes.

use std::collections::HashMap;

use tracing::debug;

use crate::complex::Filtration;
use crate::error::Error;
use crate::persistence::diagram::{PersistenceDiagram, PersistencePair};
use crate::persistence::field::PrimeField;

/// A representative cocycle of one open class.
///
/// `creator` is the filtration position of the simplex whose arrival gave
/// birth to the class; the support maps filtration positions to nonzero
/// coefficients.
#[derive(Debug, Clone)]
struct Cocycle {
    creator: usize,
    support: HashMap<usize, u64>,
}

/// Persistent cohomology over Z/pZ.
#[derive(Debug, Clone, Copy)]
pub struct PersistentCohomology {
    field: PrimeField,
}

impl PersistentCohomology {
    /// Fails with `InvalidCoefficientField` unless the characteristic is
    /// prime.
    pub fn new(characteristic: u64) -> Result<Self, Error> {
        Ok(Self { field: PrimeField::new(characteristic)? })
    }

    /// Computes the persistence diagram of an ordered filtration.
    ///
    /// A finite pair is retained only when `death - birth > min_persistence`;
    /// essential classes are always retained, their infinite length exceeds
    /// every finite threshold.
    pub fn compute(&self, filtration: &Filtration, min_persistence: f64) -> PersistenceDiagram {
        let field = self.field;
        let mut open: Vec<Cocycle> = Vec::new();
        let mut diagram = PersistenceDiagram::new(field.characteristic());

        for position in 0..filtration.len() {
            let boundary: Vec<(usize, u64)> = filtration
                .boundary(position)
                .iter()
                .map(|&(face, sign)| (face, field.from_signed(sign as i64)))
                .collect();

            // Evaluate every open cocycle on the boundary of the new simplex.
            let mut hits: Vec<(usize, u64)> = Vec::new();
            for (slot, cocycle) in open.iter().enumerate() {
                let mut value = 0;
                for &(face, coeff) in &boundary {
                    if let Some(&a) = cocycle.support.get(&face) {
                        value = field.add(value, field.mul(coeff, a));
                    }
                }
                if value != 0 {
                    hits.push((slot, value));
                }
            }

            if hits.is_empty() {
                // Independent cycle: a class is born at this simplex.
                let mut support = HashMap::new();
                support.insert(position, 1);
                open.push(Cocycle { creator: position, support });
                continue;
            }

            // The youngest involved class dies, paired with this simplex.
            let (dying_slot, dying_value) = hits
                .iter()
                .copied()
                .max_by_key(|&(slot, _)| open[slot].creator)
                .unwrap_or(hits[0]);
            let dying = open[dying_slot].clone();
            let scale = field.inv(dying_value);

            for &(slot, value) in &hits {
                if slot == dying_slot {
                    continue;
                }
                let factor = field.mul(value, scale);
                for (&simplex, &coeff) in &dying.support {
                    let entry = open[slot].support.entry(simplex).or_insert(0);
                    *entry = field.sub(*entry, field.mul(factor, coeff));
                    if *entry == 0 {
                        open[slot].support.remove(&simplex);
                    }
                }
            }
            open.remove(dying_slot);

            let birth = filtration.get(dying.creator).value;
            let death = filtration.get(position).value;
            if death - birth > min_persistence {
                diagram.push(PersistencePair {
                    dimension: filtration.get(dying.creator).simplex.dimension(),
                    birth,
                    death,
                });
            }
        }

        // Classes still open never die within the filtration range.
        for cocycle in &open {
            diagram.push(PersistencePair {
                dimension: filtration.get(cocycle.creator).simplex.dimension(),
                birth: filtration.get(cocycle.creator).value,
                death: f64::INFINITY,
            });
        }

        debug!(
            pairs = diagram.pairs.len(),
            essential = open.len(),
            "persistence computed"
        );
        diagram
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::ComplexBuilder;

    fn filtration_of(entries: &[(&[usize], f64)]) -> Filtration {
        let mut builder = ComplexBuilder::new();
        for (verts, value) in entries {
            builder.insert(verts.to_vec(), *value).unwrap();
        }
        builder.finalize().unwrap()
    }

    /// Three edges of a triangle at values 1, 1, 2, the 2-cell at 3.
    fn triangle_boundary() -> Filtration {
        filtration_of(&[
            (&[0], 0.0),
            (&[1], 0.0),
            (&[2], 0.0),
            (&[0, 1], 1.0),
            (&[1, 2], 1.0),
            (&[0, 2], 2.0),
            (&[0, 1, 2], 3.0),
        ])
    }

    #[test]
    fn test_triangle_boundary_scenario() {
        let filtration = triangle_boundary();
        let engine = PersistentCohomology::new(2).unwrap();
        let diagram = engine.compute(&filtration, 0.0);

        assert_eq!(diagram.essential_count(0), 1);
        let h1 = diagram.finite(1);
        assert_eq!(h1.len(), 1);
        assert_eq!(h1[0].birth, 2.0);
        assert_eq!(h1[0].death, 3.0);
        assert_eq!(diagram.essential_count(1), 0);
    }

    #[test]
    fn test_triangle_boundary_odd_characteristic() {
        // The diagram of this complex does not depend on the field.
        let filtration = triangle_boundary();
        let engine = PersistentCohomology::new(5).unwrap();
        let diagram = engine.compute(&filtration, 0.0);

        assert_eq!(diagram.essential_count(0), 1);
        let h1 = diagram.finite(1);
        assert_eq!(h1.len(), 1);
        assert_eq!((h1[0].birth, h1[0].death), (2.0, 3.0));
    }

    #[test]
    fn test_component_merges() {
        // Two vertices joined by an edge: one merge, one surviving class.
        let filtration = filtration_of(&[(&[0], 0.0), (&[1], 0.0), (&[0, 1], 1.5)]);
        let engine = PersistentCohomology::new(2).unwrap();
        let diagram = engine.compute(&filtration, 0.0);

        let h0 = diagram.finite(0);
        assert_eq!(h0.len(), 1);
        assert_eq!((h0[0].birth, h0[0].death), (0.0, 1.5));
        assert_eq!(diagram.essential_count(0), 1);
    }

    #[test]
    fn test_zero_length_pairs_respect_threshold() {
        // Edge enters together with its second vertex: zero-length pair.
        let filtration = filtration_of(&[(&[0], 0.0), (&[1], 1.0), (&[0, 1], 1.0)]);
        let engine = PersistentCohomology::new(2).unwrap();

        // min_persistence = -1.0 keeps everything, zero-length included.
        let all = engine.compute(&filtration, -1.0);
        assert_eq!(all.finite(0).len(), 1);
        assert_eq!(all.finite(0)[0].persistence(), 0.0);

        // min_persistence = 0.0 prunes the zero-length pair.
        let pruned = engine.compute(&filtration, 0.0);
        assert!(pruned.finite(0).is_empty());
        assert_eq!(pruned.essential_count(0), 1);
    }

    #[test]
    fn test_essential_classes_survive_any_threshold() {
        let filtration = triangle_boundary();
        let engine = PersistentCohomology::new(2).unwrap();
        let diagram = engine.compute(&filtration, 1e12);

        assert!(diagram.finite(0).is_empty());
        assert!(diagram.finite(1).is_empty());
        assert_eq!(diagram.essential_count(0), 1);
    }

    #[test]
    fn test_discovery_order() {
        let filtration = triangle_boundary();
        let engine = PersistentCohomology::new(2).unwrap();
        let diagram = engine.compute(&filtration, -1.0);

        // Finite pairs in death order, essentials afterwards.
        let mut saw_essential = false;
        let mut last_death = f64::NEG_INFINITY;
        for pair in &diagram.pairs {
            if pair.is_essential() {
                saw_essential = true;
            } else {
                assert!(!saw_essential, "finite pair after an essential one");
                assert!(pair.death >= last_death);
                last_death = pair.death;
            }
        }
    }
}
