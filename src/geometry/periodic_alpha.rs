//! Reference Geometry Provider: periodic weighted alpha complex.
//!
//! Brute-force periodic weighted Delaunay triangulation followed by
//! general-mode alpha classification. A 4-set of points (taken among the
//! 27 periodic translates of the input) is a cell of the regular
//! triangulation exactly when its orthosphere has non-negative power
//! distance to every other point; all lower-dimensional simplices are
//! derived as faces of cells, so the emitted stream is downward closed by
//! construction.
//!
//! Alpha values, general mode:
//!
//! - a cell enters at the squared radius of its orthosphere;
//! - a face enters at the minimum over its cofaces, lowered further to the
//!   squared radius of its own minimal orthosphere when the face is
//!   Gabriel (that sphere has non-negative power to every point);
//! - a vertex of weight w has own value -w.
//!
//! Taking the minimum with the cofaces makes the filtration monotone by
//! construction, in floating point and not only in exact arithmetic.
//!
//! The provider targets the regime where the quotient by the period group
//! is itself a simplicial complex: every Delaunay edge shorter than half
//! the minimal domain span. Inputs outside that regime are detected
//! structurally (a cell touching two translates of one input point, two
//! distinct periodic simplices over one vertex set, a facet without exactly
//! two incident cells) and abort with a geometry error, mirroring the
//! one-sheeted-cover requirement of the original pipeline.

use std::collections::HashMap;

use itertools::Itertools;
use ndarray::Array2;
use tracing::{debug, info};

use crate::error::Error;
use crate::geometry::orthosphere::{dist2, minimal_orthosphere, Orthosphere};
use crate::geometry::{FilteredPrimitive, PeriodicDomain};

/// Opaque identity of an input point, as handed to the Vertex Registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(usize);

impl PointId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// An input point translated by an integer number of periods.
#[derive(Debug, Clone, Copy)]
struct ImagePoint {
    position: [f64; 3],
    weight: f64,
    source: usize,
}

/// A periodic simplex: input point plus translate, canonicalized so the
/// smallest vertex sits at offset zero.
type OffsetVertex = (usize, [i32; 3]);
type SimplexKey = Vec<OffsetVertex>;

fn canonical(mut verts: Vec<OffsetVertex>) -> SimplexKey {
    verts.sort_unstable();
    let base = verts[0].1;
    for v in &mut verts {
        v.1 = [v.1[0] - base[0], v.1[1] - base[1], v.1[2] - base[2]];
    }
    verts
}

/// Builds the filtration stream of the periodic weighted alpha complex.
///
/// `points` is n-by-3; weights must satisfy `0 <= w < min_span^2 / 64`
/// (the bound under which the periodic regular triangulation is defined).
pub fn build_periodic_alpha_complex(
    points: &Array2<f64>,
    weights: &[f64],
    domain: &PeriodicDomain,
) -> Result<Vec<FilteredPrimitive<PointId>>, Error> {
    let n = points.nrows();
    if points.ncols() != 3 {
        return Err(Error::Geometry(format!(
            "expected 3 coordinates per point, got {}",
            points.ncols()
        )));
    }
    if weights.len() != n {
        return Err(Error::WeightCountMismatch { got: weights.len(), expected: n });
    }
    if n < 4 {
        return Err(Error::Geometry(format!(
            "at least 4 points are required, got {}",
            n
        )));
    }

    let min_span = domain.min_span();
    let weight_bound = min_span * min_span / 64.0;
    for (i, &w) in weights.iter().enumerate() {
        if !w.is_finite() || w < 0.0 || w >= weight_bound {
            return Err(Error::Geometry(format!(
                "weight {} of point {} outside [0, {}) required by the periodic domain",
                w, i, weight_bound
            )));
        }
    }
    for i in 0..n {
        for axis in 0..3 {
            if !points[[i, axis]].is_finite() {
                return Err(Error::Geometry(format!("non-finite coordinate on point {}", i)));
            }
        }
    }

    let spans = domain.spans();
    let max_span = spans[0].max(spans[1]).max(spans[2]);
    let eps = 1e-10 * max_span * max_span;
    let cutoff2 = (min_span / 2.0) * (min_span / 2.0);

    // The 27 periodic translates of every input point.
    let mut images: Vec<ImagePoint> = Vec::with_capacity(27 * n);
    let mut image_offset: Vec<[i32; 3]> = Vec::with_capacity(27 * n);
    let mut centrals: Vec<usize> = Vec::with_capacity(n);
    for source in 0..n {
        let p = [points[[source, 0]], points[[source, 1]], points[[source, 2]]];
        for ox in -1..=1 {
            for oy in -1..=1 {
                for oz in -1..=1 {
                    let offset = [ox, oy, oz];
                    if offset == [0, 0, 0] {
                        centrals.push(images.len());
                    }
                    images.push(ImagePoint {
                        position: domain.translate(p, offset),
                        weight: weights[source],
                        source,
                    });
                    image_offset.push(offset);
                }
            }
        }
    }

    let empty = |sphere: &Orthosphere| {
        images
            .iter()
            .all(|q| sphere.power(q.position, q.weight) >= -eps)
    };

    // Candidate neighbors per central point, closest first so that the
    // rejection scan below fails fast.
    let neighbor_lists: Vec<Vec<usize>> = centrals
        .iter()
        .map(|&b| {
            let mut near: Vec<(f64, usize)> = images
                .iter()
                .enumerate()
                .filter(|&(j, q)| j != b && dist2(images[b].position, q.position) <= cutoff2)
                .map(|(j, q)| (dist2(images[b].position, q.position), j))
                .collect();
            near.sort_by(|a, b| a.0.total_cmp(&b.0));
            near.into_iter().map(|(_, j)| j).collect()
        })
        .collect();

    // Enumerate cells: every periodic cell has a translate with its
    // smallest vertex in the central copy, and all its edges below the
    // cutoff, so it shows up in some central point's neighborhood.
    let mut cells: HashMap<SimplexKey, f64> = HashMap::new();
    for (slot, &b) in centrals.iter().enumerate() {
        let near = &neighbor_lists[slot];
        for tri in near.iter().combinations(3) {
            let (&i, &j, &k) = (tri[0], tri[1], tri[2]);
            if dist2(images[i].position, images[j].position) > cutoff2
                || dist2(images[i].position, images[k].position) > cutoff2
                || dist2(images[j].position, images[k].position) > cutoff2
            {
                continue;
            }
            let quad = [b, i, j, k];
            let key = canonical(quad.iter().map(|&q| (images[q].source, image_offset[q])).collect());
            if cells.contains_key(&key) {
                continue;
            }
            let corners: Vec<([f64; 3], f64)> =
                quad.iter().map(|&q| (images[q].position, images[q].weight)).collect();
            let sphere = match minimal_orthosphere(&corners) {
                Some(s) => s,
                None => continue, // affinely degenerate
            };
            if sphere.radius2 > cutoff2 {
                continue;
            }
            // Cheap local rejection before the full scan.
            if near
                .iter()
                .take(24)
                .any(|&q| sphere.power(images[q].position, images[q].weight) < -eps)
            {
                continue;
            }
            if !empty(&sphere) {
                continue;
            }
            if key.iter().tuple_windows().any(|(a, b)| a.0 == b.0) {
                return Err(Error::Geometry(format!(
                    "cell touches two periodic copies of point {}; \
                     domain is not reducible to a single cover",
                    key[0].0
                )));
            }
            cells.insert(key, sphere.radius2);
        }
    }

    if cells.is_empty() {
        return Err(Error::Geometry(
            "no Delaunay cells found; input is degenerate or too sparse".into(),
        ));
    }
    debug!(cells = cells.len(), "periodic regular triangulation computed");

    // A closed periodic triangulation has exactly two cells on every
    // facet; anything else means the enumeration missed a cell.
    let mut incidence: HashMap<SimplexKey, usize> = HashMap::new();
    for key in cells.keys() {
        for facet in subsets(key) {
            *incidence.entry(facet).or_insert(0) += 1;
        }
    }
    if let Some((facet, count)) = incidence.iter().find(|&(_, &count)| count != 2) {
        return Err(Error::Geometry(format!(
            "facet {:?} is incident to {} cells instead of 2",
            facet, count
        )));
    }

    // Faces, one dimension at a time; each level starts from the minimum
    // over its cofaces so the filtration is monotone by construction.
    let facets = face_level(&cells, domain, points, weights, &empty);
    let edges = face_level(&facets, domain, points, weights, &empty);
    let vertices = face_level(&edges, domain, points, weights, &empty);

    info!(
        vertices = vertices.len(),
        edges = edges.len(),
        facets = facets.len(),
        cells = cells.len(),
        "periodic alpha complex computed"
    );

    // Project to input-point vertex sets and detect collisions between
    // distinct periodic simplices.
    let mut emitted: HashMap<Vec<usize>, SimplexKey> = HashMap::new();
    let mut stream = Vec::new();
    for level in [&vertices, &edges, &facets, &cells] {
        for (key, &alpha) in level.iter() {
            let sources: Vec<usize> = key.iter().map(|v| v.0).collect();
            if let Some(previous) = emitted.get(&sources) {
                if previous != key {
                    return Err(Error::Geometry(format!(
                        "two distinct periodic simplices share the vertex set {:?}; \
                         domain is not reducible to a single cover",
                        sources
                    )));
                }
                continue;
            }
            emitted.insert(sources.clone(), key.clone());
            stream.push(FilteredPrimitive::new(
                sources.into_iter().map(PointId).collect(),
                alpha,
            ));
        }
    }
    Ok(stream)
}

/// Codimension-1 faces of a simplex key, re-canonicalized.
fn subsets(key: &SimplexKey) -> Vec<SimplexKey> {
    (0..key.len())
        .map(|drop| {
            canonical(
                key.iter()
                    .enumerate()
                    .filter(|&(i, _)| i != drop)
                    .map(|(_, &v)| v)
                    .collect(),
            )
        })
        .collect()
}

/// Computes the alpha values of the codimension-1 faces of one level.
fn face_level<F>(
    cofaces: &HashMap<SimplexKey, f64>,
    domain: &PeriodicDomain,
    points: &Array2<f64>,
    weights: &[f64],
    empty: &F,
) -> HashMap<SimplexKey, f64>
where
    F: Fn(&Orthosphere) -> bool,
{
    // Minimum over cofaces first.
    let mut faces: HashMap<SimplexKey, f64> = HashMap::new();
    for (key, &alpha) in cofaces {
        for face in subsets(key) {
            faces
                .entry(face)
                .and_modify(|a| *a = a.min(alpha))
                .or_insert(alpha);
        }
    }

    // Gabriel faces enter at their own minimal orthosphere if that is
    // earlier.
    for (key, alpha) in faces.iter_mut() {
        let corners: Vec<([f64; 3], f64)> = key
            .iter()
            .map(|&(source, offset)| {
                let p = [
                    points[[source, 0]],
                    points[[source, 1]],
                    points[[source, 2]],
                ];
                (domain.translate(p, offset), weights[source])
            })
            .collect();
        if let Some(sphere) = minimal_orthosphere(&corners) {
            if empty(&sphere) {
                *alpha = alpha.min(sphere.radius2);
            }
        }
    }
    faces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_translates_agree() {
        let a = canonical(vec![(2, [1, 0, 0]), (0, [0, 0, 0]), (1, [0, 1, 0])]);
        // Same periodic simplex, shifted by one period in x.
        let b = canonical(vec![(2, [2, 0, 0]), (0, [1, 0, 0]), (1, [1, 1, 0])]);
        assert_eq!(a, b);
        assert_eq!(a[0], (0, [0, 0, 0]));
    }

    #[test]
    fn test_canonical_distinguishes_wraps() {
        // Direct edge versus the edge wrapping through the boundary.
        let direct = canonical(vec![(0, [0, 0, 0]), (1, [0, 0, 0])]);
        let wrapped = canonical(vec![(0, [0, 0, 0]), (1, [-1, 0, 0])]);
        assert_ne!(direct, wrapped);
    }

    #[test]
    fn test_too_few_points() {
        let points = Array2::zeros((3, 3));
        let domain = PeriodicDomain::new([0.0; 3], [1.0; 3]).unwrap();
        let err = build_periodic_alpha_complex(&points, &[0.0; 3], &domain).unwrap_err();
        assert!(matches!(err, Error::Geometry(_)));
    }

    #[test]
    fn test_weight_count_mismatch() {
        let points = Array2::zeros((4, 3));
        let domain = PeriodicDomain::new([0.0; 3], [1.0; 3]).unwrap();
        let err = build_periodic_alpha_complex(&points, &[0.0; 3], &domain).unwrap_err();
        assert!(matches!(err, Error::WeightCountMismatch { got: 3, expected: 4 }));
    }

    #[test]
    fn test_weight_bound() {
        let points = Array2::zeros((4, 3));
        let domain = PeriodicDomain::new([0.0; 3], [1.0; 3]).unwrap();
        // 1/64 of the squared minimal span is the hard bound.
        let err =
            build_periodic_alpha_complex(&points, &[0.0, 0.0, 0.0, 0.02], &domain).unwrap_err();
        assert!(matches!(err, Error::Geometry(_)));
    }
}
