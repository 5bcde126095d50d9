//! Orthospheres of weighted point sets.
//!
//! Under power distance, the role of the circumsphere is played by the
//! orthosphere: the sphere with zero power to every weighted vertex of a
//! simplex. For a k-simplex with k < 3 the minimal orthosphere constrains
//! the center to the affine hull of the vertices. Squared radii may be
//! negative for weighted inputs; a vertex of weight w enters at -w.

/// A sphere given by center and signed squared radius.
#[derive(Debug, Clone, Copy)]
pub struct Orthosphere {
    pub center: [f64; 3],
    pub radius2: f64,
}

impl Orthosphere {
    /// Power distance of a weighted point to this sphere. Negative means
    /// the point is inside.
    pub fn power(&self, position: [f64; 3], weight: f64) -> f64 {
        dist2(self.center, position) - weight - self.radius2
    }
}

/// Minimal orthosphere of 1 to 4 weighted points, center constrained to
/// their affine hull. Returns `None` for affinely degenerate vertex sets
/// (and for empty or oversized ones).
pub fn minimal_orthosphere(points: &[([f64; 3], f64)]) -> Option<Orthosphere> {
    match points.len() {
        1 => {
            let (p, w) = points[0];
            Some(Orthosphere { center: p, radius2: -w })
        }
        2..=4 => solve(points),
        _ => None,
    }
}

/// Solves for the center p0 + sum x_j u_j via the Gram system
/// `sum_j 2 (u_i . u_j) x_j = (|p_i|^2 - |p_0|^2 - w_i + w_0) - 2 p_0 . u_i`.
fn solve(points: &[([f64; 3], f64)]) -> Option<Orthosphere> {
    let (p0, w0) = points[0];
    let k = points.len() - 1;

    let mut u = [[0.0f64; 3]; 3];
    let mut rhs = [0.0f64; 3];
    for i in 0..k {
        let (pi, wi) = points[i + 1];
        for axis in 0..3 {
            u[i][axis] = pi[axis] - p0[axis];
        }
        rhs[i] = norm2(pi) - norm2(p0) - wi + w0 - 2.0 * dot(p0, u[i]);
    }

    let mut gram = [[0.0f64; 3]; 3];
    for i in 0..k {
        for j in 0..k {
            gram[i][j] = 2.0 * dot(u[i], u[j]);
        }
    }

    let scale: f64 = (0..k).map(|i| dot(u[i], u[i])).sum();
    let x = cramer(&gram, &rhs, k, scale)?;

    let mut center = p0;
    for i in 0..k {
        for axis in 0..3 {
            center[axis] += x[i] * u[i][axis];
        }
    }
    Some(Orthosphere { center, radius2: dist2(center, p0) - w0 })
}

/// Cramer's rule for the leading k-by-k block, k in 1..=3.
fn cramer(a: &[[f64; 3]; 3], b: &[f64; 3], k: usize, scale: f64) -> Option<[f64; 3]> {
    let eps = 1e-12 * scale.max(1e-300).powi(k as i32);
    match k {
        1 => {
            if a[0][0].abs() <= eps {
                return None;
            }
            Some([b[0] / a[0][0], 0.0, 0.0])
        }
        2 => {
            let det = a[0][0] * a[1][1] - a[0][1] * a[1][0];
            if det.abs() <= eps {
                return None;
            }
            Some([
                (b[0] * a[1][1] - b[1] * a[0][1]) / det,
                (a[0][0] * b[1] - a[1][0] * b[0]) / det,
                0.0,
            ])
        }
        3 => {
            let det = det3(a);
            if det.abs() <= eps {
                return None;
            }
            let mut x = [0.0; 3];
            for col in 0..3 {
                let mut m = *a;
                for row in 0..3 {
                    m[row][col] = b[row];
                }
                x[col] = det3(&m) / det;
            }
            Some(x)
        }
        _ => None,
    }
}

fn det3(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn norm2(a: [f64; 3]) -> f64 {
    dot(a, a)
}

pub(crate) fn dist2(a: [f64; 3], b: [f64; 3]) -> f64 {
    let d = [a[0] - b[0], a[1] - b[1], a[2] - b[2]];
    dot(d, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn test_vertex() {
        let s = minimal_orthosphere(&[([1.0, 2.0, 3.0], 0.25)]).unwrap();
        assert_eq!(s.center, [1.0, 2.0, 3.0]);
        assert!((s.radius2 + 0.25).abs() < TOL);
    }

    #[test]
    fn test_unweighted_edge() {
        let s =
            minimal_orthosphere(&[([0.0, 0.0, 0.0], 0.0), ([2.0, 0.0, 0.0], 0.0)]).unwrap();
        assert!((s.center[0] - 1.0).abs() < TOL);
        assert!((s.radius2 - 1.0).abs() < TOL);
    }

    #[test]
    fn test_weighted_edge() {
        // Weight pulls the center towards the lighter endpoint.
        let s =
            minimal_orthosphere(&[([0.0, 0.0, 0.0], 0.0), ([2.0, 0.0, 0.0], 1.0)]).unwrap();
        assert!((s.center[0] - 0.75).abs() < TOL);
        assert!((s.radius2 - 0.5625).abs() < TOL);
        // Zero power to both endpoints.
        assert!(s.power([0.0, 0.0, 0.0], 0.0).abs() < TOL);
        assert!(s.power([2.0, 0.0, 0.0], 1.0).abs() < TOL);
    }

    #[test]
    fn test_equilateral_facet() {
        let h = 3.0f64.sqrt() / 2.0;
        let s = minimal_orthosphere(&[
            ([0.0, 0.0, 0.0], 0.0),
            ([1.0, 0.0, 0.0], 0.0),
            ([0.5, h, 0.0], 0.0),
        ])
        .unwrap();
        assert!((s.radius2 - 1.0 / 3.0).abs() < TOL);
    }

    #[test]
    fn test_regular_cell() {
        // Regular tetrahedron of side 1: squared circumradius 3/8.
        let s = minimal_orthosphere(&[
            ([0.0, 0.0, 0.0], 0.0),
            ([1.0, 0.0, 0.0], 0.0),
            ([0.5, 3.0f64.sqrt() / 2.0, 0.0], 0.0),
            ([0.5, 3.0f64.sqrt() / 6.0, (2.0f64 / 3.0).sqrt()], 0.0),
        ])
        .unwrap();
        assert!((s.radius2 - 0.375).abs() < TOL);
        for axis in 0..3 {
            assert!(s.center[axis].is_finite());
        }
    }

    #[test]
    fn test_degenerate_sets_are_rejected() {
        // Coincident endpoints.
        assert!(
            minimal_orthosphere(&[([1.0, 1.0, 1.0], 0.0), ([1.0, 1.0, 1.0], 0.0)]).is_none()
        );
        // Collinear facet.
        assert!(minimal_orthosphere(&[
            ([0.0, 0.0, 0.0], 0.0),
            ([1.0, 0.0, 0.0], 0.0),
            ([2.0, 0.0, 0.0], 0.0),
        ])
        .is_none());
        // Coplanar cell.
        assert!(minimal_orthosphere(&[
            ([0.0, 0.0, 0.0], 0.0),
            ([1.0, 0.0, 0.0], 0.0),
            ([0.0, 1.0, 0.0], 0.0),
            ([1.0, 1.0, 0.0], 0.0),
        ])
        .is_none());
    }

    #[test]
    fn test_power_sign() {
        let s =
            minimal_orthosphere(&[([0.0, 0.0, 0.0], 0.0), ([2.0, 0.0, 0.0], 0.0)]).unwrap();
        assert!(s.power([1.0, 0.0, 0.0], 0.0) < 0.0); // inside
        assert!(s.power([5.0, 0.0, 0.0], 0.0) > 0.0); // outside
        assert!(s.power([1.0, 0.0, 0.0], -2.0) > 0.0); // negative weight pushes out
    }
}
