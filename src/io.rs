//! Readers for the three input files.
//!
//! All readers are token-based: whitespace separates values and line breaks
//! are cosmetic. Any missing file, short file, or unparsable token aborts
//! the run.

use std::fs;
use std::path::Path;

use ndarray::Array2;

use crate::error::Error;
use crate::geometry::PeriodicDomain;

fn read_tokens(path: &Path) -> Result<Vec<String>, Error> {
    let text = fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text.split_whitespace().map(str::to_owned).collect())
}

fn parse<T: std::str::FromStr>(token: Option<&String>, path: &Path, what: &str) -> Result<T, Error> {
    let token = token.ok_or_else(|| Error::MalformedInput {
        path: path.to_path_buf(),
        reason: format!("unexpected end of file while reading {}", what),
    })?;
    token.parse().map_err(|_| Error::MalformedInput {
        path: path.to_path_buf(),
        reason: format!("cannot parse {:?} as {}", token, what),
    })
}

/// Point cloud: a point count followed by one `x y z` row per point.
pub fn read_points(path: &Path) -> Result<Array2<f64>, Error> {
    let tokens = read_tokens(path)?;
    let mut it = tokens.iter();
    let count: usize = parse(it.next(), path, "the point count")?;

    // Check the header against the actual token count before allocating,
    // so a nonsense header fails as malformed input rather than as an
    // oversized allocation.
    let available = tokens.len() - 1;
    if count.checked_mul(3) != Some(available) {
        return Err(Error::MalformedInput {
            path: path.to_path_buf(),
            reason: format!(
                "point count {} does not match the {} coordinates in the file",
                count, available
            ),
        });
    }

    let mut points = Array2::zeros((count, 3));
    for i in 0..count {
        for axis in 0..3 {
            points[[i, axis]] = parse(it.next(), path, "a coordinate")?;
        }
    }
    Ok(points)
}

/// Weights: one float per point, count must match the point cloud.
pub fn read_weights(path: &Path, expected: usize) -> Result<Vec<f64>, Error> {
    let tokens = read_tokens(path)?;
    let weights: Vec<f64> = tokens
        .iter()
        .map(|t| parse(Some(t), path, "a weight"))
        .collect::<Result<_, _>>()?;
    if weights.len() != expected {
        return Err(Error::WeightCountMismatch { got: weights.len(), expected });
    }
    Ok(weights)
}

/// Domain: six floats `x_min y_min z_min x_max y_max z_max`.
pub fn read_domain(path: &Path) -> Result<PeriodicDomain, Error> {
    let tokens = read_tokens(path)?;
    let mut it = tokens.iter();
    let mut bounds = [0.0f64; 6];
    for b in &mut bounds {
        *b = parse(it.next(), path, "a domain bound")?;
    }
    PeriodicDomain::new(
        [bounds[0], bounds[1], bounds[2]],
        [bounds[3], bounds[4], bounds[5]],
    )
}
