//! The periodic cuboid domain.

use crate::error::Error;

/// Axis-aligned cuboid with periodic boundary conditions.
#[derive(Debug, Clone, Copy)]
pub struct PeriodicDomain {
    min: [f64; 3],
    max: [f64; 3],
}

impl PeriodicDomain {
    /// Fails unless all bounds are finite and `max > min` on every axis.
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Result<Self, Error> {
        for axis in 0..3 {
            if !min[axis].is_finite() || !max[axis].is_finite() {
                return Err(Error::InvalidDomain(format!(
                    "non-finite bound on axis {}",
                    axis
                )));
            }
            if max[axis] <= min[axis] {
                return Err(Error::InvalidDomain(format!(
                    "empty extent on axis {}: [{}, {}]",
                    axis, min[axis], max[axis]
                )));
            }
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> [f64; 3] {
        self.min
    }

    pub fn max(&self) -> [f64; 3] {
        self.max
    }

    pub fn spans(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn min_span(&self) -> f64 {
        let s = self.spans();
        s[0].min(s[1]).min(s[2])
    }

    /// Translates a point by an integer number of periods per axis.
    pub fn translate(&self, point: [f64; 3], offset: [i32; 3]) -> [f64; 3] {
        let spans = self.spans();
        [
            point[0] + offset[0] as f64 * spans[0],
            point[1] + offset[1] as f64 * spans[1],
            point[2] + offset[2] as f64 * spans[2],
        ]
    }
}
