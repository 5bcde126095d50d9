//! Arithmetic in the coefficient field Z/pZ.
//!
//! The characteristic is validated for primality on construction; field
//! arithmetic on a composite modulus would silently compute homology over
//! a non-field and corrupt the reduction.

use crate::error::Error;

/// The prime field Z/pZ. Elements are canonical representatives in `0..p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeField {
    p: u64,
}

impl PrimeField {
    /// Fails with `InvalidCoefficientField` unless `p` is prime.
    pub fn new(p: u64) -> Result<Self, Error> {
        if !is_prime(p) {
            return Err(Error::InvalidCoefficientField(p));
        }
        Ok(Self { p })
    }

    pub fn characteristic(&self) -> u64 {
        self.p
    }

    pub fn add(&self, a: u64, b: u64) -> u64 {
        ((a as u128 + b as u128) % self.p as u128) as u64
    }

    pub fn sub(&self, a: u64, b: u64) -> u64 {
        ((a as u128 + self.p as u128 - b as u128) % self.p as u128) as u64
    }

    pub fn mul(&self, a: u64, b: u64) -> u64 {
        ((a as u128 * b as u128) % self.p as u128) as u64
    }

    /// Canonical representative of a signed integer (boundary signs are ±1).
    pub fn from_signed(&self, x: i64) -> u64 {
        x.rem_euclid(self.p as i64) as u64
    }

    /// Multiplicative inverse of a nonzero element, by the extended
    /// Euclidean algorithm.
    pub fn inv(&self, a: u64) -> u64 {
        debug_assert!(a != 0 && a < self.p);
        let (mut r0, mut r1) = (self.p as i64, a as i64);
        let (mut s0, mut s1) = (0i64, 1i64);
        while r1 != 0 {
            let q = r0 / r1;
            (r0, r1) = (r1, r0 - q * r1);
            (s0, s1) = (s1, s0 - q * s1);
        }
        s0.rem_euclid(self.p as i64) as u64
    }
}

fn is_prime(p: u64) -> bool {
    if p < 2 {
        return false;
    }
    if p % 2 == 0 {
        return p == 2;
    }
    let mut d = 3;
    while d * d <= p {
        if p % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
