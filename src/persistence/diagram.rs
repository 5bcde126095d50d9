//! Persistence diagram: the multiset of birth/death intervals.

use std::io::Write;

/// One persistence pair. Essential classes carry `death = f64::INFINITY`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersistencePair {
    pub dimension: usize,
    pub birth: f64,
    pub death: f64,
}

impl PersistencePair {
    pub fn persistence(&self) -> f64 {
        self.death - self.birth
    }

    pub fn is_essential(&self) -> bool {
        self.death.is_infinite()
    }
}

/// Pairs in the order the engine discovered them: deaths as they occur
/// along the filtration, then the essential classes in birth order.
#[derive(Debug, Clone)]
pub struct PersistenceDiagram {
    pub pairs: Vec<PersistencePair>,
    characteristic: u64,
}

impl PersistenceDiagram {
    pub fn new(characteristic: u64) -> Self {
        Self { pairs: Vec::new(), characteristic }
    }

    pub fn push(&mut self, pair: PersistencePair) {
        self.pairs.push(pair);
    }

    pub fn characteristic(&self) -> u64 {
        self.characteristic
    }

    /// All pairs of a given dimension.
    pub fn dim(&self, d: usize) -> Vec<&PersistencePair> {
        self.pairs.iter().filter(|p| p.dimension == d).collect()
    }

    /// Finite pairs of a given dimension.
    pub fn finite(&self, d: usize) -> Vec<&PersistencePair> {
        self.pairs
            .iter()
            .filter(|p| p.dimension == d && !p.is_essential())
            .collect()
    }

    /// Number of essential classes of a given dimension.
    pub fn essential_count(&self, d: usize) -> usize {
        self.pairs
            .iter()
            .filter(|p| p.dimension == d && p.is_essential())
            .count()
    }

    /// Writes one line per pair: `characteristic dimension birth death`,
    /// with `inf` as the sentinel for essential classes.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for pair in &self.pairs {
            if pair.is_essential() {
                writeln!(out, "{} {} {} inf", self.characteristic, pair.dimension, pair.birth)?;
            } else {
                writeln!(
                    out,
                    "{} {} {} {}",
                    self.characteristic, pair.dimension, pair.birth, pair.death
                )?;
            }
        }
        Ok(())
    }
}
