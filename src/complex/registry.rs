//! Vertex Registry: opaque provider handles to compact ids.
//!
//! The Geometry Provider identifies vertices by opaque handles; the rest of
//! the pipeline works with dense integers `0..n` assigned in first-seen
//! order. One registry is created per run and owned by the ingestion step,
//! so no id leaks across runs.

use std::collections::HashMap;
use std::hash::Hash;

/// Deduplicates opaque vertex identities into compact ids.
#[derive(Debug, Clone)]
pub struct VertexRegistry<H> {
    ids: HashMap<H, usize>,
}

impl<H: Eq + Hash> VertexRegistry<H> {
    pub fn new() -> Self {
        Self { ids: HashMap::new() }
    }

    /// Returns the compact id for `handle`, allocating the next unused
    /// integer on first sight. Total and deterministic in call order.
    pub fn resolve(&mut self, handle: H) -> usize {
        let next = self.ids.len();
        *self.ids.entry(handle).or_insert(next)
    }

    /// Number of distinct identities seen so far.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<H: Eq + Hash> Default for VertexRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let mut reg = VertexRegistry::new();
        assert_eq!(reg.resolve("c"), 0);
        assert_eq!(reg.resolve("a"), 1);
        assert_eq!(reg.resolve("b"), 2);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_repeated_resolution_is_stable() {
        let mut reg = VertexRegistry::new();
        for _ in 0..3 {
            assert_eq!(reg.resolve(42u64), 0);
            assert_eq!(reg.resolve(7u64), 1);
        }
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_ids_are_dense() {
        let mut reg = VertexRegistry::new();
        let handles = [10usize, 30, 20, 10, 40, 30];
        let mut seen: Vec<usize> = handles.iter().map(|&h| reg.resolve(h)).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }
}
