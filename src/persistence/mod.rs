//! Persistence Module: cohomology reduction over a prime field.
//!
//! - `field.rs`: arithmetic in Z/pZ, primality-checked on construction
//! - `cohomology.rs`: the persistent-cohomology reduction
//! - `diagram.rs`: persistence pairs and the output diagram

mod cohomology;
mod diagram;
mod field;

pub use cohomology::PersistentCohomology;
pub use diagram::{PersistenceDiagram, PersistencePair};
pub use field::PrimeField;
