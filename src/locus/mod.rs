//! Locus Model — genes, alleles and their dominance ranks
//!
//! The table is fixed configuration: built once, shared read-only and handed
//! to every other component instead of being looked up globally.

mod table;
mod genotype;
pub mod catalog;

pub use table::{Locus, LocusTable};
pub use genotype::{AllelePair, Genotype, Parent};
