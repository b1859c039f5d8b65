//! Cross Engine — Mendelian segregation under independent assortment
//!
//! Each locus is drawn independently: one allele uniformly from the sire's
//! pair, one uniformly from the dam's. The exhaustive mode returns the exact
//! per-locus distribution instead of a sample.

pub(crate) mod engine;
mod punnett;

pub use engine::{CrossEngine, LocusOutcome};
pub use punnett::{LocusDistribution, PunnettCell};
