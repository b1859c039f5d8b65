//! coatgen — canine coat genetics
//!
//! Mendelian crosses over independent loci, an epistasis-ordered phenotype
//! resolver (E, K, A, B, D, then M, S, L) and a genotype-driven mutator over
//! reference DNA templates. Reference data is built once and shared through
//! `Arc`; every resolution is a pure function of one genotype.

pub mod error;
pub mod locus;
pub mod cross;
pub mod phenotype;
pub mod sequence;
pub mod sampler;

pub use error::{GeneticsError, Result};
pub use locus::{AllelePair, Genotype, Locus, LocusTable, Parent};
pub use cross::{CrossEngine, LocusDistribution, LocusOutcome, PunnettCell};
pub use phenotype::{Phenotype, PhenotypeDescription, PhenotypeResolver, VisualParams};
pub use sequence::{MutatedSequence, MutationTable, SequenceBatch, SequenceMutator, SequenceReference, TemplateSet};
pub use sampler::{Litter, OffspringSampler, Puppy, SamplerConfig};
