//! Sequence Mutator — genotype-driven edits over reference DNA templates
//!
//! This is a controlled substitution over pre-identified coordinates, not
//! alignment or variant calling. Templates and mutation tables arrive as
//! in-memory values; no file format is parsed here.

mod edit;
mod reference;
mod mutator;
mod fasta;

pub use edit::{EditKind, SequenceEdit};
pub use reference::{LocusMutations, MutationTable, SequenceReference, TemplateSet};
pub use mutator::{apply_edits, AlleleOrigin, MutatedSequence, SequenceBatch, SequenceMutator};
pub use fasta::DEFAULT_LINE_WIDTH;
