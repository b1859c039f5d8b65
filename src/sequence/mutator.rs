//! SequenceMutator — projects a genotype onto reference DNA
//!
//! One sequence is produced per gene. At a heterozygous locus the expressed
//! (most dominant) allele's edits are applied and the other allele is recorded
//! as carried. All edits for a gene are validated before the first byte of
//! output is written.

use super::{EditKind, SequenceEdit, SequenceReference};
use crate::cross::engine::OFFSPRING;
use crate::error::{GeneticsError, Result};
use crate::locus::{AllelePair, Genotype, LocusTable};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Which parent's allele supplied the applied edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlleleOrigin {
    Paternal,
    Maternal,
    /// Homozygous: both parents passed the same allele
    Both,
}

/// Mutated sequence for one gene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutatedSequence {
    pub gene: String,
    pub locus: String,
    /// Allele whose edits were applied
    pub applied_allele: String,
    /// Second allele of a heterozygous pair, not applied
    pub carried_allele: Option<String>,
    pub origin: AlleleOrigin,
    pub sequence: String,
    pub template_length: usize,
    /// Edits applied, in position order
    pub edits: Vec<SequenceEdit>,
    /// Set when an insertion or deletion changed the length
    pub length_changed: bool,
}

impl MutatedSequence {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// True when no edit was applied
    pub fn is_reference(&self) -> bool {
        self.edits.is_empty()
    }
}

/// Results for every gene that had a template. Genes without one are listed
/// in `missing` instead of failing the batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceBatch {
    pub results: BTreeMap<String, MutatedSequence>,
    pub missing: Vec<String>,
}

impl SequenceBatch {
    pub fn get(&self, gene: &str) -> Option<&MutatedSequence> {
        self.results.get(gene)
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Applies per-allele edits from a shared reference
#[derive(Debug, Clone)]
pub struct SequenceMutator {
    loci: Arc<LocusTable>,
    reference: Arc<SequenceReference>,
}

impl SequenceMutator {
    /// Every locus and allele named by the mutation table must exist in the
    /// locus table, and no gene may be claimed by two loci.
    pub fn new(loci: Arc<LocusTable>, reference: Arc<SequenceReference>) -> Result<Self> {
        let mut genes: BTreeMap<&str, &str> = BTreeMap::new();
        for (locus, mutations) in reference.mutations.iter() {
            loci.locus(locus)?;
            for allele in mutations.alleles.keys() {
                loci.dominance_rank(locus, allele)?;
            }
            if let Some(other) = genes.insert(&mutations.gene, locus) {
                return Err(GeneticsError::InvalidMutationTable(format!(
                    "gene {} is mapped by both locus {} and locus {}",
                    mutations.gene, other, locus
                )));
            }
        }
        Ok(Self { loci, reference })
    }

    pub fn reference(&self) -> &SequenceReference {
        &self.reference
    }

    /// Mutate every gene in the mutation table, in locus table order.
    ///
    /// A gene whose template is not loaded is omitted and reported in
    /// `missing`. Any other failure aborts the call.
    pub fn mutate_sequences(&self, genotype: &Genotype) -> Result<SequenceBatch> {
        for (locus, pair) in genotype.iter() {
            self.loci.pair_ranks(locus, pair)?;
        }

        let mut batch = SequenceBatch::default();
        for locus in self.loci.ids() {
            if self.reference.mutations.get(locus).is_none() {
                continue;
            }
            match self.mutate_locus(locus, genotype) {
                Ok(result) => {
                    batch.results.insert(result.gene.clone(), result);
                }
                Err(GeneticsError::MissingTemplate(gene)) => {
                    warn!("No template for {} (locus {}), skipping", gene, locus);
                    batch.missing.push(gene);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(batch)
    }

    /// Mutate the gene behind one locus. Fails with `MissingTemplate` when
    /// the gene's template is not loaded.
    pub fn mutate_locus(&self, locus: &str, genotype: &Genotype) -> Result<MutatedSequence> {
        let mutations = self
            .reference
            .mutations
            .get(locus)
            .ok_or_else(|| GeneticsError::UnknownLocus(locus.to_string()))?;
        let pair = genotype.require(locus, OFFSPRING)?;
        let (applied, carried, origin) = self.expressed(locus, pair)?;

        let template = self
            .reference
            .templates
            .get(&mutations.gene)
            .ok_or_else(|| GeneticsError::MissingTemplate(mutations.gene.clone()))?;

        let edits = mutations.edits_for(&applied);
        let (sequence, applied_edits) = apply_edits(&mutations.gene, &applied, template, edits)?;
        let length_changed = sequence.len() != template.len();
        debug!(
            "{}: applied {} edit(s) for allele {} ({:?})",
            mutations.gene,
            applied_edits.len(),
            applied,
            origin
        );

        Ok(MutatedSequence {
            gene: mutations.gene.clone(),
            locus: locus.to_string(),
            applied_allele: applied,
            carried_allele: carried,
            origin,
            sequence,
            template_length: template.len(),
            edits: applied_edits,
            length_changed,
        })
    }

    fn expressed(
        &self,
        locus: &str,
        pair: &AllelePair,
    ) -> Result<(String, Option<String>, AlleleOrigin)> {
        if pair.is_homozygous() {
            return Ok((pair.first.clone(), None, AlleleOrigin::Both));
        }
        let first = self.loci.dominance_rank(locus, &pair.first)?;
        let second = self.loci.dominance_rank(locus, &pair.second)?;
        if first < second {
            Ok((pair.first.clone(), Some(pair.second.clone()), AlleleOrigin::Paternal))
        } else {
            Ok((pair.second.clone(), Some(pair.first.clone()), AlleleOrigin::Maternal))
        }
    }
}

/// Apply one allele's edits to a template.
///
/// Edits are sorted by position, then checked for position 0, overlap and
/// reference-base agreement (case-insensitive). Output is only built once
/// every check has passed, so an error never leaves a partial mutation.
pub fn apply_edits(
    gene: &str,
    allele: &str,
    template: &str,
    edits: &[SequenceEdit],
) -> Result<(String, Vec<SequenceEdit>)> {
    let mut ordered: Vec<&SequenceEdit> = edits.iter().collect();
    ordered.sort_by_key(|e| e.position);

    let invalid = |edit: &SequenceEdit, reason: &str| GeneticsError::InvalidEdit {
        gene: gene.to_string(),
        allele: allele.to_string(),
        position: edit.position,
        reason: reason.to_string(),
    };

    let mut previous: Option<&SequenceEdit> = None;
    for &edit in &ordered {
        if edit.position == 0 {
            return Err(invalid(edit, "positions are 1-based"));
        }
        if !edit.is_ascii() {
            return Err(invalid(edit, "edit bases must be ASCII"));
        }
        match &edit.kind {
            EditKind::Deletion { reference } if reference.is_empty() => {
                return Err(invalid(edit, "deletion removes no bases"));
            }
            EditKind::Insertion { bases, .. } if bases.is_empty() => {
                return Err(invalid(edit, "insertion adds no bases"));
            }
            _ => {}
        }
        if let Some(prev) = previous {
            if edit.span().0 < prev.span().1 {
                return Err(GeneticsError::OverlappingEdit {
                    gene: gene.to_string(),
                    allele: allele.to_string(),
                    first: prev.position,
                    second: edit.position,
                });
            }
        }

        let expected = edit.expected();
        let start = edit.position - 1;
        let actual = start
            .checked_add(expected.len())
            .and_then(|end| template.get(start..end));
        match actual {
            Some(actual) if actual.eq_ignore_ascii_case(&expected) => {}
            other => {
                return Err(GeneticsError::TemplateMismatch {
                    gene: gene.to_string(),
                    position: edit.position,
                    expected,
                    actual: other.unwrap_or("<end of template>").to_string(),
                });
            }
        }
        previous = Some(edit);
    }

    let mut out = String::with_capacity(template.len());
    let mut cursor = 0;
    for edit in &ordered {
        let start = edit.position - 1;
        match &edit.kind {
            EditKind::Substitution { variant, .. } => {
                out.push_str(&template[cursor..start]);
                out.push(*variant);
                cursor = start + 1;
            }
            EditKind::Insertion { bases, .. } => {
                out.push_str(&template[cursor..=start]);
                out.push_str(bases);
                cursor = start + 1;
            }
            EditKind::Deletion { reference } => {
                out.push_str(&template[cursor..start]);
                cursor = start + reference.len();
            }
        }
    }
    out.push_str(&template[cursor..]);

    Ok((out, ordered.into_iter().cloned().collect()))
}
