//! Reference data for the sequence mutator
//!
//! Templates and mutation tables are loaded once by a collaborator, handed in
//! as immutable values and shared behind `Arc`. Nothing here reads files.

use super::SequenceEdit;
use crate::error::{GeneticsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Gene name to template nucleotide text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateSet {
    templates: BTreeMap<String, Arc<str>>,
}

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template. Only ASCII nucleotide text is accepted so positions
    /// index bytes.
    pub fn insert(&mut self, gene: &str, sequence: &str) -> Result<()> {
        if !sequence.is_ascii() {
            return Err(GeneticsError::InvalidTemplate {
                gene: gene.to_string(),
                reason: "template contains non-ASCII characters".to_string(),
            });
        }
        self.templates.insert(gene.to_string(), Arc::from(sequence));
        Ok(())
    }

    pub fn with(mut self, gene: &str, sequence: &str) -> Result<Self> {
        self.insert(gene, sequence)?;
        Ok(self)
    }

    pub fn get(&self, gene: &str) -> Option<&Arc<str>> {
        self.templates.get(gene)
    }

    pub fn contains(&self, gene: &str) -> bool {
        self.templates.contains_key(gene)
    }

    pub fn genes(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Re-check every template after deserialization
    pub(crate) fn check(&self) -> Result<()> {
        for (gene, sequence) in &self.templates {
            if !sequence.is_ascii() {
                return Err(GeneticsError::InvalidTemplate {
                    gene: gene.clone(),
                    reason: "template contains non-ASCII characters".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Edits per allele for one locus, all against the same gene template.
/// Alleles with no entry (or an empty list) match the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocusMutations {
    pub gene: String,
    #[serde(default)]
    pub alleles: BTreeMap<String, Vec<SequenceEdit>>,
}

impl LocusMutations {
    pub fn new(gene: &str) -> Self {
        Self {
            gene: gene.to_string(),
            alleles: BTreeMap::new(),
        }
    }

    pub fn allele(mut self, allele: &str, edits: Vec<SequenceEdit>) -> Self {
        self.alleles.insert(allele.to_string(), edits);
        self
    }

    pub fn edits_for(&self, allele: &str) -> &[SequenceEdit] {
        self.alleles.get(allele).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Locus id to its gene and per-allele edits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MutationTable {
    loci: BTreeMap<String, LocusMutations>,
}

impl MutationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, locus: &str, mutations: LocusMutations) {
        self.loci.insert(locus.to_string(), mutations);
    }

    pub fn with(mut self, locus: &str, mutations: LocusMutations) -> Self {
        self.insert(locus, mutations);
        self
    }

    pub fn get(&self, locus: &str) -> Option<&LocusMutations> {
        self.loci.get(locus)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocusMutations)> {
        self.loci.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.loci.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loci.is_empty()
    }
}

/// Templates plus mutation table, loaded once and shared read-only
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SequenceReference {
    pub templates: TemplateSet,
    pub mutations: MutationTable,
}

impl SequenceReference {
    pub fn new(templates: TemplateSet, mutations: MutationTable) -> Self {
        Self { templates, mutations }
    }

    /// Parse a reference fixture handed over as JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let reference: SequenceReference = serde_json::from_str(json)?;
        reference.templates.check()?;
        Ok(reference)
    }
}
