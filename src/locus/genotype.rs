//! Genotype — the diploid allele pair held at each locus
//!
//! Pair order carries no meaning for equality. For offspring produced by the
//! cross engine the slots do record origin: `first` came from the sire and
//! `second` from the dam.

use super::LocusTable;
use crate::error::{GeneticsError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An unordered pair of allele symbols at one locus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllelePair {
    pub first: String,
    pub second: String,
}

impl AllelePair {
    pub fn new(first: &str, second: &str) -> Self {
        Self {
            first: first.to_string(),
            second: second.to_string(),
        }
    }

    pub fn homozygous(allele: &str) -> Self {
        Self::new(allele, allele)
    }

    pub fn is_homozygous(&self) -> bool {
        self.first == self.second
    }

    pub fn contains(&self, allele: &str) -> bool {
        self.first == allele || self.second == allele
    }

    pub fn alleles(&self) -> [&str; 2] {
        [&self.first, &self.second]
    }

    fn sorted(&self) -> (&str, &str) {
        if self.first <= self.second {
            (&self.first, &self.second)
        } else {
            (&self.second, &self.first)
        }
    }
}

impl PartialEq for AllelePair {
    fn eq(&self, other: &Self) -> bool {
        self.sorted() == other.sorted()
    }
}

impl Eq for AllelePair {}

impl Hash for AllelePair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted().hash(state);
    }
}

impl fmt::Display for AllelePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.first, self.second)
    }
}

/// Mapping from locus id to allele pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genotype {
    loci: BTreeMap<String, AllelePair>,
}

impl Genotype {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, locus: &str, first: &str, second: &str) -> Self {
        self.insert(locus, AllelePair::new(first, second));
        self
    }

    pub fn insert(&mut self, locus: &str, pair: AllelePair) {
        self.loci.insert(locus.to_string(), pair);
    }

    pub fn get(&self, locus: &str) -> Option<&AllelePair> {
        self.loci.get(locus)
    }

    /// Pair at `locus`, or IncompleteGenotype naming `owner`
    pub fn require(&self, locus: &str, owner: &str) -> Result<&AllelePair> {
        self.loci
            .get(locus)
            .ok_or_else(|| GeneticsError::IncompleteGenotype {
                owner: owner.to_string(),
                locus: locus.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AllelePair)> {
        self.loci.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.loci.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loci.is_empty()
    }

    /// Check every locus is registered, every allele belongs to it, and every
    /// table locus is present
    pub fn validate(&self, table: &LocusTable, owner: &str) -> Result<()> {
        for (locus, pair) in self.iter() {
            table.pair_ranks(locus, pair)?;
        }
        for id in table.ids() {
            self.require(id, owner)?;
        }
        Ok(())
    }

    /// Compact notation in table order, e.g. "E:E/e K:Kb/ky ..."
    pub fn notation(&self, table: &LocusTable) -> Result<String> {
        let mut parts = Vec::with_capacity(self.len());
        for id in table.ids() {
            if let Some(pair) = self.get(id) {
                parts.push(format!("{}:{}", id, table.canonical_pair(id, pair)?));
            }
        }
        for (locus, _) in self.iter() {
            table.locus(locus)?;
        }
        Ok(parts.join(" "))
    }

    /// Parse "E:E/e K:Kb/ky" notation; symbols are not validated here
    pub fn parse(text: &str) -> Result<Genotype> {
        let mut genotype = Genotype::new();
        for token in text.split_whitespace() {
            let (locus, pair) = token
                .split_once(':')
                .ok_or_else(|| GeneticsError::UnknownLocus(token.to_string()))?;
            let (a, b) = pair
                .split_once('/')
                .ok_or_else(|| GeneticsError::UnknownAllele {
                    locus: locus.to_string(),
                    allele: pair.to_string(),
                })?;
            genotype.insert(locus, AllelePair::new(a, b));
        }
        Ok(genotype)
    }

    /// SHA-256 over the canonical notation, hex encoded
    pub fn fingerprint(&self, table: &LocusTable) -> Result<String> {
        let mut hasher = Sha256::new();
        hasher.update(self.notation(table)?.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}

/// A breeding parent; the core never mutates it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parent {
    pub name: String,
    pub breed: Option<String>,
    pub genotype: Genotype,
}

impl Parent {
    pub fn new(name: impl Into<String>, genotype: Genotype) -> Self {
        Self {
            name: name.into(),
            breed: None,
            genotype,
        }
    }
}
