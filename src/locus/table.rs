//! LocusTable — static dominance tables for every coat locus
//!
//! Each locus lists its alleles from most to least dominant. The position in
//! that list is the dominance rank (0 = most dominant) and is the only ordering
//! the resolvers and the cross engine ever consult.

use super::AllelePair;
use crate::error::{GeneticsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A gene position with a fixed, dominance-ordered allele set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locus {
    /// Locus identifier, e.g. "E" or "K"
    pub id: String,
    /// Gene the locus maps to, when known (MC1R, ASIP, ...)
    pub gene: Option<String>,
    /// Allele symbols, most dominant first
    pub alleles: Vec<String>,
}

impl Locus {
    pub fn new(id: &str, gene: Option<&str>, alleles: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            gene: gene.map(str::to_string),
            alleles: alleles.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Rank of an allele at this locus, None if the symbol is foreign
    pub fn rank_of(&self, allele: &str) -> Option<usize> {
        self.alleles.iter().position(|a| a == allele)
    }

    /// Rank of the least dominant allele
    pub fn recessive_rank(&self) -> usize {
        self.alleles.len().saturating_sub(1)
    }
}

/// Immutable registry of loci, injected into every component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Locus>", into = "Vec<Locus>")]
pub struct LocusTable {
    loci: Vec<Locus>,
}

impl TryFrom<Vec<Locus>> for LocusTable {
    type Error = GeneticsError;

    fn try_from(loci: Vec<Locus>) -> Result<Self> {
        Self::new(loci)
    }
}

impl From<LocusTable> for Vec<Locus> {
    fn from(table: LocusTable) -> Self {
        table.loci
    }
}

impl LocusTable {
    /// Build a table, rejecting empty loci, duplicate ids and symbol collisions
    pub fn new(loci: Vec<Locus>) -> Result<Self> {
        let mut ids = HashSet::new();
        let mut symbols = HashSet::new();
        for locus in &loci {
            if !ids.insert(locus.id.as_str()) {
                return Err(GeneticsError::InvalidLocusTable(format!(
                    "duplicate locus id {}",
                    locus.id
                )));
            }
            if locus.alleles.is_empty() {
                return Err(GeneticsError::InvalidLocusTable(format!(
                    "locus {} has no alleles",
                    locus.id
                )));
            }
            for allele in &locus.alleles {
                if !symbols.insert(allele.as_str()) {
                    return Err(GeneticsError::InvalidLocusTable(format!(
                        "allele symbol '{}' at locus {} is already registered",
                        allele, locus.id
                    )));
                }
            }
        }
        Ok(Self { loci })
    }

    /// The canine coat table: E, K, A, B, D, M, S, L
    pub fn canine() -> Self {
        Self {
            loci: vec![
                Locus::new("E", Some("MC1R"), &["Em", "E", "e"]),
                Locus::new("K", Some("CBD103"), &["Kb", "kbr", "ky"]),
                Locus::new("A", Some("ASIP"), &["Ay", "aw", "at", "a"]),
                Locus::new("B", Some("TYRP1"), &["B", "b"]),
                Locus::new("D", Some("MLPH"), &["D", "d"]),
                Locus::new("M", Some("PMEL"), &["M", "m"]),
                Locus::new("S", Some("MITF"), &["S", "si", "sp", "sw"]),
                Locus::new("L", Some("FGF5"), &["L", "l"]),
            ],
        }
    }

    pub fn loci(&self) -> &[Locus] {
        &self.loci
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.loci.iter().map(|l| l.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.loci.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loci.is_empty()
    }

    pub fn locus(&self, id: &str) -> Result<&Locus> {
        self.loci
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| GeneticsError::UnknownLocus(id.to_string()))
    }

    /// Dominance rank of an allele (lower = more dominant)
    pub fn dominance_rank(&self, locus: &str, allele: &str) -> Result<usize> {
        self.locus(locus)?
            .rank_of(allele)
            .ok_or_else(|| GeneticsError::UnknownAllele {
                locus: locus.to_string(),
                allele: allele.to_string(),
            })
    }

    /// Whether `allele` belongs to `locus`; an unregistered locus is an error
    pub fn is_valid(&self, locus: &str, allele: &str) -> Result<bool> {
        Ok(self.locus(locus)?.rank_of(allele).is_some())
    }

    /// Reorder a pair dominant-first
    pub fn canonical_pair(&self, locus: &str, pair: &AllelePair) -> Result<AllelePair> {
        let first = self.dominance_rank(locus, &pair.first)?;
        let second = self.dominance_rank(locus, &pair.second)?;
        if second < first {
            Ok(AllelePair::new(&pair.second, &pair.first))
        } else {
            Ok(pair.clone())
        }
    }

    /// Ranks of a pair, dominant first
    pub fn pair_ranks(&self, locus: &str, pair: &AllelePair) -> Result<(usize, usize)> {
        let a = self.dominance_rank(locus, &pair.first)?;
        let b = self.dominance_rank(locus, &pair.second)?;
        Ok((a.min(b), a.max(b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canine_table_is_valid() {
        let table = LocusTable::canine();
        let rebuilt = LocusTable::new(table.loci().to_vec()).unwrap();
        assert_eq!(rebuilt.len(), 8);
        assert_eq!(
            table.ids().collect::<Vec<_>>(),
            vec!["E", "K", "A", "B", "D", "M", "S", "L"]
        );
    }

    #[test]
    fn test_dominance_rank() {
        let table = LocusTable::canine();
        assert_eq!(table.dominance_rank("A", "Ay").unwrap(), 0);
        assert_eq!(table.dominance_rank("A", "a").unwrap(), 3);
        assert_eq!(table.dominance_rank("K", "kbr").unwrap(), 1);
    }

    #[test]
    fn test_unknown_locus_and_allele() {
        let table = LocusTable::canine();
        assert!(matches!(
            table.dominance_rank("Z", "Z"),
            Err(GeneticsError::UnknownLocus(_))
        ));
        assert!(matches!(
            table.dominance_rank("E", "Kb"),
            Err(GeneticsError::UnknownAllele { .. })
        ));
        assert!(!table.is_valid("E", "Kb").unwrap());
        assert!(table.is_valid("E", "Em").unwrap());
        assert!(table.is_valid("Q", "x").is_err());
    }

    #[test]
    fn test_canonical_pair_is_dominant_first() {
        let table = LocusTable::canine();
        let pair = AllelePair::new("at", "Ay");
        let canonical = table.canonical_pair("A", &pair).unwrap();
        assert_eq!(canonical.first, "Ay");
        assert_eq!(canonical.second, "at");
        assert_eq!(canonical, pair);
    }

    #[test]
    fn test_rejects_symbol_collision() {
        let loci = vec![
            Locus::new("X", None, &["X", "x"]),
            Locus::new("Y", None, &["Y", "x"]),
        ];
        assert!(matches!(
            LocusTable::new(loci),
            Err(GeneticsError::InvalidLocusTable(_))
        ));
    }

    #[test]
    fn test_rejects_empty_locus() {
        let loci = vec![Locus::new("X", None, &[])];
        assert!(LocusTable::new(loci).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"[{"id":"X","gene":null,"alleles":["X","x"]},{"id":"X","gene":null,"alleles":["Y"]}]"#;
        let parsed: std::result::Result<LocusTable, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }
}
