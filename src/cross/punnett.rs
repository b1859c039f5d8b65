//! Punnett summary — exact distributions for every locus, with trait labels

use super::engine::{CrossEngine, DAM, SIRE};
use crate::error::Result;
use crate::locus::catalog::trait_label;
use crate::locus::{AllelePair, Genotype};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One cell of the summary: pair, probability and catalog label if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunnettCell {
    pub pair: AllelePair,
    pub probability: f64,
    pub trait_label: Option<String>,
}

/// Exact offspring distribution at one locus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocusDistribution {
    pub locus: String,
    pub cells: Vec<PunnettCell>,
}

impl fmt::Display for LocusDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.locus)?;
        for cell in &self.cells {
            write!(
                f,
                " {} {:.0}% ({})",
                cell.pair,
                cell.probability * 100.0,
                cell.trait_label.as_deref().unwrap_or("Unknown")
            )?;
        }
        Ok(())
    }
}

impl CrossEngine {
    /// Distribution for every locus in table order
    pub fn punnett_square(&self, sire: &Genotype, dam: &Genotype) -> Result<Vec<LocusDistribution>> {
        let mut summary = Vec::with_capacity(self.loci().len());
        for locus in self.loci().ids() {
            let outcomes = self.enumerate_locus_outcomes(
                locus,
                sire.require(locus, SIRE)?,
                dam.require(locus, DAM)?,
            )?;
            let cells = outcomes
                .into_iter()
                .map(|o| PunnettCell {
                    trait_label: trait_label(locus, &o.pair).map(str::to_string),
                    pair: o.pair,
                    probability: o.probability,
                })
                .collect();
            summary.push(LocusDistribution {
                locus: locus.to_string(),
                cells,
            });
        }
        Ok(summary)
    }
}
