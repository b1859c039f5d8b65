//! CrossEngine — stochastic draws and exact per-locus enumeration

use crate::error::Result;
use crate::locus::{AllelePair, Genotype, LocusTable};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Owner labels used in IncompleteGenotype errors
pub(crate) const SIRE: &str = "sire";
pub(crate) const DAM: &str = "dam";
pub(crate) const OFFSPRING: &str = "offspring";

/// One possible offspring pair at a locus and its exact probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocusOutcome {
    /// Dominant-first pair
    pub pair: AllelePair,
    pub probability: f64,
}

/// Combines two parent genotypes locus by locus
#[derive(Debug, Clone)]
pub struct CrossEngine {
    loci: Arc<LocusTable>,
}

impl CrossEngine {
    pub fn new(loci: Arc<LocusTable>) -> Self {
        Self { loci }
    }

    pub fn loci(&self) -> &LocusTable {
        &self.loci
    }

    /// Draw one offspring genotype. The first slot of every pair is the
    /// paternal allele, the second the maternal one.
    ///
    /// Both parents are checked for every table locus before any draw, so a
    /// failed call consumes nothing from `rng`.
    pub fn cross<R: Rng + ?Sized>(
        &self,
        sire: &Genotype,
        dam: &Genotype,
        rng: &mut R,
    ) -> Result<Genotype> {
        for locus in self.loci.ids() {
            self.loci.pair_ranks(locus, sire.require(locus, SIRE)?)?;
            self.loci.pair_ranks(locus, dam.require(locus, DAM)?)?;
        }

        let mut child = Genotype::new();
        for locus in self.loci.ids() {
            let paternal = sire.require(locus, SIRE)?.alleles()[rng.gen_range(0..2)];
            let maternal = dam.require(locus, DAM)?.alleles()[rng.gen_range(0..2)];
            child.insert(locus, AllelePair::new(paternal, maternal));
        }
        Ok(child)
    }

    /// Exact offspring distribution at one locus, most dominant pair first.
    /// Probabilities sum to 1.
    pub fn enumerate_locus_outcomes(
        &self,
        locus: &str,
        sire: &AllelePair,
        dam: &AllelePair,
    ) -> Result<Vec<LocusOutcome>> {
        self.loci.pair_ranks(locus, sire)?;
        self.loci.pair_ranks(locus, dam)?;

        let mut ranked: Vec<((usize, usize), LocusOutcome)> = Vec::with_capacity(4);
        for paternal in sire.alleles() {
            for maternal in dam.alleles() {
                let pair = self
                    .loci
                    .canonical_pair(locus, &AllelePair::new(paternal, maternal))?;
                match ranked.iter_mut().find(|(_, o)| o.pair == pair) {
                    Some((_, outcome)) => outcome.probability += 0.25,
                    None => {
                        let ranks = self.loci.pair_ranks(locus, &pair)?;
                        ranked.push((ranks, LocusOutcome { pair, probability: 0.25 }));
                    }
                }
            }
        }
        ranked.sort_by_key(|(ranks, _)| *ranks);
        Ok(ranked.into_iter().map(|(_, outcome)| outcome).collect())
    }

    /// Exact probability of one complete offspring genotype
    pub fn genotype_probability(
        &self,
        sire: &Genotype,
        dam: &Genotype,
        offspring: &Genotype,
    ) -> Result<f64> {
        let mut probability = 1.0;
        for locus in self.loci.ids() {
            let wanted = offspring.require(locus, OFFSPRING)?;
            let outcomes = self.enumerate_locus_outcomes(
                locus,
                sire.require(locus, SIRE)?,
                dam.require(locus, DAM)?,
            )?;
            probability *= outcomes
                .iter()
                .find(|o| o.pair == *wanted)
                .map(|o| o.probability)
                .unwrap_or(0.0);
        }
        Ok(probability)
    }
}
