//! OffspringSampler — Monte Carlo litters
//!
//! Each puppy is one cross followed by an independent resolution. Puppies
//! share no state, so a fixed seed replays the same litter draw for draw.

use super::SamplerConfig;
use crate::cross::CrossEngine;
use crate::error::{GeneticsError, Result};
use crate::locus::{AllelePair, Genotype, LocusTable, Parent};
use crate::phenotype::{Phenotype, PhenotypeResolver};
use crate::sequence::{SequenceBatch, SequenceMutator, SequenceReference};
use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// One resolved offspring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puppy {
    /// 1-based position in the litter
    pub index: usize,
    pub genotype: Genotype,
    pub phenotype: Phenotype,
    pub sequences: Option<SequenceBatch>,
    /// SHA-256 of the canonical genotype notation
    pub fingerprint: String,
}

/// A sampled litter and the seed that reproduces it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Litter {
    pub sire: Parent,
    pub dam: Parent,
    pub seed: u64,
    pub sampled_at: DateTime<Utc>,
    pub puppies: Vec<Puppy>,
}

impl Litter {
    pub fn len(&self) -> usize {
        self.puppies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puppies.is_empty()
    }

    /// Share of puppies carrying `pair` at `locus` (pair order ignored)
    pub fn genotype_frequency(&self, locus: &str, pair: &AllelePair) -> f64 {
        if self.puppies.is_empty() {
            return 0.0;
        }
        let hits = self
            .puppies
            .iter()
            .filter(|p| p.genotype.get(locus) == Some(pair))
            .count();
        hits as f64 / self.puppies.len() as f64
    }

    /// Short phenotype summary to number of puppies
    pub fn phenotype_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for puppy in &self.puppies {
            *counts
                .entry(puppy.phenotype.description.short.clone())
                .or_insert(0) += 1;
        }
        counts
    }

    pub fn distinct_genotypes(&self) -> usize {
        self.puppies
            .iter()
            .map(|p| p.fingerprint.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

/// Drives the cross engine, phenotype resolver and (optionally) the
/// sequence mutator over one shared locus table
#[derive(Debug, Clone)]
pub struct OffspringSampler {
    loci: Arc<LocusTable>,
    cross: CrossEngine,
    resolver: PhenotypeResolver,
    mutator: Option<SequenceMutator>,
}

impl OffspringSampler {
    pub fn new(loci: Arc<LocusTable>) -> Self {
        Self {
            cross: CrossEngine::new(loci.clone()),
            resolver: PhenotypeResolver::new(loci.clone()),
            mutator: None,
            loci,
        }
    }

    /// Enable sequence projection against a loaded reference
    pub fn with_reference(mut self, reference: Arc<SequenceReference>) -> Result<Self> {
        self.mutator = Some(SequenceMutator::new(self.loci.clone(), reference)?);
        Ok(self)
    }

    pub fn loci(&self) -> &LocusTable {
        &self.loci
    }

    pub fn cross_engine(&self) -> &CrossEngine {
        &self.cross
    }

    pub fn resolver(&self) -> &PhenotypeResolver {
        &self.resolver
    }

    /// Draw `count` puppies in order. Any error aborts the whole litter.
    pub fn sample_litter<R: Rng + ?Sized>(
        &self,
        sire: &Parent,
        dam: &Parent,
        count: usize,
        rng: &mut R,
        include_sequences: bool,
    ) -> Result<Vec<Puppy>> {
        let mutator = match (include_sequences, &self.mutator) {
            (false, _) => None,
            (true, Some(m)) => Some(m),
            (true, None) => return Err(GeneticsError::ReferenceUnavailable),
        };

        (1..=count)
            .map(|index| self.draw(index, sire, dam, &mut *rng, mutator))
            .collect()
    }

    /// A single puppy for a live preview, without sequences
    pub fn preview<R: Rng + ?Sized>(&self, sire: &Parent, dam: &Parent, rng: &mut R) -> Result<Puppy> {
        self.draw(1, sire, dam, rng, None)
    }

    fn draw<R: Rng + ?Sized>(
        &self,
        index: usize,
        sire: &Parent,
        dam: &Parent,
        rng: &mut R,
        mutator: Option<&SequenceMutator>,
    ) -> Result<Puppy> {
        let genotype = self.cross.cross(&sire.genotype, &dam.genotype, rng)?;
        let phenotype = self.resolver.resolve_phenotype(&genotype)?;
        let sequences = match mutator {
            Some(m) => Some(m.mutate_sequences(&genotype)?),
            None => None,
        };
        let fingerprint = genotype.fingerprint(&self.loci)?;
        debug!("Puppy {}: {}", index, phenotype.description.short);
        Ok(Puppy {
            index,
            genotype,
            phenotype,
            sequences,
            fingerprint,
        })
    }

    /// Sample a full litter as configured, recording the seed used
    pub fn sample_with_config(
        &self,
        sire: &Parent,
        dam: &Parent,
        config: &SamplerConfig,
    ) -> Result<Litter> {
        let (mut rng, seed) = config.rng();
        let puppies = self.sample_litter(
            sire,
            dam,
            config.litter_size,
            &mut rng,
            config.include_sequences,
        )?;
        let litter = Litter {
            sire: sire.clone(),
            dam: dam.clone(),
            seed,
            sampled_at: Utc::now(),
            puppies,
        };
        info!(
            "Sampled litter of {} from {} x {} (seed={}, distinct genotypes={})",
            litter.len(),
            sire.name,
            dam.name,
            seed,
            litter.distinct_genotypes()
        );
        Ok(litter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phenotype::palette::{CREAM, GOLDEN};
    use crate::sequence::{LocusMutations, MutationTable, SequenceEdit, TemplateSet};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sampler() -> OffspringSampler {
        OffspringSampler::new(Arc::new(LocusTable::canine()))
    }

    fn carrier(name: &str) -> Parent {
        let genotype =
            Genotype::parse("E:E/e K:Kb/ky A:Ay/at B:B/b D:D/d M:m/m S:S/S L:L/l").unwrap();
        Parent::new(name, genotype)
    }

    #[test]
    fn test_thousand_puppy_cross() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let puppies = sampler()
            .sample_litter(&carrier("sire"), &carrier("dam"), 1000, &mut rng, false)
            .unwrap();
        assert_eq!(puppies.len(), 1000);

        let red = AllelePair::homozygous("e");
        let reds: Vec<&Puppy> = puppies
            .iter()
            .filter(|p| p.genotype.get("E") == Some(&red))
            .collect();
        let share = reds.len() as f64 / 1000.0;
        assert!((0.19..=0.31).contains(&share), "e/e share {share}");

        // e/e masks K, A and B whatever was drawn there
        for puppy in reds {
            let body = puppy.phenotype.visual.body_color;
            assert!(body == GOLDEN || body == CREAM, "body {body:?}");
        }
    }

    #[test]
    fn test_same_seed_same_litter() {
        let s = sampler();
        let mut a = ChaCha8Rng::seed_from_u64(11);
        let mut b = ChaCha8Rng::seed_from_u64(11);
        let first = s.sample_litter(&carrier("a"), &carrier("b"), 20, &mut a, false).unwrap();
        let second = s.sample_litter(&carrier("a"), &carrier("b"), 20, &mut b, false).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].index, 1);
        assert_eq!(first[19].index, 20);
    }

    #[test]
    fn test_sequences_need_reference() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = sampler()
            .sample_litter(&carrier("a"), &carrier("b"), 3, &mut rng, true)
            .unwrap_err();
        assert!(matches!(err, GeneticsError::ReferenceUnavailable));
    }

    #[test]
    fn test_sequences_attached_when_requested() {
        let templates = TemplateSet::new().with("MC1R", "AACCGG").unwrap();
        let mutations = MutationTable::new().with(
            "E",
            LocusMutations::new("MC1R").allele("e", vec![SequenceEdit::substitution(4, 'C', 'T')]),
        );
        let s = sampler()
            .with_reference(Arc::new(SequenceReference::new(templates, mutations)))
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let puppies = s
            .sample_litter(&carrier("a"), &carrier("b"), 40, &mut rng, true)
            .unwrap();
        for puppy in &puppies {
            let batch = puppy.sequences.as_ref().unwrap();
            let mc1r = batch.get("MC1R").unwrap();
            let recessive = puppy.genotype.get("E") == Some(&AllelePair::homozygous("e"));
            assert_eq!(mc1r.sequence == "AACTGG", recessive);
        }
    }

    #[test]
    fn test_incomplete_parent_is_rejected() {
        let partial = Parent::new("dam", Genotype::parse("E:E/e K:Kb/ky").unwrap());
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let err = sampler()
            .sample_litter(&carrier("sire"), &partial, 4, &mut rng, false)
            .unwrap_err();
        assert!(matches!(err, GeneticsError::IncompleteGenotype { owner, .. } if owner == "dam"));
    }

    #[test]
    fn test_litter_statistics() {
        let table = LocusTable::canine();
        let lab = Parent::from_breed("Rex", "Labrador Retriever", &[], &table).unwrap();
        let config = SamplerConfig::default().with_seed(8);
        let litter = sampler().sample_with_config(&lab, &lab, &config).unwrap();

        assert_eq!(litter.len(), 6);
        assert_eq!(litter.seed, 8);
        assert_eq!(litter.distinct_genotypes(), 1);
        assert_eq!(litter.genotype_frequency("K", &AllelePair::homozygous("Kb")), 1.0);
        assert_eq!(litter.genotype_frequency("K", &AllelePair::homozygous("ky")), 0.0);
        let counts = litter.phenotype_counts();
        assert_eq!(counts.values().sum::<usize>(), 6);
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_preview_single_puppy() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let puppy = sampler().preview(&carrier("a"), &carrier("b"), &mut rng).unwrap();
        assert_eq!(puppy.index, 1);
        assert_eq!(puppy.genotype.len(), 8);
        assert_eq!(puppy.fingerprint.len(), 64);
    }
}
