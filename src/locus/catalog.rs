//! Trait catalog — readable names for allele pairs, plus breed presets
//!
//! Breed presets are complete genotypes over all eight canine loci. Nothing
//! here fills in a missing locus on the caller's behalf.

use super::{AllelePair, Genotype, LocusTable, Parent};
use crate::error::{GeneticsError, Result};

/// (label, locus, first, second)
const TRAITS: &[(&str, &str, &str, &str)] = &[
    ("Black coat (full extension)", "E", "E", "E"),
    ("Black carries red", "E", "E", "e"),
    ("Golden/Recessive Red", "E", "e", "e"),
    ("Masked face", "E", "Em", "Em"),
    ("Masked face (carrier)", "E", "Em", "E"),
    ("Masked face (red carrier)", "E", "Em", "e"),
    ("Dominant solid black", "K", "Kb", "Kb"),
    ("Dominant black carries agouti", "K", "Kb", "ky"),
    ("Dominant black carries brindle", "K", "Kb", "kbr"),
    ("Brindle", "K", "kbr", "kbr"),
    ("Brindle carries agouti", "K", "kbr", "ky"),
    ("Allows A Locus expression", "K", "ky", "ky"),
    ("Sable/Fawn", "A", "Ay", "Ay"),
    ("Sable carries wolf sable", "A", "Ay", "aw"),
    ("Sable carries tan-point", "A", "Ay", "at"),
    ("Sable carries recessive black", "A", "Ay", "a"),
    ("Wolf Sable", "A", "aw", "aw"),
    ("Wolf Sable carries tan-point", "A", "aw", "at"),
    ("Wolf Sable carries recessive black", "A", "aw", "a"),
    ("Tan-point", "A", "at", "at"),
    ("Tan-point carries recessive black", "A", "at", "a"),
    ("Recessive black", "A", "a", "a"),
    ("Black eumelanin", "B", "B", "B"),
    ("Black carries brown", "B", "B", "b"),
    ("Brown/Liver eumelanin", "B", "b", "b"),
    ("Full color", "D", "D", "D"),
    ("Full color carries dilution", "D", "D", "d"),
    ("Diluted color (Blue/Isabella)", "D", "d", "d"),
    ("Double Merle (risk)", "M", "M", "M"),
    ("Merle", "M", "M", "m"),
    ("Non-merle (Solid)", "M", "m", "m"),
    ("Solid coat", "S", "S", "S"),
    ("Solid carries Irish spotting", "S", "S", "si"),
    ("Solid carries piebald", "S", "S", "sp"),
    ("Solid carries extreme white", "S", "S", "sw"),
    ("Irish Spotting", "S", "si", "si"),
    ("Irish Spotting carries piebald", "S", "si", "sp"),
    ("Piebald Spotting", "S", "sp", "sp"),
    ("Piebald carries extreme white", "S", "sp", "sw"),
    ("Extreme White", "S", "sw", "sw"),
    ("Short coat", "L", "L", "L"),
    ("Short coat carries long", "L", "L", "l"),
    ("Long coat", "L", "l", "l"),
];

/// Single-allele translation used for carrier text
const ALLELE_TEXT: &[(&str, &str)] = &[
    ("Em", "Masked face"),
    ("E", "Black coat"),
    ("e", "Golden/Recessive red"),
    ("Kb", "Solid black"),
    ("kbr", "Brindle"),
    ("ky", "Agouti pattern allowed"),
    ("Ay", "Sable/Fawn"),
    ("aw", "Wolf sable"),
    ("at", "Tan-point"),
    ("a", "Recessive black"),
    ("B", "Black eumelanin"),
    ("b", "Brown/Liver eumelanin"),
    ("D", "Full color"),
    ("d", "Diluted color"),
    ("M", "Merle"),
    ("m", "Non-merle"),
    ("S", "Solid coat"),
    ("si", "Irish spotting"),
    ("sp", "Piebald spotting"),
    ("sw", "Extreme white"),
    ("L", "Short coat"),
    ("l", "Long coat"),
];

/// Breed name, genotype notation over E K A B D M S L
const BREEDS: &[(&str, &str)] = &[
    ("Labrador Retriever", "E:E/E K:Kb/Kb A:Ay/Ay B:B/B D:D/D M:m/m S:S/S L:L/L"),
    ("German Shepherd", "E:E/E K:Kb/ky A:Ay/at B:B/B D:D/D M:m/m S:S/S L:L/l"),
    ("Siberian Husky", "E:E/E K:ky/ky A:aw/aw B:B/B D:d/d M:m/m S:S/S L:L/l"),
    ("Golden Retriever", "E:e/e K:ky/ky A:Ay/Ay B:B/B D:D/D M:m/m S:S/S L:l/l"),
    ("Rottweiler", "E:E/E K:Kb/Kb A:at/at B:B/B D:D/D M:m/m S:S/S L:L/L"),
    ("Great Dane", "E:E/E K:Kb/Kb A:Ay/Ay B:B/B D:d/d M:M/m S:S/S L:L/L"),
    ("French Bulldog", "E:E/E K:kbr/kbr A:Ay/Ay B:B/B D:D/D M:m/m S:S/sp L:L/L"),
    ("Poodle", "E:e/e K:ky/ky A:Ay/Ay B:b/b D:D/D M:m/m S:S/S L:L/L"),
    ("Border Collie", "E:E/E K:ky/ky A:at/at B:B/B D:D/D M:M/m S:si/si L:l/l"),
    ("Beagle", "E:E/E K:ky/ky A:aw/aw B:B/B D:D/D M:m/m S:sp/sp L:L/L"),
    ("Doberman", "E:E/E K:Kb/Kb A:at/at B:b/b D:d/d M:m/m S:S/S L:L/L"),
    ("Weimaraner", "E:E/E K:Kb/Kb A:Ay/Ay B:b/b D:d/d M:m/m S:S/S L:L/L"),
    ("Dalmatian", "E:E/E K:Kb/Kb A:Ay/Ay B:B/B D:D/D M:m/m S:sw/sw L:L/L"),
    ("Boxer", "E:Em/e K:kbr/kbr A:Ay/Ay B:B/B D:D/D M:m/m S:S/sw L:L/L"),
    ("Shiba Inu", "E:E/E K:ky/ky A:Ay/Ay B:B/B D:D/D M:m/m S:S/S L:L/L"),
    ("Pitbull", "E:E/E K:Kb/ky A:at/at B:b/b D:d/d M:m/m S:S/sp L:L/L"),
];

/// Label for a pair at a locus, if the catalog names it
pub fn trait_label(locus: &str, pair: &AllelePair) -> Option<&'static str> {
    TRAITS
        .iter()
        .find(|(_, l, a, b)| *l == locus && *pair == AllelePair::new(a, b))
        .map(|(label, ..)| *label)
}

/// Reverse lookup: the (locus, pair) a label stands for
pub fn pair_for_trait(label: &str) -> Option<(&'static str, AllelePair)> {
    TRAITS
        .iter()
        .find(|(name, ..)| name.eq_ignore_ascii_case(label))
        .map(|(_, locus, a, b)| (*locus, AllelePair::new(a, b)))
}

/// All labels registered for one locus, in catalog order
pub fn traits_for_locus(locus: &str) -> Vec<&'static str> {
    TRAITS
        .iter()
        .filter(|(_, l, ..)| *l == locus)
        .map(|(label, ..)| *label)
        .collect()
}

pub fn allele_text(allele: &str) -> Option<&'static str> {
    ALLELE_TEXT
        .iter()
        .find(|(symbol, _)| *symbol == allele)
        .map(|(_, text)| *text)
}

/// "Short coat (carries long coat)" style text, dominant allele first
pub fn pair_text(table: &LocusTable, locus: &str, pair: &AllelePair) -> Result<String> {
    let canonical = table.canonical_pair(locus, pair)?;
    let dominant = allele_text(&canonical.first).unwrap_or(canonical.first.as_str());
    if canonical.is_homozygous() {
        return Ok(dominant.to_string());
    }
    let carried = allele_text(&canonical.second).unwrap_or(canonical.second.as_str());
    Ok(format!("{} (carries {})", dominant, carried.to_lowercase()))
}

pub fn breed_names() -> impl Iterator<Item = &'static str> {
    BREEDS.iter().map(|(name, _)| *name)
}

/// "Golden Retriever" -> "golden-retriever"
pub fn breed_slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Genotype of a breed, matched by name or slug (case-insensitive)
pub fn breed_genotype(name: &str) -> Option<Genotype> {
    let wanted = breed_slug(name);
    BREEDS
        .iter()
        .find(|(breed, _)| breed_slug(breed) == wanted)
        .and_then(|(_, notation)| Genotype::parse(notation).ok())
}

impl Parent {
    /// A parent built from a breed preset with explicit per-locus overrides
    pub fn from_breed(
        name: impl Into<String>,
        breed: &str,
        overrides: &[(&str, AllelePair)],
        table: &LocusTable,
    ) -> Result<Self> {
        let mut genotype = breed_genotype(breed)
            .ok_or_else(|| GeneticsError::UnknownBreed(breed.to_string()))?;
        for (locus, pair) in overrides {
            genotype.insert(locus, pair.clone());
        }
        let name = name.into();
        genotype.validate(table, &name)?;
        let breed_name = breed_names()
            .find(|b| breed_slug(b) == breed_slug(breed))
            .map(str::to_string);
        Ok(Self {
            name,
            breed: breed_name,
            genotype,
        })
    }
}
