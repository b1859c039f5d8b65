//! Phenotype Resolver — epistasis-ordered colour, pattern and coat length
//!
//! Stage order: E, K, A, B, D (colour, short-circuitable), then M, S, L
//! (independent channels, always evaluated).

pub mod palette;
pub mod stages;
mod resolver;

pub use palette::{Eumelanin, Phaeomelanin, Rgb, Shade};
pub use resolver::{Phenotype, PhenotypeDescription, PhenotypeResolver, Resolution, VisualParams};
pub use stages::{CoatLength, MerleTier, SpotPattern, Stage};
