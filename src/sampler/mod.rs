//! Offspring Sampler — Monte Carlo driver over cross, resolver and mutator

mod config;
mod litter;

pub use config::SamplerConfig;
pub use litter::{Litter, OffspringSampler, Puppy};
