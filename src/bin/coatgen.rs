//! coatgen CLI — breed presets, Punnett summaries and sampled litters
//!
//! Commands:
//!   coatgen breeds    — list breed presets
//!   coatgen traits    — list trait labels, optionally for one locus
//!   coatgen describe  — resolve a breed preset's phenotype
//!   coatgen punnett   — exact per-locus offspring distribution
//!   coatgen litter    — sample a seeded litter

use coatgen_core::locus::catalog::{breed_genotype, breed_names, pair_text, traits_for_locus};
use coatgen_core::{LocusTable, OffspringSampler, Parent, SamplerConfig};
use log::warn;
use std::env;
use std::process;
use std::str::FromStr;
use std::sync::Arc;

fn print_usage() {
    println!(
        r#"
coatgen — canine coat genetics

Usage: coatgen <command> [options]

Commands:
  breeds                                   List breed presets
  traits     [locus]                       List trait labels
  describe   <breed>                       Show a breed's genotype and phenotype
  punnett    <sire-breed> <dam-breed>      Exact offspring distribution per locus
  litter     <sire-breed> <dam-breed> [count] [seed]
                                           Sample a litter (default 6 puppies)
  help                                     Show this message

Breeds may be given by name or slug, e.g. "Border Collie" or border-collie.

Examples:
  coatgen describe doberman
  coatgen punnett german-shepherd siberian-husky
  coatgen litter labrador-retriever golden-retriever 10 42
"#
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let table = Arc::new(LocusTable::canine());
    let result = match args[1].as_str() {
        "breeds" => cmd_breeds(&table),
        "traits" => {
            cmd_traits(&table, &args[2..]);
            Ok(())
        }
        "describe" => cmd_describe(&table, &args[2..]),
        "punnett" => cmd_punnett(&table, &args[2..]),
        "litter" => cmd_litter(&table, &args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("  Error: {}", e);
        process::exit(1);
    }
}

fn cmd_breeds(table: &LocusTable) -> coatgen_core::Result<()> {
    println!("\n  Breed presets");
    println!("  {}", "=".repeat(40));
    for name in breed_names() {
        if let Some(genotype) = breed_genotype(name) {
            println!("  {:<22} {}", name, genotype.notation(table)?);
        }
    }
    Ok(())
}

fn cmd_traits(table: &LocusTable, args: &[String]) {
    let wanted: Vec<&str> = match args.first() {
        Some(locus) => vec![locus.as_str()],
        None => table.ids().collect(),
    };
    for locus in wanted {
        println!("\n  {} locus", locus);
        for label in traits_for_locus(locus) {
            println!("    {}", label);
        }
    }
}

fn parent(name: &str, breed: &str, table: &LocusTable) -> coatgen_core::Result<Parent> {
    Parent::from_breed(name, breed, &[], table)
}

fn cmd_describe(table: &Arc<LocusTable>, args: &[String]) -> coatgen_core::Result<()> {
    if args.is_empty() {
        eprintln!("Usage: coatgen describe <breed>");
        return Ok(());
    }

    let dog = parent("dog", &args[0], table)?;
    let sampler = OffspringSampler::new(table.clone());
    let phenotype = sampler.resolver().resolve_phenotype(&dog.genotype)?;

    println!("\n  {}", dog.breed.as_deref().unwrap_or(&args[0]));
    println!("  {}", "=".repeat(40));
    println!("  Genotype: {}", dog.genotype.notation(table)?);
    for (locus, pair) in dog.genotype.iter() {
        println!("    {}: {:<8} {}", locus, pair.to_string(), pair_text(table, locus, pair)?);
    }
    println!("\n  {}", phenotype.description.full);
    let visual = &phenotype.visual;
    println!(
        "  Body {}  Head {}  Legs {}  scale {:.2}  snout {:.2}",
        visual.body_color.hex(),
        visual.head_color.hex(),
        visual.leg_color.hex(),
        visual.leg_scale,
        visual.snout_length
    );
    Ok(())
}

fn cmd_punnett(table: &Arc<LocusTable>, args: &[String]) -> coatgen_core::Result<()> {
    if args.len() < 2 {
        eprintln!("Usage: coatgen punnett <sire-breed> <dam-breed>");
        return Ok(());
    }

    let sire = parent("sire", &args[0], table)?;
    let dam = parent("dam", &args[1], table)?;
    let sampler = OffspringSampler::new(table.clone());
    let summary = sampler.cross_engine().punnett_square(&sire.genotype, &dam.genotype)?;

    println!("\n  Punnett summary: {} x {}", args[0], args[1]);
    println!("  {}", "=".repeat(40));
    for distribution in summary {
        println!("  {}", distribution);
    }
    Ok(())
}

fn cmd_litter(table: &Arc<LocusTable>, args: &[String]) -> coatgen_core::Result<()> {
    if args.len() < 2 {
        eprintln!("Usage: coatgen litter <sire-breed> <dam-breed> [count] [seed]");
        return Ok(());
    }

    let sire = parent("sire", &args[0], table)?;
    let dam = parent("dam", &args[1], table)?;
    let mut config = SamplerConfig::default();
    if let Some(count) = optional_arg(args, 2, "count") {
        config.litter_size = count;
    }
    config.seed = optional_arg(args, 3, "seed");

    let sampler = OffspringSampler::new(table.clone());
    let litter = sampler.sample_with_config(&sire, &dam, &config)?;

    println!("\n  Litter: {} x {} (seed {})", args[0], args[1], litter.seed);
    println!("  {}", "=".repeat(40));
    for puppy in &litter.puppies {
        println!(
            "  #{:<3} {}  {}",
            puppy.index,
            puppy.genotype.notation(table)?,
            puppy.phenotype.description.short
        );
    }
    println!("\n  Phenotypes");
    for (summary, count) in litter.phenotype_counts() {
        println!("    {:>4}  {}", count, summary);
    }
    println!("  Distinct genotypes: {}", litter.distinct_genotypes());
    Ok(())
}

/// Positional argument, parsed. A value that is given but does not parse is
/// reported and then ignored.
fn optional_arg<T: FromStr>(args: &[String], index: usize, name: &str) -> Option<T> {
    let raw = args.get(index)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {} '{}': not a valid number", name, raw);
            None
        }
    }
}
