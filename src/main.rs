use std::{io, path::PathBuf};

use biochem::{Mass, Massive, Molecule, ReferenceDatabase};
use cellsim::{
    GeneLibraryConfig, Model, ModelConfig, PROTEINS, RandomGenes, TranslationConfig,
};
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Simulates a pool of ribosomes translating randomly generated mRNAs into proteins
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The number of ticks to simulate
    #[arg(short, long, default_value_t = 100)]
    steps: usize,
    /// The number of ribosomes that start out free
    #[arg(short, long, default_value_t = 10)]
    ribosomes: usize,
    /// Seeds the random number generator, making the run reproducible
    #[arg(long)]
    seed: Option<u64>,
    /// A free ribosome only binds when a Poisson draw is greater than this
    #[arg(short, long, default_value_t = 1.0)]
    threshold: f64,
    /// The number of random genes to generate
    #[arg(short, long, default_value_t = 10)]
    genes: usize,
    /// A KDL file to use in place of the bundled reference database
    #[arg(short, long)]
    database: Option<PathBuf>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let db = match &args.database {
        Some(path) => {
            let kdl = std::fs::read_to_string(path).into_diagnostic()?;
            ReferenceDatabase::new(path.to_string_lossy(), kdl)?
        }
        None => ReferenceDatabase::default(),
    };
    info!(
        residues = db.residues().len(),
        nucleotides = db.nucleotides().len(),
        codons = db.genetic_code().len(),
        "reference database loaded"
    );

    let config = ModelConfig {
        free_ribosomes: args.ribosomes,
        seed: args.seed,
        translation: TranslationConfig {
            initiation_threshold: args.threshold,
        },
    };
    let library = GeneLibraryConfig {
        genes: args.genes,
        ..GeneLibraryConfig::default()
    };
    let provider = RandomGenes::new(&db, library);

    let mut model = Model::new(&db, config, &provider)?;
    model.simulate(args.steps)?;

    report(&model)
}

fn report(model: &Model) -> Result<()> {
    println!("After {} steps:", model.timestep());
    for (name, collection) in model.registry().iter() {
        println!("{name} ({} in total)", collection.count_all());
        for molecule in collection.names() {
            println!("  {molecule}: {}", collection.count(molecule));
        }
    }

    let proteins = model.registry().particles(PROTEINS)?;
    let total_mass: Mass = proteins
        .all_molecules()
        .filter_map(Molecule::as_protein)
        .map(Massive::mass)
        .sum();
    println!(
        "{} proteins were made, with a total mass of {} g/mol",
        proteins.all_molecules().count(),
        Decimal::from(total_mass).round_dp(4)
    );

    Ok(())
}
