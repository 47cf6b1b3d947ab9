use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sales_analytics::synth::SampleGenerator;
use sales_analytics::{loader, render, AmountPolicy, SalesAnalytics};

/// Generate and summarize sales transaction data.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a year of sample transactions as CSV.
    Generate {
        /// Output CSV path.
        out: PathBuf,
        /// Calendar year to cover.
        #[arg(long, default_value_t = 2024)]
        year: i32,
        /// RNG seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Load a CSV file and print the summary report.
    Report {
        /// Input CSV path; `.gz` files are decompressed transparently.
        input: PathBuf,
        /// Number of products in the top ranking.
        #[arg(long, default_value_t = sales_analytics::config::DEFAULT_TOP_PRODUCTS)]
        top: usize,
        /// Recompute stated amounts instead of rejecting mismatches.
        #[arg(long)]
        recompute: bool,
        /// Emit the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Generate { out, year, seed } => generate(&out, year, seed),
        Command::Report { input, top, recompute, json } => report(&input, top, recompute, json),
    }
}

fn generate(out: &Path, year: i32, seed: Option<u64>) -> Result<()> {
    let generator = SampleGenerator::for_year(year);
    let rows = match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            generator.generate_with(&mut rng)
        }
        None => generator.generate(),
    };
    eprintln!("Generated {} transactions for {}", rows.len(), year);

    loader::write_csv_path(out, &rows).with_context(|| format!("writing {}", out.display()))?;
    eprintln!("Wrote {}", out.display());
    Ok(())
}

fn report(input: &Path, top: usize, recompute: bool, json: bool) -> Result<()> {
    let policy = if recompute {
        AmountPolicy::Recompute
    } else {
        AmountPolicy::Reject
    };

    eprintln!("Loading {}...", input.display());
    let engine = SalesAnalytics::builder()
        .amount_policy(policy)
        .load_csv_path(input)
        .with_context(|| format!("loading {}", input.display()))?;
    eprintln!("{}", engine);

    let profile = engine.profile()?;
    eprint!("{}", render::render_profile(&profile));

    let summary = engine.summary(top)?;
    if json {
        println!("{}", render::render_json(&summary)?);
    } else {
        print!("{}", render::render_report(&summary));
    }
    Ok(())
}
