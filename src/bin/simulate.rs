//! Pack completion simulator CLI.
//!
//! Run Monte Carlo simulations to estimate how many packs a player opens
//! before owning every standard card of the selected sets.
//!
//! Examples:
//!   packsim                                  # 1000 trials of the first set
//!   packsim --sets 0,1 --currency --bonus-draws
//!   packsim --sets "Tidal Echoes" --seed 42 --format json
//!   packsim --catalog my_sets.json --list-sets

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use packsim::build_info;
use packsim::catalog::{demo_catalog, load_catalog, Catalog, SetId};
use packsim::core::constants::DEFAULT_MAX_PACKS_PER_TRIAL;
use packsim::simulator::{run_simulation, SimConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "packsim")]
#[command(about = "Monte Carlo simulator for card-pack collection completion")]
#[command(version)]
struct Args {
    /// Sets to complete, by index or name (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    sets: Vec<String>,

    /// Number of trials
    #[arg(short = 'n', long, default_value_t = 1000)]
    trials: u32,

    /// Base seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Spend pack points on missing cards
    #[arg(long)]
    currency: bool,

    /// Claim bonus-draw offers with stamina
    #[arg(long)]
    bonus_draws: bool,

    /// Keep a premium pass active for the whole trial
    #[arg(long)]
    premium: bool,

    /// Packs opened before a trial is abandoned
    #[arg(long, default_value_t = DEFAULT_MAX_PACKS_PER_TRIAL)]
    max_packs: u32,

    /// Run trials in parallel
    #[arg(long)]
    parallel: bool,

    /// JSON catalog file (default: built-in demo catalog)
    #[arg(long, env = "PACKSIM_CATALOG")]
    catalog: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// List the catalog's sets and exit
    #[arg(long)]
    list_sets: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let catalog = match &args.catalog {
        Some(path) => load_catalog(path)
            .with_context(|| format!("failed to load catalog {}", path.display()))?,
        None => demo_catalog().context("built-in catalog is invalid")?,
    };

    if args.list_sets {
        list_sets(&catalog);
        return Ok(());
    }

    let config = SimConfig {
        sets: resolve_sets(&catalog, &args.sets)?,
        trials: args.trials,
        seed: args.seed,
        use_currency: args.currency,
        use_bonus_draws: args.bonus_draws,
        premium_pass: args.premium,
        max_packs_per_trial: args.max_packs,
        parallel: args.parallel,
        progress: true,
    };

    if args.format == OutputFormat::Text {
        print_header(&catalog, &config);
    }

    let report = run_simulation(&catalog, &config).context("simulation rejected")?;

    match args.format {
        OutputFormat::Text => println!("{}", report.to_text()),
        OutputFormat::Json => println!(
            "{}",
            report.to_json().context("failed to serialize report")?
        ),
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "packsim=info",
        1 => "packsim=debug",
        _ => "packsim=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Maps each `--sets` entry to a set id; numbers are indices, anything else
/// is matched against set names. No entries selects the first set.
fn resolve_sets(catalog: &Catalog, requested: &[String]) -> Result<Vec<SetId>> {
    if requested.is_empty() {
        return Ok(vec![0]);
    }
    requested
        .iter()
        .map(|entry| {
            let entry = entry.trim();
            if let Ok(id) = entry.parse::<SetId>() {
                return Ok(id);
            }
            match catalog.find(entry) {
                Some(id) => Ok(id),
                None => bail!("unknown set \"{entry}\" (see --list-sets)"),
            }
        })
        .collect()
}

fn list_sets(catalog: &Catalog) {
    for set in catalog.sets() {
        let packs: Vec<&str> = set.packs().iter().map(|p| p.name()).collect();
        println!(
            "{:>3}  {:<20} {:>4} cards ({} standard)  packs: {}",
            set.id(),
            set.name(),
            set.total_count(),
            set.standard_total(),
            packs.join(", ")
        );
    }
}

fn print_header(catalog: &Catalog, config: &SimConfig) {
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              PACK COMPLETION SIMULATOR                        ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!("{}", build_info::version_line());
    println!();
    println!("Configuration:");
    for id in &config.sets {
        if let Some(set) = catalog.set(*id) {
            println!("  Set:            {}", set.name());
        }
    }
    println!("  Trials:         {}", config.trials);
    println!("  Currency:       {}", config.use_currency);
    println!("  Bonus Draws:    {}", config.use_bonus_draws);
    println!("  Premium Pass:   {}", config.premium_pass);
    println!("  Max Packs:      {}", config.max_packs_per_trial);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();
}
