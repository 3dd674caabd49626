//! CLI for inspecting and checking ID24 data tables.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use id24_data::{FeatureTier, TierPolicy};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "id24",
    about = "Inspect ID24 data tables at a chosen feature tier",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log loader decisions (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the feature tiers in order
    Tiers,

    /// Load every table in a file and report what the declared tier keeps
    Check {
        /// Table file (JSON)
        file: PathBuf,

        /// Feature tier the reader declares
        #[arg(short, long, default_value = "id24")]
        tier: FeatureTier,

        /// What to do with records above the declared tier
        #[arg(short, long, value_enum, default_value_t = Policy::Degrade)]
        policy: Policy,

        /// Clear unknown codepointers instead of failing
        #[arg(long)]
        allow_unknown_codepointers: bool,
    },

    /// Show the fields of one record a reader at the given tier may read
    Show {
        /// Table file (JSON)
        file: PathBuf,

        /// Table name (mobjinfo, states, weapons, ammo, sounds, sprites)
        table: String,

        /// Record index
        #[arg(allow_negative_numbers = true)]
        index: i32,

        /// Feature tier the reader declares
        #[arg(short, long, default_value = "id24")]
        tier: FeatureTier,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Policy {
    /// Fail on the first record above the declared tier
    Reject,
    /// Drop newer fields and keep going
    Degrade,
}

impl From<Policy> for TierPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Reject => TierPolicy::Reject,
            Policy::Degrade => TierPolicy::Degrade,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Tiers => commands::tiers::run(),
        Commands::Check {
            file,
            tier,
            policy,
            allow_unknown_codepointers,
        } => commands::check::run(&file, tier, policy.into(), allow_unknown_codepointers),
        Commands::Show {
            file,
            table,
            index,
            tier,
        } => commands::show::run(&file, &table, index, tier),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
