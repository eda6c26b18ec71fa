//! FASERIP action simulator
//!
//! Loads two combatant sheets, resolves one action between them with a
//! seeded roll and prints the outcome.

use clap::{Parser, ValueEnum};
use faserip_core::{
    load_rules, ActionOptions, ActionResolver, CombatOutcome, CombatantSheet,
    ConfigError, RngRoller, Rules, SystemClock,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
enum SimError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse sheet {path}: {source}")]
    Sheet {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to write sheet: {0}")]
    Write(#[from] std::io::Error),
    #[error("Failed to serialize: {0}")]
    Serialize(String),
    #[error(transparent)]
    Rules(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Resolve one FASERIP action between two combatants
#[derive(Parser, Debug)]
#[command(name = "faserip_sim")]
#[command(about = "Resolve a single FASERIP action and print the outcome")]
struct Args {
    /// Acting combatant sheet (TOML)
    attacker: PathBuf,

    /// Target combatant sheet (TOML)
    target: PathBuf,

    /// Action code, e.g. BA, EA, Sh, Gp
    action: String,

    /// Column shift applied to the actor's rank
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    column_shift: i32,

    /// Karma added to the roll
    #[arg(long, default_value_t = 0)]
    karma: u32,

    /// Weapon or power damage
    #[arg(long, default_value_t = 0)]
    weapon_damage: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Rules file (TOML); standard tables when omitted
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write spent karma back to the attacker sheet
    #[arg(long)]
    save: bool,
}

fn load_sheet(path: &Path) -> Result<CombatantSheet, SimError> {
    let content = fs::read_to_string(path).map_err(|source| SimError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| SimError::Sheet {
        path: path.to_path_buf(),
        source,
    })
}

fn load(path: Option<&Path>) -> Result<Rules, SimError> {
    match path {
        Some(path) => Ok(load_rules(path)?),
        None => Ok(Rules::standard()),
    }
}

fn render(outcome: &CombatOutcome, format: Format) -> Result<String, SimError> {
    match format {
        Format::Text => Ok(outcome.summary()),
        Format::Json => {
            serde_json::to_string_pretty(outcome).map_err(|e| SimError::Serialize(e.to_string()))
        }
    }
}

fn run(args: Args) -> Result<(), SimError> {
    let rules = load(args.rules.as_deref())?;
    let mut attacker = load_sheet(&args.attacker)?;
    let target = load_sheet(&args.target)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, action = %args.action, "Resolving action");

    let options = ActionOptions::default()
        .with_column_shift(args.column_shift)
        .with_karma(args.karma)
        .with_weapon_damage(args.weapon_damage);

    let outcome = ActionResolver::new(&rules).resolve_action(
        Some(&attacker),
        Some(&target),
        &args.action,
        &options,
        &mut RngRoller::new(ChaCha8Rng::seed_from_u64(seed)),
        &SystemClock,
    );

    println!("{}", render(&outcome, args.format)?);

    if outcome.apply_karma(&mut attacker) && args.save {
        let content = toml::to_string(&attacker).map_err(|e| SimError::Serialize(e.to_string()))?;
        fs::write(&args.attacker, content)?;
        info!(karma = attacker.karma, path = %args.attacker.display(), "Saved attacker sheet");
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
