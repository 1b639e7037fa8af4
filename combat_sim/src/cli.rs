//! Command-line interface for combat_sim

use clap::Parser;
use combat_core::types::CharacterClass;
use std::path::PathBuf;

/// Duel simulator for combat_core combatants
#[derive(Parser, Debug)]
#[command(name = "combat_sim")]
#[command(about = "Simulate one combatant attacking another and report hit statistics")]
#[command(version)]
pub struct Args {
    /// Class of the attacking player character
    #[arg(long, value_parser = parse_class, default_value = "elementalist")]
    pub attacker: CharacterClass,

    /// Class of the defending enemy
    #[arg(long, value_parser = parse_class, default_value = "warrior")]
    pub defender: CharacterClass,

    /// Ability id from abilities.toml
    #[arg(long, default_value = "basic_attack")]
    pub ability: String,

    /// Level of both combatants and of the ability
    #[arg(long, default_value_t = 1)]
    pub level: u32,

    /// Defender level, if different from the attacker's
    #[arg(long)]
    pub defender_level: Option<u32>,

    /// RNG seed; random if omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum number of ability activations
    #[arg(long, default_value_t = 20)]
    pub hits: u32,

    /// Directory holding classes.toml, abilities.toml and formulas.toml
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Print the result as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Parse a class name as written in the config files
pub fn parse_class(name: &str) -> Result<CharacterClass, String> {
    CharacterClass::all()
        .iter()
        .copied()
        .find(|class| class.to_string().eq_ignore_ascii_case(name))
        .ok_or_else(|| format!("unknown class '{name}', expected elementalist, warrior or ranger"))
}

pub fn parse_args() -> Args {
    Args::parse()
}
