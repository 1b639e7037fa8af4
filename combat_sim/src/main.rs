//! Duel simulator entry point.

use anyhow::{anyhow, Context, Result};
use combat_core::config::GameData;
use combat_core::types::Team;
use combat_sim::{cli, DuelSimulation};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let data = match &args.config_dir {
        Some(dir) => GameData::load_dir(dir)
            .with_context(|| format!("loading game data from {}", dir.display()))?,
        None => GameData::default(),
    };
    let ability = data
        .ability(&args.ability)
        .ok_or_else(|| anyhow!("unknown ability '{}'", args.ability))?;

    let attacker = data.spawn("attacker", args.attacker, Team::Player, args.level);
    let defender = data.spawn(
        "defender",
        args.defender,
        Team::Enemy,
        args.defender_level.unwrap_or(args.level),
    );

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "starting duel");
    let mut rng = StdRng::seed_from_u64(seed);

    let result = DuelSimulation::run(
        &attacker,
        &defender,
        ability,
        args.level,
        args.hits,
        &data.classes,
        &mut rng,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{} ({}) vs {} (level {}), seed {}",
        ability.name,
        args.attacker,
        args.defender,
        defender.level,
        seed
    );
    println!("  hits:        {}", result.hit_count);
    println!("  blocked:     {} ({:.1}%)", result.block_count, result.block_rate());
    println!("  critical:    {} ({:.1}%)", result.crit_count, result.crit_rate());
    println!("  out of mana: {}", result.out_of_mana);
    println!("  damage:      {:.1} total, {:.1} per hit", result.total_damage, result.avg_damage());
    match result.killed_on_hit {
        Some(hit) => println!("  defender died on hit {hit}"),
        None => println!("  defender survived with {:.1} health", result.defender_health_after),
    }

    Ok(())
}
