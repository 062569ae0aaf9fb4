//! Planner CLI
//!
//! Reads a save file, lists characters, dumps inventories, and runs the
//! vessel optimizer against a build definition. Strictly read-only.

use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use relicplanner::build::BuildDefinition;
use relicplanner::data::GameData;
use relicplanner::inventory::CharacterSlot;
use relicplanner::inventory::parse_save;
use relicplanner::optimize::Optimizer;
use std::path::Path;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "relics", about = "Relic inventory and vessel build planner")]
struct Cli {
    /// directory holding the bundled reference tables
    #[arg(long, default_value = "resources")]
    resources: PathBuf,
    /// language for display names
    #[arg(long, default_value = "en_US")]
    language: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// list the character slots in a save file
    Characters { save: PathBuf },
    /// dump one character's relic inventory
    Inventory {
        save: PathBuf,
        /// character slot index
        #[arg(long, default_value_t = 0)]
        slot: usize,
        #[arg(long)]
        json: bool,
    },
    /// rank vessels for a build against one character's inventory
    Optimize {
        save: PathBuf,
        /// build definition JSON file
        #[arg(long)]
        build: PathBuf,
        /// character slot index
        #[arg(long, default_value_t = 0)]
        slot: usize,
        /// results to keep across all vessels
        #[arg(long, default_value_t = 10)]
        top: usize,
        /// results to keep per vessel
        #[arg(long, default_value_t = 3)]
        per_vessel: usize,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let data = GameData::load(&cli.resources, &cli.language)
        .with_context(|| format!("loading resources from {}", cli.resources.display()))?;
    match cli.command {
        Command::Characters { save } => {
            let (platform, characters) = load_save(&save, &data)?;
            println!("{} save, {} character(s)", platform, characters.len());
            for character in &characters {
                println!(
                    "  [{}] {} ({} relics)",
                    character.slot_index,
                    character.name,
                    character.inventory.len()
                );
            }
        }
        Command::Inventory { save, slot, json } => {
            let (_, characters) = load_save(&save, &data)?;
            let character = character_at(&characters, slot)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&character.inventory)?);
            } else {
                println!("{} ({} relics)", character.name, character.inventory.len());
                for relic in &character.inventory.relics {
                    println!(
                        "  {:#010x} {:<9} {:<8} {} {}",
                        relic.handle,
                        relic.tier.to_string(),
                        relic.color.to_string(),
                        relic.name,
                        if relic.is_deep { "(deep)" } else { "" }
                    );
                }
            }
        }
        Command::Optimize {
            save,
            build,
            slot,
            top,
            per_vessel,
            json,
        } => {
            let definition: BuildDefinition = serde_json::from_str(
                &std::fs::read_to_string(&build)
                    .with_context(|| format!("reading build {}", build.display()))?,
            )
            .context("parsing build definition")?;
            let (_, characters) = load_save(&save, &data)?;
            let character = character_at(&characters, slot)?;
            let results = Optimizer::new(&data).optimize_all_vessels(
                &definition,
                &character.inventory,
                &definition.character,
                top,
                per_vessel,
            )?;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                for (rank, result) in results.iter().enumerate() {
                    println!(
                        "#{:<2} {:>5} pts  {} {}",
                        rank + 1,
                        result.total_score,
                        result.vessel_name,
                        if result.meets_requirements {
                            ""
                        } else {
                            "(missing requirements)"
                        }
                    );
                    for assignment in &result.assignments {
                        match &assignment.relic {
                            Some(relic) => println!(
                                "      slot {} [{}] {:>4} pts  {}",
                                assignment.slot_index,
                                assignment.slot_color,
                                assignment.score,
                                relic.name
                            ),
                            None => println!(
                                "      slot {} [{}]   empty",
                                assignment.slot_index, assignment.slot_color
                            ),
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

fn load_save(
    path: &Path,
    data: &GameData,
) -> anyhow::Result<(relicplanner::save::Platform, Vec<CharacterSlot>)> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(parse_save(&bytes, &filename, data)?)
}

fn character_at(characters: &[CharacterSlot], slot: usize) -> anyhow::Result<&CharacterSlot> {
    characters
        .iter()
        .find(|c| c.slot_index == slot)
        .with_context(|| format!("no character in slot {}", slot))
}
