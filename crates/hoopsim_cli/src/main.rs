//! Hoopsim CLI
//!
//! Run a full simulated game from a seed and tactics, printing the
//! play-by-play and box score, or emit the raw JSON response. The batch
//! mode fans seeds out in parallel and reports aggregate stats.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use hoopsim_core::calibration::simulate_batch;
use hoopsim_core::engine::run_game;
use hoopsim_core::models::{DefenseTactic, OffenseTactic, TeamTactics};

#[derive(Parser)]
#[command(name = "hoopsim")]
#[command(about = "Deterministic basketball game simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one game and print the result
    Simulate {
        /// Game seed; the same seed always produces the same game
        #[arg(long, default_value = "42")]
        seed: u32,

        /// Home offense: fast_break | motion | shoot | inside | iso
        #[arg(long, default_value = "motion")]
        home_offense: String,

        /// Home defense: man | zone | press | gamble | fortress
        #[arg(long, default_value = "man")]
        home_defense: String,

        /// Away offense
        #[arg(long, default_value = "motion")]
        away_offense: String,

        /// Away defense
        #[arg(long, default_value = "man")]
        away_defense: String,

        /// Emit the full result as JSON instead of tables
        #[arg(long, default_value = "false")]
        json: bool,

        /// Print the play-by-play log
        #[arg(long, default_value = "false")]
        play_by_play: bool,
    },

    /// Simulate many seeds in parallel and print aggregate stats
    Batch {
        /// Number of games, seeded 0..count
        #[arg(long, default_value = "100")]
        count: u32,

        #[arg(long, default_value = "motion")]
        offense: String,

        #[arg(long, default_value = "man")]
        defense: String,
    },
}

fn parse_offense(s: &str) -> Result<OffenseTactic> {
    Ok(match s {
        "fast_break" => OffenseTactic::FastBreak,
        "motion" => OffenseTactic::Motion,
        "shoot" => OffenseTactic::Shoot,
        "inside" => OffenseTactic::Inside,
        "iso" => OffenseTactic::Iso,
        other => bail!("unknown offense tactic: {}", other),
    })
}

fn parse_defense(s: &str) -> Result<DefenseTactic> {
    Ok(match s {
        "man" => DefenseTactic::Man,
        "zone" => DefenseTactic::Zone,
        "press" => DefenseTactic::Press,
        "gamble" => DefenseTactic::Gamble,
        "fortress" => DefenseTactic::Fortress,
        other => bail!("unknown defense tactic: {}", other),
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Simulate {
            seed,
            home_offense,
            home_defense,
            away_offense,
            away_defense,
            json,
            play_by_play,
        } => {
            let home = TeamTactics {
                offense: parse_offense(&home_offense)?,
                defense: parse_defense(&home_defense)?,
            };
            let away = TeamTactics {
                offense: parse_offense(&away_offense)?,
                defense: parse_defense(&away_defense)?,
            };
            let result = run_game(seed, home, away);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }

            if play_by_play {
                for entry in &result.log {
                    println!(
                        "Q{} {:>5}  {:>3}-{:<3}  {}",
                        entry.quarter, entry.time, entry.score_home, entry.score_away, entry.text
                    );
                }
                println!();
            }

            println!("Final: Home {} - {} Away", result.score_home, result.score_away);
            println!("Pace: {} / {} possessions", result.possessions_home, result.possessions_away);
            println!();
            print_box_score(&result.box_scores);
        }
        Commands::Batch { count, offense, defense } => {
            let tactics =
                TeamTactics { offense: parse_offense(&offense)?, defense: parse_defense(&defense)? };
            let seeds: Vec<u32> = (0..count).collect();
            let stats = simulate_batch(&seeds, tactics, TeamTactics::default());
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}

fn print_box_score(lines: &[hoopsim_core::PlayerBoxScore]) {
    println!(
        "{:<10} {:>4} {:>4} {:>7} {:>7} {:>7} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4}",
        "Player", "MIN", "PTS", "FG", "3P", "FT", "OREB", "DREB", "AST", "STL", "BLK", "TO", "+/-"
    );
    for line in lines {
        println!(
            "{:<10} {:>4.0} {:>4} {:>3}/{:<3} {:>3}/{:<3} {:>3}/{:<3} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4}",
            line.name,
            line.minutes,
            line.points,
            line.fg_made,
            line.fg_attempted,
            line.three_made,
            line.three_attempted,
            line.ft_made,
            line.ft_attempted,
            line.off_rebounds,
            line.def_rebounds,
            line.assists,
            line.steals,
            line.blocks,
            line.turnovers,
            line.plus_minus
        );
    }
}
