//! Command-line front end: every command loads the state file, applies one
//! change or query, and saves the file back after a change.
//!
//! ```bash
//! tennis category add OPEN
//! tennis team add OPEN Alpha A "ana, beto"
//! tennis group-match OPEN "ana def. caro 6-4 6-3"
//! tennis standings OPEN
//! tennis knockout generate OPEN --advancing 2 --size 8
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tennis_tournament_web::persistence::DEFAULT_STATE_FILE;
use tennis_tournament_web::render::{bracket_dot, standings_csv};
use tennis_tournament_web::{
    create_category, delete_category, delete_team, generate_bracket_with, get_bracket_structure,
    get_confrontation_history, get_standings, list_teams, load_state, record_group_match,
    record_knockout_match, register_team, reset_knockout_phase, save_state, trigger_round_check,
    SeedingPolicy, Tournament,
};

#[derive(Parser)]
#[command(name = "tennis", about = "Team tennis tournament organizer")]
struct Cli {
    /// Tournament state file (JSON).
    #[arg(long, env = "TENNIS_STATE", default_value = DEFAULT_STATE_FILE)]
    state: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create or delete categories.
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Register, delete or list teams.
    #[command(subcommand)]
    Team(TeamCommand),
    /// Record a group match, e.g. "ana def. caro 6-4 6-3".
    GroupMatch { category: String, result: String },
    /// Ranked group tables.
    Standings {
        category: String,
        /// Print CSV instead of a text table.
        #[arg(long)]
        csv: bool,
    },
    /// Completed confrontations with their matches.
    History { category: String },
    #[command(subcommand)]
    Knockout(KnockoutCommand),
}

#[derive(Subcommand)]
enum CategoryCommand {
    Add { name: String },
    Remove { name: String },
    List,
}

#[derive(Subcommand)]
enum TeamCommand {
    Add {
        category: String,
        name: String,
        group: String,
        /// Comma-separated player names.
        players: String,
    },
    Remove { category: String, name: String },
    List { category: String },
}

#[derive(Subcommand)]
enum KnockoutCommand {
    /// Seed the bracket from group standings.
    Generate {
        category: String,
        #[arg(long, default_value_t = 2)]
        advancing: usize,
        #[arg(long, default_value_t = 8)]
        size: usize,
        /// Shuffle qualifiers instead of seeding by rank.
        #[arg(long)]
        draw: bool,
    },
    /// Record a knockout match.
    Match { category: String, result: String },
    /// Re-run the round completion check.
    Check { category: String },
    Reset { category: String },
    /// Print the bracket; `--dot` prints Graphviz source.
    Show {
        category: String,
        #[arg(long)]
        dot: bool,
    },
}

/// Outcome of a command: whether state changed, and what to print.
struct Done {
    changed: bool,
    output: String,
}

impl Done {
    fn changed(output: impl Into<String>) -> Self {
        Self {
            changed: true,
            output: output.into(),
        }
    }

    fn query(output: impl Into<String>) -> Self {
        Self {
            changed: false,
            output: output.into(),
        }
    }
}

type CliResult = Result<Done, Box<dyn std::error::Error>>;

fn run_category(t: &mut Tournament, cmd: CategoryCommand) -> CliResult {
    Ok(match cmd {
        CategoryCommand::Add { name } => {
            create_category(t, &name)?;
            Done::changed(format!("Category '{}' created", name.trim()))
        }
        CategoryCommand::Remove { name } => {
            delete_category(t, &name)?;
            Done::changed(format!("Category '{name}' deleted"))
        }
        CategoryCommand::List => Done::query(t.category_names().collect::<Vec<_>>().join("\n")),
    })
}

fn run_team(t: &mut Tournament, cmd: TeamCommand) -> CliResult {
    Ok(match cmd {
        TeamCommand::Add {
            category,
            name,
            group,
            players,
        } => {
            register_team(t.category_mut(&category)?, &name, &group, &players)?;
            Done::changed(format!(
                "Team '{}' registered in group {}",
                name.trim(),
                group.trim().to_uppercase()
            ))
        }
        TeamCommand::Remove { category, name } => {
            delete_team(t.category_mut(&category)?, &name)?;
            Done::changed(format!("Team '{name}' and all its matches were deleted"))
        }
        TeamCommand::List { category } => {
            let lines: Vec<String> = list_teams(t.category(&category)?)
                .map(|(name, team)| {
                    format!("[{}] {}: {}", team.group, name, team.players.join(", "))
                })
                .collect();
            Done::query(lines.join("\n"))
        }
    })
}

fn run_knockout(t: &mut Tournament, cmd: KnockoutCommand) -> CliResult {
    Ok(match cmd {
        KnockoutCommand::Generate {
            category,
            advancing,
            size,
            draw,
        } => {
            let policy = if draw {
                SeedingPolicy::Draw
            } else {
                SeedingPolicy::Ranked
            };
            generate_bracket_with(
                t.category_mut(&category)?,
                advancing,
                size,
                policy,
                &mut rand::thread_rng(),
            )?;
            Done::changed(format!("Knockout bracket of {size} generated"))
        }
        KnockoutCommand::Match { category, result } => {
            let outcome = record_knockout_match(t.category_mut(&category)?, &result)?;
            Done::changed(outcome.to_string())
        }
        KnockoutCommand::Check { category } => {
            let progress = trigger_round_check(t.category_mut(&category)?);
            Done::changed(format!("Round check done: {progress:?}"))
        }
        KnockoutCommand::Reset { category } => {
            reset_knockout_phase(t.category_mut(&category)?);
            Done::changed("Knockout phase reset")
        }
        KnockoutCommand::Show { category, dot } => {
            let cat = t.category(&category)?;
            if dot {
                return Ok(Done::query(bracket_dot(cat).unwrap_or_default()));
            }
            let view = get_bracket_structure(cat);
            let mut lines = Vec::new();
            for round in &view.rounds {
                lines.push(format!("== {}", round.name));
                for m in &round.matchups {
                    let mark = match &m.final_winner {
                        Some(w) => format!(" -> {w}"),
                        None => String::new(),
                    };
                    lines.push(format!(
                        "  {} vs {} ({}-{}){}",
                        m.slots[0], m.slots[1], m.wins[0], m.wins[1], mark
                    ));
                }
            }
            if let Some(champion) = &view.champion {
                lines.push(format!("Champion: {champion}"));
            }
            Done::query(lines.join("\n"))
        }
    })
}

fn run(t: &mut Tournament, command: Command) -> CliResult {
    match command {
        Command::Category(cmd) => run_category(t, cmd),
        Command::Team(cmd) => run_team(t, cmd),
        Command::Knockout(cmd) => run_knockout(t, cmd),
        Command::GroupMatch { category, result } => {
            let outcome = record_group_match(t.category_mut(&category)?, &result)?;
            Ok(Done::changed(outcome.to_string()))
        }
        Command::Standings { category, csv } => {
            let cat = t.category(&category)?;
            if csv {
                return Ok(Done::query(standings_csv(cat)?));
            }
            let mut lines = Vec::new();
            for group in get_standings(cat) {
                lines.push(format!("GROUP {}", group.group));
                lines.push(format!(
                    "{:<20} {:>6} {:>6} {:>6} {:>8} {:>9}",
                    "Team", "PJ (E)", "PG (E)", "PG (I)", "Dif Sets", "Dif Games"
                ));
                for r in &group.rows {
                    lines.push(format!(
                        "{:<20} {:>6} {:>6} {:>6} {:>8} {:>9}",
                        r.team,
                        r.team_matches_played,
                        r.team_matches_won,
                        r.individual_matches_won,
                        r.set_difference,
                        r.game_difference
                    ));
                }
            }
            Ok(Done::query(lines.join("\n")))
        }
        Command::History { category } => {
            let mut lines = Vec::new();
            for record in get_confrontation_history(t.category(&category)?) {
                let c = record.confrontation;
                lines.push(format!(
                    "{} vs {} | Winner: {} ({})",
                    c.teams[0], c.teams[1], c.winner, c.score
                ));
                for m in record.matches {
                    lines.push(format!("  {} def. {} ({})", m.p1, m.p2, m.score_line()));
                }
            }
            Ok(Done::query(lines.join("\n")))
        }
    }
}

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));
    let cli = Cli::parse();

    let mut tournament = match load_state(&cli.state) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    match run(&mut tournament, cli.command) {
        Ok(done) => {
            if done.changed {
                if let Err(e) = save_state(&cli.state, &tournament) {
                    eprintln!("Error: {e}");
                    return ExitCode::FAILURE;
                }
            }
            if !done.output.is_empty() {
                println!("{}", done.output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
