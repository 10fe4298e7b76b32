//! Tournament business logic: setup, group play, standings, knockout.

mod group_play;
mod history;
mod identify;
mod knockout;
mod report;
mod seeding;
mod setup;
mod standings;

pub use group_play::{record_group_match, GroupMatchOutcome, CONFRONTATION_MATCHES};
pub use history::{get_confrontation_history, recent_matches, ConfrontationRecord, Stage};
pub use identify::identify_team;
pub use knockout::{
    final_winner, get_bracket_structure, provisional_winner, record_knockout_match,
    reset_knockout_phase, round_name, trigger_round_check, BracketView, KnockoutMatchOutcome,
    MatchupView, RoundView, KNOCKOUT_MATCHES,
};
pub use report::{parse_match_report, MatchReport};
pub use seeding::{generate_bracket, generate_bracket_with, qualifiers, SeedingPolicy};
pub use setup::{create_category, delete_category, delete_team, list_teams, register_team};
pub use standings::{get_standings, GroupStandings, Standing};
