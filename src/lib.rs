//! Team tennis tournament: library with models, business logic, persistence and rendering.

pub mod config;
pub mod logic;
pub mod models;
pub mod persistence;
pub mod render;

pub use logic::{
    create_category, delete_category, delete_team, final_winner, generate_bracket,
    generate_bracket_with, get_bracket_structure, get_confrontation_history, get_standings,
    identify_team, list_teams, parse_match_report, provisional_winner, qualifiers, recent_matches,
    record_group_match, record_knockout_match, register_team, reset_knockout_phase, round_name,
    trigger_round_check, BracketView, ConfrontationRecord, GroupMatchOutcome, GroupStandings,
    KnockoutMatchOutcome, MatchReport, MatchupView, RoundView, SeedingPolicy, Stage, Standing,
    CONFRONTATION_MATCHES, KNOCKOUT_MATCHES,
};
pub use models::{
    Category, Confrontation, IndividualMatch, KnockoutState, Matchup, Round, SetScore, Side, Slot,
    Team, Tournament, TournamentError, BYE, MAX_SET_GAMES,
};
pub use persistence::{load_state, save_state, StateError};
