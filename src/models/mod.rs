//! Data structures for the team tennis tournament: teams, matches, bracket, tournament state.

mod bracket;
mod game;
mod team;
mod tournament;

pub use bracket::{Matchup, Round, Slot, BYE};
pub use game::{
    count_games, count_sets, join_set_scores, set_scores_text, Confrontation, IndividualMatch,
    SetScore, Side, MAX_SET_GAMES,
};
pub use team::{normalize_player, RankingKey, Team};
pub use tournament::{Category, KnockoutState, Tournament, TournamentError};
