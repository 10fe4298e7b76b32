//! Knockout phase: best-of-three matchups, round advancement, champion.

use crate::logic::group_play::{build_match, most_wins};
use crate::logic::identify::resolve_teams;
use crate::logic::report::parse_match_report;
use crate::models::{Category, KnockoutState, Matchup, Round, Slot, TournamentError};
use serde::Serialize;
use std::fmt;

/// Matches a knockout pair plays before one side advances.
pub const KNOCKOUT_MATCHES: usize = 3;

/// Result of recording one knockout match.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KnockoutMatchOutcome {
    pub winner: String,
    /// Bracket state after the round check that follows the match.
    pub state: KnockoutState,
}

impl fmt::Display for KnockoutMatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Knockout match recorded: {} wins.", self.winner)
    }
}

/// Individual wins of each team of a matchup, and matches played between them.
fn tally(category: &Category, a: &str, b: &str) -> (u32, u32, usize) {
    category
        .knockout_matches_between(a, b)
        .fold((0, 0, 0), |(wa, wb, n), m| {
            if m.winner == a {
                (wa + 1, wb, n + 1)
            } else {
                (wa, wb + 1, n + 1)
            }
        })
}

/// Winner for live display: two match wins decide early; a BYE loses outright.
pub fn provisional_winner(category: &Category, matchup: &Matchup) -> Option<Slot> {
    match matchup {
        Matchup(a, Slot::Bye) => Some(a.clone()),
        Matchup(Slot::Bye, b) => Some(b.clone()),
        Matchup(Slot::Team(a), Slot::Team(b)) => {
            let (wa, wb, _) = tally(category, a, b);
            if wa >= 2 {
                Some(Slot::team(a.as_str()))
            } else if wb >= 2 {
                Some(Slot::team(b.as_str()))
            } else {
                None
            }
        }
    }
}

/// Winner that advances: all three matches must be played, unless one side is a BYE.
pub fn final_winner(category: &Category, matchup: &Matchup) -> Option<Slot> {
    match matchup {
        Matchup(a, Slot::Bye) => Some(a.clone()),
        Matchup(Slot::Bye, b) => Some(b.clone()),
        Matchup(Slot::Team(a), Slot::Team(b)) => {
            let played: Vec<&str> = category
                .knockout_matches_between(a, b)
                .map(|m| m.winner.as_str())
                .collect();
            if played.len() < KNOCKOUT_MATCHES {
                return None;
            }
            most_wins(played.into_iter()).map(|(w, _)| Slot::team(w))
        }
    }
}

/// Record a knockout result line for a pair scheduled in the current round.
pub fn record_knockout_match(
    category: &mut Category,
    line: &str,
) -> Result<KnockoutMatchOutcome, TournamentError> {
    let report = parse_match_report(line)?;
    let (t1, t2) = resolve_teams(&report, &category.teams)?;

    let scheduled = category.champion.is_none()
        && category
            .current_round()
            .is_some_and(|round| round.iter().any(|m| m.pairs(&t1, &t2)));
    if !scheduled {
        return Err(TournamentError::NoActiveMatchup(t1, t2));
    }
    if category.knockout_matches_between(&t1, &t2).count() >= KNOCKOUT_MATCHES {
        return Err(TournamentError::MatchLimit(t1, t2));
    }

    let m = build_match(&report, t1, t2);
    let winner = m.winner.clone();
    log::debug!(
        "Knockout match {} vs {}: {} ({})",
        m.team1,
        m.team2,
        winner,
        m.score_line()
    );
    category.knockout_individual_matches.push(m);

    let state = trigger_round_check(category);
    Ok(KnockoutMatchOutcome { winner, state })
}

/// Advance the bracket as far as recorded results allow.
///
/// While every matchup of the current round has a final winner: a single winner
/// becomes champion; otherwise consecutive winners are paired into a new round
/// (an odd one out meets a BYE). Calling again with no new matches changes nothing.
pub fn trigger_round_check(category: &mut Category) -> KnockoutState {
    while category.champion.is_none() {
        let Some(round) = category.current_round().filter(|r| !r.is_empty()) else {
            break;
        };
        let winners: Option<Vec<Slot>> = round.iter().map(|m| final_winner(category, m)).collect();
        let Some(winners) = winners else {
            break;
        };

        if let [sole] = winners.as_slice() {
            match sole {
                Slot::Team(name) => {
                    log::info!("Champion decided: {}", name);
                    category.champion = Some(name.clone());
                }
                Slot::Bye => log::warn!("Final round resolved to a BYE; no champion"),
            }
            break;
        }

        let next: Round = winners
            .chunks(2)
            .map(|pair| Matchup(pair[0].clone(), pair.get(1).cloned().unwrap_or(Slot::Bye)))
            .collect();
        log::info!(
            "Round {} complete; {} matchups in round {}",
            category.knockout.len(),
            next.len(),
            category.knockout.len() + 1
        );
        category.knockout.push(next);
    }
    category.knockout_state()
}

/// Drop the bracket, knockout matches and champion. Group play is untouched.
pub fn reset_knockout_phase(category: &mut Category) {
    category.knockout.clear();
    category.knockout_individual_matches.clear();
    category.champion = None;
    log::info!("Knockout phase reset");
}

/// Display name of a round given its position and number of matchups.
pub fn round_name(index: usize, matchups: usize) -> String {
    match matchups {
        1 if index > 0 => "Final".to_string(),
        2 => "Semifinals".to_string(),
        4 => "Quarterfinals".to_string(),
        8 => "Round of 16".to_string(),
        16 => "Round of 32".to_string(),
        _ => format!("Round {}", index + 1),
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchupView {
    pub slots: [Slot; 2],
    /// Individual match wins per slot.
    pub wins: [u32; 2],
    pub played: usize,
    pub provisional_winner: Option<Slot>,
    pub final_winner: Option<Slot>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RoundView {
    pub name: String,
    pub matchups: Vec<MatchupView>,
}

/// Bracket snapshot for display: every round with its matchup tallies.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BracketView {
    pub state: KnockoutState,
    pub rounds: Vec<RoundView>,
    pub champion: Option<String>,
}

fn matchup_view(category: &Category, matchup: &Matchup) -> MatchupView {
    let (wins, played) = match matchup {
        Matchup(Slot::Team(a), Slot::Team(b)) => {
            let (wa, wb, n) = tally(category, a, b);
            ([wa, wb], n)
        }
        _ => ([0, 0], 0),
    };
    MatchupView {
        slots: [matchup.0.clone(), matchup.1.clone()],
        wins,
        played,
        provisional_winner: provisional_winner(category, matchup),
        final_winner: final_winner(category, matchup),
    }
}

pub fn get_bracket_structure(category: &Category) -> BracketView {
    BracketView {
        state: category.knockout_state(),
        rounds: category
            .knockout
            .iter()
            .enumerate()
            .map(|(i, round)| RoundView {
                name: round_name(i, round.len()),
                matchups: round.iter().map(|m| matchup_view(category, m)).collect(),
            })
            .collect(),
        champion: category.champion.clone(),
    }
}
