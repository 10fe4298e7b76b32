//! Group stage: recording individual matches and completing best-of-three confrontations.

use crate::logic::identify::resolve_teams;
use crate::logic::report::{parse_match_report, MatchReport};
use crate::models::{Category, Confrontation, IndividualMatch, Side, TournamentError};
use std::fmt;

/// Individual matches between two teams that make up one confrontation.
pub const CONFRONTATION_MATCHES: usize = 3;

/// Result of recording one group match.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GroupMatchOutcome {
    /// Team that won the individual match.
    pub winner: String,
    /// Set when this match completed the confrontation between the two teams.
    pub confrontation: Option<Confrontation>,
}

impl fmt::Display for GroupMatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.confrontation {
            Some(c) => write!(
                f,
                "Group confrontation completed: {} vs {}. Winner: {} ({})",
                c.teams[0], c.teams[1], c.winner, c.score
            ),
            None => write!(f, "Group match recorded: {} wins.", self.winner),
        }
    }
}

/// Build the stored match for a report between two resolved teams.
pub(crate) fn build_match(report: &MatchReport, team1: String, team2: String) -> IndividualMatch {
    let winner = match report.winner() {
        Side::One => team1.clone(),
        Side::Two => team2.clone(),
    };
    IndividualMatch {
        p1: report.p1.clone(),
        p2: report.p2.clone(),
        team1,
        team2,
        winner,
        set_scores: report.sets.clone(),
    }
}

/// Record a group stage result line.
///
/// 1. Parse the report and resolve both sides to distinct teams.
/// 2. Append the match; credit the winner's individual win and both teams' sets and games.
/// 3. If the pair has now played three matches and has no confrontation yet, tally the
///    first three and record the confrontation.
///
/// Further matches between a pair after its confrontation are still recorded; they
/// count toward individual stats but never create a second confrontation.
pub fn record_group_match(
    category: &mut Category,
    line: &str,
) -> Result<GroupMatchOutcome, TournamentError> {
    let report = parse_match_report(line)?;
    let (t1, t2) = resolve_teams(&report, &category.teams)?;
    let m = build_match(&report, t1.clone(), t2.clone());
    let winner = m.winner.clone();

    apply_match_stats(category, &m);
    log::debug!("Group match {} vs {}: {} ({})", t1, t2, winner, m.score_line());
    category.individual_matches.push(m);

    let confrontation = complete_confrontation(category, &t1, &t2);
    if let Some(c) = &confrontation {
        log::info!(
            "Confrontation completed: {} vs {}, winner {} ({})",
            t1,
            t2,
            c.winner,
            c.score
        );
    }
    Ok(GroupMatchOutcome {
        winner,
        confrontation,
    })
}

/// Credit one individual match to both teams' statistics.
fn apply_match_stats(category: &mut Category, m: &IndividualMatch) {
    let (s1, s2) = m.sets_won();
    let (g1, g2) = m.games_won();
    if let Some(team) = category.team_mut(&m.winner) {
        team.individual_matches_won = team.individual_matches_won.saturating_add(1);
    }
    if let Some(team) = category.team_mut(&m.team1) {
        team.add_sets_and_games(s1, s2, g1, g2);
    }
    if let Some(team) = category.team_mut(&m.team2) {
        team.add_sets_and_games(s2, s1, g2, g1);
    }
}

fn apply_confrontation_stats(category: &mut Category, c: &Confrontation) {
    for name in &c.teams {
        if let Some(team) = category.team_mut(name) {
            team.team_matches_played = team.team_matches_played.saturating_add(1);
        }
    }
    if let Some(team) = category.team_mut(&c.winner) {
        team.team_matches_won = team.team_matches_won.saturating_add(1);
    }
}

/// Create the confrontation for `t1`/`t2` if they have reached three matches and
/// none exists yet.
fn complete_confrontation(category: &mut Category, t1: &str, t2: &str) -> Option<Confrontation> {
    if category.confrontation_between(t1, t2).is_some() {
        return None;
    }
    let first_three: Vec<&IndividualMatch> = category
        .group_matches_between(t1, t2)
        .take(CONFRONTATION_MATCHES)
        .collect();
    if first_three.len() < CONFRONTATION_MATCHES {
        return None;
    }
    let (winner, wins) = most_wins(first_three.iter().map(|m| m.winner.as_str()))?;
    let confrontation = Confrontation {
        teams: [t1.to_string(), t2.to_string()],
        winner: winner.to_string(),
        score: format!("{}-{}", wins, CONFRONTATION_MATCHES as u32 - wins),
    };
    apply_confrontation_stats(category, &confrontation);
    category.team_results.push(confrontation.clone());
    Some(confrontation)
}

/// Team with the most wins; on equal counts the one that won first.
pub(crate) fn most_wins<'a>(winners: impl Iterator<Item = &'a str>) -> Option<(&'a str, u32)> {
    let mut tally: Vec<(&str, u32)> = Vec::new();
    for w in winners {
        match tally.iter_mut().find(|(t, _)| *t == w) {
            Some((_, n)) => *n += 1,
            None => tally.push((w, 1)),
        }
    }
    tally
        .into_iter()
        .fold(None, |best, (t, n)| match best {
            Some((_, b)) if b >= n => best,
            _ => Some((t, n)),
        })
}

/// Recompute every team's statistics from the stored group matches and confrontations.
pub(crate) fn rebuild_group_stats(category: &mut Category) {
    for (_, team) in category.teams.iter_mut() {
        team.clear_stats();
    }
    let matches = std::mem::take(&mut category.individual_matches);
    for m in &matches {
        apply_match_stats(category, m);
    }
    category.individual_matches = matches;
    let results = std::mem::take(&mut category.team_results);
    for c in &results {
        apply_confrontation_stats(category, c);
    }
    category.team_results = results;
}
