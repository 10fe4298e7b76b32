//! Map a reported player token to the registered team it belongs to.

use crate::logic::report::MatchReport;
use crate::models::{normalize_player, Team, TournamentError};

/// Find the team whose roster contains every name in `player`.
///
/// `player` is one name or several joined by "/" (a doubles pair). Names are
/// compared trimmed and lowercased. Rosters are expected not to overlap; if
/// they do, the earliest registered team wins.
pub fn identify_team<'a>(player: &str, teams: &'a [(String, Team)]) -> Option<&'a str> {
    let names: Vec<String> = player.split('/').map(normalize_player).collect();
    teams
        .iter()
        .find(|(_, team)| names.iter().all(|n| team.has_player(n)))
        .map(|(name, _)| name.as_str())
}

/// Resolve both sides of a report to two distinct teams.
pub(crate) fn resolve_teams(
    report: &MatchReport,
    teams: &[(String, Team)],
) -> Result<(String, String), TournamentError> {
    let (t1, t2) = match (identify_team(&report.p1, teams), identify_team(&report.p2, teams)) {
        (Some(t1), Some(t2)) => (t1, t2),
        _ => {
            return Err(TournamentError::Identification {
                p1: report.p1.clone(),
                p2: report.p2.clone(),
            })
        }
    };
    if t1 == t2 {
        return Err(TournamentError::SameTeam {
            p1: report.p1.clone(),
            p2: report.p2.clone(),
            team: t1.to_string(),
        });
    }
    Ok((t1.to_string(), t2.to_string()))
}
