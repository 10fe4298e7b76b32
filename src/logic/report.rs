//! Free-text result reports: `<player(s)> def. <player(s)> <g1-g2> [<g1-g2> ...]`.

use crate::models::{count_games, count_sets, join_set_scores, SetScore, Side, TournamentError};

const DEFEATS: &str = " def. ";

/// A parsed result report. Player fields are trimmed but otherwise as typed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatchReport {
    pub p1: String,
    pub p2: String,
    pub sets: Vec<SetScore>,
}

impl MatchReport {
    /// Sets won by side one and side two.
    pub fn sets_won(&self) -> (u32, u32) {
        count_sets(&self.sets)
    }

    /// Total games won by side one and side two.
    pub fn games_won(&self) -> (u32, u32) {
        count_games(&self.sets)
    }

    /// Side one wins only with strictly more sets; equal set counts go to side two.
    pub fn winner(&self) -> Side {
        let (s1, s2) = self.sets_won();
        if s1 > s2 {
            Side::One
        } else {
            Side::Two
        }
    }

    /// Canonical space-joined set scores, e.g. "6-4 6-3".
    pub fn score_line(&self) -> String {
        join_set_scores(&self.sets)
    }
}

/// `<digits>-<digits>`, whether or not the counts are in range.
fn is_score_token(token: &str) -> bool {
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    token.split_once('-').is_some_and(|(a, b)| digits(a) && digits(b))
}

/// Parse a report line.
///
/// The first literal " def. " splits the two sides. Trailing whitespace-separated
/// `<int>-<int>` tokens are the set scores; everything before them is side two,
/// so player names may contain spaces. A set with more than
/// [`MAX_SET_GAMES`](crate::models::MAX_SET_GAMES) games for one side is rejected.
pub fn parse_match_report(line: &str) -> Result<MatchReport, TournamentError> {
    let line = line.trim();
    let (p1, rest) = line
        .split_once(DEFEATS)
        .ok_or_else(|| TournamentError::Format("missing ' def. '".to_string()))?;
    let p1 = p1.trim();
    if p1.is_empty() {
        return Err(TournamentError::Format("missing first player".to_string()));
    }

    let tokens: Vec<&str> = rest.split_whitespace().collect();
    let first_score = tokens
        .iter()
        .rposition(|t| !is_score_token(t))
        .map_or(0, |i| i + 1);
    if first_score == 0 {
        return Err(TournamentError::Format("missing second player".to_string()));
    }
    if first_score == tokens.len() {
        return Err(TournamentError::Format(format!(
            "no set scores after '{}'",
            tokens.join(" ")
        )));
    }

    let sets = tokens[first_score..]
        .iter()
        .map(|t| t.parse::<SetScore>().map_err(TournamentError::Format))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MatchReport {
        p1: p1.to_string(),
        p2: tokens[..first_score].join(" "),
        sets,
    })
}
