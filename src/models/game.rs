//! Individual matches, set scores, and group-stage confrontations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of a report won (side one is the player(s) before "def.").
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    One,
    Two,
}

/// Most games one side may be credited with in a single set.
pub const MAX_SET_GAMES: u32 = 999;

/// Games won by each side in one set, written `g1-g2`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SetScore {
    pub games_1: u32,
    pub games_2: u32,
}

impl SetScore {
    pub fn new(games_1: u32, games_2: u32) -> Self {
        Self { games_1, games_2 }
    }

    /// Side one only takes the set with strictly more games; a tied set goes to side two.
    pub fn winner(&self) -> Side {
        if self.games_1 > self.games_2 {
            Side::One
        } else {
            Side::Two
        }
    }
}

impl fmt::Display for SetScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.games_1, self.games_2)
    }
}

impl FromStr for SetScore {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (g1, g2) = s
            .split_once('-')
            .ok_or_else(|| format!("set score '{s}' is not of the form <games>-<games>"))?;
        let parse = |g: &str| match g.trim().parse::<u32>() {
            Ok(n) if n <= MAX_SET_GAMES => Ok(n),
            Ok(_) => Err(format!(
                "set score '{s}' exceeds {MAX_SET_GAMES} games for one side"
            )),
            Err(_) => Err(format!("'{g}' in set score '{s}' is not a game count")),
        };
        Ok(Self::new(parse(g1)?, parse(g2)?))
    }
}

/// Serde adapter: set scores are stored as one space-joined string ("6-4 6-3").
pub mod set_scores_text {
    use super::SetScore;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(sets: &[SetScore], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::join_set_scores(sets))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<SetScore>, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.split_whitespace()
            .map(|s| s.parse().map_err(de::Error::custom))
            .collect()
    }
}

/// Canonical text of a sequence of sets: `6-4 6-3`.
pub fn join_set_scores(sets: &[SetScore]) -> String {
    sets.iter()
        .map(SetScore::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sets won by side one and side two.
pub fn count_sets(sets: &[SetScore]) -> (u32, u32) {
    sets.iter().fold((0u32, 0u32), |(s1, s2), set| match set.winner() {
        Side::One => (s1.saturating_add(1), s2),
        Side::Two => (s1, s2.saturating_add(1)),
    })
}

/// Total games won by side one and side two.
pub fn count_games(sets: &[SetScore]) -> (u32, u32) {
    sets.iter().fold((0u32, 0u32), |(g1, g2), set| {
        (g1.saturating_add(set.games_1), g2.saturating_add(set.games_2))
    })
}

/// One reported head-to-head result, resolved to the teams involved.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct IndividualMatch {
    /// Side one as reported (e.g. "ana" or "ana/beto").
    pub p1: String,
    /// Side two as reported.
    pub p2: String,
    pub team1: String,
    pub team2: String,
    pub winner: String,
    #[serde(with = "set_scores_text")]
    pub set_scores: Vec<SetScore>,
}

impl IndividualMatch {
    /// True if this match was played between `a` and `b`, in either order.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.team1 == a && self.team2 == b) || (self.team1 == b && self.team2 == a)
    }

    pub fn involves(&self, team: &str) -> bool {
        self.team1 == team || self.team2 == team
    }

    pub fn score_line(&self) -> String {
        join_set_scores(&self.set_scores)
    }

    pub fn sets_won(&self) -> (u32, u32) {
        count_sets(&self.set_scores)
    }

    pub fn games_won(&self) -> (u32, u32) {
        count_games(&self.set_scores)
    }
}

/// Best-of-three outcome between two teams in group play.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Confrontation {
    pub teams: [String; 2],
    pub winner: String,
    /// Winner's individual wins out of three, e.g. "2-1".
    pub score: String,
}

impl Confrontation {
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        let [x, y] = &self.teams;
        (x == a && y == b) || (x == b && y == a)
    }

    pub fn involves(&self, team: &str) -> bool {
        self.teams.iter().any(|t| t == team)
    }
}
