//! Team and its aggregated group-stage statistics.

use serde::{Deserialize, Serialize};

/// A registered team within one category.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Group label, upper-cased (e.g. "A").
    pub group: String,
    /// Normalized (lowercase, trimmed) player names.
    pub players: Vec<String>,
    /// Confrontations played (best-of-three completed).
    #[serde(default)]
    pub team_matches_played: u32,
    /// Confrontations won.
    #[serde(default)]
    pub team_matches_won: u32,
    #[serde(default)]
    pub individual_matches_won: u32,
    #[serde(default)]
    pub sets_won: u32,
    #[serde(default)]
    pub sets_lost: u32,
    #[serde(default)]
    pub games_won: u32,
    #[serde(default)]
    pub games_lost: u32,
}

/// Ranking key: confrontation wins, individual wins, set and game differentials.
/// Higher ranks first.
pub type RankingKey = (u32, u32, i64, i64);

impl Team {
    /// New team with zeroed stats. `players_csv` is a comma-separated roster.
    pub fn new(group: &str, players_csv: &str) -> Self {
        Self {
            group: group.trim().to_uppercase(),
            players: normalize_players(players_csv),
            ..Self::default()
        }
    }

    pub fn set_difference(&self) -> i64 {
        i64::from(self.sets_won) - i64::from(self.sets_lost)
    }

    pub fn game_difference(&self) -> i64 {
        i64::from(self.games_won) - i64::from(self.games_lost)
    }

    pub fn ranking_key(&self) -> RankingKey {
        (
            self.team_matches_won,
            self.individual_matches_won,
            self.set_difference(),
            self.game_difference(),
        )
    }

    pub fn has_player(&self, normalized_name: &str) -> bool {
        self.players.iter().any(|p| p == normalized_name)
    }

    /// Add one individual match's sets and games from this team's point of view.
    /// Totals saturate at `u32::MAX`.
    pub fn add_sets_and_games(
        &mut self,
        sets_won: u32,
        sets_lost: u32,
        games_won: u32,
        games_lost: u32,
    ) {
        self.sets_won = self.sets_won.saturating_add(sets_won);
        self.sets_lost = self.sets_lost.saturating_add(sets_lost);
        self.games_won = self.games_won.saturating_add(games_won);
        self.games_lost = self.games_lost.saturating_add(games_lost);
    }

    /// Zero every statistic, keeping group and roster.
    pub fn clear_stats(&mut self) {
        *self = Self {
            group: std::mem::take(&mut self.group),
            players: std::mem::take(&mut self.players),
            ..Self::default()
        };
    }
}

/// Lowercase and trim a player name for comparison.
pub fn normalize_player(name: &str) -> String {
    name.trim().to_lowercase()
}

fn normalize_players(players_csv: &str) -> Vec<String> {
    players_csv
        .split(',')
        .map(normalize_player)
        .filter(|p| !p.is_empty())
        .collect()
}
