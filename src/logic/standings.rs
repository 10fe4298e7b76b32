//! Group standings: ranked team tables per group.

use crate::models::{Category, Team};
use serde::Serialize;

/// One row of a group table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Standing {
    pub team: String,
    pub group: String,
    /// Confrontations played / won.
    pub team_matches_played: u32,
    pub team_matches_won: u32,
    pub individual_matches_won: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub set_difference: i64,
    pub games_won: u32,
    pub games_lost: u32,
    pub game_difference: i64,
}

impl Standing {
    fn from_team(name: &str, team: &Team) -> Self {
        Self {
            team: name.to_string(),
            group: team.group.clone(),
            team_matches_played: team.team_matches_played,
            team_matches_won: team.team_matches_won,
            individual_matches_won: team.individual_matches_won,
            sets_won: team.sets_won,
            sets_lost: team.sets_lost,
            set_difference: team.set_difference(),
            games_won: team.games_won,
            games_lost: team.games_lost,
            game_difference: team.game_difference(),
        }
    }
}

/// Ranked table for one group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GroupStandings {
    pub group: String,
    pub rows: Vec<Standing>,
}

/// Stable sort, best first: confrontation wins, individual wins, set difference,
/// game difference. Equal keys keep their current order.
pub(crate) fn rank_teams<'a>(teams: &mut [(&'a str, &'a Team)]) {
    teams.sort_by(|(_, a), (_, b)| b.ranking_key().cmp(&a.ranking_key()));
}

/// Teams grouped by label (groups in label order), each group ranked.
pub(crate) fn ranked_groups(category: &Category) -> Vec<(String, Vec<(&str, &Team)>)> {
    let mut groups: Vec<(String, Vec<(&str, &Team)>)> = Vec::new();
    for (name, team) in &category.teams {
        match groups.iter_mut().find(|(g, _)| *g == team.group) {
            Some((_, members)) => members.push((name.as_str(), team)),
            None => groups.push((team.group.clone(), vec![(name.as_str(), team)])),
        }
    }
    groups.sort_by(|(a, _), (b, _)| a.cmp(b));
    for (_, members) in &mut groups {
        rank_teams(members);
    }
    groups
}

/// Ranked standings for every group. Empty when no teams are registered.
pub fn get_standings(category: &Category) -> Vec<GroupStandings> {
    ranked_groups(category)
        .into_iter()
        .map(|(group, members)| GroupStandings {
            group,
            rows: members
                .into_iter()
                .map(|(name, team)| Standing::from_team(name, team))
                .collect(),
        })
        .collect()
}
