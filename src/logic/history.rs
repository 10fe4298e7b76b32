//! Read-only match history: confrontations with their matches, recent results feed.

use crate::models::{Category, Confrontation, IndividualMatch};
use serde::{Deserialize, Serialize};

/// A completed confrontation and every group match its two teams played.
#[derive(Clone, Debug, Serialize)]
pub struct ConfrontationRecord<'a> {
    pub confrontation: &'a Confrontation,
    pub matches: Vec<&'a IndividualMatch>,
}

/// Confrontations in completion order, each with its individual matches.
pub fn get_confrontation_history(category: &Category) -> Vec<ConfrontationRecord<'_>> {
    category
        .team_results
        .iter()
        .map(|c| {
            let [a, b] = &c.teams;
            ConfrontationRecord {
                confrontation: c,
                matches: category.group_matches_between(a, b).collect(),
            }
        })
        .collect()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Group,
    Knockout,
}

/// The last `limit` matches of a stage, newest first.
pub fn recent_matches(category: &Category, stage: Stage, limit: usize) -> Vec<&IndividualMatch> {
    let matches = match stage {
        Stage::Group => &category.individual_matches,
        Stage::Knockout => &category.knockout_individual_matches,
    };
    matches.iter().rev().take(limit).collect()
}
