//! Tournament, Category, and TournamentError.

use crate::models::bracket::Round;
use crate::models::game::{Confrontation, IndividualMatch};
use crate::models::team::Team;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Map};
use thiserror::Error;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// Result report does not match `<players> def. <players> <g1-g2>...`.
    #[error("Invalid result format ({0}); expected e.g. 'Alice def. Bob 6-4 6-3'")]
    Format(String),
    /// One or both sides of a report do not belong to a registered team.
    #[error("Could not identify teams for: {p1}, {p2}")]
    Identification { p1: String, p2: String },
    /// Both sides of a report resolve to the same team.
    #[error("Players '{p1}' and '{p2}' belong to the same team ({team})")]
    SameTeam { p1: String, p2: String, team: String },
    /// Knockout report for a pair that is not scheduled in the current round.
    #[error("No active knockout matchup between {0} and {1}")]
    NoActiveMatchup(String, String),
    /// Best-of-three already played out for this knockout pair.
    #[error("3 matches have already been played between {0} and {1}")]
    MatchLimit(String, String),
    /// Teams cannot be removed once a bracket exists.
    #[error("Teams cannot be deleted once the knockout phase has started")]
    KnockoutLocked,
    /// Bracket generation on a category with no teams.
    #[error("There are no teams to build a knockout bracket from")]
    NoTeams,
    #[error("Category '{0}' not found")]
    CategoryNotFound(String),
    #[error("Team '{0}' not found")]
    TeamNotFound(String),
    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),
    #[error("Team '{0}' is already registered in this category")]
    DuplicateTeam(String),
    /// Empty name or roster, reserved name, or a zero count.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Bracket size must be a power of two, at least 2.
    #[error("Bracket size {0} is not a power of two (4, 8, 16, 32, 64...)")]
    InvalidBracketSize(usize),
    #[error("{qualifiers} qualifiers do not fit in a bracket of {bracket_size}")]
    TooManyQualifiers { qualifiers: usize, bracket_size: usize },
}

/// Where a category stands in its knockout phase.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KnockoutState {
    /// Group play only; no bracket generated.
    NoBracket,
    /// Bracket in progress; `round` is 1-based.
    InProgress { round: usize },
    /// A champion has been decided.
    Finished,
}

/// One competition category: its teams, group play, and knockout phase.
#[serde_as]
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Teams by name, in registration order.
    #[serde_as(as = "Map<_, _>")]
    #[serde(default)]
    pub teams: Vec<(String, Team)>,
    /// Confrontation results, in completion order.
    #[serde(default)]
    pub team_results: Vec<Confrontation>,
    /// Group stage individual matches, append-only.
    #[serde(default)]
    pub individual_matches: Vec<IndividualMatch>,
    /// Knockout rounds; the last one is the current round.
    #[serde(default)]
    pub knockout: Vec<Round>,
    #[serde(default)]
    pub knockout_individual_matches: Vec<IndividualMatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub champion: Option<String>,
}

impl Category {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn team(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    pub fn team_mut(&mut self, name: &str) -> Option<&mut Team> {
        self.teams.iter_mut().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    pub fn has_team(&self, name: &str) -> bool {
        self.team(name).is_some()
    }

    /// True once a bracket has been generated (until reset).
    pub fn knockout_started(&self) -> bool {
        !self.knockout.is_empty()
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.knockout.last()
    }

    pub fn knockout_state(&self) -> KnockoutState {
        if self.champion.is_some() {
            KnockoutState::Finished
        } else if self.knockout.is_empty() {
            KnockoutState::NoBracket
        } else {
            KnockoutState::InProgress {
                round: self.knockout.len(),
            }
        }
    }

    /// Group stage matches between two teams, in the order they were recorded.
    pub fn group_matches_between<'a>(
        &'a self,
        a: &'a str,
        b: &'a str,
    ) -> impl Iterator<Item = &'a IndividualMatch> + 'a {
        self.individual_matches.iter().filter(move |m| m.is_between(a, b))
    }

    /// Knockout matches between two teams, in the order they were recorded.
    pub fn knockout_matches_between<'a>(
        &'a self,
        a: &'a str,
        b: &'a str,
    ) -> impl Iterator<Item = &'a IndividualMatch> + 'a {
        self.knockout_individual_matches
            .iter()
            .filter(move |m| m.is_between(a, b))
    }

    pub fn confrontation_between(&self, a: &str, b: &str) -> Option<&Confrontation> {
        self.team_results.iter().find(|c| c.is_between(a, b))
    }
}

/// All categories of one tournament, keyed by name in creation order.
/// Serializes as a plain mapping category name -> category.
#[serde_as]
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tournament {
    #[serde_as(as = "Map<_, _>")]
    categories: Vec<(String, Category)>,
}

impl Tournament {
    /// Empty tournament with no categories.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(n, _)| n.as_str())
    }

    pub fn category(&self, name: &str) -> Result<&Category, TournamentError> {
        self.categories
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
            .ok_or_else(|| TournamentError::CategoryNotFound(name.to_string()))
    }

    pub fn category_mut(&mut self, name: &str) -> Result<&mut Category, TournamentError> {
        self.categories
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
            .ok_or_else(|| TournamentError::CategoryNotFound(name.to_string()))
    }

    pub(crate) fn insert_category(&mut self, name: String, category: Category) {
        self.categories.push((name, category));
    }

    pub(crate) fn remove_category(&mut self, name: &str) -> Option<Category> {
        let idx = self.categories.iter().position(|(n, _)| n == name)?;
        Some(self.categories.remove(idx).1)
    }
}
