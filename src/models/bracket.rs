//! Knockout bracket: slots, matchups, and rounds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name a BYE slot is stored under.
pub const BYE: &str = "BYE";

/// One side of a knockout matchup: a registered team or an automatic advance.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Slot {
    Team(String),
    Bye,
}

impl Slot {
    pub fn team(name: impl Into<String>) -> Self {
        Slot::Team(name.into())
    }

    pub fn team_name(&self) -> Option<&str> {
        match self {
            Slot::Team(name) => Some(name),
            Slot::Bye => None,
        }
    }
}

impl From<String> for Slot {
    fn from(name: String) -> Self {
        if name == BYE {
            Slot::Bye
        } else {
            Slot::Team(name)
        }
    }
}

impl From<Slot> for String {
    fn from(slot: Slot) -> Self {
        match slot {
            Slot::Team(name) => name,
            Slot::Bye => BYE.to_string(),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Team(name) => f.write_str(name),
            Slot::Bye => f.write_str(BYE),
        }
    }
}

/// A scheduled pairing within a round. Stored as a two-element array.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Matchup(pub Slot, pub Slot);

impl Matchup {
    /// True if this matchup pairs the two named teams, in either order.
    pub fn pairs(&self, a: &str, b: &str) -> bool {
        match (self.0.team_name(), self.1.team_name()) {
            (Some(x), Some(y)) => (x == a && y == b) || (x == b && y == a),
            _ => false,
        }
    }
}

/// Matchups active at one knockout stage.
pub type Round = Vec<Matchup>;
