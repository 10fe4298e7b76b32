//! Knockout seeding: qualifiers, BYE padding, and the first round.

use crate::logic::knockout::trigger_round_check;
use crate::logic::standings::{rank_teams, ranked_groups};
use crate::models::{Category, Matchup, Round, Slot, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How qualifiers are placed into the bracket.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedingPolicy {
    /// Global ranking, #1 vs #N, #2 vs #N-1, ... BYEs go to the top seeds.
    #[default]
    Ranked,
    /// Qualifiers shuffled, then folded the same way. BYEs go to the first drawn.
    Draw,
}

/// Top `num_advancing` teams of every group, merged and re-ranked globally.
pub fn qualifiers(category: &Category, num_advancing: usize) -> Vec<String> {
    let mut qualified: Vec<_> = ranked_groups(category)
        .into_iter()
        .flat_map(|(_, members)| members.into_iter().take(num_advancing))
        .collect();
    rank_teams(&mut qualified);
    qualified.into_iter().map(|(name, _)| name.to_string()).collect()
}

/// Pair the top half of `seeded` against the reversed bottom half.
fn fold_pairs(seeded: Vec<Slot>) -> Round {
    let half = seeded.len() / 2;
    let mut top = seeded;
    let bottom = top.split_off(half);
    top.into_iter()
        .zip(bottom.into_iter().rev())
        .map(|(a, b)| Matchup(a, b))
        .collect()
}

/// Generate a rank-seeded bracket. See [`generate_bracket_with`].
pub fn generate_bracket(
    category: &mut Category,
    num_advancing: usize,
    bracket_size: usize,
) -> Result<(), TournamentError> {
    generate_bracket_with(
        category,
        num_advancing,
        bracket_size,
        SeedingPolicy::Ranked,
        &mut rand::thread_rng(),
    )
}

/// Generate the knockout bracket from group play.
///
/// 1. Take the top `num_advancing` of each group and rank them globally.
/// 2. Order them per `policy` and pad with BYEs to `bracket_size`.
/// 3. Pair top half against reversed bottom half into the first round.
///
/// Any previous knockout rounds, matches and champion are discarded. Rounds that
/// are decided by BYEs alone advance immediately.
pub fn generate_bracket_with<R: Rng + ?Sized>(
    category: &mut Category,
    num_advancing: usize,
    bracket_size: usize,
    policy: SeedingPolicy,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if category.teams.is_empty() {
        return Err(TournamentError::NoTeams);
    }
    if num_advancing == 0 {
        return Err(TournamentError::InvalidInput(
            "at least one team per group must advance".to_string(),
        ));
    }
    if bracket_size < 2 || !bracket_size.is_power_of_two() {
        return Err(TournamentError::InvalidBracketSize(bracket_size));
    }

    let mut seeded: Vec<Slot> = qualifiers(category, num_advancing)
        .into_iter()
        .map(Slot::Team)
        .collect();
    if seeded.len() > bracket_size {
        return Err(TournamentError::TooManyQualifiers {
            qualifiers: seeded.len(),
            bracket_size,
        });
    }
    if policy == SeedingPolicy::Draw {
        seeded.shuffle(rng);
    }
    let qualified = seeded.len();
    seeded.resize(bracket_size, Slot::Bye);

    category.knockout = vec![fold_pairs(seeded)];
    category.knockout_individual_matches.clear();
    category.champion = None;
    log::info!(
        "Generated {:?} knockout bracket of {} with {} qualifiers",
        policy,
        bracket_size,
        qualified
    );

    trigger_round_check(category);
    Ok(())
}
