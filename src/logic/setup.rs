//! Setup commands: categories and team registration.

use crate::logic::group_play::rebuild_group_stats;
use crate::models::{Category, Team, Tournament, TournamentError, BYE};

/// Create an empty category. Names are trimmed and must be unique.
pub fn create_category(tournament: &mut Tournament, name: &str) -> Result<(), TournamentError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TournamentError::InvalidInput("category name is empty".to_string()));
    }
    if tournament.category(name).is_ok() {
        return Err(TournamentError::DuplicateCategory(name.to_string()));
    }
    tournament.insert_category(name.to_string(), Category::new());
    log::info!("Created category '{}'", name);
    Ok(())
}

/// Delete a category and everything in it.
pub fn delete_category(tournament: &mut Tournament, name: &str) -> Result<(), TournamentError> {
    tournament
        .remove_category(name)
        .ok_or_else(|| TournamentError::CategoryNotFound(name.to_string()))?;
    log::info!("Deleted category '{}'", name);
    Ok(())
}

/// Register a team. `players_csv` is a comma-separated roster; names are
/// normalized, the group label is upper-cased.
pub fn register_team(
    category: &mut Category,
    name: &str,
    group: &str,
    players_csv: &str,
) -> Result<(), TournamentError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TournamentError::InvalidInput("team name is empty".to_string()));
    }
    if name.eq_ignore_ascii_case(BYE) {
        return Err(TournamentError::InvalidInput(format!("'{name}' is a reserved name")));
    }
    if category.has_team(name) {
        return Err(TournamentError::DuplicateTeam(name.to_string()));
    }
    let team = Team::new(group, players_csv);
    if team.group.is_empty() {
        return Err(TournamentError::InvalidInput("group is empty".to_string()));
    }
    if team.players.is_empty() {
        return Err(TournamentError::InvalidInput(format!("team '{name}' has no players")));
    }
    log::info!(
        "Registered team '{}' in group {} ({})",
        name,
        team.group,
        team.players.join(", ")
    );
    category.teams.push((name.to_string(), team));
    Ok(())
}

/// Remove a team with its group matches and confrontations, then recompute
/// the remaining teams' statistics. Not allowed once a bracket exists.
pub fn delete_team(category: &mut Category, name: &str) -> Result<(), TournamentError> {
    if category.knockout_started() {
        return Err(TournamentError::KnockoutLocked);
    }
    let idx = category
        .teams
        .iter()
        .position(|(n, _)| n == name)
        .ok_or_else(|| TournamentError::TeamNotFound(name.to_string()))?;
    category.teams.remove(idx);
    category.individual_matches.retain(|m| !m.involves(name));
    category.team_results.retain(|c| !c.involves(name));
    rebuild_group_stats(category);
    log::info!("Deleted team '{}' and its matches", name);
    Ok(())
}

/// Registered teams in registration order.
pub fn list_teams(category: &Category) -> impl Iterator<Item = (&str, &Team)> {
    category.teams.iter().map(|(n, t)| (n.as_str(), t))
}
