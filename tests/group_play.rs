//! Integration tests for group play: recording matches, confrontations, team admin.

use tennis_tournament_web::{
    create_category, delete_category, delete_team, generate_bracket, get_confrontation_history,
    list_teams, recent_matches, record_group_match, register_team, Category, Stage, Team,
    Tournament, TournamentError,
};

fn alpha_beta() -> Category {
    let mut c = Category::new();
    register_team(&mut c, "Alpha", "a", "ana, beto").unwrap();
    register_team(&mut c, "Beta", "A", "Caro,dani").unwrap();
    c
}

#[test]
fn single_match_updates_team_stats() {
    let mut c = alpha_beta();
    let outcome = record_group_match(&mut c, "ana def. caro 6-4 6-3").unwrap();
    assert_eq!(outcome.winner, "Alpha");
    assert!(outcome.confrontation.is_none());

    let alpha = c.team("Alpha").unwrap();
    assert_eq!(alpha.individual_matches_won, 1);
    assert_eq!((alpha.sets_won, alpha.sets_lost), (2, 0));
    assert_eq!((alpha.games_won, alpha.games_lost), (12, 7));
    assert_eq!(alpha.team_matches_played, 0);

    let beta = c.team("Beta").unwrap();
    assert_eq!(beta.individual_matches_won, 0);
    assert_eq!((beta.sets_won, beta.sets_lost), (0, 2));
    assert_eq!((beta.games_won, beta.games_lost), (7, 12));

    let m = &c.individual_matches[0];
    assert_eq!((m.p1.as_str(), m.p2.as_str()), ("ana", "caro"));
    assert_eq!((m.team1.as_str(), m.team2.as_str()), ("Alpha", "Beta"));
    assert_eq!(m.score_line(), "6-4 6-3");
}

#[test]
fn doubles_pair_report_resolves_team() {
    let mut c = alpha_beta();
    let outcome = record_group_match(&mut c, "Caro/Dani def. ana/beto 4-6 6-3 7-5").unwrap();
    assert_eq!(outcome.winner, "Beta");
    let beta = c.team("Beta").unwrap();
    assert_eq!((beta.sets_won, beta.sets_lost), (2, 1));
    assert_eq!((beta.games_won, beta.games_lost), (17, 14));
}

#[test]
fn third_match_completes_confrontation_once() {
    let mut c = alpha_beta();
    record_group_match(&mut c, "ana def. caro 6-4 6-3").unwrap();
    let second = record_group_match(&mut c, "caro def. beto 6-2 6-2").unwrap();
    assert!(second.confrontation.is_none());

    let third = record_group_match(&mut c, "beto def. dani 7-5 6-4").unwrap();
    let confrontation = third.confrontation.clone().expect("confrontation after 3 matches");
    assert_eq!(confrontation.teams, ["Alpha".to_string(), "Beta".to_string()]);
    assert_eq!(confrontation.winner, "Alpha");
    assert_eq!(confrontation.score, "2-1");
    assert!(third.to_string().contains("Winner: Alpha"));

    assert_eq!(c.team_results.len(), 1);
    let alpha = c.team("Alpha").unwrap();
    let beta = c.team("Beta").unwrap();
    assert_eq!((alpha.team_matches_played, alpha.team_matches_won), (1, 1));
    assert_eq!((beta.team_matches_played, beta.team_matches_won), (1, 0));

    // extra matches after the confrontation are allowed but do not form a second one
    let fourth = record_group_match(&mut c, "dani def. ana 6-0 6-0").unwrap();
    assert!(fourth.confrontation.is_none());
    assert_eq!(c.team_results.len(), 1);
    assert_eq!(c.individual_matches.len(), 4);
    assert_eq!(c.team("Beta").unwrap().individual_matches_won, 2);
    assert_eq!(c.team("Beta").unwrap().team_matches_played, 1);
}

#[test]
fn equal_sets_go_to_second_side() {
    let mut c = alpha_beta();
    let outcome = record_group_match(&mut c, "ana def. caro 6-4 4-6").unwrap();
    assert_eq!(outcome.winner, "Beta");

    // a tied set counts for side two as well
    let outcome = record_group_match(&mut c, "ana def. caro 6-6").unwrap();
    assert_eq!(outcome.winner, "Beta");
    assert_eq!(c.team("Beta").unwrap().sets_won, 2);
}

#[test]
fn recording_is_deterministic() {
    let mut a = alpha_beta();
    let mut b = alpha_beta();
    for line in ["ana def. caro 6-4 6-3", "dani def. beto 6-1 3-6 6-4"] {
        record_group_match(&mut a, line).unwrap();
        record_group_match(&mut b, line).unwrap();
    }
    assert_eq!(a, b);
}

#[test]
fn failed_reports_leave_category_untouched() {
    let mut c = alpha_beta();
    let before = c.clone();

    assert!(matches!(
        record_group_match(&mut c, "ana def. zoe 6-4 6-3"),
        Err(TournamentError::Identification { .. })
    ));
    assert!(matches!(
        record_group_match(&mut c, "ana def. beto 6-4 6-3"),
        Err(TournamentError::SameTeam { .. })
    ));
    assert!(matches!(
        record_group_match(&mut c, "ana beat caro 6-4 6-3"),
        Err(TournamentError::Format(_))
    ));
    assert_eq!(c, before);
}

#[test]
fn delete_team_removes_matches_and_rebuilds_stats() {
    let mut c = alpha_beta();
    register_team(&mut c, "Gamma", "A", "eva,fede").unwrap();
    record_group_match(&mut c, "ana def. caro 6-4 6-3").unwrap();
    let alpha_after_first = c.team("Alpha").unwrap().clone();
    record_group_match(&mut c, "eva def. beto 6-0 6-0").unwrap();
    record_group_match(&mut c, "ana def. fede 6-1 6-1").unwrap();

    delete_team(&mut c, "Gamma").unwrap();
    assert!(!c.has_team("Gamma"));
    assert_eq!(c.individual_matches.len(), 1);
    assert_eq!(c.team("Alpha").unwrap(), &alpha_after_first);
}

#[test]
fn delete_team_locked_after_bracket() {
    let mut c = alpha_beta();
    generate_bracket(&mut c, 1, 2).unwrap();
    assert_eq!(delete_team(&mut c, "Alpha"), Err(TournamentError::KnockoutLocked));
    assert!(c.has_team("Alpha"));
    assert_eq!(
        delete_team(&mut alpha_beta(), "Omega"),
        Err(TournamentError::TeamNotFound("Omega".to_string()))
    );
}

#[test]
fn register_team_validates_input() {
    let mut c = alpha_beta();
    assert_eq!(c.team("Alpha").unwrap().group, "A");
    assert_eq!(c.team("Beta").unwrap().players, vec!["caro", "dani"]);

    assert_eq!(
        register_team(&mut c, "Alpha", "B", "x"),
        Err(TournamentError::DuplicateTeam("Alpha".to_string()))
    );
    assert!(matches!(
        register_team(&mut c, "bye", "B", "x"),
        Err(TournamentError::InvalidInput(_))
    ));
    assert!(matches!(
        register_team(&mut c, "Empty", "B", " , "),
        Err(TournamentError::InvalidInput(_))
    ));
    assert_eq!(c.teams.len(), 2);
}

#[test]
fn categories_are_unique_and_removable() {
    let mut t = Tournament::new();
    create_category(&mut t, " Open ").unwrap();
    create_category(&mut t, "Mixed").unwrap();
    assert_eq!(
        create_category(&mut t, "Open"),
        Err(TournamentError::DuplicateCategory("Open".to_string()))
    );
    assert_eq!(t.category_names().collect::<Vec<_>>(), vec!["Open", "Mixed"]);

    delete_category(&mut t, "Open").unwrap();
    assert_eq!(
        delete_category(&mut t, "Open"),
        Err(TournamentError::CategoryNotFound("Open".to_string()))
    );
    assert!(t.category("Mixed").is_ok());
}

#[test]
fn history_and_recent_matches() {
    let mut c = alpha_beta();
    register_team(&mut c, "Gamma", "B", "eva").unwrap();
    let names: Vec<_> = list_teams(&c).map(|(name, _)| name).collect();
    assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);

    for line in ["ana def. caro 6-1 6-1", "dani def. beto 6-1 6-1", "beto def. dani 6-1 6-1"] {
        record_group_match(&mut c, line).unwrap();
    }
    record_group_match(&mut c, "eva def. ana 6-0 6-0").unwrap();

    let history = get_confrontation_history(&c);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].confrontation.winner, "Alpha");
    assert_eq!(history[0].confrontation.score, "2-1");
    assert_eq!(history[0].matches.len(), 3);

    let recent = recent_matches(&c, Stage::Group, 2);
    let winners: Vec<_> = recent.iter().map(|m| m.winner.as_str()).collect();
    assert_eq!(winners, vec!["Gamma", "Alpha"]);
    assert!(recent_matches(&c, Stage::Knockout, 5).is_empty());
}

#[test]
fn oversized_report_is_rejected_before_any_stats_change() {
    let mut c = alpha_beta();
    let before = c.clone();
    assert!(matches!(
        record_group_match(&mut c, "ana def. caro 4294967295-0"),
        Err(TournamentError::Format(_))
    ));
    assert_eq!(c, before);

    record_group_match(&mut c, "ana def. caro 6-0").unwrap();
    assert_eq!(c.team("Alpha").unwrap().games_won, 6);
}

#[test]
fn stat_totals_saturate_instead_of_wrapping() {
    let mut team = Team::new("A", "ana");
    team.games_won = u32::MAX - 3;
    team.sets_won = u32::MAX;
    team.add_sets_and_games(2, 0, 12, 1);
    assert_eq!(team.games_won, u32::MAX);
    assert_eq!(team.sets_won, u32::MAX);
    assert_eq!(team.games_lost, 1);
}
