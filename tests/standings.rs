//! Group standings ranking.

use tennis_tournament_web::{get_standings, record_group_match, register_team, Category};

fn category(teams: &[(&str, &str, &str)]) -> Category {
    let mut c = Category::new();
    for (name, group, players) in teams {
        register_team(&mut c, name, group, players).unwrap();
    }
    c
}

#[test]
fn empty_category_has_no_standings() {
    assert!(get_standings(&Category::new()).is_empty());
}

#[test]
fn groups_are_listed_by_label() {
    let c = category(&[("X", "b", "x"), ("Y", "a", "y"), ("Z", "B", "z")]);
    let standings = get_standings(&c);
    let groups: Vec<_> = standings.iter().map(|g| g.group.as_str()).collect();
    assert_eq!(groups, vec!["A", "B"]);
    let b: Vec<_> = standings[1].rows.iter().map(|r| r.team.as_str()).collect();
    assert_eq!(b, vec!["X", "Z"]);
}

#[test]
fn confrontation_wins_outrank_individual_wins() {
    let mut c = category(&[("Many", "A", "m"), ("Conf", "A", "c")]);
    {
        let many = c.team_mut("Many").unwrap();
        many.individual_matches_won = 5;
        many.sets_won = 10;
    }
    {
        let conf = c.team_mut("Conf").unwrap();
        conf.team_matches_won = 1;
        conf.individual_matches_won = 2;
    }
    let rows = &get_standings(&c)[0].rows;
    assert_eq!(rows[0].team, "Conf");
    assert_eq!(rows[1].team, "Many");
}

#[test]
fn differentials_break_ties_then_registration_order() {
    let mut c = category(&[
        ("First", "A", "f"),
        ("SetDiff", "A", "s"),
        ("GameDiff", "A", "g"),
        ("Second", "A", "x"),
    ]);
    {
        let t = c.team_mut("SetDiff").unwrap();
        t.sets_won = 4;
        t.sets_lost = 1;
    }
    {
        let t = c.team_mut("GameDiff").unwrap();
        t.games_won = 20;
        t.games_lost = 10;
    }
    let rows = &get_standings(&c)[0].rows;
    let order: Vec<_> = rows.iter().map(|r| r.team.as_str()).collect();
    assert_eq!(order, vec!["SetDiff", "GameDiff", "First", "Second"]);
    assert_eq!(rows[0].set_difference, 3);
    assert_eq!(rows[1].game_difference, 10);
}

#[test]
fn standings_reflect_recorded_matches() {
    let mut c = category(&[("Alpha", "A", "ana,beto"), ("Beta", "A", "caro,dani")]);
    record_group_match(&mut c, "caro def. ana 6-4 6-3").unwrap();
    record_group_match(&mut c, "ana def. dani 6-4 6-3").unwrap();
    record_group_match(&mut c, "beto def. caro 6-4 6-3").unwrap();

    let rows = &get_standings(&c)[0].rows;
    assert_eq!(rows[0].team, "Alpha");
    assert_eq!(rows[0].team_matches_played, 1);
    assert_eq!(rows[0].team_matches_won, 1);
    assert_eq!(rows[0].individual_matches_won, 2);
    assert_eq!((rows[0].sets_won, rows[0].sets_lost, rows[0].set_difference), (4, 2, 2));
    assert_eq!(rows[1].team, "Beta");
    assert_eq!(rows[1].team_matches_won, 0);
}
