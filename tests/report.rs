//! Result report parsing and player-to-team identification.

use tennis_tournament_web::{
    identify_team, parse_match_report, SetScore, Side, Team, TournamentError, MAX_SET_GAMES,
};

#[test]
fn parses_names_with_spaces_and_sets() {
    let r = parse_match_report("  Ana Maria def. Caro Lopez 6-4 3-6 10-8 ").unwrap();
    assert_eq!(r.p1, "Ana Maria");
    assert_eq!(r.p2, "Caro Lopez");
    assert_eq!(
        r.sets,
        vec![SetScore::new(6, 4), SetScore::new(3, 6), SetScore::new(10, 8)]
    );
    assert_eq!(r.sets_won(), (2, 1));
    assert_eq!(r.games_won(), (19, 18));
    assert_eq!(r.winner(), Side::One);
    assert_eq!(r.score_line(), "6-4 3-6 10-8");
}

#[test]
fn doubles_tokens_are_kept_as_typed() {
    let r = parse_match_report("ana/beto def. caro/dani 7-6").unwrap();
    assert_eq!((r.p1.as_str(), r.p2.as_str()), ("ana/beto", "caro/dani"));
}

#[test]
fn tied_sets_and_counts_favour_side_two() {
    let r = parse_match_report("a def. b 6-6").unwrap();
    assert_eq!(r.sets_won(), (0, 1));
    assert_eq!(r.winner(), Side::Two);

    let r = parse_match_report("a def. b 6-3 3-6").unwrap();
    assert_eq!(r.winner(), Side::Two);
}

#[test]
fn malformed_reports_are_format_errors() {
    for line in [
        "ana beat caro 6-4",
        "ana def. caro",
        "ana def. 6-4 6-3",
        "def. caro 6-4",
        "ana def. caro 6-4 six-love",
        "ana def. caro 6:4",
        "",
    ] {
        assert!(
            matches!(parse_match_report(line), Err(TournamentError::Format(_))),
            "expected format error for {line:?}"
        );
    }
}

#[test]
fn identify_requires_every_name_in_one_roster() {
    let teams = vec![
        ("Alpha".to_string(), Team::new("A", "ana,beto")),
        ("Beta".to_string(), Team::new("A", "caro, dani")),
    ];
    assert_eq!(identify_team("ana", &teams), Some("Alpha"));
    assert_eq!(identify_team(" Beto / ANA ", &teams), Some("Alpha"));
    assert_eq!(identify_team("dani", &teams), Some("Beta"));
    assert_eq!(identify_team("ana/caro", &teams), None);
    assert_eq!(identify_team("zoe", &teams), None);
}

#[test]
fn overlapping_rosters_resolve_to_earliest_team() {
    let teams = vec![
        ("First".to_string(), Team::new("A", "ana,beto")),
        ("Second".to_string(), Team::new("B", "ana,caro")),
    ];
    assert_eq!(identify_team("ana", &teams), Some("First"));
    assert_eq!(identify_team("ana/caro", &teams), Some("Second"));
}

#[test]
fn oversized_game_counts_are_format_errors() {
    let just_over = format!("ana def. caro {}-0", MAX_SET_GAMES + 1);
    for line in [
        "ana def. caro 4294967295-0 1-0",
        "ana def. caro 6-99999999999",
        just_over.as_str(),
    ] {
        assert!(
            matches!(parse_match_report(line), Err(TournamentError::Format(_))),
            "expected format error for {line:?}"
        );
    }

    let r = parse_match_report(&format!("ana def. caro {MAX_SET_GAMES}-0 {MAX_SET_GAMES}-0"))
        .unwrap();
    assert_eq!(r.games_won(), (2 * MAX_SET_GAMES, 0));
}
