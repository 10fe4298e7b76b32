//! Standings CSV, Graphviz bracket and export naming.

use tennis_tournament_web::render::{
    bracket_dot, export_file_name, standings_csv, STANDINGS_HEADERS,
};
use tennis_tournament_web::{generate_bracket, record_knockout_match, register_team, Category};

fn category() -> Category {
    let mut c = Category::new();
    register_team(&mut c, "Alpha", "A", "ana,beto").unwrap();
    register_team(&mut c, "Beta", "A", "caro,dani").unwrap();
    register_team(&mut c, "Gamma", "B", "eva,fede").unwrap();
    c.team_mut("Alpha").unwrap().team_matches_won = 1;
    c
}

#[test]
fn csv_has_a_header_block_per_group() {
    let csv = standings_csv(&category()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    let header = STANDINGS_HEADERS.join(",");
    assert_eq!(lines[0], "GROUP A");
    assert_eq!(lines[1], header);
    assert_eq!(lines[2], "Alpha,0,1,0,0,0,0,0,0,0");
    assert_eq!(lines[3], "Beta,0,0,0,0,0,0,0,0,0");
    assert_eq!(lines[4], "GROUP B");
    assert_eq!(lines[5], header);
    assert!(lines[6].starts_with("Gamma,"));
    assert_eq!(lines.len(), 7);
}

#[test]
fn csv_of_empty_category_is_empty() {
    assert_eq!(standings_csv(&Category::new()).unwrap(), "");
}

#[test]
fn no_bracket_no_diagram() {
    assert_eq!(bracket_dot(&category()), None);
}

#[test]
fn diagram_has_rounds_byes_and_champion() {
    let mut c = category();
    generate_bracket(&mut c, 1, 4).unwrap();
    let dot = bracket_dot(&c).unwrap();
    assert!(dot.starts_with("digraph bracket {"));
    assert!(dot.contains("subgraph cluster_0"));
    assert!(dot.contains("label=\"Semifinals\""));
    assert!(dot.contains("R0M0 [label=\"Alpha\\n(BYE)\""));
    assert!(!dot.contains("champion_node"));

    for line in ["ana def. eva 6-1 6-1", "beto def. fede 6-1 6-1"] {
        record_knockout_match(&mut c, line).unwrap();
    }
    let dot = bracket_dot(&c).unwrap();
    assert!(dot.contains("<b>Alpha</b> vs Gamma"), "{dot}");

    record_knockout_match(&mut c, "eva def. ana 6-1 6-1").unwrap();
    assert_eq!(c.champion.as_deref(), Some("Alpha"));
    let dot = bracket_dot(&c).unwrap();
    assert!(dot.contains("label=\"Final\""));
    assert!(dot.contains("R0M0 -> R1M0;"));
    assert!(dot.contains("R1M0 -> champion_node;"));
}

#[test]
fn export_names_carry_category_and_date() {
    let name = export_file_name("Open A/B", "csv");
    assert!(name.starts_with("tournament_Open_A_B_"));
    assert!(name.ends_with(".csv"));
    // tournament_ + category + _ + YYYY-MM-DD + .csv
    assert_eq!(name.len(), "tournament_Open_A_B_".len() + 10 + 4);
}
