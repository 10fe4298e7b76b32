//! Read-only renderings of a category: Graphviz bracket and CSV standings.

use crate::logic::{get_bracket_structure, get_standings, BracketView, MatchupView};
use crate::models::{Category, Slot};
use std::collections::HashMap;
use std::fmt;

/// Column headers of a standings table, after the group header row.
pub const STANDINGS_HEADERS: [&str; 10] = [
    "Team", "PJ (E)", "PG (E)", "PG (I)", "SG", "SP", "Dif Sets", "GG", "GP", "Dif Games",
];

/// Standings as CSV: per group a "GROUP X" row, the column headers, then one row per team.
pub fn standings_csv(category: &Category) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());
    for group in get_standings(category) {
        wtr.write_record([format!("GROUP {}", group.group)])?;
        wtr.write_record(STANDINGS_HEADERS)?;
        for row in &group.rows {
            wtr.write_record([
                row.team.clone(),
                row.team_matches_played.to_string(),
                row.team_matches_won.to_string(),
                row.individual_matches_won.to_string(),
                row.sets_won.to_string(),
                row.sets_lost.to_string(),
                row.set_difference.to_string(),
                row.games_won.to_string(),
                row.games_lost.to_string(),
                row.game_difference.to_string(),
            ])?;
        }
    }
    let bytes = wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Node label: "A vs B", the provisional winner in bold, or "A\n(BYE)".
fn matchup_label(m: &MatchupView) -> String {
    let [a, b] = &m.slots;
    match (a, b) {
        (Slot::Team(t), Slot::Bye) | (Slot::Bye, Slot::Team(t)) => {
            format!("\"{}\\n(BYE)\"", escape_quoted(t))
        }
        _ => match &m.provisional_winner {
            Some(w) => {
                let side = |s: &Slot| {
                    let text = escape_html(&s.to_string());
                    if s == w {
                        format!("<b>{text}</b>")
                    } else {
                        text
                    }
                };
                format!("<{} vs {}>", side(a), side(b))
            }
            None => format!(
                "\"{} vs {}\"",
                escape_quoted(&a.to_string()),
                escape_quoted(&b.to_string())
            ),
        },
    }
}

/// Left-to-right Graphviz bracket, one cluster per round. `None` before a bracket exists.
pub fn bracket_dot(category: &Category) -> Option<String> {
    let view = get_bracket_structure(category);
    if view.rounds.is_empty() {
        return None;
    }
    let mut dot = String::new();
    write_dot(&view, &mut dot).ok()?;
    Some(dot)
}

fn write_dot(view: &BracketView, dot: &mut impl fmt::Write) -> fmt::Result {
    writeln!(dot, "digraph bracket {{")?;
    writeln!(dot, "    graph [splines=polyline, rankdir=LR, bgcolor=\"#535050\"];")?;
    writeln!(
        dot,
        "    node [shape=box, style=\"rounded,filled\", fillcolor=\"#989494\", \
         fontname=\"sans-serif\"];"
    )?;
    writeln!(dot, "    edge [color=lightgrey, arrowhead=none];")?;

    // node that each advancing team came out of
    let mut source_node: HashMap<&str, String> = HashMap::new();
    let mut edges = Vec::new();
    let mut round_nodes: Vec<Vec<String>> = Vec::new();

    for (r, round) in view.rounds.iter().enumerate() {
        writeln!(dot, "    subgraph cluster_{r} {{")?;
        writeln!(
            dot,
            "        label=\"{}\"; style=rounded; color=lightgrey; fontcolor=black; rank=same;",
            escape_quoted(&round.name)
        )?;
        let mut nodes = Vec::new();
        for (i, m) in round.matchups.iter().enumerate() {
            let id = format!("R{r}M{i}");
            let fill = if m.provisional_winner.is_some() {
                "#e8f5e9"
            } else {
                "#e3fdeb"
            };
            writeln!(
                dot,
                "        {id} [label={}, fillcolor=\"{fill}\"];",
                matchup_label(m)
            )?;
            if r > 0 {
                for team in m.slots.iter().filter_map(Slot::team_name) {
                    if let Some(src) = source_node.get(team) {
                        edges.push(format!("    {src} -> {id};"));
                    }
                }
            }
            if let Some(Slot::Team(w)) = &m.final_winner {
                source_node.insert(w.as_str(), id.clone());
            }
            nodes.push(id);
        }
        writeln!(dot, "    }}")?;
        round_nodes.push(nodes);
    }

    for line in &edges {
        writeln!(dot, "{line}")?;
    }
    // keep rounds centred on each other
    for pair in round_nodes.windows(2) {
        let middle = |nodes: &[String]| nodes.get(nodes.len() / 2).cloned();
        if let (Some(from), Some(to)) = (middle(&pair[0]), middle(&pair[1])) {
            writeln!(dot, "    {from} -> {to} [style=invis];")?;
        }
    }

    if let Some(champion) = &view.champion {
        writeln!(
            dot,
            "    champion_node [label=\"CHAMPION\\n\\n{}\", fillcolor=\"#fff59d\"];",
            escape_quoted(champion)
        )?;
        if let Some(src) = source_node.get(champion.as_str()) {
            writeln!(dot, "    {src} -> champion_node;")?;
        }
    }
    writeln!(dot, "}}")
}

/// File name for a category export, e.g. `tournament_OPEN_A_2026-10-16.csv`.
pub fn export_file_name(category: &str, extension: &str) -> String {
    let safe: String = category
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!(
        "tournament_{}_{}.{}",
        safe,
        chrono::Local::now().format("%Y-%m-%d"),
        extension
    )
}
