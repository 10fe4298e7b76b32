//! Tournament state on disk: UTF-8 JSON, keyed by category name.

use crate::models::Tournament;
use serde::Serialize;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Default state file name.
pub const DEFAULT_STATE_FILE: &str = "team_tournament_data.json";

#[derive(Debug, Error)]
pub enum StateError {
    #[error("could not read or write tournament state: {0}")]
    Io(#[from] io::Error),
    #[error("tournament state is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse tournament state from JSON text (e.g. an uploaded file).
pub fn from_json(text: &str) -> Result<Tournament, StateError> {
    Ok(serde_json::from_str(text)?)
}

/// Serialize tournament state as JSON indented by four spaces.
pub fn to_json(tournament: &Tournament) -> Result<String, StateError> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    tournament.serialize(&mut serializer)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Load state from `path`. A missing file is an empty tournament.
pub fn load_state(path: impl AsRef<Path>) -> Result<Tournament, StateError> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let tournament = from_json(&text)?;
            log::info!("Loaded tournament state from {}", path.display());
            Ok(tournament)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("No state at {}, starting empty", path.display());
            Ok(Tournament::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// Write state to `path`, replacing any previous contents.
pub fn save_state(path: impl AsRef<Path>, tournament: &Tournament) -> Result<(), StateError> {
    let path = path.as_ref();
    std::fs::write(path, to_json(tournament)?)?;
    log::debug!("Saved tournament state to {}", path.display());
    Ok(())
}
