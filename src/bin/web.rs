//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Configuration comes from the environment, see `tennis_tournament_web::config`.

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tennis_tournament_web::config::Config;
use tennis_tournament_web::persistence::{from_json, to_json, DEFAULT_STATE_FILE};
use tennis_tournament_web::render::{bracket_dot, export_file_name, standings_csv};
use tennis_tournament_web::{
    create_category, delete_category, delete_team, generate_bracket_with, get_bracket_structure,
    get_confrontation_history, get_standings, list_teams, recent_matches, record_group_match,
    record_knockout_match, register_team, reset_knockout_phase, trigger_round_check,
    SeedingPolicy, Stage, Tournament, TournamentError,
};
use uuid::Uuid;

/// Identifier of one browser session's tournament.
type SessionId = Uuid;

/// Per-session entry: tournament data + last activity time (for auto-cleanup).
struct SessionEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: one tournament per session id. Idle entries are swept periodically.
type AppState = Data<RwLock<HashMap<SessionId, SessionEntry>>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(serde::Serialize)]
struct SessionResponse<'a> {
    id: SessionId,
    tournament: &'a Tournament,
}

#[derive(Deserialize)]
struct CategoryBody {
    name: String,
}

#[derive(Deserialize)]
struct TeamBody {
    name: String,
    group: String,
    /// Comma-separated player names.
    players: String,
}

#[derive(Deserialize)]
struct ReportBody {
    result: String,
}

#[derive(Deserialize)]
struct BracketBody {
    num_advancing: usize,
    bracket_size: usize,
    #[serde(default)]
    seeding: SeedingPolicy,
}

#[derive(Deserialize)]
struct RecentQuery {
    #[serde(default = "default_stage")]
    stage: Stage,
    #[serde(default = "default_recent_limit")]
    limit: usize,
}

fn default_stage() -> Stage {
    Stage::Group
}

fn default_recent_limit() -> usize {
    10
}

/// Path segment: session id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct SessionPath {
    id: SessionId,
}

/// Path segments: session id and category name
#[derive(Deserialize)]
struct CategoryPath {
    id: SessionId,
    category: String,
}

/// Path segments: session id, category and team name
#[derive(Deserialize)]
struct TeamPath {
    id: SessionId,
    category: String,
    team: String,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::CategoryNotFound(_) | TournamentError::TeamNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Run `f` on a session's tournament under the write lock, refreshing its last activity.
fn with_session<T>(
    state: &AppState,
    id: SessionId,
    f: impl FnOnce(&mut Tournament) -> T,
) -> Result<T, HttpResponse> {
    let mut g = state
        .write()
        .map_err(|_| HttpResponse::InternalServerError().body("lock error"))?;
    let entry = g
        .get_mut(&id)
        .ok_or_else(|| {
            HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        })?;
    entry.last_activity = Instant::now();
    Ok(f(&mut entry.tournament))
}

/// Write a session to `DATA_DIR` if configured. Failures are logged, not returned.
async fn persist(state: &AppState, config: &Config, id: SessionId) {
    let Some(dir) = &config.data_dir else {
        return;
    };
    let snapshot = match state.read() {
        Ok(g) => g.get(&id).map(|e| to_json(&e.tournament)),
        Err(_) => return,
    };
    match snapshot {
        Some(Ok(text)) => {
            let path = dir.join(format!("{id}.json"));
            if let Err(e) = tokio::fs::write(&path, text).await {
                log::warn!("Could not save session {} to {}: {}", id, path.display(), e);
            }
        }
        Some(Err(e)) => log::warn!("Could not serialize session {}: {}", id, e),
        None => {}
    }
}

/// Finish a command: on success persist the session and return its message.
async fn command_response(
    state: &AppState,
    config: &Config,
    id: SessionId,
    result: Result<Result<String, TournamentError>, HttpResponse>,
) -> HttpResponse {
    match result {
        Err(resp) => resp,
        Ok(Err(e)) => error_response(&e),
        Ok(Ok(message)) => {
            persist(state, config, id).await;
            HttpResponse::Ok().json(serde_json::json!({ "message": message }))
        }
    }
}

fn query_response(
    result: Result<Result<HttpResponse, TournamentError>, HttpResponse>,
) -> HttpResponse {
    match result {
        Err(resp) => resp,
        Ok(Err(e)) => error_response(&e),
        Ok(Ok(resp)) => resp,
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tennis-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Start a new session with an empty tournament (client stores the id).
#[post("/api/tournaments")]
async fn api_create_session(state: AppState) -> HttpResponse {
    let id = Uuid::new_v4();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = g.entry(id).or_insert(SessionEntry {
        tournament: Tournament::new(),
        last_activity: Instant::now(),
    });
    log::info!("New session {}", id);
    HttpResponse::Ok().json(SessionResponse {
        id,
        tournament: &entry.tournament,
    })
}

/// Full tournament state of a session.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    match with_session(&state, path.id, |t| HttpResponse::Ok().json(&*t)) {
        Ok(resp) | Err(resp) => resp,
    }
}

/// Replace a session's state with an uploaded JSON tournament file.
#[put("/api/tournaments/{id}")]
async fn api_upload_tournament(
    state: AppState,
    config: Data<Config>,
    path: Path<SessionPath>,
    body: String,
) -> HttpResponse {
    let uploaded = match from_json(&body) {
        Ok(t) => t,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    };
    let result = with_session(&state, path.id, |t| {
        *t = uploaded;
        Ok(format!("Tournament loaded ({} categories)", t.category_names().count()))
    });
    command_response(&state, &config, path.id, result).await
}

/// Download a session's state as a JSON file.
#[get("/api/tournaments/{id}/export")]
async fn api_export_tournament(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let result = with_session(&state, path.id, |t| to_json(t));
    match result {
        Err(resp) => resp,
        Ok(Err(e)) => HttpResponse::InternalServerError()
            .json(serde_json::json!({ "error": e.to_string() })),
        Ok(Ok(text)) => HttpResponse::Ok()
            .content_type("application/json")
            .insert_header(attachment(DEFAULT_STATE_FILE.to_string()))
            .body(text),
    }
}

fn attachment(filename: String) -> ContentDisposition {
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(filename)],
    }
}

#[post("/api/tournaments/{id}/categories")]
async fn api_create_category(
    state: AppState,
    config: Data<Config>,
    path: Path<SessionPath>,
    body: Json<CategoryBody>,
) -> HttpResponse {
    let result = with_session(&state, path.id, |t| {
        create_category(t, &body.name).map(|()| format!("Category '{}' created", body.name.trim()))
    });
    command_response(&state, &config, path.id, result).await
}

#[delete("/api/tournaments/{id}/categories/{category}")]
async fn api_delete_category(
    state: AppState,
    config: Data<Config>,
    path: Path<CategoryPath>,
) -> HttpResponse {
    let result = with_session(&state, path.id, |t| {
        delete_category(t, &path.category).map(|()| format!("Category '{}' deleted", path.category))
    });
    command_response(&state, &config, path.id, result).await
}

#[get("/api/tournaments/{id}/categories/{category}/teams")]
async fn api_list_teams(state: AppState, path: Path<CategoryPath>) -> HttpResponse {
    query_response(with_session(&state, path.id, |t| {
        let cat = t.category(&path.category)?;
        let teams: Vec<_> = list_teams(cat)
            .map(|(name, team)| serde_json::json!({ "name": name, "team": team }))
            .collect();
        Ok(HttpResponse::Ok().json(teams))
    }))
}

#[post("/api/tournaments/{id}/categories/{category}/teams")]
async fn api_register_team(
    state: AppState,
    config: Data<Config>,
    path: Path<CategoryPath>,
    body: Json<TeamBody>,
) -> HttpResponse {
    let result = with_session(&state, path.id, |t| {
        let cat = t.category_mut(&path.category)?;
        register_team(cat, &body.name, &body.group, &body.players)?;
        Ok(format!(
            "Team '{}' registered in group {}",
            body.name.trim(),
            body.group.trim().to_uppercase()
        ))
    });
    command_response(&state, &config, path.id, result).await
}

#[delete("/api/tournaments/{id}/categories/{category}/teams/{team}")]
async fn api_delete_team(
    state: AppState,
    config: Data<Config>,
    path: Path<TeamPath>,
) -> HttpResponse {
    let result = with_session(&state, path.id, |t| {
        let cat = t.category_mut(&path.category)?;
        delete_team(cat, &path.team)?;
        Ok(format!("Team '{}' and all its matches were deleted", path.team))
    });
    command_response(&state, &config, path.id, result).await
}

#[post("/api/tournaments/{id}/categories/{category}/group-matches")]
async fn api_record_group_match(
    state: AppState,
    config: Data<Config>,
    path: Path<CategoryPath>,
    body: Json<ReportBody>,
) -> HttpResponse {
    let result = with_session(&state, path.id, |t| {
        let cat = t.category_mut(&path.category)?;
        record_group_match(cat, &body.result).map(|outcome| outcome.to_string())
    });
    command_response(&state, &config, path.id, result).await
}

#[get("/api/tournaments/{id}/categories/{category}/standings")]
async fn api_standings(state: AppState, path: Path<CategoryPath>) -> HttpResponse {
    query_response(with_session(&state, path.id, |t| {
        let cat = t.category(&path.category)?;
        Ok(HttpResponse::Ok().json(get_standings(cat)))
    }))
}

#[get("/api/tournaments/{id}/categories/{category}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<CategoryPath>) -> HttpResponse {
    query_response(with_session(&state, path.id, |t| {
        let cat = t.category(&path.category)?;
        Ok(match standings_csv(cat) {
            Ok(csv) => HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header(attachment(export_file_name(&path.category, "csv")))
                .body(csv),
            Err(e) => HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": e.to_string() })),
        })
    }))
}

#[get("/api/tournaments/{id}/categories/{category}/history")]
async fn api_history(state: AppState, path: Path<CategoryPath>) -> HttpResponse {
    query_response(with_session(&state, path.id, |t| {
        let cat = t.category(&path.category)?;
        Ok(HttpResponse::Ok().json(get_confrontation_history(cat)))
    }))
}

/// Latest results of one stage, newest first (public display feed).
#[get("/api/tournaments/{id}/categories/{category}/recent")]
async fn api_recent_matches(
    state: AppState,
    path: Path<CategoryPath>,
    query: Query<RecentQuery>,
) -> HttpResponse {
    query_response(with_session(&state, path.id, |t| {
        let cat = t.category(&path.category)?;
        Ok(HttpResponse::Ok().json(recent_matches(cat, query.stage, query.limit)))
    }))
}

#[get("/api/tournaments/{id}/categories/{category}/knockout")]
async fn api_bracket(state: AppState, path: Path<CategoryPath>) -> HttpResponse {
    query_response(with_session(&state, path.id, |t| {
        let cat = t.category(&path.category)?;
        Ok(HttpResponse::Ok().json(get_bracket_structure(cat)))
    }))
}

/// Bracket as Graphviz source (204 before a bracket exists).
#[get("/api/tournaments/{id}/categories/{category}/knockout.dot")]
async fn api_bracket_dot(state: AppState, path: Path<CategoryPath>) -> HttpResponse {
    query_response(with_session(&state, path.id, |t| {
        let cat = t.category(&path.category)?;
        Ok(match bracket_dot(cat) {
            Some(dot) => HttpResponse::Ok().content_type("text/vnd.graphviz").body(dot),
            None => HttpResponse::NoContent().finish(),
        })
    }))
}

#[post("/api/tournaments/{id}/categories/{category}/knockout")]
async fn api_generate_bracket(
    state: AppState,
    config: Data<Config>,
    path: Path<CategoryPath>,
    body: Json<BracketBody>,
) -> HttpResponse {
    let result = with_session(&state, path.id, |t| {
        let cat = t.category_mut(&path.category)?;
        generate_bracket_with(
            cat,
            body.num_advancing,
            body.bracket_size,
            body.seeding,
            &mut rand::thread_rng(),
        )?;
        Ok(format!("Knockout bracket of {} generated", body.bracket_size))
    });
    command_response(&state, &config, path.id, result).await
}

#[post("/api/tournaments/{id}/categories/{category}/knockout/matches")]
async fn api_record_knockout_match(
    state: AppState,
    config: Data<Config>,
    path: Path<CategoryPath>,
    body: Json<ReportBody>,
) -> HttpResponse {
    let result = with_session(&state, path.id, |t| {
        let cat = t.category_mut(&path.category)?;
        record_knockout_match(cat, &body.result).map(|outcome| outcome.to_string())
    });
    command_response(&state, &config, path.id, result).await
}

#[post("/api/tournaments/{id}/categories/{category}/knockout/check")]
async fn api_round_check(
    state: AppState,
    config: Data<Config>,
    path: Path<CategoryPath>,
) -> HttpResponse {
    let result = with_session(&state, path.id, |t| {
        let cat = t.category_mut(&path.category)?;
        let progress = trigger_round_check(cat);
        Ok(format!("Round check done: {progress:?}"))
    });
    command_response(&state, &config, path.id, result).await
}

#[delete("/api/tournaments/{id}/categories/{category}/knockout")]
async fn api_reset_knockout(
    state: AppState,
    config: Data<Config>,
    path: Path<CategoryPath>,
) -> HttpResponse {
    let result = with_session(&state, path.id, |t| {
        let cat = t.category_mut(&path.category)?;
        reset_knockout_phase(cat);
        Ok("Knockout phase reset".to_string())
    });
    command_response(&state, &config, path.id, result).await
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    if let Some(dir) = &config.data_dir {
        tokio::fs::create_dir_all(dir).await?;
        log::info!("Saving sessions to {}", dir.display());
    }
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state: AppState = Data::new(RwLock::new(HashMap::new()));
    let inactivity_timeout = config.inactivity_timeout;
    let config = Data::new(config);

    // Background task: every 30 minutes, remove sessions idle past the timeout
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive session(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_create_session)
            .service(api_get_tournament)
            .service(api_upload_tournament)
            .service(api_export_tournament)
            .service(api_create_category)
            .service(api_delete_category)
            .service(api_list_teams)
            .service(api_register_team)
            .service(api_delete_team)
            .service(api_record_group_match)
            .service(api_standings)
            .service(api_standings_csv)
            .service(api_history)
            .service(api_recent_matches)
            .service(api_bracket)
            .service(api_bracket_dot)
            .service(api_generate_bracket)
            .service(api_record_knockout_match)
            .service(api_round_check)
            .service(api_reset_knockout)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
