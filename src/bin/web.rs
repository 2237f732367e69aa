//! Single binary web server: JSON REST API plus an embedded index page.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use bracket_tournament_web::{
    bracket_view, build_bracket, clear_teams, draw_teams, record_winner, register_team,
    remove_team, MemoryStore, RecordStore, Tournament, TournamentError, TournamentId,
    TournamentStatus,
};
use serde::Deserialize;
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory state: one shared record store behind a lock. Each handler holds
/// the write guard for its whole operation, which serializes the winner write
/// and the downstream advancement write of `record_winner`.
type AppState = Data<RwLock<MemoryStore>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
}

#[derive(Deserialize)]
struct SetStatusBody {
    status: TournamentStatus,
}

#[derive(Deserialize)]
struct RegisterTeamBody {
    name: String,
}

#[derive(Deserialize)]
struct GenerateBracketBody {
    team_ids: Vec<Uuid>,
}

#[derive(Deserialize)]
struct RecordWinnerBody {
    winner_id: Uuid,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segment: team id (e.g. /api/teams/{team_id})
#[derive(Deserialize)]
struct TeamPath {
    team_id: Uuid,
}

/// Path segment: match id (e.g. /api/matches/{match_id}/winner)
#[derive(Deserialize)]
struct MatchPath {
    match_id: Uuid,
}

/// Map a logic error to the HTTP response the API contract promises.
fn error_response(e: TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::MatchNotFound
        | TournamentError::TeamNotFound(_)
        | TournamentError::TournamentNotFound => HttpResponse::NotFound().json(body),
        TournamentError::Store(_) => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "bracket-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a tournament (status starts at `created`).
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    body: Json<CreateTournamentBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let tournament = Tournament::new(body.name.trim());
    match g.insert_tournament(tournament.clone()) {
        Ok(()) => HttpResponse::Ok().json(tournament),
        Err(e) => error_response(TournamentError::Store(e)),
    }
}

/// List all tournaments.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.tournaments() {
        Ok(ts) => HttpResponse::Ok().json(ts),
        Err(e) => error_response(TournamentError::Store(e)),
    }
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.tournament(path.id) {
        Ok(Some(t)) => HttpResponse::Ok().json(t),
        Ok(None) => error_response(TournamentError::TournamentNotFound),
        Err(e) => error_response(TournamentError::Store(e)),
    }
}

/// Update a tournament's status label. Transitions are not validated.
#[put("/api/tournaments/{id}/status")]
async fn api_set_tournament_status(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SetStatusBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut tournament = match g.tournament(path.id) {
        Ok(Some(t)) => t,
        Ok(None) => return error_response(TournamentError::TournamentNotFound),
        Err(e) => return error_response(TournamentError::Store(e)),
    };
    tournament.status = body.status;
    match g.save_tournament(tournament.clone()) {
        Ok(()) => HttpResponse::Ok().json(tournament),
        Err(e) => error_response(TournamentError::Store(e)),
    }
}

/// List all registered teams.
#[get("/api/teams")]
async fn api_list_teams(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.teams() {
        Ok(teams) => HttpResponse::Ok().json(teams),
        Err(e) => error_response(TournamentError::Store(e)),
    }
}

/// Register a team (400 on duplicate name).
#[post("/api/teams")]
async fn api_register_team(state: AppState, body: Json<RegisterTeamBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match register_team(&mut *g, &body.name) {
        Ok(team) => HttpResponse::Created().json(team),
        Err(e) => error_response(e),
    }
}

/// Delete one team; matches referencing it are removed as well.
#[delete("/api/teams/{team_id}")]
async fn api_remove_team(state: AppState, path: Path<TeamPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match remove_team(&mut *g, path.team_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

/// Delete all teams and all matches.
#[delete("/api/teams")]
async fn api_clear_teams(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match clear_teams(&mut *g) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "message": "All teams removed" })),
        Err(e) => error_response(e),
    }
}

/// Draw: shuffle all registered teams into a seeding order.
#[post("/api/draw")]
async fn api_draw(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match draw_teams(&*g) {
        Ok(teams) => HttpResponse::Ok().json(teams),
        Err(e) => error_response(e),
    }
}

/// Generate the bracket for a tournament from an ordered team id list.
/// Replaces any previous bracket of that tournament.
#[post("/api/tournaments/{id}/bracket")]
async fn api_generate_bracket(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<GenerateBracketBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if let Err(e) = build_bracket(&mut *g, path.id, &body.team_ids) {
        return error_response(e);
    }
    match bracket_view(&*g, path.id) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => error_response(e),
    }
}

/// A tournament's matches grouped by round.
#[get("/api/tournaments/{id}/matches")]
async fn api_list_matches(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match bracket_view(&*g, path.id) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => error_response(e),
    }
}

/// Record a match winner and advance them into the next round.
#[put("/api/matches/{match_id}/winner")]
async fn api_record_winner(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<RecordWinnerBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let updated = match record_winner(&mut *g, path.match_id, body.winner_id) {
        Ok(m) => m,
        Err(e) => return error_response(e),
    };
    let teams = match g.teams() {
        Ok(teams) => teams,
        Err(e) => return error_response(TournamentError::Store(e)),
    };
    let view = updated.view(|id| teams.iter().find(|t| t.id == id).cloned());
    HttpResponse::Ok().json(view)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(MemoryStore::new()));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", actix_web::web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_create_tournament)
            .service(api_list_tournaments)
            .service(api_get_tournament)
            .service(api_set_tournament_status)
            .service(api_list_teams)
            .service(api_register_team)
            .service(api_clear_teams)
            .service(api_remove_team)
            .service(api_draw)
            .service(api_generate_bracket)
            .service(api_list_matches)
            .service(api_record_winner)
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
