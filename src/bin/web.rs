//! JSON API around the simulator: run simulations, fetch their reports, export buckets as CSV.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST (e.g. 127.0.0.1), PORT (e.g. 8080).

use actix_web::{
    delete, get, post,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use open_tournament_sim::models::DEFAULT_BUCKETS;
use open_tournament_sim::{run_tournament, ConfigError, SimulationConfig, SimulationReport};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Identifier handed back for a stored report.
type SimulationId = Uuid;

/// Stored report + last access time (for auto-cleanup).
struct SimulationEntry {
    report: SimulationReport,
    last_activity: Instant,
}

/// In-memory state: reports by id. Entries are removed after inactivity.
type AppState = Data<RwLock<HashMap<SimulationId, SimulationEntry>>>;

/// Reports not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(2 * 3600);

/// Largest population a single API request may simulate.
const MAX_PLAYERS_PER_REQUEST: usize = 1_000_000;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateSimulationBody {
    #[serde(flatten)]
    config: SimulationConfig,
    #[serde(default = "default_buckets")]
    buckets: usize,
}

fn default_buckets() -> usize {
    DEFAULT_BUCKETS
}

#[derive(Serialize)]
struct SimulationResponse<'a> {
    id: SimulationId,
    report: &'a SimulationReport,
}

/// Path segment: simulation id (e.g. /api/simulations/{id})
#[derive(Deserialize)]
struct SimulationPath {
    id: SimulationId,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No simulation" }))
}

fn bad_request(message: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": message.to_string() }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "open-tournament-sim",
    })
}

/// Run a simulation on the blocking pool, store its report and return it with a new id.
#[post("/api/simulations")]
async fn api_create_simulation(state: AppState, body: Json<CreateSimulationBody>) -> HttpResponse {
    let CreateSimulationBody { config, buckets } = body.into_inner();
    if config.num_players > MAX_PLAYERS_PER_REQUEST {
        return bad_request(format!("At most {} players per simulation", MAX_PLAYERS_PER_REQUEST));
    }

    let result = web::block(move || -> Result<SimulationReport, ConfigError> {
        let outcome = run_tournament(&config)?;
        SimulationReport::build(&outcome, &config, buckets)
    })
    .await;
    let report = match result {
        Ok(Ok(report)) => report,
        Ok(Err(e)) => return bad_request(e),
        Err(e) => {
            log::error!("Simulation task failed: {}", e);
            return HttpResponse::InternalServerError().body("simulation failed");
        }
    };

    let id = Uuid::new_v4();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!(
        "Stored simulation {} ({} players, {} reached day two)",
        id,
        report.num_players,
        report.day_two_players
    );
    let entry = g.entry(id).or_insert(SimulationEntry {
        report,
        last_activity: Instant::now(),
    });
    HttpResponse::Ok().json(SimulationResponse {
        id,
        report: &entry.report,
    })
}

/// Get a stored report (404 if not found). Touching it refreshes last_activity.
#[get("/api/simulations/{id}")]
async fn api_get_simulation(state: AppState, path: Path<SimulationPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(SimulationResponse {
                id: path.id,
                report: &entry.report,
            })
        }
        None => not_found(),
    }
}

/// Bucket table of a stored report as CSV.
#[get("/api/simulations/{id}/buckets.csv")]
async fn api_get_buckets_csv(state: AppState, path: Path<SimulationPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let mut body = Vec::new();
    match entry.report.write_csv(&mut body) {
        Ok(()) => HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(body),
        Err(e) => {
            log::error!("CSV export of {} failed: {}", path.id, e);
            HttpResponse::InternalServerError().body("csv error")
        }
    }
}

/// Forget a stored report.
#[delete("/api/simulations/{id}")]
async fn api_delete_simulation(state: AppState, path: Path<SimulationPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.remove(&path.id) {
        Some(_) => HttpResponse::NoContent().finish(),
        None => not_found(),
    }
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

    let state = Data::new(RwLock::new(HashMap::<SimulationId, SimulationEntry>::new()));

    // Background task: every 10 minutes, drop reports nobody touched for INACTIVITY_TIMEOUT
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(10 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive simulation report(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_simulation)
            .service(api_get_simulation)
            .service(api_get_buckets_csv)
            .service(api_delete_simulation)
    })
    .bind(bind)?
    .run()
    .await
}
