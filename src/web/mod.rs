//! HTTP surface: Rocket instance serving `POST /rota`.

use std::sync::Arc;

use rocket::{catch, catchers, config::Config as RocketCfg, serde::json::Json, Build, Request, Rocket};

use crate::boundary::ErrorResponse;
use crate::planner::Planner;

pub mod api;

/// Assembles the Rocket instance around a shared planner.
pub fn rocket(planner: Arc<Planner>, rocket_cfg: RocketCfg) -> Rocket<Build> {
    rocket::custom(rocket_cfg)
        .manage(planner)
        .mount("/", api::routes())
        .register("/", catchers![not_found, internal_error])
}

#[catch(404)]
fn not_found(req: &Request<'_>) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        erro: format!("Rota não encontrada: {}", req.uri()),
    })
}

#[catch(500)]
fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse {
        erro: "Erro interno".to_string(),
    })
}
