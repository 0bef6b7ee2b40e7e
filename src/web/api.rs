use std::{fmt::Display, sync::Arc};

use rocket::{
    http::Status,
    post,
    response::{self, Responder},
    routes,
    serde::json::{Error as JsonError, Json},
    tokio::task::{spawn_blocking, JoinError},
    Request, Route, State,
};
use thiserror::Error;
use tracing::error;

use crate::boundary::{ErrorResponse, RouteRequest, RouteResponse, RouteStop};
use crate::error::PlanError;
use crate::planner::Planner;

type JsonResult<'a, T> = Result<Json<T>, JsonError<'a>>;

pub fn routes() -> Vec<Route> {
    routes![post_route]
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error("{0}")]
    InvalidBody(String),
    #[error("routing task failed: {0}")]
    Task(#[from] JoinError),
}

impl ApiError {
    fn status(&self) -> Status {
        match self {
            ApiError::Plan(err) if err.is_client_error() => Status::BadRequest,
            ApiError::Plan(_) | ApiError::Task(_) => Status::InternalServerError,
            ApiError::InvalidBody(_) => Status::UnprocessableEntity,
        }
    }
}

impl From<JsonError<'_>> for ApiError {
    fn from(err: JsonError<'_>) -> Self {
        match err {
            JsonError::Io(err) => Self::InvalidBody(err.to_string()),
            JsonError::Parse(_, err) => Self::InvalidBody(err.to_string()),
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'o> {
        let status = self.status();
        if status.class().is_server_error() {
            error!("{} {} failed: {}", req.method(), req.uri(), self);
        }
        json_error_response(req, &self, status)
    }
}

fn json_error_response<'r, 'o: 'r, E: Display>(
    req: &'r Request<'_>,
    err: &E,
    status: Status,
) -> response::Result<'o> {
    let body = ErrorResponse {
        erro: err.to_string(),
    };
    Json(body).respond_to(req).map(|mut res| {
        res.set_status(status);
        res
    })
}

/// Geocodes, classifies and sequences the submitted addresses.
///
/// The pipeline blocks on external services, so it runs on the blocking pool.
#[post("/rota", data = "<request>")]
pub async fn post_route(
    planner: &State<Arc<Planner>>,
    request: JsonResult<'_, RouteRequest>,
) -> Result<Json<RouteResponse>, ApiError> {
    let Json(request) = request?;
    let planner = Arc::clone(planner.inner());

    let route = spawn_blocking(move || planner.plan(request.enderecos)).await??;

    Ok(Json(RouteResponse {
        rota: route.into_stops().into_iter().map(RouteStop::from).collect(),
    }))
}
