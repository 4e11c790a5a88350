//! HTTP route handlers.

use std::collections::HashSet;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{Local, Timelike, Utc};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::arrivals::{ArrivalsError, ArrivalsSource};
use crate::commute::{CommutePair, StoreError, commute_direction};
use crate::domain::{DomainError, Route, StationBoard, StationCode};
use crate::nearest::nearest_station;
use crate::planner::RouteError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<S>(state: AppState<S>) -> Router
where
    S: ArrivalsSource + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations::<S>))
        .route("/api/stations/nearest", get(nearest::<S>))
        .route("/api/route", get(route::<S>))
        .route("/api/arrivals", get(arrivals::<S>))
        .route("/api/commute", get(commute::<S>))
        .route(
            "/api/commute/pair",
            get(get_pair::<S>).put(put_pair::<S>).delete(delete_pair::<S>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse a station code from a request parameter.
fn parse_station(value: &str, what: &str) -> Result<StationCode, AppError> {
    StationCode::parse_normalized(value).map_err(|_| AppError::BadRequest {
        message: format!("Invalid {what} station code: {value}"),
    })
}

/// Parse a station code that must exist in the topology.
fn known_station<S>(state: &AppState<S>, value: &str, what: &str) -> Result<StationCode, AppError> {
    let code = parse_station(value, what)?;
    if !state.topology().contains(&code) {
        return Err(AppError::NotFound {
            message: format!("Unknown {what} station: {code}"),
        });
    }
    Ok(code)
}

/// All stations with the lines serving them.
async fn list_stations<S>(State(state): State<AppState<S>>) -> Json<StationsResponse> {
    let topology = state.topology();
    let stations = topology
        .stations()
        .iter()
        .map(|s| StationInfo::from_station(s, topology))
        .collect();

    Json(StationsResponse { stations })
}

/// Station closest to a location.
async fn nearest<S>(
    State(state): State<AppState<S>>,
    Query(req): Query<NearestQuery>,
) -> Result<Json<NearestResponse>, AppError> {
    let topology = state.topology();
    let found = nearest_station(topology, req.lat, req.lon).ok_or_else(|| AppError::NotFound {
        message: format!("No station near {}, {}", req.lat, req.lon),
    })?;

    Ok(Json(NearestResponse {
        station: StationInfo::from_station(found.station, topology),
        distance_m: found.distance_m,
    }))
}

/// Best route between two stations.
async fn route<S>(
    State(state): State<AppState<S>>,
    Query(req): Query<RouteQuery>,
) -> Result<Json<RouteResponse>, AppError> {
    let from = parse_station(&req.from, "origin")?;
    let to = parse_station(&req.to, "destination")?;

    let route = state.planner.calculate_route(from, to)?;

    Ok(Json(RouteResponse {
        from: from.to_string(),
        to: to.to_string(),
        route: route.map(|r| RouteResult::from_route(&r, state.topology())),
    }))
}

/// Live arrivals at one station.
async fn arrivals<S: ArrivalsSource>(
    State(state): State<AppState<S>>,
    Query(req): Query<ArrivalsQuery>,
) -> Result<Json<ArrivalsResponse>, AppError> {
    let station = known_station(&state, &req.station, "arrivals")?;
    let feed = state.arrivals.get().await?;

    let board = feed
        .board(&station)
        .cloned()
        .unwrap_or_else(|| StationBoard {
            station,
            arrivals: Vec::new(),
        });

    Ok(Json(ArrivalsResponse {
        board: BoardResult::from_board(&board, feed.fetched_at, Utc::now(), state.topology()),
        source: feed.source.clone(),
    }))
}

/// Stations whose arrivals matter for `route`: every station along it in
/// travel order, each once. Just `from` when there is no route.
fn arrival_stations(route: Option<&Route>, from: StationCode) -> Vec<StationCode> {
    let Some(route) = route else {
        return vec![from];
    };

    let mut seen = HashSet::new();
    route
        .all_stations()
        .into_iter()
        .filter(|code| seen.insert(*code))
        .collect()
}

/// The commute for the current (or given) hour.
async fn commute<S: ArrivalsSource>(
    State(state): State<AppState<S>>,
    Query(req): Query<CommuteQuery>,
) -> Result<Json<CommuteResponse>, AppError> {
    let pair = match (&req.home, &req.work) {
        (Some(home), Some(work)) => CommutePair::new(
            parse_station(home, "home")?,
            parse_station(work, "work")?,
        )?,
        (None, None) => state
            .commute_store
            .load_for(state.topology())
            .ok_or_else(|| AppError::NotFound {
                message: "No commute saved".to_string(),
            })?,
        _ => {
            return Err(AppError::BadRequest {
                message: "Give both home and work, or neither".to_string(),
            });
        }
    };

    let hour = req.hour.unwrap_or_else(|| Local::now().hour());
    let direction = commute_direction(hour);
    let (from, to) = pair.stations(direction);

    let route = state.planner.calculate_route(from, to)?;
    let stations = arrival_stations(route.as_ref(), from);

    let topology = state.topology();
    let (boards, arrivals_error) = match state.arrivals.get().await {
        Ok(feed) => {
            let now = Utc::now();
            let boards = stations
                .iter()
                .map(|code| {
                    let board = feed.board(code).cloned().unwrap_or_else(|| StationBoard {
                        station: *code,
                        arrivals: Vec::new(),
                    });
                    BoardResult::from_board(&board, feed.fetched_at, now, topology)
                })
                .collect();
            (boards, None)
        }
        Err(e) => {
            warn!(error = %e, "commute served without arrivals");
            (Vec::new(), Some(e.to_string()))
        }
    };

    Ok(Json(CommuteResponse {
        direction,
        from: StationRef::new(&from, topology),
        to: StationRef::new(&to, topology),
        route: route.map(|r| RouteResult::from_route(&r, topology)),
        arrival_stations: stations.iter().map(|c| c.as_str().to_string()).collect(),
        boards,
        arrivals_error,
    }))
}

/// The saved commute pair.
async fn get_pair<S>(
    State(state): State<AppState<S>>,
) -> Result<Json<CommutePairResponse>, AppError> {
    let pair = state
        .commute_store
        .load_for(state.topology())
        .ok_or_else(|| AppError::NotFound {
            message: "No commute saved".to_string(),
        })?;

    Ok(Json(CommutePairResponse::from_pair(&pair, state.topology())))
}

/// Save the commute pair.
async fn put_pair<S>(
    State(state): State<AppState<S>>,
    Json(body): Json<CommutePairBody>,
) -> Result<Json<CommutePairResponse>, AppError> {
    let home = known_station(&state, &body.home, "home")?;
    let work = known_station(&state, &body.work, "work")?;
    let pair = CommutePair::new(home, work)?;

    state.commute_store.save(&pair)?;

    Ok(Json(CommutePairResponse::from_pair(&pair, state.topology())))
}

/// Forget the commute pair.
async fn delete_pair<S>(State(state): State<AppState<S>>) -> Result<StatusCode, AppError> {
    state.commute_store.clear()?;
    Ok(StatusCode::NO_CONTENT)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        match e {
            RouteError::UnknownStation(_) => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<ArrivalsError> for AppError {
    fn from(e: ArrivalsError) -> Self {
        AppError::BadGateway {
            message: e.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
