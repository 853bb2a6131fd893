use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use crate::api::models::{ErrorResponse, PairingItem, PairingsResponse, StandingItem, TournamentItem};
use crate::config::settings::AppConfig;
use crate::database::{self, tournaments, DbPool};
use crate::errors::{PairingError, StoreError};
use crate::services::rounds::RoundService;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
}

impl AppState {
    fn rounds(&self) -> RoundService {
        RoundService::new(self.pool.clone(), self.config.pairing.clone())
    }
}

pub async fn list_tournaments(State(state): State<Arc<AppState>>) -> Response {
    let conn = match database::get_connection(&state.pool) {
        Ok(conn) => conn,
        Err(e) => return error_response(e),
    };

    match tournaments::list_all(&conn) {
        Ok(rows) => {
            let items: Vec<TournamentItem> = rows.into_iter().map(TournamentItem::from).collect();
            Json(items).into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn get_standings(
    State(state): State<Arc<AppState>>,
    Path(tournament_id): Path<i64>,
) -> Response {
    match state.rounds().standings(tournament_id) {
        Ok(standings) => Json(StandingItem::ranked(&standings)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_pairings(
    State(state): State<Arc<AppState>>,
    Path(tournament_id): Path<i64>,
) -> Response {
    match state.rounds().compute_next_round_pairings(tournament_id) {
        Ok(pairs) => Json(PairingsResponse {
            tournament_id,
            tie_break: state.config.pairing.tie_break.to_string(),
            pairs: pairs.iter().map(PairingItem::from).collect(),
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(err: anyhow::Error) -> Response {
    let (status, kind) = if let Some(pairing) = err.downcast_ref::<PairingError>() {
        let kind = match pairing {
            PairingError::ExhaustedByePool { .. } => "exhaustedByePool",
            PairingError::NoValidOpponent { .. } => "noValidOpponent",
        };
        (StatusCode::CONFLICT, kind)
    } else if let Some(StoreError::UnknownTournament(_)) = err.downcast_ref::<StoreError>() {
        (StatusCode::NOT_FOUND, "unknownTournament")
    } else {
        log::error!("Request failed: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "internal")
    };

    let body = ErrorResponse {
        kind: kind.to_string(),
        message: err.to_string(),
    };
    (status, Json(body)).into_response()
}
