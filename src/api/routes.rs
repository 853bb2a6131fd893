use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::handlers::{get_pairings, get_standings, list_tournaments, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/tournaments", get(list_tournaments))
        .route("/api/tournaments/:id/standings", get(get_standings))
        .route("/api/tournaments/:id/pairings", get(get_pairings))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::settings::AppConfig;
    use crate::database;
    use crate::services::registry::RegistryService;

    fn app_with(names: &[&str]) -> (Router, i64) {
        let pool = database::create_memory_pool().unwrap();
        let registry = RegistryService::new(pool.clone());
        registry.reset_database().unwrap();

        let tournament = registry.create_tournament("Very Odd").unwrap();
        for name in names {
            let player = registry.register_player(name).unwrap();
            registry.enroll(tournament, player).unwrap();
        }

        let state = Arc::new(AppState {
            pool,
            config: AppConfig::new(),
        });
        (create_router(state), tournament)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn lists_tournaments() {
        let (app, tournament) = app_with(&[]);
        let (status, body) = get_json(app, "/api/tournaments").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], tournament);
        assert_eq!(body[0]["name"], "Very Odd");
    }

    #[tokio::test]
    async fn standings_include_every_enrolled_player() {
        let (app, tournament) = app_with(&["Bruno Walton", "Boots O'Neal"]);
        let (status, body) = get_json(app, &format!("/api/tournaments/{}/standings", tournament)).await;

        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["rank"], 1);
        assert_eq!(rows[0]["wins"], 0);
        assert_eq!(rows[1]["matchesPlayed"], 0);
    }

    #[tokio::test]
    async fn odd_field_pairings_contain_the_bye_sentinel() {
        let (app, tournament) = app_with(&["1", "2", "3"]);
        let (status, body) = get_json(app, &format!("/api/tournaments/{}/pairings", tournament)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tieBreak"], "opponent-wins");
        let pairs = body["pairs"].as_array().unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0]["secondId"], "bye");
        assert_eq!(pairs[0]["secondName"], "bye");
    }

    #[tokio::test]
    async fn unknown_tournament_is_not_found() {
        let (app, _) = app_with(&[]);
        let (status, body) = get_json(app, "/api/tournaments/404/pairings").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "unknownTournament");
    }

    #[tokio::test]
    async fn exhausted_bye_pool_is_a_conflict() {
        let pool = database::create_memory_pool().unwrap();
        let registry = RegistryService::new(pool.clone());
        registry.reset_database().unwrap();
        let tournament = registry.create_tournament("Solo").unwrap();
        let player = registry.register_player("Alone").unwrap();
        let enrollment = registry.enroll(tournament, player).unwrap();
        registry.report_bye(tournament, enrollment).unwrap();

        let app = create_router(Arc::new(AppState {
            pool,
            config: AppConfig::new(),
        }));
        let (status, body) = get_json(app, &format!("/api/tournaments/{}/pairings", tournament)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["kind"], "exhaustedByePool");
    }
}
