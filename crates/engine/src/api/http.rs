//! HTTP routes.
//!
//! Health check plus read-only world dumps for debugging.

use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use mudlark_domain::{Player, Room};

use crate::app::App;
use crate::infrastructure::ports::RepoError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/health", get(health))
        .route("/players", get(list_players))
        .route("/rooms", get(list_rooms))
}

async fn health() -> &'static str {
    "OK"
}

async fn list_players(State(app): State<Arc<App>>) -> Result<Json<Vec<Player>>, ApiError> {
    let players = app.repositories.players.list_all().await?;
    Ok(Json(players))
}

async fn list_rooms(State(app): State<Arc<App>>) -> Result<Json<Vec<Room>>, ApiError> {
    let rooms = app.repositories.rooms.list_all().await?;
    Ok(Json(rooms))
}

#[derive(Debug)]
pub enum ApiError {
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "HTTP request failed");
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error",
                )
                    .into_response()
            }
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::app::Repositories;
    use crate::infrastructure::ports::MockRoomRepo;

    async fn get(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn health_says_ok() {
        let app = Arc::new(App::new(Repositories::memory()));
        let (status, body) = get(routes().with_state(app), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"OK");
    }

    #[tokio::test]
    async fn players_lists_every_saved_player() {
        let repos = Repositories::memory();
        let alice = Player::new("ALICE").unwrap();
        repos.players.save(&alice).await.unwrap();
        let app = Arc::new(App::new(repos));

        let (status, body) = get(routes().with_state(app), "/players").await;

        assert_eq!(status, StatusCode::OK);
        let players: Vec<Player> = serde_json::from_slice(&body).unwrap();
        assert_eq!(players, vec![alice]);
    }

    #[tokio::test]
    async fn storage_failures_are_500s() {
        let mut rooms = MockRoomRepo::new();
        rooms
            .expect_list_all()
            .returning(|| Err(RepoError::database("list_all", "disk gone")));
        let repos = Repositories {
            rooms: Arc::new(rooms),
            ..Repositories::memory()
        };
        let app = Arc::new(App::new(repos));

        let (status, _) = get(routes().with_state(app), "/rooms").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
