//! Shared helpers: a stub stats backend and a running page server.
#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::Path,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

use github_wrapped::{AppState, BackendClient, build_router};

pub const TOKEN: &str = "test-token";

pub fn payload() -> Value {
    let languages: Vec<Value> = ["Rust", "Go", "TypeScript", "Python", "C", "Zig", "Haskell"]
        .iter()
        .map(|name| json!({ "language": name, "color": "#dea584", "linesCount": 100 }))
        .collect();

    json!({
        "data": {
            "username": "octocat",
            "user": {
                "username": "octocat",
                "name": "The Octocat",
                "bio": "GitHub mascot",
                "avatarUrl": "https://avatars.githubusercontent.com/u/583231",
                "followers": 1234,
                "following": 9,
                "publicRepos": 8,
                "pinnedRepositories": [{
                    "name": "Spoon-Knife",
                    "description": "Test repository for forks",
                    "url": "https://github.com/octocat/Spoon-Knife",
                    "stars": 12000,
                    "forkCount": 150000,
                    "topLanguage": "HTML",
                    "topLanguageColor": "#e34c26"
                }]
            },
            "stats": {
                "totalCommits": 321,
                "totalIssuesClosed": 17,
                "totalPullRequestsClosed": 23,
                "totalStars": 4567,
                "totalForks": 89,
                "languagesStats": languages,
                "contributionCalendar": {
                    "totalContributions": 400,
                    "weeks": [
                        { "contributionDays": [
                            { "contributionCount": 0, "date": "2023-12-31", "color": "#161b22" }
                        ]},
                        { "contributionDays": [
                            { "contributionCount": 4, "date": "2024-01-01", "color": "#39d353" },
                            { "contributionCount": 1, "date": "2024-01-02", "color": "#0e4429" }
                        ]}
                    ]
                }
            }
        }
    })
}

async fn stats_handler(Path(username): Path<String>, headers: HeaderMap) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(TOKEN);
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    match username.as_str() {
        "octocat" => Json(payload()).into_response(),
        "lonely" => {
            let mut body = payload();
            body["data"]["user"]["pinnedRepositories"] = json!([]);
            Json(body).into_response()
        }
        "nodata" => Json(json!({ "data": null })).into_response(),
        "broken" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "garbage" => (StatusCode::OK, "not json").into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(payload()).into_response()
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Answers with a full payload, so any request that lands here without a
/// username would render as somebody's profile.
async fn bare_stats_handler() -> Json<Value> {
    Json(payload())
}

/// Start the stub stats backend.
pub async fn start_backend() -> SocketAddr {
    spawn(
        Router::new()
            .route("/api/stats", get(bare_stats_handler))
            .route("/api/stats/", get(bare_stats_handler))
            .route("/api/stats/{username}", get(stats_handler)),
    )
    .await
}

/// Start the page server against `backend_url` and return its base URL.
pub async fn start_app(backend_url: &str, token: &str) -> String {
    let client = BackendClient::new(backend_url, token, Duration::from_secs(1)).unwrap();
    let state = AppState { client, year: 2024 };
    let addr = spawn(build_router(state, Duration::from_secs(10))).await;
    format!("http://{addr}")
}

pub fn http() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
