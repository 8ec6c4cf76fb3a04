use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use member_search::api;
use member_search::db;
use member_search::domain::{MemberRepository, NewMember, TeamRepository};
use member_search::infrastructure::AppState;
use member_search::server;
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

// Helper to create a test app state with teamA (member1, member2) and teamB (member3, member4)
async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let state = AppState::new(db);

    let team_a = state.team_repo.create("teamA".to_string()).await.unwrap();
    let team_b = state.team_repo.create("teamB".to_string()).await.unwrap();

    for (name, age, team_id) in [
        ("member1", 10, team_a.id),
        ("member2", 20, team_a.id),
        ("member3", 30, team_b.id),
        ("member4", 40, team_b.id),
    ] {
        state
            .member_repo
            .create(NewMember::new(name, age).in_team(team_id))
            .await
            .expect("Failed to create member");
    }

    state
}

async fn setup_app() -> Router {
    api::api_router(setup_test_state().await)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let req = Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    let json = serde_json::from_slice(&body).expect("response is not JSON");
    (status, json)
}

fn usernames(rows: &Value) -> Vec<&str> {
    rows.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|r| r["username"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_v1_without_filters_lists_everyone() {
    let (status, json) = get_json(setup_app().await, "/v1/members").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        usernames(&json),
        vec!["member1", "member2", "member3", "member4"]
    );

    let first = &json[0];
    assert!(first["memberId"].is_i64());
    assert_eq!(first["age"], 10);
    assert!(first["teamId"].is_i64());
    assert_eq!(first["teamName"], "teamA");
}

#[tokio::test]
async fn test_v1_filters_by_team_name() {
    let (status, json) = get_json(setup_app().await, "/v1/members?teamName=teamA").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(usernames(&json), vec!["member1", "member2"]);
}

#[tokio::test]
async fn test_v1_filters_by_age_range() {
    let (status, json) = get_json(setup_app().await, "/v1/members?ageGoe=20&ageLoe=30").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(usernames(&json), vec!["member2", "member3"]);
}

#[tokio::test]
async fn test_v1_empty_params_are_ignored() {
    let (status, json) = get_json(
        setup_app().await,
        "/v1/members?username=&teamName=&ageGoe=&ageLoe=",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_v1_no_match_is_empty_array() {
    let (status, json) = get_json(setup_app().await, "/v1/members?username=nobody").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn test_v1_unparseable_age_is_bad_request() {
    let (status, _) = get(setup_app().await, "/v1/members?ageGoe=ten").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_v2_first_page() {
    let (status, json) = get_json(setup_app().await, "/v2/members?page=0&size=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(usernames(&json["content"]), vec!["member1", "member2"]);
    assert_eq!(json["totalElements"], 4);
    assert_eq!(json["totalPages"], 2);
    assert_eq!(json["size"], 2);
    assert_eq!(json["number"], 0);
}

#[tokio::test]
async fn test_v2_defaults_page_and_size() {
    let (status, json) = get_json(setup_app().await, "/v2/members").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["content"].as_array().unwrap().len(), 4);
    assert_eq!(json["totalElements"], 4);
    assert_eq!(json["totalPages"], 1);
    assert_eq!(json["size"], 20);
    assert_eq!(json["number"], 0);
}

#[tokio::test]
async fn test_v2_filtered_page_past_end() {
    let (status, json) =
        get_json(setup_app().await, "/v2/members?ageGoe=30&page=5&size=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["content"], serde_json::json!([]));
    assert_eq!(json["totalElements"], 2);
    assert_eq!(json["totalPages"], 1);
    assert_eq!(json["number"], 5);
}

#[tokio::test]
async fn test_v2_enormous_page_is_empty() {
    let (status, json) = get_json(
        setup_app().await,
        "/v2/members?page=9007199254740992&size=2000",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["content"], serde_json::json!([]));
    assert_eq!(json["totalElements"], 4);
    assert_eq!(json["size"], 2000);
    assert_eq!(json["number"], 9_007_199_254_740_992u64);
}

#[tokio::test]
async fn test_v2_sorts() {
    let (status, json) =
        get_json(setup_app().await, "/v2/members?sort=age,desc&size=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(usernames(&json["content"]), vec!["member4", "member3"]);
    assert_eq!(json["totalElements"], 4);
}

#[tokio::test]
async fn test_v2_unknown_sort_is_bad_request() {
    let (status, json) = get_json(setup_app().await, "/v2/members?sort=height").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
    assert!(json["error"].as_str().unwrap().contains("height"));
}

#[tokio::test]
async fn test_v2_unparseable_page_is_bad_request() {
    let (status, _) = get(setup_app().await, "/v2/members?page=first").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_check() {
    let (status, json) = get_json(setup_app().await, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "member-search");
}

#[tokio::test]
async fn test_openapi_document_lists_member_endpoints() {
    let app = server::build_router(setup_test_state().await, &[]);
    let (status, json) = get_json(app, "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["paths"]["/v1/members"].is_object());
    assert!(json["paths"]["/v2/members"].is_object());
}

#[tokio::test]
async fn test_write_methods_are_not_routed() {
    let app = setup_app().await;
    let req = Request::builder()
        .uri("/v1/members")
        .method("POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
