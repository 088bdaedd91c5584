use axum::Router;
use axum::http::StatusCode;
use serde_json::json;

use crate::routes::api_routes;
use crate::routes::harness;
use crate::state::AppState;
use crate::state::test_helpers::{seed_verified_user, test_app_state};

const ADMIN: &str = "root@example.com";
const USER: &str = "ada@example.com";
const PASSWORD: &str = "correct horse";

async fn setup() -> (Router, AppState, String, String) {
    let (state, _) = test_app_state();
    state.users.seed_admin(ADMIN, PASSWORD).await.unwrap();
    seed_verified_user(&state, USER, PASSWORD).await;
    let app = api_routes(state.clone());
    let admin_cookie = sign_in(&app, ADMIN).await;
    let user_cookie = sign_in(&app, USER).await;
    (app, state, admin_cookie, user_cookie)
}

async fn sign_in(app: &Router, email: &str) -> String {
    harness::post(app, "/user/signin", None, json!({ "email": email, "password": PASSWORD }))
        .await
        .cookie
        .unwrap()
}

#[tokio::test]
async fn listing_requires_admin() {
    let (app, _, _, user_cookie) = setup().await;
    assert_eq!(harness::get(&app, "/admin/users", None).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(harness::get(&app, "/admin/users", Some(&user_cookie)).await.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_lists_every_account() {
    let (app, _, admin_cookie, _) = setup().await;
    let reply = harness::get(&app, "/admin/users", Some(&admin_cookie)).await;
    assert_eq!(reply.status, StatusCode::OK);
    let users = reply.body["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().any(|u| u["email"] == ADMIN && u["role"] == "admin"));
    assert!(users.iter().any(|u| u["email"] == USER && u["isBlocked"] == false));
}

#[tokio::test]
async fn blocking_cuts_off_existing_sessions() {
    let (app, _, admin_cookie, user_cookie) = setup().await;
    let uri = "/admin/users/ada%40example.com/block";

    let blocked = harness::post(&app, uri, Some(&admin_cookie), json!({ "blocked": true })).await;
    assert_eq!(blocked.status, StatusCode::OK);
    assert_eq!(blocked.body["user"]["isBlocked"], true);
    assert_eq!(harness::get(&app, "/user/me", Some(&user_cookie)).await.status, StatusCode::FORBIDDEN);

    let unblocked = harness::post(&app, uri, Some(&admin_cookie), json!({ "blocked": false })).await;
    assert_eq!(unblocked.body["user"]["isBlocked"], false);
    assert_eq!(harness::get(&app, "/user/me", Some(&user_cookie)).await.status, StatusCode::OK);
}

#[tokio::test]
async fn admin_cannot_block_self() {
    let (app, _, admin_cookie, _) = setup().await;
    let reply =
        harness::post(&app, "/admin/users/root%40example.com/block", Some(&admin_cookie), json!({ "blocked": true }))
            .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn blocking_unknown_account_is_not_found() {
    let (app, _, admin_cookie, _) = setup().await;
    let reply =
        harness::post(&app, "/admin/users/ghost%40example.com/block", Some(&admin_cookie), json!({ "blocked": true }))
            .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn demoted_or_blocked_admin_loses_access() {
    let (app, state, admin_cookie, _) = setup().await;
    state.users.set_blocked(ADMIN, true).await.unwrap();
    assert_eq!(harness::get(&app, "/admin/users", Some(&admin_cookie)).await.status, StatusCode::FORBIDDEN);
}
