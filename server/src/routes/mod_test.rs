use super::*;
use crate::state::test_helpers::test_app_state;

#[tokio::test]
async fn healthz_is_ok() {
    let (state, _) = test_app_state();
    let app = api_routes(state);
    let reply = harness::get(&app, "/healthz", None).await;
    assert_eq!(reply.status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_api_path_is_not_found() {
    let (state, _) = test_app_state();
    let app = api_routes(state);
    let reply = harness::get(&app, "/user/nope", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}
