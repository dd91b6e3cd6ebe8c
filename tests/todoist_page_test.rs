//! Handler-level tests for the page gate and form guards.
//!
//! None of these paths touch the network: without a session token the
//! Todoist page renders the connect form, and the mutating endpoints
//! reject requests without a valid CSRF token before doing anything.

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::Key, http::StatusCode, test, web, App};

use glance::handlers;

fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_secure(false)
        .cookie_http_only(true)
        .build()
}

#[actix_web::test]
async fn test_home_page_renders() {
    let app = test::init_service(
        App::new()
            .wrap(session_middleware())
            .route("/", web::get().to(handlers::home::index)),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("Adding a page"));
}

#[actix_web::test]
async fn test_todoist_page_prompts_for_token_when_disconnected() {
    let app = test::init_service(
        App::new()
            .wrap(session_middleware())
            .route("/todoist", web::get().to(handlers::todoist_handlers::page)),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/todoist").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = String::from_utf8_lossy(&body);
    assert!(
        html.contains("API token"),
        "disconnected page must show the connect form"
    );
    assert!(html.contains("/todoist/token"));
}

#[actix_web::test]
async fn test_token_submit_without_csrf_is_forbidden() {
    let app = test::init_service(
        App::new().wrap(session_middleware()).route(
            "/todoist/token",
            web::post().to(handlers::todoist_handlers::token_submit),
        ),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/todoist/token")
        .set_form(vec![("api_token", "abc123"), ("csrf_token", "bogus")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_disconnect_without_csrf_is_forbidden() {
    let app = test::init_service(
        App::new().wrap(session_middleware()).route(
            "/todoist/disconnect",
            web::post().to(handlers::todoist_handlers::disconnect),
        ),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/todoist/disconnect")
        .set_form(vec![("csrf_token", "bogus")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
