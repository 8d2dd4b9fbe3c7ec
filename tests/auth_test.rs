//! Integration tests for admin login, logout and the admin route guard.
//!
//! Each test runs the full actix app against a fresh in-memory SQLite database.
//!
//! Run with: `cargo test --test auth_test`
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use sea_orm::{EntityTrait, PaginatorTrait};

use common::{ADMIN_PASSWORD, ADMIN_USERNAME, Part, TestContext, location, login_request, session_cookie};
use portfolio_site::auth::SESSION_COOKIE;
use portfolio_site::db::users::ensure_admin;
use portfolio_site::models::{projects, tools, users};

async fn body_text<B: actix_web::body::MessageBody>(resp: actix_web::dev::ServiceResponse<B>) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

#[actix_web::test]
async fn test_login_page_renders() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/admin/login").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("name=\"password\""));
}

#[actix_web::test]
async fn test_successful_login_sets_session_cookie() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    let resp = test::call_service(&app, login_request().to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/admin/dashboard");

    let cookie = session_cookie(&resp);
    assert!(!cookie.value().is_empty());
    assert_eq!(cookie.http_only(), Some(true));
    // Without "remember me" the cookie dies with the browser session.
    assert!(cookie.max_age().is_none());

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/admin/dashboard")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains(ADMIN_USERNAME));
}

#[actix_web::test]
async fn test_remember_me_makes_cookie_persistent() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/admin/login")
        .set_form(
            [
                ("username", ADMIN_USERNAME),
                ("password", ADMIN_PASSWORD),
                ("remember", "on"),
            ]
            .as_slice(),
        )
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let cookie = session_cookie(&resp);
    let max_age = cookie.max_age().expect("Remembered session should set Max-Age");
    assert_eq!(max_age.whole_days(), 7);
}

#[actix_web::test]
async fn test_failed_login_is_generic() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    for (username, password) in [(ADMIN_USERNAME, "wrong"), ("nobody", ADMIN_PASSWORD)] {
        let req = test::TestRequest::post()
            .uri("/admin/login")
            .set_form([("username", username), ("password", password)].as_slice())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(
            resp.response().cookies().all(|c| c.name() != SESSION_COOKIE),
            "failed login must not open a session"
        );
        assert!(body_text(resp).await.contains("Invalid username or password."));
    }
}

#[actix_web::test]
async fn test_username_is_case_sensitive() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/admin/login")
        .set_form([("username", "ADMIN"), ("password", ADMIN_PASSWORD)].as_slice())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Invalid username or password."));
}

#[actix_web::test]
async fn test_admin_pages_redirect_anonymous_visitors() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    for uri in [
        "/admin",
        "/admin/dashboard",
        "/admin/settings",
        "/admin/projects",
        "/admin/project/new",
        "/admin/posts",
        "/admin/experiences",
        "/admin/tools",
        "/admin/logout",
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND, "{uri}");
        assert!(
            location(&resp).starts_with("/admin/login?error="),
            "{uri} redirected to {}",
            location(&resp)
        );
    }
}

#[actix_web::test]
async fn test_unknown_session_cookie_is_rejected() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/admin/dashboard")
        .cookie(actix_web::cookie::Cookie::new(SESSION_COOKIE, "not-a-session"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(location(&resp).starts_with("/admin/login"));
}

#[actix_web::test]
async fn test_anonymous_mutations_change_nothing() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/admin/tool/new")
        .set_form([("name", "Rust")].as_slice())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(location(&resp).starts_with("/admin/login"));

    let req = common::multipart_request(
        "/admin/project/new",
        &[
            Part::Text("title", "Sneaky"),
            Part::File {
                field: "images",
                filename: "a.png",
                content: b"\x89PNG fake",
            },
        ],
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(location(&resp).starts_with("/admin/login"));

    assert_eq!(tools::Entity::find().count(&ctx.db).await.unwrap(), 0);
    assert_eq!(projects::Entity::find().count(&ctx.db).await.unwrap(), 0);
    assert!(ctx.stored_files().is_empty());
}

#[actix_web::test]
async fn test_logout_ends_the_session() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    let resp = test::call_service(&app, login_request().to_request()).await;
    let cookie = session_cookie(&resp);

    let req = test::TestRequest::get()
        .uri("/admin/logout")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(location(&resp).starts_with("/?message="));

    let req = test::TestRequest::get()
        .uri("/admin/dashboard")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(location(&resp).starts_with("/admin/login"));
}

#[actix_web::test]
async fn test_login_page_redirects_when_logged_in() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    let resp = test::call_service(&app, login_request().to_request()).await;
    let cookie = session_cookie(&resp);

    let req = test::TestRequest::get()
        .uri("/admin/login")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/admin/dashboard");
}

#[actix_web::test]
async fn test_session_of_deleted_user_is_rejected() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    let resp = test::call_service(&app, login_request().to_request()).await;
    let cookie = session_cookie(&resp);

    users::Entity::delete_many().exec(&ctx.db).await.unwrap();

    let req = test::TestRequest::get()
        .uri("/admin/dashboard")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(location(&resp).starts_with("/admin/login"));
}

#[actix_web::test]
async fn test_admin_bootstrap_is_idempotent() {
    let ctx = TestContext::new().await;

    let created = ensure_admin(&ctx.db, "someone-else", "pw", 4).await.unwrap();
    assert!(!created, "an existing account blocks a second bootstrap");
    assert_eq!(users::Entity::find().count(&ctx.db).await.unwrap(), 1);

    let admin = users::Entity::find().one(&ctx.db).await.unwrap().unwrap();
    assert_eq!(admin.username, ADMIN_USERNAME);
    assert_ne!(admin.password_hash, ADMIN_PASSWORD);
    assert!(admin.password_hash.starts_with("$2"));
}
