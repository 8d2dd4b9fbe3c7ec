//! Integration tests for the site settings singleton and the home page.
//!
//! Run with: `cargo test --test settings_test`
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use sea_orm::{EntityTrait, PaginatorTrait};

use common::{TestContext, location, login_request, session_cookie};
use portfolio_site::db::settings::{get_settings, update_settings};
use portfolio_site::models::site_settings::{self, DEFAULT_SITE_TITLE, SETTINGS_ID, SettingsForm};

#[actix_web::test]
async fn test_settings_are_a_singleton() {
    let ctx = TestContext::new().await;

    let first = get_settings(&ctx.db).await.unwrap();
    let second = get_settings(&ctx.db).await.unwrap();

    assert_eq!(first.id, SETTINGS_ID);
    assert_eq!(first.id, second.id);
    assert_eq!(first.site_title, DEFAULT_SITE_TITLE);
    assert_eq!(site_settings::Entity::find().count(&ctx.db).await.unwrap(), 1);
}

#[actix_web::test]
async fn test_concurrent_first_access_creates_one_row() {
    let ctx = TestContext::new().await;

    let (a, b) = tokio::join!(get_settings(&ctx.db), get_settings(&ctx.db));
    assert_eq!(a.unwrap().id, b.unwrap().id);
    assert_eq!(site_settings::Entity::find().count(&ctx.db).await.unwrap(), 1);
}

#[actix_web::test]
async fn test_update_keeps_only_filled_social_links() {
    let ctx = TestContext::new().await;

    let updated = update_settings(
        &ctx.db,
        SettingsForm {
            site_title: "Ada's Workshop".into(),
            owner_name: "Ada".into(),
            hero_text: "Engines & things".into(),
            bio: "Writes programs for machines that do not exist yet.".into(),
            contact_email: Some("   ".into()),
            resume_url: Some("https://example.com/cv.pdf".into()),
            social_github: Some("https://github.com/ada".into()),
            social_linkedin: Some("".into()),
            social_twitter: None,
            social_email: Some("ada@example.com".into()),
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.id, SETTINGS_ID);
    assert_eq!(updated.site_title, "Ada's Workshop");
    assert_eq!(updated.contact_email, None);
    assert_eq!(updated.resume_url.as_deref(), Some("https://example.com/cv.pdf"));
    assert_eq!(
        updated.social_links,
        serde_json::json!({
            "github": "https://github.com/ada",
            "email": "ada@example.com",
        })
    );
    assert_eq!(site_settings::Entity::find().count(&ctx.db).await.unwrap(), 1);
}

#[actix_web::test]
async fn test_settings_form_round_trip_over_http() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);
    let cookie = session_cookie(&test::call_service(&app, login_request().to_request()).await);

    let req = test::TestRequest::get()
        .uri("/admin/settings")
        .cookie(cookie.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/admin/settings")
        .cookie(cookie)
        .set_form(
            [
                ("site_title", "Grace's Lab"),
                ("owner_name", "Grace"),
                ("hero_text", "Compilers"),
                ("bio", "Found the first bug."),
                ("contact_email", "grace@example.com"),
                ("resume_url", ""),
                ("social_github", "https://github.com/grace"),
            ]
            .as_slice(),
        )
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        location(&resp),
        "/admin/settings?message=Settings+updated+successfully%21"
    );

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("Grace&#x27;s Lab"), "title is HTML-escaped");
    // Tera escapes `/` too, so look for the host rather than the full URL.
    assert!(html.contains("github.com"));
    assert!(html.contains("grace@example.com"));
}
