//! Integration tests for blog posts: slug generation, slug stability and the
//! published/draft split between the feed and direct links.
//!
//! Run with: `cargo test --test blog_test`
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use sea_orm::{EntityTrait, PaginatorTrait};

use common::{TestContext, location, login_request, session_cookie};
use portfolio_site::db::blog_posts::{save_post, unique_slug};
use portfolio_site::error::AppError;
use portfolio_site::models::blog_posts::{self, PostForm, slugify};

fn post_form(title: &str, published: bool) -> PostForm {
    PostForm {
        title: title.to_string(),
        content: Some(format!("Body of {title}")),
        published: published.then(|| "on".to_string()),
        project_id: Some(String::new()),
    }
}

#[::core::prelude::v1::test]
fn test_slugify_examples() {
    assert_eq!(slugify("Hello World!"), "hello-world");
    assert_eq!(slugify("  Rust -- and   WebAssembly  "), "rust-and-webassembly");
    assert_eq!(slugify("snake_case stays"), "snake_case-stays");
    assert_eq!(slugify("C++ & Go?"), "c-go");
    assert_eq!(slugify("!!!"), "");
}

#[::core::prelude::v1::test]
fn test_slugify_is_idempotent() {
    for title in ["Hello World!", "Ünïcode Tïtle", "a--b  c", "-- edge --", "x"] {
        let once = slugify(title);
        assert_eq!(slugify(&once), once, "{title}");
    }
}

#[actix_web::test]
async fn test_colliding_titles_get_numbered_slugs() {
    let ctx = TestContext::new().await;

    let first = save_post(&ctx.db, None, post_form("Hello World!", true)).await.unwrap();
    let second = save_post(&ctx.db, None, post_form("Hello World!", true)).await.unwrap();
    let third = save_post(&ctx.db, None, post_form("hello world", false)).await.unwrap();

    assert_eq!(first.slug, "hello-world");
    assert_eq!(second.slug, "hello-world-1");
    assert_eq!(third.slug, "hello-world-2");
    assert_eq!(unique_slug(&ctx.db, "Hello World!").await.unwrap(), "hello-world-3");
}

#[actix_web::test]
async fn test_editing_title_keeps_slug() {
    let ctx = TestContext::new().await;

    let post = save_post(&ctx.db, None, post_form("First Title", true)).await.unwrap();
    assert_eq!(post.slug, "first-title");

    let edited = save_post(&ctx.db, Some(post.id), post_form("Completely Different", false))
        .await
        .unwrap();
    assert_eq!(edited.id, post.id);
    assert_eq!(edited.title, "Completely Different");
    assert_eq!(edited.slug, "first-title");
    assert!(!edited.published);
}

#[actix_web::test]
async fn test_title_without_slug_characters_still_gets_a_slug() {
    let ctx = TestContext::new().await;

    let post = save_post(&ctx.db, None, post_form("???", true)).await.unwrap();
    assert!(!post.slug.is_empty());
}

#[actix_web::test]
async fn test_post_validation() {
    let ctx = TestContext::new().await;

    let err = save_post(&ctx.db, None, post_form("   ", true)).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let mut form = post_form("Linked", true);
    form.project_id = Some("12345".into());
    let err = save_post(&ctx.db, None, form).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = save_post(&ctx.db, Some(99), post_form("Ghost", true)).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    assert_eq!(blog_posts::Entity::find().count(&ctx.db).await.unwrap(), 0);
}

#[actix_web::test]
async fn test_feed_hides_drafts_but_links_still_work() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    save_post(&ctx.db, None, post_form("Public Post", true)).await.unwrap();
    save_post(&ctx.db, None, post_form("Secret Draft", false)).await.unwrap();

    let resp = test::call_service(&app, test::TestRequest::get().uri("/blog").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("Public Post"));
    assert!(!html.contains("Secret Draft"));

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/blog/secret-draft").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("Secret Draft"));

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/blog/no-such-post").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/blog?page=2").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_admin_post_crud() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);
    let cookie = session_cookie(&test::call_service(&app, login_request().to_request()).await);

    let req = test::TestRequest::post()
        .uri("/admin/post/new")
        .cookie(cookie.clone())
        .set_form(
            [
                ("title", "Launch Notes"),
                ("content", "We shipped."),
                ("published", "on"),
                ("project_id", ""),
            ]
            .as_slice(),
        )
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(location(&resp).starts_with("/admin/posts?message="));

    let post = blog_posts::Entity::find().one(&ctx.db).await.unwrap().unwrap();
    assert_eq!(post.slug, "launch-notes");
    assert!(post.published);
    assert_eq!(post.project_id, None);

    // Unticked checkbox: the field is simply absent.
    let req = test::TestRequest::post()
        .uri(&format!("/admin/post/{}/edit", post.id))
        .cookie(cookie.clone())
        .set_form([("title", "Launch Notes, revised"), ("content", "Edited.")].as_slice())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FOUND);

    let post = blog_posts::Entity::find_by_id(post.id).one(&ctx.db).await.unwrap().unwrap();
    assert_eq!(post.slug, "launch-notes");
    assert!(!post.published);

    for uri in ["/admin/posts", "/admin/post/new"] {
        let req = test::TestRequest::get().uri(uri).cookie(cookie.clone()).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK, "{uri}");
    }
    let req = test::TestRequest::get()
        .uri(&format!("/admin/post/{}/edit", post.id))
        .cookie(cookie.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri(&format!("/admin/post/{}/delete", post.id))
        .cookie(cookie.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FOUND);
    assert_eq!(blog_posts::Entity::find().count(&ctx.db).await.unwrap(), 0);

    let req = test::TestRequest::post()
        .uri(&format!("/admin/post/{}/delete", post.id))
        .cookie(cookie)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}
