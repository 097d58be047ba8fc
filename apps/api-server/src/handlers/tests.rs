use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Value, json};

use blog_shared::ListResponse;
use blog_shared::dto::{AccountResponse, PostResponse};

use super::configure_routes;
use crate::config::AdminSeed;
use crate::state::{AppState, seed_admin};

const ADMIN: (&str, &str) = ("root", "toor");

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

fn basic((username, password): (&str, &str)) -> (header::HeaderName, String) {
    let encoded = STANDARD.encode(format!("{username}:{password}"));
    (header::AUTHORIZATION, format!("Basic {encoded}"))
}

async fn seeded_state() -> AppState {
    let (state, accounts) = AppState::in_memory();
    let seed = AdminSeed {
        username: ADMIN.0.to_string(),
        password: ADMIN.1.to_string(),
    };
    seed_admin(accounts.as_ref(), &seed).await.unwrap();
    state
}

#[actix_web::test]
async fn test_health_is_public() {
    let state = seeded_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[actix_web::test]
async fn test_missing_or_wrong_credentials_are_rejected() {
    let state = seeded_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/v1/posts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        r#"Basic realm="blog""#
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/posts")
        .insert_header(basic((ADMIN.0, "wrong")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/posts")
        .insert_header((header::AUTHORIZATION, "Bearer token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_signup_forces_user_role() {
    let state = seeded_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/accounts")
        .insert_header(basic(ADMIN))
        .set_json(json!({"username": "mallory", "password": "pw", "role": "admin"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "mallory");
    assert_eq!(body["role"], "user");
    assert!(body.get("password").is_none());
}

#[actix_web::test]
async fn test_empty_username_is_bad_request() {
    let state = seeded_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/accounts")
        .insert_header(basic(ADMIN))
        .set_json(json!({"username": "", "password": "pw"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_malformed_body_is_bad_request() {
    let state = seeded_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/posts")
        .insert_header(basic(ADMIN))
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"title\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);
}

#[actix_web::test]
async fn test_only_owner_or_admin_may_edit_posts() {
    let state = seeded_state().await;
    let app = init_app!(state);

    for name in ["ann", "ben"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/accounts")
            .insert_header(basic(ADMIN))
            .set_json(json!({"username": name, "password": "pw"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/posts")
        .insert_header(basic(("ann", "pw")))
        .set_json(json!({"title": "Hello", "content": "first"}))
        .to_request();
    let post: PostResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(post.author.username, "ann");
    let uri = format!("/api/v1/posts/{}", post.id);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(basic(("ben", "pw")))
        .set_json(json!({"title": "Hijacked", "content": ""}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(basic(ADMIN))
        .set_json(json!({"title": "Moderated", "content": "edited"}))
        .to_request();
    let edited: PostResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(edited.title, "Moderated");
    assert_eq!(edited.author.username, "ann");
    assert_eq!(edited.created_at, post.created_at);
}

#[actix_web::test]
async fn test_missing_and_malformed_ids() {
    let state = seeded_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/posts/{}", uuid::Uuid::new_v4()))
        .insert_header(basic(ADMIN))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::delete()
        .uri("/api/v1/accounts/not-a-uuid")
        .insert_header(basic(ADMIN))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn test_deleted_post_leaves_listing_but_stays_readable() {
    let state = seeded_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/posts")
        .insert_header(basic(ADMIN))
        .set_json(json!({"title": "Ephemeral"}))
        .to_request();
    let post: PostResponse = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/api/v1/posts/{}", post.id);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(basic(ADMIN))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/posts")
        .insert_header(basic(ADMIN))
        .to_request();
    let listing: ListResponse<PostResponse> = test::call_and_read_body_json(&app, req).await;
    assert!(listing.data.is_empty());
    assert_eq!(listing.metadata.total, 0);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(basic(ADMIN))
        .to_request();
    let fetched: PostResponse = test::call_and_read_body_json(&app, req).await;
    assert!(fetched.deleted_at.is_some());

    // a second delete finds nothing live to remove
    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(basic(ADMIN))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_post_listing_pages_and_filters() {
    let state = seeded_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/accounts")
        .insert_header(basic(ADMIN))
        .set_json(json!({"username": "ann", "password": "pw"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    for i in 0..7 {
        let req = test::TestRequest::post()
            .uri("/api/v1/posts")
            .insert_header(basic(("ann", "pw")))
            .set_json(json!({"title": format!("Post {i}")}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );
    }
    let req = test::TestRequest::post()
        .uri("/api/v1/posts")
        .insert_header(basic(ADMIN))
        .set_json(json!({"title": "By root"}))
        .to_request();
    let by_root: PostResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/posts?username=ann&page=2&limit=5")
        .insert_header(basic(ADMIN))
        .to_request();
    let listing: ListResponse<PostResponse> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listing.data.len(), 2);
    assert!(listing.data.iter().all(|p| p.author.username == "ann"));
    assert_eq!(listing.metadata.total, 7);
    assert_eq!(listing.metadata.offset, 5);
    assert_eq!(listing.metadata.limit, 5);

    // defaults: page 1, limit 10
    let req = test::TestRequest::get()
        .uri("/api/v1/posts")
        .insert_header(basic(ADMIN))
        .to_request();
    let listing: ListResponse<PostResponse> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listing.data.len(), 8);
    assert_eq!(listing.metadata.offset, 0);
    assert_eq!(listing.metadata.limit, 10);

    // created_at is RFC 3339, so its first ten characters are the UTC day
    let day = &by_root.created_at[..10];
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/posts?date={day}&username=root"))
        .insert_header(basic(ADMIN))
        .to_request();
    let listing: ListResponse<PostResponse> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listing.metadata.total, 1);
    assert_eq!(listing.data[0].title, "By root");
}

#[actix_web::test]
async fn test_non_numeric_page_is_bad_request() {
    let state = seeded_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/accounts?page=two")
        .insert_header(basic(ADMIN))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn test_deleted_account_cannot_authenticate() {
    let state = seeded_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/accounts")
        .insert_header(basic(ADMIN))
        .set_json(json!({"username": "leaver", "password": "pw"}))
        .to_request();
    let account: AccountResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/accounts/{}", account.id))
        .insert_header(basic(("leaver", "pw")))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/accounts")
        .insert_header(basic(("leaver", "pw")))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/accounts")
        .insert_header(basic(ADMIN))
        .to_request();
    let listing: ListResponse<AccountResponse> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listing.metadata.total, 1);
    assert_eq!(listing.data[0].username, "root");
}

#[actix_web::test]
async fn test_role_change_requires_admin() {
    let state = seeded_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/accounts")
        .insert_header(basic(ADMIN))
        .set_json(json!({"username": "ann", "password": "pw"}))
        .to_request();
    let account: AccountResponse = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/api/v1/accounts/{}", account.id);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(basic(("ann", "pw")))
        .set_json(json!({"username": "ann", "password": "pw2", "role": "admin"}))
        .to_request();
    let updated: AccountResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated.role, "user");

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(basic(ADMIN))
        .set_json(json!({"username": "ann", "password": "pw2", "role": "admin"}))
        .to_request();
    let promoted: AccountResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(promoted.role, "admin");
    assert_eq!(promoted.created_at, account.created_at);
}

#[actix_web::test]
async fn test_taken_username_is_a_conflict() {
    let state = seeded_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/accounts")
        .insert_header(basic(ADMIN))
        .set_json(json!({"username": "ann", "password": "old"}))
        .to_request();
    let ann: AccountResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/accounts/{}", ann.id))
        .insert_header(basic(("ann", "old")))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );

    // the deleted account keeps its name
    let req = test::TestRequest::post()
        .uri("/api/v1/accounts")
        .insert_header(basic(ADMIN))
        .set_json(json!({"username": "ann", "password": "new"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CONFLICT
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/accounts")
        .insert_header(basic(ADMIN))
        .set_json(json!({"username": "ben", "password": "pw"}))
        .to_request();
    let ben: AccountResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/accounts/{}", ben.id))
        .insert_header(basic(("ben", "pw")))
        .set_json(json!({"username": "root", "password": "pw"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CONFLICT
    );

    // every live account can still sign in
    let req = test::TestRequest::get()
        .uri("/api/v1/accounts")
        .insert_header(basic(("ben", "pw")))
        .to_request();
    let listing: ListResponse<AccountResponse> = test::call_and_read_body_json(&app, req).await;
    let names: Vec<&str> = listing.data.iter().map(|a| a.username.as_str()).collect();
    assert_eq!(names, ["root", "ben"]);
}
