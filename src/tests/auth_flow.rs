use actix_web::{cookie::Cookie, http::StatusCode};

use crate::auth::{auth::authenticate, jwt::verify_token, session::SESSION_COOKIE};
use crate::db;
use crate::model::role::Role;
use crate::tests::common::*;
use crate::utils::flash::NOTICE_COOKIE;

#[actix_web::test]
async fn register_then_login_with_same_credentials() {
    let state = test_state().await;
    let app = test_app!(state);

    let resp = register!(app, "alice", "pw1");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
    assert_eq!(cookie(&resp, NOTICE_COOKIE).unwrap().value(), "account_created");

    let resp = login!(app, "alice", "pw1");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/dashboard");

    let session = session_cookie(&resp);
    assert!(session.http_only().unwrap_or(false));
    let claims = verify_token(session.value(), &state.config.session_secret).unwrap();
    assert_eq!(claims.sub, "alice");

    let resp = send!(app, get("/dashboard").cookie(session));
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body(resp).await.contains("Signed in as alice"));
}

#[actix_web::test]
async fn new_accounts_are_employees_with_hashed_passwords() {
    let state = test_state().await;
    let app = test_app!(state);

    register!(app, "alice", "pw1");

    let user = db::user::find_by_username(&state.pool, "alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.role, Role::Employee);
    assert_ne!(user.password_hash, "pw1");
    assert!(user.password_hash.starts_with("$argon2"));
}

#[actix_web::test]
async fn duplicate_username_is_a_field_error() {
    let state = test_state().await;
    let app = test_app!(state);

    assert_eq!(register!(app, "alice", "pw1").status(), StatusCode::SEE_OTHER);

    let resp = register!(app, "alice", "other");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let page = body(resp).await;
    assert!(page.contains("Username already taken"));
    assert!(page.contains(r#"value="alice""#));

    // Usernames compare case-insensitively.
    assert_eq!(register!(app, "ALICE", "pw").status(), StatusCode::CONFLICT);

    let users = db::user::list_all(&state.pool).await.unwrap();
    assert_eq!(users.len(), 1);
}

#[actix_web::test]
async fn store_rejects_duplicate_usernames_on_its_own() {
    let pool = memory_pool().await;

    db::user::create_user(&pool, "alice", "hash", Role::Employee)
        .await
        .unwrap();
    let err = db::user::create_user(&pool, "alice", "hash", Role::Employee)
        .await
        .unwrap_err();

    assert!(db::is_unique_violation(&err));
}

#[actix_web::test]
async fn race_past_the_index_still_reports_taken() {
    let state = test_state().await;
    // Inserted behind the index's back, so the fast path says "available".
    db::user::create_user(&state.pool, "alice", "hash", Role::Employee)
        .await
        .unwrap();
    let app = test_app!(state);

    let resp = register!(app, "alice", "pw1");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn invalid_registration_input_is_rejected_before_the_store() {
    let state = test_state().await;
    let app = test_app!(state);

    let resp = register!(app, "   ", "");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let page = body(resp).await;
    assert!(page.contains("Username is required"));
    assert!(page.contains("Password is required"));

    assert!(db::user::list_all(&state.pool).await.unwrap().is_empty());
}

#[actix_web::test]
async fn unknown_user_stays_on_login_page_with_error() {
    let state = test_state().await;
    let app = test_app!(state);

    let resp = login!(app, "bob", "whatever");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(cookie(&resp, SESSION_COOKIE).is_none());
    assert_eq!(location(&resp), "");

    let page = body(resp).await;
    assert!(page.contains("Invalid credentials"));
    assert!(page.contains(r#"action="/login""#));
}

#[actix_web::test]
async fn wrong_password_fails_authentication() {
    let state = test_state().await;
    let app = test_app!(state);
    register!(app, "alice", "pw1");

    let resp = login!(app, "alice", "pw2");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(cookie(&resp, SESSION_COOKIE).is_none());

    assert!(authenticate(&state.pool, "alice", "pw2").await.unwrap().is_none());
    assert!(authenticate(&state.pool, "alice", "pw1").await.unwrap().is_some());
    assert!(authenticate(&state.pool, "bob", "pw1").await.unwrap().is_none());
}

#[actix_web::test]
async fn empty_login_form_is_a_bad_request() {
    let state = test_state().await;
    let app = test_app!(state);

    let resp = send!(app, post_form("/login", &[("username", ""), ("password", "")]));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body(resp).await.contains("Username is required"));
}

#[actix_web::test]
async fn protected_routes_redirect_to_login_without_a_session() {
    let state = test_state().await;
    let app = test_app!(state);

    for uri in ["/dashboard", "/payroll", "/staff_management", "/leave_request", "/logout"] {
        let resp = send!(app, get(uri));
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&resp), "/login", "{uri}");
    }

    let resp = send!(app, post_form("/mark_attendance", &[("status", "Present")]));
    assert_eq!(location(&resp), "/login");
    assert!(db::attendance::list_for_user(&state.pool, 1).await.unwrap().is_empty());
}

#[actix_web::test]
async fn forged_session_cookie_is_cleared() {
    let state = test_state().await;
    let app = test_app!(state);

    let resp = send!(
        app,
        get("/dashboard").cookie(Cookie::new(SESSION_COOKIE, "not-a-token"))
    );
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");

    let cleared = cookie(&resp, SESSION_COOKIE).unwrap();
    assert_eq!(cleared.value(), "");
}

#[actix_web::test]
async fn logout_revokes_the_session() {
    let state = test_state().await;
    let app = test_app!(state);
    register!(app, "alice", "pw1");
    let session = session_cookie(&login!(app, "alice", "pw1"));

    let resp = send!(app, get("/logout").cookie(session.clone()));
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
    assert_eq!(cookie(&resp, SESSION_COOKIE).unwrap().value(), "");
    assert_eq!(cookie(&resp, NOTICE_COOKIE).unwrap().value(), "logged_out");

    // The old token is still well signed, but the session is gone.
    let resp = send!(app, get("/dashboard").cookie(session));
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
}

#[actix_web::test]
async fn each_login_is_its_own_session() {
    let state = test_state().await;
    let app = test_app!(state);
    register!(app, "alice", "pw1");

    let first = session_cookie(&login!(app, "alice", "pw1"));
    let second = session_cookie(&login!(app, "alice", "pw1"));

    send!(app, get("/logout").cookie(first.clone()));

    let resp = send!(app, get("/dashboard").cookie(first));
    assert_eq!(location(&resp), "/login");
    let resp = send!(app, get("/dashboard").cookie(second));
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn login_is_rate_limited_per_peer() {
    let mut config = test_config();
    config.rate_login_per_min = 2;
    let state = state_with(config).await;
    let app = test_app!(state);

    assert_eq!(send!(app, get("/login")).status(), StatusCode::OK);
    assert_eq!(send!(app, get("/login")).status(), StatusCode::OK);
    assert_eq!(
        send!(app, get("/login")).status(),
        StatusCode::TOO_MANY_REQUESTS
    );

    // Other routes have their own bucket.
    assert_eq!(send!(app, get("/register")).status(), StatusCode::OK);
}

#[actix_web::test]
async fn only_ascii_letters_fold_case_in_usernames() {
    let state = test_state().await;
    let app = test_app!(state);

    assert_eq!(register!(app, "Émile", "pw1").status(), StatusCode::SEE_OTHER);
    // NOCASE leaves É and é distinct.
    assert_eq!(register!(app, "émile", "pw2").status(), StatusCode::SEE_OTHER);
    assert_eq!(register!(app, "ÉMILE", "pw3").status(), StatusCode::CONFLICT);

    assert_eq!(db::user::list_all(&state.pool).await.unwrap().len(), 2);
    assert!(authenticate(&state.pool, "émile", "pw2").await.unwrap().is_some());
}

#[actix_web::test]
async fn login_clears_out_expired_sessions() {
    let state = test_state().await;
    let app = test_app!(state);
    register!(app, "alice", "pw1");
    let alice = db::user::find_by_username(&state.pool, "alice")
        .await
        .unwrap()
        .unwrap();
    db::session::insert(&state.pool, "stale", alice.id, 1).await.unwrap();

    let session = session_cookie(&login!(app, "alice", "pw1"));

    let jtis: Vec<String> = sqlx::query_scalar("SELECT jti FROM sessions")
        .fetch_all(&state.pool)
        .await
        .unwrap();
    let claims = verify_token(session.value(), &state.config.session_secret).unwrap();
    assert_eq!(jtis, vec![claims.jti]);
}

#[actix_web::test]
async fn unknown_paths_are_not_found_with_or_without_a_session() {
    let state = test_state().await;
    let app = test_app!(state);

    let resp = send!(app, get("/favicon.ico"));
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(cookie(&resp, SESSION_COOKIE).is_none());

    register!(app, "alice", "pw1");
    let session = session_cookie(&login!(app, "alice", "pw1"));
    let resp = send!(app, get("/dashbaord").cookie(session));
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
