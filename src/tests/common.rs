use actix_web::{cookie::Cookie, dev::ServiceResponse, http::header, test::TestRequest, web::Data};
use serde::Serialize;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::net::SocketAddr;
use std::str::FromStr;

use crate::{
    auth::{auth::AuthUser, session::SESSION_COOKIE},
    config::Config,
    db,
    model::{role::Role, user::User},
    state::AppState,
};

pub const PEER: &str = "127.0.0.1:40000";

/// Single connection so every query sees the same in-memory database.
pub async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    db::init_schema(&pool).await.unwrap();
    pool
}

pub fn test_config() -> Config {
    Config {
        server_addr: "127.0.0.1:0".into(),
        database_url: "sqlite::memory:".into(),
        session_secret: "test-secret".into(),
        session_ttl: 3600,
        cookie_secure: false,
        rate_login_per_min: 10_000,
        rate_register_per_min: 10_000,
        rate_protected_per_min: 10_000,
        log_dir: "logs".into(),
        admin_username: None,
        admin_password: None,
    }
}

pub async fn state_with(config: Config) -> Data<AppState> {
    Data::new(AppState::new(memory_pool().await, config).unwrap())
}

pub async fn test_state() -> Data<AppState> {
    state_with(test_config()).await
}

/// Service wired exactly like the server, on top of `$state`.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new().configure(|cfg| crate::routes::configure(cfg, $state.clone())),
        )
        .await
    };
}
pub(crate) use test_app;

macro_rules! send {
    ($app:expr, $req:expr) => {
        actix_web::test::call_service(&$app, $req.to_request()).await
    };
}
pub(crate) use send;

/// POST /register, returns the response.
macro_rules! register {
    ($app:expr, $username:expr, $password:expr) => {
        send!(
            $app,
            post_form("/register", &[("username", $username), ("password", $password)])
        )
    };
}
pub(crate) use register;

/// POST /login, returns the response.
macro_rules! login {
    ($app:expr, $username:expr, $password:expr) => {
        send!(
            $app,
            post_form("/login", &[("username", $username), ("password", $password)])
        )
    };
}
pub(crate) use login;

pub fn peer() -> SocketAddr {
    PEER.parse().unwrap()
}

pub fn get(uri: &str) -> TestRequest {
    TestRequest::get().uri(uri).peer_addr(peer())
}

pub fn post_form<T: Serialize>(uri: &str, form: &T) -> TestRequest {
    TestRequest::post().uri(uri).peer_addr(peer()).set_form(form)
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_owned())
        .unwrap_or_default()
}

pub fn cookie<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}

pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Cookie<'static> {
    cookie(resp, SESSION_COOKIE).expect("login should set a session cookie")
}

pub async fn body<B: actix_web::body::MessageBody>(resp: ServiceResponse<B>) -> String {
    let bytes = actix_web::test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Account created straight through the store, bypassing HTTP.
pub async fn seed_user(state: &AppState, username: &str, role: Role) -> User {
    let hashed = crate::auth::password::hash_password("pw").unwrap();
    let user = db::user::create_user(&state.pool, username, &hashed, role)
        .await
        .unwrap();
    state.usernames.mark_taken(username).await;
    user
}

pub fn identity(user: &User) -> AuthUser {
    AuthUser::new(user, "test-session".into())
}
