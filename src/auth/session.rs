use actix_web::cookie::{Cookie, SameSite, time::Duration};
use sqlx::SqlitePool;

use crate::{
    auth::{auth::AuthUser, jwt::generate_session_token},
    config::Config,
    db,
    errors::AppError,
    model::user::User,
};

pub const SESSION_COOKIE: &str = "session";

/// Issues a session for `user`, records it, and returns the cookie to set.
pub async fn login(pool: &SqlitePool, config: &Config, user: &User) -> Result<Cookie<'static>, AppError> {
    let (token, claims) = generate_session_token(
        user.id,
        user.username.clone(),
        &config.session_secret,
        config.session_ttl,
    )?;

    let purged = db::session::purge_expired(pool, chrono::Utc::now().timestamp()).await?;
    if purged > 0 {
        tracing::debug!(purged, "Expired sessions removed");
    }
    db::session::insert(pool, &claims.jti, user.id, claims.exp as i64).await?;

    tracing::debug!(user_id = user.id, jti = %claims.jti, "Session started");

    Ok(Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(Duration::seconds(config.session_ttl as i64))
        .finish())
}

/// Revokes the caller's session and returns the cookie that clears it.
pub async fn logout(pool: &SqlitePool, auth: &AuthUser) -> Result<Cookie<'static>, AppError> {
    db::session::revoke(pool, &auth.session_id).await?;
    tracing::debug!(user_id = auth.user_id, jti = %auth.session_id, "Session revoked");
    Ok(removal())
}

pub fn removal() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}
