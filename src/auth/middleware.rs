use crate::auth::auth::AuthUser;
use crate::auth::jwt::verify_token;
use crate::auth::session::{SESSION_COOKIE, removal};
use crate::db;
use crate::state::AppState;
use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header,
    web::Data,
};
use tracing::{debug, error};

fn to_login(req: ServiceRequest, clear_cookie: bool) -> ServiceResponse<BoxBody> {
    let mut resp = HttpResponse::SeeOther();
    resp.insert_header((header::LOCATION, "/login"));
    if clear_cookie {
        resp.cookie(removal());
    }
    req.into_response(resp.finish().map_into_boxed_body())
}

/// Gate for every route that needs a logged-in user. Anything short of a
/// valid, unrevoked session for an existing user goes back to `/login`.
pub async fn require_login(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let state = req
        .app_data::<Data<AppState>>()
        .cloned()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App state missing"))?;

    let token = match req.cookie(SESSION_COOKIE) {
        Some(c) => c.value().to_owned(),
        None => return Ok(to_login(req, false)),
    };

    let claims = match verify_token(&token, &state.config.session_secret) {
        Ok(c) => c,
        Err(e) => {
            debug!(error = %e, "Invalid or expired session token");
            return Ok(to_login(req, true));
        }
    };

    let now = chrono::Utc::now().timestamp();
    let active = db::session::is_active(&state.pool, &claims.jti, claims.user_id, now)
        .await
        .map_err(|e| {
            error!(error = %e, "Session lookup failed");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;
    if !active {
        debug!(jti = %claims.jti, "Session revoked or unknown");
        return Ok(to_login(req, true));
    }

    let user = match db::user::load_user(&state.pool, claims.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            debug!(user_id = claims.user_id, "Session user no longer exists");
            return Ok(to_login(req, true));
        }
        Err(e) => {
            error!(error = %e, "Failed to load session user");
            return Err(actix_web::error::ErrorInternalServerError("Internal Server Error"));
        }
    };

    req.extensions_mut().insert(AuthUser::new(&user, claims.jti));

    next.call(req).await
}
