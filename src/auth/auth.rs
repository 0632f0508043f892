use crate::{
    auth::password::verify_password,
    db,
    errors::AppError,
    model::{role::Role, user::User},
};
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures::future::{Ready, ready};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Identity of the logged-in caller, attached by `require_login` and
/// handed to handlers as an explicit argument.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
    pub role: Role,

    /// `jti` of the session this request was made with
    pub session_id: String,
}

impl AuthUser {
    pub fn new(user: &User, session_id: String) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
            session_id,
        }
    }

    pub fn require_role(&self, role: Role) -> Result<(), AppError> {
        if self.role.permits(role) {
            Ok(())
        } else {
            info!(user_id = self.user_id, required = %role, actual = %self.role, "Access denied");
            Err(AppError::AccessDenied)
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthUser>()
                .cloned()
                .ok_or(AppError::Unauthenticated),
        )
    }
}

/// `None` for an unknown username, a wrong password or a stored value
/// that is not a valid hash.
pub async fn authenticate(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    let user = match db::user::find_by_username(pool, username).await? {
        Some(user) => user,
        None => {
            debug!("Unknown username");
            return Ok(None);
        }
    };

    match verify_password(password, &user.password_hash) {
        Ok(()) => Ok(Some(user)),
        Err(e) => {
            debug!(user_id = user.id, error = %e, "Password mismatch");
            Ok(None)
        }
    }
}
