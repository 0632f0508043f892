use actix_web::{HttpRequest, HttpResponse, web};
use sqlx::SqlitePool;

use crate::{
    auth::auth::AuthUser,
    db,
    errors::AppError,
    model::{role::Role, user::User},
    state::AppState,
    utils::flash,
    views::Page,
};

/// Every account, for admins only. Anyone else gets `AccessDenied`, which
/// renders as a notice plus a redirect to the dashboard.
pub async fn staff_management(pool: &SqlitePool, auth: &AuthUser) -> Result<Vec<User>, AppError> {
    auth.require_role(Role::Admin)?;
    Ok(db::user::list_all(pool).await?)
}

pub async fn list_staff(
    req: HttpRequest,
    auth: AuthUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let staff = staff_management(&state.pool, &auth).await?;

    Page::new("staff_management.html", "Staff")
        .user(&auth)
        .notice(flash::take(&req))
        .insert("staff", &staff)
        .render(&state.templates)
}
