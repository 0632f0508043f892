use actix_web::{HttpRequest, HttpResponse, web};
use sqlx::SqlitePool;

use crate::{
    auth::auth::AuthUser, db, errors::AppError, model::payroll::Payroll, state::AppState,
    utils::flash, views::Page,
};

pub async fn payroll_view(pool: &SqlitePool, auth: &AuthUser) -> Result<Vec<Payroll>, sqlx::Error> {
    db::payroll::list_for_user(pool, auth.user_id).await
}

pub async fn list_payrolls(
    req: HttpRequest,
    auth: AuthUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let payroll = payroll_view(&state.pool, &auth).await.map_err(|e| {
        tracing::error!(error = %e, user_id = auth.user_id, "Failed to fetch payroll list");
        AppError::from(e)
    })?;

    Page::new("payroll.html", "Payroll")
        .user(&auth)
        .notice(flash::take(&req))
        .insert("payroll", &payroll)
        .render(&state.templates)
}
