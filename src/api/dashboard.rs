use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    auth::auth::AuthUser,
    db,
    errors::AppError,
    model::{attendance::Attendance, leave_request::LeaveRequest},
    state::AppState,
    utils::flash,
    views::Page,
};

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub attendance: Vec<Attendance>,
    pub leaves: Vec<LeaveRequest>,
}

/// The caller's own attendance and leave rows, in insertion order.
pub async fn dashboard(pool: &SqlitePool, auth: &AuthUser) -> Result<Dashboard, sqlx::Error> {
    Ok(Dashboard {
        attendance: db::attendance::list_for_user(pool, auth.user_id).await?,
        leaves: db::leave_request::list_for_user(pool, auth.user_id).await?,
    })
}

pub async fn show_dashboard(
    req: HttpRequest,
    auth: AuthUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let data = dashboard(&state.pool, &auth).await.map_err(|e| {
        tracing::error!(error = %e, user_id = auth.user_id, "Failed to load dashboard");
        AppError::from(e)
    })?;

    Page::new("dashboard.html", "Dashboard")
        .user(&auth)
        .notice(flash::take(&req))
        .insert("attendance", &data.attendance)
        .insert("leaves", &data.leaves)
        .render(&state.templates)
}

/// `/` has nothing of its own to show.
pub async fn index() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((actix_web::http::header::LOCATION, "/dashboard"))
        .finish()
}
