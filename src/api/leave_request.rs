use crate::{
    auth::auth::AuthUser,
    db,
    errors::AppError,
    model::leave_request::LeaveRequest,
    models::LeaveForm,
    state::AppState,
    utils::flash::{self, Notice},
    validation::{self, LeaveDates},
    views::Page,
};
use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use sqlx::SqlitePool;

/// New request in `Pending`. Neither date order nor overlap with earlier
/// requests is checked.
pub async fn submit_leave(
    pool: &SqlitePool,
    auth: &AuthUser,
    dates: LeaveDates,
) -> Result<LeaveRequest, sqlx::Error> {
    db::leave_request::insert(pool, auth.user_id, dates.start_date, dates.end_date).await
}

// GET /leave_request
pub async fn leave_form(
    req: HttpRequest,
    auth: AuthUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    Page::new("leave_request.html", "Request leave")
        .user(&auth)
        .notice(flash::take(&req))
        .render(&state.templates)
}

// POST /leave_request
pub async fn create_leave(
    auth: AuthUser,
    state: web::Data<AppState>,
    form: web::Form<LeaveForm>,
) -> Result<HttpResponse, AppError> {
    let dates = match validation::leave(&form) {
        Ok(d) => d,
        Err(errors) => {
            return Page::new("leave_request.html", "Request leave")
                .status(StatusCode::BAD_REQUEST)
                .user(&auth)
                .insert("start_date", form.start_date.trim())
                .insert("end_date", form.end_date.trim())
                .errors(&errors)
                .render(&state.templates);
        }
    };

    let leave = submit_leave(&state.pool, &auth, dates).await.map_err(|e| {
        tracing::error!(error = %e, user_id = auth.user_id, "Failed to create leave request");
        AppError::from(e)
    })?;

    tracing::info!(
        user_id = auth.user_id,
        leave_id = leave.id,
        start_date = %leave.start_date,
        end_date = %leave.end_date,
        "Leave request submitted"
    );

    Ok(flash::redirect("/dashboard", Notice::LeaveSubmitted))
}
