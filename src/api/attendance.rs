use crate::{
    auth::auth::AuthUser,
    db,
    errors::AppError,
    model::attendance::Attendance,
    models::AttendanceForm,
    state::AppState,
    utils::flash::{self, Notice},
    validation,
};
use actix_web::{HttpResponse, web};
use chrono::Local;
use sqlx::SqlitePool;

/// Records `status` for the caller on today's server-local date. Repeated
/// marks on the same day each create their own row.
pub async fn mark_attendance(
    pool: &SqlitePool,
    auth: &AuthUser,
    status: &str,
) -> Result<Attendance, sqlx::Error> {
    let today = Local::now().date_naive();
    db::attendance::insert(pool, auth.user_id, today, status).await
}

pub async fn mark_attendance_handler(
    auth: AuthUser,
    state: web::Data<AppState>,
    form: web::Form<AttendanceForm>,
) -> Result<HttpResponse, AppError> {
    let status = match validation::attendance(&form) {
        Ok(s) => s,
        Err(_) => {
            return Ok(flash::redirect("/dashboard", Notice::InvalidAttendanceStatus));
        }
    };

    let record = mark_attendance(&state.pool, &auth, &status)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = auth.user_id, "Mark attendance failed");
            AppError::from(e)
        })?;

    tracing::info!(
        user_id = auth.user_id,
        attendance_id = record.id,
        date = %record.date,
        status = %record.status,
        "Attendance marked"
    );

    Ok(flash::redirect("/dashboard", Notice::AttendanceMarked))
}
