use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header};
use derive_more::Display;

use crate::utils::flash::{self, Notice};

#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "database error: {}", _0)]
    Database(sqlx::Error),

    #[display(fmt = "template error: {}", _0)]
    Template(tera::Error),

    #[display(fmt = "password hashing error: {}", _0)]
    Password(String),

    #[display(fmt = "session token error: {}", _0)]
    Token(jsonwebtoken::errors::Error),

    /// No usable session; the browser is sent to the login form
    #[display(fmt = "not logged in")]
    Unauthenticated,

    /// Wrong role; the browser is sent back to the dashboard with a notice
    #[display(fmt = "access denied")]
    AccessDenied,
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Database(e)
    }
}

impl From<tera::Error> for AppError {
    fn from(e: tera::Error) -> Self {
        AppError::Template(e)
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        AppError::Token(e)
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(e: argon2::password_hash::Error) -> Self {
        AppError::Password(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated | AppError::AccessDenied => StatusCode::SEE_OTHER,
            AppError::Database(_)
            | AppError::Template(_)
            | AppError::Password(_)
            | AppError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthenticated => HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/login"))
                .finish(),
            AppError::AccessDenied => flash::redirect("/dashboard", Notice::AccessDenied),
            other => {
                tracing::error!(error = %other, "Request failed");
                HttpResponse::InternalServerError()
                    .content_type("text/plain; charset=utf-8")
                    .body("Internal Server Error")
            }
        }
    }
}
