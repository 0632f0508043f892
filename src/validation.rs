//! Form input checks that run before anything touches the store.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{AttendanceForm, LeaveForm, LoginForm, RegisterForm};

pub const USERNAME_MAX: usize = 150;
pub const PASSWORD_MAX: usize = 128;
pub const STATUS_MAX: usize = 10;
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub type Validated<T> = Result<T, Vec<FieldError>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveDates {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

fn username(raw: &str, errors: &mut Vec<FieldError>) -> String {
    let username = raw.trim();
    if username.is_empty() {
        errors.push(FieldError::new("username", "Username is required"));
    } else if username.chars().count() > USERNAME_MAX {
        errors.push(FieldError::new(
            "username",
            format!("Username must be at most {USERNAME_MAX} characters"),
        ));
    }
    username.to_owned()
}

fn password(raw: &str, errors: &mut Vec<FieldError>) {
    if raw.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    } else if raw.chars().count() > PASSWORD_MAX {
        errors.push(FieldError::new(
            "password",
            format!("Password must be at most {PASSWORD_MAX} characters"),
        ));
    }
}

fn date(field: &'static str, label: &str, raw: &str, errors: &mut Vec<FieldError>) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.push(FieldError::new(field, format!("{label} is required")));
        return None;
    }
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(d) => Some(d),
        Err(_) => {
            errors.push(FieldError::new(field, format!("{label} must be a date (YYYY-MM-DD)")));
            None
        }
    }
}

pub fn registration(form: &RegisterForm) -> Validated<Credentials> {
    let mut errors = Vec::new();
    let username = username(&form.username, &mut errors);
    password(&form.password, &mut errors);

    if errors.is_empty() {
        Ok(Credentials {
            username,
            password: form.password.clone(),
        })
    } else {
        Err(errors)
    }
}

/// Only presence is checked.
pub fn login(form: &LoginForm) -> Validated<Credentials> {
    let mut errors = Vec::new();
    let username = form.username.trim();
    if username.is_empty() {
        errors.push(FieldError::new("username", "Username is required"));
    }
    if form.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }

    if errors.is_empty() {
        Ok(Credentials {
            username: username.to_owned(),
            password: form.password.clone(),
        })
    } else {
        Err(errors)
    }
}

/// Any non-empty status up to the column width is accepted.
pub fn attendance(form: &AttendanceForm) -> Validated<String> {
    let status = form.status.trim();
    if status.is_empty() {
        return Err(vec![FieldError::new("status", "Status is required")]);
    }
    if status.chars().count() > STATUS_MAX {
        return Err(vec![FieldError::new(
            "status",
            format!("Status must be at most {STATUS_MAX} characters"),
        )]);
    }
    Ok(status.to_owned())
}

/// Dates must be well formed; their order is not checked.
pub fn leave(form: &LeaveForm) -> Validated<LeaveDates> {
    let mut errors = Vec::new();
    let start_date = date("start_date", "Start date", &form.start_date, &mut errors);
    let end_date = date("end_date", "End date", &form.end_date, &mut errors);

    match (start_date, end_date) {
        (Some(start_date), Some(end_date)) => Ok(LeaveDates {
            start_date,
            end_date,
        }),
        _ => Err(errors),
    }
}
