//! One-shot notices carried across a redirect in a short-lived cookie.
//! The cookie holds a notice code, never free text.

use actix_web::{
    HttpRequest, HttpResponse,
    cookie::{Cookie, SameSite, time::Duration},
    http::header,
};
use std::str::FromStr;
use strum_macros::{AsRefStr, EnumString};

pub const NOTICE_COOKIE: &str = "notice";

#[derive(Debug, Copy, Clone, Eq, PartialEq, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Notice {
    AccessDenied,
    AccountCreated,
    AttendanceMarked,
    InvalidAttendanceStatus,
    LeaveSubmitted,
    LoggedOut,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::AccessDenied => "Access denied!",
            Notice::AccountCreated => "Account created. Please log in.",
            Notice::AttendanceMarked => "Attendance marked.",
            Notice::InvalidAttendanceStatus => {
                "Attendance status must be between 1 and 10 characters."
            }
            Notice::LeaveSubmitted => "Leave request submitted.",
            Notice::LoggedOut => "You have been logged out.",
        }
    }
}

pub fn cookie(notice: Notice) -> Cookie<'static> {
    Cookie::build(NOTICE_COOKIE, notice.as_ref().to_owned())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::minutes(5))
        .finish()
}

/// Cookie that deletes the notice once it has been shown.
pub fn removal() -> Cookie<'static> {
    let mut cookie = Cookie::build(NOTICE_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// Pending notice for this request, if any. Unknown codes are ignored.
pub fn take(req: &HttpRequest) -> Option<Notice> {
    req.cookie(NOTICE_COOKIE)
        .and_then(|c| Notice::from_str(c.value()).ok())
}

/// 303 redirect that shows `notice` on the next rendered page.
pub fn redirect(location: &str, notice: Notice) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_owned()))
        .cookie(cookie(notice))
        .finish()
}
