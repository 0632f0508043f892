use actix_web::{HttpResponse, http::StatusCode};
use tera::{Context, Tera};

use serde::Serialize;

use crate::{auth::auth::AuthUser, errors::AppError, utils::flash, validation::FieldError};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("register.html", include_str!("../templates/register.html")),
    ("dashboard.html", include_str!("../templates/dashboard.html")),
    ("leave_request.html", include_str!("../templates/leave_request.html")),
    ("payroll.html", include_str!("../templates/payroll.html")),
    ("staff_management.html", include_str!("../templates/staff_management.html")),
];

/// Templates are compiled into the binary; `.html` names are autoescaped.
pub fn templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES.iter().copied())?;
    Ok(tera)
}

#[derive(Serialize)]
struct Viewer<'a> {
    username: &'a str,
    is_admin: bool,
}

/// One rendered page. Pass the notice taken from the request, if any, so it
/// is shown once and its cookie cleared.
pub struct Page<'a> {
    pub template: &'a str,
    pub status: StatusCode,
    pub context: Context,
    pub notice: Option<flash::Notice>,
}

impl<'a> Page<'a> {
    pub fn new(template: &'a str, title: &str) -> Self {
        let mut context = Context::new();
        context.insert("title", title);
        Self {
            template,
            status: StatusCode::OK,
            context,
            notice: None,
        }
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn notice(mut self, notice: Option<flash::Notice>) -> Self {
        self.notice = notice;
        self
    }

    pub fn user(mut self, auth: &AuthUser) -> Self {
        let viewer = Viewer {
            username: &auth.username,
            is_admin: auth.is_admin(),
        };
        self.context.insert("current_user", &viewer);
        self
    }

    pub fn errors(mut self, errors: &[FieldError]) -> Self {
        self.context.insert("errors", errors);
        self
    }

    pub fn insert<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> Self {
        self.context.insert(key, value);
        self
    }

    pub fn render(mut self, tera: &Tera) -> Result<HttpResponse, AppError> {
        self.context
            .insert("notice", &self.notice.map(|n| n.message()));

        let body = tera.render(self.template, &self.context).map_err(|e| {
            tracing::error!(template = self.template, error = %e, "Failed to render template");
            AppError::Template(e)
        })?;

        let mut resp = HttpResponse::build(self.status);
        resp.content_type("text/html; charset=utf-8");
        if self.notice.is_some() {
            resp.cookie(flash::removal());
        }
        Ok(resp.body(body))
    }
}
