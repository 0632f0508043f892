use crate::{
    auth::{auth::AuthUser, auth::authenticate, password::hash_password, session},
    db,
    errors::AppError,
    model::{role::Role, user::User},
    models::{LoginForm, RegisterForm},
    state::AppState,
    utils::flash::{self, Notice},
    validation::{self, Credentials, FieldError},
    views::Page,
};
use actix_web::{HttpRequest, HttpResponse, http::StatusCode, http::header, web};
use tracing::{debug, error, info, instrument};
// auth end points

pub enum Registration {
    Created(User),
    UsernameTaken,
}

/// Creates an account for validated credentials. Availability is checked
/// up front; a concurrent insert that wins the race still surfaces as
/// `UsernameTaken` through the store's unique constraint.
pub async fn register_user(
    state: &AppState,
    credentials: &Credentials,
    role: Role,
) -> Result<Registration, AppError> {
    let username = credentials.username.as_str();

    if !state.usernames.is_available(username, &state.pool).await? {
        debug!("Username already taken");
        return Ok(Registration::UsernameTaken);
    }

    let hashed = hash_password(&credentials.password).map_err(|e| {
        error!(error = %e, "Failed to hash password");
        AppError::from(e)
    })?;

    match db::user::create_user(&state.pool, username, &hashed, role).await {
        Ok(user) => {
            state.usernames.mark_taken(username).await;
            Ok(Registration::Created(user))
        }
        Err(e) if db::is_unique_violation(&e) => {
            state.usernames.mark_taken(username).await;
            Ok(Registration::UsernameTaken)
        }
        Err(e) => {
            error!(error = %e, "Failed to register user");
            Err(e.into())
        }
    }
}

/// Creates the configured admin unless that username exists already.
/// Existing accounts are left as they are.
pub async fn bootstrap_admin(state: &AppState) -> anyhow::Result<()> {
    let (Some(username), Some(password)) = (
        state.config.admin_username.as_deref(),
        state.config.admin_password.as_deref(),
    ) else {
        debug!("No admin credentials configured");
        return Ok(());
    };

    let credentials = validation::registration(&RegisterForm {
        username: username.to_owned(),
        password: password.to_owned(),
    })
    .map_err(|errors| anyhow::anyhow!("invalid admin credentials: {errors:?}"))?;

    match register_user(state, &credentials, Role::Admin).await? {
        Registration::Created(user) => {
            info!(user_id = user.id, username = %user.username, "Admin account created");
        }
        Registration::UsernameTaken => {
            info!(username = %credentials.username, "Admin account already present");
        }
    }
    Ok(())
}

fn register_page(
    username: &str,
    status: StatusCode,
    errors: &[FieldError],
) -> Page<'static> {
    Page::new("register.html", "Register")
        .status(status)
        .insert("username", username)
        .errors(errors)
}

// GET /register
pub async fn register_form(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    Page::new("register.html", "Register")
        .notice(flash::take(&req))
        .render(&state.templates)
}

// POST /register
#[instrument(name = "auth_register", skip(state, form), fields(username = %form.username.trim()))]
pub async fn register(
    state: web::Data<AppState>,
    form: web::Form<RegisterForm>,
) -> Result<HttpResponse, AppError> {
    let credentials = match validation::registration(&form) {
        Ok(c) => c,
        Err(errors) => {
            info!("Validation failed");
            return register_page(&form.username, StatusCode::BAD_REQUEST, &errors)
                .render(&state.templates);
        }
    };

    match register_user(&state, &credentials, Role::Employee).await? {
        Registration::Created(user) => {
            info!(user_id = user.id, "User registered");
            Ok(flash::redirect("/login", Notice::AccountCreated))
        }
        Registration::UsernameTaken => register_page(
            &credentials.username,
            StatusCode::CONFLICT,
            &[FieldError::new("username", "Username already taken")],
        )
        .render(&state.templates),
    }
}

fn login_page(username: &str, status: StatusCode, errors: &[FieldError]) -> Page<'static> {
    Page::new("login.html", "Log in")
        .status(status)
        .insert("username", username)
        .errors(errors)
}

// GET /login
pub async fn login_form(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    Page::new("login.html", "Log in")
        .notice(flash::take(&req))
        .render(&state.templates)
}

// POST /login
#[instrument(name = "auth_login", skip(state, form), fields(username = %form.username.trim()))]
pub async fn login(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    info!("Login request received");

    let credentials = match validation::login(&form) {
        Ok(c) => c,
        Err(errors) => {
            info!("Validation failed: empty username or password");
            return login_page(&form.username, StatusCode::BAD_REQUEST, &errors)
                .render(&state.templates);
        }
    };

    let user = match authenticate(&state.pool, &credentials.username, &credentials.password).await? {
        Some(user) => user,
        None => {
            info!("Invalid credentials");
            return login_page(
                &credentials.username,
                StatusCode::UNAUTHORIZED,
                &[FieldError::new("credentials", "Invalid credentials")],
            )
            .render(&state.templates);
        }
    };

    let cookie = session::login(&state.pool, &state.config, &user).await?;

    info!(user_id = user.id, "Login successful");

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/dashboard"))
        .cookie(cookie)
        .finish())
}

// GET /logout
#[instrument(name = "auth_logout", skip(state, auth), fields(user_id = auth.user_id))]
pub async fn logout(
    state: web::Data<AppState>,
    auth: AuthUser,
) -> Result<HttpResponse, AppError> {
    let removal = session::logout(&state.pool, &auth).await?;

    info!("Logged out");

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/login"))
        .cookie(removal)
        .cookie(flash::cookie(Notice::LoggedOut))
        .finish())
}
