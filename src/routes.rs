use crate::{
    api::{attendance, dashboard, leave_request, payroll, staff},
    auth::{handlers, middleware::require_login},
    state::AppState,
};
use actix_governor::Governor;
use actix_web::{Resource, middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, state: web::Data<AppState>) {
    let limits = state.limits.clone();

    cfg.app_data(state);

    // Public routes
    cfg.service(web::resource("/").route(web::get().to(dashboard::index)))
        .service(
            web::resource("/login")
                .wrap(Governor::new(&limits.login))
                .route(web::get().to(handlers::login_form))
                .route(web::post().to(handlers::login)),
        )
        .service(
            web::resource("/register")
                .wrap(Governor::new(&limits.register))
                .route(web::get().to(handlers::register_form))
                .route(web::post().to(handlers::register)),
        );

    // Protected routes. Wrapped one by one so unknown paths fall through to 404.
    let protected = |resource: Resource| {
        resource
            .wrap(from_fn(require_login)) // authentication
            .wrap(Governor::new(&limits.protected)) // rate limiting, one shared bucket
    };

    cfg.service(protected(
        web::resource("/logout").route(web::get().to(handlers::logout)),
    ))
    .service(protected(
        web::resource("/dashboard").route(web::get().to(dashboard::show_dashboard)),
    ))
    .service(protected(
        web::resource("/mark_attendance").route(web::post().to(attendance::mark_attendance_handler)),
    ))
    .service(protected(
        web::resource("/leave_request")
            .route(web::get().to(leave_request::leave_form))
            .route(web::post().to(leave_request::create_leave)),
    ))
    .service(protected(
        web::resource("/payroll").route(web::get().to(payroll::list_payrolls)),
    ))
    .service(protected(
        web::resource("/staff_management").route(web::get().to(staff::list_staff)),
    ));
}
