pub mod activity_log;
pub mod auth;
pub mod customer;
pub mod customer_group;
pub mod file;
pub mod shift;
pub mod staff;

use actix_web::http::header;
use actix_web::{web, HttpRequest};

use crate::errors::AppError;
use crate::models::staff::Caller;
use crate::state::AppState;
use crate::utils::jwt::bearer_token;

/// Authenticates the request's bearer token.
pub async fn current_caller(req: &HttpRequest, state: &AppState) -> Result<Caller, AppError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth| auth.to_str().ok());
    let token = bearer_token(header).ok_or_else(|| AppError::Unauthorized("Missing token".to_string()))?;
    state.auth.authenticate(token).await
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/v1/auth").route(web::post().to(auth::auth_handler)))
        .service(
            web::resource("/v1/staff")
                .route(web::post().to(staff::create_staff))
                .route(web::get().to(staff::get_staffs)),
        )
        .service(
            web::resource("/v1/staff/{id}")
                .route(web::get().to(staff::get_staff))
                .route(web::patch().to(staff::update_staff))
                .route(web::delete().to(staff::delete_staff)),
        )
        .service(web::resource("/v1/staff/{id}/salary").route(web::get().to(staff::get_staff_salary)))
        .service(
            web::resource("/v1/staff/{id}/attendance").route(web::get().to(shift::get_staff_attendance)),
        )
        .service(
            web::resource("/v1/customer-group")
                .route(web::post().to(customer_group::create_customer_group))
                .route(web::get().to(customer_group::get_customer_groups)),
        )
        .service(
            web::resource("/v1/customer-group/{id}")
                .route(web::get().to(customer_group::get_customer_group))
                .route(web::patch().to(customer_group::update_customer_group))
                .route(web::delete().to(customer_group::delete_customer_group)),
        )
        .service(
            web::resource("/v1/customer")
                .route(web::post().to(customer::create_customer))
                .route(web::get().to(customer::get_customers)),
        )
        .service(
            web::resource("/v1/customer/{id}")
                .route(web::get().to(customer::get_customer))
                .route(web::patch().to(customer::update_customer))
                .route(web::delete().to(customer::delete_customer)),
        )
        .service(
            web::resource("/v1/shift")
                .route(web::post().to(shift::create_shift))
                .route(web::get().to(shift::get_shifts)),
        )
        .service(web::resource("/v1/shift/{id}").route(web::delete().to(shift::delete_shift)))
        .service(
            web::resource("/v1/shift/{id}/attendance").route(web::post().to(shift::record_attendance)),
        )
        .service(
            web::resource("/v1/activity-log").route(web::get().to(activity_log::get_activity_logs)),
        )
        .service(
            web::resource("/v1/file")
                .app_data(web::PayloadConfig::new(file::MAX_UPLOAD_BYTES))
                .route(web::post().to(file::upload_file)),
        )
        .service(
            web::resource("/v1/file/{key}")
                .route(web::get().to(file::download_file))
                .route(web::delete().to(file::delete_file)),
        );
}
