use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::handlers::current_caller;
use crate::handlers::file::MAX_UPLOAD_BYTES;
use crate::payload::customer::CustomerRequest;
use crate::state::AppState;
use crate::utils::multipart::read_form;

pub async fn create_customer(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&req, &state).await?;
    let (request, file) = read_form::<CustomerRequest>(payload, MAX_UPLOAD_BYTES).await?;

    let customer = state.customers.create(&caller, request, file).await?;
    Ok(HttpResponse::Created().json(customer))
}

pub async fn get_customers(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&req, &state).await?;
    let customers = state.customers.get_all(&caller).await?;
    Ok(HttpResponse::Ok().json(customers))
}

pub async fn get_customer(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    current_caller(&req, &state).await?;
    let customer = state.customers.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(customer))
}

pub async fn update_customer(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    current_caller(&req, &state).await?;
    let (request, file) = read_form::<CustomerRequest>(payload, MAX_UPLOAD_BYTES).await?;

    let customer = state.customers.update(path.into_inner(), request, file).await?;
    Ok(HttpResponse::Ok().json(customer))
}

pub async fn delete_customer(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    current_caller(&req, &state).await?;
    let id = path.into_inner();
    state.customers.delete(id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": format!("Customer {} deleted", id) })))
}
