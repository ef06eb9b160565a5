use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::handlers::current_caller;
use crate::payload::customer_group::CustomerGroupRequest;
use crate::state::AppState;

pub async fn create_customer_group(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<CustomerGroupRequest>,
) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&req, &state).await?;
    let group = state.customer_groups.create(&caller, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(group))
}

pub async fn get_customer_groups(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&req, &state).await?;
    let groups = state.customer_groups.get_all(&caller).await?;
    Ok(HttpResponse::Ok().json(groups))
}

pub async fn get_customer_group(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    current_caller(&req, &state).await?;
    let group = state.customer_groups.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(group))
}

pub async fn update_customer_group(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CustomerGroupRequest>,
) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&req, &state).await?;
    let group = state
        .customer_groups
        .update(&caller, path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(group))
}

pub async fn delete_customer_group(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&req, &state).await?;
    let id = path.into_inner();
    state.customer_groups.delete(&caller, id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": format!("Customer group {} deleted", id) })))
}
