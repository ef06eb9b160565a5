use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::handlers::current_caller;
use crate::handlers::file::MAX_UPLOAD_BYTES;
use crate::payload::staff::{StaffRequest, StaffSalaryResponse};
use crate::state::AppState;
use crate::utils::multipart::read_form;

pub async fn create_staff(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&req, &state).await?;
    let (request, file) = read_form::<StaffRequest>(payload, MAX_UPLOAD_BYTES).await?;

    let staff = state.staff.create_staff(&caller, request, file).await?;
    Ok(HttpResponse::Created().json(staff))
}

pub async fn get_staffs(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&req, &state).await?;
    let staffs = state.staff.get_all_staffs(&caller).await?;
    Ok(HttpResponse::Ok().json(staffs))
}

pub async fn get_staff(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    current_caller(&req, &state).await?;
    let staff = state.staff.get_staff_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(staff))
}

pub async fn update_staff(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&req, &state).await?;
    let (request, file) = read_form::<StaffRequest>(payload, MAX_UPLOAD_BYTES).await?;

    let staff = state
        .staff
        .update_staff(&caller, path.into_inner(), request, file)
        .await?;
    Ok(HttpResponse::Ok().json(staff))
}

pub async fn delete_staff(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&req, &state).await?;
    let id = path.into_inner();
    state.staff.delete_staff(&caller, id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": format!("Staff {} deleted", id) })))
}

pub async fn get_staff_salary(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    current_caller(&req, &state).await?;
    let staff_id = path.into_inner();
    let salary_debt = state.staff.get_staff_salary(staff_id).await?;
    Ok(HttpResponse::Ok().json(StaffSalaryResponse { staff_id, salary_debt }))
}
