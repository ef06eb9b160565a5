use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::handlers::current_caller;
use crate::payload::shift::{AttendanceRequest, ShiftRequest};
use crate::state::AppState;

pub async fn create_shift(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<ShiftRequest>,
) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&req, &state).await?;
    let shift = state.shifts.create_shift(&caller, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(shift))
}

pub async fn get_shifts(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&req, &state).await?;
    let shifts = state.shifts.get_all_shifts(&caller).await?;
    Ok(HttpResponse::Ok().json(shifts))
}

pub async fn delete_shift(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    current_caller(&req, &state).await?;
    let id = path.into_inner();
    state.shifts.delete_shift(id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": format!("Shift {} deleted", id) })))
}

pub async fn record_attendance(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<AttendanceRequest>,
) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&req, &state).await?;
    let record = state
        .shifts
        .record_attendance(&caller, path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(record))
}

pub async fn get_staff_attendance(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    current_caller(&req, &state).await?;
    let records = state.shifts.get_staff_attendance(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(records))
}
