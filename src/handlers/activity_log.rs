use actix_web::{web, HttpRequest, HttpResponse};

use crate::errors::AppError;
use crate::handlers::current_caller;
use crate::state::AppState;

pub async fn get_activity_logs(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let caller = current_caller(&req, &state).await?;
    let logs = state.activity_logs.get_all(&caller).await?;
    Ok(HttpResponse::Ok().json(logs))
}
