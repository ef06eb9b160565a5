use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::payload::auth::AuthRequest;
use crate::state::AppState;

pub async fn auth_handler(
    req: web::Json<AuthRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let request = req.into_inner();
    let registering = request.action.eq_ignore_ascii_case("create");

    let response = state.auth.authenticate_request(request).await?;
    if registering {
        Ok(HttpResponse::Created().json(response))
    } else {
        Ok(HttpResponse::Ok().json(response))
    }
}
