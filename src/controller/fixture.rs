use actix_web::{get, web, Responder};

use super::ApiError;
use crate::configuration::{AppState, State};

/// Bundled fixture, exactly as loaded.
#[get("")]
async fn index(state: web::Data<AppState<State>>) -> Result<impl Responder, ApiError> {
    Ok(web::Json(state.fixture.records().to_vec()))
}
