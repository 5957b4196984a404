use actix_web::{get, web, HttpResponse};
use chrono::Local;
use serde::Deserialize;

use super::ApiError;
use crate::{
    configuration::{AppState, State},
    handler::live,
    helpers::TypeFilter,
};

#[get("/live")]
async fn index(
    state: web::Data<AppState<State>>,
    data: web::Query<Query>,
) -> Result<HttpResponse, ApiError> {
    let type_filter = TypeFilter::parse_option(&data.r#type)?;

    let Some(latest) = state.live.latest().await else {
        return Ok(HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "error": "Live data is not available yet"
        })));
    };

    Ok(HttpResponse::Ok().json(live::snapshot(&latest, type_filter, &Local::now())))
}

#[derive(Debug, Deserialize)]
pub struct Query {
    r#type: Option<String>,
}
