use actix_web::{get, web, Responder};
use chrono::Utc;
use serde::Deserialize;

use super::ApiError;
use crate::{
    configuration::{AppState, State},
    handler::dashboard,
    helpers::{TimeRange, TypeFilter},
};

#[get("/dashboard")]
async fn index(
    state: web::Data<AppState<State>>,
    data: web::Query<Query>,
) -> Result<impl Responder, ApiError> {
    let type_filter = TypeFilter::parse_option(&data.r#type)?;
    let range = TimeRange::parse_option(&data.range)?;

    let dashboard =
        dashboard::build(state.fixture.events(), type_filter, range, Utc::now());

    Ok(web::Json(dashboard))
}

#[derive(Debug, Deserialize)]
pub struct Query {
    r#type: Option<String>,
    range: Option<String>,
}
