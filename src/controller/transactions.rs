use actix_web::{get, web, Responder};

use super::ApiError;
use crate::{
    configuration::{AppState, State},
    handler::transactions,
    types::Filter,
};

#[get("/transactions")]
async fn index(state: web::Data<AppState<State>>) -> Result<impl Responder, ApiError> {
    let filter = Filter::transactions(&state.config);
    let fetched = transactions::fetch(state.source.as_ref(), &filter).await?;

    Ok(web::Json(fetched.transactions))
}
