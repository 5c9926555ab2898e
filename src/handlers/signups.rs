//! Latest-month signups endpoint.
//! Used by: server.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::Result;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SignupPoint {
    pub channel: String,
    pub signups: i64,
}

#[derive(Serialize)]
pub struct SignupsResponse {
    pub data: Vec<SignupPoint>,
}

pub async fn signups(State(state): State<AppState>) -> Result<Json<SignupsResponse>> {
    state.increment_requests();
    let rows = state.store.latest_month_signups()?;
    let data = rows
        .into_iter()
        .map(|r| SignupPoint { channel: r.channel, signups: r.signups })
        .collect::<Vec<_>>();
    state.metrics.record_signup_query();
    tracing::debug!(rows = data.len(), "signup breakdown served");
    Ok(Json(SignupsResponse { data }))
}
