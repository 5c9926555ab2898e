//! Latest device-share snapshot endpoint.
//! Used by: server.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::Result;
use crate::state::AppState;

/// Wire names differ from storage: `device` goes out as `name`,
/// `sharePct` as `value`.
#[derive(Serialize)]
pub struct DevicePoint {
    pub name: String,
    pub value: f64,
}

#[derive(Serialize)]
pub struct DeviceShareResponse {
    pub data: Vec<DevicePoint>,
}

pub async fn device_share(State(state): State<AppState>) -> Result<Json<DeviceShareResponse>> {
    state.increment_requests();
    let rows = state.store.latest_device_share()?;
    let data = rows
        .into_iter()
        .map(|r| DevicePoint { name: r.device, value: r.share_pct })
        .collect::<Vec<_>>();
    state.metrics.record_device_share_query();
    tracing::debug!(rows = data.len(), "device share served");
    Ok(Json(DeviceShareResponse { data }))
}
