//! Recent daily revenue endpoint.
//! Used by: server.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::format;
use crate::handlers::query::parse_limit;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RevenueQuery {
    pub limit: Option<String>,
}

#[derive(Serialize)]
pub struct RevenuePoint {
    pub day: String,
    pub value: f64,
}

#[derive(Serialize)]
pub struct RevenueResponse {
    pub data: Vec<RevenuePoint>,
}

pub async fn revenue(
    State(state): State<AppState>,
    Query(q): Query<RevenueQuery>,
) -> Result<Json<RevenueResponse>> {
    state.increment_requests();
    let limit = match parse_limit(q.limit.as_deref()) {
        Ok(limit) => limit,
        Err(e) => {
            state.metrics.record_limit_rejection();
            tracing::debug!(raw = ?q.limit, "revenue limit rejected");
            return Err(e);
        }
    };
    let rows = state.store.recent_revenue(limit)?;
    let data = rows
        .iter()
        .map(|r| RevenuePoint {
            day: format::day_label(r.date),
            value: format::cents_to_whole_dollars(r.value_cents),
        })
        .collect();
    state.metrics.record_revenue_query();
    tracing::debug!(limit, rows = rows.len(), "revenue series served");
    Ok(Json(RevenueResponse { data }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::build_test_state;

    const DAY_MS: i64 = 86_400_000;
    const JAN_1_2024_MS: i64 = 1_704_067_200_000;

    fn seeded_state(days: i64) -> Result<AppState> {
        let state = build_test_state()?;
        for i in 0..days {
            state.store.insert_revenue(JAN_1_2024_MS + i * DAY_MS, 10_000 * (i + 1))?;
        }
        Ok(state)
    }

    fn query(limit: Option<&str>) -> Query<RevenueQuery> {
        Query(RevenueQuery { limit: limit.map(str::to_owned) })
    }

    #[tokio::test]
    async fn default_limit_returns_ten_points() -> Result<()> {
        let state = seeded_state(15)?;
        let Json(body) = revenue(State(state), query(None)).await?;
        assert_eq!(body.data.len(), 10);
        Ok(())
    }

    #[tokio::test]
    async fn custom_limit_is_respected() -> Result<()> {
        let state = seeded_state(15)?;
        let Json(body) = revenue(State(state), query(Some("3"))).await?;
        assert_eq!(body.data.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn values_are_whole_dollars() -> Result<()> {
        let state = build_test_state()?;
        state.store.insert_revenue(JAN_1_2024_MS, 12_345)?;
        let Json(body) = revenue(State(state), query(Some("1"))).await?;
        assert_eq!(body.data[0].value, 123.0);
        Ok(())
    }

    #[tokio::test]
    async fn points_are_in_ascending_date_order() -> Result<()> {
        let state = seeded_state(15)?;
        let Json(body) = revenue(State(state), query(Some("5"))).await?;
        let values: Vec<f64> = body.data.iter().map(|p| p.value).collect();
        let mut sorted = values.clone();
        sorted.sort_by(f64::total_cmp);
        assert_eq!(values, sorted);
        Ok(())
    }

    #[tokio::test]
    async fn days_use_short_labels() -> Result<()> {
        let state = seeded_state(5)?;
        let Json(body) = revenue(State(state), query(Some("1"))).await?;
        assert_eq!(body.data[0].day, "Jan 5");
        Ok(())
    }

    #[tokio::test]
    async fn invalid_limit_is_rejected() -> Result<()> {
        let state = seeded_state(3)?;
        assert!(revenue(State(state.clone()), query(Some("0"))).await.is_err());
        assert!(revenue(State(state), query(Some("61"))).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn empty_store_returns_empty_data() -> Result<()> {
        let state = build_test_state()?;
        let Json(body) = revenue(State(state), query(None)).await?;
        assert!(body.data.is_empty());
        Ok(())
    }
}
