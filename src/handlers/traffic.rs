//! Recent daily traffic endpoint.
//! Used by: server.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::format;
use crate::handlers::query::parse_limit;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct TrafficQuery {
    // Kept as text so a non-numeric value reaches our validator instead of
    // an extractor rejection.
    pub limit: Option<String>,
}

#[derive(Serialize)]
pub struct TrafficPoint {
    pub day: String,
    pub visits: i64,
    pub sessions: i64,
}

#[derive(Serialize)]
pub struct TrafficResponse {
    pub data: Vec<TrafficPoint>,
}

pub async fn traffic(
    State(state): State<AppState>,
    Query(q): Query<TrafficQuery>,
) -> Result<Json<TrafficResponse>> {
    state.increment_requests();
    let limit = match parse_limit(q.limit.as_deref()) {
        Ok(limit) => limit,
        Err(e) => {
            state.metrics.record_limit_rejection();
            tracing::debug!(raw = ?q.limit, "traffic limit rejected");
            return Err(e);
        }
    };
    let rows = state.store.recent_traffic(limit)?;
    let data = rows
        .iter()
        .map(|r| TrafficPoint {
            day: format::day_label(r.date),
            visits: r.visits,
            sessions: r.sessions,
        })
        .collect();
    state.metrics.record_traffic_query();
    tracing::debug!(limit, rows = rows.len(), "traffic series served");
    Ok(Json(TrafficResponse { data }))
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
            state.store.insert_traffic(JAN_1_2024_MS + i * DAY_MS, 100 + i, 50 + i)?;
        }
        Ok(state)
    }

    fn query(limit: Option<&str>) -> Query<TrafficQuery> {
        Query(TrafficQuery { limit: limit.map(str::to_owned) })
    }

    #[tokio::test]
    async fn default_limit_returns_ten_points() -> Result<()> {
        let state = seeded_state(15)?;
        let Json(body) = traffic(State(state), query(None)).await?;
        assert_eq!(body.data.len(), 10);
        Ok(())
    }

    #[tokio::test]
    async fn custom_limit_is_respected() -> Result<()> {
        let state = seeded_state(15)?;
        let Json(body) = traffic(State(state), query(Some("5"))).await?;
        assert_eq!(body.data.len(), 5);
        Ok(())
    }

    #[tokio::test]
    async fn points_are_in_ascending_date_order() -> Result<()> {
        let state = seeded_state(15)?;
        let Json(body) = traffic(State(state), query(Some("5"))).await?;
        let visits: Vec<i64> = body.data.iter().map(|p| p.visits).collect();
        let mut sorted = visits.clone();
        sorted.sort();
        assert_eq!(visits, sorted);
        Ok(())
    }

    #[tokio::test]
    async fn days_use_short_labels() -> Result<()> {
        let state = seeded_state(3)?;
        let Json(body) = traffic(State(state), query(Some("1"))).await?;
        assert_eq!(body.data[0].day, "Jan 3");
        Ok(())
    }

    #[tokio::test]
    async fn invalid_limit_is_rejected_and_counted() -> Result<()> {
        let state = seeded_state(3)?;
        assert!(traffic(State(state.clone()), query(Some("100"))).await.is_err());
        assert!(traffic(State(state.clone()), query(Some("abc"))).await.is_err());
        assert_eq!(state.metrics.snapshot().limit_rejections, 2);
        Ok(())
    }

    #[tokio::test]
    async fn empty_store_returns_empty_data() -> Result<()> {
        let state = build_test_state()?;
        let Json(body) = traffic(State(state), query(None)).await?;
        assert!(body.data.is_empty());
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"data":[]}"#);
        Ok(())
    }
}
