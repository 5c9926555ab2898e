//! Latest KPI snapshot endpoint.
//! Used by: server.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::Result;
use crate::format;
use crate::state::AppState;
use crate::store::sqlite::KpiSnapshot;

#[derive(Serialize)]
pub struct KpiEntry {
    pub label: &'static str,
    pub value: String,
    pub delta: f64,
}

#[derive(Serialize)]
pub struct KpisResponse {
    pub kpis: Vec<KpiEntry>,
}

/// The dashboard's four KPI cards, in fixed order. Deltas are always 0.0;
/// historical comparison is not computed here. No snapshot yet means an
/// empty bundle, not an error.
pub fn build_kpis(snapshot: Option<&KpiSnapshot>) -> Vec<KpiEntry> {
    let Some(snap) = snapshot else {
        return Vec::new();
    };
    vec![
        KpiEntry {
            label: "Total Users",
            value: format::group_thousands(snap.total_users),
            delta: 0.0,
        },
        KpiEntry {
            label: "Sessions",
            value: format::group_thousands(snap.sessions),
            delta: 0.0,
        },
        KpiEntry {
            label: "Conversion",
            value: format::format_percent(snap.conversion_pct),
            delta: 0.0,
        },
        KpiEntry {
            label: "Revenue",
            value: format::format_currency_tiered(snap.revenue_cents),
            delta: 0.0,
        },
    ]
}

pub async fn kpis(State(state): State<AppState>) -> Result<Json<KpisResponse>> {
    state.increment_requests();
    let snapshot = state.store.latest_kpi()?;
    state.metrics.record_kpi_query();
    tracing::debug!(found = snapshot.is_some(), "kpi snapshot served");
    Ok(Json(KpisResponse { kpis: build_kpis(snapshot.as_ref()) }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::build_test_state;

    fn snap(revenue_cents: i64) -> KpiSnapshot {
        KpiSnapshot {
            captured_at: 1_704_441_600_000,
            total_users: 15_234,
            sessions: 45_678,
            conversion_pct: 3.2,
            revenue_cents,
        }
    }

    #[test]
    fn bundle_has_four_entries_in_fixed_order() {
        let s = snap(123_456);
        let kpis = build_kpis(Some(&s));
        let labels: Vec<&str> = kpis.iter().map(|k| k.label).collect();
        assert_eq!(labels, ["Total Users", "Sessions", "Conversion", "Revenue"]);
    }

    #[test]
    fn bundle_values_are_formatted() {
        let s = snap(250_000);
        let kpis = build_kpis(Some(&s));
        assert_eq!(kpis[0].value, "15,234");
        assert_eq!(kpis[1].value, "45,678");
        assert_eq!(kpis[2].value, "3.2%");
        assert_eq!(kpis[3].value, "$2.5k");
    }

    #[test]
    fn deltas_are_always_zero() {
        let s = snap(50_000);
        assert!(build_kpis(Some(&s)).iter().all(|k| k.delta == 0.0));
    }

    #[test]
    fn missing_snapshot_yields_empty_bundle() {
        assert!(build_kpis(None).is_empty());
    }

    #[tokio::test]
    async fn handler_serves_latest_snapshot() -> Result<()> {
        let state = build_test_state()?;
        state.store.insert_kpi(&snap(50_000))?;
        let mut newer = snap(250_000);
        newer.captured_at += 86_400_000;
        newer.total_users = 15_500;
        state.store.insert_kpi(&newer)?;

        let Json(body) = kpis(State(state)).await?;
        assert_eq!(body.kpis.len(), 4);
        assert_eq!(body.kpis[0].value, "15,500");
        assert_eq!(body.kpis[3].value, "$2.5k");
        Ok(())
    }

    #[tokio::test]
    async fn handler_on_empty_store_returns_empty_list() -> Result<()> {
        let state = build_test_state()?;
        let Json(body) = kpis(State(state)).await?;
        assert!(body.kpis.is_empty());
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"kpis":[]}"#);
        Ok(())
    }

    #[tokio::test]
    async fn repeated_reads_are_byte_identical() -> Result<()> {
        let state = build_test_state()?;
        state.store.insert_kpi(&snap(123_456))?;
        let Json(first) = kpis(State(state.clone())).await?;
        let Json(second) = kpis(State(state)).await?;
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        Ok(())
    }
}
