//! Per-endpoint query counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

pub struct Metrics {
    pub kpi_queries: AtomicU64,
    pub traffic_queries: AtomicU64,
    pub signup_queries: AtomicU64,
    pub revenue_queries: AtomicU64,
    pub device_share_queries: AtomicU64,
    pub limit_rejections: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            kpi_queries: AtomicU64::new(0),
            traffic_queries: AtomicU64::new(0),
            signup_queries: AtomicU64::new(0),
            revenue_queries: AtomicU64::new(0),
            device_share_queries: AtomicU64::new(0),
            limit_rejections: AtomicU64::new(0),
        }
    }

    pub fn record_kpi_query(&self) {
        self.kpi_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_traffic_query(&self) {
        self.traffic_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_signup_query(&self) {
        self.signup_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_revenue_query(&self) {
        self.revenue_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_device_share_query(&self) {
        self.device_share_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_limit_rejection(&self) {
        self.limit_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            kpi_queries: self.kpi_queries.load(Ordering::Relaxed),
            traffic_queries: self.traffic_queries.load(Ordering::Relaxed),
            signup_queries: self.signup_queries.load(Ordering::Relaxed),
            revenue_queries: self.revenue_queries.load(Ordering::Relaxed),
            device_share_queries: self.device_share_queries.load(Ordering::Relaxed),
            limit_rejections: self.limit_rejections.load(Ordering::Relaxed),
        }
    }
}

#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub kpi_queries: u64,
    pub traffic_queries: u64,
    pub signup_queries: u64,
    pub revenue_queries: u64,
    pub device_share_queries: u64,
    pub limit_rejections: u64,
}
