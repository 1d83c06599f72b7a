// Metrics collection and tracking

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Record process start for uptime calculation. Call once from `main`.
pub fn init_start_time() {
    let _ = START_TIME.get_or_init(Instant::now);
}

fn uptime_seconds() -> u64 {
    START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0)
}

/// Streaming counters shared across sessions.
#[derive(Debug, Default)]
pub struct AppMetrics {
    pub sessions_opened: AtomicU64,
    pub session_errors: AtomicU64,
    pub requests_streamed: AtomicU64,
    pub chunks_streamed: AtomicU64,
    pub bytes_streamed: AtomicU64,
}

impl AppMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_session_opened(&self) {
        self.sessions_opened.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_session_error(&self) {
        self.session_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_request(&self, chunks: u64, bytes: u64) {
        self.requests_streamed.fetch_add(1, Ordering::Relaxed);
        self.chunks_streamed.fetch_add(chunks, Ordering::Relaxed);
        self.bytes_streamed.fetch_add(bytes, Ordering::Relaxed);
    }
}

#[derive(Serialize)]
pub struct MetricsResponse {
    pub timestamp: DateTime<Utc>,
    pub system: SystemMetrics,
    pub streaming: StreamingMetrics,
}

#[derive(Serialize)]
pub struct SystemMetrics {
    pub cpu_usage_percent: f32,
    pub memory_used_mb: u64,
    pub memory_total_mb: u64,
    pub memory_usage_percent: f32,
    pub uptime_seconds: u64,
}

#[derive(Serialize)]
pub struct StreamingMetrics {
    pub sessions_opened: u64,
    pub session_errors: u64,
    pub requests_streamed: u64,
    pub chunks_streamed: u64,
    pub bytes_streamed: u64,
}

/// Snapshot counters and sample system usage for the /metrics endpoint.
pub fn collect(metrics: &AppMetrics) -> MetricsResponse {
    let mut system = sysinfo::System::new();
    system.refresh_cpu();
    system.refresh_memory();

    let cpu_usage = system.global_cpu_info().cpu_usage();
    let memory_used = system.used_memory();
    let memory_total = system.total_memory();
    let memory_usage_percent = if memory_total > 0 {
        (memory_used as f64 / memory_total as f64 * 100.0) as f32
    } else {
        0.0
    };

    MetricsResponse {
        timestamp: Utc::now(),
        system: SystemMetrics {
            cpu_usage_percent: cpu_usage,
            memory_used_mb: memory_used / 1024 / 1024,
            memory_total_mb: memory_total / 1024 / 1024,
            memory_usage_percent,
            uptime_seconds: uptime_seconds(),
        },
        streaming: StreamingMetrics {
            sessions_opened: metrics.sessions_opened.load(Ordering::Relaxed),
            session_errors: metrics.session_errors.load(Ordering::Relaxed),
            requests_streamed: metrics.requests_streamed.load(Ordering::Relaxed),
            chunks_streamed: metrics.chunks_streamed.load(Ordering::Relaxed),
            bytes_streamed: metrics.bytes_streamed.load(Ordering::Relaxed),
        },
    }
}
