//! Liveness and readiness probes.
//!
//! Readiness flips to `200` once the listener is bound; liveness flips to
//! `503` when shutdown begins so orchestrators stop routing traffic early.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

/// Shared probe state.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Not ready, but alive.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness checks from now on.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}
