//! Readiness and liveness probes.
//!
//! Readiness flips once the store handle is built and the server is bound.
//! Liveness flips off when shutdown begins so orchestrators stop routing
//! traffic before the pool is released. Both probes report which store
//! backs the process.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;

/// Backing store the process was started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    /// PostgreSQL through the Diesel pool.
    Postgres,
    /// Process-local map; contents vanish on restart.
    Memory,
}

/// Probe flags shared between `main` and the probe handlers.
pub struct HealthState {
    store: StoreKind,
    ready: AtomicBool,
    live: AtomicBool,
}

impl HealthState {
    /// Start live but not ready.
    pub fn new(store: StoreKind) -> Self {
        Self {
            store,
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }

    /// Store recorded at start-up.
    #[must_use]
    pub fn store(&self) -> StoreKind {
        self.store
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness and readiness from now on.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
        self.ready.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe(&self, ok: bool, up: &'static str, down: &'static str) -> HttpResponse {
        let mut builder = if ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        builder
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .json(ProbeBody {
                status: if ok { up } else { down }.to_owned(),
                store: self.store,
            })
    }
}

/// Probe response body.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ProbeBody {
    /// `ready`, `starting`, `alive` or `draining`.
    status: String,
    store: StoreKind,
}

/// Readiness probe: 200 once the store is attached and the server bound.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Serving traffic", body = ProbeBody),
        (status = 503, description = "Starting up or draining", body = ProbeBody)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    state.probe(state.is_ready(), "ready", "starting")
}

/// Liveness probe: 503 once shutdown has begun.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Process is alive", body = ProbeBody),
        (status = 503, description = "Process is draining", body = ProbeBody)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    state.probe(state.is_alive(), "alive", "draining")
}
