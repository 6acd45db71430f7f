pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

use axum::{extract::FromRef, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use handlers::{admin, health, reports};
use repository::DealershipRepository;
use service::{AdminService, ReportingService};

/// Shared handler state. Both services wrap the same repository.
#[derive(Clone)]
pub struct AppState {
    pub reporting: ReportingService,
    pub admin: AdminService,
}

impl AppState {
    pub fn new(repo: Arc<dyn DealershipRepository>) -> Self {
        Self {
            reporting: ReportingService::new(repo.clone()),
            admin: AdminService::new(repo),
        }
    }
}

impl FromRef<AppState> for ReportingService {
    fn from_ref(state: &AppState) -> Self {
        state.reporting.clone()
    }
}

impl FromRef<AppState> for AdminService {
    fn from_ref(state: &AppState) -> Self {
        state.admin.clone()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(reports::router())
        .merge(health::router())
        .merge(admin::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
