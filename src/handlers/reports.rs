use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;

use crate::error::AppError;
use crate::models::{
    CarListPage, DashboardPage, ManufacturerListPage, OwnerListPage, ServiceRecordListPage,
    StatisticsPage,
};
use crate::service::ReportingService;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/cars/", get(car_list))
        .route("/cars/{body_type}/", get(cars_by_body_type))
        .route("/manufacturers/", get(manufacturer_list))
        .route("/manufacturers/{country}/", get(manufacturers_by_country))
        .route("/owners/", get(owner_list))
        .route("/owners/current/", get(current_owners))
        .route("/service/", get(service_records))
        .route("/service/recent/", get(recent_service_records))
        .route("/statistics/", get(car_statistics))
}

async fn home(State(service): State<ReportingService>) -> Result<Json<DashboardPage>, AppError> {
    Ok(Json(service.dashboard().await?))
}

async fn car_list(State(service): State<ReportingService>) -> Result<Json<CarListPage>, AppError> {
    Ok(Json(service.car_list(None).await?))
}

async fn cars_by_body_type(
    State(service): State<ReportingService>,
    Path(body_type): Path<String>,
) -> Result<Json<CarListPage>, AppError> {
    Ok(Json(service.car_list(Some(&body_type)).await?))
}

async fn manufacturer_list(
    State(service): State<ReportingService>,
) -> Result<Json<ManufacturerListPage>, AppError> {
    Ok(Json(service.manufacturer_list(None).await?))
}

async fn manufacturers_by_country(
    State(service): State<ReportingService>,
    Path(country): Path<String>,
) -> Result<Json<ManufacturerListPage>, AppError> {
    Ok(Json(service.manufacturer_list(Some(&country)).await?))
}

async fn owner_list(State(service): State<ReportingService>) -> Result<Json<OwnerListPage>, AppError> {
    Ok(Json(service.owner_list().await?))
}

async fn current_owners(
    State(service): State<ReportingService>,
) -> Result<Json<OwnerListPage>, AppError> {
    Ok(Json(service.current_owners().await?))
}

async fn service_records(
    State(service): State<ReportingService>,
) -> Result<Json<ServiceRecordListPage>, AppError> {
    Ok(Json(service.service_records().await?))
}

async fn recent_service_records(
    State(service): State<ReportingService>,
) -> Result<Json<ServiceRecordListPage>, AppError> {
    let today = Utc::now().date_naive();
    Ok(Json(service.recent_service_records(today).await?))
}

async fn car_statistics(
    State(service): State<ReportingService>,
) -> Result<Json<StatisticsPage>, AppError> {
    Ok(Json(service.statistics().await?))
}
