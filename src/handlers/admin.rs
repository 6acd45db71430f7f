use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use crate::error::AppError;
use crate::models::{
    Car, CarDetail, CarFilter, CarInput, Manufacturer, ManufacturerFilter, ManufacturerInput, Owner,
    OwnerDetail, OwnerFilter, OwnerInput, Ownership, OwnershipFilter, OwnershipInput, ServiceRecord,
    ServiceRecordDetail, ServiceRecordFilter, ServiceRecordInput,
};
use crate::service::{AdminList, AdminModel, AdminService};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/", get(index))
        .route("/admin/manufacturers/", get(list_manufacturers).post(create_manufacturer))
        .route(
            "/admin/manufacturers/{id}",
            get(get_manufacturer).put(update_manufacturer).delete(delete_manufacturer),
        )
        .route("/admin/cars/", get(list_cars).post(create_car))
        .route("/admin/cars/{id}", get(get_car).put(update_car).delete(delete_car))
        .route("/admin/owners/", get(list_owners).post(create_owner))
        .route("/admin/owners/{id}", get(get_owner).put(update_owner).delete(delete_owner))
        .route("/admin/ownerships/", get(list_ownerships).post(create_ownership))
        .route(
            "/admin/ownerships/{id}",
            get(get_ownership).put(update_ownership).delete(delete_ownership),
        )
        .route("/admin/service-records/", get(list_service_records).post(create_service_record))
        .route(
            "/admin/service-records/{id}",
            get(get_service_record)
                .put(update_service_record)
                .delete(delete_service_record),
        )
}

async fn index(State(admin): State<AdminService>) -> Json<&'static [AdminModel]> {
    Json(admin.models())
}

// Manufacturers

async fn list_manufacturers(
    State(admin): State<AdminService>,
    Query(filter): Query<ManufacturerFilter>,
) -> Result<Json<AdminList<Manufacturer>>, AppError> {
    Ok(Json(admin.list_manufacturers(&filter).await?))
}

async fn create_manufacturer(
    State(admin): State<AdminService>,
    Json(input): Json<ManufacturerInput>,
) -> Result<(StatusCode, Json<Manufacturer>), AppError> {
    Ok((StatusCode::CREATED, Json(admin.create_manufacturer(input).await?)))
}

async fn get_manufacturer(
    State(admin): State<AdminService>,
    Path(id): Path<i64>,
) -> Result<Json<Manufacturer>, AppError> {
    Ok(Json(admin.get_manufacturer(id).await?))
}

async fn update_manufacturer(
    State(admin): State<AdminService>,
    Path(id): Path<i64>,
    Json(input): Json<ManufacturerInput>,
) -> Result<Json<Manufacturer>, AppError> {
    Ok(Json(admin.update_manufacturer(id, input).await?))
}

async fn delete_manufacturer(
    State(admin): State<AdminService>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    admin.delete_manufacturer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Cars

async fn list_cars(
    State(admin): State<AdminService>,
    Query(filter): Query<CarFilter>,
) -> Result<Json<AdminList<CarDetail>>, AppError> {
    Ok(Json(admin.list_cars(&filter).await?))
}

async fn create_car(
    State(admin): State<AdminService>,
    Json(input): Json<CarInput>,
) -> Result<(StatusCode, Json<Car>), AppError> {
    Ok((StatusCode::CREATED, Json(admin.create_car(input).await?)))
}

async fn get_car(
    State(admin): State<AdminService>,
    Path(id): Path<i64>,
) -> Result<Json<CarDetail>, AppError> {
    Ok(Json(admin.get_car(id).await?))
}

async fn update_car(
    State(admin): State<AdminService>,
    Path(id): Path<i64>,
    Json(input): Json<CarInput>,
) -> Result<Json<Car>, AppError> {
    Ok(Json(admin.update_car(id, input).await?))
}

async fn delete_car(
    State(admin): State<AdminService>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    admin.delete_car(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Owners

async fn list_owners(
    State(admin): State<AdminService>,
    Query(filter): Query<OwnerFilter>,
) -> Result<Json<AdminList<Owner>>, AppError> {
    Ok(Json(admin.list_owners(&filter).await?))
}

async fn create_owner(
    State(admin): State<AdminService>,
    Json(input): Json<OwnerInput>,
) -> Result<(StatusCode, Json<Owner>), AppError> {
    Ok((StatusCode::CREATED, Json(admin.create_owner(input).await?)))
}

async fn get_owner(
    State(admin): State<AdminService>,
    Path(id): Path<i64>,
) -> Result<Json<OwnerDetail>, AppError> {
    Ok(Json(admin.get_owner(id).await?))
}

async fn update_owner(
    State(admin): State<AdminService>,
    Path(id): Path<i64>,
    Json(input): Json<OwnerInput>,
) -> Result<Json<Owner>, AppError> {
    Ok(Json(admin.update_owner(id, input).await?))
}

async fn delete_owner(
    State(admin): State<AdminService>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    admin.delete_owner(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Ownerships

async fn list_ownerships(
    State(admin): State<AdminService>,
    Query(filter): Query<OwnershipFilter>,
) -> Result<Json<AdminList<Ownership>>, AppError> {
    Ok(Json(admin.list_ownerships(&filter).await?))
}

async fn create_ownership(
    State(admin): State<AdminService>,
    Json(input): Json<OwnershipInput>,
) -> Result<(StatusCode, Json<Ownership>), AppError> {
    Ok((StatusCode::CREATED, Json(admin.create_ownership(input).await?)))
}

async fn get_ownership(
    State(admin): State<AdminService>,
    Path(id): Path<i64>,
) -> Result<Json<Ownership>, AppError> {
    Ok(Json(admin.get_ownership(id).await?))
}

async fn update_ownership(
    State(admin): State<AdminService>,
    Path(id): Path<i64>,
    Json(input): Json<OwnershipInput>,
) -> Result<Json<Ownership>, AppError> {
    Ok(Json(admin.update_ownership(id, input).await?))
}

async fn delete_ownership(
    State(admin): State<AdminService>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    admin.delete_ownership(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Service records

async fn list_service_records(
    State(admin): State<AdminService>,
    Query(filter): Query<ServiceRecordFilter>,
) -> Result<Json<AdminList<ServiceRecordDetail>>, AppError> {
    Ok(Json(admin.list_service_records(&filter).await?))
}

async fn create_service_record(
    State(admin): State<AdminService>,
    Json(input): Json<ServiceRecordInput>,
) -> Result<(StatusCode, Json<ServiceRecord>), AppError> {
    Ok((StatusCode::CREATED, Json(admin.create_service_record(input).await?)))
}

async fn get_service_record(
    State(admin): State<AdminService>,
    Path(id): Path<i64>,
) -> Result<Json<ServiceRecordDetail>, AppError> {
    Ok(Json(admin.get_service_record(id).await?))
}

async fn update_service_record(
    State(admin): State<AdminService>,
    Path(id): Path<i64>,
    Json(input): Json<ServiceRecordInput>,
) -> Result<Json<ServiceRecord>, AppError> {
    Ok(Json(admin.update_service_record(id, input).await?))
}

async fn delete_service_record(
    State(admin): State<AdminService>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    admin.delete_service_record(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
