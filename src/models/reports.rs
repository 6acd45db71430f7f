//! Response bundles for the reporting pages. Each one carries the result sets
//! plus the display metadata (choice lists, counts, titles) a renderer needs.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use super::car::CarDetail;
use super::choices::{BodyType, Choice, FuelType};
use super::manufacturer::Manufacturer;
use super::owner::OwnerWithCars;
use super::service_record::ServiceRecordDetail;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, FromRow)]
pub struct EntityCounts {
    pub manufacturers: i64,
    pub cars: i64,
    pub owners: i64,
    pub service_records: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardPage {
    pub total_cars: i64,
    pub total_manufacturers: i64,
    pub total_owners: i64,
    pub total_service_records: i64,
    pub recent_cars: Vec<CarDetail>,
    pub recent_service: Vec<ServiceRecordDetail>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CarListPage {
    pub title: String,
    pub filter_type: Option<String>,
    pub cars: Vec<CarDetail>,
    pub total_count: usize,
    pub body_types: Vec<Choice>,
    pub fuel_types: Vec<Choice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManufacturerListPage {
    pub title: String,
    pub filter_info: Option<String>,
    pub manufacturers: Vec<Manufacturer>,
    pub total_count: usize,
    pub countries: Vec<Choice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OwnerListPage {
    pub title: String,
    pub filter_info: Option<String>,
    pub owners: Vec<OwnerWithCars>,
    pub total_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceRecordListPage {
    pub title: String,
    pub filter_info: Option<String>,
    pub records: Vec<ServiceRecordDetail>,
    pub total_count: usize,
    pub service_types: Vec<Choice>,
}

/// Per-manufacturer aggregates. Manufacturers without cars report a zero
/// count and null average/maximum.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ManufacturerStats {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub manufacturer: Manufacturer,
    pub car_count: i64,
    pub avg_price: Option<Decimal>,
    pub max_horsepower: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct BodyTypeStats {
    #[sqlx(try_from = "String")]
    pub body_type: BodyType,
    pub count: i64,
    pub avg_price: Decimal,
    pub avg_horsepower: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct FuelTypeStats {
    #[sqlx(try_from = "String")]
    pub fuel_type: FuelType,
    pub count: i64,
    pub avg_price: Decimal,
    pub avg_year: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatisticsPage {
    pub manufacturers_stats: Vec<ManufacturerStats>,
    pub body_type_stats: Vec<BodyTypeStats>,
    pub fuel_stats: Vec<FuelTypeStats>,
    pub most_expensive_cars: Vec<CarDetail>,
    pub most_powerful_cars: Vec<CarDetail>,
    pub total_cars: i64,
    pub avg_car_price: Decimal,
    pub total_owners: i64,
}
