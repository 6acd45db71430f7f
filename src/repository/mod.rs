//! Storage seam. Services talk to `dyn DealershipRepository`; the Postgres
//! backend is used in production and the in-memory backend in tests.

mod errors;
mod memory;
mod postgres;

pub use errors::RepositoryError;
pub use memory::MemoryRepository;
pub use postgres::PgRepository;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{
    BodyTypeStats, Car, CarDetail, CarFilter, CarInput, CarRanking, EntityCounts, FuelTypeStats,
    Manufacturer, ManufacturerFilter, ManufacturerInput, ManufacturerStats, Owner, OwnerDetail,
    OwnerFilter, OwnerInput, OwnerWithCars, Ownership, OwnershipFilter, OwnershipInput,
    ServiceRecord, ServiceRecordDetail, ServiceRecordFilter, ServiceRecordInput,
};

pub type RepoResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait ManufacturerRepository: Send + Sync {
    /// Ordered by name; `country` is matched exactly against the stored code.
    async fn list_manufacturers(&self, country: Option<&str>) -> RepoResult<Vec<Manufacturer>>;
    async fn search_manufacturers(&self, filter: &ManufacturerFilter) -> RepoResult<Vec<Manufacturer>>;
    async fn get_manufacturer(&self, id: i64) -> RepoResult<Option<Manufacturer>>;
    async fn create_manufacturer(&self, input: ManufacturerInput) -> RepoResult<Manufacturer>;
    async fn update_manufacturer(&self, id: i64, input: ManufacturerInput) -> RepoResult<Option<Manufacturer>>;
    /// Cascades to the manufacturer's cars.
    async fn delete_manufacturer(&self, id: i64) -> RepoResult<bool>;
}

#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Cars with their manufacturer, sorted descending on `ranking` then by id.
    async fn list_cars(
        &self,
        body_type: Option<&str>,
        ranking: CarRanking,
        limit: Option<i64>,
    ) -> RepoResult<Vec<CarDetail>>;
    async fn search_cars(&self, filter: &CarFilter) -> RepoResult<Vec<CarDetail>>;
    async fn get_car(&self, id: i64) -> RepoResult<Option<CarDetail>>;
    async fn create_car(&self, input: CarInput) -> RepoResult<Car>;
    async fn update_car(&self, id: i64, input: CarInput) -> RepoResult<Option<Car>>;
    /// Cascades to ownerships and service records.
    async fn delete_car(&self, id: i64) -> RepoResult<bool>;
}

#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// With `current_only`, restricted to owners holding at least one
    /// ownership flagged current.
    async fn list_owners(&self, current_only: bool) -> RepoResult<Vec<OwnerWithCars>>;
    async fn search_owners(&self, filter: &OwnerFilter) -> RepoResult<Vec<Owner>>;
    async fn get_owner(&self, id: i64) -> RepoResult<Option<OwnerDetail>>;
    async fn create_owner(&self, input: OwnerInput) -> RepoResult<Owner>;
    async fn update_owner(&self, id: i64, input: OwnerInput) -> RepoResult<Option<Owner>>;
    async fn delete_owner(&self, id: i64) -> RepoResult<bool>;
}

#[async_trait]
pub trait OwnershipRepository: Send + Sync {
    async fn search_ownerships(&self, filter: &OwnershipFilter) -> RepoResult<Vec<Ownership>>;
    async fn get_ownership(&self, id: i64) -> RepoResult<Option<Ownership>>;
    async fn create_ownership(&self, input: OwnershipInput) -> RepoResult<Ownership>;
    async fn update_ownership(&self, id: i64, input: OwnershipInput) -> RepoResult<Option<Ownership>>;
    async fn delete_ownership(&self, id: i64) -> RepoResult<bool>;
}

#[async_trait]
pub trait ServiceRecordRepository: Send + Sync {
    /// Newest first. `since` keeps records dated on or after it.
    async fn list_service_records(
        &self,
        since: Option<NaiveDate>,
        limit: Option<i64>,
    ) -> RepoResult<Vec<ServiceRecordDetail>>;
    async fn search_service_records(
        &self,
        filter: &ServiceRecordFilter,
    ) -> RepoResult<Vec<ServiceRecordDetail>>;
    async fn get_service_record(&self, id: i64) -> RepoResult<Option<ServiceRecordDetail>>;
    async fn create_service_record(&self, input: ServiceRecordInput) -> RepoResult<ServiceRecord>;
    async fn update_service_record(
        &self,
        id: i64,
        input: ServiceRecordInput,
    ) -> RepoResult<Option<ServiceRecord>>;
    async fn delete_service_record(&self, id: i64) -> RepoResult<bool>;
}

#[async_trait]
pub trait StatisticsRepository: Send + Sync {
    async fn entity_counts(&self) -> RepoResult<EntityCounts>;
    async fn manufacturer_stats(&self) -> RepoResult<Vec<ManufacturerStats>>;
    /// Ordered by count descending.
    async fn body_type_stats(&self) -> RepoResult<Vec<BodyTypeStats>>;
    /// Ordered by count descending.
    async fn fuel_type_stats(&self) -> RepoResult<Vec<FuelTypeStats>>;
    /// `None` when there are no cars.
    async fn average_car_price(&self) -> RepoResult<Option<Decimal>>;
}

pub trait DealershipRepository:
    ManufacturerRepository
    + CarRepository
    + OwnerRepository
    + OwnershipRepository
    + ServiceRecordRepository
    + StatisticsRepository
{
}

impl<T> DealershipRepository for T where
    T: ManufacturerRepository
        + CarRepository
        + OwnerRepository
        + OwnershipRepository
        + ServiceRecordRepository
        + StatisticsRepository
{
}

/// Trimmed, non-empty search text.
pub(crate) fn search_term(q: &Option<String>) -> Option<&str> {
    q.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_ignored() {
        assert_eq!(search_term(&None), None);
        assert_eq!(search_term(&Some("   ".into())), None);
        assert_eq!(search_term(&Some(" civic ".into())), Some("civic"));
    }
}
