//! In-process backend with the same filtering, cascade and constraint
//! behavior as the Postgres schema. Used by the test suites.
//!
//! Text columns sort by byte order here, while Postgres follows the database
//! collation, so names differing only in case may order differently.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{
    search_term, CarRepository, ManufacturerRepository, OwnerRepository, OwnershipRepository,
    RepoResult, RepositoryError, ServiceRecordRepository, StatisticsRepository,
};
use crate::models::numeric::average;
use crate::models::{
    BodyType, BodyTypeStats, Car, CarDetail, CarFilter, CarInput, CarRanking, CarSummary,
    EntityCounts, FuelType, FuelTypeStats, Manufacturer, ManufacturerFilter, ManufacturerInput,
    ManufacturerStats, ManufacturerSummary, Owner, OwnerDetail, OwnerFilter, OwnerInput,
    OwnerWithCars, Ownership, OwnershipFilter, OwnershipInput, ServiceRecord, ServiceRecordDetail,
    ServiceRecordFilter, ServiceRecordInput,
};

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Debug, Default)]
struct Tables {
    manufacturers: Table<Manufacturer>,
    cars: Table<Car>,
    owners: Table<Owner>,
    ownerships: Table<Ownership>,
    service_records: Table<ServiceRecord>,
}

impl Tables {
    fn car_detail(&self, car: &Car) -> Option<CarDetail> {
        let manufacturer = self.manufacturers.rows.get(&car.manufacturer_id)?;
        Some(CarDetail {
            car: car.clone(),
            manufacturer: ManufacturerSummary::from(manufacturer),
        })
    }

    fn car_summary(&self, car_id: i64) -> Option<CarSummary> {
        let car = self.cars.rows.get(&car_id)?;
        let manufacturer = self.manufacturers.rows.get(&car.manufacturer_id)?;
        Some(CarSummary::new(car, manufacturer))
    }

    fn service_detail(&self, record: &ServiceRecord) -> Option<ServiceRecordDetail> {
        Some(ServiceRecordDetail {
            record: record.clone(),
            car: self.car_summary(record.car_id)?,
        })
    }

    fn owned_cars(&self, owner_id: i64) -> Vec<CarSummary> {
        let mut cars: Vec<CarSummary> = self
            .ownerships
            .rows
            .values()
            .filter(|os| os.owner_id == owner_id)
            .filter_map(|os| self.car_summary(os.car_id))
            .collect();
        cars.sort_by(|a, b| {
            b.production_year
                .cmp(&a.production_year)
                .then(a.id.cmp(&b.id))
        });
        cars
    }

    fn manufacturer_name(&self, id: i64) -> &str {
        self.manufacturers
            .rows
            .get(&id)
            .map(|m| m.name.as_str())
            .unwrap_or_default()
    }

    fn require_manufacturer(&self, id: i64) -> RepoResult<()> {
        if self.manufacturers.rows.contains_key(&id) {
            Ok(())
        } else {
            Err(missing_reference("manufacturer_id", id))
        }
    }

    fn require_car(&self, id: i64) -> RepoResult<()> {
        if self.cars.rows.contains_key(&id) {
            Ok(())
        } else {
            Err(missing_reference("car_id", id))
        }
    }

    fn require_owner(&self, id: i64) -> RepoResult<()> {
        if self.owners.rows.contains_key(&id) {
            Ok(())
        } else {
            Err(missing_reference("owner_id", id))
        }
    }

    fn ensure_unique_vin(&self, vin_code: &str, except: Option<i64>) -> RepoResult<()> {
        let taken = self
            .cars
            .rows
            .values()
            .any(|c| c.vin_code == vin_code && Some(c.id) != except);
        if taken {
            return Err(RepositoryError::Duplicate(format!(
                "Key (vin_code)=({}) already exists.",
                vin_code
            )));
        }
        Ok(())
    }

    fn ensure_unique_pair(&self, owner_id: i64, car_id: i64, except: Option<i64>) -> RepoResult<()> {
        let taken = self
            .ownerships
            .rows
            .values()
            .any(|os| os.owner_id == owner_id && os.car_id == car_id && Some(os.id) != except);
        if taken {
            return Err(RepositoryError::Duplicate(format!(
                "Key (owner_id, car_id)=({}, {}) already exists.",
                owner_id, car_id
            )));
        }
        Ok(())
    }

    fn delete_car_cascade(&mut self, id: i64) -> bool {
        self.ownerships.rows.retain(|_, os| os.car_id != id);
        self.service_records.rows.retain(|_, s| s.car_id != id);
        self.cars.rows.remove(&id).is_some()
    }
}

fn missing_reference(column: &str, id: i64) -> RepositoryError {
    RepositoryError::Constraint(format!("Key ({})=({}) is not present.", column, id))
}

/// Case-insensitive substring match, the in-memory counterpart of ILIKE.
fn matches_term(term: &str, fields: &[&str]) -> bool {
    let needle = term.to_lowercase();
    fields.iter().any(|f| f.to_lowercase().contains(&needle))
}

fn sort_ranked(cars: &mut [CarDetail], ranking: CarRanking) {
    cars.sort_by(|a, b| {
        let primary = match ranking {
            CarRanking::ProductionYear => b.car.production_year.cmp(&a.car.production_year),
            CarRanking::Price => b.car.price.cmp(&a.car.price),
            CarRanking::Horsepower => b.car.horsepower.cmp(&a.car.horsepower),
        };
        primary.then(a.car.id.cmp(&b.car.id))
    });
}

fn sort_newest_first(records: &mut [ServiceRecordDetail]) {
    records.sort_by(|a, b| {
        b.record
            .service_date
            .cmp(&a.record.service_date)
            .then(b.record.id.cmp(&a.record.id))
    });
}

fn truncate<T>(rows: &mut Vec<T>, limit: Option<i64>) {
    if let Some(limit) = limit {
        rows.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
    }
}

#[derive(Clone, Default)]
pub struct MemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ManufacturerRepository for MemoryRepository {
    async fn list_manufacturers(&self, country: Option<&str>) -> RepoResult<Vec<Manufacturer>> {
        let tables = self.tables.read().await;
        let mut manufacturers: Vec<Manufacturer> = tables
            .manufacturers
            .rows
            .values()
            .filter(|m| country.map_or(true, |code| m.country.code() == code))
            .cloned()
            .collect();
        manufacturers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(manufacturers)
    }

    async fn search_manufacturers(&self, filter: &ManufacturerFilter) -> RepoResult<Vec<Manufacturer>> {
        let tables = self.tables.read().await;
        let term = search_term(&filter.q);
        let mut manufacturers: Vec<Manufacturer> = tables
            .manufacturers
            .rows
            .values()
            .filter(|m| filter.country.as_deref().map_or(true, |c| m.country.code() == c))
            .filter(|m| filter.founded_year.map_or(true, |y| m.founded_year == y))
            .filter(|m| term.map_or(true, |t| matches_term(t, &[&m.name, m.country.code()])))
            .cloned()
            .collect();
        manufacturers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(manufacturers)
    }

    async fn get_manufacturer(&self, id: i64) -> RepoResult<Option<Manufacturer>> {
        Ok(self.tables.read().await.manufacturers.rows.get(&id).cloned())
    }

    async fn create_manufacturer(&self, input: ManufacturerInput) -> RepoResult<Manufacturer> {
        let mut tables = self.tables.write().await;
        let id = tables.manufacturers.next_id();
        let manufacturer = Manufacturer::from_input(id, input);
        tables.manufacturers.rows.insert(id, manufacturer.clone());
        Ok(manufacturer)
    }

    async fn update_manufacturer(
        &self,
        id: i64,
        input: ManufacturerInput,
    ) -> RepoResult<Option<Manufacturer>> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables.manufacturers.rows.get_mut(&id) else {
            return Ok(None);
        };
        *row = Manufacturer::from_input(id, input);
        Ok(Some(row.clone()))
    }

    async fn delete_manufacturer(&self, id: i64) -> RepoResult<bool> {
        let mut tables = self.tables.write().await;
        let car_ids: Vec<i64> = tables
            .cars
            .rows
            .values()
            .filter(|c| c.manufacturer_id == id)
            .map(|c| c.id)
            .collect();
        for car_id in car_ids {
            tables.delete_car_cascade(car_id);
        }
        Ok(tables.manufacturers.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl CarRepository for MemoryRepository {
    async fn list_cars(
        &self,
        body_type: Option<&str>,
        ranking: CarRanking,
        limit: Option<i64>,
    ) -> RepoResult<Vec<CarDetail>> {
        let tables = self.tables.read().await;
        let mut cars: Vec<CarDetail> = tables
            .cars
            .rows
            .values()
            .filter(|c| body_type.map_or(true, |bt| c.body_type.code() == bt))
            .filter_map(|c| tables.car_detail(c))
            .collect();
        sort_ranked(&mut cars, ranking);
        truncate(&mut cars, limit);
        Ok(cars)
    }

    async fn search_cars(&self, filter: &CarFilter) -> RepoResult<Vec<CarDetail>> {
        let tables = self.tables.read().await;
        let term = search_term(&filter.q);
        let mut cars: Vec<CarDetail> = tables
            .cars
            .rows
            .values()
            .filter(|c| filter.body_type.as_deref().map_or(true, |bt| c.body_type.code() == bt))
            .filter(|c| filter.fuel_type.as_deref().map_or(true, |ft| c.fuel_type.code() == ft))
            .filter(|c| filter.manufacturer_id.map_or(true, |id| c.manufacturer_id == id))
            .filter(|c| {
                term.map_or(true, |t| {
                    matches_term(
                        t,
                        &[&c.model_name, &c.vin_code, tables.manufacturer_name(c.manufacturer_id)],
                    )
                })
            })
            .filter_map(|c| tables.car_detail(c))
            .collect();
        cars.sort_by(|a, b| a.car.model_name.cmp(&b.car.model_name).then(a.car.id.cmp(&b.car.id)));
        Ok(cars)
    }

    async fn get_car(&self, id: i64) -> RepoResult<Option<CarDetail>> {
        let tables = self.tables.read().await;
        Ok(tables.cars.rows.get(&id).and_then(|c| tables.car_detail(c)))
    }

    async fn create_car(&self, input: CarInput) -> RepoResult<Car> {
        let mut tables = self.tables.write().await;
        tables.require_manufacturer(input.manufacturer_id)?;
        tables.ensure_unique_vin(&input.vin_code, None)?;
        let id = tables.cars.next_id();
        let car = Car::from_input(id, input);
        tables.cars.rows.insert(id, car.clone());
        Ok(car)
    }

    async fn update_car(&self, id: i64, input: CarInput) -> RepoResult<Option<Car>> {
        let mut tables = self.tables.write().await;
        if !tables.cars.rows.contains_key(&id) {
            return Ok(None);
        }
        tables.require_manufacturer(input.manufacturer_id)?;
        tables.ensure_unique_vin(&input.vin_code, Some(id))?;
        let car = Car::from_input(id, input);
        tables.cars.rows.insert(id, car.clone());
        Ok(Some(car))
    }

    async fn delete_car(&self, id: i64) -> RepoResult<bool> {
        Ok(self.tables.write().await.delete_car_cascade(id))
    }
}

#[async_trait]
impl OwnerRepository for MemoryRepository {
    async fn list_owners(&self, current_only: bool) -> RepoResult<Vec<OwnerWithCars>> {
        let tables = self.tables.read().await;
        let current: HashSet<i64> = tables
            .ownerships
            .rows
            .values()
            .filter(|os| os.is_current_owner)
            .map(|os| os.owner_id)
            .collect();
        Ok(tables
            .owners
            .rows
            .values()
            .filter(|o| !current_only || current.contains(&o.id))
            .map(|o| OwnerWithCars {
                owner: o.clone(),
                owned_cars: tables.owned_cars(o.id),
            })
            .collect())
    }

    async fn search_owners(&self, filter: &OwnerFilter) -> RepoResult<Vec<Owner>> {
        let tables = self.tables.read().await;
        let term = search_term(&filter.q);
        Ok(tables
            .owners
            .rows
            .values()
            .filter(|o| filter.gender.as_deref().map_or(true, |g| o.gender.code() == g))
            .filter(|o| filter.registration_date.map_or(true, |d| o.registration_date == d))
            .filter(|o| term.map_or(true, |t| matches_term(t, &[&o.first_name, &o.last_name, &o.email])))
            .cloned()
            .collect())
    }

    async fn get_owner(&self, id: i64) -> RepoResult<Option<OwnerDetail>> {
        let tables = self.tables.read().await;
        Ok(tables.owners.rows.get(&id).map(|owner| OwnerDetail {
            owner: owner.clone(),
            ownerships: tables
                .ownerships
                .rows
                .values()
                .filter(|os| os.owner_id == id)
                .cloned()
                .collect(),
        }))
    }

    async fn create_owner(&self, input: OwnerInput) -> RepoResult<Owner> {
        let mut tables = self.tables.write().await;
        let id = tables.owners.next_id();
        let owner = Owner::from_input(id, input);
        tables.owners.rows.insert(id, owner.clone());
        Ok(owner)
    }

    async fn update_owner(&self, id: i64, input: OwnerInput) -> RepoResult<Option<Owner>> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables.owners.rows.get_mut(&id) else {
            return Ok(None);
        };
        *row = Owner::from_input(id, input);
        Ok(Some(row.clone()))
    }

    async fn delete_owner(&self, id: i64) -> RepoResult<bool> {
        let mut tables = self.tables.write().await;
        tables.ownerships.rows.retain(|_, os| os.owner_id != id);
        Ok(tables.owners.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl OwnershipRepository for MemoryRepository {
    async fn search_ownerships(&self, filter: &OwnershipFilter) -> RepoResult<Vec<Ownership>> {
        let tables = self.tables.read().await;
        let term = search_term(&filter.q);
        Ok(tables
            .ownerships
            .rows
            .values()
            .filter(|os| filter.is_current_owner.map_or(true, |c| os.is_current_owner == c))
            .filter(|os| filter.purchase_date.map_or(true, |d| os.purchase_date == d))
            .filter(|os| {
                term.map_or(true, |t| {
                    let owner = tables.owners.rows.get(&os.owner_id);
                    let car = tables.cars.rows.get(&os.car_id);
                    matches_term(
                        t,
                        &[
                            owner.map(|o| o.first_name.as_str()).unwrap_or_default(),
                            owner.map(|o| o.last_name.as_str()).unwrap_or_default(),
                            car.map(|c| c.model_name.as_str()).unwrap_or_default(),
                        ],
                    )
                })
            })
            .cloned()
            .collect())
    }

    async fn get_ownership(&self, id: i64) -> RepoResult<Option<Ownership>> {
        Ok(self.tables.read().await.ownerships.rows.get(&id).cloned())
    }

    async fn create_ownership(&self, input: OwnershipInput) -> RepoResult<Ownership> {
        let mut tables = self.tables.write().await;
        tables.require_owner(input.owner_id)?;
        tables.require_car(input.car_id)?;
        tables.ensure_unique_pair(input.owner_id, input.car_id, None)?;
        let id = tables.ownerships.next_id();
        let ownership = Ownership::from_input(id, input);
        tables.ownerships.rows.insert(id, ownership.clone());
        Ok(ownership)
    }

    async fn update_ownership(&self, id: i64, input: OwnershipInput) -> RepoResult<Option<Ownership>> {
        let mut tables = self.tables.write().await;
        if !tables.ownerships.rows.contains_key(&id) {
            return Ok(None);
        }
        tables.require_owner(input.owner_id)?;
        tables.require_car(input.car_id)?;
        tables.ensure_unique_pair(input.owner_id, input.car_id, Some(id))?;
        let ownership = Ownership::from_input(id, input);
        tables.ownerships.rows.insert(id, ownership.clone());
        Ok(Some(ownership))
    }

    async fn delete_ownership(&self, id: i64) -> RepoResult<bool> {
        Ok(self.tables.write().await.ownerships.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl ServiceRecordRepository for MemoryRepository {
    async fn list_service_records(
        &self,
        since: Option<NaiveDate>,
        limit: Option<i64>,
    ) -> RepoResult<Vec<ServiceRecordDetail>> {
        let tables = self.tables.read().await;
        let mut records: Vec<ServiceRecordDetail> = tables
            .service_records
            .rows
            .values()
            .filter(|s| since.map_or(true, |d| s.service_date >= d))
            .filter_map(|s| tables.service_detail(s))
            .collect();
        sort_newest_first(&mut records);
        truncate(&mut records, limit);
        Ok(records)
    }

    async fn search_service_records(
        &self,
        filter: &ServiceRecordFilter,
    ) -> RepoResult<Vec<ServiceRecordDetail>> {
        let tables = self.tables.read().await;
        let term = search_term(&filter.q);
        let mut records: Vec<ServiceRecordDetail> = tables
            .service_records
            .rows
            .values()
            .filter(|s| filter.service_type.as_deref().map_or(true, |st| s.service_type.code() == st))
            .filter(|s| filter.service_date.map_or(true, |d| s.service_date == d))
            .filter_map(|s| tables.service_detail(s))
            .filter(|d| {
                term.map_or(true, |t| {
                    matches_term(
                        t,
                        &[&d.car.model_name, &d.record.service_center, &d.record.description],
                    )
                })
            })
            .collect();
        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn get_service_record(&self, id: i64) -> RepoResult<Option<ServiceRecordDetail>> {
        let tables = self.tables.read().await;
        Ok(tables
            .service_records
            .rows
            .get(&id)
            .and_then(|s| tables.service_detail(s)))
    }

    async fn create_service_record(&self, input: ServiceRecordInput) -> RepoResult<ServiceRecord> {
        let mut tables = self.tables.write().await;
        tables.require_car(input.car_id)?;
        let id = tables.service_records.next_id();
        let record = ServiceRecord::from_input(id, input);
        tables.service_records.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn update_service_record(
        &self,
        id: i64,
        input: ServiceRecordInput,
    ) -> RepoResult<Option<ServiceRecord>> {
        let mut tables = self.tables.write().await;
        if !tables.service_records.rows.contains_key(&id) {
            return Ok(None);
        }
        tables.require_car(input.car_id)?;
        let record = ServiceRecord::from_input(id, input);
        tables.service_records.rows.insert(id, record.clone());
        Ok(Some(record))
    }

    async fn delete_service_record(&self, id: i64) -> RepoResult<bool> {
        Ok(self.tables.write().await.service_records.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl StatisticsRepository for MemoryRepository {
    async fn entity_counts(&self) -> RepoResult<EntityCounts> {
        let tables = self.tables.read().await;
        Ok(EntityCounts {
            manufacturers: tables.manufacturers.rows.len() as i64,
            cars: tables.cars.rows.len() as i64,
            owners: tables.owners.rows.len() as i64,
            service_records: tables.service_records.rows.len() as i64,
        })
    }

    async fn manufacturer_stats(&self) -> RepoResult<Vec<ManufacturerStats>> {
        let tables = self.tables.read().await;
        let mut stats: Vec<ManufacturerStats> = tables
            .manufacturers
            .rows
            .values()
            .map(|m| {
                let cars: Vec<&Car> = tables
                    .cars
                    .rows
                    .values()
                    .filter(|c| c.manufacturer_id == m.id)
                    .collect();
                ManufacturerStats {
                    manufacturer: m.clone(),
                    car_count: cars.len() as i64,
                    avg_price: average(cars.iter().map(|c| c.price)),
                    max_horsepower: cars.iter().map(|c| c.horsepower).max(),
                }
            })
            .collect();
        stats.sort_by(|a, b| {
            a.manufacturer
                .name
                .cmp(&b.manufacturer.name)
                .then(a.manufacturer.id.cmp(&b.manufacturer.id))
        });
        Ok(stats)
    }

    async fn body_type_stats(&self) -> RepoResult<Vec<BodyTypeStats>> {
        let tables = self.tables.read().await;
        let mut groups: HashMap<BodyType, Vec<&Car>> = HashMap::new();
        for car in tables.cars.rows.values() {
            groups.entry(car.body_type).or_default().push(car);
        }
        let mut stats: Vec<BodyTypeStats> = groups
            .into_iter()
            .map(|(body_type, cars)| BodyTypeStats {
                body_type,
                count: cars.len() as i64,
                avg_price: average(cars.iter().map(|c| c.price)).unwrap_or_default(),
                avg_horsepower: average(cars.iter().map(|c| Decimal::from(c.horsepower)))
                    .unwrap_or_default(),
            })
            .collect();
        stats.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then(a.body_type.code().cmp(b.body_type.code()))
        });
        Ok(stats)
    }

    async fn fuel_type_stats(&self) -> RepoResult<Vec<FuelTypeStats>> {
        let tables = self.tables.read().await;
        let mut groups: HashMap<FuelType, Vec<&Car>> = HashMap::new();
        for car in tables.cars.rows.values() {
            groups.entry(car.fuel_type).or_default().push(car);
        }
        let mut stats: Vec<FuelTypeStats> = groups
            .into_iter()
            .map(|(fuel_type, cars)| FuelTypeStats {
                fuel_type,
                count: cars.len() as i64,
                avg_price: average(cars.iter().map(|c| c.price)).unwrap_or_default(),
                avg_year: average(cars.iter().map(|c| Decimal::from(c.production_year)))
                    .unwrap_or_default(),
            })
            .collect();
        stats.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then(a.fuel_type.code().cmp(b.fuel_type.code()))
        });
        Ok(stats)
    }

    async fn average_car_price(&self) -> RepoResult<Option<Decimal>> {
        let tables = self.tables.read().await;
        Ok(average(tables.cars.rows.values().map(|c| c.price)))
    }
}
