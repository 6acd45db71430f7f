use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{
    Car, CarDetail, CarFilter, CarInput, Manufacturer, ManufacturerFilter, ManufacturerInput, Owner,
    OwnerDetail, OwnerFilter, OwnerInput, Ownership, OwnershipFilter, OwnershipInput, ServiceRecord,
    ServiceRecordDetail, ServiceRecordFilter, ServiceRecordInput,
};
use crate::repository::{
    CarRepository, DealershipRepository, ManufacturerRepository, OwnerRepository,
    OwnershipRepository, ServiceRecordRepository,
};

/// How a model is presented in the admin listing.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AdminModel {
    pub name: &'static str,
    pub verbose_name: &'static str,
    pub verbose_name_plural: &'static str,
    pub list_display: &'static [&'static str],
    pub list_filter: &'static [&'static str],
    pub search_fields: &'static [&'static str],
    pub ordering: &'static [&'static str],
}

pub const MANUFACTURER_ADMIN: AdminModel = AdminModel {
    name: "manufacturers",
    verbose_name: "Manufacturer",
    verbose_name_plural: "Manufacturers",
    list_display: &["name", "country"],
    list_filter: &["country", "founded_year"],
    search_fields: &["name", "country"],
    ordering: &["name"],
};

pub const CAR_ADMIN: AdminModel = AdminModel {
    name: "cars",
    verbose_name: "Car",
    verbose_name_plural: "Cars",
    list_display: &["model_name", "manufacturer", "production_year"],
    list_filter: &["body_type", "fuel_type", "manufacturer_id"],
    search_fields: &["model_name", "vin_code", "manufacturer__name"],
    ordering: &["model_name"],
};

pub const OWNER_ADMIN: AdminModel = AdminModel {
    name: "owners",
    verbose_name: "Owner",
    verbose_name_plural: "Owners",
    list_display: &["first_name", "last_name", "registration_date"],
    list_filter: &["gender", "registration_date"],
    search_fields: &["first_name", "last_name", "email"],
    ordering: &["id"],
};

pub const OWNERSHIP_ADMIN: AdminModel = AdminModel {
    name: "ownerships",
    verbose_name: "Ownership",
    verbose_name_plural: "Ownerships",
    list_display: &["owner_id", "car_id", "purchase_date"],
    list_filter: &["is_current_owner", "purchase_date"],
    search_fields: &["owner__first_name", "owner__last_name", "car__model_name"],
    ordering: &["id"],
};

pub const SERVICE_RECORD_ADMIN: AdminModel = AdminModel {
    name: "service-records",
    verbose_name: "Service record",
    verbose_name_plural: "Service records",
    list_display: &["car", "service_type", "service_date"],
    list_filter: &["service_type", "service_date"],
    search_fields: &["car__model_name", "service_center", "description"],
    ordering: &["-service_date"],
};

pub const ADMIN_MODELS: &[AdminModel] = &[
    MANUFACTURER_ADMIN,
    CAR_ADMIN,
    OWNER_ADMIN,
    OWNERSHIP_ADMIN,
    SERVICE_RECORD_ADMIN,
];

#[derive(Debug, Clone, Serialize)]
pub struct AdminList<T> {
    pub model: &'static str,
    pub list_display: &'static [&'static str],
    pub count: usize,
    pub results: Vec<T>,
}

impl<T> AdminList<T> {
    fn new(admin: &AdminModel, results: Vec<T>) -> Self {
        Self {
            model: admin.name,
            list_display: admin.list_display,
            count: results.len(),
            results,
        }
    }
}

fn not_found(kind: &str, id: i64) -> AppError {
    AppError::NotFound(format!("{} with id {} not found", kind, id))
}

/// Create/read/update/delete over the five entities. Inputs are trimmed,
/// decimals brought to column scale, and the result validated before it
/// reaches storage.
#[derive(Clone)]
pub struct AdminService {
    repo: Arc<dyn DealershipRepository>,
}

impl AdminService {
    pub fn new(repo: Arc<dyn DealershipRepository>) -> Self {
        Self { repo }
    }

    pub fn models(&self) -> &'static [AdminModel] {
        ADMIN_MODELS
    }

    // Manufacturers

    pub async fn list_manufacturers(
        &self,
        filter: &ManufacturerFilter,
    ) -> Result<AdminList<Manufacturer>, AppError> {
        let rows = self.repo.search_manufacturers(filter).await?;
        Ok(AdminList::new(&MANUFACTURER_ADMIN, rows))
    }

    pub async fn get_manufacturer(&self, id: i64) -> Result<Manufacturer, AppError> {
        self.repo
            .get_manufacturer(id)
            .await?
            .ok_or_else(|| not_found("Manufacturer", id))
    }

    pub async fn create_manufacturer(&self, input: ManufacturerInput) -> Result<Manufacturer, AppError> {
        let input = input.normalized();
        input.validate()?;
        let manufacturer = self.repo.create_manufacturer(input).await?;
        tracing::info!("{} Created manufacturer: {} ({})", API_NAME, manufacturer.name, manufacturer.id);
        Ok(manufacturer)
    }

    pub async fn update_manufacturer(
        &self,
        id: i64,
        input: ManufacturerInput,
    ) -> Result<Manufacturer, AppError> {
        let input = input.normalized();
        input.validate()?;
        let manufacturer = self
            .repo
            .update_manufacturer(id, input)
            .await?
            .ok_or_else(|| not_found("Manufacturer", id))?;
        tracing::info!("{} Updated manufacturer: {}", API_NAME, id);
        Ok(manufacturer)
    }

    pub async fn delete_manufacturer(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.delete_manufacturer(id).await? {
            return Err(not_found("Manufacturer", id));
        }
        tracing::info!("{} Deleted manufacturer: {}", API_NAME, id);
        Ok(())
    }

    // Cars

    pub async fn list_cars(&self, filter: &CarFilter) -> Result<AdminList<CarDetail>, AppError> {
        let rows = self.repo.search_cars(filter).await?;
        Ok(AdminList::new(&CAR_ADMIN, rows))
    }

    pub async fn get_car(&self, id: i64) -> Result<CarDetail, AppError> {
        self.repo.get_car(id).await?.ok_or_else(|| not_found("Car", id))
    }

    pub async fn create_car(&self, input: CarInput) -> Result<Car, AppError> {
        let input = input.normalized();
        input.validate()?;
        let car = self.repo.create_car(input).await?;
        tracing::info!("{} Created car: {} ({})", API_NAME, car.vin_code, car.id);
        Ok(car)
    }

    pub async fn update_car(&self, id: i64, input: CarInput) -> Result<Car, AppError> {
        let input = input.normalized();
        input.validate()?;
        let car = self
            .repo
            .update_car(id, input)
            .await?
            .ok_or_else(|| not_found("Car", id))?;
        tracing::info!("{} Updated car: {}", API_NAME, id);
        Ok(car)
    }

    pub async fn delete_car(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.delete_car(id).await? {
            return Err(not_found("Car", id));
        }
        tracing::info!("{} Deleted car: {}", API_NAME, id);
        Ok(())
    }

    // Owners

    pub async fn list_owners(&self, filter: &OwnerFilter) -> Result<AdminList<Owner>, AppError> {
        let rows = self.repo.search_owners(filter).await?;
        Ok(AdminList::new(&OWNER_ADMIN, rows))
    }

    pub async fn get_owner(&self, id: i64) -> Result<OwnerDetail, AppError> {
        self.repo.get_owner(id).await?.ok_or_else(|| not_found("Owner", id))
    }

    pub async fn create_owner(&self, input: OwnerInput) -> Result<Owner, AppError> {
        let input = input.normalized();
        input.validate()?;
        let owner = self.repo.create_owner(input).await?;
        tracing::info!("{} Created owner: {} ({})", API_NAME, owner, owner.id);
        Ok(owner)
    }

    pub async fn update_owner(&self, id: i64, input: OwnerInput) -> Result<Owner, AppError> {
        let input = input.normalized();
        input.validate()?;
        let owner = self
            .repo
            .update_owner(id, input)
            .await?
            .ok_or_else(|| not_found("Owner", id))?;
        tracing::info!("{} Updated owner: {}", API_NAME, id);
        Ok(owner)
    }

    pub async fn delete_owner(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.delete_owner(id).await? {
            return Err(not_found("Owner", id));
        }
        tracing::info!("{} Deleted owner: {}", API_NAME, id);
        Ok(())
    }

    // Ownerships

    pub async fn list_ownerships(
        &self,
        filter: &OwnershipFilter,
    ) -> Result<AdminList<Ownership>, AppError> {
        let rows = self.repo.search_ownerships(filter).await?;
        Ok(AdminList::new(&OWNERSHIP_ADMIN, rows))
    }

    pub async fn get_ownership(&self, id: i64) -> Result<Ownership, AppError> {
        self.repo
            .get_ownership(id)
            .await?
            .ok_or_else(|| not_found("Ownership", id))
    }

    pub async fn create_ownership(&self, input: OwnershipInput) -> Result<Ownership, AppError> {
        let input = input.normalized();
        input.validate()?;
        let ownership = self.repo.create_ownership(input).await?;
        tracing::info!(
            "{} Created ownership {}: owner {} -> car {} (current: {})",
            API_NAME,
            ownership.id,
            ownership.owner_id,
            ownership.car_id,
            ownership.is_current_owner
        );
        Ok(ownership)
    }

    pub async fn update_ownership(&self, id: i64, input: OwnershipInput) -> Result<Ownership, AppError> {
        let input = input.normalized();
        input.validate()?;
        let ownership = self
            .repo
            .update_ownership(id, input)
            .await?
            .ok_or_else(|| not_found("Ownership", id))?;
        tracing::info!("{} Updated ownership: {}", API_NAME, id);
        Ok(ownership)
    }

    pub async fn delete_ownership(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.delete_ownership(id).await? {
            return Err(not_found("Ownership", id));
        }
        tracing::info!("{} Deleted ownership: {}", API_NAME, id);
        Ok(())
    }

    // Service records

    pub async fn list_service_records(
        &self,
        filter: &ServiceRecordFilter,
    ) -> Result<AdminList<ServiceRecordDetail>, AppError> {
        let rows = self.repo.search_service_records(filter).await?;
        Ok(AdminList::new(&SERVICE_RECORD_ADMIN, rows))
    }

    pub async fn get_service_record(&self, id: i64) -> Result<ServiceRecordDetail, AppError> {
        self.repo
            .get_service_record(id)
            .await?
            .ok_or_else(|| not_found("Service record", id))
    }

    pub async fn create_service_record(
        &self,
        input: ServiceRecordInput,
    ) -> Result<ServiceRecord, AppError> {
        let input = input.normalized();
        input.validate()?;
        let record = self.repo.create_service_record(input).await?;
        tracing::info!(
            "{} Created service record {} for car {}",
            API_NAME,
            record.id,
            record.car_id
        );
        Ok(record)
    }

    pub async fn update_service_record(
        &self,
        id: i64,
        input: ServiceRecordInput,
    ) -> Result<ServiceRecord, AppError> {
        let input = input.normalized();
        input.validate()?;
        let record = self
            .repo
            .update_service_record(id, input)
            .await?
            .ok_or_else(|| not_found("Service record", id))?;
        tracing::info!("{} Updated service record: {}", API_NAME, id);
        Ok(record)
    }

    pub async fn delete_service_record(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.delete_service_record(id).await? {
            return Err(not_found("Service record", id));
        }
        tracing::info!("{} Deleted service record: {}", API_NAME, id);
        Ok(())
    }
}
