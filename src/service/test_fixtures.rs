use chrono::NaiveDate;
use std::sync::Arc;

use super::{AdminService, ReportingService};
use crate::models::{
    BodyType, CarInput, Country, FuelType, Gender, ManufacturerInput, OwnerInput, OwnershipInput,
    ServiceRecordInput, ServiceType,
};
use crate::repository::{DealershipRepository, MemoryRepository};

pub fn services() -> (ReportingService, AdminService) {
    let repo: Arc<dyn DealershipRepository> = Arc::new(MemoryRepository::new());
    (ReportingService::new(repo.clone()), AdminService::new(repo))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn manufacturer(name: &str, country: Country) -> ManufacturerInput {
    ManufacturerInput {
        name: name.to_string(),
        country,
        founded_year: 1950,
        headquarters: format!("{} HQ", name),
        website: format!("https://{}.example.com", name.to_lowercase()),
        description: String::new(),
    }
}

pub struct CarSpec<'a> {
    pub model: &'a str,
    pub vin: &'a str,
    pub body: BodyType,
    pub fuel: FuelType,
    pub price: &'a str,
    pub horsepower: i32,
    pub year: i32,
}

impl Default for CarSpec<'_> {
    fn default() -> Self {
        Self {
            model: "Corolla",
            vin: "JTDBR32E720000001",
            body: BodyType::Sedan,
            fuel: FuelType::Petrol,
            price: "20000.00",
            horsepower: 130,
            year: 2020,
        }
    }
}

pub fn car(manufacturer_id: i64, spec: CarSpec<'_>) -> CarInput {
    CarInput {
        model_name: spec.model.to_string(),
        manufacturer_id,
        production_year: spec.year,
        body_type: spec.body,
        engine_volume: "1.8".parse().unwrap(),
        horsepower: spec.horsepower,
        fuel_type: spec.fuel,
        price: spec.price.parse().unwrap(),
        color: "White".to_string(),
        vin_code: spec.vin.to_string(),
    }
}

pub fn owner(first: &str, last: &str) -> OwnerInput {
    OwnerInput {
        first_name: first.to_string(),
        last_name: last.to_string(),
        birth_date: date(1985, 6, 15),
        gender: Gender::Other,
        phone: "+10000000000".to_string(),
        email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
        registration_date: date(2024, 1, 10),
    }
}

pub fn ownership(owner_id: i64, car_id: i64, current: bool) -> OwnershipInput {
    OwnershipInput {
        owner_id,
        car_id,
        purchase_date: date(2023, 3, 1),
        purchase_price: "19000.00".parse().unwrap(),
        is_current_owner: current,
        mileage_at_purchase: 1000,
    }
}

pub fn service_record(car_id: i64, service_date: NaiveDate, service_type: ServiceType) -> ServiceRecordInput {
    ServiceRecordInput {
        car_id,
        service_type,
        service_date,
        cost: "150.00".parse().unwrap(),
        service_center: "Central Service".to_string(),
        description: "Routine work".to_string(),
        mileage: 30000,
    }
}
