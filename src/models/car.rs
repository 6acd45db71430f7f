use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use validator::Validate;

use super::choices::{BodyType, FuelType};
use super::manufacturer::{Manufacturer, ManufacturerSummary};
use super::trim_field;
use super::numeric::{
    to_scale, validate_engine_volume, validate_price, ENGINE_VOLUME_SCALE, MONEY_SCALE,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Car {
    pub id: i64,
    pub manufacturer_id: i64,
    pub model_name: String,
    pub production_year: i32,
    #[sqlx(try_from = "String")]
    pub body_type: BodyType,
    pub engine_volume: Decimal,
    pub horsepower: i32,
    #[sqlx(try_from = "String")]
    pub fuel_type: FuelType,
    pub price: Decimal,
    pub color: String,
    pub vin_code: String,
}

impl Car {
    /// Expects an already normalized input.
    pub fn from_input(id: i64, input: CarInput) -> Self {
        Self {
            id,
            manufacturer_id: input.manufacturer_id,
            model_name: input.model_name,
            production_year: input.production_year,
            body_type: input.body_type,
            engine_volume: input.engine_volume,
            horsepower: input.horsepower,
            fuel_type: input.fuel_type,
            price: input.price,
            color: input.color,
            vin_code: input.vin_code,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CarInput {
    #[validate(length(min = 1, max = 100))]
    pub model_name: String,
    pub manufacturer_id: i64,
    pub production_year: i32,
    pub body_type: BodyType,
    #[validate(custom(function = "validate_engine_volume"))]
    pub engine_volume: Decimal,
    #[validate(range(min = 0))]
    pub horsepower: i32,
    pub fuel_type: FuelType,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[validate(length(max = 30))]
    pub color: String,
    #[validate(length(min = 1, max = 17))]
    pub vin_code: String,
}

impl CarInput {
    /// Trims text and brings decimals to their column scale so what is stored
    /// is what is read back.
    pub fn normalized(mut self) -> Self {
        trim_field(&mut self.model_name);
        trim_field(&mut self.color);
        trim_field(&mut self.vin_code);
        self.engine_volume = to_scale(self.engine_volume, ENGINE_VOLUME_SCALE);
        self.price = to_scale(self.price, MONEY_SCALE);
        self
    }
}

/// A car with its manufacturer joined in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarDetail {
    #[serde(flatten)]
    pub car: Car,
    pub manufacturer: ManufacturerSummary,
}

impl<'r> FromRow<'r, PgRow> for CarDetail {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            car: Car::from_row(row)?,
            manufacturer: ManufacturerSummary::from_row(row)?,
        })
    }
}

/// Short car reference used inside owner and service record listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarSummary {
    pub id: i64,
    pub model_name: String,
    pub production_year: i32,
    pub vin_code: String,
    pub manufacturer: ManufacturerSummary,
}

impl CarSummary {
    pub fn new(car: &Car, manufacturer: &Manufacturer) -> Self {
        Self {
            id: car.id,
            model_name: car.model_name.clone(),
            production_year: car.production_year,
            vin_code: car.vin_code.clone(),
            manufacturer: manufacturer.into(),
        }
    }
}

impl<'r> FromRow<'r, PgRow> for CarSummary {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("car_id")?,
            model_name: row.try_get("car_model_name")?,
            production_year: row.try_get("car_production_year")?,
            vin_code: row.try_get("car_vin_code")?,
            manufacturer: ManufacturerSummary::from_row(row)?,
        })
    }
}

/// Admin list query: `?q=&body_type=&fuel_type=&manufacturer_id=`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarFilter {
    pub q: Option<String>,
    pub body_type: Option<String>,
    pub fuel_type: Option<String>,
    pub manufacturer_id: Option<i64>,
}

/// Column a car listing is sorted on, always descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarRanking {
    ProductionYear,
    Price,
    Horsepower,
}
