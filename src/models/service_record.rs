use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::FromRow;
use validator::Validate;

use super::car::CarSummary;
use super::choices::ServiceType;
use super::numeric::{to_scale, validate_cost, MONEY_SCALE};
use super::trim_field;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ServiceRecord {
    pub id: i64,
    pub car_id: i64,
    #[sqlx(try_from = "String")]
    pub service_type: ServiceType,
    pub service_date: NaiveDate,
    pub cost: Decimal,
    pub service_center: String,
    pub description: String,
    pub mileage: i32,
}

impl ServiceRecord {
    pub fn from_input(id: i64, input: ServiceRecordInput) -> Self {
        Self {
            id,
            car_id: input.car_id,
            service_type: input.service_type,
            service_date: input.service_date,
            cost: input.cost,
            service_center: input.service_center,
            description: input.description,
            mileage: input.mileage,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServiceRecordInput {
    pub car_id: i64,
    pub service_type: ServiceType,
    pub service_date: NaiveDate,
    #[validate(custom(function = "validate_cost"))]
    pub cost: Decimal,
    #[validate(length(min = 1, max = 100))]
    pub service_center: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0))]
    pub mileage: i32,
}

impl ServiceRecordInput {
    pub fn normalized(mut self) -> Self {
        trim_field(&mut self.service_center);
        self.cost = to_scale(self.cost, MONEY_SCALE);
        self
    }
}

/// A service record with its car (and the car's manufacturer) joined in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceRecordDetail {
    #[serde(flatten)]
    pub record: ServiceRecord,
    pub car: CarSummary,
}

impl<'r> FromRow<'r, PgRow> for ServiceRecordDetail {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            record: ServiceRecord::from_row(row)?,
            car: CarSummary::from_row(row)?,
        })
    }
}

/// Admin list query: `?q=&service_type=&service_date=`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceRecordFilter {
    pub q: Option<String>,
    pub service_type: Option<String>,
    pub service_date: Option<NaiveDate>,
}
