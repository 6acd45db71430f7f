use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use validator::Validate;

use super::car::CarSummary;
use super::choices::Gender;
use super::numeric::{to_scale, validate_price, MONEY_SCALE};
use super::trim_field;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Owner {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub gender: Gender,
    pub phone: String,
    pub email: String,
    pub registration_date: NaiveDate,
}

impl Owner {
    pub fn from_input(id: i64, input: OwnerInput) -> Self {
        Self {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
            birth_date: input.birth_date,
            gender: input.gender,
            phone: input.phone,
            email: input.email,
            registration_date: input.registration_date,
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OwnerInput {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    #[validate(length(max = 15))]
    pub phone: String,
    #[validate(email, length(max = 254))]
    pub email: String,
    pub registration_date: NaiveDate,
}

impl OwnerInput {
    pub fn normalized(mut self) -> Self {
        trim_field(&mut self.first_name);
        trim_field(&mut self.last_name);
        trim_field(&mut self.phone);
        trim_field(&mut self.email);
        self
    }
}

/// An owner with every car they have held, current or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerWithCars {
    #[serde(flatten)]
    pub owner: Owner,
    pub owned_cars: Vec<CarSummary>,
}

/// Admin detail view: the owner plus their ownership rows inline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerDetail {
    #[serde(flatten)]
    pub owner: Owner,
    pub ownerships: Vec<Ownership>,
}

/// Join entity between [`Owner`] and a car, unique per (owner, car) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Ownership {
    pub id: i64,
    pub owner_id: i64,
    pub car_id: i64,
    pub purchase_date: NaiveDate,
    pub purchase_price: Decimal,
    pub is_current_owner: bool,
    pub mileage_at_purchase: i32,
}

impl Ownership {
    pub fn from_input(id: i64, input: OwnershipInput) -> Self {
        Self {
            id,
            owner_id: input.owner_id,
            car_id: input.car_id,
            purchase_date: input.purchase_date,
            purchase_price: input.purchase_price,
            is_current_owner: input.is_current_owner,
            mileage_at_purchase: input.mileage_at_purchase,
        }
    }
}

fn default_current() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OwnershipInput {
    pub owner_id: i64,
    pub car_id: i64,
    pub purchase_date: NaiveDate,
    #[validate(custom(function = "validate_price"))]
    pub purchase_price: Decimal,
    #[serde(default = "default_current")]
    pub is_current_owner: bool,
    #[validate(range(min = 0))]
    pub mileage_at_purchase: i32,
}

impl OwnershipInput {
    pub fn normalized(mut self) -> Self {
        self.purchase_price = to_scale(self.purchase_price, MONEY_SCALE);
        self
    }
}

/// Admin list query: `?q=&gender=&registration_date=`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnerFilter {
    pub q: Option<String>,
    pub gender: Option<String>,
    pub registration_date: Option<NaiveDate>,
}

/// Admin list query: `?q=&is_current_owner=&purchase_date=`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnershipFilter {
    pub q: Option<String>,
    pub is_current_owner: Option<bool>,
    pub purchase_date: Option<NaiveDate>,
}
