use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use validator::Validate;

use super::choices::{decode_choice, Country};
use super::trim_field;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Manufacturer {
    pub id: i64,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub country: Country,
    pub founded_year: i32,
    pub headquarters: String,
    pub website: String,
    pub description: String,
}

impl Manufacturer {
    pub fn from_input(id: i64, input: ManufacturerInput) -> Self {
        Self {
            id,
            name: input.name,
            country: input.country,
            founded_year: input.founded_year,
            headquarters: input.headquarters,
            website: input.website,
            description: input.description,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ManufacturerInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub country: Country,
    pub founded_year: i32,
    #[validate(length(max = 100))]
    pub headquarters: String,
    #[validate(url, length(max = 200))]
    pub website: String,
    #[serde(default)]
    pub description: String,
}

impl ManufacturerInput {
    pub fn normalized(mut self) -> Self {
        trim_field(&mut self.name);
        trim_field(&mut self.headquarters);
        trim_field(&mut self.website);
        self
    }
}

/// The manufacturer columns joined onto car rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManufacturerSummary {
    pub id: i64,
    pub name: String,
    pub country: Country,
}

impl From<&Manufacturer> for ManufacturerSummary {
    fn from(m: &Manufacturer) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            country: m.country,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for ManufacturerSummary {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("manufacturer_id")?,
            name: row.try_get("manufacturer_name")?,
            country: decode_choice(row, "manufacturer_country")?,
        })
    }
}

/// Admin list query: `?q=&country=&founded_year=`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManufacturerFilter {
    pub q: Option<String>,
    pub country: Option<String>,
    pub founded_year: Option<i32>,
}
