mod car_repo;
mod manufacturer_repo;
mod owner_repo;
mod ownership_repo;
mod service_record_repo;
mod statistics_repo;

use sqlx::PgPool;

use crate::models::CarRanking;

#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(super) const MANUFACTURER_COLUMNS: &str =
    "id, name, country, founded_year, headquarters, website, description";

pub(super) const CAR_COLUMNS: &str = "id, manufacturer_id, model_name, production_year, body_type, \
     engine_volume, horsepower, fuel_type, price, color, vin_code";

pub(super) const CAR_DETAIL_SELECT: &str = "SELECT c.id, c.manufacturer_id, c.model_name, \
     c.production_year, c.body_type, c.engine_volume, c.horsepower, c.fuel_type, c.price, \
     c.color, c.vin_code, m.name AS manufacturer_name, m.country AS manufacturer_country \
     FROM cars c JOIN manufacturers m ON m.id = c.manufacturer_id";

/// Columns decoded by `CarSummary`'s row mapping, given `c` and `m` aliases.
pub(super) const CAR_SUMMARY_COLUMNS: &str = "c.id AS car_id, c.model_name AS car_model_name, \
     c.production_year AS car_production_year, c.vin_code AS car_vin_code, \
     m.id AS manufacturer_id, m.name AS manufacturer_name, m.country AS manufacturer_country";

pub(super) const OWNER_COLUMNS: &str =
    "id, first_name, last_name, birth_date, gender, phone, email, registration_date";

pub(super) const OWNERSHIP_COLUMNS: &str =
    "id, owner_id, car_id, purchase_date, purchase_price, is_current_owner, mileage_at_purchase";

pub(super) const SERVICE_RECORD_COLUMNS: &str =
    "id, car_id, service_type, service_date, cost, service_center, description, mileage";

pub(super) fn car_order_by(ranking: CarRanking) -> &'static str {
    match ranking {
        CarRanking::ProductionYear => " ORDER BY c.production_year DESC, c.id",
        CarRanking::Price => " ORDER BY c.price DESC, c.id",
        CarRanking::Horsepower => " ORDER BY c.horsepower DESC, c.id",
    }
}

/// `%term%` for ILIKE with the pattern metacharacters escaped.
pub(super) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
