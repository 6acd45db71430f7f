use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

use super::{car_order_by, like_pattern, PgRepository, CAR_COLUMNS, CAR_DETAIL_SELECT};
use crate::models::{Car, CarDetail, CarFilter, CarInput, CarRanking};
use crate::repository::{search_term, CarRepository, RepoResult};

#[async_trait]
impl CarRepository for PgRepository {
    async fn list_cars(
        &self,
        body_type: Option<&str>,
        ranking: CarRanking,
        limit: Option<i64>,
    ) -> RepoResult<Vec<CarDetail>> {
        let mut qb = QueryBuilder::<Postgres>::new(CAR_DETAIL_SELECT);
        if let Some(body_type) = body_type {
            qb.push(" WHERE c.body_type = ").push_bind(body_type.to_string());
        }
        qb.push(car_order_by(ranking));
        if let Some(limit) = limit {
            qb.push(" LIMIT ").push_bind(limit);
        }

        let cars = qb.build_query_as::<CarDetail>().fetch_all(&self.pool).await?;
        Ok(cars)
    }

    async fn search_cars(&self, filter: &CarFilter) -> RepoResult<Vec<CarDetail>> {
        let mut qb = QueryBuilder::<Postgres>::new(CAR_DETAIL_SELECT);
        qb.push(" WHERE TRUE");
        if let Some(body_type) = &filter.body_type {
            qb.push(" AND c.body_type = ").push_bind(body_type.clone());
        }
        if let Some(fuel_type) = &filter.fuel_type {
            qb.push(" AND c.fuel_type = ").push_bind(fuel_type.clone());
        }
        if let Some(manufacturer_id) = filter.manufacturer_id {
            qb.push(" AND c.manufacturer_id = ").push_bind(manufacturer_id);
        }
        if let Some(term) = search_term(&filter.q) {
            let pattern = like_pattern(term);
            qb.push(" AND (c.model_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR c.vin_code ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR m.name ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        qb.push(" ORDER BY c.model_name, c.id");

        let cars = qb.build_query_as::<CarDetail>().fetch_all(&self.pool).await?;
        Ok(cars)
    }

    async fn get_car(&self, id: i64) -> RepoResult<Option<CarDetail>> {
        let query = format!("{} WHERE c.id = $1", CAR_DETAIL_SELECT);
        let car = sqlx::query_as::<_, CarDetail>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(car)
    }

    async fn create_car(&self, input: CarInput) -> RepoResult<Car> {
        let query = format!(
            "INSERT INTO cars (manufacturer_id, model_name, production_year, body_type, engine_volume, \
             horsepower, fuel_type, price, color, vin_code) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {}",
            CAR_COLUMNS
        );
        let car = sqlx::query_as::<_, Car>(&query)
            .bind(input.manufacturer_id)
            .bind(&input.model_name)
            .bind(input.production_year)
            .bind(input.body_type.code())
            .bind(input.engine_volume)
            .bind(input.horsepower)
            .bind(input.fuel_type.code())
            .bind(input.price)
            .bind(&input.color)
            .bind(&input.vin_code)
            .fetch_one(&self.pool)
            .await?;
        Ok(car)
    }

    async fn update_car(&self, id: i64, input: CarInput) -> RepoResult<Option<Car>> {
        let query = format!(
            "UPDATE cars SET manufacturer_id = $1, model_name = $2, production_year = $3, body_type = $4, \
             engine_volume = $5, horsepower = $6, fuel_type = $7, price = $8, color = $9, vin_code = $10 \
             WHERE id = $11 RETURNING {}",
            CAR_COLUMNS
        );
        let car = sqlx::query_as::<_, Car>(&query)
            .bind(input.manufacturer_id)
            .bind(&input.model_name)
            .bind(input.production_year)
            .bind(input.body_type.code())
            .bind(input.engine_volume)
            .bind(input.horsepower)
            .bind(input.fuel_type.code())
            .bind(input.price)
            .bind(&input.color)
            .bind(&input.vin_code)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(car)
    }

    async fn delete_car(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
