use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

use super::{like_pattern, PgRepository, MANUFACTURER_COLUMNS};
use crate::models::{Manufacturer, ManufacturerFilter, ManufacturerInput};
use crate::repository::{search_term, ManufacturerRepository, RepoResult};

#[async_trait]
impl ManufacturerRepository for PgRepository {
    async fn list_manufacturers(&self, country: Option<&str>) -> RepoResult<Vec<Manufacturer>> {
        let query = format!(
            "SELECT {} FROM manufacturers WHERE ($1::text IS NULL OR country = $1) ORDER BY name, id",
            MANUFACTURER_COLUMNS
        );
        let manufacturers = sqlx::query_as::<_, Manufacturer>(&query)
            .bind(country)
            .fetch_all(&self.pool)
            .await?;
        Ok(manufacturers)
    }

    async fn search_manufacturers(&self, filter: &ManufacturerFilter) -> RepoResult<Vec<Manufacturer>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM manufacturers WHERE TRUE",
            MANUFACTURER_COLUMNS
        ));
        if let Some(country) = &filter.country {
            qb.push(" AND country = ").push_bind(country.clone());
        }
        if let Some(year) = filter.founded_year {
            qb.push(" AND founded_year = ").push_bind(year);
        }
        if let Some(term) = search_term(&filter.q) {
            let pattern = like_pattern(term);
            qb.push(" AND (name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR country ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        qb.push(" ORDER BY name, id");

        let manufacturers = qb
            .build_query_as::<Manufacturer>()
            .fetch_all(&self.pool)
            .await?;
        Ok(manufacturers)
    }

    async fn get_manufacturer(&self, id: i64) -> RepoResult<Option<Manufacturer>> {
        let query = format!("SELECT {} FROM manufacturers WHERE id = $1", MANUFACTURER_COLUMNS);
        let manufacturer = sqlx::query_as::<_, Manufacturer>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(manufacturer)
    }

    async fn create_manufacturer(&self, input: ManufacturerInput) -> RepoResult<Manufacturer> {
        let query = format!(
            "INSERT INTO manufacturers (name, country, founded_year, headquarters, website, description) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            MANUFACTURER_COLUMNS
        );
        let manufacturer = sqlx::query_as::<_, Manufacturer>(&query)
            .bind(&input.name)
            .bind(input.country.code())
            .bind(input.founded_year)
            .bind(&input.headquarters)
            .bind(&input.website)
            .bind(&input.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(manufacturer)
    }

    async fn update_manufacturer(
        &self,
        id: i64,
        input: ManufacturerInput,
    ) -> RepoResult<Option<Manufacturer>> {
        let query = format!(
            "UPDATE manufacturers SET name = $1, country = $2, founded_year = $3, headquarters = $4, \
             website = $5, description = $6 WHERE id = $7 RETURNING {}",
            MANUFACTURER_COLUMNS
        );
        let manufacturer = sqlx::query_as::<_, Manufacturer>(&query)
            .bind(&input.name)
            .bind(input.country.code())
            .bind(input.founded_year)
            .bind(&input.headquarters)
            .bind(&input.website)
            .bind(&input.description)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(manufacturer)
    }

    async fn delete_manufacturer(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM manufacturers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
