use async_trait::async_trait;
use sqlx::{FromRow, Postgres, QueryBuilder, Row};
use std::collections::HashMap;

use super::{like_pattern, PgRepository, CAR_SUMMARY_COLUMNS, OWNERSHIP_COLUMNS, OWNER_COLUMNS};
use crate::models::{CarSummary, Owner, OwnerDetail, OwnerFilter, OwnerInput, OwnerWithCars, Ownership};
use crate::repository::{search_term, OwnerRepository, RepoResult};

impl PgRepository {
    /// Loads the cars held by each of `owner_ids` in one round trip, newest
    /// production year first.
    async fn owned_cars(&self, owner_ids: &[i64]) -> RepoResult<HashMap<i64, Vec<CarSummary>>> {
        let query = format!(
            "SELECT os.owner_id, {} FROM ownerships os \
             JOIN cars c ON c.id = os.car_id \
             JOIN manufacturers m ON m.id = c.manufacturer_id \
             WHERE os.owner_id = ANY($1) ORDER BY os.owner_id, c.production_year DESC, c.id",
            CAR_SUMMARY_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(owner_ids)
            .fetch_all(&self.pool)
            .await?;

        let mut by_owner: HashMap<i64, Vec<CarSummary>> = HashMap::new();
        for row in &rows {
            let owner_id: i64 = row.try_get("owner_id")?;
            by_owner
                .entry(owner_id)
                .or_default()
                .push(CarSummary::from_row(row)?);
        }
        Ok(by_owner)
    }
}

#[async_trait]
impl OwnerRepository for PgRepository {
    async fn list_owners(&self, current_only: bool) -> RepoResult<Vec<OwnerWithCars>> {
        let query = format!(
            "SELECT {} FROM owners \
             WHERE NOT $1 OR id IN (SELECT DISTINCT owner_id FROM ownerships WHERE is_current_owner) \
             ORDER BY id",
            OWNER_COLUMNS
        );
        let owners = sqlx::query_as::<_, Owner>(&query)
            .bind(current_only)
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<i64> = owners.iter().map(|o| o.id).collect();
        let mut cars = self.owned_cars(&ids).await?;

        Ok(owners
            .into_iter()
            .map(|owner| OwnerWithCars {
                owned_cars: cars.remove(&owner.id).unwrap_or_default(),
                owner,
            })
            .collect())
    }

    async fn search_owners(&self, filter: &OwnerFilter) -> RepoResult<Vec<Owner>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM owners WHERE TRUE", OWNER_COLUMNS));
        if let Some(gender) = &filter.gender {
            qb.push(" AND gender = ").push_bind(gender.clone());
        }
        if let Some(date) = filter.registration_date {
            qb.push(" AND registration_date = ").push_bind(date);
        }
        if let Some(term) = search_term(&filter.q) {
            let pattern = like_pattern(term);
            qb.push(" AND (first_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR last_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR email ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        qb.push(" ORDER BY id");

        let owners = qb.build_query_as::<Owner>().fetch_all(&self.pool).await?;
        Ok(owners)
    }

    async fn get_owner(&self, id: i64) -> RepoResult<Option<OwnerDetail>> {
        let query = format!("SELECT {} FROM owners WHERE id = $1", OWNER_COLUMNS);
        let owner = sqlx::query_as::<_, Owner>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(owner) = owner else {
            return Ok(None);
        };

        let query = format!(
            "SELECT {} FROM ownerships WHERE owner_id = $1 ORDER BY id",
            OWNERSHIP_COLUMNS
        );
        let ownerships = sqlx::query_as::<_, Ownership>(&query)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(Some(OwnerDetail { owner, ownerships }))
    }

    async fn create_owner(&self, input: OwnerInput) -> RepoResult<Owner> {
        let query = format!(
            "INSERT INTO owners (first_name, last_name, birth_date, gender, phone, email, registration_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            OWNER_COLUMNS
        );
        let owner = sqlx::query_as::<_, Owner>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.birth_date)
            .bind(input.gender.code())
            .bind(&input.phone)
            .bind(&input.email)
            .bind(input.registration_date)
            .fetch_one(&self.pool)
            .await?;
        Ok(owner)
    }

    async fn update_owner(&self, id: i64, input: OwnerInput) -> RepoResult<Option<Owner>> {
        let query = format!(
            "UPDATE owners SET first_name = $1, last_name = $2, birth_date = $3, gender = $4, phone = $5, \
             email = $6, registration_date = $7 WHERE id = $8 RETURNING {}",
            OWNER_COLUMNS
        );
        let owner = sqlx::query_as::<_, Owner>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.birth_date)
            .bind(input.gender.code())
            .bind(&input.phone)
            .bind(&input.email)
            .bind(input.registration_date)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }

    async fn delete_owner(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM owners WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
