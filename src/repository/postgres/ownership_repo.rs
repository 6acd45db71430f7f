use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

use super::{like_pattern, PgRepository, OWNERSHIP_COLUMNS};
use crate::models::{Ownership, OwnershipFilter, OwnershipInput};
use crate::repository::{search_term, OwnershipRepository, RepoResult};

#[async_trait]
impl OwnershipRepository for PgRepository {
    async fn search_ownerships(&self, filter: &OwnershipFilter) -> RepoResult<Vec<Ownership>> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT os.id, os.owner_id, os.car_id, os.purchase_date, os.purchase_price, \
             os.is_current_owner, os.mileage_at_purchase FROM ownerships os \
             JOIN owners o ON o.id = os.owner_id JOIN cars c ON c.id = os.car_id WHERE TRUE",
        );
        if let Some(current) = filter.is_current_owner {
            qb.push(" AND os.is_current_owner = ").push_bind(current);
        }
        if let Some(date) = filter.purchase_date {
            qb.push(" AND os.purchase_date = ").push_bind(date);
        }
        if let Some(term) = search_term(&filter.q) {
            let pattern = like_pattern(term);
            qb.push(" AND (o.first_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR o.last_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR c.model_name ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        qb.push(" ORDER BY os.id");

        let ownerships = qb.build_query_as::<Ownership>().fetch_all(&self.pool).await?;
        Ok(ownerships)
    }

    async fn get_ownership(&self, id: i64) -> RepoResult<Option<Ownership>> {
        let query = format!("SELECT {} FROM ownerships WHERE id = $1", OWNERSHIP_COLUMNS);
        let ownership = sqlx::query_as::<_, Ownership>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(ownership)
    }

    async fn create_ownership(&self, input: OwnershipInput) -> RepoResult<Ownership> {
        let query = format!(
            "INSERT INTO ownerships (owner_id, car_id, purchase_date, purchase_price, is_current_owner, \
             mileage_at_purchase) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            OWNERSHIP_COLUMNS
        );
        let ownership = sqlx::query_as::<_, Ownership>(&query)
            .bind(input.owner_id)
            .bind(input.car_id)
            .bind(input.purchase_date)
            .bind(input.purchase_price)
            .bind(input.is_current_owner)
            .bind(input.mileage_at_purchase)
            .fetch_one(&self.pool)
            .await?;
        Ok(ownership)
    }

    async fn update_ownership(&self, id: i64, input: OwnershipInput) -> RepoResult<Option<Ownership>> {
        let query = format!(
            "UPDATE ownerships SET owner_id = $1, car_id = $2, purchase_date = $3, purchase_price = $4, \
             is_current_owner = $5, mileage_at_purchase = $6 WHERE id = $7 RETURNING {}",
            OWNERSHIP_COLUMNS
        );
        let ownership = sqlx::query_as::<_, Ownership>(&query)
            .bind(input.owner_id)
            .bind(input.car_id)
            .bind(input.purchase_date)
            .bind(input.purchase_price)
            .bind(input.is_current_owner)
            .bind(input.mileage_at_purchase)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(ownership)
    }

    async fn delete_ownership(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM ownerships WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
