use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Postgres, QueryBuilder};

use super::{like_pattern, PgRepository, CAR_SUMMARY_COLUMNS, SERVICE_RECORD_COLUMNS};
use crate::models::{ServiceRecord, ServiceRecordDetail, ServiceRecordFilter, ServiceRecordInput};
use crate::repository::{search_term, RepoResult, ServiceRecordRepository};

fn detail_select() -> String {
    format!(
        "SELECT s.id, s.car_id, s.service_type, s.service_date, s.cost, s.service_center, \
         s.description, s.mileage, {} FROM service_records s \
         JOIN cars c ON c.id = s.car_id \
         JOIN manufacturers m ON m.id = c.manufacturer_id",
        CAR_SUMMARY_COLUMNS
    )
}

#[async_trait]
impl ServiceRecordRepository for PgRepository {
    async fn list_service_records(
        &self,
        since: Option<NaiveDate>,
        limit: Option<i64>,
    ) -> RepoResult<Vec<ServiceRecordDetail>> {
        let mut qb = QueryBuilder::<Postgres>::new(detail_select());
        if let Some(since) = since {
            qb.push(" WHERE s.service_date >= ").push_bind(since);
        }
        qb.push(" ORDER BY s.service_date DESC, s.id DESC");
        if let Some(limit) = limit {
            qb.push(" LIMIT ").push_bind(limit);
        }

        let records = qb
            .build_query_as::<ServiceRecordDetail>()
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn search_service_records(
        &self,
        filter: &ServiceRecordFilter,
    ) -> RepoResult<Vec<ServiceRecordDetail>> {
        let mut qb = QueryBuilder::<Postgres>::new(detail_select());
        qb.push(" WHERE TRUE");
        if let Some(service_type) = &filter.service_type {
            qb.push(" AND s.service_type = ").push_bind(service_type.clone());
        }
        if let Some(date) = filter.service_date {
            qb.push(" AND s.service_date = ").push_bind(date);
        }
        if let Some(term) = search_term(&filter.q) {
            let pattern = like_pattern(term);
            qb.push(" AND (c.model_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR s.service_center ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR s.description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        qb.push(" ORDER BY s.service_date DESC, s.id DESC");

        let records = qb
            .build_query_as::<ServiceRecordDetail>()
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn get_service_record(&self, id: i64) -> RepoResult<Option<ServiceRecordDetail>> {
        let query = format!("{} WHERE s.id = $1", detail_select());
        let record = sqlx::query_as::<_, ServiceRecordDetail>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn create_service_record(&self, input: ServiceRecordInput) -> RepoResult<ServiceRecord> {
        let query = format!(
            "INSERT INTO service_records (car_id, service_type, service_date, cost, service_center, \
             description, mileage) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            SERVICE_RECORD_COLUMNS
        );
        let record = sqlx::query_as::<_, ServiceRecord>(&query)
            .bind(input.car_id)
            .bind(input.service_type.code())
            .bind(input.service_date)
            .bind(input.cost)
            .bind(&input.service_center)
            .bind(&input.description)
            .bind(input.mileage)
            .fetch_one(&self.pool)
            .await?;
        Ok(record)
    }

    async fn update_service_record(
        &self,
        id: i64,
        input: ServiceRecordInput,
    ) -> RepoResult<Option<ServiceRecord>> {
        let query = format!(
            "UPDATE service_records SET car_id = $1, service_type = $2, service_date = $3, cost = $4, \
             service_center = $5, description = $6, mileage = $7 WHERE id = $8 RETURNING {}",
            SERVICE_RECORD_COLUMNS
        );
        let record = sqlx::query_as::<_, ServiceRecord>(&query)
            .bind(input.car_id)
            .bind(input.service_type.code())
            .bind(input.service_date)
            .bind(input.cost)
            .bind(&input.service_center)
            .bind(&input.description)
            .bind(input.mileage)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn delete_service_record(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM service_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
