use async_trait::async_trait;
use rust_decimal::Decimal;

use super::PgRepository;
use crate::models::{BodyTypeStats, EntityCounts, FuelTypeStats, ManufacturerStats};
use crate::repository::{RepoResult, StatisticsRepository};

#[async_trait]
impl StatisticsRepository for PgRepository {
    async fn entity_counts(&self) -> RepoResult<EntityCounts> {
        let counts = sqlx::query_as::<_, EntityCounts>(
            "SELECT (SELECT COUNT(*) FROM manufacturers) AS manufacturers, \
                    (SELECT COUNT(*) FROM cars) AS cars, \
                    (SELECT COUNT(*) FROM owners) AS owners, \
                    (SELECT COUNT(*) FROM service_records) AS service_records",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(counts)
    }

    async fn manufacturer_stats(&self) -> RepoResult<Vec<ManufacturerStats>> {
        let stats = sqlx::query_as::<_, ManufacturerStats>(
            "SELECT m.id, m.name, m.country, m.founded_year, m.headquarters, m.website, m.description, \
                    COUNT(c.id) AS car_count, \
                    ROUND(AVG(c.price), 2) AS avg_price, \
                    MAX(c.horsepower) AS max_horsepower \
             FROM manufacturers m LEFT JOIN cars c ON c.manufacturer_id = m.id \
             GROUP BY m.id ORDER BY m.name, m.id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(stats)
    }

    async fn body_type_stats(&self) -> RepoResult<Vec<BodyTypeStats>> {
        let stats = sqlx::query_as::<_, BodyTypeStats>(
            "SELECT body_type, COUNT(*) AS count, \
                    ROUND(AVG(price), 2) AS avg_price, \
                    ROUND(AVG(horsepower), 2) AS avg_horsepower \
             FROM cars GROUP BY body_type ORDER BY count DESC, body_type",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(stats)
    }

    async fn fuel_type_stats(&self) -> RepoResult<Vec<FuelTypeStats>> {
        let stats = sqlx::query_as::<_, FuelTypeStats>(
            "SELECT fuel_type, COUNT(*) AS count, \
                    ROUND(AVG(price), 2) AS avg_price, \
                    ROUND(AVG(production_year), 2) AS avg_year \
             FROM cars GROUP BY fuel_type ORDER BY count DESC, fuel_type",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(stats)
    }

    async fn average_car_price(&self) -> RepoResult<Option<Decimal>> {
        let avg = sqlx::query_scalar::<_, Option<Decimal>>("SELECT ROUND(AVG(price), 2) FROM cars")
            .fetch_one(&self.pool)
            .await?;
        Ok(avg)
    }
}
