use chrono::{Duration, NaiveDate};
use std::sync::Arc;

use crate::constants::{
    API_NAME, DASHBOARD_RECENT_CARS, DASHBOARD_RECENT_SERVICE, RECENT_SERVICE_WINDOW_DAYS,
    STATISTICS_TOP_N,
};
use crate::error::AppError;
use crate::models::{
    BodyType, CarListPage, CarRanking, Country, DashboardPage, FuelType, ManufacturerListPage,
    OwnerListPage, ServiceRecordListPage, ServiceType, StatisticsPage,
};
use crate::repository::{
    CarRepository, DealershipRepository, ManufacturerRepository, OwnerRepository,
    ServiceRecordRepository, StatisticsRepository,
};

/// Read-only queries behind the public pages. Nothing here writes.
#[derive(Clone)]
pub struct ReportingService {
    repo: Arc<dyn DealershipRepository>,
}

impl ReportingService {
    pub fn new(repo: Arc<dyn DealershipRepository>) -> Self {
        Self { repo }
    }

    pub async fn dashboard(&self) -> Result<DashboardPage, AppError> {
        let counts = self.repo.entity_counts().await?;
        let recent_cars = self
            .repo
            .list_cars(None, CarRanking::ProductionYear, Some(DASHBOARD_RECENT_CARS))
            .await?;
        let recent_service = self
            .repo
            .list_service_records(None, Some(DASHBOARD_RECENT_SERVICE))
            .await?;

        Ok(DashboardPage {
            total_cars: counts.cars,
            total_manufacturers: counts.manufacturers,
            total_owners: counts.owners,
            total_service_records: counts.service_records,
            recent_cars,
            recent_service,
        })
    }

    /// All cars, or only those whose body type code equals `body_type`.
    /// An unrecognised code yields an empty list titled with the raw code.
    pub async fn car_list(&self, body_type: Option<&str>) -> Result<CarListPage, AppError> {
        let cars = self
            .repo
            .list_cars(body_type, CarRanking::ProductionYear, None)
            .await?;
        tracing::info!(
            "{} Listing cars (body_type filter: {:?}): {} found",
            API_NAME,
            body_type,
            cars.len()
        );

        let (title, filter_type) = match body_type {
            Some(code) => {
                let label = BodyType::display_for(code);
                (format!("Cars of type: {}", label), Some(label))
            }
            None => ("All cars".to_string(), None),
        };

        Ok(CarListPage {
            title,
            filter_type,
            total_count: cars.len(),
            cars,
            body_types: BodyType::choices(),
            fuel_types: FuelType::choices(),
        })
    }

    pub async fn service_records(&self) -> Result<ServiceRecordListPage, AppError> {
        let records = self.repo.list_service_records(None, None).await?;
        tracing::info!("{} Listing all service records: {} found", API_NAME, records.len());

        Ok(ServiceRecordListPage {
            title: "All service records".to_string(),
            filter_info: None,
            total_count: records.len(),
            records,
            service_types: ServiceType::choices(),
        })
    }

    /// Records dated within the last 30 days of `today`, inclusive, newest first.
    pub async fn recent_service_records(
        &self,
        today: NaiveDate,
    ) -> Result<ServiceRecordListPage, AppError> {
        let since = today - Duration::days(RECENT_SERVICE_WINDOW_DAYS);
        let records = self.repo.list_service_records(Some(since), None).await?;
        tracing::info!(
            "{} Listing service records since {}: {} found",
            API_NAME,
            since,
            records.len()
        );

        Ok(ServiceRecordListPage {
            title: format!("Recent service records (last {} days)", RECENT_SERVICE_WINDOW_DAYS),
            filter_info: Some(format!("Filter: last {} days", RECENT_SERVICE_WINDOW_DAYS)),
            total_count: records.len(),
            records,
            service_types: ServiceType::choices(),
        })
    }

    pub async fn manufacturer_list(
        &self,
        country: Option<&str>,
    ) -> Result<ManufacturerListPage, AppError> {
        let manufacturers = self.repo.list_manufacturers(country).await?;
        tracing::info!(
            "{} Listing manufacturers (country filter: {:?}): {} found",
            API_NAME,
            country,
            manufacturers.len()
        );

        let (title, filter_info) = match country {
            Some(code) => {
                let name = Country::display_for(code);
                (
                    format!("Manufacturers from {}", name),
                    Some(format!("Filter: country - {}", name)),
                )
            }
            None => ("All car manufacturers".to_string(), None),
        };

        Ok(ManufacturerListPage {
            title,
            filter_info,
            total_count: manufacturers.len(),
            manufacturers,
            countries: Country::choices(),
        })
    }

    pub async fn owner_list(&self) -> Result<OwnerListPage, AppError> {
        let owners = self.repo.list_owners(false).await?;
        tracing::info!("{} Listing all owners: {} found", API_NAME, owners.len());

        Ok(OwnerListPage {
            title: "All car owners".to_string(),
            filter_info: None,
            total_count: owners.len(),
            owners,
        })
    }

    /// Owners holding at least one ownership flagged current. Nothing stops
    /// two owners from both being flagged current for the same car; both
    /// are listed in that case.
    pub async fn current_owners(&self) -> Result<OwnerListPage, AppError> {
        let owners = self.repo.list_owners(true).await?;
        tracing::info!("{} Listing current owners: {} found", API_NAME, owners.len());

        Ok(OwnerListPage {
            title: "Current car owners".to_string(),
            filter_info: Some("Filter: current owners".to_string()),
            total_count: owners.len(),
            owners,
        })
    }

    pub async fn statistics(&self) -> Result<StatisticsPage, AppError> {
        let manufacturers_stats = self.repo.manufacturer_stats().await?;
        let body_type_stats = self.repo.body_type_stats().await?;
        let fuel_stats = self.repo.fuel_type_stats().await?;
        let most_expensive_cars = self
            .repo
            .list_cars(None, CarRanking::Price, Some(STATISTICS_TOP_N))
            .await?;
        let most_powerful_cars = self
            .repo
            .list_cars(None, CarRanking::Horsepower, Some(STATISTICS_TOP_N))
            .await?;
        let counts = self.repo.entity_counts().await?;
        let avg_car_price = self.repo.average_car_price().await?.unwrap_or_default();

        tracing::info!(
            "{} Statistics computed over {} cars and {} manufacturers",
            API_NAME,
            counts.cars,
            manufacturers_stats.len()
        );

        Ok(StatisticsPage {
            manufacturers_stats,
            body_type_stats,
            fuel_stats,
            most_expensive_cars,
            most_powerful_cars,
            total_cars: counts.cars,
            avg_car_price,
            total_owners: counts.owners,
        })
    }
}
