pub mod car;
pub mod choices;
pub mod manufacturer;
pub mod numeric;
pub mod owner;
pub mod reports;
pub mod service_record;

pub use car::{Car, CarDetail, CarFilter, CarInput, CarRanking, CarSummary};
pub use choices::{BodyType, Choice, Country, FuelType, Gender, ServiceType, UnknownChoice};
pub use manufacturer::{Manufacturer, ManufacturerFilter, ManufacturerInput, ManufacturerSummary};
pub use owner::{
    Owner, OwnerDetail, OwnerFilter, OwnerInput, OwnerWithCars, Ownership, OwnershipFilter,
    OwnershipInput,
};
pub use reports::{
    BodyTypeStats, CarListPage, DashboardPage, EntityCounts, FuelTypeStats, ManufacturerListPage,
    ManufacturerStats, OwnerListPage, ServiceRecordListPage, StatisticsPage,
};
pub use service_record::{ServiceRecord, ServiceRecordDetail, ServiceRecordFilter, ServiceRecordInput};

/// Strips surrounding whitespace the way form fields are cleaned before
/// required-field checks.
pub(crate) fn trim_field(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}
