pub mod admin;
pub mod reporting;

pub use admin::{AdminList, AdminModel, AdminService, ADMIN_MODELS};
pub use reporting::ReportingService;

#[cfg(test)]
mod test_fixtures;

#[cfg(test)]
mod reporting_test;
