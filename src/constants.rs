pub const API_NAME: &str = "[dealership-api]";

/// Size of the "recent" window on the service records page.
pub const RECENT_SERVICE_WINDOW_DAYS: i64 = 30;

pub const DASHBOARD_RECENT_CARS: i64 = 5;
pub const DASHBOARD_RECENT_SERVICE: i64 = 3;

/// Length of the most-expensive / most-powerful lists on the statistics page.
pub const STATISTICS_TOP_N: i64 = 5;
