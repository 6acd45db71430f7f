use rust_decimal::Decimal;
use tracing_test::traced_test;

use super::test_fixtures::{car, date, manufacturer, owner, ownership, service_record, services, CarSpec};
use crate::models::{BodyType, Country, FuelType, ServiceType};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[tokio::test]
async fn cars_by_body_type_returns_exactly_the_matching_subset() {
    let (reports, admin) = services();
    let m = admin.create_manufacturer(manufacturer("Toyota", Country::Japan)).await.unwrap();
    admin
        .create_car(car(m.id, CarSpec { vin: "VIN00000000000001", body: BodyType::Sedan, ..Default::default() }))
        .await
        .unwrap();
    admin
        .create_car(car(m.id, CarSpec { vin: "VIN00000000000002", body: BodyType::Suv, ..Default::default() }))
        .await
        .unwrap();
    admin
        .create_car(car(m.id, CarSpec { vin: "VIN00000000000003", body: BodyType::Sedan, ..Default::default() }))
        .await
        .unwrap();

    let all = reports.car_list(None).await.unwrap();
    let sedans = reports.car_list(Some("SEDAN")).await.unwrap();

    assert_eq!(all.total_count, 3);
    assert_eq!(sedans.total_count, 2);
    assert!(sedans.cars.iter().all(|c| c.car.body_type == BodyType::Sedan));
    let expected: Vec<i64> = all
        .cars
        .iter()
        .filter(|c| c.car.body_type == BodyType::Sedan)
        .map(|c| c.car.id)
        .collect();
    let actual: Vec<i64> = sedans.cars.iter().map(|c| c.car.id).collect();
    assert_eq!(actual, expected);
    assert_eq!(sedans.title, "Cars of type: Sedan");
    assert_eq!(sedans.filter_type.as_deref(), Some("Sedan"));
    assert_eq!(sedans.body_types.len(), 7);
    assert_eq!(sedans.fuel_types.len(), 5);
}

#[tokio::test]
async fn unknown_body_type_yields_empty_list_with_raw_label() {
    let (reports, admin) = services();
    let m = admin.create_manufacturer(manufacturer("Toyota", Country::Japan)).await.unwrap();
    admin.create_car(car(m.id, CarSpec::default())).await.unwrap();

    let page = reports.car_list(Some("LIMOUSINE")).await.unwrap();

    assert!(page.cars.is_empty());
    assert_eq!(page.total_count, 0);
    assert_eq!(page.filter_type.as_deref(), Some("LIMOUSINE"));
    assert_eq!(page.title, "Cars of type: LIMOUSINE");
}

#[tokio::test]
async fn car_list_is_newest_production_year_first() {
    let (reports, admin) = services();
    let m = admin.create_manufacturer(manufacturer("Honda", Country::Japan)).await.unwrap();
    for (vin, year) in [("VIN00000000000011", 2015), ("VIN00000000000012", 2022), ("VIN00000000000013", 2018)] {
        admin
            .create_car(car(m.id, CarSpec { vin, year, ..Default::default() }))
            .await
            .unwrap();
    }

    let page = reports.car_list(None).await.unwrap();
    let years: Vec<i32> = page.cars.iter().map(|c| c.car.production_year).collect();
    assert_eq!(years, [2022, 2018, 2015]);
    assert_eq!(page.cars[0].manufacturer.name, "Honda");
}

#[tokio::test]
async fn recent_service_records_keep_last_thirty_days_newest_first() {
    let (reports, admin) = services();
    let m = admin.create_manufacturer(manufacturer("Kia", Country::SouthKorea)).await.unwrap();
    let c = admin.create_car(car(m.id, CarSpec::default())).await.unwrap();
    let today = date(2024, 6, 30);

    for d in [
        date(2024, 5, 30), // 31 days ago
        date(2024, 5, 31), // exactly 30 days ago
        date(2024, 6, 29),
        date(2024, 6, 10),
        date(2024, 6, 30),
    ] {
        admin
            .create_service_record(service_record(c.id, d, ServiceType::OilChange))
            .await
            .unwrap();
    }

    let page = reports.recent_service_records(today).await.unwrap();
    let dates: Vec<_> = page.records.iter().map(|r| r.record.service_date).collect();

    assert_eq!(dates, [date(2024, 6, 30), date(2024, 6, 29), date(2024, 6, 10), date(2024, 5, 31)]);
    assert!(dates.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(page.total_count, 4);
    assert_eq!(page.filter_info.as_deref(), Some("Filter: last 30 days"));
    assert_eq!(page.records[0].car.manufacturer.name, "Kia");

    let all = reports.service_records().await.unwrap();
    assert_eq!(all.total_count, 5);
    assert_eq!(all.service_types.len(), 8);
}

#[tokio::test]
async fn current_owners_only_lists_owners_with_a_current_ownership() {
    let (reports, admin) = services();
    let m = admin.create_manufacturer(manufacturer("Ford", Country::UnitedStates)).await.unwrap();
    let x = admin
        .create_car(car(m.id, CarSpec { vin: "VIN0000000000000X", ..Default::default() }))
        .await
        .unwrap();
    let y = admin
        .create_car(car(m.id, CarSpec { vin: "VIN0000000000000Y", ..Default::default() }))
        .await
        .unwrap();
    let a = admin.create_owner(owner("Alice", "Archer")).await.unwrap();
    let b = admin.create_owner(owner("Bob", "Baker")).await.unwrap();
    admin.create_ownership(ownership(a.id, x.id, true)).await.unwrap();
    admin.create_ownership(ownership(b.id, y.id, false)).await.unwrap();

    let everyone = reports.owner_list().await.unwrap();
    let current = reports.current_owners().await.unwrap();

    assert_eq!(everyone.total_count, 2);
    assert_eq!(current.total_count, 1);
    assert_eq!(current.owners[0].owner.id, a.id);
    assert_eq!(current.owners[0].owned_cars[0].id, x.id);
    assert_eq!(current.filter_info.as_deref(), Some("Filter: current owners"));

    let bob = everyone.owners.iter().find(|o| o.owner.id == b.id).unwrap();
    assert_eq!(bob.owned_cars.len(), 1, "past ownerships still appear in owned cars");
}

#[tokio::test]
async fn owner_with_several_current_ownerships_is_listed_once() {
    let (reports, admin) = services();
    let m = admin.create_manufacturer(manufacturer("Fiat", Country::Italy)).await.unwrap();
    let c1 = admin
        .create_car(car(m.id, CarSpec { vin: "VIN00000000000021", ..Default::default() }))
        .await
        .unwrap();
    let c2 = admin
        .create_car(car(m.id, CarSpec { vin: "VIN00000000000022", ..Default::default() }))
        .await
        .unwrap();
    let o = admin.create_owner(owner("Carla", "Conti")).await.unwrap();
    admin.create_ownership(ownership(o.id, c1.id, true)).await.unwrap();
    admin.create_ownership(ownership(o.id, c2.id, true)).await.unwrap();

    let current = reports.current_owners().await.unwrap();
    assert_eq!(current.total_count, 1);
    assert_eq!(current.owners[0].owned_cars.len(), 2);
}

#[tokio::test]
async fn owned_cars_are_newest_production_year_first() {
    let (reports, admin) = services();
    let m = admin.create_manufacturer(manufacturer("Skoda", Country::Germany)).await.unwrap();
    let older = admin
        .create_car(car(m.id, CarSpec { vin: "VIN00000000000031", year: 2015, ..Default::default() }))
        .await
        .unwrap();
    let newer = admin
        .create_car(car(m.id, CarSpec { vin: "VIN00000000000032", year: 2022, ..Default::default() }))
        .await
        .unwrap();
    let o = admin.create_owner(owner("Hana", "Horak")).await.unwrap();
    admin.create_ownership(ownership(o.id, older.id, false)).await.unwrap();
    admin.create_ownership(ownership(o.id, newer.id, true)).await.unwrap();

    let page = reports.owner_list().await.unwrap();
    let years: Vec<i32> = page.owners[0]
        .owned_cars
        .iter()
        .map(|c| c.production_year)
        .collect();
    assert_eq!(years, [2022, 2015]);
}

#[tokio::test]
async fn manufacturer_list_filters_by_country_code() {
    let (reports, admin) = services();
    admin.create_manufacturer(manufacturer("Toyota", Country::Japan)).await.unwrap();
    admin.create_manufacturer(manufacturer("BMW", Country::Germany)).await.unwrap();
    admin.create_manufacturer(manufacturer("Audi", Country::Germany)).await.unwrap();

    let all = reports.manufacturer_list(None).await.unwrap();
    let names: Vec<_> = all.manufacturers.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Audi", "BMW", "Toyota"]);
    assert_eq!(all.countries.len(), 7);
    assert_eq!(all.title, "All car manufacturers");

    let german = reports.manufacturer_list(Some("GER")).await.unwrap();
    assert_eq!(german.total_count, 2);
    assert_eq!(german.title, "Manufacturers from Germany");
    assert_eq!(german.filter_info.as_deref(), Some("Filter: country - Germany"));

    let unknown = reports.manufacturer_list(Some("XYZ")).await.unwrap();
    assert_eq!(unknown.total_count, 0);
    assert_eq!(unknown.title, "Manufacturers from XYZ");
}

#[tokio::test]
async fn statistics_aggregates_are_consistent() {
    let (reports, admin) = services();
    let toyota = admin.create_manufacturer(manufacturer("Toyota", Country::Japan)).await.unwrap();
    let bmw = admin.create_manufacturer(manufacturer("BMW", Country::Germany)).await.unwrap();
    let empty = admin.create_manufacturer(manufacturer("Zeta", Country::France)).await.unwrap();

    admin
        .create_car(car(toyota.id, CarSpec { vin: "VIN00000000000031", price: "20000", horsepower: 120, year: 2019, ..Default::default() }))
        .await
        .unwrap();
    admin
        .create_car(car(toyota.id, CarSpec { vin: "VIN00000000000032", price: "30000", horsepower: 180, year: 2021, ..Default::default() }))
        .await
        .unwrap();
    admin
        .create_car(car(bmw.id, CarSpec {
            vin: "VIN00000000000033",
            body: BodyType::Coupe,
            fuel: FuelType::Diesel,
            price: "70000",
            horsepower: 380,
            year: 2023,
            ..Default::default()
        }))
        .await
        .unwrap();

    let stats = reports.statistics().await.unwrap();

    assert_eq!(stats.total_cars, 3);
    assert_eq!(stats.body_type_stats.iter().map(|s| s.count).sum::<i64>(), stats.total_cars);
    assert_eq!(stats.fuel_stats.iter().map(|s| s.count).sum::<i64>(), stats.total_cars);
    assert_eq!(stats.avg_car_price, dec("40000.00"));

    let sedan = &stats.body_type_stats[0];
    assert_eq!(sedan.body_type, BodyType::Sedan);
    assert_eq!(sedan.count, 2);
    assert_eq!(sedan.avg_price, dec("25000.00"));
    assert_eq!(sedan.avg_horsepower, dec("150.00"));

    let petrol = &stats.fuel_stats[0];
    assert_eq!(petrol.fuel_type, FuelType::Petrol);
    assert_eq!(petrol.avg_year, dec("2020.00"));

    let by_name: Vec<_> = stats.manufacturers_stats.iter().map(|s| s.manufacturer.name.as_str()).collect();
    assert_eq!(by_name, ["BMW", "Toyota", "Zeta"]);
    let toyota_stats = &stats.manufacturers_stats[1];
    assert_eq!(toyota_stats.car_count, 2);
    assert_eq!(toyota_stats.avg_price, Some(dec("25000.00")));
    assert_eq!(toyota_stats.max_horsepower, Some(180));
    let zeta = &stats.manufacturers_stats[2];
    assert_eq!(zeta.manufacturer.id, empty.id);
    assert_eq!(zeta.car_count, 0);
    assert_eq!(zeta.avg_price, None);
    assert_eq!(zeta.max_horsepower, None);

    assert_eq!(stats.most_expensive_cars[0].car.vin_code, "VIN00000000000033");
    assert_eq!(stats.most_powerful_cars.last().unwrap().car.horsepower, 120);
}

#[tokio::test]
async fn statistics_on_empty_store_report_zero_average() {
    let (reports, _) = services();
    let stats = reports.statistics().await.unwrap();
    assert_eq!(stats.total_cars, 0);
    assert_eq!(stats.avg_car_price, Decimal::ZERO);
    assert!(stats.body_type_stats.is_empty());
    assert!(stats.most_expensive_cars.is_empty());
}

#[tokio::test]
async fn top_lists_are_capped_at_five() {
    let (reports, admin) = services();
    let m = admin.create_manufacturer(manufacturer("Hyundai", Country::SouthKorea)).await.unwrap();
    for i in 0..7 {
        let vin = format!("VIN000000000001{:02}", i);
        let price = format!("{}", 10000 + i * 1000);
        admin
            .create_car(car(m.id, CarSpec { vin: &vin, price: &price, horsepower: 100 + i as i32, ..Default::default() }))
            .await
            .unwrap();
    }

    let stats = reports.statistics().await.unwrap();
    assert_eq!(stats.most_expensive_cars.len(), 5);
    assert_eq!(stats.most_expensive_cars[0].car.price, dec("16000.00"));
    assert!(stats
        .most_powerful_cars
        .windows(2)
        .all(|w| w[0].car.horsepower >= w[1].car.horsepower));

    let dashboard = reports.dashboard().await.unwrap();
    assert_eq!(dashboard.total_cars, 7);
    assert_eq!(dashboard.recent_cars.len(), 5);
}

#[tokio::test]
async fn dashboard_shows_three_latest_service_records() {
    let (reports, admin) = services();
    let m = admin.create_manufacturer(manufacturer("Renault", Country::France)).await.unwrap();
    let c = admin.create_car(car(m.id, CarSpec::default())).await.unwrap();
    for day in 1..=4 {
        admin
            .create_service_record(service_record(c.id, date(2024, 2, day), ServiceType::Maintenance))
            .await
            .unwrap();
    }

    let dashboard = reports.dashboard().await.unwrap();
    assert_eq!(dashboard.total_service_records, 4);
    assert_eq!(dashboard.total_manufacturers, 1);
    let dates: Vec<_> = dashboard.recent_service.iter().map(|r| r.record.service_date).collect();
    assert_eq!(dates, [date(2024, 2, 4), date(2024, 2, 3), date(2024, 2, 2)]);
}

#[tokio::test]
#[traced_test]
async fn car_list_logs_filter_and_result_count() {
    let (reports, _) = services();
    reports.car_list(Some("WAGON")).await.unwrap();
    assert!(logs_contain("Listing cars"));
    assert!(logs_contain("0 found"));
}
