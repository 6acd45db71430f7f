//! Fixed-point helpers shared by the admin validators and the in-memory
//! aggregation code. Column scales mirror the NUMERIC(p, s) definitions in the
//! schema migration.

use rust_decimal::{Decimal, RoundingStrategy};
use validator::ValidationError;

pub const ENGINE_VOLUME_SCALE: u32 = 1;
pub const MONEY_SCALE: u32 = 2;
pub const AVERAGE_SCALE: u32 = 2;

/// Rounds half away from zero, matching Postgres `ROUND(numeric, s)`.
pub fn to_scale(value: Decimal, scale: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);
    rounded
}

pub fn average<I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    let (sum, count) = values
        .into_iter()
        .fold((Decimal::ZERO, 0i64), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return None;
    }
    Some(to_scale(sum / Decimal::from(count), AVERAGE_SCALE))
}

fn fits(value: &Decimal, precision: u32, scale: u32) -> Result<(), ValidationError> {
    let rounded = to_scale(*value, scale);
    let limit = Decimal::from(10i64.pow(precision - scale));
    if rounded.abs() >= limit {
        let mut err = ValidationError::new("numeric_overflow");
        err.message = Some(
            format!("value must have at most {} digits before the decimal point", precision - scale).into(),
        );
        return Err(err);
    }
    if rounded.is_sign_negative() && !rounded.is_zero() {
        let mut err = ValidationError::new("negative");
        err.message = Some("value must not be negative".into());
        return Err(err);
    }
    Ok(())
}

/// NUMERIC(3,1)
pub fn validate_engine_volume(value: &Decimal) -> Result<(), ValidationError> {
    fits(value, 3, ENGINE_VOLUME_SCALE)
}

/// NUMERIC(10,2)
pub fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    fits(value, 10, MONEY_SCALE)
}

/// NUMERIC(8,2)
pub fn validate_cost(value: &Decimal) -> Result<(), ValidationError> {
    fits(value, 8, MONEY_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn to_scale_rounds_half_away_from_zero_and_pads() {
        assert_eq!(to_scale(d("2.25"), 1).to_string(), "2.3");
        assert_eq!(to_scale(d("20000"), 2).to_string(), "20000.00");
    }

    #[test]
    fn average_of_nothing_is_none() {
        assert_eq!(average(Vec::new()), None);
        assert_eq!(average(vec![d("20000.00"), d("30000.00")]), Some(d("25000.00")));
        assert_eq!(average(vec![d("1"), d("2"), d("2")]).unwrap().to_string(), "1.67");
    }

    #[test]
    fn numeric_limits_follow_column_precision() {
        assert!(validate_engine_volume(&d("99.9")).is_ok());
        assert!(validate_engine_volume(&d("99.96")).is_err());
        assert!(validate_price(&d("99999999.99")).is_ok());
        assert!(validate_price(&d("100000000")).is_err());
        assert!(validate_cost(&d("999999.99")).is_ok());
        assert!(validate_cost(&d("1000000")).is_err());
        assert!(validate_cost(&d("-1")).is_err());
    }
}
