//! Physical plausibility bounds for extracted values.

use crate::models::Field;

/// Latitude in degrees, `[-90, 90]`.
pub fn valid_latitude(value: f64) -> bool {
    value.is_finite() && (-90.0..=90.0).contains(&value)
}

/// Longitude in degrees, `[-180, 180]`.
pub fn valid_longitude(value: f64) -> bool {
    value.is_finite() && (-180.0..=180.0).contains(&value)
}

/// Annual production in kWh, strictly positive.
pub fn valid_production(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Annual irradiation in kWh/m², strictly positive.
pub fn valid_irradiation(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Check `value` against the bounds of `field`.
pub fn in_bounds(field: Field, value: f64) -> bool {
    match field {
        Field::Latitude => valid_latitude(value),
        Field::Longitude => valid_longitude(value),
        Field::AnnualProduction => valid_production(value),
        Field::Irradiation => valid_irradiation(value),
    }
}

/// Keep `value` only if it lies within the bounds of `field`.
pub fn accept(field: Field, value: f64) -> Option<f64> {
    in_bounds(field, value).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_bounds() {
        assert!(valid_latitude(-90.0));
        assert!(valid_latitude(90.0));
        assert!(!valid_latitude(200.0));
        assert!(!valid_latitude(-90.0001));
        assert!(valid_longitude(-180.0));
        assert!(!valid_longitude(180.5));
        assert!(!valid_longitude(f64::NAN));
    }

    #[test]
    fn test_positive_bounds() {
        assert!(valid_production(4847.0));
        assert!(!valid_production(0.0));
        assert!(!valid_production(-5.0));
        assert!(!valid_production(f64::INFINITY));
        assert!(valid_irradiation(0.1));
        assert!(!valid_irradiation(0.0));
    }

    #[test]
    fn test_accept() {
        assert_eq!(accept(Field::Latitude, 48.8584), Some(48.8584));
        assert_eq!(accept(Field::Latitude, 200.0), None);
        assert_eq!(accept(Field::AnnualProduction, -5.0), None);
    }
}
