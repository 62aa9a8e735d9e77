//! Display-friendly rounding of merged quantities.

use crate::units::normalize_unit;

/// Units measured precisely enough to round to whole numbers
const WHOLE_NUMBER_UNITS: &[&str] = &["g", "oz", "ml"];

/// Round half up, matching how shoppers read "2.5 g" as 3 g
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Round a quantity according to its unit
///
/// Grams, ounces and millilitres round to the nearest whole number. Every
/// other unit (cups, spoons, items, cloves, pounds, unknown units) rounds
/// to the nearest quarter.
///
/// # Examples
///
/// ```rust
/// use grocery_list::rounding::round_quantity;
///
/// assert_eq!(round_quantity(100.5, "grams"), 101.0);
/// assert_eq!(round_quantity(1.13, "cup"), 1.25);
/// ```
pub fn round_quantity(quantity: f64, unit: &str) -> f64 {
    let normalized = normalize_unit(unit);

    if WHOLE_NUMBER_UNITS.contains(&normalized.as_str()) {
        return round_half_up(quantity);
    }

    round_half_up(quantity * 4.0) / 4.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grams_round_to_whole() {
        assert_eq!(round_quantity(100.4, "g"), 100.0);
        assert_eq!(round_quantity(100.6, "g"), 101.0);
        assert_eq!(round_quantity(100.5, "g"), 101.0);
        assert_eq!(round_quantity(100.5, "grams"), 101.0);
    }

    #[test]
    fn test_just_below_half_rounds_down() {
        assert_eq!(round_quantity(0.49999999999999994, "g"), 0.0);
        assert_eq!(round_quantity(2.5, "g"), 3.0);
        // 0.12499999999999999 * 4 sits just below the quarter boundary
        assert_eq!(round_quantity(0.12499999999999999, "cup"), 0.0);
    }

    #[test]
    fn test_ounces_and_ml_round_to_whole() {
        assert_eq!(round_quantity(4.3, "oz"), 4.0);
        assert_eq!(round_quantity(4.7, "ounces"), 5.0);
        assert_eq!(round_quantity(249.5, "ml"), 250.0);
    }

    #[test]
    fn test_cups_round_to_quarter() {
        assert_eq!(round_quantity(1.1, "cup"), 1.0);
        assert_eq!(round_quantity(1.13, "cup"), 1.25);
        assert_eq!(round_quantity(1.38, "cup"), 1.5);
        assert_eq!(round_quantity(1.63, "cups"), 1.75);
        assert_eq!(round_quantity(1.88, "cup"), 2.0);
    }

    #[test]
    fn test_spoons_round_to_quarter() {
        assert_eq!(round_quantity(2.1, "tbsp"), 2.0);
        assert_eq!(round_quantity(2.15, "tablespoons"), 2.25);
        assert_eq!(round_quantity(0.3, "tsp"), 0.25);
    }

    #[test]
    fn test_items_round_to_quarter() {
        assert_eq!(round_quantity(1.1, "item"), 1.0);
        assert_eq!(round_quantity(1.3, "item"), 1.25);
        assert_eq!(round_quantity(1.5, "pieces"), 1.5);
    }

    #[test]
    fn test_pounds_and_unknown_units_round_to_quarter() {
        assert_eq!(round_quantity(1.4, "lb"), 1.5);
        assert_eq!(round_quantity(2.2, "handful"), 2.25);
        assert_eq!(round_quantity(2.9, "clove"), 3.0);
    }

    #[test]
    fn test_quarter_ties_round_up() {
        assert_eq!(round_quantity(0.125, "cup"), 0.25);
        assert_eq!(round_quantity(0.375, "cup"), 0.5);
    }
}
