//! # Units Module
//!
//! Canonical unit spelling and conversion between compatible units.
//!
//! Units are plain strings throughout the merge pipeline. [`normalize_unit`]
//! maps the many ways recipes spell a unit onto one short token ("tbsp",
//! "g", "item", ...), and the conversion table below relates those tokens
//! within a measurement kind (US volume, metric volume, weight).
//!
//! Conversion is only used for display optimization. Merge keys compare
//! normalized tokens literally.

use log::{debug, trace};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Unit spelling variations mapped to their canonical token
static UNIT_SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Volume units
    map.insert("tablespoon", "tbsp");
    map.insert("tablespoons", "tbsp");
    map.insert("teaspoon", "tsp");
    map.insert("teaspoons", "tsp");
    map.insert("cups", "cup");
    map.insert("milliliter", "ml");
    map.insert("milliliters", "ml");
    map.insert("millilitre", "ml");
    map.insert("millilitres", "ml");
    map.insert("liter", "l");
    map.insert("liters", "l");
    map.insert("litre", "l");
    map.insert("litres", "l");
    map.insert("quart", "qt");
    map.insert("quarts", "qt");
    map.insert("pint", "pt");
    map.insert("pints", "pt");
    map.insert("gallon", "gal");
    map.insert("gallons", "gal");

    // Weight units
    map.insert("gram", "g");
    map.insert("grams", "g");
    map.insert("kilogram", "kg");
    map.insert("kilograms", "kg");
    map.insert("ounce", "oz");
    map.insert("ounces", "oz");
    map.insert("pound", "lb");
    map.insert("pounds", "lb");
    map.insert("lbs", "lb");

    // Count units
    map.insert("piece", "item");
    map.insert("pieces", "item");
    map.insert("items", "item");
    map.insert("cloves", "clove");

    map
});

/// A single conversion edge: multiply a `from` quantity by `factor` to get `to`
#[derive(Debug, Clone, Copy)]
struct UnitConversion {
    from: &'static str,
    to: &'static str,
    factor: f64,
}

const UNIT_CONVERSIONS: &[UnitConversion] = &[
    // Volume (US)
    UnitConversion { from: "tbsp", to: "tsp", factor: 3.0 },
    UnitConversion { from: "cup", to: "tbsp", factor: 16.0 },
    UnitConversion { from: "cup", to: "tsp", factor: 48.0 },
    UnitConversion { from: "cup", to: "ml", factor: 236.588 },
    UnitConversion { from: "tbsp", to: "ml", factor: 14.787 },
    UnitConversion { from: "tsp", to: "ml", factor: 4.929 },
    // Weight
    UnitConversion { from: "lb", to: "oz", factor: 16.0 },
    UnitConversion { from: "lb", to: "g", factor: 453.592 },
    UnitConversion { from: "oz", to: "g", factor: 28.3495 },
    UnitConversion { from: "kg", to: "g", factor: 1000.0 },
    // Liquid volume
    UnitConversion { from: "l", to: "ml", factor: 1000.0 },
    UnitConversion { from: "qt", to: "cup", factor: 4.0 },
    UnitConversion { from: "pt", to: "cup", factor: 2.0 },
    UnitConversion { from: "gal", to: "qt", factor: 4.0 },
    UnitConversion { from: "gal", to: "cup", factor: 16.0 },
];

/// Larger display units worth switching to once a quantity reaches `min_quantity`
struct PreferredUnit {
    unit: &'static str,
    min_quantity: f64,
}

/// Preferences per normalized unit, largest unit first
static PREFERRED_UNITS: LazyLock<HashMap<&'static str, Vec<PreferredUnit>>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    map.insert(
        "tsp",
        vec![
            PreferredUnit { unit: "cup", min_quantity: 48.0 },
            PreferredUnit { unit: "tbsp", min_quantity: 3.0 },
        ],
    );
    map.insert("tbsp", vec![PreferredUnit { unit: "cup", min_quantity: 16.0 }]);
    map.insert(
        "ml",
        vec![
            PreferredUnit { unit: "l", min_quantity: 1000.0 },
            PreferredUnit { unit: "cup", min_quantity: 236.588 },
        ],
    );
    map.insert(
        "g",
        vec![
            PreferredUnit { unit: "kg", min_quantity: 1000.0 },
            PreferredUnit { unit: "lb", min_quantity: 453.592 },
        ],
    );
    map.insert("oz", vec![PreferredUnit { unit: "lb", min_quantity: 16.0 }]);

    map
});

/// A quantity paired with its (normalized) unit
#[derive(Debug, Clone, PartialEq)]
pub struct UnitAmount {
    pub quantity: f64,
    pub unit: String,
}

/// Measurement kind of a normalized unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Volume,
    Weight,
    Count,
    Unknown,
}

const VOLUME_UNITS: &[&str] = &["tsp", "tbsp", "cup", "ml", "l", "qt", "pt", "gal"];
const WEIGHT_UNITS: &[&str] = &["g", "kg", "oz", "lb"];
const COUNT_UNITS: &[&str] = &["item", "clove"];

/// Classify a unit by what it measures
///
/// Units of different kinds never convert into each other. Units the
/// tables do not know are [`UnitKind::Unknown`].
pub fn unit_kind(unit: &str) -> UnitKind {
    let normalized = normalize_unit(unit);
    let token = normalized.as_str();

    if VOLUME_UNITS.contains(&token) {
        UnitKind::Volume
    } else if WEIGHT_UNITS.contains(&token) {
        UnitKind::Weight
    } else if COUNT_UNITS.contains(&token) {
        UnitKind::Count
    } else {
        UnitKind::Unknown
    }
}

/// Normalize a unit string to its canonical token
///
/// # Examples
///
/// ```rust
/// use grocery_list::units::normalize_unit;
///
/// assert_eq!(normalize_unit("Tablespoons"), "tbsp");
/// assert_eq!(normalize_unit(" pieces "), "item");
/// assert_eq!(normalize_unit("handful"), "handful");
/// ```
pub fn normalize_unit(unit: &str) -> String {
    let cleaned = unit.trim().to_lowercase();
    match UNIT_SYNONYMS.get(cleaned.as_str()) {
        Some(canonical) => canonical.to_string(),
        None => cleaned,
    }
}

/// Convert a quantity between two units
///
/// Tries a direct table edge, then the reverse edge, then a path through
/// one intermediate unit reached by a forward edge from `from_unit`.
/// Returns `None` when no such path exists (different measurement kinds,
/// or units the table does not know).
///
/// # Examples
///
/// ```rust
/// use grocery_list::units::convert_unit;
///
/// assert_eq!(convert_unit(2.0, "tablespoons", "tsp"), Some(6.0));
/// assert_eq!(convert_unit(1.0, "cup", "g"), None);
/// ```
pub fn convert_unit(quantity: f64, from_unit: &str, to_unit: &str) -> Option<f64> {
    let from = normalize_unit(from_unit);
    let to = normalize_unit(to_unit);

    if from == to {
        return Some(quantity);
    }

    if let Some(direct) = UNIT_CONVERSIONS.iter().find(|c| c.from == from && c.to == to) {
        return Some(quantity * direct.factor);
    }

    if let Some(reverse) = UNIT_CONVERSIONS.iter().find(|c| c.from == to && c.to == from) {
        return Some(quantity / reverse.factor);
    }

    for first in UNIT_CONVERSIONS.iter().filter(|c| c.from == from) {
        let intermediate = first.to;
        let second = UNIT_CONVERSIONS.iter().find(|c| {
            (c.from == intermediate && c.to == to) || (c.to == intermediate && c.from == to)
        });

        if let Some(second) = second {
            let intermediate_qty = quantity * first.factor;
            trace!("Converting {} -> {} via {}", from, to, intermediate);
            return Some(if second.from == intermediate {
                intermediate_qty * second.factor
            } else {
                intermediate_qty / second.factor
            });
        }
    }

    debug!("No conversion path from '{}' to '{}'", from, to);
    None
}

/// Check whether two units can be converted into each other
pub fn are_units_convertible(unit1: &str, unit2: &str) -> bool {
    let u1 = normalize_unit(unit1);
    let u2 = normalize_unit(unit2);

    u1 == u2 || convert_unit(1.0, &u1, &u2).is_some()
}

/// Switch to a larger display unit when the quantity is big enough
///
/// Returns the first preferred unit whose threshold is met, or the
/// normalized input unchanged.
///
/// # Examples
///
/// ```rust
/// use grocery_list::units::optimize_unit;
///
/// let optimized = optimize_unit(1500.0, "grams");
/// assert_eq!(optimized.unit, "kg");
/// assert_eq!(optimized.quantity, 1.5);
/// ```
pub fn optimize_unit(quantity: f64, unit: &str) -> UnitAmount {
    let normalized = normalize_unit(unit);

    if let Some(preferences) = PREFERRED_UNITS.get(normalized.as_str()) {
        for preference in preferences {
            if quantity < preference.min_quantity {
                continue;
            }
            if let Some(converted) = convert_unit(quantity, &normalized, preference.unit) {
                return UnitAmount {
                    quantity: converted,
                    unit: preference.unit.to_string(),
                };
            }
        }
    }

    UnitAmount {
        quantity,
        unit: normalized,
    }
}
