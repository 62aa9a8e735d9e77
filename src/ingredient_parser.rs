//! # Ingredient Parser
//!
//! Turns free-text ingredient lines into authored [`Ingredient`] records.
//!
//! ## Features
//!
//! - Integers, decimals (`1.5`, `1,5`), fractions (`1/2`), mixed numbers
//!   (`2 1/4`) and vulgar fraction glyphs (`½`, `1½`)
//! - Units recognized from the unit tables plus common kitchen measures
//!   (pinch, can, bunch, ...); anything else is counted in `item`
//! - Parenthetical text and text after the first comma become notes
//! - Category inferred from the ingredient name
//!
//! ## Usage
//!
//! ```rust
//! use grocery_list::ingredient_parser::parse_ingredient_line;
//! use grocery_list::ingredient_model::Category;
//!
//! let ingredient = parse_ingredient_line("2 1/2 cups flour (sifted)").unwrap();
//! assert_eq!(ingredient.quantity, 2.5);
//! assert_eq!(ingredient.unit, "cup");
//! assert_eq!(ingredient.name, "flour");
//! assert_eq!(ingredient.notes.as_deref(), Some("sifted"));
//! assert_eq!(ingredient.category, Some(Category::Pantry));
//! ```

use crate::categorizer::detect_category;
use crate::errors::ParseError;
use crate::ingredient_model::Ingredient;
use crate::patterns::{FRACTION_GLYPHS, FRACTION_REGEX, NOTES_REGEX, QUANTITY_REGEX};
use crate::units::{normalize_unit, unit_kind, UnitKind};
use log::{debug, trace};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Unit used when a line names no unit
pub const DEFAULT_UNIT: &str = "item";

/// Kitchen measures outside the conversion tables, mapped to their singular form
static KITCHEN_MEASURES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    map.insert("pinch", "pinch");
    map.insert("pinches", "pinch");
    map.insert("dash", "dash");
    map.insert("dashes", "dash");
    map.insert("can", "can");
    map.insert("cans", "can");
    map.insert("jar", "jar");
    map.insert("jars", "jar");
    map.insert("bottle", "bottle");
    map.insert("bottles", "bottle");
    map.insert("package", "package");
    map.insert("packages", "package");
    map.insert("pkg", "package");
    map.insert("bunch", "bunch");
    map.insert("bunches", "bunch");
    map.insert("head", "head");
    map.insert("heads", "head");
    map.insert("slice", "slice");
    map.insert("slices", "slice");
    map.insert("stick", "stick");
    map.insert("sticks", "stick");
    map.insert("sprig", "sprig");
    map.insert("sprigs", "sprig");
    map.insert("handful", "handful");
    map.insert("handfuls", "handful");

    map
});

/// Value of a vulgar fraction glyph
fn glyph_value(glyph: char) -> Option<f64> {
    match glyph {
        '¼' => Some(0.25),
        '½' => Some(0.5),
        '¾' => Some(0.75),
        '⅓' => Some(1.0 / 3.0),
        '⅔' => Some(2.0 / 3.0),
        '⅛' => Some(0.125),
        '⅜' => Some(0.375),
        '⅝' => Some(0.625),
        '⅞' => Some(0.875),
        _ => None,
    }
}

/// Parse a quantity string into a number
pub fn parse_quantity(qty_str: &str) -> Result<f64, ParseError> {
    let qty_str = qty_str.trim();

    if let Some(captures) = FRACTION_REGEX.captures(qty_str) {
        let invalid = || ParseError::InvalidNumber(qty_str.to_string());
        let whole: f64 = match captures.name("whole") {
            Some(m) => m.as_str().parse().map_err(|_| invalid())?,
            None => 0.0,
        };
        let numerator: f64 = captures["num"].parse().map_err(|_| invalid())?;
        let denominator: f64 = captures["den"].parse().map_err(|_| invalid())?;

        if denominator == 0.0 {
            return Err(ParseError::DivisionByZero);
        }

        return Ok(whole + numerator / denominator);
    }

    let (number_part, glyph) = match qty_str.chars().last() {
        Some(last) if FRACTION_GLYPHS.contains(last) => {
            (&qty_str[..qty_str.len() - last.len_utf8()], glyph_value(last))
        }
        _ => (qty_str, None),
    };

    let number_part = number_part.trim();
    if number_part.is_empty() && glyph.is_none() {
        return Err(ParseError::InvalidNumber(qty_str.to_string()));
    }

    let whole = if number_part.is_empty() {
        0.0
    } else {
        number_part
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|_| ParseError::InvalidNumber(qty_str.to_string()))?
    };

    Ok(whole + glyph.unwrap_or(0.0))
}

/// Recognize a unit word, returning its canonical form
fn recognize_unit(word: &str) -> Option<String> {
    let cleaned = word.trim().trim_end_matches('.').to_lowercase();
    if cleaned.is_empty() {
        return None;
    }

    if unit_kind(&cleaned) != UnitKind::Unknown {
        return Some(normalize_unit(&cleaned));
    }

    KITCHEN_MEASURES.get(cleaned.as_str()).map(|unit| unit.to_string())
}

/// Split "onion, finely diced" into name and trailing notes
fn split_trailing_notes(text: &str) -> (&str, Option<&str>) {
    match text.split_once(',') {
        Some((name, notes)) if !notes.trim().is_empty() => (name.trim(), Some(notes.trim())),
        Some((name, _)) => (name.trim(), None),
        None => (text.trim(), None),
    }
}

/// Parse a single ingredient line
///
/// Lines without a leading quantity count as one `item`. A quantity must
/// be positive.
pub fn parse_ingredient_line(line: &str) -> Result<Ingredient, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::EmptyLine);
    }

    let mut notes: Vec<String> = Vec::new();
    let body = match NOTES_REGEX.captures(line) {
        Some(captures) => {
            let paren = captures["notes"].trim();
            if !paren.is_empty() {
                notes.push(paren.to_string());
            }
            captures.name("body").map(|m| m.as_str()).unwrap_or("")
        }
        None => line,
    };

    let (quantity, rest) = match QUANTITY_REGEX.captures(body) {
        Some(captures) => {
            let quantity = parse_quantity(&captures["qty"])?;
            let rest = captures.name("rest").map(|m| m.as_str()).unwrap_or("");
            (quantity, rest)
        }
        None => (1.0, body),
    };

    if quantity <= 0.0 || !quantity.is_finite() {
        return Err(ParseError::InvalidNumber(quantity.to_string()));
    }

    let rest = rest.trim();
    let (first_word, after_first) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let (unit, remainder) = match recognize_unit(first_word) {
        Some(unit) => (unit, after_first),
        None => (DEFAULT_UNIT.to_string(), rest),
    };
    trace!("Parsed quantity {} {} from '{}'", quantity, unit, line);

    let remainder = remainder.trim();
    let remainder = remainder.strip_prefix("of ").unwrap_or(remainder);
    let (name, trailing) = split_trailing_notes(remainder);
    if let Some(trailing) = trailing {
        notes.insert(0, trailing.to_string());
    }

    if name.is_empty() {
        return Err(ParseError::NoIngredientName);
    }

    let mut ingredient = Ingredient::new(name, quantity, &unit).with_category(detect_category(name));
    if !notes.is_empty() {
        ingredient = ingredient.with_notes(&notes.join(", "));
    }

    Ok(ingredient)
}

/// Result of parsing a block of ingredient text
#[derive(Debug, Clone, Default)]
pub struct ParsedIngredients {
    pub ingredients: Vec<Ingredient>,
    pub unparsed_lines: Vec<String>,
}

/// Parse one ingredient per line, collecting lines that fail to parse
pub fn parse_ingredient_list(text: &str) -> ParsedIngredients {
    let mut parsed = ParsedIngredients::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_ingredient_line(line) {
            Ok(ingredient) => parsed.ingredients.push(ingredient),
            Err(e) => {
                debug!("Could not parse ingredient line '{}': {}", line, e);
                parsed.unparsed_lines.push(line.to_string());
            }
        }
    }

    parsed
}
