//! # Ingredient Name Normalization
//!
//! Reduces free-text ingredient names to a canonical form so that the same
//! real-world item written differently by different recipes ends up under
//! one merge key.

use log::trace;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Synonym mappings from a lowercased, trimmed name to its canonical name
static NAME_SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    map.insert("scallions", "green onion");
    map.insert("scallion", "green onion");
    map.insert("spring onion", "green onion");
    map.insert("spring onions", "green onion");
    map.insert("capsicum", "bell pepper");
    map.insert("bell peppers", "bell pepper");
    map.insert("cilantro", "coriander");
    map.insert("coriander leaves", "coriander");
    map.insert("fresh coriander", "coriander");
    map.insert("garlic clove", "garlic");
    map.insert("garlic cloves", "garlic");

    // Plurals
    map.insert("onions", "onion");
    map.insert("tomatoes", "tomato");
    map.insert("carrots", "carrot");
    map.insert("eggs", "egg");
    map.insert("lemons", "lemon");
    map.insert("limes", "lime");

    map
});

/// Lowercase and trim a name without applying synonyms
pub fn clean_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalize an ingredient name
///
/// Lowercases and trims the name, then resolves it through the synonym
/// table. Names without a synonym are returned in their cleaned form.
///
/// # Examples
///
/// ```rust
/// use grocery_list::normalization::normalize_ingredient_name;
///
/// assert_eq!(normalize_ingredient_name("  Scallions "), "green onion");
/// assert_eq!(normalize_ingredient_name("Chicken Breast"), "chicken breast");
/// ```
pub fn normalize_ingredient_name(name: &str) -> String {
    let cleaned = clean_name(name);
    match NAME_SYNONYMS.get(cleaned.as_str()) {
        Some(canonical) => {
            trace!("Resolved ingredient synonym '{}' -> '{}'", cleaned, canonical);
            canonical.to_string()
        }
        None => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_trim() {
        assert_eq!(normalize_ingredient_name("  Yellow Onion  "), "yellow onion");
    }

    #[test]
    fn test_synonym_mappings() {
        assert_eq!(normalize_ingredient_name("scallions"), "green onion");
        assert_eq!(normalize_ingredient_name("Scallion"), "green onion");
        assert_eq!(normalize_ingredient_name("capsicum"), "bell pepper");
        assert_eq!(normalize_ingredient_name("cilantro"), "coriander");
        assert_eq!(normalize_ingredient_name("garlic clove"), "garlic");
        assert_eq!(normalize_ingredient_name("garlic cloves"), "garlic");
        assert_eq!(normalize_ingredient_name("EGGS"), "egg");
    }

    #[test]
    fn test_unknown_name_passes_through() {
        assert_eq!(normalize_ingredient_name("chicken breast"), "chicken breast");
        assert_eq!(normalize_ingredient_name(""), "");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let names = [
            "Scallions",
            "  Garlic Cloves",
            "spring onion",
            "Fresh Coriander",
            "Tomatoes ",
            "mystery item",
            "",
        ];

        for name in names {
            let once = normalize_ingredient_name(name);
            assert_eq!(normalize_ingredient_name(&once), once, "not idempotent for '{}'", name);
        }
    }

    #[test]
    fn test_canonical_names_are_fixed_points() {
        for canonical in NAME_SYNONYMS.values() {
            assert_eq!(normalize_ingredient_name(canonical), *canonical);
        }
    }

    #[test]
    fn test_inner_whitespace_is_kept() {
        // Only surrounding whitespace is trimmed
        assert_eq!(normalize_ingredient_name("green  onion"), "green  onion");
    }
}
