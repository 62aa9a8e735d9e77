//! # Merge Engine
//!
//! Turns the scaled ingredient lists of several recipes into one
//! deduplicated shopping list.
//!
//! ## Pipeline
//!
//! 1. [`scale_ingredients`] multiplies each recipe's quantities by
//!    `servings / servings_base`.
//! 2. The caller tags each scaled ingredient with its recipe's display name.
//! 3. [`merge_ingredients`] groups the flattened list by merge key
//!    `(normalized name, normalized unit)`, sums quantities, unions notes
//!    and provenance, then rounds each total for display.
//!
//! Units are compared literally after normalization: "2 tbsp olive oil"
//! and "0.25 cup olive oil" stay on separate lines even though the two
//! units are convertible.
//!
//! Ids come from an injected [`IdGenerator`] so merging stays a pure
//! function of its inputs.

use crate::ingredient_model::{Category, GroceryItem, Ingredient, ScaledIngredient};
use crate::normalization::normalize_ingredient_name;
use crate::rounding::round_quantity;
use crate::units::normalize_unit;
use log::{debug, info, trace};
use rand::Rng;
use std::collections::HashMap;

/// Source of unique grocery item ids
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Nine-character base-36 ids drawn from the thread RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LENGTH: usize = 9;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&mut self) -> String {
        let mut rng = rand::thread_rng();
        (0..ID_LENGTH)
            .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect()
    }
}

/// Deterministic `{prefix}-{n}` ids, counting from zero
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: usize,
}

impl SequentialIdGenerator {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: 0,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Scale every ingredient quantity by `ratio`
///
/// Returns a new list of the same length and order; names, units, notes
/// and categories are copied unchanged.
///
/// # Examples
///
/// ```rust
/// use grocery_list::ingredient_model::Ingredient;
/// use grocery_list::merge_engine::scale_ingredients;
///
/// let scaled = scale_ingredients(&[Ingredient::new("flour", 2.0, "cup")], 1.5);
/// assert_eq!(scaled[0].quantity, 3.0);
/// ```
pub fn scale_ingredients(ingredients: &[Ingredient], ratio: f64) -> Vec<Ingredient> {
    ingredients
        .iter()
        .map(|ingredient| Ingredient {
            quantity: ingredient.quantity * ratio,
            ..ingredient.clone()
        })
        .collect()
}

/// Merge key: normalized name and normalized unit
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergeKey {
    pub name: String,
    pub unit: String,
}

impl MergeKey {
    pub fn for_ingredient(ingredient: &Ingredient) -> Self {
        Self {
            name: normalize_ingredient_name(&ingredient.name),
            unit: normalize_unit(&ingredient.unit),
        }
    }
}

/// Running totals for one merge key
#[derive(Debug)]
struct Accumulator {
    key: MergeKey,
    category: Category,
    quantity: f64,
    notes: Vec<String>,
    source_recipes: Vec<String>,
}

impl Accumulator {
    fn seed(key: MergeKey, scaled: &ScaledIngredient) -> Self {
        let ingredient = &scaled.ingredient;
        Self {
            key,
            category: ingredient.category.unwrap_or_default(),
            quantity: ingredient.quantity,
            notes: ingredient
                .notes
                .iter()
                .filter(|notes| !notes.is_empty())
                .cloned()
                .collect(),
            source_recipes: vec![scaled.source_recipe.clone()],
        }
    }

    fn absorb(&mut self, scaled: &ScaledIngredient) {
        let ingredient = &scaled.ingredient;
        self.quantity += ingredient.quantity;

        if let Some(notes) = ingredient.notes.as_ref().filter(|notes| !notes.is_empty()) {
            if !self.notes.contains(notes) {
                self.notes.push(notes.clone());
            }
        }

        if !self.source_recipes.contains(&scaled.source_recipe) {
            self.source_recipes.push(scaled.source_recipe.clone());
        }
    }

    fn into_item(self, ids: &mut dyn IdGenerator) -> GroceryItem {
        GroceryItem {
            id: ids.next_id(),
            quantity: round_quantity(self.quantity, &self.key.unit),
            name: self.key.name,
            unit: self.key.unit,
            category: self.category,
            notes: if self.notes.is_empty() {
                None
            } else {
                Some(self.notes.join(", "))
            },
            checked: false,
            source_recipes: self.source_recipes,
        }
    }
}

/// Merge scaled ingredients from several recipes into grocery items
///
/// No two returned items share a merge key. Items come out in the order
/// their key was first seen; callers should not rely on it and group by
/// category for display.
///
/// # Examples
///
/// ```rust
/// use grocery_list::ingredient_model::Ingredient;
/// use grocery_list::merge_engine::{merge_ingredients, SequentialIdGenerator};
///
/// let items = vec![
///     Ingredient::new("scallions", 2.0, "item").with_source("Stir Fry"),
///     Ingredient::new("Green Onion", 3.0, "pieces").with_source("Omelette"),
/// ];
///
/// let merged = merge_ingredients(&items, &mut SequentialIdGenerator::new("item"));
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].name, "green onion");
/// assert_eq!(merged[0].quantity, 5.0);
/// ```
pub fn merge_ingredients(items: &[ScaledIngredient], ids: &mut dyn IdGenerator) -> Vec<GroceryItem> {
    let mut accumulators: Vec<Accumulator> = Vec::new();
    let mut index_by_key: HashMap<MergeKey, usize> = HashMap::new();

    debug!("Merging {} scaled ingredients", items.len());

    for scaled in items {
        let key = MergeKey::for_ingredient(&scaled.ingredient);

        match index_by_key.get(&key) {
            Some(&index) => {
                trace!(
                    "Merging '{}' from '{}' into existing {}|{}",
                    scaled.ingredient.name,
                    scaled.source_recipe,
                    key.name,
                    key.unit
                );
                accumulators[index].absorb(scaled);
            }
            None => {
                trace!("New merge key {}|{}", key.name, key.unit);
                index_by_key.insert(key.clone(), accumulators.len());
                accumulators.push(Accumulator::seed(key, scaled));
            }
        }
    }

    let merged: Vec<GroceryItem> = accumulators
        .into_iter()
        .map(|accumulator| accumulator.into_item(ids))
        .collect();

    info!("Merged {} ingredients into {} grocery items", items.len(), merged.len());
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> SequentialIdGenerator {
        SequentialIdGenerator::new("test")
    }

    #[test]
    fn test_scale_by_ratio() {
        let ingredients = vec![
            Ingredient::new("flour", 2.0, "cup").with_category(Category::Pantry),
            Ingredient::new("sugar", 1.0, "cup").with_category(Category::Pantry),
        ];

        let scaled = scale_ingredients(&ingredients, 2.0);

        assert_eq!(scaled[0].quantity, 4.0);
        assert_eq!(scaled[1].quantity, 2.0);
        // Input untouched
        assert_eq!(ingredients[0].quantity, 2.0);
    }

    #[test]
    fn test_scale_fractional_ratio() {
        let ingredients = vec![Ingredient::new("salt", 1.0, "tsp")];
        assert_eq!(scale_ingredients(&ingredients, 0.5)[0].quantity, 0.5);
    }

    #[test]
    fn test_scale_preserves_other_fields() {
        let ingredients = vec![Ingredient::new("onion", 1.0, "item")
            .with_notes("diced")
            .with_category(Category::Produce)];

        let scaled = scale_ingredients(&ingredients, 2.0);

        assert_eq!(scaled[0].name, "onion");
        assert_eq!(scaled[0].unit, "item");
        assert_eq!(scaled[0].notes, Some("diced".to_string()));
        assert_eq!(scaled[0].category, Some(Category::Produce));
    }

    #[test]
    fn test_merge_empty_input() {
        assert!(merge_ingredients(&[], &mut ids()).is_empty());
    }

    #[test]
    fn test_merge_same_name_and_unit() {
        let items = vec![
            Ingredient::new("garlic", 2.0, "clove").with_category(Category::Produce).with_source("recipe1"),
            Ingredient::new("garlic", 3.0, "clove").with_category(Category::Produce).with_source("recipe2"),
        ];

        let merged = merge_ingredients(&items, &mut ids());

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "garlic");
        assert_eq!(merged[0].quantity, 5.0);
        assert_eq!(merged[0].unit, "clove");
        assert_eq!(merged[0].source_recipes, vec!["recipe1", "recipe2"]);
        assert!(!merged[0].checked);
    }

    #[test]
    fn test_merge_normalizes_units() {
        let items = vec![
            Ingredient::new("salt", 1.0, "teaspoon").with_source("recipe1"),
            Ingredient::new("salt", 0.5, "tsp").with_source("recipe2"),
        ];

        let merged = merge_ingredients(&items, &mut ids());

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].quantity, 1.5);
        assert_eq!(merged[0].unit, "tsp");
    }

    #[test]
    fn test_merge_collects_distinct_notes() {
        let items = vec![
            Ingredient::new("onion", 1.0, "item").with_notes("diced").with_source("recipe1"),
            Ingredient::new("onion", 1.0, "item").with_notes("sliced").with_source("recipe2"),
            Ingredient::new("onion", 1.0, "item").with_notes("diced").with_source("recipe3"),
            Ingredient::new("onion", 1.0, "item").with_source("recipe4"),
        ];

        let merged = merge_ingredients(&items, &mut ids());

        assert_eq!(merged[0].notes, Some("diced, sliced".to_string()));
        assert_eq!(merged[0].quantity, 4.0);
    }

    #[test]
    fn test_empty_notes_count_as_absent() {
        let items = vec![
            Ingredient::new("onion", 1.0, "item").with_notes("").with_source("recipe1"),
            Ingredient::new("onion", 1.0, "item").with_notes("diced").with_source("recipe2"),
            Ingredient::new("leek", 1.0, "item").with_notes("").with_source("recipe1"),
        ];

        let merged = merge_ingredients(&items, &mut ids());

        assert_eq!(merged[0].notes, Some("diced".to_string()));
        assert_eq!(merged[1].notes, None);
    }

    #[test]
    fn test_merge_without_notes_has_none() {
        let items = vec![Ingredient::new("rice", 1.0, "cup").with_source("recipe1")];
        assert_eq!(merge_ingredients(&items, &mut ids())[0].notes, None);
    }

    #[test]
    fn test_merge_dedups_source_recipes() {
        let items = vec![
            Ingredient::new("egg", 1.0, "item").with_source("Cake"),
            Ingredient::new("eggs", 2.0, "item").with_source("Cake"),
        ];

        let merged = merge_ingredients(&items, &mut ids());

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].source_recipes, vec!["Cake"]);
    }

    #[test]
    fn test_first_category_wins_and_missing_defaults_to_other() {
        let items = vec![
            Ingredient::new("mystery item", 1.0, "item").with_source("r1"),
            Ingredient::new("mystery item", 1.0, "item")
                .with_category(Category::Pantry)
                .with_source("r2"),
        ];

        let merged = merge_ingredients(&items, &mut ids());

        assert_eq!(merged[0].category, Category::Other);
    }

    #[test]
    fn test_merge_rounds_totals() {
        let items = vec![
            Ingredient::new("chicken", 250.3, "g").with_source("r1"),
            Ingredient::new("chicken", 250.3, "grams").with_source("r2"),
            Ingredient::new("milk", 0.33, "cup").with_source("r1"),
            Ingredient::new("milk", 0.33, "cup").with_source("r2"),
        ];

        let merged = merge_ingredients(&items, &mut ids());

        assert_eq!(merged[0].quantity, 501.0);
        assert_eq!(merged[1].quantity, 0.75);
    }

    #[test]
    fn test_ids_come_from_generator() {
        let items = vec![
            Ingredient::new("a", 1.0, "item").with_source("r"),
            Ingredient::new("b", 1.0, "item").with_source("r"),
        ];

        let merged = merge_ingredients(&items, &mut ids());

        assert_eq!(merged[0].id, "test-0");
        assert_eq!(merged[1].id, "test-1");
    }

    #[test]
    fn test_random_ids_shape() {
        let mut generator = RandomIdGenerator;
        let first = generator.next_id();
        let second = generator.next_id();

        assert_eq!(first.len(), 9);
        assert!(first.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_ne!(first, second);
    }

    #[test]
    fn test_merge_key_for_ingredient() {
        let key = MergeKey::for_ingredient(&Ingredient::new(" Garlic Cloves ", 2.0, "Cloves"));
        assert_eq!(key, MergeKey { name: "garlic".to_string(), unit: "clove".to_string() });
    }
}
