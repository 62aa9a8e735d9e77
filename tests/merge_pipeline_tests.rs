//! # Merge Pipeline Tests
//!
//! End-to-end checks of scaling and merging: recipes in, grocery items out.

use grocery_list::ingredient_model::{Category, GroceryItem, Ingredient, ScaledIngredient};
use grocery_list::merge_engine::{merge_ingredients, scale_ingredients, SequentialIdGenerator};

fn merge(items: &[ScaledIngredient]) -> Vec<GroceryItem> {
    merge_ingredients(items, &mut SequentialIdGenerator::new("item"))
}

/// Order-insensitive view of a merged list
fn summary(items: &[GroceryItem]) -> Vec<(String, String, f64, Category, Vec<String>)> {
    let mut rows: Vec<_> = items
        .iter()
        .map(|item| {
            let mut sources = item.source_recipes.clone();
            sources.sort();
            (item.name.clone(), item.unit.clone(), item.quantity, item.category, sources)
        })
        .collect();
    rows.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
    rows
}

#[test]
fn test_merge_is_order_independent() {
    let items = vec![
        Ingredient::new("garlic", 2.0, "clove").with_category(Category::Produce).with_source("A"),
        Ingredient::new("Rice", 1.5, "cups").with_category(Category::Pantry).with_source("B"),
        Ingredient::new("rice", 0.5, "cup").with_category(Category::Pantry).with_source("A"),
        Ingredient::new("butter", 2.0, "tbsp").with_category(Category::Dairy).with_source("C"),
        Ingredient::new("Garlic Cloves", 1.0, "cloves").with_category(Category::Produce).with_source("C"),
    ];

    let forward = merge(&items);
    let mut reversed_input = items.clone();
    reversed_input.reverse();
    let reversed = merge(&reversed_input);

    assert_eq!(forward.len(), 3);
    assert_eq!(summary(&forward), summary(&reversed));
}

#[test]
fn test_quantities_add_across_three_recipes() {
    let items = vec![
        Ingredient::new("garlic", 2.0, "clove").with_source("Pasta"),
        Ingredient::new("garlic", 3.0, "clove").with_source("Curry"),
        Ingredient::new("garlic", 5.0, "clove").with_source("Soup"),
    ];

    let merged = merge(&items);

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].quantity, 10.0);
    assert_eq!(merged[0].source_recipes, vec!["Pasta", "Curry", "Soup"]);
}

#[test]
fn test_synonyms_share_a_line() {
    let items = vec![
        Ingredient::new("scallions", 2.0, "item").with_source("Stir Fry"),
        Ingredient::new("green onion", 1.0, "item").with_source("Omelette"),
        Ingredient::new("Spring Onions", 1.0, "item").with_source("Salad"),
    ];

    let merged = merge(&items);

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].name, "green onion");
    assert_eq!(merged[0].quantity, 4.0);
}

#[test]
fn test_different_units_stay_separate() {
    let items = vec![
        Ingredient::new("olive oil", 2.0, "tbsp").with_source("Pasta"),
        Ingredient::new("olive oil", 0.25, "cup").with_source("Salad"),
    ];

    let merged = merge(&items);

    assert_eq!(merged.len(), 2);
    let units: Vec<&str> = merged.iter().map(|item| item.unit.as_str()).collect();
    assert!(units.contains(&"tbsp"));
    assert!(units.contains(&"cup"));
}

#[test]
fn test_missing_category_becomes_other() {
    let merged = merge(&[Ingredient::new("saffron threads", 1.0, "pinch").with_source("Paella")]);
    assert_eq!(merged[0].category, Category::Other);
}

#[test]
fn test_scaled_recipes_merge_and_round() {
    let soup = vec![Ingredient::new("carrot", 1.0, "item"), Ingredient::new("broth", 250.0, "ml")];
    let stew = vec![Ingredient::new("carrots", 2.0, "item"), Ingredient::new("broth", 300.0, "ml")];

    // Soup 3 servings from a base of 2, stew 1 serving from a base of 3
    let mut scaled: Vec<ScaledIngredient> = scale_ingredients(&soup, 1.5)
        .into_iter()
        .map(|ingredient| ingredient.with_source("Soup"))
        .collect();
    scaled.extend(
        scale_ingredients(&stew, 1.0 / 3.0)
            .into_iter()
            .map(|ingredient| ingredient.with_source("Stew")),
    );

    let merged = merge(&scaled);
    let carrot = merged.iter().find(|item| item.name == "carrot").unwrap();
    let broth = merged.iter().find(|item| item.name == "broth").unwrap();

    // 1.5 + 0.667 rounds to the nearest quarter
    assert_eq!(carrot.quantity, 2.25);
    // 375 + 100 ml rounds to a whole number
    assert_eq!(broth.quantity, 475.0);
}

#[test]
fn test_no_duplicate_merge_keys() {
    let items = vec![
        Ingredient::new("Tomatoes", 2.0, "item").with_source("A"),
        Ingredient::new("tomato", 1.0, "pieces").with_source("B"),
        Ingredient::new("tomato", 100.0, "grams").with_source("C"),
        Ingredient::new("tomato", 50.0, "g").with_source("D"),
    ];

    let merged = merge(&items);
    let mut keys: Vec<(String, String)> = merged
        .iter()
        .map(|item| (item.name.clone(), item.unit.clone()))
        .collect();
    let total = keys.len();
    keys.sort();
    keys.dedup();

    assert_eq!(keys.len(), total);
    assert_eq!(total, 2);
}
