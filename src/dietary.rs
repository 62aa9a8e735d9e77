//! # Dietary Badges
//!
//! Classifies an ingredient set along five independent dietary dimensions.
//!
//! An ingredient "matches" a keyword list when its lowercased, trimmed name
//! equals a keyword or contains one. The rule is one-directional: "salted
//! butter" contains "butter", but "salt" does not match because it is only
//! contained in a keyword, never the other way around.
//!
//! Dairy and gluten have exception lists for plant-based alternatives
//! ("coconut milk", "rice noodles"). An ingredient that matches an
//! exception is never counted as restricted for that dimension.

use crate::ingredient_model::{DietaryBadge, Ingredient, Recipe};
use crate::normalization::clean_name;
use log::debug;
use std::collections::BTreeSet;

/// Ingredients that contain meat or fish
pub const MEAT_INGREDIENTS: &[&str] = &[
    // Red meat
    "beef", "ground beef", "steak", "roast beef", "brisket",
    "pork", "ground pork", "ham", "bacon", "pork chop", "pork loin",
    "lamb", "ground lamb", "lamb chop",
    "veal",
    // Poultry
    "chicken", "chicken breast", "chicken thigh", "chicken wing", "chicken drumstick",
    "turkey", "ground turkey", "duck", "goose",
    // Fish and seafood
    "fish", "salmon", "salmon fillet", "tuna", "cod", "halibut", "tilapia",
    "trout", "bass", "snapper", "mahi", "swordfish", "sardine", "anchovy",
    "shrimp", "prawn", "crab", "lobster", "scallop", "clam", "mussel",
    "oyster", "squid", "calamari", "octopus",
    // Processed meats
    "sausage", "salami", "pepperoni", "prosciutto", "pancetta", "chorizo",
    "hot dog", "deli meat", "lunch meat",
    // Meat-based products
    "fish sauce", "anchovy paste", "worcestershire sauce", "oyster sauce",
    "chicken broth", "chicken stock", "beef broth", "beef stock",
    "bone broth", "gelatin",
];

/// Ingredients that contain gluten
pub const GLUTEN_INGREDIENTS: &[&str] = &[
    // Wheat
    "flour", "all-purpose flour", "bread flour", "wheat flour", "whole wheat flour",
    "bread", "breadcrumb", "breadcrumbs", "crouton", "croutons",
    "pasta", "spaghetti", "penne", "fettuccine", "linguine", "rigatoni",
    "macaroni", "lasagna", "noodle", "noodles", "ramen",
    "tortilla", "flour tortilla", "pita", "naan", "flatbread",
    "couscous", "bulgur", "seitan",
    // Barley and rye
    "barley", "malt", "beer",
    // Sauces
    "soy sauce", "teriyaki sauce", "hoisin sauce",
    // Baked goods
    "cake", "cookie", "muffin", "biscuit", "cracker", "crackers",
    "panko", "breading",
];

/// Ingredients that contain dairy
pub const DAIRY_INGREDIENTS: &[&str] = &[
    // Milk products
    "milk", "whole milk", "skim milk", "2% milk", "cream", "heavy cream",
    "whipping cream", "half and half", "evaporated milk", "condensed milk",
    "buttermilk", "sour cream", "creme fraiche",
    // Cheese
    "cheese", "parmesan", "parmesan cheese", "cheddar", "cheddar cheese",
    "mozzarella", "feta", "feta cheese", "gouda", "brie", "camembert",
    "gruyere", "swiss", "swiss cheese", "provolone", "monterey jack",
    "colby", "american cheese", "blue cheese", "gorgonzola", "ricotta",
    "cottage cheese", "cream cheese", "mascarpone", "queso",
    // Butter and yogurt
    "butter", "unsalted butter", "salted butter", "ghee",
    "yogurt", "greek yogurt", "plain yogurt",
    // Other
    "ice cream", "whey", "casein",
];

/// Ingredients that contain nuts, peanuts included
pub const NUT_INGREDIENTS: &[&str] = &[
    // Tree nuts
    "almond", "almonds", "almond butter", "almond milk", "almond flour",
    "walnut", "walnuts",
    "pecan", "pecans",
    "cashew", "cashews", "cashew butter",
    "pistachio", "pistachios",
    "hazelnut", "hazelnuts", "hazelnut butter",
    "macadamia", "macadamia nut",
    "brazil nut", "brazil nuts",
    "pine nut", "pine nuts",
    "chestnut", "chestnuts",
    // Peanuts
    "peanut", "peanuts", "peanut butter", "peanut oil",
    // Nut-based products
    "nutella", "praline", "marzipan", "nut butter",
];

/// Animal products beyond meat and dairy
pub const EGG_AND_HONEY_INGREDIENTS: &[&str] = &[
    "egg", "egg yolk", "egg white", "eggs", "mayonnaise", "mayo", "honey",
];

/// Plant-based items that would otherwise match the dairy list
pub const DAIRY_EXCEPTIONS: &[&str] = &[
    "coconut milk", "coconut cream", "almond milk", "oat milk", "soy milk",
    "rice milk", "cashew milk", "hemp milk", "coconut yogurt", "coconut butter",
    "vegan cheese", "vegan butter", "plant milk", "nut milk",
];

/// Gluten-free items that would otherwise match the gluten list
pub const GLUTEN_EXCEPTIONS: &[&str] = &[
    "rice noodle", "rice noodles", "rice paper", "rice flour",
    "buckwheat noodle", "buckwheat noodles", "soba noodles",
    "glass noodle", "glass noodles", "cellophane noodles", "bean thread noodles",
    "kelp noodle", "kelp noodles", "zucchini noodle", "zucchini noodles",
    "shirataki noodles", "sweet potato noodles",
    "tamari", "coconut aminos", "gluten-free soy sauce",
    "corn tortilla", "corn tortillas",
];

/// Display information for a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeInfo {
    pub label: &'static str,
    pub icon: &'static str,
}

/// Get the label and icon shown for a badge
pub fn badge_info(badge: DietaryBadge) -> BadgeInfo {
    match badge {
        DietaryBadge::Vegetarian => BadgeInfo { label: "Vegetarian", icon: "🌿" },
        DietaryBadge::Vegan => BadgeInfo { label: "Vegan", icon: "🌱" },
        DietaryBadge::GlutenFree => BadgeInfo { label: "Gluten-Free", icon: "🌾" },
        DietaryBadge::DairyFree => BadgeInfo { label: "Dairy-Free", icon: "🥛" },
        DietaryBadge::NutFree => BadgeInfo { label: "Nut-Free", icon: "🥜" },
    }
}

/// Name equals or contains any phrase of the list (never the reverse)
fn contains_any(normalized_name: &str, phrases: &[&str]) -> bool {
    phrases
        .iter()
        .any(|phrase| normalized_name == *phrase || normalized_name.contains(phrase))
}

/// Check one ingredient name against a restricted list, net of exceptions
fn ingredient_matches(name: &str, restricted: &[&str], exceptions: &[&str]) -> bool {
    let normalized = clean_name(name);

    if contains_any(&normalized, exceptions) {
        return false;
    }

    contains_any(&normalized, restricted)
}

fn has_ingredient_from(ingredients: &[Ingredient], restricted: &[&str], exceptions: &[&str]) -> bool {
    ingredients
        .iter()
        .any(|ingredient| ingredient_matches(&ingredient.name, restricted, exceptions))
}

/// Detect which dietary badges an ingredient set earns
///
/// Badges are returned in [`DietaryBadge::ALL`] order. An empty ingredient
/// list earns all five.
///
/// # Examples
///
/// ```rust
/// use grocery_list::dietary::detect_dietary_badges;
/// use grocery_list::ingredient_model::{DietaryBadge, Ingredient};
///
/// let badges = detect_dietary_badges(&[Ingredient::new("coconut milk", 1.0, "cup")]);
/// assert!(badges.contains(&DietaryBadge::DairyFree));
/// assert!(badges.contains(&DietaryBadge::Vegan));
/// ```
pub fn detect_dietary_badges(ingredients: &[Ingredient]) -> Vec<DietaryBadge> {
    let has_meat = has_ingredient_from(ingredients, MEAT_INGREDIENTS, &[]);
    let has_dairy = has_ingredient_from(ingredients, DAIRY_INGREDIENTS, DAIRY_EXCEPTIONS);
    let has_gluten = has_ingredient_from(ingredients, GLUTEN_INGREDIENTS, GLUTEN_EXCEPTIONS);
    let has_nuts = has_ingredient_from(ingredients, NUT_INGREDIENTS, &[]);
    let has_animal =
        has_meat || has_dairy || has_ingredient_from(ingredients, EGG_AND_HONEY_INGREDIENTS, &[]);

    debug!(
        "Dietary scan of {} ingredients: meat={}, dairy={}, gluten={}, nuts={}, animal={}",
        ingredients.len(),
        has_meat,
        has_dairy,
        has_gluten,
        has_nuts,
        has_animal
    );

    let mut badges = Vec::new();
    if !has_meat {
        badges.push(DietaryBadge::Vegetarian);
    }
    if !has_animal {
        badges.push(DietaryBadge::Vegan);
    }
    if !has_gluten {
        badges.push(DietaryBadge::GlutenFree);
    }
    if !has_dairy {
        badges.push(DietaryBadge::DairyFree);
    }
    if !has_nuts {
        badges.push(DietaryBadge::NutFree);
    }
    badges
}

/// Badges for a recipe, preferring its cached badges when present
pub fn recipe_badges(recipe: &Recipe) -> Vec<DietaryBadge> {
    match &recipe.dietary_badges {
        Some(cached) => cached.clone(),
        None => detect_dietary_badges(&recipe.ingredients),
    }
}

/// Badges shared by every recipe, in [`DietaryBadge::ALL`] order
///
/// An empty recipe set shares no badges.
pub fn common_dietary_badges(recipes: &[Recipe]) -> Vec<DietaryBadge> {
    let Some((first, rest)) = recipes.split_first() else {
        return Vec::new();
    };

    let mut common: BTreeSet<DietaryBadge> = recipe_badges(first).into_iter().collect();
    for recipe in rest {
        let badges: BTreeSet<DietaryBadge> = recipe_badges(recipe).into_iter().collect();
        common = common.intersection(&badges).copied().collect();
    }

    DietaryBadge::ALL
        .into_iter()
        .filter(|badge| common.contains(badge))
        .collect()
}
