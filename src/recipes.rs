//! # Recipes
//!
//! The authoring boundary in front of the merge core. Recipes and
//! ingredients are validated here so that scaling and merging can trust
//! their inputs.
//!
//! [`RecipeBook`] holds the bundled default recipes alongside the user's
//! custom recipes. Custom recipes can be added, replaced by id, deleted
//! and bulk-imported; the bundled set is read-only.

use crate::categorizer::detect_category;
use crate::errors::RecipeValidationError;
use crate::ingredient_model::{Category, Ingredient, Recipe};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};

/// Maximum length of a recipe name
pub const MAX_RECIPE_NAME_LENGTH: usize = 255;

/// Unit assigned when an ingredient is authored without one
pub const DEFAULT_INGREDIENT_UNIT: &str = "item";

/// Bundled default recipes
const BUNDLED_RECIPES_JSON: &str = include_str!("../data/recipes.json");

/// Validates a recipe name, returning it trimmed
pub fn validate_recipe_name(name: &str) -> Result<String, RecipeValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(RecipeValidationError::EmptyName);
    }

    if trimmed.chars().count() > MAX_RECIPE_NAME_LENGTH {
        return Err(RecipeValidationError::NameTooLong(MAX_RECIPE_NAME_LENGTH));
    }

    Ok(trimmed.to_string())
}

/// Check an ingredient's name and quantity
pub fn validate_ingredient(ingredient: &Ingredient) -> Result<(), RecipeValidationError> {
    if ingredient.name.trim().is_empty() {
        return Err(RecipeValidationError::EmptyIngredientName);
    }

    if !(ingredient.quantity.is_finite() && ingredient.quantity > 0.0) {
        return Err(RecipeValidationError::InvalidQuantity {
            name: ingredient.name.clone(),
            quantity: ingredient.quantity,
        });
    }

    Ok(())
}

/// Check a whole recipe before it is saved
pub fn validate_recipe(recipe: &Recipe) -> Result<(), RecipeValidationError> {
    validate_recipe_name(&recipe.name)?;

    if recipe.servings_base < 1 {
        return Err(RecipeValidationError::InvalidServings);
    }

    if recipe.ingredients.is_empty() {
        return Err(RecipeValidationError::NoIngredients);
    }

    recipe.ingredients.iter().try_for_each(validate_ingredient)
}

/// Clean up a user-entered ingredient
///
/// Trims name and notes, drops empty notes, fills in the default unit and
/// infers the category from the name when none was chosen.
///
/// # Examples
///
/// ```rust
/// use grocery_list::ingredient_model::{Category, Ingredient};
/// use grocery_list::recipes::author_ingredient;
///
/// let ingredient = author_ingredient(Ingredient::new("  Carrots ", 3.0, "")).unwrap();
/// assert_eq!(ingredient.name, "Carrots");
/// assert_eq!(ingredient.unit, "item");
/// assert_eq!(ingredient.category, Some(Category::Produce));
/// ```
pub fn author_ingredient(draft: Ingredient) -> Result<Ingredient, RecipeValidationError> {
    validate_ingredient(&draft)?;

    let name = draft.name.trim().to_string();
    let unit = match draft.unit.trim() {
        "" => DEFAULT_INGREDIENT_UNIT.to_string(),
        unit => unit.to_string(),
    };
    let notes = draft
        .notes
        .map(|notes| notes.trim().to_string())
        .filter(|notes| !notes.is_empty());
    let category: Category = draft.category.unwrap_or_else(|| detect_category(&name));

    Ok(Ingredient {
        name,
        quantity: draft.quantity,
        unit,
        notes,
        category: Some(category),
    })
}

/// Normalize tags: trimmed, lowercased, unique, non-empty
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    normalized
}

/// Id for a newly authored custom recipe
pub fn custom_recipe_id(now: DateTime<Utc>) -> String {
    format!("custom-{}", now.timestamp_millis())
}

/// A recipe as entered by the user, before validation
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    /// Present when editing an existing recipe
    pub id: Option<String>,
    pub name: String,
    pub cuisine: String,
    pub tags: Vec<String>,
    pub servings_base: u32,
    pub ingredients: Vec<Ingredient>,
}

impl RecipeDraft {
    pub fn new(name: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            cuisine: "American".to_string(),
            tags: Vec::new(),
            servings_base: 4,
            ingredients: Vec::new(),
        }
    }

    pub fn with_cuisine(mut self, cuisine: &str) -> Self {
        self.cuisine = cuisine.to_string();
        self
    }

    pub fn with_servings(mut self, servings_base: u32) -> Self {
        self.servings_base = servings_base;
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Validate the draft and turn it into a recipe
    ///
    /// New recipes get a `custom-{millis}` id derived from `now`.
    pub fn build(self, now: DateTime<Utc>) -> Result<Recipe, RecipeValidationError> {
        let name = validate_recipe_name(&self.name)?;

        if self.servings_base < 1 {
            return Err(RecipeValidationError::InvalidServings);
        }

        if self.ingredients.is_empty() {
            return Err(RecipeValidationError::NoIngredients);
        }

        let ingredients = self
            .ingredients
            .into_iter()
            .map(author_ingredient)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Recipe {
            id: self.id.unwrap_or_else(|| custom_recipe_id(now)),
            name,
            cuisine: self.cuisine.trim().to_string(),
            tags: normalize_tags(&self.tags),
            servings_base: self.servings_base,
            ingredients,
            dietary_badges: None,
        })
    }
}

/// Parse the bundled default recipes
pub fn bundled_recipes() -> Vec<Recipe> {
    match serde_json::from_str::<Vec<Recipe>>(BUNDLED_RECIPES_JSON) {
        Ok(recipes) => recipes,
        Err(e) => {
            warn!("Bundled recipes could not be parsed: {}", e);
            Vec::new()
        }
    }
}

/// Default and custom recipes
#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    defaults: Vec<Recipe>,
    custom: Vec<Recipe>,
}

impl RecipeBook {
    pub fn new(defaults: Vec<Recipe>, custom: Vec<Recipe>) -> Self {
        Self { defaults, custom }
    }

    /// Book with the bundled default recipes and the given custom recipes
    pub fn with_bundled(custom: Vec<Recipe>) -> Self {
        Self::new(bundled_recipes(), custom)
    }

    pub fn defaults(&self) -> &[Recipe] {
        &self.defaults
    }

    pub fn custom_recipes(&self) -> &[Recipe] {
        &self.custom
    }

    /// All recipes, defaults first
    pub fn all(&self) -> impl Iterator<Item = &Recipe> {
        self.defaults.iter().chain(self.custom.iter())
    }

    pub fn len(&self) -> usize {
        self.defaults.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a recipe by id; a custom recipe shadows a default with the same id
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.custom
            .iter()
            .find(|r| r.id == id)
            .or_else(|| self.defaults.iter().find(|r| r.id == id))
    }

    pub fn is_custom(&self, id: &str) -> bool {
        self.custom.iter().any(|r| r.id == id)
    }

    /// Save a custom recipe: replaces the one with the same id, or appends
    pub fn save(&mut self, recipe: Recipe) -> Result<(), RecipeValidationError> {
        validate_recipe(&recipe)?;

        match self.custom.iter_mut().find(|r| r.id == recipe.id) {
            Some(existing) => {
                debug!("Replacing custom recipe '{}'", recipe.id);
                *existing = recipe;
            }
            None => {
                debug!("Adding custom recipe '{}'", recipe.id);
                self.custom.push(recipe);
            }
        }

        Ok(())
    }

    /// Delete a custom recipe. Returns false when no custom recipe has the id.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.custom.len();
        self.custom.retain(|r| r.id != id);
        before != self.custom.len()
    }

    /// Import recipes, skipping ids already present among custom recipes
    ///
    /// Recipes without an id get one derived from `now`; invalid recipes
    /// are skipped. Returns the number imported.
    pub fn import(&mut self, recipes: Vec<Recipe>, now: DateTime<Utc>) -> usize {
        let base_id = custom_recipe_id(now);
        let mut imported = 0;

        for (index, mut recipe) in recipes.into_iter().enumerate() {
            if recipe.id.trim().is_empty() {
                recipe.id = format!("{}-{}", base_id, index);
            }

            if self.is_custom(&recipe.id) {
                debug!("Skipping import of existing recipe '{}'", recipe.id);
                continue;
            }

            if let Err(e) = validate_recipe(&recipe) {
                warn!("Skipping invalid imported recipe '{}': {}", recipe.name, e);
                continue;
            }

            self.custom.push(recipe);
            imported += 1;
        }

        info!("Imported {} recipes", imported);
        imported
    }
}
