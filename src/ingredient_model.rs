//! # Recipe and Grocery Data Model
//!
//! This module defines the data structures shared by the merge pipeline:
//! recipe-authored ingredients, recipes and selections, the scaled
//! intermediate form that carries provenance, and the grocery items the
//! merge engine produces.
//!
//! ## Core Concepts
//!
//! - **Ingredient**: A food item with a quantity, unit and optional notes/category
//! - **Recipe**: A named list of ingredients written for `servings_base` servings
//! - **ScaledIngredient**: An ingredient scaled for a selection, tagged with its recipe name
//! - **GroceryItem**: One deduplicated line of the shopping list
//!
//! ## Usage
//!
//! ```rust
//! use grocery_list::ingredient_model::{Category, Ingredient};
//!
//! let onion = Ingredient::new("onion", 1.0, "item")
//!     .with_notes("diced")
//!     .with_category(Category::Produce);
//!
//! assert_eq!(onion.to_string(), "1 item onion (diced)");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store section an ingredient belongs to. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Category {
    Produce,
    Meat,
    Dairy,
    Pantry,
    Frozen,
    Spices,
    #[default]
    Other,
}

impl Category {
    /// All categories in canonical display order
    pub const ALL: [Category; 7] = [
        Category::Produce,
        Category::Meat,
        Category::Dairy,
        Category::Pantry,
        Category::Frozen,
        Category::Spices,
        Category::Other,
    ];

    /// Get the display name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Produce => "Produce",
            Category::Meat => "Meat",
            Category::Dairy => "Dairy",
            Category::Pantry => "Pantry",
            Category::Frozen => "Frozen",
            Category::Spices => "Spices",
            Category::Other => "Other",
        }
    }

    /// Single-letter code used by share links.
    ///
    /// Pantry uses a lowercase `a` because `P` already belongs to Produce.
    pub fn share_code(&self) -> char {
        match self {
            Category::Produce => 'P',
            Category::Meat => 'M',
            Category::Dairy => 'D',
            Category::Pantry => 'a',
            Category::Frozen => 'F',
            Category::Spices => 'S',
            Category::Other => 'O',
        }
    }

    /// Inverse of [`Category::share_code`]
    pub fn from_share_code(code: char) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.share_code() == code)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown category: {wanted}"))
    }
}

/// An ingredient as written in a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Free-text name (e.g., "Yellow Onion", "scallions")
    pub name: String,

    /// Amount for the recipe's base servings
    pub quantity: f64,

    /// Free-text unit (e.g., "tablespoons", "g", "item")
    pub unit: String,

    /// Optional preparation notes (e.g., "diced")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Store section; inferred at authoring time when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Ingredient {
    /// Create a new ingredient without notes or category
    pub fn new(name: &str, quantity: f64, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
            notes: None,
            category: None,
        }
    }

    /// Add preparation notes to this ingredient
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    /// Set the store category of this ingredient
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Tag this ingredient with the recipe it came from
    pub fn with_source(self, source_recipe: &str) -> ScaledIngredient {
        ScaledIngredient {
            ingredient: self,
            source_recipe: source_recipe.to_string(),
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quantity.fract() == 0.0 {
            write!(f, "{} {} {}", self.quantity as i64, self.unit, self.name)?;
        } else {
            write!(f, "{} {} {}", self.quantity, self.unit, self.name)?;
        }

        if let Some(notes) = &self.notes {
            write!(f, " ({})", notes)?;
        }

        Ok(())
    }
}

/// A recipe with quantities written for `servings_base` servings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Empty when imported without an id; one is assigned on import
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub cuisine: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub servings_base: u32,
    pub ingredients: Vec<Ingredient>,
    /// Previously computed dietary badges, if cached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_badges: Option<Vec<DietaryBadge>>,
}

/// A user's choice to include a recipe at a given serving count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedRecipe {
    pub recipe_id: String,
    pub servings: u32,
}

/// An ingredient scaled for one selection, tagged with its recipe's display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledIngredient {
    #[serde(flatten)]
    pub ingredient: Ingredient,
    pub source_recipe: String,
}

/// One line of the shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItem {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub checked: bool,
    pub source_recipes: Vec<String>,
}

impl fmt::Display for GroceryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::export::format_grocery_item_text(self))
    }
}

/// Dietary classification derived from an ingredient set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryBadge {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    NutFree,
}

impl DietaryBadge {
    /// All badges in display order
    pub const ALL: [DietaryBadge; 5] = [
        DietaryBadge::Vegetarian,
        DietaryBadge::Vegan,
        DietaryBadge::GlutenFree,
        DietaryBadge::DairyFree,
        DietaryBadge::NutFree,
    ];

    /// Get the kebab-case identifier of the badge
    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryBadge::Vegetarian => "vegetarian",
            DietaryBadge::Vegan => "vegan",
            DietaryBadge::GlutenFree => "gluten-free",
            DietaryBadge::DairyFree => "dairy-free",
            DietaryBadge::NutFree => "nut-free",
        }
    }
}

impl fmt::Display for DietaryBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
