//! # Session State
//!
//! One owned container for everything a user works with: the recipe book,
//! the recipe selection, the grocery list with its undo history, and the
//! store-mode preferences. Nothing here is global; the session is loaded
//! from a [`KeyValueStore`] at startup and saved back explicitly.

use crate::config::AppConfig;
use crate::errors::{RecipeValidationError, ShareDecodeError};
use crate::export::{export_as_text_with_order, group_by_category};
use crate::history::History;
use crate::ingredient_model::{Category, GroceryItem, Ingredient, Recipe, ScaledIngredient, SelectedRecipe};
use crate::merge_engine::{merge_ingredients, scale_ingredients, IdGenerator, RandomIdGenerator};
use crate::recipes::{author_ingredient, RecipeBook, RecipeDraft};
use crate::share::{
    generate_share_text, generate_share_title, generate_share_url, try_decompress_list_data,
    try_parse_share_url,
};
use crate::storage::KeyValueStore;
use crate::store_mode::{category_order, StoreLayout};
use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const SELECTED_RECIPES_KEY: &str = "grocery-app-selected-recipes";
pub const CUSTOM_RECIPES_KEY: &str = "grocery-app-custom-recipes";
pub const GROCERY_LIST_KEY: &str = "grocery-app-grocery-list";
pub const LIST_HISTORY_KEY: &str = "grocery-app-list-history";
pub const STORE_MODE_KEY: &str = "grocery-store-mode";
pub const STORE_LAYOUT_KEY: &str = "grocery-store-layout";

/// Provenance of items the user adds by hand
pub const CUSTOM_SOURCE: &str = "Custom";

/// Partial edit of a grocery item; `None` fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroceryItemUpdate {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub category: Option<Category>,
    /// `Some(None)` removes the notes
    pub notes: Option<Option<String>>,
    pub checked: Option<bool>,
}

impl GroceryItemUpdate {
    fn apply(self, item: &mut GroceryItem) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(unit) = self.unit {
            item.unit = unit;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(notes) = self.notes {
            item.notes = notes;
        }
        if let Some(checked) = self.checked {
            item.checked = checked;
        }
    }
}

/// Undo and redo snapshots of the grocery list, as persisted
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredHistory {
    #[serde(default)]
    past: Vec<Vec<GroceryItem>>,
    #[serde(default)]
    future: Vec<Vec<GroceryItem>>,
}

/// A user's grocery-planning session
pub struct Session {
    config: AppConfig,
    book: RecipeBook,
    selected: Vec<SelectedRecipe>,
    list: History<Vec<GroceryItem>>,
    store_mode: bool,
    store_layout: StoreLayout,
    ids: Box<dyn IdGenerator>,
}

impl Session {
    /// Fresh session with no selection and an empty list
    pub fn new(config: AppConfig, book: RecipeBook) -> Self {
        let list = History::with_max_history(Vec::new(), config.max_history);
        Self {
            store_mode: config.store_mode.enabled,
            store_layout: config.store_mode.layout,
            config,
            book,
            selected: Vec::new(),
            list,
            ids: Box::new(RandomIdGenerator),
        }
    }

    /// Replace the grocery item id source
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Restore a session from persisted state
    ///
    /// Bundled recipes are always available; custom recipes, selection,
    /// list with its undo history and store-mode preferences come from the
    /// store. Missing or corrupt entries fall back to their defaults.
    pub fn load<S: KeyValueStore>(config: AppConfig, store: &S) -> Self {
        let custom: Vec<Recipe> = store.load(CUSTOM_RECIPES_KEY, Vec::new());
        let mut session = Self::new(config, RecipeBook::with_bundled(custom));

        session.selected = store.load(SELECTED_RECIPES_KEY, Vec::new());
        let items: Vec<GroceryItem> = store.load(GROCERY_LIST_KEY, Vec::new());
        let history: StoredHistory = store.load(LIST_HISTORY_KEY, StoredHistory::default());
        session.list = History::from_parts(
            history.past,
            items,
            history.future,
            session.config.max_history,
        );
        session.store_mode = store.load(STORE_MODE_KEY, session.store_mode);
        session.store_layout = store.load(STORE_LAYOUT_KEY, session.store_layout);

        info!(
            recipes = session.book.len(),
            selected = session.selected.len(),
            items = session.list.present().len(),
            undo_depth = session.list.undo_depth(),
            "Session loaded"
        );
        session
    }

    /// Persist the session, undo history included
    pub fn save<S: KeyValueStore>(&self, store: &mut S) -> Result<()> {
        let history = StoredHistory {
            past: self.list.past().cloned().collect(),
            future: self.list.future().cloned().collect(),
        };

        store.save(SELECTED_RECIPES_KEY, &self.selected)?;
        store.save(CUSTOM_RECIPES_KEY, self.book.custom_recipes())?;
        store.save(GROCERY_LIST_KEY, self.list.present())?;
        store.save(LIST_HISTORY_KEY, &history)?;
        store.save(STORE_MODE_KEY, &self.store_mode)?;
        store.save(STORE_LAYOUT_KEY, &self.store_layout)?;
        debug!(items = self.list.present().len(), "Session saved");
        Ok(())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn recipes(&self) -> &RecipeBook {
        &self.book
    }

    // Recipe book

    /// Validate and save a recipe draft, returning its id
    pub fn save_recipe(&mut self, draft: RecipeDraft) -> Result<String, RecipeValidationError> {
        let recipe = draft.build(Utc::now())?;
        let id = recipe.id.clone();
        self.book.save(recipe)?;
        info!(recipe_id = %id, "Recipe saved");
        Ok(id)
    }

    /// Delete a custom recipe and drop it from the selection
    pub fn delete_recipe(&mut self, recipe_id: &str) -> bool {
        let deleted = self.book.delete(recipe_id);
        if deleted {
            self.selected.retain(|s| s.recipe_id != recipe_id);
            info!(recipe_id, "Recipe deleted");
        }
        deleted
    }

    /// Import custom recipes, skipping ids that already exist
    pub fn import_recipes(&mut self, recipes: Vec<Recipe>) -> usize {
        self.book.import(recipes, Utc::now())
    }

    // Selection

    pub fn selected_recipes(&self) -> &[SelectedRecipe] {
        &self.selected
    }

    pub fn is_selected(&self, recipe_id: &str) -> bool {
        self.selected.iter().any(|s| s.recipe_id == recipe_id)
    }

    fn base_servings(&self, recipe: &Recipe) -> u32 {
        if recipe.servings_base >= 1 {
            recipe.servings_base
        } else {
            self.config.default_servings
        }
    }

    /// Select an unselected recipe at its base servings, or deselect it
    ///
    /// Returns the new selection state, or `None` for an unknown recipe.
    pub fn toggle_recipe(&mut self, recipe_id: &str) -> Option<bool> {
        if self.is_selected(recipe_id) {
            self.remove_recipe(recipe_id);
            return Some(false);
        }

        let Some(recipe) = self.book.get(recipe_id) else {
            warn!(recipe_id, "Cannot select unknown recipe");
            return None;
        };

        let servings = self.base_servings(recipe);
        self.selected.push(SelectedRecipe {
            recipe_id: recipe_id.to_string(),
            servings,
        });
        debug!(recipe_id, servings, "Recipe selected");
        Some(true)
    }

    /// Select a recipe at the given servings (its base servings when `None`)
    ///
    /// An already selected recipe keeps its place and gets the new servings.
    pub fn select_recipe(&mut self, recipe_id: &str, servings: Option<u32>) -> bool {
        let Some(recipe) = self.book.get(recipe_id) else {
            warn!(recipe_id, "Cannot select unknown recipe");
            return false;
        };
        let servings = servings.unwrap_or_else(|| self.base_servings(recipe)).max(1);

        match self.selected.iter_mut().find(|s| s.recipe_id == recipe_id) {
            Some(selected) => selected.servings = servings,
            None => self.selected.push(SelectedRecipe {
                recipe_id: recipe_id.to_string(),
                servings,
            }),
        }
        debug!(recipe_id, servings, "Recipe selected");
        true
    }

    pub fn remove_recipe(&mut self, recipe_id: &str) -> bool {
        let before = self.selected.len();
        self.selected.retain(|s| s.recipe_id != recipe_id);
        before != self.selected.len()
    }

    /// Change the servings of a selected recipe; at least one serving
    pub fn set_servings(&mut self, recipe_id: &str, servings: u32) -> bool {
        match self.selected.iter_mut().find(|s| s.recipe_id == recipe_id) {
            Some(selected) => {
                selected.servings = servings.max(1);
                true
            }
            None => false,
        }
    }

    /// Selected recipes that still exist, with their servings
    pub fn selected_recipe_details(&self) -> Vec<(&Recipe, u32)> {
        self.selected
            .iter()
            .filter_map(|s| self.book.get(&s.recipe_id).map(|recipe| (recipe, s.servings)))
            .collect()
    }

    // Grocery list

    /// Scale and merge the selected recipes into a new grocery list
    ///
    /// Selections whose recipe no longer exists are skipped. The new list
    /// replaces the old one and clears undo history.
    pub fn generate_list(&mut self) -> &[GroceryItem] {
        let mut scaled: Vec<ScaledIngredient> = Vec::new();

        for selected in &self.selected {
            let Some(recipe) = self.book.get(&selected.recipe_id) else {
                warn!(recipe_id = %selected.recipe_id, "Skipping missing recipe");
                continue;
            };

            let ratio = f64::from(selected.servings) / f64::from(self.base_servings(recipe));
            scaled.extend(
                scale_ingredients(&recipe.ingredients, ratio)
                    .into_iter()
                    .map(|ingredient| ingredient.with_source(&recipe.name)),
            );
        }

        let merged = merge_ingredients(&scaled, self.ids.as_mut());
        info!(
            recipes = self.selected.len(),
            ingredients = scaled.len(),
            items = merged.len(),
            "Generated grocery list"
        );

        self.list.reset(merged);
        self.list.present()
    }

    pub fn grocery_list(&self) -> &[GroceryItem] {
        self.list.present()
    }

    fn edit_list<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut Vec<GroceryItem>),
    {
        self.list.update(|items| {
            let mut next = items.clone();
            edit(&mut next);
            next
        });
    }

    fn has_item(&self, item_id: &str) -> bool {
        self.list.present().iter().any(|item| item.id == item_id)
    }

    /// Flip an item's checked flag
    pub fn toggle_item(&mut self, item_id: &str) -> bool {
        if !self.has_item(item_id) {
            return false;
        }

        self.edit_list(|items| {
            for item in items.iter_mut().filter(|item| item.id == item_id) {
                item.checked = !item.checked;
            }
        });
        true
    }

    /// Apply a partial edit to an item
    pub fn update_item(&mut self, item_id: &str, update: GroceryItemUpdate) -> bool {
        if !self.has_item(item_id) {
            return false;
        }

        self.edit_list(|items| {
            if let Some(item) = items.iter_mut().find(|item| item.id == item_id) {
                update.apply(item);
            }
        });
        true
    }

    pub fn delete_item(&mut self, item_id: &str) -> bool {
        if !self.has_item(item_id) {
            return false;
        }

        self.edit_list(|items| items.retain(|item| item.id != item_id));
        true
    }

    /// Add a hand-entered item to the list, returning its id
    pub fn add_custom_item(&mut self, ingredient: Ingredient) -> Result<String, RecipeValidationError> {
        let authored = author_ingredient(ingredient)?;
        let item = GroceryItem {
            id: self.ids.next_id(),
            name: authored.name,
            quantity: authored.quantity,
            unit: authored.unit,
            category: authored.category.unwrap_or_default(),
            notes: authored.notes,
            checked: false,
            source_recipes: vec![CUSTOM_SOURCE.to_string()],
        };

        let id = item.id.clone();
        info!(item_id = %id, name = %item.name, "Custom item added");
        self.edit_list(|items| items.push(item));
        Ok(id)
    }

    /// Remove every checked item, returning how many were removed
    pub fn clear_checked(&mut self) -> usize {
        let checked = self.list.present().iter().filter(|item| item.checked).count();
        if checked > 0 {
            self.edit_list(|items| items.retain(|item| !item.checked));
        }
        checked
    }

    pub fn undo(&mut self) -> bool {
        self.list.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.list.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.list.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.list.can_redo()
    }

    /// Clear the selection and the list
    pub fn reset(&mut self) {
        self.selected.clear();
        self.list.reset(Vec::new());
        info!("Session reset");
    }

    // Sharing

    /// Replace the list with shared items, as an undoable edit
    ///
    /// An empty shared list is ignored. Returns the number of items imported.
    pub fn import_shared(&mut self, items: Vec<GroceryItem>) -> usize {
        if items.is_empty() {
            debug!("Shared list is empty, nothing to import");
            return 0;
        }

        let count = items.len();
        self.list.set(items);
        info!(items = count, "Imported shared list");
        count
    }

    /// Import from a share URL or a bare share code
    pub fn import_share_link(&mut self, link: &str) -> Result<usize, ShareDecodeError> {
        let items = if link.contains("list=") {
            try_parse_share_url(link)?
        } else {
            try_decompress_list_data(link)?
        };
        Ok(self.import_shared(items))
    }

    pub fn share_url(&self, base_url: &str) -> String {
        generate_share_url(self.list.present(), base_url)
    }

    fn selected_recipe_list(&self) -> Vec<Recipe> {
        self.selected_recipe_details()
            .into_iter()
            .map(|(recipe, _)| recipe.clone())
            .collect()
    }

    pub fn share_title(&self) -> String {
        generate_share_title(&self.selected_recipe_list(), self.list.present().len())
    }

    pub fn share_text(&self) -> String {
        generate_share_text(&self.selected_recipe_list(), self.list.present().len())
    }

    // Store mode

    pub fn store_mode(&self) -> bool {
        self.store_mode
    }

    pub fn set_store_mode(&mut self, enabled: bool) {
        self.store_mode = enabled;
    }

    pub fn toggle_store_mode(&mut self) -> bool {
        self.store_mode = !self.store_mode;
        self.store_mode
    }

    pub fn store_layout(&self) -> StoreLayout {
        self.store_layout
    }

    pub fn set_store_layout(&mut self, layout: StoreLayout) {
        self.store_layout = layout;
    }

    /// Category order for display under the current preferences
    pub fn category_order(&self) -> Vec<Category> {
        category_order(self.store_mode, self.store_layout)
    }

    /// The list as a plain-text checklist in display order
    pub fn export_text(&self) -> String {
        let grouped = group_by_category(self.list.present());
        export_as_text_with_order(&grouped, &self.category_order())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge_engine::SequentialIdGenerator;
    use crate::storage::MemoryStore;

    fn recipe(id: &str, name: &str, servings_base: u32, ingredients: Vec<Ingredient>) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            cuisine: "Test".to_string(),
            tags: vec![],
            servings_base,
            ingredients,
            dietary_badges: None,
        }
    }

    fn session() -> Session {
        let book = RecipeBook::new(
            vec![
                recipe(
                    "soup",
                    "Soup",
                    2,
                    vec![
                        Ingredient::new("onion", 1.0, "item").with_category(Category::Produce),
                        Ingredient::new("broth", 2.0, "cups").with_category(Category::Pantry),
                    ],
                ),
                recipe(
                    "salad",
                    "Salad",
                    4,
                    vec![Ingredient::new("Onion", 2.0, "item").with_category(Category::Produce)],
                ),
            ],
            vec![],
        );
        Session::new(AppConfig::default(), book).with_id_generator(SequentialIdGenerator::new("item"))
    }

    #[test]
    fn test_toggle_recipe_selects_at_base_servings() {
        let mut session = session();
        assert_eq!(session.toggle_recipe("soup"), Some(true));
        assert_eq!(session.selected_recipes()[0].servings, 2);

        assert_eq!(session.toggle_recipe("soup"), Some(false));
        assert!(session.selected_recipes().is_empty());
        assert_eq!(session.toggle_recipe("missing"), None);
    }

    #[test]
    fn test_generate_scales_and_merges() {
        let mut session = session();
        session.select_recipe("soup", Some(4));
        session.select_recipe("salad", None);

        let list = session.generate_list().to_vec();
        assert_eq!(list.len(), 2);

        let onion = list.iter().find(|item| item.name == "onion").unwrap();
        assert_eq!(onion.quantity, 4.0);
        assert_eq!(onion.source_recipes, vec!["Soup".to_string(), "Salad".to_string()]);

        let broth = list.iter().find(|item| item.name == "broth").unwrap();
        assert_eq!(broth.quantity, 4.0);
        assert_eq!(broth.unit, "cup");
        assert!(!session.can_undo());
    }

    #[test]
    fn test_generate_skips_missing_recipes() {
        let mut session = session();
        session.selected.push(SelectedRecipe {
            recipe_id: "gone".to_string(),
            servings: 2,
        });
        session.select_recipe("salad", None);

        assert_eq!(session.generate_list().len(), 1);
    }

    #[test]
    fn test_item_edits_are_undoable() {
        let mut session = session();
        session.select_recipe("soup", None);
        session.generate_list();
        let id = session.grocery_list()[0].id.clone();

        assert!(session.toggle_item(&id));
        assert!(session.grocery_list()[0].checked);

        assert!(session.undo());
        assert!(!session.grocery_list()[0].checked);
        assert!(session.redo());
        assert!(session.grocery_list()[0].checked);

        assert_eq!(session.clear_checked(), 1);
        assert_eq!(session.grocery_list().len(), 1);
        assert!(!session.toggle_item("nope"));
    }

    #[test]
    fn test_update_and_delete_item() {
        let mut session = session();
        session.select_recipe("soup", None);
        session.generate_list();
        let id = session.grocery_list()[0].id.clone();

        let update = GroceryItemUpdate {
            quantity: Some(3.0),
            notes: Some(Some("red".to_string())),
            ..Default::default()
        };
        assert!(session.update_item(&id, update));
        assert_eq!(session.grocery_list()[0].quantity, 3.0);
        assert_eq!(session.grocery_list()[0].notes.as_deref(), Some("red"));

        assert!(session.delete_item(&id));
        assert!(session.grocery_list().iter().all(|item| item.id != id));
    }

    #[test]
    fn test_custom_item_provenance() {
        let mut session = session();
        let id = session
            .add_custom_item(Ingredient::new(" paper towels ", 1.0, ""))
            .unwrap();

        let item = session.grocery_list().iter().find(|item| item.id == id).unwrap();
        assert_eq!(item.name, "paper towels");
        assert_eq!(item.unit, "item");
        assert_eq!(item.category, Category::Other);
        assert_eq!(item.source_recipes, vec!["Custom".to_string()]);
        assert!(session.add_custom_item(Ingredient::new("", 1.0, "item")).is_err());
    }

    #[test]
    fn test_empty_shared_list_is_ignored() {
        let mut session = session();
        session.add_custom_item(Ingredient::new("milk", 1.0, "cup")).unwrap();

        assert_eq!(session.import_shared(vec![]), 0);
        assert_eq!(session.grocery_list().len(), 1);
        assert!(session.import_share_link("%%%").is_err());
    }

    #[test]
    fn test_reset_clears_selection_and_list() {
        let mut session = session();
        session.select_recipe("soup", None);
        session.generate_list();

        session.reset();
        assert!(session.selected_recipes().is_empty());
        assert!(session.grocery_list().is_empty());
        assert!(!session.can_undo());
    }

    #[test]
    fn test_store_mode_changes_export_order() {
        let mut session = session();
        session.add_custom_item(Ingredient::new("milk", 1.0, "cup")).unwrap();
        session.add_custom_item(Ingredient::new("beef", 1.0, "lb")).unwrap();

        assert!(session.export_text().starts_with("== Meat =="));
        session.set_store_mode(true);
        assert!(session.export_text().starts_with("== Dairy =="));
        session.set_store_layout(StoreLayout::PerimeterFirst);
        assert!(session.export_text().starts_with("== Meat =="));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let mut store = MemoryStore::new();
        let mut original = session();
        assert!(original.select_recipe("soup", Some(3)));
        original.add_custom_item(Ingredient::new("bread", 1.0, "loaf")).unwrap();
        original.toggle_store_mode();
        original.save(&mut store).unwrap();

        let mut restored = Session::load(AppConfig::default(), &store);
        assert_eq!(restored.selected_recipes(), original.selected_recipes());
        assert_eq!(restored.grocery_list(), original.grocery_list());
        assert!(restored.store_mode());

        assert!(restored.undo());
        assert!(restored.grocery_list().is_empty());
        assert!(restored.can_redo());
    }

    #[test]
    fn test_history_depth_follows_config_on_load() {
        let mut store = MemoryStore::new();
        let mut original = session();
        for name in ["milk", "eggs", "bread"] {
            original.add_custom_item(Ingredient::new(name, 1.0, "item")).unwrap();
        }
        original.save(&mut store).unwrap();

        let mut restored = Session::load(AppConfig::default().with_max_history(1), &store);
        assert_eq!(restored.grocery_list().len(), 3);
        assert!(restored.can_undo());

        assert!(restored.undo());
        assert_eq!(restored.grocery_list().len(), 2);
        assert!(!restored.undo());
    }

    #[test]
    fn test_corrupt_history_keeps_list() {
        let mut store = MemoryStore::new();
        let mut original = session();
        original.add_custom_item(Ingredient::new("milk", 1.0, "cup")).unwrap();
        original.save(&mut store).unwrap();
        store.save_raw(LIST_HISTORY_KEY, "[not history").unwrap();

        let restored = Session::load(AppConfig::default(), &store);
        assert_eq!(restored.grocery_list().len(), 1);
        assert!(!restored.can_undo());
    }
}
