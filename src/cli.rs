use clap::{Parser, Subcommand};
use grocery_list::store_mode::StoreLayout;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Build a merged grocery list from recipes", long_about = None)]
pub struct Cli {
    /// Directory holding the persisted session (overrides GROCERY_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available recipes with their dietary badges
    Recipes,
    /// Select a recipe, optionally at a number of servings
    Select {
        recipe_id: String,
        #[arg(long)]
        servings: Option<u32>,
    },
    /// Remove a recipe from the selection
    Deselect { recipe_id: String },
    /// Build the grocery list from the selected recipes
    Generate,
    /// Print the grocery list grouped by category
    Show {
        /// Order categories the way a store is walked
        #[arg(long)]
        store_mode: bool,
        /// Store layout: default or perimeter-first
        #[arg(long)]
        layout: Option<StoreLayout>,
    },
    /// Check or uncheck an item
    Check { item_id: String },
    /// Add an item from a free-text line such as "2 cups flour"
    Add { line: String },
    /// Remove all checked items
    ClearChecked,
    /// Undo the last list edit
    Undo,
    /// Redo the last undone edit
    Redo,
    /// Print a share link for the current list
    Share {
        #[arg(long, default_value = "https://grocery.example/list")]
        base_url: String,
    },
    /// Replace the list with one from a share link or code
    Import { link: String },
    /// Clear the selection and the list
    Reset,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
