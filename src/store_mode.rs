//! # Store Mode
//!
//! Reorders shopping-list categories to follow a walk through the store.
//! Layouts are static tables; there is no store data source behind them.

use crate::ingredient_model::Category;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category order used when store mode is off
pub const DEFAULT_CATEGORY_ORDER: [Category; 7] = Category::ALL;

/// Named store layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum StoreLayout {
    /// Produce at the entrance, dairy and meat along the back wall
    #[default]
    Default,
    /// Shop the fresh perimeter first
    PerimeterFirst,
}

impl StoreLayout {
    pub const ALL: [StoreLayout; 2] = [StoreLayout::Default, StoreLayout::PerimeterFirst];

    /// Category priority for this layout
    pub fn order(&self) -> &'static [Category] {
        match self {
            StoreLayout::Default => &[
                Category::Produce,
                Category::Dairy,
                Category::Meat,
                Category::Frozen,
                Category::Pantry,
                Category::Spices,
                Category::Other,
            ],
            StoreLayout::PerimeterFirst => &[
                Category::Produce,
                Category::Meat,
                Category::Dairy,
                Category::Frozen,
                Category::Pantry,
                Category::Spices,
                Category::Other,
            ],
        }
    }

    /// Human-readable layout name
    pub fn display_name(&self) -> &'static str {
        match self {
            StoreLayout::Default => "Standard Store Layout",
            StoreLayout::PerimeterFirst => "Perimeter First",
        }
    }

    /// Identifier used on the command line and in config
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreLayout::Default => "default",
            StoreLayout::PerimeterFirst => "perimeter-first",
        }
    }
}

impl fmt::Display for StoreLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "default" | "standard" => Ok(StoreLayout::Default),
            "perimeter-first" | "perimeterfirst" | "perimeter" => Ok(StoreLayout::PerimeterFirst),
            other => Err(format!("Unknown store layout: {other}")),
        }
    }
}

/// Sort categories by their position in a store layout
///
/// The sort is stable. A category missing from the layout sorts after
/// every listed one. The output is always a permutation of the input.
///
/// # Examples
///
/// ```rust
/// use grocery_list::ingredient_model::Category;
/// use grocery_list::store_mode::{reorder_by_store_layout, StoreLayout};
///
/// let ordered = reorder_by_store_layout(
///     &[Category::Meat, Category::Dairy, Category::Produce],
///     StoreLayout::Default,
/// );
/// assert_eq!(ordered, vec![Category::Produce, Category::Dairy, Category::Meat]);
/// ```
pub fn reorder_by_store_layout(categories: &[Category], layout: StoreLayout) -> Vec<Category> {
    let order = layout.order();
    let rank = |category: &Category| {
        order
            .iter()
            .position(|c| c == category)
            .unwrap_or(order.len())
    };

    let mut sorted = categories.to_vec();
    sorted.sort_by_key(rank);
    sorted
}

/// Category order to display, given the store-mode preference
pub fn category_order(store_mode: bool, layout: StoreLayout) -> Vec<Category> {
    if store_mode {
        reorder_by_store_layout(&DEFAULT_CATEGORY_ORDER, layout)
    } else {
        DEFAULT_CATEGORY_ORDER.to_vec()
    }
}
