//! # Export
//!
//! Display formatting for merged grocery items: fraction-aware quantity
//! strings, per-category grouping and the plain-text checklist export.

use crate::ingredient_model::{Category, GroceryItem};
use log::debug;
use std::collections::BTreeMap;

/// Grocery items keyed by category. Every category is present, possibly empty.
pub type GroupedItems = BTreeMap<Category, Vec<GroceryItem>>;

/// Fractional parts (in hundredths) rendered as vulgar fraction glyphs
const FRACTION_GLYPHS: &[(i64, &str)] = &[
    (25, "¼"),
    (50, "½"),
    (75, "¾"),
    (33, "⅓"),
    (67, "⅔"),
];

/// Format a quantity for display
///
/// Whole numbers print bare. A fractional part that rounds to a quarter,
/// half, third or two thirds prints as a fraction glyph after the whole
/// part (omitted when zero). Anything else prints with at most two
/// decimals and no trailing zeros.
///
/// # Examples
///
/// ```rust
/// use grocery_list::export::format_quantity;
///
/// assert_eq!(format_quantity(2.0), "2");
/// assert_eq!(format_quantity(1.5), "1½");
/// assert_eq!(format_quantity(0.25), "¼");
/// assert_eq!(format_quantity(2.1), "2.1");
/// ```
pub fn format_quantity(quantity: f64) -> String {
    if quantity == quantity.floor() {
        return format!("{}", quantity);
    }

    let whole = quantity.floor();
    let hundredths = ((quantity - whole) * 100.0).round() as i64;

    if let Some((_, glyph)) = FRACTION_GLYPHS.iter().find(|(h, _)| *h == hundredths) {
        return if whole > 0.0 {
            format!("{}{}", whole, glyph)
        } else {
            glyph.to_string()
        };
    }

    let fixed = format!("{:.2}", quantity);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Render one item as `quantity unit name (notes)`
pub fn format_grocery_item_text(item: &GroceryItem) -> String {
    let quantity = format_quantity(item.quantity);
    match item.notes.as_deref().filter(|n| !n.is_empty()) {
        Some(notes) => format!("{} {} {} ({})", quantity, item.unit, item.name, notes),
        None => format!("{} {} {}", quantity, item.unit, item.name),
    }
}

/// Group items by category, each group sorted by name case-insensitively
///
/// All seven categories are present in the result.
pub fn group_by_category(items: &[GroceryItem]) -> GroupedItems {
    let mut grouped: GroupedItems = Category::ALL.into_iter().map(|c| (c, Vec::new())).collect();

    for item in items {
        grouped.entry(item.category).or_default().push(item.clone());
    }

    for group in grouped.values_mut() {
        group.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    }

    grouped
}

/// Export grouped items as a plain-text checklist in standard category order
///
/// # Examples
///
/// ```rust
/// use grocery_list::export::{export_as_text, group_by_category};
/// use grocery_list::ingredient_model::{Category, GroceryItem};
///
/// let item = GroceryItem {
///     id: "1".to_string(),
///     name: "onion".to_string(),
///     quantity: 2.0,
///     unit: "item".to_string(),
///     category: Category::Produce,
///     notes: None,
///     checked: false,
///     source_recipes: vec!["Soup".to_string()],
/// };
///
/// let text = export_as_text(&group_by_category(&[item]));
/// assert_eq!(text, "== Produce ==\n[ ] 2 item onion");
/// ```
pub fn export_as_text(grouped: &GroupedItems) -> String {
    export_as_text_with_order(grouped, &Category::ALL)
}

/// Export grouped items following a custom category order (store mode)
///
/// Empty categories are skipped and category blocks are separated by a
/// blank line.
pub fn export_as_text_with_order(grouped: &GroupedItems, order: &[Category]) -> String {
    let mut lines = Vec::new();

    for category in order {
        let Some(items) = grouped.get(category).filter(|items| !items.is_empty()) else {
            continue;
        };

        lines.push(format!("\n== {} ==", category));
        for item in items {
            let checkbox = if item.checked { "[x]" } else { "[ ]" };
            lines.push(format!("{} {}", checkbox, format_grocery_item_text(item)));
        }
    }

    debug!("Exported {} lines of grocery text", lines.len());
    lines.join("\n").trim().to_string()
}
