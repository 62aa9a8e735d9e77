//! # Share Codec
//!
//! Encodes a grocery list into a compact, URL-safe code and back.
//!
//! Each item keeps only its name, quantity, unit, a one-letter category
//! code and a 0/1 checked flag. The JSON array of those records is
//! base64-encoded with the URL-safe alphabet. Decoding assigns fresh
//! `shared-{index}` ids and marks every item as coming from "Shared";
//! notes and original provenance are not carried.
//!
//! Codes whose JSON was URI-component encoded before base64 (a leading
//! `%5B`) are also accepted; they are percent-decoded before parsing.

use crate::dietary::{badge_info, common_dietary_badges};
use crate::errors::ShareDecodeError;
use crate::ingredient_model::{Category, GroceryItem, Recipe};
use crate::patterns::SHARE_LIST_PARAM_REGEX;
use base64::{engine::general_purpose, Engine as _};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::string::FromUtf8Error;

/// Provenance assigned to every decoded item
pub const SHARED_SOURCE: &str = "Shared";

/// Badges shown in a share title at most
const MAX_TITLE_BADGES: usize = 2;

/// Minimal per-item record carried in a share code
#[derive(Debug, Serialize, Deserialize)]
struct CompactItem {
    n: String,
    q: f64,
    u: String,
    c: String,
    k: u8,
}

impl From<&GroceryItem> for CompactItem {
    fn from(item: &GroceryItem) -> Self {
        Self {
            n: item.name.clone(),
            q: item.quantity,
            u: item.unit.clone(),
            c: item.category.share_code().to_string(),
            k: u8::from(item.checked),
        }
    }
}

impl CompactItem {
    fn into_grocery_item(self, index: usize) -> GroceryItem {
        let mut codes = self.c.chars();
        let category = match (codes.next(), codes.next()) {
            (Some(code), None) => Category::from_share_code(code),
            _ => None,
        }
        .unwrap_or(Category::Other);

        GroceryItem {
            id: format!("shared-{}", index),
            name: self.n,
            quantity: self.q,
            unit: self.u,
            category,
            notes: None,
            checked: self.k == 1,
            source_recipes: vec![SHARED_SOURCE.to_string()],
        }
    }
}

/// Percent-encoded `[`, the start of a URI-component-encoded payload
const PERCENT_ENCODED_ARRAY: &str = "%5B";

/// Decode `%XX` escapes; other bytes pass through
fn percent_decode(input: &str) -> Result<String, FromUtf8Error> {
    let bytes = input.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let high = (bytes[i + 1] as char).to_digit(16);
            let low = (bytes[i + 2] as char).to_digit(16);
            if let (Some(high), Some(low)) = (high, low) {
                out.push(((high << 4) + low) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out)
}

/// Encode a grocery list as a URL-safe share code
///
/// # Examples
///
/// ```rust
/// use grocery_list::share::{compress_list_data, decompress_list_data};
///
/// let code = compress_list_data(&[]);
/// assert_eq!(decompress_list_data(&code), Some(vec![]));
/// ```
pub fn compress_list_data(items: &[GroceryItem]) -> String {
    let compact: Vec<CompactItem> = items.iter().map(CompactItem::from).collect();
    let json = serde_json::to_string(&compact).unwrap_or_else(|e| {
        warn!("Failed to serialize share payload: {}", e);
        String::from("[]")
    });

    general_purpose::URL_SAFE_NO_PAD.encode(json.as_bytes())
}

/// Decode a share code, reporting why it could not be decoded
pub fn try_decompress_list_data(code: &str) -> Result<Vec<GroceryItem>, ShareDecodeError> {
    let trimmed = code.trim().trim_end_matches('=');
    let bytes = match general_purpose::URL_SAFE_NO_PAD.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) => general_purpose::STANDARD_NO_PAD.decode(trimmed)?,
    };

    let json = String::from_utf8(bytes)?;
    let compact: Vec<CompactItem> = match serde_json::from_str(&json) {
        Ok(compact) => compact,
        Err(_) if json.starts_with(PERCENT_ENCODED_ARRAY) => {
            serde_json::from_str(&percent_decode(&json)?)?
        }
        Err(e) => return Err(e.into()),
    };

    debug!("Decoded {} shared items", compact.len());
    Ok(compact
        .into_iter()
        .enumerate()
        .map(|(index, item)| item.into_grocery_item(index))
        .collect())
}

/// Decode a share code; `None` for any malformed input
pub fn decompress_list_data(code: &str) -> Option<Vec<GroceryItem>> {
    match try_decompress_list_data(code) {
        Ok(items) => Some(items),
        Err(e) => {
            warn!("Ignoring undecodable share code: {}", e);
            None
        }
    }
}

/// Build a share URL of the form `{base_url}?list={code}`
pub fn generate_share_url(items: &[GroceryItem], base_url: &str) -> String {
    format!("{}?list={}", base_url, compress_list_data(items))
}

/// Extract and decode the `list` parameter of a share URL
pub fn try_parse_share_url(url: &str) -> Result<Vec<GroceryItem>, ShareDecodeError> {
    let code = SHARE_LIST_PARAM_REGEX
        .captures(url)
        .and_then(|captures| captures.name("code"))
        .map(|m| m.as_str())
        .filter(|code| !code.is_empty())
        .ok_or(ShareDecodeError::MissingListParameter)?;

    try_decompress_list_data(code)
}

/// Decode the list carried by a share URL; `None` when absent or malformed
pub fn parse_share_url(url: &str) -> Option<Vec<GroceryItem>> {
    try_parse_share_url(url).ok()
}

/// Title for a shared list, led by up to two dietary labels every recipe shares
pub fn generate_share_title(recipes: &[Recipe], item_count: usize) -> String {
    let title = format!("Grocery List ({} items)", item_count);
    let badges = common_dietary_badges(recipes);

    if badges.is_empty() {
        return title;
    }

    let labels: Vec<&str> = badges
        .iter()
        .take(MAX_TITLE_BADGES)
        .map(|badge| badge_info(*badge).label)
        .collect();

    format!("{} {}", labels.join(" & "), title)
}

/// Share message body: title, badge icons, then the recipe names
pub fn generate_share_text(recipes: &[Recipe], item_count: usize) -> String {
    let badges = common_dietary_badges(recipes);
    let mut text = generate_share_title(recipes, item_count);
    text.push('\n');

    if !badges.is_empty() {
        let icons: Vec<&str> = badges.iter().map(|badge| badge_info(*badge).icon).collect();
        text.push_str(&icons.join(" "));
        text.push('\n');
    }

    text.push_str("\nRecipes:\n");
    for recipe in recipes {
        text.push_str(&format!("- {}\n", recipe.name));
    }

    text
}
